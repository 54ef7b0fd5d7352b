/*!
Procedures over the databases of a context.

Only [boolean constraint propagation](crate::procedures::bcp) belongs to the library, as
propagation is the primary consumer of the clause representation.
Conflict analysis, decisions, restarts, and the rest of a solve loop are expected from the
surrounding engine.
*/

pub mod bcp;
