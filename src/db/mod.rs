/*!
Databases for holding information relevant to a solve.

- [The clause database](crate::db::clause)
  + A collection of clauses backed by an arena, each accessed by a clause reference. \
    From an external perspective there are two important kinds of clause:
    * Original clauses \
      Original clauses are added to the context from some external source.
      These make up the CNF formula whose satisfiability may be determined, and are never
      discarded.
    * Learned clauses \
      Clauses added to the context by some procedure (e.g. via resolution during conflict
      analysis).
      Every learned clause is a consequence of the original clauses, and so is redundant and
      may be discarded.

- [The atom database](crate::db::atom)
  + Properties of atoms, namely:
    * The valuation.
    * The level at which, and reason for which, an atom was assigned.
    * The trail of assignments, split into decision levels.

- [The watch databases](crate::db::watches)
  + For each literal, the clauses watching that literal.
*/

pub mod atom;
pub mod clause;
mod keys;
pub mod watches;

pub use keys::*;

/// The index of a decision level.
pub type LevelIndex = u32;
