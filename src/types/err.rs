/*!
Error types used in the library.

- Most of these are very unlikely to occur during use.
- Some of these are internally expected --- e.g. a BCP conflict is used to control the flow of
  a solve, and a unit clause error diverts a would-be stored clause to the trail.

Names of the error enums --- for the most part --- overlap with corresponding structs.
*/

use crate::{db::ClauseRef, structures::literal::CLiteral};

/// A union of varied error kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error in the clause database.
    ClauseDB(ClauseDBError),

    /// An error in the atom database.
    AtomDB(AtomDBError),

    /// An error related to BCP.
    BCP(BCPError),

    /// A conflict at the root level has been observed, and so the formula is unsatisfiable.
    FundamentalConflict,
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// Some attempt was made to store a unit clause.
    ///
    /// Unit clauses belong on the trail as root-level assignments, and the literal is
    /// returned for this purpose.
    UnitClause(CLiteral),

    /// The clause is a tautology, and so never stored.
    Tautology,

    /// A stored clause is missing.
    Missing,

    /// All possible clause references have been used.
    StorageExhausted,

    /// The allocator could not obtain memory for a clause.
    OutOfMemory,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Errors in the atom database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AtomDBError {
    /// There are no more fresh atoms.
    AtomsExhausted,
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BCPError {
    /// A conflict was found.
    /// This is expected from time to time, and a learning opportunity.
    Conflict(ClauseRef),

    /// Some corruption in the watched literals of a clause.
    /// This is unexpected.
    CorruptWatch,
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        ErrorKind::BCP(e)
    }
}
