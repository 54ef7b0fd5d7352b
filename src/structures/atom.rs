//! Atoms, the variables of a formula.
//!
//! Atoms are identified by (the value of) an unsigned integer, with atoms introduced in
//! sequence and numbered from 1.
//!
//! The atom 0 is reserved.
//! Externally, 0 terminates a clause in DIMACS representations, and so never identifies an
//! atom.
//! Internally, the reservation allows tables indexed by atoms to be read without adjustment.

/// An atom, aka. a variable.
pub type Atom = u32;
