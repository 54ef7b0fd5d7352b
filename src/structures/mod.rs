/*!
The abstract elements of a formula and their representations.

- [Atoms](crate::structures::atom)
- [Literals](crate::structures::literal)
- [Clauses](crate::structures::clause)
*/

pub mod atom;
pub mod clause;
pub mod literal;
