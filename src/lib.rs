//! A library implementing the clause database of a conflict-driven clause-learning SAT solver.
//!
//! stoat_sat is the storage core of a CDCL solver: the representation of original and learned
//! clauses, the memory strategy which keeps propagation cache-friendly, and the periodic
//! reduction which bounds the learned-clause population by discarding low-value clauses and
//! reclaiming their memory through a relocating garbage collector.
//!
//! Search procedures such as conflict analysis, decision heuristics, and restarts are not part
//! of the library.
//! Instead, the library exposes the entry points such procedures rest on, together with unit
//! propagation, as propagation is the primary consumer of the clause representation.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context](crate::context::Context).
//!
//! A context owns a handful of databases, and most interaction happens through methods on the
//! context which coordinate those databases:
//! - Clauses are stored in a [clause database](crate::db::clause), and are accessed through
//!   [references](crate::db::ClauseRef) into a backing arena.
//!   The internal structure of a stored clause is private, with methods to read and revise
//!   clause metadata.
//! - A valuation, the decision levels and reasons of atoms, and the trail of assignments are
//!   stored in an [atom database](crate::db::atom).
//! - [Watch lists](crate::db::watches) record which clauses are watching which literals,
//!   together with a blocking literal to avoid touching clause memory where possible.
//!
//! Useful starting points:
//! - [Context::add_clause](crate::context::Context::add_clause) and
//!   [Context::learn_clause](crate::context::Context::learn_clause) for how clauses enter the
//!   database.
//! - [ClauseDB::reduce](crate::db::clause::ClauseDB::reduce) for the reduction of the learned
//!   clause population and the collection of garbage.
//! - The [clause structures](crate::structures::clause) for the abstract elements stored
//!   (literals, clauses, and their canonical representations).
//!
//! # Example
//!
//! ```rust
//! # use stoat_sat::config::Config;
//! # use stoat_sat::context::Context;
//! let mut the_context = Context::from_config(Config::default());
//!
//! // Atoms are introduced before use, and literals pair an atom with a polarity by sign.
//! let atoms = the_context.fresh_atoms(2).unwrap();
//! let p = atoms[0] as i32;
//! let q = atoms[1] as i32;
//!
//! // p, together with (-p or q), propagates q.
//! assert!(the_context.add_clause(vec![p]).is_ok());
//! assert!(the_context.add_clause(vec![-p, q]).is_ok());
//! assert!(the_context.propagate().is_ok());
//!
//! assert_eq!(the_context.atom_db.value_of_literal(q), Some(true));
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library, with a variety of targets defined to
//! help narrow output to relevant parts of the library.
//! The targets are listed in [misc::log].
//!
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/)
//! logs related to reduction can be filtered with `RUST_LOG=reduction …`.

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::derivable_impls)]

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod db;

pub mod misc;
pub mod procedures;
