/*!
The context, which owns the databases and coordinates operations across them.

A context is built from a [configuration](crate::config::Config) and exposes the entry
points a search engine rests on:
- [add_clause](Context::add_clause) and [learn_clause](Context::learn_clause), for extending
  the formula.
- [propagate](crate::procedures::bcp), for the consequences of the current valuation.
- [should_reduce](Context::should_reduce) and [reduce](Context::reduce), for bounding the
  learned clause population.

# Example

```rust
# use stoat_sat::config::Config;
# use stoat_sat::context::Context;
# use stoat_sat::types::err::BCPError;
let mut the_context = Context::from_config(Config::default());

let atoms = the_context.fresh_atoms(2).unwrap();
let (p, q) = (atoms[0] as i32, atoms[1] as i32);

assert!(the_context.add_clause(vec![p, q]).is_ok());
assert!(the_context.add_clause(vec![p, -q]).is_ok());

the_context.push_fresh_decision(-p);
let result = the_context.propagate();

// Valuing p false forces q by the first clause and conflicts with the second.
assert!(matches!(result, Err(BCPError::Conflict(_))));
```
*/

mod counters;
pub use counters::Counters;

use crate::{
    config::{Config, LBD},
    db::{
        atom::AtomDB,
        clause::ClauseDB,
        watches::{Watcher, Watches},
        ClauseRef, LevelIndex,
    },
    structures::{
        atom::Atom,
        clause::{CClause, ClauseSource},
        literal::CLiteral,
    },
    types::err::{self, ErrorKind},
};

/// A context, to which clauses are added and within which solve procedures take place.
pub struct Context {
    /// The configuration of the context.
    pub config: Config,

    /// Counters over the lifetime of the context.
    pub counters: Counters,

    /// The atom database.
    pub atom_db: AtomDB,

    /// The clause database.
    pub clause_db: ClauseDB,

    /// The watch databases.
    pub watches: Watches,
}

impl Context {
    /// A context from some given configuration.
    pub fn from_config(config: Config) -> Self {
        Context {
            counters: Counters::default(),
            atom_db: AtomDB::default(),
            clause_db: ClauseDB::new(&config),
            watches: Watches::default(),
            config,
        }
    }

    /// A fresh atom, with every database extended to cover it.
    pub fn fresh_atom(&mut self) -> Result<Atom, ErrorKind> {
        let atom = self.atom_db.fresh_atom()?;
        self.watches.grow_to(self.atom_db.atom_count());
        Ok(atom)
    }

    /// A count of fresh atoms, in order of introduction.
    pub fn fresh_atoms(&mut self, count: usize) -> Result<Vec<Atom>, ErrorKind> {
        let mut atoms = Vec::with_capacity(count);
        for _ in 0..count {
            atoms.push(self.fresh_atom()?);
        }
        Ok(atoms)
    }

    /// Adds a clause from the original formula.
    ///
    /// The clause is canonicalized on the way in:
    /// - A tautology is dropped, with `None` returned.
    /// - A unit clause is recorded as a root-level assignment rather than stored, with
    ///   `None` returned.
    ///   A unit conflicting with the root-level valuation is a fundamental conflict, and so
    ///   an error.
    /// - Any other clause is stored and watched, with the reference returned.
    pub fn add_clause(&mut self, clause: impl Into<CClause>) -> Result<Option<ClauseRef>, ErrorKind> {
        match self
            .clause_db
            .new_clause(clause.into(), ClauseSource::Original, 0)
        {
            Ok(the_ref) => {
                self.watch_clause(the_ref);
                Ok(Some(the_ref))
            }

            Err(err::ClauseDBError::Tautology) => Ok(None),

            Err(err::ClauseDBError::UnitClause(literal)) => {
                match self.atom_db.fixed(literal) {
                    Some(true) => Ok(None),
                    Some(false) => Err(ErrorKind::FundamentalConflict),
                    None => {
                        debug_assert_eq!(self.atom_db.level(), 0);
                        self.atom_db.assign(literal, None);
                        Ok(None)
                    }
                }
            }

            Err(e) => Err(e.into()),
        }
    }

    /// Stores a learned clause with the given glue, and watches its first two literals.
    ///
    /// The clause is expected from conflict analysis, and so free of duplicate literals and
    /// tautologies, though canonicalization applies as for any stored clause.
    pub fn learn_clause(
        &mut self,
        clause: impl Into<CClause>,
        glue: LBD,
    ) -> Result<ClauseRef, ErrorKind> {
        let the_ref = self
            .clause_db
            .new_clause(clause.into(), ClauseSource::Learned, glue)?;
        self.watch_clause(the_ref);
        Ok(the_ref)
    }

    /// Watches the first two literals of the clause, each with the other as the blocking
    /// literal.
    fn watch_clause(&mut self, the_ref: ClauseRef) {
        let literals = self.clause_db.literals(the_ref);
        let size = literals.len() as u32;
        let (first, second) = (literals[0], literals[1]);

        self.watches.watch(
            first,
            Watcher {
                blit: second,
                size,
                clause: the_ref,
            },
        );
        self.watches.watch(
            second,
            Watcher {
                blit: first,
                size,
                clause: the_ref,
            },
        );
    }

    /// Opens a fresh decision level on the trail with the given literal as its decision.
    pub fn push_fresh_decision(&mut self, literal: CLiteral) {
        self.counters.total_decisions += 1;
        self.atom_db.push_fresh_decision(literal);
    }

    /// Removes every decision level above the given level.
    pub fn backjump(&mut self, target: LevelIndex) {
        self.atom_db.backjump(target);
    }

    /// Whether a reduction of the learned clause population is due.
    pub fn should_reduce(&self) -> bool {
        self.clause_db.should_reduce(self.counters.total_conflicts)
    }

    /// Runs one reduction epoch over the clause database.
    ///
    /// Returns the count of bytes reclaimed by the collection.
    pub fn reduce(&mut self) -> Result<usize, ErrorKind> {
        let collected = self.clause_db.reduce(
            &mut self.atom_db,
            &mut self.watches,
            self.counters.total_conflicts,
        )?;
        Ok(collected)
    }
}
