/*!
A database of clause related things.

Clauses live in an arena of compact variadic records and are accessed through
[references](ClauseRef).
The database keeps a registry of every live clause, eager statistics on the clause
population, and the state of the reduction scheduler.

The lifecycle of a stored clause:

1. **Store**: [new_clause](ClauseDB::new_clause) canonicalizes the literals, allocates a
   record, and appends the reference to the registry.
2. **Mutate**: literals may be permuted, and the size may shrink through strengthening, with
   [shrink_fixup](ClauseDB::shrink_fixup) restoring invariants after any size reduction.
3. **Mark**: [mark_garbage](ClauseDB::mark_garbage) flags the clause for collection.
   No memory moves.
4. **Collect**: [collect_garbage](ClauseDB::collect_garbage) compacts survivors into a fresh
   arena, rewrites every reference it is aware of, and retires the old arena.

Fields of the database are private to ensure the use of methods which may be needed to uphold
invariants.
*/

mod arena;
mod collect;
mod get;
mod reduce;

pub use arena::{Payload, Profile, LD_MAX_GLUE, MAX_GLUE};

use arena::Arena;

use crate::{
    config::{dbs::ClauseDBConfig, Config, LBD},
    db::ClauseRef,
    misc::log::targets::{self},
    structures::{
        clause::{CClause, Clause, ClauseSource},
        literal::{canonical_order, Literal},
    },
    types::err::{self},
};

/// A database of clause related things.
pub struct ClauseDB {
    /// Clause database specific configuration parameters.
    config: ClauseDBConfig,

    /// The arena backing every stored clause.
    arena: Arena,

    /// References to every live clause, in order of storage.
    clauses: Vec<ClauseRef>,

    /// A count of live learned clauses.
    redundant_count: usize,

    /// A count of live original clauses.
    irredundant_count: usize,

    /// Bytes of live original clauses.
    irredundant_bytes: usize,

    /// Bytes of clauses marked garbage and not yet collected.
    garbage_bytes: usize,

    /// Bytes reclaimed by collections, in total.
    collected_bytes: usize,

    /// The monotonic counter behind analyzed stamps.
    analyzed_stamp: u64,

    /// The conflict count at which the next reduction happens.
    reduce_limit: usize,

    /// The growth applied to the reduce limit after a reduction.
    reduce_increment: usize,

    /// The growth applied to the reduce increment after a reduction, decayed towards one.
    increment_delta: usize,

    /// The analyzed stamp at the time of the last reduction.
    ///
    /// Only clauses untouched since then are reduction candidates.
    analyzed_limit: u64,

    /// The conflict count at the time of the last reduction.
    conflicts_at_last_reduce: usize,

    /// The count of root-level assignments at the last scan for satisfied clauses.
    fixed_at_last_collect: usize,

    /// The maximum size among candidates kept by the last reduction.
    kept_size: usize,

    /// The maximum glue among candidates kept by the last reduction.
    kept_glue: LBD,

    /// A count of reductions.
    reductions: usize,

    /// A count of clauses marked garbage by the reduction policy.
    reduced: usize,

    /// A count of collections.
    collections: usize,
}

impl ClauseDB {
    /// A new [ClauseDB] with local configuration options derived from `config`.
    pub fn new(config: &Config) -> Self {
        ClauseDB {
            arena: Arena::new(),
            clauses: Vec::default(),

            redundant_count: 0,
            irredundant_count: 0,
            irredundant_bytes: 0,
            garbage_bytes: 0,
            collected_bytes: 0,

            analyzed_stamp: 0,

            reduce_limit: config.clause_db.reduce_init.value,
            reduce_increment: config.clause_db.reduce_init.value,
            increment_delta: config.clause_db.reduce_inc.value,
            analyzed_limit: 0,
            conflicts_at_last_reduce: 0,
            fixed_at_last_collect: 0,
            kept_size: 0,
            kept_glue: 0,

            reductions: 0,
            reduced: 0,
            collections: 0,

            config: config.clause_db.clone(),
        }
    }

    /// Stores a clause, and returns the reference to the stored clause.
    ///
    /// The literals are canonicalized first: sorted by the [canonical
    /// order](crate::structures::literal::canonical_order) and deduplicated, with
    /// tautologies, empty clauses, and unit clauses diverted as errors.
    /// As a consequence, no stored clause contains duplicate literals or a literal together
    /// with its negation.
    ///
    /// For learned clauses the given glue is clamped to [MAX_GLUE] and to the size of the
    /// clause.
    /// Glue is ignored for original clauses.
    pub fn new_clause(
        &mut self,
        clause: CClause,
        source: ClauseSource,
        glue: LBD,
    ) -> Result<ClauseRef, err::ClauseDBError> {
        let mut literals = clause.canonical();
        literals.sort_by(canonical_order);
        literals.dedup();

        for pair in literals.windows(2) {
            if pair[0].atom() == pair[1].atom() {
                log::trace!(target: targets::CLAUSE_DB, "tautology: {}", literals.as_dimacs(false));
                return Err(err::ClauseDBError::Tautology);
            }
        }

        match literals.len() {
            0 => return Err(err::ClauseDBError::EmptyClause),
            1 => return Err(err::ClauseDBError::UnitClause(literals[0])),
            _ => {}
        }

        let size = literals.len();
        let redundant = match source {
            ClauseSource::Original => false,
            ClauseSource::Learned => true,
        };
        let glue = match redundant {
            true => std::cmp::min(glue, std::cmp::min(size as LBD, MAX_GLUE)),
            false => 0,
        };

        // Whether the record is extended with an analyzed stamp, and whether the position of
        // the last watch replacement is saved.
        let have_analyzed = redundant
            && self.config.keep_size.value < size
            && self.config.keep_glue.value < glue;
        let have_pos = have_analyzed || self.config.pos_size.value <= size;

        let the_ref = self.arena.allocate(
            &literals,
            Profile {
                analyzed: have_analyzed,
                pos: have_pos,
            },
            redundant,
            glue,
        )?;

        if redundant {
            self.redundant_count += 1;
        } else {
            self.irredundant_count += 1;
            self.irredundant_bytes += self.arena.bytes(the_ref);
        }

        self.clauses.push(the_ref);
        log::trace!(target: targets::CLAUSE_DB, "{the_ref}: {}", literals.as_dimacs(false));

        Ok(the_ref)
    }

    /// Marks the clause as garbage, to be reclaimed by the next collection.
    ///
    /// Idempotent, and eager with respect to the population statistics, so counts are
    /// correct between the mark and the collection.
    pub fn mark_garbage(&mut self, the_ref: ClauseRef) {
        if self.arena.is_garbage(the_ref) {
            return;
        }

        let bytes = self.arena.bytes(the_ref);
        if self.arena.is_redundant(the_ref) {
            debug_assert!(0 < self.redundant_count);
            self.redundant_count -= 1;
        } else {
            debug_assert!(0 < self.irredundant_count);
            debug_assert!(bytes <= self.irredundant_bytes);
            self.irredundant_count -= 1;
            self.irredundant_bytes -= bytes;
        }
        self.garbage_bytes += bytes;

        self.arena.set_garbage(the_ref, true);
        log::trace!(target: targets::CLAUSE_DB, "{the_ref}: marked garbage");
    }

    /// Notes the use of the clause by conflict analysis.
    ///
    /// Extended clauses have their analyzed stamp refreshed, which defers their candidacy
    /// for reduction.
    /// For other clauses this is a no-op, as those are kept regardless of use.
    pub fn note_analyzed(&mut self, the_ref: ClauseRef) {
        if self.arena.has_analyzed(the_ref) {
            self.analyzed_stamp += 1;
            self.arena.set_analyzed(the_ref, self.analyzed_stamp);
        }
    }

    /// Whether the clause is predicted to survive the next reduction.
    ///
    /// Original and blocked clauses are kept anyhow, and a learned clause no larger and of
    /// no higher glue than the profile kept by the last reduction is expected to be kept by
    /// the next.
    pub fn likely_to_be_kept(&self, the_ref: ClauseRef) -> bool {
        if !self.arena.is_redundant(the_ref) || self.arena.blocked(the_ref) != 0 {
            return true;
        }
        self.arena.size(the_ref) <= self.kept_size && self.arena.glue(the_ref) <= self.kept_glue
    }
}
