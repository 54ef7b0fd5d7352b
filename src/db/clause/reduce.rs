//! Reduction of the learned clause population.
//!
//! Reduction runs on a conflict-count schedule.
//! One epoch protects reasons, marks satisfied and useless clauses as garbage, collects, and
//! then unprotects reasons and grows the schedule, so that later epochs are further apart.

use crate::{
    db::{atom::AtomDB, watches::Watches, ClauseRef},
    misc::log::targets::{self},
    structures::literal::Literal,
    types::err::{self},
};

use super::ClauseDB;

impl ClauseDB {
    /// Whether a reduction is due at the given conflict count.
    pub fn should_reduce(&self, conflicts: usize) -> bool {
        self.config.reduce.value && self.reduce_limit <= conflicts
    }

    /// Protects every clause acting as the reason of an assignment above the root level.
    ///
    /// Reduction does not unwind the trail, and so reasons must be spared by the collector.
    /// Root-level assignments are permanent and their reasons are never revisited, so those
    /// need no protection.
    fn protect_reasons(&mut self, atom_db: &AtomDB) {
        for literal in atom_db.trail() {
            let atom = literal.atom();
            match atom_db.level_of(atom) {
                None | Some(0) => continue,
                Some(_) => {}
            }
            if let Some(reason) = atom_db.reason_of(atom) {
                self.arena.set_reason(reason, true);
            }
        }
    }

    /// The counterpart of [protect_reasons](ClauseDB::protect_reasons).
    fn unprotect_reasons(&mut self, atom_db: &AtomDB) {
        for literal in atom_db.trail() {
            let atom = literal.atom();
            match atom_db.level_of(atom) {
                None | Some(0) => continue,
                Some(_) => {}
            }
            if let Some(reason) = atom_db.reason_of(atom) {
                debug_assert!(self.arena.is_reason(reason));
                self.arena.set_reason(reason, false);
            }
        }
    }

    /// Determines which learned clauses are considered not useful and marks those as
    /// garbage, for a subsequent collection.
    ///
    /// Candidates are the learned clauses which are not blocked, not protected as reasons,
    /// not already marked, and which carry an analyzed stamp no fresher than the stamp limit
    /// of the last reduction.
    /// The least useful half of the candidates is marked.
    ///
    /// The maximum size and glue over the kept half are published, as a clause within both
    /// bounds can be predicted to survive the next reduction too (see
    /// [likely_to_be_kept](ClauseDB::likely_to_be_kept)).
    pub fn mark_useless_redundant_clauses_as_garbage(&mut self) {
        let mut stack: Vec<ClauseRef> = Vec::with_capacity(self.redundant_count);

        for the_ref in self.clauses.iter().copied() {
            if !self.arena.is_redundant(the_ref) {
                continue; // keep irredundant
            }
            if self.arena.blocked(the_ref) != 0 {
                continue; // keep blocked clauses
            }
            if self.arena.is_reason(the_ref) {
                continue; // need to keep reasons
            }
            if self.arena.is_garbage(the_ref) {
                continue; // already marked
            }
            if !self.arena.has_analyzed(the_ref) {
                continue;
            }
            if self.analyzed_limit < self.arena.analyzed(the_ref) {
                continue;
            }
            stack.push(the_ref);
        }

        // The final comparison on references makes the order total, for reproducibility.
        if self.config.reduce_glue.value {
            stack.sort_by(|&a, &b| {
                if self.arena.less_useful(a, b) {
                    std::cmp::Ordering::Less
                } else if self.arena.less_useful(b, a) {
                    std::cmp::Ordering::Greater
                } else {
                    a.cmp(&b)
                }
            });
        } else {
            stack.sort_by(|&a, &b| {
                if self.arena.analyzed_earlier(a, b) {
                    std::cmp::Ordering::Less
                } else if self.arena.analyzed_earlier(b, a) {
                    std::cmp::Ordering::Greater
                } else {
                    a.cmp(&b)
                }
            });
        }

        let target = stack.len() / 2;
        for the_ref in stack.iter().take(target).copied() {
            log::debug!(target: targets::REDUCTION, "{the_ref}: marked useless, to be collected");
            self.mark_garbage(the_ref);
            self.reduced += 1;
        }

        self.kept_size = 0;
        self.kept_glue = 0;
        for the_ref in stack.iter().skip(target).copied() {
            self.kept_size = std::cmp::max(self.kept_size, self.arena.size(the_ref));
            self.kept_glue = std::cmp::max(self.kept_glue, self.arena.glue(the_ref));
        }

        log::info!(
            target: targets::REDUCTION,
            "reduction {}: maximum kept size {} glue {}",
            self.reductions, self.kept_size, self.kept_glue,
        );
    }

    /// Runs one reduction epoch, and returns the count of bytes reclaimed.
    ///
    /// An epoch with no candidates is a no-op on the clause population which still updates
    /// the schedule.
    /// Afterwards the limit for the next epoch is pushed back by the (growing) increment,
    /// and the analyzed stamp limit is refreshed, so the next epoch only considers clauses
    /// which were not used in the meantime.
    pub fn reduce(
        &mut self,
        atom_db: &mut AtomDB,
        watches: &mut Watches,
        conflicts: usize,
    ) -> Result<usize, err::ClauseDBError> {
        self.reductions += 1;
        log::info!(target: targets::REDUCTION, "reduction {} at {conflicts} conflicts", self.reductions);

        self.protect_reasons(atom_db);
        self.mark_satisfied_clauses_as_garbage(atom_db);
        self.mark_useless_redundant_clauses_as_garbage();
        let collected = self.collect_garbage(atom_db, watches)?;
        self.unprotect_reasons(atom_db);

        self.reduce_limit = conflicts + self.reduce_increment;
        self.reduce_increment += self.increment_delta;
        if 1 < self.increment_delta {
            self.increment_delta -= 1;
        }
        self.analyzed_limit = self.analyzed_stamp;
        self.conflicts_at_last_reduce = conflicts;

        Ok(collected)
    }
}
