//! Garbage collection, called from reduction and usable from any root-level context.
//!
//! Collection is relocating: survivors are compacted into a fresh arena in registry order,
//! which keeps their relative order and gives some cache locality, and every reference the
//! database is aware of is rewritten.
//! Between the copy and rewrite phases references straddle the two arenas, so the rewrite
//! must visit every reference holder before anything else observes the database.

use crate::{
    db::{atom::AtomDB, watches::Watches, ClauseRef},
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

use super::{arena::Arena, ClauseDB};

/// The root-level standing of a clause.
enum FixedStatus {
    /// The clause contains a root-level satisfied literal.
    Satisfied,

    /// The clause contains a root-level falsified literal, and no satisfied one.
    Falsified,

    /// The clause contains no root-level assigned literal.
    Neither,
}

impl ClauseDB {
    /// The root-level standing of the clause on the given valuation.
    fn clause_contains_fixed_literal(&self, atom_db: &AtomDB, the_ref: ClauseRef) -> FixedStatus {
        let mut status = FixedStatus::Neither;
        for literal in self.arena.literals(the_ref) {
            match atom_db.fixed(*literal) {
                Some(true) => return FixedStatus::Satisfied,
                Some(false) => status = FixedStatus::Falsified,
                None => {}
            }
        }
        status
    }

    /// Flushes root-level falsified literals out of the clause.
    ///
    /// The clause data is not reallocated, only the recorded size is adjusted, so watchers
    /// caching the old size are refreshed during the next collection.
    /// A clause which would be left with fewer than two literals is left alone.
    fn remove_falsified_literals(&mut self, atom_db: &AtomDB, the_ref: ClauseRef) {
        let mut num_non_false = 0;
        for literal in self.arena.literals(the_ref) {
            if atom_db.fixed(*literal) != Some(false) {
                num_non_false += 1;
                if num_non_false == 2 {
                    break;
                }
            }
        }
        if num_non_false < 2 {
            return;
        }

        let size = self.arena.size(the_ref);
        let literals = self.arena.literals_mut(the_ref);
        let mut keep = 0;
        for index in 0..size {
            let literal = literals[index];
            debug_assert!(atom_db.fixed(literal) != Some(true));
            if atom_db.fixed(literal) == Some(false) {
                continue;
            }
            literals[keep] = literal;
            keep += 1;
        }

        self.arena.set_size(the_ref, keep);
        self.arena.shrink_fixup(the_ref);

        let flushed = size - keep;
        let bytes = flushed * std::mem::size_of::<CLiteral>();
        if !self.arena.is_redundant(the_ref) {
            debug_assert!(bytes <= self.irredundant_bytes);
            self.irredundant_bytes -= bytes;
        }
        self.collected_bytes += bytes;

        log::debug!(target: targets::COLLECTION, "{the_ref}: flushed {flushed} root-falsified literals");
    }

    /// Marks root-level satisfied clauses as garbage and flushes root-level falsified
    /// literals from the remaining clauses.
    ///
    /// Only needed, and only run, if there are new root-level assignments since the last
    /// scan.
    pub fn mark_satisfied_clauses_as_garbage(&mut self, atom_db: &AtomDB) {
        if atom_db.fixed_count() <= self.fixed_at_last_collect {
            return;
        }
        self.fixed_at_last_collect = atom_db.fixed_count();

        log::debug!(target: targets::COLLECTION, "marking satisfied clauses and flushing falsified literals");

        for index in 0..self.clauses.len() {
            let the_ref = self.clauses[index];
            if self.arena.is_garbage(the_ref) {
                continue;
            }
            match self.clause_contains_fixed_literal(atom_db, the_ref) {
                FixedStatus::Satisfied => self.mark_garbage(the_ref),
                FixedStatus::Falsified => self.remove_falsified_literals(atom_db, the_ref),
                FixedStatus::Neither => {}
            }
        }
    }

    /// Flushes the watch lists: watchers of collectable clauses are dropped, surviving
    /// watchers are redirected to the new arena, and the cached size and blocking literal of
    /// shrunken clauses are refreshed.
    fn flush_watches(&self, to: &Arena, watches: &mut Watches) {
        for atom in 1..watches.atom_count() {
            for polarity in [false, true] {
                let watched = CLiteral::new(atom as Atom, polarity);
                let list = watches.list_mut(watched);

                let mut keep = 0;
                for index in 0..list.len() {
                    let mut watcher = list[index];
                    if self.arena.is_collectable(watcher.clause) {
                        continue;
                    }
                    debug_assert!(self.arena.is_moved(watcher.clause));
                    watcher.clause = self.arena.forward(watcher.clause);

                    let size = to.size(watcher.clause) as u32;
                    if size < watcher.size {
                        // Root-level falsified literals were flushed since the watch was
                        // made, so the cached size and blocking literal are refreshed.
                        let literals = to.literals(watcher.clause);
                        let blit_position = (literals[0] == watched) as usize;
                        debug_assert_eq!(literals[1 - blit_position], watched);
                        watcher.blit = literals[blit_position];
                        watcher.size = size;
                    } else {
                        debug_assert_eq!(size, watcher.size);
                    }

                    list[keep] = watcher;
                    keep += 1;
                }
                list.truncate(keep);
            }
        }
    }

    /// Collects garbage clauses and compacts the survivors, rewriting the registry, the
    /// reasons on the trail, and the watch lists.
    ///
    /// Returns the count of bytes reclaimed.
    pub fn collect_garbage(
        &mut self,
        atom_db: &mut AtomDB,
        watches: &mut Watches,
    ) -> Result<usize, err::ClauseDBError> {
        self.collections += 1;

        // Size the survivor arena.
        let mut moved_words = 0;
        let mut moved_clauses = 0;
        let mut collected_bytes = 0;
        let mut collected_clauses = 0;
        for the_ref in self.clauses.iter().copied() {
            if self.arena.is_collectable(the_ref) {
                collected_bytes += self.arena.bytes(the_ref);
                collected_clauses += 1;
            } else {
                moved_words += self.arena.words(the_ref);
                moved_clauses += 1;
            }
        }

        log::debug!(
            target: targets::COLLECTION,
            "collection {}: moving {} bytes of {moved_clauses} clauses",
            self.collections,
            moved_words * std::mem::size_of::<u32>(),
        );

        let mut to = Arena::with_capacity(moved_words)?;

        // Copy survivors, leaving a forwarding reference at each old location.
        for the_ref in self.clauses.iter().copied() {
            if self.arena.is_collectable(the_ref) {
                continue;
            }
            let fresh = self.arena.copy_to(the_ref, &mut to)?;
            self.arena.set_forward(the_ref, fresh);
            log::trace!(target: targets::COLLECTION, "{the_ref}: moved to {fresh}");
        }

        // Rewrite reasons on the trail.
        //
        // A reason above the root level is protected, and so moved.
        // A root-level reason may have been collected, in which case the recorded reason is
        // cleared rather than left stale, as the assignment is permanent and the reason is
        // never revisited.
        for index in 0..atom_db.trail().len() {
            let atom = atom_db.trail()[index].atom();
            if let Some(reason) = atom_db.reason_of(atom) {
                if self.arena.is_moved(reason) {
                    atom_db.set_reason(atom, Some(self.arena.forward(reason)));
                } else {
                    debug_assert!(self.arena.is_collectable(reason));
                    atom_db.set_reason(atom, None);
                }
            }
        }

        // Rewrite the watch lists.
        self.flush_watches(&to, watches);

        // Rewrite the registry.
        let mut keep = 0;
        for index in 0..self.clauses.len() {
            let the_ref = self.clauses[index];
            if self.arena.is_collectable(the_ref) {
                log::trace!(target: targets::COLLECTION, "{the_ref}: deleted");
            } else {
                self.clauses[keep] = self.arena.forward(the_ref);
                keep += 1;
            }
        }
        self.clauses.truncate(keep);

        // Retire the old arena, releasing every old record at once.
        self.arena = to;

        debug_assert!(collected_bytes <= self.garbage_bytes);
        self.garbage_bytes -= collected_bytes;
        self.collected_bytes += collected_bytes;

        log::info!(
            target: targets::COLLECTION,
            "collection {}: collected {collected_bytes} bytes of {collected_clauses} garbage clauses",
            self.collections,
        );

        Ok(collected_bytes)
    }
}
