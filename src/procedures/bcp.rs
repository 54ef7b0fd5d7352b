/*!
Boolean constraint propagation.

Propagation is usually the hot-spot of a solve, and the reason for the compact clause
representation.
The trail doubles as the propagation queue: each assigned literal is taken in turn, and the
watchers of the falsified literal are examined for fresh assignments or a conflict.

A few familiar techniques keep clause memory out of the loop where possible:
- Each watcher carries a blocking literal, and a satisfied blocking literal resolves the
  watcher without touching the clause (see the 2008 JSAT paper by Chu, Harwood and Stuckey).
- Watchers of binary clauses carry the whole clause, as the blocking literal is the only
  other literal.
- Long clauses search for a replacement watch from the position of the last replacement,
  which avoids certain accumulated quadratic costs (see the 2013 JAIR article by Gent).

Watched literals are kept in the first two positions of a clause, with the literal order
mutated as needed to preserve this.
*/

use crate::{
    context::Context,
    db::{watches::Watcher, ClauseRef},
    misc::log::targets::{self},
    structures::literal::Literal,
    types::err::{self},
};

impl Context {
    /// Propagates every assignment on the trail which is yet to be propagated.
    ///
    /// Returns a conflict error with the conflicting clause if some clause is falsified by
    /// the resulting valuation, and otherwise extends the valuation with every forced
    /// assignment found.
    pub fn propagate(&mut self) -> Result<(), err::BCPError> {
        while self.atom_db.q_head < self.atom_db.trail().len() {
            let falsified = self.atom_db.trail()[self.atom_db.q_head].negate();
            self.atom_db.q_head += 1;
            self.counters.total_propagations += 1;
            log::trace!(target: targets::PROPAGATION, "propagating {}", falsified.negate());

            // The list is taken so watchers may migrate to the lists of other literals
            // while this one is walked, with survivors compacted in place.
            let mut list = std::mem::take(self.watches.list_mut(falsified));
            let mut conflict: Option<ClauseRef> = None;

            let mut index = 0;
            let mut keep = 0;
            'watcher_loop: while index < list.len() {
                let watcher = list[index];
                index += 1;
                list[keep] = watcher;
                keep += 1;

                let blocking_value = self.atom_db.value_of_literal(watcher.blit);
                if blocking_value == Some(true) {
                    continue 'watcher_loop;
                }

                if watcher.size == 2 {
                    match blocking_value {
                        // Binary clauses are cheap, so the scan continues on a conflict.
                        Some(false) => conflict = Some(watcher.clause),
                        _ => self.atom_db.assign(watcher.blit, Some(watcher.clause)),
                    }
                    continue 'watcher_loop;
                }

                if self.clause_db.is_garbage(watcher.clause) {
                    continue 'watcher_loop;
                }

                // The falsified watch is placed second, so the first literal is the other
                // watch.
                {
                    let literals = self.clause_db.literals_mut(watcher.clause);
                    if literals[0] == falsified {
                        literals.swap(0, 1);
                    }
                    debug_assert_eq!(literals[1], falsified);
                }

                let other_watch = self.clause_db.literals(watcher.clause)[0];
                let other_value = self.atom_db.value_of_literal(other_watch);
                if other_value == Some(true) {
                    list[keep - 1].blit = other_watch;
                    continue 'watcher_loop;
                }

                let size = watcher.size as usize;
                debug_assert_eq!(size, self.clause_db.size(watcher.clause));

                // Search for a replacement watch among the unwatched literals, from the
                // saved position when the clause carries one, wrapping to the front.
                let mut replacement_value: Option<bool> = Some(false);
                let mut replacement = 2;
                if self.clause_db.has_pos(watcher.clause) {
                    let pos = self.clause_db.pos(watcher.clause);
                    let literals = self.clause_db.literals(watcher.clause);

                    replacement = pos;
                    while replacement < size {
                        replacement_value =
                            self.atom_db.value_of_literal(literals[replacement]);
                        if replacement_value != Some(false) {
                            break;
                        }
                        replacement += 1;
                    }
                    if replacement_value == Some(false) {
                        replacement = 2;
                        while replacement < pos {
                            replacement_value =
                                self.atom_db.value_of_literal(literals[replacement]);
                            if replacement_value != Some(false) {
                                break;
                            }
                            replacement += 1;
                        }
                    }

                    self.clause_db.set_pos(watcher.clause, replacement);
                } else {
                    let literals = self.clause_db.literals(watcher.clause);
                    while replacement < size {
                        replacement_value =
                            self.atom_db.value_of_literal(literals[replacement]);
                        if replacement_value != Some(false) {
                            break;
                        }
                        replacement += 1;
                    }
                }

                match replacement_value {
                    Some(true) => {
                        // The clause is satisfied, noted in the blocking literal.
                        list[keep - 1].blit = self.clause_db.literals(watcher.clause)[replacement];
                    }

                    None => {
                        // A fresh watch is available, so the clause migrates to its list.
                        let literals = self.clause_db.literals_mut(watcher.clause);
                        literals.swap(1, replacement);
                        let fresh_watch = literals[1];
                        log::trace!(target: targets::PROPAGATION, "{}: unwatched {falsified}", watcher.clause);

                        self.watches.watch(
                            fresh_watch,
                            Watcher {
                                blit: falsified,
                                size: watcher.size,
                                clause: watcher.clause,
                            },
                        );
                        keep -= 1;
                    }

                    Some(false) => {
                        // Every unwatched literal is falsified.
                        match other_value {
                            None => self.atom_db.assign(other_watch, Some(watcher.clause)),
                            Some(false) => {
                                conflict = Some(watcher.clause);
                                break 'watcher_loop;
                            }
                            Some(true) => unreachable!(),
                        }
                    }
                }
            }

            while index < list.len() {
                list[keep] = list[index];
                keep += 1;
                index += 1;
            }
            list.truncate(keep);
            *self.watches.list_mut(falsified) = list;

            if let Some(clause) = conflict {
                self.counters.total_conflicts += 1;
                log::trace!(target: targets::PROPAGATION, "conflict {clause}");
                return Err(err::BCPError::Conflict(clause));
            }
        }

        Ok(())
    }
}
