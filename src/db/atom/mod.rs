/*!
A database of atom related things.

The atom database holds, for each atom:
- The current value of the atom, if any.
- The decision level at which the atom was assigned.
- The reason for the assignment, when the assignment was forced by a clause.

And, across atoms, the trail: every assigned literal in order of assignment, together with the
index at which each decision level begins.

The reduction of the clause database reads levels and reasons, and the collector rewrites
reasons when clauses move.
Otherwise, the database is written by propagation and by decisions.
*/

use crate::{
    db::{ClauseRef, LevelIndex},
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

/// A valuation, as the optional value of each atom.
pub type CValuation = Vec<Option<bool>>;

/// A database of atom related things.
pub struct AtomDB {
    /// The value of each atom, indexed by atom.
    values: CValuation,

    /// The decision level at which each atom was assigned, indexed by atom.
    ///
    /// Stale for unassigned atoms.
    levels: Vec<LevelIndex>,

    /// The clause which forced the assignment of each atom, if any, indexed by atom.
    ///
    /// Stale for unassigned atoms.
    reasons: Vec<Option<ClauseRef>>,

    /// Every assigned literal, in order of assignment.
    trail: Vec<CLiteral>,

    /// For each decision level, the index into the trail at which the level begins.
    level_indices: Vec<usize>,

    /// The next trail position to propagate.
    pub(crate) q_head: usize,

    /// A count of atoms assigned at the root level.
    fixed: usize,
}

impl Default for AtomDB {
    fn default() -> Self {
        AtomDB {
            // Index 0 is reserved, so tables carry a slot for it.
            values: vec![None],
            levels: vec![0],
            reasons: vec![None],

            trail: Vec::default(),
            level_indices: Vec::default(),
            q_head: 0,
            fixed: 0,
        }
    }
}

impl AtomDB {
    /// A fresh atom, with value, level, and reason slots set up.
    pub fn fresh_atom(&mut self) -> Result<Atom, err::AtomDBError> {
        if self.values.len() > Atom::MAX as usize {
            return Err(err::AtomDBError::AtomsExhausted);
        }
        let atom = self.values.len() as Atom;

        self.values.push(None);
        self.levels.push(0);
        self.reasons.push(None);

        Ok(atom)
    }

    /// A count of atoms in the database, including the reserved atom 0.
    pub fn atom_count(&self) -> usize {
        self.values.len()
    }

    /// The value of the atom, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.values[atom as usize]
    }

    /// The value of the literal, if any, adjusted for the polarity of the literal.
    pub fn value_of_literal(&self, literal: CLiteral) -> Option<bool> {
        self.values[literal.atom() as usize].map(|value| value == literal.polarity())
    }

    /// The root-level value of the literal, if any.
    ///
    /// In contrast to [value_of_literal](AtomDB::value_of_literal), assignments made above the
    /// root level are invisible, as those may be undone by backjumping.
    pub fn fixed(&self, literal: CLiteral) -> Option<bool> {
        let atom = literal.atom();
        match self.values[atom as usize] {
            Some(_) if self.levels[atom as usize] != 0 => None,
            value => value.map(|v| v == literal.polarity()),
        }
    }

    /// A count of atoms assigned at the root level.
    pub fn fixed_count(&self) -> usize {
        self.fixed
    }

    /// The current decision level.
    pub fn level(&self) -> LevelIndex {
        self.level_indices.len() as LevelIndex
    }

    /// The decision level at which the atom was assigned, if the atom is assigned.
    pub fn level_of(&self, atom: Atom) -> Option<LevelIndex> {
        match self.values[atom as usize] {
            Some(_) => Some(self.levels[atom as usize]),
            None => None,
        }
    }

    /// The clause which forced the assignment of the atom, if the atom is assigned and the
    /// assignment was forced.
    pub fn reason_of(&self, atom: Atom) -> Option<ClauseRef> {
        match self.values[atom as usize] {
            Some(_) => self.reasons[atom as usize],
            None => None,
        }
    }

    /// Sets the reason recorded for the atom.
    ///
    /// Used by the collector to redirect reasons to relocated clauses, and to clear reasons
    /// whose clauses have been collected.
    pub(crate) fn set_reason(&mut self, atom: Atom, reason: Option<ClauseRef>) {
        self.reasons[atom as usize] = reason;
    }

    /// Records the assignment of the literal at the current decision level, with the given
    /// reason.
    ///
    /// The assignment is pushed to the trail for propagation.
    pub fn assign(&mut self, literal: CLiteral, reason: Option<ClauseRef>) {
        let atom = literal.atom();
        debug_assert!(self.values[atom as usize].is_none());

        self.values[atom as usize] = Some(literal.polarity());
        self.levels[atom as usize] = self.level();
        self.reasons[atom as usize] = reason;

        if self.level() == 0 {
            self.fixed += 1;
        }

        self.trail.push(literal);
        log::trace!(target: targets::TRAIL, "assign {literal} at level {}", self.level());
    }

    /// Opens a fresh decision level and records the assignment of the literal as its
    /// decision.
    pub fn push_fresh_decision(&mut self, literal: CLiteral) {
        self.level_indices.push(self.trail.len());
        self.assign(literal, None);
    }

    /// Removes every level above the given level, clearing the values of the assignments
    /// made at the removed levels.
    pub fn backjump(&mut self, target: LevelIndex) {
        if let Some(&level_start) = self.level_indices.get(target as usize) {
            for literal in self.trail.split_off(level_start) {
                self.values[literal.atom() as usize] = None;
            }
            self.level_indices.truncate(target as usize);
            self.q_head = std::cmp::min(self.q_head, self.trail.len());
        }
    }

    /// The assignments made, in order of assignment.
    pub fn trail(&self) -> &[CLiteral] {
        &self.trail
    }
}
