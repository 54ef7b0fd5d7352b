/*!
Watch databases, recording which clauses watch which literals.

Each watcher pairs a clause reference with a blocking literal and the size of the clause at
the time the watch was made:
- If the blocking literal is satisfied the clause is satisfied, and the clause memory is not
  touched at all.
- If the cached size is two the second literal of the clause is the blocking literal, and
  propagation resolves the watch without touching the clause memory.

Lists are indexed by the watched literal.
Propagation reads the list of a literal when the literal is *falsified*.

During collection watchers are flushed: watchers of collectable clauses are dropped, and
watchers of relocated clauses are redirected (see
[collect_garbage](crate::db::clause::ClauseDB::collect_garbage)).
*/

use crate::{
    db::ClauseRef,
    structures::literal::{CLiteral, Literal},
};

/// A clause watching a literal.
#[derive(Clone, Copy, Debug)]
pub struct Watcher {
    /// The blocking literal, some literal of the clause other than the watched literal.
    pub blit: CLiteral,

    /// The size of the clause when the watch was made.
    ///
    /// Refreshed during collection if the clause has shrunk.
    pub size: u32,

    /// The watching clause.
    pub clause: ClauseRef,
}

/// The watchers of both literals of an atom.
#[derive(Default)]
struct WatchDB {
    positive: Vec<Watcher>,
    negative: Vec<Watcher>,
}

/// Watch lists for every literal.
#[derive(Default)]
pub struct Watches {
    dbs: Vec<WatchDB>,
}

impl Watches {
    /// Ensures a watch database exists for every atom below `atom_count`.
    pub fn grow_to(&mut self, atom_count: usize) {
        while self.dbs.len() < atom_count {
            self.dbs.push(WatchDB::default());
        }
    }

    /// A count of atoms with watch databases.
    pub fn atom_count(&self) -> usize {
        self.dbs.len()
    }

    /// Adds the watcher to the list of the literal.
    pub fn watch(&mut self, literal: CLiteral, watcher: Watcher) {
        let db = &mut self.dbs[literal.atom() as usize];
        match literal.polarity() {
            true => db.positive.push(watcher),
            false => db.negative.push(watcher),
        }
    }

    /// The watchers of the literal.
    pub fn list(&self, literal: CLiteral) -> &Vec<Watcher> {
        let db = &self.dbs[literal.atom() as usize];
        match literal.polarity() {
            true => &db.positive,
            false => &db.negative,
        }
    }

    /// The watchers of the literal, mutable.
    pub fn list_mut(&mut self, literal: CLiteral) -> &mut Vec<Watcher> {
        let db = &mut self.dbs[literal.atom() as usize];
        match literal.polarity() {
            true => &mut db.positive,
            false => &mut db.negative,
        }
    }
}
