use crate::{
    config::LBD,
    db::{clause::Payload, ClauseRef},
    structures::literal::CLiteral,
};

use super::ClauseDB;

/// Methods to read and revise stored clauses.
///
/// These delegate to the arena, and exist so the arena itself stays private to the database.
impl ClauseDB {
    /// The count of literals of the clause, at least two.
    pub fn size(&self, the_ref: ClauseRef) -> usize {
        self.arena.size(the_ref)
    }

    /// The literals of the clause.
    pub fn literals(&self, the_ref: ClauseRef) -> &[CLiteral] {
        self.arena.literals(the_ref)
    }

    /// The literals of the clause, mutable.
    ///
    /// Literals may be permuted freely.
    /// A size reduction goes through [shrink_clause](ClauseDB::shrink_clause).
    pub fn literals_mut(&mut self, the_ref: ClauseRef) -> &mut [CLiteral] {
        self.arena.literals_mut(the_ref)
    }

    /// The payload of the record, literals or a forwarding reference.
    ///
    /// Outside the collector the payload is always the literals.
    pub fn payload(&self, the_ref: ClauseRef) -> Payload<'_> {
        self.arena.payload(the_ref)
    }

    /// The glue (literal block distance) of the clause.
    pub fn glue(&self, the_ref: ClauseRef) -> LBD {
        self.arena.glue(the_ref)
    }

    /// Sets the glue of the clause, e.g. on recalculation during conflict analysis.
    pub fn set_glue(&mut self, the_ref: ClauseRef, glue: LBD) {
        self.arena.set_glue(the_ref, glue)
    }

    /// The blocking literal of the clause, with 0 in place of no literal.
    pub fn blocked(&self, the_ref: ClauseRef) -> CLiteral {
        self.arena.blocked(the_ref)
    }

    /// Sets the blocking literal of the clause.
    ///
    /// Blocked clauses are spared by the reduction policy.
    pub fn set_blocked(&mut self, the_ref: ClauseRef, literal: CLiteral) {
        self.arena.set_blocked(the_ref, literal)
    }

    /// Whether the clause is learned, and so may be discarded.
    pub fn is_redundant(&self, the_ref: ClauseRef) -> bool {
        self.arena.is_redundant(the_ref)
    }

    /// Whether the clause is marked for collection.
    pub fn is_garbage(&self, the_ref: ClauseRef) -> bool {
        self.arena.is_garbage(the_ref)
    }

    /// Whether the clause is currently protected as the reason of an assignment.
    pub fn is_reason(&self, the_ref: ClauseRef) -> bool {
        self.arena.is_reason(the_ref)
    }

    /// Whether the clause has been relocated.
    ///
    /// Outside the collector this is always false.
    pub fn is_moved(&self, the_ref: ClauseRef) -> bool {
        self.arena.is_moved(the_ref)
    }

    /// Whether the record is extended with an analyzed stamp.
    pub fn has_analyzed(&self, the_ref: ClauseRef) -> bool {
        self.arena.has_analyzed(the_ref)
    }

    /// Whether the record saves the position of the last watch replacement.
    pub fn has_pos(&self, the_ref: ClauseRef) -> bool {
        self.arena.has_pos(the_ref)
    }

    /// The analyzed stamp of the clause.
    ///
    /// Reading the stamp of a record without one is a contract violation.
    pub fn analyzed(&self, the_ref: ClauseRef) -> u64 {
        self.arena.analyzed(the_ref)
    }

    /// The saved watch replacement position of the clause.
    ///
    /// Reading the position of a record without one is a contract violation.
    pub fn pos(&self, the_ref: ClauseRef) -> usize {
        self.arena.pos(the_ref)
    }

    /// Sets the saved watch replacement position of the clause.
    pub fn set_pos(&mut self, the_ref: ClauseRef, pos: usize) {
        self.arena.set_pos(the_ref, pos)
    }

    /// Bytes owned by the record of the clause.
    pub fn bytes(&self, the_ref: ClauseRef) -> usize {
        self.arena.bytes(the_ref)
    }

    /// Shrinks the clause to its first `size` literals and restores record invariants.
    ///
    /// The caller must have arranged the kept literals at the front of the literal array.
    pub fn shrink_clause(&mut self, the_ref: ClauseRef, size: usize) {
        self.arena.set_size(the_ref, size);
        self.arena.shrink_fixup(the_ref);
    }

    /// An iterator over references to every live clause, in registry order.
    pub fn all_clauses(&self) -> impl Iterator<Item = ClauseRef> + '_ {
        self.clauses.iter().copied()
    }

    /// The count of all clauses currently in the database.
    pub fn current_clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// The count of live learned clauses.
    pub fn redundant_count(&self) -> usize {
        self.redundant_count
    }

    /// The count of live original clauses.
    pub fn irredundant_count(&self) -> usize {
        self.irredundant_count
    }

    /// Bytes of live original clauses.
    pub fn irredundant_bytes(&self) -> usize {
        self.irredundant_bytes
    }

    /// Bytes of clauses marked garbage and not yet collected.
    pub fn garbage_bytes(&self) -> usize {
        self.garbage_bytes
    }

    /// Bytes reclaimed by collections, in total.
    pub fn collected_bytes(&self) -> usize {
        self.collected_bytes
    }

    /// The maximum size among candidates kept by the last reduction.
    pub fn kept_size(&self) -> usize {
        self.kept_size
    }

    /// The maximum glue among candidates kept by the last reduction.
    pub fn kept_glue(&self) -> LBD {
        self.kept_glue
    }

    /// A count of reductions.
    pub fn reductions(&self) -> usize {
        self.reductions
    }

    /// A count of clauses marked garbage by the reduction policy.
    pub fn reduced_count(&self) -> usize {
        self.reduced
    }

    /// A count of collections.
    pub fn collections(&self) -> usize {
        self.collections
    }

    /// The conflict count at which the next reduction happens.
    pub fn reduce_limit(&self) -> usize {
        self.reduce_limit
    }

    /// The conflict count at the time of the last reduction.
    pub fn conflicts_at_last_reduce(&self) -> usize {
        self.conflicts_at_last_reduce
    }

    /// Whether `a` has fewer literals than `b`.
    pub fn smaller_size(&self, a: ClauseRef, b: ClauseRef) -> bool {
        self.arena.smaller_size(a, b)
    }

    /// The analyzed stamp at the time of the last reduction.
    pub fn analyzed_limit(&self) -> u64 {
        self.analyzed_limit
    }
}
