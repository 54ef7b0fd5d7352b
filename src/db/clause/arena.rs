/*!
The arena of stored clauses.

Clauses are accessed on every step of propagation, and so their memory footprint directly
shapes throughput.
Three optimizations keep the footprint small, at some cost in the complexity of this module
(though, arguably, not in the use of the module):

1. The literals of a clause are embedded in the clause record.
   The record is of variadic size, with the literal array occupying a nominal two-literal
   slot and extending past it.
   The alternative of storing literals elsewhere needs more memory, and, worse, requires a
   second memory access on each inspection of a clause.

2. The boolean flags of a clause need one bit each, which leaves enough space in a single
   word to merge the flags with the glue of the clause.
   Glue is read far less often than size, and the merge keeps the header of a clause without
   an analyzed stamp at twelve bytes.

3. Original clauses, and learned clauses of small glue or size, are kept regardless of use,
   and so have no need of the analyzed stamp used to order reduction candidates.
   The stamp, and likewise the saved watch replacement position, is omitted from the record
   when absent.
   Records with the stamp are called 'extended', and reading an absent field is a contract
   violation, guarded by assertions in the accessors.

With these optimizations a binary original clause occupies twenty bytes, rather than the
forty or so a boxed literal vector with a side record would need.

# Layout

A record is a contiguous span of `u32` words.
A [ClauseRef] is the index of the record's *nominal* start, from which every field sits at a
fixed offset:

```text
ref + 0, 1   analyzed stamp (u64, valid only when present)
ref + 2      pos            (valid only when present)
ref + 3      flags and glue
ref + 4      blocking literal
ref + 5      size
ref + 6 …    literals       (size many words, nominal two)
```

When the optional fields are absent the owned span *begins after them*: the reference may
point below the span, and the first owned word is `ref + offset`, where [offset](Arena::offset)
is the word count of the absent fields.
Fixed field offsets keep clause access free of presence checks on the hot path, and omitting
the fields still saves the memory.
Every allocation and release must go through [offset](Arena::offset) and
[bytes](Arena::bytes); computing a span any other way corrupts the arena.

Absent fields must form a prefix of the record, so a record with an analyzed stamp always has
a pos field.

During collection, a relocated record has its literal slot overwritten with a forwarding
reference to the new location, marked by the `moved` flag.
The [Payload] view makes the overloading explicit.
*/

use bitfield::{Bit, BitMut, BitRange, BitRangeMut};

use crate::{
    config::LBD,
    db::{ArenaIndex, ClauseRef},
    structures::literal::CLiteral,
    types::err::{self},
};

/// The width in bits of the glue field.
pub const LD_MAX_GLUE: usize = 25;

/// The largest storable glue value.
pub const MAX_GLUE: LBD = (1 << (LD_MAX_GLUE - 1)) - 1;

// Flag bits of the flags-and-glue word.
const HAVE_ANALYZED_BIT: usize = 0;
const HAVE_POS_BIT: usize = 1;
const REDUNDANT_BIT: usize = 2;
const GARBAGE_BIT: usize = 3;
const REASON_BIT: usize = 4;
const MOVED_BIT: usize = 5;

// The glue field occupies the remaining bits of the word.
const GLUE_LSB: usize = 6;
const GLUE_MSB: usize = GLUE_LSB + LD_MAX_GLUE - 1;

// Word offsets of fields, relative to a clause reference.
const ANALYZED_LOW_WORD: usize = 0;
const ANALYZED_HIGH_WORD: usize = 1;
const POS_WORD: usize = 2;
const FLAGS_WORD: usize = 3;
const BLOCKED_WORD: usize = 4;
const SIZE_WORD: usize = 5;
const LITERALS_WORD: usize = 6;

/// Words of a record with both optional fields and the nominal two literals.
const NOMINAL_WORDS: usize = 8;

/// Words of the optional prefix (analyzed and pos).
const PREFIX_WORDS: usize = 3;

/// Padding at the start of an arena, so a reference never points below index zero.
const PAD_WORDS: usize = PREFIX_WORDS + 1;

/// The presence profile of a record, fixed at allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
    /// Whether the record has an analyzed stamp.
    pub analyzed: bool,

    /// Whether the record has a saved watch replacement position.
    pub pos: bool,
}

impl Profile {
    /// Words of optional prefix absent from a record with the profile.
    const fn absent_words(self) -> usize {
        (!self.analyzed as usize) * 2 + (!self.pos as usize)
    }
}

/// A view of the payload of a record: the literals, or, for a relocated record, the
/// forwarding reference to the new location.
pub enum Payload<'a> {
    /// The literals of the clause.
    Literals(&'a [CLiteral]),

    /// Where the clause has been relocated to.
    Forward(ClauseRef),
}

/// The arena of stored clauses.
///
/// A bump allocator over a vector of words.
/// Individual release happens only through the collector, which compacts survivors into a
/// fresh arena and retires this one, so no free list is kept.
pub struct Arena {
    data: Vec<u32>,
}

impl Arena {
    pub fn new() -> Self {
        Arena {
            data: vec![0; PAD_WORDS],
        }
    }

    /// An arena with capacity for `words` many words of records.
    pub fn with_capacity(words: usize) -> Result<Self, err::ClauseDBError> {
        let mut data = Vec::new();
        data.try_reserve_exact(PAD_WORDS + words)
            .map_err(|_| err::ClauseDBError::OutOfMemory)?;
        data.resize(PAD_WORDS, 0);
        Ok(Arena { data })
    }

    /// Allocates a record for the given literals and returns its reference.
    ///
    /// The glue is clamped to [MAX_GLUE] and to the size of the clause, the analyzed stamp
    /// (when present) starts at zero, and pos (when present) starts at two.
    pub fn allocate(
        &mut self,
        literals: &[CLiteral],
        profile: Profile,
        redundant: bool,
        glue: LBD,
    ) -> Result<ClauseRef, err::ClauseDBError> {
        let size = literals.len();
        debug_assert!(2 <= size);
        // Absent fields must be a prefix of the record.
        debug_assert!(profile.pos || !profile.analyzed);

        let absent = profile.absent_words();
        let words = NOMINAL_WORDS + (size - 2) - absent;

        if ArenaIndex::MAX as usize - self.data.len() < words {
            return Err(err::ClauseDBError::StorageExhausted);
        }
        self.data
            .try_reserve(words)
            .map_err(|_| err::ClauseDBError::OutOfMemory)?;

        let start = self.data.len();
        self.data.resize(start + words, 0);
        let the_ref = ClauseRef::new((start - absent) as ArenaIndex);

        let glue = std::cmp::min(glue, std::cmp::min(size as LBD, MAX_GLUE));

        let mut flags: u32 = 0;
        flags.set_bit(HAVE_ANALYZED_BIT, profile.analyzed);
        flags.set_bit(HAVE_POS_BIT, profile.pos);
        flags.set_bit(REDUNDANT_BIT, redundant);
        flags.set_bit_range(GLUE_MSB, GLUE_LSB, glue);

        self.data[the_ref.index() + FLAGS_WORD] = flags;
        self.data[the_ref.index() + BLOCKED_WORD] = 0;
        self.data[the_ref.index() + SIZE_WORD] = size as u32;

        if profile.analyzed {
            self.set_analyzed(the_ref, 0);
        }
        if profile.pos {
            self.set_pos(the_ref, 2);
        }

        for (index, literal) in literals.iter().enumerate() {
            self.data[the_ref.index() + LITERALS_WORD + index] = *literal as u32;
        }

        debug_assert_eq!(self.offset(the_ref), absent);

        Ok(the_ref)
    }

    /// Releases the record, pairing a single allocation.
    ///
    /// The span is returned to the arena when the record is the most recent allocation.
    /// Otherwise, the words remain as slack.
    /// The collector does not release records one by one, and instead retires a whole arena
    /// once its survivors have been copied out.
    #[allow(dead_code)]
    pub(crate) fn deallocate(&mut self, the_ref: ClauseRef) {
        let start = the_ref.index() + self.offset(the_ref);
        let words = self.words(the_ref);
        debug_assert!(start + words <= self.data.len());
        if start + words == self.data.len() {
            self.data.truncate(start);
        }
    }

    /// Copies the record into `to`, preserving every field and the presence profile, and
    /// returns the reference to the copy.
    ///
    /// The record in this arena is untouched.
    /// In particular, marking the relocation is up to the caller, via
    /// [set_forward](Arena::set_forward).
    pub(crate) fn copy_to(
        &self,
        the_ref: ClauseRef,
        to: &mut Arena,
    ) -> Result<ClauseRef, err::ClauseDBError> {
        debug_assert!(!self.is_moved(the_ref));

        let absent = self.offset(the_ref);
        let words = self.words(the_ref);
        let from = the_ref.index() + absent;

        if ArenaIndex::MAX as usize - to.data.len() < words {
            return Err(err::ClauseDBError::StorageExhausted);
        }
        to.data
            .try_reserve(words)
            .map_err(|_| err::ClauseDBError::OutOfMemory)?;

        let start = to.data.len();
        to.data.extend_from_slice(&self.data[from..from + words]);

        Ok(ClauseRef::new((start - absent) as ArenaIndex))
    }
}

// Field access.
impl Arena {
    fn flags(&self, the_ref: ClauseRef) -> u32 {
        self.data[the_ref.index() + FLAGS_WORD]
    }

    fn set_flag(&mut self, the_ref: ClauseRef, bit: usize, value: bool) {
        self.data[the_ref.index() + FLAGS_WORD].set_bit(bit, value);
    }

    /// The count of literals of the clause, at least two.
    pub fn size(&self, the_ref: ClauseRef) -> usize {
        self.data[the_ref.index() + SIZE_WORD] as usize
    }

    /// Shrinks the recorded size of the clause.
    ///
    /// The caller must have arranged the kept literals at the front of the literal array, and
    /// must follow with [shrink_fixup](Arena::shrink_fixup).
    pub fn set_size(&mut self, the_ref: ClauseRef, size: usize) {
        debug_assert!(2 <= size && size <= self.size(the_ref));
        self.data[the_ref.index() + SIZE_WORD] = size as u32;
    }

    /// The glue (literal block distance) of the clause.
    pub fn glue(&self, the_ref: ClauseRef) -> LBD {
        <u32 as BitRange<u32>>::bit_range(&self.flags(the_ref), GLUE_MSB, GLUE_LSB)
    }

    /// Sets the glue of the clause.
    pub fn set_glue(&mut self, the_ref: ClauseRef, glue: LBD) {
        debug_assert!(glue <= MAX_GLUE);
        self.data[the_ref.index() + FLAGS_WORD].set_bit_range(GLUE_MSB, GLUE_LSB, glue);
    }

    /// The blocking literal of the clause, with 0 in place of no literal.
    pub fn blocked(&self, the_ref: ClauseRef) -> CLiteral {
        self.data[the_ref.index() + BLOCKED_WORD] as CLiteral
    }

    /// Sets the blocking literal of the clause.
    pub fn set_blocked(&mut self, the_ref: ClauseRef, literal: CLiteral) {
        self.data[the_ref.index() + BLOCKED_WORD] = literal as u32;
    }

    /// Whether the clause is learned, and so may be discarded.
    pub fn is_redundant(&self, the_ref: ClauseRef) -> bool {
        self.flags(the_ref).bit(REDUNDANT_BIT)
    }

    /// Whether the clause is marked for collection.
    pub fn is_garbage(&self, the_ref: ClauseRef) -> bool {
        self.flags(the_ref).bit(GARBAGE_BIT)
    }

    pub(crate) fn set_garbage(&mut self, the_ref: ClauseRef, value: bool) {
        self.set_flag(the_ref, GARBAGE_BIT, value);
    }

    /// Whether the clause is currently acting as the reason of an assignment.
    ///
    /// The flag is transient, raised only while reasons are protected during a reduction.
    pub fn is_reason(&self, the_ref: ClauseRef) -> bool {
        self.flags(the_ref).bit(REASON_BIT)
    }

    pub(crate) fn set_reason(&mut self, the_ref: ClauseRef, value: bool) {
        self.set_flag(the_ref, REASON_BIT, value);
    }

    /// Whether the clause has been relocated, in which case the payload of the record is a
    /// forwarding reference.
    ///
    /// Raised only between the copy and release phases of a collection.
    pub fn is_moved(&self, the_ref: ClauseRef) -> bool {
        self.flags(the_ref).bit(MOVED_BIT)
    }

    /// Whether the clause may be collected.
    ///
    /// The reason guard exists because reduction runs without unwinding the trail.
    /// When collection is triggered from a root-level context no clause is a reason, and the
    /// predicate degenerates to the garbage flag.
    pub fn is_collectable(&self, the_ref: ClauseRef) -> bool {
        self.is_garbage(the_ref) && !self.is_reason(the_ref)
    }

    /// Whether the record has an analyzed stamp.
    pub fn has_analyzed(&self, the_ref: ClauseRef) -> bool {
        self.flags(the_ref).bit(HAVE_ANALYZED_BIT)
    }

    /// Whether the record has a saved watch replacement position.
    pub fn has_pos(&self, the_ref: ClauseRef) -> bool {
        self.flags(the_ref).bit(HAVE_POS_BIT)
    }

    /// The analyzed stamp of the clause, the time at which the clause last took part in
    /// conflict analysis.
    ///
    /// Reading the stamp of a record without one is a contract violation.
    pub fn analyzed(&self, the_ref: ClauseRef) -> u64 {
        assert!(self.has_analyzed(the_ref));
        let low = self.data[the_ref.index() + ANALYZED_LOW_WORD] as u64;
        let high = self.data[the_ref.index() + ANALYZED_HIGH_WORD] as u64;
        (high << 32) | low
    }

    /// Sets the analyzed stamp of the clause.
    pub fn set_analyzed(&mut self, the_ref: ClauseRef, stamp: u64) {
        assert!(self.has_analyzed(the_ref));
        self.data[the_ref.index() + ANALYZED_LOW_WORD] = stamp as u32;
        self.data[the_ref.index() + ANALYZED_HIGH_WORD] = (stamp >> 32) as u32;
    }

    /// The position of the last successful watch replacement in the clause.
    ///
    /// Reading the position of a record without one is a contract violation.
    pub fn pos(&self, the_ref: ClauseRef) -> usize {
        assert!(self.has_pos(the_ref));
        self.data[the_ref.index() + POS_WORD] as usize
    }

    /// Sets the position of the last successful watch replacement.
    pub fn set_pos(&mut self, the_ref: ClauseRef, pos: usize) {
        assert!(self.has_pos(the_ref));
        self.data[the_ref.index() + POS_WORD] = pos as u32;
    }

    /// The literals of the clause.
    pub fn literals(&self, the_ref: ClauseRef) -> &[CLiteral] {
        debug_assert!(!self.is_moved(the_ref));
        let size = self.size(the_ref);
        let start = the_ref.index() + LITERALS_WORD;
        let words = &self.data[start..start + size];
        // # Safety: CLiteral and u32 have the same size and alignment, and literals are
        // stored by bit-preserving casts.
        unsafe { std::slice::from_raw_parts(words.as_ptr().cast::<CLiteral>(), size) }
    }

    /// The literals of the clause, mutable.
    ///
    /// Literals may be permuted freely.
    /// Shrinking requires [set_size](Arena::set_size) and [shrink_fixup](Arena::shrink_fixup).
    pub fn literals_mut(&mut self, the_ref: ClauseRef) -> &mut [CLiteral] {
        debug_assert!(!self.is_moved(the_ref));
        let size = self.size(the_ref);
        let start = the_ref.index() + LITERALS_WORD;
        let words = &mut self.data[start..start + size];
        // # Safety: As for literals.
        unsafe { std::slice::from_raw_parts_mut(words.as_mut_ptr().cast::<CLiteral>(), size) }
    }

    /// The payload of the record: literals, or a forwarding reference when the record has
    /// been relocated.
    pub fn payload(&self, the_ref: ClauseRef) -> Payload<'_> {
        match self.is_moved(the_ref) {
            true => Payload::Forward(self.forward(the_ref)),
            false => Payload::Literals(self.literals(the_ref)),
        }
    }

    /// Marks the record as relocated to `to`, overwriting the literal slot with the
    /// forwarding reference.
    pub(crate) fn set_forward(&mut self, the_ref: ClauseRef, to: ClauseRef) {
        debug_assert!(!self.is_moved(the_ref));
        self.set_flag(the_ref, MOVED_BIT, true);
        self.data[the_ref.index() + LITERALS_WORD] = to.raw();
    }

    /// Where the record has been relocated to.
    pub(crate) fn forward(&self, the_ref: ClauseRef) -> ClauseRef {
        debug_assert!(self.is_moved(the_ref));
        ClauseRef::new(self.data[the_ref.index() + LITERALS_WORD])
    }

    /// The presence profile of the record.
    pub fn profile(&self, the_ref: ClauseRef) -> Profile {
        Profile {
            analyzed: self.has_analyzed(the_ref),
            pos: self.has_pos(the_ref),
        }
    }

    /// Words of optional prefix absent from the record, and so the distance from the
    /// reference to the start of the owned span.
    pub fn offset(&self, the_ref: ClauseRef) -> usize {
        self.profile(the_ref).absent_words()
    }

    /// Words owned by the record.
    pub fn words(&self, the_ref: ClauseRef) -> usize {
        NOMINAL_WORDS + (self.size(the_ref) - 2) - self.offset(the_ref)
    }

    /// Bytes owned by the record.
    pub fn bytes(&self, the_ref: ClauseRef) -> usize {
        self.words(the_ref) * std::mem::size_of::<u32>()
    }
}

// Mutation helpers and orderings.
impl Arena {
    /// Restores the invariants of a record after its size has been reduced.
    ///
    /// A saved watch replacement position at or past the new size is reset to two, and glue
    /// above the new size is clamped to the size.
    pub fn shrink_fixup(&mut self, the_ref: ClauseRef) {
        debug_assert!(2 <= self.size(the_ref));
        let size = self.size(the_ref);
        if self.has_pos(the_ref) && size <= self.pos(the_ref) {
            self.set_pos(the_ref, 2);
        }
        if size < self.glue(the_ref) as usize {
            self.set_glue(the_ref, size as LBD);
        }
    }

    /// Whether `a` took part in conflict analysis earlier than `b`.
    ///
    /// Both records must carry an analyzed stamp.
    pub fn analyzed_earlier(&self, a: ClauseRef, b: ClauseRef) -> bool {
        self.analyzed(a) < self.analyzed(b)
    }

    /// Whether `a` has fewer literals than `b`.
    pub fn smaller_size(&self, a: ClauseRef, b: ClauseRef) -> bool {
        self.size(a) < self.size(b)
    }

    /// Whether `a` is expected to be less useful than `b`.
    ///
    /// Clauses with smaller glue are considered more useful, with the analyzed stamp as a
    /// tie break, so that more recently used clauses are preferred (when glue is equal).
    pub fn less_useful(&self, a: ClauseRef, b: ClauseRef) -> bool {
        if self.glue(b) < self.glue(a) {
            return true;
        }
        if self.glue(a) < self.glue(b) {
            return false;
        }
        self.analyzed_earlier(a, b)
    }
}
