/// Counters over the lifetime of a context.
pub struct Counters {
    /// A count of every conflict seen.
    pub total_conflicts: usize,

    /// A count of all decisions made.
    pub total_decisions: usize,

    /// A count of propagated literals.
    pub total_propagations: usize,
}

impl Default for Counters {
    fn default() -> Self {
        Counters {
            total_conflicts: 0,
            total_decisions: 0,
            total_propagations: 0,
        }
    }
}
