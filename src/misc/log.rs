/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing
issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    pub const CLAUSE_DB: &str = "clause_db";
    pub const COLLECTION: &str = "collection";
    pub const PROPAGATION: &str = "propagation";
    pub const REDUCTION: &str = "reduction";
    pub const TRAIL: &str = "trail";
}
