/// Literal block distance, a.k.a 'glue'.
///
/// The number of distinct decision levels among the literals of a learned clause at the moment
/// the clause was learned, with lower values indicating higher expected usefulness.
///
/// See [On the Glucose SAT Solver](https://dx.doi.org/10.1142/S0218213018400018) for an
/// overview of LBD, and roughly a decade's worth of insight into the metric.
///
/// Stored values are bound by [MAX_GLUE](crate::db::clause::MAX_GLUE), as within the clause
/// database the LBD of a clause shares a word with the clause's flags.
pub type LBD = u32;
