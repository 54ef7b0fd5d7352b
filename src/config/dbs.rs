//! Configuration of databases, typically derived from the configuration of a context.

use super::{ConfigOption, LBD};

/// Configuration for the clause database.
#[derive(Clone)]
pub struct ClauseDBConfig {
    /// Permit (scheduled) reductions of the learned clause population.
    pub reduce: ConfigOption<bool>,

    /// Order reduction candidates by glue, with the analyzed stamp as a tie break.
    ///
    /// Otherwise, candidates are ordered by the analyzed stamp alone.
    pub reduce_glue: ConfigOption<bool>,

    /// Learned clauses of at most this size are kept regardless of use, and so are stored
    /// without an analyzed stamp.
    pub keep_size: ConfigOption<usize>,

    /// Learned clauses of at most this glue are kept regardless of use, and so are stored
    /// without an analyzed stamp.
    pub keep_glue: ConfigOption<LBD>,

    /// Clauses of at least this size save the position of the last watch replacement.
    pub pos_size: ConfigOption<usize>,

    /// The count of conflicts at which the first reduction happens, and the initial value of
    /// the increment applied to the limit after each reduction.
    pub reduce_init: ConfigOption<usize>,

    /// The initial growth of the reduction increment, decayed towards one with each
    /// reduction.
    pub reduce_inc: ConfigOption<usize>,
}

impl Default for ClauseDBConfig {
    fn default() -> Self {
        ClauseDBConfig {
            reduce: ConfigOption {
                name: "reduce",
                min: false,
                max: true,
                value: true,
            },

            reduce_glue: ConfigOption {
                name: "reduceglue",
                min: false,
                max: true,
                value: true,
            },

            keep_size: ConfigOption {
                name: "keepsize",
                min: 2,
                max: usize::MAX,
                value: 3,
            },

            keep_glue: ConfigOption {
                name: "keepglue",
                min: 0,
                max: LBD::MAX,
                value: 2,
            },

            pos_size: ConfigOption {
                name: "posize",
                min: 3,
                max: usize::MAX,
                value: 4,
            },

            reduce_init: ConfigOption {
                name: "reduceinit",
                min: 1,
                max: usize::MAX,
                value: 2000,
            },

            reduce_inc: ConfigOption {
                name: "reduceinc",
                min: 1,
                max: usize::MAX,
                value: 300,
            },
        }
    }
}
