/*!
Configuration of a context.

The primary configuration structure is [Config].
Databases clone the parts of the configuration relevant to them when a context is built, and
so revisions to a configuration only apply to contexts built after the revision.
*/

mod config_option;
pub use config_option::ConfigOption;

pub mod dbs;

mod lbd;
pub use lbd::LBD;

use dbs::ClauseDBConfig;

/// The primary configuration structure.
#[derive(Clone)]
pub struct Config {
    /// Configuration of the clause database.
    pub clause_db: ClauseDBConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clause_db: ClauseDBConfig::default(),
        }
    }
}
