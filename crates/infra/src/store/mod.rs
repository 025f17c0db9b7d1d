//! In-memory stand-ins for the host platform's catalog and association tables.

pub mod catalog;
pub mod options;

pub use catalog::InMemoryCatalog;
pub use options::InMemoryOptionStore;

use productopts_options::OptionError;

fn poisoned(what: &str) -> OptionError {
    OptionError::store(format!("{what} lock poisoned"))
}
