//! Hash tables with interchangeable collision strategies.
//!
//! One [`HashTable`] type, three ways of resolving collisions: linear probing,
//! quadratic probing and separate chaining. Open addressing tables leave
//! tombstones behind on delete and every table grows once its load factor
//! goes past the configured maximum.

pub mod config;
mod error;
pub mod hash;
pub mod log;
mod table;

pub use config::{Config, Strategy};
pub use error::{ConfigError, TableError};
pub use table::{HashTable, IntoIter, Iter, Keys, Values};
pub use table::probe::{self, Linear, Probe, Probing, Quadratic};

pub type Result<T> = std::result::Result<T, TableError>;
