use crate::config::Strategy;
use std::fmt::Display;

#[derive(Debug, PartialEq)]
pub enum TableError {
    /// The key isn't in the table. Callers are expected to branch on this.
    NotFound,
    /// The table couldn't be built. See [`ConfigError`].
    InvalidConfiguration(ConfigError),
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    ZeroCapacity,
    /// Not finite, not positive or, for open addressing, not below `1.0`.
    LoadFactor { strategy: Strategy, value: f64 },
    /// Quadratic probing only covers every slot when the capacity is a power of two.
    NotPowerOfTwo(usize),
    GrowthFactor { strategy: Strategy, value: usize },
}

impl Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("Key not found"),
            Self::InvalidConfiguration(err) => write!(f, "Invalid configuration: {err}"),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroCapacity => f.write_str("initial capacity must be at least 1"),
            Self::LoadFactor { strategy, value } if strategy.is_open_addressing() => write!(
                f,
                "maximum load factor for {strategy} must be in (0, 1), got {value}"
            ),
            Self::LoadFactor { strategy, value } => write!(
                f,
                "maximum load factor for {strategy} must be positive, got {value}"
            ),
            Self::NotPowerOfTwo(capacity) => write!(
                f,
                "quadratic probing needs a power of two capacity, got {capacity}"
            ),
            Self::GrowthFactor { strategy, value } => match strategy {
                Strategy::Quadratic => write!(
                    f,
                    "growth factor for {strategy} must be a power of two of at least 2, got {value}"
                ),
                _ => write!(f, "growth factor must be at least 2, got {value}"),
            },
        }
    }
}

impl std::error::Error for TableError {}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for TableError {
    fn from(value: ConfigError) -> Self {
        TableError::InvalidConfiguration(value)
    }
}
