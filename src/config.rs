//! Table configuration.
//!
//! A [`Config`] picks the collision strategy and the sizing policy of a
//! [`HashTable`](crate::HashTable). It is validated once, when the table is
//! built, so a table never runs with a policy that could break its probing.

use crate::error::ConfigError;
use std::fmt::Display;

pub const DEFAULT_INITIAL_CAPACITY: usize = 8;
pub const DEFAULT_OPEN_ADDRESSING_LOAD_FACTOR: f64 = 0.6;
pub const DEFAULT_CHAINING_LOAD_FACTOR: f64 = 1.0;
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// How collisions are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Probe `h, h + 1, h + 2, ...`.
    #[default]
    Linear,
    /// Probe `h, h + 1, h + 3, h + 6, ...` (triangular numbers).
    Quadratic,
    /// Keep every colliding entry in the bucket's own list.
    Chaining,
}

#[derive(Debug, PartialEq, PartialOrd)]
pub enum ParseError<'p> {
    InvalidString(&'p str),
}

/// Generates a consuming setter for a [`Config`] field.
macro_rules! method_builder {
    ($field:ident, $ty:ty) => {
        pub fn $field(mut self, value: $ty) -> Self {
            self.$field = value;
            self
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub strategy: Strategy,
    /// Number of slots (or buckets) the table starts with.
    pub initial_capacity: usize,
    /// Load factor the table must not exceed once an operation completes.
    pub maximum_load_factor: f64,
    /// The capacity is multiplied by this on every resize step.
    pub growth_factor: usize,
}

impl Strategy {
    pub fn is_open_addressing(self) -> bool {
        !matches!(self, Self::Chaining)
    }

    pub fn default_load_factor(self) -> f64 {
        match self {
            Self::Chaining => DEFAULT_CHAINING_LOAD_FACTOR,
            _ => DEFAULT_OPEN_ADDRESSING_LOAD_FACTOR,
        }
    }
}

impl Config {
    /// Defaults for the given strategy.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            maximum_load_factor: strategy.default_load_factor(),
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }

    pub fn linear() -> Self {
        Self::new(Strategy::Linear)
    }

    pub fn quadratic() -> Self {
        Self::new(Strategy::Quadratic)
    }

    pub fn chaining() -> Self {
        Self::new(Strategy::Chaining)
    }

    method_builder!(strategy, Strategy);
    method_builder!(initial_capacity, usize);
    method_builder!(maximum_load_factor, f64);
    method_builder!(growth_factor, usize);

    /// Checks that the table can honour this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self {
            strategy,
            initial_capacity,
            maximum_load_factor,
            growth_factor,
        } = *self;

        if initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let in_range = maximum_load_factor.is_finite()
            && maximum_load_factor > 0.0
            && (!strategy.is_open_addressing() || maximum_load_factor < 1.0);

        if !in_range {
            return Err(ConfigError::LoadFactor {
                strategy,
                value: maximum_load_factor,
            });
        }

        if growth_factor < 2
            || (strategy == Strategy::Quadratic && !growth_factor.is_power_of_two())
        {
            return Err(ConfigError::GrowthFactor {
                strategy,
                value: growth_factor,
            });
        }

        if strategy == Strategy::Quadratic && !initial_capacity.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo(initial_capacity));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string = match self {
            Self::Linear => "linear probing",
            Self::Quadratic => "quadratic probing",
            Self::Chaining => "chaining",
        };

        f.write_str(string)
    }
}

impl<'p> TryFrom<&'p str> for Strategy {
    type Error = ParseError<'p>;

    fn try_from(s: &'p str) -> Result<Self, ParseError<'p>> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Strategy::Linear),
            "quadratic" => Ok(Strategy::Quadratic),
            "chaining" => Ok(Strategy::Chaining),
            _ => Err(ParseError::InvalidString(s)),
        }
    }
}

impl<'p> Display for ParseError<'p> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidString(s) => write!(
                f,
                "'{s}' isn't a strategy, expected linear, quadratic or chaining"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_strategy() {
        assert_eq!(Config::linear().maximum_load_factor, 0.6);
        assert_eq!(Config::quadratic().maximum_load_factor, 0.6);
        assert_eq!(Config::chaining().maximum_load_factor, 1.0);
        assert_eq!(Config::default().strategy, Strategy::Linear);
        assert_eq!(Config::default().initial_capacity, DEFAULT_INITIAL_CAPACITY);

        for strategy in [Strategy::Linear, Strategy::Quadratic, Strategy::Chaining] {
            assert_eq!(Config::new(strategy).validate(), Ok(()));
        }
    }

    #[test]
    fn test_open_addressing_load_factor_below_one() {
        for strategy in [Strategy::Linear, Strategy::Quadratic] {
            for value in [1.0, 1.5, 0.0, -0.5, f64::NAN, f64::INFINITY] {
                let config = Config::new(strategy).maximum_load_factor(value);
                assert!(matches!(
                    config.validate(),
                    Err(ConfigError::LoadFactor { .. })
                ));
            }

            let config = Config::new(strategy).maximum_load_factor(0.99);
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn test_chaining_load_factor_may_exceed_one() {
        assert_eq!(Config::chaining().maximum_load_factor(1.2).validate(), Ok(()));
        assert_eq!(Config::chaining().maximum_load_factor(8.0).validate(), Ok(()));

        assert_eq!(
            Config::chaining().maximum_load_factor(0.0).validate(),
            Err(ConfigError::LoadFactor {
                strategy: Strategy::Chaining,
                value: 0.0
            })
        );
    }

    #[test]
    fn test_capacity_and_growth() {
        assert_eq!(
            Config::linear().initial_capacity(0).validate(),
            Err(ConfigError::ZeroCapacity)
        );
        assert_eq!(Config::linear().initial_capacity(7).validate(), Ok(()));
        assert_eq!(
            Config::quadratic().initial_capacity(12).validate(),
            Err(ConfigError::NotPowerOfTwo(12))
        );
        assert_eq!(
            Config::quadratic().growth_factor(3).validate(),
            Err(ConfigError::GrowthFactor {
                strategy: Strategy::Quadratic,
                value: 3
            })
        );
        assert_eq!(Config::chaining().growth_factor(3).validate(), Ok(()));
        assert!(Config::chaining().growth_factor(1).validate().is_err());
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!(Strategy::try_from("linear"), Ok(Strategy::Linear));
        assert_eq!(Strategy::try_from("Quadratic"), Ok(Strategy::Quadratic));
        assert_eq!(Strategy::try_from("CHAINING"), Ok(Strategy::Chaining));
        assert_eq!(
            Strategy::try_from("cuckoo"),
            Err(ParseError::InvalidString("cuckoo"))
        );
    }
}
