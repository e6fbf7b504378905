//! This module provides a simple logging API.
//!
//! Nothing is written until [`init`] opens the log file, so a library user
//! who never calls it pays only for an atomic load per log site.

use std::{
    fmt::Display,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex, Once,
    },
};

#[repr(usize)]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub enum Level {
    /// Designates serious errors.
    Error = 1,
    /// Designates hazardous situations.
    Warn,
    /// Designates useful information.
    Info,
    /// Designates lower priority information.
    Debug,
}

#[derive(Debug, PartialEq, PartialOrd)]
pub enum ParseError<'p> {
    InvalidString(&'p str),
}

static INIT: Once = Once::new();
/// Zero means logging is off.
static LOG_LEVEL: AtomicUsize = AtomicUsize::new(0);
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

pub const LOG_FILE_PATH: &str = "hashtables.log";

#[macro_export]
macro_rules! error {
    ($($args:tt)*) => {
        $crate::__log!($crate::log::Level::Error, $($args)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($args:tt)*) => {
        $crate::__log!($crate::log::Level::Warn, $($args)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($args:tt)*) => {
        $crate::__log!($crate::log::Level::Info, $($args)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($args:tt)*) => {
        $crate::__log!($crate::log::Level::Debug, $($args)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:expr, $($args:tt)*) => {
        if $crate::log::enabled($level) {
            match $crate::log::log(
                $level,
                &format!("{}:{} - {}", file!(), line!(), format_args!($($args)*))
            ) {
                Ok(_) => (),
                Err(e) => eprintln!("Failed to log: {}", e),
            }
        }
    };
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string = match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        };

        f.write_str(string)
    }
}

/// Opens (or creates) the log file at `path` and starts logging at `level`.
///
/// Only the first call has any effect.
pub fn init(level: Level, path: impl AsRef<Path>) -> io::Result<()> {
    let mut result = Ok(());

    INIT.call_once(|| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => match LOG_FILE.lock() {
                Ok(mut guard) => *guard = Some(file),
                Err(_) => result = Err(io::Error::other("log file lock poisoned")),
            },
            Err(e) => result = Err(e),
        };

        if result.is_ok() {
            LOG_LEVEL.store(level as usize, Ordering::Release);
        }
    });

    result
}

/// Whether a message at `level` would be written.
#[inline]
pub fn enabled(level: Level) -> bool {
    (level as usize) <= LOG_LEVEL.load(Ordering::Acquire)
}

#[doc(hidden)]
pub fn log(level: Level, message: &str) -> io::Result<()> {
    if !enabled(level) {
        return Ok(());
    }

    let mut guard = LOG_FILE
        .lock()
        .map_err(|_| io::Error::other("log file lock poisoned"))?;

    match guard.as_mut() {
        Some(file) => {
            writeln!(file, "[{level:#?}]: {message}")?;
            file.flush()
        }
        None => Err(io::Error::other(
            "Attempted to write to logger not initialised",
        )),
    }
}

impl<'p> TryFrom<&'p str> for Level {
    type Error = ParseError<'p>;

    fn try_from(s: &'p str) -> Result<Self, ParseError<'p>> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Level::Error),
            "warn" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            _ => Err(ParseError::InvalidString(s)),
        }
    }
}

impl<'p> Display for ParseError<'p> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidString(s) => {
                write!(
                    f,
                    "Attempted to convert a string {s} that doesn't match a log level"
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader};

    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(Level::try_from("Debug"), Ok(Level::Debug));
        assert_eq!(Level::try_from("WARN"), Ok(Level::Warn));
        assert_eq!(
            Level::try_from("verbose"),
            Err(ParseError::InvalidString("verbose"))
        );
        assert!(Level::Error < Level::Debug);
        assert_eq!(Level::Info.to_string(), "INFO");
    }

    #[test]
    fn test_error_content() -> io::Result<()> {
        let path = std::env::temp_dir().join(LOG_FILE_PATH);
        init(Level::Debug, &path)?;
        assert!(enabled(Level::Debug));

        let content = "some really constructive error log";
        error!("{}", content);

        // other tests may log into the same file concurrently
        let log_file = File::open(&path)?;
        let found = BufReader::new(log_file)
            .lines()
            .collect::<io::Result<Vec<_>>>()?
            .iter()
            .any(|line| line.starts_with("[Error]") && line.contains(content));

        assert!(found);

        Ok(())
    }
}
