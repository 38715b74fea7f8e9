//! Caller location attached to each line.
//!
//! Locations come from `#[track_caller]`: every public emit entry point is
//! annotated, so `Location::caller()` resolves to the user's call site at
//! compile time. Nothing walks the stack at runtime.

use std::fmt;
use std::panic::Location;

/// Source file and line of an emit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    file: &'static str,
    line: u32,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32) -> Self {
        CallSite { file, line }
    }

    /// The call site of the function calling this one.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        CallSite::new(location.file(), location.line())
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
