//! Raw compiler identity signals
//!
//! A C compiler identifies itself through predefined preprocessor
//! macros. This module models those signals as plain data so that
//! resolution can be exercised independently of any real toolchain:
//! - clang defines `__clang__` plus `__clang_major__`/`__clang_minor__`/
//!   `__clang_patchlevel__` (and, for compatibility, the GNU macros too)
//! - gcc defines `__GNUC__`/`__GNUG__` plus `__GNUC_MINOR__`/
//!   `__GNUC_PATCHLEVEL__`
//! - MSVC defines `_MSC_VER` as a single rolling number
//! - `__OPTIMIZE__` and `__OPTIMIZE_SIZE__` report the optimization mode

use serde::{Deserialize, Serialize};
use std::fmt;

/// A decomposed `major.minor.patch` compiler version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionTriple {
    /// Major version component
    pub major: u32,
    /// Minor version component
    pub minor: u32,
    /// Patch version component
    pub patch: u32,
}

impl VersionTriple {
    /// Create a triple from its components
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Identity signals gathered from one compiler invocation
///
/// `Some`/`true` means the corresponding macro was defined. The
/// `Default` value is the empty environment: no identity macros, no
/// optimization flags, which resolves to the unknown-compiler branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSignals {
    /// `__clang__` with its version components
    pub clang: Option<VersionTriple>,
    /// `__GNUC__`/`__GNUG__` with its version components
    pub gnuc: Option<VersionTriple>,
    /// `_MSC_VER`
    pub msc_ver: Option<u32>,
    /// `__OPTIMIZE__`
    pub optimize: bool,
    /// `__OPTIMIZE_SIZE__`
    pub optimize_size: bool,
}
