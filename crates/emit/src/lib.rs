//! Build-time C compiler metadata for Rust crates
//!
//! `ccmeta` answers "which C compiler is this build using, at which
//! version, with which optimization level" once per build, from the
//! consumer's build script, and freezes the answers into compile-time
//! constants. The toolchain is interrogated through its own
//! identification facilities (a predefined-macro dump, or the version
//! banner for MSVC); unrecognized toolchains resolve to the unknown
//! branch rather than failing the build.
//!
//! Wire it up in `build.rs`:
//!
//! ```no_run
//! fn main() -> Result<(), ccmeta::Error> {
//!     ccmeta::Emitter::new().emit()
//! }
//! ```
//!
//! and read the constants anywhere in the consuming crate:
//!
//! ```
//! mod build_meta {
//!     ccmeta::constants!();
//! }
//!
//! let compiler = build_meta::COMPILER_NAME.unwrap_or("unknown");
//! assert!(!compiler.is_empty());
//! ```
//!
//! The compiler is chosen from `CCMETA_CC`, `CC`, or `PATH`, with flags
//! from `CCMETA_CFLAGS`/`CFLAGS` passed through so the optimization
//! descriptor reflects the real build mode.
//!
//! # Suppressing constant groups
//!
//! Each constant group can be left out independently, without affecting
//! the others:
//! - at compile time, by disabling the matching cargo feature
//!   (`compiler-name`, `compiler-version`, `human-readable`,
//!   `optimization`; all on by default)
//! - per emitter, through the builder toggles of the same names
//!
//! A suppressed group's constants read as `None` in the consumer.

pub mod emitter;
pub mod error;
pub mod probe;

pub use ccmeta_core::{
    CompilerId, CompilerInfo, CompilerSignals, CompilerVersion, Optimization, VersionTriple,
};
pub use emitter::Emitter;
pub use error::{Error, Result};
pub use probe::Probe;

/// Declare compile-time constants backed by the emitted env vars
///
/// Expands to `pub const` items reading the `CCMETA_*` env vars the
/// emitter set during the build. Each constant is `None` exactly when
/// its group was suppressed; the version components are additionally
/// `None` for MSVC, whose version number does not decompose.
#[macro_export]
macro_rules! constants {
    () => {
        /// Compiler identity name: "clang", "gcc", "msvc" or "unknown"
        pub const COMPILER_NAME: ::core::option::Option<&'static str> =
            ::core::option_env!("CCMETA_COMPILER_NAME");
        /// Composed version string, e.g. "v17.0.6" (raw number for MSVC)
        pub const COMPILER_VERSION: ::core::option::Option<&'static str> =
            ::core::option_env!("CCMETA_COMPILER_VERSION");
        /// Major version component (absent for MSVC)
        pub const COMPILER_VERSION_MAJOR: ::core::option::Option<&'static str> =
            ::core::option_env!("CCMETA_COMPILER_VERSION_MAJOR");
        /// Minor version component (absent for MSVC)
        pub const COMPILER_VERSION_MINOR: ::core::option::Option<&'static str> =
            ::core::option_env!("CCMETA_COMPILER_VERSION_MINOR");
        /// Patch version component (absent for MSVC)
        pub const COMPILER_VERSION_PATCH: ::core::option::Option<&'static str> =
            ::core::option_env!("CCMETA_COMPILER_VERSION_PATCH");
        /// Display label, e.g. "Clang 17.0.6" or "MSVC 1930 (VS 2022)"
        pub const COMPILER_HUMAN_READABLE: ::core::option::Option<&'static str> =
            ::core::option_env!("CCMETA_COMPILER_HUMAN_READABLE");
        /// Optimization descriptor, e.g. "Size optimized (-Os)"
        pub const COMPILER_OPTIMIZATION: ::core::option::Option<&'static str> =
            ::core::option_env!("CCMETA_COMPILER_OPTIMIZATION");
    };
}
