//! Core types for compiler metadata resolution
//!
//! This is the foundation crate that the build-script-facing `ccmeta`
//! crate depends on. It provides:
//! - The raw identity signals a C compiler exposes through its
//!   predefined macros (`CompilerSignals`, `VersionTriple`)
//! - The resolved, immutable metadata record (`CompilerInfo`) with its
//!   identity, version, human-readable and optimization descriptors
//!
//! This crate performs no I/O and never fails: every combination of
//! signals resolves to exactly one record, with an unknown-compiler
//! branch as the exhaustive fallback. Gathering signals from a real
//! toolchain lives in the `ccmeta` crate.

pub mod info;
pub mod signals;

pub use info::{CompilerId, CompilerInfo, CompilerVersion, Optimization};
pub use signals::{CompilerSignals, VersionTriple};
