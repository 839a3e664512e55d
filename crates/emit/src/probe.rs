//! C compiler discovery and interrogation
//!
//! The probe asks the toolchain itself who it is: it runs the compiler
//! in preprocess mode with `-dM` so the full set of predefined macros is
//! dumped, then picks the identity macros out of the dump. MSVC's
//! `cl.exe` has no macro-dump mode, so when the dump invocation fails
//! the probe falls back to scraping `_MSC_VER` out of the version
//! banner the tool prints.

use crate::error::{Error, Result};
use ccmeta_core::{CompilerSignals, VersionTriple};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Probes a C compiler executable for its identity signals
#[derive(Debug, Clone)]
pub struct Probe {
    path: PathBuf,
    args: Vec<String>,
}

impl Probe {
    /// Probe a specific compiler executable
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
        }
    }

    /// Probe the compiler the environment selects
    ///
    /// Resolution order: `CCMETA_CC`, then `CC`, then `cc` and finally
    /// `cl` on `PATH`. Flags from `CCMETA_CFLAGS` (or `CFLAGS`) are
    /// passed through to the dump invocation so the optimization macros
    /// reflect the real build flags.
    pub fn from_env() -> Result<Self> {
        let path = match std::env::var_os("CCMETA_CC").or_else(|| std::env::var_os("CC")) {
            Some(cc) => PathBuf::from(cc),
            None => which::which("cc")
                .or_else(|_| which::which("cl"))
                .map_err(|source| Error::CompilerNotFound { source })?,
        };

        let mut probe = Self::new(path);
        for var in ["CCMETA_CFLAGS", "CFLAGS"] {
            if let Ok(flags) = std::env::var(var) {
                probe.args = shell_words::split(&flags).map_err(|source| Error::Flags {
                    var,
                    source,
                })?;
                break;
            }
        }

        Ok(probe)
    }

    /// Add extra flags to the dump invocation
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Compiler executable being probed
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gather identity signals from the compiler
    ///
    /// Tries the macro dump first; a tool that rejects preprocess mode
    /// is retried through its version banner.
    pub fn signals(&self) -> Result<CompilerSignals> {
        debug!("probing C compiler: {}", self.path.display());

        match self.macro_dump() {
            Ok(dump) => Ok(parse_macro_dump(&dump)),
            Err(dump_err) => {
                debug!("macro dump failed ({dump_err}), trying version banner");
                let banner = self.version_banner()?;
                let msc_ver =
                    parse_msc_banner(&banner).ok_or_else(|| Error::UnrecognizedOutput {
                        tool: self.path.clone(),
                    })?;
                Ok(CompilerSignals {
                    msc_ver: Some(msc_ver),
                    ..Default::default()
                })
            }
        }
    }

    fn macro_dump(&self) -> Result<String> {
        let mut argv = self.args.clone();
        argv.extend(["-E", "-dM", "-x", "c", "-"].map(str::to_string));

        duct::cmd(&self.path, argv)
            .stdin_null()
            .stderr_null()
            .read()
            .map_err(|source| Error::Exec {
                tool: self.path.clone(),
                source,
            })
    }

    fn version_banner(&self) -> Result<String> {
        // cl.exe prints its banner to stderr and exits non-zero when
        // invoked without input, hence unchecked + merged streams.
        duct::cmd!(&self.path)
            .stdin_null()
            .stderr_to_stdout()
            .unchecked()
            .read()
            .map_err(|source| Error::Exec {
                tool: self.path.clone(),
                source,
            })
    }
}

/// Parse a `-E -dM` preprocessor dump into identity signals
///
/// Lines other than `#define NAME VALUE` for a macro of interest are
/// skipped, so arbitrary noise in the dump is harmless. A dump with no
/// recognized identity macros parses to the empty signal set.
fn parse_macro_dump(dump: &str) -> CompilerSignals {
    let mut defines: HashMap<&str, &str> = HashMap::new();
    for line in dump.lines() {
        let Some(rest) = line.trim_start().strip_prefix("#define ") else {
            continue;
        };
        let mut parts = rest.splitn(2, char::is_whitespace);
        let Some(name) = parts.next() else { continue };
        defines.insert(name, parts.next().unwrap_or("").trim());
    }

    let int = |name: &str| defines.get(name).and_then(|value| value.parse::<u32>().ok());

    let clang = defines.contains_key("__clang__").then(|| {
        VersionTriple::new(
            int("__clang_major__").unwrap_or(0),
            int("__clang_minor__").unwrap_or(0),
            int("__clang_patchlevel__").unwrap_or(0),
        )
    });

    let gnuc = int("__GNUC__").or_else(|| int("__GNUG__")).map(|major| {
        VersionTriple::new(
            major,
            int("__GNUC_MINOR__").unwrap_or(0),
            int("__GNUC_PATCHLEVEL__").unwrap_or(0),
        )
    });

    CompilerSignals {
        clang,
        gnuc,
        msc_ver: int("_MSC_VER"),
        optimize: defines.contains_key("__OPTIMIZE__"),
        optimize_size: defines.contains_key("__OPTIMIZE_SIZE__"),
    }
}

/// Pull `_MSC_VER` out of cl.exe's version banner
///
/// The banner reports the toolset as `Version {major}.{minor}.{build}`;
/// `_MSC_VER` is `major * 100 + minor`.
fn parse_msc_banner(banner: &str) -> Option<u32> {
    let rest = banner.split("Version ").nth(1)?;
    let token = rest.split_whitespace().next()?;
    let mut parts = token.split('.');
    let major: u32 = parts.next()?.parse().ok()?;
    let minor: u32 = parts.next()?.parse().ok()?;
    Some(major * 100 + minor)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    const CLANG_DUMP: &str = "\
#define _LP64 1
#define __GNUC_MINOR__ 2
#define __GNUC_PATCHLEVEL__ 1
#define __GNUC__ 4
#define __OPTIMIZE_SIZE__ 1
#define __OPTIMIZE__ 1
#define __STDC_VERSION__ 201710L
#define __clang__ 1
#define __clang_major__ 17
#define __clang_minor__ 0
#define __clang_patchlevel__ 6
#define __llvm__ 1
";

    const GCC_DUMP: &str = "\
#define __CHAR_BIT__ 8
#define __GNUC_MINOR__ 2
#define __GNUC_PATCHLEVEL__ 1
#define __GNUC__ 13
#define __SIZEOF_INT__ 4
#define __VERSION__ \"13.2.1 20230801\"
";

    #[test]
    fn test_parse_clang_dump() {
        let signals = parse_macro_dump(CLANG_DUMP);

        assert_eq!(signals.clang, Some(VersionTriple::new(17, 0, 6)));
        assert_eq!(signals.gnuc, Some(VersionTriple::new(4, 2, 1)));
        assert_eq!(signals.msc_ver, None);
        assert!(signals.optimize);
        assert!(signals.optimize_size);
    }

    #[test]
    fn test_parse_gcc_dump() {
        let signals = parse_macro_dump(GCC_DUMP);

        assert_eq!(signals.clang, None);
        assert_eq!(signals.gnuc, Some(VersionTriple::new(13, 2, 1)));
        assert!(!signals.optimize);
        assert!(!signals.optimize_size);
    }

    #[test]
    fn test_parse_gnug_only_dump() {
        let signals = parse_macro_dump("#define __GNUG__ 12\n");
        assert_eq!(signals.gnuc, Some(VersionTriple::new(12, 0, 0)));
    }

    #[test]
    fn test_parse_skips_noise_lines() {
        let dump = "\
# 1 \"<stdin>\"
not a define at all
#define
#define __GNUC__ 13
#define __GNUC_MINOR__ not-a-number
";
        let signals = parse_macro_dump(dump);
        assert_eq!(signals.gnuc, Some(VersionTriple::new(13, 0, 0)));
    }

    #[test]
    fn test_parse_empty_dump_is_empty_signals() {
        assert_eq!(parse_macro_dump(""), CompilerSignals::default());
    }

    #[test]
    fn test_parse_msc_banner() {
        let banner = "Microsoft (R) C/C++ Optimizing Compiler Version 19.30.30706 for x64\n\
                      Copyright (C) Microsoft Corporation.  All rights reserved.\n\
                      usage: cl [ option... ] filename... [ /link linkoption... ]";
        assert_eq!(parse_msc_banner(banner), Some(1930));
    }

    #[test]
    fn test_parse_msc_banner_older_toolset() {
        let banner = "Microsoft (R) C/C++ Optimizing Compiler Version 19.00.24215.1 for x86";
        assert_eq!(parse_msc_banner(banner), Some(1900));
    }

    #[test]
    fn test_parse_msc_banner_without_version() {
        assert_eq!(parse_msc_banner("no toolset information here"), None);
        assert_eq!(parse_msc_banner("Version only-words"), None);
        assert_eq!(parse_msc_banner(""), None);
    }

    #[test]
    fn test_probe_keeps_extra_args() {
        let probe = Probe::new("/usr/bin/cc").args(["-Os", "-Wall"]);
        assert_eq!(probe.args, vec!["-Os".to_string(), "-Wall".to_string()]);
        assert_eq!(probe.path(), Path::new("/usr/bin/cc"));
    }
}
