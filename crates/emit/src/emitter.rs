//! Cargo build-script instruction emitter
//!
//! Resolves compiler signals (probed from the toolchain, or injected)
//! and prints the `cargo:` instructions that freeze them into
//! compile-time env constants for the consuming crate:
//!
//! ```no_run
//! fn main() -> Result<(), ccmeta::Error> {
//!     ccmeta::Emitter::new().emit()
//! }
//! ```
//!
//! Constant groups can be suppressed independently, either at compile
//! time through this crate's cargo features or per emitter through the
//! builder toggles. Probe failures degrade to the unknown-compiler
//! branch by default; `fail_on_error` turns them into hard errors.

use crate::error::Result;
use crate::probe::Probe;
use ccmeta_core::{CompilerInfo, CompilerSignals};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::warn;

/// Emits compiler metadata as cargo build-script instructions
#[derive(Debug, Clone)]
pub struct Emitter {
    compiler: Option<PathBuf>,
    args: Vec<String>,
    signals: Option<CompilerSignals>,
    name: bool,
    version: bool,
    human_readable: bool,
    optimization: bool,
    fail_on_error: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            compiler: None,
            args: Vec::new(),
            signals: None,
            name: true,
            version: true,
            human_readable: true,
            optimization: true,
            fail_on_error: false,
        }
    }
}

impl Emitter {
    /// Emitter with every constant group enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe a specific compiler instead of the environment's choice
    pub fn compiler(mut self, path: impl Into<PathBuf>) -> Self {
        self.compiler = Some(path.into());
        self
    }

    /// Extra flags for the probe invocation
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Use pre-gathered signals instead of probing a toolchain
    pub fn signals(mut self, signals: CompilerSignals) -> Self {
        self.signals = Some(signals);
        self
    }

    /// Toggle the identity-name constant group
    pub fn name(mut self, enable: bool) -> Self {
        self.name = enable;
        self
    }

    /// Toggle the version constant group
    pub fn version(mut self, enable: bool) -> Self {
        self.version = enable;
        self
    }

    /// Toggle the human-readable descriptor constant group
    pub fn human_readable(mut self, enable: bool) -> Self {
        self.human_readable = enable;
        self
    }

    /// Toggle the optimization descriptor constant group
    pub fn optimization(mut self, enable: bool) -> Self {
        self.optimization = enable;
        self
    }

    /// Fail instead of degrading to the unknown branch on probe errors
    pub fn fail_on_error(mut self, enable: bool) -> Self {
        self.fail_on_error = enable;
        self
    }

    /// Emit to stdout, for use in a build script
    pub fn emit(&self) -> Result<()> {
        self.emit_to(&mut io::stdout().lock())
    }

    /// Emit cargo instructions to an arbitrary writer
    pub fn emit_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let signals = self.resolve_signals(out)?;
        let info = CompilerInfo::resolve(&signals);

        #[cfg(feature = "compiler-name")]
        if self.name {
            writeln!(out, "cargo:rustc-env=CCMETA_COMPILER_NAME={}", info.name)?;
        }

        #[cfg(feature = "compiler-version")]
        if self.version {
            writeln!(
                out,
                "cargo:rustc-env=CCMETA_COMPILER_VERSION={}",
                info.version_string()
            )?;
            // MSVC's rolling version number does not decompose, so the
            // component constants exist for every other identity only.
            if let Some(triple) = info.version.triple() {
                writeln!(
                    out,
                    "cargo:rustc-env=CCMETA_COMPILER_VERSION_MAJOR={}",
                    triple.major
                )?;
                writeln!(
                    out,
                    "cargo:rustc-env=CCMETA_COMPILER_VERSION_MINOR={}",
                    triple.minor
                )?;
                writeln!(
                    out,
                    "cargo:rustc-env=CCMETA_COMPILER_VERSION_PATCH={}",
                    triple.patch
                )?;
            }
        }

        #[cfg(feature = "human-readable")]
        if self.human_readable {
            writeln!(
                out,
                "cargo:rustc-env=CCMETA_COMPILER_HUMAN_READABLE={}",
                info.human_readable
            )?;
        }

        #[cfg(feature = "optimization")]
        if self.optimization {
            writeln!(
                out,
                "cargo:rustc-env=CCMETA_COMPILER_OPTIMIZATION={}",
                info.optimization
            )?;
        }

        #[cfg(not(any(
            feature = "compiler-name",
            feature = "compiler-version",
            feature = "human-readable",
            feature = "optimization"
        )))]
        let _ = info;

        Ok(())
    }

    fn resolve_signals<W: Write>(&self, out: &mut W) -> Result<CompilerSignals> {
        if let Some(signals) = &self.signals {
            return Ok(signals.clone());
        }

        // Probing depends on the environment's compiler selection, so a
        // change to any of these must rerun the consumer's build script.
        for var in ["CCMETA_CC", "CC", "CCMETA_CFLAGS", "CFLAGS"] {
            writeln!(out, "cargo:rerun-if-env-changed={var}")?;
        }

        let probed = match &self.compiler {
            Some(path) => Ok(Probe::new(path).args(self.args.iter().cloned())),
            None => Probe::from_env().map(|probe| probe.args(self.args.iter().cloned())),
        }
        .and_then(|probe| probe.signals());

        match probed {
            Ok(signals) => Ok(signals),
            Err(err) if self.fail_on_error => Err(err),
            Err(err) => {
                warn!("compiler probe failed, falling back to the unknown branch: {err}");
                writeln!(
                    out,
                    "cargo:warning=ccmeta: compiler probe failed ({err}); \
                     emitting unknown-compiler constants"
                )?;
                Ok(CompilerSignals::default())
            }
        }
    }
}
