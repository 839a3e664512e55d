//! Resolved compiler metadata
//!
//! `CompilerInfo::resolve` turns a set of raw identity signals into the
//! final metadata record: identity name, version, human-readable
//! descriptor and optimization descriptor. Resolution is total: an
//! environment with no recognized signals lands in the unknown branch
//! instead of failing.

use crate::signals::{CompilerSignals, VersionTriple};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compiler identity
///
/// Checked in declaration order: clang also defines the gcc-compatible
/// macros, so it must win over `Gcc`. `Msvc` comes last among the named
/// compilers and `Unknown` is the exhaustive fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerId {
    /// clang (including clang-cl, which also defines `_MSC_VER`)
    Clang,
    /// GNU gcc/g++
    Gcc,
    /// Microsoft Visual C++
    Msvc,
    /// No recognized identity signal
    Unknown,
}

impl CompilerId {
    /// Canonical lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clang => "clang",
            Self::Gcc => "gcc",
            Self::Msvc => "msvc",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CompilerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiler version
///
/// clang and gcc versions decompose into `major.minor.patch`; MSVC only
/// exposes the rolling `_MSC_VER` number, which does not map onto a
/// triple and is kept raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompilerVersion {
    /// Decomposed version (clang, gcc, unknown)
    Triple(VersionTriple),
    /// Raw `_MSC_VER` value (msvc)
    Raw(u32),
}

impl CompilerVersion {
    /// Version components, for schemes that decompose
    pub const fn triple(self) -> Option<VersionTriple> {
        match self {
            Self::Triple(triple) => Some(triple),
            Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triple(triple) => write!(f, "v{triple}"),
            Self::Raw(msc_ver) => write!(f, "{msc_ver}"),
        }
    }
}

/// Optimization descriptor
///
/// Only clang and gcc report their optimization mode through the
/// `__OPTIMIZE__` macros; everything else is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Optimization {
    /// Size optimization (`-Os`)
    #[serde(rename = "Size optimized (-Os)")]
    Size,
    /// Any speed optimization level
    #[serde(rename = "Optimized (-O1, -O2, -O3, etc.)")]
    Speed,
    /// Optimization disabled
    #[serde(rename = "No optimization (-O0)")]
    None,
    /// Not reported by this compiler
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Optimization {
    /// Descriptor string
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Size => "Size optimized (-Os)",
            Self::Speed => "Optimized (-O1, -O2, -O3, etc.)",
            Self::None => "No optimization (-O0)",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Optimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved compiler metadata
///
/// Produced once from a set of signals and constant thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerInfo {
    /// Identity name: "clang", "gcc", "msvc" or "unknown"
    pub name: CompilerId,
    /// Version, decomposed where the scheme allows
    pub version: CompilerVersion,
    /// Display label, e.g. `"Clang 17.0.6"` or `"MSVC 1930 (VS 2022)"`
    pub human_readable: String,
    /// Optimization descriptor
    pub optimization: Optimization,
}

impl CompilerInfo {
    /// Resolve signals into a metadata record
    ///
    /// Exactly one identity branch applies per resolution. An unknown
    /// compiler gets the fixed version `v1.0.0`.
    pub fn resolve(signals: &CompilerSignals) -> Self {
        let (name, version) = match (signals.clang, signals.gnuc, signals.msc_ver) {
            (Some(triple), _, _) => (CompilerId::Clang, CompilerVersion::Triple(triple)),
            (None, Some(triple), _) => (CompilerId::Gcc, CompilerVersion::Triple(triple)),
            (None, None, Some(msc_ver)) => (CompilerId::Msvc, CompilerVersion::Raw(msc_ver)),
            (None, None, None) => (
                CompilerId::Unknown,
                CompilerVersion::Triple(VersionTriple::new(1, 0, 0)),
            ),
        };

        let human_readable = match (name, version) {
            (CompilerId::Clang, CompilerVersion::Triple(triple)) => format!("Clang {triple}"),
            (CompilerId::Gcc, CompilerVersion::Triple(triple)) => format!("GCC {triple}"),
            (CompilerId::Msvc, CompilerVersion::Raw(msc_ver)) => {
                format!("MSVC {msc_ver} ({})", vs_release(msc_ver))
            }
            _ => "Unknown Compiler".to_string(),
        };

        let optimization = match name {
            CompilerId::Clang | CompilerId::Gcc => {
                if signals.optimize {
                    if signals.optimize_size {
                        Optimization::Size
                    } else {
                        Optimization::Speed
                    }
                } else {
                    Optimization::None
                }
            }
            CompilerId::Msvc | CompilerId::Unknown => Optimization::Unknown,
        };

        Self {
            name,
            version,
            human_readable,
            optimization,
        }
    }

    /// Composed version string
    ///
    /// `"v{major}.{minor}.{patch}"` for decomposed versions, the bare
    /// `_MSC_VER` number for MSVC.
    pub fn version_string(&self) -> String {
        self.version.to_string()
    }
}

/// Map a raw `_MSC_VER` value to its Visual Studio release name
///
/// Checked highest-first. The 2017 and later toolsets roll their minor
/// version, so those arms are ranges; earlier releases pinned a single
/// value each and match exactly. Anything in between or below falls to
/// `"VS unknown"`.
pub const fn vs_release(msc_ver: u32) -> &'static str {
    match msc_ver {
        1930.. => "VS 2022",
        1920..=1929 => "VS 2019",
        1910..=1919 => "VS 2017",
        1900 => "VS 2015",
        1800 => "VS 2013",
        1700 => "VS 2012",
        1600 => "VS 2010",
        1500 => "VS 2008",
        1400 => "VS 2005",
        1310 => "VS 2005 (old)",
        1200 => "VS .NET 2003",
        1100 => "VS .NET 2002",
        1000 => "VS 7.0",
        900 => "VS 6.0",
        800 => "VS 97",
        _ => "VS unknown",
    }
}
