//! Compose profiles selectable from the command line

use clap::ValueEnum;
use std::fmt;

/// Which subset of the declared services to activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Profile {
    #[default]
    Cpu,
    GpuNvidia,
    GpuAmd,
    /// No profile filter; only services without a profile start
    None,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Cpu => "cpu",
            Profile::GpuNvidia => "gpu-nvidia",
            Profile::GpuAmd => "gpu-amd",
            Profile::None => "none",
        }
    }

    /// Value for compose's `--profile` flag, or `None` when unfiltered.
    pub fn filter(&self) -> Option<&'static str> {
        match self {
            Profile::None => None,
            other => Some(other.as_str()),
        }
    }

    pub fn all() -> [Profile; 4] {
        [
            Profile::Cpu,
            Profile::GpuNvidia,
            Profile::GpuAmd,
            Profile::None,
        ]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
