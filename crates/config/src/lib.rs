//! Configuration for the contract-level checker.

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use std::num::NonZeroUsize;

#[macro_use]
mod macros;

mod opts;
pub use opts::{DEFAULT_MAX_SECONDARY_LOCATIONS, Opts};

mod utils;

str_enum! {
    /// How errors and other messages are produced.
    #[derive(Default)]
    #[strum(serialize_all = "kebab-case")]
    pub enum ErrorFormat {
        /// Human-readable output.
        #[default]
        Human,
        /// Solc-like JSON output, one object per line.
        Json,
    }
}

str_enum! {
    /// Whether to color the human-readable output.
    #[derive(Default)]
    #[strum(serialize_all = "lowercase")]
    pub enum ColorChoice {
        /// Color if the output stream is a terminal.
        #[default]
        Auto,
        Always,
        Never,
    }
}

/// Wrapper to implement a custom `Default` value for the number of threads.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Threads(pub NonZeroUsize);

impl From<Threads> for NonZeroUsize {
    fn from(threads: Threads) -> Self {
        threads.0
    }
}

impl From<NonZeroUsize> for Threads {
    fn from(n: NonZeroUsize) -> Self {
        Self(n)
    }
}

impl Default for Threads {
    fn default() -> Self {
        Self(const { NonZeroUsize::new(8).unwrap() })
    }
}

impl std::str::FromStr for Threads {
    type Err = <NonZeroUsize as std::str::FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<usize>().map(|n| {
            Self(
                NonZeroUsize::new(n)
                    .or_else(|| std::thread::available_parallelism().ok())
                    .unwrap_or(NonZeroUsize::MIN),
            )
        })
    }
}

impl std::fmt::Display for Threads {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::fmt::Debug for Threads {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.0, f)
    }
}
