//! Checker options.

use crate::{ColorChoice, ErrorFormat, Threads};
use std::num::NonZeroUsize;

/// Default cap on the number of secondary locations rendered for a single diagnostic.
pub const DEFAULT_MAX_SECONDARY_LOCATIONS: usize = 32;

/// Contract-level checker options.
///
/// Embedders that expose these on a command line can flatten them into their own parser with the
/// `clap` feature.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
#[allow(clippy::manual_non_exhaustive)]
pub struct Opts {
    /// Number of threads to use. Zero specifies the number of logical cores.
    #[cfg_attr(feature = "clap", arg(long, short = 'j', visible_alias = "jobs", default_value_t))]
    pub threads: Threads,

    /// Coloring.
    #[cfg_attr(
        feature = "clap",
        arg(help_heading = "Display options", long, value_enum, default_value_t)
    )]
    pub color: ColorChoice,
    /// How errors and other messages are produced.
    #[cfg_attr(
        feature = "clap",
        arg(help_heading = "Display options", long, value_enum, default_value_t)
    )]
    pub error_format: ErrorFormat,
    /// Whether to disable warnings.
    #[cfg_attr(feature = "clap", arg(help_heading = "Display options", long))]
    pub no_warnings: bool,
    /// Maximum number of secondary locations rendered for one diagnostic.
    ///
    /// Locations past the limit are replaced by a single placeholder note.
    #[cfg_attr(
        feature = "clap",
        arg(
            help_heading = "Display options",
            long,
            default_value_t = DEFAULT_MAX_SECONDARY_LOCATIONS
        )
    )]
    pub max_secondary_locations: usize,

    // Allows `Opts { x: y, ..Default::default() }`.
    #[doc(hidden)]
    #[cfg_attr(feature = "clap", arg(skip))]
    pub _non_exhaustive: (),
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            threads: Threads::default(),
            color: ColorChoice::default(),
            error_format: ErrorFormat::default(),
            no_warnings: false,
            max_secondary_locations: DEFAULT_MAX_SECONDARY_LOCATIONS,
            _non_exhaustive: (),
        }
    }
}

impl Opts {
    /// Returns the number of threads to use.
    #[inline]
    pub fn threads(&self) -> NonZeroUsize {
        self.threads.0
    }
}

#[cfg(all(test, feature = "clap"))]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        opts: Opts,
    }

    #[test]
    fn parse_flags() {
        let cli =
            Cli::parse_from(["contrail", "--error-format", "json", "-j", "2", "--no-warnings"]);
        assert_eq!(cli.opts.error_format, ErrorFormat::Json);
        assert_eq!(cli.opts.threads().get(), 2);
        assert!(cli.opts.no_warnings);
        assert_eq!(cli.opts.max_secondary_locations, DEFAULT_MAX_SECONDARY_LOCATIONS);
    }
}
