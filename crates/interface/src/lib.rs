//! Source positions, diagnostics, and the session shared by the contract checker.

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

/// Pluralize a word based on a count.
#[macro_export]
macro_rules! pluralize {
    ($x:expr) => {
        if $x == 1 { "" } else { "s" }
    };
}

pub mod diagnostics;
use diagnostics::ErrorGuaranteed;

mod pos;
pub use pos::{BytePos, RelativeBytePos};

mod session;
pub use session::Session;

pub mod source_map;
pub use source_map::SourceMap;

mod span;
pub use span::Span;

mod symbol;
pub use symbol::{Ident, Symbol};

pub use contrail_config as config;
pub use contrail_data_structures as data_structures;

/// Checker result type.
pub type Result<T = (), E = ErrorGuaranteed> = std::result::Result<T, E>;
