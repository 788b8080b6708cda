#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

use contrail_interface::{Result, Session};
use rayon::prelude::*;

// Convenience re-exports.
pub use contrail_interface as interface;

pub mod annotations;
pub use annotations::Annotations;

pub mod hir;
pub use hir::Hir;

pub mod ty;

mod typeck;
pub use typeck::{CheckResult, check_contract};

/// Runs the contract-level checks for every contract in `hir`.
///
/// Contracts are checked in parallel on the session's thread pool. Diagnostics are then emitted
/// in contract order and the annotation patches applied, so the output does not depend on
/// scheduling.
///
/// Returns the annotations together with `Err` if the session's reporter holds any error.
/// Warnings do not fail the check.
#[instrument(name = "contract_level_checks", level = "debug", skip_all)]
pub fn check(sess: &Session, hir: &Hir) -> (Annotations, Result<()>) {
    let results = sess.enter(|| {
        hir.par_contract_ids().map(|id| check_contract(hir, id)).collect::<Vec<_>>()
    });

    let mut annotations = Annotations::new(hir);
    for (id, CheckResult { diagnostics, patch }) in hir.contract_ids().zip(results) {
        debug!(contract = %hir.contract(id).name, diagnostics = diagnostics.len(), "checked");
        for diagnostic in diagnostics {
            let _ = sess.dcx.emit_diagnostic(diagnostic);
        }
        annotations.apply(id, patch);
    }
    (annotations, sess.dcx.has_errors())
}
