use crate::{
    annotations::AnnotationPatch,
    hir::{ContractId, Hir},
};
use contrail_interface::diagnostics::Diag;

mod abstract_functions;
mod base_constructors;
mod constructor;
mod duplicates;
mod override_checker;

#[cfg(test)]
mod test_utils;

/// The outcome of checking one contract.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckResult {
    /// Diagnostics, in the order they were found.
    pub diagnostics: Vec<Diag>,
    /// Annotation writes, to be applied with [`Annotations::apply`](crate::Annotations::apply).
    pub patch: AnnotationPatch,
}

impl CheckResult {
    /// Returns `true` if no error was found. Warnings are allowed.
    pub fn is_ok(&self) -> bool {
        !self.diagnostics.iter().any(Diag::is_error)
    }

    /// Appends the diagnostics and annotation writes of `other`.
    pub fn extend(&mut self, other: Self) {
        self.diagnostics.extend(other.diagnostics);
        self.patch.extend(other.patch);
    }

    fn push(&mut self, diagnostic: Diag) {
        self.diagnostics.push(diagnostic);
    }
}

/// Runs all contract-level checks on the given contract.
///
/// Every check runs even if an earlier one found errors; none of them reads another's output.
#[instrument(level = "debug", skip(hir), fields(contract = %hir.contract(contract_id).name))]
pub fn check_contract(hir: &Hir, contract_id: ContractId) -> CheckResult {
    let mut result = CheckResult::default();
    result.extend(duplicates::check_duplicate_functions(hir, contract_id));
    result.extend(duplicates::check_duplicate_events(hir, contract_id));
    result.extend(override_checker::check_illegal_overrides(hir, contract_id));
    result.extend(abstract_functions::check_abstract_functions(hir, contract_id));
    result.extend(base_constructors::check_base_constructor_arguments(hir, contract_id));
    result.extend(constructor::check_constructor(hir, contract_id));
    result
}
