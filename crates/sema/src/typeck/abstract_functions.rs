//! Tracks which functions of a contract end up without an implementation.

use super::CheckResult;
use crate::hir::{ContractId, FunctionId, Hir};
use contrail_data_structures::map::FxIndexMap;
use contrail_interface::{Symbol, diagnostics::Diag, error_code};

/// A group of functions with the same name and parameter types.
struct OverloadClass {
    /// The first member of the group, which the group is reported as.
    representative: FunctionId,
    implemented: bool,
}

/// Walks the linearized bases from most base to most derived and records every function that is
/// left unimplemented in the final contract.
///
/// Redeclaring an already implemented function without a body is an error.
#[instrument(level = "debug", skip_all)]
pub(super) fn check_abstract_functions(hir: &Hir, contract_id: ContractId) -> CheckResult {
    let mut result = CheckResult::default();
    // Fallback functions are keyed by `None`.
    let mut functions: FxIndexMap<Option<Symbol>, Vec<OverloadClass>> = FxIndexMap::default();

    for &base in hir.contract(contract_id).linearized_bases.iter().rev() {
        for id in hir.defined_functions(base) {
            let function = hir.function(id);
            if function.kind.is_constructor() {
                continue;
            }

            let classes = functions.entry(function.name.map(|name| name.name)).or_default();
            let signature = hir.function_signature(id);
            let class = classes.iter_mut().find(|class| {
                hir.function_signature(class.representative).has_equal_parameter_types(&signature)
            });
            let implemented = function.is_implemented();
            match class {
                None => classes.push(OverloadClass { representative: id, implemented }),
                Some(class) if class.implemented => {
                    if !implemented {
                        let msg = "redeclaring an already implemented function as abstract";
                        result.push(
                            Diag::type_error(msg).code(error_code!(4593)).span(function.span),
                        );
                    }
                }
                Some(class) => class.implemented = implemented,
            }
        }
    }

    let unimplemented = functions
        .values()
        .flatten()
        .filter(|class| !class.implemented)
        .map(|class| class.representative);
    result.patch.unimplemented.extend(unimplemented);
    if !result.patch.unimplemented.is_empty() {
        debug!(count = result.patch.unimplemented.len(), "contract has unimplemented functions");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ty::Ty, typeck::test_utils::*};

    #[test]
    fn fully_implemented() {
        let mut b = HirBuilder::new();
        let c = b.contract("C");
        b.func(c, "f", &[]);
        b.ctor(c, &[]);
        let result = check_abstract_functions(&b.hir, c);
        assert!(result.diagnostics.is_empty());
        assert!(result.patch.unimplemented.is_empty());
    }

    #[test]
    fn unimplemented_reports_base_declaration() {
        let mut b = HirBuilder::new();
        let a = b.contract("A");
        let c = b.contract("C");
        b.linearize(c, &[c, a]);
        let declared = b.abstract_func(a, "f", &[]);
        let other = b.abstract_func(a, "f", &[Ty::uint(8)]);
        b.abstract_func(c, "f", &[]);
        b.func(c, "f", &[Ty::uint(8)]);

        let result = check_abstract_functions(&b.hir, c);
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.patch.unimplemented, [declared]);
        assert_ne!(declared, other);
    }

    #[test]
    fn implemented_in_derived() {
        let mut b = HirBuilder::new();
        let a = b.contract("A");
        let c = b.contract("C");
        b.linearize(c, &[c, a]);
        b.abstract_func(a, "f", &[]);
        b.func(c, "f", &[]);
        let result = check_abstract_functions(&b.hir, c);
        assert!(result.diagnostics.is_empty());
        assert!(result.patch.unimplemented.is_empty());

        // The base on its own stays abstract.
        let result = check_abstract_functions(&b.hir, a);
        assert_eq!(result.patch.unimplemented.len(), 1);
    }

    #[test]
    fn implemented_in_grandparent() {
        let mut b = HirBuilder::new();
        let a = b.contract("A");
        let mid = b.contract("B");
        let c = b.contract("C");
        b.linearize(c, &[c, mid, a]);
        b.func(a, "f", &[]);
        let result = check_abstract_functions(&b.hir, c);
        assert!(result.diagnostics.is_empty());
        assert!(result.patch.unimplemented.is_empty());
    }

    #[test]
    fn redeclared_as_abstract() {
        let mut b = HirBuilder::new();
        let a = b.contract("A");
        let c = b.contract("C");
        b.linearize(c, &[c, a]);
        b.func(a, "f", &[]);
        let redeclared = b.abstract_func(c, "f", &[]);

        let result = check_abstract_functions(&b.hir, c);
        assert_eq!(messages(&result), ["redeclaring an already implemented function as abstract"]);
        assert_eq!(result.diagnostics[0].primary_span(), Some(b.hir.function(redeclared).span));
        assert!(result.patch.unimplemented.is_empty());
    }

    #[test]
    fn unrelated_bases_share_a_slot() {
        let mut b = HirBuilder::new();
        let left = b.contract("B");
        let right = b.contract("C");
        let d = b.contract("D");
        b.linearize(d, &[d, right, left]);
        let declared = b.abstract_func(left, "f", &[]);
        b.func(right, "f", &[]);

        let result = check_abstract_functions(&b.hir, d);
        assert!(result.diagnostics.is_empty());
        assert!(result.patch.unimplemented.is_empty());

        let result = check_abstract_functions(&b.hir, left);
        assert_eq!(result.patch.unimplemented, [declared]);
    }

    #[test]
    fn unrelated_base_redeclares_as_abstract() {
        let mut b = HirBuilder::new();
        let left = b.contract("B");
        let right = b.contract("C");
        let d = b.contract("D");
        b.linearize(d, &[d, right, left]);
        b.func(left, "f", &[]);
        let redeclared = b.abstract_func(right, "f", &[]);

        let result = check_abstract_functions(&b.hir, d);
        assert_eq!(messages(&result), ["redeclaring an already implemented function as abstract"]);
        let diag = &result.diagnostics[0];
        assert_eq!(diag.code, Some(error_code!(4593)));
        assert_eq!(diag.primary_span(), Some(b.hir.function(redeclared).span));
        assert!(result.patch.unimplemented.is_empty());
    }

    #[test]
    fn fallback_without_body() {
        let mut b = HirBuilder::new();
        let c = b.contract("C");
        let fallback = b.function(c, crate::hir::FunctionKind::Fallback, None, |f| f);
        b.ctor(c, &[]);
        let result = check_abstract_functions(&b.hir, c);
        assert_eq!(result.patch.unimplemented, [fallback]);
    }
}
