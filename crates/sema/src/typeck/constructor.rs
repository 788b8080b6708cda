//! Validation of the contract's own constructor.

use super::CheckResult;
use crate::hir::{ContractId, Hir, StateMutability, Visibility};
use contrail_interface::{diagnostics::Diag, error_code};

/// Checks the contract's own constructor, if it has one.
#[instrument(level = "debug", skip_all)]
pub(super) fn check_constructor(hir: &Hir, contract_id: ContractId) -> CheckResult {
    let mut result = CheckResult::default();
    let Some(ctor) = hir.constructor(contract_id) else { return result };
    let ctor = hir.function(ctor);

    if !ctor.returns.is_empty() {
        result.push(
            Diag::type_error("non-empty \"returns\" directive for constructor")
                .code(error_code!(9712))
                .span(ctor.returns_span),
        );
    }
    if !matches!(ctor.state_mutability, StateMutability::NonPayable | StateMutability::Payable) {
        let msg = format!(
            "constructor must be payable or non-payable, but is \"{}\"",
            ctor.state_mutability
        );
        result.push(Diag::type_error(msg).code(error_code!(1558)).span(ctor.span));
    }
    if !matches!(ctor.visibility, Visibility::Public | Visibility::Internal) {
        result.push(
            Diag::type_error("constructor must be public or internal")
                .code(error_code!(9239))
                .span(ctor.span),
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hir::FunctionKind, ty::Ty, typeck::test_utils::*};
    use contrail_interface::Span;

    #[test]
    fn no_constructor() {
        let mut b = HirBuilder::new();
        let c = b.contract("C");
        b.func(c, "f", &[]);
        assert_eq!(check_constructor(&b.hir, c), CheckResult::default());
    }

    #[test]
    fn valid_constructors() {
        for (mutability, visibility) in [
            (StateMutability::NonPayable, Visibility::Public),
            (StateMutability::Payable, Visibility::Public),
            (StateMutability::NonPayable, Visibility::Internal),
        ] {
            let mut b = HirBuilder::new();
            let c = b.contract("C");
            b.function(c, FunctionKind::Constructor, None, |f| {
                f.with_state_mutability(mutability).with_visibility(visibility)
            });
            let result = check_constructor(&b.hir, c);
            assert!(result.diagnostics.is_empty(), "{mutability} {visibility}");
        }
    }

    #[test]
    fn returns_are_reported_at_the_list() {
        let mut b = HirBuilder::new();
        let c = b.contract("C");
        let returns_span = Span::from_range(10..20);
        b.function(c, FunctionKind::Constructor, None, |f| {
            f.with_returns(vars(&[Ty::uint(256)]), returns_span)
        });
        let result = check_constructor(&b.hir, c);
        assert_eq!(messages(&result), ["non-empty \"returns\" directive for constructor"]);
        assert_eq!(result.diagnostics[0].primary_span(), Some(returns_span));
    }

    #[test]
    fn external_view_constructor_fails_both() {
        let mut b = HirBuilder::new();
        let c = b.contract("C");
        b.function(c, FunctionKind::Constructor, None, |f| {
            f.with_state_mutability(StateMutability::View).with_visibility(Visibility::External)
        });
        let result = check_constructor(&b.hir, c);
        assert_eq!(
            messages(&result),
            [
                "constructor must be payable or non-payable, but is \"view\"",
                "constructor must be public or internal",
            ]
        );
        assert!(!result.is_ok());
    }

    #[test]
    fn external_constructor_fails_regardless_of_mutability() {
        for mutability in [StateMutability::NonPayable, StateMutability::Payable] {
            let mut b = HirBuilder::new();
            let c = b.contract("C");
            b.function(c, FunctionKind::Constructor, None, |f| {
                f.with_state_mutability(mutability).with_visibility(Visibility::External)
            });
            let result = check_constructor(&b.hir, c);
            assert_eq!(messages(&result), ["constructor must be public or internal"]);
        }
    }

    #[test]
    fn only_the_first_constructor_is_checked() {
        let mut b = HirBuilder::new();
        let c = b.contract("C");
        b.ctor(c, &[]);
        b.function(c, FunctionKind::Constructor, None, |f| f.with_visibility(Visibility::Private));
        assert!(check_constructor(&b.hir, c).diagnostics.is_empty());
    }
}
