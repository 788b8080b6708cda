//! Duplicate declarations within a single contract.

use super::CheckResult;
use crate::hir::{ContractId, EventId, FunctionId, FunctionKind, Hir};
use contrail_data_structures::map::{FxHashSet, FxIndexMap};
use contrail_interface::{Span, Symbol, bug, diagnostics::Diag, error_code};

/// Checks that no two functions of the contract share a name and parameter types, and that there
/// is at most one constructor and one fallback function.
#[instrument(level = "debug", skip_all)]
pub(super) fn check_duplicate_functions(hir: &Hir, contract_id: ContractId) -> CheckResult {
    let mut result = CheckResult::default();
    let mut functions: FxIndexMap<Symbol, Vec<FunctionId>> = FxIndexMap::default();
    let mut constructor: Option<FunctionId> = None;
    let mut fallback: Option<FunctionId> = None;

    for id in hir.defined_functions(contract_id) {
        let function = hir.function(id);
        let (previous, msg, code) = match function.kind {
            FunctionKind::Constructor => {
                (&mut constructor, "more than one constructor defined", error_code!(7997))
            }
            FunctionKind::Fallback => {
                (&mut fallback, "only one fallback function is allowed", error_code!(7301))
            }
            FunctionKind::Function => {
                let Some(name) = function.name else {
                    bug!("function {id:?} has no name");
                };
                functions.entry(name.name).or_default().push(id);
                continue;
            }
            FunctionKind::Modifier => unreachable!("modifiers are not defined functions"),
        };
        if let Some(previous) = *previous {
            result.push(
                Diag::declaration_error(msg)
                    .code(code)
                    .span(function.span)
                    .span_note(hir.function(previous).span, "another declaration is here"),
            );
        }
        *previous = Some(id);
    }

    find_duplicate_definitions(
        &mut result,
        &functions,
        |a, b| hir.function_signature(a).has_equal_parameter_types(&hir.function_signature(b)),
        |id| hir.function(id).span,
        "function",
        error_code!(1686),
    );
    result
}

/// Checks that no two events of the contract share a name and parameter types.
#[instrument(level = "debug", skip_all)]
pub(super) fn check_duplicate_events(hir: &Hir, contract_id: ContractId) -> CheckResult {
    let mut result = CheckResult::default();
    let mut events: FxIndexMap<Symbol, Vec<EventId>> = FxIndexMap::default();
    for id in hir.contract(contract_id).events() {
        events.entry(hir.event(id).name.name).or_default().push(id);
    }
    find_duplicate_definitions(
        &mut result,
        &events,
        |a, b| hir.event_parameter_types(a).eq(hir.event_parameter_types(b)),
        |id| hir.event(id).span,
        "event",
        error_code!(5883),
    );
    result
}

/// Reports one diagnostic per class of colliding declarations, anchored at its first member.
///
/// Members already listed as duplicates of an earlier declaration are not reported again.
fn find_duplicate_definitions<T: Copy>(
    result: &mut CheckResult,
    definitions: &FxIndexMap<Symbol, Vec<T>>,
    is_duplicate: impl Fn(T, T) -> bool,
    span: impl Fn(T) -> Span,
    description: &str,
    code: contrail_interface::diagnostics::DiagId,
) {
    let mut reported = FxHashSet::default();
    for (name, decls) in definitions {
        if decls.len() <= 1 {
            continue;
        }
        reported.clear();
        for (i, &decl) in decls.iter().enumerate() {
            if reported.contains(&i) {
                continue;
            }

            let mut duplicates = Vec::new();
            for (j, &other) in decls.iter().enumerate().skip(i + 1) {
                if is_duplicate(decl, other) {
                    reported.insert(j);
                    duplicates.push(span(other));
                }
            }
            if duplicates.is_empty() {
                continue;
            }

            trace!(%name, count = duplicates.len() + 1, "duplicate {description}");
            let msg = format!("{description} with same name and parameter types defined twice");
            let mut err = Diag::declaration_error(msg).code(code).span(span(decl));
            for duplicate in duplicates {
                err = err.span_note(duplicate, "other declaration is here");
            }
            result.push(err);
        }
    }
}
