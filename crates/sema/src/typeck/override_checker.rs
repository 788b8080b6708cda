//! Override checker for functions and modifiers along the linearized inheritance chain.
//!
//! This module validates:
//! - Overriding functions keep the return types of the overridden function
//! - Visibility is unchanged, except for `external` becoming `public`
//! - State mutability is unchanged
//! - Modifiers keep their parameter types
//! - A name is never used for both a function and a modifier
//!
//! Along the way it records the nearest overridden declaration of each function.

use super::CheckResult;
use crate::hir::{ContractId, FunctionId, Hir, Visibility};
use contrail_data_structures::map::{FxHashMap, FxIndexMap};
use contrail_interface::{
    Symbol, bug,
    diagnostics::{Diag, DiagId, DiagMsg},
    error_code,
};
use std::collections::hash_map::Entry;

#[instrument(level = "debug", skip_all)]
pub(super) fn check_illegal_overrides(hir: &Hir, contract_id: ContractId) -> CheckResult {
    let mut checker = OverrideChecker::new(hir);
    checker.check(contract_id);
    checker.result
}

struct OverrideChecker<'hir> {
    hir: &'hir Hir,
    /// Functions seen so far, by name. Fallback functions are keyed by `None`.
    functions: FxIndexMap<Option<Symbol>, Vec<FunctionId>>,
    /// The most derived modifier seen for each name.
    modifiers: FxIndexMap<Symbol, FunctionId>,
    super_functions: FxHashMap<FunctionId, FunctionId>,
    result: CheckResult,
}

impl<'hir> OverrideChecker<'hir> {
    fn new(hir: &'hir Hir) -> Self {
        Self {
            hir,
            functions: FxIndexMap::default(),
            modifiers: FxIndexMap::default(),
            super_functions: FxHashMap::default(),
            result: CheckResult::default(),
        }
    }

    /// Walks from derived to base, so the declarations already seen are the overriding ones.
    fn check(&mut self, contract_id: ContractId) {
        let hir = self.hir;
        for &base in &hir.contract(contract_id).linearized_bases {
            for id in hir.defined_functions(base) {
                self.check_function(id);
            }
            for id in hir.modifiers(base) {
                self.check_modifier(id);
            }
        }
    }

    fn check_function(&mut self, id: FunctionId) {
        let function = self.hir.function(id);
        // Constructors can neither be overridden nor override anything.
        if function.kind.is_constructor() {
            return;
        }

        let name = function.name.map(|name| name.name);
        if let Some(name) = name
            && let Some(&modifier) = self.modifiers.get(&name)
        {
            self.result.push(
                Diag::declaration_error("override changes function to modifier")
                    .code(error_code!(5631))
                    .span(self.hir.function(modifier).span),
            );
        }

        let overriding = self.functions.get(&name).cloned().unwrap_or_default();
        for overriding in overriding {
            self.check_function_override(overriding, id);
        }
        self.functions.entry(name).or_default().push(id);
    }

    fn check_modifier(&mut self, id: FunctionId) {
        let Some(name) = self.hir.function(id).name else {
            bug!("modifier {id:?} has no name");
        };
        let canonical = *self.modifiers.entry(name.name).or_insert(id);
        if canonical != id
            && self.hir.modifier_signature(canonical) != self.hir.modifier_signature(id)
        {
            self.result.push(
                Diag::type_error("override changes modifier signature")
                    .code(error_code!(1078))
                    .span(self.hir.function(canonical).span),
            );
        }
        if self.functions.get(&Some(name.name)).is_some_and(|functions| !functions.is_empty()) {
            self.result.push(
                Diag::declaration_error("override changes modifier to function")
                    .code(error_code!(1469))
                    .span(self.hir.function(canonical).span),
            );
        }
    }

    /// Checks `function`, seen earlier in the walk, against `super_function` from a base.
    fn check_function_override(&mut self, function: FunctionId, super_function: FunctionId) {
        let sig = self.hir.function_signature(function);
        let super_sig = self.hir.function_signature(super_function);
        if !sig.has_equal_parameter_types(&super_sig) {
            return;
        }

        if !sig.has_equal_return_types(&super_sig) {
            self.override_error(
                function,
                super_function,
                "overriding function return types differ",
                error_code!(4822),
            );
        } else if let Entry::Vacant(entry) = self.super_functions.entry(function) {
            trace!(?function, ?super_function, "recorded super function");
            entry.insert(super_function);
            self.result.patch.super_functions.push((function, super_function));
        }

        // Visibility change from external to public is fine.
        // Any other change is disallowed.
        let widened = super_sig.visibility == Visibility::External
            && sig.visibility == Visibility::Public;
        if sig.visibility != super_sig.visibility && !widened {
            self.override_error(
                function,
                super_function,
                "overriding function visibility differs",
                error_code!(9098),
            );
        }

        if sig.state_mutability != super_sig.state_mutability {
            let msg = format!(
                "overriding function changes state mutability from \"{}\" to \"{}\"",
                super_sig.state_mutability, sig.state_mutability
            );
            self.override_error(function, super_function, msg, error_code!(6959));
        }
    }

    fn override_error(
        &mut self,
        function: FunctionId,
        super_function: FunctionId,
        msg: impl Into<DiagMsg>,
        code: DiagId,
    ) {
        self.result.push(
            Diag::type_error(msg)
                .code(code)
                .span(self.hir.function(function).span)
                .span_note(self.hir.function(super_function).span, "overridden function is here"),
        );
    }
}
