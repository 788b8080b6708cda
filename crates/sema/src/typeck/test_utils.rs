//! Builds small hierarchies for the check tests.
//!
//! Every contract `k` spans `k * 1000 .. k * 1000 + 999`, and items get consecutive non-overlapping
//! spans inside their contract.

use super::CheckResult;
use crate::{
    hir::{
        CallArgs, Contract, ContractId, Event, Function, FunctionId, FunctionKind, Hir,
        InheritanceSpecifier, ModifierInvocation, Res, Variable,
    },
    ty::Ty,
};
use contrail_data_structures::map::FxHashMap;
use contrail_interface::{Ident, Span};

#[derive(Default)]
pub(super) struct HirBuilder {
    pub(super) hir: Hir,
    next_pos: FxHashMap<ContractId, u32>,
}

impl HirBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn contract(&mut self, name: &str) -> ContractId {
        let lo = self.hir.contracts.len() as u32 * 1000;
        let span = Span::from_range(lo..lo + 999);
        let id = self.hir.add_contract(Contract::new(Ident::from_str_and_span(name, span), span));
        self.next_pos.insert(id, lo + 1);
        id
    }

    /// Sets the linearization, which must start with `c` itself.
    pub(super) fn linearize(&mut self, c: ContractId, bases: &[ContractId]) {
        assert_eq!(bases.first(), Some(&c));
        self.hir.contract_mut(c).linearized_bases = bases.to_vec();
    }

    pub(super) fn span(&mut self, c: ContractId) -> Span {
        let pos = self.next_pos.get_mut(&c).unwrap();
        let span = Span::from_range(*pos..*pos + 5);
        *pos += 10;
        span
    }

    fn args(&mut self, c: ContractId, args: Option<usize>) -> Option<CallArgs> {
        let n = args?;
        let span = self.span(c);
        Some(CallArgs::new(span, (0..n).map(|_| self.span(c)).collect()))
    }

    /// Adds `is base(args)` to `c`, returning the specifier's span.
    pub(super) fn inherit(&mut self, c: ContractId, base: ContractId, args: Option<usize>) -> Span {
        let span = self.span(c);
        let name = self.hir.contract(base).name;
        let mut spec = InheritanceSpecifier::new(name, Res::Contract(base), span);
        spec.args = self.args(c, args);
        self.hir.contract_mut(c).bases.push(spec);
        span
    }

    /// Adds a modifier-style call `base(args)` to the constructor `ctor`, returning its span.
    pub(super) fn base_call(
        &mut self,
        ctor: FunctionId,
        base: ContractId,
        args: Option<usize>,
    ) -> Span {
        let c = self.hir.function(ctor).contract;
        let span = self.span(c);
        let name = self.hir.contract(base).name;
        let mut invocation = ModifierInvocation::new(name, Res::Contract(base), span);
        invocation.args = self.args(c, args);
        self.hir.functions[ctor].modifiers.push(invocation);
        span
    }

    pub(super) fn function(
        &mut self,
        c: ContractId,
        kind: FunctionKind,
        name: Option<&str>,
        f: impl FnOnce(Function) -> Function,
    ) -> FunctionId {
        let span = self.span(c);
        let name = name.map(|name| Ident::from_str_and_span(name, span));
        self.hir.add_function(f(Function::new(c, kind, name, span)))
    }

    /// Adds an implemented public function.
    pub(super) fn func(&mut self, c: ContractId, name: &str, params: &[Ty]) -> FunctionId {
        self.function(c, FunctionKind::Function, Some(name), |f| {
            let body = f.span;
            f.with_parameters(vars(params)).with_body(body)
        })
    }

    /// Adds an unimplemented public function.
    pub(super) fn abstract_func(&mut self, c: ContractId, name: &str, params: &[Ty]) -> FunctionId {
        self.function(c, FunctionKind::Function, Some(name), |f| f.with_parameters(vars(params)))
    }

    /// Adds an implemented modifier.
    pub(super) fn modifier(&mut self, c: ContractId, name: &str, params: &[Ty]) -> FunctionId {
        self.function(c, FunctionKind::Modifier, Some(name), |f| {
            let body = f.span;
            f.with_parameters(vars(params)).with_body(body)
        })
    }

    /// Adds an implemented public constructor.
    pub(super) fn ctor(&mut self, c: ContractId, params: &[Ty]) -> FunctionId {
        self.function(c, FunctionKind::Constructor, None, |f| {
            let body = f.span;
            f.with_parameters(vars(params)).with_body(body)
        })
    }

    pub(super) fn event(&mut self, c: ContractId, name: &str, params: &[Ty]) -> Span {
        let span = self.span(c);
        let event = Event::new(c, Ident::from_str_and_span(name, span), span)
            .with_parameters(vars(params));
        self.hir.add_event(event);
        span
    }
}

pub(super) fn vars(tys: &[Ty]) -> Vec<Variable> {
    tys.iter().map(|ty| Variable::new(ty.clone(), Span::DUMMY)).collect()
}

pub(super) fn messages(result: &CheckResult) -> Vec<&str> {
    result.diagnostics.iter().map(|diag| diag.message.as_str()).collect()
}

/// Returns the labels and spans of the secondary locations of the `i`th diagnostic.
pub(super) fn notes(result: &CheckResult, i: usize) -> Vec<(&str, Span)> {
    result.diagnostics[i].secondary_locations().map(|(span, label)| (label, span)).collect()
}
