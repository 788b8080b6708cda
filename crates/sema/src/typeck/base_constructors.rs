//! Resolution of the arguments passed to base constructors.

use super::CheckResult;
use crate::{
    annotations::ArgumentSite,
    hir::{ContractId, FunctionId, Hir, Res},
};
use contrail_data_structures::map::{FxIndexMap, IndexEntry};
use contrail_interface::{bug, diagnostics::Diag, error_code};

/// Finds the node supplying the arguments of every base constructor of the contract.
///
/// Arguments may be given either in the inheritance list (`is A(1)`) or as a modifier-style call
/// on a constructor (`constructor() A(1)`), anywhere along the linearized bases, but only once.
/// Base constructors that take parameters and receive no arguments leave the contract abstract.
#[instrument(level = "debug", skip_all)]
pub(super) fn check_base_constructor_arguments(hir: &Hir, contract_id: ContractId) -> CheckResult {
    let mut resolver = ArgumentResolver {
        hir,
        contract_id,
        arguments: FxIndexMap::default(),
        result: CheckResult::default(),
    };
    let bases = &hir.contract(contract_id).linearized_bases;

    for &base in bases {
        if let Some(ctor) = hir.constructor(base) {
            for (index, invocation) in hir.function(ctor).modifiers.iter().enumerate() {
                let Res::Contract(base_contract) = invocation.res else { continue };
                let Some(args) = &invocation.args else {
                    let msg = "modifier-style base constructor call without arguments";
                    resolver.result.push(
                        Diag::declaration_error(msg).code(error_code!(1563)).span(invocation.span),
                    );
                    continue;
                };
                if let Some(base_ctor) = hir.constructor(base_contract) {
                    trace!(?base_ctor, args = args.len(), "modifier-style base constructor call");
                    let site = ArgumentSite::ModifierInvocation { function: ctor, index };
                    resolver.annotate(base_ctor, site);
                }
            }
        }

        for (index, specifier) in hir.contract(base).bases.iter().enumerate() {
            let Res::Contract(base_contract) = specifier.res else {
                bug!("inheritance specifier `{}` does not name a contract", specifier.name);
            };
            if let Some(base_ctor) = hir.constructor(base_contract)
                && specifier.args.as_ref().is_some_and(|args| !args.is_empty())
            {
                let site = ArgumentSite::InheritanceSpecifier { contract: base, index };
                resolver.annotate(base_ctor, site);
            }
        }
    }

    let ArgumentResolver { arguments, mut result, .. } = resolver;
    for &base in bases {
        if base == contract_id {
            continue;
        }
        if let Some(ctor) = hir.constructor(base)
            && !hir.function(ctor).parameters.is_empty()
            && !arguments.contains_key(&ctor)
        {
            debug!(?ctor, "base constructor is missing arguments");
            result.patch.unimplemented.push(ctor);
        }
    }
    result.patch.base_constructor_arguments.extend(arguments);
    result
}

struct ArgumentResolver<'hir> {
    hir: &'hir Hir,
    contract_id: ContractId,
    arguments: FxIndexMap<FunctionId, ArgumentSite>,
    result: CheckResult,
}

impl ArgumentResolver<'_> {
    /// Registers `site` as the supplier of the arguments of `base_ctor`.
    fn annotate(&mut self, base_ctor: FunctionId, site: ArgumentSite) {
        let previous = match self.arguments.entry(base_ctor) {
            IndexEntry::Vacant(entry) => {
                entry.insert(site);
                return;
            }
            IndexEntry::Occupied(entry) => *entry.get(),
        };

        let contract_span = self.hir.contract(self.contract_id).span;
        let previous_span = previous.span(self.hir);
        let span = site.span(self.hir);
        let diag = Diag::declaration_error("base constructor arguments given twice")
            .code(error_code!(3364));
        let diag = if contract_span.contains(previous_span) && contract_span.contains(span) {
            diag.span(previous_span).span_note(span, "second constructor call is here")
        } else {
            diag.span(contract_span)
                .span_note(previous_span, "first constructor call is here")
                .span_note(span, "second constructor call is here")
        };
        self.result.push(diag);
    }
}
