//! Results written back for later passes.
//!
//! The checks never mutate the [`Hir`]. They return an [`AnnotationPatch`] which the driver
//! applies to an [`Annotations`] table keyed by declaration ID.

use crate::hir::{ContractId, FunctionId, Hir};
use contrail_data_structures::{
    index::IndexVec,
    map::{FxHashMap, FxIndexMap, FxIndexSet, IndexEntry},
};
use contrail_interface::Span;
use std::collections::hash_map::Entry;

/// The node supplying the arguments of a base constructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgumentSite {
    /// `contract C is A(1)`: the `index`th inheritance specifier of `contract`.
    InheritanceSpecifier { contract: ContractId, index: usize },
    /// `constructor() A(1)`: the `index`th modifier invocation of `function`.
    ModifierInvocation { function: FunctionId, index: usize },
}

impl ArgumentSite {
    /// Returns the span of the supplying node.
    #[track_caller]
    pub fn span(self, hir: &Hir) -> Span {
        match self {
            Self::InheritanceSpecifier { contract, index } => {
                hir.contract(contract).bases[index].span
            }
            Self::ModifierInvocation { function, index } => {
                hir.function(function).modifiers[index].span
            }
        }
    }
}

/// Annotation writes produced by checking one contract.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationPatch {
    /// `(function, nearest overridden function)` pairs.
    pub super_functions: Vec<(FunctionId, FunctionId)>,
    /// Functions and base constructors left without an implementation or arguments.
    pub unimplemented: Vec<FunctionId>,
    /// `(base constructor, argument site)` pairs.
    pub base_constructor_arguments: Vec<(FunctionId, ArgumentSite)>,
}

impl AnnotationPatch {
    /// Returns `true` if the patch writes nothing.
    pub fn is_empty(&self) -> bool {
        self.super_functions.is_empty()
            && self.unimplemented.is_empty()
            && self.base_constructor_arguments.is_empty()
    }

    /// Appends the writes of `other`.
    pub fn extend(&mut self, other: Self) {
        self.super_functions.extend(other.super_functions);
        self.unimplemented.extend(other.unimplemented);
        self.base_constructor_arguments.extend(other.base_constructor_arguments);
    }
}

/// Per-contract annotations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractAnnotations {
    /// Functions and base constructors left without an implementation or arguments, in the order
    /// they were found.
    pub unimplemented_functions: FxIndexSet<FunctionId>,
    /// The node supplying the arguments of each base constructor.
    pub base_constructor_arguments: FxIndexMap<FunctionId, ArgumentSite>,
}

impl ContractAnnotations {
    /// Returns `true` if the contract cannot be instantiated directly.
    pub fn is_abstract(&self) -> bool {
        !self.unimplemented_functions.is_empty()
    }
}

/// Annotations for the whole program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Annotations {
    /// The nearest overridden declaration of each overriding function.
    pub super_functions: FxHashMap<FunctionId, FunctionId>,
    /// Per-contract annotations.
    pub contracts: IndexVec<ContractId, ContractAnnotations>,
}

impl Annotations {
    /// Creates empty annotations for every contract in `hir`.
    pub fn new(hir: &Hir) -> Self {
        Self {
            super_functions: FxHashMap::default(),
            contracts: hir.contract_ids().map(|_| ContractAnnotations::default()).collect(),
        }
    }

    /// Returns the annotations of the given contract.
    #[track_caller]
    pub fn contract(&self, id: ContractId) -> &ContractAnnotations {
        &self.contracts[id]
    }

    /// Returns the nearest overridden declaration of `function`, if any.
    pub fn super_function(&self, function: FunctionId) -> Option<FunctionId> {
        self.super_functions.get(&function).copied()
    }

    /// Applies the writes produced by checking `contract`.
    ///
    /// Super functions and base constructor arguments keep the first value written.
    pub fn apply(&mut self, contract: ContractId, patch: AnnotationPatch) {
        for (function, super_function) in patch.super_functions {
            if let Entry::Vacant(entry) = self.super_functions.entry(function) {
                entry.insert(super_function);
            }
        }

        let annotations = &mut self.contracts[contract];
        annotations.unimplemented_functions.extend(patch.unimplemented);
        for (ctor, site) in patch.base_constructor_arguments {
            if let IndexEntry::Vacant(entry) = annotations.base_constructor_arguments.entry(ctor) {
                entry.insert(site);
            }
        }
    }
}
