//! High-level intermediate representation (HIR).
//!
//! This is the resolved, linearized view of the contracts that the checks operate on. It is
//! produced by upstream lowering (or built directly in tests) and never mutated by the checks.

use crate::ty::{FunctionSignature, ModifierSignature, Ty};
use contrail_data_structures::{index::IndexVec, newtype_index};
use contrail_interface::{Ident, Span};
use derive_more::From;
use rayon::prelude::*;
use std::fmt;
use strum::EnumIs;

mod enums;
pub use enums::{FunctionKind, StateMutability, Visibility};

/// The high-level intermediate representation (HIR).
///
/// This struct contains all the contracts, functions and events of the program.
#[derive(Debug, Default)]
pub struct Hir {
    /// All contracts.
    pub(crate) contracts: IndexVec<ContractId, Contract>,
    /// All functions, including constructors, fallback functions and modifiers.
    pub(crate) functions: IndexVec<FunctionId, Function>,
    /// All events.
    pub(crate) events: IndexVec<EventId, Event>,
}

macro_rules! indexvec_methods {
    ($($singular:ident => $plural:ident, $id:ty => $type:ty;)*) => { paste::paste! {
        $(
            #[doc = "Returns the " $singular " associated with the given ID."]
            #[inline]
            #[track_caller]
            pub fn $singular(&self, id: $id) -> &$type {
                &self.$plural[id]
            }

            #[doc = "Returns an iterator over all of the " $singular " IDs."]
            #[inline]
            pub fn [<$singular _ids>](&self) -> impl ExactSizeIterator<Item = $id> + Clone {
                (0..self.$plural.len()).map(<$id>::from_usize)
            }

            #[doc = "Returns a parallel iterator over all of the " $singular " IDs."]
            #[inline]
            pub fn [<par_ $singular _ids>](&self) -> impl IndexedParallelIterator<Item = $id> {
                (0..self.$plural.len()).into_par_iter().map(<$id>::from_usize)
            }

            #[doc = "Returns an iterator over all of the " $singular " values."]
            #[inline]
            pub fn $plural(&self) -> impl ExactSizeIterator<Item = &$type> + Clone {
                self.$plural.iter()
            }

            #[doc = "Returns an iterator over all of the " $singular " IDs and their associated values."]
            #[inline]
            pub fn [<$plural _enumerated>](&self) -> impl ExactSizeIterator<Item = ($id, &$type)> + Clone {
                self.$plural.iter_enumerated()
            }
        )*
    }};
}

impl Hir {
    /// Creates a new, empty HIR.
    pub fn new() -> Self {
        Self::default()
    }

    indexvec_methods! {
        contract => contracts, ContractId => Contract;
        function => functions, FunctionId => Function;
        event => events, EventId => Event;
    }

    /// Adds a contract and returns its ID.
    ///
    /// If `contract.linearized_bases` is empty it is set to just the contract itself.
    pub fn add_contract(&mut self, mut contract: Contract) -> ContractId {
        let id = self.contracts.next_idx();
        if contract.linearized_bases.is_empty() {
            contract.linearized_bases.push(id);
        }
        debug_assert_eq!(contract.linearized_bases[0], id, "linearization must start with itself");
        self.contracts.push(contract)
    }

    /// Adds a function to its contract and returns its ID.
    pub fn add_function(&mut self, function: Function) -> FunctionId {
        let contract = function.contract;
        let id = self.functions.push(function);
        self.contracts[contract].items.push(ItemId::Function(id));
        id
    }

    /// Adds an event to its contract and returns its ID.
    pub fn add_event(&mut self, event: Event) -> EventId {
        let contract = event.contract;
        let id = self.events.push(event);
        self.contracts[contract].items.push(ItemId::Event(id));
        id
    }

    /// Returns a mutable reference to the contract associated with the given ID.
    #[track_caller]
    pub fn contract_mut(&mut self, id: ContractId) -> &mut Contract {
        &mut self.contracts[id]
    }

    /// Returns the callables declared in the contract that are not modifiers, in declaration
    /// order.
    pub fn defined_functions(
        &self,
        id: ContractId,
    ) -> impl Iterator<Item = FunctionId> + Clone + use<'_> {
        self.contract(id).functions().filter(|&f| !self.function(f).kind.is_modifier())
    }

    /// Returns the modifiers declared in the contract, in declaration order.
    pub fn modifiers(&self, id: ContractId) -> impl Iterator<Item = FunctionId> + Clone + use<'_> {
        self.contract(id).functions().filter(|&f| self.function(f).kind.is_modifier())
    }

    /// Returns the first constructor declared in the contract, if any.
    pub fn constructor(&self, id: ContractId) -> Option<FunctionId> {
        self.contract(id).functions().find(|&f| self.function(f).kind.is_constructor())
    }

    /// Returns the signature of the given function.
    pub fn function_signature(&self, id: FunctionId) -> FunctionSignature<'_> {
        FunctionSignature::of(self.function(id))
    }

    /// Returns the signature of the given modifier.
    pub fn modifier_signature(&self, id: FunctionId) -> ModifierSignature<'_> {
        ModifierSignature::of(self.function(id))
    }

    /// Returns the parameter types of the given event.
    pub fn event_parameter_types(
        &self,
        id: EventId,
    ) -> impl ExactSizeIterator<Item = &Ty> + Clone + use<'_> {
        self.event(id).parameters.iter().map(|param| &param.ty)
    }
}

newtype_index! {
    /// A [`Contract`] ID.
    pub struct ContractId;

    /// A [`Function`] ID.
    pub struct FunctionId;

    /// An [`Event`] ID.
    pub struct EventId;
}

/// An item declared in a contract.
#[derive(Clone, Copy, PartialEq, Eq, Hash, From, EnumIs)]
pub enum ItemId {
    Function(FunctionId),
    Event(EventId),
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ItemId::")?;
        match self {
            Self::Function(id) => fmt::Debug::fmt(id, f),
            Self::Event(id) => fmt::Debug::fmt(id, f),
        }
    }
}

impl ItemId {
    /// Returns the function ID if this is a function.
    pub fn as_function(&self) -> Option<FunctionId> {
        if let Self::Function(v) = *self { Some(v) } else { None }
    }

    /// Returns the event ID if this is an event.
    pub fn as_event(&self) -> Option<EventId> {
        if let Self::Event(v) = *self { Some(v) } else { None }
    }
}

/// A contract.
#[derive(Clone, Debug)]
pub struct Contract {
    /// The contract span.
    pub span: Span,
    /// The contract name.
    pub name: Ident,
    /// The contract bases, as declared in the source code.
    pub bases: Vec<InheritanceSpecifier>,
    /// The linearized contract bases.
    ///
    /// The first element is the contract itself, followed by its bases from most derived to most
    /// base.
    pub linearized_bases: Vec<ContractId>,
    /// The contract items, in declaration order.
    ///
    /// Note that this only includes items defined in the contract itself, not inherited items.
    pub items: Vec<ItemId>,
}

impl Contract {
    /// Creates a new contract with no bases and no items.
    pub fn new(name: Ident, span: Span) -> Self {
        Self { span, name, bases: Vec::new(), linearized_bases: Vec::new(), items: Vec::new() }
    }

    /// Adds an inheritance specifier.
    pub fn with_base(mut self, base: InheritanceSpecifier) -> Self {
        self.bases.push(base);
        self
    }

    /// Returns an iterator over all callables declared in the contract, including modifiers.
    pub fn functions(&self) -> impl Iterator<Item = FunctionId> + Clone + use<'_> {
        self.items.iter().filter_map(ItemId::as_function)
    }

    /// Returns an iterator over all events declared in the contract.
    pub fn events(&self) -> impl Iterator<Item = EventId> + Clone + use<'_> {
        self.items.iter().filter_map(ItemId::as_event)
    }
}

/// A function, constructor, fallback function or modifier.
#[derive(Clone, Debug)]
pub struct Function {
    /// The contract this function is defined in.
    pub contract: ContractId,
    /// The function span.
    pub span: Span,
    /// The function name.
    /// Only `None` if this is a constructor or fallback function.
    pub name: Option<Ident>,
    /// The function kind.
    pub kind: FunctionKind,
    /// The visibility of the function.
    pub visibility: Visibility,
    /// The state mutability of the function.
    pub state_mutability: StateMutability,
    /// The function parameters.
    pub parameters: Vec<Variable>,
    /// The function returns.
    pub returns: Vec<Variable>,
    /// The span of the `returns (...)` list, or dummy if there is none.
    pub returns_span: Span,
    /// Modifiers, or base constructor calls if this is a constructor.
    pub modifiers: Vec<ModifierInvocation>,
    /// The function body span, if the function is implemented.
    pub body: Option<Span>,
}

impl Function {
    /// Creates a new unimplemented, public, non-payable function without parameters.
    pub fn new(contract: ContractId, kind: FunctionKind, name: Option<Ident>, span: Span) -> Self {
        Self {
            contract,
            span,
            name,
            kind,
            visibility: Visibility::Public,
            state_mutability: StateMutability::NonPayable,
            parameters: Vec::new(),
            returns: Vec::new(),
            returns_span: Span::DUMMY,
            modifiers: Vec::new(),
            body: None,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_state_mutability(mut self, state_mutability: StateMutability) -> Self {
        self.state_mutability = state_mutability;
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Variable>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets the return parameters and the span of the `returns (...)` list.
    pub fn with_returns(mut self, returns: Vec<Variable>, span: Span) -> Self {
        self.returns = returns;
        self.returns_span = span;
        self
    }

    pub fn with_modifier(mut self, modifier: ModifierInvocation) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_body(mut self, body: Span) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns `true` if the function has a body.
    #[inline]
    pub fn is_implemented(&self) -> bool {
        self.body.is_some()
    }

    /// Returns the description of the function.
    pub fn description(&self) -> &'static str {
        self.kind.to_str()
    }
}

/// An event.
#[derive(Clone, Debug)]
pub struct Event {
    /// The contract this event is defined in.
    pub contract: ContractId,
    /// The event span.
    pub span: Span,
    /// The event name.
    pub name: Ident,
    /// Whether this event is anonymous.
    pub anonymous: bool,
    pub parameters: Vec<Variable>,
}

impl Event {
    /// Creates a new event without parameters.
    pub fn new(contract: ContractId, name: Ident, span: Span) -> Self {
        Self { contract, span, name, anonymous: false, parameters: Vec::new() }
    }

    pub fn with_parameters(mut self, parameters: Vec<Variable>) -> Self {
        self.parameters = parameters;
        self
    }
}

/// A parameter or return variable.
#[derive(Clone, Debug)]
pub struct Variable {
    /// The variable's span.
    pub span: Span,
    /// The variable's name.
    pub name: Option<Ident>,
    /// The variable's type.
    pub ty: Ty,
}

impl Variable {
    /// Creates a new unnamed variable.
    pub fn new(ty: Ty, span: Span) -> Self {
        Self { span, name: None, ty }
    }

    pub fn with_name(mut self, name: Ident) -> Self {
        self.name = Some(name);
        self
    }
}

/// What a name in an inheritance list or modifier invocation resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIs)]
pub enum Res {
    Contract(ContractId),
    Modifier(FunctionId),
    /// Resolution failed; the error has already been reported.
    Err,
}

/// The argument list of a base constructor call or modifier invocation.
///
/// `A` has no argument list, `A()` has an empty one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallArgs {
    /// The span of the parenthesized list.
    pub span: Span,
    /// The spans of the arguments.
    pub args: Vec<Span>,
}

impl CallArgs {
    pub fn new(span: Span, args: Vec<Span>) -> Self {
        Self { span, args }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// An entry in a contract's inheritance list: `is A(1, 2)`.
#[derive(Clone, Debug)]
pub struct InheritanceSpecifier {
    /// The span of the whole specifier, including arguments.
    pub span: Span,
    pub name: Ident,
    pub res: Res,
    pub args: Option<CallArgs>,
}

impl InheritanceSpecifier {
    pub fn new(name: Ident, res: Res, span: Span) -> Self {
        Self { span, name, res, args: None }
    }

    pub fn with_args(mut self, args: CallArgs) -> Self {
        self.args = Some(args);
        self
    }
}

/// A modifier invocation, or a modifier-style base constructor call on a constructor.
#[derive(Clone, Debug)]
pub struct ModifierInvocation {
    /// The span of the whole invocation, including arguments.
    pub span: Span,
    pub name: Ident,
    pub res: Res,
    pub args: Option<CallArgs>,
}

impl ModifierInvocation {
    pub fn new(name: Ident, res: Res, span: Span) -> Self {
        Self { span, name, res, args: None }
    }

    pub fn with_args(mut self, args: CallArgs) -> Self {
        self.args = Some(args);
        self
    }
}
