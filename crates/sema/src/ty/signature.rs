use super::Ty;
use crate::hir::{Function, StateMutability, Variable, Visibility};
use std::fmt;

/// The signature of a callable, as far as overloading and overriding are concerned.
///
/// Overload resolution only looks at the parameter types; the remaining parts decide whether an
/// override is compatible.
#[derive(Clone, Copy, Debug)]
pub struct FunctionSignature<'hir> {
    pub parameters: &'hir [Variable],
    pub returns: &'hir [Variable],
    pub visibility: Visibility,
    pub state_mutability: StateMutability,
}

impl<'hir> FunctionSignature<'hir> {
    /// Returns the signature of `function`.
    pub fn of(function: &'hir Function) -> Self {
        Self {
            parameters: &function.parameters,
            returns: &function.returns,
            visibility: function.visibility,
            state_mutability: function.state_mutability,
        }
    }

    /// Returns an iterator over the parameter types.
    pub fn parameter_types(&self) -> impl ExactSizeIterator<Item = &'hir Ty> + Clone + use<'hir> {
        self.parameters.iter().map(|param| &param.ty)
    }

    /// Returns an iterator over the return types.
    pub fn return_types(&self) -> impl ExactSizeIterator<Item = &'hir Ty> + Clone + use<'hir> {
        self.returns.iter().map(|ret| &ret.ty)
    }

    /// Returns `true` if both signatures have the same parameter types, in the same order.
    pub fn has_equal_parameter_types(&self, other: &Self) -> bool {
        self.parameter_types().eq(other.parameter_types())
    }

    /// Returns `true` if both signatures have the same return types, in the same order.
    pub fn has_equal_return_types(&self, other: &Self) -> bool {
        self.return_types().eq(other.return_types())
    }
}

impl fmt::Display for FunctionSignature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.parameter_types())?;
        write!(f, " {} {}", self.visibility, self.state_mutability)?;
        if !self.returns.is_empty() {
            f.write_str(" returns ")?;
            write_list(f, self.return_types())?;
        }
        Ok(())
    }
}

/// The signature of a modifier: its parameter types.
#[derive(Clone, Copy, Debug)]
pub struct ModifierSignature<'hir> {
    pub parameters: &'hir [Variable],
}

impl<'hir> ModifierSignature<'hir> {
    /// Returns the signature of `modifier`.
    pub fn of(modifier: &'hir Function) -> Self {
        Self { parameters: &modifier.parameters }
    }

    /// Returns an iterator over the parameter types.
    pub fn parameter_types(&self) -> impl ExactSizeIterator<Item = &'hir Ty> + Clone + use<'hir> {
        self.parameters.iter().map(|param| &param.ty)
    }
}

impl PartialEq for ModifierSignature<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.parameter_types().eq(other.parameter_types())
    }
}

impl Eq for ModifierSignature<'_> {}

impl fmt::Display for ModifierSignature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.parameter_types())
    }
}

fn write_list<'a>(f: &mut fmt::Formatter<'_>, tys: impl Iterator<Item = &'a Ty>) -> fmt::Result {
    f.write_str("(")?;
    for (i, ty) in tys.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    f.write_str(")")
}
