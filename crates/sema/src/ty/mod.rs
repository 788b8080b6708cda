//! Structural types of parameter slots and callable signatures.

use crate::hir::ContractId;
use contrail_interface::Symbol;
use std::fmt;

mod signature;
pub use signature::{FunctionSignature, ModifierSignature};

/// The type of a parameter or return slot.
///
/// Equality and hashing are structural: two slots have the same type iff they are spelled the
/// same after resolution, including data locations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    /// An elementary type.
    Elementary(ElementaryType),
    /// `T[N]`, or `T[]` if the length is `None`.
    Array(Box<Ty>, Option<u64>),
    /// `mapping(K => V)`.
    Mapping(Box<Ty>, Box<Ty>),
    /// A contract or interface type.
    Contract(ContractId, Symbol),
    /// A reference type with an explicit data location: `T memory`.
    Ref(Box<Ty>, DataLocation),
}

impl Ty {
    /// Shorthand for `uintN`.
    pub const fn uint(bits: u16) -> Self {
        Self::Elementary(ElementaryType::UInt(bits))
    }

    /// Shorthand for `T[]`.
    pub fn dyn_array(elem: Self) -> Self {
        Self::Array(Box::new(elem), None)
    }

    /// Shorthand for `self <loc>`.
    pub fn with_location(self, loc: DataLocation) -> Self {
        Self::Ref(Box::new(self), loc)
    }

    /// Peels off the data location, if any.
    pub fn peel_refs(&self) -> &Self {
        match self {
            Self::Ref(ty, _) => ty.peel_refs(),
            _ => self,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elementary(ty) => fmt::Display::fmt(ty, f),
            Self::Array(elem, Some(len)) => write!(f, "{elem}[{len}]"),
            Self::Array(elem, None) => write!(f, "{elem}[]"),
            Self::Mapping(key, value) => write!(f, "mapping({key} => {value})"),
            Self::Contract(_, name) => fmt::Display::fmt(name, f),
            Self::Ref(ty, loc) => write!(f, "{ty} {loc}"),
        }
    }
}

/// Elementary/primitive type.
///
/// Integer sizes are in **bits**, fixed-size byte array sizes in **bytes**.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementaryType {
    /// `address $(payable)?`
    Address(/* payable: */ bool),
    /// `bool`
    Bool,
    /// `string`
    String,
    /// `bytes`
    Bytes,
    /// `intN`
    Int(u16),
    /// `uintN`
    UInt(u16),
    /// `bytesN`
    FixedBytes(u8),
}

impl fmt::Display for ElementaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(false) => f.write_str("address"),
            Self::Address(true) => f.write_str("address payable"),
            Self::Bool => f.write_str("bool"),
            Self::String => f.write_str("string"),
            Self::Bytes => f.write_str("bytes"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::UInt(bits) => write!(f, "uint{bits}"),
            Self::FixedBytes(size) => write!(f, "bytes{size}"),
        }
    }
}

/// A storage location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataLocation {
    /// `storage`
    Storage,
    /// `memory`
    Memory,
    /// `calldata`
    Calldata,
}

impl fmt::Display for DataLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl DataLocation {
    /// Returns the string representation of the storage location.
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Memory => "memory",
            Self::Calldata => "calldata",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let ty = Ty::dyn_array(Ty::uint(256)).with_location(DataLocation::Memory);
        assert_eq!(ty.to_string(), "uint256[] memory");
        assert_eq!(ty.peel_refs(), &Ty::dyn_array(Ty::uint(256)));

        let map = Ty::Mapping(
            Box::new(Ty::Elementary(ElementaryType::Address(false))),
            Box::new(Ty::Elementary(ElementaryType::FixedBytes(32))),
        );
        assert_eq!(map.to_string(), "mapping(address => bytes32)");
        assert_eq!(Ty::Elementary(ElementaryType::Address(true)).to_string(), "address payable");
    }

    #[test]
    fn locations_are_part_of_the_type() {
        let memory = Ty::Elementary(ElementaryType::String).with_location(DataLocation::Memory);
        let calldata = Ty::Elementary(ElementaryType::String).with_location(DataLocation::Calldata);
        assert_ne!(memory, calldata);
        assert_eq!(memory.peel_refs(), calldata.peel_refs());
    }
}
