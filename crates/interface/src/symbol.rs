use crate::Span;
use contrail_data_structures::{map::FxIndexSet, sync::Lock};
use std::{fmt, sync::LazyLock};

/// The global symbol interner.
///
/// Interned strings are leaked: symbols are few and live for the whole process.
static INTERNER: LazyLock<Lock<FxIndexSet<&'static str>>> = LazyLock::new(Default::default);

/// An interned string.
///
/// Cheap to copy and compare; equality is string equality.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Maps a string to its interned representation.
    pub fn intern(string: &str) -> Self {
        let mut interner = INTERNER.lock();
        if let Some(index) = interner.get_index_of(string) {
            return Self(index as u32);
        }
        let leaked: &'static str = Box::leak(string.to_owned().into_boxed_str());
        let (index, _) = interner.insert_full(leaked);
        Self(index as u32)
    }

    /// Returns the interned string.
    pub fn as_str(self) -> &'static str {
        INTERNER.lock().get_index(self.0 as usize).copied().unwrap_or_else(|| {
            crate::bug!("symbol {} was not created by the interner", self.0)
        })
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identifier.
///
/// Equality and hashing only consider the name.
#[derive(Clone, Copy)]
pub struct Ident {
    /// The identifier's name.
    pub name: Symbol,
    /// The identifier's span.
    pub span: Span,
}

impl PartialEq for Ident {
    #[inline]
    fn eq(&self, rhs: &Self) -> bool {
        self.name == rhs.name
    }
}

impl Eq for Ident {}

impl std::hash::Hash for Ident {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{:?}", self.name, self.span)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

impl Ident {
    /// Constructs a new identifier from a symbol and a span.
    #[inline]
    pub const fn new(name: Symbol, span: Span) -> Self {
        Self { name, span }
    }

    /// Interns `string` and pairs it with `span`.
    #[inline]
    pub fn from_str_and_span(string: &str, span: Span) -> Self {
        Self::new(Symbol::intern(string), span)
    }

    /// Returns the identifier as a string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.name.as_str()
    }
}
