//! Diagnostics implementation.
//!
//! Checks build [`Diag`] values and hand them to a [`DiagCtxt`], which counts them, applies the
//! configured limits and forwards them to an [`Emitter`].

use std::fmt;

mod context;
pub use context::DiagCtxt;

mod emitter;
#[cfg(feature = "json")]
pub use emitter::JsonEmitter;
pub use emitter::{DynEmitter, Emitter, HumanBufferEmitter, HumanEmitter, InMemoryEmitter};

mod message;
pub use message::{DiagMsg, MultiSpan};

use crate::Span;

/// Useful type to use with [`Result`] indicate that an error has already been reported to the user,
/// so no need to continue checking.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    /// Creates a new `ErrorGuaranteed`.
    ///
    /// Use of this method is discouraged: the guarantee should come from emitting an error.
    #[deprecated = "`ErrorGuaranteed` should only be constructed by emitting an error"]
    #[inline]
    pub const fn new_unchecked() -> Self {
        Self(())
    }
}

/// Diagnostic ID.
///
/// Use [`error_code!`](crate::error_code) to create an error code diagnostic ID.
///
/// # Examples
///
/// ```
/// # use contrail_interface::error_code;
/// assert_eq!(error_code!(3364).id(), 3364);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiagId {
    id: u32,
}

impl DiagId {
    /// Creates an error code diagnostic ID.
    ///
    /// Use [`error_code!`](crate::error_code) instead.
    #[doc(hidden)]
    #[track_caller]
    pub const fn new_from_macro(id: u32) -> Self {
        assert!(id >= 1000 && id <= 9999, "error codes must be exactly 4 digits long");
        Self { id }
    }

    /// Returns the internal ID.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for DiagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.id)
    }
}

/// Used for creating an error code.
#[macro_export]
macro_rules! error_code {
    ($id:literal) => {{
        const ID: $crate::diagnostics::DiagId = $crate::diagnostics::DiagId::new_from_macro($id);
        ID
    }};
}

/// Reports an internal invariant violation and aborts the current thread.
///
/// This is never a user-facing diagnostic: it means an upstream pass broke a contract this crate
/// relies on.
#[macro_export]
macro_rules! bug {
    ($($arg:tt)*) => {
        $crate::diagnostics::bug_fmt(format_args!($($arg)*))
    };
}

#[doc(hidden)]
#[cold]
#[inline(never)]
#[track_caller]
pub fn bug_fmt(args: fmt::Arguments<'_>) -> ! {
    panic!("internal compiler error: {args}")
}

/// Diagnostic level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// An error in the code being checked, which prevents compilation from finishing.
    Error,

    /// A warning about the code being checked. Does not prevent compilation from finishing.
    Warning,

    /// A message giving additional context, usually attached to another diagnostic.
    Note,

    /// A message suggesting how to fix something.
    Help,
}

impl Level {
    /// Returns the string representation of the level.
    pub fn to_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
            Self::Help => "help",
        }
    }

    /// Returns whether this level is an error.
    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Returns the style of this level.
    pub const fn style(self) -> anstyle::Style {
        use anstyle::{AnsiColor, Color, Style};
        let color = match self {
            Self::Error => AnsiColor::BrightRed,
            Self::Warning => AnsiColor::BrightYellow,
            Self::Note => AnsiColor::BrightGreen,
            Self::Help => AnsiColor::BrightCyan,
        };
        Style::new().fg_color(Some(Color::Ansi(color))).bold()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// The class of a user-facing error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    /// Duplicate, ambiguous or clashing declarations.
    DeclarationError,
    /// Incompatible signatures and malformed declarations.
    TypeError,
}

impl ErrorKind {
    /// Returns the string representation of the kind.
    pub fn to_str(self) -> &'static str {
        match self {
            Self::DeclarationError => "DeclarationError",
            Self::TypeError => "TypeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// A diagnostic.
///
/// Secondary locations are span-carrying [`SubDiagnostic`]s, added with
/// [`span_note`](Self::span_note).
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diag {
    pub(crate) level: Level,
    /// The error class, if this is an error.
    pub kind: Option<ErrorKind>,
    pub message: DiagMsg,
    pub span: MultiSpan,
    pub children: Vec<SubDiagnostic>,
    pub code: Option<DiagId>,
}

/// A "sub"-diagnostic attached to a parent diagnostic.
/// For example, a note attached to an error.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubDiagnostic {
    pub level: Level,
    pub message: DiagMsg,
    pub span: MultiSpan,
}

impl Diag {
    /// Creates a new `Diag` with a single message.
    pub fn new(level: Level, msg: impl Into<DiagMsg>) -> Self {
        Self {
            level,
            kind: None,
            message: msg.into(),
            span: MultiSpan::new(),
            children: Vec::new(),
            code: None,
        }
    }

    /// Creates a new declaration error.
    pub fn declaration_error(msg: impl Into<DiagMsg>) -> Self {
        Self::new(Level::Error, msg).kind(ErrorKind::DeclarationError)
    }

    /// Creates a new type error.
    pub fn type_error(msg: impl Into<DiagMsg>) -> Self {
        Self::new(Level::Error, msg).kind(ErrorKind::TypeError)
    }

    /// Returns whether this diagnostic is an error.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.level.is_error()
    }

    /// Returns the level of this diagnostic.
    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the primary span of this diagnostic, if any.
    #[inline]
    pub fn primary_span(&self) -> Option<Span> {
        self.span.primary_span()
    }

    /// Returns the secondary locations: every child that carries a span, with its label.
    pub fn secondary_locations(&self) -> impl Iterator<Item = (Span, &str)> + '_ {
        self.children
            .iter()
            .filter_map(|sub| Some((sub.span.primary_span()?, sub.message.as_str())))
    }

    /// Drops the secondary locations past `max` and replaces them with one placeholder note.
    ///
    /// Returns the number of dropped locations.
    pub fn limit_secondary_locations(&mut self, max: usize) -> usize {
        let total = self.children.iter().filter(|sub| !sub.span.is_dummy()).count();
        if total <= max {
            return 0;
        }
        let mut kept = 0;
        self.children.retain(|sub| {
            if sub.span.is_dummy() {
                return true;
            }
            kept += 1;
            kept <= max
        });
        let dropped = total - max;
        self.children.push(SubDiagnostic {
            level: Level::Note,
            message: format!("{dropped} more location{} not shown", pluralize!(dropped)).into(),
            span: MultiSpan::new(),
        });
        dropped
    }
}

/// Builder methods.
impl Diag {
    /// Sets the span of this diagnostic.
    pub fn span(mut self, span: impl Into<MultiSpan>) -> Self {
        self.span = span.into();
        self
    }

    /// Sets the code of this diagnostic.
    pub fn code(mut self, code: impl Into<DiagId>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the error class of this diagnostic.
    pub fn kind(mut self, kind: ErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Add a note to this diagnostic.
    pub fn note(self, msg: impl Into<DiagMsg>) -> Self {
        self.sub(Level::Note, msg, MultiSpan::new())
    }

    /// Prints the span with a note above it.
    /// This is like [`Diag::note()`], but it gets its own span.
    pub fn span_note(self, span: impl Into<MultiSpan>, msg: impl Into<DiagMsg>) -> Self {
        self.sub(Level::Note, msg, span)
    }

    /// Add a help message attached to this diagnostic.
    pub fn help(self, msg: impl Into<DiagMsg>) -> Self {
        self.sub(Level::Help, msg, MultiSpan::new())
    }

    fn sub(mut self, level: Level, msg: impl Into<DiagMsg>, span: impl Into<MultiSpan>) -> Self {
        self.children.push(SubDiagnostic { level, message: msg.into(), span: span.into() });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(lo: u32) -> Span {
        Span::from_range(lo..lo + 1)
    }

    #[test]
    fn secondary_location_cap() {
        let mut diag = Diag::declaration_error("defined twice").span(sp(1)).note("plain note");
        for i in 0..5 {
            diag = diag.span_note(sp(10 + i), "other declaration is here");
        }
        assert_eq!(diag.limit_secondary_locations(8), 0);
        assert_eq!(diag.limit_secondary_locations(2), 3);

        let locations = diag.secondary_locations().map(|(span, _)| span).collect::<Vec<_>>();
        assert_eq!(locations, [sp(10), sp(11)]);
        assert_eq!(diag.children.first().unwrap().message.as_str(), "plain note");
        assert_eq!(diag.children.last().unwrap().message.as_str(), "3 more locations not shown");

        let mut diag = Diag::declaration_error("defined twice").span(sp(1));
        for i in 0..3 {
            diag = diag.span_note(sp(10 + i), "other declaration is here");
        }
        assert_eq!(diag.limit_secondary_locations(2), 1);
        assert_eq!(diag.children.last().unwrap().message.as_str(), "1 more location not shown");
    }

    #[test]
    fn error_codes() {
        assert_eq!(error_code!(1686).to_string(), "1686");
        assert_eq!(Diag::type_error("x").code(error_code!(9239)).code.unwrap().id(), 9239);
        assert_eq!(Diag::type_error("x").kind, Some(ErrorKind::TypeError));
        assert!(!Diag::new(Level::Warning, "w").is_error());
    }

    #[test]
    #[should_panic = "internal compiler error: missing constructor for `A`"]
    fn bug_panics() {
        crate::bug!("missing constructor for `{}`", "A");
    }
}
