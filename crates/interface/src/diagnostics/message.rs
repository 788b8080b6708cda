use crate::Span;
use std::borrow::Cow;

/// A diagnostic message.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiagMsg {
    inner: Cow<'static, str>,
}

impl From<&'static str> for DiagMsg {
    fn from(value: &'static str) -> Self {
        Self { inner: Cow::Borrowed(value) }
    }
}

impl From<String> for DiagMsg {
    fn from(value: String) -> Self {
        Self { inner: Cow::Owned(value) }
    }
}

impl DiagMsg {
    /// Returns the message as a string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

/// A collection of primary `Span`s.
///
/// The first span is the locus of the message; an empty or all-dummy `MultiSpan` has no location.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MultiSpan {
    primary_spans: Vec<Span>,
}

impl MultiSpan {
    #[inline]
    pub fn new() -> Self {
        Self { primary_spans: vec![] }
    }

    pub fn from_span(primary_span: Span) -> Self {
        Self { primary_spans: vec![primary_span] }
    }

    /// Selects the first primary span (if any).
    pub fn primary_span(&self) -> Option<Span> {
        self.primary_spans.first().copied()
    }

    /// Returns all primary spans.
    pub fn primary_spans(&self) -> &[Span] {
        &self.primary_spans
    }

    /// Returns `true` if this contains only dummy primary spans.
    pub fn is_dummy(&self) -> bool {
        self.primary_spans.iter().all(|sp| sp.is_dummy())
    }
}

impl From<Span> for MultiSpan {
    fn from(span: Span) -> Self {
        Self::from_span(span)
    }
}

impl From<Vec<Span>> for MultiSpan {
    fn from(mut spans: Vec<Span>) -> Self {
        spans.sort();
        Self { primary_spans: spans }
    }
}
