use super::{
    Diag, DynEmitter, ErrorGuaranteed, HumanBufferEmitter, HumanEmitter, InMemoryEmitter, Level,
};
use crate::{
    SourceMap,
    config::{ColorChoice, Opts},
};
use contrail_data_structures::sync::{Lock, Lrc, RwLock};

/// A handler deals with errors and other checker output.
///
/// Diagnostics are counted and limited here, then forwarded to the emitter in the order they were
/// reported.
pub struct DiagCtxt {
    inner: Lock<DiagCtxtInner>,
}

struct DiagCtxtInner {
    emitter: Box<DynEmitter>,

    err_count: usize,
    warn_count: usize,

    can_emit_warnings: bool,
    /// Maximum number of secondary locations rendered per diagnostic.
    max_secondary_locations: usize,
}

impl DiagCtxt {
    /// Creates a new `DiagCtxt` with the given diagnostics emitter.
    pub fn new(emitter: Box<DynEmitter>) -> Self {
        Self {
            inner: Lock::new(DiagCtxtInner {
                emitter,
                err_count: 0,
                warn_count: 0,
                can_emit_warnings: true,
                max_secondary_locations: crate::config::DEFAULT_MAX_SECONDARY_LOCATIONS,
            }),
        }
    }

    /// Creates a new `DiagCtxt` with a stderr emitter.
    pub fn with_stderr_emitter(source_map: Option<Lrc<SourceMap>>) -> Self {
        Self::new(Box::new(HumanEmitter::stderr(Default::default()).source_map(source_map)))
    }

    /// Creates a new `DiagCtxt` with an in-memory emitter, returning the shared buffer.
    pub fn with_buffer_emitter() -> (Self, Lrc<RwLock<Vec<Diag>>>) {
        let (emitter, buffer) = InMemoryEmitter::new();
        (Self::new(Box::new(emitter)), buffer)
    }

    /// Creates a new `DiagCtxt` that renders human-readable diagnostics to a local buffer.
    ///
    /// The rendered output can be retrieved with
    /// [`emitted_diagnostics`](Self::emitted_diagnostics).
    pub fn with_buffered_human_emitter(source_map: Option<Lrc<SourceMap>>) -> Self {
        let emitter = HumanBufferEmitter::new(ColorChoice::Never).source_map(source_map);
        Self::new(Box::new(emitter))
    }

    /// Creates a new `DiagCtxt` configured from `opts`, writing to stderr.
    pub fn from_opts(opts: &Opts, source_map: Lrc<SourceMap>) -> Self {
        let emitter: Box<DynEmitter> = match opts.error_format {
            crate::config::ErrorFormat::Human => {
                Box::new(HumanEmitter::stderr(opts.color).source_map(Some(source_map)))
            }
            #[cfg(feature = "json")]
            crate::config::ErrorFormat::Json => {
                Box::new(super::JsonEmitter::new(Box::new(std::io::stderr()), source_map))
            }
            #[cfg(not(feature = "json"))]
            crate::config::ErrorFormat::Json => {
                warn!("JSON diagnostics are disabled, falling back to human-readable output");
                Box::new(HumanEmitter::stderr(opts.color).source_map(Some(source_map)))
            }
        };
        let mut dcx = Self::new(emitter).max_secondary_locations(opts.max_secondary_locations);
        if opts.no_warnings {
            dcx = dcx.disable_warnings();
        }
        dcx
    }

    /// Disables emitting warnings.
    pub fn disable_warnings(mut self) -> Self {
        self.inner.get_mut().can_emit_warnings = false;
        self
    }

    /// Sets the maximum number of secondary locations rendered per diagnostic.
    pub fn max_secondary_locations(mut self, max: usize) -> Self {
        self.inner.get_mut().max_secondary_locations = max;
        self
    }

    /// Emits the given diagnostic with this context.
    ///
    /// Returns `Some` if the diagnostic was an error.
    pub fn emit_diagnostic(&self, diagnostic: Diag) -> Option<ErrorGuaranteed> {
        self.inner.lock().emit_diagnostic(diagnostic)
    }

    /// Returns the number of errors that have been emitted.
    #[inline]
    pub fn err_count(&self) -> usize {
        self.inner.lock().err_count
    }

    /// Returns the number of warnings that have been emitted.
    #[inline]
    pub fn warn_count(&self) -> usize {
        self.inner.lock().warn_count
    }

    /// Returns the output of a [`with_buffered_human_emitter`](Self::with_buffered_human_emitter)
    /// context, or `None` for any other emitter.
    pub fn emitted_diagnostics(&self) -> Option<String> {
        self.inner.lock().emitter.local_buffer().map(ToString::to_string)
    }

    /// Returns `Err` if any errors have been emitted.
    pub fn has_errors(&self) -> Result<(), ErrorGuaranteed> {
        if self.inner.lock().err_count > 0 {
            #[allow(deprecated)]
            Err(ErrorGuaranteed::new_unchecked())
        } else {
            Ok(())
        }
    }
}

impl DiagCtxtInner {
    fn emit_diagnostic(&mut self, mut diagnostic: Diag) -> Option<ErrorGuaranteed> {
        if diagnostic.level == Level::Warning && !self.can_emit_warnings {
            return None;
        }

        let dropped = diagnostic.limit_secondary_locations(self.max_secondary_locations);
        if dropped > 0 {
            debug!(dropped, message = diagnostic.message.as_str(), "truncated secondary locations");
        }

        self.emitter.emit_diagnostic(&diagnostic);

        if diagnostic.is_error() {
            self.err_count += 1;
            #[allow(deprecated)]
            Some(ErrorGuaranteed::new_unchecked())
        } else {
            if diagnostic.level == Level::Warning {
                self.warn_count += 1;
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;

    #[test]
    fn counts_and_limits() {
        let (dcx, buffer) = DiagCtxt::with_buffer_emitter();
        let dcx = dcx.max_secondary_locations(1);
        assert!(dcx.has_errors().is_ok());

        let warning = Diag::new(Level::Warning, "unused");
        assert!(dcx.emit_diagnostic(warning).is_none());
        assert!(dcx.has_errors().is_ok());
        assert_eq!(dcx.warn_count(), 1);

        let error =
            Diag::declaration_error("function with same name and parameter types defined twice")
                .span(Span::from_range(0..1))
                .span_note(Span::from_range(2..3), "other declaration is here")
                .span_note(Span::from_range(4..5), "other declaration is here");
        assert!(dcx.emit_diagnostic(error).is_some());
        assert!(dcx.has_errors().is_err());
        assert_eq!(dcx.err_count(), 1);

        let buffer = buffer.read();
        assert_eq!(buffer.len(), 2);
        let children = &buffer[1].children;
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].message.as_str(), "1 more location not shown");
    }

    #[test]
    fn warnings_disabled() {
        let (dcx, buffer) = DiagCtxt::with_buffer_emitter();
        let dcx = dcx.disable_warnings();
        assert!(dcx.emit_diagnostic(Diag::new(Level::Warning, "unused")).is_none());
        assert_eq!(dcx.warn_count(), 0);
        assert!(buffer.read().is_empty());
    }
}
