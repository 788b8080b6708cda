use crate::{SourceMap, config::Opts, diagnostics::DiagCtxt};
use std::sync::Arc;

/// Information about the current checking session.
pub struct Session {
    /// The configuration.
    pub opts: Opts,
    /// The diagnostics context.
    pub dcx: DiagCtxt,
    /// The source map.
    source_map: Arc<SourceMap>,
}

impl Session {
    /// Creates a new session with diagnostics configured from `opts`.
    pub fn new(opts: Opts, source_map: Arc<SourceMap>) -> Self {
        let dcx = DiagCtxt::from_opts(&opts, source_map.clone());
        Self { opts, dcx, source_map }
    }

    /// Creates a new session with the given diagnostics context.
    ///
    /// `opts.no_warnings` and `opts.max_secondary_locations` are applied to `dcx`.
    pub fn with_dcx(opts: Opts, dcx: DiagCtxt, source_map: Arc<SourceMap>) -> Self {
        let mut dcx = dcx.max_secondary_locations(opts.max_secondary_locations);
        if opts.no_warnings {
            dcx = dcx.disable_warnings();
        }
        Self { opts, dcx, source_map }
    }

    /// Creates a session that renders human-readable diagnostics to a local buffer.
    ///
    /// See [`DiagCtxt::emitted_diagnostics`].
    pub fn with_buffered_diagnostics(opts: Opts, source_map: Arc<SourceMap>) -> Self {
        let dcx = DiagCtxt::with_buffered_human_emitter(Some(source_map.clone()));
        Self::with_dcx(opts, dcx, source_map)
    }

    /// Returns a reference to the source map.
    #[inline]
    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    /// Clones the source map.
    #[inline]
    pub fn clone_source_map(&self) -> Arc<SourceMap> {
        self.source_map.clone()
    }

    /// Returns `true` if parallelism is not enabled.
    #[inline]
    pub fn is_sequential(&self) -> bool {
        self.opts.threads().get() == 1
    }

    /// Runs `f` inside a thread pool sized from `opts.threads`.
    ///
    /// If the pool cannot be built, `f` runs on rayon's global pool instead.
    pub fn enter<R: Send>(&self, f: impl FnOnce() -> R + Send) -> R {
        let threads = self.opts.threads().get();
        match rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("contrail-{i}"))
            .build()
        {
            Ok(pool) => pool.install(f),
            Err(error) => {
                warn!(%error, threads, "failed to build thread pool, using the global pool");
                f()
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("opts", &self.opts)
            .field("source_map", &self.source_map)
            .finish_non_exhaustive()
    }
}
