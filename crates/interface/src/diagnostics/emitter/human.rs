use super::{Diag, Emitter, io_panic};
use crate::{
    BytePos, SourceMap, Span,
    config::ColorChoice,
    diagnostics::{ErrorKind, Level, MultiSpan, SubDiagnostic},
    source_map::SourceFile,
};
use annotate_snippets::{
    Annotation, AnnotationKind, Group, Level as ASLevel, Message, Renderer, Snippet, Title,
};
use anstream::AutoStream;
use std::{
    io::{self, Write},
    sync::{Arc, OnceLock},
};

type Writer = dyn Write + Send + 'static;

const DEFAULT_RENDERER: Renderer = Renderer::styled()
    .error(Level::Error.style())
    .warning(Level::Warning.style())
    .note(Level::Note.style())
    .help(Level::Help.style());

/// Diagnostic emitter that emits to an arbitrary [`io::Write`] writer in human-readable format.
pub struct HumanEmitter {
    writer: AutoStream<Box<Writer>>,
    source_map: Option<Arc<SourceMap>>,
}

impl Emitter for HumanEmitter {
    fn emit_diagnostic(&mut self, diagnostic: &Diag) {
        let rendered = render(diagnostic, self.source_map.as_deref(), true);
        emit_to_destination(&rendered, &mut self.writer).unwrap_or_else(|e| io_panic(e));
    }

    fn source_map(&self) -> Option<&Arc<SourceMap>> {
        self.source_map.as_ref()
    }

    fn supports_color(&self) -> bool {
        match self.writer.current_choice() {
            anstream::ColorChoice::AlwaysAnsi | anstream::ColorChoice::Always => true,
            anstream::ColorChoice::Auto | anstream::ColorChoice::Never => false,
        }
    }
}

impl HumanEmitter {
    /// Creates a new `HumanEmitter` that writes to given writer.
    ///
    /// Note that a color choice of `Auto` will be treated as `Never` because the writer is opaque
    /// at this point.
    pub fn new<W: Write + Send + 'static>(writer: W, color: ColorChoice) -> Self {
        let writer = Box::new(writer) as Box<Writer>;
        Self { writer: AutoStream::new(writer, to_anstream(color)), source_map: None }
    }

    /// Creates a new `HumanEmitter` that writes to stderr.
    pub fn stderr(color: ColorChoice) -> Self {
        let choice = stderr_choice(color);
        // `io::Stderr` is not buffered.
        let writer = Box::new(io::BufWriter::new(io::stderr())) as Box<Writer>;
        Self { writer: AutoStream::new(writer, choice), source_map: None }
    }

    /// Sets the source map.
    pub fn source_map(mut self, source_map: Option<Arc<SourceMap>>) -> Self {
        self.source_map = source_map;
        self
    }
}

/// Diagnostic emitter that renders to a local buffer in human-readable format.
pub struct HumanBufferEmitter {
    buffer: String,
    source_map: Option<Arc<SourceMap>>,
    color: bool,
}

impl Emitter for HumanBufferEmitter {
    fn emit_diagnostic(&mut self, diagnostic: &Diag) {
        let rendered = render(diagnostic, self.source_map.as_deref(), self.color);
        self.buffer.push_str(&rendered);
        self.buffer.push('\n');
    }

    #[inline]
    fn source_map(&self) -> Option<&Arc<SourceMap>> {
        self.source_map.as_ref()
    }

    #[inline]
    fn supports_color(&self) -> bool {
        self.color
    }
}

impl HumanBufferEmitter {
    /// Creates a new `HumanBufferEmitter`. `Auto` is treated as `Never`.
    pub fn new(color: ColorChoice) -> Self {
        Self { buffer: String::new(), source_map: None, color: color == ColorChoice::Always }
    }

    /// Sets the source map.
    pub fn source_map(mut self, source_map: Option<Arc<SourceMap>>) -> Self {
        self.source_map = source_map;
        self
    }

    /// Returns a reference to the buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns a mutable reference to the buffer.
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }
}

/// Renders one diagnostic, without the trailing blank line.
///
/// ```text
/// DeclarationError[1686]: function with same name and parameter types defined twice
///  --> a.sol:2:5
///   |
/// 2 |     function f() {}
///   |     ^^^^^^^^^^^^^^^
///   |
/// note: other declaration is here
///  --> a.sol:3:5
///   |
/// 3 |     function f() {}
///   |     ^^^^^^^^^^^^^^^
/// ```
pub(super) fn render(diagnostic: &Diag, sm: Option<&SourceMap>, color: bool) -> String {
    let renderer = if color { DEFAULT_RENDERER } else { Renderer::plain() };
    let code = diagnostic.code.map(|code| code.to_string());

    let level = annotation_level(diagnostic.level, diagnostic.kind.map(ErrorKind::to_str));
    let mut title = level.primary_title(diagnostic.message.as_str());
    if let Some(code) = &code {
        title = title.id(code.as_str());
    }
    let main_group = Group::with_title(title).elements(snippets(sm, &diagnostic.span));

    // Span-less children go in the main group's footer, located ones get a group of their own.
    let subs = |located: bool| {
        diagnostic.children.iter().filter(move |sub| sub.span.is_dummy() != located)
    };
    let mut footers = subs(false).map(message_from_subdiagnostic).peekable();
    let footer_group =
        footers.peek().is_some().then(|| Group::with_level(ASLevel::NOTE).elements(footers));
    let sub_groups = subs(true).map(|sub| {
        Group::with_title(title_from_subdiagnostic(sub)).elements(snippets(sm, &sub.span))
    });

    let report =
        std::iter::once(main_group).chain(footer_group).chain(sub_groups).collect::<Vec<_>>();
    renderer.render(&report)
}

fn title_from_subdiagnostic(sub: &SubDiagnostic) -> Title<'_> {
    annotation_level(sub.level, None).secondary_title(sub.message.as_str())
}

fn message_from_subdiagnostic(sub: &SubDiagnostic) -> Message<'_> {
    annotation_level(sub.level, None).message(sub.message.as_str())
}

fn annotation_level<'a>(level: Level, name: Option<&'static str>) -> ASLevel<'a> {
    match level {
        Level::Error => ASLevel::ERROR,
        Level::Warning => ASLevel::WARNING,
        Level::Note => ASLevel::NOTE,
        Level::Help => ASLevel::HELP,
    }
    .with_name(Some(name.unwrap_or(level.to_str())))
}

/// One snippet per file touched by `msp`, in order of first appearance.
fn snippets<'a>(sm: Option<&SourceMap>, msp: &MultiSpan) -> Vec<Snippet<'a, Annotation<'a>>> {
    let Some(sm) = sm else { return Vec::new() };
    let mut files: Vec<(Arc<SourceFile>, Vec<Span>)> = Vec::new();
    for &span in msp.primary_spans().iter().filter(|span| !span.is_dummy()) {
        let Some(file) = sm.lookup_source_file(span.lo()).filter(|file| file.contains(span.hi()))
        else {
            continue;
        };
        match files.iter_mut().find(|(f, _)| Arc::ptr_eq(f, &file)) {
            Some((_, spans)) => spans.push(span),
            None => files.push((file, vec![span])),
        }
    }
    files.iter().map(|(file, spans)| file_to_snippet(file, spans)).collect()
}

/// Cuts the lines of `file` covered by `spans` into a snippet annotated with every span.
fn file_to_snippet<'a>(file: &SourceFile, spans: &[Span]) -> Snippet<'a, Annotation<'a>> {
    let first_line = spans.iter().map(|span| file.lookup_line(span.lo())).min().unwrap_or(0);
    let last_line =
        spans.iter().map(|span| file.lookup_line(span.hi())).max().unwrap_or(first_line);
    let offset = |pos: BytePos| (pos - file.start_pos).to_usize();
    let start = file.line_range(first_line).map_or(0, |range| range.start);
    let end = file.line_range(last_line).map_or(file.src.len(), |range| range.end);
    // A span may end inside the line terminator.
    let end = spans.iter().map(|span| offset(span.hi())).fold(end, usize::max);

    let relative = |pos: BytePos| offset(pos) - start;
    let annotations = spans
        .iter()
        .map(|span| AnnotationKind::Primary.span(relative(span.lo())..relative(span.hi())))
        .collect::<Vec<_>>();
    Snippet::source(file.src[start..end].to_string())
        .path(file.name.to_string())
        .line_start(first_line + 1)
        .fold(true)
        .annotations(annotations)
}

fn to_anstream(color: ColorChoice) -> anstream::ColorChoice {
    match color {
        ColorChoice::Auto => anstream::ColorChoice::Auto,
        ColorChoice::Always => anstream::ColorChoice::Always,
        ColorChoice::Never => anstream::ColorChoice::Never,
    }
}

fn stderr_choice(color: ColorChoice) -> anstream::ColorChoice {
    static AUTO: OnceLock<anstream::ColorChoice> = OnceLock::new();
    if color == ColorChoice::Auto {
        *AUTO.get_or_init(|| AutoStream::choice(&io::stderr()))
    } else {
        to_anstream(color)
    }
}

fn emit_to_destination(rendered: &str, dst: &mut impl Write) -> io::Result<()> {
    writeln!(dst, "{rendered}")?;
    writeln!(dst)?;
    dst.flush()
}
