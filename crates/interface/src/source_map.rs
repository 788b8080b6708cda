//! The source map: every loaded source file, laid out back to back in one global offset space.

use crate::{BytePos, RelativeBytePos, Span};
use contrail_data_structures::sync::RwLock;
use std::{fmt, ops::Range, path::PathBuf, sync::Arc};
use unicode_width::UnicodeWidthChar;

/// The name of a source file.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileName {
    /// Files from the file system.
    Real(PathBuf),
    /// Custom sources, e.g. from tests and embedders.
    Custom(String),
}

impl FileName {
    /// Creates a new custom file name.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(path) => fmt::Display::fmt(&path.display(), f),
            Self::Custom(name) => write!(f, "<{name}>"),
        }
    }
}

/// Adding a file would overflow the 32-bit global offset space.
#[derive(Debug, thiserror::Error)]
#[error("source map offset overflow while adding `{0}`")]
pub struct OffsetOverflowError(pub FileName);

/// A single source file.
#[derive(Debug)]
pub struct SourceFile {
    /// The name of the file.
    pub name: FileName,
    /// The complete source code.
    pub src: Arc<String>,
    /// The start position of this source in the [`SourceMap`].
    pub start_pos: BytePos,
    /// Offsets of the first byte of every line, relative to `start_pos`.
    lines: Vec<RelativeBytePos>,
}

impl SourceFile {
    fn new(name: FileName, src: String, start_pos: BytePos) -> Self {
        let lines = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(i, _)| i + 1))
            .map(RelativeBytePos::from_usize)
            .collect();
        Self { name, src: Arc::new(src), start_pos, lines }
    }

    /// The end position of this source in the [`SourceMap`].
    pub fn end_pos(&self) -> BytePos {
        self.start_pos + self.src.len() as u32
    }

    /// Returns `true` if `pos` is inside this file, end position included.
    pub fn contains(&self, pos: BytePos) -> bool {
        self.start_pos <= pos && pos <= self.end_pos()
    }

    /// Returns the number of lines in the file.
    pub fn count_lines(&self) -> usize {
        self.lines.len()
    }

    /// Returns the 0-based line index containing `pos`.
    pub fn lookup_line(&self, pos: BytePos) -> usize {
        let rel = RelativeBytePos((pos - self.start_pos).0);
        self.lines.partition_point(|&start| start <= rel).saturating_sub(1)
    }

    /// Returns the byte range of the given 0-based line relative to `start_pos`, without its line
    /// terminator.
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let start = self.lines.get(line)?.to_usize();
        let end = self.lines.get(line + 1).map_or(self.src.len(), |end| end.to_usize());
        let text = self.src[start..end].trim_end_matches(['\n', '\r']);
        Some(start..start + text.len())
    }

    /// Returns the text of the given 0-based line, without its line terminator.
    pub fn get_line(&self, line: usize) -> Option<&str> {
        self.line_range(line).map(|range| &self.src[range])
    }
}

/// Display width of `c`. Tabs count as four columns and control characters as none.
fn char_width(c: char) -> usize {
    if c == '\t' { 4 } else { c.width().unwrap_or(0) }
}

/// A resolved source position.
#[derive(Clone, Debug)]
pub struct Loc {
    /// The file the position belongs to.
    pub file: Arc<SourceFile>,
    /// The 1-based line number.
    pub line: usize,
    /// The 1-based column, counted in characters.
    pub col: usize,
    /// The 0-based column when displayed, accounting for wide characters and tabs.
    pub col_display: usize,
}

/// Stores all the sources of the current compilation session.
#[derive(Default)]
pub struct SourceMap {
    files: RwLock<Vec<Arc<SourceFile>>>,
}

impl fmt::Debug for SourceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceMap").field("files", &self.files.read().len()).finish()
    }
}

impl SourceMap {
    /// Creates a new empty source map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the source map is empty.
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    /// Adds a new source file and returns it.
    ///
    /// Files are separated by one unused byte so that no span covers two files.
    pub fn new_source_file(
        &self,
        name: FileName,
        src: impl Into<String>,
    ) -> Result<Arc<SourceFile>, OffsetOverflowError> {
        let src = src.into();
        let mut files = self.files.write();
        let start = files.last().map_or(Some(0), |last| last.end_pos().0.checked_add(1));
        let fits = start.and_then(|start| {
            u32::try_from(src.len()).ok().and_then(|len| start.checked_add(len)).map(|_| start)
        });
        let Some(start) = fits else { return Err(OffsetOverflowError(name)) };
        trace!(%name, start, len = src.len(), "adding source file");
        let file = Arc::new(SourceFile::new(name, src, BytePos(start)));
        files.push(file.clone());
        Ok(file)
    }

    /// Returns the source file containing `pos`.
    pub fn lookup_source_file(&self, pos: BytePos) -> Option<Arc<SourceFile>> {
        let files = self.files.read();
        let idx = files.partition_point(|file| file.start_pos <= pos).checked_sub(1)?;
        let file = &files[idx];
        file.contains(pos).then(|| file.clone())
    }

    /// Resolves `pos` to a file, line and column.
    pub fn lookup_char_pos(&self, pos: BytePos) -> Option<Loc> {
        let file = self.lookup_source_file(pos)?;
        let line = file.lookup_line(pos);
        let line_start = file.lines[line].to_usize();
        let offset = (pos - file.start_pos).to_usize();
        let prefix = file.src.get(line_start..offset).unwrap_or_default();
        let col = prefix.chars().count();
        let col_display = prefix.chars().map(char_width).sum();
        Some(Loc { file, line: line + 1, col: col + 1, col_display })
    }

    /// Returns the source text covered by `span`.
    pub fn span_to_snippet(&self, span: Span) -> Option<String> {
        let file = self.lookup_source_file(span.lo())?;
        if !file.contains(span.hi()) {
            return None;
        }
        let lo = (span.lo() - file.start_pos).to_usize();
        let hi = (span.hi() - file.start_pos).to_usize();
        file.src.get(lo..hi).map(ToString::to_string)
    }

    /// Formats `span`'s start as `file:line:col`.
    pub fn span_to_diagnostic_string(&self, span: Span) -> String {
        match self.lookup_char_pos(span.lo()) {
            Some(loc) => format!("{}:{}:{}", loc.file.name, loc.line, loc.col),
            None => format!("{span:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_across_files() {
        let sm = SourceMap::new();
        let a = sm.new_source_file(FileName::custom("a.sol"), "contract A {}\n").unwrap();
        let b = sm
            .new_source_file(FileName::custom("b.sol"), "contract B {\n    function f() {}\n}\n")
            .unwrap();
        assert_eq!(a.start_pos, BytePos(0));
        assert_eq!(b.start_pos, BytePos(a.end_pos().0 + 1));

        let f = b.start_pos + b.src.find("function").unwrap() as u32;
        let loc = sm.lookup_char_pos(f).unwrap();
        assert_eq!(loc.file.name, FileName::custom("b.sol"));
        assert_eq!((loc.line, loc.col), (2, 5));
        assert_eq!(b.get_line(1), Some("    function f() {}"));
        assert_eq!(sm.span_to_diagnostic_string(Span::new(f, f + 8)), "<b.sol>:2:5");
        assert_eq!(sm.span_to_snippet(Span::new(f, f + 8)).as_deref(), Some("function"));
    }

    #[test]
    fn display_columns() {
        let sm = SourceMap::new();
        let src = "contract A {\n\tfunction f() {}\n    /* 日本 */ function g() {}\n}\n";
        let file = sm.new_source_file(FileName::custom("wide.sol"), src).unwrap();
        let pos = |needle: &str| file.start_pos + src.find(needle).unwrap() as u32;

        let f = sm.lookup_char_pos(pos("function f")).unwrap();
        assert_eq!((f.line, f.col, f.col_display), (2, 2, 4));
        let g = sm.lookup_char_pos(pos("function g")).unwrap();
        assert_eq!((g.line, g.col, g.col_display), (3, 14, 15));

        assert_eq!(file.line_range(1), Some(13..29));
        assert_eq!(file.get_line(3), Some("}"));
        assert_eq!(file.line_range(5), None);
    }

    #[test]
    fn unknown_positions() {
        let sm = SourceMap::new();
        assert!(sm.lookup_char_pos(BytePos(3)).is_none());
        assert_eq!(sm.span_to_diagnostic_string(Span::from_range(3..4)), "Span(3..4)");
    }
}
