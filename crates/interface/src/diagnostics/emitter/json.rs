use super::{Emitter, human::HumanBufferEmitter, io_panic};
use crate::{
    config::ColorChoice,
    diagnostics::{Diag, Level, MultiSpan},
    source_map::SourceMap,
};
use serde::Serialize;
use std::{io, sync::Arc};

/// Diagnostic emitter that emits diagnostics as solc-like JSON, one object per line.
pub struct JsonEmitter {
    writer: Box<dyn io::Write + Send>,
    pretty: bool,

    human_emitter: HumanBufferEmitter,
}

impl Emitter for JsonEmitter {
    fn emit_diagnostic(&mut self, diagnostic: &Diag) {
        let diagnostic = self.solc_diagnostic(diagnostic);
        self.emit(&diagnostic).unwrap_or_else(|e| io_panic(e));
    }

    fn source_map(&self) -> Option<&Arc<SourceMap>> {
        Emitter::source_map(&self.human_emitter)
    }
}

impl JsonEmitter {
    /// Creates a new `JsonEmitter` that writes to given writer.
    pub fn new(writer: Box<dyn io::Write + Send>, source_map: Arc<SourceMap>) -> Self {
        Self {
            writer,
            pretty: false,
            human_emitter: HumanBufferEmitter::new(ColorChoice::Never).source_map(Some(source_map)),
        }
    }

    /// Sets whether to pretty print the JSON.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn solc_diagnostic(&mut self, diagnostic: &Diag) -> SolcDiagnostic {
        let severity = to_severity(diagnostic.level);
        SolcDiagnostic {
            source_location: self.solc_span(&diagnostic.span, None),
            secondary_source_locations: diagnostic
                .children
                .iter()
                .filter_map(|sub| self.solc_span(&sub.span, Some(sub.message.as_str().into())))
                .collect(),
            r#type: match diagnostic.kind {
                Some(kind) => kind.to_str(),
                None => match severity {
                    Severity::Error => "Exception",
                    Severity::Warning => "Warning",
                    Severity::Info => "Info",
                },
            },
            component: "general",
            severity,
            error_code: diagnostic.code.map(|code| code.to_string()),
            message: diagnostic.message.as_str().into(),
            formatted_message: Some(self.emit_diagnostic_to_buffer(diagnostic)),
        }
    }

    fn solc_span(&self, span: &MultiSpan, message: Option<String>) -> Option<SourceLocation> {
        let sm = Emitter::source_map(self)?;
        let span = span.primary_span().filter(|sp| !sp.is_dummy())?;
        let file = sm.lookup_source_file(span.lo())?;
        Some(SourceLocation {
            file: file.name.to_string(),
            start: (span.lo() - file.start_pos).to_u32(),
            end: (span.hi() - file.start_pos).to_u32(),
            message,
        })
    }

    fn emit_diagnostic_to_buffer(&mut self, diagnostic: &Diag) -> String {
        self.human_emitter.emit_diagnostic(diagnostic);
        std::mem::take(self.human_emitter.buffer_mut())
    }

    fn emit(&mut self, value: &SolcDiagnostic) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *self.writer, value)
        } else {
            serde_json::to_writer(&mut *self.writer, value)
        }?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SolcDiagnostic {
    #[serde(skip_serializing_if = "Option::is_none")]
    source_location: Option<SourceLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    secondary_source_locations: Vec<SourceLocation>,
    r#type: &'static str,
    component: &'static str,
    severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    formatted_message: Option<String>,
}

#[derive(Serialize)]
struct SourceLocation {
    file: String,
    start: u32,
    end: u32,
    // Some if it's a secondary source location.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Severity {
    Error,
    Warning,
    Info,
}

fn to_severity(level: Level) -> Severity {
    match level {
        Level::Error => Severity::Error,
        Level::Warning => Severity::Warning,
        Level::Note | Level::Help => Severity::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Span, error_code, source_map::FileName};
    use contrail_data_structures::sync::Lock;

    #[derive(Clone, Default)]
    struct SharedWriter(Arc<Lock<Vec<u8>>>);

    impl io::Write for SharedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn solc_format() {
        let sm = Arc::new(SourceMap::new());
        sm.new_source_file(FileName::custom("a.sol"), "contract A {}\n").unwrap();
        let file = sm.new_source_file(FileName::custom("b.sol"), "contract B is A {}\n").unwrap();

        let writer = SharedWriter::default();
        let mut emitter = JsonEmitter::new(Box::new(writer.clone()), sm);
        let lo = file.start_pos + 14;
        let diag = Diag::type_error("base constructor arguments given twice")
            .code(error_code!(3364))
            .span(Span::new(file.start_pos, file.end_pos()))
            .span_note(Span::new(lo, lo + 1), "second constructor call is here");
        emitter.emit_diagnostic(&diag);

        let output = String::from_utf8(writer.0.lock().clone()).unwrap();
        let value: serde_json::Value = serde_json::from_str(output.trim_end()).unwrap();
        assert_eq!(value["type"], "TypeError");
        assert_eq!(value["severity"], "error");
        assert_eq!(value["errorCode"], "3364");
        assert_eq!(value["sourceLocation"]["file"], "<b.sol>");
        assert_eq!(value["sourceLocation"]["start"], 0);
        assert_eq!(value["secondarySourceLocations"][0]["start"], 14);
        let secondary = &value["secondarySourceLocations"][0];
        assert_eq!(secondary["message"], "second constructor call is here");
        let formatted = value["formattedMessage"].as_str().unwrap();
        assert!(formatted.starts_with("TypeError[3364]: base constructor arguments given twice"));
    }
}
