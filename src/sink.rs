// 📤 Output Sinks - where display results go
// TextSink writes the Display line; JsonLinesSink writes the field snapshot.

use std::io::Write;

use crate::entities::{render, snapshot, Entity};
use crate::error::Result;

/// Receives rendered entities.
pub trait DisplaySink {
    fn emit(&mut self, entity: &dyn Entity) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// One display line per entity.
#[derive(Debug)]
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        TextSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySink for TextSink<W> {
    fn emit(&mut self, entity: &dyn Entity) -> Result<()> {
        tracing::trace!(kind = entity.kind(), "emitting text line");
        writeln!(self.writer, "{}", entity)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// One `{"kind": .., "fields": [..]}` object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySink for JsonLinesSink<W> {
    fn emit(&mut self, entity: &dyn Entity) -> Result<()> {
        tracing::trace!(kind = entity.kind(), "emitting json line");
        serde_json::to_writer(&mut self.writer, &snapshot(entity))?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects rendered lines in memory.
impl DisplaySink for Vec<String> {
    fn emit(&mut self, entity: &dyn Entity) -> Result<()> {
        self.push(render(entity));
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CertifiedLetter, Employee, SloganTeeShirt};

    #[test]
    fn test_text_sink_writes_display_lines() {
        let mut sink = TextSink::new(Vec::new());
        sink.emit(&Employee::new(234, "Johnson").unwrap()).unwrap();
        sink.emit(&CertifiedLetter::new("Jane Smith", "11/17/2025", "ABC123").unwrap())
            .unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "Employee: 234 Johnson\n\
             Letter | Recipient: Jane Smith, Date Mailed: 11/17/2025, Tracking #: ABC123\n"
        );
    }

    #[test]
    fn test_json_lines_sink() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(&SloganTeeShirt::new("orange", 1000, None).unwrap()).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();

        assert_eq!(value["kind"], "SloganTeeShirt");
        assert_eq!(value["fields"][1]["name"], "price_cents");
        assert_eq!(value["fields"][1]["value"], 1000);
        assert!(value["fields"][2]["value"].is_null());
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut lines: Vec<String> = Vec::new();
        lines.emit(&Employee::new(1, "Ada").unwrap()).unwrap();

        assert_eq!(lines, vec!["Employee: 1 Ada".to_string()]);
    }

    #[test]
    fn test_broken_writer_surfaces_io_error() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut sink = TextSink::new(Broken);
        let err = sink.emit(&Employee::new(1, "Ada").unwrap()).unwrap_err();
        assert!(matches!(err, crate::error::RecordError::Io(_)));
    }
}
