//! JSON and XML encoders for the API report.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

use crate::error::{ReportError, ReportResult};
use crate::types::{DriverMap, RacerStats};

/// Root element of the XML report.
pub const XML_ROOT: &str = "report";

/// Pretty JSON with `", "` between items and `" = "` between key and value.
///
/// Items are indented four spaces per level. The item separator keeps its
/// trailing space, so every non-final line ends in `", "`.
#[derive(Debug, Default)]
pub struct ReportFormatter {
    current_indent: usize,
    has_value: bool,
}

impl ReportFormatter {
    const INDENT: &'static [u8] = b"    ";

    fn indent<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for _ in 0..self.current_indent {
            writer.write_all(Self::INDENT)?;
        }
        Ok(())
    }

    fn begin_item<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if !first {
            writer.write_all(b", ")?;
        }
        writer.write_all(b"\n")?;
        self.indent(writer)
    }

    fn close<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        self.current_indent -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            self.indent(writer)?;
        }
        writer.write_all(bracket)
    }
}

impl Formatter for ReportFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.current_indent += 1;
        self.has_value = false;
        writer.write_all(b"[")
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"]")
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.begin_item(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.current_indent += 1;
        self.has_value = false;
        writer.write_all(b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.begin_item(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" = ")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }
}

/// Encode any serializable value with [`ReportFormatter`].
///
/// Non-ASCII characters are written as-is.
pub fn to_report_json<T: Serialize + ?Sized>(value: &T) -> ReportResult<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, ReportFormatter::default());
    value
        .serialize(&mut ser)
        .map_err(|e| ReportError::Encode(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ReportError::Encode(e.to_string()))
}

/// Declaration line, with a space before `?>`.
const XML_DECLARATION: &[u8] = b"<?xml version=\"1.0\" ?>\n";

/// Whether `name` can be used verbatim as an XML element name.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let valid_start = match chars.next() {
        Some(c) => c.is_alphabetic() || matches!(c, '_' | ':'),
        None => false,
    };
    valid_start && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

/// Element name for a driver code.
///
/// Tried in turn: the code itself, `n` + code for all-digit codes, the code
/// with spaces replaced by `_`. `None` means no usable name exists.
fn element_name(code: &str) -> Option<String> {
    if is_xml_name(code) {
        return Some(code.to_string());
    }
    if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!("n{}", code));
    }
    let underscored = code.replace(' ', "_");
    is_xml_name(&underscored).then_some(underscored)
}

/// Element for a driver code; codes with no usable name become `<key name="...">`.
fn driver_element(code: &str) -> (BytesStart<'_>, BytesEnd<'_>) {
    match element_name(code) {
        Some(name) => (BytesStart::new(name.clone()), BytesEnd::new(name)),
        None => {
            let mut start = BytesStart::new("key");
            start.push_attribute(("name", code));
            (start, BytesEnd::new("key"))
        }
    }
}

fn write_field<W: io::Write>(writer: &mut Writer<W>, name: &str, text: &str) -> ReportResult<()> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write<W: io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> ReportResult<()> {
    writer
        .write_event(event)
        .map_err(|e| ReportError::Encode(e.to_string()))
}

/// Encode the report as a pretty XML document rooted at `<report>`.
///
/// Each driver code becomes an element holding `position`, `racer_name`,
/// `team` and `time` children. No type attributes are written.
pub fn to_report_xml(report: &DriverMap<RacerStats>) -> ReportResult<String> {
    // The declaration is written up front; the first element then starts
    // without a line break of its own.
    let mut writer = Writer::new_with_indent(XML_DECLARATION.to_vec(), b'\t', 1);

    if report.is_empty() {
        write(&mut writer, Event::Empty(BytesStart::new(XML_ROOT)))?;
    } else {
        write(&mut writer, Event::Start(BytesStart::new(XML_ROOT)))?;
        for (code, stats) in report.iter() {
            let (start, end) = driver_element(code);
            write(&mut writer, Event::Start(start))?;
            write_field(&mut writer, "position", &stats.position.to_string())?;
            write_field(&mut writer, "racer_name", &stats.racer_name)?;
            write_field(&mut writer, "team", &stats.team)?;
            write_field(&mut writer, "time", &stats.time)?;
            write(&mut writer, Event::End(end))?;
        }
        write(&mut writer, Event::End(BytesEnd::new(XML_ROOT)))?;
    }

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| ReportError::Encode(e.to_string()))
}
