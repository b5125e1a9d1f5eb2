use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::{Formatter, Serializer};
use std::io;

use crate::error::TickerError;

/// UTF-8 encoding of U+FEFF.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// On-disk array of records. Expecting a file like:
///  ```JSON
/// [{"distance": 0, "id": 1}, {"distance": 40, "id": 2}]
/// ```
/// prefixed with a byte-order mark. Elements are kept as raw JSON values so
/// records without the target field (and non-object elements) round-trip as-is.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Document {
    records: Vec<Value>,
}

impl Document {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Value] {
        &mut self.records
    }

    /// Decodes raw file bytes: optional BOM, UTF-8, then the loose
    /// first-`[` / last-`]` scan.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, TickerError> {
        let text = std::str::from_utf8(strip_bom(raw))?;
        let body = extract_array_body(text)?;
        serde_json::from_str(&format!("[{body}]")).map_err(TickerError::Parse)
    }

    /// BOM followed by the JSON array, `", "` and `": "` separated.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TickerError> {
        let mut out = BOM.to_vec();
        let mut ser = Serializer::with_formatter(&mut out, SpacedFormatter);
        self.serialize(&mut ser).map_err(TickerError::Serialize)?;
        Ok(out)
    }
}

pub fn strip_bom(raw: &[u8]) -> &[u8] {
    raw.strip_prefix(BOM).unwrap_or(raw)
}

/// Returns the trimmed text strictly between the first `[` and the last `]`.
/// Anything outside that span is ignored, other arrays included.
pub fn extract_array_body(text: &str) -> Result<&str, TickerError> {
    let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) else {
        return Err(TickerError::MissingBrackets);
    };

    // `]` before `[` leaves nothing in between
    if end < start {
        return Ok("");
    }

    Ok(text[start + 1..end].trim())
}

/// Compact single-line layout with a space after each separator.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
