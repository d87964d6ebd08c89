use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;
use tracing::debug;

use super::{columns::PITCH_TYPE_COLUMN, MetricsError, UNKNOWN_PITCH_TYPE};

/// One pitch event from an export, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Numeric reading for `column`. Missing fields read as `"0"` and
    /// unparseable values count as zero so a bad sensor read keeps the pitch
    /// in the sample.
    pub fn number(&self, column: &str) -> f64 {
        self.parsed(column).unwrap_or(0.0)
    }

    /// The value as a finite number, or `None` if missing or unparseable.
    pub fn parsed(&self, column: &str) -> Option<f64> {
        self.get(column)
            .and_then(|raw| raw.parse::<f64>().ok())
            .filter(|value| value.is_finite())
    }

    pub fn pitch_type(&self) -> &str {
        match self.get(PITCH_TYPE_COLUMN) {
            Some(label) if !label.is_empty() => label,
            _ => UNKNOWN_PITCH_TYPE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExport {
    pub delimiter: u8,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Tab if the header line has one, comma otherwise.
pub fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

/// Trims the field and removes one pair of wrapping double quotes.
fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}

/// Parses a delimited device export.
///
/// The first non-empty line is the header; every other non-empty line is a
/// pitch. Fields are split on the delimiter alone, so quotes never span
/// delimiters or lines. Rows are matched to headers by position and short
/// rows simply lack the trailing fields. Fewer than two non-empty lines is
/// an error.
pub fn parse_export(text: &str) -> Result<ParsedExport, MetricsError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(MetricsError::NotEnoughLines { found: lines.len() });
    }

    let delimiter = detect_delimiter(lines[0]);
    let body = lines.join("\n");

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(clean_field).collect(),
        None => return Err(MetricsError::NotEnoughLines { found: 0 }),
    };

    let mut rows = Vec::with_capacity(lines.len() - 1);
    for record in records {
        let record = record?;
        let row = RawRow::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.clone(), clean_field(value))),
        );
        rows.push(row);
    }

    debug!(
        delimiter = %(delimiter as char).escape_default(),
        columns = headers.len(),
        rows = rows.len(),
        "Parsed pitch export"
    );

    Ok(ParsedExport {
        delimiter,
        headers,
        rows,
    })
}
