// crates/core/src/dialect/mod.rs
//! CSV dialects of the vehicle logs.
//!
//! Every log family has its own quirks (no header, quoted free text, unit
//! annotations in headers). They share one reader: split into records
//! honouring quotes, drop blank lines, and set aside rows whose field count
//! does not fit the dialect. A bad row never fails the whole parse.

pub mod alcohol;
pub mod complaint;
pub mod drowsiness;
pub mod feedback;
pub mod history;
pub mod obd;
pub mod ticket;
pub mod visibility;

use serde::Serialize;

use crate::types::LogFamily;

/// Whether the first non-blank line names the columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    FirstLineIsHeader,
    Headerless,
}

/// How strictly a row's field count must match the expected column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly as many fields as columns.
    Exact,
    /// Up to as many fields as columns; missing trailing fields read as empty.
    /// The padding is kept, so a short ticket row is written back with
    /// trailing empty fields.
    Padded,
}

/// How a column's text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// Static description of one log family's layout.
///
/// For headerless dialects `columns` is the positional layout. For headered
/// dialects it lists the columns the parser knows how to type; the header
/// decides the order and the expected field count.
#[derive(Debug, Clone, Copy)]
pub struct DialectSpec {
    pub family: LogFamily,
    pub header: HeaderMode,
    pub arity: Arity,
    pub columns: &'static [Column],
}

impl DialectSpec {
    pub fn kind_of(&self, name: &str) -> ColumnKind {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.kind)
            .unwrap_or(ColumnKind::Text)
    }
}

/// A line that was left out of the parsed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub family: LogFamily,
    pub line: u64,
    pub message: String,
}

/// Records of one dialect plus the diagnostics for lines that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput<T> {
    pub records: Vec<T>,
    pub warnings: Vec<ParseWarning>,
}

impl<T> ParseOutput<T> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// One data row in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the parsed text.
    pub line: u64,
    /// Field values padded to the expected width. Empty when the row does not fit.
    pub values: Vec<String>,
    /// False when the line could not be read or its field count did not
    /// match the dialect.
    pub fits: bool,
    /// The line as it appeared in the file, without its terminator.
    pub source: String,
}

impl RawRow {
    fn unreadable(line: u64, source: &str) -> Self {
        Self {
            line,
            values: Vec::new(),
            fits: false,
            source: source.to_string(),
        }
    }
}

/// The untyped result of reading a dialect: header names plus rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Rows whose shape matched the dialect.
    pub fn fitting_rows(&self) -> impl Iterator<Item = &RawRow> {
        self.rows.iter().filter(|row| row.fits)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Value of `name` in `row`, empty when the column is absent.
    pub fn get<'a>(&self, row: &'a RawRow, name: &str) -> &'a str {
        self.column_index(name)
            .and_then(|idx| row.values.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Read `text` according to `spec`.
///
/// Each line is one record; a quoted field never continues onto the next
/// line. Rows that do not fit are kept in the table with `fits == false` so
/// the ticket writer can preserve them, and a warning is pushed for each.
pub fn read_table(spec: &DialectSpec, text: &str, warnings: &mut Vec<ParseWarning>) -> RawTable {
    let builder = {
        let mut b = csv::ReaderBuilder::new();
        b.has_headers(false)
            .flexible(true)
            .trim(csv::Trim::None)
            .double_quote(true)
            .quoting(true);
        b
    };

    let mut table = RawTable::default();
    let mut header_pending = spec.header == HeaderMode::FirstLineIsHeader;
    if !header_pending {
        table.headers = spec.columns.iter().map(|c| c.name.to_string()).collect();
    }

    for (idx, source) in text.lines().enumerate() {
        let line = idx as u64 + 1;
        if source.trim().is_empty() {
            continue;
        }

        let values = match split_line(&builder, source) {
            Ok(values) => values,
            Err(message) => {
                skip(spec, warnings, line, message);
                if !header_pending {
                    table.rows.push(RawRow::unreadable(line, source));
                }
                continue;
            }
        };

        if header_pending {
            table.headers = values;
            header_pending = false;
            continue;
        }

        let expected = table.headers.len();
        let fits = match spec.arity {
            Arity::Exact => values.len() == expected,
            Arity::Padded => values.len() <= expected,
        };
        if !fits {
            skip(
                spec,
                warnings,
                line,
                format!("expected {} fields, found {}", expected, values.len()),
            );
            table.rows.push(RawRow::unreadable(line, source));
            continue;
        }

        let mut values = values;
        values.resize(expected, String::new());
        table.rows.push(RawRow {
            line,
            values,
            fits: true,
            source: source.to_string(),
        });
    }

    table
}

/// Split one line into fields.
fn split_line(builder: &csv::ReaderBuilder, source: &str) -> Result<Vec<String>, String> {
    let line = strip_unquoted_padding(source.trim())?;
    let mut rdr = builder.from_reader(line.as_bytes());
    match rdr.records().next() {
        Some(Ok(record)) => Ok(record.iter().map(str::to_string).collect()),
        Some(Err(err)) => Err(err.to_string()),
        None => Ok(Vec::new()),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    FieldStart,
    Bare,
    Quoted,
    AfterQuote,
}

/// Drop whitespace around delimiters outside quotes, so `a , "b c" ,d`
/// reads as `a,"b c",d`. Text inside quotes is left alone.
///
/// Fails when a quoted field is still open at the end of the line.
fn strip_unquoted_padding(line: &str) -> Result<String, String> {
    let mut out = String::with_capacity(line.len());
    let mut pending = String::new();
    let mut state = Scan::FieldStart;

    for ch in line.chars() {
        state = match (state, ch) {
            (Scan::FieldStart, ' ' | '\t') => Scan::FieldStart,
            (Scan::FieldStart, '"') => {
                out.push(ch);
                Scan::Quoted
            }
            (Scan::FieldStart, ',') => {
                out.push(ch);
                Scan::FieldStart
            }
            (Scan::FieldStart, _) => {
                out.push(ch);
                Scan::Bare
            }
            (Scan::Bare, ',') => {
                out.truncate(out.trim_end_matches([' ', '\t']).len());
                out.push(ch);
                Scan::FieldStart
            }
            (Scan::Bare, _) => {
                out.push(ch);
                Scan::Bare
            }
            (Scan::Quoted, '"') => {
                out.push(ch);
                Scan::AfterQuote
            }
            (Scan::Quoted, _) => {
                out.push(ch);
                Scan::Quoted
            }
            (Scan::AfterQuote, '"') if pending.is_empty() => {
                out.push(ch);
                Scan::Quoted
            }
            (Scan::AfterQuote, ' ' | '\t') => {
                pending.push(ch);
                Scan::AfterQuote
            }
            (Scan::AfterQuote, ',') => {
                pending.clear();
                out.push(ch);
                Scan::FieldStart
            }
            (Scan::AfterQuote, _) => {
                out.push_str(&pending);
                pending.clear();
                out.push(ch);
                Scan::Bare
            }
        };
    }

    match state {
        Scan::Quoted => Err("unterminated quoted field".to_string()),
        Scan::Bare => {
            out.truncate(out.trim_end_matches([' ', '\t']).len());
            Ok(out)
        }
        _ => Ok(out),
    }
}

fn skip(spec: &DialectSpec, warnings: &mut Vec<ParseWarning>, line: u64, message: String) {
    tracing::warn!(family = %spec.family, line, reason = %message, "skipping malformed row");
    warnings.push(ParseWarning {
        family: spec.family,
        line,
        message,
    });
}

/// Base-10 integer, tolerant of surrounding whitespace.
pub(crate) fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Finite decimal number.
pub(crate) fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
