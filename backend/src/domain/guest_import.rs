//! Parsing for pasted guest lists.
//!
//! Lines come from spreadsheets or plain text, so fields may be separated by
//! tabs, commas, or runs of two or more spaces.

use serde::Serialize;

use super::{DEFAULT_CITY, GuestDraft, IdType};

/// Minimum number of fields for a line to be considered a guest row.
pub const MIN_IMPORT_FIELDS: usize = 5;

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// One parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportLine {
    /// Enough fields to form a guest.
    Row(GuestDraft),
    /// Too few fields.
    Malformed,
}

/// Split a line on tabs and commas, or on runs of two or more spaces.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut rest = line;
    while let Some((at, len)) = next_separator(rest) {
        let (field, tail) = rest.split_at(at);
        fields.push(field.trim());
        rest = tail.get(len..).unwrap_or_default();
    }
    fields.push(rest.trim());
    fields
}

/// Byte offset and length of the first separator in `text`.
fn next_separator(text: &str) -> Option<(usize, usize)> {
    text.char_indices().find_map(|(at, ch)| match ch {
        '\t' | ',' => Some((at, 1)),
        ' ' => {
            let run = text
                .get(at..)
                .unwrap_or_default()
                .bytes()
                .take_while(|byte| *byte == b' ')
                .count();
            (run >= 2).then_some((at, run))
        }
        _ => None,
    })
}

/// Parse a single non-blank line.
///
/// Field order: first name, last name, email, phone, id type, id number,
/// city, country. Unknown id types fall back to NID and the city doubles
/// as the address.
///
/// # Examples
/// ```
/// use frontdesk::domain::{ImportLine, parse_import_line};
///
/// let ImportLine::Row(draft) =
///     parse_import_line("Nadia\tIslam\tnadia@example.com\t01700000000\tPassport\tBX1234")
/// else {
///     panic!("expected a row");
/// };
/// assert_eq!(draft.name, "Nadia Islam");
/// assert_eq!(draft.id_number, "BX1234");
/// ```
pub fn parse_import_line(line: &str) -> ImportLine {
    let fields = split_fields(line);
    if fields.len() < MIN_IMPORT_FIELDS {
        return ImportLine::Malformed;
    }
    let field = |index: usize| fields.get(index).copied().unwrap_or_default();
    let name = format!("{} {}", field(0), field(1)).trim().to_owned();
    let city = match field(6) {
        "" => DEFAULT_CITY,
        city => city,
    };
    ImportLine::Row(GuestDraft {
        name,
        email: field(2).to_owned(),
        phone: field(3).to_owned(),
        id_type: field(4).parse().unwrap_or(IdType::Nid),
        id_number: field(5).to_owned(),
        address: city.to_owned(),
        city: city.to_owned(),
        country: field(7).to_owned(),
        ..GuestDraft::default()
    })
}

/// Parse every non-blank line of pasted text.
pub fn parse_import(text: &str) -> Vec<ImportLine> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_import_line)
        .collect()
}
