//! CSV text to rows of raw cells

use csv::ReaderBuilder;

/// A parsed CSV row, cells untrimmed
pub type Row = Vec<String>;

/// Split decoded CSV text into rows
///
/// Quoting follows RFC 4180: commas and line breaks inside double quotes
/// are literal and `""` is one quote. `\n`, `\r` and `\r\n` all end a row.
/// A leading byte-order mark is dropped, as are blank rows. Cells are not
/// trimmed here; validation and record building trim on read.
pub fn tokenize(text: &str) -> Result<Vec<Row>, csv::Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
