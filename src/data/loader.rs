use std::path::Path;

use crate::error::{LoadError, LoadResult};

use super::model::{Column, Inventory, LoadOrigin, Record};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a local CSV file into an [`Inventory`].
///
/// Invalid UTF-8 is replaced rather than rejected; only I/O failures are
/// errors.
pub fn load_file(path: &Path) -> LoadResult<Inventory> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let records = parse_csv(&text);
    log::info!("Parsed {} records from {}", records.len(), path.display());
    Ok(Inventory::new(records, LoadOrigin::Manual(path.to_path_buf())))
}

/// Parse raw CSV text into records, in source order.
///
/// Rules:
///
/// - A header row is required; text with no data row yields no records.
/// - The delimiter is `;` when it occurs strictly more often than `,` in the
///   header line, otherwise `,`.
/// - Headers are matched case-insensitively against the known column names;
///   unknown columns are ignored and missing ones read as `""` / `0`.
/// - Blank lines are skipped. Short rows read their missing cells as `""` / `0`.
pub fn parse_csv(text: &str) -> Vec<Record> {
    let lines: Vec<&str> = split_lines(text.trim());
    if lines.len() < 2 {
        return Vec::new();
    }

    let delimiter = detect_delimiter(lines[0]);

    let body = lines
        .iter()
        .copied()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let layout = match reader.headers() {
        Ok(headers) => ColumnLayout::from_headers(headers.iter()),
        Err(e) => {
            log::warn!("Unreadable CSV header: {e}");
            return Vec::new();
        }
    };
    log::debug!(
        "CSV delimiter {:?}, missing columns {:?}",
        delimiter as char,
        layout.missing()
    );

    let mut records = Vec::with_capacity(lines.len() - 1);
    for (row_no, result) in reader.records().enumerate() {
        match result {
            Ok(row) => records.push(layout.record(&row)),
            // Header is line 1, so the first data row is line 2.
            Err(e) => log::warn!("Skipping CSV row {}: {e}", row_no + 2),
        }
    }
    records
}

/// Pick the cell delimiter from the header line.
pub fn detect_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Lenient numeric coercion for CSV cells.
///
/// Thousands separators (`,`) are stripped, then the longest leading number is
/// taken (`"12 kg"` reads as 12). Empty, unparseable and non-finite input all
/// read as 0.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    let value = cleaned
        .parse::<f64>()
        .ok()
        .or_else(|| leading_number(&cleaned))
        .unwrap_or(0.0);
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn split_lines(text: &str) -> Vec<&str> {
    text.split("\r\n")
        .flat_map(|chunk| chunk.split(|c| c == '\n' || c == '\r'))
        .collect()
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = count_digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Position of each known column in the CSV header, if present.
struct ColumnLayout {
    positions: [Option<usize>; Column::ALL.len()],
}

impl ColumnLayout {
    fn from_headers<'h>(headers: impl Iterator<Item = &'h str>) -> Self {
        let normalized: Vec<String> = headers.map(|h| h.trim().to_lowercase()).collect();
        let mut positions = [None; Column::ALL.len()];
        for (slot, column) in positions.iter_mut().zip(Column::ALL) {
            *slot = normalized.iter().position(|h| h == column.header());
        }
        ColumnLayout { positions }
    }

    fn missing(&self) -> Vec<&'static str> {
        Column::ALL
            .iter()
            .zip(self.positions.iter())
            .filter(|(_, pos)| pos.is_none())
            .map(|(column, _)| column.header())
            .collect()
    }

    fn cell<'r>(&self, row: &'r csv::StringRecord, column: Column) -> &'r str {
        self.positions[column as usize]
            .and_then(|idx| row.get(idx))
            .unwrap_or("")
    }

    fn record(&self, row: &csv::StringRecord) -> Record {
        let text = |column| self.cell(row, column).to_string();
        let number = |column| parse_number(self.cell(row, column));
        Record {
            codigo: text(Column::Codigo),
            clave: text(Column::Clave),
            desc_prod: text(Column::DescProd),
            inv: number(Column::Inv),
            clasificacion: text(Column::Clasificacion),
            promedio_vta_mes: number(Column::PromedioVtaMes),
            cobertura_mes: number(Column::CoberturaMes),
            cobertura_dias_30: number(Column::CoberturaDias30),
        }
    }
}
