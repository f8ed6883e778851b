use std::cmp::Ordering;

use super::model::{Column, Record};

// ---------------------------------------------------------------------------
// Sort state: which column the table is ordered by
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Arrow shown next to the sorted header.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Current sort column (if any) and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<Column>,
    pub direction: SortDirection,
}

impl SortState {
    /// Selecting the current column flips the direction; any other column
    /// becomes the key and sorts ascending.
    pub fn select(&mut self, column: Column) {
        if self.key == Some(column) {
            self.direction = self.direction.flip();
        } else {
            self.key = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Unsorted, ascending.
    pub fn reset(&mut self) {
        *self = SortState::default();
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Compare two records on one column.
///
/// Numeric columns (or any column when `numeric_hint` is set) compare as
/// numbers; text columns use [`collate`].
pub fn compare(a: &Record, b: &Record, column: Column, numeric_hint: bool) -> Ordering {
    if numeric_hint || column.is_numeric() {
        let (va, vb) = (column.numeric_value(a), column.numeric_value(b));
        va.partial_cmp(&vb).unwrap_or(Ordering::Equal)
    } else {
        collate(&column.text_value(a), &column.text_value(b))
    }
}

/// Dictionary-style string ordering.
///
/// Letters compare ignoring accents and case first; accents break ties next,
/// then case with lower-case first.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| -> Vec<char> {
        s.chars()
            .flat_map(char::to_lowercase)
            .map(fold_accent)
            .collect()
    };
    let secondary = |s: &str| -> Vec<char> { s.chars().flat_map(char::to_lowercase).collect() };
    let tertiary = |s: &str| -> Vec<char> { s.chars().map(swap_case).collect() };

    primary(a)
        .cmp(&primary(b))
        .then_with(|| secondary(a).cmp(&secondary(b)))
        .then_with(|| tertiary(a).cmp(&tertiary(b)))
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

fn swap_case(c: char) -> char {
    if c.is_lowercase() {
        c.to_uppercase().next().unwrap_or(c)
    } else if c.is_uppercase() {
        c.to_lowercase().next().unwrap_or(c)
    } else {
        c
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Stable sort of row indices into `records`.
pub fn sort_indices(
    records: &[Record],
    indices: &mut [usize],
    column: Column,
    direction: SortDirection,
    numeric_hint: bool,
) {
    indices.sort_by(|&a, &b| {
        direction.apply(compare(&records[a], &records[b], column, numeric_hint))
    });
}

/// Stable in-place sort of records.
pub fn sort_records(
    records: &mut [Record],
    column: Column,
    direction: SortDirection,
    numeric_hint: bool,
) {
    records.sort_by(|a, b| direction.apply(compare(a, b, column, numeric_hint)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(codigo: &str, inv: f64) -> Record {
        Record {
            codigo: codigo.to_string(),
            inv,
            ..Record::default()
        }
    }

    fn codes(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.codigo.as_str()).collect()
    }

    #[test]
    fn select_toggles_and_resets_direction() {
        let mut state = SortState::default();
        state.select(Column::Inv);
        assert_eq!(state.key, Some(Column::Inv));
        assert_eq!(state.direction, SortDirection::Ascending);

        state.select(Column::Inv);
        assert_eq!(state.direction, SortDirection::Descending);

        state.select(Column::Inv);
        assert_eq!(state.direction, SortDirection::Ascending);

        state.select(Column::Inv);
        state.select(Column::Codigo);
        assert_eq!(state.key, Some(Column::Codigo));
        assert_eq!(state.direction, SortDirection::Ascending);

        state.reset();
        assert_eq!(state, SortState::default());
    }

    #[test]
    fn numeric_columns_sort_by_value_not_text() {
        let mut records = vec![rec("a", 100.0), rec("b", 9.0), rec("c", 25.0)];
        sort_records(&mut records, Column::Inv, SortDirection::Ascending, false);
        assert_eq!(codes(&records), vec!["b", "c", "a"]);

        sort_records(&mut records, Column::Inv, SortDirection::Descending, false);
        assert_eq!(codes(&records), vec!["a", "c", "b"]);
    }

    #[test]
    fn numeric_hint_applies_to_text_columns() {
        let mut records = vec![rec("100", 0.0), rec("9", 0.0), rec("25", 0.0)];
        sort_records(&mut records, Column::Codigo, SortDirection::Ascending, false);
        assert_eq!(codes(&records), vec!["100", "25", "9"]);

        sort_records(&mut records, Column::Codigo, SortDirection::Ascending, true);
        assert_eq!(codes(&records), vec!["9", "25", "100"]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let records = vec![rec("x", 1.0), rec("y", 2.0), rec("z", 1.0)];
        let mut idx: Vec<usize> = (0..records.len()).collect();

        sort_indices(&records, &mut idx, Column::Inv, SortDirection::Ascending, false);
        assert_eq!(idx, vec![0, 2, 1]);

        let mut idx: Vec<usize> = (0..records.len()).collect();
        sort_indices(&records, &mut idx, Column::Inv, SortDirection::Descending, false);
        assert_eq!(idx, vec![1, 0, 2]);
    }

    #[test]
    fn collation_ignores_case_and_accents_first() {
        assert_eq!(collate("arandela", "Broca"), Ordering::Less);
        assert_eq!(collate("Árbol", "azada"), Ordering::Less);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("e", "é"), Ordering::Less);
        assert_eq!(collate("Tuerca", "Tuerca"), Ordering::Equal);

        let mut words = vec!["zeta", "Ñandú", "nube", "Alfa", "éxito"];
        words.sort_by(|a, b| collate(a, b));
        assert_eq!(words, vec!["Alfa", "éxito", "Ñandú", "nube", "zeta"]);
    }
}
