//! Per-column numeric-type inference over a bounded row sample.

use gridscope_sheet::{numeric, CellValue};

/// How many data rows the classifier inspects. Sampling keeps wide
/// sheets cheap; text appearing below the window is an accepted
/// false-positive of the heuristic.
pub const SAMPLE_ROWS: usize = 20;

/// Classify each column index in `[0, header_len)` as summable.
///
/// A column is summable iff every non-null, non-empty cell in the
/// first `min(SAMPLE_ROWS, rows.len())` rows is numeric. A cell index
/// beyond a row's length is absent and does not disqualify the
/// column. The result is valid only for the rows it was computed
/// from; recompute on every sheet switch or search change.
#[must_use]
pub fn summable_columns(rows: &[Vec<CellValue>], header_len: usize) -> Vec<bool> {
    let sample = &rows[..rows.len().min(SAMPLE_ROWS)];

    (0..header_len)
        .map(|col| {
            sample.iter().all(|row| match row.get(col) {
                None => true,
                Some(cell) => {
                    if cell.is_null() || cell.as_str().trim().is_empty() {
                        true
                    } else {
                        numeric::is_numeric(cell)
                    }
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: Vec<Vec<CellValue>>) -> Vec<Vec<CellValue>> {
        data
    }

    #[test]
    fn test_numeric_and_text_columns() {
        let rows = rows(vec![
            vec![CellValue::Int(1), CellValue::from("a")],
            vec![CellValue::from("2,000"), CellValue::from("b")],
        ]);

        assert_eq!(summable_columns(&rows, 2), vec![true, false]);
    }

    #[test]
    fn test_empty_cells_do_not_disqualify() {
        let rows = rows(vec![
            vec![CellValue::Int(1)],
            vec![CellValue::Null],
            vec![CellValue::from("")],
            vec![CellValue::Int(2)],
        ]);

        assert_eq!(summable_columns(&rows, 1), vec![true]);
    }

    #[test]
    fn test_short_rows_treated_as_absent() {
        let rows = rows(vec![
            vec![CellValue::Int(1), CellValue::Int(2)],
            vec![CellValue::Int(3)],
        ]);

        assert_eq!(summable_columns(&rows, 2), vec![true, true]);
    }

    #[test]
    fn test_all_empty_column_is_summable() {
        let rows = rows(vec![vec![CellValue::Null], vec![CellValue::Null]]);
        assert_eq!(summable_columns(&rows, 1), vec![true]);
    }

    #[test]
    fn test_no_rows() {
        assert_eq!(summable_columns(&[], 3), vec![true, true, true]);
    }

    #[test]
    fn test_text_beyond_sample_window_is_not_seen() {
        // Numeric through the 20-row window, text at row 21. The
        // sampling heuristic classifies it summable on purpose.
        let mut data: Vec<Vec<CellValue>> = (0..SAMPLE_ROWS)
            .map(|i| vec![CellValue::Int(i as i64)])
            .collect();
        data.push(vec![CellValue::from("not a number")]);

        assert_eq!(summable_columns(&data, 1), vec![true]);
    }

    #[test]
    fn test_text_inside_sample_window_disqualifies() {
        let mut data: Vec<Vec<CellValue>> =
            (0..10).map(|i| vec![CellValue::Int(i)]).collect();
        data.push(vec![CellValue::from("not a number")]);

        assert_eq!(summable_columns(&data, 1), vec![false]);
    }
}
