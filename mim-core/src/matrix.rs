//! Densification of sparse grouped-count observations into the chart matrix.

use crate::months::MONTHS;
use crate::observation::Observation;
use serde::{Deserialize, Serialize};

/// One cell of the dense month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub row: usize,
    pub col: usize,
    pub value: u64,
}

/// Grid cell singled out for emphasis by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellHighlight {
    pub row: usize,
    pub col: usize,
}

/// Densify sparse observations into exactly one cell per canonical month.
///
/// Row `i` corresponds to `MONTHS[i]`; months with no matching observation
/// get a zero cell so the chart can draw a full 12-row column instead of
/// leaving holes. Month matching is case-sensitive and exact; labels outside
/// the canonical set contribute nothing. The first observation for a month
/// wins and later duplicates are ignored.
pub fn build_matrix(observations: &[Observation], col: usize) -> Vec<MatrixCell> {
    MONTHS
        .iter()
        .enumerate()
        .map(|(row, month)| {
            let value = observations
                .iter()
                .find(|observation| observation.month == *month)
                .map(|observation| observation.value)
                .unwrap_or(0);
            MatrixCell { row, col, value }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::months::MONTH_COUNT;

    fn obs(month: &str, value: u64) -> Observation {
        Observation {
            month: month.to_string(),
            value,
        }
    }

    #[test]
    fn test_sparse_observations_densify() {
        let cells = build_matrix(&[obs("January", 5), obs("March", 2)], 0);
        assert_eq!(cells.len(), MONTH_COUNT);
        assert_eq!(
            cells[0],
            MatrixCell {
                row: 0,
                col: 0,
                value: 5
            }
        );
        assert_eq!(
            cells[2],
            MatrixCell {
                row: 2,
                col: 0,
                value: 2
            }
        );
        for cell in cells.iter().filter(|c| c.row != 0 && c.row != 2) {
            assert_eq!(cell.value, 0);
        }
    }

    #[test]
    fn test_empty_input_yields_zero_column() {
        let cells = build_matrix(&[], 3);
        assert_eq!(cells.len(), MONTH_COUNT);
        for (row, cell) in cells.iter().enumerate() {
            assert_eq!(cell.row, row);
            assert_eq!(cell.col, 3);
            assert_eq!(cell.value, 0);
        }
    }

    #[test]
    fn test_full_year_input() {
        let observations: Vec<Observation> = MONTHS
            .iter()
            .enumerate()
            .map(|(i, month)| obs(month, i as u64 + 1))
            .collect();
        let cells = build_matrix(&observations, 0);
        assert_eq!(cells.len(), MONTH_COUNT);
        for (row, cell) in cells.iter().enumerate() {
            assert_eq!(cell.value, row as u64 + 1);
        }
    }

    #[test]
    fn test_duplicate_month_takes_first() {
        let cells = build_matrix(&[obs("June", 9), obs("June", 4)], 0);
        assert_eq!(cells[5].value, 9);
    }

    #[test]
    fn test_unknown_label_ignored() {
        let cells = build_matrix(&[obs("Thermidor", 8), obs("february", 3)], 0);
        assert_eq!(cells.len(), MONTH_COUNT);
        assert!(cells.iter().all(|cell| cell.value == 0));
    }
}
