use crate::utils::{max, mean, median, min, round_to};
use log::trace;
use serde_json::Value;

/// Raw radar cells are hundredths of a millimetre per 5 minutes.
const HUNDREDTHS_PER_MM: f64 = 100.0;

/// A precipitation grid in millimetres. Rows may be ragged; cells that could not
/// be read are `None` and contribute nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadarGrid {
    rows: Vec<Vec<Option<f64>>>,
}

/// Reduced statistics of one grid, in millimetres, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RadarStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl RadarGrid {
    /// Reads a JSON grid of hundredths of a millimetre, skipping non-array rows and
    /// non-numeric cells.
    pub fn from_json(value: &Value) -> Self {
        let Some(rows) = value.as_array() else {
            trace!("Radar grid is not an array, treating it as empty");
            return Self::default();
        };
        let rows = rows
            .iter()
            .enumerate()
            .filter_map(|(r, row)| match row.as_array() {
                Some(cells) => Some(
                    cells
                        .iter()
                        .enumerate()
                        .map(|(c, cell)| {
                            let mm = cell.as_f64().map(|v| v / HUNDREDTHS_PER_MM);
                            if mm.is_none() {
                                trace!("Skipping malformed radar cell at row {r}, column {c}");
                            }
                            mm
                        })
                        .collect(),
                ),
                None => {
                    trace!("Skipping malformed radar row {r}");
                    None
                }
            })
            .collect();
        Self { rows }
    }

    pub fn from_hundredths(rows: &[Vec<i64>]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|&v| Some(v as f64 / HUNDREDTHS_PER_MM))
                        .collect()
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    /// All readable cells, row by row.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().flat_map(|row| row.iter().flatten().copied())
    }

    pub fn has_cells(&self) -> bool {
        self.values().next().is_some()
    }

    /// Flattened avg/min/max/median; all 0 for a grid without readable cells.
    pub fn stats(&self) -> RadarStats {
        let values: Vec<f64> = self.values().collect();
        RadarStats {
            avg: round_to(mean(&values).unwrap_or(0.0), 2),
            min: round_to(min(&values).unwrap_or(0.0), 2),
            max: round_to(max(&values).unwrap_or(0.0), 2),
            median: round_to(median(&values).unwrap_or(0.0), 2),
        }
    }
}

/// Largest cell of the elementwise sum of `grids`, rounded to 2 decimals.
///
/// Only positions readable in at least one grid take part.
pub fn cumulative_max<'a, I>(grids: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a RadarGrid>,
{
    let mut sums: Vec<Vec<Option<f64>>> = Vec::new();
    for grid in grids {
        for (r, row) in grid.rows().iter().enumerate() {
            if sums.len() <= r {
                sums.resize_with(r + 1, Vec::new);
            }
            let acc = &mut sums[r];
            if acc.len() < row.len() {
                acc.resize(row.len(), None);
            }
            for (slot, cell) in acc.iter_mut().zip(row) {
                if let Some(v) = cell {
                    *slot = Some(slot.unwrap_or(0.0) + v);
                }
            }
        }
    }
    let cells: Vec<f64> = sums.into_iter().flatten().flatten().collect();
    max(&cells).map(|m| round_to(m, 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_in_millimetres() {
        let grid = RadarGrid::from_hundredths(&[vec![0, 10, 20], vec![40, 6, 0]]);
        let stats = grid.stats();
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 0.4);
        assert_eq!(stats.median, 0.08);
        assert_eq!(stats.avg, 0.13);
    }

    #[test]
    fn test_avg_matches_sum_over_count() {
        let raw = vec![vec![3, 7, 11, 13], vec![17, 19, 23, 29], vec![31, 37, 41, 43]];
        let grid = RadarGrid::from_hundredths(&raw);
        let values: Vec<f64> = grid.values().collect();
        let expected = values.iter().sum::<f64>() / values.len() as f64;
        let unrounded = mean(&values).unwrap();
        assert!((unrounded - expected).abs() < 1e-9);
        let flat_hundredths: i64 = raw.iter().flatten().sum();
        assert!((unrounded - flat_hundredths as f64 / 100.0 / 12.0).abs() < 1e-9);
        assert_eq!(grid.stats().avg, round_to(expected, 2));
    }

    #[test]
    fn test_empty_grid_stats_are_zero() {
        assert_eq!(RadarGrid::default().stats(), RadarStats::default());
        assert!(!RadarGrid::from_json(&json!([])).has_cells());
    }

    #[test]
    fn test_malformed_rows_and_cells_are_skipped() {
        let grid = RadarGrid::from_json(&json!([[10, "x", 30], "not a row", [null, 50]]));
        assert_eq!(grid.rows().len(), 2);
        let values: Vec<f64> = grid.values().collect();
        assert_eq!(values, vec![0.1, 0.3, 0.5]);
        assert_eq!(grid.stats().max, 0.5);
        assert_eq!(RadarGrid::from_json(&json!({"a": 1})), RadarGrid::default());
    }

    #[test]
    fn test_cumulative_max_sums_over_time() {
        let grids = [
            RadarGrid::from_hundredths(&[vec![20, 10]]),
            RadarGrid::from_hundredths(&[vec![10, 40]]),
            RadarGrid::from_hundredths(&[vec![5, 5]]),
        ];
        assert_eq!(cumulative_max(&grids), Some(0.55));
        assert_eq!(cumulative_max(&grids[..1]), Some(0.2));
        assert_eq!(cumulative_max(&grids[..0]), None);
    }

    #[test]
    fn test_cumulative_max_with_ragged_grids() {
        let grids = [
            RadarGrid::from_hundredths(&[vec![20]]),
            RadarGrid::from_hundredths(&[vec![10, 70], vec![30]]),
        ];
        assert_eq!(cumulative_max(&grids), Some(0.7));
        assert_eq!(cumulative_max(&[RadarGrid::from_hundredths(&[vec![]])]), None);
    }
}
