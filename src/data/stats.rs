use anyhow::{Result, bail};

use super::model::FlowDataset;

/// Speed at or below which a measurement counts as jammed (km/h).
pub const JAM_SPEED_THRESHOLD: f64 = 0.1;

// ---------------------------------------------------------------------------
// FlowStats – derived summary of a dataset
// ---------------------------------------------------------------------------

/// The scalar summary derived from a [`FlowDataset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowStats {
    /// Maximum observed flow (veh/h) – the capacity estimate.
    pub q_max: f64,
    /// Density at the row of maximum flow (veh/km).
    pub k_opt: f64,
    /// First speed value, taken as the free-flow speed estimate (km/h).
    pub v_free: f64,
    /// Minimum density among jammed rows (`v` ≤ [`JAM_SPEED_THRESHOLD`]),
    /// falling back to the maximum density when no row is jammed (veh/km).
    pub k_jam: f64,
    /// Number of measurements.
    pub points: usize,
}

impl FlowStats {
    /// Compute the summary. Errors on an empty dataset: there is no row to
    /// take the maximum of.
    pub fn compute(dataset: &FlowDataset) -> Result<FlowStats> {
        if dataset.is_empty() {
            bail!("dataset contains no measurements");
        }

        // First row with the maximal flow; NaN values never win a comparison.
        let mut q_max = f64::NEG_INFINITY;
        let mut k_opt = dataset.records[0].k;
        for r in &dataset.records {
            if r.q > q_max {
                q_max = r.q;
                k_opt = r.k;
            }
        }
        if !q_max.is_finite() {
            bail!("flow column contains no finite values");
        }

        let v_free = dataset.records[0].v;

        let k_jam = dataset
            .records
            .iter()
            .filter(|r| r.v <= JAM_SPEED_THRESHOLD)
            .map(|r| r.k)
            .fold(f64::INFINITY, f64::min);
        let k_jam = if k_jam.is_finite() {
            k_jam
        } else {
            dataset.k_max()
        };

        Ok(FlowStats {
            q_max,
            k_opt,
            v_free,
            k_jam,
            points: dataset.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FlowRecord;

    fn dataset(rows: &[(f64, f64, f64)]) -> FlowDataset {
        FlowDataset::from_records(
            rows.iter()
                .map(|&(k, v, q)| FlowRecord { k, v, q })
                .collect(),
        )
    }

    #[test]
    fn capacity_is_the_column_maximum() {
        let ds = dataset(&[(0.0, 100.0, 0.0), (50.0, 75.0, 3750.0), (100.0, 50.0, 5000.0), (150.0, 25.0, 3750.0)]);
        let stats = FlowStats::compute(&ds).unwrap();
        assert_eq!(stats.q_max, 5000.0);
        assert_eq!(stats.k_opt, 100.0);
        assert_eq!(stats.points, 4);
    }

    #[test]
    fn tied_maximum_reports_the_first_row() {
        let ds = dataset(&[(10.0, 50.0, 500.0), (20.0, 25.0, 500.0)]);
        let stats = FlowStats::compute(&ds).unwrap();
        assert_eq!(stats.k_opt, 10.0);
    }

    #[test]
    fn free_flow_speed_is_the_first_speed() {
        let ds = dataset(&[(0.0, 88.0, 0.0), (10.0, 80.0, 800.0)]);
        assert_eq!(FlowStats::compute(&ds).unwrap().v_free, 88.0);
    }

    #[test]
    fn jam_density_is_min_density_of_jammed_rows() {
        let ds = dataset(&[
            (0.0, 100.0, 0.0),
            (180.0, 0.05, 9.0),
            (200.0, 0.0, 0.0),
        ]);
        assert_eq!(FlowStats::compute(&ds).unwrap().k_jam, 180.0);
    }

    #[test]
    fn jam_density_falls_back_to_max_density() {
        let ds = dataset(&[(0.0, 100.0, 0.0), (40.0, 60.0, 2400.0), (90.0, 20.0, 1800.0)]);
        assert_eq!(FlowStats::compute(&ds).unwrap().k_jam, 90.0);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        assert!(FlowStats::compute(&FlowDataset::default()).is_err());
    }
}
