use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FlowRecord – one row of the measurement table
// ---------------------------------------------------------------------------

/// A single traffic-flow measurement (one CSV row).
///
/// Field names match the CSV header, so `csv` + serde map columns by name
/// regardless of their order in the file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    /// Density (veh/km).
    pub k: f64,
    /// Speed (km/h).
    pub v: f64,
    /// Flow (veh/h).
    pub q: f64,
}

// ---------------------------------------------------------------------------
// FlowDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Rows are positionally correlated: row `i` is one
/// measurement of all three quantities. Read-only after loading.
#[derive(Debug, Clone, Default)]
pub struct FlowDataset {
    pub records: Vec<FlowRecord>,
}

impl FlowDataset {
    pub fn from_records(records: Vec<FlowRecord>) -> Self {
        FlowDataset { records }
    }

    /// Number of measurements.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Density column, in row order.
    pub fn densities(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.k)
    }

    /// Speed column, in row order.
    pub fn speeds(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.v)
    }

    /// Flow column, in row order.
    pub fn flows(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.q)
    }

    /// Largest density value, NaN entries skipped; 0.0 for an empty dataset.
    pub fn k_max(&self) -> f64 {
        self.densities().fold(0.0, f64::max)
    }
}
