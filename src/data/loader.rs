use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{FlowDataset, FlowRecord};

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a traffic-flow table from a CSV file.
///
/// Expected layout: a header row naming at least the columns `k`, `v`, `q`,
/// followed by numeric rows. Column order does not matter and extra columns
/// are ignored.
pub fn load_csv(path: &Path) -> Result<FlowDataset> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for col in ["k", "v", "q"] {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<FlowRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(FlowDataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_well_formed_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "ok.csv", "k,v,q\n0,100,0\n5,97.5,487.5\n");

        let ds = load_csv(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1], FlowRecord { k: 5.0, v: 97.5, q: 487.5 });
    }

    #[test]
    fn column_order_does_not_matter() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "shuffled.csv", "q,k,v\n100,2,50\n");

        let ds = load_csv(&path).unwrap();
        assert_eq!(ds.records[0], FlowRecord { k: 2.0, v: 50.0, q: 100.0 });
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "partial.csv", "k,v\n0,100\n");

        let err = load_csv(&path).unwrap_err();
        assert!(err.to_string().contains("missing 'q'"), "{err:#}");
    }

    #[test]
    fn non_numeric_cell_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "bad.csv", "k,v,q\n0,oops,0\n");

        let err = load_csv(&path).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"), "{err:#}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_csv(&dir.path().join("nope.csv")).is_err());
    }
}
