//! End-to-end tests for the quick-plot operation: load a scenario CSV from a
//! scratch output directory, derive statistics, and render the figure.

use std::fs;

use greenshields::quick_plot;
use tempfile::TempDir;

fn write_scenario(dir: &TempDir, name: &str, body: &str) {
    fs::write(dir.path().join(format!("{name}.csv")), body).unwrap();
}

#[test]
fn renders_plot_and_reports_capacity() {
    let dir = TempDir::new().unwrap();
    write_scenario(
        &dir,
        "rush_hour",
        "k,v,q\n\
         0,100,0\n\
         50,75,3750\n\
         100,50,5000\n\
         150,25,3750\n\
         200,0,0\n",
    );

    let result = quick_plot(dir.path(), "rush_hour").unwrap();

    assert_eq!(result.stats.q_max, 5000.0);
    assert_eq!(result.stats.k_opt, 100.0);
    assert_eq!(result.stats.v_free, 100.0);
    assert_eq!(result.stats.k_jam, 200.0);
    assert_eq!(result.stats.points, 5);

    let png = dir.path().join("rush_hour_plot.png");
    assert_eq!(result.png_path, png);
    assert!(png.exists());
    assert!(fs::metadata(&png).unwrap().len() > 0);

    // The file must actually be a decodable PNG, not just non-empty.
    let figure = image::open(&png).unwrap();
    assert!(figure.width() > 0 && figure.height() > 0);
}

#[test]
fn jam_density_falls_back_to_max_density() {
    let dir = TempDir::new().unwrap();
    // No row is jammed (all speeds well above the threshold).
    write_scenario(
        &dir,
        "light_traffic",
        "k,v,q\n0,90,0\n20,80,1600\n40,70,2800\n",
    );

    let result = quick_plot(dir.path(), "light_traffic").unwrap();
    assert_eq!(result.stats.k_jam, 40.0);
}

#[test]
fn missing_scenario_is_a_failure() {
    let dir = TempDir::new().unwrap();
    let err = quick_plot(dir.path(), "nonexistent").unwrap_err();
    assert!(err.to_string().contains("not found"), "{err:#}");
}

#[test]
fn unparseable_file_is_a_failure() {
    let dir = TempDir::new().unwrap();
    write_scenario(&dir, "garbage", "this is not\na csv table at all\n");
    assert!(quick_plot(dir.path(), "garbage").is_err());
}

#[test]
fn header_only_file_is_a_failure() {
    let dir = TempDir::new().unwrap();
    write_scenario(&dir, "empty", "k,v,q\n");
    assert!(quick_plot(dir.path(), "empty").is_err());
}
