//! JSON export of simulator snapshots.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::sim::SimulatorSnapshot;

/// Build the export document: a status summary followed by every gauge.
pub fn build_export(snapshot: &SimulatorSnapshot) -> serde_json::Value {
    let (success, warning, danger) = snapshot.status_counts();

    let mut export = serde_json::Map::new();

    let mut summary = serde_json::Map::new();
    summary.insert("tick".to_string(), serde_json::json!(snapshot.tick));
    summary.insert("total_gauges".to_string(), serde_json::json!(snapshot.gauges.len()));
    summary.insert("success".to_string(), serde_json::json!(success));
    summary.insert("warning".to_string(), serde_json::json!(warning));
    summary.insert("danger".to_string(), serde_json::json!(danger));
    summary.insert("overall".to_string(), serde_json::json!(snapshot.overall_status()));
    summary.insert("thresholds".to_string(), serde_json::json!(snapshot.thresholds));
    export.insert("summary".to_string(), serde_json::Value::Object(summary));

    let gauges: Vec<serde_json::Value> = snapshot
        .gauges
        .iter()
        .map(|g| {
            serde_json::json!({
                "name": g.name,
                "value": g.value,
                "display": g.display_value(),
                "status": g.status,
                "trend_bias": g.trend_bias,
                "range": [g.min_value, g.max_value],
                "history": g.history,
            })
        })
        .collect();
    export.insert("gauges".to_string(), serde_json::Value::Array(gauges));

    serde_json::Value::Object(export)
}

/// Write the export document for `snapshot` to `path` as pretty JSON.
pub fn write_snapshot(snapshot: &SimulatorSnapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&build_export(snapshot))?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(json.as_bytes())?;

    info!(path = %path.display(), gauges = snapshot.gauges.len(), "Exported snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GaugeConfig, MetricsSimulator};

    #[test]
    fn export_contains_summary_and_gauges() {
        let mut sim = MetricsSimulator::seeded(17);
        sim.initialize(GaugeConfig::defaults()).unwrap();
        sim.step().unwrap();
        let snapshot = sim.current_snapshot().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        write_snapshot(&snapshot, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(written["summary"]["tick"], 1);
        assert_eq!(written["summary"]["total_gauges"], 4);
        let counts = ["success", "warning", "danger"]
            .iter()
            .map(|k| written["summary"][k].as_u64().unwrap())
            .sum::<u64>();
        assert_eq!(counts, 4);

        let gauges = written["gauges"].as_array().unwrap();
        assert_eq!(gauges[0]["name"], "cpu");
        assert_eq!(gauges[0]["history"].as_array().unwrap().len(), 20);
        assert_eq!(gauges[3]["trend_bias"], "down");
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let snapshot = SimulatorSnapshot::default();
        let result = write_snapshot(&snapshot, Path::new("/nonexistent/dir/out.json"));
        assert!(result.is_err());
    }
}
