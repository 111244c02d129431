//! JSON export of the current history.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use probwatch_core::SeriesBuffer;

use super::stats::SeriesStats;

/// Build the export document: a summary plus every observation, newest first.
pub fn export_value(buffer: &SeriesBuffer) -> serde_json::Value {
    let stats = SeriesStats::from_observations(buffer.iter());
    let observations: Vec<&probwatch_core::Observation> = buffer.iter().collect();

    serde_json::json!({
        "summary": stats,
        "capacity": buffer.capacity(),
        "observations": observations,
    })
}

/// Write the export document to `path` as pretty-printed JSON.
pub fn export_series(buffer: &SeriesBuffer, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&export_value(buffer))?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use probwatch_core::Observation;
    use tempfile::tempdir;

    fn buffer() -> SeriesBuffer {
        let mut buffer = SeriesBuffer::new(5).unwrap();
        for (i, v) in [20.0, 50.0, 80.0].into_iter().enumerate() {
            let ts = Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap();
            buffer.push(Observation::new(ts, v));
        }
        buffer
    }

    #[test]
    fn export_lists_newest_first_with_summary() {
        let value = export_value(&buffer());

        assert_eq!(value["summary"]["count"], 3);
        assert_eq!(value["summary"]["bad"], 1);
        assert_eq!(value["capacity"], 5);
        let obs = value["observations"].as_array().unwrap();
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0]["value"], 80.0);
        assert_eq!(obs[0]["status"], "bad");
        assert_eq!(obs[2]["status"], "good");
    }

    #[test]
    fn export_writes_parseable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("series.json");

        export_series(&buffer(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        let observations: Vec<Observation> =
            serde_json::from_value(parsed["observations"].clone()).unwrap();
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].value(), 80.0);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let result = export_series(&buffer(), Path::new("/nonexistent/dir/series.json"));
        assert!(result.is_err());
    }
}
