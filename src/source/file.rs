use std::path::Path;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use tracing::debug;

use super::SourceError;
use crate::model::Snapshot;

/// Read a JSON snapshot `{ "students": [...], "events": [...], "marks": [...] }`.
pub async fn load_snapshot(path: &Path) -> Result<Snapshot, SourceError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let snapshot: Snapshot =
        serde_json::from_slice(&bytes).map_err(|source| SourceError::Parse {
            origin: path.display().to_string(),
            source,
        })?;

    debug!(
        path = %path.display(),
        students = snapshot.students.len(),
        events = snapshot.events.len(),
        marks = snapshot.marks.len(),
        "Loaded snapshot file"
    );
    Ok(snapshot)
}

/// Save a snapshot to a JSON file atomically
///
/// The file is never left half-written, so a report run against it always
/// sees one consistent snapshot.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, snapshot).context("Failed to serialize snapshot")?;

    file.commit()
        .with_context(|| format!("Failed to save snapshot to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[tokio::test]
    async fn test_load_missing_file() {
        let path = env::temp_dir().join("mark_tally_test_missing_snapshot.json");
        let _ = std::fs::remove_file(&path);

        let err = load_snapshot(&path).await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.is_input());
    }

    #[tokio::test]
    async fn test_load_lenient_fields() {
        let path = env::temp_dir().join("mark_tally_test_lenient_snapshot.json");
        let json = r#"{
            "students": [{"id": 7, "name": "Ada", "index": "A-7",
                          "province": "North", "team": "a"}],
            "events": [{"id": "e1", "name": "Vault"}],
            "marks": [{"student_id": 7, "event_id": "e1",
                       "round1": {"D": 1.5, "E1": "9", "E2": 8, "E3": null}}]
        }"#;
        std::fs::write(&path, json).unwrap();

        let snapshot = load_snapshot(&path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(snapshot.students[0].id, "7");
        assert_eq!(snapshot.students[0].region(), Some("North"));
        assert_eq!(snapshot.marks[0].student_id, "7");
        assert_eq!(snapshot.marks[0].round1.d.as_deref(), Some("1.5"));
        assert_eq!(snapshot.marks[0].round1.e2.as_deref(), Some("8"));
        assert!(snapshot.marks[0].round2.is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let path = env::temp_dir().join("mark_tally_test_roundtrip_snapshot.json");
        let _ = std::fs::remove_file(&path);

        let snapshot: Snapshot = serde_json::from_str(
            r#"{"students": [{"id": "s1", "name": "Ada"}], "events": [], "marks": []}"#,
        )
        .unwrap();
        save_snapshot(&path, &snapshot).unwrap();
        let loaded = load_snapshot(&path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.students.len(), 1);
        assert_eq!(loaded.students[0].name, "Ada");
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let path = env::temp_dir().join("mark_tally_test_invalid_snapshot.json");
        std::fs::write(&path, "{\"students\": [").unwrap();
        let err = load_snapshot(&path).await.unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, SourceError::Parse { .. }));
    }
}
