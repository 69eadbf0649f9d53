//! Append-only JSONL apply log, one log per project.

use crate::core::types::{ProvenanceEvent, TimestampedEvent};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Generate an ISO 8601 timestamp without a timezone dependency.
pub fn now_iso8601() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let dur = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let (year, month, day) = civil_from_days((secs / 86400) as i64);
    let time_secs = secs % 86400;
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        day,
        time_secs / 3600,
        (time_secs % 3600) / 60,
        time_secs % 60
    )
}

/// Days since 1970-01-01 to (year, month, day), proleptic Gregorian.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month as u32, day as u32)
}

/// Generate a run ID.
pub fn generate_run_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("run-{:012x}", nanos & 0xFFFF_FFFF_FFFF)
}

/// Derive the event log path for a project.
pub fn event_log_path(state_dir: &Path, project: &str) -> PathBuf {
    state_dir.join(project).join("events.jsonl")
}

/// Append an event to the project's apply log.
pub fn append_event(state_dir: &Path, project: &str, event: ProvenanceEvent) -> Result<(), String> {
    let path = event_log_path(state_dir, project);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("cannot create state dir: {}", e))?;
    }

    let te = TimestampedEvent {
        ts: now_iso8601(),
        event,
    };
    let json = serde_json::to_string(&te).map_err(|e| format!("JSON serialize error: {}", e))?;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("cannot open event log {}: {}", path.display(), e))?;

    writeln!(file, "{}", json).map_err(|e| format!("write error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_iso8601_shape() {
        let ts = now_iso8601();
        assert!(ts.starts_with("20"));
        assert!(ts.contains('T'));
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), 20);
    }

    #[test]
    fn test_civil_from_days() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(365), (1971, 1, 1));
        assert_eq!(civil_from_days(11016), (2000, 2, 29)); // leap day
        assert_eq!(civil_from_days(19723), (2024, 1, 1));
        assert_eq!(civil_from_days(47541), (2100, 3, 1)); // 2100 is not a leap year
    }

    #[test]
    fn test_generate_run_id() {
        let id = generate_run_id();
        assert!(id.starts_with("run-"));
        assert!(id.len() > 6);
    }

    #[test]
    fn test_event_log_path() {
        let p = event_log_path(Path::new("/state"), "billing-api");
        assert_eq!(p, PathBuf::from("/state/billing-api/events.jsonl"));
    }

    #[test]
    fn test_append_event() {
        let dir = tempfile::tempdir().unwrap();
        let event = ProvenanceEvent::ApplyStarted {
            project: "billing-api".to_string(),
            recipe: "backend-service".to_string(),
            run_id: "run-abc".to_string(),
            receta_version: "0.3.0".to_string(),
        };
        append_event(dir.path(), "billing-api", event).unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("billing-api/events.jsonl")).unwrap();
        assert!(content.contains("apply_started"));
        assert!(content.contains("run-abc"));
    }

    #[test]
    fn test_append_multiple_events() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..3 {
            let event = ProvenanceEvent::ApplyCompleted {
                project: "api".to_string(),
                recipe: "backend-service".to_string(),
                run_id: format!("run-{}", i),
                actions_declared: 13,
                fingerprint: "blake3:xxx".to_string(),
            };
            append_event(dir.path(), "api", event).unwrap();
        }
        let content = std::fs::read_to_string(dir.path().join("api/events.jsonl")).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_append_rejection_event() {
        let dir = tempfile::tempdir().unwrap();
        let event = ProvenanceEvent::ActionRejected {
            project: "api".to_string(),
            recipe: "backend-service".to_string(),
            index: 1,
            action: "enable plugin 'org.springframework.boot'".to_string(),
            cause: "unknown plugin id".to_string(),
        };
        append_event(dir.path(), "api", event).unwrap();
        let content = std::fs::read_to_string(dir.path().join("api/events.jsonl")).unwrap();
        assert!(content.contains("action_rejected"));
        assert!(content.contains("unknown plugin id"));
    }
}
