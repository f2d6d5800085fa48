use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::{LogEntry, Profile, Targets};

/// Everything stored for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Targets>,

    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// On-disk layout: user id to record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    #[serde(default)]
    pub users: BTreeMap<String, UserRecord>,
}

/// Load the state file. A missing file is an empty state.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<StateFile> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "state file missing, starting empty");
        return Ok(StateFile::default());
    }

    let content = fs::read_to_string(path)?;
    let state: StateFile = serde_json::from_str(&content)?;
    Ok(state)
}

/// Save the state file as pretty JSON.
pub fn save_state<P: AsRef<Path>>(path: P, state: &StateFile) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path.as_ref(), json)?;
    debug!(path = %path.as_ref().display(), users = state.users.len(), "state saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_state(dir.path().join("nope.json")).unwrap();
        assert!(state.users.is_empty());
    }

    #[test]
    fn test_load_and_save_roundtrip() {
        let json = r#"{
            "users": {
                "local": {
                    "profile": {"age": 25, "gender": "male", "heightCm": 180, "weightKg": 75, "activityLevel": "moderate", "goal": "maintain"},
                    "logs": []
                }
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let state = load_state(file.path()).unwrap();
        let record = &state.users["local"];
        assert_eq!(record.profile.as_ref().unwrap().height_cm, 180);
        assert!(record.targets.is_none());

        let out_file = NamedTempFile::new().unwrap();
        save_state(out_file.path(), &state).unwrap();

        let reloaded = load_state(out_file.path()).unwrap();
        assert_eq!(reloaded, state);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(load_state(file.path()).is_err());
    }
}
