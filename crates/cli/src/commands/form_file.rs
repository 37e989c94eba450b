//! Reading and writing brief files.

use sitebrief_core::{AppError, AppResult};
use sitebrief_prompt::FormState;
use std::path::Path;

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a brief. A missing file yields the default brief.
pub fn load_form(path: &Path) -> AppResult<FormState> {
    if !path.exists() {
        tracing::debug!("Brief {:?} not found, using defaults", path);
        return Ok(FormState::default());
    }

    let contents = std::fs::read_to_string(path)?;
    let parsed = if is_json(path) {
        serde_json::from_str(&contents).map_err(AppError::from)
    } else {
        serde_yaml::from_str(&contents).map_err(AppError::from)
    };

    parsed.map_err(|e| AppError::Config(format!("Failed to parse brief {:?}: {}", path, e)))
}

/// Save a brief in the format its extension names.
pub fn save_form(path: &Path, form: &FormState) -> AppResult<()> {
    let contents = if is_json(path) {
        serde_json::to_string_pretty(form)?
    } else {
        serde_yaml::to_string(form)?
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    tracing::info!("Saved brief to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitebrief_prompt::ColorScheme;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let form = load_form(&temp_dir.path().join("missing.yaml")).unwrap();
        assert_eq!(form, FormState::default());
    }

    #[test]
    fn test_yaml_and_json_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut form = FormState {
            project_name: "Café Aurora".to_string(),
            ..FormState::default()
        };
        form.colors = Some(ColorScheme::new("#112233", "#445566"));

        for name in ["brief.yaml", "nested/brief.json"] {
            let path = temp_dir.path().join(name);
            save_form(&path, &form).unwrap();
            assert_eq!(load_form(&path).unwrap(), form);
        }

        let json = std::fs::read_to_string(temp_dir.path().join("nested/brief.json")).unwrap();
        assert!(json.contains("\"projectName\": \"Café Aurora\""));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("brief.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_form(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
