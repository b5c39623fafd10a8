use crate::core::models::Routine;
use crate::utils::SUPPORTED_ROUTINE_EXTENSIONS;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Read a single routine from a `.toml` or `.json` file.
///
/// Both formats use the stored field names:
///
/// ```toml
/// sets = 2
/// restBetweenExercises = 10
/// restBetweenSets = 15
///
/// [[exercises]]
/// name = "Push-ups"
/// duration = 30
/// ```
pub fn load_routine_file(path: &Path) -> Result<Routine> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_ROUTINE_EXTENSIONS.contains(&extension.as_str()) {
        bail!(
            "Unsupported routine file '{}' (expected one of: {})",
            path.display(),
            SUPPORTED_ROUTINE_EXTENSIONS.join(", ")
        );
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;

    parse_routine(&content, &extension)
        .with_context(|| format!("Could not load routine from {}", path.display()))
}

fn parse_routine(content: &str, extension: &str) -> Result<Routine> {
    let routine = match extension {
        "toml" => toml::from_str(content)?,
        _ => serde_json::from_str(content)?,
    };
    Ok(routine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Exercise;

    #[test]
    fn parses_toml_routine() {
        let routine = parse_routine(
            r#"
                sets = 2
                restBetweenExercises = 10
                restBetweenSets = 15

                [[exercises]]
                name = "Push-ups"
                duration = 30

                [[exercises]]
                name = "Squats"
                duration = 20
            "#,
            "toml",
        )
        .unwrap();

        assert_eq!(
            routine,
            Routine::new(
                vec![Exercise::new("Push-ups", 30), Exercise::new("Squats", 20)],
                2,
                10,
                15
            )
            .unwrap()
        );
    }

    #[test]
    fn parses_json_routine() {
        let routine =
            parse_routine(r#"{"exercises":[{"name":"Burpees","duration":40}]}"#, "json").unwrap();
        assert_eq!(routine.sets, 1);
        assert_eq!(routine.exercises[0].name, "Burpees");
    }

    #[test]
    fn invalid_toml_routine_is_rejected() {
        let err = parse_routine("sets = 3\nexercises = []\n", "toml").unwrap_err();
        assert!(format!("{:#}", err).contains("no exercises"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routine.yaml");
        fs::write(&path, "sets: 1").unwrap();
        assert!(load_routine_file(&path).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("core.TOML");
        fs::write(&path, "[[exercises]]\nname = \"Plank\"\nduration = 60\n").unwrap();
        assert_eq!(load_routine_file(&path).unwrap().exercises[0].duration, 60);
    }
}
