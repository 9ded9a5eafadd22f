//! Effective configuration: built-in defaults merged with `<project>/ci.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::core::defaults::{CONFIG_FILE_NAME, default_tree};
use crate::core::merge::merge;
use crate::core::value::ConfigTree;
use crate::error::RunError;

/// Load the effective configuration for the project rooted at `root`.
///
/// If `ci.json` is missing, returns the default tree unchanged.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn load_config(root: &Path) -> Result<ConfigTree, RunError> {
    match read_override(root)? {
        Some(overlay) => {
            info!(file = CONFIG_FILE_NAME, "merging configuration override");
            Ok(merge(default_tree(), overlay))
        }
        None => {
            debug!(file = CONFIG_FILE_NAME, "no override found, using defaults");
            Ok(default_tree())
        }
    }
}

/// Read and parse `ci.json` if it exists.
pub fn read_override(root: &Path) -> Result<Option<ConfigTree>, RunError> {
    let path = root.join(CONFIG_FILE_NAME);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(RunError::ConfigRead { path, source }),
    };
    let overlay =
        serde_json::from_str(&contents).map_err(|source| RunError::ConfigParse { path, source })?;
    Ok(Some(overlay))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::ConfigValue;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(temp.path()).expect("load");
        assert_eq!(cfg, default_tree());
    }

    #[test]
    fn load_merges_override_onto_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{"inspections": {"phpcs": {"enabled": false}}, "extra": "kept"}"#,
        )
        .expect("write ci.json");

        let cfg = load_config(temp.path()).expect("load");
        assert_eq!(
            cfg.get_path("inspections.phpcs.enabled"),
            Some(&ConfigValue::Bool(false))
        );
        assert_eq!(
            cfg.get_path("inspections.phpcs.path"),
            Some(&ConfigValue::from("phpcs"))
        );
        assert_eq!(cfg.get("extra"), Some(&ConfigValue::from("kept")));
    }

    #[test]
    fn malformed_override_is_a_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join(CONFIG_FILE_NAME), "{ not json").expect("write ci.json");

        let err = load_config(temp.path()).unwrap_err();
        assert!(matches!(err, RunError::ConfigParse { .. }));
    }

    #[test]
    fn non_object_root_is_a_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join(CONFIG_FILE_NAME), r#"["phpmd"]"#).expect("write ci.json");

        let err = load_config(temp.path()).unwrap_err();
        assert!(matches!(err, RunError::ConfigParse { .. }));
    }

    #[test]
    fn directory_named_like_the_override_is_a_read_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(temp.path().join(CONFIG_FILE_NAME)).expect("mkdir");

        let err = load_config(temp.path()).unwrap_err();
        assert!(matches!(err, RunError::ConfigRead { .. }));
    }
}
