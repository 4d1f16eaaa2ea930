//! Configuration from the application's instance folder.
//!
//! Responsibilities:
//! - Read `<instance_path>/<app name>.cfg` if it exists.
//! - Parse it as literal assignments and copy the upper-case names.
//!
//! Does NOT handle:
//! - Creating the instance folder or the file.
//!
//! Invariants:
//! - A missing file (or missing folder) is not an error.
//! - Any statement that is not a literal assignment aborts loading.

use std::io::ErrorKind;
use std::path::PathBuf;

use super::error::ConfigError;
use crate::literal::parse_assignments;
use crate::types::{App, is_config_key};

/// Apply the instance-folder configuration file of `app`.
///
/// Returns the path that was read, or `None` if there was no file.
pub fn load_instance_folder(app: &mut App) -> Result<Option<PathBuf>, ConfigError> {
    let path = app.instance_config_file();

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) if is_absent(e.kind()) => {
            tracing::debug!(path = %path.display(), "no instance config file");
            return Ok(None);
        }
        Err(source) => return Err(ConfigError::InstanceFileRead { path, source }),
    };

    let assignments = parse_assignments(&source).map_err(|e| ConfigError::InstanceFileParse {
        path: path.clone(),
        line: e.line,
        column: e.column,
        message: e.message,
    })?;

    let mut written = 0;
    for (name, value) in assignments {
        if is_config_key(&name) {
            app.config.insert(name, value);
            written += 1;
        }
    }
    tracing::debug!(path = %path.display(), keys = written, "applied instance config file");
    Ok(Some(path))
}

fn is_absent(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::NotFound | ErrorKind::NotADirectory | ErrorKind::IsADirectory
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_folder() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("testapp.cfg"), "TESTVAR = True\n").unwrap();

        let mut app = App::new("testapp").with_instance_path(temp_dir.path());
        assert!(app.config.get("TESTVAR").is_none());

        let read = load_instance_folder(&mut app).unwrap();
        assert_eq!(read, Some(temp_dir.path().join("testapp.cfg")));
        assert_eq!(app.config.get("TESTVAR"), Some(&json!(true)));
    }

    #[test]
    fn test_only_upper_case_names_imported() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("myapp.cfg"),
            "EXAMPLE = 'instance folder'\nhelper = 1\n_PRIVATE = 2\n",
        )
        .unwrap();

        let mut app = App::new("myapp").with_instance_path(temp_dir.path());
        load_instance_folder(&mut app).unwrap();

        assert_eq!(app.config.len(), 1);
        assert_eq!(app.config.get("EXAMPLE"), Some(&json!("instance folder")));
    }

    #[test]
    fn test_missing_file_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = App::new("testapp").with_instance_path(temp_dir.path());
        assert_eq!(load_instance_folder(&mut app).unwrap(), None);
        assert!(app.config.is_empty());

        let mut app = App::new("testapp").with_instance_path(temp_dir.path().join("missing"));
        assert_eq!(load_instance_folder(&mut app).unwrap(), None);
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("testapp.cfg"),
            "GOOD = 1\nBAD = open('/etc/passwd').read()\n",
        )
        .unwrap();

        let mut app = App::new("testapp").with_instance_path(temp_dir.path());
        let err = load_instance_folder(&mut app).unwrap_err();
        match err {
            ConfigError::InstanceFileParse { path, line, .. } => {
                assert_eq!(path, temp_dir.path().join("testapp.cfg"));
                assert_eq!(line, 2);
            }
            other => panic!("expected InstanceFileParse, got {other}"),
        }
        assert!(app.config.is_empty(), "nothing is applied from a malformed file");
    }
}
