//! JSON spec file loading
//!
//! The core never reads files itself; this module is the configuration
//! loading stage that resolves a named spec into core value objects.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use tendril_core::{SuckerSpec, TentacleSpec};

/// On-disk spec: a tentacle plus optional sucker layout
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SpecFile {
    pub tentacle: TentacleSpec,
    pub suckers: SuckerSpec,
}

/// Load a spec file, or the default spec when no path is given
pub fn load(path: Option<&Path>) -> Result<SpecFile> {
    let Some(path) = path else {
        return Ok(SpecFile::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse spec file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_spec_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "tentacle": {{ "name": "hero", "length": 1.4 }} }}"#
        )
        .unwrap();

        let spec = load(Some(file.path())).unwrap();
        assert_eq!(spec.tentacle.name, "hero");
        assert_eq!(spec.tentacle.length, 1.4);
        // Unspecified fields come from the defaults
        assert_eq!(spec.tentacle.segments, 20);
        assert!(spec.suckers.enabled);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load(Some(Path::new("/does/not/exist.json"))).is_err());
    }
}
