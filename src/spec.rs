//! Spec loading: format classification and YAML→JSON normalization.

use std::path::Path;

use crate::error::Result;

/// Format of a spec file, decided by its extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
    /// Anything else. Treated as passthrough JSON, no validation.
    Unknown,
}

impl SpecFormat {
    /// Classify a path by extension. The check is case-sensitive:
    /// `spec.YAML` is `Unknown`, not `Yaml`.
    pub fn classify(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => SpecFormat::Yaml,
            Some("json") => SpecFormat::Json,
            _ => SpecFormat::Unknown,
        }
    }
}

/// Read the spec file and return it as JSON text.
///
/// YAML files are parsed and re-encoded as JSON; JSON and unknown
/// extensions are returned verbatim. Called fresh on every `/spec.json`
/// request so the response always reflects the file on disk.
pub fn load_spec(path: &Path) -> Result<String> {
    match SpecFormat::classify(path) {
        SpecFormat::Yaml => {
            let text = std::fs::read_to_string(path)?;
            let value: serde_yaml::Value = serde_yaml::from_str(&text)?;
            Ok(serde_json::to_string(&value)?)
        }
        SpecFormat::Json | SpecFormat::Unknown => Ok(std::fs::read_to_string(path)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn classify_by_extension() {
        assert_eq!(SpecFormat::classify(Path::new("api.yaml")), SpecFormat::Yaml);
        assert_eq!(SpecFormat::classify(Path::new("api.yml")), SpecFormat::Yaml);
        assert_eq!(SpecFormat::classify(Path::new("api.json")), SpecFormat::Json);
        assert_eq!(SpecFormat::classify(Path::new("api.txt")), SpecFormat::Unknown);
        assert_eq!(SpecFormat::classify(Path::new("api")), SpecFormat::Unknown);
    }

    #[test]
    fn classify_is_case_sensitive() {
        assert_eq!(SpecFormat::classify(Path::new("api.YAML")), SpecFormat::Unknown);
        assert_eq!(SpecFormat::classify(Path::new("api.Yml")), SpecFormat::Unknown);
    }

    #[test]
    fn yaml_is_reencoded_as_json() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("spec.yaml");
        std::fs::write(&path, "openapi: \"3.0.0\"\n").unwrap();

        let json = load_spec(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({"openapi": "3.0.0"}));
    }

    #[test]
    fn json_passes_through_verbatim() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("spec.json");
        // Formatting quirks must survive untouched: the file is not re-parsed.
        let raw = "{ \"openapi\":   \"3.0.0\" }\n";
        std::fs::write(&path, raw).unwrap();

        assert_eq!(load_spec(&path).unwrap(), raw);
    }

    #[test]
    fn unknown_extension_passes_through() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("spec.txt");
        std::fs::write(&path, "not even json").unwrap();

        assert_eq!(load_spec(&path).unwrap(), "not even json");
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = PathBuf::from("/definitely/not/here.yaml");
        assert!(load_spec(&path).is_err());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("spec.yaml");
        std::fs::write(&path, "foo: [unclosed\n").unwrap();

        assert!(load_spec(&path).is_err());
    }
}
