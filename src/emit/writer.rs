use crate::error::{BlueprintError, Result};
use crate::manifest::{ManifestEntry, JSON_CONTENT_TYPE, TEXT_CONTENT_TYPE};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Write bytes and describe exactly what landed on disk.
pub fn write_artifact_bytes(
    output_dir: &Path,
    name: &str,
    bytes: &[u8],
    content_type: &str,
) -> Result<ManifestEntry> {
    let path = output_dir.join(name);
    fs::write(&path, bytes).map_err(|source| BlueprintError::Write { path, source })?;
    Ok(ManifestEntry::for_bytes(bytes, content_type))
}

pub fn write_artifact_text(output_dir: &Path, name: &str, text: &str) -> Result<ManifestEntry> {
    write_artifact_bytes(output_dir, name, text.as_bytes(), TEXT_CONTENT_TYPE)
}

/// Pretty JSON: two-space indent, non-ASCII left as UTF-8.
pub fn render_json<T: Serialize>(name: &str, value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|source| BlueprintError::Serialize {
        name: name.to_string(),
        source,
    })
}

pub fn write_artifact_json<T: Serialize>(
    output_dir: &Path,
    name: &str,
    value: &T,
) -> Result<ManifestEntry> {
    let text = render_json(name, value)?;
    write_artifact_bytes(output_dir, name, text.as_bytes(), JSON_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_artifacts_are_pretty_and_unescaped() {
        let dir = tempfile::tempdir().expect("temp dir");
        let value = json!({"zeta": "café", "alpha": [1]});
        let entry = write_artifact_json(dir.path(), "view.json", &value).expect("write json");
        let written = fs::read_to_string(dir.path().join("view.json")).expect("read back");
        assert_eq!(written, "{\n  \"zeta\": \"café\",\n  \"alpha\": [\n    1\n  ]\n}");
        assert_eq!(entry.size_bytes, written.len() as u64);
        assert_eq!(entry.content_type, JSON_CONTENT_TYPE);
    }

    #[test]
    fn write_failure_names_the_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing_dir = dir.path().join("absent");
        let err = write_artifact_text(&missing_dir, "notes.txt", "hi").expect_err("no dir");
        assert!(err.to_string().contains("notes.txt"), "unexpected: {err}");
    }
}
