//! Static transcode job settings template.

use std::path::Path;

use serde_json::Value;

use crate::error::{DispatchError, DispatchResult};

/// The base parameter set for the external transcode job.
///
/// Loaded once per process and treated as read-only; the pipeline touches
/// exactly one field per invocation, `Inputs[0].FileInput`, via a clone.
#[derive(Debug, Clone)]
pub struct JobSettings {
    template: Value,
}

impl JobSettings {
    /// Load the template from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> DispatchResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DispatchError::template(format!("failed to read {}: {}", path.display(), e))
        })?;

        let template: Value = serde_json::from_str(&raw).map_err(|e| {
            DispatchError::template(format!("failed to parse {}: {}", path.display(), e))
        })?;

        Self::from_value(template)
    }

    /// Build from an already-parsed document.
    pub fn from_value(template: Value) -> DispatchResult<Self> {
        if template.pointer("/Inputs/0").is_none() {
            return Err(DispatchError::template("template has no Inputs[0]"));
        }
        Ok(Self { template })
    }

    /// Clone the template with the source location injected into
    /// `Inputs[0].FileInput`.
    pub fn with_input(&self, source_uri: &str) -> Value {
        let mut settings = self.template.clone();
        if let Some(input) = settings.pointer_mut("/Inputs/0") {
            input["FileInput"] = Value::String(source_uri.to_string());
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_template() -> Value {
        json!({
            "Inputs": [{ "FileInput": "", "AudioSelectors": {} }],
            "OutputGroups": [{ "Name": "File Group" }]
        })
    }

    #[test]
    fn test_with_input_replaces_only_file_input() {
        let settings = JobSettings::from_value(sample_template()).unwrap();
        let injected = settings.with_input("s3://incoming/clip01.mp4");

        assert_eq!(injected["Inputs"][0]["FileInput"], "s3://incoming/clip01.mp4");
        assert_eq!(injected["Inputs"][0]["AudioSelectors"], json!({}));
        assert_eq!(injected["OutputGroups"], sample_template()["OutputGroups"]);
    }

    #[test]
    fn test_with_input_does_not_mutate_template() {
        let settings = JobSettings::from_value(sample_template()).unwrap();
        let _ = settings.with_input("s3://incoming/a.mp4");
        let second = settings.with_input("s3://incoming/b.mp4");
        assert_eq!(second["Inputs"][0]["FileInput"], "s3://incoming/b.mp4");
    }

    #[test]
    fn test_template_without_inputs_is_rejected() {
        let err = JobSettings::from_value(json!({"OutputGroups": []})).unwrap_err();
        assert!(matches!(err, DispatchError::Template(_)));

        let err = JobSettings::from_value(json!({"Inputs": []})).unwrap_err();
        assert!(matches!(err, DispatchError::Template(_)));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job_settings.json");
        tokio::fs::write(&path, sample_template().to_string())
            .await
            .unwrap();

        let settings = JobSettings::load(&path).await.unwrap();
        let injected = settings.with_input("s3://incoming/clip01.mp4");
        assert_eq!(injected["Inputs"][0]["FileInput"], "s3://incoming/clip01.mp4");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_template_error() {
        let err = JobSettings::load("/nonexistent/job_settings.json")
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Template(_)));
    }
}
