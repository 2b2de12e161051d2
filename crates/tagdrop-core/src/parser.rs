//! TOML quiz manifest parser.
//!
//! Loads quiz manifests from TOML files and directories, and lints them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::QuizError;
use crate::model::{Quiz, TagRecord, DEFAULT_QUESTION};

/// Intermediate TOML structure for parsing manifest files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    tags: Vec<TomlTag>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlTag {
    label: String,
    #[serde(default)]
    correct: bool,
    #[serde(default)]
    feedback: String,
}

/// A parsed quiz manifest, before load-time validation.
///
/// Tags may come inline from the manifest itself or from a remote document
/// named by `source_url`; when both are present the remote document wins.
#[derive(Debug, Clone)]
pub struct QuizManifest {
    pub id: String,
    pub question: String,
    pub image: Option<String>,
    /// Remote tag document; takes precedence over inline tags when set.
    pub source_url: Option<String>,
    /// Inline tag records in manifest order.
    pub tags: Vec<TagRecord>,
}

impl QuizManifest {
    /// Build the validated quiz from the inline tag list.
    pub fn to_quiz(&self) -> Result<Quiz, QuizError> {
        Quiz::from_records(
            self.id.clone(),
            Some(self.question.clone()),
            self.image.clone(),
            self.tags.clone(),
        )
    }
}

/// Parse a single TOML manifest file.
pub fn parse_manifest(path: &Path) -> Result<QuizManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz manifest: {}", path.display()))?;

    parse_manifest_str(&content, path)
}

/// Parse a TOML string into a `QuizManifest` (useful for testing).
pub fn parse_manifest_str(content: &str, source_path: &Path) -> Result<QuizManifest> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let tags = parsed
        .tags
        .into_iter()
        .map(|t| TagRecord {
            label: t.label,
            correct: t.correct,
            feedback: t.feedback,
        })
        .collect();

    Ok(QuizManifest {
        id: parsed.quiz.id,
        question: parsed
            .quiz
            .question
            .unwrap_or_else(|| DEFAULT_QUESTION.to_string()),
        image: parsed.quiz.image,
        source_url: parsed.quiz.source_url,
        tags,
    })
}

/// Recursively load all `.toml` quiz manifests from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizManifest>> {
    let mut manifests = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            manifests.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_manifest(&path) {
                Ok(manifest) => manifests.push(manifest),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(manifests)
}

/// A warning from quiz manifest linting.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The offending tag label, when the warning concerns a single tag.
    pub label: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Lint a manifest for issues that load-time validation does not reject.
pub fn validate_manifest(manifest: &QuizManifest) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if manifest.tags.is_empty() && manifest.source_url.is_none() {
        warnings.push(ValidationWarning {
            label: None,
            message: "manifest defines no tags and no source_url".into(),
        });
    }

    if !manifest.tags.is_empty() && manifest.source_url.is_some() {
        warnings.push(ValidationWarning {
            label: None,
            message: "manifest has both inline tags and a source_url; the source_url wins".into(),
        });
    }

    if manifest.question.trim().is_empty() {
        warnings.push(ValidationWarning {
            label: None,
            message: "question is empty".into(),
        });
    }

    if !manifest.tags.is_empty() && !manifest.tags.iter().any(|t| t.correct) {
        warnings.push(ValidationWarning {
            label: None,
            message: "no tag is flagged correct; only an empty answer can pass".into(),
        });
    }

    for tag in &manifest.tags {
        if tag.feedback.trim().is_empty() {
            warnings.push(ValidationWarning {
                label: Some(tag.label.clone()),
                message: "tag has no feedback".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[quiz]
id = "art-critique"
question = "Which of the following big ideas would YOU associate with this artistic work?"
image = "images/still-life.png"

[[tags]]
label = "good form"
correct = true
feedback = "The composition is carefully balanced."

[[tags]]
label = "poor taste"
feedback = "A loaded judgement, not an observation."

[[tags]]
label = "shading"
correct = true
feedback = "Strong use of light and depth."
"#;

    #[test]
    fn parse_valid_toml() {
        let manifest = parse_manifest_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(manifest.id, "art-critique");
        assert_eq!(manifest.tags.len(), 3);
        assert_eq!(manifest.tags[0].label, "good form");
        assert!(manifest.tags[0].correct);
        assert!(!manifest.tags[1].correct);
        assert_eq!(manifest.image.as_deref(), Some("images/still-life.png"));
        assert!(manifest.source_url.is_none());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[quiz]
id = "minimal"

[[tags]]
label = "accessible"
"#;
        let manifest = parse_manifest_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(manifest.question, DEFAULT_QUESTION);
        assert!(manifest.image.is_none());
        assert!(!manifest.tags[0].correct);
        assert!(manifest.tags[0].feedback.is_empty());
    }

    #[test]
    fn parse_remote_manifest() {
        let toml = r#"
[quiz]
id = "remote"
source_url = "https://example.com/tags.json"
"#;
        let manifest = parse_manifest_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(
            manifest.source_url.as_deref(),
            Some("https://example.com/tags.json")
        );
        assert!(manifest.tags.is_empty());
    }

    #[test]
    fn to_quiz_validates_labels() {
        let toml = r#"
[quiz]
id = "dupes"

[[tags]]
label = "AI"

[[tags]]
label = "AI"
"#;
        let manifest = parse_manifest_str(toml, &PathBuf::from("test.toml")).unwrap();
        let err = manifest.to_quiz().unwrap_err();
        assert!(err.is_invalid_data());
    }

    #[test]
    fn validate_empty_manifest() {
        let toml = r#"
[quiz]
id = "empty"
"#;
        let manifest = parse_manifest_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_manifest(&manifest);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("no tags and no source_url")));
    }

    #[test]
    fn validate_inline_tags_alongside_source_url() {
        let toml = r#"
[quiz]
id = "both"
source_url = "https://example.com/tags.json"

[[tags]]
label = "ignored"
correct = true
feedback = "inline"
"#;
        let manifest = parse_manifest_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_manifest(&manifest);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("source_url wins")));
    }

    #[test]
    fn validate_no_correct_tags() {
        let toml = r#"
[quiz]
id = "hopeless"

[[tags]]
label = "AI"
feedback = "nope"
"#;
        let manifest = parse_manifest_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_manifest(&manifest);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("no tag is flagged correct")));
    }

    #[test]
    fn validate_missing_feedback_names_the_tag() {
        let manifest = parse_manifest_str(
            r#"
[quiz]
id = "quiet"

[[tags]]
label = "shading"
correct = true
"#,
            &PathBuf::from("test.toml"),
        )
        .unwrap();
        let warnings = validate_manifest(&manifest);
        assert!(warnings
            .iter()
            .any(|w| w.label.as_deref() == Some("shading") && w.message.contains("no feedback")));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_manifest_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("art.toml");
        std::fs::write(&file_path, VALID_TOML).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a manifest").unwrap();

        let manifests = load_quiz_directory(dir.path()).unwrap();
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].id, "art-critique");
    }

    #[test]
    fn load_directory_recurses() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("unit-2");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("art.toml"), VALID_TOML).unwrap();

        let manifests = load_quiz_directory(dir.path()).unwrap();
        assert_eq!(manifests.len(), 1);
    }
}
