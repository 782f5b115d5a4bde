// src/models.rs
use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::errors::Result;

/// Wire names of the four weight fields, in form order.
pub const WEIGHT_FIELDS: [&str; 4] = [
    "weight_quality",
    "weight_experience",
    "weight_years",
    "weight_location",
];

/// Scoring weights, in percent. Valid only when they sum to exactly 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(default)]
    pub quality: i64,
    #[serde(default)]
    pub experience: i64,
    #[serde(default)]
    pub years: i64,
    #[serde(default)]
    pub location: i64,
}

impl Weights {
    /// Sum of the four weights. Widened so arbitrary form input cannot overflow.
    pub fn total(&self) -> i128 {
        [self.quality, self.experience, self.years, self.location]
            .into_iter()
            .map(i128::from)
            .sum()
    }

    /// Pairs each weight with its form field name.
    pub fn fields(&self) -> [(&'static str, i64); 4] {
        [
            (WEIGHT_FIELDS[0], self.quality),
            (WEIGHT_FIELDS[1], self.experience),
            (WEIGHT_FIELDS[2], self.years),
            (WEIGHT_FIELDS[3], self.location),
        ]
    }
}

/// A resume attachment held in memory for the duration of one submit.
///
/// The contents are reference counted; cloning a file or a submission does
/// not copy the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, guessing its media type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            name,
            media_type,
            bytes: Bytes::from(bytes),
        })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Everything sent in one job posting.
#[derive(Debug, Clone, Default)]
pub struct JobSubmission {
    pub job_title: Option<String>,
    pub description: Option<String>,
    pub years_needed: Option<String>,
    pub weights: Weights,
    pub resumes: Vec<ResumeFile>,
}

/// One scored resume as listed by the backend.
///
/// Records are taken as the server sends them. A field of an unexpected type
/// reads as absent instead of failing the whole listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeResult {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub processed_at: Option<String>,
}

impl ResumeResult {
    /// Reads one listed record. Anything that is not an object becomes an
    /// empty record, shown with placeholders.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Decodes a resume listing body: an array of records, or `null` for none.
pub fn resumes_from_value(value: Value) -> Option<Vec<ResumeResult>> {
    match value {
        Value::Null => Some(Vec::new()),
        Value::Array(items) => Some(items.into_iter().map(ResumeResult::from_value).collect()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_score<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|s| s.is_finite()),
        _ => None,
    })
}

fn lenient_records<'de, D>(deserializer: D) -> std::result::Result<Vec<ResumeResult>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(resumes_from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Body of a successful job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub processed: u64,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub total_resumes: Option<u64>,
    #[serde(default)]
    pub failed: Option<u64>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub results: Vec<ResumeResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}
