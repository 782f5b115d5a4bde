// src/form.rs
use std::collections::HashMap;

use crate::config::JobSpec;
use crate::errors::{Result, ScreenError};
use crate::models::{JobSubmission, ResumeFile, WEIGHT_FIELDS, Weights};

/// Required total of the four weights, in percent.
pub const WEIGHT_TOTAL: i64 = 100;

/// Raw values of the job posting form: named text fields plus attached files.
#[derive(Debug, Clone, Default)]
pub struct JobForm {
    fields: HashMap<String, String>,
    files: Vec<ResumeFile>,
}

impl JobForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds text fields from a TOML job description.
    pub fn from_spec(spec: &JobSpec) -> Self {
        let mut form = Self::new();
        if let Some(title) = &spec.job_title {
            form.set("job_title", title);
        }
        if let Some(description) = &spec.description {
            form.set("description", description);
        }
        if let Some(years) = &spec.years_needed {
            form.set("years_needed", years);
        }
        if let Some(weights) = &spec.weights {
            for (name, value) in weights.fields() {
                form.set(name, value.to_string());
            }
        }
        form
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn attach(&mut self, file: ResumeFile) -> &mut Self {
        self.files.push(file);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn files(&self) -> &[ResumeFile] {
        &self.files
    }

    /// Reads the four weights. Absent or non-integer fields count as 0.
    pub fn weights(&self) -> Weights {
        let [quality, experience, years, location] =
            WEIGHT_FIELDS.map(|name| parse_weight(self.get(name)));
        Weights {
            quality,
            experience,
            years,
            location,
        }
    }

    /// Builds the submission payload. Does not check the weights.
    pub fn to_submission(&self) -> JobSubmission {
        JobSubmission {
            job_title: self.text("job_title"),
            description: self.text("description"),
            years_needed: self.text("years_needed"),
            weights: self.weights(),
            resumes: self.files.clone(),
        }
    }

    fn text(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

pub fn parse_weight(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(0)
}

/// Fails unless the weights add up to exactly [`WEIGHT_TOTAL`].
pub fn validate_weights(weights: &Weights) -> Result<()> {
    let total = weights.total();
    if total != i128::from(WEIGHT_TOTAL) {
        return Err(ScreenError::Validation(format!(
            "Weights must sum to exactly {WEIGHT_TOTAL}% (got {total}%)"
        )));
    }
    Ok(())
}
