// src/render.rs
//! Turns backend resume records into display cards.
//!
//! Everything here is pure: sorting, reason excerpts and card fields can be
//! tested without a surface. The HTML output reuses the dashboard's card markup.

use askama::Template;
use chrono::{DateTime, NaiveDateTime};
use std::fmt;

use crate::errors::Result;
use crate::models::ResumeResult;

pub const EMPTY_STATE: &str = "No resumes found";
pub const UNKNOWN_ID: &str = "Unknown";
pub const UNNAMED_FILE: &str = "Unnamed Resume";
pub const NO_PATH: &str = "N/A";
pub const ELLIPSIS: &str = "...";

const SHORT_ID_LEN: usize = 8;
const REASON_LINES: usize = 3;

/// The first few non-blank lines of a reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonExcerpt {
    pub lines: Vec<String>,
    pub truncated: bool,
}

impl ReasonExcerpt {
    pub fn joined(&self, separator: &str) -> String {
        let mut text = self.lines.join(separator);
        if self.truncated {
            text.push_str(ELLIPSIS);
        }
        text
    }
}

/// Everything one card shows, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeCard {
    pub short_id: String,
    pub score: Option<String>,
    pub filename: String,
    pub path: String,
    pub job_title: Option<String>,
    pub processed_at: Option<String>,
    pub reason: Option<ReasonExcerpt>,
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Empty,
    Cards(Vec<ResumeCard>),
}

impl Listing {
    pub fn cards(&self) -> &[ResumeCard] {
        match self {
            Listing::Empty => &[],
            Listing::Cards(cards) => cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }

    pub fn to_html(&self) -> Result<String> {
        let page = ListingHtml {
            cards: self.cards(),
            empty_state: EMPTY_STATE,
        };
        Ok(page.render()?)
    }
}

/// Builds the listing. `link` turns a storage path into a download URL.
///
/// Input order is not touched; cards come out highest score first, with a
/// missing score ranked as 0.
pub fn build_listing<F>(resumes: Option<&[ResumeResult]>, link: F) -> Listing
where
    F: Fn(&str) -> Option<String>,
{
    let resumes = match resumes {
        Some(resumes) if !resumes.is_empty() => resumes,
        _ => return Listing::Empty,
    };

    let mut ranked: Vec<&ResumeResult> = resumes.iter().collect();
    sort_by_score(&mut ranked);

    Listing::Cards(ranked.into_iter().map(|r| build_card(r, &link)).collect())
}

/// Sorts by score, highest first. Ties keep their relative order.
pub fn sort_by_score(resumes: &mut [&ResumeResult]) {
    resumes.sort_by(|a, b| rank_score(b).total_cmp(&rank_score(a)));
}

fn rank_score(resume: &ResumeResult) -> f64 {
    resume.score.unwrap_or(0.0)
}

pub fn build_card<F>(resume: &ResumeResult, link: F) -> ResumeCard
where
    F: Fn(&str) -> Option<String>,
{
    let path = non_blank(resume.path.as_deref());
    ResumeCard {
        short_id: short_id(resume.id.as_deref()),
        score: resume.score.map(|s| format!("{s:.1}")),
        filename: non_blank(resume.filename.as_deref())
            .unwrap_or(UNNAMED_FILE)
            .to_string(),
        path: path.unwrap_or(NO_PATH).to_string(),
        job_title: non_blank(resume.job_title.as_deref()).map(str::to_string),
        processed_at: resume.processed_at.as_deref().and_then(format_timestamp),
        reason: resume.reason.as_deref().and_then(excerpt_reason),
        download_url: path.and_then(link),
    }
}

/// First eight characters of the id, or a placeholder.
pub fn short_id(id: Option<&str>) -> String {
    match non_blank(id) {
        Some(id) => id.chars().take(SHORT_ID_LEN).collect(),
        None => UNKNOWN_ID.to_string(),
    }
}

/// Keeps at most three non-blank lines. Returns `None` when nothing is left.
pub fn excerpt_reason(reason: &str) -> Option<ReasonExcerpt> {
    let meaningful: Vec<&str> = reason.lines().filter(|l| !l.trim().is_empty()).collect();
    if meaningful.is_empty() {
        return None;
    }
    Some(ReasonExcerpt {
        lines: meaningful
            .iter()
            .take(REASON_LINES)
            .map(|l| l.to_string())
            .collect(),
        truncated: meaningful.len() > REASON_LINES,
    })
}

/// Accepts RFC 3339 or a naive ISO-8601 stamp; anything else is dropped.
fn format_timestamp(raw: &str) -> Option<String> {
    const SHOWN: &str = "%Y-%m-%d %H:%M";
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.format(SHOWN).to_string());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|stamp| stamp.format(SHOWN).to_string())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"{% if cards.is_empty() %}<div class="empty-state">{{ empty_state }}</div>
{% else %}{% for card in cards %}<div class="resume-card">
    <div class="resume-header">
        <h3>Resume #{{ card.short_id }}</h3>
        {% match card.score %}{% when Some with (score) %}<span class="score">Score: {{ score }}</span>{% when None %}{% endmatch %}
    </div>
    <div class="resume-details">
        <p><strong>File:</strong> {{ card.filename }}</p>
        <p><strong>Path:</strong> {{ card.path }}</p>
        {% match card.job_title %}{% when Some with (title) %}<p><strong>Applied For:</strong> {{ title }}</p>{% when None %}{% endmatch %}
        {% match card.processed_at %}{% when Some with (stamp) %}<p><strong>Processed:</strong> {{ stamp }}</p>{% when None %}{% endmatch %}
        {% match card.reason %}{% when Some with (reason) %}<div class="reason"><strong>Analysis:</strong><br>{% for line in reason.lines %}{% if !loop.first %}<br>{% endif %}{{ line }}{% endfor %}{% if reason.truncated %}...{% endif %}</div>{% when None %}{% endmatch %}
        {% match card.download_url %}{% when Some with (href) %}<div class="resume-actions">
            <a href="{{ href }}" class="resume-link" download>Download Resume</a>
        </div>{% when None %}{% endmatch %}
    </div>
</div>
{% endfor %}{% endif %}"#
)]
struct ListingHtml<'a> {
    cards: &'a [ResumeCard],
    empty_state: &'a str,
}

impl fmt::Display for ResumeCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resume #{}", self.short_id)?;
        if let Some(score) = &self.score {
            write!(f, "  Score: {score}")?;
        }
        writeln!(f)?;
        writeln!(f, "  File: {}", self.filename)?;
        writeln!(f, "  Path: {}", self.path)?;
        if let Some(title) = &self.job_title {
            writeln!(f, "  Applied For: {title}")?;
        }
        if let Some(stamp) = &self.processed_at {
            writeln!(f, "  Processed: {stamp}")?;
        }
        if let Some(reason) = &self.reason {
            writeln!(f, "  Analysis:")?;
            writeln!(f, "    {}", reason.joined("\n    "))?;
        }
        if let Some(url) = &self.download_url {
            writeln!(f, "  Download: {url}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Empty => writeln!(f, "{EMPTY_STATE}"),
            Listing::Cards(cards) => {
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{card}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(id: &str, score: Option<f64>) -> ResumeResult {
        ResumeResult {
            id: Some(id.to_string()),
            score,
            ..ResumeResult::default()
        }
    }

    fn no_links(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_and_absent_inputs_render_the_placeholder() {
        assert_eq!(build_listing(None, no_links), Listing::Empty);
        let nothing: &[ResumeResult] = &[];
        assert_eq!(build_listing(Some(nothing), no_links), Listing::Empty);
        assert_eq!(Listing::Empty.to_string(), "No resumes found\n");
    }

    #[test]
    fn cards_are_ordered_by_descending_score_with_missing_as_zero() {
        let resumes = vec![
            resume("low", Some(12.0)),
            resume("none", None),
            resume("high", Some(91.25)),
            resume("neg", Some(-1.0)),
            resume("mid", Some(55.0)),
        ];
        let listing = build_listing(Some(resumes.as_slice()), no_links);
        let ids: Vec<&str> = listing.cards().iter().map(|c| c.short_id.as_str()).collect();

        assert_eq!(ids, ["high", "mid", "low", "none", "neg"]);
        assert_eq!(resumes[0].id.as_deref(), Some("low"));
    }

    #[test]
    fn score_is_shown_to_one_decimal() {
        let card = build_card(&resume("a", Some(87.26)), no_links);
        assert_eq!(card.score.as_deref(), Some("87.3"));

        let card = build_card(&resume("a", Some(0.0)), no_links);
        assert_eq!(card.score.as_deref(), Some("0.0"));

        let card = build_card(&resume("a", None), no_links);
        assert_eq!(card.score, None);
    }

    #[test]
    fn short_id_takes_eight_characters_or_unknown() {
        assert_eq!(short_id(Some("3f2a9c1e-77b4-4c1d")), "3f2a9c1e");
        assert_eq!(short_id(Some("abc")), "abc");
        assert_eq!(short_id(Some("")), UNKNOWN_ID);
        assert_eq!(short_id(None), UNKNOWN_ID);
    }

    #[test]
    fn long_reasons_keep_three_lines_and_an_ellipsis() {
        let excerpt = excerpt_reason("Strong Rust\n\nLed a team\n  \nShipped v2\nRelocating").unwrap();
        assert_eq!(excerpt.lines, ["Strong Rust", "Led a team", "Shipped v2"]);
        assert!(excerpt.truncated);
        assert_eq!(excerpt.joined("<br>"), "Strong Rust<br>Led a team<br>Shipped v2...");
    }

    #[test]
    fn short_reasons_are_shown_in_full() {
        let excerpt = excerpt_reason("One\n\nTwo\nThree\n").unwrap();
        assert_eq!(excerpt.lines.len(), 3);
        assert!(!excerpt.truncated);
        assert_eq!(excerpt.joined("\n"), "One\nTwo\nThree");

        assert_eq!(excerpt_reason(" \n\n"), None);
    }

    #[test]
    fn placeholders_fill_missing_fields() {
        let card = build_card(&ResumeResult::default(), |p| Some(format!("/download/{p}")));
        assert_eq!(card.short_id, UNKNOWN_ID);
        assert_eq!(card.filename, UNNAMED_FILE);
        assert_eq!(card.path, NO_PATH);
        assert_eq!(card.job_title, None);
        assert_eq!(card.download_url, None);
    }

    #[test]
    fn download_link_only_when_path_is_present() {
        let record = ResumeResult {
            path: Some("uploads/x.pdf".to_string()),
            ..ResumeResult::default()
        };
        let card = build_card(&record, |p| Some(format!("/download/{p}")));
        assert_eq!(card.download_url.as_deref(), Some("/download/uploads/x.pdf"));
    }

    #[test]
    fn processed_at_accepts_naive_and_offset_stamps() {
        assert_eq!(
            format_timestamp("2024-05-01T09:30:12.123456").as_deref(),
            Some("2024-05-01 09:30")
        );
        assert_eq!(
            format_timestamp("2024-05-01T09:30:12+02:00").as_deref(),
            Some("2024-05-01 09:30")
        );
        assert_eq!(format_timestamp("yesterday"), None);
    }

    #[test]
    fn html_escapes_values_and_marks_truncation() {
        let record = ResumeResult {
            id: Some("abcdef123456".to_string()),
            filename: Some("<script>.pdf".to_string()),
            score: Some(70.0),
            reason: Some("a\nb\nc\nd".to_string()),
            ..ResumeResult::default()
        };
        let html = build_listing(Some(&[record][..]), no_links).to_html().unwrap();

        assert!(html.contains("Resume #abcdef12"));
        assert!(html.contains("Score: 70.0"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("c...</div>"));
        assert!(!html.contains("resume-link"));
    }

    #[test]
    fn html_empty_state() {
        let html = Listing::Empty.to_html().unwrap();
        assert!(html.contains(r#"<div class="empty-state">No resumes found</div>"#));
    }

    #[test]
    fn text_card_lists_fields() {
        let record = ResumeResult {
            id: Some("1234567890".to_string()),
            filename: Some("jane.pdf".to_string()),
            path: Some("uploads/jane.pdf".to_string()),
            score: Some(88.0),
            job_title: Some("SRE".to_string()),
            reason: Some("Solid on-call history".to_string()),
            ..ResumeResult::default()
        };
        let text = build_card(&record, |_| Some("http://h/download/x".to_string())).to_string();

        assert!(text.starts_with("Resume #12345678  Score: 88.0\n"));
        assert!(text.contains("  Applied For: SRE\n"));
        assert!(text.contains("    Solid on-call history\n"));
        assert!(text.contains("  Download: http://h/download/x\n"));
    }
}
