//! Document generation — turns a tailoring plan into a resume document on disk.
//!
//! `DocumentGenerator` is the seam; `MarkdownDocumentWriter` is the file-based
//! implementation used by the binary.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::tailoring::{title_case, TailoringPlan};
use crate::matching::fit_scoring::FitResult;
use crate::models::classification::Classification;

/// Everything a generator needs for one accepted posting.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRequest<'a> {
    pub application_id: Uuid,
    pub employer: &'a str,
    pub classification: &'a Classification,
    pub fit: &'a FitResult,
    pub plan: &'a TailoringPlan,
    pub created_at: DateTime<Utc>,
}

pub trait DocumentGenerator {
    /// Writes the document and returns where it went.
    fn generate(&self, request: &DocumentRequest<'_>) -> Result<PathBuf, AppError>;
}

/// Writes `cv_<employer>_<category>_<timestamp>_<id>.md` into `output_dir`.
pub struct MarkdownDocumentWriter {
    output_dir: PathBuf,
}

impl MarkdownDocumentWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            AppError::Document(format!(
                "cannot create output directory {}: {e}",
                output_dir.display()
            ))
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl DocumentGenerator for MarkdownDocumentWriter {
    fn generate(&self, request: &DocumentRequest<'_>) -> Result<PathBuf, AppError> {
        let file_name = format!(
            "cv_{}_{}_{}.md",
            slugify(request.employer),
            request.classification.category,
            file_stamp(request.application_id, request.created_at)
        );
        let path = self.output_dir.join(file_name);

        std::fs::write(&path, render_markdown(request))
            .map_err(|e| AppError::Document(format!("cannot write {}: {e}", path.display())))?;

        info!("Resume written to {}", path.display());
        Ok(path)
    }
}

fn render_markdown(request: &DocumentRequest<'_>) -> String {
    let plan = request.plan;
    let mut out = String::new();

    // fmt::Write into a String cannot fail
    let _ = writeln!(out, "# {}\n", plan.title);
    let _ = writeln!(
        out,
        "_Prepared for {} ({}, {}), fit {}%_\n",
        request.employer,
        request.classification.category,
        request.classification.seniority,
        request.fit.score
    );
    let _ = writeln!(out, "## Professional Profile\n\n{}\n", plan.summary);
    let _ = writeln!(out, "## Technical Highlights\n");
    for bullet in &plan.highlights {
        let _ = writeln!(out, "- {bullet}");
    }
    if !plan.missing_keywords.is_empty() {
        let names: Vec<String> = plan.missing_keywords.iter().map(|k| title_case(k)).collect();
        let _ = writeln!(
            out,
            "\nRelevant technologies for the role: {}",
            names.join(", ")
        );
    }

    out
}

/// Lower-cased file-name-safe form of an employer name.
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if slug.is_empty() {
        "unknown".to_string()
    } else {
        slug
    }
}

/// `<yyyymmdd_hhmmss>_<first 8 hex of id>`; the id suffix keeps same-second files apart.
pub fn file_stamp(id: Uuid, at: DateTime<Utc>) -> String {
    let simple = id.simple().to_string();
    format!("{}_{}", at.format("%Y%m%d_%H%M%S"), &simple[..8])
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::models::classification::{Category, Seniority};

    fn sample_fit() -> FitResult {
        FitResult {
            score: 88,
            detected_keywords: BTreeSet::from(["selenium".to_string()]),
            matched_keywords: BTreeSet::from(["selenium".to_string()]),
            gaps: vec![],
            recommendations: vec![],
        }
    }

    fn sample_plan() -> TailoringPlan {
        TailoringPlan {
            title: "QA Automation Engineer & Full Stack Developer".to_string(),
            summary: "Summary text.".to_string(),
            highlights: vec!["First bullet".to_string(), "Second bullet".to_string()],
            missing_keywords: vec!["spring boot".to_string()],
        }
    }

    #[test]
    fn test_slugify_replaces_separators() {
        assert_eq!(slugify("Acme Corp"), "acme_corp");
        assert_eq!(slugify("../etc/passwd"), "___etc_passwd");
        assert_eq!(slugify("   "), "unknown");
        assert_eq!(slugify("Compañía"), "compañía");
    }

    #[test]
    fn test_file_stamp_shape() {
        let id = Uuid::new_v4();
        let at = DateTime::parse_from_rfc3339("2026-03-01T09:05:07Z")
            .unwrap()
            .with_timezone(&Utc);
        let stamp = file_stamp(id, at);
        assert!(stamp.starts_with("20260301_090507_"));
        assert_eq!(stamp.len(), "20260301_090507_".len() + 8);
    }

    #[test]
    fn test_markdown_writer_writes_plan() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MarkdownDocumentWriter::new(dir.path().join("out")).unwrap();
        let classification = Classification {
            category: Category::QaAutomation,
            seniority: Seniority::Junior,
            points: 4,
        };
        let fit = sample_fit();
        let plan = sample_plan();
        let request = DocumentRequest {
            application_id: Uuid::new_v4(),
            employer: "Acme Corp",
            classification: &classification,
            fit: &fit,
            plan: &plan,
            created_at: Utc::now(),
        };

        let path = writer.generate(&request).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("cv_acme_corp_qa_automation_"));
        assert!(name.ends_with(".md"));

        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("# QA Automation Engineer & Full Stack Developer"));
        assert!(body.contains("fit 88%"));
        assert!(body.contains("- Second bullet"));
        assert!(body.contains("Relevant technologies for the role: Spring Boot"));
    }
}
