use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::documents::{file_stamp, slugify};
use crate::models::application::ApplicationRecord;
use crate::models::posting::Posting;

/// Persistence seam for accepted applications.
pub trait ApplicationStore {
    /// Persists the record (and the posting it came from); returns the record's location.
    fn save(&self, record: &ApplicationRecord, posting: &Posting) -> Result<PathBuf, AppError>;
}

/// Stores each application as a pretty-printed JSON summary next to a copy of
/// the posting text.
pub struct JsonApplicationStore {
    dir: PathBuf,
}

impl JsonApplicationStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            AppError::Store(format!("cannot create store directory {}: {e}", dir.display()))
        })?;
        info!("Application store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every stored summary, oldest first. Unreadable files are skipped with a warning.
    pub fn list(&self) -> Result<Vec<ApplicationRecord>, AppError> {
        let mut records = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_summary = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("summary_") && n.ends_with(".json"));
            if !is_summary {
                continue;
            }
            match std::fs::read_to_string(&path)
                .map_err(AppError::from)
                .and_then(|raw| serde_json::from_str::<ApplicationRecord>(&raw).map_err(AppError::from))
            {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable summary {}: {e}", path.display()),
            }
        }
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }
}

impl ApplicationStore for JsonApplicationStore {
    fn save(&self, record: &ApplicationRecord, posting: &Posting) -> Result<PathBuf, AppError> {
        let slug = slugify(&record.employer);
        let stamp = file_stamp(record.id, record.created_at);

        let posting_path = self
            .dir
            .join(format!("posting_{slug}_{}_{stamp}.txt", record.category));
        std::fs::write(&posting_path, render_posting(record, posting)).map_err(|e| {
            AppError::Store(format!("cannot write {}: {e}", posting_path.display()))
        })?;

        let summary_path = self.dir.join(format!("summary_{slug}_{stamp}.json"));
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&summary_path, json).map_err(|e| {
            AppError::Store(format!("cannot write {}: {e}", summary_path.display()))
        })?;

        info!(
            "Application {} saved: {}, {}",
            record.id,
            posting_path.display(),
            summary_path.display()
        );
        Ok(summary_path)
    }
}

fn render_posting(record: &ApplicationRecord, posting: &Posting) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "EMPLOYER: {}", record.employer);
    let _ = writeln!(out, "CATEGORY: {} ({})", record.category, record.seniority);
    let _ = writeln!(out, "DATE: {}", record.created_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "=====================================\n");
    let _ = writeln!(out, "{}", posting.description);
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::models::classification::{Category, Seniority};

    fn make_record(employer: &str, minutes_ago: i64) -> ApplicationRecord {
        ApplicationRecord {
            id: Uuid::new_v4(),
            employer: employer.to_string(),
            category: Category::DevPython,
            seniority: Seniority::Junior,
            fit_score: 100,
            matched_keywords: BTreeSet::from(["python".to_string()]),
            detected_keywords: BTreeSet::from(["python".to_string()]),
            gaps: vec![],
            recommendations: vec!["Emphasise willingness to learn and adaptability".to_string()],
            title: "Python Full Stack Developer & QA Engineer".to_string(),
            pitch: "Thank you for the opportunity.".to_string(),
            document_path: PathBuf::from("cv.md"),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_save_writes_summary_and_posting() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonApplicationStore::open(dir.path()).unwrap();
        let record = make_record("Acme Corp", 0);
        let posting = Posting::new("Acme Corp", "Python developer junior");

        let summary = store.save(&record, &posting).unwrap();
        assert!(summary
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("summary_acme_corp_"));

        let posting_file = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .find(|p| p.file_name().unwrap().to_string_lossy().starts_with("posting_"))
            .expect("posting copy written");
        let text = std::fs::read_to_string(posting_file).unwrap();
        assert!(text.starts_with("EMPLOYER: Acme Corp\nCATEGORY: dev_python (junior)"));
        assert!(text.contains("Python developer junior"));
    }

    #[test]
    fn test_list_reads_back_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonApplicationStore::open(dir.path()).unwrap();
        let newer = make_record("Newer", 1);
        let older = make_record("Older", 30);
        store.save(&newer, &Posting::new("Newer", "python")).unwrap();
        store.save(&older, &Posting::new("Older", "python")).unwrap();

        let records = store.list().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].employer, "Older");
        assert_eq!(records[1].id, newer.id);
        assert_eq!(records[1].matched_keywords, newer.matched_keywords);
    }

    #[test]
    fn test_list_skips_corrupt_summaries() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonApplicationStore::open(dir.path()).unwrap();
        std::fs::write(dir.path().join("summary_broken.json"), "{ nope").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        store
            .save(&make_record("Acme", 0), &Posting::new("Acme", "python"))
            .unwrap();

        assert_eq!(store.list().unwrap().len(), 1);
    }
}
