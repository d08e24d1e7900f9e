use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::classification::{Category, Seniority};

/// Flat record handed to the application store once a posting is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub employer: String,
    pub category: Category,
    pub seniority: Seniority,
    pub fit_score: u32,
    pub matched_keywords: BTreeSet<String>,
    pub detected_keywords: BTreeSet<String>,
    pub gaps: Vec<String>,
    pub recommendations: Vec<String>,
    pub title: String,
    pub pitch: String,
    pub document_path: PathBuf,
    pub created_at: DateTime<Utc>,
}
