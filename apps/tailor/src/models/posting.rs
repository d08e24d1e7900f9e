use serde::{Deserialize, Serialize};

/// A raw job posting as typed in or read from a batch file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    pub employer: String,
    pub description: String,
}

impl Posting {
    pub fn new(employer: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            employer: employer.into(),
            description: description.into(),
        }
    }
}
