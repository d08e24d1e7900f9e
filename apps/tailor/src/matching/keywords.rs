//! Keyword extraction — which profile keywords occur in a posting.
//!
//! Matching is plain substring containment on the lower-cased text, the same
//! rule the classifier uses. "java" therefore also matches inside "javascript".

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::matching::profile::MatchingProfile;

/// True when any of `terms` occurs in `text`. `text` must already be lower-cased.
pub fn contains_any<S: AsRef<str>>(text: &str, terms: &[S]) -> bool {
    terms.iter().any(|t| text.contains(t.as_ref()))
}

/// The subset of `terms` occurring in `text`, in `terms` order.
pub fn matching_terms<'a, S: AsRef<str>>(text: &str, terms: &'a [S]) -> Vec<&'a str> {
    terms
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| text.contains(t))
        .collect()
}

/// True when `keywords` holds any of `terms`.
pub fn has_any<S: AsRef<str>>(keywords: &BTreeSet<String>, terms: &[S]) -> bool {
    terms.iter().any(|t| keywords.contains(t.as_ref()))
}

pub struct KeywordExtractor {
    profile: Arc<MatchingProfile>,
}

impl KeywordExtractor {
    pub fn new(profile: Arc<MatchingProfile>) -> Self {
        Self { profile }
    }

    /// Every skill keyword present in `text`. Falls back to the general term
    /// list when no skill keyword is present at all.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let text = text.to_lowercase();

        let mut found: BTreeSet<String> = self
            .profile
            .skills
            .values()
            .flat_map(|keywords| matching_terms(&text, keywords))
            .map(str::to_string)
            .collect();

        if found.is_empty() {
            found = matching_terms(&text, &self.profile.fallback_terms)
                .into_iter()
                .map(str::to_string)
                .collect();
            debug!("No skill keywords found; fallback scan gave {}", found.len());
        }

        if found.is_empty() {
            warn!("No keywords detected in posting");
        }

        found
    }
}
