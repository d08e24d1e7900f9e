//! Classifier — assigns a posting to a category and seniority tier.
//!
//! Algorithm:
//! 1. Lower-case the text.
//! 2. Any denylist hit → `None`, before any category is scored.
//! 3. Tally points: each category's strong keyword group (once, by presence),
//!    general QA terms for both QA categories, then the developer bonus for
//!    categories that already hold points.
//! 4. No points anywhere → `None`.
//! 5. Highest tally wins; ties go to the category declared first.
//! 6. Seniority comes from the ladder, independent of the category.

use std::sync::Arc;

use tracing::{debug, info};

use crate::matching::keywords::{contains_any, matching_terms};
use crate::matching::profile::{ClassifierRules, MatchingProfile};
use crate::models::classification::{Category, Classification, Seniority};

pub struct Classifier {
    profile: Arc<MatchingProfile>,
}

impl Classifier {
    pub fn new(profile: Arc<MatchingProfile>) -> Self {
        Self { profile }
    }

    fn rules(&self) -> &ClassifierRules {
        &self.profile.classifier
    }

    /// Returns `None` for postings outside the profile. Never fails.
    pub fn classify(&self, text: &str) -> Option<Classification> {
        let text = text.to_lowercase();
        let rules = self.rules();

        let blocked = matching_terms(&text, &rules.denylist);
        if !blocked.is_empty() {
            info!("Rejected: technologies outside the profile {:?}", blocked);
            return None;
        }

        let points = self.tally(&text);
        let (category, best) = points
            .iter()
            .copied()
            .fold((Category::ALL[0], 0), |best, current| {
                if current.1 > best.1 {
                    current
                } else {
                    best
                }
            });

        if best == 0 {
            info!("Rejected: no category of the profile matched");
            return None;
        }

        let seniority = self.detect_seniority(&text);
        debug!("Classified as {category} ({seniority}) with {best} points: {points:?}");

        Some(Classification {
            category,
            seniority,
            points: best,
        })
    }

    /// Seniority ladder on its own. Rungs are tried in priority order, so a
    /// posting mentioning both "senior" and "ssr" resolves to semi_senior.
    pub fn detect_seniority(&self, text: &str) -> Seniority {
        let text = text.to_lowercase();
        let rules = self.rules();
        rules
            .seniority_ladder
            .iter()
            .find(|rung| contains_any(&text, &rung.markers))
            .map(|rung| rung.seniority)
            .unwrap_or(rules.default_seniority)
    }

    /// Per-category points in declaration order.
    fn tally(&self, text: &str) -> Vec<(Category, u32)> {
        let rules = self.rules();
        let mut points: Vec<(Category, u32)> = Category::ALL.iter().map(|&c| (c, 0)).collect();

        for (category, total) in points.iter_mut() {
            let strong = rules.strong_signals.get(&*category);
            if strong.is_some_and(|terms| contains_any(text, terms)) {
                *total = total.saturating_add(rules.strong_signal_points);
            }
        }

        if contains_any(text, &rules.general_qa_terms) {
            for (_, total) in points.iter_mut().filter(|(c, _)| c.is_qa()) {
                *total = total.saturating_add(rules.general_qa_points);
            }
        }

        if contains_any(text, &rules.developer_terms) {
            if points.iter().any(|(_, total)| *total > 0) {
                for (_, total) in points.iter_mut().filter(|(_, t)| *t > 0) {
                    *total = total.saturating_add(rules.developer_bonus_points);
                }
            } else {
                // No-op branch: developer wording alone never scores a category.
                debug!("Mentions a developer role but no technology from the profile");
            }
        }

        points
    }
}
