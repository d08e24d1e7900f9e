//! Fit Scoring — pluggable, trait-based scorer that measures a posting's
//! detected keywords against the candidate's strengths.
//!
//! Default: `HeuristicFitScorer` (additive rules, deterministic, fully testable).
//! The pipeline holds an `Arc<dyn FitScorer>` so another backend can be swapped in.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::matching::keywords::has_any;
use crate::matching::profile::{MatchingProfile, ScoringRules};
use crate::models::classification::{Category, Seniority};

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub score: u32, // 0 – 100
    /// Profile keywords found in the posting.
    pub detected_keywords: BTreeSet<String>,
    /// Detected keywords the candidate covers.
    pub matched_keywords: BTreeSet<String>,
    pub gaps: Vec<String>,
    pub recommendations: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

pub trait FitScorer: Send + Sync {
    fn score(
        &self,
        detected: &BTreeSet<String>,
        category: Category,
        seniority: Seniority,
    ) -> FitResult;
}

/// Additive heuristic scorer driven entirely by `ScoringRules`.
pub struct HeuristicFitScorer {
    profile: Arc<MatchingProfile>,
}

impl HeuristicFitScorer {
    pub fn new(profile: Arc<MatchingProfile>) -> Self {
        Self { profile }
    }
}

impl FitScorer for HeuristicFitScorer {
    fn score(
        &self,
        detected: &BTreeSet<String>,
        category: Category,
        seniority: Seniority,
    ) -> FitResult {
        compute_heuristic_fit(&self.profile.scoring, detected, category, seniority)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gap and recommendation rules
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gap {
    JavaSenior,
    JavaGrowth,
    GitFlow,
    SeniorExperience,
}

impl Gap {
    fn message(self) -> &'static str {
        match self {
            Gap::JavaSenior => {
                "Senior Java expects more hands-on Java; main experience is in Python"
            }
            Gap::JavaGrowth => "Java SSR: lean on backend experience transferable from Python",
            Gap::GitFlow => "No explicit Git Flow / code review experience",
            Gap::SeniorExperience => "Senior level may require more experience than the profile shows",
        }
    }
}

const REC_JAVA_TRANSFER: &str = "Highlight experience transferable from Python to Java/Spring";
const REC_JAVA_PROJECTS: &str = "Mention Java courses or personal projects, if any";
const REC_GIT_FLOW: &str = "Add Git Flow and code review experience to the resume";
const REC_JUNIOR: &str = "Emphasise willingness to learn and adaptability";
const REC_SENIOR: &str = "Highlight technical leadership and mentoring of other developers";

// ────────────────────────────────────────────────────────────────────────────
// Core heuristic
// ────────────────────────────────────────────────────────────────────────────

/// Scores one classified posting.
///
/// - nothing detected → fixed fallback per category
/// - QA categories → base plus bonuses for matched QA / data / method terms
/// - developer categories → matched/detected coverage plus category bonuses
///
/// Rounded half-to-even and clamped to `0..=100`.
pub fn compute_heuristic_fit(
    rules: &ScoringRules,
    detected: &BTreeSet<String>,
    category: Category,
    seniority: Seniority,
) -> FitResult {
    let matched: BTreeSet<String> = detected
        .iter()
        .filter(|kw| rules.strengths.iter().any(|s| s == *kw))
        .cloned()
        .collect();

    let raw = if detected.is_empty() {
        f64::from(fallback_score(rules, category))
    } else if category.is_qa() {
        qa_score(rules, detected, &matched, category)
    } else {
        developer_score(rules, detected, &matched, category)
    };
    let score = raw.round_ties_even().clamp(0.0, 100.0) as u32;

    let gaps = detect_gaps(rules, detected, &matched, category, seniority);
    let recommendations = build_recommendations(category, seniority, &gaps);

    FitResult {
        score,
        detected_keywords: detected.clone(),
        matched_keywords: matched,
        gaps: gaps.iter().map(|g| g.message().to_string()).collect(),
        recommendations,
    }
}

fn fallback_score(rules: &ScoringRules, category: Category) -> u32 {
    match category {
        Category::QaManual | Category::QaAutomation => rules.fallback.qa,
        Category::DevPython => rules.fallback.python,
        _ => rules.fallback.default,
    }
}

fn qa_score(
    rules: &ScoringRules,
    detected: &BTreeSet<String>,
    matched: &BTreeSet<String>,
    category: Category,
) -> f64 {
    let qa = &rules.qa;
    let mut score = qa.base;
    if has_any(matched, &qa.core_terms) {
        score = score.saturating_add(qa.core_bonus);
    }
    if has_any(matched, &qa.data_terms) {
        score = score.saturating_add(qa.data_bonus);
    }
    if has_any(matched, &qa.method_terms) {
        score = score.saturating_add(qa.method_bonus);
    }
    // automation roles credit a Java mention
    if category == Category::QaAutomation && detected.contains(&rules.java_term) {
        score = score.saturating_add(qa.java_transfer_bonus);
    }
    f64::from(score)
}

fn developer_score(
    rules: &ScoringRules,
    detected: &BTreeSet<String>,
    matched: &BTreeSet<String>,
    category: Category,
) -> f64 {
    let mut score = matched.len() as f64 / detected.len() as f64 * 100.0;

    match category {
        Category::DevPython => {
            if has_any(detected, &rules.python.stack_terms) {
                score += f64::from(rules.python.stack_bonus);
            }
        }
        Category::DevJava => {
            let java = &rules.java;
            score = score.max(f64::from(java.floor));
            if has_any(matched, &java.data_terms) {
                score += f64::from(java.data_bonus);
            }
            if has_any(matched, &java.api_terms) {
                score += f64::from(java.api_bonus);
            }
            if has_any(matched, &java.agile_terms) {
                score += f64::from(java.agile_bonus);
            }
            if detected.contains(&rules.java_term) {
                score += f64::from(java.mention_bonus);
            }
        }
        _ => {}
    }

    score
}

fn detect_gaps(
    rules: &ScoringRules,
    detected: &BTreeSet<String>,
    matched: &BTreeSet<String>,
    category: Category,
    seniority: Seniority,
) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let thin_match = matched.len() < rules.gaps.min_matches;

    if category == Category::DevJava && detected.contains(&rules.java_term) {
        match seniority {
            Seniority::Senior => gaps.push(Gap::JavaSenior),
            Seniority::SemiSenior if thin_match => gaps.push(Gap::JavaGrowth),
            _ => {}
        }
    }

    let asks_git_flow = has_any(detected, &rules.gaps.git_flow_terms);
    let covers_git = rules
        .gaps
        .git_terms
        .iter()
        .any(|t| rules.strengths.contains(t));
    if asks_git_flow && !covers_git {
        gaps.push(Gap::GitFlow);
    }

    if seniority == Seniority::Senior && thin_match {
        gaps.push(Gap::SeniorExperience);
    }

    gaps
}

fn build_recommendations(category: Category, seniority: Seniority, gaps: &[Gap]) -> Vec<String> {
    let mut recs: Vec<&str> = Vec::new();

    if category == Category::DevJava {
        recs.push(REC_JAVA_TRANSFER);
        recs.push(REC_JAVA_PROJECTS);
    }
    if gaps.contains(&Gap::GitFlow) {
        recs.push(REC_GIT_FLOW);
    }
    match seniority {
        Seniority::Junior => recs.push(REC_JUNIOR),
        Seniority::Senior => recs.push(REC_SENIOR),
        Seniority::SemiSenior => {}
    }

    let mut unique: Vec<String> = Vec::with_capacity(recs.len());
    for rec in recs {
        if !unique.iter().any(|r| r == rec) {
            unique.push(rec.to_string());
        }
    }
    unique
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
