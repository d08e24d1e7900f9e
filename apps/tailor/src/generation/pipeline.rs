//! Application pipeline — orchestrates one posting from raw text to a stored application.
//!
//! Flow: classify → extract keywords → fit score → strategy gate → threshold →
//!       tailoring plan → pitch → document → store → notify.
//!
//! Each gate exits early with a `Rejection`. A collaborator failure aborts the
//! remaining steps for that posting only; `process_batch` keeps going.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::documents::{DocumentGenerator, DocumentRequest};
use crate::generation::pitch::interview_pitch;
use crate::generation::tailoring::{plan_tailoring, TailoringPlan};
use crate::matching::classifier::Classifier;
use crate::matching::fit_scoring::{FitResult, FitScorer, HeuristicFitScorer};
use crate::matching::keywords::KeywordExtractor;
use crate::matching::profile::MatchingProfile;
use crate::matching::strategy::StrategyGate;
use crate::models::application::ApplicationRecord;
use crate::models::classification::Classification;
use crate::models::posting::Posting;
use crate::store::ApplicationStore;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Why a posting was not applied to. Rejections are outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Denylisted technology, or no category of the profile matched.
    OutOfProfile,
    OutOfStrategy {
        classification: Classification,
        fit: FitResult,
    },
    BelowThreshold {
        classification: Classification,
        fit: FitResult,
        minimum: u32,
    },
}

/// Decision for a posting before any side effect runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Eligible {
        classification: Classification,
        fit: FitResult,
    },
    Rejected(Rejection),
}

/// Notification seam, invoked last for every accepted application.
pub trait Notifier {
    fn notify(&self, application: &Application) -> Result<(), AppError>;
}

/// Logs the pitch and the points to prepare for.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, application: &Application) -> Result<(), AppError> {
        let record = &application.record;
        info!("Interview pitch for {}: {}", record.employer, record.pitch);
        if !record.gaps.is_empty() {
            info!("Points to prepare for the interview: {}", record.gaps.join("; "));
        }
        Ok(())
    }
}

/// An accepted posting after every collaborator ran.
#[derive(Debug, Clone)]
pub struct Application {
    pub record: ApplicationRecord,
    pub plan: TailoringPlan,
    pub summary_path: std::path::PathBuf,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Accepted(Box<Application>),
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }
}

#[derive(Debug)]
pub struct BatchItem {
    pub employer: String,
    pub result: Result<Outcome, AppError>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn accepted(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(&i.result, Ok(o) if o.is_accepted()))
            .count()
    }

    pub fn rejected(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(&i.result, Ok(Outcome::Rejected(_))))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_err()).count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub struct Pipeline {
    profile: Arc<MatchingProfile>,
    classifier: Classifier,
    extractor: KeywordExtractor,
    scorer: Arc<dyn FitScorer>,
    gate: StrategyGate,
    documents: Box<dyn DocumentGenerator>,
    store: Box<dyn ApplicationStore>,
    notifier: Box<dyn Notifier>,
}

impl Pipeline {
    pub fn new(
        profile: Arc<MatchingProfile>,
        documents: Box<dyn DocumentGenerator>,
        store: Box<dyn ApplicationStore>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            classifier: Classifier::new(profile.clone()),
            extractor: KeywordExtractor::new(profile.clone()),
            scorer: Arc::new(HeuristicFitScorer::new(profile.clone())),
            gate: StrategyGate::new(profile.clone()),
            profile,
            documents,
            store,
            notifier,
        }
    }

    /// Replaces the default heuristic scorer.
    #[cfg(test)]
    pub fn with_scorer(mut self, scorer: Arc<dyn FitScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn gate(&self) -> &StrategyGate {
        &self.gate
    }

    pub fn min_fit_score(&self) -> u32 {
        self.profile.min_fit_score
    }

    /// Runs the decision steps only. Pure: no file, no clock, no randomness.
    pub fn evaluate(&self, text: &str) -> Evaluation {
        let Some(classification) = self.classifier.classify(text) else {
            return Evaluation::Rejected(Rejection::OutOfProfile);
        };
        info!(
            "Detected {} ({})",
            classification.category, classification.seniority
        );

        let detected = self.extractor.extract(text);
        info!(
            "Keywords found: {}",
            detected.iter().cloned().collect::<Vec<_>>().join(", ")
        );

        let fit = self
            .scorer
            .score(&detected, classification.category, classification.seniority);
        info!("Fit score: {}/100", fit.score);

        if !self
            .gate
            .is_allowed(classification.category, classification.seniority)
        {
            info!(
                "Out of strategy: {} ({}) is not applied to",
                classification.category, classification.seniority
            );
            return Evaluation::Rejected(Rejection::OutOfStrategy {
                classification,
                fit,
            });
        }

        let minimum = self.profile.min_fit_score;
        if fit.score < minimum {
            info!("Insufficient fit ({}%), minimum is {}%", fit.score, minimum);
            if !fit.gaps.is_empty() {
                info!("Main gaps: {}", fit.gaps.join("; "));
            }
            for rec in &fit.recommendations {
                info!("Recommendation: {rec}");
            }
            return Evaluation::Rejected(Rejection::BelowThreshold {
                classification,
                fit,
                minimum,
            });
        }

        Evaluation::Eligible {
            classification,
            fit,
        }
    }

    /// Evaluates one posting and, if eligible, runs every collaborator in order.
    pub fn process(&self, posting: &Posting) -> Result<Outcome, AppError> {
        if posting.employer.trim().is_empty() {
            return Err(AppError::Validation("employer cannot be empty".to_string()));
        }
        info!("Analysing posting from {}", posting.employer);

        let (classification, fit) = match self.evaluate(&posting.description) {
            Evaluation::Eligible {
                classification,
                fit,
            } => (classification, fit),
            Evaluation::Rejected(rejection) => return Ok(Outcome::Rejected(rejection)),
        };
        info!("Appropriate fit ({}%), generating documents", fit.score);

        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let plan = plan_tailoring(&classification, &fit);
        let pitch = interview_pitch(&posting.employer, &classification);

        let document_path = self.documents.generate(&DocumentRequest {
            application_id: id,
            employer: &posting.employer,
            classification: &classification,
            fit: &fit,
            plan: &plan,
            created_at,
        })?;

        let record = ApplicationRecord {
            id,
            employer: posting.employer.clone(),
            category: classification.category,
            seniority: classification.seniority,
            fit_score: fit.score,
            matched_keywords: fit.matched_keywords,
            detected_keywords: fit.detected_keywords,
            gaps: fit.gaps,
            recommendations: fit.recommendations,
            title: plan.title.clone(),
            pitch,
            document_path,
            created_at,
        };
        let summary_path = self.store.save(&record, posting)?;

        let application = Application {
            record,
            plan,
            summary_path,
        };
        self.notifier.notify(&application)?;

        Ok(Outcome::Accepted(Box::new(application)))
    }

    /// Processes postings one after another. A failing posting is recorded and
    /// the batch moves on.
    pub fn process_batch(&self, postings: &[Posting]) -> BatchReport {
        let items = postings
            .iter()
            .enumerate()
            .map(|(index, posting)| {
                let result = self.process(posting);
                if let Err(e) = &result {
                    error!(
                        "Posting #{} ({}) failed [{}]: {e}",
                        index + 1,
                        posting.employer,
                        e.code()
                    );
                }
                BatchItem {
                    employer: posting.employer.clone(),
                    result,
                }
            })
            .collect();

        let report = BatchReport { items };
        if report.failed() > 0 {
            warn!("{} of {} postings failed", report.failed(), report.items.len());
        }
        report
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
