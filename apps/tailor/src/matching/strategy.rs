//! Strategy gate — which (seniority, category) pairs are worth applying to.

use std::sync::Arc;

use crate::matching::profile::MatchingProfile;
use crate::models::classification::{Category, Seniority};

pub struct StrategyGate {
    profile: Arc<MatchingProfile>,
}

impl StrategyGate {
    pub fn new(profile: Arc<MatchingProfile>) -> Self {
        Self { profile }
    }

    /// Pure table lookup. A seniority missing from the table allows nothing.
    pub fn is_allowed(&self, category: Category, seniority: Seniority) -> bool {
        self.profile
            .strategy
            .get(&seniority)
            .is_some_and(|allowed| allowed.contains(&category))
    }

    /// One line per seniority, e.g. `junior: qa_automation, qa_manual`.
    pub fn describe(&self) -> Vec<String> {
        Seniority::ALL
            .iter()
            .map(|seniority| {
                let allowed = self
                    .profile
                    .strategy
                    .get(seniority)
                    .filter(|set| !set.is_empty())
                    .map(|set| {
                        set.iter()
                            .map(|c| c.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_else(|| "do not apply".to_string());
                format!("{seniority}: {allowed}")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;

    fn default_gate() -> StrategyGate {
        StrategyGate::new(Arc::new(MatchingProfile::default()))
    }

    #[test]
    fn test_senior_never_allowed_by_default() {
        let gate = default_gate();
        for category in Category::ALL {
            assert!(!gate.is_allowed(category, Seniority::Senior));
        }
    }

    #[test]
    fn test_junior_allows_every_category() {
        let gate = default_gate();
        for category in Category::ALL {
            assert!(gate.is_allowed(category, Seniority::Junior));
        }
    }

    #[test]
    fn test_semi_senior_excludes_frontend_only() {
        let gate = default_gate();
        assert!(!gate.is_allowed(Category::DevFrontend, Seniority::SemiSenior));
        assert!(gate.is_allowed(Category::DevJava, Seniority::SemiSenior));
        assert!(gate.is_allowed(Category::QaManual, Seniority::SemiSenior));
    }

    #[test]
    fn test_missing_seniority_key_allows_nothing() {
        let mut profile = MatchingProfile::default();
        profile.strategy = BTreeMap::from([(
            Seniority::Senior,
            BTreeSet::from([Category::DevPython]),
        )]);
        let gate = StrategyGate::new(Arc::new(profile));
        assert!(gate.is_allowed(Category::DevPython, Seniority::Senior));
        assert!(!gate.is_allowed(Category::DevPython, Seniority::Junior));
    }

    #[test]
    fn test_describe_lists_every_seniority() {
        let lines = default_gate().describe();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("junior: qa_automation, qa_manual"));
        assert_eq!(lines[2], "senior: do not apply");
    }
}
