//! Matching profile — every keyword list, point value, bonus and table the
//! classifier, scorer and strategy gate read.
//!
//! Loaded once at startup (built-in defaults, optionally overridden by a JSON
//! file) and shared immutably behind an `Arc`. Each struct is `#[serde(default)]`
//! so a profile file only needs the fields it changes.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::classification::{Category, Seniority};

// ────────────────────────────────────────────────────────────────────────────
// Profile root
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingProfile {
    /// Postings scoring below this are not applied to.
    pub min_fit_score: u32,
    /// Skill group → synonym keywords. Used for keyword extraction.
    pub skills: BTreeMap<String, Vec<String>>,
    /// Scanned only when no skill keyword occurs in a posting.
    pub fallback_terms: Vec<String>,
    pub classifier: ClassifierRules,
    pub scoring: ScoringRules,
    /// Seniority → categories worth applying to.
    pub strategy: BTreeMap<Seniority, BTreeSet<Category>>,
}

impl Default for MatchingProfile {
    fn default() -> Self {
        Self {
            min_fit_score: 70,
            skills: default_skills(),
            fallback_terms: strings(&[
                "qa",
                "testing",
                "pruebas",
                "developer",
                "desarrollador",
                "programador",
                "java",
                "python",
                "sql",
                "api",
                "web",
                "frontend",
                "backend",
                "full stack",
                "scrum",
                "agile",
            ]),
            classifier: ClassifierRules::default(),
            scoring: ScoringRules::default(),
            strategy: default_strategy(),
        }
    }
}

impl MatchingProfile {
    /// Reads a JSON profile file. Missing fields keep their built-in defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read profile {}: {e}", path.display()))
        })?;
        let profile: MatchingProfile = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("invalid profile {}: {e}", path.display()))
        })?;
        profile.validate()?;
        info!(
            "Loaded matching profile from {} ({} skill groups, min fit {}%)",
            path.display(),
            profile.skills.len(),
            profile.min_fit_score
        );
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_fit_score > 100 {
            return Err(AppError::Config(format!(
                "min_fit_score must be between 0 and 100, got {}",
                self.min_fit_score
            )));
        }
        if self.classifier.seniority_ladder.is_empty() {
            return Err(AppError::Config(
                "classifier.seniority_ladder cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Classifier rules
// ────────────────────────────────────────────────────────────────────────────

/// One rung of the seniority ladder. Rungs are tried in order; first hit wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeniorityMarkers {
    pub seniority: Seniority,
    pub markers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    /// Any hit rejects the posting before category scoring.
    pub denylist: Vec<String>,
    /// Category → strong keyword group. Presence of one keyword scores the group.
    pub strong_signals: BTreeMap<Category, Vec<String>>,
    /// Generic QA vocabulary; scores both QA categories.
    pub general_qa_terms: Vec<String>,
    /// Generic developer vocabulary; bumps every category that already has points.
    pub developer_terms: Vec<String>,
    pub strong_signal_points: u32,
    pub general_qa_points: u32,
    pub developer_bonus_points: u32,
    pub seniority_ladder: Vec<SeniorityMarkers>,
    pub default_seniority: Seniority,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        let strong_signals = BTreeMap::from([
            (
                Category::QaAutomation,
                strings(&[
                    "automatización",
                    "selenium",
                    "automatizador",
                    "automation",
                    "locust",
                    "cypress",
                ]),
            ),
            (
                Category::QaManual,
                strings(&[
                    "qa funcional",
                    "testing funcional",
                    "qa manual",
                    "casos de prueba",
                ]),
            ),
            (
                Category::DevPython,
                strings(&["python", "django", "flask", "fastapi", "pandas", "numpy"]),
            ),
            (
                Category::DevJava,
                strings(&["java", "spring", "spring boot", "hibernate"]),
            ),
            (
                Category::DevFrontend,
                strings(&[
                    "vue.js",
                    "vue",
                    "angular",
                    "frontend",
                    "front-end",
                    "javascript",
                    "typescript",
                ]),
            ),
            (
                Category::DevFullstack,
                strings(&["full stack", "fullstack", "full-stack"]),
            ),
        ]);

        Self {
            denylist: strings(&[
                "oracle",
                "visual basic",
                "vb.net",
                ".net",
                "c#",
                "php",
                "ruby",
                "rust",
                "cobol",
                "mainframe",
                "sap",
                "salesforce",
                "sharepoint",
            ]),
            strong_signals,
            general_qa_terms: strings(&["qa", "testing", "pruebas", "quality assurance"]),
            developer_terms: strings(&["desarrollador", "developer", "programador"]),
            strong_signal_points: 3,
            general_qa_points: 1,
            developer_bonus_points: 1,
            seniority_ladder: vec![
                SeniorityMarkers {
                    seniority: Seniority::SemiSenior,
                    markers: strings(&[
                        "ssr",
                        "semi senior",
                        "semi-senior",
                        "advance",
                        "intermedio",
                    ]),
                },
                SeniorityMarkers {
                    seniority: Seniority::Junior,
                    markers: strings(&["junior", "jr", "trainee", "entry level", "sin experiencia"]),
                },
                SeniorityMarkers {
                    seniority: Seniority::Senior,
                    markers: strings(&["senior", " sr ", "lead", "líder", "tech lead"]),
                },
            ],
            default_seniority: Seniority::SemiSenior,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring rules
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Keywords the candidate actually covers. Detected ∩ strengths = matched.
    pub strengths: Vec<String>,
    /// Keyword whose mention triggers the Java-specific bonuses and gaps.
    pub java_term: String,
    pub fallback: FallbackScores,
    pub qa: QaRules,
    pub python: PythonRules,
    pub java: JavaRules,
    pub gaps: GapRules,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            strengths: strings(&[
                "python",
                "fastapi",
                "postgresql",
                "vue",
                "quasar",
                "next.js",
                "locust",
                "postman",
                "qa",
                "manual",
                "testing",
                "scrum",
                "kanban",
                "git",
                "javascript",
                "sql",
                "api",
                "rest",
                "agile",
                "full stack",
                "desarrollador",
                "angular",
                "webservices",
                "selenium",
                "automatización",
                "automation",
                "frontend",
                "backend",
                "casos de prueba",
                "validaciones",
                "metodologías",
            ]),
            java_term: "java".to_string(),
            fallback: FallbackScores::default(),
            qa: QaRules::default(),
            python: PythonRules::default(),
            java: JavaRules::default(),
            gaps: GapRules::default(),
        }
    }
}

/// Scores used when a posting classifies but yields no keywords at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackScores {
    pub default: u32,
    pub qa: u32,
    pub python: u32,
}

impl Default for FallbackScores {
    fn default() -> Self {
        Self {
            default: 60,
            qa: 75,
            python: 85,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaRules {
    pub base: u32,
    pub core_terms: Vec<String>,
    pub core_bonus: u32,
    pub data_terms: Vec<String>,
    pub data_bonus: u32,
    pub method_terms: Vec<String>,
    pub method_bonus: u32,
    /// qa_automation only, when the Java keyword is detected.
    pub java_transfer_bonus: u32,
}

impl Default for QaRules {
    fn default() -> Self {
        Self {
            base: 65,
            core_terms: strings(&["qa", "testing", "automatización", "selenium"]),
            core_bonus: 15,
            data_terms: strings(&["sql", "api", "rest"]),
            data_bonus: 10,
            method_terms: strings(&["git", "scrum", "agile"]),
            method_bonus: 5,
            java_transfer_bonus: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonRules {
    /// Checked against detected keywords, not just matched ones.
    pub stack_terms: Vec<String>,
    pub stack_bonus: u32,
}

impl Default for PythonRules {
    fn default() -> Self {
        Self {
            stack_terms: strings(&["python", "fastapi"]),
            stack_bonus: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaRules {
    /// Coverage ratio is raised to at least this before bonuses apply.
    pub floor: u32,
    pub data_terms: Vec<String>,
    pub data_bonus: u32,
    pub api_terms: Vec<String>,
    pub api_bonus: u32,
    pub agile_terms: Vec<String>,
    pub agile_bonus: u32,
    pub mention_bonus: u32,
}

impl Default for JavaRules {
    fn default() -> Self {
        Self {
            floor: 50,
            data_terms: strings(&["sql", "base de datos"]),
            data_bonus: 10,
            api_terms: strings(&["api", "rest"]),
            api_bonus: 10,
            agile_terms: strings(&["scrum", "ágiles", "agile"]),
            agile_bonus: 5,
            mention_bonus: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GapRules {
    /// Fewer matched keywords than this flags Java SSR / senior gaps.
    pub min_matches: usize,
    pub git_flow_terms: Vec<String>,
    pub git_terms: Vec<String>,
}

impl Default for GapRules {
    fn default() -> Self {
        Self {
            min_matches: 3,
            git_flow_terms: strings(&["code review", "git flow", "deploy"]),
            git_terms: strings(&["git", "github"]),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in tables
// ────────────────────────────────────────────────────────────────────────────

fn default_skills() -> BTreeMap<String, Vec<String>> {
    let groups: &[(&str, &[&str])] = &[
        (
            "qa_manual",
            &[
                "testing",
                "qa",
                "manual",
                "casos de prueba",
                "validaciones",
                "evidencias",
                "funcional",
                "quality assurance",
            ],
        ),
        (
            "qa_automation",
            &[
                "selenium",
                "automatización",
                "automation",
                "locust",
                "pruebas de carga",
                "page object",
                "cypress",
                "unit testing",
                "pruebas unitarias",
            ],
        ),
        (
            "backend_python",
            &["python", "fastapi", "flask", "django", "rest", "api", "postgresql", "mysql"],
        ),
        (
            "backend_java",
            &["java", "spring", "spring boot", "maven", "hibernate", "jvm"],
        ),
        (
            "backend_dotnet",
            &[".net", "dotnet", "c#", "entity framework", "asp.net", "sql server", "oracle"],
        ),
        (
            "frontend",
            &[
                "angular",
                "vue",
                "react",
                "next.js",
                "quasar",
                "javascript",
                "typescript",
                "html",
                "css",
                "frontend",
            ],
        ),
        (
            "tools",
            &[
                "postman",
                "git",
                "github",
                "scrum",
                "kanban",
                "jira",
                "agile",
                "ágiles",
                "metodologías",
            ],
        ),
        (
            "databases",
            &[
                "postgresql",
                "mysql",
                "sql server",
                "oracle",
                "sql",
                "base de datos",
                "database",
                "bd",
            ],
        ),
        (
            "ci_cd",
            &["jenkins", "github actions", "ci/cd", "sonarqube", "docker", "deploy"],
        ),
        (
            "messaging",
            &["kafka", "rabbitmq", "message queue", "colas", "mensajería"],
        ),
        (
            "other",
            &[
                "microservicios",
                "microservices",
                "webservices",
                "full stack",
                "desarrollador",
                "developer",
                "orm",
                "dapper",
            ],
        ),
    ];

    groups
        .iter()
        .map(|(name, keywords)| (name.to_string(), strings(keywords)))
        .collect()
}

fn default_strategy() -> BTreeMap<Seniority, BTreeSet<Category>> {
    BTreeMap::from([
        (Seniority::Junior, Category::ALL.into_iter().collect()),
        (
            Seniority::SemiSenior,
            BTreeSet::from([
                Category::QaManual,
                Category::QaAutomation,
                Category::DevPython,
                Category::DevFullstack,
                Category::DevJava,
            ]),
        ),
        (Seniority::Senior, BTreeSet::new()),
    ])
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_profile_validates() {
        assert!(MatchingProfile::default().validate().is_ok());
    }

    #[test]
    fn test_default_strategy_blocks_senior_entirely() {
        let profile = MatchingProfile::default();
        assert!(profile.strategy[&Seniority::Senior].is_empty());
        assert_eq!(profile.strategy[&Seniority::Junior].len(), Category::ALL.len());
        assert!(!profile.strategy[&Seniority::SemiSenior].contains(&Category::DevFrontend));
    }

    #[test]
    fn test_every_category_has_strong_signals() {
        let rules = ClassifierRules::default();
        for category in Category::ALL {
            assert!(
                rules.strong_signals.get(&category).is_some_and(|k| !k.is_empty()),
                "missing strong signals for {category}"
            );
        }
    }

    #[test]
    fn test_ladder_priority_is_semi_senior_junior_senior() {
        let ladder = ClassifierRules::default().seniority_ladder;
        let order: Vec<_> = ladder.iter().map(|r| r.seniority).collect();
        assert_eq!(
            order,
            vec![Seniority::SemiSenior, Seniority::Junior, Seniority::Senior]
        );
    }

    #[test]
    fn test_profile_json_round_trip_keeps_enum_keys() {
        let profile = MatchingProfile::default();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains(r#""semi_senior""#));
        let parsed: MatchingProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.strategy, profile.strategy);
        assert_eq!(
            parsed.classifier.strong_signals.len(),
            profile.classifier.strong_signals.len()
        );
    }

    #[test]
    fn test_load_partial_file_overrides_only_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "min_fit_score": 80,
                "strategy": {{ "senior": ["dev_python"] }},
                "scoring": {{ "qa": {{ "base": 50 }} }}
            }}"#
        )
        .unwrap();

        let profile = MatchingProfile::load(file.path()).unwrap();
        assert_eq!(profile.min_fit_score, 80);
        assert!(profile.strategy[&Seniority::Senior].contains(&Category::DevPython));
        assert!(!profile.strategy.contains_key(&Seniority::Junior));
        assert_eq!(profile.scoring.qa.base, 50);
        assert_eq!(profile.scoring.qa.core_bonus, 15);
        assert_eq!(profile.classifier.strong_signal_points, 3);
        assert!(profile.skills.contains_key("backend_python"));
    }

    #[test]
    fn test_load_rejects_out_of_range_threshold() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "min_fit_score": 150 }}"#).unwrap();

        let err = MatchingProfile::load(file.path()).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = MatchingProfile::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid profile"));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = MatchingProfile::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
