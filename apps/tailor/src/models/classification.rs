use std::fmt;

use serde::{Deserialize, Serialize};

/// Role/technology bucket a posting is assigned to.
///
/// Declaration order is significant: it is the tie-break order used when two
/// categories end classification with the same number of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    QaAutomation,
    QaManual,
    DevPython,
    DevJava,
    DevFrontend,
    DevFullstack,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::QaAutomation,
        Category::QaManual,
        Category::DevPython,
        Category::DevJava,
        Category::DevFrontend,
        Category::DevFullstack,
    ];

    pub fn is_qa(self) -> bool {
        matches!(self, Category::QaAutomation | Category::QaManual)
    }

    pub fn is_developer(self) -> bool {
        !self.is_qa()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::QaAutomation => "qa_automation",
            Category::QaManual => "qa_manual",
            Category::DevPython => "dev_python",
            Category::DevJava => "dev_java",
            Category::DevFrontend => "dev_frontend",
            Category::DevFullstack => "dev_fullstack",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Experience tier requested by a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    SemiSenior,
    Senior,
}

impl Seniority {
    pub const ALL: [Seniority; 3] = [Seniority::Junior, Seniority::SemiSenior, Seniority::Senior];

    pub fn as_str(self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::SemiSenior => "semi_senior",
            Seniority::Senior => "senior",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the classifier. `points` is the winning category's tally, kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub seniority: Seniority,
    pub points: u32,
}
