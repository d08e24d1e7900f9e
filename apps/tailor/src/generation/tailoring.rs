//! Tailoring — picks the resume title, summary and highlight bullets for an
//! accepted posting.
//!
//! Output is a plain decision payload; `documents` decides how it is laid out.

use serde::{Deserialize, Serialize};

use crate::matching::fit_scoring::FitResult;
use crate::models::classification::{Category, Classification, Seniority};

/// Resume adjustments for one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoringPlan {
    pub title: String,
    pub summary: String,
    pub highlights: Vec<String>,
    /// Detected technologies worth naming that the plan does not mention yet.
    pub missing_keywords: Vec<String>,
}

struct Template {
    title: &'static str,
    summary: &'static str,
    highlights: &'static [&'static str],
}

const BASE_PROFILE: &str = "with experience in data validation, systems testing and \
    application development in agile teams and microservice architectures.";

static QA_AUTOMATION: Template = Template {
    title: "QA Automation Engineer & Full Stack Developer",
    summary: "Specialised in test automation with Selenium, building testing frameworks and \
        full stack development. Combines development and QA on critical projects.",
    highlights: &[
        "Built automated suites with Selenium WebDriver in Java and Python",
        "Applied the Page Object Model to keep test code reusable and scalable",
        "Automated REST API tests with response and data validations",
        "Developed and tested features side by side on municipal projects",
    ],
};

static QA_MANUAL: Template = Template {
    title: "QA Manual Engineer & Full Stack Developer",
    summary: "Specialised in functional frontend and backend testing focused on validating \
        critical data. Combines development with manual testing.",
    highlights: &[
        "Executed manual test cases on critical in-house systems",
        "Cross-validated systems and databases with deep knowledge of the code",
        "Documented defects and functional evidence in detail",
        "Tested features built with Python/FastAPI and Next.js",
    ],
};

static DEV_PYTHON: Template = Template {
    title: "Python Full Stack Developer & QA Engineer",
    summary: "Python developer with a quality focus. Experienced with FastAPI, REST API \
        development and PostgreSQL integration, backed by testing expertise.",
    highlights: &[
        "Built scalable REST APIs with Python and FastAPI on municipal projects",
        "Implemented microservices with testing built in from the start",
        "Optimised SQL queries and managed PostgreSQL databases",
        "Built dashboards and admin panels with Vue.js and Quasar",
    ],
};

static DEV_JAVA: Template = Template {
    title: "Java Developer & QA Engineer",
    summary: "Developer with a solid Python/FastAPI base and QA experience. Backend \
        development and testing practice provide a strong footing for Java work.",
    highlights: &[
        "Experience transferable from Python/FastAPI to the Java/Spring ecosystem",
        "Solid base in REST API and microservice development",
        "Hands-on testing experience that complements development",
        "Familiar with agile methodologies and development best practices",
    ],
};

const RELEVANT_TECHNOLOGIES: &[&str] = &[
    "selenium",
    "java",
    "spring boot",
    "automatización",
    "katalon",
    "uft",
];

fn template_for(category: Category) -> &'static Template {
    match category {
        Category::QaAutomation => &QA_AUTOMATION,
        Category::DevPython => &DEV_PYTHON,
        Category::DevJava => &DEV_JAVA,
        // No dedicated template; the manual QA profile is the closest fit.
        Category::QaManual | Category::DevFrontend | Category::DevFullstack => &QA_MANUAL,
    }
}

fn title_for(classification: &Classification, template: &Template) -> String {
    if classification.category != Category::DevJava {
        return template.title.to_string();
    }
    let level = match classification.seniority {
        Seniority::Junior => "Junior",
        Seniority::SemiSenior => "SSR",
        Seniority::Senior => "Senior",
    };
    format!("Java {level} Developer & QA Engineer")
}

fn detected_any(fit: &FitResult, terms: &[&str]) -> bool {
    terms.iter().any(|t| fit.detected_keywords.contains(*t))
}

/// Bullets driven by what the posting asks for, appended after the template's.
fn keyword_highlights(fit: &FitResult, category: Category) -> Vec<&'static str> {
    let mut bullets = Vec::new();

    if detected_any(fit, &["git", "github", "gitlab"]) || category.is_developer() {
        bullets.push(
            "Managed code with Git, including branching strategies and code review on shared projects",
        );
    }
    if detected_any(fit, &["deploy", "ci/cd", "jenkins", "docker"]) {
        bullets.push("Took part in deployment processes and branch management across environments");
    }
    if category == Category::DevJava && detected_any(fit, &["java"]) {
        bullets.push("Solid backend foundation transferable to Java/Spring Boot");
        bullets.push("REST API experience that carries over to the Java ecosystem");
    }
    if detected_any(fit, &["postgresql", "mysql", "sql"]) {
        bullets.push("Optimised SQL queries and designed database schemas");
    }
    if detected_any(fit, &["scrum", "kanban", "agile"]) {
        bullets.push("Active in agile ceremonies and collaborative cross-functional teams");
    }
    if detected_any(fit, &["api", "rest", "microservicios"]) {
        bullets.push("Designed and implemented REST APIs following sound architecture practices");
    }

    bullets
}

/// Builds the tailoring plan for an accepted posting.
pub fn plan_tailoring(classification: &Classification, fit: &FitResult) -> TailoringPlan {
    let template = template_for(classification.category);
    let title = title_for(classification, template);
    let summary = format!("{} {BASE_PROFILE} {}", template.title, template.summary);

    let mut highlights: Vec<String> = template.highlights.iter().map(|s| s.to_string()).collect();
    highlights.extend(
        keyword_highlights(fit, classification.category)
            .into_iter()
            .map(str::to_string),
    );
    match classification.seniority {
        Seniority::Junior => {
            highlights.push("Focused on continuous learning and picking up new technologies".to_string())
        }
        Seniority::Senior => {
            highlights.push("Mentored junior developers and led projects technically".to_string())
        }
        Seniority::SemiSenior => {}
    }

    let plan_text = format!("{title}\n{summary}\n{}", highlights.join("\n")).to_lowercase();
    let missing_keywords = fit
        .detected_keywords
        .iter()
        .filter(|kw| RELEVANT_TECHNOLOGIES.contains(&kw.as_str()))
        .filter(|kw| !plan_text.contains(kw.as_str()))
        .cloned()
        .collect();

    TailoringPlan {
        title,
        summary,
        highlights,
        missing_keywords,
    }
}

/// `"spring boot"` → `"Spring Boot"`.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
