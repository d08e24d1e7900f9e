//! Interview pitch — a short spoken introduction tailored to the category.

use crate::models::classification::{Category, Classification, Seniority};

const CLOSING: &str =
    "I'm excited to add value to the team and keep growing professionally in this role.";

/// Returns the pitch text for `employer`. Every pitch ends with the same closing line.
pub fn interview_pitch(employer: &str, classification: &Classification) -> String {
    let body = match (classification.category, classification.seniority) {
        (Category::QaAutomation, _) => format!(
            "Thank you for the opportunity at {employer}. I applied because I combine full stack \
             development with QA. I currently build features with Python/FastAPI and Next.js, and \
             I automate tests with Locust and Selenium."
        ),
        (Category::DevPython, _) => format!(
            "Thank you for the opportunity at {employer}. This role appeals to me because I have \
             solid experience building with Python/FastAPI, PostgreSQL and Vue.js frontends. My \
             QA background helps me write robust code from the start."
        ),
        (Category::DevJava, Seniority::Junior) => format!(
            "Thank you for the opportunity at {employer}. I'm interested in this junior role \
             because my Python/FastAPI and testing experience gives me a strong base to move into \
             the Java ecosystem. I'm motivated to learn and apply my backend knowledge in Java."
        ),
        (Category::DevJava, _) => format!(
            "Thank you for the opportunity at {employer}. This SSR role motivates me because my \
             backend work with Python/FastAPI, together with my QA background, lets me bring an \
             end-to-end view to Java development. My REST API and agile experience carries over \
             directly to Java/Spring."
        ),
        (Category::QaManual | Category::DevFrontend | Category::DevFullstack, _) => format!(
            "Thank you for the opportunity at {employer}. I'm excited about this role because my \
             experience combines manual QA with development. I build features and then test them, \
             which helps me catch problems from the design stage."
        ),
    };

    format!("{body} {CLOSING}")
}
