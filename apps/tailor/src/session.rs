//! Drivers that feed postings into the pipeline: an interactive prompt loop
//! and a JSON batch file.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{error, info};

use crate::errors::AppError;
use crate::generation::pipeline::{BatchReport, Outcome, Pipeline, Rejection};
use crate::models::posting::Posting;

const EXIT_WORDS: &[&str] = &["quit", "salir"];
const SEPARATOR: &str = "==================================================";

/// Reads one trimmed line; `None` on end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Reads lines until a blank line or end of input; `None` when nothing was read.
fn read_block<R: BufRead>(input: &mut R) -> Result<Option<String>, AppError> {
    let mut lines = Vec::new();
    while let Some(line) = read_line(input)? {
        if line.is_empty() {
            break;
        }
        lines.push(line);
    }
    if lines.is_empty() {
        return Ok(None);
    }
    Ok(Some(lines.join("\n")))
}

/// Prompts for employer then description until an exit word or end of input.
/// Returns how many postings were processed.
pub fn run_interactive<R: BufRead, W: Write>(
    pipeline: &Pipeline,
    mut input: R,
    mut output: W,
) -> Result<usize, AppError> {
    let mut processed = 0;

    loop {
        writeln!(output, "\n{SEPARATOR}")?;
        write!(output, ">>> Employer name (or 'quit' to finish): ")?;
        output.flush()?;

        let Some(employer) = read_line(&mut input)? else {
            break;
        };
        if EXIT_WORDS.contains(&employer.to_lowercase().as_str()) {
            break;
        }

        writeln!(output, "\n>>> Paste the posting description, then an empty line:")?;
        output.flush()?;
        let description = read_block(&mut input)?.unwrap_or_default();

        if employer.is_empty() || description.is_empty() {
            writeln!(output, "\n>>> Employer and description are both required")?;
            continue;
        }

        processed += 1;
        match pipeline.process(&Posting::new(employer.clone(), description)) {
            Ok(Outcome::Accepted(application)) => {
                writeln!(output, "\n>>> Done for {employer}!")?;
                writeln!(
                    output,
                    ">>> Position: {} ({} highlights)",
                    application.plan.title,
                    application.plan.highlights.len()
                )?;
                writeln!(
                    output,
                    ">>> Resume saved to: {}",
                    application.record.document_path.display()
                )?;
                writeln!(output, ">>> Summary saved to: {}", application.summary_path.display())?;
            }
            Ok(Outcome::Rejected(rejection)) => {
                writeln!(output, "\n>>> Not applying: {}", describe_rejection(&rejection))?;
            }
            Err(e) => {
                error!("Processing {employer} failed: {e}");
                writeln!(output, "\n>>> Error processing the posting")?;
            }
        }
    }

    info!("Interactive session finished, {processed} postings processed");
    Ok(processed)
}

pub fn describe_rejection(rejection: &Rejection) -> String {
    match rejection {
        Rejection::OutOfProfile => "outside the profile".to_string(),
        Rejection::OutOfStrategy { classification, .. } => format!(
            "{} ({}) is outside the application strategy",
            classification.category, classification.seniority
        ),
        Rejection::BelowThreshold { fit, minimum, .. } => {
            format!("fit {}% is below the {}% minimum", fit.score, minimum)
        }
    }
}

/// Reads a JSON array of `{employer, description}` objects.
pub fn load_batch(path: &Path) -> Result<Vec<Posting>, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::Validation(format!("cannot read postings file {}: {e}", path.display()))
    })?;
    let postings: Vec<Posting> = serde_json::from_str(&raw)?;
    info!("Loaded {} postings from {}", postings.len(), path.display());
    Ok(postings)
}

pub fn log_batch_summary(report: &BatchReport) {
    for item in &report.items {
        match &item.result {
            Ok(Outcome::Accepted(application)) => info!(
                "{}: applied as {} ({}%)",
                item.employer, application.record.title, application.record.fit_score
            ),
            Ok(Outcome::Rejected(rejection)) => {
                info!("{}: skipped, {}", item.employer, describe_rejection(rejection))
            }
            Err(e) => error!("{}: failed, {e}", item.employer),
        }
    }
    info!(
        "Batch finished: {} accepted, {} rejected, {} failed",
        report.accepted(),
        report.rejected(),
        report.failed()
    );
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use super::*;
    use crate::generation::documents::MarkdownDocumentWriter;
    use crate::generation::pipeline::LogNotifier;
    use crate::matching::profile::MatchingProfile;
    use crate::store::JsonApplicationStore;

    fn make_pipeline(dir: &Path) -> Pipeline {
        Pipeline::new(
            Arc::new(MatchingProfile::default()),
            Box::new(MarkdownDocumentWriter::new(dir).unwrap()),
            Box::new(JsonApplicationStore::open(dir.join("applications")).unwrap()),
            Box::new(LogNotifier),
        )
    }

    fn run(pipeline: &Pipeline, script: &str) -> (usize, String) {
        let mut out = Vec::new();
        let n = run_interactive(pipeline, Cursor::new(script.to_string()), &mut out).unwrap();
        (n, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_interactive_accepts_and_quits() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = make_pipeline(dir.path());
        let (n, out) = run(
            &pipeline,
            "Acme\nPython, FastAPI, PostgreSQL, junior\n\nquit\n",
        );

        assert_eq!(n, 1);
        assert!(out.contains(">>> Done for Acme!"));
        assert!(out.contains("Python Full Stack Developer & QA Engineer"));
        assert!(out.contains(">>> Summary saved to: "));
        let stored = JsonApplicationStore::open(dir.path().join("applications"))
            .unwrap()
            .list()
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_interactive_reports_rejection() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = make_pipeline(dir.path());
        let (n, out) = run(&pipeline, "Initech\nOracle, .NET, C#, Senior Architect\n\nSALIR\n");
        assert_eq!(n, 1);
        assert!(out.contains("Not applying: outside the profile"));
    }

    #[test]
    fn test_interactive_reads_multi_line_description() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = make_pipeline(dir.path());
        let script = "Acme\nBuscamos desarrollador\nPython y FastAPI\nPostgreSQL, junior\n\n\
                      Hooli\nQA manual\ncasos de prueba\n\nquit\n";
        let (n, out) = run(&pipeline, script);

        assert_eq!(n, 2);
        assert!(out.contains(">>> Done for Acme!"));
        assert!(out.contains(">>> Done for Hooli!"));
        let stored = JsonApplicationStore::open(dir.path().join("applications"))
            .unwrap()
            .list()
            .unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn test_description_at_end_of_input_is_still_processed() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = make_pipeline(dir.path());
        let (n, out) = run(&pipeline, "Acme\nPython, FastAPI, PostgreSQL, junior");
        assert_eq!(n, 1);
        assert!(out.contains(">>> Done for Acme!"));
    }

    #[test]
    fn test_interactive_requires_both_fields() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = make_pipeline(dir.path());
        let (n, out) = run(&pipeline, "Acme\n\nquit\n");
        assert_eq!(n, 0);
        assert!(out.contains("Employer and description are both required"));
    }

    #[test]
    fn test_interactive_stops_at_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = make_pipeline(dir.path());
        let (n, _) = run(&pipeline, "");
        assert_eq!(n, 0);
    }

    #[test]
    fn test_load_batch_reads_postings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("postings.json");
        std::fs::write(
            &path,
            r#"[{"employer": "Acme", "description": "QA manual, casos de prueba"},
                {"employer": "Hooli", "description": "Frontend junior con Vue"}]"#,
        )
        .unwrap();

        let postings = load_batch(&path).unwrap();
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[1].employer, "Hooli");
    }

    #[test]
    fn test_load_batch_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = load_batch(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(missing.code(), "VALIDATION_ERROR");

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"employer\": 1}").unwrap();
        assert_eq!(load_batch(&path).unwrap_err().code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_describe_rejection_below_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = make_pipeline(dir.path());
        let outcome = pipeline
            .process(&Posting::new("Globex", "Frontend junior con React y Angular"))
            .unwrap();
        let Outcome::Rejected(rejection) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(describe_rejection(&rejection), "fit 67% is below the 70% minimum");
    }
}
