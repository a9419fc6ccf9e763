use crate::cli::{DatabaseArgs, ExportArgs, ResetArgs, SubmissionsArgs};
use crate::infra::open_store;
use std::fs::File;
use std::io::{self, Write};
use yakkai_wellness::error::AppError;
use yakkai_wellness::intake::{write_assessments_csv, IntakeRepository, SubmissionSample};

pub(crate) fn init_database(args: DatabaseArgs) -> Result<(), AppError> {
    let (store, path) = open_store(&args)?;
    store.init()?;
    println!("Tables created/verified in {}", path.display());
    Ok(())
}

pub(crate) fn reset_database(args: ResetArgs) -> Result<(), AppError> {
    if !args.yes {
        println!("Refusing to drop wellness_assessments and companies without --yes");
        return Ok(());
    }

    let (store, path) = open_store(&args.database)?;
    store.reset()?;
    println!("Database reset complete: {}", path.display());
    Ok(())
}

pub(crate) fn show_submissions(args: SubmissionsArgs) -> Result<(), AppError> {
    let (store, path) = open_store(&args.database)?;
    let assessments = store.count_assessments()?;
    let companies = store.count_companies()?;
    let recent = store.recent_assessments(args.limit)?;

    println!("Database: {}", path.display());
    println!("- {assessments} wellness assessments | {companies} registered companies");
    if recent.is_empty() {
        println!("No assessments recorded yet");
        return Ok(());
    }

    println!("Most recent assessments:");
    for sample in &recent {
        println!("  - {}", format_sample(sample));
    }
    Ok(())
}

pub(crate) fn export_assessments(args: ExportArgs) -> Result<(), AppError> {
    let (store, _) = open_store(&args.database)?;
    let records = store.all_assessments()?;

    let written = match args.output {
        Some(path) => {
            let rows = write_assessments_csv(&records, File::create(&path)?)?;
            eprintln!("Exported {rows} assessments to {}", path.display());
            rows
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let rows = write_assessments_csv(&records, &mut handle)?;
            handle.flush()?;
            rows
        }
    };

    tracing::debug!(written, "assessment export finished");
    Ok(())
}

fn format_sample(sample: &SubmissionSample) -> String {
    let score = sample
        .total_score
        .map(|score| score.to_string())
        .unwrap_or_else(|| "-".to_string());
    let submitted = sample
        .submission_date
        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown date".to_string());

    format!(
        "#{} [{}] {} | score {} | {}",
        sample.id.0,
        sample.company_code.as_deref().unwrap_or("-"),
        sample.name.as_deref().unwrap_or("(no name)"),
        score,
        submitted
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use yakkai_wellness::intake::AssessmentId;

    #[test]
    fn format_sample_renders_known_fields() {
        let sample = SubmissionSample {
            id: AssessmentId(42),
            company_code: Some("ABC123".to_string()),
            name: Some("Jane Doe".to_string()),
            total_score: Some(51),
            submission_date: NaiveDate::from_ymd_opt(2025, 6, 21)
                .and_then(|day| day.and_hms_opt(9, 30, 0)),
        };
        assert_eq!(
            format_sample(&sample),
            "#42 [ABC123] Jane Doe | score 51 | 2025-06-21 09:30"
        );
    }

    #[test]
    fn format_sample_marks_missing_fields() {
        let sample = SubmissionSample {
            id: AssessmentId(1),
            company_code: None,
            name: None,
            total_score: None,
            submission_date: None,
        };
        assert_eq!(
            format_sample(&sample),
            "#1 [-] (no name) | score - | unknown date"
        );
    }
}
