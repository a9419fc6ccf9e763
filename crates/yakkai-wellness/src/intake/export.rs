use std::io::Write;

use super::domain::AssessmentRecord;

const HEADER: [&str; 20] = [
    "id",
    "company_code",
    "q1",
    "q2",
    "q3",
    "q4",
    "q5",
    "q6",
    "q7",
    "q8",
    "q9",
    "q10",
    "q11",
    "q12",
    "name",
    "mobile",
    "email",
    "designation",
    "total_score",
    "submission_date",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes assessments as CSV with a header row; absent values become empty cells.
/// Returns the number of data rows written.
pub fn write_assessments_csv<W: Write>(
    records: &[AssessmentRecord],
    writer: W,
) -> Result<usize, ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER)?;

    for record in records {
        let mut row = Vec::with_capacity(HEADER.len());
        row.push(record.id.0.to_string());
        row.push(record.company_code.clone().unwrap_or_default());
        row.extend(
            record
                .answers
                .iter()
                .map(|answer| answer.clone().unwrap_or_default()),
        );
        for field in [
            &record.name,
            &record.mobile,
            &record.email,
            &record.designation,
        ] {
            row.push(field.clone().unwrap_or_default());
        }
        row.push(
            record
                .total_score
                .map(|score| score.to_string())
                .unwrap_or_default(),
        );
        row.push(
            record
                .submission_date
                .map(|date| date.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        );
        out.write_record(&row)?;
    }

    out.flush()?;
    Ok(records.len())
}
