//! Wellness assessment intake, company registration, and the SQLite-backed record store.
//!
//! Submissions arrive as URL-encoded forms, are scored, and are written in a single
//! transaction per request. Read-side helpers back the diagnostics endpoint and CLI.

pub mod domain;
pub mod export;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentForm, AssessmentId, AssessmentRecord, CompanyForm, CompanyId, CompanyRecord,
    NewAssessment, NewCompany, SubmissionSample, ANSWER_COUNT, CORPORATE_PAGE_AFFILIATION,
};
pub use export::{write_assessments_csv, ExportError};
pub use repository::{IntakeRepository, RepositoryError};
pub use router::{intake_router, CONFIRMATION_PATH};
pub use scoring::{answer_value, total_score};
pub use service::{IntakeError, IntakeService, SubmissionDigest, DIAGNOSTIC_SAMPLE_LIMIT};
pub use store::SqliteIntakeStore;
