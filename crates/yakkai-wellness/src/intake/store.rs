use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row, ToSql};

use super::domain::{
    AssessmentId, AssessmentRecord, CompanyId, CompanyRecord, NewAssessment, NewCompany,
    SubmissionSample, ANSWER_COUNT,
};
use super::repository::{IntakeRepository, RepositoryError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS wellness_assessments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_code VARCHAR(50),
    q1 VARCHAR(10),
    q2 VARCHAR(10),
    q3 VARCHAR(10),
    q4 VARCHAR(10),
    q5 VARCHAR(10),
    q6 VARCHAR(10),
    q7 VARCHAR(10),
    q8 VARCHAR(10),
    q9 VARCHAR(10),
    q10 VARCHAR(10),
    q11 VARCHAR(10),
    q12 VARCHAR(10),
    name VARCHAR(100),
    mobile VARCHAR(20),
    email VARCHAR(120),
    designation VARCHAR(100),
    total_score INTEGER,
    submission_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS companies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_name VARCHAR(100) NOT NULL,
    contact_person VARCHAR(100) NOT NULL,
    email VARCHAR(120) NOT NULL UNIQUE,
    phone VARCHAR(20) NOT NULL,
    employee_count INTEGER,
    industry VARCHAR(100),
    company_code VARCHAR(50) NOT NULL UNIQUE,
    created_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_assessments_company_code ON wellness_assessments(company_code);
"#;

const ASSESSMENT_COLUMNS: &str = "id, company_code, q1, q2, q3, q4, q5, q6, q7, q8, q9, q10, \
     q11, q12, name, mobile, email, designation, total_score, submission_date";

const COMPANY_COLUMNS: &str = "id, company_name, contact_person, email, phone, employee_count, \
     industry, company_code, created_date";

/// SQLite-backed record store. One connection, guarded by a mutex; every insert runs
/// in its own transaction.
pub struct SqliteIntakeStore {
    conn: Mutex<Connection>,
}

impl SqliteIntakeStore {
    /// Opens (or creates) the database file and ensures the schema exists.
    /// `:memory:` opens a private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| RepositoryError::Storage(err.to_string()))?;
            }
        }
        let store = Self {
            conn: Mutex::new(Connection::open(path)?),
        };
        store.init()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        store.init()?;
        Ok(store)
    }

    pub fn init(&self) -> Result<(), RepositoryError> {
        self.lock()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Drops both tables and recreates them empty.
    pub fn reset(&self) -> Result<(), RepositoryError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute_batch(
            "DROP TABLE IF EXISTS wellness_assessments;
             DROP TABLE IF EXISTS companies;",
        )?;
        tx.execute_batch(SCHEMA)?;
        tx.commit()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> Result<bool, RepositoryError> {
        let tables: i64 = self.lock()?.query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'table' AND name IN ('wellness_assessments', 'companies')",
            [],
            |row| row.get(0),
        )?;
        Ok(tables == 2)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, RepositoryError> {
        self.conn
            .lock()
            .map_err(|_| RepositoryError::Storage("store connection lock poisoned".to_string()))
    }

    fn count(&self, table: &str) -> Result<u64, RepositoryError> {
        let total: i64 =
            self.lock()?
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}

impl IntakeRepository for SqliteIntakeStore {
    fn insert_assessment(
        &self,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, RepositoryError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let mut values: Vec<&dyn ToSql> = Vec::with_capacity(ANSWER_COUNT + 6);
        values.push(&assessment.company_code);
        values.extend(assessment.answers.iter().map(|answer| answer as &dyn ToSql));
        values.push(&assessment.name);
        values.push(&assessment.mobile);
        values.push(&assessment.email);
        values.push(&assessment.designation);
        values.push(&assessment.total_score);

        tx.execute(
            "INSERT INTO wellness_assessments
                (company_code, q1, q2, q3, q4, q5, q6, q7, q8, q9, q10, q11, q12,
                 name, mobile, email, designation, total_score)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                     ?14, ?15, ?16, ?17, ?18)",
            values.as_slice(),
        )?;
        let id = tx.last_insert_rowid();
        let stored = tx.query_row(
            &format!("SELECT {ASSESSMENT_COLUMNS} FROM wellness_assessments WHERE id = ?1"),
            [id],
            row_to_assessment,
        )?;
        tx.commit()?;
        Ok(stored)
    }

    fn insert_company(&self, company: NewCompany) -> Result<CompanyRecord, RepositoryError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO companies
                (company_name, contact_person, email, phone, employee_count, industry, company_code)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                company.company_name,
                company.contact_person,
                company.email,
                company.phone,
                company.employee_count,
                company.industry,
                company.company_code,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let stored = tx.query_row(
            &format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = ?1"),
            [id],
            row_to_company,
        )?;
        tx.commit()?;
        Ok(stored)
    }

    fn fetch_assessment(
        &self,
        id: AssessmentId,
    ) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let record = self
            .lock()?
            .query_row(
                &format!("SELECT {ASSESSMENT_COLUMNS} FROM wellness_assessments WHERE id = ?1"),
                [id.0],
                row_to_assessment,
            )
            .optional()?;
        Ok(record)
    }

    fn fetch_company(&self, id: CompanyId) -> Result<Option<CompanyRecord>, RepositoryError> {
        let record = self
            .lock()?
            .query_row(
                &format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = ?1"),
                [id.0],
                row_to_company,
            )
            .optional()?;
        Ok(record)
    }

    fn find_company_by_code(&self, code: &str) -> Result<Option<CompanyRecord>, RepositoryError> {
        let record = self
            .lock()?
            .query_row(
                &format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE company_code = ?1"),
                [code],
                row_to_company,
            )
            .optional()?;
        Ok(record)
    }

    fn assessments_for_affiliation(
        &self,
        company_code: &str,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ASSESSMENT_COLUMNS} FROM wellness_assessments
             WHERE company_code = ?1 ORDER BY id"
        ))?;
        let rows = stmt.query_map([company_code], row_to_assessment)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn recent_assessments(&self, limit: usize) -> Result<Vec<SubmissionSample>, RepositoryError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, company_code, name, total_score, submission_date
             FROM wellness_assessments ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit], |row| {
            Ok(SubmissionSample {
                id: AssessmentId(row.get(0)?),
                company_code: row.get(1)?,
                name: row.get(2)?,
                total_score: row.get(3)?,
                submission_date: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn all_assessments(&self) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ASSESSMENT_COLUMNS} FROM wellness_assessments ORDER BY id"
        ))?;
        let rows = stmt.query_map([], row_to_assessment)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn count_assessments(&self) -> Result<u64, RepositoryError> {
        self.count("wellness_assessments")
    }

    fn count_companies(&self) -> Result<u64, RepositoryError> {
        self.count("companies")
    }
}

fn row_to_assessment(row: &Row<'_>) -> rusqlite::Result<AssessmentRecord> {
    let mut answers: [Option<String>; ANSWER_COUNT] = Default::default();
    for (index, answer) in answers.iter_mut().enumerate() {
        *answer = row.get(index + 2)?;
    }

    Ok(AssessmentRecord {
        id: AssessmentId(row.get(0)?),
        company_code: row.get(1)?,
        answers,
        name: row.get(14)?,
        mobile: row.get(15)?,
        email: row.get(16)?,
        designation: row.get(17)?,
        total_score: row.get(18)?,
        submission_date: row.get(19)?,
    })
}

fn row_to_company(row: &Row<'_>) -> rusqlite::Result<CompanyRecord> {
    Ok(CompanyRecord {
        id: CompanyId(row.get(0)?),
        company_name: row.get(1)?,
        contact_person: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        employee_count: row.get(5)?,
        industry: row.get(6)?,
        company_code: row.get(7)?,
        created_date: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::domain::AssessmentForm;

    fn company(code: &str, email: &str) -> NewCompany {
        NewCompany {
            company_name: Some("Acme Corp".to_string()),
            contact_person: Some("Priya Raman".to_string()),
            email: Some(email.to_string()),
            phone: Some("9876543210".to_string()),
            employee_count: Some(120),
            industry: Some("Manufacturing".to_string()),
            company_code: Some(code.to_string()),
        }
    }

    #[test]
    fn open_in_memory_creates_both_tables() {
        let store = SqliteIntakeStore::open_in_memory().expect("store opens");
        assert!(store.is_initialized().expect("schema query"));
        assert_eq!(store.count_assessments().expect("count"), 0);
        assert_eq!(store.count_companies().expect("count"), 0);
    }

    #[test]
    fn insert_assessment_assigns_sequential_ids_and_timestamp() {
        let store = SqliteIntakeStore::open_in_memory().expect("store opens");
        let first = store
            .insert_assessment(NewAssessment::from_form("self", AssessmentForm::default()))
            .expect("first insert");
        let second = store
            .insert_assessment(NewAssessment::from_form("self", AssessmentForm::default()))
            .expect("second insert");

        assert_eq!(second.id.0, first.id.0 + 1);
        assert!(first.submission_date.is_some());
        assert_eq!(first.total_score, Some(0));
    }

    #[test]
    fn duplicate_company_email_leaves_no_extra_row() {
        let store = SqliteIntakeStore::open_in_memory().expect("store opens");
        store
            .insert_company(company("ACME1", "hr@acme.test"))
            .expect("first registration");

        let err = store
            .insert_company(company("ACME2", "hr@acme.test"))
            .expect_err("duplicate email rejected");
        assert!(err.to_string().contains("UNIQUE"));
        assert_eq!(store.count_companies().expect("count"), 1);
        assert!(store
            .find_company_by_code("ACME2")
            .expect("lookup")
            .is_none());
    }

    #[test]
    fn missing_required_company_column_is_rejected() {
        let store = SqliteIntakeStore::open_in_memory().expect("store opens");
        let mut incomplete = company("ACME1", "hr@acme.test");
        incomplete.phone = None;

        let err = store
            .insert_company(incomplete)
            .expect_err("null phone rejected");
        assert!(err.to_string().contains("NOT NULL"));
        assert_eq!(store.count_companies().expect("count"), 0);
    }

    #[test]
    fn reset_discards_existing_rows() {
        let store = SqliteIntakeStore::open_in_memory().expect("store opens");
        store
            .insert_assessment(NewAssessment::from_form("ABC123", AssessmentForm::default()))
            .expect("insert");
        store
            .insert_company(company("ACME1", "hr@acme.test"))
            .expect("insert");

        store.reset().expect("reset succeeds");

        assert!(store.is_initialized().expect("schema query"));
        assert_eq!(store.count_assessments().expect("count"), 0);
        assert_eq!(store.count_companies().expect("count"), 0);
    }

    #[test]
    fn recent_assessments_returns_newest_first() {
        let store = SqliteIntakeStore::open_in_memory().expect("store opens");
        for code in ["A", "B", "C"] {
            store
                .insert_assessment(NewAssessment::from_form(code, AssessmentForm::default()))
                .expect("insert");
        }

        let recent = store.recent_assessments(2).expect("recent");
        let codes: Vec<_> = recent
            .iter()
            .map(|sample| sample.company_code.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(codes, vec!["C", "B"]);
    }
}
