//! Job board storage with SQLite backend.
//!
//! Plain CRUD over jobs, applications, and reviewer comments. Handlers
//! consume this as a key-value style interface; no business logic lives
//! here beyond the active-job check on application submission.

use crate::store::models::{
    AdminJobRow, Application, ApplicationComment, ApplicationRow, Job, JobSummary, NewApplication,
    NewJob, UpdateJob,
};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

/// Job board storage
pub struct JobStore {
    db_path: String,
}

impl JobStore {
    /// Create a new store and initialize the schema
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        Ok(conn)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS jobs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                who_we_are_looking_for TEXT NOT NULL,
                how_to_apply TEXT NOT NULL,
                location TEXT NOT NULL,
                salary TEXT,
                job_type TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS applications (
                id TEXT PRIMARY KEY,
                job_id TEXT NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL,
                linked_in TEXT NOT NULL,
                resume TEXT NOT NULL,
                cover_letter TEXT,
                status TEXT NOT NULL DEFAULT 'pending',
                applied_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS application_comments (
                id TEXT PRIMARY KEY,
                application_id TEXT NOT NULL
                    REFERENCES applications(id) ON DELETE CASCADE,
                admin_email TEXT NOT NULL,
                comment TEXT NOT NULL,
                fitment_tag TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    // ===== Jobs =====

    /// Public listing: active jobs, newest first
    pub fn list_active_jobs(&self) -> Result<Vec<JobSummary>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, location, salary, job_type, created_at
             FROM jobs WHERE status = 'active' ORDER BY created_at DESC",
        )?;

        let jobs = stmt
            .query_map([], |row| {
                Ok(JobSummary {
                    id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
                    title: row.get(1)?,
                    description: row.get(2)?,
                    location: row.get(3)?,
                    salary: row.get(4)?,
                    job_type: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(jobs)
    }

    /// Public detail view: a single active job
    pub fn get_active_job(&self, id: &Uuid) -> Result<Option<Job>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, who_we_are_looking_for, how_to_apply,
                    location, salary, job_type, status, created_at
             FROM jobs WHERE id = ?1 AND status = 'active'",
        )?;

        optional_row(stmt.query_row(params![id.to_string()], row_to_job))
    }

    /// Admin listing: every job with its application count, newest first
    pub fn list_jobs_admin(&self) -> Result<Vec<AdminJobRow>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT j.id, j.title, j.description, j.who_we_are_looking_for,
                    j.how_to_apply, j.location, j.salary, j.job_type, j.status,
                    j.created_at, COUNT(a.id)
             FROM jobs j
             LEFT JOIN applications a ON a.job_id = j.id
             GROUP BY j.id
             ORDER BY j.created_at DESC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(AdminJobRow {
                    job: row_to_job(row)?,
                    application_count: row.get(10)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn get_job(&self, id: &Uuid) -> Result<Option<Job>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, who_we_are_looking_for, how_to_apply,
                    location, salary, job_type, status, created_at
             FROM jobs WHERE id = ?1",
        )?;

        optional_row(stmt.query_row(params![id.to_string()], row_to_job))
    }

    pub fn create_job(&self, new_job: NewJob) -> Result<Job> {
        let job = Job {
            id: Uuid::new_v4(),
            title: new_job.title,
            description: new_job.description,
            who_we_are_looking_for: new_job.who_we_are_looking_for,
            how_to_apply: new_job.how_to_apply,
            location: new_job.location,
            salary: new_job.salary,
            job_type: new_job.job_type.unwrap_or_else(|| "full-time".to_string()),
            status: new_job.status.unwrap_or_else(|| "active".to_string()),
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = self.open()?;
        conn.execute(
            "INSERT INTO jobs (id, title, description, who_we_are_looking_for,
                               how_to_apply, location, salary, job_type, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                job.id.to_string(),
                job.title,
                job.description,
                job.who_we_are_looking_for,
                job.how_to_apply,
                job.location,
                job.salary,
                job.job_type,
                job.status,
                job.created_at,
            ],
        )
        .context("Failed to insert job")?;

        Ok(job)
    }

    /// Overlay the provided fields onto the stored job. Returns None when
    /// the job does not exist.
    pub fn update_job(&self, id: &Uuid, changes: UpdateJob) -> Result<Option<Job>> {
        let Some(mut job) = self.get_job(id)? else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            job.title = title;
        }
        if let Some(description) = changes.description {
            job.description = description;
        }
        if let Some(who) = changes.who_we_are_looking_for {
            job.who_we_are_looking_for = who;
        }
        if let Some(how) = changes.how_to_apply {
            job.how_to_apply = how;
        }
        if let Some(location) = changes.location {
            job.location = location;
        }
        if let Some(salary) = changes.salary {
            job.salary = Some(salary);
        }
        if let Some(status) = changes.status {
            job.status = status;
        }

        let conn = self.open()?;
        conn.execute(
            "UPDATE jobs SET title = ?2, description = ?3, who_we_are_looking_for = ?4,
                             how_to_apply = ?5, location = ?6, salary = ?7, status = ?8
             WHERE id = ?1",
            params![
                job.id.to_string(),
                job.title,
                job.description,
                job.who_we_are_looking_for,
                job.how_to_apply,
                job.location,
                job.salary,
                job.status,
            ],
        )
        .context("Failed to update job")?;

        Ok(Some(job))
    }

    /// Delete a job and (via cascade) its applications and comments
    pub fn delete_job(&self, id: &Uuid) -> Result<bool> {
        let conn = self.open()?;
        let rows = conn.execute("DELETE FROM jobs WHERE id = ?1", params![id.to_string()])?;
        Ok(rows > 0)
    }

    // ===== Applications =====

    /// Submit an application. Returns None when the target job is missing
    /// or no longer active.
    pub fn create_application(&self, submission: NewApplication) -> Result<Option<Application>> {
        if self.get_active_job(&submission.job_id)?.is_none() {
            return Ok(None);
        }

        let application = Application {
            id: Uuid::new_v4(),
            job_id: submission.job_id,
            full_name: submission.full_name,
            email: submission.email,
            phone: submission.phone,
            linked_in: submission.linked_in,
            resume: submission.resume,
            cover_letter: submission.cover_letter,
            status: "pending".to_string(),
            applied_at: Utc::now().to_rfc3339(),
        };

        let conn = self.open()?;
        conn.execute(
            "INSERT INTO applications (id, job_id, full_name, email, phone,
                                       linked_in, resume, cover_letter, status, applied_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                application.id.to_string(),
                application.job_id.to_string(),
                application.full_name,
                application.email,
                application.phone,
                application.linked_in,
                application.resume,
                application.cover_letter,
                application.status,
                application.applied_at,
            ],
        )
        .context("Failed to insert application")?;

        Ok(Some(application))
    }

    /// Admin listing: every application with its job context, newest first
    pub fn list_applications(&self) -> Result<Vec<ApplicationRow>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT a.id, a.job_id, a.full_name, a.email, a.phone, a.linked_in,
                    a.resume, a.cover_letter, a.status, a.applied_at,
                    j.title, j.location
             FROM applications a
             JOIN jobs j ON j.id = a.job_id
             ORDER BY a.applied_at DESC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ApplicationRow {
                    application: row_to_application(row)?,
                    job_title: row.get(10)?,
                    job_location: row.get(11)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn get_application(&self, id: &Uuid) -> Result<Option<Application>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, job_id, full_name, email, phone, linked_in, resume,
                    cover_letter, status, applied_at
             FROM applications WHERE id = ?1",
        )?;

        optional_row(stmt.query_row(params![id.to_string()], row_to_application))
    }

    pub fn update_application_status(
        &self,
        id: &Uuid,
        status: &str,
    ) -> Result<Option<Application>> {
        let conn = self.open()?;
        let rows = conn.execute(
            "UPDATE applications SET status = ?2 WHERE id = ?1",
            params![id.to_string(), status],
        )?;

        if rows == 0 {
            return Ok(None);
        }
        self.get_application(id)
    }

    pub fn delete_application(&self, id: &Uuid) -> Result<bool> {
        let conn = self.open()?;
        let rows = conn.execute(
            "DELETE FROM applications WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(rows > 0)
    }

    // ===== Comments =====

    /// Reviewer comments for an application, newest first
    pub fn list_comments(&self, application_id: &Uuid) -> Result<Vec<ApplicationComment>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, application_id, admin_email, comment, fitment_tag, created_at
             FROM application_comments WHERE application_id = ?1
             ORDER BY created_at DESC",
        )?;

        let comments = stmt
            .query_map(params![application_id.to_string()], row_to_comment)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(comments)
    }

    /// Attach a reviewer comment. Returns None when the application does
    /// not exist.
    pub fn create_comment(
        &self,
        application_id: &Uuid,
        admin_email: &str,
        comment: &str,
        fitment_tag: Option<String>,
    ) -> Result<Option<ApplicationComment>> {
        if self.get_application(application_id)?.is_none() {
            return Ok(None);
        }

        let record = ApplicationComment {
            id: Uuid::new_v4(),
            application_id: *application_id,
            admin_email: admin_email.to_string(),
            comment: comment.to_string(),
            fitment_tag,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = self.open()?;
        conn.execute(
            "INSERT INTO application_comments
                (id, application_id, admin_email, comment, fitment_tag, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id.to_string(),
                record.application_id.to_string(),
                record.admin_email,
                record.comment,
                record.fitment_tag,
                record.created_at,
            ],
        )
        .context("Failed to insert comment")?;

        Ok(Some(record))
    }
}

fn row_to_job(row: &Row) -> rusqlite::Result<Job> {
    Ok(Job {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
        title: row.get(1)?,
        description: row.get(2)?,
        who_we_are_looking_for: row.get(3)?,
        how_to_apply: row.get(4)?,
        location: row.get(5)?,
        salary: row.get(6)?,
        job_type: row.get(7)?,
        status: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn row_to_application(row: &Row) -> rusqlite::Result<Application> {
    Ok(Application {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
        job_id: Uuid::parse_str(&row.get::<_, String>(1)?).unwrap(),
        full_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        linked_in: row.get(5)?,
        resume: row.get(6)?,
        cover_letter: row.get(7)?,
        status: row.get(8)?,
        applied_at: row.get(9)?,
    })
}

fn row_to_comment(row: &Row) -> rusqlite::Result<ApplicationComment> {
    Ok(ApplicationComment {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
        application_id: Uuid::parse_str(&row.get::<_, String>(1)?).unwrap(),
        admin_email: row.get(2)?,
        comment: row.get(3)?,
        fitment_tag: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn optional_row<T>(result: rusqlite::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
