//! Admin Storage
//! Mission: Securely store and manage admin accounts with SQLite

use crate::auth::models::Admin;
use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::env;
use tracing::{info, warn};
use uuid::Uuid;

/// Admin account storage with SQLite backend
pub struct AdminStore {
    db_path: String,
}

impl AdminStore {
    /// Create a new admin store and initialize the schema
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS admins (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        self.create_default_admin(&conn)?;

        Ok(())
    }

    /// Seed a default admin account for initial setup
    fn create_default_admin(&self, conn: &Connection) -> Result<()> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))
            .context("Failed to count admin accounts")?;

        if count == 0 {
            let email =
                env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@jobboard.com".to_string());
            let password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

            let password_hash = hash(&password, DEFAULT_COST).context("Failed to hash password")?;

            conn.execute(
                "INSERT INTO admins (id, email, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    Uuid::new_v4().to_string(),
                    email,
                    password_hash,
                    Utc::now().to_rfc3339(),
                ],
            )
            .context("Failed to insert default admin")?;

            info!("🔐 Default admin account created ({})", email);
            warn!("⚠️  CHANGE DEFAULT PASSWORD IN PRODUCTION!");
        }

        Ok(())
    }

    /// Get admin by email
    pub fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, email, password_hash, created_at FROM admins WHERE email = ?1",
        )?;

        let admin_result = stmt.query_row(params![email], |row| {
            Ok(Admin {
                id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
                email: row.get(1)?,
                password_hash: row.get(2)?,
                created_at: row.get(3)?,
            })
        });

        match admin_result {
            Ok(admin) => Ok(Some(admin)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify email and password
    pub fn verify_password(&self, email: &str, password: &str) -> Result<bool> {
        match self.get_admin_by_email(email)? {
            Some(admin) => {
                let valid =
                    verify(password, &admin.password_hash).context("Failed to verify password")?;
                Ok(valid)
            }
            None => Ok(false),
        }
    }

    /// Create a new admin account
    pub fn create_admin(&self, email: &str, password: &str) -> Result<Admin> {
        let password_hash = hash(password, DEFAULT_COST).context("Failed to hash password")?;

        let admin = Admin {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO admins (id, email, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                admin.id.to_string(),
                admin.email,
                admin.password_hash,
                admin.created_at,
            ],
        )
        .context("Failed to insert admin")?;

        info!("✅ Created admin account: {}", admin.email);

        Ok(admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (AdminStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = AdminStore::new(db_path).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_default_admin_seeded() {
        let (store, temp) = create_test_store();

        let conn = Connection::open(temp.path()).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);

        // Seeding is skipped once an admin exists.
        store.init_db().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_password_verification() {
        let (store, _temp) = create_test_store();

        store
            .create_admin("reviewer@jobboard.test", "hunter2hunter2")
            .unwrap();

        assert!(store
            .verify_password("reviewer@jobboard.test", "hunter2hunter2")
            .unwrap());
        assert!(!store
            .verify_password("reviewer@jobboard.test", "wrongpassword")
            .unwrap());
        assert!(!store.verify_password("nobody@jobboard.test", "pass").unwrap());
    }

    #[test]
    fn test_create_and_retrieve_admin() {
        let (store, _temp) = create_test_store();

        let admin = store
            .create_admin("hiring@jobboard.test", "password123")
            .unwrap();

        let retrieved = store
            .get_admin_by_email("hiring@jobboard.test")
            .unwrap()
            .expect("admin should exist");
        assert_eq!(retrieved.id, admin.id);
        assert_eq!(retrieved.email, "hiring@jobboard.test");
    }
}
