//! PostgreSQL-backed student store.
//!
//! Each [`DieselStudentStore::connect`] call establishes a dedicated
//! `AsyncPgConnection`. The connection runs in autocommit mode, so the table
//! create and the insert are each committed as soon as they return.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::QueryableByName;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Double, Integer, Text, Timestamptz};
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{StudentStore, StudentStoreError, StudentStoreSession};
use crate::domain::{NewStudent, RegisteredStudent, StudentId};

use super::connection::ConnectionSettings;
use super::diesel_error_mapping::{
    is_concurrent_create, map_connection_error, map_insert_error, map_schema_error,
    map_settings_error,
};

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    address VARCHAR(255),
    age INTEGER,
    qualification VARCHAR(255),
    percentage NUMERIC(5, 2),
    year INTEGER,
    registration_date TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const INSERT_SQL: &str = r#"
INSERT INTO students (name, address, age, qualification, percentage, year)
VALUES ($1, $2, $3, $4, $5, $6)
RETURNING id, registration_date
"#;

#[derive(QueryableByName)]
struct InsertedStudentRow {
    #[diesel(sql_type = BigInt)]
    id: i64,
    #[diesel(sql_type = Timestamptz)]
    registration_date: DateTime<Utc>,
}

/// Diesel-backed implementation of the [`StudentStore`] port.
#[derive(Debug, Clone)]
pub struct DieselStudentStore {
    settings: ConnectionSettings,
}

impl DieselStudentStore {
    /// Create a store that connects with the given settings on demand.
    pub fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl StudentStore for DieselStudentStore {
    async fn connect(&self) -> Result<Box<dyn StudentStoreSession>, StudentStoreError> {
        let url = self.settings.database_url().map_err(map_settings_error)?;
        let conn = AsyncPgConnection::establish(&url)
            .await
            .map_err(map_connection_error)?;
        debug!(
            host = self.settings.host().unwrap_or_default(),
            database = self.settings.database().unwrap_or_default(),
            "student store session opened"
        );
        Ok(Box::new(DieselStudentSession { conn }))
    }
}

/// One open connection, closed when the session is dropped.
struct DieselStudentSession {
    conn: AsyncPgConnection,
}

#[async_trait]
impl StudentStoreSession for DieselStudentSession {
    async fn ensure_schema(&mut self) -> Result<(), StudentStoreError> {
        match sql_query(CREATE_TABLE_SQL).execute(&mut self.conn).await {
            Ok(_) => Ok(()),
            Err(error) if is_concurrent_create(&error) => {
                debug!("students table created concurrently by another session");
                Ok(())
            }
            Err(error) => Err(map_schema_error(error)),
        }
    }

    async fn insert(
        &mut self,
        student: &NewStudent,
    ) -> Result<RegisteredStudent, StudentStoreError> {
        let row: InsertedStudentRow = sql_query(INSERT_SQL)
            .bind::<Text, _>(student.name())
            .bind::<Text, _>(student.address())
            .bind::<Integer, _>(student.age())
            .bind::<Text, _>(student.qualification())
            .bind::<Double, _>(student.percentage())
            .bind::<Integer, _>(student.year())
            .get_result(&mut self.conn)
            .await
            .map_err(map_insert_error)?;

        Ok(RegisteredStudent {
            id: StudentId::new(row.id),
            registration_date: row.registration_date,
        })
    }
}

impl Drop for DieselStudentSession {
    fn drop(&mut self) {
        debug!("student store session released");
    }
}
