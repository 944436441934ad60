//! Student registration against embedded PostgreSQL.
//!
//! Opt-in: run with `RUN_PG_EMBEDDED=1 cargo test -- --ignored`. Each test
//! starts its own cluster and database, drives `RegistrationService` over
//! `DieselStudentStore`, and inspects the `students` table with the
//! synchronous `postgres` client.

mod support;

use std::sync::Arc;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use registration::domain::ports::RegistrationCommand;
use registration::domain::{
    RegistrationError, RegistrationService, StudentSubmission, StudentValidationError,
};
use registration::outbound::persistence::{ConnectionSettings, DieselStudentStore};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use url::Url;

use support::pg_embed::{fresh_database, test_cluster};
use support::{format_postgres_error, handle_cluster_setup_failure};

const TEST_DB: &str = "student_registration_test";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    database_url: String,
    settings: ConnectionSettings,
}

impl TestContext {
    fn service(&self) -> RegistrationService {
        RegistrationService::new(Arc::new(DieselStudentStore::new(self.settings.clone())))
    }

    fn register(
        &self,
        pairs: &[(&str, &str)],
    ) -> Result<i64, RegistrationError> {
        let submission: StudentSubmission = pairs.iter().copied().collect();
        let service = self.service();
        self.runtime
            .block_on(async { service.register(&submission).await })
            .map(|receipt| receipt.registered.id.get())
    }

    fn client(&self) -> Client {
        Client::connect(&self.database_url, NoTls)
            .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)))
    }

    fn row_count(&self) -> i64 {
        let mut client = self.client();
        let exists: bool = client
            .query_one("SELECT to_regclass('public.students') IS NOT NULL", &[])
            .unwrap_or_else(|err| panic!("check table: {}", format_postgres_error(&err)))
            .get(0);
        if !exists {
            return 0;
        }
        client
            .query_one("SELECT COUNT(*) FROM students", &[])
            .unwrap_or_else(|err| panic!("count rows: {}", format_postgres_error(&err)))
            .get(0)
    }

    fn stored_percentage(&self, id: i64) -> String {
        self.client()
            .query_one(
                "SELECT percentage::text FROM students WHERE id = $1",
                &[&id],
            )
            .unwrap_or_else(|err| panic!("fetch percentage: {}", format_postgres_error(&err)))
            .get(0)
    }
}

/// Split a cluster URL into the pieces the store assembles itself.
fn settings_from_url(database_url: &str) -> Result<ConnectionSettings, String> {
    let url = Url::parse(database_url).map_err(|err| err.to_string())?;
    let host = url.host_str().ok_or("cluster url has no host")?;
    let port = url.port().ok_or("cluster url has no port")?;
    let password = url.password().ok_or("cluster url has no password")?;
    Ok(ConnectionSettings::new()
        .with_host(host)
        .with_port(port)
        .with_user(url.username())
        .with_password(password)
        .with_database(TEST_DB))
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = fresh_database(&cluster, TEST_DB)?;
    let settings = settings_from_url(&database_url)?;
    Ok(TestContext {
        runtime,
        _cluster: cluster,
        database_url,
        settings,
    })
}

#[fixture]
fn pg_context() -> Option<TestContext> {
    if std::env::var("RUN_PG_EMBEDDED").as_deref() != Ok("1") {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
        return None;
    }
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn asha_with_percentage(percentage: &str) -> Vec<(&str, &str)> {
    vec![
        ("name", "Asha Rao"),
        ("address", "12 MG Road"),
        ("age", "21"),
        ("qualification", "B.Sc"),
        ("percentage", percentage),
        ("year", "2023"),
    ]
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn valid_submission_is_stored(pg_context: Option<TestContext>) {
    let Some(context) = pg_context else {
        return;
    };

    let id = context
        .register(&asha_with_percentage("87.5"))
        .expect("registration succeeds");

    let row = context
        .client()
        .query_one(
            "SELECT name, address, age, qualification, percentage::text, year, \
             registration_date <= now() FROM students WHERE id = $1",
            &[&id],
        )
        .unwrap_or_else(|err| panic!("fetch row: {}", format_postgres_error(&err)));
    assert_eq!(row.get::<_, String>(0), "Asha Rao");
    assert_eq!(row.get::<_, String>(1), "12 MG Road");
    assert_eq!(row.get::<_, i32>(2), 21);
    assert_eq!(row.get::<_, String>(3), "B.Sc");
    assert_eq!(row.get::<_, String>(4), "87.50");
    assert_eq!(row.get::<_, i32>(5), 2023);
    assert!(row.get::<_, bool>(6));
    assert_eq!(context.row_count(), 1);
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn invalid_age_writes_nothing(pg_context: Option<TestContext>) {
    let Some(context) = pg_context else {
        return;
    };
    context
        .register(&asha_with_percentage("87.5"))
        .expect("seed registration");

    let mut pairs = asha_with_percentage("87.5");
    pairs[2] = ("age", "twenty-one");
    let err = context.register(&pairs).expect_err("age is not a number");

    assert!(matches!(
        err,
        RegistrationError::Validation(StudentValidationError::InvalidInteger { field: "age", .. })
    ));
    assert_eq!(context.row_count(), 1);
}

#[rstest]
#[case("999.99", "999.99")]
#[case("12.345", "12.35")]
#[case("-5", "-5.00")]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn percentage_is_rounded_to_two_places(
    pg_context: Option<TestContext>,
    #[case] submitted: &str,
    #[case] stored: &str,
) {
    let Some(context) = pg_context else {
        return;
    };

    let id = context
        .register(&asha_with_percentage(submitted))
        .expect("registration succeeds");

    assert_eq!(context.stored_percentage(id), stored);
}

#[rstest]
#[case("999.995")]
#[case("1000")]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn percentage_beyond_column_precision_is_rejected(
    pg_context: Option<TestContext>,
    #[case] submitted: &str,
) {
    let Some(context) = pg_context else {
        return;
    };

    let err = context
        .register(&asha_with_percentage(submitted))
        .expect_err("value overflows NUMERIC(5, 2)");

    assert!(matches!(err, RegistrationError::Insert { .. }));
    assert!(err.to_string().contains("numeric field overflow"));
    assert_eq!(context.row_count(), 0);
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn existing_rows_survive_repeated_schema_setup(pg_context: Option<TestContext>) {
    let Some(context) = pg_context else {
        return;
    };

    let first = context
        .register(&asha_with_percentage("87.5"))
        .expect("first registration");
    let second = context
        .register(&asha_with_percentage("91"))
        .expect("second registration");

    assert!(second > first);
    assert_eq!(context.row_count(), 2);
    assert_eq!(context.stored_percentage(first), "87.50");
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn unknown_database_is_a_connection_failure(pg_context: Option<TestContext>) {
    let Some(context) = pg_context else {
        return;
    };
    let service = RegistrationService::new(Arc::new(DieselStudentStore::new(
        context.settings.clone().with_database("no_such_database"),
    )));
    let submission: StudentSubmission = asha_with_percentage("87.5").into_iter().collect();

    let err = context
        .runtime
        .block_on(async { service.register(&submission).await })
        .expect_err("database does not exist");

    assert!(err.is_connection());
    assert_eq!(context.row_count(), 0);
}
