//! Personal Data Dump
//!
//! Prints every row of the personal data table through the redacting
//! logger, so PII columns never reach the output in clear.

use platform::redact::{USER_DATA_TARGET, user_data_logger};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Columns of the personal data table, in output order
const COLUMNS: [&str; 8] = [
    "name",
    "email",
    "phone",
    "ssn",
    "password",
    "ip",
    "last_login",
    "user_agent",
];

/// One row, every column read as text
#[derive(Debug, sqlx::FromRow)]
struct PersonalDataRow {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    ssn: Option<String>,
    password: Option<String>,
    ip: Option<String>,
    last_login: Option<String>,
    user_agent: Option<String>,
}

impl PersonalDataRow {
    /// `field=value;` pairs in column order
    fn to_log_line(&self) -> String {
        let values = [
            &self.name,
            &self.email,
            &self.phone,
            &self.ssn,
            &self.password,
            &self.ip,
            &self.last_login,
            &self.user_agent,
        ];

        COLUMNS
            .iter()
            .zip(values)
            .map(|(field, value)| format!("{field}={}; ", value.as_deref().unwrap_or_default()))
            .collect::<String>()
            .trim()
            .to_string()
    }
}

/// Connect to the personal data database described by `PERSONAL_DATA_DB_*`
async fn get_db() -> anyhow::Result<PgPool> {
    let username = env::var("PERSONAL_DATA_DB_USERNAME").unwrap_or_else(|_| "root".to_string());
    let password = env::var("PERSONAL_DATA_DB_PASSWORD").unwrap_or_default();
    let host = env::var("PERSONAL_DATA_DB_HOST").unwrap_or_else(|_| "localhost".to_string());

    let mut options = PgConnectOptions::new()
        .host(&host)
        .username(&username)
        .password(&password);
    if let Ok(database) = env::var("PERSONAL_DATA_DB_NAME") {
        options = options.database(&database);
    }

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = get_db().await?;

    let rows: Vec<PersonalDataRow> = sqlx::query_as(
        "SELECT name::TEXT, email::TEXT, phone::TEXT, ssn::TEXT, password::TEXT, \
         ip::TEXT, last_login::TEXT, user_agent::TEXT FROM users",
    )
    .fetch_all(&pool)
    .await?;

    let logger = user_data_logger()?;
    tracing::dispatcher::with_default(&logger, || {
        for row in &rows {
            tracing::info!(target: USER_DATA_TARGET, "{}", row.to_log_line());
        }
    });

    pool.close().await;

    Ok(())
}
