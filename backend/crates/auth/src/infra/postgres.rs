//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{User, UserChanges, UserLookup};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    token::{ResetToken, SessionId},
    user_id::UserId,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    hashed_password,
    session_id,
    reset_token,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn add_user(&self, email: Email, hashed_password: UserPassword) -> AuthResult<User> {
        let user = User::new(email, hashed_password);

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                hashed_password,
                session_id,
                reset_token,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.hashed_password.as_phc_string())
        .bind(user.session_id.map(Uuid::from))
        .bind(user.reset_token.map(Uuid::from))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(AuthError::EmailTaken(user.email.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::debug!(user_id = %user.user_id, "User row inserted");
        Ok(user)
    }

    async fn find_user_by(&self, lookup: UserLookup) -> AuthResult<Option<User>> {
        let (column, value) = match &lookup {
            UserLookup::Id(id) => ("user_id", LookupValue::Uuid(*id.as_uuid())),
            UserLookup::Email(email) => ("email", LookupValue::Text(email.as_str())),
            UserLookup::SessionId(id) => ("session_id", LookupValue::Uuid(*id.as_uuid())),
            UserLookup::ResetToken(token) => ("reset_token", LookupValue::Uuid(*token.as_uuid())),
        };

        // Column names come from the match above, never from input
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1 LIMIT 1");
        let query = sqlx::query_as::<_, UserRow>(&sql);
        let query = match value {
            LookupValue::Uuid(uuid) => query.bind(uuid),
            LookupValue::Text(text) => query.bind(text),
        };

        let row = query.fetch_optional(&self.pool).await?;
        row.map(UserRow::into_user).transpose()
    }

    async fn update_user(&self, user_id: &UserId, changes: UserChanges) -> AuthResult<User> {
        // COALESCE keeps untouched columns; the flags let nullable columns be
        // cleared explicitly.
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                hashed_password = COALESCE($2::TEXT, hashed_password),
                session_id = CASE WHEN $3::BOOLEAN THEN $4::UUID ELSE session_id END,
                reset_token = CASE WHEN $5::BOOLEAN THEN $6::UUID ELSE reset_token END,
                updated_at = $7
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(changes.hashed_password.as_ref().map(|p| p.as_phc_string()))
        .bind(changes.session_id.is_some())
        .bind(changes.session_id.flatten().map(Uuid::from))
        .bind(changes.reset_token.is_some())
        .bind(changes.reset_token.flatten().map(Uuid::from))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }
}

enum LookupValue<'a> {
    Uuid(Uuid),
    Text(&'a str),
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    hashed_password: String,
    session_id: Option<Uuid>,
    reset_token: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            hashed_password: UserPassword::from_phc_string(self.hashed_password)?,
            session_id: self.session_id.map(SessionId::from_uuid),
            reset_token: self.reset_token.map(ResetToken::from_uuid),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
