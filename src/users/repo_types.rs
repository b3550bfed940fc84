use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database. Never serialized directly; responses go
/// through `UserRead` so salt and password hash stay server-side.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub salt: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
