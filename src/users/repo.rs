use sqlx::PgConnection;

use crate::users::repo_types::User;

pub async fn insert(
    conn: &mut PgConnection,
    first_name: &str,
    last_name: &str,
    email: &str,
    salt: &str,
    password_hash: &str,
) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (first_name, last_name, email, salt, password_hash)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, first_name, last_name, email, salt, password_hash, created_at, updated_at
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(salt)
    .bind(password_hash)
    .fetch_one(conn)
    .await
}

/// All users in insertion order.
pub async fn list_all(conn: &mut PgConnection) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, first_name, last_name, email, salt, password_hash, created_at, updated_at
        FROM users
        ORDER BY id
        "#,
    )
    .fetch_all(conn)
    .await
}

pub async fn find_by_id(conn: &mut PgConnection, id: i64) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, first_name, last_name, email, salt, password_hash, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

/// Writes every mutable column back and refreshes `updated_at`.
/// `clock_timestamp()` rather than `now()`: the latter is pinned to the
/// transaction start, so an update in the same transaction as the insert
/// would not move the timestamp.
pub async fn update(conn: &mut PgConnection, user: &User) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET first_name = $1, last_name = $2, email = $3,
            salt = $4, password_hash = $5, updated_at = clock_timestamp()
        WHERE id = $6
        RETURNING id, first_name, last_name, email, salt, password_hash, created_at, updated_at
        "#,
    )
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.salt)
    .bind(&user.password_hash)
    .bind(user.id)
    .fetch_one(conn)
    .await
}

pub async fn delete(conn: &mut PgConnection, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
