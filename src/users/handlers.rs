use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::db::UnitOfWork;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::{CreateUserRequest, UpdateUserRequest, UserRead};
use crate::users::extractors::ValidatedJson;
use crate::users::repo;
use crate::users::repo_types::User;
use crate::users::password;

pub fn user_routes() -> Router<AppState> {
    let collection = get(list_users).post(create_user);
    Router::new()
        .route("/users", collection.clone())
        .route("/users/", collection)
        .route(
            "/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserRead>), ApiError> {
    let mut uow = state.sessions.acquire().await?;
    match insert_record(&mut uow, payload).await {
        Ok(user) => {
            uow.commit().await?;
            info!(user_id = user.id, email = %user.email, "user created");
            Ok((StatusCode::CREATED, Json(user.into())))
        }
        Err(err) => {
            uow.rollback().await;
            Err(err)
        }
    }
}

async fn insert_record(
    uow: &mut UnitOfWork,
    payload: CreateUserRequest,
) -> Result<User, ApiError> {
    let credential = password::derive(&payload.password)?;
    let user = repo::insert(
        uow.conn(),
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        &credential.salt,
        &credential.hash,
    )
    .await?;
    Ok(user)
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserRead>>, ApiError> {
    let mut uow = state.sessions.acquire().await?;
    match repo::list_all(uow.conn()).await {
        Ok(users) => {
            uow.commit().await?;
            if users.is_empty() {
                return Err(ApiError::NotFound("Users not found"));
            }
            Ok(Json(users.into_iter().map(UserRead::from).collect()))
        }
        Err(err) => {
            uow.rollback().await;
            Err(err.into())
        }
    }
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserRead>, ApiError> {
    let mut uow = state.sessions.acquire().await?;
    match repo::find_by_id(uow.conn(), user_id).await {
        Ok(Some(user)) => {
            uow.commit().await?;
            Ok(Json(user.into()))
        }
        Ok(None) => {
            uow.rollback().await;
            Err(ApiError::NotFound("User not found"))
        }
        Err(err) => {
            uow.rollback().await;
            Err(err.into())
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserRead>, ApiError> {
    let mut uow = state.sessions.acquire().await?;
    match apply_update(&mut uow, user_id, payload).await {
        Ok(user) => {
            uow.commit().await?;
            info!(user_id = user.id, "user updated");
            Ok(Json(user.into()))
        }
        Err(err) => {
            uow.rollback().await;
            Err(err)
        }
    }
}

async fn apply_update(
    uow: &mut UnitOfWork,
    user_id: i64,
    payload: UpdateUserRequest,
) -> Result<User, ApiError> {
    let Some(mut user) = repo::find_by_id(uow.conn(), user_id).await? else {
        return Err(ApiError::NotFound("User not found"));
    };

    if let Some(first_name) = payload.first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = payload.last_name {
        user.last_name = last_name;
    }
    if let Some(email) = payload.email {
        user.email = email;
    }
    if let Some(plain) = payload.password {
        // Salt and hash always change together.
        let credential = password::derive(&plain)?;
        user.salt = credential.salt;
        user.password_hash = credential.hash;
    }

    let user = repo::update(uow.conn(), &user).await?;
    Ok(user)
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let mut uow = state.sessions.acquire().await?;
    match remove_record(&mut uow, user_id).await {
        Ok(()) => {
            uow.commit().await?;
            info!(user_id, "user deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            uow.rollback().await;
            Err(err)
        }
    }
}

async fn remove_record(uow: &mut UnitOfWork, user_id: i64) -> Result<(), ApiError> {
    if repo::find_by_id(uow.conn(), user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found"));
    }
    repo::delete(uow.conn(), user_id).await?;
    Ok(())
}
