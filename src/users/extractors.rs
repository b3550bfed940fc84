use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{ApiError, FieldError};

/// JSON extractor that runs the payload's declared constraints before the
/// handler sees it. Malformed bodies and constraint violations both reject
/// with 422.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ApiError::InvalidFields(vec![FieldError {
                field: "body".into(),
                message: e.body_text(),
            }])
        })?;

        value.validate().map_err(ApiError::from)?;

        Ok(ValidatedJson(value))
    }
}
