use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{User, UserStatus};
use crate::store::Store;

/// Resolve a bearer header or `?token=` credential to an active account.
pub async fn verify_token(
    store: &Store,
    auth: Option<Authorization<Bearer>>,
    query_token: Option<&str>,
) -> Result<User, ApiError> {
    let provided_token = auth
        .map(|a| a.token().to_string())
        .or_else(|| query_token.map(|s| s.to_string()));
    let user = match provided_token {
        Some(token) => store.find_user_by_token(&token).await,
        None => None,
    };
    match user {
        Some(user) if user.status == UserStatus::Inactive => {
            Err(ApiError::Forbidden("Account is inactive".into()))
        }
        Some(user) => Ok(user),
        None => Err(ApiError::Unauthorized(
            "Invalid authentication token".into(),
        )),
    }
}

pub fn require_admin(user: &User) -> Result<(), ApiError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Access denied".into()))
    }
}

/// Admins may act on anything; everyone else only on what they own.
pub fn require_owner_or_admin(user: &User, owner_id: Uuid) -> Result<(), ApiError> {
    if user.is_admin() || user.id == owner_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Access denied".into()))
    }
}
