//! User-management API client helpers.
//!
//! Performs network IO against the `/manage/*` endpoints and is meant to be
//! called from commands. Callers map results into compute updates.

use crate::http::{Client, HttpError, RequestBuilder, Response};
use crate::users::model::{BulkAddRequest, UserByEmail, UsersResponse};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Request never produced a response.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response; `message` is what the server said about it.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Decode(String),
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        Self::Transport(err.message)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

async fn send_checked(request: RequestBuilder) -> ApiResult<Response> {
    let method = request.method();
    let url = request.url().to_owned();

    let response = request.send().await?;
    if !response.is_success() {
        let message = response.error_message();
        log::warn!(
            "{} {url} failed with {}: {message}",
            method.as_str(),
            response.status
        );
        return Err(ApiError::Status {
            status: response.status,
            message,
        });
    }

    Ok(response)
}

async fn send_user_email(request: RequestBuilder, email: &str) -> ApiResult<()> {
    let body = UserByEmail {
        user_email: email.to_owned(),
    };
    let request = request
        .json(&body)
        .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {e}")))?;

    send_checked(request).await.map(|_| ())
}

/// GET `/manage/users?accepted_page={page}`
pub async fn list_users(api_base_url: &str, page: u32) -> ApiResult<UsersResponse> {
    let url = format!("{api_base_url}/manage/users?accepted_page={page}");

    let response = send_checked(Client::get(&url)).await?;

    response
        .json()
        .map_err(|e| ApiError::Decode(format!("Failed to parse UsersResponse: {e}")))
}

/// POST `/manage/promote-user-to-admin`
/// Body: `{ "user_email": "..." }`
pub async fn promote_user(api_base_url: &str, email: &str) -> ApiResult<()> {
    let url = format!("{api_base_url}/manage/promote-user-to-admin");
    send_user_email(Client::post(&url), email).await
}

/// POST `/manage/demote-admin-to-basic`
pub async fn demote_user(api_base_url: &str, email: &str) -> ApiResult<()> {
    let url = format!("{api_base_url}/manage/demote-admin-to-basic");
    send_user_email(Client::post(&url), email).await
}

/// POST `/manage/admin/deactivate-user`
///
/// The backend route is registered as PATCH; servers that only accept PATCH
/// answer 405 here.
pub async fn deactivate_user(api_base_url: &str, email: &str) -> ApiResult<()> {
    let url = format!("{api_base_url}/manage/admin/deactivate-user");
    send_user_email(Client::post(&url), email).await
}

/// POST `/manage/admin/activate-user`
///
/// Same PATCH caveat as [`deactivate_user`].
pub async fn activate_user(api_base_url: &str, email: &str) -> ApiResult<()> {
    let url = format!("{api_base_url}/manage/admin/activate-user");
    send_user_email(Client::post(&url), email).await
}

/// PATCH `/manage/admin/remove-invited-user`
pub async fn remove_invited_user(api_base_url: &str, email: &str) -> ApiResult<()> {
    let url = format!("{api_base_url}/manage/admin/remove-invited-user");
    send_user_email(Client::patch(&url), email).await
}

/// PUT `/manage/admin/users`
/// Body: `{ "emails": [...] }`
pub async fn bulk_add_users(api_base_url: &str, emails: &[String]) -> ApiResult<()> {
    let url = format!("{api_base_url}/manage/admin/users");

    let body = BulkAddRequest {
        emails: emails.to_vec(),
    };
    let request = Client::put(&url)
        .json(&body)
        .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {e}")))?;

    send_checked(request).await.map(|_| ())
}
