//! API key authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authenticates requests with the configured API key.
///
/// # Header Format
///
/// ```text
/// X-API-Key: <key>
/// ```
///
/// or
///
/// ```text
/// Authorization: Bearer <key>
/// ```
///
/// `X-API-Key` wins when both are present.
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if no key is
/// presented or the key does not match. The request never reaches the handler,
/// so nothing is written.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/api/urls", get(list_urls_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let key = match parts.headers.get(API_KEY_HEADER) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::unauthorized("Invalid API key"))?
            .to_string(),
        None => {
            let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
                .await
                .map_err(|_| AppError::unauthorized("Missing API key"))?;
            token
        }
    };

    st.auth_service.authenticate(&key)?;

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
