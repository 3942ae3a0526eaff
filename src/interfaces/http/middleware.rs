//! Authentication middleware
//!
//! Decodes a Bearer token when one is presented and attaches the caller
//! identity to the request. Requests without a token pass through as
//! anonymous; whether an anonymous caller may perform an operation is
//! the access policy's decision, made in the handler. A presented but
//! invalid token is rejected outright.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::common::ApiResponse;
use crate::domain::UserRole;
use crate::infrastructure::crypto::{verify_token, JwtConfig};

/// State for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Verified caller identity from the token claims
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

/// Request extension: the verified caller, or None for anonymous.
#[derive(Clone, Debug, Default)]
pub struct CallerContext(pub Option<AuthenticatedUser>);

impl CallerContext {
    pub fn role(&self) -> Option<UserRole> {
        self.0.as_ref().map(|u| u.role)
    }
}

/// Extract token from Authorization header
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}

/// Attach the caller context; reject bad tokens, let anonymous through.
pub async fn auth_context(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_token);

    let caller = match bearer {
        None => CallerContext(None),
        Some(token) => match verify_token(token, &state.jwt_config) {
            Ok(claims) => {
                let Some(role) = claims.role() else {
                    return unauthorized("Token carries an unknown role");
                };
                CallerContext(Some(AuthenticatedUser {
                    user_id: claims.sub,
                    email: claims.email,
                    name: claims.name,
                    role,
                }))
            }
            Err(_) => return unauthorized("Invalid or expired token"),
        },
    };

    request.extensions_mut().insert(caller);
    next.run(request).await
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::infrastructure::crypto::create_token;
    use axum::{middleware, routing::get, Extension, Router};
    use tower::Service;

    async fn whoami(Extension(caller): Extension<CallerContext>) -> String {
        match caller.role() {
            Some(role) => role.to_string(),
            None => "anonymous".to_string(),
        }
    }

    fn app(jwt_config: JwtConfig) -> Router {
        Router::new().route("/whoami", get(whoami)).layer(
            middleware::from_fn_with_state(AuthState { jwt_config }, auth_context),
        )
    }

    async fn get_whoami(jwt_config: JwtConfig, auth: Option<String>) -> (StatusCode, String) {
        let mut builder = Request::builder().method("GET").uri("/whoami");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let req = builder.body(Body::empty()).unwrap();

        let mut svc = app(jwt_config).into_service();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn missing_token_is_anonymous() {
        let (status, body) = get_whoami(JwtConfig::default(), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }

    #[tokio::test]
    async fn valid_token_carries_role() {
        let config = JwtConfig::default();
        let user = User::new("u-1", "ops@evcharge.lk", "h", "Ops", UserRole::Backoffice);
        let token = create_token(&user, &config).unwrap();

        let (status, body) = get_whoami(config, Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Backoffice");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let (status, _) = get_whoami(
            JwtConfig::default(),
            Some("Bearer not-a-token".to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_header_is_anonymous() {
        let (status, body) = get_whoami(JwtConfig::default(), Some("Basic abc".to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }
}
