use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::access::{Caller, Role};
use crate::auth::AuthError;
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AuthState;

/// Caller identity resolved from the bearer token and a fresh user lookup.
/// `role` always comes from the stored row, never from the token.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: Role,
    pub user: User,
}

impl CurrentUser {
    pub fn from_user(user: User) -> Self {
        Self { id: user.id, role: user.role(), user }
    }

    pub fn caller(&self) -> Caller {
        Caller { id: self.id, role: self.role }
    }
}

/// JWT authentication middleware: verifies the token, reloads the user and
/// injects [`CurrentUser`] into the request.
pub async fn authenticate(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or(AuthError::AuthenticationRequired)?;
    let claims = auth.tokens.verify(token)?;

    let user = auth
        .identities
        .find_user(claims.sub)
        .await
        .map_err(AuthError::Store)?
        .ok_or_else(|| {
            tracing::debug!("Token subject {} no longer exists", claims.sub);
            AuthError::UserNotFound
        })?;

    request.extensions_mut().insert(CurrentUser::from_user(user));
    Ok(next.run(request).await)
}

/// Token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AuthError::AuthenticationRequired.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_tokens() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("bearer abc")), None);
    }
}
