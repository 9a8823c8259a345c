use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use rail_types::Principal;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Credentials {
    /// Parse an `Authorization` header value. `None` means no header.
    pub fn from_header(value: Option<&str>) -> ServerResult<Self> {
        let Some(value) = value else {
            return Ok(Self::Anonymous);
        };
        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ServerError::AuthFailed("expected a bearer token".into()))?;
        Ok(Self::Bearer(token.to_string()))
    }
}

/// Maps request credentials to the caller's [`Principal`].
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Principal>;
}

/// Treats the bearer token itself as the principal.
///
/// Suitable when an upstream gateway has already verified the token and
/// forwards the caller's identity. Requests without credentials run as the
/// anonymous principal, which can register travellers and book tickets. The
/// station cannot be created anonymously, and its principal is never
/// included in a response.
pub struct BearerPrincipalAuth;

#[async_trait]
impl AuthProvider for BearerPrincipalAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Principal> {
        match credentials {
            Credentials::Bearer(token) => Ok(Principal::new(token.clone())),
            Credentials::Anonymous => Ok(Principal::anonymous()),
        }
    }
}

/// Extractor yielding the authenticated caller of a request.
pub struct Caller(pub Principal);

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> ServerResult<Self> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|v| {
                v.to_str()
                    .map_err(|_| ServerError::AuthFailed("authorization header is not ASCII".into()))
            })
            .transpose()?;
        let credentials = Credentials::from_header(header)?;
        let principal = state.auth.authenticate(&credentials).await?;
        Ok(Self(principal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_is_anonymous() {
        assert_eq!(Credentials::from_header(None).unwrap(), Credentials::Anonymous);
    }

    #[test]
    fn bearer_header_is_parsed() {
        assert_eq!(
            Credentials::from_header(Some("Bearer station-key")).unwrap(),
            Credentials::Bearer("station-key".into())
        );
    }

    #[test]
    fn malformed_header_is_rejected() {
        assert!(matches!(
            Credentials::from_header(Some("Basic abc")),
            Err(ServerError::AuthFailed(_))
        ));
        assert!(Credentials::from_header(Some("Bearer   ")).is_err());
    }

    #[tokio::test]
    async fn bearer_token_becomes_principal() {
        let auth = BearerPrincipalAuth;
        let p = auth
            .authenticate(&Credentials::Bearer("S".into()))
            .await
            .unwrap();
        assert_eq!(p, Principal::new("S"));
        let anon = auth.authenticate(&Credentials::Anonymous).await.unwrap();
        assert!(anon.is_anonymous());
    }
}
