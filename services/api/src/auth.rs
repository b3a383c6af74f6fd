//! Identity and session handling
//!
//! Credentials are verified against bcrypt hashes; sessions are stateless
//! HS256 tokens carrying the identity and role claims. Tokens expire after
//! 24 hours. Unknown email and wrong password produce the same error, and
//! the unknown-email path still runs a hash comparison so the two cases do
//! not diverge in timing either.

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::Store;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use types::ids::UserId;
use types::policy::{is_allowed, Action};
use types::role::Role;
use types::user::User;

/// Session lifetime in seconds
pub const TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// bcrypt hash of an arbitrary string, compared against when the email is
/// unknown so both failure paths cost a hash verification
const DUMMY_HASH: &str = "$2b$12$C6UzMDM.H6dfI/f/IKcEeO7ZnTyZwLCrjieXk8aqLnUHiBp9O1hCO";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub account_id: UserId,
    pub email: String,
    pub role: Role,
    pub name: String,
}

/// Token signing and verification keys, derived from the configured secret
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a signed session token for a verified account
    pub fn issue(&self, user: &User) -> Result<String, ApiError> {
        let exp = jsonwebtoken::get_current_timestamp() + TOKEN_TTL_SECS;
        let claims = Claims {
            sub: user.id.to_string(),
            exp: exp as usize,
            account_id: user.id,
            email: user.email.clone(),
            role: user.role,
            name: user.name.clone(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("token signing failed: {e}")))
    }

    /// Validate signature, structure, and expiry
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| ApiError::Unauthenticated(format!("Invalid token: {e}")))
    }
}

pub fn hash_password(password: &str) -> Result<String, anyhow::Error> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Verify submitted credentials against the credential store.
///
/// Exact-match email lookup. Both failure modes collapse into
/// [`ApiError::InvalidCredentials`].
pub async fn authenticate(
    store: &dyn Store,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    match store.find_user_by_email(email).await? {
        Some(user) if verify_password(password, &user.password_hash) => Ok(user),
        Some(_) => Err(ApiError::InvalidCredentials),
        None => {
            let _ = verify_password(password, DUMMY_HASH);
            Err(ApiError::InvalidCredentials)
        }
    }
}

/// Verified identity of the requester, extracted from the bearer token.
///
/// Every handler that takes this extractor is authenticated; mutating
/// handlers additionally call [`AuthenticatedUser::require`] before touching
/// the store.
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub name: String,
}

impl AuthenticatedUser {
    /// Check the policy table for `action`, rejecting with `Unauthorized`
    pub fn require(&self, action: Action) -> Result<(), ApiError> {
        if is_allowed(self.role, action) {
            Ok(())
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::Unauthenticated("Missing Authorization header".into()))?;
        let value = header
            .to_str()
            .map_err(|_| ApiError::Unauthenticated("Invalid header string".into()))?;
        let token = value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthenticated("Expected a bearer token".into()))?;

        let claims = state.keys.verify(token)?;
        Ok(AuthenticatedUser {
            id: claims.account_id,
            email: claims.email,
            role: claims.role,
            name: claims.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: UserId::new(),
            name: "Test User".into(),
            email: "user@sentinel.com".into(),
            password_hash: bcrypt::hash("secret", 4).unwrap(),
            role,
        }
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let keys = AuthKeys::new("test-secret");
        let account = user(Role::SecurityAnalyst);
        let token = keys.issue(&account).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.account_id, account.id);
        assert_eq!(claims.role, Role::SecurityAnalyst);
        assert_eq!(claims.email, "user@sentinel.com");
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let token = AuthKeys::new("one-secret").issue(&user(Role::Viewer)).unwrap();
        let err = AuthKeys::new("other-secret").verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let keys = AuthKeys::new("test-secret");
        assert!(keys.verify("not-a-token").is_err());
    }

    #[test]
    fn test_password_verification() {
        let hash = bcrypt::hash("admin123", 4).unwrap();
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("admin124", &hash));
    }

    #[test]
    fn test_require_follows_policy_table() {
        let viewer = AuthenticatedUser {
            id: UserId::new(),
            email: "v@sentinel.com".into(),
            role: Role::Viewer,
            name: "Viewer".into(),
        };
        assert!(viewer.require(Action::ReadAny).is_ok());
        assert!(matches!(
            viewer.require(Action::CreateFinding),
            Err(ApiError::Unauthorized)
        ));
    }
}
