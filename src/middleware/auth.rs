use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use std::collections::HashSet;

use crate::auth::{Claims, Role};
use crate::config;

/// Caller identity resolved from the Authorization header.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub sub: Option<String>,
    pub roles: HashSet<Role>,
}

impl CurrentUser {
    /// Caller with no credentials and no granted roles.
    pub fn anonymous() -> Self {
        Self {
            sub: None,
            roles: HashSet::new(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            sub: Some(claims.sub),
            roles: claims.roles.into_iter().collect(),
        }
    }
}

/// Middleware that resolves the caller from a bearer JWT and injects it
/// into the request extensions.
///
/// Missing, malformed, or expired tokens resolve to the anonymous caller
/// rather than failing early: the access policy owns the rejection, so
/// every denied operation surfaces as the same 403 regardless of whether
/// the resource exists.
pub async fn current_user_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let user = match extract_jwt_from_headers(&headers).and_then(|token| validate_jwt(&token)) {
        Ok(claims) => CurrentUser::from(claims),
        Err(reason) => {
            tracing::debug!("resolving request as anonymous: {}", reason);
            CurrentUser::anonymous()
        }
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

/// Validate JWT token and extract claims
fn validate_jwt(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid JWT token: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_caller_has_no_roles() {
        let user = CurrentUser::anonymous();
        assert!(user.sub.is_none());
        assert!(!user.has_role(Role::User));
        assert!(!user.has_role(Role::Admin));
    }

    #[test]
    fn claims_resolve_to_granted_roles_only() {
        let claims = Claims::new("cgaucho".to_string(), vec![Role::User]);
        let user = CurrentUser::from(claims);
        assert_eq!(user.sub.as_deref(), Some("cgaucho"));
        assert!(user.has_role(Role::User));
        assert!(!user.has_role(Role::Admin));
    }

    #[test]
    fn bearer_prefix_is_required() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Token abc".parse().unwrap());
        assert!(extract_jwt_from_headers(&headers).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer abc".parse().unwrap());
        assert_eq!(extract_jwt_from_headers(&headers).unwrap(), "abc");
    }
}
