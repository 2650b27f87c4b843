use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Fallback scope for requests that carry no `X-Owner` header.
pub const DEFAULT_OWNER: &str = "default";

/// Ownership tag extracted from the `X-Owner` header.
///
/// This is a scoping tag, not authentication: it partitions habits and mood
/// entries per owner so the store queries stay scoped, nothing more.
#[derive(Debug, Clone)]
pub struct OwnerScope(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for OwnerScope
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let owner = parts
            .headers
            .get("x-owner")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_OWNER)
            .to_string();
        Ok(OwnerScope(owner))
    }
}
