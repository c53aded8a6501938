use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::debug;

use super::ApiError;

/// Numeric `{id}` path segment.
///
/// A segment that is not an integer resolves to [`RecordId::UNMATCHED`], so
/// it behaves like any unknown id: lookups and updates 404, lists come back
/// empty and deletes are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i32);

impl RecordId {
    /// Ids are handed out from 1 upwards, so 0 never names a record.
    pub const UNMATCHED: i32 = 0;

    fn parse(raw: &str) -> Self {
        raw.parse().map_or_else(
            |_| {
                debug!(id = %raw, "Non-numeric id matches no record");
                Self(Self::UNMATCHED)
            },
            Self,
        )
    }
}

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                debug!(error = %e, "Missing id path segment");
                ApiError::NotFound
            })?;
        Ok(Self::parse(&raw))
    }
}
