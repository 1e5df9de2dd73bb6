//! Route modules, one per resource plus the discovery endpoint.

pub mod api;
pub mod categories;
pub mod comments;
pub mod reviews;
pub mod users;

use crate::error::{ApiError, ApiResult};

/// Parses a numeric path parameter; anything non-numeric is an invalid
/// request rather than a routing miss.
pub(crate) fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::invalid_request())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_ids_must_be_integers() {
        assert_eq!(parse_id("14").unwrap(), 14);
        assert!(parse_id("banana").is_err());
        assert!(parse_id("1.5").is_err());
        assert!(parse_id("").is_err());
    }
}
