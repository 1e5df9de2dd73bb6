//! Coercion rules for untrusted query parameters.
//!
//! Every listing endpoint in this API follows the same policy: a query
//! parameter that is absent, unrecognized or malformed is treated as if it
//! had not been sent, never as an error. [`coerce_or_default`] is the single
//! place that policy lives; the helpers below are thin instantiations of it
//! for the parameter shapes the API accepts.

/// Returns `value` when it is present and passes `is_valid`, otherwise
/// `default`.
///
/// This is the uniform "degrade to filter-not-applied" rule for query
/// parameters.
pub fn coerce_or_default<T>(value: Option<T>, is_valid: impl FnOnce(&T) -> bool, default: T) -> T {
    match value {
        Some(v) if is_valid(&v) => v,
        _ => default,
    }
}

/// Parses a positive integer, falling back to `default` on anything else.
///
/// Rejects zero, negatives, fractions and non-numeric text.
#[must_use]
pub fn positive_int(raw: Option<&str>, default: i64) -> i64 {
    coerce_or_default(raw.and_then(|s| s.parse::<i64>().ok()), |n| *n >= 1, default)
}

/// Validates a column name against a fixed whitelist.
///
/// Returns the *whitelist's* copy of the matched name, so callers can only
/// ever interpolate strings drawn from the closed set. Anything not in the
/// whitelist falls back to `default`.
#[must_use]
pub fn whitelisted(
    raw: Option<&str>,
    whitelist: &[&'static str],
    default: &'static str,
) -> &'static str {
    raw.and_then(|candidate| whitelist.iter().find(|col| **col == candidate))
        .copied()
        .unwrap_or(default)
}

/// Sort direction, normalized for interpolation into an `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Parses `asc`/`desc` case-insensitively, falling back to `default`.
    #[must_use]
    pub fn parse_or(raw: Option<&str>, default: Self) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("asc") => Self::Asc,
            Some("desc") => Self::Desc,
            _ => default,
        }
    }

    /// The uppercase SQL keyword for this direction.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A validated `limit`/`p` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// Page size; always >= 1.
    pub limit: i64,
    /// Page number; always >= 1.
    pub page: i64,
}

/// Default page size when `limit` is absent or invalid.
pub const DEFAULT_LIMIT: i64 = 10;

impl PageParams {
    /// Builds page parameters from raw `limit` and `p` values.
    #[must_use]
    pub fn from_raw(limit: Option<&str>, page: Option<&str>) -> Self {
        Self {
            limit: positive_int(limit, DEFAULT_LIMIT),
            page: positive_int(page, 1),
        }
    }

    /// The row offset this page starts at.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: 1,
        }
    }
}
