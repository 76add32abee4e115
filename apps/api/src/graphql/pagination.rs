//! Page arithmetic for list queries

use crate::error::{ApiError, ApiResult, FieldError};

/// Maximum items per page
pub const MAX_PER_PAGE: i32 = 100;

/// Page size used when the client does not ask for one
pub const DEFAULT_PER_PAGE: i32 = 2;

/// Translate a 1-based page number and page size into `(limit, offset)`
///
/// Both arguments must be at least 1. The offset follows the requested
/// `per_page`; only the limit is clamped to [`MAX_PER_PAGE`].
pub fn page_window(page: i32, per_page: i32) -> ApiResult<(i64, i64)> {
    let mut errors = Vec::new();
    if page < 1 {
        errors.push(FieldError::new("page", "Page must be at least 1."));
    }
    if per_page < 1 {
        errors.push(FieldError::new("perPage", "Page size must be at least 1."));
    }
    if !errors.is_empty() {
        return Err(ApiError::InvalidInput(errors));
    }

    let limit = i64::from(per_page.min(MAX_PER_PAGE));
    let offset = (i64::from(page) - 1) * i64::from(per_page);
    Ok((limit, offset))
}
