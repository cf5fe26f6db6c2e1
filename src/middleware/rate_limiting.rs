// ABOUTME: Rate limit response headers for admitted quota-counted requests
// ABOUTME: Renders limit, remaining, reset and tier as X-RateLimit-* headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! # Rate Limit Headers

use http::{HeaderMap, HeaderValue};

use crate::rate_limiting::RateLimitInfo;

/// HTTP header names for rate limiting
pub mod headers {
    /// Maximum requests allowed per UTC day
    pub const X_RATE_LIMIT_LIMIT: &str = "X-RateLimit-Limit";
    /// Requests left today
    pub const X_RATE_LIMIT_REMAINING: &str = "X-RateLimit-Remaining";
    /// Unix timestamp of the next UTC midnight
    pub const X_RATE_LIMIT_RESET: &str = "X-RateLimit-Reset";
    /// Tier the quota belongs to
    pub const X_RATE_LIMIT_TIER: &str = "X-RateLimit-Tier";
}

/// Create a `HeaderMap` with rate limit headers
#[must_use]
pub fn create_rate_limit_headers(info: &RateLimitInfo) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(headers::X_RATE_LIMIT_LIMIT, HeaderValue::from(info.limit));
    headers.insert(
        headers::X_RATE_LIMIT_REMAINING,
        HeaderValue::from(info.remaining),
    );
    headers.insert(
        headers::X_RATE_LIMIT_RESET,
        HeaderValue::from(info.reset_at.timestamp()),
    );
    headers.insert(
        headers::X_RATE_LIMIT_TIER,
        HeaderValue::from_static(info.tier.as_str()),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use volume_core::models::Tier;

    #[test]
    fn test_headers_rendered() {
        let now = Utc.with_ymd_and_hms(2025, 3, 9, 8, 0, 0).unwrap();
        let info = RateLimitInfo::new(Tier::Pro, 10, 10_000, now);
        let headers = create_rate_limit_headers(&info);

        assert_eq!(headers[headers::X_RATE_LIMIT_LIMIT], "10000");
        assert_eq!(headers[headers::X_RATE_LIMIT_REMAINING], "9990");
        assert_eq!(headers[headers::X_RATE_LIMIT_TIER], "pro");
        assert_eq!(
            headers[headers::X_RATE_LIMIT_RESET],
            Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0)
                .unwrap()
                .timestamp()
                .to_string()
                .as_str()
        );
    }
}
