//! Response Header Policy
//!
//! CORS injection for every relayed response plus the passthrough
//! allowlist applied to upstream headers. Everything not on the
//! allowlist is dropped, so cookies and custom upstream headers never
//! reach the caller.

/// Upstream response headers relayed verbatim when present and non-empty.
pub const PASSTHROUGH_HEADERS: [&str; 5] = [
    "content-type",
    "content-length",
    "last-modified",
    "etag",
    "cache-control",
];

/// CORS headers set unconditionally on success responses.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, HEAD"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// Filter upstream headers down to the passthrough allowlist.
///
/// Names are matched case-insensitively; empty values are skipped.
/// Output names use the allowlist's lowercase spelling.
pub fn filter_passthrough(upstream: &[(String, String)]) -> Vec<(String, String)> {
    PASSTHROUGH_HEADERS
        .iter()
        .filter_map(|name| {
            upstream
                .iter()
                .find(|(k, v)| k.eq_ignore_ascii_case(name) && !v.is_empty())
                .map(|(_, v)| (name.to_string(), v.clone()))
        })
        .collect()
}
