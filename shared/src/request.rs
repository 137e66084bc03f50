//! Inbound request contract.
//!
//! A `FetchRequest` is the validated form of the `url` / `method` query
//! parameters. Construction goes through [`FetchRequest::parse`], so a
//! value of this type has already passed scheme and method validation.
//! Host classification is a separate, gateway-side step.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ValidationError;

/// Methods the gateway will forward. GET/HEAD passthrough only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchMethod {
    Get,
    Head,
}

impl FetchMethod {
    /// Parse a client-supplied method string, uppercased first.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(FetchMethod::Get),
            "HEAD" => Some(FetchMethod::Head),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMethod::Get => "GET",
            FetchMethod::Head => "HEAD",
        }
    }
}

/// A validated proxy target: absolute http(s) URL plus forward method.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: Url,
    pub method: FetchMethod,
}

impl FetchRequest {
    /// Validate raw query parameters into a `FetchRequest`.
    ///
    /// The method is checked first so a disallowed method is reported as
    /// 405 regardless of URL validity. `method` defaults to GET when
    /// absent; `url` must be present, non-empty, and an absolute URL with
    /// scheme exactly `http` or `https` (anything unparseable counts as
    /// an invalid protocol).
    pub fn parse(
        url: Option<&str>,
        method: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let method = match method {
            None => FetchMethod::Get,
            Some(raw) => FetchMethod::parse(raw).ok_or(ValidationError::MethodNotAllowed)?,
        };

        let raw_url = match url {
            Some(u) if !u.is_empty() => u,
            _ => return Err(ValidationError::UrlRequired),
        };

        let url = Url::parse(raw_url).map_err(|_| ValidationError::InvalidProtocol)?;
        match url.scheme() {
            "http" | "https" => {}
            _ => return Err(ValidationError::InvalidProtocol),
        }

        Ok(FetchRequest { url, method })
    }

    /// Hostname of the target, without IPv6 brackets, if any.
    pub fn hostname(&self) -> Option<String> {
        match self.url.host() {
            Some(url::Host::Domain(d)) => Some(d.to_string()),
            Some(url::Host::Ipv4(a)) => Some(a.to_string()),
            Some(url::Host::Ipv6(a)) => Some(a.to_string()),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_defaults_to_get() {
        let req = FetchRequest::parse(Some("https://example.com/"), None).unwrap();
        assert_eq!(req.method, FetchMethod::Get);
    }

    #[test]
    fn test_method_normalized_uppercase() {
        let req = FetchRequest::parse(Some("https://example.com/"), Some("head")).unwrap();
        assert_eq!(req.method, FetchMethod::Head);
        assert_eq!(req.method.as_str(), "HEAD");
    }

    #[test]
    fn test_disallowed_methods() {
        for m in ["POST", "PUT", "DELETE", "patch", "OPTIONS"] {
            let err = FetchRequest::parse(Some("https://example.com/"), Some(m)).unwrap_err();
            assert_eq!(err, ValidationError::MethodNotAllowed);
        }
    }

    #[test]
    fn test_method_checked_before_url() {
        // 405 wins over a missing url
        let err = FetchRequest::parse(None, Some("POST")).unwrap_err();
        assert_eq!(err, ValidationError::MethodNotAllowed);
    }

    #[test]
    fn test_url_required() {
        assert_eq!(
            FetchRequest::parse(None, None).unwrap_err(),
            ValidationError::UrlRequired
        );
        assert_eq!(
            FetchRequest::parse(Some(""), None).unwrap_err(),
            ValidationError::UrlRequired
        );
    }

    #[test]
    fn test_invalid_protocol() {
        for u in ["ftp://example.com/file", "file:///etc/passwd", "example.com/no-scheme"] {
            let err = FetchRequest::parse(Some(u), None).unwrap_err();
            assert_eq!(err, ValidationError::InvalidProtocol, "url: {u}");
        }
    }

    #[test]
    fn test_http_and_https_accepted() {
        for u in ["http://example.com/", "https://example.com/robots.txt"] {
            assert!(FetchRequest::parse(Some(u), None).is_ok(), "url: {u}");
        }
    }

    #[test]
    fn test_hostname_strips_ipv6_brackets() {
        let req = FetchRequest::parse(Some("http://[::1]:8080/"), None).unwrap();
        assert_eq!(req.hostname().as_deref(), Some("::1"));
    }
}
