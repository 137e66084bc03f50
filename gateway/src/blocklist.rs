//! Private-host classification (SSRF guard)
//!
//! Two classifiers: the legacy string-prefix heuristic the gateway has
//! always shipped, and an optional stricter CIDR check over IP literals.
//! Strict mode is additive, so everything blocked by the legacy rules
//! stays blocked when it is enabled.
//!
//! Neither classifier resolves DNS: a hostname that resolves to a private
//! address but is not itself a private literal passes. See DESIGN.md.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Hostnames rejected by exact match.
pub const BLOCKED_HOSTS: [&str; 4] = ["localhost", "127.0.0.1", "0.0.0.0", "::1"];

/// Legacy prefix heuristic. Blocks a hostname if it is empty, in
/// [`BLOCKED_HOSTS`], or string-prefixed by a private IPv4 range:
/// `10.`, `192.168.`, `169.254.`, or `172.` with a second octet in 16..=31.
pub fn is_private_host(hostname: &str) -> bool {
    if hostname.is_empty() {
        return true;
    }
    if BLOCKED_HOSTS.contains(&hostname) {
        return true;
    }
    if hostname.starts_with("10.") || hostname.starts_with("192.168.") {
        return true;
    }
    if hostname.starts_with("169.254.") {
        return true;
    }
    if let Some(rest) = hostname.strip_prefix("172.") {
        if let Some(second) = rest.split('.').next() {
            if let Ok(octet) = second.parse::<u32>() {
                if (16..=31).contains(&octet) {
                    return true;
                }
            }
        }
    }
    false
}

/// A parsed IPv4 CIDR range
#[derive(Debug, Clone, Copy)]
struct CidrRange {
    network: u32,
    mask: u32,
}

const fn cidr(a: u8, b: u8, c: u8, d: u8, prefix_len: u32) -> CidrRange {
    let ip = u32::from_be_bytes([a, b, c, d]);
    let mask = if prefix_len == 0 {
        0
    } else {
        !0u32 << (32 - prefix_len)
    };
    CidrRange {
        network: ip & mask,
        mask,
    }
}

impl CidrRange {
    /// Check if an IPv4 address is within this CIDR range
    fn contains(&self, ip: Ipv4Addr) -> bool {
        (u32::from(ip) & self.mask) == self.network
    }
}

/// Private, loopback, link-local, and unspecified IPv4 ranges.
const PRIVATE_V4_RANGES: [CidrRange; 6] = [
    cidr(10, 0, 0, 0, 8),
    cidr(172, 16, 0, 0, 12),
    cidr(192, 168, 0, 0, 16),
    cidr(169, 254, 0, 0, 16),
    cidr(127, 0, 0, 0, 8),
    cidr(0, 0, 0, 0, 8),
];

fn is_private_v4(ip: Ipv4Addr) -> bool {
    PRIVATE_V4_RANGES.iter().any(|range| range.contains(ip))
}

fn is_private_v6(ip: Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_private_v4(v4);
    }
    // loopback, link-local fe80::/10, unique-local fc00::/7
    ip.is_loopback()
        || (ip.segments()[0] & 0xffc0) == 0xfe80
        || (ip.segments()[0] & 0xfe00) == 0xfc00
}

/// Host admission policy for the proxy endpoint.
#[derive(Debug, Clone, Copy)]
pub struct HostPolicy {
    strict: bool,
}

impl HostPolicy {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Apply the legacy heuristic, then (in strict mode) CIDR containment
    /// for hostnames that parse as IP literals.
    pub fn is_blocked(&self, hostname: &str) -> bool {
        if is_private_host(hostname) {
            return true;
        }
        if self.strict {
            if let Ok(ip) = hostname.parse::<IpAddr>() {
                return match ip {
                    IpAddr::V4(v4) => is_private_v4(v4),
                    IpAddr::V6(v6) => is_private_v6(v6),
                };
            }
        }
        false
    }
}
