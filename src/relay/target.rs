//! Target URL decomposition.
//!
//! The `url` crate validates the target and supplies the host to connect to
//! (IPv6 without brackets, IDNA applied). What goes on the wire is taken from
//! the raw text instead, since `url` normalises it: the host as written, the
//! path as written (dot segments, case and unescaped characters untouched,
//! empty when none was given), and whether a port was written at all.

use url::{Host, Url};

use crate::error::{RelayError, RelayResult};

/// The parts of a request target the handlers need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl {
    host: String,
    connect_host: String,
    port: Option<u16>,
    path: String,
}

impl TargetUrl {
    /// Parse an absolute target such as `http://example.com:8080/a/b?q`.
    pub fn parse(raw: &str) -> RelayResult<Self> {
        let invalid = |reason: &str| RelayError::InvalidTarget {
            target: raw.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;

        let connect_host = match url.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_string(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            _ => return Err(invalid("missing host")),
        };

        let (authority, rest) = split_authority(raw);
        let host = written_host(authority);
        if host.is_empty() {
            return Err(invalid("missing host"));
        }

        let port = if has_explicit_port(authority) {
            url.port_or_known_default()
        } else {
            None
        };

        Ok(Self {
            host: host.to_string(),
            connect_host,
            port,
            path: written_path(rest).to_string(),
        })
    }

    /// Host as written in the target (IPv6 keeps its brackets).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Host in the form a socket connect expects.
    pub fn connect_host(&self) -> &str {
        &self.connect_host
    }

    /// Port written in the URL, if any.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Explicit port, else `default`.
    pub fn port_or(&self, default: u16) -> u16 {
        self.port.unwrap_or(default)
    }

    /// Path as written, without query or fragment. Empty when the URL has none.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Split `scheme://authority/rest` into `(authority, rest)`.
fn split_authority(raw: &str) -> (&str, &str) {
    let after_scheme = raw.find("://").map(|i| &raw[i + 3..]).unwrap_or(raw);
    let end = after_scheme
        .find(&['/', '?', '#'][..])
        .unwrap_or(after_scheme.len());
    after_scheme.split_at(end)
}

/// Drop userinfo and port from an authority.
fn written_host(authority: &str) -> &str {
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    if host_port.starts_with('[') {
        match host_port.find(']') {
            Some(i) => &host_port[..=i],
            None => host_port,
        }
    } else {
        host_port.split(':').next().unwrap_or(host_port)
    }
}

/// The path part of what follows the authority, cut at `?` or `#`.
fn written_path(rest: &str) -> &str {
    if !rest.starts_with('/') {
        return "";
    }
    let end = rest.find(&['?', '#'][..]).unwrap_or(rest.len());
    &rest[..end]
}

fn has_explicit_port(authority: &str) -> bool {
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let port = if host_port.starts_with('[') {
        host_port
            .find(']')
            .and_then(|i| host_port[i + 1..].strip_prefix(':'))
    } else {
        host_port.rsplit_once(':').map(|(_, port)| port)
    };
    matches!(port, Some(p) if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}
