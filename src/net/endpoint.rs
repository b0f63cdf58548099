//! Logical endpoint identity.

use std::fmt;
use std::net::Ipv6Addr;

use hyper::Uri;
use thiserror::Error;
use url::Url;

/// Error parsing an endpoint URL or building a request URI from it.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    #[error("unsupported endpoint scheme: {0}")]
    UnsupportedScheme(String),

    #[error("endpoint url has no hostname")]
    MissingHost,

    #[error("invalid request path: {0}")]
    InvalidPath(String),
}

/// Transport scheme for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The {hostname, port, scheme} triple identifying one logical service
/// destination, independent of which physical address serves a given
/// connection. Parsed once from the configured URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub scheme: Scheme,
}

impl Endpoint {
    pub fn parse(url: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(url)?;

        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
        };

        let host = match url.host() {
            Some(url::Host::Domain(domain)) => domain.to_string(),
            Some(url::Host::Ipv4(ip)) => ip.to_string(),
            Some(url::Host::Ipv6(ip)) => ip.to_string(),
            None => return Err(EndpointError::MissingHost),
        };

        let port = url.port_or_known_default().unwrap_or(scheme.default_port());

        Ok(Self { host, port, scheme })
    }

    /// host:port, with IPv6 hosts bracketed.
    pub fn authority(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Absolute request URI for `path` on this endpoint.
    pub fn uri_for(&self, path: &str) -> Result<Uri, EndpointError> {
        let separator = if path.starts_with('/') { "" } else { "/" };
        format!("{}://{}{}{}", self.scheme, self.authority(), separator, path)
            .parse()
            .map_err(|_| EndpointError::InvalidPath(path.to_string()))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_uses_default_port() {
        let endpoint = Endpoint::parse("https://storage.example.com").unwrap();
        assert_eq!(endpoint.host, "storage.example.com");
        assert_eq!(endpoint.port, 443);
        assert_eq!(endpoint.scheme, Scheme::Https);
    }

    #[test]
    fn test_parse_explicit_port() {
        let endpoint = Endpoint::parse("http://storage.example.com:9000/bucket").unwrap();
        assert_eq!(endpoint.port, 9000);
        assert_eq!(endpoint.scheme, Scheme::Http);
        assert_eq!(endpoint.authority(), "storage.example.com:9000");
    }

    #[test]
    fn test_parse_ipv6_host() {
        let endpoint = Endpoint::parse("http://[::1]:8080").unwrap();
        assert_eq!(endpoint.host, "::1");
        assert_eq!(endpoint.authority(), "[::1]:8080");
    }

    #[test]
    fn test_rejects_unsupported_scheme() {
        assert!(matches!(
            Endpoint::parse("ftp://storage.example.com"),
            Err(EndpointError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Endpoint::parse("not a url").is_err());
    }

    #[test]
    fn test_uri_for_normalizes_path() {
        let endpoint = Endpoint::parse("http://storage.example.com:9000").unwrap();
        assert_eq!(
            endpoint.uri_for("status").unwrap(),
            "http://storage.example.com:9000/status"
        );
        assert_eq!(
            endpoint.uri_for("/status").unwrap(),
            "http://storage.example.com:9000/status"
        );
    }
}
