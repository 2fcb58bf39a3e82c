use alloc::{string::String, sync::Arc, vec::Vec};
use core::net::IpAddr;

use super::{Authority, Host, Uri, UriData, fnv_hash};
use crate::percent::{Component, append_percent_encoded, push_escape};

/// Ordered `key=value` pairs. Duplicate keys are kept as separate entries.
pub type Query = Vec<(String, String)>;

/// The mutable staging form of a [`Uri`].
///
/// The parser fills one of these component by component; [`build`] freezes it
/// into an immutable, cheaply clonable `Uri` with a canonical string.
///
/// ```rust
/// use uriscan::UriBuilder;
///
/// let uri = UriBuilder::new()
///     .scheme("HTTP")
///     .host("example.com")
///     .port(8080)
///     .path("a b")
///     .add_query("q", "1&2")
///     .build();
/// assert_eq!(uri.as_str(), "http://example.com:8080/a%20b?q=1%262");
/// ```
///
/// [`build`]: UriBuilder::build
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(default))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriBuilder {
    pub(crate) scheme: String,
    pub(crate) authority: Option<Authority>,
    pub(crate) path: String,
    pub(crate) query: Query,
    pub(crate) fragment: String,
}

impl UriBuilder {
    /// An empty builder; building it yields [`Uri::empty`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scheme. It is lowercased when the URI is built.
    #[must_use]
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    fn authority_mut(&mut self) -> &mut Authority {
        self.authority.get_or_insert_with(Authority::default)
    }

    /// Sets the (decoded) user information. Adds an authority if missing.
    #[must_use]
    pub fn userinfo(mut self, userinfo: impl Into<String>) -> Self {
        self.authority_mut().userinfo = userinfo.into();
        self
    }

    /// Sets a registered host name. Dotted IPv4 text becomes an IP host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.authority_mut().host = Host::from_name(host.into());
        self
    }

    /// Sets an IP host.
    #[must_use]
    pub fn host_ip(mut self, ip: impl Into<IpAddr>) -> Self {
        self.authority_mut().host = Host::from_ip(ip.into());
        self
    }

    /// Sets the port; zero means unspecified.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.authority_mut().port = port;
        self
    }

    /// Replaces the whole authority, or removes it with `None`.
    #[must_use]
    pub fn authority(mut self, authority: Option<Authority>) -> Self {
        self.authority = authority;
        self
    }

    /// Sets the (decoded) path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Appends one query pair after the existing ones.
    #[must_use]
    pub fn add_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the (decoded) fragment.
    #[must_use]
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = fragment.into();
        self
    }

    /// Freezes the components into a [`Uri`].
    ///
    /// The scheme is lowercased, IP hosts are normalized, and a path under an
    /// authority gets its leading `/`. An all-empty builder returns the shared
    /// [`Uri::empty`] instance.
    #[must_use]
    pub fn build(mut self) -> Uri {
        self.scheme.make_ascii_lowercase();
        if let Some(authority) = &mut self.authority {
            authority.host = core::mem::take(&mut authority.host).normalized();
            if !self.path.is_empty() && !self.path.starts_with('/') {
                self.path.insert(0, '/');
            }
        }

        let text = self.canonical_string();
        if text.is_empty() {
            return Uri::empty();
        }
        crate::log_trace!("froze uri {text}");
        let hash = fnv_hash(text.as_bytes());
        Uri {
            inner: Arc::new(UriData {
                text,
                hash,
                scheme: self.scheme,
                authority: self.authority,
                path: self.path,
                query: self.query,
                fragment: self.fragment,
            }),
        }
    }

    fn canonical_string(&self) -> String {
        let mut out = String::new();
        if !self.scheme.is_empty() {
            out.push_str(&self.scheme);
            out.push(':');
        }
        if let Some(authority) = &self.authority {
            out.push_str("//");
            authority.write_canonical(&mut out);
            append_percent_encoded(&mut out, &self.path, Component::Path);
        } else if let Some(rest) = self.path.strip_prefix("//") {
            // Keep it from reading back as an authority.
            push_escape(&mut out, b'/');
            out.push('/');
            append_percent_encoded(&mut out, rest, Component::Path);
        } else {
            append_percent_encoded(&mut out, &self.path, Component::Path);
        }
        for (i, (key, value)) in self.query.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            append_percent_encoded(&mut out, key, Component::QueryKey);
            if !value.is_empty() || key.is_empty() {
                out.push('=');
                append_percent_encoded(&mut out, value, Component::QueryValue);
            }
        }
        if !self.fragment.is_empty() {
            out.push('#');
            append_percent_encoded(&mut out, &self.fragment, Component::Fragment);
        }
        out
    }
}
