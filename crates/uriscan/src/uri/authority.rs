use alloc::string::String;
use core::{
    fmt,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
};

use crate::percent::{Component, append_percent_encoded};

/// The host of an [`Authority`]: a registered name or an IP address.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Host {
    /// A percent-decoded registered name. May be empty (`file:///`).
    Name(String),
    /// An IP address. IPv4-mapped IPv6 addresses are stored as IPv4.
    Ip(IpAddr),
}

impl Default for Host {
    fn default() -> Self {
        Self::Name(String::new())
    }
}

impl Host {
    /// Classifies a decoded host name: dotted IPv4 becomes [`Host::Ip`].
    pub(crate) fn from_name(name: String) -> Self {
        match name.parse::<Ipv4Addr>() {
            Ok(addr) => Self::Ip(IpAddr::V4(addr)),
            Err(_) => Self::Name(name),
        }
    }

    /// Stores IPv4-mapped IPv6 addresses in their IPv4 form.
    pub(crate) fn from_ip(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V6(v6) => Self::Ip(v6.to_ipv4_mapped().map_or(ip, IpAddr::V4)),
            IpAddr::V4(_) => Self::Ip(ip),
        }
    }

    /// Re-applies the classification rules; used when freezing.
    pub(crate) fn normalized(self) -> Self {
        match self {
            Self::Name(name) => Self::from_name(name),
            Self::Ip(ip) => Self::from_ip(ip),
        }
    }

    /// Returns `true` for an empty registered name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Name(name) if name.is_empty())
    }

    /// The registered name, if this is not an IP address.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Ip(_) => None,
        }
    }

    /// The IP address, if this is one.
    #[must_use]
    pub fn as_ip(&self) -> Option<IpAddr> {
        match self {
            Self::Ip(ip) => Some(*ip),
            Self::Name(_) => None,
        }
    }

    pub(crate) fn write_canonical(&self, out: &mut String) {
        match self {
            Self::Ip(IpAddr::V6(addr)) => {
                use core::fmt::Write;
                // Writing into a `String` cannot fail.
                let _ = write!(out, "[{addr}]");
            }
            Self::Ip(IpAddr::V4(addr)) => {
                use core::fmt::Write;
                let _ = write!(out, "{addr}");
            }
            Self::Name(name) => append_percent_encoded(out, name, Component::Host),
        }
    }
}

impl From<IpAddr> for Host {
    fn from(ip: IpAddr) -> Self {
        Self::from_ip(ip)
    }
}

impl From<Ipv4Addr> for Host {
    fn from(ip: Ipv4Addr) -> Self {
        Self::Ip(IpAddr::V4(ip))
    }
}

impl From<Ipv6Addr> for Host {
    fn from(ip: Ipv6Addr) -> Self {
        Self::from_ip(IpAddr::V6(ip))
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_canonical(&mut out);
        f.write_str(&out)
    }
}

/// `[userinfo "@"] host [":" port]`.
///
/// A port of zero means "unspecified" and is never rendered.
///
/// ```rust
/// use uriscan::parse;
///
/// let uri = parse("https://user@[::1]:8080/path").unwrap();
/// let authority = uri.authority().unwrap();
/// assert_eq!(authority.userinfo, "user");
/// assert_eq!(authority.port, 8080);
/// assert_eq!(authority.to_string(), "user@[::1]:8080");
/// ```
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Authority {
    /// Percent-decoded user information; empty when absent.
    pub userinfo: String,
    /// The host.
    pub host: Host,
    /// The port, or zero when unspecified.
    pub port: u16,
}

impl Authority {
    /// Appends the canonical form to `out`.
    pub(crate) fn write_canonical(&self, out: &mut String) {
        if !self.userinfo.is_empty() {
            append_percent_encoded(out, &self.userinfo, Component::Userinfo);
            out.push('@');
        }
        self.host.write_canonical(out);
        if self.port != 0 {
            use core::fmt::Write;
            let _ = write!(out, ":{}", self.port);
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_canonical(&mut out);
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn mapped_addresses_collapse_to_v4() {
        let mapped: Ipv6Addr = "::ffff:10.0.0.1".parse().unwrap();
        assert_eq!(
            Host::from(mapped),
            Host::Ip(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
        );
        assert_eq!(Host::from(Ipv6Addr::LOCALHOST).to_string(), "[::1]");
    }

    #[test]
    fn dotted_names_become_addresses() {
        assert_eq!(
            Host::from_name("127.0.0.1".into()).as_ip(),
            Some(IpAddr::V4(Ipv4Addr::LOCALHOST))
        );
        assert_eq!(Host::from_name("127.0.0".into()).as_name(), Some("127.0.0"));
        assert!(Host::default().is_empty());
    }

    #[test]
    fn renders_userinfo_host_and_port() {
        let authority = Authority {
            userinfo: "me:secret".into(),
            host: Host::Name("exa mple".into()),
            port: 0,
        };
        assert_eq!(authority.to_string(), "me%3Asecret@exa%20mple");

        let authority = Authority {
            userinfo: String::new(),
            host: Host::from(Ipv4Addr::new(1, 2, 3, 4)),
            port: 443,
        };
        assert_eq!(authority.to_string(), "1.2.3.4:443");
    }
}
