use alloc::{string::String, vec::Vec};
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use quickcheck::{Arbitrary, Gen};

use crate::{Uri, UriBuilder};

/// Characters that stress the escaping rules of every component.
const TRICKY: &[char] = &[
    '/', '?', '#', '[', ']', '@', ':', '&', '=', '%', '+', ' ', '\t', '\n', '\0', '~', 'é', '€',
    '\u{2003}', '\u{1F600}',
];

fn text(g: &mut Gen) -> String {
    let len = usize::arbitrary(g) % 8;
    (0..len)
        .map(|_| match usize::arbitrary(g) % 3 {
            0 => *g.choose(TRICKY).unwrap_or(&'x'),
            1 => char::from(b'a' + u8::arbitrary(g) % 26),
            _ => char::arbitrary(g),
        })
        .collect()
}

fn scheme(g: &mut Gen) -> String {
    let base = *g
        .choose(&["http", "HTTPS", "urn", "x-y+z.1", "A"])
        .unwrap_or(&"x");
    String::from(base)
}

/// A URI assembled through the builder from arbitrary components.
#[derive(Debug, Clone)]
pub(crate) struct ArbitraryUri(pub Uri);

impl Arbitrary for ArbitraryUri {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut builder = UriBuilder::new().scheme(scheme(g));
        if bool::arbitrary(g) {
            builder = match usize::arbitrary(g) % 3 {
                0 => builder.host(text(g)),
                1 => builder.host_ip(IpAddr::V4(Ipv4Addr::from(u32::arbitrary(g)))),
                _ => builder.host_ip(IpAddr::V6(Ipv6Addr::from(u128::arbitrary(g)))),
            };
            if bool::arbitrary(g) {
                builder = builder.userinfo(text(g));
            }
            builder = builder.port(u16::arbitrary(g));
        }
        builder = builder.path(text(g));
        let pairs = usize::arbitrary(g) % 4;
        for _ in 0..pairs {
            builder = builder.add_query(text(g), text(g));
        }
        builder = builder.fragment(text(g));
        Self(builder.build())
    }
}

pub(crate) fn components(uri: &Uri) -> Vec<String> {
    let mut out = Vec::new();
    out.push(String::from(uri.scheme()));
    if let Some(authority) = uri.authority() {
        out.push(authority.userinfo.clone());
        out.push(alloc::format!("{:?}:{}", authority.host, authority.port));
    }
    out.push(String::from(uri.path()));
    for (k, v) in uri.query() {
        out.push(alloc::format!("{k}={v}"));
    }
    out.push(String::from(uri.fragment()));
    out
}
