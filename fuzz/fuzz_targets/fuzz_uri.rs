#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, RngCore, SeedableRng};
use uriscan::{Cursor, ParserOptions, Uri, UriBuilder, parse, parse_with_options, read_unsigned_integer};

const HEADER: usize = 1; // 1 flag byte

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    "\u{2003}".as_bytes(),
    "\u{3000}".as_bytes(),
];

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x01);

        let limit = max_size - HEADER;
        let mut written = HEADER;
        written += append_whitespace(&mut data[written..], limit);
        written += append_uri(&mut data[written..], size, max_size - written);
        written += append_whitespace(&mut data[written..], max_size - written);
        written
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append 0‒N whitespace code-points, never exceeding `limit`.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        let n_codepoints = rng.random_range(0..=limit.min(3));
        let mut written = 0;
        for _ in 0..n_codepoints {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

/// Append the canonical form of an arbitrary URI.
fn append_uri(data: &mut [u8], size: usize, limit: usize) -> usize {
    let uri = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2 + 2).min(4096));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(uri) = ArbitraryUri::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break uri;
        }
    };

    let serialized = uri.0.as_str().as_bytes();
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryUri(Uri);

impl<'a> Arbitrary<'a> for ArbitraryUri {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let schemes = ["http", "https", "ftp", "urn", "x+y-z.0"];
        let mut builder = UriBuilder::new().scheme(*u.choose(&schemes)?);
        if u.arbitrary()? {
            builder = match u.choose_index(3)? {
                0 => builder.host(u.arbitrary::<String>()?),
                1 => builder.host_ip(std::net::Ipv4Addr::from(u.arbitrary::<u32>()?)),
                _ => builder.host_ip(std::net::Ipv6Addr::from(u.arbitrary::<u128>()?)),
            };
            builder = builder
                .userinfo(u.arbitrary::<String>()?)
                .port(u.arbitrary()?);
        }
        builder = builder.path(u.arbitrary::<String>()?);
        let pairs: Vec<(String, String)> = u.arbitrary()?;
        for (key, value) in pairs {
            builder = builder.add_query(key, value);
        }
        Ok(Self(builder.fragment(u.arbitrary::<String>()?).build()))
    }
}

fn read_all_widths(text: &str) {
    fn read<T: uriscan::UnsignedInt + Into<u64>>(text: &str) -> Option<u64> {
        let mut value = None;
        let mut cursor = Cursor::new(text);
        read_unsigned_integer(&mut cursor, &mut |x: T| value = Some(x.into()));
        assert_eq!(value.is_some(), cursor.is_ok());
        value
    }

    let wide = read::<u64>(text);
    for narrow in [read::<u8>(text), read::<u16>(text), read::<u32>(text)] {
        if let Some(n) = narrow {
            assert_eq!(Some(n), wide, "{text:?}");
        }
    }
}

fn target(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let text = String::from_utf8_lossy(&data[HEADER..]).into_owned();

    read_all_widths(&text);

    let options = ParserOptions {
        allow_unicode_whitespace: flags & 1 != 0,
        panic_on_error: false,
    };
    let Ok(uri) = parse_with_options(&text, options) else {
        return;
    };

    let again = parse(uri.as_str()).expect("canonical form must parse");
    assert_eq!(again, uri);
    assert_eq!(again.hash_code(), uri.hash_code());

    let json = serde_json::to_string(&uri).expect("serialize");
    let back: Uri = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, uri);
}

fuzz_target!(|data: &[u8]| target(data));
