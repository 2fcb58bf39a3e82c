//! The frozen URI value.
//!
//! A [`Uri`] is an `Arc` over its components plus the canonical string they
//! serialize to. Equality, ordering and hashing all go through that string,
//! so two URIs that print the same are the same. Modification goes through
//! [`Uri::to_builder`] and always produces a new value.

mod authority;
mod builder;
mod hash;

use alloc::{string::String, sync::Arc};
use core::{cmp::Ordering, fmt, str::FromStr};

pub use authority::{Authority, Host};
pub use builder::{Query, UriBuilder};
pub use hash::fnv_hash;
use once_cell::race::OnceBox;

use crate::ParseError;

#[derive(Debug, Default)]
pub(crate) struct UriData {
    text: String,
    hash: u64,
    scheme: String,
    authority: Option<Authority>,
    path: String,
    query: Query,
    fragment: String,
}

static EMPTY: OnceBox<Arc<UriData>> = OnceBox::new();

/// An immutable, shareable URI.
///
/// ```rust
/// use uriscan::Uri;
///
/// let uri: Uri = "HTTPS://example.com/a%2fb?x=1#top".parse().unwrap();
/// assert_eq!(uri.scheme(), "https");
/// assert_eq!(uri.path(), "/a/b");
/// assert_eq!(uri.query(), [("x".to_string(), "1".to_string())]);
/// assert_eq!(uri.fragment(), "top");
/// assert_eq!(uri.to_string(), "https://example.com/a/b?x=1#top");
/// ```
#[derive(Clone)]
pub struct Uri {
    inner: Arc<UriData>,
}

impl Uri {
    /// The shared empty URI. Every call returns the same allocation.
    #[must_use]
    pub fn empty() -> Self {
        let inner = EMPTY.get_or_init(|| {
            let data = UriData {
                hash: fnv_hash(b""),
                ..UriData::default()
            };
            alloc::boxed::Box::new(Arc::new(data))
        });
        Self {
            inner: Arc::clone(inner),
        }
    }

    /// Parses `text`; see [`crate::parse`].
    ///
    /// # Errors
    ///
    /// Returns the first grammar failure with its position.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        crate::parse(text)
    }

    /// Whether every component is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.text.is_empty()
    }

    /// The canonical string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner.text
    }

    /// Alias of [`as_str`](Self::as_str).
    #[must_use]
    pub fn str(&self) -> &str {
        self.as_str()
    }

    /// FNV-1a 64 of the canonical string, computed once when built.
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        self.inner.hash
    }

    /// The lowercase scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.inner.scheme
    }

    /// The authority, present iff the URI had a `//` part.
    #[must_use]
    pub fn authority(&self) -> Option<&Authority> {
        self.inner.authority.as_ref()
    }

    /// The decoded path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.inner.path
    }

    /// The decoded query pairs, in source order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.inner.query
    }

    /// The decoded fragment.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.inner.fragment
    }

    /// Compares canonical strings.
    #[must_use]
    pub fn compare(&self, other: &Uri) -> Ordering {
        self.compare_str(other.as_str())
    }

    /// Compares the canonical string with `other`.
    #[must_use]
    pub fn compare_str(&self, other: &str) -> Ordering {
        self.as_str().cmp(other)
    }

    /// A builder holding a copy of every component.
    #[must_use]
    pub fn to_builder(&self) -> UriBuilder {
        UriBuilder {
            scheme: self.inner.scheme.clone(),
            authority: self.inner.authority.clone(),
            path: self.inner.path.clone(),
            query: self.inner.query.clone(),
            fragment: self.inner.fragment.clone(),
        }
    }
}

impl Default for Uri {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.as_str() == other.as_str()
    }
}

impl Eq for Uri {}

impl PartialEq<str> for Uri {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Uri {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialOrd for Uri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl core::hash::Hash for Uri {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.inner.scheme)
            .field("authority", &self.inner.authority)
            .field("path", &self.inner.path)
            .field("query", &self.inner.query)
            .field("fragment", &self.inner.fragment)
            .finish()
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        crate::parse(s)
    }
}

impl From<UriBuilder> for Uri {
    fn from(builder: UriBuilder) -> Self {
        builder.build()
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Uri {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Uri", 5)?;
        s.serialize_field("scheme", &self.inner.scheme)?;
        s.serialize_field("authority", &self.inner.authority)?;
        s.serialize_field("path", &self.inner.path)?;
        s.serialize_field("query", &self.inner.query)?;
        s.serialize_field("fragment", &self.inner.fragment)?;
        s.end()
    }
}

#[cfg(any(test, feature = "serde"))]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <UriBuilder as serde::Deserialize>::deserialize(deserializer).map(UriBuilder::build)
    }
}
