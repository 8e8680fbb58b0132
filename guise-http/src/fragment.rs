//! Header fragments: partial header sets produced by one derivation step.
//!
//! Fragments are applied in order onto a [`HeaderSetBuilder`],
//! later fragments overriding earlier ones:
//! universal, then browser-specific, then randomized.
//!
//! [`HeaderSetBuilder`]: crate::HeaderSetBuilder

use guise_ua::{BrowserFamily, SoftwareVersion};
use rand::{Rng, RngExt as _, seq::IndexedRandom as _};

use crate::{HeaderField, HeaderFieldValue};

/// `Accept` sent by chromium-based browsers for a top-level document.
pub const CHROME_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8";

/// `Accept` sent by firefox, except for version 65.
pub const FIREFOX_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// `Accept` sent by firefox 65, the only version advertising webp support.
pub const FIREFOX_65_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// `Accept-Language` sent with every header set.
pub const ACCEPT_LANGUAGE: &str = "en-US;q=0.5,en;q=0.3";

/// `Accept-Encoding` sent with every header set.
pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// Search engines one of which is picked as `Referer`.
pub const REFERERS: [&str; 8] = [
    "https://google.com",
    "http://www.bing.com/",
    "https://yandex.com/",
    "https://duckduckgo.com/",
    "https://www.yahoo.com/",
    "https://www.baidu.com/",
    "https://contextualwebsearch.com/",
    "https://www.yippy.com/",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A partial set of headers, in insertion order.
pub struct HeaderFragment {
    fields: Vec<(HeaderField, HeaderFieldValue)>,
}

impl HeaderFragment {
    /// Create an empty [`HeaderFragment`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing an earlier value for the same field.
    #[must_use]
    pub fn with(mut self, field: HeaderField, value: impl Into<HeaderFieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field, replacing an earlier value for the same field.
    pub fn set(&mut self, field: HeaderField, value: impl Into<HeaderFieldValue>) -> &mut Self {
        let value = value.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((field, value)),
        }
        self
    }

    /// Get the value of a field, if set.
    #[must_use]
    pub fn get(&self, field: HeaderField) -> Option<&HeaderFieldValue> {
        self.fields
            .iter()
            .find_map(|(f, value)| (*f == field).then_some(value))
    }

    /// Iterate over the fields of this fragment, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (HeaderField, &HeaderFieldValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl IntoIterator for HeaderFragment {
    type Item = (HeaderField, HeaderFieldValue);
    type IntoIter = std::vec::IntoIter<(HeaderField, HeaderFieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Headers sent regardless of the user agent.
#[must_use]
pub fn universal_fragment() -> HeaderFragment {
    HeaderFragment::new()
        .with(HeaderField::AcceptEncoding, ACCEPT_ENCODING)
        .with(HeaderField::UpgradeInsecureRequests, 1u8)
        .with(HeaderField::Pragma, "no-cache")
        .with(HeaderField::CacheControl, "no-cache")
}

/// Headers specific to the browser family (and version) of the user agent.
///
/// An [`BrowserFamily::Unrecognized`] family yields an empty fragment,
/// leaving `Accept` and the `Sec-Fetch-*` headers unset.
#[must_use]
pub fn browser_fragment(family: BrowserFamily, version: SoftwareVersion) -> HeaderFragment {
    match family {
        BrowserFamily::Chrome => HeaderFragment::new()
            .with(HeaderField::Accept, CHROME_ACCEPT)
            .with(HeaderField::SecFetchDest, "document")
            .with(HeaderField::SecFetchMode, "navigate")
            .with(HeaderField::SecFetchSite, "none")
            .with(HeaderField::SecFetchUser, "?1")
            .with(HeaderField::SecGpc, 1u8),
        BrowserFamily::Firefox => HeaderFragment::new()
            .with(HeaderField::Accept, firefox_accept(version))
            .with(HeaderField::Te, "trailers"),
        BrowserFamily::Unrecognized => HeaderFragment::new(),
    }
}

fn firefox_accept(version: SoftwareVersion) -> &'static str {
    if version.is_exactly(65) {
        FIREFOX_65_ACCEPT
    } else {
        FIREFOX_ACCEPT
    }
}

/// Headers picked at random: `DNT`, `Accept-Language` and `Referer`.
pub fn randomized_fragment<R>(rng: &mut R) -> HeaderFragment
where
    R: Rng + ?Sized,
{
    let dnt: u8 = if rng.random_bool(0.5) { 1 } else { 0 };
    let referer = REFERERS.choose(rng).copied().unwrap_or(REFERERS[0]);
    HeaderFragment::new()
        .with(HeaderField::Dnt, dnt)
        .with(HeaderField::AcceptLanguage, ACCEPT_LANGUAGE)
        .with(HeaderField::Referer, referer)
}
