use http::HeaderName;
use serde::{Serialize, Serializer};
use std::{borrow::Cow, fmt};

macro_rules! header_fields {
    (
        $(
            $(#[$docs:meta])*
            ($variant:ident, $name:literal, $lower:literal);
        )+
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        /// A request header produced by the header composer.
        pub enum HeaderField {
            $(
                $(#[$docs])*
                $variant,
            )+
        }

        impl HeaderField {
            /// The header name, in the casing browsers send it.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// The header name as an [`http::HeaderName`].
            #[must_use]
            pub fn header_name(&self) -> HeaderName {
                match self {
                    $(Self::$variant => HeaderName::from_static($lower),)+
                }
            }
        }
    };
}

header_fields! {
    /// `User-Agent`
    (UserAgent, "User-Agent", "user-agent");
    /// `Accept`
    (Accept, "Accept", "accept");
    /// `Accept-Language`
    (AcceptLanguage, "Accept-Language", "accept-language");
    /// `Accept-Encoding`
    (AcceptEncoding, "Accept-Encoding", "accept-encoding");
    /// `Referer`
    (Referer, "Referer", "referer");
    /// `Upgrade-Insecure-Requests`
    (UpgradeInsecureRequests, "Upgrade-Insecure-Requests", "upgrade-insecure-requests");
    /// `Pragma`
    (Pragma, "Pragma", "pragma");
    /// `Cache-Control`
    (CacheControl, "Cache-Control", "cache-control");
    /// `Sec-Fetch-Dest`
    (SecFetchDest, "Sec-Fetch-Dest", "sec-fetch-dest");
    /// `Sec-Fetch-Mode`
    (SecFetchMode, "Sec-Fetch-Mode", "sec-fetch-mode");
    /// `Sec-Fetch-Site`
    (SecFetchSite, "Sec-Fetch-Site", "sec-fetch-site");
    /// `Sec-Fetch-User`
    (SecFetchUser, "Sec-Fetch-User", "sec-fetch-user");
    /// `Sec-Gpc`
    (SecGpc, "Sec-Gpc", "sec-gpc");
    /// `DNT`, produced by the randomized fragment but not part of the canonical order.
    (Dnt, "DNT", "dnt");
    /// `TE`, produced for firefox but not part of the canonical order.
    (Te, "TE", "te");
}

/// The order in which headers are emitted.
pub const CANONICAL_ORDER: [HeaderField; 13] = [
    HeaderField::UserAgent,
    HeaderField::Accept,
    HeaderField::AcceptLanguage,
    HeaderField::AcceptEncoding,
    HeaderField::Referer,
    HeaderField::UpgradeInsecureRequests,
    HeaderField::Pragma,
    HeaderField::CacheControl,
    HeaderField::SecFetchDest,
    HeaderField::SecFetchMode,
    HeaderField::SecFetchSite,
    HeaderField::SecFetchUser,
    HeaderField::SecGpc,
];

impl HeaderField {
    /// Position of this field in [`CANONICAL_ORDER`],
    /// `None` for fields that are not emitted.
    #[must_use]
    pub fn canonical_index(&self) -> Option<usize> {
        CANONICAL_ORDER.iter().position(|field| field == self)
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Value of a [`HeaderField`]: either text or a small number.
pub enum HeaderFieldValue {
    /// A textual value, e.g. `no-cache`.
    Text(Cow<'static, str>),
    /// A numeric value, e.g. `1` for `Upgrade-Insecure-Requests`.
    Number(u8),
}

impl HeaderFieldValue {
    /// Returns the text value, if this is a [`HeaderFieldValue::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Returns the numeric value, if this is a [`HeaderFieldValue::Number`].
    #[must_use]
    pub fn as_number(&self) -> Option<u8> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl From<&'static str> for HeaderFieldValue {
    fn from(value: &'static str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl From<String> for HeaderFieldValue {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl From<u8> for HeaderFieldValue {
    fn from(value: u8) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for HeaderFieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for HeaderFieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => serializer.serialize_u8(*n),
        }
    }
}
