//! Browser-like HTTP request headers.
//!
//! This crate provides the [`HeaderComposer`], which pairs a user agent sampled
//! from a [`UserAgentPool`](guise_ua::UserAgentPool) with the request headers
//! a browser of that family would send alongside it.
//!
//! Every generated [`HeaderSet`] holds the same fields, in [`CANONICAL_ORDER`]:
//!
//! 1. universal headers (`Accept-Encoding`, `Upgrade-Insecure-Requests`, `Pragma`, `Cache-Control`);
//! 2. the sampled `User-Agent`;
//! 3. browser headers (`Accept` and, for chrome, `Sec-Fetch-*` and `Sec-Gpc`);
//! 4. randomized headers (`Accept-Language` and a `Referer` picked from [`REFERERS`]).
//!
//! Fields no step assigned a value to are present but unset.
//!
//! # Example
//!
//! ```
//! use guise_http::{HeaderComposer, HeaderComposerConfig, HeaderField};
//! use guise_ua::{SoftwareVersion, UserAgentRecord};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), guise_http::Error> {
//! let corpus = vec![UserAgentRecord {
//!     user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0".to_owned(),
//!     software_name_code: "chrome".to_owned(),
//!     operating_system_code: "windows".to_owned(),
//!     software_version: SoftwareVersion::new(120),
//!     time_seen: 1000,
//! }];
//!
//! let mut composer = HeaderComposer::with_source(&HeaderComposerConfig::default(), corpus)?;
//! composer.initialize().await?;
//!
//! let headers = composer.generate()?;
//! assert!(headers.user_agent().is_some_and(|ua| ua.contains("Chrome/120.0")));
//! assert!(headers.get(HeaderField::SecFetchDest).is_some());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub use guise_ua::{Error, ErrorKind, Result};

mod field;
pub use field::{CANONICAL_ORDER, HeaderField, HeaderFieldValue};

pub mod fragment;
#[doc(inline)]
pub use fragment::{
    ACCEPT_ENCODING, ACCEPT_LANGUAGE, CHROME_ACCEPT, FIREFOX_65_ACCEPT, FIREFOX_ACCEPT,
    HeaderFragment, REFERERS, browser_fragment, randomized_fragment, universal_fragment,
};

mod set;
pub use set::{HeaderSet, HeaderSetBuilder};

mod composer;
pub use composer::{DEFAULT_MIN_TIMES_SEEN, HeaderComposer, HeaderComposerConfig};
