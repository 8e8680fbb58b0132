//! Browser-like request headers paired with real-world user agents.
//!
//! `guise` fetches a corpus of observed user agents once, keeps the ones matching
//! the configured operating systems, browsers and minimum observation count,
//! and composes for each request a full set of headers consistent with a
//! randomly sampled user agent.
//!
//! | crate | purpose |
//! |-|-|
//! | [`ua`] | user-agent corpus: records, filters, sources and the sampling pool |
//! | [`http`] | header fields, fragments, header sets and the composer |
//!
//! # Example
//!
//! ```no_run
//! use guise::{HeaderComposer, HeaderComposerConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), guise::Error> {
//! let mut composer = HeaderComposer::new(&HeaderComposerConfig::default())?;
//! composer.initialize().await?;
//!
//! for (field, value) in composer.generate()?.iter_set() {
//!     println!("{field}: {value}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The example above fetches the corpus over HTTP and requires the
//! (default) `http-source` feature. Any [`CorpusSource`] can be used instead,
//! via [`HeaderComposer::with_source`].

#![cfg_attr(docsrs, feature(doc_cfg))]

#[doc(inline)]
pub use guise_http as http;
#[doc(inline)]
pub use guise_ua as ua;

pub use guise_http::{HeaderComposer, HeaderComposerConfig, HeaderField, HeaderSet};
pub use guise_ua::{
    CorpusSource, Error, ErrorKind, FilterCriteria, Result, SoftwareVersion, UserAgentPool,
    UserAgentRecord,
};
