//! User Agent (UA) corpus filtering and sampling.
//!
//! This crate provides the [`UserAgentPool`]: a pool of real-world user agents,
//! fetched once from a [`CorpusSource`] and narrowed down to the operating systems,
//! browsers and minimum observation frequency described by [`FilterCriteria`].
//! Sampling picks one [`UserAgentRecord`] uniformly at random.
//!
//! The `guise-http` crate builds browser-like request headers on top of it.
//!
//! # Corpus sources
//!
//! - `Vec<UserAgentRecord>`: an in-memory corpus;
//! - [`FileCorpusSource`]: a JSON array stored on disk;
//! - `HttpCorpusSource`: a JSON array fetched over HTTP (requires the `http-source` feature).
//!
//! Implement [`CorpusSource`] for anything else.
//!
//! # Remarks
//!
//! Filters match by case-sensitive substring containment: the OS filter `mac`
//! matches the code `macos`. An empty filter would match nothing and is therefore
//! rejected when constructing [`FilterCriteria`].
//!
//! A pool whose filtered corpus turns out empty fails to initialize,
//! rather than failing on the first sample.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{BoxError, Error, ErrorKind, Result};

mod record;
pub use record::{BrowserFamily, SoftwareVersion, UserAgentRecord};

mod filter;
pub use filter::{DEFAULT_BROWSERS, DEFAULT_OPERATING_SYSTEMS, FilterCriteria, TokenFilter};

pub mod source;
#[doc(inline)]
pub use source::{CorpusSource, FileCorpusSource};

mod pool;
pub use pool::{SampledUserAgent, UserAgentPool};
