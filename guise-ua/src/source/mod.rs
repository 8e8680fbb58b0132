//! Sources delivering the raw user-agent corpus.
//!
//! A [`CorpusSource`] is consulted once per [`UserAgentPool::initialize`] call.
//! The pool filters whatever the source returns, so a source should return the
//! full corpus. Sources do not retry nor time out: wrap them if you need that.
//!
//! [`UserAgentPool::initialize`]: crate::UserAgentPool::initialize

use std::{fmt, sync::Arc};

use crate::{BoxError, UserAgentRecord};

mod file;
pub use file::FileCorpusSource;

#[cfg(feature = "http-source")]
mod http;
#[cfg(feature = "http-source")]
#[cfg_attr(docsrs, doc(cfg(feature = "http-source")))]
pub use http::{DEFAULT_CORPUS_URL, HttpCorpusSource};

/// A source of [`UserAgentRecord`]s, e.g. a remote key-value store record.
pub trait CorpusSource: Send + Sync + 'static {
    /// Fetch the raw (unfiltered) corpus.
    fn fetch_corpus(
        &self,
    ) -> impl Future<Output = Result<Vec<UserAgentRecord>, BoxError>> + Send + '_;

    /// Describe where the corpus comes from, used in logs.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(std::any::type_name::<Self>())
    }
}

impl CorpusSource for Vec<UserAgentRecord> {
    async fn fetch_corpus(&self) -> Result<Vec<UserAgentRecord>, BoxError> {
        Ok(self.clone())
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "in-memory corpus ({} records)", self.len())
    }
}

impl<S> CorpusSource for Arc<S>
where
    S: CorpusSource,
{
    #[inline]
    fn fetch_corpus(
        &self,
    ) -> impl Future<Output = Result<Vec<UserAgentRecord>, BoxError>> + Send + '_ {
        self.as_ref().fetch_corpus()
    }

    #[inline]
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().describe(f)
    }
}

impl<S> CorpusSource for Box<S>
where
    S: CorpusSource,
{
    #[inline]
    fn fetch_corpus(
        &self,
    ) -> impl Future<Output = Result<Vec<UserAgentRecord>, BoxError>> + Send + '_ {
        self.as_ref().fetch_corpus()
    }

    #[inline]
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().describe(f)
    }
}

/// [`fmt::Display`] adapter for [`CorpusSource::describe`].
pub(crate) struct SourceDisplay<'a, S>(pub(crate) &'a S);

impl<S: CorpusSource> fmt::Display for SourceDisplay<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.describe(f)
    }
}
