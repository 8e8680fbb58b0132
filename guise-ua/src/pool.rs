use parking_lot::Mutex;
use rand::{Rng, rngs::StdRng, seq::IndexedRandom as _};
use std::{collections::HashSet, ops::Deref, sync::Arc};

use crate::{
    CorpusSource, Error, FilterCriteria, UserAgentRecord, error::Result, source::SourceDisplay,
};

/// A pool of [`UserAgentRecord`]s matching a set of [`FilterCriteria`],
/// sampled uniformly at random (with replacement).
///
/// The pool starts out uninitialized. [`UserAgentPool::initialize`] fetches the
/// corpus from the [`CorpusSource`] and keeps the matching subset, in corpus order.
/// Sampling before that fails with a not-initialized error.
///
/// Every sampled user agent is remembered. Sampling one again is not an error,
/// but it is logged and reported via [`SampledUserAgent::is_repeat`].
///
/// Sampling only needs a shared reference, so a ready pool can be shared
/// across tasks behind an [`Arc`].
pub struct UserAgentPool<S, R = StdRng> {
    criteria: FilterCriteria,
    source: S,
    corpus: Option<Vec<Arc<UserAgentRecord>>>,
    used: Mutex<HashSet<String>>,
    rng: Mutex<R>,
}

impl<S: std::fmt::Debug, R> std::fmt::Debug for UserAgentPool<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAgentPool")
            .field("criteria", &self.criteria)
            .field("source", &self.source)
            .field("corpus", &self.corpus)
            .field("used", &self.used.lock().len())
            .finish_non_exhaustive()
    }
}

impl<S> UserAgentPool<S> {
    /// Create a new uninitialized [`UserAgentPool`],
    /// sampling with a [`StdRng`] seeded by the operating system.
    pub fn new(criteria: FilterCriteria, source: S) -> Self {
        Self::with_rng(criteria, source, rand::make_rng())
    }
}

impl<S, R> UserAgentPool<S, R> {
    /// Create a new uninitialized [`UserAgentPool`] sampling with the given rng.
    ///
    /// Use a seeded rng to get a reproducible sequence of samples.
    pub fn with_rng(criteria: FilterCriteria, source: S, rng: R) -> Self {
        Self {
            criteria,
            source,
            corpus: None,
            used: Mutex::new(HashSet::new()),
            rng: Mutex::new(rng),
        }
    }

    /// The criteria records are filtered with.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The source the corpus is fetched from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns true once [`UserAgentPool::initialize`] has completed successfully.
    pub fn is_initialized(&self) -> bool {
        self.corpus.is_some()
    }

    /// Number of records in the filtered corpus (zero while uninitialized).
    pub fn len(&self) -> usize {
        self.corpus.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if there are no records to sample from.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the filtered corpus, in corpus order.
    pub fn records(&self) -> impl Iterator<Item = &UserAgentRecord> {
        self.corpus.iter().flatten().map(|record| record.as_ref())
    }

    /// Number of distinct user agents sampled so far.
    pub fn used_count(&self) -> usize {
        self.used.lock().len()
    }

    /// Returns true if the given user agent was sampled before.
    pub fn has_been_sampled(&self, user_agent: &str) -> bool {
        self.used.lock().contains(user_agent)
    }
}

impl<S, R> UserAgentPool<S, R>
where
    S: CorpusSource,
{
    /// Fetch the corpus and keep the records matching the criteria.
    ///
    /// Calling this again fetches and filters anew, replacing the previous corpus.
    /// On failure the pool keeps whatever state it had before the call.
    ///
    /// Fails if the source fails, or if no record matches the criteria.
    pub async fn initialize(&mut self) -> Result<()> {
        tracing::info!(
            source = %SourceDisplay(&self.source),
            "fetching user agent corpus",
        );

        let raw = self
            .source
            .fetch_corpus()
            .await
            .map_err(Error::source_fetch)?;
        let total = raw.len();

        let corpus: Vec<_> = raw
            .into_iter()
            .filter(|record| self.criteria.is_match(record))
            .map(Arc::new)
            .collect();

        tracing::info!(
            total,
            kept = corpus.len(),
            min_times_seen = self.criteria.min_times_seen(),
            "filtered user agent corpus",
        );

        if corpus.is_empty() {
            return Err(Error::empty_pool());
        }

        self.corpus = Some(corpus);
        Ok(())
    }
}

impl<S, R> UserAgentPool<S, R>
where
    R: Rng,
{
    /// Sample a record uniformly at random, using the pool's own rng.
    pub fn sample(&self) -> Result<SampledUserAgent> {
        self.sample_and_then(|sampled, _| sampled)
    }

    /// Sample a record using the pool's own rng, then pass it to `f`
    /// together with that rng, still locked.
    ///
    /// Any further random choice made by `f` continues the pool's random
    /// stream, so a seeded pool reproduces both the samples and those choices.
    pub fn sample_and_then<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(SampledUserAgent, &mut R) -> T,
    {
        let mut rng = self.rng.lock();
        let sampled = self.sample_with(&mut *rng)?;
        Ok(f(sampled, &mut *rng))
    }
}

impl<S, R> UserAgentPool<S, R> {
    /// Sample a record uniformly at random, using the given rng.
    pub fn sample_with<G>(&self, rng: &mut G) -> Result<SampledUserAgent>
    where
        G: Rng + ?Sized,
    {
        let corpus = self.corpus.as_ref().ok_or_else(Error::not_initialized)?;
        let record = corpus.choose(rng).ok_or_else(Error::empty_pool)?.clone();

        let repeat = !self.used.lock().insert(record.user_agent.clone());
        if repeat {
            tracing::warn!(
                user_agent = %record.user_agent,
                "user agent already picked before",
            );
        }

        Ok(SampledUserAgent { record, repeat })
    }
}

#[derive(Debug, Clone)]
/// A [`UserAgentRecord`] sampled from a [`UserAgentPool`].
pub struct SampledUserAgent {
    record: Arc<UserAgentRecord>,
    repeat: bool,
}

impl SampledUserAgent {
    /// Returns true if the same user agent was sampled from the pool before.
    #[must_use]
    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    /// The sampled record.
    #[must_use]
    pub fn record(&self) -> &UserAgentRecord {
        &self.record
    }

    /// Consume the sample, returning the shared record.
    #[must_use]
    pub fn into_record(self) -> Arc<UserAgentRecord> {
        self.record
    }
}

impl Deref for SampledUserAgent {
    type Target = UserAgentRecord;

    fn deref(&self) -> &Self::Target {
        &self.record
    }
}
