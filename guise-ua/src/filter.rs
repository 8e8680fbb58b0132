use serde::{Deserialize, Serialize};

use crate::{Error, UserAgentRecord, error::Result};

/// Default operating system tokens.
pub const DEFAULT_OPERATING_SYSTEMS: [&str; 3] = ["windows", "linux", "mac"];

/// Default browser tokens.
pub const DEFAULT_BROWSERS: [&str; 2] = ["chrome", "firefox"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
/// A list of accepted tokens, matched by case-sensitive substring containment.
///
/// An empty [`TokenFilter`] matches nothing.
pub struct TokenFilter(Vec<String>);

impl TokenFilter {
    /// Create a new [`TokenFilter`] from the given tokens.
    pub fn new<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    /// Returns true if `candidate` contains at least one of the tokens.
    #[must_use]
    pub fn is_match(&self, candidate: &str) -> bool {
        if self.0.is_empty() {
            return false;
        }
        self.0.iter().any(|token| candidate.contains(token.as_str()))
    }

    /// Iterate over the tokens of this filter.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no tokens, in which case nothing matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Into<String>> FromIterator<T> for TokenFilter {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The criteria a [`UserAgentRecord`] has to satisfy to be part of a pool.
///
/// Only constructed through [`FilterCriteria::new`] (or [`Default`]),
/// which rejects empty token sets and empty tokens.
pub struct FilterCriteria {
    operating_systems: TokenFilter,
    browsers: TokenFilter,
    min_times_seen: u64,
}

impl FilterCriteria {
    /// Create validated [`FilterCriteria`].
    ///
    /// Fails with a configuration error if either token set is empty
    /// (it would match nothing) or contains an empty token (it would match everything).
    pub fn new(
        operating_systems: TokenFilter,
        browsers: TokenFilter,
        min_times_seen: u64,
    ) -> Result<Self> {
        validate_tokens("operating systems", &operating_systems)?;
        validate_tokens("browsers", &browsers)?;
        Ok(Self {
            operating_systems,
            browsers,
            min_times_seen,
        })
    }

    /// Accepted operating system tokens.
    #[must_use]
    pub fn operating_systems(&self) -> &TokenFilter {
        &self.operating_systems
    }

    /// Accepted browser tokens.
    #[must_use]
    pub fn browsers(&self) -> &TokenFilter {
        &self.browsers
    }

    /// Minimum number of observations a record needs.
    #[must_use]
    pub fn min_times_seen(&self) -> u64 {
        self.min_times_seen
    }

    /// Returns true if the record satisfies all criteria.
    #[must_use]
    pub fn is_match(&self, record: &UserAgentRecord) -> bool {
        self.operating_systems
            .is_match(&record.operating_system_code)
            && self.browsers.is_match(&record.software_name_code)
            && record.time_seen >= self.min_times_seen
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            operating_systems: TokenFilter::new(DEFAULT_OPERATING_SYSTEMS),
            browsers: TokenFilter::new(DEFAULT_BROWSERS),
            min_times_seen: 0,
        }
    }
}

fn validate_tokens(name: &str, filter: &TokenFilter) -> Result<()> {
    if filter.is_empty() {
        return Err(Error::configuration(format!(
            "no {name} accepted: an empty filter matches nothing"
        )));
    }
    if filter.iter().any(str::is_empty) {
        return Err(Error::configuration(format!(
            "empty token in accepted {name}"
        )));
    }
    Ok(())
}
