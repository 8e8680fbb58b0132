use guise_ua::{
    CorpusSource, DEFAULT_BROWSERS, DEFAULT_OPERATING_SYSTEMS, FilterCriteria, Result,
    TokenFilter, UserAgentPool,
};
use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    HeaderField, HeaderSet,
    fragment::{browser_fragment, randomized_fragment, universal_fragment},
};

/// Default minimum number of observations for composer user agents.
pub const DEFAULT_MIN_TIMES_SEEN: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Configuration of a [`HeaderComposer`].
///
/// Every field has a default, so a partial (or empty) config deserializes fine.
/// Unknown (e.g. misspelled) fields are rejected.
pub struct HeaderComposerConfig {
    /// Accepted operating system tokens, e.g. `windows`, `linux`, `mac`.
    pub operating_systems: Vec<String>,
    /// Accepted browser tokens, e.g. `chrome`, `firefox`.
    pub browsers: Vec<String>,
    /// Minimum number of times a user agent must have been observed.
    pub min_times_seen: u64,
    /// Location of the corpus, used by [`HeaderComposer::new`].
    pub corpus_url: String,
}

impl Default for HeaderComposerConfig {
    fn default() -> Self {
        Self {
            operating_systems: DEFAULT_OPERATING_SYSTEMS.map(str::to_owned).to_vec(),
            browsers: DEFAULT_BROWSERS.map(str::to_owned).to_vec(),
            min_times_seen: DEFAULT_MIN_TIMES_SEEN,
            corpus_url: default_corpus_url(),
        }
    }
}

#[cfg(feature = "http-source")]
fn default_corpus_url() -> String {
    guise_ua::source::DEFAULT_CORPUS_URL.to_owned()
}

#[cfg(not(feature = "http-source"))]
fn default_corpus_url() -> String {
    String::new()
}

impl HeaderComposerConfig {
    /// Validate the config into [`FilterCriteria`].
    pub fn criteria(&self) -> Result<FilterCriteria> {
        FilterCriteria::new(
            TokenFilter::new(self.operating_systems.iter().cloned()),
            TokenFilter::new(self.browsers.iter().cloned()),
            self.min_times_seen,
        )
    }
}

/// Produces browser-like request headers, each set paired with
/// a user agent sampled from a [`UserAgentPool`].
///
/// The composer has to be initialized once (see [`HeaderComposer::initialize`])
/// before [`HeaderComposer::generate`] can be used.
pub struct HeaderComposer<S, R = StdRng> {
    pool: UserAgentPool<S, R>,
}

impl<S: std::fmt::Debug, R> std::fmt::Debug for HeaderComposer<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderComposer")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "http-source")]
#[cfg_attr(docsrs, doc(cfg(feature = "http-source")))]
impl HeaderComposer<guise_ua::source::HttpCorpusSource> {
    /// Create a [`HeaderComposer`] fetching its corpus from `config.corpus_url`.
    pub fn new(config: &HeaderComposerConfig) -> Result<Self> {
        let source = guise_ua::source::HttpCorpusSource::new(config.corpus_url.clone());
        Self::with_source(config, source)
    }

    /// Create a [`HeaderComposer`] with the default config.
    pub fn try_default() -> Result<Self> {
        Self::new(&HeaderComposerConfig::default())
    }
}

impl<S> HeaderComposer<S> {
    /// Create a [`HeaderComposer`] fetching its corpus from the given source,
    /// using an rng seeded by the operating system.
    ///
    /// `config.corpus_url` is ignored.
    pub fn with_source(config: &HeaderComposerConfig, source: S) -> Result<Self> {
        Self::with_source_and_rng(config, source, rand::make_rng())
    }
}

impl<S, R> HeaderComposer<S, R> {
    /// Create a [`HeaderComposer`] with the given source and rng.
    ///
    /// All randomness used by [`HeaderComposer::generate`] is drawn from `rng`,
    /// so a seeded rng reproduces the same sequence of header sets.
    pub fn with_source_and_rng(config: &HeaderComposerConfig, source: S, rng: R) -> Result<Self> {
        let criteria = config.criteria()?;
        Ok(Self {
            pool: UserAgentPool::with_rng(criteria, source, rng),
        })
    }

    /// The underlying [`UserAgentPool`].
    pub fn pool(&self) -> &UserAgentPool<S, R> {
        &self.pool
    }

    /// Returns true once [`HeaderComposer::initialize`] has completed successfully.
    pub fn is_initialized(&self) -> bool {
        self.pool.is_initialized()
    }
}

impl<S, R> HeaderComposer<S, R>
where
    S: CorpusSource,
{
    /// Fetch and filter the user-agent corpus.
    pub async fn initialize(&mut self) -> Result<()> {
        self.pool.initialize().await
    }
}

impl<S, R> HeaderComposer<S, R>
where
    R: Rng,
{
    /// Generate a new [`HeaderSet`] for a randomly sampled user agent.
    ///
    /// Fails if the composer was not initialized.
    pub fn generate(&self) -> Result<HeaderSet> {
        self.pool.sample_and_then(|sampled, rng| {
            let family = sampled.browser_family();
            tracing::debug!(
                browser = %family,
                version = %sampled.software_version,
                os = %sampled.operating_system_code,
                "compose headers for sampled user agent",
            );

            let mut builder = HeaderSet::builder();
            builder
                .apply(universal_fragment())
                .set(HeaderField::UserAgent, sampled.user_agent.clone())
                .apply(browser_fragment(family, sampled.software_version))
                .apply(randomized_fragment(rng));
            builder.build()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CANONICAL_ORDER, CHROME_ACCEPT, HeaderFieldValue, REFERERS};
    use guise_ua::{SoftwareVersion, UserAgentRecord};
    use rand::SeedableRng as _;

    fn record(ua: &str, browser: &str, os: &str, version: u32) -> UserAgentRecord {
        UserAgentRecord {
            user_agent: ua.to_owned(),
            software_name_code: browser.to_owned(),
            operating_system_code: os.to_owned(),
            software_version: SoftwareVersion::new(version),
            time_seen: 1000,
        }
    }

    async fn ready(
        corpus: Vec<UserAgentRecord>,
        config: &HeaderComposerConfig,
    ) -> HeaderComposer<Vec<UserAgentRecord>> {
        let mut composer =
            HeaderComposer::with_source_and_rng(config, corpus, StdRng::seed_from_u64(3))
                .unwrap();
        composer.initialize().await.unwrap();
        composer
    }

    fn text(set: &HeaderSet, field: HeaderField) -> Option<&str> {
        set.get(field).and_then(HeaderFieldValue::as_text)
    }

    #[test]
    fn test_generate_before_initialize() {
        let corpus: Vec<UserAgentRecord> = Vec::new();
        let composer =
            HeaderComposer::with_source(&HeaderComposerConfig::default(), corpus).unwrap();
        assert!(!composer.is_initialized());
        assert!(composer.generate().unwrap_err().is_not_initialized());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = HeaderComposerConfig {
            browsers: Vec::new(),
            ..Default::default()
        };
        let corpus: Vec<UserAgentRecord> = Vec::new();
        let err = HeaderComposer::with_source(&config, corpus).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: HeaderComposerConfig =
            serde_json::from_str(r#"{"browsers": ["firefox"], "min_times_seen": 10}"#).unwrap();
        assert_eq!(config.browsers, ["firefox"]);
        assert_eq!(config.min_times_seen, 10);
        assert_eq!(config.operating_systems, ["windows", "linux", "mac"]);
        assert_eq!(config.corpus_url, HeaderComposerConfig::default().corpus_url);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let err = serde_json::from_str::<HeaderComposerConfig>(r#"{"min_time_seen": 10}"#)
            .unwrap_err();
        assert!(err.to_string().contains("min_time_seen"));
    }

    #[tokio::test]
    async fn test_default_rng_composer_generates() {
        let mut composer = HeaderComposer::with_source(
            &HeaderComposerConfig::default(),
            vec![record("chrome-ua", "chrome", "windows", 88)],
        )
        .unwrap();
        composer.initialize().await.unwrap();

        for _ in 0..10 {
            assert_eq!(composer.generate().unwrap().user_agent(), Some("chrome-ua"));
        }
        assert_eq!(composer.pool().used_count(), 1);
    }

    #[tokio::test]
    async fn test_seeded_composer_follows_pool_stream() {
        let corpus = vec![
            record("a", "chrome", "windows", 88),
            record("b", "chrome", "mac", 89),
            record("c", "firefox", "linux", 65),
        ];
        let composer = ready(corpus.clone(), &HeaderComposerConfig::default()).await;
        let mut pool = UserAgentPool::with_rng(
            HeaderComposerConfig::default().criteria().unwrap(),
            corpus,
            StdRng::seed_from_u64(3),
        );
        pool.initialize().await.unwrap();

        for _ in 0..25 {
            let expected = pool
                .sample_and_then(|sampled, rng| {
                    let referer = randomized_fragment(rng)
                        .get(HeaderField::Referer)
                        .and_then(HeaderFieldValue::as_text)
                        .map(str::to_owned);
                    (sampled.user_agent.clone(), referer)
                })
                .unwrap();
            let set = composer.generate().unwrap();
            assert_eq!(set.user_agent(), Some(expected.0.as_str()));
            assert_eq!(
                text(&set, HeaderField::Referer).map(str::to_owned),
                expected.1
            );
        }
    }

    #[tokio::test]
    async fn test_fractional_firefox_version_gets_plain_accept() {
        let firefox: UserAgentRecord = serde_json::from_str(
            r#"{"userAgent":"firefox-ua","softwareNameCode":"firefox","operatingSystemCode":"linux","softwareVersion":65.5,"timeSeen":1000}"#,
        )
        .unwrap();
        assert_eq!(firefox.software_version.major(), 65);
        let composer = ready(vec![firefox], &HeaderComposerConfig::default()).await;

        let set = composer.generate().unwrap();
        let accept = text(&set, HeaderField::Accept).unwrap();
        assert!(!accept.contains("image/webp"));
    }

    #[tokio::test]
    async fn test_chrome_headers() {
        let composer = ready(
            vec![record("chrome-ua", "chrome", "windows", 88)],
            &HeaderComposerConfig::default(),
        )
        .await;

        let set = composer.generate().unwrap();
        assert_eq!(set.user_agent(), Some("chrome-ua"));
        assert_eq!(text(&set, HeaderField::Accept), Some(CHROME_ACCEPT));
        assert_eq!(text(&set, HeaderField::SecFetchDest), Some("document"));
        assert_eq!(text(&set, HeaderField::SecFetchMode), Some("navigate"));
        assert_eq!(text(&set, HeaderField::SecFetchSite), Some("none"));
        assert_eq!(text(&set, HeaderField::SecFetchUser), Some("?1"));
        assert_eq!(
            set.get(HeaderField::SecGpc),
            Some(&HeaderFieldValue::Number(1))
        );
        assert_eq!(text(&set, HeaderField::AcceptEncoding), Some("gzip, deflate, br"));
        assert_eq!(
            text(&set, HeaderField::AcceptLanguage),
            Some("en-US;q=0.5,en;q=0.3")
        );
        assert!(REFERERS.contains(&text(&set, HeaderField::Referer).unwrap()));
    }

    #[tokio::test]
    async fn test_firefox_headers_by_version() {
        for (version, webp) in [(64, false), (65, true), (66, false)] {
            let composer = ready(
                vec![record("firefox-ua", "firefox", "linux", version)],
                &HeaderComposerConfig::default(),
            )
            .await;

            let set = composer.generate().unwrap();
            let accept = text(&set, HeaderField::Accept).unwrap();
            assert_eq!(accept.contains("image/webp"), webp, "firefox {version}");
            assert!(set.get(HeaderField::SecFetchDest).is_none());
            assert!(set.get(HeaderField::SecGpc).is_none());
        }
    }

    #[tokio::test]
    async fn test_unrecognized_family_leaves_browser_fields_unset() {
        let config = HeaderComposerConfig {
            browsers: vec!["edge".to_owned()],
            ..Default::default()
        };
        let composer = ready(vec![record("edge-ua", "edge", "windows", 90)], &config).await;

        let set = composer.generate().unwrap();
        assert_eq!(set.user_agent(), Some("edge-ua"));
        assert!(set.get(HeaderField::Accept).is_none());
        for field in [
            HeaderField::SecFetchDest,
            HeaderField::SecFetchMode,
            HeaderField::SecFetchSite,
            HeaderField::SecFetchUser,
            HeaderField::SecGpc,
        ] {
            assert!(set.get(field).is_none(), "{field} should be unset");
        }
        assert!(set.get(HeaderField::Referer).is_some());
    }

    #[tokio::test]
    async fn test_canonical_order_for_every_family() {
        let config = HeaderComposerConfig {
            browsers: vec!["chrome".to_owned(), "firefox".to_owned(), "safari".to_owned()],
            ..Default::default()
        };
        let composer = ready(
            vec![
                record("chrome-ua", "chrome", "windows", 88),
                record("firefox-ua", "firefox", "linux", 70),
                record("safari-ua", "safari", "mac", 14),
            ],
            &config,
        )
        .await;

        for _ in 0..100 {
            let set = composer.generate().unwrap();
            let fields: Vec<_> = set.iter().map(|(field, _)| field).collect();
            assert_eq!(fields, CANONICAL_ORDER);
        }
    }

    #[tokio::test]
    async fn test_seeded_composers_agree() {
        let corpus = vec![
            record("a", "chrome", "windows", 88),
            record("b", "chrome", "mac", 89),
            record("c", "firefox", "linux", 65),
        ];
        let a = ready(corpus.clone(), &HeaderComposerConfig::default()).await;
        let b = ready(corpus, &HeaderComposerConfig::default()).await;

        for _ in 0..25 {
            assert_eq!(a.generate().unwrap(), b.generate().unwrap());
        }
    }
}
