use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
/// A single user-agent observation as found in the corpus.
///
/// Records are never mutated once fetched; the pool hands out shared
/// references to them.
pub struct UserAgentRecord {
    /// The `User-Agent` (header) value.
    pub user_agent: String,
    /// Code identifying the browser family (e.g. `chrome`, `firefox`).
    pub software_name_code: String,
    /// Code identifying the operating system (e.g. `windows`, `linux`).
    pub operating_system_code: String,
    /// Version of the browser.
    #[serde(default)]
    pub software_version: SoftwareVersion,
    /// How often this user agent was observed.
    #[serde(default)]
    pub time_seen: u64,
}

impl UserAgentRecord {
    /// Returns the [`BrowserFamily`] of this record.
    #[must_use]
    pub fn browser_family(&self) -> BrowserFamily {
        BrowserFamily::from_software_name_code(&self.software_name_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Coarse browser classification, driving which browser-specific
/// headers are derived for a [`UserAgentRecord`].
pub enum BrowserFamily {
    /// Chromium-based browsers (including Google Chrome).
    Chrome,
    /// Firefox.
    Firefox,
    /// Anything else. No browser-specific headers apply.
    Unrecognized,
}

impl BrowserFamily {
    /// Classify a software name code, e.g. `chrome` or `firefox-esr`.
    ///
    /// Containment is tested case-sensitively, `chrome` before `firefox`.
    #[must_use]
    pub fn from_software_name_code(code: &str) -> Self {
        if code.contains("chrome") {
            Self::Chrome
        } else if code.contains("firefox") {
            Self::Firefox
        } else {
            Self::Unrecognized
        }
    }

    /// Returns the name of this family.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for BrowserFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
/// Browser version of a [`UserAgentRecord`].
///
/// The corpus carries versions as integers, floats or strings.
/// Only an integral number is an exact version: `65` and `65.0` are exactly
/// version 65, while `65.5` and `"65.1"` merely have 65 as major version.
/// A missing or unparseable version is major version 0 and never exact.
pub struct SoftwareVersion {
    major: u32,
    exact: bool,
}

impl SoftwareVersion {
    /// Create an exact [`SoftwareVersion`].
    #[must_use]
    pub const fn new(major: u32) -> Self {
        Self { major, exact: true }
    }

    /// Create a [`SoftwareVersion`] known only by its major version.
    #[must_use]
    pub const fn inexact(major: u32) -> Self {
        Self {
            major,
            exact: false,
        }
    }

    /// The major (leading integer) version.
    #[must_use]
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Returns true if this version is exactly the given integral version.
    #[must_use]
    pub fn is_exactly(&self, version: u32) -> bool {
        self.exact && self.major == version
    }
}

impl From<u32> for SoftwareVersion {
    fn from(major: u32) -> Self {
        Self::new(major)
    }
}

impl PartialEq<u32> for SoftwareVersion {
    fn eq(&self, other: &u32) -> bool {
        self.is_exactly(*other)
    }
}

impl fmt::Display for SoftwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exact {
            write!(f, "{}", self.major)
        } else {
            write!(f, "~{}", self.major)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Int(u64),
    Float(f64),
    Text(String),
    Null,
}

impl<'de> Deserialize<'de> for SoftwareVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawVersion::deserialize(deserializer)? {
            RawVersion::Int(n) => match u32::try_from(n) {
                Ok(major) => Self::new(major),
                Err(_) => Self::inexact(u32::MAX),
            },
            RawVersion::Float(f) if f.is_finite() && f >= 0.0 => {
                let truncated = f.trunc();
                if truncated >= f64::from(u32::MAX) {
                    Self::inexact(u32::MAX)
                } else if truncated == f {
                    Self::new(truncated as u32)
                } else {
                    Self::inexact(truncated as u32)
                }
            }
            // strings never compare equal to a number
            RawVersion::Text(s) => {
                let digits = s.trim();
                let end = digits
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(digits.len());
                Self::inexact(digits[..end].parse().unwrap_or(0))
            }
            RawVersion::Float(_) | RawVersion::Null => Self::default(),
        })
    }
}

impl Serialize for SoftwareVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.exact {
            serializer.serialize_u32(self.major)
        } else {
            serializer.collect_str(&self.major)
        }
    }
}
