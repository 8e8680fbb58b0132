use http::{HeaderMap, HeaderValue, header::InvalidHeaderValue};
use serde::{Serialize, Serializer, ser::SerializeMap as _};

use crate::{CANONICAL_ORDER, HeaderField, HeaderFieldValue, HeaderFragment};

#[derive(Debug, Clone, PartialEq, Eq)]
/// The headers of one synthesized request, in canonical order.
///
/// All canonical fields are always present; a field nothing assigned a value to
/// (e.g. the `Sec-Fetch-*` fields for an unrecognized browser) holds `None`.
pub struct HeaderSet {
    values: [Option<HeaderFieldValue>; CANONICAL_ORDER.len()],
}

impl HeaderSet {
    /// Create a [`HeaderSetBuilder`].
    #[must_use]
    pub fn builder() -> HeaderSetBuilder {
        HeaderSetBuilder::default()
    }

    /// Get the value of a field, `None` if unset or not a canonical field.
    #[must_use]
    pub fn get(&self, field: HeaderField) -> Option<&HeaderFieldValue> {
        field
            .canonical_index()
            .and_then(|index| self.values.get(index))
            .and_then(Option::as_ref)
    }

    /// The `User-Agent` value, if set.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.get(HeaderField::UserAgent)
            .and_then(HeaderFieldValue::as_text)
    }

    /// Iterate over all canonical fields in canonical order, including unset ones.
    pub fn iter(&self) -> impl Iterator<Item = (HeaderField, Option<&HeaderFieldValue>)> {
        CANONICAL_ORDER
            .iter()
            .zip(self.values.iter())
            .map(|(field, value)| (*field, value.as_ref()))
    }

    /// Iterate over the fields that hold a value, in canonical order.
    pub fn iter_set(&self) -> impl Iterator<Item = (HeaderField, &HeaderFieldValue)> {
        self.iter()
            .filter_map(|(field, value)| value.map(|value| (field, value)))
    }

    /// Number of fields, set or not. Always the length of [`CANONICAL_ORDER`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a [`HeaderSet`] holds every canonical field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Convert into an [`http::HeaderMap`], in canonical order, omitting unset fields.
    ///
    /// Fails if a value (typically the user agent) contains bytes
    /// not allowed in a header value.
    pub fn into_header_map(self) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut map = HeaderMap::with_capacity(self.values.len());
        for (field, value) in CANONICAL_ORDER.into_iter().zip(self.values) {
            let Some(value) = value else {
                continue;
            };
            let value = match value {
                HeaderFieldValue::Text(text) => HeaderValue::from_str(&text)?,
                HeaderFieldValue::Number(n) => HeaderValue::from(u16::from(n)),
            };
            map.append(field.header_name(), value);
        }
        Ok(map)
    }
}

impl Serialize for HeaderSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), &value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default)]
/// Assembles a [`HeaderSet`] directly in canonical order.
///
/// Later assignments override earlier ones. Fields outside the
/// canonical order (`DNT`, `TE`) are accepted but not emitted.
pub struct HeaderSetBuilder {
    values: [Option<HeaderFieldValue>; CANONICAL_ORDER.len()],
}

impl HeaderSetBuilder {
    /// Assign a value to a field.
    pub fn set(&mut self, field: HeaderField, value: impl Into<HeaderFieldValue>) -> &mut Self {
        match field.canonical_index() {
            Some(index) => self.values[index] = Some(value.into()),
            None => {
                tracing::trace!(%field, "header outside canonical order is not emitted");
            }
        }
        self
    }

    /// Assign a value to a field.
    #[must_use]
    pub fn with(mut self, field: HeaderField, value: impl Into<HeaderFieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Assign all fields of the fragment, overriding earlier values.
    pub fn apply(&mut self, fragment: HeaderFragment) -> &mut Self {
        for (field, value) in fragment {
            self.set(field, value);
        }
        self
    }

    /// Build the [`HeaderSet`].
    #[must_use]
    pub fn build(self) -> HeaderSet {
        HeaderSet {
            values: self.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome_like() -> HeaderSet {
        let mut builder = HeaderSet::builder();
        builder
            .apply(
                HeaderFragment::new()
                    .with(HeaderField::Pragma, "no-cache")
                    .with(HeaderField::UpgradeInsecureRequests, 1u8),
            )
            .set(HeaderField::UserAgent, "Mozilla/5.0 test")
            .apply(HeaderFragment::new().with(HeaderField::SecFetchDest, "document"))
            .set(HeaderField::Dnt, 1u8);
        builder.build()
    }

    #[test]
    fn test_all_fields_in_canonical_order() {
        let set = chrome_like();
        assert_eq!(set.len(), 13);
        let fields: Vec<_> = set.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, CANONICAL_ORDER);
        assert_eq!(set.user_agent(), Some("Mozilla/5.0 test"));
        assert!(set.get(HeaderField::Accept).is_none());
        assert!(set.get(HeaderField::Dnt).is_none());
    }

    #[test]
    fn test_later_assignment_overrides() {
        let set = HeaderSet::builder()
            .with(HeaderField::Pragma, "no-cache")
            .with(HeaderField::Pragma, "no-store")
            .build();
        assert_eq!(
            set.get(HeaderField::Pragma),
            Some(&HeaderFieldValue::from("no-store"))
        );
    }

    #[test]
    fn test_iter_set_skips_unset() {
        let set = chrome_like();
        let fields: Vec<_> = set.iter_set().map(|(field, _)| field).collect();
        assert_eq!(
            fields,
            [
                HeaderField::UserAgent,
                HeaderField::UpgradeInsecureRequests,
                HeaderField::Pragma,
                HeaderField::SecFetchDest,
            ]
        );
    }

    #[test]
    fn test_into_header_map() {
        let map = chrome_like().into_header_map().unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map["user-agent"], "Mozilla/5.0 test");
        assert_eq!(map["upgrade-insecure-requests"], "1");
        assert!(!map.contains_key("accept"));
        assert!(!map.contains_key("dnt"));

        let names: Vec<_> = map.keys().map(|name| name.as_str()).collect();
        assert_eq!(
            names,
            ["user-agent", "upgrade-insecure-requests", "pragma", "sec-fetch-dest"]
        );
    }

    #[test]
    fn test_into_header_map_invalid_value() {
        let set = HeaderSet::builder()
            .with(HeaderField::UserAgent, "broken\nagent".to_owned())
            .build();
        assert!(set.into_header_map().is_err());
    }

    #[test]
    fn test_serialize_as_ordered_object() {
        let json = serde_json::to_string(&chrome_like()).unwrap();
        assert!(json.starts_with(r#"{"User-Agent":"Mozilla/5.0 test","Accept":null,"#));
        assert!(json.contains(r#""Upgrade-Insecure-Requests":1,"#));
        assert!(json.ends_with(r#""Sec-Gpc":null}"#));
    }
}
