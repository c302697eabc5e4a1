use reqwest::header::HeaderMap;
use schemars::JsonSchema;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use super::logging::Logging;

/// Configuration for the GraphQL tester
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// The GraphQL endpoint operations are sent to
    pub endpoint: Option<Url>,

    /// Bearer token sent in the `Authorization` header
    #[schemars(with = "Option<String>")]
    pub token: Option<SecretString>,

    /// Extra headers to include in every GraphQL request
    #[serde(deserialize_with = "parsers::map_from_str")]
    #[schemars(schema_with = "super::schemas::header_map")]
    pub headers: HeaderMap,

    /// Logging configuration
    pub logging: Logging,
}

mod parsers {
    use std::str::FromStr;

    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use serde::Deserializer;

    pub(super) fn map_from_str<'de, D>(deserializer: D) -> Result<HeaderMap, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapFromStrVisitor;
        impl<'de> serde::de::Visitor<'de> for MapFromStrVisitor {
            type Value = HeaderMap;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of header string keys and values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut parsed = HeaderMap::with_capacity(map.size_hint().unwrap_or(0));

                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    let key = HeaderName::from_str(&key)
                        .map_err(|e| serde::de::Error::custom(e.to_string()))?;
                    let value = HeaderValue::from_str(&value)
                        .map_err(|e| serde::de::Error::custom(e.to_string()))?;

                    parsed.insert(key, value);
                }

                Ok(parsed)
            }
        }

        deserializer.deserialize_map(MapFromStrVisitor)
    }
}

#[cfg(test)]
mod test {
    use secrecy::ExposeSecret;

    use super::Config;

    #[test]
    fn it_parses_a_minimal_config() {
        let config = serde_json::from_str::<Config>("{}").unwrap();

        assert!(config.endpoint.is_none());
        assert!(config.token.is_none());
        assert!(config.headers.is_empty());
    }

    #[test]
    fn it_parses_a_full_config() {
        let config = serde_json::from_str::<Config>(
            r#"{
                "endpoint": "https://example.com/graphql",
                "token": "abc",
                "headers": { "x-client": "tester" },
                "logging": { "level": "info" }
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.endpoint.map(String::from).as_deref(),
            Some("https://example.com/graphql")
        );
        assert_eq!(
            config.token.as_ref().map(|token| token.expose_secret()),
            Some("abc")
        );
        assert_eq!(config.headers.get("x-client").unwrap(), "tester");
        assert_eq!(config.logging.level, tracing::Level::INFO);
    }

    #[test]
    fn it_rejects_invalid_headers() {
        let result = serde_json::from_str::<Config>(r#"{ "headers": { "bad header": "x" } }"#);

        assert!(result.is_err());
    }

    #[test]
    fn it_does_not_leak_the_token() {
        let config = serde_json::from_str::<Config>(r#"{ "token": "super-secret" }"#).unwrap();

        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[test]
    fn it_contains_no_keys_with_double_underscore() {
        // Environment overrides split nested keys on `__`, so no field name
        // may contain it. See [runtime::read_config]
        let schema = schemars::schema_for!(Config).to_value().to_string();

        assert!(!schema.contains("__"))
    }
}
