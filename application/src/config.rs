//! [`Config`]-related definitions.

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error};
use http::header::{HeaderValue, InvalidHeaderValue};
use serde::Deserialize;
use service::{
    command,
    domain::{category, city},
};
use smart_default::SmartDefault;
use tower_http::cors::AllowOrigin;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Taxonomy to seed the catalog with on startup.
    pub taxonomy: Taxonomy,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    ///
    /// `*` allows any origin.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

impl Cors {
    /// Parses the configured [`Cors::origins`] into [`AllowedOrigins`].
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidOrigin`] error if any of the origins is not a
    /// valid header value.
    pub fn allowed_origins(&self) -> Result<AllowedOrigins, InvalidOrigin> {
        if self.origins.iter().any(|o| o == "*") {
            return Ok(AllowedOrigins::Any);
        }
        self.origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|source| InvalidOrigin {
                    origin: origin.clone(),
                    source,
                })
            })
            .collect::<Result<_, _>>()
            .map(AllowedOrigins::List)
    }
}

/// Origins allowed to make cross-origin requests.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AllowedOrigins {
    /// Any origin is allowed.
    Any,

    /// Only the listed origins are allowed.
    List(Vec<HeaderValue>),
}

impl From<AllowedOrigins> for AllowOrigin {
    fn from(origins: AllowedOrigins) -> Self {
        match origins {
            AllowedOrigins::Any => Self::any(),
            AllowedOrigins::List(list) => Self::list(list),
        }
    }
}

/// Error of an origin not being a valid header value.
#[derive(Debug, Display, Error)]
#[display("`{origin}` is not a valid CORS origin: {source}")]
pub struct InvalidOrigin {
    /// The rejected origin.
    pub origin: String,

    /// Reason of the rejection.
    pub source: InvalidHeaderValue,
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// [JWT] secret shared with the authentication service.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    #[default("secret".to_owned())]
    pub jwt_secret: String,

    /// Maximum number of adverts to be listed at once.
    #[default(100)]
    pub max_page_size: usize,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            jwt_secret,
            max_page_size,
        } = value;
        Self {
            jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                jwt_secret.as_bytes(),
            ),
            max_page_size,
        }
    }
}

/// Taxonomy configuration.
///
/// Entries are created in the listed order, so the earlier one wins when
/// several share a name or a translation.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    /// Cities to seed.
    pub cities: Vec<Entry>,

    /// Categories to seed.
    pub categories: Vec<Entry>,
}

/// Single taxonomy entry.
#[derive(Clone, Debug, Deserialize)]
pub struct Entry {
    /// Canonical name.
    pub name: String,

    /// Transliterated name, used in listing URLs.
    pub translation: String,
}

impl Entry {
    /// Converts this [`Entry`] into a [`command::CreateCity`].
    ///
    /// [`None`] is returned if the [`Entry`] is not a valid city.
    #[must_use]
    pub fn to_city(&self) -> Option<command::CreateCity> {
        Some(command::CreateCity {
            name: city::Name::new(self.name.clone())?,
            translation: city::Translation::new(self.translation.clone())?,
        })
    }

    /// Converts this [`Entry`] into a [`command::CreateCategory`].
    ///
    /// [`None`] is returned if the [`Entry`] is not a valid category.
    #[must_use]
    pub fn to_category(&self) -> Option<command::CreateCategory> {
        Some(command::CreateCategory {
            name: category::Name::new(self.name.clone())?,
            translation: category::Translation::new(
                self.translation.clone(),
            )?,
        })
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use http::header::HeaderValue;

    use super::{AllowedOrigins, Config, Cors, Entry};

    #[test]
    fn defaults_without_file() {
        let config = Config::new("definitely-missing.toml").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.service.max_page_size, 100);
        assert!(config.taxonomy.cities.is_empty());
    }

    #[test]
    fn rejects_invalid_entries() {
        let valid = Entry {
            name: "Moscow".to_owned(),
            translation: "Moskva".to_owned(),
        };
        let invalid = Entry {
            name: "Moscow".to_owned(),
            translation: "Mos kva".to_owned(),
        };

        assert!(valid.to_city().is_some());
        assert!(valid.to_category().is_some());
        assert!(invalid.to_city().is_none());
    }

    #[test]
    fn allows_every_listed_origin() {
        let cors = Cors {
            origins: vec![
                "https://a.example".to_owned(),
                "https://b.example".to_owned(),
            ],
        };

        assert_eq!(
            cors.allowed_origins().unwrap(),
            AllowedOrigins::List(vec![
                HeaderValue::from_static("https://a.example"),
                HeaderValue::from_static("https://b.example"),
            ]),
        );
    }

    #[test]
    fn wildcard_allows_any_origin() {
        let cors = Cors {
            origins: vec!["https://a.example".to_owned(), "*".to_owned()],
        };

        assert_eq!(cors.allowed_origins().unwrap(), AllowedOrigins::Any);
        assert_eq!(
            Cors::default().allowed_origins().unwrap(),
            AllowedOrigins::Any,
        );
    }

    #[test]
    fn rejects_malformed_origin() {
        let cors = Cors {
            origins: vec!["https://a.example\n".to_owned()],
        };

        let err = cors.allowed_origins().unwrap_err();
        assert_eq!(err.origin, "https://a.example\n");
    }
}
