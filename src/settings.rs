use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use dotenv::dotenv;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::{env, fmt, str::FromStr};
use zeroize::Zeroizing;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

/// Which record store backs the repositories.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Postgres,
    Memory,
}

/// Vocabularies offered by the listing filters. Values are not enforced
/// by the query engine; an unknown value just matches nothing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub fields_of_study: Vec<String>,
    pub degree_levels: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        let owned = |values: &[&str]| values.iter().map(|v| v.to_string()).collect();

        FilterOptions {
            countries: owned(&["UNITED KINGDOM", "IRELAND", "GERMANY", "AUSTRALIA", "USA", "CANADA"]),
            fields_of_study: owned(&[
                "ARTS",
                "BUSINESS, MANAGEMENT AND ECONOMICS",
                "ENGINEERING AND TECHNOLOGY",
                "HEALTH SCIENCES, MEDICINE, NURSING, PARAMEDIC AND KINESIOLOGY",
                "LAW, POLITICS, SOCIAL, and SCIENCES",
            ]),
            degree_levels: owned(&[
                "4-YEAR BACHELOR'S DEGREE",
                "TOP-UP DEGREE",
                "2-YEAR UNDERGRADUATE DIPLOMA",
                "INTEGRATED MASTERS",
                "MASTER'S DEGREE",
                "DOCTORAL/PHD",
                "POSTGRADUATE DIPLOMA",
                "POSTGRADUATE CERTIFICATE",
            ]),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_store")]
    pub store: StoreKind,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_minutes: i64,

    #[serde(default)]
    pub refresh_token_secret: String,

    #[serde(default = "default_refresh_expiration")]
    pub refresh_token_exp_days: i64,

    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    #[serde(default)]
    pub admin_password: String,

    #[serde(default)]
    pub seed_sample_data: bool,

    #[serde(default = "default_contact_rate_limit")]
    pub contact_rate_limit_per_hour: u32,

    #[serde(default)]
    pub trust_x_forwarded_for: bool,

    #[serde(default)]
    pub filter_options: FilterOptions,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portal-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_store() -> StoreKind {
    StoreKind::Postgres
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_jwt_expiration() -> i64 {
    60
}
fn default_refresh_expiration() -> i64 {
    7
}
fn default_admin_email() -> String {
    "admin@portal.com".to_string()
}
fn default_contact_rate_limit() -> u32 {
    5
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        // APP_DATABASE_URL -> database_url, APP_FILTER_OPTIONS__COUNTRIES -> filter_options.countries
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.store == StoreKind::Postgres && self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if self.jwt_secret.len() < 32 {
            errors.push("JWT_SECRET must be at least 32 characters");
        }
        if self.refresh_token_secret.len() < 32 {
            errors.push("REFRESH_TOKEN_SECRET must be at least 32 characters");
        }
        if self.admin_email.trim().is_empty() {
            errors.push("ADMIN_EMAIL cannot be empty");
        }
        if self.contact_rate_limit_per_hour == 0 {
            errors.push("CONTACT_RATE_LIMIT_PER_HOUR must be greater than zero");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }
        if self.is_production() && self.store == StoreKind::Memory {
            errors.push("The memory store is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else if self.len() < 32 {
            "[TOO_SHORT]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("store", &self.store)
            .field("database_url", &self.database_url.redact())
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("jwt_secret", &self.jwt_secret.redact())
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .field("refresh_token_secret", &self.refresh_token_secret.redact())
            .field("refresh_token_exp_days", &self.refresh_token_exp_days)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &if self.admin_password.is_empty() { "[MISSING]" } else { "[REDACTED]" })
            .field("seed_sample_data", &self.seed_sample_data)
            .field("contact_rate_limit_per_hour", &self.contact_rate_limit_per_hour)
            .field("trust_x_forwarded_for", &self.trust_x_forwarded_for)
            .finish()
    }
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub refresh_encoding: EncodingKey,
    pub refresh_decoding: DecodingKey,
}

impl From<&AppConfig> for JwtKeys {
    fn from(config: &AppConfig) -> Self {
        let jwt_secret = Zeroizing::new(config.jwt_secret.clone());
        let refresh_secret = Zeroizing::new(config.refresh_token_secret.clone());

        JwtKeys {
            encoding: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(jwt_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
        }
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("encoding", &"[REDACTED]")
            .field("decoding", &"[REDACTED]")
            .field("refresh_encoding", &"[REDACTED]")
            .field("refresh_decoding", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Development,
            name: "Portal".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            store: StoreKind::Postgres,
            database_url: "postgres://localhost/portal".into(),
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "x".repeat(40),
            jwt_expiration_minutes: 15,
            refresh_token_secret: "y".repeat(40),
            refresh_token_exp_days: 1,
            admin_email: "admin@portal.com".into(),
            admin_password: String::new(),
            seed_sample_data: false,
            contact_rate_limit_per_hour: 5,
            trust_x_forwarded_for: false,
            filter_options: FilterOptions::default(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn postgres_store_requires_database_url() {
        let mut config = base_config();
        config.database_url = "  ".into();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("DATABASE_URL"));

        config.store = StoreKind::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn production_rejects_wildcard_cors_and_memory_store() {
        let mut config = base_config();
        config.env = AppEnvironment::Production;
        config.store = StoreKind::Memory;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("Wildcard CORS"));
        assert!(err.contains("memory store"));
    }

    #[test]
    fn cors_origins_split_comma_lists() {
        let mut config = base_config();
        config.cors_allowed_origins = vec!["https://a.com, https://b.com".into(), " ".into()];
        assert_eq!(config.cors_origins(), vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let rendered = format!("{:?}", base_config());
        assert!(!rendered.contains(&"x".repeat(40)));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn default_filter_options_match_the_portal_vocabulary() {
        let options = FilterOptions::default();
        assert_eq!(options.countries.len(), 6);
        assert!(options.fields_of_study.contains(&"ENGINEERING AND TECHNOLOGY".to_string()));
        assert_eq!(options.degree_levels.len(), 8);
    }
}
