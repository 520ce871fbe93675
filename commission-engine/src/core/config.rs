/// Engine configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first by the binary):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | COMMISSION_RULES_PATH | ./commission_rules.json | Rule snapshot export |
/// | COMMISSION_OWNER_ID | (unset) | Only load rules owned by this account |
/// | LOG_LEVEL | info | Log level / filter |
/// | LOG_JSON | false | JSON console logs |
/// | LOG_DIR | (unset) | Enable rolling file logs in this directory |
/// | ENVIRONMENT | development | Runtime environment |
///
/// # Example
///
/// ```ignore
/// COMMISSION_RULES_PATH=/data/rules.json LOG_LEVEL=debug commission rules
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON rule snapshot
    pub rules_path: String,
    /// Account whose rules are loaded (all rows when unset)
    pub owner_id: Option<String>,
    /// Log level
    pub log_level: String,
    /// JSON console logs
    pub log_json: bool,
    /// Directory for rolling file logs
    pub log_dir: Option<String>,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            rules_path: std::env::var("COMMISSION_RULES_PATH")
                .unwrap_or_else(|_| "./commission_rules.json".into()),
            owner_id: std::env::var("COMMISSION_OWNER_ID")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the rule snapshot location and owner
    ///
    /// Mostly used in tests
    pub fn with_overrides(rules_path: impl Into<String>, owner_id: Option<String>) -> Self {
        let mut config = Self::from_env();
        config.rules_path = rules_path.into();
        config.owner_id = owner_id;
        config
    }

    /// Production environment?
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Development environment?
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
