use crate::service::{
    Allocator, SearchBudget, DEFAULT_MAX_CANDIDATES, DEFAULT_MAX_RECIPIENTS, DEFAULT_MAX_STEPS,
};
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Combos tried per allocation before giving up; 0 disables the limit.
    pub max_steps: u64,
    /// Candidate combos generated per allocation, summed over recipients; 0 disables.
    pub max_candidates: u64,
    /// Recipients per allocation; 0 disables.
    pub max_recipients: usize,
    /// Largest accepted target amount.
    pub max_amount: u32,
}

pub const DEFAULT_MAX_AMOUNT: u32 = 1_000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;

impl SearchConfig {
    pub fn budget(&self) -> SearchBudget {
        SearchBudget {
            max_steps: Some(self.max_steps).filter(|&n| n > 0),
            max_candidates: Some(self.max_candidates).filter(|&n| n > 0),
        }
    }

    pub fn allocator(&self) -> Allocator {
        Allocator::new(self.budget())
            .with_max_recipients(Some(self.max_recipients).filter(|&n| n > 0))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            },
            search: SearchConfig {
                max_steps: DEFAULT_MAX_STEPS,
                max_candidates: DEFAULT_MAX_CANDIDATES,
                max_recipients: DEFAULT_MAX_RECIPIENTS,
                max_amount: DEFAULT_MAX_AMOUNT,
            },
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `CASH_`-prefixed environment variables,
    /// e.g. `CASH_SERVER__PORT=9000`, `CASH_SEARCH__MAX_STEPS=0`.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("server.max_body_bytes", defaults.server.max_body_bytes.to_string())?
            .set_default("search.max_steps", defaults.search.max_steps.to_string())?
            .set_default("search.max_candidates", defaults.search.max_candidates.to_string())?
            .set_default("search.max_recipients", defaults.search.max_recipients.to_string())?
            .set_default("search.max_amount", i64::from(defaults.search.max_amount))?
            .add_source(
                Environment::with_prefix("CASH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_max_steps_disables_budget() {
        let search = SearchConfig {
            max_steps: 0,
            max_candidates: 0,
            max_recipients: 0,
            max_amount: DEFAULT_MAX_AMOUNT,
        };
        assert_eq!(search.budget(), SearchBudget::unlimited());
        assert_eq!(search.allocator().max_recipients(), None);
    }

    #[test]
    fn defaults_carry_step_budget() {
        let config = AppConfig::default();
        assert_eq!(config.search.budget(), SearchBudget::steps(DEFAULT_MAX_STEPS));
        assert_eq!(config.search.budget(), SearchBudget::default());
        assert_eq!(config.search.allocator().budget(), config.search.budget());
        assert_eq!(
            config.search.allocator().max_recipients(),
            Some(DEFAULT_MAX_RECIPIENTS)
        );
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }
}
