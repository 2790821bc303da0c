//! Catalog configuration.
//!
//! Optional per-plan-type price overrides, in integer cents. Any type
//! without an override keeps its built-in catalog price.

use serde::Deserialize;

use super::error::ConfigError;

/// Price overrides for the plan catalog (cents).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Override for the musculacao monthly price.
    pub musculacao_cents: Option<i64>,

    /// Override for the zumba monthly price.
    pub zumba_cents: Option<i64>,

    /// Override for the pilates monthly price.
    pub pilates_cents: Option<i64>,

    /// Override for the musculacao+pilates monthly price.
    pub musculacao_pilates_cents: Option<i64>,

    /// Override for the zumba+pilates monthly price.
    pub zumba_pilates_cents: Option<i64>,

    /// Override for the musculacao+zumba monthly price.
    pub musculacao_zumba_cents: Option<i64>,
}

impl CatalogConfig {
    /// Validate catalog configuration.
    ///
    /// Every override that is present must be a positive amount of cents.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let overrides = [
            ("musculacao_cents", self.musculacao_cents),
            ("zumba_cents", self.zumba_cents),
            ("pilates_cents", self.pilates_cents),
            ("musculacao_pilates_cents", self.musculacao_pilates_cents),
            ("zumba_pilates_cents", self.zumba_pilates_cents),
            ("musculacao_zumba_cents", self.musculacao_zumba_cents),
        ];

        for (field, value) in overrides {
            if let Some(cents) = value {
                if cents <= 0 {
                    return Err(ConfigError::NonPositivePrice(field));
                }
            }
        }

        Ok(())
    }
}
