//! Plan types and the studio price catalog.
//!
//! The catalog is process-wide, read-only configuration: built-in monthly
//! prices per plan type, optionally overridden from the environment at
//! first access, never mutated afterwards.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{AppConfig, CatalogConfig};
use crate::domain::foundation::Money;

/// Plan offering types from the studio catalog.
///
/// The wire names are the catalog keys the administrative dashboard and
/// public enrollment pages use (`musculacao`, `zumba+pilates`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanType {
    #[serde(rename = "musculacao")]
    Musculacao,
    #[serde(rename = "zumba")]
    Zumba,
    #[serde(rename = "pilates")]
    Pilates,
    #[serde(rename = "musculacao+pilates")]
    MusculacaoPilates,
    #[serde(rename = "zumba+pilates")]
    ZumbaPilates,
    #[serde(rename = "musculacao+zumba")]
    MusculacaoZumba,
}

impl PlanType {
    /// Every catalog entry, in catalog order.
    pub const ALL: [PlanType; 6] = [
        PlanType::Musculacao,
        PlanType::Zumba,
        PlanType::Pilates,
        PlanType::MusculacaoPilates,
        PlanType::ZumbaPilates,
        PlanType::MusculacaoZumba,
    ];

    /// Returns the catalog key for this type.
    pub fn wire_name(&self) -> &'static str {
        match self {
            PlanType::Musculacao => "musculacao",
            PlanType::Zumba => "zumba",
            PlanType::Pilates => "pilates",
            PlanType::MusculacaoPilates => "musculacao+pilates",
            PlanType::ZumbaPilates => "zumba+pilates",
            PlanType::MusculacaoZumba => "musculacao+zumba",
        }
    }

    /// Built-in monthly price, in cents.
    fn base_price(&self) -> Money {
        match self {
            PlanType::Musculacao => Money::from_cents(15000),
            PlanType::Zumba => Money::from_cents(12000),
            PlanType::Pilates => Money::from_cents(21000),
            PlanType::MusculacaoPilates => Money::from_cents(35000),
            PlanType::ZumbaPilates => Money::from_cents(29999),
            PlanType::MusculacaoZumba => Money::from_cents(20000),
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Error returned when a plan type string is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown plan type '{0}'")]
pub struct UnknownPlanType(pub String);

impl FromStr for PlanType {
    type Err = UnknownPlanType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanType::ALL
            .into_iter()
            .find(|t| t.wire_name() == s)
            .ok_or_else(|| UnknownPlanType(s.to_string()))
    }
}

/// The studio price list.
///
/// Total over [`PlanType`]: every type has a price, so lookups never fail.
/// Unknown plan names are rejected earlier, when parsing into `PlanType`.
#[derive(Debug, Clone, Default)]
pub struct PlanCatalog {
    overrides: HashMap<PlanType, Money>,
}

impl PlanCatalog {
    /// Creates the catalog with built-in prices only.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Creates a catalog with configured price overrides on top of the
    /// built-in prices.
    pub fn with_overrides(config: &CatalogConfig) -> Self {
        let configured = [
            (PlanType::Musculacao, config.musculacao_cents),
            (PlanType::Zumba, config.zumba_cents),
            (PlanType::Pilates, config.pilates_cents),
            (PlanType::MusculacaoPilates, config.musculacao_pilates_cents),
            (PlanType::ZumbaPilates, config.zumba_pilates_cents),
            (PlanType::MusculacaoZumba, config.musculacao_zumba_cents),
        ];

        let mut overrides = HashMap::new();
        for (plan_type, cents) in configured {
            if let Some(cents) = cents {
                overrides.insert(plan_type, Money::from_cents(cents));
            }
        }

        Self { overrides }
    }

    /// Returns the process-wide catalog.
    ///
    /// Initialized on first access from the environment configuration;
    /// falls back to built-in prices when the environment is unset or
    /// invalid. Read-only afterwards.
    pub fn global() -> &'static PlanCatalog {
        static GLOBAL: Lazy<PlanCatalog> = Lazy::new(|| {
            let loaded = AppConfig::load().and_then(|config| {
                config.validate()?;
                Ok(config)
            });
            match loaded {
                Ok(config) => PlanCatalog::with_overrides(&config.catalog),
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        "Invalid catalog configuration, using built-in prices"
                    );
                    PlanCatalog::builtin()
                }
            }
        });
        &GLOBAL
    }

    /// Returns the monthly price for a plan type.
    pub fn price_of(&self, plan_type: PlanType) -> Money {
        self.overrides
            .get(&plan_type)
            .copied()
            .unwrap_or_else(|| plan_type.base_price())
    }

    /// Lists every catalog entry with its monthly price.
    pub fn list_all(&self) -> Vec<(PlanType, Money)> {
        PlanType::ALL
            .into_iter()
            .map(|t| (t, self.price_of(t)))
            .collect()
    }
}
