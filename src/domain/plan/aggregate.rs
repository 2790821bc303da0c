//! Plan aggregate entity.
//!
//! A Plan is a client's subscription offering: who the client is, which
//! catalog type they signed up for, and for how many months. Pricing is
//! derived from the catalog at read time; the duration tier determines the
//! discount.
//!
//! # Design Decisions
//!
//! - **One active plan per client email**: enforced by the service at
//!   creation, under the collection lock
//! - **Construction validates every field atomically**: no partially
//!   invalid Plan is ever observable
//! - **Setters revalidate their own field** and bump `updated_at`
//! - **Multi-field edits validate everything first**, then apply, so a
//!   failed edit leaves the plan untouched

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, Percentage, PlanId, Timestamp, ValidationError};

use super::catalog::{PlanCatalog, PlanType};
use super::errors::PlanError;

/// Minimum length for a client name.
const MIN_NAME_LEN: usize = 3;

/// Minimum length for a client phone number.
const MIN_PHONE_LEN: usize = 10;

/// Plan aggregate - a client's subscription offering.
///
/// # Invariants
///
/// - `client_name` has at least 3 characters
/// - `client_email` has a valid email shape
/// - `client_phone` has at least 10 characters
/// - `duration_months` is greater than zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique identifier for this plan.
    pub id: PlanId,

    /// Client display name.
    pub client_name: String,

    /// Client contact email. At most one active plan exists per email.
    pub client_email: String,

    /// Client contact phone.
    pub client_phone: String,

    /// Catalog type determining the monthly price.
    pub plan_type: PlanType,

    /// Contracted duration in months.
    pub duration_months: u32,

    /// Whether the plan is currently active.
    pub active: bool,

    /// When the plan was created.
    pub created_at: Timestamp,

    /// When the plan was last updated.
    pub updated_at: Timestamp,
}

impl Plan {
    /// Creates a new active plan, validating every field.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any field violates its constraint.
    pub fn create(
        client_name: String,
        client_email: String,
        client_phone: String,
        plan_type: PlanType,
        duration_months: u32,
    ) -> Result<Self, ValidationError> {
        validate_client_name(&client_name)?;
        validate_client_email(&client_email)?;
        validate_client_phone(&client_phone)?;
        validate_duration(duration_months)?;

        let now = Timestamp::now();
        Ok(Self {
            id: PlanId::new(),
            client_name,
            client_email,
            client_phone,
            plan_type,
            duration_months,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates the client name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is empty or shorter than 3
    /// characters.
    pub fn set_client_name(&mut self, client_name: String) -> Result<(), ValidationError> {
        validate_client_name(&client_name)?;
        self.client_name = client_name;
        self.touch();
        Ok(())
    }

    /// Updates the client email.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the email is empty or malformed.
    pub fn set_client_email(&mut self, client_email: String) -> Result<(), ValidationError> {
        validate_client_email(&client_email)?;
        self.client_email = client_email;
        self.touch();
        Ok(())
    }

    /// Updates the client phone.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the phone is empty or shorter than 10
    /// characters.
    pub fn set_client_phone(&mut self, client_phone: String) -> Result<(), ValidationError> {
        validate_client_phone(&client_phone)?;
        self.client_phone = client_phone;
        self.touch();
        Ok(())
    }

    /// Updates the plan type. Valid by construction.
    pub fn set_plan_type(&mut self, plan_type: PlanType) {
        self.plan_type = plan_type;
        self.touch();
    }

    /// Updates the contracted duration.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the duration is zero.
    pub fn set_duration_months(&mut self, duration_months: u32) -> Result<(), ValidationError> {
        validate_duration(duration_months)?;
        self.duration_months = duration_months;
        self.touch();
        Ok(())
    }

    /// Applies a partial edit atomically: every present field is validated
    /// before any of them is assigned.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any present field violates its
    /// constraint; in that case the plan is left unchanged.
    pub fn apply_update(&mut self, update: PlanUpdate) -> Result<(), ValidationError> {
        if let Some(name) = &update.client_name {
            validate_client_name(name)?;
        }
        if let Some(email) = &update.client_email {
            validate_client_email(email)?;
        }
        if let Some(phone) = &update.client_phone {
            validate_client_phone(phone)?;
        }
        if let Some(duration) = update.duration_months {
            validate_duration(duration)?;
        }

        if let Some(name) = update.client_name {
            self.set_client_name(name)?;
        }
        if let Some(email) = update.client_email {
            self.set_client_email(email)?;
        }
        if let Some(phone) = update.client_phone {
            self.set_client_phone(phone)?;
        }
        if let Some(plan_type) = update.plan_type {
            self.set_plan_type(plan_type);
        }
        if let Some(duration) = update.duration_months {
            self.set_duration_months(duration)?;
        }
        Ok(())
    }

    /// Activates the plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidTransition` if the plan is already active.
    pub fn activate(&mut self) -> Result<(), PlanError> {
        if self.active {
            return Err(PlanError::invalid_transition("active", "activate"));
        }
        self.active = true;
        self.touch();
        Ok(())
    }

    /// Deactivates the plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidTransition` if the plan is already
    /// inactive.
    pub fn deactivate(&mut self) -> Result<(), PlanError> {
        if !self.active {
            return Err(PlanError::invalid_transition("inactive", "deactivate"));
        }
        self.active = false;
        self.touch();
        Ok(())
    }

    /// Monthly price from the catalog.
    pub fn monthly_price(&self) -> Money {
        PlanCatalog::global().price_of(self.plan_type)
    }

    /// Full price over the contracted duration, before discount.
    pub fn total_price(&self) -> Money {
        self.monthly_price().times(self.duration_months)
    }

    /// Discount tier for the contracted duration.
    ///
    /// Under 3 months no discount, 5% from 3 months, 10% from 6 months,
    /// 20% from 12 months.
    pub fn discount_percent(&self) -> Percentage {
        discount_for(self.duration_months)
    }

    /// Total price after the duration-tier discount.
    pub fn discounted_total(&self) -> Money {
        self.total_price().percent_off(self.discount_percent())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

/// Partial edit payload for a plan. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanUpdate {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub plan_type: Option<PlanType>,
    pub duration_months: Option<u32>,
}

fn discount_for(duration_months: u32) -> Percentage {
    match duration_months {
        0..=2 => Percentage::ZERO,
        3..=5 => Percentage::new(5),
        6..=11 => Percentage::new(10),
        _ => Percentage::new(20),
    }
}

fn validate_client_name(client_name: &str) -> Result<(), ValidationError> {
    if client_name.is_empty() {
        return Err(ValidationError::empty_field("client_name"));
    }
    let len = client_name.chars().count();
    if len < MIN_NAME_LEN {
        return Err(ValidationError::too_short("client_name", MIN_NAME_LEN, len));
    }
    Ok(())
}

fn validate_client_email(client_email: &str) -> Result<(), ValidationError> {
    if client_email.is_empty() {
        return Err(ValidationError::empty_field("client_email"));
    }
    if !validator::validate_email(client_email) {
        return Err(ValidationError::invalid_format(
            "client_email",
            "not a valid email address",
        ));
    }
    Ok(())
}

fn validate_client_phone(client_phone: &str) -> Result<(), ValidationError> {
    if client_phone.is_empty() {
        return Err(ValidationError::empty_field("client_phone"));
    }
    let len = client_phone.chars().count();
    if len < MIN_PHONE_LEN {
        return Err(ValidationError::too_short(
            "client_phone",
            MIN_PHONE_LEN,
            len,
        ));
    }
    Ok(())
}

fn validate_duration(duration_months: u32) -> Result<(), ValidationError> {
    if duration_months == 0 {
        return Err(ValidationError::not_positive("duration_months"));
    }
    Ok(())
}
