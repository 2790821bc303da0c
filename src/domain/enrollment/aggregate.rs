//! Enrollment aggregate entity.
//!
//! An Enrollment is a concrete, time-boxed purchase: it links a student to
//! a plan, records what was paid and how, and carries the billing period.
//!
//! # Design Decisions
//!
//! - **End date is computed once** at creation (start date plus the
//!   contracted months) and never recomputed
//! - **Calendar month arithmetic clamps at month end**: Jan 31 + 1 month
//!   is Feb 28/29, not a date in March
//! - **Expiry is a pure status check**: `check_expiry` flips active
//!   past-due enrollments to expired and is idempotent

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    EnrollmentId, Money, PlanId, StudentId, Timestamp, ValidationError,
};

use super::payment::PaymentMethod;
use super::status::EnrollmentStatus;

const MS_PER_DAY: i64 = 86_400_000;

/// Enrollment aggregate - a student's time-boxed purchase of a plan.
///
/// # Invariants
///
/// - `amount_paid` is greater than zero
/// - `end_date` equals `start_date` plus the contracted months, frozen at
///   creation
/// - `Expired` and `Cancelled` are terminal under the public contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Unique identifier for this enrollment.
    pub id: EnrollmentId,

    /// Student who purchased the plan.
    pub student_id: StudentId,

    /// Plan that was purchased.
    pub plan_id: PlanId,

    /// Start of the billing period.
    pub start_date: Timestamp,

    /// End of the billing period.
    pub end_date: Timestamp,

    /// Amount paid at enrollment time.
    pub amount_paid: Money,

    /// How the enrollment was paid.
    pub payment_method: PaymentMethod,

    /// Current lifecycle status.
    pub status: EnrollmentStatus,
}

impl Enrollment {
    /// Creates a new active enrollment, computing the end date.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the duration is zero or the amount
    /// paid is not positive.
    pub fn create(
        student_id: StudentId,
        plan_id: PlanId,
        start_date: Timestamp,
        duration_months: u32,
        amount_paid: Money,
        payment_method: PaymentMethod,
    ) -> Result<Self, ValidationError> {
        if duration_months == 0 {
            return Err(ValidationError::not_positive("duration_months"));
        }
        if !amount_paid.is_positive() {
            return Err(ValidationError::not_positive("amount_paid"));
        }

        let end_date = start_date.add_months(duration_months);
        Ok(Self {
            id: EnrollmentId::new(),
            student_id,
            plan_id,
            start_date,
            end_date,
            amount_paid,
            payment_method,
            status: EnrollmentStatus::Active,
        })
    }

    /// Cancels this enrollment. Terminal; repeated calls are harmless.
    pub fn cancel(&mut self) {
        self.status = EnrollmentStatus::Cancelled;
    }

    /// Flips an active enrollment whose end date has passed to expired.
    ///
    /// No-op for enrollments that are still within their period or already
    /// in a terminal state. Idempotent.
    pub fn check_expiry(&mut self) {
        if self.status == EnrollmentStatus::Active && self.end_date < Timestamp::now() {
            self.status = EnrollmentStatus::Expired;
        }
    }

    /// Whole days until the end date, rounded up.
    ///
    /// Negative for overdue enrollments, zero when the end date is now.
    pub fn remaining_days(&self) -> i64 {
        let ms = self
            .end_date
            .duration_since(&Timestamp::now())
            .num_milliseconds();
        ceil_div(ms, MS_PER_DAY)
    }

    /// Returns true for active enrollments ending within `days` days.
    ///
    /// Overdue enrollments (negative remaining days) are excluded; they
    /// belong to the expiry sweep, not the renewal reminder window.
    pub fn is_expiring_within(&self, days: i64) -> bool {
        if !self.status.is_active() {
            return false;
        }
        let remaining = self.remaining_days();
        remaining > 0 && remaining <= days
    }
}

fn ceil_div(num: i64, den: i64) -> i64 {
    num.div_euclid(den) + if num.rem_euclid(den) > 0 { 1 } else { 0 }
}
