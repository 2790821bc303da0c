//! EnrollmentService - owns the in-memory Enrollment collection.
//!
//! All reads and writes go through the collection lock. The expiry sweep
//! is intended to run periodically, or on demand before status-sensitive
//! queries. Every instance owns independent state.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Deserialize;

use crate::domain::enrollment::{Enrollment, EnrollmentError, EnrollmentStatus, PaymentMethod};
use crate::domain::foundation::{EnrollmentId, Money, PlanId, StudentId, Timestamp};

/// Payload for creating an enrollment.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEnrollment {
    pub student_id: StudentId,
    pub plan_id: PlanId,
    pub start_date: Timestamp,
    pub duration_months: u32,
    pub amount_paid: Money,
    pub payment_method: PaymentMethod,
}

/// Service owning the Enrollment collection for its process lifetime.
#[derive(Debug, Default)]
pub struct EnrollmentService {
    enrollments: Mutex<HashMap<EnrollmentId, Enrollment>>,
}

impl EnrollmentService {
    /// Creates a service with an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an enrollment and stores it.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the duration is zero or the amount paid is
    /// not positive.
    pub fn create(&self, payload: NewEnrollment) -> Result<Enrollment, EnrollmentError> {
        let enrollment = Enrollment::create(
            payload.student_id,
            payload.plan_id,
            payload.start_date,
            payload.duration_months,
            payload.amount_paid,
            payload.payment_method,
        )?;

        let mut enrollments = self.enrollments.lock().unwrap();
        enrollments.insert(enrollment.id, enrollment.clone());

        tracing::info!(
            enrollment_id = %enrollment.id,
            student_id = %enrollment.student_id,
            plan_id = %enrollment.plan_id,
            "Enrollment created"
        );
        Ok(enrollment)
    }

    /// Looks up an enrollment by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is absent.
    pub fn find_by_id(&self, id: EnrollmentId) -> Result<Enrollment, EnrollmentError> {
        let enrollments = self.enrollments.lock().unwrap();
        enrollments
            .get(&id)
            .cloned()
            .ok_or(EnrollmentError::NotFound(id))
    }

    /// Returns every enrollment.
    pub fn list(&self) -> Vec<Enrollment> {
        self.enrollments.lock().unwrap().values().cloned().collect()
    }

    /// Cancels an enrollment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is absent.
    pub fn cancel(&self, id: EnrollmentId) -> Result<Enrollment, EnrollmentError> {
        let mut enrollments = self.enrollments.lock().unwrap();
        let enrollment = enrollments
            .get_mut(&id)
            .ok_or(EnrollmentError::NotFound(id))?;
        enrollment.cancel();

        tracing::info!(enrollment_id = %id, "Enrollment cancelled");
        Ok(enrollment.clone())
    }

    /// Flips every active, past-due enrollment to expired.
    ///
    /// Idempotent; safe to run repeatedly and on a schedule.
    pub fn sweep_expirations(&self) {
        let mut enrollments = self.enrollments.lock().unwrap();
        let mut flipped = 0usize;
        for enrollment in enrollments.values_mut() {
            let before = enrollment.status;
            enrollment.check_expiry();
            if enrollment.status != before {
                flipped += 1;
            }
        }

        tracing::debug!(flipped, "Expiry sweep finished");
    }

    /// Returns enrollments for the given student.
    pub fn by_student(&self, student_id: &StudentId) -> Vec<Enrollment> {
        self.filtered(|e| &e.student_id == student_id)
    }

    /// Returns enrollments for the given plan.
    pub fn by_plan(&self, plan_id: PlanId) -> Vec<Enrollment> {
        self.filtered(|e| e.plan_id == plan_id)
    }

    /// Returns enrollments in the given status.
    pub fn by_status(&self, status: EnrollmentStatus) -> Vec<Enrollment> {
        self.filtered(|e| e.status == status)
    }

    /// Returns enrollments paid with the given method.
    pub fn by_payment_method(&self, method: PaymentMethod) -> Vec<Enrollment> {
        self.filtered(|e| e.payment_method == method)
    }

    /// Returns active enrollments ending within `days` days.
    pub fn expiring_within(&self, days: i64) -> Vec<Enrollment> {
        self.filtered(|e| e.is_expiring_within(days))
    }

    /// Sum of amounts paid over active enrollments.
    pub fn total_revenue(&self) -> Money {
        let enrollments = self.enrollments.lock().unwrap();
        enrollments
            .values()
            .filter(|e| e.status.is_active())
            .map(|e| e.amount_paid)
            .sum()
    }

    /// Sum of amounts paid over enrollments whose start date falls in
    /// `[from, to]` inclusive, regardless of status.
    pub fn revenue_between(&self, from: Timestamp, to: Timestamp) -> Money {
        let enrollments = self.enrollments.lock().unwrap();
        enrollments
            .values()
            .filter(|e| e.start_date >= from && e.start_date <= to)
            .map(|e| e.amount_paid)
            .sum()
    }

    fn filtered(&self, predicate: impl Fn(&Enrollment) -> bool) -> Vec<Enrollment> {
        let enrollments = self.enrollments.lock().unwrap();
        enrollments
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }
}
