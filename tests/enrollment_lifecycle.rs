//! Integration tests for the plan and enrollment lifecycle.
//!
//! These tests verify the end-to-end flow:
//! 1. A plan is created with catalog pricing and a duration-tier discount
//! 2. An enrollment is created against that plan with the discounted total
//! 3. Cancellation is terminal and survives expiry sweeps
//! 4. Revenue aggregates track exactly the active enrollments

use fitcore::application::{EnrollmentService, NewEnrollment, NewPlan, PlanService};
use fitcore::domain::enrollment::{EnrollmentStatus, PaymentMethod};
use fitcore::domain::foundation::{Money, Percentage, StudentId, Timestamp};
use fitcore::domain::plan::{PlanError, PlanType};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

fn ana_plan() -> NewPlan {
    NewPlan {
        client_name: "Ana Silva".to_string(),
        client_email: "ana@x.com".to_string(),
        client_phone: "11999999999".to_string(),
        plan_type: PlanType::Musculacao,
        duration_months: 12,
    }
}

#[test]
fn full_enrollment_lifecycle() {
    init_tracing();
    let plan_service = PlanService::new();
    let enrollment_service = EnrollmentService::new();

    // Plan creation: monthly 150.00, total 1800.00, 20% off -> 1440.00
    let plan = plan_service.create(ana_plan()).unwrap();
    assert_eq!(plan.monthly_price(), Money::from_cents(150_00));
    assert_eq!(plan.total_price(), Money::from_cents(1800_00));
    assert_eq!(plan.discount_percent(), Percentage::new(20));
    assert_eq!(plan.discounted_total(), Money::from_cents(1440_00));

    // Enrollment against that plan, paying the discounted total via pix.
    let start = Timestamp::from_ymd(2025, 1, 1).unwrap();
    let enrollment = enrollment_service
        .create(NewEnrollment {
            student_id: StudentId::new("ana").unwrap(),
            plan_id: plan.id,
            start_date: start,
            duration_months: 12,
            amount_paid: Money::from_cents(1440_00),
            payment_method: PaymentMethod::Pix,
        })
        .unwrap();

    assert_eq!(enrollment.end_date, Timestamp::from_ymd(2026, 1, 1).unwrap());
    assert_eq!(enrollment.status, EnrollmentStatus::Active);
    assert_eq!(enrollment_service.total_revenue(), Money::from_cents(1440_00));

    // Cancellation is terminal; a later sweep leaves it cancelled.
    let cancelled = enrollment_service.cancel(enrollment.id).unwrap();
    assert_eq!(cancelled.status, EnrollmentStatus::Cancelled);

    enrollment_service.sweep_expirations();
    let after_sweep = enrollment_service.find_by_id(enrollment.id).unwrap();
    assert_eq!(after_sweep.status, EnrollmentStatus::Cancelled);

    // Cancelled enrollments no longer count toward revenue.
    assert_eq!(enrollment_service.total_revenue(), Money::ZERO);
}

#[test]
fn one_active_plan_per_email_across_the_lifecycle() {
    init_tracing();
    let plan_service = PlanService::new();

    let first = plan_service.create(ana_plan()).unwrap();

    let second = plan_service.create(NewPlan {
        plan_type: PlanType::Pilates,
        duration_months: 6,
        ..ana_plan()
    });
    assert!(matches!(second, Err(PlanError::DuplicateActivePlan { .. })));

    // After cancelling the first plan the email is free again.
    plan_service.cancel(first.id).unwrap();
    let second = plan_service
        .create(NewPlan {
            plan_type: PlanType::Pilates,
            duration_months: 6,
            ..ana_plan()
        })
        .unwrap();
    assert_eq!(second.plan_type, PlanType::Pilates);

    // One active (pilates) and one inactive (musculacao) plan remain.
    assert_eq!(plan_service.count_active(), 1);
    assert_eq!(plan_service.count_inactive(), 1);
    assert_eq!(
        plan_service.active_revenue(),
        // 21000 * 6 at 10% off
        Money::from_cents(113_400)
    );
}

#[test]
fn revenue_tracks_enrollment_status_changes_exactly() {
    init_tracing();
    let service = EnrollmentService::new();

    let base = service
        .create(NewEnrollment {
            student_id: StudentId::new("student-1").unwrap(),
            plan_id: fitcore::domain::foundation::PlanId::new(),
            start_date: Timestamp::now(),
            duration_months: 12,
            amount_paid: Money::from_cents(1440_00),
            payment_method: PaymentMethod::CreditCard,
        })
        .unwrap();
    assert_eq!(service.total_revenue(), Money::from_cents(1440_00));

    // Adding then cancelling an enrollment of amount X leaves the total
    // unchanged relative to before it was added.
    let extra = service
        .create(NewEnrollment {
            student_id: StudentId::new("student-2").unwrap(),
            plan_id: fitcore::domain::foundation::PlanId::new(),
            start_date: Timestamp::now(),
            duration_months: 1,
            amount_paid: Money::from_cents(120_00),
            payment_method: PaymentMethod::Boleto,
        })
        .unwrap();
    assert_eq!(service.total_revenue(), Money::from_cents(1560_00));

    service.cancel(extra.id).unwrap();
    assert_eq!(service.total_revenue(), Money::from_cents(1440_00));

    service.cancel(base.id).unwrap();
    assert_eq!(service.total_revenue(), Money::ZERO);
}
