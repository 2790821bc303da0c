//! Application layer - services orchestrating the domain aggregates.
//!
//! Each service exclusively owns its in-memory collection for the process
//! lifetime. Cross-entity references (student id, plan id) stay plain
//! identifiers; services never hold live links into each other's
//! collections.

mod enrollment_service;
mod plan_service;

pub use enrollment_service::{EnrollmentService, NewEnrollment};
pub use plan_service::{NewPlan, PlanService, PlanStatistics, TypeCounts};
