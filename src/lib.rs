//! Fitcore - Membership plan and enrollment lifecycle management
//!
//! This crate implements the domain core of a fitness-studio management
//! system: subscription plans with duration-tier discounts, time-boxed
//! enrollments with billing-period expiry, and the services that own both
//! collections. HTTP routing, persistence engines, and authentication are
//! external collaborators.

pub mod application;
pub mod config;
pub mod domain;
