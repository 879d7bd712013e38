//! Loan qualification for micro-business applicants.
//!
//! [`scoring`] holds the pure calculators (EMI, eligibility tiers, score
//! bands, questionnaire completion and the two heuristic score models).
//! [`applications`] wraps them in a cached, repository-backed service and an
//! axum router.

pub mod applications;
pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
