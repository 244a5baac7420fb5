//! Test support shared by the backend's unit and integration tests:
//! one-time logging setup and problem-details assertions.

pub mod logging;
pub mod problem_details;
