pub mod assessments;
pub mod config;
pub mod error;
pub mod recommendations;
pub mod telemetry;
