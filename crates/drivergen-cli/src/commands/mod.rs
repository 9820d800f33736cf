//! CLI command implementations

pub mod doctor;
pub mod extract;
pub mod generate;
pub mod json_output;
