pub mod inputs;
pub mod reporting;
