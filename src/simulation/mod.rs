pub mod bertrand;
pub mod config;
pub mod cournot;
pub mod engine;
pub mod error;
pub mod results;
