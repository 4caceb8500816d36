pub mod common;
pub mod contract;
pub mod types;
