pub mod engineer;
pub mod error;
pub mod label;
