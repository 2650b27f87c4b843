pub mod habit;
pub mod mood;
