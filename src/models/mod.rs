pub mod habit;
pub mod hydration;
pub mod mood;
pub mod summary;
