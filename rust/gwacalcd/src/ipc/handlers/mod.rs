pub mod core;
pub mod subjects;
pub mod views;
