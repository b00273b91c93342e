pub mod calendar;
pub mod config;
pub mod profile;
