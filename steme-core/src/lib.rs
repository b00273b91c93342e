//! Core state for the steme calendar screen.
//!
//! - `calendar`: selected date, disabled weekdays and marked dates for the month list
//! - `identity`: signed-in user name and avatar, reconciled with async avatar fetches
//! - `auth` / `avatar`: the collaborators identity sync talks to
//! - `config`: immutable locale and behaviour settings

pub mod auth;
pub mod avatar;
pub mod calendar;
pub mod config;
pub mod date;
pub mod error;
pub mod identity;

pub use error::{StemeError, StemeResult};
