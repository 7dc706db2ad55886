//! Data models for the back-office API.
//!
//! Field names match the site frontend's JSON wire format exactly.

mod admin;
mod contact;
mod event;
mod system_data;
mod team;

pub use admin::*;
pub use contact::*;
pub use event::*;
pub use system_data::*;
pub use team::*;
