#![doc = include_str!("../README.md")]

pub use crate::acquisition::*;
pub use crate::config::*;
pub use crate::containment::{contains, contains_vertices};
pub use crate::controller::GeofenceController;
pub use crate::error::Error;
pub use crate::fence::{DEFAULT_HALF_SIZE, build_fence};
pub use crate::notify::*;
pub use crate::session::GeofenceSession;
pub use crate::types::*;

mod acquisition;
mod config;
mod containment;
mod controller;
mod error;
mod fence;
mod notify;
mod session;
mod types;
