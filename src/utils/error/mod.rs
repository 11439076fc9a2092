//! Error handling for the portal
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! [`PortalError`].

mod helpers;
mod types;


pub use types::{PortalError, Result};
