//! API endpoint handlers.
//!
//! One module per resource. Handlers open a connection, delegate to
//! `crate::journal` and map its errors onto `ApiError`.

pub mod analysis;
pub mod entries;
pub mod health;
pub mod profiles;
pub mod symptoms;
