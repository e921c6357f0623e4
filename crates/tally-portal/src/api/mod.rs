//! Portal operations, one file per page family.
//!
//! Each file adds an `impl PortalClient` block.

mod breaks;
mod dashboard;
mod history;
mod login;
