//! Top-level facade crate for backstat.
//!
//! Re-exports the wire types and the server library so users can depend on a single crate.

pub mod core {
    pub use backstat_core::*;
}

pub mod server {
    pub use backstat_server::*;
}
