//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies (clock, storage) are abstracted behind traits. This
//! crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem
//!
//! Usage: swap real implementations for nullables in tests. `NullStore` is
//! also the `memory` backend of the node.

pub mod clock;
pub mod store;

pub use clock::{Clock, NullClock, SystemClock};
pub use store::NullStore;
