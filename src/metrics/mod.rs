//! Reading metrics: the classification engine.
//!
//! Derives severity level, pulse pressure, mean arterial pressure and the
//! orthostatic hypotension flag for a new reading against the history that
//! exists at insertion time. Everything here is pure: history arrives as an
//! immutable slice and nothing is retained between calls.

mod classify;
mod derived;
mod enrich;
mod orthostatic;

pub use classify::*;
pub use derived::*;
pub use enrich::*;
pub use orthostatic::*;
