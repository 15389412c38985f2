//! pm-core: stable foundation for the PMSM design workspace.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real, MU0 and float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
