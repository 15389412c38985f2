//! pm-steel: electrical-steel property lookup for the PMSM design engine.
//!
//! Provides:
//! - The five selectable lamination grades (`SteelGrade`)
//! - Tabulated magnetisation (B-H) and specific iron-loss curves on a shared
//!   37-point flux-density grid (0.40 T to 2.20 T in 0.05 T steps)
//! - Clamped piecewise-linear interpolation over those tables
//!
//! The tables are static data; every lookup is a pure function and may be
//! shared freely between concurrent design runs.
//!
//! # Example
//!
//! ```
//! use pm_steel::{SteelGrade, field_strength, specific_loss};
//!
//! let h = field_strength(1.5, SteelGrade::Dw315_50);
//! let p = specific_loss(1.5, SteelGrade::Dw315_50);
//! assert_eq!(h, 1250.0);
//! assert_eq!(p, 35.7);
//! ```

pub mod error;
pub mod grade;
pub mod lookup;
pub mod tables;

pub use error::{SteelError, SteelResult};
pub use grade::SteelGrade;
pub use lookup::{SteelCurve, field_strength, interpolate_clamped, specific_loss};
pub use tables::{B_GRID, GRID_LEN};
