//! # auditmon-interest
//!
//! Degree of interest: a score per granule that rises each time one of its
//! artifacts is observed and decays while other granules are observed.

mod model;
mod table;

pub use model::{InterestModel, InterestParams};
pub use table::{InterestEntry, InterestTable};
