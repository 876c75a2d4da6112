#![forbid(unsafe_code)]

pub mod kpi;
pub mod model;
pub mod time;

pub use kpi::{Kpis, compute_kpis};
pub use time::Clock;
