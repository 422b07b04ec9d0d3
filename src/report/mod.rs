//! Report selection, decoding and rendering.

mod dispatch;
pub mod mappers;
mod render;
mod types;

pub use dispatch::run_report;
pub use types::{DateRange, Granularity, Report};

#[cfg(test)]
mod tests;
