//! Conversion orchestration: pairwise frame conversions, Force/Auto
//! policies, batch pipelines, sync and async entry points.

mod converter;
mod worker;

pub use converter::LocationConverter;
