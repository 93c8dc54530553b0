//! Analytic SQL generation: binning schemes, histogram and grid binning
//! expressions, M4 downsampling, line density rasterization, scale
//! transforms, and filter pushdown.

mod bin_step;
mod filter;
mod grid;
mod histogram;
mod line_density;
mod m4;
mod scales;
mod time_interval;

pub use bin_step::{bin_spec, bin_step, BinOptions, BinSchema};
pub use filter::{filter_pushdown, filter_query};
pub use grid::{bin_1d, bin_2d, bin_linear_1d, bin_linear_2d};
pub use histogram::{bin_date, bin_histogram};
pub use line_density::line_density;
pub use m4::m4;
pub use scales::ScaleTransform;
pub use time_interval::{time_interval, TimeInterval, TimeUnit};
