pub mod break_even;
pub mod config;
pub mod drawdown;
pub mod errors;
pub mod models;
#[cfg(feature = "python")]
mod python;
pub mod rolling;
pub mod stats;
pub mod utils;

use polars::prelude::DataFrame;

pub use crate::break_even::{break_even_win_rate, break_even_win_rate_with, BreakEvenSolver};
pub use crate::config::{BreakEvenMethod, PerformanceConfig, DEFAULT_YEARLY_DAYS};
pub use crate::errors::{PerfError, PerfResult};
pub use crate::models::performance_stats::{DailyPerformance, MetricKey};
pub use crate::rolling::{rolling_daily_performance, rolling_frame, RollingPerformance};
pub use crate::stats::{daily_performance, daily_performance_with};

/// 取 DataFrame 中的收益列计算绩效
pub fn daily_performance_frame(
    df: &DataFrame,
    column: &str,
    config: &PerformanceConfig,
) -> PerfResult<DailyPerformance> {
    let returns = utils::returns_from_frame(df, column)?;
    daily_performance_with(&returns, config)
}
