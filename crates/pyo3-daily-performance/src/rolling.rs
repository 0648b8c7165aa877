use polars::prelude::{Column, DataFrame, NamedFrom, PlSmallStr, Series};
use rayon::prelude::*;

use crate::config::PerformanceConfig;
use crate::errors::{ErrorContext, PerfResult};
use crate::models::performance_stats::{DailyPerformance, MetricKey};
use crate::perf_err;
use crate::stats::daily_performance_with;
use crate::utils::validate_returns;

/// 滑动窗口绩效
///
/// 对每个长度为 `window` 的窗口独立调用 [`daily_performance_with`]
#[derive(Debug, Clone)]
pub struct RollingPerformance<'a> {
    config: &'a PerformanceConfig,
    returns: &'a [f64],
    window: usize,
}

impl<'a> RollingPerformance<'a> {
    pub fn new(
        returns: &'a [f64],
        window: usize,
        config: &'a PerformanceConfig,
    ) -> PerfResult<Self> {
        validate_returns(returns)?;
        if window == 0 {
            return Err(perf_err!(InvalidConfig, "window must be positive"));
        }
        if window > returns.len() {
            return Err(perf_err!(
                InvalidInput,
                "window {} exceeds series length {}",
                window,
                returns.len()
            ));
        }
        Ok(RollingPerformance { config, returns, window })
    }

    pub fn window_count(&self) -> usize {
        self.returns.len() - self.window + 1
    }

    pub fn run(&self) -> PerfResult<Vec<DailyPerformance>> {
        let n_jobs = self.config.n_jobs;
        tracing::debug!(
            windows = self.window_count(),
            window = self.window,
            n_jobs,
            "rolling daily performance"
        );

        let results = if n_jobs > 1 {
            // 多线程处理
            self.run_parallel()
        } else {
            // 单线程处理
            self.run_sequential()
        };
        results.context("rolling daily performance")
    }

    fn run_sequential(&self) -> PerfResult<Vec<DailyPerformance>> {
        self.returns
            .windows(self.window)
            .map(|w| daily_performance_with(w, self.config))
            .collect()
    }

    fn run_parallel(&self) -> PerfResult<Vec<DailyPerformance>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.n_jobs)
            .build()?;
        pool.install(|| {
            self.returns
                .par_windows(self.window)
                .map(|w| daily_performance_with(w, self.config))
                .collect()
        })
    }

    /// 结果转为 DataFrame，`window_end` 为开区间
    pub fn to_dataframe(&self) -> PerfResult<DataFrame> {
        let results = self.run()?;
        let starts: Vec<u64> = (0..results.len() as u64).collect();
        let ends: Vec<u64> = starts.iter().map(|s| s + self.window as u64).collect();

        let mut columns = Vec::with_capacity(MetricKey::ALL.len() + 2);
        columns.push(Column::from(Series::new(PlSmallStr::from("window_start"), starts)));
        columns.push(Column::from(Series::new(PlSmallStr::from("window_end"), ends)));
        for key in MetricKey::ALL {
            let name = PlSmallStr::from(key.as_str());
            let series = match key {
                MetricKey::NewHighInterval => Series::new(
                    name,
                    results.iter().map(|r| r.new_high_interval as u64).collect::<Vec<u64>>(),
                ),
                _ => Series::new(
                    name,
                    results.iter().map(|r| r.get(key)).collect::<Vec<f64>>(),
                ),
            };
            columns.push(Column::from(series));
        }

        Ok(DataFrame::new(columns)?)
    }
}

pub fn rolling_daily_performance(
    returns: &[f64],
    window: usize,
    config: &PerformanceConfig,
) -> PerfResult<Vec<DailyPerformance>> {
    RollingPerformance::new(returns, window, config)?.run()
}

pub fn rolling_frame(
    returns: &[f64],
    window: usize,
    config: &PerformanceConfig,
) -> PerfResult<DataFrame> {
    RollingPerformance::new(returns, window, config)?.to_dataframe()
}
