use std::collections::HashMap;

use polars::prelude::DataFrame;
use pyo3::prelude::*;
use pyo3_polars::PyDataFrame;

use crate::break_even::break_even_win_rate_with;
use crate::config::{BreakEvenMethod, PerformanceConfig};
use crate::models::performance_stats::DailyPerformance;
use crate::rolling::rolling_frame;
use crate::stats::daily_performance_with;

#[pymethods]
impl DailyPerformance {
    /// 指标字典，`labels=True` 时使用中文名称
    #[pyo3(signature = (labels=false))]
    fn to_dict(&self, labels: bool) -> HashMap<String, f64> {
        if labels {
            self.to_labeled_map()
        } else {
            self.to_map()
        }
    }

    #[pyo3(name = "to_json")]
    fn py_to_json(&self) -> PyResult<String> {
        Ok(self.to_json()?)
    }

    fn __repr__(&self) -> String {
        format!(
            "DailyPerformance(absolute_return={:.4}, sharpe={:.2}, \
             max_drawdown={:.4}, calmar={:.2})",
            self.absolute_return, self.sharpe, self.max_drawdown, self.calmar
        )
    }
}

#[pyfunction]
#[pyo3(signature = (returns, yearly_days=252, break_even="closed_form", digits=None))]
fn daily_performance(
    returns: Vec<f64>,
    yearly_days: i64,
    break_even: &str,
    digits: Option<u32>,
) -> PyResult<DailyPerformance> {
    let config = PerformanceConfig::new(yearly_days, break_even, 1)?;
    let perf = daily_performance_with(&returns, &config)?;
    Ok(match digits {
        Some(d) => perf.rounded(d),
        None => perf,
    })
}

#[pyfunction]
#[pyo3(name = "daily_performance_frame", signature = (py_df, column, yearly_days=252))]
fn py_daily_performance_frame(
    py_df: PyDataFrame,
    column: &str,
    yearly_days: i64,
) -> PyResult<DailyPerformance> {
    let df: DataFrame = py_df.into();
    let config = PerformanceConfig::default().with_yearly_days(yearly_days)?;
    Ok(crate::daily_performance_frame(&df, column, &config)?)
}

#[pyfunction]
#[pyo3(signature = (returns, window, yearly_days=252, n_jobs=1))]
fn rolling_daily_performance(
    py: Python<'_>,
    returns: Vec<f64>,
    window: usize,
    yearly_days: i64,
    n_jobs: usize,
) -> PyResult<PyDataFrame> {
    let config = PerformanceConfig::default()
        .with_yearly_days(yearly_days)?
        .with_n_jobs(n_jobs);
    let df = py.allow_threads(|| rolling_frame(&returns, window, &config))?;
    Ok(PyDataFrame(df))
}

#[pyfunction]
#[pyo3(signature = (returns, method="closed_form"))]
fn break_even_win_rate(returns: Vec<f64>, method: &str) -> PyResult<f64> {
    let method = method.parse::<BreakEvenMethod>()?;
    Ok(break_even_win_rate_with(&returns, method)?)
}

#[pymodule]
fn daily_performance_pyo3(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<DailyPerformance>()?;
    m.add_function(wrap_pyfunction!(daily_performance, m)?)?;
    m.add_function(wrap_pyfunction!(py_daily_performance_frame, m)?)?;
    m.add_function(wrap_pyfunction!(rolling_daily_performance, m)?)?;
    m.add_function(wrap_pyfunction!(break_even_win_rate, m)?)?;
    Ok(())
}
