use polars::prelude::*;

use crate::errors::PerfResult;
use crate::perf_err;

/// 按小数位数四舍五入（远离零）
pub trait RoundTo {
    fn round_to(self, digits: u32) -> Self;
}

impl RoundTo for f64 {
    fn round_to(self, digits: u32) -> Self {
        let multiplier = 10_f64.powi(digits as i32);
        (self * multiplier).round() / multiplier
    }
}

/// 检查收益序列：非空且全部为有限值
pub fn validate_returns(returns: &[f64]) -> PerfResult<()> {
    if returns.is_empty() {
        return Err(perf_err!(InvalidInput, "return series is empty"));
    }
    if let Some((i, value)) = returns.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(perf_err!(
            InvalidInput,
            "return series contains non-finite value {} at index {}",
            value,
            i
        ));
    }
    Ok(())
}

/// 从 DataFrame 中取出收益列
pub fn returns_from_frame(df: &DataFrame, column: &str) -> PerfResult<Vec<f64>> {
    let series = df
        .column(column)
        .map_err(|_| perf_err!(InvalidInput, "DataFrame is missing required column: {}", column))?;

    if df.height() == 0 {
        return Err(perf_err!(InvalidInput, "DataFrame is empty"));
    }
    if series.null_count() > 0 {
        return Err(perf_err!(
            InvalidInput,
            "column {} contains {} null values",
            column,
            series.null_count()
        ));
    }
    if !series.dtype().is_primitive_numeric() {
        return Err(perf_err!(
            InvalidInput,
            "column {} must be numeric, got {}",
            column,
            series.dtype()
        ));
    }

    let casted = series.cast(&DataType::Float64)?;
    let returns: Vec<f64> = casted.f64()?.into_no_null_iter().collect();
    tracing::debug!(column, rows = returns.len(), "returns extracted from frame");
    Ok(returns)
}
