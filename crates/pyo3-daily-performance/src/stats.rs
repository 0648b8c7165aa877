use crate::config::PerformanceConfig;
use crate::drawdown::{Curves, DrawdownStats, NewHighStats};
use crate::errors::PerfResult;
use crate::models::performance_stats::DailyPerformance;
use crate::utils::validate_returns;

// 总体均值与标准差（除以 n）
fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    // 常数序列的均值有舍入误差，方差需直接置零
    if values.iter().all(|&x| x == values[0]) {
        (mean, 0.0)
    } else {
        (mean, variance.sqrt())
    }
}

/// 收益与波动类指标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStats {
    pub absolute_return: f64,
    pub mean: f64,
    pub std: f64,
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub downside_volatility: f64,
    pub sharpe: f64,
}

impl ReturnStats {
    pub fn from_returns(returns: &[f64], yearly_days: usize) -> Self {
        let yearly_days = yearly_days as f64;
        let absolute_return: f64 = returns.iter().sum();
        let (mean, std) = mean_std(returns);

        let downside_returns: Vec<f64> = returns.iter().copied().filter(|&x| x < 0.0).collect();
        let (_, downside_std) = mean_std(&downside_returns);

        let sharpe = if std > 0.0 {
            mean / std * yearly_days.sqrt()
        } else {
            0.0
        };

        ReturnStats {
            absolute_return,
            mean,
            std,
            annualized_return: mean * yearly_days,
            annualized_volatility: std * yearly_days.sqrt(),
            downside_volatility: downside_std * yearly_days.sqrt(),
            sharpe,
        }
    }
}

/// 胜负类指标，收益为 0 的日子计入盈利
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WinLossStats {
    pub win_rate: f64,
    pub avg_win: f64,
    /// 平均亏损的绝对值
    pub avg_loss: f64,
    pub profit_loss_ratio: f64,
    pub win_expectation: f64,
    pub non_zero_coverage: f64,
}

impl WinLossStats {
    pub fn from_returns(returns: &[f64]) -> Self {
        if returns.is_empty() {
            return WinLossStats::default();
        }
        let n = returns.len() as f64;

        // 计算盈利/亏损
        let (win_returns, loss_returns): (Vec<f64>, Vec<f64>) =
            returns.iter().partition(|&&x| x >= 0.0);

        let win_rate = win_returns.len() as f64 / n;
        let avg_win = if win_returns.is_empty() {
            0.0
        } else {
            win_returns.iter().sum::<f64>() / win_returns.len() as f64
        };
        let avg_loss = if loss_returns.is_empty() {
            0.0
        } else {
            (loss_returns.iter().sum::<f64>() / loss_returns.len() as f64).abs()
        };

        let profit_loss_ratio = if avg_loss > 0.0 { avg_win / avg_loss } else { 0.0 };
        let win_expectation = win_rate * profit_loss_ratio - (1.0 - win_rate);

        let non_zero_count = returns.iter().filter(|&&x| x != 0.0).count() as f64;

        WinLossStats {
            win_rate,
            avg_win,
            avg_loss,
            profit_loss_ratio,
            win_expectation,
            non_zero_coverage: non_zero_count / n,
        }
    }
}

/// 采用单利计算日收益数据的各项指标，`yearly_days` 缺省为 252
pub fn daily_performance(
    returns: &[f64],
    yearly_days: Option<i64>,
) -> PerfResult<DailyPerformance> {
    let config = match yearly_days {
        Some(days) => PerformanceConfig::default().with_yearly_days(days)?,
        None => PerformanceConfig::default(),
    };
    daily_performance_with(returns, &config)
}

pub fn daily_performance_with(
    returns: &[f64],
    config: &PerformanceConfig,
) -> PerfResult<DailyPerformance> {
    validate_returns(returns)?;

    let curves = Curves::build(returns);
    let ret = ReturnStats::from_returns(returns, config.yearly_days);
    let drawdown =
        DrawdownStats::from_curves(&curves, ret.annualized_return, ret.annualized_volatility);
    let win_loss = WinLossStats::from_returns(returns);
    let break_even_win_rate = config.break_even.solver().solve(returns);
    let new_high = NewHighStats::from_curves(&curves);

    Ok(DailyPerformance {
        absolute_return: ret.absolute_return,
        annualized_return: ret.annualized_return,
        annualized_volatility: ret.annualized_volatility,
        downside_volatility: ret.downside_volatility,
        sharpe: ret.sharpe,
        max_drawdown: drawdown.max_drawdown,
        calmar: drawdown.calmar,
        drawdown_risk: drawdown.drawdown_risk,
        win_rate: win_loss.win_rate,
        avg_win: win_loss.avg_win,
        avg_loss: win_loss.avg_loss,
        profit_loss_ratio: win_loss.profit_loss_ratio,
        win_expectation: win_loss.win_expectation,
        non_zero_coverage: win_loss.non_zero_coverage,
        break_even_win_rate,
        new_high_interval: new_high.interval,
        new_high_ratio: new_high.ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BreakEvenMethod;
    use crate::errors::PerfError;
    use approx::assert_abs_diff_eq;

    const SAMPLE: [f64; 10] = [0.01, 0.02, -0.01, 0.03, 0.02, -0.02, 0.01, -0.01, 0.02, 0.01];

    #[test]
    fn test_sample_series() {
        let perf = daily_performance(&SAMPLE, Some(252)).unwrap();
        assert_abs_diff_eq!(perf.absolute_return, 0.08, epsilon = 1e-12);
        assert_abs_diff_eq!(perf.annualized_return, 2.016, epsilon = 1e-9);
        assert_abs_diff_eq!(perf.max_drawdown, 0.02, epsilon = 1e-12);
        assert_abs_diff_eq!(perf.calmar, 100.8, epsilon = 1e-6);
        assert_abs_diff_eq!(perf.win_rate, 0.7);
        assert_abs_diff_eq!(perf.avg_win, 0.12 / 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(perf.avg_loss, 0.04 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(perf.profit_loss_ratio, 9.0 / 7.0, epsilon = 1e-9);
        assert_abs_diff_eq!(perf.win_expectation, 0.6, epsilon = 1e-9);
        assert_abs_diff_eq!(perf.non_zero_coverage, 1.0);
        let expected_sharpe = 0.008 / 236e-6_f64.sqrt() * 252f64.sqrt();
        assert_abs_diff_eq!(perf.sharpe, expected_sharpe, epsilon = 1e-6);
        assert!((perf.sharpe - 8.27).abs() < 0.01);
        assert_abs_diff_eq!(
            perf.annualized_volatility,
            236e-6_f64.sqrt() * 252f64.sqrt(),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(perf.drawdown_risk, perf.max_drawdown / perf.annualized_volatility);
        assert_abs_diff_eq!(perf.break_even_win_rate, 7.0 / 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_default_yearly_days() {
        let a = daily_performance(&SAMPLE, None).unwrap();
        let b = daily_performance(&SAMPLE, Some(252)).unwrap();
        assert_eq!(a, b);

        let c = daily_performance(&SAMPLE, Some(365)).unwrap();
        assert_abs_diff_eq!(c.annualized_return, 0.008 * 365.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(daily_performance(&[], None), Err(PerfError::InvalidInput(_))));
        assert!(matches!(
            daily_performance(&[0.01, f64::NAN], None),
            Err(PerfError::InvalidInput(_))
        ));
        assert!(matches!(
            daily_performance(&SAMPLE, Some(0)),
            Err(PerfError::InvalidConfig(_))
        ));
        assert!(matches!(
            daily_performance(&SAMPLE, Some(-5)),
            Err(PerfError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_single_value() {
        let perf = daily_performance(&[0.015], None).unwrap();
        assert_eq!(perf.absolute_return, 0.015);
        assert_eq!(perf.sharpe, 0.0);
        assert_eq!(perf.annualized_volatility, 0.0);
        assert_eq!(perf.downside_volatility, 0.0);
        assert_eq!(perf.max_drawdown, 0.0);
        assert_eq!(perf.calmar, 0.0);
        assert_eq!(perf.win_rate, 1.0);
        assert_eq!(perf.new_high_interval, 0);
        assert_eq!(perf.new_high_ratio, 1.0);
    }

    #[test]
    fn test_constant_series_has_no_volatility() {
        let perf = daily_performance(&[0.01; 30], None).unwrap();
        assert_eq!(perf.annualized_volatility, 0.0);
        assert_eq!(perf.sharpe, 0.0);
        assert_eq!(perf.drawdown_risk, 0.0);
        assert_eq!(perf.profit_loss_ratio, 0.0);
    }

    #[test]
    fn test_tiny_spread_keeps_volatility() {
        let returns = [0.01, 0.01 + 1e-12, 0.01, 0.01 + 1e-12];
        let ret = ReturnStats::from_returns(&returns, 252);
        assert!(ret.std > 0.0);
        assert_abs_diff_eq!(ret.std, 5e-13, epsilon = 1e-15);
        assert!(ret.annualized_volatility > 0.0);
        assert!(ret.sharpe.is_finite() && ret.sharpe > 0.0);
    }

    #[test]
    fn test_all_zero_series() {
        let perf = daily_performance(&[0.0; 5], None).unwrap();
        assert_eq!(perf.absolute_return, 0.0);
        assert_eq!(perf.sharpe, 0.0);
        assert_eq!(perf.max_drawdown, 0.0);
        assert_eq!(perf.win_rate, 1.0);
        assert_eq!(perf.non_zero_coverage, 0.0);
        assert_eq!(perf.break_even_win_rate, 0.0);
        assert_eq!(perf.new_high_interval, 4);
        assert_abs_diff_eq!(perf.new_high_ratio, 0.2);
    }

    #[test]
    fn test_all_negative_series() {
        let returns = [-0.01, -0.02, -0.005, -0.01];
        let perf = daily_performance(&returns, None).unwrap();
        assert_eq!(perf.win_rate, 0.0);
        assert_eq!(perf.avg_win, 0.0);
        assert_eq!(perf.profit_loss_ratio, 0.0);
        assert_abs_diff_eq!(perf.win_expectation, -1.0);
        assert_abs_diff_eq!(perf.new_high_ratio, 0.25);
        assert_eq!(perf.new_high_interval, 3);
        assert_eq!(perf.break_even_win_rate, 1.0);
        assert!(perf.downside_volatility > 0.0);
        assert!(perf.calmar < 0.0);
    }

    #[test]
    fn test_all_winning_series_uses_zero_ratio() {
        let wl = WinLossStats::from_returns(&[0.01, 0.02, 0.03]);
        assert_eq!(wl.win_rate, 1.0);
        assert_eq!(wl.avg_loss, 0.0);
        assert_eq!(wl.profit_loss_ratio, 0.0);
        assert_eq!(wl.win_expectation, 0.0);
    }

    #[test]
    fn test_zero_returns_count_as_wins_but_not_coverage() {
        let wl = WinLossStats::from_returns(&[0.0, 0.02, -0.01, 0.0]);
        assert_abs_diff_eq!(wl.win_rate, 0.75);
        assert_abs_diff_eq!(wl.avg_win, 0.02 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wl.avg_loss, 0.01);
        assert_abs_diff_eq!(wl.non_zero_coverage, 0.5);
    }

    #[test]
    fn test_downside_volatility_uses_losses_only() {
        let ret = ReturnStats::from_returns(&[0.05, -0.01, -0.03, 0.02], 252);
        assert_abs_diff_eq!(ret.downside_volatility, 0.01 * 252f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_break_even_method_is_configurable() {
        let config = PerformanceConfig::default().with_break_even(BreakEvenMethod::SortedCumsum);
        let perf = daily_performance_with(&SAMPLE, &config).unwrap();
        // 升序: -0.02, -0.01, -0.01, 0.01, 0.01, 0.01, 0.02 -> 累计于第 7 个首次非负
        assert_abs_diff_eq!(perf.break_even_win_rate, 0.7);
    }
}
