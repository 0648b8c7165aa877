use crate::config::BreakEvenMethod;
use crate::errors::PerfResult;
use crate::stats::WinLossStats;
use crate::utils::validate_returns;

/// 盈亏平衡胜率的求解器
pub trait BreakEvenSolver {
    /// `returns` 需已通过校验（非空、全部有限）
    fn solve(&self, returns: &[f64]) -> f64;
}

/// 解 `w * avg_win - (1 - w) * avg_loss = 0`，得 `w = avg_loss / (avg_win + avg_loss)`
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedFormBreakEven;

impl BreakEvenSolver for ClosedFormBreakEven {
    fn solve(&self, returns: &[f64]) -> f64 {
        let win_loss = WinLossStats::from_returns(returns);
        let denominator = win_loss.avg_win + win_loss.avg_loss;
        if denominator > 0.0 {
            win_loss.avg_loss / denominator
        } else {
            0.0
        }
    }
}

/// 经验算法：升序排序后，累计和首次非负时已用掉的样本占比
#[derive(Debug, Clone, Copy, Default)]
pub struct SortedCumsumBreakEven;

impl BreakEvenSolver for SortedCumsumBreakEven {
    fn solve(&self, returns: &[f64]) -> f64 {
        // 空序列或总收益为负，永远无法回本
        if returns.is_empty() || returns.iter().sum::<f64>() < 0.0 {
            return 1.0;
        }

        let mut sorted_seq = returns.to_vec();
        sorted_seq.sort_by(f64::total_cmp);

        let mut cumulative_sum = 0.0;
        let mut break_even_index = sorted_seq.len();
        for (i, &value) in sorted_seq.iter().enumerate() {
            cumulative_sum += value;
            if cumulative_sum >= 0.0 {
                break_even_index = i + 1;
                break;
            }
        }

        break_even_index as f64 / sorted_seq.len() as f64
    }
}

/// 独立调用入口，默认使用闭式解
pub fn break_even_win_rate(returns: &[f64]) -> PerfResult<f64> {
    break_even_win_rate_with(returns, BreakEvenMethod::default())
}

pub fn break_even_win_rate_with(returns: &[f64], method: BreakEvenMethod) -> PerfResult<f64> {
    validate_returns(returns)?;
    Ok(method.solver().solve(returns))
}
