use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::PerfResult;
use crate::utils::RoundTo;

/// 日收益绩效指标
///
/// 除 `new_high_interval` 外均为浮点数；分母为零等退化情形统一取 0。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "python", pyo3::pyclass(get_all, frozen))]
pub struct DailyPerformance {
    /// 绝对收益（日收益之和）
    #[serde(alias = "绝对收益")]
    pub absolute_return: f64,

    /// 年化收益：日均收益 × 年化天数
    #[serde(alias = "年化")]
    pub annualized_return: f64,

    #[serde(alias = "年化波动率")]
    pub annualized_volatility: f64,

    /// 亏损日收益的总体标准差，年化
    #[serde(alias = "下行波动率")]
    pub downside_volatility: f64,

    #[serde(alias = "夏普")]
    pub sharpe: f64,

    /// 最大回撤（非负）
    #[serde(alias = "最大回撤")]
    pub max_drawdown: f64,

    /// 卡玛比率（年化收益/最大回撤）
    #[serde(alias = "卡玛")]
    pub calmar: f64,

    /// 回撤风险：最大回撤 / 年化波动率
    #[serde(alias = "回撤风险")]
    pub drawdown_risk: f64,

    /// 日胜率（收益 >= 0 的天数占比）
    #[serde(alias = "日胜率")]
    pub win_rate: f64,

    #[serde(alias = "平均盈利")]
    pub avg_win: f64,

    /// 平均亏损（取绝对值）
    #[serde(alias = "平均亏损")]
    pub avg_loss: f64,

    /// 日盈亏比（平均盈利/平均亏损），没有亏损日时为 0
    #[serde(alias = "日盈亏比")]
    pub profit_loss_ratio: f64,

    /// 日赢面：胜率 × 盈亏比 - (1 - 胜率)
    ///
    /// 没有亏损日时盈亏比取 0，因此全部盈利的序列日赢面同样为 0。
    #[serde(alias = "日赢面")]
    pub win_expectation: f64,

    #[serde(alias = "非零覆盖")]
    pub non_zero_coverage: f64,

    /// 盈亏平衡点
    #[serde(alias = "盈亏平衡点")]
    pub break_even_win_rate: f64,

    /// 新高间隔（期数）
    #[serde(alias = "新高间隔")]
    pub new_high_interval: usize,

    #[serde(alias = "新高占比")]
    pub new_high_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    AbsoluteReturn,
    AnnualizedReturn,
    AnnualizedVolatility,
    DownsideVolatility,
    Sharpe,
    MaxDrawdown,
    Calmar,
    DrawdownRisk,
    WinRate,
    AvgWin,
    AvgLoss,
    ProfitLossRatio,
    WinExpectation,
    NonZeroCoverage,
    BreakEvenWinRate,
    NewHighInterval,
    NewHighRatio,
}

impl MetricKey {
    pub const ALL: [MetricKey; 17] = [
        MetricKey::AbsoluteReturn,
        MetricKey::AnnualizedReturn,
        MetricKey::AnnualizedVolatility,
        MetricKey::DownsideVolatility,
        MetricKey::Sharpe,
        MetricKey::MaxDrawdown,
        MetricKey::Calmar,
        MetricKey::DrawdownRisk,
        MetricKey::WinRate,
        MetricKey::AvgWin,
        MetricKey::AvgLoss,
        MetricKey::ProfitLossRatio,
        MetricKey::WinExpectation,
        MetricKey::NonZeroCoverage,
        MetricKey::BreakEvenWinRate,
        MetricKey::NewHighInterval,
        MetricKey::NewHighRatio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::AbsoluteReturn => "absolute_return",
            MetricKey::AnnualizedReturn => "annualized_return",
            MetricKey::AnnualizedVolatility => "annualized_volatility",
            MetricKey::DownsideVolatility => "downside_volatility",
            MetricKey::Sharpe => "sharpe",
            MetricKey::MaxDrawdown => "max_drawdown",
            MetricKey::Calmar => "calmar",
            MetricKey::DrawdownRisk => "drawdown_risk",
            MetricKey::WinRate => "win_rate",
            MetricKey::AvgWin => "avg_win",
            MetricKey::AvgLoss => "avg_loss",
            MetricKey::ProfitLossRatio => "profit_loss_ratio",
            MetricKey::WinExpectation => "win_expectation",
            MetricKey::NonZeroCoverage => "non_zero_coverage",
            MetricKey::BreakEvenWinRate => "break_even_win_rate",
            MetricKey::NewHighInterval => "new_high_interval",
            MetricKey::NewHighRatio => "new_high_ratio",
        }
    }

    /// 报表展示用的中文名称
    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::AbsoluteReturn => "绝对收益",
            MetricKey::AnnualizedReturn => "年化",
            MetricKey::AnnualizedVolatility => "年化波动率",
            MetricKey::DownsideVolatility => "下行波动率",
            MetricKey::Sharpe => "夏普",
            MetricKey::MaxDrawdown => "最大回撤",
            MetricKey::Calmar => "卡玛",
            MetricKey::DrawdownRisk => "回撤风险",
            MetricKey::WinRate => "日胜率",
            MetricKey::AvgWin => "平均盈利",
            MetricKey::AvgLoss => "平均亏损",
            MetricKey::ProfitLossRatio => "日盈亏比",
            MetricKey::WinExpectation => "日赢面",
            MetricKey::NonZeroCoverage => "非零覆盖",
            MetricKey::BreakEvenWinRate => "盈亏平衡点",
            MetricKey::NewHighInterval => "新高间隔",
            MetricKey::NewHighRatio => "新高占比",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DailyPerformance {
    pub fn get(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::AbsoluteReturn => self.absolute_return,
            MetricKey::AnnualizedReturn => self.annualized_return,
            MetricKey::AnnualizedVolatility => self.annualized_volatility,
            MetricKey::DownsideVolatility => self.downside_volatility,
            MetricKey::Sharpe => self.sharpe,
            MetricKey::MaxDrawdown => self.max_drawdown,
            MetricKey::Calmar => self.calmar,
            MetricKey::DrawdownRisk => self.drawdown_risk,
            MetricKey::WinRate => self.win_rate,
            MetricKey::AvgWin => self.avg_win,
            MetricKey::AvgLoss => self.avg_loss,
            MetricKey::ProfitLossRatio => self.profit_loss_ratio,
            MetricKey::WinExpectation => self.win_expectation,
            MetricKey::NonZeroCoverage => self.non_zero_coverage,
            MetricKey::BreakEvenWinRate => self.break_even_win_rate,
            MetricKey::NewHighInterval => self.new_high_interval as f64,
            MetricKey::NewHighRatio => self.new_high_ratio,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, f64)> + '_ {
        MetricKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    pub fn to_map(&self) -> HashMap<String, f64> {
        self.iter()
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect()
    }

    pub fn to_labeled_map(&self) -> HashMap<String, f64> {
        self.iter()
            .map(|(key, value)| (key.label().to_string(), value))
            .collect()
    }

    pub fn to_json(&self) -> PerfResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// 按位数四舍五入后的副本，仅用于展示
    pub fn rounded(&self, digits: u32) -> Self {
        DailyPerformance {
            absolute_return: self.absolute_return.round_to(digits),
            annualized_return: self.annualized_return.round_to(digits),
            annualized_volatility: self.annualized_volatility.round_to(digits),
            downside_volatility: self.downside_volatility.round_to(digits),
            sharpe: self.sharpe.round_to(digits),
            max_drawdown: self.max_drawdown.round_to(digits),
            calmar: self.calmar.round_to(digits),
            drawdown_risk: self.drawdown_risk.round_to(digits),
            win_rate: self.win_rate.round_to(digits),
            avg_win: self.avg_win.round_to(digits),
            avg_loss: self.avg_loss.round_to(digits),
            profit_loss_ratio: self.profit_loss_ratio.round_to(digits),
            win_expectation: self.win_expectation.round_to(digits),
            non_zero_coverage: self.non_zero_coverage.round_to(digits),
            break_even_win_rate: self.break_even_win_rate.round_to(digits),
            new_high_interval: self.new_high_interval,
            new_high_ratio: self.new_high_ratio.round_to(digits),
        }
    }
}
