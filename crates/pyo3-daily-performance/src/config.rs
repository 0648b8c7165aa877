use std::fmt;
use std::str::FromStr;

use crate::break_even::{BreakEvenSolver, ClosedFormBreakEven, SortedCumsumBreakEven};
use crate::errors::{PerfError, PerfResult};
use crate::perf_err;

/// 默认年化交易日数
pub const DEFAULT_YEARLY_DAYS: usize = 252;

/// 盈亏平衡点的求解方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakEvenMethod {
    /// 由平均盈利、平均亏损直接求解
    #[default]
    ClosedForm,
    /// 对收益升序排序后，寻找累计和首次非负的位置
    SortedCumsum,
}

impl BreakEvenMethod {
    pub fn solver(&self) -> &'static dyn BreakEvenSolver {
        match self {
            BreakEvenMethod::ClosedForm => &ClosedFormBreakEven,
            BreakEvenMethod::SortedCumsum => &SortedCumsumBreakEven,
        }
    }
}

impl FromStr for BreakEvenMethod {
    type Err = PerfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "closed_form" => Ok(BreakEvenMethod::ClosedForm),
            "sorted_cumsum" => Ok(BreakEvenMethod::SortedCumsum),
            _ => Err(perf_err!(
                InvalidConfig,
                "Invalid break_even {:?}, must be 'closed_form' or 'sorted_cumsum'",
                s
            )),
        }
    }
}

impl fmt::Display for BreakEvenMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakEvenMethod::ClosedForm => write!(f, "closed_form"),
            BreakEvenMethod::SortedCumsum => write!(f, "sorted_cumsum"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceConfig {
    pub yearly_days: usize,
    pub break_even: BreakEvenMethod,
    pub n_jobs: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        PerformanceConfig {
            yearly_days: DEFAULT_YEARLY_DAYS,
            break_even: BreakEvenMethod::default(),
            n_jobs: 1,
        }
    }
}

impl PerformanceConfig {
    pub fn new(yearly_days: i64, break_even: &str, n_jobs: usize) -> PerfResult<Self> {
        let yearly_days = Self::check_yearly_days(yearly_days)?;
        let break_even = break_even.parse::<BreakEvenMethod>()?;

        Ok(PerformanceConfig {
            yearly_days,
            break_even,
            n_jobs: n_jobs.max(1),
        })
    }

    pub fn with_yearly_days(mut self, yearly_days: i64) -> PerfResult<Self> {
        self.yearly_days = Self::check_yearly_days(yearly_days)?;
        Ok(self)
    }

    pub fn with_break_even(mut self, break_even: BreakEvenMethod) -> Self {
        self.break_even = break_even;
        self
    }

    pub fn with_n_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = n_jobs.max(1);
        self
    }

    fn check_yearly_days(yearly_days: i64) -> PerfResult<usize> {
        if yearly_days <= 0 {
            return Err(perf_err!(
                InvalidConfig,
                "yearly_days must be positive, got {}",
                yearly_days
            ));
        }
        usize::try_from(yearly_days)
            .map_err(|_| perf_err!(InvalidConfig, "yearly_days out of range: {}", yearly_days))
    }
}
