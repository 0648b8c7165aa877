//! 累计收益曲线、回撤与新高统计。
//!
//! 全部采用单利口径：累计收益为日收益的逐日求和，而非连乘。

/// 累计收益曲线与其历史高点曲线，长度与原始收益序列一致
#[derive(Debug, Clone, PartialEq)]
pub struct Curves {
    pub cumulative: Vec<f64>,
    pub high_water: Vec<f64>,
}

impl Curves {
    pub fn build(returns: &[f64]) -> Self {
        let mut cumulative = Vec::with_capacity(returns.len());
        let mut high_water = Vec::with_capacity(returns.len());

        let mut current_cum = 0.0;
        let mut peak = f64::NEG_INFINITY;
        for &ret in returns {
            current_cum += ret;
            peak = peak.max(current_cum);
            cumulative.push(current_cum);
            high_water.push(peak);
        }

        Curves { cumulative, high_water }
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// 回撤序列：历史高点减去当前累计收益，恒为非负
    pub fn drawdowns(&self) -> Vec<f64> {
        self.high_water
            .iter()
            .zip(&self.cumulative)
            .map(|(high, cum)| high - cum)
            .collect()
    }

    /// 第 i 期是否创出新高
    fn is_new_high(&self, i: usize) -> bool {
        self.cumulative[i] == self.high_water[i]
            && (i == 0 || self.high_water[i] > self.high_water[i - 1])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawdownStats {
    pub max_drawdown: f64,
    pub calmar: f64,
    pub drawdown_risk: f64,
}

impl DrawdownStats {
    pub fn from_curves(
        curves: &Curves,
        annualized_return: f64,
        annualized_volatility: f64,
    ) -> Self {
        let max_drawdown = curves.drawdowns().into_iter().fold(0.0, f64::max);

        let calmar = if max_drawdown > 0.0 {
            annualized_return / max_drawdown
        } else {
            0.0
        };
        let drawdown_risk = if annualized_volatility > 0.0 {
            max_drawdown / annualized_volatility
        } else {
            0.0
        };

        DrawdownStats { max_drawdown, calmar, drawdown_risk }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewHighStats {
    /// 最长连续未创新高的期数
    pub interval: usize,
    pub ratio: f64,
}

impl NewHighStats {
    pub fn from_curves(curves: &Curves) -> Self {
        if curves.is_empty() {
            return NewHighStats { interval: 0, ratio: 0.0 };
        }

        let mut new_high_count = 0usize;
        let mut longest = 0usize;
        let mut current = 0usize;

        for i in 0..curves.len() {
            if curves.is_new_high(i) {
                new_high_count += 1;
                current = 0;
            } else {
                current += 1;
                longest = longest.max(current);
            }
        }

        NewHighStats {
            interval: longest,
            ratio: new_high_count as f64 / curves.len() as f64,
        }
    }
}
