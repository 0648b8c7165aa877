use polars::error::PolarsError;
use rayon::ThreadPoolBuildError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerfError {
    /// 收益序列非法：为空、含非有限值、窗口超长等
    #[error("输入数据非法: {0}")]
    InvalidInput(String),

    /// 参数配置非法：年化天数、窗口长度、盈亏平衡算法等
    #[error("配置参数非法: {0}")]
    InvalidConfig(String),

    /// Polars数据处理错误
    #[error("Polars错误: {0}")]
    Polars(#[from] PolarsError),

    // Rayon 并行处理错误
    #[error("Rayon 错误: {0}")]
    Rayon(#[from] ThreadPoolBuildError),

    /// 序列化/反序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PerfError {
    fn from(err: serde_json::Error) -> Self {
        PerfError::Serialization(err.to_string())
    }
}

// 实现 PyO3 错误转换
#[cfg(feature = "python")]
impl From<PerfError> for pyo3::PyErr {
    fn from(err: PerfError) -> pyo3::PyErr {
        match err {
            PerfError::InvalidInput(msg) | PerfError::InvalidConfig(msg) => {
                pyo3::exceptions::PyValueError::new_err(msg)
            }
            _ => pyo3::exceptions::PyRuntimeError::new_err(err.to_string()),
        }
    }
}

// 扩展 Result 类型
pub type PerfResult<T> = Result<T, PerfError>;

/// 构造带格式化消息的错误，例如 `perf_err!(InvalidInput, "第 {} 个值非法", i)`
#[macro_export]
macro_rules! perf_err {
    ($variant:ident, $($arg:tt)*) => {
        $crate::errors::PerfError::$variant(format!($($arg)*))
    };
}

/// 为错误添加上下文
pub trait ErrorContext<T, E> {
    fn context(self, context: &str) -> PerfResult<T>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: Into<PerfError>,
{
    fn context(self, context: &str) -> PerfResult<T> {
        self.map_err(|e| {
            let base_err: PerfError = e.into();
            match base_err {
                PerfError::InvalidInput(msg) => {
                    PerfError::InvalidInput(format!("{}: {}", context, msg))
                }
                PerfError::InvalidConfig(msg) => {
                    PerfError::InvalidConfig(format!("{}: {}", context, msg))
                }
                PerfError::Serialization(msg) => {
                    PerfError::Serialization(format!("{}: {}", context, msg))
                }
                PerfError::Polars(e) => PerfError::Polars(e),
                PerfError::Rayon(e) => PerfError::Rayon(e),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_builds_variant() {
        let err = perf_err!(InvalidConfig, "yearly_days 必须为正数, 当前 {}", 0);
        assert!(matches!(err, PerfError::InvalidConfig(ref m) if m.contains("当前 0")));
    }

    #[test]
    fn test_context_prefixes_message() {
        let res: Result<(), PerfError> = Err(perf_err!(InvalidInput, "收益序列为空"));
        let err = res.context("rolling").unwrap_err();
        assert_eq!(err.to_string(), "输入数据非法: rolling: 收益序列为空");
    }

    #[test]
    fn test_serde_error_maps_to_serialization() {
        let err: PerfError = serde_json::from_str::<f64>("not a number").unwrap_err().into();
        assert!(matches!(err, PerfError::Serialization(_)));
    }
}
