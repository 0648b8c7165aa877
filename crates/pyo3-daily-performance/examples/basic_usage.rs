use daily_performance_pyo3::{
    break_even_win_rate, daily_performance, rolling_frame, BreakEvenMethod, PerformanceConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let returns = [0.01, 0.02, -0.01, 0.03, 0.02, -0.02, 0.01, -0.01, 0.02, 0.01];

    let perf = daily_performance(&returns, Some(252))?;
    for (key, value) in perf.rounded(4).iter() {
        println!("{:<8} {:<22} {}", key.label(), key.as_str(), value);
    }
    println!("json: {}", perf.to_json()?);

    println!("盈亏平衡点(闭式解): {:.4}", break_even_win_rate(&returns)?);

    let config = PerformanceConfig::default()
        .with_break_even(BreakEvenMethod::SortedCumsum)
        .with_n_jobs(2);
    let df = rolling_frame(&returns, 5, &config)?;
    println!("滚动窗口绩效:\n{}", df);

    Ok(())
}
