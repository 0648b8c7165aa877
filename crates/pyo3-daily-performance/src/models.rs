pub mod performance_stats;
