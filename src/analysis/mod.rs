//! # 体积数据分析模块
//!
//! 提供 cube 网格的统计汇总和等值面阈值计算。
//!
//! ## 子模块
//! - `stats`: 数值统计与网格几何信息
//! - `isovalue`: 按覆盖百分比求等值面阈值
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/cube.rs`

pub mod isovalue;
pub mod stats;

pub use isovalue::{IsoValueCalculator, IsoValueReport, DEFAULT_COVERAGE_PERCENT};
pub use stats::CubeStats;
