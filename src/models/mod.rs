//! # 数据模型模块
//!
//! 定义 cube 文件的内存表示：头信息、原子列表和体素网格。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `analysis/` 和 `commands/` 使用
//! - 子模块: cube

pub mod cube;

pub use cube::{Axis, CubeAtom, CubeFile, LengthUnit, VoxelGrid};
