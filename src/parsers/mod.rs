//! # 解析器模块
//!
//! 提供体积数据文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: cube

pub mod cube;

pub use cube::parse_cube_file;
