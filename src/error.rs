//! # 统一错误处理模块
//!
//! 定义 cubetool 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// cubetool 统一错误类型
#[derive(Error, Debug)]
pub enum CubeError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse cube file: {path} (line {line})\nReason: {reason}")]
    ParseError {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Inconsistent number of voxel values in {path} (expected {expected}, found {found})")]
    VoxelCountMismatch {
        path: String,
        expected: usize,
        found: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CubeError {
    /// 是否为文件内容格式错误
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            CubeError::ParseError { .. } | CubeError::VoxelCountMismatch { .. }
        )
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, CubeError>;
