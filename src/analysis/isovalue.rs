//! # 等值面阈值计算器
//!
//! 求阈值 t，使所有 |v| >= t 的体素之和至少占全部绝对值之和的给定百分比。
//!
//! ## 算法概述
//! 1. 展平网格并取绝对值
//! 2. 降序排序
//! 3. 累加直到达到目标百分比
//! 4. 达到目标时的体素值即为阈值 (不插值)
//!
//! ## 依赖关系
//! - 被 `commands/isovalue.rs` 调用
//! - 使用 `models/cube.rs`

use crate::error::{CubeError, Result};
use crate::models::CubeFile;
use log::{debug, warn};

/// 未指定百分比时使用的覆盖率
pub const DEFAULT_COVERAGE_PERCENT: f64 = 90.0;

/// 等值面阈值计算结果
#[derive(Debug, Clone)]
pub struct IsoValueReport {
    /// 请求的覆盖百分比
    pub coverage_percent: f64,
    /// 阈值
    pub threshold: f64,
    /// |v| >= 阈值 (按排序顺序计入) 的体素数
    pub enclosed_voxels: usize,
    /// 参与计算的体素总数
    pub total_voxels: usize,
    /// 实际捕获的绝对值之和所占比例 (0-1)
    pub captured_fraction: f64,
    /// 全部绝对值之和
    pub total_abs: f64,
}

/// 等值面阈值计算器
pub struct IsoValueCalculator {
    /// 覆盖百分比 (0, 100]
    coverage_percent: f64,
}

impl IsoValueCalculator {
    /// 创建新的计算器，百分比超出 (0, 100] 时报错
    pub fn new(coverage_percent: f64) -> Result<Self> {
        validate_percent(coverage_percent)?;
        Ok(Self { coverage_percent })
    }

    /// 对 cube 文件的全部体素计算阈值
    pub fn calculate(&self, cube: &CubeFile) -> Result<IsoValueReport> {
        self.calculate_values(cube.voxels.values())
    }

    /// 对任意数值序列计算阈值
    pub fn calculate_values(&self, values: &[f64]) -> Result<IsoValueReport> {
        let mut magnitudes: Vec<f64> = values
            .iter()
            .filter(|v| v.is_finite())
            .map(|v| v.abs())
            .collect();
        let skipped = values.len() - magnitudes.len();
        if skipped > 0 {
            warn!("Ignoring {} non-finite voxel values", skipped);
        }

        // 按绝对值降序
        magnitudes.sort_unstable_by(|a, b| b.total_cmp(a));

        let total: f64 = magnitudes.iter().sum();
        if total <= 0.0 {
            return Err(CubeError::InvalidInput(
                "All voxel values are zero; no isosurface threshold exists".to_string(),
            ));
        }
        let last_nonzero = magnitudes.iter().rposition(|&v| v > 0.0).unwrap_or(0);

        // 100% 直接取最小非零值：累加时极小的尾部值会被舍入吞掉
        let (crossing, captured) = if self.coverage_percent >= 100.0 {
            (last_nonzero, total)
        } else {
            let target = total * (self.coverage_percent / 100.0);
            debug!("Total |v| = {:.6e}, target = {:.6e}", total, target);

            let mut running = 0.0;
            let crossing = magnitudes
                .iter()
                .position(|&v| {
                    running += v;
                    running >= target
                })
                .unwrap_or(last_nonzero);
            (crossing, running)
        };
        debug!("Target reached at sorted index {}", crossing);

        Ok(IsoValueReport {
            coverage_percent: self.coverage_percent,
            threshold: magnitudes[crossing],
            enclosed_voxels: crossing + 1,
            total_voxels: magnitudes.len(),
            captured_fraction: captured / total,
            total_abs: total,
        })
    }
}

/// 检查百分比位于 (0, 100]
fn validate_percent(percent: f64) -> Result<()> {
    if percent > 0.0 && percent <= 100.0 {
        Ok(())
    } else {
        Err(CubeError::InvalidInput(format!(
            "Coverage percentage must be in (0, 100], got {}",
            percent
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::cube::parse_cube_content;
    use rstest::rstest;

    fn threshold(values: &[f64], percent: f64) -> Result<f64> {
        Ok(IsoValueCalculator::new(percent)?
            .calculate_values(values)?
            .threshold)
    }

    #[rstest]
    #[case(40.0, 4.0)]
    #[case(65.0, 3.0)]
    #[case(71.0, 2.0)]
    #[case(85.0, 2.0)]
    #[case(100.0, 1.0)]
    fn test_small_grid(#[case] percent: f64, #[case] expected: f64) {
        assert_eq!(threshold(&[1.0, 2.0, 3.0, 4.0], percent).unwrap(), expected);
    }

    #[test]
    fn test_uses_absolute_values() {
        assert_eq!(threshold(&[-4.0, 3.0, -2.0, 1.0], 40.0).unwrap(), 4.0);
        assert_eq!(threshold(&[-4.0, 3.0, -2.0, 1.0], 100.0).unwrap(), 1.0);
    }

    #[test]
    fn test_full_coverage_is_min_nonzero() {
        let values = [0.0, 0.25, 0.0, -0.5, 3.0, 0.0];
        assert_eq!(threshold(&values, 100.0).unwrap(), 0.25);
    }

    #[test]
    fn test_full_coverage_keeps_tiny_tail() {
        let mut values = vec![1e3; 10];
        values.push(1e-14);

        let report = IsoValueCalculator::new(100.0)
            .unwrap()
            .calculate_values(&values)
            .unwrap();
        assert_eq!(report.threshold, 1e-14);
        assert_eq!(report.enclosed_voxels, 11);
        assert_eq!(report.captured_fraction, 1.0);
    }

    #[test]
    fn test_tiny_coverage_is_max() {
        let values = [0.1, -7.5, 2.0, 0.0, 7.5];
        let t = threshold(&values, 1e-9).unwrap();
        assert_eq!(t, 7.5);
    }

    #[test]
    fn test_monotonic_in_percentage() {
        let values: Vec<f64> = (0..200)
            .map(|i| ((i as f64) * 0.37).sin() * (i % 13) as f64)
            .collect();

        let mut previous = f64::INFINITY;
        for step in 1..=100 {
            let t = threshold(&values, step as f64).unwrap();
            assert!(t <= previous, "threshold rose at {}%", step);
            previous = t;
        }
    }

    #[rstest]
    #[case(0.5)]
    #[case(50.0)]
    #[case(100.0)]
    fn test_all_zero_grid(#[case] percent: f64) {
        let err = threshold(&[0.0; 8], percent).unwrap_err();
        assert!(matches!(err, CubeError::InvalidInput(_)));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(100.5)]
    #[case(f64::NAN)]
    fn test_invalid_percentage(#[case] percent: f64) {
        assert!(matches!(
            IsoValueCalculator::new(percent),
            Err(CubeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_report_fields() {
        let report = IsoValueCalculator::new(40.0)
            .unwrap()
            .calculate_values(&[1.0, 2.0, 3.0, 4.0])
            .unwrap();

        assert_eq!(report.enclosed_voxels, 1);
        assert_eq!(report.total_voxels, 4);
        assert!((report.total_abs - 10.0).abs() < 1e-12);
        assert!((report.captured_fraction - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_values_ignored() {
        assert_eq!(threshold(&[f64::NAN, 1.0, 3.0], 100.0).unwrap(), 1.0);
    }

    #[test]
    fn test_threshold_from_cube() {
        let content = "c1\nc2\n0 0 0 0\n1 1 0 0\n2 0 1 0\n2 0 0 1\n1.0 -2.0\n3.0 -4.0\n";
        let cube = parse_cube_content(content, "grid").unwrap();

        let at = |p: f64| IsoValueCalculator::new(p).unwrap().calculate(&cube).unwrap();
        assert_eq!(at(40.0).threshold, 4.0);
        assert_eq!(at(100.0).threshold, 1.0);
        assert_eq!(at(100.0).enclosed_voxels, 4);
    }
}
