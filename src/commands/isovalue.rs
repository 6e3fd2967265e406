//! # 等值面阈值输出
//!
//! 计算并打印覆盖给定百分比的等值面阈值。
//!
//! ## 依赖关系
//! - 使用 `analysis/isovalue.rs`
//! - 使用 `utils/output.rs`

use crate::analysis::{IsoValueCalculator, IsoValueReport};
use crate::error::Result;
use crate::models::CubeFile;
use crate::utils::output;

/// 计算并打印阈值
pub fn execute(cube: &CubeFile, calculator: &IsoValueCalculator) -> Result<()> {
    let report = calculator.calculate(cube)?;

    output::print_success(&headline(&report));
    println!("{:.4e}", report.threshold);
    output::print_info(&describe(&report));

    Ok(())
}

/// 百分比按 f64 最短形式输出：90 → "90%"，50.5 → "50.5%"
fn headline(report: &IsoValueReport) -> String {
    format!(
        "To create an isosurface enclosing {}% of the contained property, use a threshold of",
        report.coverage_percent
    )
}

/// 阈值包含的体素数及实际覆盖率
fn describe(report: &IsoValueReport) -> String {
    format!(
        "{} of {} voxels enclose {:.2}% of the total |property| ({:.4e})",
        report.enclosed_voxels,
        report.total_voxels,
        report.captured_fraction * 100.0,
        report.total_abs
    )
}
