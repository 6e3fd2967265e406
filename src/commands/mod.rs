//! # 命令执行模块
//!
//! 读取 cube 文件并分派到统计汇总或等值面阈值计算。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `analysis/`, `utils/`
//! - 子模块: info, isovalue

pub mod info;
pub mod isovalue;

use crate::analysis::IsoValueCalculator;
use crate::cli::Cli;
use crate::error::Result;
use crate::parsers;
use crate::utils::progress;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    // 先检查百分比，避免读取大文件后才报错
    let calculator = cli.iso_percent().map(IsoValueCalculator::new).transpose()?;

    let spinner = progress::create_spinner(
        &format!("Reading '{}'", cli.cube_file.display()),
        cli.quiet,
    );
    let cube = parsers::parse_cube_file(&cli.cube_file);
    spinner.finish_and_clear();
    let cube = cube?;

    log::info!(
        "Read {} voxel values and {} atoms from {}",
        cube.voxels.values().len(),
        cube.atoms.len(),
        cube.name
    );

    if cli.wants_info() {
        info::execute(&cube);
    }

    if let Some(calculator) = calculator {
        isovalue::execute(&cube, &calculator)?;
    }

    Ok(())
}
