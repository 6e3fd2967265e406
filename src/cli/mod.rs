//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 参数结构
//! - `<CUBE_FILE>`: 输入的 cube 文件
//! - `--print-info`: 打印统计汇总
//! - `--calc-iso-value [PERCENTAGE]`: 计算等值面阈值
//! - `-v` / `-q`: 日志详细程度
//!
//! ## 依赖关系
//! - 被 `main.rs` 和 `commands/` 使用

use crate::analysis::DEFAULT_COVERAGE_PERCENT;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// cubetool - Gaussian cube 文件统计与等值面阈值工具
#[derive(Parser, Debug)]
#[command(name = "cubetool")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Summary statistics and isosurface thresholds for Gaussian cube files", long_about = None)]
pub struct Cli {
    /// The cube file to process
    pub cube_file: PathBuf,

    /// Print some general info about the cube file (default when no other action is given)
    #[arg(short = 'i', long)]
    pub print_info: bool,

    /// Determine the isosurface threshold enclosing the given percentage of the total property (default: 90)
    #[arg(short = 'c', long, value_name = "PERCENTAGE", num_args = 0..=1)]
    pub calc_iso_value: Option<Option<f64>>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Silence log messages and the progress spinner
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

impl Cli {
    /// 请求的覆盖百分比；仅给出开关时使用默认值
    pub fn iso_percent(&self) -> Option<f64> {
        self.calc_iso_value
            .map(|p| p.unwrap_or(DEFAULT_COVERAGE_PERCENT))
    }

    /// 未指定任何操作时打印汇总
    pub fn wants_info(&self) -> bool {
        self.print_info || self.calc_iso_value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["cubetool", "a.cube"], None, true)]
    #[case(&["cubetool", "a.cube", "--calc-iso-value"], Some(90.0), false)]
    #[case(&["cubetool", "a.cube", "-c", "75"], Some(75.0), false)]
    #[case(&["cubetool", "a.cube", "-i", "-c", "50.5"], Some(50.5), true)]
    #[case(&["cubetool", "--print-info", "a.cube"], None, true)]
    fn test_actions(#[case] argv: &[&str], #[case] percent: Option<f64>, #[case] info: bool) {
        let cli = Cli::try_parse_from(argv).unwrap();

        assert_eq!(cli.cube_file, PathBuf::from("a.cube"));
        assert_eq!(cli.iso_percent(), percent);
        assert_eq!(cli.wants_info(), info);
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::try_parse_from(["cubetool", "-vv", "a.cube"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_missing_file_rejected() {
        assert!(Cli::try_parse_from(["cubetool", "--print-info"]).is_err());
    }

    #[test]
    fn test_non_numeric_percentage_rejected() {
        assert!(Cli::try_parse_from(["cubetool", "a.cube", "-c", "most"]).is_err());
    }
}
