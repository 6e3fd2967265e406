//! # cubetool - Gaussian cube 文件工具
//!
//! 读取 Gaussian cube 体积数据文件，打印统计汇总，
//! 并计算覆盖给定百分比总量的等值面阈值。
//!
//! ## 用法
//! ```text
//! cubetool density.cube --print-info
//! cubetool density.cube --calc-iso-value 95
//! ```
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (cube 格式解析器)
//!   │     ├── analysis/  (统计与阈值计算)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod analysis;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    // warn by default, each -v raises one level
    if let Err(e) = stderrlog::new()
        .module(module_path!())
        .quiet(cli.quiet)
        .verbosity(usize::from(cli.verbose) + 1)
        .init()
    {
        utils::output::print_warning(&format!("Logging disabled: {}", e));
    }

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        if e.is_parse_error() {
            utils::output::print_warning("The input does not follow the Gaussian cube file layout");
        }
        std::process::exit(1);
    }
}
