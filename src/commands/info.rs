//! # 统计汇总输出
//!
//! 以表格形式打印 cube 文件的网格信息、数值统计和原子列表。
//!
//! ## 依赖关系
//! - 使用 `analysis/stats.rs`
//! - 使用 `utils/output.rs`

use crate::analysis::CubeStats;
use crate::models::CubeFile;
use crate::utils::output::{self, format_vec3};

use tabled::{Table, Tabled};

/// 汇总表的一行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// 原子表的一行
#[derive(Debug, Clone, Tabled)]
struct AtomRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Z")]
    atomic_number: i32,
    #[tabled(rename = "Charge")]
    charge: String,
    #[tabled(rename = "Position")]
    position: String,
}

fn row(property: &str, value: String) -> SummaryRow {
    SummaryRow {
        property: property.to_string(),
        value,
    }
}

/// 生成汇总表内容
fn summary_rows(cube: &CubeFile, stats: &CubeStats) -> Vec<SummaryRow> {
    let [nx, ny, nz] = stats.shape;
    let (lo, hi) = stats.bounding_box;

    let mut rows = vec![
        row("Comment", cube.comment_lines[0].trim().to_string()),
        row("Grid dimensions", format!("{} x {} x {}", nx, ny, nz)),
    ];
    if stats.values_per_point > 1 {
        rows.push(row("Grid points", stats.point_count.to_string()));
        rows.push(row("Values per point", stats.values_per_point.to_string()));
    }
    if cube.atom_count < 0 {
        let ids: Vec<String> = cube.dataset_ids.iter().map(|id| id.to_string()).collect();
        rows.push(row("Dataset ids", ids.join(" ")));
    }
    rows.extend([
        row("Total values", stats.value_count.to_string()),
        row("Length unit", stats.units.to_string()),
        row("Voxel spacing", format_vec3(stats.spacing, 4)),
        row("Voxel volume", format!("{:.4e}", stats.voxel_volume)),
        row("Atoms", stats.atom_count.to_string()),
        row("Origin", format_vec3(cube.origin, 4)),
        row("Grid min corner", format_vec3(lo, 4)),
        row("Grid max corner", format_vec3(hi, 4)),
        row("Grid extent", format_vec3(stats.extent(), 4)),
        row("Min. value", format!("{:+.2e}", stats.min)),
        row("Abs. min. value", format!("{:+.2e}", stats.abs_min)),
        row("Max. value", format!("{:+.2e}", stats.max)),
        row("Abs. max. value", format!("{:+.2e}", stats.abs_max)),
        row("Abs. max. at", format_vec3(stats.abs_max_position, 4)),
        row("Sum(data)", format!("{:+.4e}", stats.sum)),
        row("Sum(|data|)", format!("{:+.4e}", stats.abs_sum)),
        row("Integrated data", format!("{:+.4e}", stats.integrated)),
    ]);
    rows
}

/// 生成原子表内容
fn atom_rows(cube: &CubeFile) -> Vec<AtomRow> {
    cube.atoms
        .iter()
        .enumerate()
        .map(|(i, atom)| AtomRow {
            index: i + 1,
            atomic_number: atom.atomic_number,
            charge: format!("{:.4}", atom.charge),
            position: format_vec3(atom.position, 6),
        })
        .collect()
}

/// 打印统计汇总
pub fn execute(cube: &CubeFile) {
    let stats = CubeStats::from_cube(cube);

    output::print_header(&format!("Summary for cube file '{}'", cube.name));
    println!("{}", Table::new(summary_rows(cube, &stats)));

    if !cube.atoms.is_empty() {
        output::print_header(&format!("Atoms ({})", cube.atoms.len()));
        println!("{}", Table::new(atom_rows(cube)));
    }
}
