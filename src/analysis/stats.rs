//! # 网格统计
//!
//! 汇总 cube 网格的几何信息和数值统计，只读计算。
//!
//! ## 依赖关系
//! - 被 `commands/info.rs` 调用
//! - 使用 `models/cube.rs`

use crate::models::{CubeFile, LengthUnit};
use log::debug;

/// cube 文件的统计汇总
#[derive(Debug, Clone)]
pub struct CubeStats {
    /// 各轴体素数
    pub shape: [usize; 3],
    /// 每格点数值数
    pub values_per_point: usize,
    /// 格点数
    pub point_count: usize,
    /// 数值总数
    pub value_count: usize,
    /// 各轴步长
    pub spacing: [f64; 3],
    /// 单个体素体积
    pub voxel_volume: f64,
    /// 长度单位
    pub units: LengthUnit,
    pub min: f64,
    pub max: f64,
    /// 最接近零的数值的绝对值
    pub abs_min: f64,
    /// 离零最远的数值的绝对值
    pub abs_max: f64,
    /// 绝对值最大的格点坐标
    pub abs_max_position: [f64; 3],
    pub sum: f64,
    pub abs_sum: f64,
    /// 积分值：数值和 × 体素体积
    pub integrated: f64,
    pub atom_count: usize,
    /// 网格格点包围盒 (最小角, 最大角)
    pub bounding_box: ([f64; 3], [f64; 3]),
}

impl CubeStats {
    pub fn from_cube(cube: &CubeFile) -> Self {
        let values = cube.voxels.values();

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut abs_min = f64::INFINITY;
        let mut abs_max = 0.0f64;
        let mut abs_max_index = 0;
        let mut sum = 0.0;
        let mut abs_sum = 0.0;

        for (idx, &v) in values.iter().enumerate() {
            min = min.min(v);
            max = max.max(v);
            abs_min = abs_min.min(v.abs());
            if v.abs() > abs_max {
                abs_max = v.abs();
                abs_max_index = idx;
            }
            sum += v;
            abs_sum += v.abs();
        }

        let [i, j, k] = cube.voxels.locate(abs_max_index);

        let voxel_volume = cube.voxel_volume();
        debug!("Voxel volume = {:.6e} {}^3", voxel_volume, cube.units);

        CubeStats {
            shape: cube.shape(),
            values_per_point: cube.voxels.values_per_point(),
            point_count: cube.voxels.points(),
            value_count: values.len(),
            spacing: [
                cube.axes[0].spacing(),
                cube.axes[1].spacing(),
                cube.axes[2].spacing(),
            ],
            voxel_volume,
            units: cube.units,
            min,
            max,
            abs_min,
            abs_max,
            abs_max_position: cube.point_position(i, j, k),
            sum,
            abs_sum,
            integrated: sum * voxel_volume,
            atom_count: cube.atoms.len(),
            bounding_box: cube.bounding_box(),
        }
    }

    /// 包围盒各方向的边长
    pub fn extent(&self) -> [f64; 3] {
        let (lo, hi) = self.bounding_box;
        [hi[0] - lo[0], hi[1] - lo[1], hi[2] - lo[2]]
    }
}
