//! # Cube 文件数据模型
//!
//! 解析一次后不再修改的 Gaussian cube 文件表示。
//!
//! ## 依赖关系
//! - 被 `parsers/cube.rs` 构造
//! - 被 `analysis/` 读取
//! - 无外部模块依赖

/// 长度单位
///
/// cube 格式中轴体素数为正表示 Bohr，为负表示 Ångström。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    #[default]
    Bohr,
    Angstrom,
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthUnit::Bohr => write!(f, "bohr"),
            LengthUnit::Angstrom => write!(f, "angstrom"),
        }
    }
}

/// 网格轴：体素数与步长向量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    /// 该轴上的体素数 (总为正)
    pub count: usize,

    /// 相邻体素之间的位移向量
    pub step: [f64; 3],
}

impl Axis {
    pub fn new(count: usize, step: [f64; 3]) -> Self {
        Axis { count, step }
    }

    /// 步长向量的长度
    pub fn spacing(&self) -> f64 {
        (self.step[0].powi(2) + self.step[1].powi(2) + self.step[2].powi(2)).sqrt()
    }
}

/// 原子信息
#[derive(Debug, Clone, PartialEq)]
pub struct CubeAtom {
    /// 原子序数
    pub atomic_number: i32,

    /// 核电荷
    pub charge: f64,

    /// 笛卡尔坐标
    pub position: [f64; 3],
}

impl CubeAtom {
    pub fn new(atomic_number: i32, charge: f64, position: [f64; 3]) -> Self {
        CubeAtom {
            atomic_number,
            charge,
            position,
        }
    }
}

/// 稠密三维体素网格
///
/// 数据按文件顺序存储：第一轴变化最慢，每个格点的多个值连续存放在最内层。
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    shape: [usize; 3],
    values_per_point: usize,
    data: Vec<f64>,
}

impl VoxelGrid {
    /// 由形状和展平数据创建网格，长度不一致时返回 `None`
    pub fn new(shape: [usize; 3], values_per_point: usize, data: Vec<f64>) -> Option<Self> {
        let expected = shape[0] * shape[1] * shape[2] * values_per_point;
        if values_per_point == 0 || data.len() != expected {
            return None;
        }
        Some(VoxelGrid {
            shape,
            values_per_point,
            data,
        })
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn values_per_point(&self) -> usize {
        self.values_per_point
    }

    /// 格点数
    pub fn points(&self) -> usize {
        self.shape[0] * self.shape[1] * self.shape[2]
    }

    /// 展平后的全部数值，长度为格点数 × 每格点数值数
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// 展平下标对应的格点下标 (i, j, k)
    pub fn locate(&self, index: usize) -> [usize; 3] {
        let [_, ny, nz] = self.shape;
        let point = index / self.values_per_point;
        [point / (ny * nz), (point / nz) % ny, point % nz]
    }
}

/// 一个已解析的 cube 文件
#[derive(Debug, Clone)]
pub struct CubeFile {
    /// 文件名 (用于显示)
    pub name: String,

    /// 两行注释
    pub comment_lines: [String; 2],

    /// 头部原样记录的原子数，负数表示存在 DSET_IDS 记录
    pub atom_count: i64,

    /// 网格原点
    pub origin: [f64; 3],

    /// 三个网格轴
    pub axes: [Axis; 3],

    /// 原子列表
    pub atoms: Vec<CubeAtom>,

    /// DSET_IDS 记录中的数据集编号
    pub dataset_ids: Vec<i32>,

    /// 长度单位
    pub units: LengthUnit,

    /// 体素网格
    pub voxels: VoxelGrid,
}

impl CubeFile {
    /// 三个轴的体素数
    pub fn shape(&self) -> [usize; 3] {
        [self.axes[0].count, self.axes[1].count, self.axes[2].count]
    }

    /// 单个体素的体积，即三个步长向量组成的平行六面体体积
    pub fn voxel_volume(&self) -> f64 {
        let a = self.axes[0].step;
        let b = self.axes[1].step;
        let c = self.axes[2].step;

        // 行列式计算
        let det = a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
            + a[2] * (b[0] * c[1] - b[1] * c[0]);
        det.abs()
    }

    /// 格点 (i, j, k) 的笛卡尔坐标
    pub fn point_position(&self, i: usize, j: usize, k: usize) -> [f64; 3] {
        let mut pos = self.origin;
        for (axis, n) in self.axes.iter().zip([i, j, k]) {
            for d in 0..3 {
                pos[d] += axis.step[d] * n as f64;
            }
        }
        pos
    }

    /// 网格格点所张成的轴对齐包围盒 (最小角, 最大角)
    pub fn bounding_box(&self) -> ([f64; 3], [f64; 3]) {
        let last = self.shape().map(|n| n.saturating_sub(1));
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];

        for corner in 0..8 {
            let i = if corner & 1 != 0 { last[0] } else { 0 };
            let j = if corner & 2 != 0 { last[1] } else { 0 };
            let k = if corner & 4 != 0 { last[2] } else { 0 };
            let p = self.point_position(i, j, k);
            for d in 0..3 {
                min[d] = min[d].min(p[d]);
                max[d] = max[d].max(p[d]);
            }
        }

        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cube(steps: [[f64; 3]; 3], shape: [usize; 3]) -> CubeFile {
        let n = shape[0] * shape[1] * shape[2];
        let data = (0..n).map(|x| x as f64).collect();
        CubeFile {
            name: "sample".to_string(),
            comment_lines: ["c1".to_string(), "c2".to_string()],
            atom_count: 0,
            origin: [1.0, 2.0, 3.0],
            axes: [
                Axis::new(shape[0], steps[0]),
                Axis::new(shape[1], steps[1]),
                Axis::new(shape[2], steps[2]),
            ],
            atoms: Vec::new(),
            dataset_ids: Vec::new(),
            units: LengthUnit::Bohr,
            voxels: VoxelGrid::new(shape, 1, data).unwrap(),
        }
    }

    #[test]
    fn test_voxel_grid_rejects_wrong_length() {
        assert!(VoxelGrid::new([2, 2, 2], 1, vec![0.0; 7]).is_none());
        assert!(VoxelGrid::new([2, 2, 2], 2, vec![0.0; 16]).is_some());
        assert!(VoxelGrid::new([1, 1, 1], 0, vec![]).is_none());
    }

    #[test]
    fn test_voxel_grid_row_major_locate() {
        let data: Vec<f64> = (0..24).map(|x| x as f64).collect();
        let grid = VoxelGrid::new([2, 3, 4], 1, data).unwrap();

        assert_eq!(grid.locate(0), [0, 0, 0]);
        assert_eq!(grid.locate(1), [0, 0, 1]);
        assert_eq!(grid.locate(4), [0, 1, 0]);
        assert_eq!(grid.locate(12), [1, 0, 0]);
        assert_eq!(grid.locate(23), [1, 2, 3]);
    }

    #[test]
    fn test_voxel_grid_multiple_values_per_point() {
        let data: Vec<f64> = (0..8).map(|x| x as f64).collect();
        let grid = VoxelGrid::new([1, 2, 2], 2, data).unwrap();

        assert_eq!(grid.points(), 4);
        assert_eq!(grid.values().len(), 8);
        assert_eq!(grid.locate(5), [0, 1, 0]);
        assert_eq!(grid.locate(6), [0, 1, 1]);
    }

    #[test]
    fn test_voxel_volume_orthogonal() {
        let cube = sample_cube(
            [[0.5, 0.0, 0.0], [0.0, 0.2, 0.0], [0.0, 0.0, 0.1]],
            [2, 2, 2],
        );
        assert!((cube.voxel_volume() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_voxel_volume_skewed() {
        // 剪切不改变体积
        let cube = sample_cube(
            [[1.0, 0.0, 0.0], [0.5, 1.0, 0.0], [0.0, 0.0, 2.0]],
            [2, 2, 2],
        );
        assert!((cube.voxel_volume() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_box() {
        let cube = sample_cube(
            [[0.5, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 0.25]],
            [3, 2, 5],
        );
        let (min, max) = cube.bounding_box();

        assert_eq!(min, [1.0, 1.0, 3.0]);
        assert_eq!(max, [2.0, 2.0, 4.0]);
    }

    #[test]
    fn test_axis_spacing() {
        let axis = Axis::new(10, [3.0, 4.0, 0.0]);
        assert!((axis.spacing() - 5.0).abs() < 1e-12);
    }
}
