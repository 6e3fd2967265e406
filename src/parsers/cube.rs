//! # Gaussian cube 格式解析器
//!
//! 一次性读取整个文件并构造 [`CubeFile`]。
//!
//! ## Cube 格式说明
//! ```text
//! Comment line 1
//! Comment line 2
//! NATOMS  X0 Y0 Z0  [NVAL]     # 原点；NATOMS < 0 表示存在 DSET_IDS
//! N1  X1 Y1 Z1                 # 第一轴 (变化最慢)
//! N2  X2 Y2 Z2                 # 第二轴
//! N3  X3 Y3 Z3                 # 第三轴 (变化最快)；N < 0 表示 Ångström
//! Z  charge  x y z             # 每个原子一行，共 |NATOMS| 行
//! M  ID1 ... IDM               # 仅当 NATOMS < 0
//! v v v v v v                  # 体素数据，空白分隔
//! ...
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/cube.rs`

use crate::error::{CubeError, Result};
use crate::models::{Axis, CubeAtom, CubeFile, LengthUnit, VoxelGrid};
use log::{debug, trace, warn};
use std::fs;
use std::path::Path;

/// 解析 cube 文件
pub fn parse_cube_file(path: &Path) -> Result<CubeFile> {
    let content = fs::read_to_string(path).map_err(|e| CubeError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_cube_content(&content, &path.display().to_string())
}

/// 带行号的行游标
struct LineCursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    name: &'a str,
    current: usize,
}

impl<'a> LineCursor<'a> {
    fn new(content: &'a str, name: &'a str) -> Self {
        LineCursor {
            lines: content.lines().enumerate(),
            name,
            current: 0,
        }
    }

    /// 读取下一行，文件结束时报错
    fn next_line(&mut self, what: &str) -> Result<&'a str> {
        match self.lines.next() {
            Some((idx, line)) => {
                self.current = idx + 1;
                Ok(line)
            }
            None => Err(self.error(format!("Unexpected end of file while reading {}", what))),
        }
    }

    /// 读取下一行并拆分为字段
    fn next_fields(&mut self, what: &str) -> Result<Vec<&'a str>> {
        Ok(self.next_line(what)?.split_whitespace().collect())
    }

    fn error(&self, reason: impl Into<String>) -> CubeError {
        CubeError::ParseError {
            path: self.name.to_string(),
            line: self.current,
            reason: reason.into(),
        }
    }

    fn float(&self, token: &str, what: &str) -> Result<f64> {
        parse_number(token)
            .ok_or_else(|| self.error(format!("Invalid {} '{}': expected a number", what, token)))
    }

    fn integer(&self, token: &str, what: &str) -> Result<i64> {
        token
            .parse::<i64>()
            .map_err(|_| self.error(format!("Invalid {} '{}': expected an integer", what, token)))
    }

    fn vector(&self, tokens: &[&str], what: &str) -> Result<[f64; 3]> {
        Ok([
            self.float(tokens[0], what)?,
            self.float(tokens[1], what)?,
            self.float(tokens[2], what)?,
        ])
    }
}

/// 解析数值，兼容 Fortran 风格的 `D` 指数
fn parse_number(token: &str) -> Option<f64> {
    token
        .parse::<f64>()
        .ok()
        .or_else(|| token.replace(['D', 'd'], "E").parse::<f64>().ok())
}

/// 从字符串内容解析 cube 格式
pub fn parse_cube_content(content: &str, name: &str) -> Result<CubeFile> {
    let mut cursor = LineCursor::new(content, name);

    // 前两行为注释
    let comment_lines = [
        cursor.next_line("first comment line")?.trim_end().to_string(),
        cursor.next_line("second comment line")?.trim_end().to_string(),
    ];

    // NATOMS X0 Y0 Z0 [NVAL]
    let parts = cursor.next_fields("atom count line")?;
    if parts.len() != 4 && parts.len() != 5 {
        return Err(cursor.error(format!(
            "Atom count line must have 4 or 5 fields, found {}",
            parts.len()
        )));
    }
    let atom_count = cursor.integer(parts[0], "atom count")?;
    let origin = cursor.vector(&parts[1..4], "origin coordinate")?;
    let declared_nval = match parts.get(4) {
        Some(token) => {
            let n = cursor.integer(token, "values per point")?;
            if n < 1 {
                return Err(cursor.error(format!("Values per point must be positive, found {}", n)));
            }
            Some(n as usize)
        }
        None => None,
    };

    // 三个轴：N X Y Z
    let mut axes = [Axis::new(0, [0.0; 3]); 3];
    let mut signs = [false; 3];
    for (i, axis) in axes.iter_mut().enumerate() {
        let parts = cursor.next_fields("axis line")?;
        if parts.len() != 4 {
            return Err(cursor.error(format!(
                "Axis line {} must have 4 fields, found {}",
                i + 1,
                parts.len()
            )));
        }
        let count = cursor.integer(parts[0], "voxel count")?;
        if count == 0 {
            return Err(cursor.error(format!("Axis {} has zero voxels", i + 1)));
        }
        signs[i] = count < 0;
        *axis = Axis::new(count.unsigned_abs() as usize, cursor.vector(&parts[1..4], "step vector")?);
    }

    let units = if signs[0] {
        LengthUnit::Angstrom
    } else {
        LengthUnit::Bohr
    };
    if signs.iter().any(|&s| s != signs[0]) {
        warn!("{}: axis voxel counts disagree in sign, using {} from the first axis", name, units);
    }
    if units == LengthUnit::Angstrom {
        warn!("{}: grid is given in angstrom; volumes are reported in cubic angstrom", name);
    }

    // 原子：Z charge x y z
    let mut atoms = Vec::new();
    for _ in 0..atom_count.unsigned_abs() {
        let parts = cursor.next_fields("atom line")?;
        if parts.len() != 5 {
            return Err(cursor.error(format!(
                "Atom line must have 5 fields, found {}",
                parts.len()
            )));
        }
        let z = cursor.integer(parts[0], "atomic number")?;
        let atomic_number = i32::try_from(z)
            .map_err(|_| cursor.error(format!("Atomic number {} out of range", z)))?;
        let charge = cursor.float(parts[1], "nuclear charge")?;
        let position = cursor.vector(&parts[2..5], "atom coordinate")?;
        atoms.push(CubeAtom::new(atomic_number, charge, position));
    }

    // DSET_IDS：M ID1 ... IDM，可跨行
    let mut dataset_ids = Vec::new();
    if atom_count < 0 {
        let mut expected: Option<usize> = None;
        while expected.map_or(true, |m| dataset_ids.len() < m) {
            for token in cursor.next_fields("dataset id record")? {
                let value = cursor.integer(token, "dataset id")?;
                match expected {
                    None => {
                        if value < 1 {
                            return Err(cursor.error(format!(
                                "Dataset id count must be positive, found {}",
                                value
                            )));
                        }
                        expected = Some(value as usize);
                    }
                    Some(m) if dataset_ids.len() < m => {
                        let id = i32::try_from(value)
                            .map_err(|_| cursor.error(format!("Dataset id {} out of range", value)))?;
                        dataset_ids.push(id);
                    }
                    Some(_) => {
                        return Err(cursor.error("Too many entries in dataset id record"));
                    }
                }
            }
        }
    }

    let values_per_point = if dataset_ids.is_empty() {
        declared_nval.unwrap_or(1)
    } else {
        if let Some(n) = declared_nval {
            if n != 1 && n != dataset_ids.len() {
                warn!(
                    "{}: header declares {} values per point but {} dataset ids; using the ids",
                    name,
                    n,
                    dataset_ids.len()
                );
            }
        }
        dataset_ids.len()
    };

    let shape = [axes[0].count, axes[1].count, axes[2].count];
    let expected = shape
        .iter()
        .try_fold(values_per_point, |acc, &n| acc.checked_mul(n))
        .ok_or_else(|| cursor.error("Declared grid is too large"))?;

    debug!("Comment     = {:?}", comment_lines);
    debug!("Atoms       = {}", atom_count);
    debug!("Origin      = {:?}", origin);
    debug!("Shape       = {:?} x {}", shape, values_per_point);
    debug!("Units       = {}", units);

    // 剩余部分全部为体素数据；每个数值至少占两个字节，预分配不超过文本长度的一半
    let mut data = Vec::with_capacity(expected.min(content.len() / 2));
    let mut non_finite = 0usize;
    while let Some((idx, line)) = cursor.lines.next() {
        cursor.current = idx + 1;
        for token in line.split_whitespace() {
            let value = cursor.float(token, "voxel value")?;
            if !value.is_finite() {
                non_finite += 1;
            }
            data.push(value);
        }
    }
    trace!("Read {} voxel values", data.len());

    if non_finite > 0 {
        warn!("{}: {} voxel values are not finite", name, non_finite);
    }

    let found = data.len();
    let voxels = VoxelGrid::new(shape, values_per_point, data).ok_or_else(|| {
        CubeError::VoxelCountMismatch {
            path: name.to_string(),
            expected,
            found,
        }
    })?;

    Ok(CubeFile {
        name: name.to_string(),
        comment_lines,
        atom_count,
        origin,
        axes,
        atoms,
        dataset_ids,
        units,
        voxels,
    })
}
