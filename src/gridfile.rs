//! Plain-text voxel grids.
//!
//! ```text
//! 3 2 1    # sx sy sz
//! f.f      # z=0, y=0: one hex nibble per voxel, '.' for empty
//! 6f6      # z=0, y=1
//! ```
//!
//! Rows run x = 0.. left to right; `sy` rows make one z layer and layers follow
//! in z order. Blank lines and `#` comments may appear anywhere.

use shadowbox_grid::{GridError, Voxel, VoxelGrid};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridFileError {
    #[error("failed to read grid {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("grid file has no `sx sy sz` header")]
    MissingHeader,
    #[error("line {line}: expected `sx sy sz`, found {text:?}")]
    BadHeader { line: usize, text: String },
    #[error("line {line}: grid dimensions must be positive")]
    ZeroDimension { line: usize },
    #[error("line {line}: row has {got} cell(s), expected {expected}")]
    RowLength { line: usize, expected: usize, got: usize },
    #[error("line {line}, column {column}: {ch:?} is not a hex digit or '.'")]
    BadCell { line: usize, column: usize, ch: char },
    #[error("grid ends after {got} row(s), expected {expected}")]
    MissingRows { expected: usize, got: usize },
    #[error("line {line}: data after the last row")]
    TrailingData { line: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Non-blank lines with comments stripped, numbered from 1.
fn content_lines(src: &str) -> impl Iterator<Item = (usize, &str)> {
    src.lines().enumerate().filter_map(|(i, raw)| {
        let text = raw.split('#').next().unwrap_or("").trim();
        (!text.is_empty()).then_some((i + 1, text))
    })
}

fn parse_header(line: usize, text: &str) -> Result<(usize, usize, usize), GridFileError> {
    let bad = || GridFileError::BadHeader {
        line,
        text: text.to_string(),
    };
    let dims: Vec<usize> = text
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| bad())?;
    let &[sx, sy, sz] = dims.as_slice() else {
        return Err(bad());
    };
    if sx == 0 || sy == 0 || sz == 0 {
        return Err(GridFileError::ZeroDimension { line });
    }
    Ok((sx, sy, sz))
}

fn parse_cell(line: usize, column: usize, ch: char) -> Result<Voxel, GridFileError> {
    if ch == '.' {
        return Ok(Voxel::EMPTY);
    }
    ch.to_digit(16)
        .map(|d| Voxel::from_bits(d as u8))
        .ok_or(GridFileError::BadCell { line, column, ch })
}

pub fn parse_grid(src: &str) -> Result<VoxelGrid, GridFileError> {
    let mut lines = content_lines(src);
    let (line, text) = lines.next().ok_or(GridFileError::MissingHeader)?;
    let (sx, sy, sz) = parse_header(line, text)?;
    let rows = sy.checked_mul(sz).ok_or(GridError::TooLarge { sx, sy, sz })?;
    let total = rows.checked_mul(sx).ok_or(GridError::TooLarge { sx, sy, sz })?;

    let mut voxels = Vec::with_capacity(total.min(1 << 20));
    let mut got = 0usize;
    for (line, text) in lines {
        if got == rows {
            return Err(GridFileError::TrailingData { line });
        }
        let cells = text.chars().count();
        if cells != sx {
            return Err(GridFileError::RowLength {
                line,
                expected: sx,
                got: cells,
            });
        }
        for (col, ch) in text.chars().enumerate() {
            voxels.push(parse_cell(line, col + 1, ch)?);
        }
        got += 1;
    }
    if got != rows {
        return Err(GridFileError::MissingRows {
            expected: rows,
            got,
        });
    }
    Ok(VoxelGrid::from_voxels(sx, sy, sz, voxels)?)
}

pub fn load_grid(path: &Path) -> Result<VoxelGrid, GridFileError> {
    let src = fs::read_to_string(path).map_err(|source| GridFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_grid(&src)?;
    let (sx, sy, sz) = grid.dims();
    log::info!(
        "loaded {}x{}x{} grid ({} active) from {}",
        sx,
        sy,
        sz,
        grid.active_count(),
        path.display()
    );
    Ok(grid)
}
