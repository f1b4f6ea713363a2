//! Sudoku, encoded as an exact cover matrix.
//!
//! Column layout (spec §5 of SPEC_FULL.md, from `original_source/sudoku.py`
//! and `sudoku_board.py`): four 81-wide, all-primary constraint blocks
//! (cell `RiCj`, row#value `Ri#v`, column#value `Ci#v`, box#value `Bn#v`)
//! for a 9x9 grid. A solved Sudoku has no secondary constraints.
//! One row is inserted per candidate `(row, col, value)` triple; a known
//! cell contributes only its single forced row.

use crate::dlx::Matrix;
use crate::error::Error;
use crate::solver::Solution;

const SIZE: usize = 9;
const BOX: usize = 3;

fn box_index(i: usize, j: usize) -> usize {
    BOX * (i / BOX) + j / BOX
}

fn compute_row(i: usize, j: usize, v: usize) -> [usize; 4] {
    let cell = j + SIZE * i;
    let row_val = 81 + v + SIZE * i;
    let col_val = 162 + v + SIZE * j;
    let box_val = 243 + v + SIZE * box_index(i, j);
    [cell, row_val, col_val, box_val]
}

fn column_names() -> Vec<(String, bool)> {
    let mut columns = Vec::with_capacity(4 * 81);
    for i in 0..SIZE {
        for j in 0..SIZE {
            columns.push((format!("R{}C{}", i + 1, j + 1), true));
        }
    }
    for i in 0..SIZE {
        for v in 0..SIZE {
            columns.push((format!("R{}#{}", i + 1, v + 1), true));
        }
    }
    for j in 0..SIZE {
        for v in 0..SIZE {
            columns.push((format!("C{}#{}", j + 1, v + 1), true));
        }
    }
    for b in 0..SIZE {
        for v in 0..SIZE {
            columns.push((format!("B{}#{}", b + 1, v + 1), true));
        }
    }
    columns
}

/// A 9x9 grid of known cells; `0` denotes an empty cell, `1..=9` a given digit.
pub type Grid = [[u8; SIZE]; SIZE];

/// Builds the exact cover matrix for `grid`. Known cells are encoded with
/// their single forced candidate row; empty cells get one row per
/// candidate digit `1..=9`.
pub fn build_matrix(grid: &Grid) -> Result<Matrix, Error> {
    let mut mat = Matrix::new(column_names())?;

    for i in 0..SIZE {
        for j in 0..SIZE {
            let given = grid[i][j];
            if given != 0 {
                let v = given as usize - 1;
                mat.add_sparse_row(&compute_row(i, j, v), true)?;
            } else {
                for v in 0..SIZE {
                    mat.add_sparse_row(&compute_row(i, j, v), true)?;
                }
            }
        }
    }
    mat.end_add();
    Ok(mat)
}

/// Decodes a solution into a completed grid.
pub fn decode_solution(solution: &Solution) -> Grid {
    let mut grid: Grid = [[0; SIZE]; SIZE];

    for (_, names) in solution.rows() {
        let cell = names.iter().find(|n| n.starts_with('R') && n.contains('C'));
        let value = names
            .iter()
            .find(|n| n.starts_with('R') && n.contains('#'));

        if let (Some(cell), Some(value)) = (cell, value) {
            let (r, c) = parse_cell(cell);
            let v = parse_value(value);
            grid[r][c] = v;
        }
    }
    grid
}

fn parse_cell(name: &str) -> (usize, usize) {
    let rest = &name[1..];
    let (r, rest) = rest.split_once('C').expect("cell column name");
    let r: usize = r.parse().expect("cell row digit");
    let c: usize = rest.parse().expect("cell column digit");
    (r - 1, c - 1)
}

fn parse_value(name: &str) -> u8 {
    let rest = &name[1..];
    let (_, v) = rest.split_once('#').expect("row#value name");
    v.parse().expect("value digit")
}
