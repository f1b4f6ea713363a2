//! The N-Queens problem, encoded as an exact cover matrix.
//!
//! Column layout (spec §5 of SPEC_FULL.md, from `original_source/nqueens.py`):
//! `N` rank primaries `R0..R{N-1}`, `N` file primaries `F0..F{N-1}`,
//! `2N-1` diagonal secondaries `A0..A{2N-2}`, `2N-1` anti-diagonal
//! secondaries `B0..B{2N-2}`. Each `(rank, file)` placement inserts one row
//! covering exactly one of each.

use crate::dlx::Matrix;
use crate::error::Error;
use crate::solver::Solution;

fn compute_row(i: usize, j: usize, n: usize) -> [usize; 4] {
    [i, n + j, 2 * n + i + j, 5 * n - 2 - i + j]
}

/// Builds the exact cover matrix for placing `n` non-attacking queens on an
/// `n`x`n` board. Row index `i * n + j` corresponds to placing a queen at
/// rank `i`, file `j`.
pub fn build_matrix(n: usize) -> Result<Matrix, Error> {
    let mut columns = Vec::with_capacity(4 * n - 2);
    for i in 0..n {
        columns.push((format!("R{i}"), true));
    }
    for j in 0..n {
        columns.push((format!("F{j}"), true));
    }
    for a in 0..(2 * n - 1) {
        columns.push((format!("A{a}"), false));
    }
    for b in 0..(2 * n - 1) {
        columns.push((format!("B{b}"), false));
    }

    let mut mat = Matrix::new(columns)?;
    for i in 0..n {
        for j in 0..n {
            mat.add_sparse_row(&compute_row(i, j, n), true)?;
        }
    }
    mat.end_add();
    Ok(mat)
}

/// Decodes a solution into `board[rank] = file`, the column of the queen
/// placed on each rank.
pub fn decode_solution(n: usize, solution: &Solution) -> Vec<usize> {
    let mut board = vec![0; n];
    for (_, names) in solution.rows() {
        let rank = names
            .iter()
            .find_map(|name| name.strip_prefix('R'))
            .and_then(|s| s.parse::<usize>().ok());
        let file = names
            .iter()
            .find_map(|name| name.strip_prefix('F'))
            .and_then(|s| s.parse::<usize>().ok());
        if let (Some(rank), Some(file)) = (rank, file) {
            board[rank] = file;
        }
    }
    board
}
