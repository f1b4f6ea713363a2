//! Problem-specific encoders built on top of the core's public API.
//!
//! These are not part of the core (spec §1): each module only calls
//! [`crate::dlx::Matrix`] and [`crate::solver::Solver`] through their
//! ordinary public interface, the same way the teacher's own
//! `problems::polyomino` module does.

pub mod nqueens;
pub mod sudoku;
