use exact_cover::problems::sudoku::{self, Grid};
use exact_cover::solver::{Solution, Solver};

const PUZZLE: Grid = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

fn print_grid(grid: &Grid) {
    for row in grid {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        println!("{}", cells.join(" "));
    }
}

fn main() {
    env_logger::init();

    let mut mat = sudoku::build_matrix(&PUZZLE).unwrap();
    let mut solver = Solver::new(
        &mut mat,
        |sol: &Solution| {
            print_grid(&sudoku::decode_solution(sol));
            true
        },
        true,
    );
    solver.solve();
}
