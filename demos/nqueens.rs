use exact_cover::problems::nqueens;
use exact_cover::solver::{Solution, Solver};

fn main() {
    env_logger::init();

    let n: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);

    let mut mat = nqueens::build_matrix(n).unwrap();
    let mut count = 0;
    let mut solver = Solver::new(
        &mut mat,
        |sol: &Solution| {
            count += 1;
            let board = nqueens::decode_solution(n, sol);
            for file in &board {
                let row: Vec<&str> = (0..n)
                    .map(|c| if c == *file { "Q" } else { "." })
                    .collect();
                println!("{}", row.join(" "));
            }
            println!();
            false
        },
        true,
    );
    solver.solve();

    println!("{n}-queens solution count: {count}");
}
