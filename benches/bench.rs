use criterion::{Criterion, criterion_group, criterion_main};
use dpll_solver::sat::dpll::Dpll;
use dpll_solver::sat::generator::{equivalence_chain, numbered_variables, random_k_sat};
use dpll_solver::sat::solver::Solver;
use dpll_solver::sat::variable_selection::VariableOrder;
use dpll_solver::sudoku::solver::{Board, EXAMPLE_HARDEST, EXAMPLE_NINE, Sudoku};
use std::hint::black_box;
use std::time::Duration;

fn bench_sudoku(c: &mut Criterion) {
    let mut group = c.benchmark_group("sudoku");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));

    for (name, board) in [("classic", &EXAMPLE_NINE), ("hardest", &EXAMPLE_HARDEST)] {
        let Ok(sudoku) = Sudoku::new(Board::from(board)) else {
            continue;
        };
        let formula = sudoku.to_formula();
        let cnf = formula.clauses();
        let variables = sudoku.variables();

        group.bench_function(format!("{name} - translate"), |b| {
            b.iter(|| black_box(formula.clauses()));
        });

        group.bench_function(format!("{name} - solve"), |b| {
            b.iter(|| {
                let mut solver = Dpll::new(&cnf, &variables);
                black_box(solver.solve())
            });
        });
    }

    group.finish();
}

fn bench_equivalence_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("equivalence chain");
    group.sample_size(20);

    for n in [100, 300, 600] {
        let formula = equivalence_chain(n, true);
        let cnf = formula.clauses();
        let variables = VariableOrder::Sorted.arrange(formula.vars());

        group.bench_function(format!("{n} variables"), |b| {
            b.iter(|| {
                let mut solver = Dpll::new(&cnf, &variables);
                black_box(solver.solve())
            });
        });
    }

    group.finish();
}

fn bench_3sat(c: &mut Criterion) {
    let variables = numbered_variables("x", 15);
    let mut rng = fastrand::Rng::with_seed(42);
    let cnfs = (0..40)
        .map(|_| random_k_sat(&mut rng, &variables, 75, 3).clauses())
        .collect::<Vec<_>>();

    let mut group = c.benchmark_group("3sat - variable order");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    for (name, order) in [
        ("Sorted", VariableOrder::Sorted),
        ("Shuffled", VariableOrder::Shuffled { seed: 7 }),
    ] {
        let ordered = order.arrange(variables.iter().cloned());
        group.bench_function(name, |b| {
            b.iter(|| {
                for cnf in &cnfs {
                    let mut solver = Dpll::new(cnf, &ordered);
                    black_box(solver.solve());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sudoku, bench_equivalence_chain, bench_3sat);

criterion_main!(benches);
