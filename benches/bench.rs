use criterion::{criterion_group, criterion_main, Criterion};
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::dpll::Dpll;
use dpll_sat::sat::solver::Solver;
use std::hint::black_box;

/// The pigeonhole principle with `n` holes and `n + 1` pigeons: UNSAT, and
/// forces the solver through the whole search tree.
fn pigeonhole(holes: i32) -> Cnf {
    let pigeons = holes + 1;
    let var = |p: i32, h: i32| p * holes + h + 1;
    let mut clauses = Vec::new();

    for p in 0..pigeons {
        clauses.push((0..holes).map(|h| var(p, h)).collect());
    }
    for h in 0..holes {
        for p1 in 0..pigeons {
            for p2 in (p1 + 1)..pigeons {
                clauses.push(vec![-var(p1, h), -var(p2, h)]);
            }
        }
    }

    Cnf::from(clauses)
}

/// A fixed-seed random 3-CNF at the given clause/variable ratio.
fn random_3cnf(num_vars: usize, num_clauses: usize, seed: u64) -> Cnf {
    let mut rng = fastrand::Rng::with_seed(seed);
    let clauses = (0..num_clauses)
        .map(|_| {
            (0..3)
                .map(|_| {
                    let var = rng.i32(1..=num_vars as i32);
                    if rng.bool() { var } else { -var }
                })
                .collect()
        })
        .collect();
    Cnf::new(num_vars, clauses)
}

fn bench_pigeonhole(c: &mut Criterion) {
    for holes in [4, 5, 6] {
        let cnf = pigeonhole(holes);
        c.bench_function(&format!("pigeonhole_{holes}"), |b| {
            b.iter(|| {
                let mut solver = Dpll::new(black_box(cnf.clone()));
                black_box(solver.solve().unwrap())
            });
        });
    }
}

fn bench_random_3cnf(c: &mut Criterion) {
    for (num_vars, ratio) in [(30, 3.0), (30, 4.3)] {
        let num_clauses = (num_vars as f64 * ratio) as usize;
        let cnf = random_3cnf(num_vars, num_clauses, 42);
        c.bench_function(&format!("random_3cnf_{num_vars}v_{num_clauses}c"), |b| {
            b.iter(|| {
                let mut solver = Dpll::new(black_box(cnf.clone()));
                black_box(solver.solve().unwrap())
            });
        });
    }
}

criterion_group!(benches, bench_pigeonhole, bench_random_3cnf);
criterion_main!(benches);
