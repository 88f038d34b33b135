use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rpn_rs::context::EvalOptions;
use rpn_rs::engine::{eval, eval_with, to_postfix};
use rpn_rs::eval::RpnEvaluator;
use rpn_rs::substitute;
use std::collections::HashMap;

const EXPRESSIONS: [&str; 5] = [
    "2+3*4",
    "5/6-(1+2)*(3+4)",
    "-(7-2)^2%5+10",
    "((((1+2)*3-4)/5+6)*7-8)^2",
    "1+2-3+4-5+6-7+8-9+10-11+12-13+14-15+16",
];

fn bench_kinds(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval_by_kind");

    for (i, expr) in EXPRESSIONS.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("i32", i), expr, |b, expr| {
            b.iter(|| eval::<i32>(black_box(expr)))
        });
        group.bench_with_input(BenchmarkId::new("i64", i), expr, |b, expr| {
            b.iter(|| eval::<i64>(black_box(expr)))
        });
        group.bench_with_input(BenchmarkId::new("f32", i), expr, |b, expr| {
            b.iter(|| eval::<f32>(black_box(expr)))
        });
        group.bench_with_input(BenchmarkId::new("f64", i), expr, |b, expr| {
            b.iter(|| eval::<f64>(black_box(expr)))
        });
    }

    group.finish();
}

fn bench_literal_fast_path(c: &mut Criterion) {
    c.bench_function("literal_fast_path", |b| {
        b.iter(|| eval::<f64>(black_box("12345.6789")))
    });
}

fn bench_variables(c: &mut Criterion) {
    let mut group = c.benchmark_group("variables");
    let expr = "a*x^2 + b*x + c";

    for count in [3usize, 10, 50] {
        // Pad the map with unused names so lookup cost grows with size
        let mut vars: HashMap<String, f64> = HashMap::new();
        vars.insert("a".to_string(), 1.5);
        vars.insert("b".to_string(), -2.0);
        vars.insert("c".to_string(), 0.25);
        vars.insert("x".to_string(), 3.0);
        for i in 0..count {
            vars.insert(format!("unused{}", i), i as f64);
        }
        let pairs: Vec<(String, f64)> = vars.iter().map(|(k, v)| (k.clone(), *v)).collect();

        group.bench_with_input(BenchmarkId::new("hashmap", count), &vars, |b, vars| {
            b.iter(|| eval_with::<f64, _>(black_box(expr), vars))
        });
        group.bench_with_input(BenchmarkId::new("pairs", count), &pairs, |b, pairs| {
            b.iter(|| eval_with::<f64, _>(black_box(expr), pairs))
        });
    }

    group.finish();
}

/// Conversion once, evaluation many times with a reused evaluator
fn bench_prepared_postfix(c: &mut Criterion) {
    let options = EvalOptions::default();
    let expr = "(x+1)*(x-1)/2";
    let postfix = match to_postfix(expr, &options) {
        Ok(postfix) => postfix,
        Err(e) => panic!("{}", e),
    };

    let mut group = c.benchmark_group("prepared_postfix");
    group.bench_function("full_pipeline", |b| {
        let vars = [("x", 7i64)];
        b.iter(|| eval_with::<i64, _>(black_box(expr), &vars))
    });
    group.bench_function("reused_evaluator", |b| {
        let vars = [("x", 7i64)];
        let mut evaluator = RpnEvaluator::<i64>::new();
        b.iter(|| {
            let terms = substitute(postfix.clone(), &vars);
            evaluator.eval(black_box(terms))
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_kinds,
    bench_literal_fast_path,
    bench_variables,
    bench_prepared_postfix
);
criterion_main!(benches);
