//! Analysis benchmarks.
//!
//! Measures the diagnostic stream and parallel analysis over generated
//! files of increasing size.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use orphan_binder::{BinderState, ExpressionTyper, bind_prelude};
use orphan_checker::host::arena::{ArenaResolver, ArenaTree};
use orphan_checker::{
    CancellationToken, DiagnosticStream, HandleClassifier, HandleShapeConfig, RuleSet,
    analyze_parallel,
};
use orphan_parser::parse_source;
use orphan_solver::TypeInterner;

const HEADER: &str = r#"
extern fn handleCall(): Task;
extern fn valueCall(): Task<int>;
extern fn consume(value: int): void;
"#;

/// One declaration mixing clean and flagged shapes.
fn declaration(i: usize) -> String {
    format!(
        r#"
async fn Work{i}(flag: bool): Task<int> {{
    handleCall();
    var n = await valueCall();
    await valueCall().ConfigureAwait(false);
    consume(await valueCall());
    var f = async () => {{ await valueCall(); }};
    var s = $"{{n}} {{await valueCall()}}";
    if (flag) {{ _ = handleCall(); }}
    return n + 1;
}}
"#
    )
}

fn generate(declarations: usize) -> String {
    let mut code = String::from(HEADER);
    for i in 0..declarations {
        code.push_str(&declaration(i));
    }
    code
}

/// Benchmark the sequential stream, parse and bind excluded.
fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis_stream");

    for &n in &[1usize, 10, 100, 500] {
        let code = generate(n);
        let types = TypeInterner::new();
        let prelude = bind_prelude(&types);
        let (arena, root, _) = parse_source("bench.orp", code);
        let bound = BinderState::new(&arena, &types, Some(prelude)).bind_source_file(root);

        group.bench_with_input(BenchmarkId::new("sequential", n), &n, |b, _| {
            b.iter(|| {
                // Fresh typer and classifier so every iteration starts cold.
                let typer = ExpressionTyper::new(&arena, &types, &bound.table);
                let resolver = ArenaResolver::new(&typer);
                let classifier = HandleClassifier::new(&resolver, &HandleShapeConfig::default());
                let tree = ArenaTree::new(&arena, root);
                let found = DiagnosticStream::new(&tree, &resolver, &classifier, RuleSet::all())
                    .filter(Result::is_ok)
                    .count();
                black_box(found)
            })
        });

        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |b, _| {
            b.iter(|| {
                let typer = ExpressionTyper::new(&arena, &types, &bound.table);
                let resolver = ArenaResolver::new(&typer);
                let classifier = HandleClassifier::new(&resolver, &HandleShapeConfig::default());
                let tree = ArenaTree::new(&arena, root);
                let analysis = analyze_parallel(
                    &tree,
                    &resolver,
                    &classifier,
                    RuleSet::all(),
                    &CancellationToken::new(),
                );
                black_box(analysis.map(|a| a.diagnostics.len()).unwrap_or(0))
            })
        });
    }

    group.finish();
}

/// Benchmark the whole pipeline: parse, bind and analyze.
fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis_end_to_end");

    for &n in &[10usize, 100] {
        let code = generate(n);
        group.bench_with_input(BenchmarkId::new("pipeline", n), &code, |b, code| {
            b.iter(|| {
                let types = TypeInterner::new();
                let prelude = bind_prelude(&types);
                let (arena, root, _) = parse_source("bench.orp", code.clone());
                let bound = BinderState::new(&arena, &types, Some(prelude)).bind_source_file(root);
                let typer = ExpressionTyper::new(&arena, &types, &bound.table);
                let resolver = ArenaResolver::new(&typer);
                let classifier = HandleClassifier::new(&resolver, &HandleShapeConfig::default());
                let tree = ArenaTree::new(&arena, root);
                let found = DiagnosticStream::new(&tree, &resolver, &classifier, RuleSet::all()).count();
                black_box(found)
            })
        });
    }

    group.finish();
}

criterion_group!(analysis_benches, bench_stream, bench_end_to_end);
criterion_main!(analysis_benches);
