//! Performance benchmarks for ruleplan
//!
//! These benchmarks measure the performance of key operations:
//! - Parsing pipe declarations of increasing length
//! - Bail grouping with keyword and prefix markers
//! - Compiling many fields in parallel
//! - Nested path reads and writes
//!
//! ## Running Benchmarks
//!
//! To run all benchmarks:
//! ```bash
//! cargo bench
//! ```
//!
//! To run specific benchmarks:
//! ```bash
//! cargo bench parse_rules
//! cargo bench compile_fields
//! cargo bench path_access
//! ```
//!
//! ## Expected Performance Characteristics
//!
//! ### Parsing and Grouping
//! - Linear in the number of tokens
//! - Grouping recurses once per `^` marker
//!
//! ### Field Compilation
//! - Fields compile independently on rayon's thread pool
//! - Should scale well up to number of CPU cores
//!
//! ### Path Access
//! - Linear in the number of segments
//! - Writes pay for container creation only on the first call

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ruleplan::engine::PlanCompiler;
use ruleplan::path::{get_nested, set_nested};
use ruleplan::rules::{RuleDeclaration, ValidatorRegistry, group_bails, parse_rules};
use serde_json::{Value, json};
use std::collections::BTreeMap;

const TOKENS: [&str; 6] = ["required", "min:3", "max:40", "^alpha_num", "not_in:a,b,c", "numeric"];

/// Build a pipe declaration of `len` tokens cycling through [`TOKENS`]
fn declaration(len: usize, with_keyword: bool) -> String {
    let mut tokens: Vec<&str> = TOKENS.iter().copied().cycle().take(len).collect();
    if with_keyword {
        tokens.insert(len / 2, "bail");
    }
    tokens.join("|")
}

// ============================================================================
// Rule Benchmarks
// ============================================================================

/// Benchmark parsing declarations of different lengths
fn bench_parse_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_rules");
    let registry = ValidatorRegistry::with_builtins();

    for len in [3, 30, 300].iter() {
        let decl = RuleDeclaration::from(declaration(*len, false));
        group.throughput(Throughput::Elements(*len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &decl, |b, decl| {
            b.iter(|| black_box(parse_rules(decl, &registry)))
        });
    }

    group.finish();
}

/// Benchmark grouping with and without the global keyword
fn bench_group_bails(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_bails");
    let registry = ValidatorRegistry::with_builtins();

    for with_keyword in [false, true] {
        let decl = RuleDeclaration::from(declaration(300, with_keyword));
        let rules = parse_rules(&decl, &registry).unwrap();
        let label = if with_keyword { "keyword" } else { "prefix_only" };

        group.bench_with_input(BenchmarkId::from_parameter(label), &rules, |b, rules| {
            b.iter(|| black_box(group_bails(rules)))
        });
    }

    group.finish();
}

// ============================================================================
// Compilation Benchmarks
// ============================================================================

/// Benchmark parallel compilation of many fields
fn bench_compile_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_fields");
    group.sample_size(20);

    let compiler = PlanCompiler::new(ValidatorRegistry::with_builtins());

    for count in [10, 1_000].iter() {
        let fields: BTreeMap<String, RuleDeclaration> = (0..*count)
            .map(|i| (format!("field_{}", i), RuleDeclaration::from(declaration(12, i % 2 == 0))))
            .collect();
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &fields, |b, fields| {
            b.iter(|| black_box(compiler.compile_fields(fields)))
        });
    }

    group.finish();
}

// ============================================================================
// Path Benchmarks
// ============================================================================

/// Benchmark nested reads and writes
fn bench_path_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_access");
    let path = "customer.addresses[3].lines[1].text";

    let mut document = json!({});
    set_nested(&mut document, path, json!("221B Baker Street"));

    group.bench_function("get_nested", |b| {
        b.iter(|| black_box(get_nested(&document, black_box(path))))
    });

    group.bench_function("set_nested_fresh", |b| {
        b.iter(|| {
            let mut root = Value::Object(serde_json::Map::new());
            set_nested(&mut root, black_box(path), json!(1));
            black_box(root)
        })
    });

    group.bench_function("set_nested_existing", |b| {
        let mut root = document.clone();
        b.iter(|| {
            set_nested(&mut root, black_box(path), json!(2));
        })
    });

    group.finish();
}

// ============================================================================
// Benchmark Registration
// ============================================================================

criterion_group!(rule_benches, bench_parse_rules, bench_group_bails,);

criterion_group!(compile_benches, bench_compile_fields,);

criterion_group!(path_benches, bench_path_access,);

criterion_main!(rule_benches, compile_benches, path_benches);
