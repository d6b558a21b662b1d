//! Benchmarks for obfuscation and perturbation throughput
//!
//! Run with: cargo bench --bench obfuscation_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use perturbench_engine::{
    Entropy, LanguageId, ObfuscationLevel, Obfuscator, PerturbationDriver, SourceUnit,
};

/// Generate a Python file with N functions
fn generate_python_functions(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                r#"def function_{i}(arg1, arg2):
    result = arg1 + arg2
    if result > 10:
        result = result - 10
    while result > 0:
        result -= 3
    return "done" + str(result)

"#
            )
        })
        .collect()
}

/// Generate a C file with N functions
fn generate_c_functions(count: usize) -> String {
    let bodies: String = (0..count)
        .map(|i| {
            format!(
                r#"int function_{i}(int a, int b) {{
    int acc = 0;
    for (int k = 0; k < a; k++) {{
        if (k % 2 == 0) {{
            acc += b;
        }}
    }}
    printf("acc=%d\n", acc);
    return acc;
}}

"#
            )
        })
        .collect();
    format!("#include <stdio.h>\n\n{bodies}")
}

fn bench_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("obfuscate");
    let obfuscator = Obfuscator::new();

    for (name, language, code) in [
        ("python", LanguageId::Python, generate_python_functions(50)),
        ("c", LanguageId::C, generate_c_functions(50)),
    ] {
        let unit = SourceUnit::new(code, language);
        group.throughput(Throughput::Bytes(unit.code().len() as u64));
        for level in ObfuscationLevel::ALL {
            group.bench_with_input(
                BenchmarkId::new(name, level.as_u8()),
                &unit,
                |b, unit| {
                    b.iter(|| {
                        obfuscator
                            .obfuscate(black_box(unit), level, &mut Entropy::seeded(1))
                            .unwrap()
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("perturbation_sweep");
    let driver = PerturbationDriver::new();

    for count in [5, 20, 80] {
        let unit = SourceUnit::new(generate_python_functions(count), LanguageId::Python);
        group.bench_with_input(BenchmarkId::from_parameter(count), &unit, |b, unit| {
            b.iter(|| driver.sweep(black_box(unit), 10, &mut Entropy::seeded(1)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_levels, bench_sweep);
criterion_main!(benches);
