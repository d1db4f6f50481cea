//! Validation benchmarks (electronic and print format batches).
#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use iban_bench::{GeneratorConfig, SizeTier, generate_ibans};
use iban_core::{Iban, ValidationConfig, Validator, registry, validate};

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    let config = ValidationConfig::default();

    for (name, tier) in [("S", SizeTier::Small), ("M", SizeTier::Medium)] {
        let electronic = generate_ibans(&tier.config(42));
        let printed = generate_ibans(&GeneratorConfig {
            print_format: true,
            ..tier.config(42)
        });

        group.throughput(Throughput::Elements(electronic.len() as u64));

        group.bench_with_input(BenchmarkId::new("electronic", name), &electronic, |b, batch| {
            b.iter(|| {
                batch
                    .iter()
                    .filter(|raw| validate(&Iban::new(raw.as_str()), registry::builtin(), &config).is_valid())
                    .count()
            });
        });

        group.bench_with_input(BenchmarkId::new("print", name), &printed, |b, batch| {
            b.iter(|| {
                batch
                    .iter()
                    .filter(|raw| validate(&Iban::new(raw.as_str()), registry::builtin(), &config).is_valid())
                    .count()
            });
        });

        group.bench_with_input(BenchmarkId::new("stateful", name), &electronic, |b, batch| {
            let mut validator = Validator::new();
            b.iter(|| {
                batch
                    .iter()
                    .filter(|raw| validator.validate(&Iban::new(raw.as_str())))
                    .count()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validation);
criterion_main!(benches);
