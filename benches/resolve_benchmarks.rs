//! Performance benchmarks for binding resolution.
//!
//! Measures the resolve bindings pass and the full default pipeline over
//! registries of increasing size. Every service is a mailer-like class with a
//! logger, a locale and a setter, bound through a mix of local and
//! container-wide bindings.
//!
//! ```bash
//! cargo bench --bench resolve_benchmarks
//! ```
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- "services_1000"
//! ```

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use wiring::{
    ClassCatalog, ClassDecl, Compiler, DefinitionRegistry, MethodSignature, ParamSpec, PassConfig,
    Reference, ResolveBindingsPass, TypedReference,
};

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

fn catalog() -> ClassCatalog {
    let mut catalog = ClassCatalog::new();
    catalog.declare(ClassDecl::new("Bench::Logger")).unwrap();
    catalog
        .declare(
            ClassDecl::new("Bench::LoggerAware").with_method(
                MethodSignature::new("setLogger", vec![ParamSpec::typed("logger", "Bench::Logger")])
                    .required(),
            ),
        )
        .unwrap();
    catalog
        .declare(
            ClassDecl::new("Bench::Mailer")
                .extends("Bench::LoggerAware")
                .with_constructor(vec![
                    ParamSpec::typed("logger", "Bench::Logger"),
                    ParamSpec::typed("locale", "string"),
                    ParamSpec::typed("retries", "int"),
                    ParamSpec::new("options"),
                ]),
        )
        .unwrap();
    catalog
}

fn registry(services: usize) -> DefinitionRegistry {
    let mut registry = DefinitionRegistry::new();
    registry.bind_default("Bench::Logger", Reference::new("logger"));
    registry.bind_default("int $retries", 3i64);
    registry.register("logger", "Bench::Logger");

    for i in 0..services {
        let mailer = registry.autowire(format!("mailer_{i}"), "Bench::Mailer");
        if i % 3 == 0 {
            mailer.add_argument(TypedReference::placeholder("Bench::Logger"));
        }
        mailer.bind("$locale", if i % 2 == 0 { "en" } else { "fr" });
    }
    registry
}

fn bench_resolve_pass(c: &mut Criterion) {
    setup_profiler();
    let catalog = catalog();
    let mut group = c.benchmark_group("resolve/pass");

    for services in [10, 100, 1000] {
        group.throughput(Throughput::Elements(services as u64));
        group.bench_function(format!("services_{services}"), |b| {
            b.iter_batched(
                || registry(services),
                |mut registry| {
                    let output = ResolveBindingsPass::new().run(&mut registry, &catalog);
                    end_profiling_frame();
                    black_box(output.substitutions)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_default_pipeline(c: &mut Criterion) {
    let catalog = catalog();
    let mut group = c.benchmark_group("resolve/pipeline");

    for services in [100, 1000] {
        group.throughput(Throughput::Elements(services as u64));
        group.bench_function(format!("services_{services}"), |b| {
            b.iter_batched(
                || registry(services),
                |mut registry| {
                    let result = Compiler::new(PassConfig::default()).compile(&mut registry, &catalog);
                    end_profiling_frame();
                    black_box(result.is_ok())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve_pass, bench_default_pipeline);
criterion_main!(benches);
