//! Benchmarks for document parsing and contract introspection.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rsocket_export_introspector::{Introspector, ServiceReflection};
use std::hint::black_box;

/// Builds a document with `method_count` request-response methods.
fn create_document(method_count: usize) -> String {
    let methods: Vec<String> = (0..method_count)
        .map(|i| {
            format!(
                r#"{{"name":"find{i}","route":"direct","params":[{{"name":"id","type":"Integer"}}],"returns":"Mono<List<Account>>"}}"#
            )
        })
        .collect();

    format!(
        r#"{{"type_name":"org.demo.AccountServiceImpl","route":"org.demo.AccountService","methods":[{}],"records":[{{"name":"org.demo.Account","fields":[{{"name":"id","type":"Long"}},{{"name":"nick","type":"String"}}]}}]}}"#,
        methods.join(",")
    )
}

fn bench_introspect(c: &mut Criterion) {
    let mut group = c.benchmark_group("introspect");

    for method_count in [1, 10, 50, 100] {
        let doc = ServiceReflection::from_json_str(&create_document(method_count)).unwrap();
        let introspector = Introspector::new();

        group.throughput(Throughput::Elements(method_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(method_count), &doc, |b, doc| {
            b.iter(|| introspector.introspect(black_box(doc)).unwrap());
        });
    }

    group.finish();
}

fn bench_parse_document(c: &mut Criterion) {
    let json = create_document(50);
    c.bench_function("parse_document_50", |b| {
        b.iter(|| ServiceReflection::from_json_str(black_box(&json)).unwrap());
    });
}

criterion_group!(benches, bench_introspect, bench_parse_document);
criterion_main!(benches);
