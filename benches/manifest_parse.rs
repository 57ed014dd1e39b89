//! Benchmarks for manifest decoding and component set assembly.
//!
//! Run with: cargo bench --bench manifest_parse
//!
//! Metadata comes from an in-memory source, so these measure the manifest
//! and set handling only.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nuget_bom::client::{FetchOutcome, MetadataSource};
use nuget_bom::error::ResolutionErrorKind;
use nuget_bom::{LockManifest, ManifestParser, PackageMetadata, ResolutionOptions};
use std::hint::black_box;

/// Answers every request with synthetic metadata.
struct EchoSource;

impl MetadataSource for EchoSource {
    fn fetch(&self, id: &str, version: &str) -> Result<FetchOutcome, ResolutionErrorKind> {
        let mut metadata = PackageMetadata::new(id, version, "Bench Authors");
        metadata.description = Some(format!("{id} benchmark package"));
        Ok(FetchOutcome::Resolved(metadata))
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

/// Generate an assets file with `count` packages and a few project references.
fn generate_assets(count: usize) -> String {
    let mut libraries = serde_json::Map::new();
    for i in 0..count {
        let id = format!("Bench.Package{i}");
        let version = format!("1.{}.{}", i % 10, i % 100);
        libraries.insert(
            format!("{id}/{version}"),
            serde_json::json!({
                "sha512": format!("c2hhNTEyLXtpfQ=={i}"),
                "type": "package",
                "path": format!("{}/{version}", id.to_lowercase()),
                "files": ["lib/net8.0/Bench.dll", format!("{}.nuspec", id.to_lowercase())]
            }),
        );
    }
    for i in 0..count / 20 {
        libraries.insert(
            format!("Project{i}/1.0.0"),
            serde_json::json!({
                "type": "project",
                "path": format!("../Project{i}/Project{i}.csproj")
            }),
        );
    }
    serde_json::json!({ "version": 3, "libraries": libraries }).to_string()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_manifest");
    for size in [100, 1000, 5000] {
        let content = generate_assets(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            b.iter(|| {
                let manifest = LockManifest::from_json(black_box(content)).unwrap();
                black_box(manifest.package_entries().unwrap())
            });
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_manifest");
    let content = generate_assets(2000);
    for jobs in [1, 4] {
        let parser = ManifestParser::with_options(EchoSource, ResolutionOptions { jobs });
        group.bench_with_input(BenchmarkId::new("jobs", jobs), &content, |b, content| {
            b.iter(|| black_box(parser.parse_str(black_box(content)).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_resolve);
criterion_main!(benches);
