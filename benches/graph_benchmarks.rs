//! Benchmarks for reference parsing and graph maintenance.
//!
//! Run with: cargo bench --bench graph_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use notegraph::domain::{AuthorId, NewNote, NoteId, extract_snippet, parse_references};
use notegraph::graph::NoteGraphService;
use notegraph::store::StoreOptions;
use std::hint::black_box;
use tempfile::TempDir;

// =============================================================================
// Test Data Generation
// =============================================================================

/// Tags to assign to notes
const TAGS: &[&str] = &[
    "draft",
    "review",
    "published",
    "important",
    "rust",
    "cli",
    "async",
    "database",
];

/// Sample words for generating realistic note content
const WORDS: &[&str] = &[
    "architecture",
    "design",
    "pattern",
    "system",
    "component",
    "interface",
    "module",
    "function",
    "testing",
    "integration",
    "performance",
    "optimization",
];

fn title_for(index: usize) -> String {
    format!("Note {} {}", index, WORDS[index % WORDS.len()])
}

/// Content linking to two earlier notes and carrying two tags.
fn generate_content(index: usize, total: usize) -> String {
    let body: Vec<&str> = (0..60).map(|j| WORDS[(index + j) % WORDS.len()]).collect();
    format!(
        "{} See [[{}]] and [[{}|the other one]]. #{} #{}\n\n{}",
        WORDS[index % WORDS.len()],
        title_for((index + 1) % total),
        title_for((index + 7) % total),
        TAGS[index % TAGS.len()],
        TAGS[(index + 3) % TAGS.len()],
        body.join(" "),
    )
}

fn author() -> AuthorId {
    AuthorId::new("bench").expect("valid author")
}

/// Opens a service with `count` interlinked notes.
fn setup_service(count: usize) -> (TempDir, NoteGraphService, Vec<NoteId>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let service = NoteGraphService::open(dir.path().join("notes.db"), StoreOptions::default())
        .expect("Failed to open service");

    let ids = (0..count)
        .map(|i| {
            service
                .create_note(
                    NewNote::new(title_for(i)).content(generate_content(i, count)),
                    &author(),
                )
                .expect("Failed to create note")
                .id()
                .clone()
        })
        .collect();
    service.rebuild_graph().expect("Failed to rebuild");

    (dir, service, ids)
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_parse_references(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_references");

    for repeats in [1, 10, 100] {
        let content = generate_content(3, 50).repeat(repeats);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("copies", repeats), &content, |b, text| {
            b.iter(|| parse_references(black_box(text)));
        });
    }

    group.finish();
}

fn bench_extract_snippet(c: &mut Criterion) {
    let content = generate_content(3, 50).repeat(20);
    let title = title_for(4);

    c.bench_function("extract_snippet", |b| {
        b.iter(|| extract_snippet(black_box(&content), black_box(&title)));
    });
}

// =============================================================================
// Service Benchmarks
// =============================================================================

fn bench_update_content(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_note_content");

    for size in [100, 500] {
        let (_dir, service, ids) = setup_service(size);
        let target = ids[size / 2].clone();
        let mut toggle = 0usize;

        group.bench_with_input(BenchmarkId::new("notes", size), &size, |b, _| {
            b.iter(|| {
                toggle += 1;
                service
                    .update_note_content(&target, generate_content(toggle, size), &author())
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_rebuild_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild_graph");
    group.sample_size(20);

    for size in [100, 500] {
        let (_dir, service, _ids) = setup_service(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &size, |b, _| {
            b.iter(|| service.rebuild_graph().unwrap());
        });
    }

    group.finish();
}

fn bench_reads(c: &mut Criterion) {
    let (_dir, service, ids) = setup_service(500);
    let hub = ids[10].clone();

    c.bench_function("export_graph_500", |b| {
        b.iter(|| service.export_graph().unwrap());
    });
    c.bench_function("backlinks_500", |b| {
        b.iter(|| service.backlinks(black_box(&hub)).unwrap());
    });
}

criterion_group!(parse_benches, bench_parse_references, bench_extract_snippet);

criterion_group!(
    service_benches,
    bench_update_content,
    bench_rebuild_graph,
    bench_reads,
);

criterion_main!(parse_benches, service_benches);
