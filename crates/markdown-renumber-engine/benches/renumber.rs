use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use markdown_renumber_engine::{
    CheckboxSorter, Document, Engine, Lines, NumberingStrategy, Renumberer,
};
mod common;

fn bench_renumber(c: &mut Criterion) {
    let mut group = c.benchmark_group("renumber");
    group.sample_size(20);

    let content = common::generate_numbered_list(2_000, 1);
    let doc = Document::from_text(&content);
    let renumberer = Renumberer::new(NumberingStrategy::Dynamic);

    // An already consistent list: the local scan stops after one line
    group.bench_function("local_scan_consistent", |b| {
        b.iter(|| {
            let pending = renumberer.renumber_from_line(&doc, std::hint::black_box(500), true);
            std::hint::black_box(pending);
        });
    });

    group.bench_function("full_scan_consistent", |b| {
        b.iter(|| {
            let end = std::hint::black_box(doc.line_count());
            let pending = renumberer.renumber_range(&doc, 0, end);
            std::hint::black_box(pending);
        });
    });

    let shifted = Document::from_text(&common::generate_numbered_list(2_000, 7));
    group.bench_function("full_scan_shifted", |b| {
        b.iter(|| {
            let pending = Renumberer::new(NumberingStrategy::StartFromOne).renumber_range(
                &shifted,
                0,
                std::hint::black_box(shifted.line_count()),
            );
            std::hint::black_box(pending);
        });
    });

    group.finish();
}

fn bench_checkbox(c: &mut Criterion) {
    let mut group = c.benchmark_group("checkbox");
    group.sample_size(20);

    let doc = Document::from_text(&common::generate_checklist(1_000));
    let sorter = CheckboxSorter::default();

    group.bench_function("end_index_long_scope", |b| {
        b.iter(|| {
            let dest = sorter.end_index(&doc, std::hint::black_box(499));
            std::hint::black_box(dest);
        });
    });

    group.finish();
}

fn bench_reaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reaction");
    group.sample_size(10);

    let content = common::generate_document(20, 50);
    let doc = Document::from_text(&content);

    group.bench_function("renumber_document", |b| {
        b.iter(|| {
            let mut d = doc.clone();
            let mut engine = Engine::default();
            let applied = engine.renumber_document(&mut d);
            std::hint::black_box(applied)
        });
    });

    // Every line needs rewriting, so the change set holds one entry per line
    for items in [5_000, 20_000, 80_000] {
        let doc = Document::from_text(&common::generate_repeated_ones(items));
        group.bench_with_input(
            BenchmarkId::new("renumber_document_all_wrong", items),
            &doc,
            |b, doc| {
                b.iter(|| {
                    let mut d = doc.clone();
                    let mut engine = Engine::default();
                    let applied = engine.renumber_document(&mut d);
                    std::hint::black_box(applied)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_renumber, bench_checkbox, bench_reaction);
criterion_main!(benches);
