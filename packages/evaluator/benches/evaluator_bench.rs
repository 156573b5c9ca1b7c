use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parchment_evaluator::{Evaluator, Registry, RenderOptions};
use parchment_schema::{Document, Node};

/// A page with `sections` sections of four leaves each
fn wide_page(sections: usize) -> Document {
    let mut doc = Document::empty("root", "Container");
    for s in 0..sections {
        let section_id = format!("section-{}", s);
        doc = doc
            .insert_child("root", Node::canvas(&section_id, "Section"), s)
            .unwrap();
        let leaves = [
            Node::leaf(format!("h-{}", s), "Heading").with_prop("text", "Parish news"),
            Node::leaf(format!("t-{}", s), "TextBlock")
                .with_prop("text", "First paragraph.\n\nSecond paragraph."),
            Node::leaf(format!("b-{}", s), "ButtonLink").with_prop("href", "/news"),
            Node::leaf(format!("sp-{}", s), "Spacer"),
        ];
        for (i, leaf) in leaves.into_iter().enumerate() {
            doc = doc.insert_child(&section_id, leaf, i).unwrap();
        }
    }
    doc
}

fn render_small_page(c: &mut Criterion) {
    let registry = Registry::with_builtins();
    let doc = wide_page(5);

    c.bench_function("render_small_page", |b| {
        b.iter(|| Evaluator::new(&registry).evaluate(black_box(&doc)))
    });
}

fn render_large_page_editor(c: &mut Criterion) {
    let registry = Registry::with_builtins();
    let doc = wide_page(100);

    c.bench_function("render_large_page_editor", |b| {
        b.iter(|| {
            Evaluator::with_options(&registry, RenderOptions::editor()).evaluate(black_box(&doc))
        })
    });
}

criterion_group!(benches, render_small_page, render_large_page_editor);
criterion_main!(benches);
