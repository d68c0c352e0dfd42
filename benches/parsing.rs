use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use toml2php::{normalize, parse_document, parse_value_expression, to_php_string, PhpOptions};

fn generate_document(sections: usize) -> String {
    let mut text = String::from("# generated\ntitle = \"bench\"\n\n");
    for i in 0..sections {
        text.push_str(&format!(
            "[section{i}]\nname = \"Section {i}\" # trailing comment\nweight = {}.5\nenabled = {}\nports = [\n  {},\n  {},\n]\n\n",
            i,
            i % 2 == 0,
            8000 + i,
            9000 + i,
        ));
        text.push_str(&format!(
            "[[section{i}.items]]\nsku = \"SKU{i}\"\nmeta = {{ color = \"red\", sizes = [1, 2, 3] }}\n\n"
        ));
    }
    text
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for size in [10, 100, 500].iter() {
        let text = generate_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| normalize(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_parse_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    for size in [10, 100, 500].iter() {
        let text = generate_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_document(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_php");

    for size in [10, 100, 500].iter() {
        let table = parse_document(&generate_document(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| to_php_string(black_box(table)))
        });
    }
    group.finish();
}

fn benchmark_short_arrays(c: &mut Criterion) {
    let table = parse_document(&generate_document(100)).unwrap();

    c.bench_function("render_php_short_arrays", |b| {
        b.iter(|| toml2php::to_php_string_with_options(black_box(&table), PhpOptions::short()))
    });
}

fn benchmark_inline_values(c: &mut Criterion) {
    let text = r#"[ {title = "Home", url = "/", childs = []}, {title = "Games", url = "/games", childs = [{title = "Game A", url = "/games/game-a", childs = []}, {title = "Game B", url = "/games/game-b", childs = []}]}, {title = "About us", url = "/about", childs = []} ]"#;

    c.bench_function("parse_nested_inline_value", |b| {
        b.iter(|| parse_value_expression(black_box(text)))
    });
}

criterion_group!(
    benches,
    benchmark_normalize,
    benchmark_parse_document,
    benchmark_render,
    benchmark_short_arrays,
    benchmark_inline_values,
);
criterion_main!(benches);
