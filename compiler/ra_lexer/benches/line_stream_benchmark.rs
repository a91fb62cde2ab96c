use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ra_lexer::{LexerConfig, LineStream, TokenStream};
use std::sync::Arc;

fn generate_source() -> String {
    let mut content = String::new();

    for i in 0..1000 {
        content.push_str(&format!(
            r#"// Section {0}
label_{0} = "entry {0}"
total_{0} = 1.250,{1} * {1} / 2
`
	free text for section {0}
	`quoted inside`
`
/* note {0}
   spans two lines */
"#,
            i,
            i % 97,
        ));
    }

    content
}

fn bench_lines(c: &mut Criterion) {
    let source: Arc<str> = Arc::from(generate_source());

    c.benchmark_group("line_stream")
        .throughput(Throughput::Bytes(source.len() as u64))
        .bench_function("lines", |b| {
            b.iter(|| {
                let lines = LineStream::from_source(Arc::clone(&source));
                black_box(lines.count())
            })
        });
}

fn bench_tokens(c: &mut Criterion) {
    let source: Arc<str> = Arc::from(generate_source());
    let config = LexerConfig::default();

    c.benchmark_group("token_stream")
        .throughput(Throughput::Bytes(source.len() as u64))
        .bench_function("tokens", |b| {
            b.iter(|| {
                let tokens = TokenStream::with_config(Arc::clone(&source), config);
                black_box(tokens.filter(Result::is_ok).count())
            })
        })
        .bench_function("tokens_with_whitespace", |b| {
            let config = config.with_whitespace();
            b.iter(|| {
                let tokens = TokenStream::with_config(Arc::clone(&source), config);
                black_box(tokens.filter(Result::is_ok).count())
            })
        });
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(10)  // Fewer samples for faster benchmarks
        .measurement_time(std::time::Duration::from_secs(10));
    targets = bench_lines, bench_tokens
);

criterion_main!(benches);
