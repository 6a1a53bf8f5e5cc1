use criterion::{Criterion, black_box, criterion_group, criterion_main};
use cru_core::{ParseOptions, parse, tokenize};

fn timetable(blocks: usize) -> String {
    let mut source = String::new();
    for block in 0..blocks {
        source.push_str(&format!("+COURSE{:03} G1\n", block));
        for index in 0..8 {
            source.push_str(&format!(
                "{},TD,MA,{}:00-{}:30,P{}/24,{}\n",
                index,
                8 + index,
                9 + index,
                200 + index,
                index % 10
            ));
        }
        // one broken line per block keeps the recovery path hot
        source.push_str("broken,line\n\n");
    }
    source
}

fn bench_tokenize(c: &mut Criterion) {
    let source = timetable(200);
    c.bench_function("tokenize 200 blocks", |b| {
        b.iter(|| tokenize(black_box(&source)))
    });
}

fn bench_parse(c: &mut Criterion) {
    let source = timetable(200);
    let options = ParseOptions::default();
    c.bench_function("parse 200 blocks", |b| {
        b.iter(|| parse(black_box(&source), &options))
    });
}

criterion_group!(benches, bench_tokenize, bench_parse);
criterion_main!(benches);
