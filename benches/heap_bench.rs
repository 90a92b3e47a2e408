use archetype::system::{heap::StringHeap, normalize::normalize};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn words(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("word{:05}", (i * 7_919) % n)).collect()
}

fn bench_sort_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap/sort");

    for &size in &[100, 1_000, 10_000] {
        let input = words(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let mut heap = StringHeap::new();
                for word in input {
                    heap.push(word.as_str());
                }
                while let Some(word) = heap.pop() {
                    black_box(word);
                }
            });
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let sentence = "Put the small BRASS lamp, carefully, into the old wooden chest!";
    c.bench_function("normalize/sentence", |b| {
        b.iter(|| black_box(normalize(black_box(sentence), 0)))
    });
    c.bench_function("normalize/abbreviated", |b| {
        b.iter(|| black_box(normalize(black_box(sentence), 4)))
    });
}

criterion_group!(benches, bench_sort_session, bench_normalize);
criterion_main!(benches);
