use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hashchain_lab::chain::ChainStore;
use tokio::runtime::Runtime;

fn build_chain(rt: &Runtime, len: usize) -> ChainStore {
    rt.block_on(async {
        let mut store = ChainStore::default();
        for i in 0..len {
            store.append(format!("block {}", i)).await;
        }
        store
    })
}

fn bench_recompute(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("recompute_from_genesis");

    for len in [10usize, 100, 1000] {
        let mut store = build_chain(&rt, len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| rt.block_on(store.recompute_from(0)))
        });
    }

    group.finish();
}

fn bench_delete_head(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");

    c.bench_function("delete_head_of_100", |b| {
        b.iter_batched(
            || build_chain(&rt, 100),
            |mut store| rt.block_on(store.delete(0)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_recompute, bench_delete_head);
criterion_main!(benches);
