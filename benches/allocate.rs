use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use packsize::allocator::PackAllocator;
use packsize::registry::PackSizeRegistry;
use packsize::registry::copy_on_write::registry::Registry as CowRegistry;
use packsize::registry::sorted_vec::registry::Registry as SortedVecRegistry;
use packsize::workload::{
    OrderDistribution, OrderStream, random_pack_sizes, standard_pack_sizes,
};
use std::hint::black_box;

const SEED: u64 = 42;
const ORDERS_PER_ITER: usize = 64;

fn bench_order_size(c: &mut Criterion) {
    let allocator = PackAllocator::new();
    let sizes = standard_pack_sizes();

    let mut group = c.benchmark_group("allocate/order_size");
    for order in [1_000u32, 10_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(u64::from(order)));
        group.bench_with_input(BenchmarkId::from_parameter(order), &order, |b, &order| {
            b.iter(|| allocator.allocate(black_box(order), black_box(&sizes)))
        });
    }
    group.finish();
}

fn bench_size_count(c: &mut Criterion) {
    let allocator = PackAllocator::new();

    let mut group = c.benchmark_group("allocate/size_count");
    for count in [2usize, 5, 10, 20] {
        let sizes = random_pack_sizes(count, 5_000, SEED).expect("5000 candidates");
        group.bench_with_input(BenchmarkId::from_parameter(count), &sizes, |b, sizes| {
            b.iter(|| allocator.allocate(black_box(25_000), black_box(sizes)))
        });
    }
    group.finish();
}

fn bench_workload<R: PackSizeRegistry>(c: &mut Criterion, name: &str) {
    let allocator = PackAllocator::new();
    let registry = R::new();
    for size in standard_pack_sizes() {
        registry.insert(size).expect("standard sizes are distinct");
    }

    let dist = OrderDistribution::LogNormal {
        mu: 8.0,
        sigma: 1.0,
        max: 100_000,
    };
    let orders: Vec<u32> = OrderStream::new(dist, SEED)
        .expect("valid distribution")
        .take(ORDERS_PER_ITER)
        .collect();

    let mut group = c.benchmark_group("allocate/workload");
    group.throughput(Throughput::Elements(ORDERS_PER_ITER as u64));
    group.bench_function(name, |b| {
        b.iter(|| {
            for &order in &orders {
                black_box(allocator.allocate_from(&registry, black_box(order)));
            }
        })
    });
    group.finish();
}

fn bench_registries(c: &mut Criterion) {
    bench_workload::<SortedVecRegistry>(c, "sorted_vec");
    bench_workload::<CowRegistry>(c, "copy_on_write");
}

criterion_group!(
    benches,
    bench_order_size,
    bench_size_count,
    bench_registries
);
criterion_main!(benches);
