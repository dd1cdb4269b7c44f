use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kuro_tree::RBTree;
use std::collections::BTreeSet;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn build_tree(keys: &[i64]) -> RBTree<i64> {
    let mut tree = RBTree::with_capacity(keys.len());
    for &k in keys {
        tree.insert(k).unwrap();
    }
    tree
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("RBTree", N), |b| {
        b.iter(|| {
            let mut tree = RBTree::new();
            for &k in keys {
                tree.insert(k).unwrap();
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

fn bench_insert_ordered(c: &mut Criterion) {
    bench_insert(c, "insert_ordered", &ordered_keys(N));
}

fn bench_insert_reverse(c: &mut Criterion) {
    bench_insert(c, "insert_reverse", &reverse_ordered_keys(N));
}

fn bench_insert_random(c: &mut Criterion) {
    bench_insert(c, "insert_random", &random_keys(N));
}

// ─── Find ───────────────────────────────────────────────────────────────────

fn bench_find(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);
    let tree = build_tree(keys);
    let set: BTreeSet<i64> = keys.iter().copied().collect();

    group.bench_function(BenchmarkId::new("RBTree", N), |b| {
        b.iter(|| {
            let mut found = 0usize;
            for k in keys {
                found += usize::from(tree.find(k).is_some());
            }
            found
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut found = 0usize;
            for k in keys {
                found += usize::from(set.contains(k));
            }
            found
        });
    });

    group.finish();
}

fn bench_find_ordered(c: &mut Criterion) {
    bench_find(c, "find_ordered", &ordered_keys(N));
}

fn bench_find_random(c: &mut Criterion) {
    bench_find(c, "find_random", &random_keys(N));
}

// ─── Erase ──────────────────────────────────────────────────────────────────

fn bench_erase(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("RBTree", N), |b| {
        b.iter_batched(
            || build_tree(keys),
            |mut tree| {
                for k in keys {
                    tree.remove(k);
                }
                tree
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<_>>(),
            |mut set| {
                for k in keys {
                    set.remove(k);
                }
                set
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_erase_ordered(c: &mut Criterion) {
    bench_erase(c, "erase_ordered", &ordered_keys(N));
}

fn bench_erase_random(c: &mut Criterion) {
    bench_erase(c, "erase_random", &random_keys(N));
}

// ─── Export ─────────────────────────────────────────────────────────────────

fn bench_export_sorted(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_sorted");
    let keys = random_keys(N);
    let tree = build_tree(&keys);
    let set: BTreeSet<i64> = keys.iter().copied().collect();
    let mut buf = vec![0i64; N];

    group.bench_function(BenchmarkId::new("RBTree", N), |b| {
        b.iter(|| tree.export_sorted(&mut buf).unwrap());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            for (slot, k) in buf.iter_mut().zip(&set) {
                *slot = *k;
            }
            set.len()
        });
    });

    group.finish();
}

criterion_group!(insert_benches, bench_insert_ordered, bench_insert_reverse, bench_insert_random,);

criterion_group!(find_benches, bench_find_ordered, bench_find_random,);

criterion_group!(erase_benches, bench_erase_ordered, bench_erase_random,);

criterion_group!(export_benches, bench_export_sorted,);

criterion_main!(insert_benches, find_benches, erase_benches, export_benches,);
