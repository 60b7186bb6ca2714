use std::collections::BTreeMap;
use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::{apply_small_runtime_config, random_key};
use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, BenchmarkId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ordered_map::OrderedMap;

const SIZES: [usize; 4] = [1_000, 4_000, 16_000, 64_000];
const OPS_PER_ITER: usize = 200;
const KEY_LEN: usize = 8;
const GET_HIT_RATE_PERCENT: u64 = 80;
const RANGE_SPAN: usize = 32;

/// The operations every benchmarked map supports, with `insert` keeping the
/// first value for a key.
trait BenchMap {
    fn new() -> Self;
    fn len(&self) -> usize;
    fn get(&self, key: &str) -> Option<u64>;
    fn insert(&mut self, key: String, value: u64) -> bool;
    fn remove(&mut self, key: &str) -> bool;
    fn range_sum(&self, low: &str, high: &str) -> u64;
}

impl BenchMap for OrderedMap<String, u64> {
    fn new() -> Self {
        OrderedMap::new()
    }

    fn len(&self) -> usize {
        OrderedMap::len(self)
    }

    fn get(&self, key: &str) -> Option<u64> {
        OrderedMap::get(self, key).copied()
    }

    fn insert(&mut self, key: String, value: u64) -> bool {
        OrderedMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &str) -> bool {
        OrderedMap::remove(self, key)
    }

    fn range_sum(&self, low: &str, high: &str) -> u64 {
        self.range(low, high).fold(0, |acc, v| acc.wrapping_add(*v))
    }
}

impl BenchMap for BTreeMap<String, u64> {
    fn new() -> Self {
        BTreeMap::new()
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn get(&self, key: &str) -> Option<u64> {
        BTreeMap::get(self, key).copied()
    }

    fn insert(&mut self, key: String, value: u64) -> bool {
        if self.contains_key(&key) {
            return false;
        }
        BTreeMap::insert(self, key, value);
        true
    }

    fn remove(&mut self, key: &str) -> bool {
        BTreeMap::remove(self, key).is_some()
    }

    fn range_sum(&self, low: &str, high: &str) -> u64 {
        if low > high {
            return 0;
        }
        self.range::<str, _>((
            std::ops::Bound::Included(low),
            std::ops::Bound::Included(high),
        ))
        .fold(0, |acc, (_, v)| acc.wrapping_add(*v))
    }
}

#[derive(Clone)]
struct ReadOp {
    key: String,
}

#[derive(Clone)]
enum UpdateOp {
    Insert { key: String, value: u64 },
    Remove { key: String },
}

#[derive(Clone)]
struct RangeOp {
    low: String,
    high: String,
}

fn prepare<M: BenchMap>(size: usize, base_seed: u64) -> (M, Vec<String>) {
    let keys = generate_initial_keys(size, base_seed);
    let mut init_rng = StdRng::seed_from_u64(base_seed ^ 0x11_22_33_44);
    let mut map = M::new();
    for k in &keys {
        let v: u64 = init_rng.random();
        black_box(map.insert(k.clone(), v));
    }
    let mut sorted = keys;
    sorted.sort_unstable();
    sorted.dedup();
    (map, sorted)
}

fn bench_read<M, T>(group: &mut BenchmarkGroup<'_, T>, label: &str)
where
    T: Measurement<Value = Duration>,
    M: BenchMap,
{
    for &size in &SIZES {
        apply_small_runtime_config(group);
        let base_seed = seed_base(1, size as u64);
        let (map, keys) = prepare::<M>(size, base_seed);

        group.bench_function(BenchmarkId::new(label, size), |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let mut rng = StdRng::seed_from_u64(seed_for_iter(base_seed, iter));
                    let ops = generate_read_ops(&keys, &mut rng);
                    let start = Instant::now();
                    for ReadOp { key } in &ops {
                        black_box(map.get(key));
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

fn bench_update<M, T>(group: &mut BenchmarkGroup<'_, T>, label: &str)
where
    T: Measurement<Value = Duration>,
    M: BenchMap,
{
    for &size in &SIZES {
        apply_small_runtime_config(group);
        let base_seed = seed_base(2, size as u64);
        let (mut map, _) = prepare::<M>(size, base_seed);

        group.bench_function(BenchmarkId::new(label, size), |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let mut rng = StdRng::seed_from_u64(seed_for_iter(base_seed, iter));
                    let ops = generate_update_ops(&mut rng);
                    let start = Instant::now();
                    for op in &ops {
                        match op {
                            UpdateOp::Insert { key, value } => {
                                black_box(map.insert(key.clone(), *value));
                            }
                            UpdateOp::Remove { key } => {
                                black_box(map.remove(key));
                            }
                        }
                    }
                    black_box(map.len());
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

fn bench_range<M, T>(group: &mut BenchmarkGroup<'_, T>, label: &str)
where
    T: Measurement<Value = Duration>,
    M: BenchMap,
{
    for &size in &SIZES {
        apply_small_runtime_config(group);
        let base_seed = seed_base(3, size as u64);
        let (map, keys) = prepare::<M>(size, base_seed);

        group.bench_function(BenchmarkId::new(label, size), |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let mut rng = StdRng::seed_from_u64(seed_for_iter(base_seed, iter));
                    let ops = generate_range_ops(&keys, &mut rng);
                    let start = Instant::now();
                    for RangeOp { low, high } in &ops {
                        black_box(map.range_sum(low, high));
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

fn generate_initial_keys(size: usize, base_seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(base_seed);
    (0..size).map(|_| random_key(&mut rng, KEY_LEN)).collect()
}

fn generate_read_ops(keys: &[String], rng: &mut StdRng) -> Vec<ReadOp> {
    (0..OPS_PER_ITER)
        .map(|_| {
            let hit = rng.random_range(0..100) < GET_HIT_RATE_PERCENT;
            let key = if hit {
                keys[rng.random_range(0..keys.len())].clone()
            } else {
                random_key(rng, KEY_LEN + 1)
            };
            ReadOp { key }
        })
        .collect()
}

/// Alternating insert/remove of fresh keys, so the map size is unchanged at
/// the end of every iteration. Fresh keys are one character longer than the
/// initial ones and cannot collide with them.
fn generate_update_ops(rng: &mut StdRng) -> Vec<UpdateOp> {
    let mut inserted = Vec::with_capacity(OPS_PER_ITER / 2);
    let mut ops = Vec::with_capacity(OPS_PER_ITER);
    for i in 0..OPS_PER_ITER {
        if i % 2 == 0 {
            let key = random_key(rng, KEY_LEN + 1);
            let value: u64 = rng.random();
            inserted.push(key.clone());
            ops.push(UpdateOp::Insert { key, value });
        } else {
            let idx = rng.random_range(0..inserted.len());
            let key = inserted.swap_remove(idx);
            ops.push(UpdateOp::Remove { key });
        }
    }
    ops
}

fn generate_range_ops(sorted_keys: &[String], rng: &mut StdRng) -> Vec<RangeOp> {
    (0..OPS_PER_ITER)
        .map(|_| {
            let start = rng.random_range(0..sorted_keys.len());
            let end = (start + RANGE_SPAN).min(sorted_keys.len() - 1);
            RangeOp {
                low: sorted_keys[start].clone(),
                high: sorted_keys[end].clone(),
            }
        })
        .collect()
}

fn seed_base(workload_id: u64, size: u64) -> u64 {
    mix_seed(0x0DDB_A11A_2026_0000_u64 ^ (workload_id << 48) ^ size)
}

fn seed_for_iter(base: u64, iter: u64) -> u64 {
    mix_seed(base ^ iter.wrapping_mul(SEED_MIX))
}

const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub fn bench_all_read<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    bench_read::<BTreeMap<String, u64>, _>(group, "std_btree");
    bench_read::<OrderedMap<String, u64>, _>(group, "avl");
}

pub fn bench_all_update<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    bench_update::<BTreeMap<String, u64>, _>(group, "std_btree");
    bench_update::<OrderedMap<String, u64>, _>(group, "avl");
}

pub fn bench_all_range<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    bench_range::<BTreeMap<String, u64>, _>(group, "std_btree");
    bench_range::<OrderedMap<String, u64>, _>(group, "avl");
}
