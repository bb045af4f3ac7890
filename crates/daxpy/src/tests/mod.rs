// unit tests

use super::*;
use ndarray::Array1;
use proptest::prelude::*;
use rayon::ThreadPoolBuilder;

fn pool(threads: usize) -> ThreadPool {
    ThreadPoolBuilder::new().num_threads(threads).build().unwrap()
}

fn inputs(n: usize, seed: u64) -> (Array1<f64>, Array1<f64>, f64) {
    let team = pool(2);
    let mut source = SeededStreams::new(seed);
    let mut x = Array1::zeros(n);
    let mut y = Array1::zeros(n);
    source.fill(x.view_mut(), &team);
    source.fill(y.view_mut(), &team);
    (x, y, source.scalar())
}

fn reference(x: &Array1<f64>, y: &Array1<f64>, a: f64) -> Array1<f64> {
    let mut expected = y.clone();
    daxpy_sequential(x.view(), expected.view_mut(), a);
    expected
}

#[test]
fn sequential_matches_formula() {
    let x = Array1::from(vec![1.0, 2.0, 3.0]);
    let mut y = Array1::from(vec![10.0, 20.0, 30.0]);
    daxpy_sequential(x.view(), y.view_mut(), 0.5);
    assert_eq!(y, Array1::from(vec![10.5, 21.0, 31.5]));
}

#[test]
fn static_four_workers_n_1000() {
    let (x, mut y, a) = inputs(1000, 5);
    let expected = reference(&x, &y, a);
    let x_before = x.clone();

    let dist = daxpy_static(x.view(), y.view_mut(), a, &pool(4));

    assert_eq!(y, expected);
    assert_eq!(x, x_before);
    assert_eq!(dist.units_per_worker, vec![1, 1, 1, 1]);
}

#[test]
fn dynamic_two_workers_n_250() {
    let (x, y, a) = inputs(250, 9);
    let team = pool(2);

    let mut y_static = y.clone();
    daxpy_static(x.view(), y_static.view_mut(), a, &team);

    let mut y_dynamic = y.clone();
    let dist = daxpy_dynamic(x.view(), y_dynamic.view_mut(), a, DEFAULT_CHUNK_SIZE, &team);

    assert_eq!(dist.units_per_worker.len(), 2);
    assert_eq!(dist.total_units(), 3);
    // bit-for-bit, not approximately
    assert!(
        y_static
            .iter()
            .zip(y_dynamic.iter())
            .all(|(s, d)| s.to_bits() == d.to_bits())
    );
}

#[test]
fn empty_vectors_are_untouched() {
    let team = pool(3);
    for policy in [
        SchedulingPolicy::StaticBlocks,
        SchedulingPolicy::DynamicChunks {
            chunk_size: DEFAULT_CHUNK_SIZE,
        },
    ] {
        let x = Array1::<f64>::zeros(0);
        let mut y = Array1::<f64>::zeros(0);
        let dist = daxpy(x.view(), y.view_mut(), 2.0, policy, &team);
        assert!(y.is_empty());
        assert_eq!(dist.total_units(), 0);
    }
}

#[test]
fn one_worker_matches_eight() {
    let (x, y, a) = inputs(4321, 17);
    let one = pool(1);
    let eight = pool(8);

    for policy in [
        SchedulingPolicy::StaticBlocks,
        SchedulingPolicy::DynamicChunks { chunk_size: 100 },
    ] {
        let mut y1 = y.clone();
        let mut y8 = y.clone();
        daxpy(x.view(), y1.view_mut(), a, policy, &one);
        daxpy(x.view(), y8.view_mut(), a, policy, &eight);
        assert_eq!(y1, y8);
    }
}

#[test]
fn dynamic_single_worker_takes_every_chunk() {
    let (x, mut y, a) = inputs(1050, 2);
    let dist = daxpy_dynamic(x.view(), y.view_mut(), a, 100, &pool(1));
    assert_eq!(dist.units_per_worker, vec![11]);
}

#[test]
fn static_more_workers_than_elements() {
    let x = Array1::from(vec![1.0, 1.0]);
    let mut y = Array1::from(vec![0.0, 0.0]);
    let dist = daxpy_static(x.view(), y.view_mut(), 3.0, &pool(5));

    assert_eq!(y, Array1::from(vec![3.0, 3.0]));
    assert_eq!(dist.active_workers(), 2);
}

#[test]
fn rerun_from_identical_buffers_is_repeatable() {
    let (x, y, a) = inputs(777, 23);
    let team = pool(4);
    let policy = SchedulingPolicy::DynamicChunks { chunk_size: 100 };

    let mut first = y.clone();
    let mut second = y.clone();
    daxpy(x.view(), first.view_mut(), a, policy, &team);
    daxpy(x.view(), second.view_mut(), a, policy, &team);
    assert_eq!(first, second);
}

#[test]
#[should_panic(expected = "same length")]
fn mismatched_lengths_panic() {
    let x = Array1::<f64>::zeros(3);
    let mut y = Array1::<f64>::zeros(4);
    daxpy_static(x.view(), y.view_mut(), 1.0, &pool(1));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn policies_agree_with_sequential(
        values in prop::collection::vec((-1.0e6f64..1.0e6, -1.0e6f64..1.0e6), 0..600),
        a in -1.0e3f64..1.0e3,
        threads in 1usize..9,
        chunk_size in 1usize..150,
    ) {
        let x: Array1<f64> = values.iter().map(|v| v.0).collect();
        let y: Array1<f64> = values.iter().map(|v| v.1).collect();
        let expected = reference(&x, &y, a);
        let team = pool(threads);

        let mut y_static = y.clone();
        daxpy_static(x.view(), y_static.view_mut(), a, &team);

        let mut y_dynamic = y.clone();
        let dist = daxpy_dynamic(x.view(), y_dynamic.view_mut(), a, chunk_size, &team);

        prop_assert_eq!(&y_static, &expected);
        prop_assert_eq!(&y_dynamic, &expected);
        prop_assert_eq!(dist.total_units(), schedule::dynamic_chunk_count(x.len(), chunk_size));
    }
}
