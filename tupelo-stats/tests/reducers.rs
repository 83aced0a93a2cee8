use {
    quickcheck::{QuickCheck, TestResult},
    tupelo::{DynTuple, Value},
    tupelo_stats::{
        Counting, Joining, Mean, PartitioningBy, ReduceExt, StdDev, Teeing, ToTuple, Variance,
    },
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

fn mean_matches_naive_mean(values: Vec<i16>) -> TestResult {
    if values.is_empty() {
        return TestResult::from_bool(values.into_iter().reduce_with(Mean::new()).is_none());
    }
    let naive = values.iter().map(|&x| f64::from(x)).sum::<f64>() / values.len() as f64;
    let streamed = values.into_iter().reduce_with(Mean::new());
    TestResult::from_bool(streamed.map_or(false, |m| close(m, naive)))
}

fn variance_matches_two_pass_variance(values: Vec<i16>) -> TestResult {
    if values.len() < 2 {
        return TestResult::discard();
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&x| f64::from(x)).sum::<f64>() / n;
    let squares = values
        .iter()
        .map(|&x| (f64::from(x) - mean).powi(2))
        .sum::<f64>();
    let population = values.iter().copied().reduce_with(Variance::new());
    let sample = values.iter().copied().reduce_with(Variance::sample());
    let deviation = values.iter().copied().reduce_with(StdDev::new());
    TestResult::from_bool(
        population.map_or(false, |v| close(v, squares / n))
            && sample.map_or(false, |v| close(v, squares / (n - 1.0)))
            && deviation.map_or(false, |d| close(d, (squares / n).sqrt())),
    )
}

fn partition_preserves_every_item(values: Vec<u32>) -> bool {
    let (even, odd) = values
        .iter()
        .copied()
        .reduce_with(PartitioningBy::new(|n: &u32| n % 2 == 0));
    even.iter().all(|n| n % 2 == 0)
        && odd.iter().all(|n| n % 2 == 1)
        && even.len() + odd.len() == values.len()
}

fn joining_matches_join(values: Vec<u8>) -> bool {
    let expected = values
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join("/");
    values.iter().reduce_with(Joining::with_affixes("/", "(", ")")) == format!("({})", expected)
}

#[test]
fn mean() {
    QuickCheck::new().quickcheck(mean_matches_naive_mean as fn(_) -> TestResult)
}

#[test]
fn variance() {
    QuickCheck::new().quickcheck(variance_matches_two_pass_variance as fn(_) -> TestResult)
}

#[test]
fn partitioning() {
    QuickCheck::new().quickcheck(partition_preserves_every_item as fn(_) -> bool)
}

#[test]
fn joining() {
    QuickCheck::new().quickcheck(joining_matches_join as fn(_) -> bool)
}

#[test]
fn teeing_nests() {
    let summary = (1..=4).reduce_with(Teeing::new(
        Counting::new(),
        Teeing::new(Joining::new("+"), Counting::new()),
    ));
    let (count, inner) = summary.to_tuple();
    assert_eq!(count, 4);
    assert_eq!(inner.to_tuple(), (String::from("1+2+3+4"), 4));
}

#[test]
fn to_tuple_agrees_with_the_factory() {
    let source = || (0..10).map(Value::new);
    for offset in 0..12 {
        for depth in 0..=4 {
            let reduced = source().reduce_with(ToTuple::at(offset, depth).unwrap());
            let built = DynTuple::from_iter_at(source(), offset, depth).unwrap();
            assert_eq!(reduced, built, "offset {} depth {}", offset, depth);
        }
    }
}
