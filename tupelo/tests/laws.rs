use {
    quickcheck::{Gen, QuickCheck, TestResult},
    tupelo::{DynTuple, Error, Value, MAX_DEPTH},
};

/// Generated vectors are at most `MAX_DEPTH` long, so few cases are discarded.
fn checker() -> QuickCheck {
    QuickCheck::new().rng(Gen::new(MAX_DEPTH + 1))
}

fn tuple_of(values: &[i64]) -> DynTuple {
    DynTuple::from_values(values.iter().copied().map(Value::new)).unwrap()
}

fn ints(tuple: &DynTuple) -> Vec<i64> {
    tuple
        .iter()
        .map(|v| *v.downcast_ref::<i64>().unwrap())
        .collect()
}

fn splice_then_join_is_identity(values: Vec<i64>, position: usize) -> TestResult {
    if values.len() < 2 || values.len() > MAX_DEPTH {
        return TestResult::discard();
    }
    let t = tuple_of(&values);
    let position = 1 + position % (values.len() - 1);
    let (head, tail) = t.splice(position).unwrap();
    TestResult::from_bool(
        head.depth() == position - 1
            && tail.depth() == t.depth() - head.depth()
            && head.join(&tail).unwrap() == t,
    )
}

fn truncate_and_hop_are_complementary(values: Vec<i64>, position: usize) -> TestResult {
    if values.is_empty() || values.len() > MAX_DEPTH {
        return TestResult::discard();
    }
    let t = tuple_of(&values);
    let position = 1 + position % values.len();
    let rebuilt = t
        .truncate(position)
        .unwrap()
        .join(&t.hop(position).unwrap())
        .unwrap();
    TestResult::from_bool(rebuilt == t)
}

fn depth_is_additive(left: Vec<i64>, right: Vec<i64>) -> TestResult {
    if left.len() > MAX_DEPTH || right.len() > MAX_DEPTH {
        return TestResult::discard();
    }
    let joined = tuple_of(&left).join(&tuple_of(&right));
    let depth = left.len() + right.len();
    TestResult::from_bool(match joined {
        Ok(joined) => depth <= MAX_DEPTH && joined.depth() == depth,
        Err(Error::Overflow { depth: reported }) => depth > MAX_DEPTH && reported == depth,
        Err(_) => false,
    })
}

fn full_rotation_is_identity(values: Vec<i64>, n: usize) -> TestResult {
    if values.len() > MAX_DEPTH {
        return TestResult::discard();
    }
    let t = tuple_of(&values);
    TestResult::from_bool(
        t.rotate_right(t.depth()) == t
            && t.rotate_left(n).rotate_right(n) == t
            && t.rotate_right(n).rotate_left(n) == t,
    )
}

fn rotation_matches_slice_rotation(values: Vec<i64>, n: usize) -> TestResult {
    if values.is_empty() || values.len() > MAX_DEPTH {
        return TestResult::discard();
    }
    let mut expected = values.clone();
    expected.rotate_left(n % values.len());
    TestResult::from_bool(ints(&tuple_of(&values).rotate_left(n)) == expected)
}

fn remove_is_consistent_with_position_of(values: Vec<i64>, pick: usize) -> TestResult {
    if values.is_empty() || values.len() > MAX_DEPTH {
        return TestResult::discard();
    }
    let t = tuple_of(&values);
    let element = values[pick % values.len()];
    let position = t.position_of(&element);
    let removed = t.remove(position).unwrap();

    let mut expected = values.clone();
    let _ = expected.remove(position - 1);
    let remaining = expected.iter().position(|v| *v == element).map_or(0, |i| i + 1);
    TestResult::from_bool(
        removed.depth() == t.depth() - 1
            && ints(&removed) == expected
            && removed.position_of(&element) == remaining,
    )
}

fn identity_transform_preserves_shape(values: Vec<i64>, position: usize) -> TestResult {
    if values.is_empty() || values.len() > MAX_DEPTH {
        return TestResult::discard();
    }
    let t = tuple_of(&values);
    let position = 1 + position % values.len();
    TestResult::from_bool(t.transform(position, Value::clone).unwrap() == t)
}

fn factory_round_trips_in_order(values: Vec<i64>, offset: usize) -> TestResult {
    if values.len() > MAX_DEPTH {
        return TestResult::discard();
    }
    let offset = offset % 4;
    let source = (0..offset as i64).chain(values.iter().copied()).map(Value::new);
    match DynTuple::from_iter_at(source, offset, values.len()) {
        Ok(Some(t)) => TestResult::from_bool(ints(&t) == values),
        _ => TestResult::failed(),
    }
}

#[test]
fn join_splice_inverse() {
    checker().quickcheck(splice_then_join_is_identity as fn(_, _) -> TestResult)
}

#[test]
fn truncate_hop_complement() {
    checker().quickcheck(truncate_and_hop_are_complementary as fn(_, _) -> TestResult)
}

#[test]
fn depth_additivity_and_overflow() {
    checker().quickcheck(depth_is_additive as fn(_, _) -> TestResult)
}

#[test]
fn rotation_periodicity() {
    checker().quickcheck(full_rotation_is_identity as fn(_, _) -> TestResult);
    checker().quickcheck(rotation_matches_slice_rotation as fn(_, _) -> TestResult)
}

#[test]
fn remove_position_of_consistency() {
    checker().quickcheck(remove_is_consistent_with_position_of as fn(_, _) -> TestResult)
}

#[test]
fn transform_identity() {
    checker().quickcheck(identity_transform_preserves_shape as fn(_, _) -> TestResult)
}

#[test]
fn factory_round_trip() {
    checker().quickcheck(factory_round_trips_in_order as fn(_, _) -> TestResult)
}

#[test]
fn overflow_boundary() {
    let eight = tuple_of(&[0; 8]);
    let nine = tuple_of(&[0; 9]);
    assert_eq!(eight.join(&eight).unwrap().depth(), MAX_DEPTH);
    assert!(matches!(
        eight.join(&nine),
        Err(Error::Overflow { depth: 17 })
    ));
}
