use super::*;

define_idx!(TestId);

#[test]
fn push_and_index() {
    let mut v: IndexVec<TestId, &'static str> = IndexVec::new();
    let a = v.push("a");
    let b = v.push("b");
    assert_eq!(v[a], "a");
    assert_eq!(v[b], "b");
    assert_eq!(v.len(), 2);
}

#[test]
fn next_index_before_push() {
    let mut v: IndexVec<TestId, i32> = IndexVec::new();
    let next = v.next_index();
    let pushed = v.push(42);
    assert_eq!(next, pushed);
}

#[test]
fn iter_enumerated_matches_indices() {
    let mut v: IndexVec<TestId, i32> = IndexVec::new();
    v.push(10);
    v.push(20);
    let collected: Vec<_> = v.iter_enumerated().map(|(i, val)| (i.0, *val)).collect();
    assert_eq!(collected, vec![(0, 10), (1, 20)]);
}

#[test]
fn get_out_of_bounds_is_none() {
    let v: IndexVec<TestId, i32> = IndexVec::new();
    assert!(v.get(TestId(0)).is_none());
}
