use std::collections::BTreeMap;
use std::ops::Bound;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::prelude::random;
use rand::{rngs::SmallRng, SeedableRng};

use crate::empty::Empty;
use crate::error::LlrbError;
use crate::llrb::Llrb;

#[test]
fn test_id() {
    let llrb: Llrb<i64, i64> = Llrb::new("test-llrb");
    assert_eq!(llrb.id(), "test-llrb".to_string());
}

#[test]
fn test_len() {
    let llrb: Llrb<i64, i64> = Llrb::new("test-llrb");
    assert_eq!(llrb.len(), 0);
    assert!(llrb.is_empty());
    assert!(llrb.iter().next().is_none());
    assert!(llrb.validate().unwrap().depths().is_none());
}

#[test]
fn test_insert() {
    let mut llrb: Llrb<i64, i64> = Llrb::new("test-llrb");
    let mut refns = RefNodes::new(10);

    for key in &[2, 1, 3, 6, 5, 4, 8, 0, 9, 7] {
        assert!(llrb.insert(*key, 10).is_none());
        refns.insert(*key, 10);
        assert!(llrb.validate().is_ok());
    }

    assert_eq!(llrb.len(), 10);
    for i in 0..10 {
        assert_eq!(llrb.get(&i), refns.get(i));
        assert!(llrb.contains_key(&i));
    }
    assert!(llrb.get(&10).is_none());
    assert!(!llrb.contains_key(&-1));
    assert_same(llrb.iter(), refns.iter());
}

#[test]
fn test_overwrite() {
    let mut llrb: Llrb<i64, i64> = Llrb::new("test-llrb");
    assert_eq!(llrb.insert(1, 10), None);
    assert_eq!(llrb.insert(1, 20), Some(10));
    assert_eq!(llrb.get(&1), Some(20));
    assert_eq!(llrb.len(), 1);

    for key in 0..100 {
        llrb.insert(key, key);
    }
    let before_items: Vec<(i64, i64)> = llrb.iter().collect();

    for key in 0..100 {
        assert_eq!(llrb.insert(key, key), Some(key));
    }
    assert!(llrb.validate().is_ok());
    let after_items: Vec<(i64, i64)> = llrb.iter().collect();

    assert_eq!(llrb.len(), 100);
    assert_eq!(before_items, after_items);
}

#[test]
fn test_small_scenario() {
    let mut llrb: Llrb<i64, i64> = Llrb::new("test-llrb");
    for key in &[5, 3, 7, 2, 4, 6, 8] {
        llrb.insert(*key, key * 100);
    }
    assert_eq!(llrb.get(&7), Some(700));

    assert_eq!(llrb.delete(&7), Some(700));
    assert_eq!(llrb.get(&7), None);
    assert_eq!(llrb.get(&6), Some(600));
    assert!(llrb.validate().is_ok());

    let keys: Vec<i64> = llrb.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec![2, 3, 4, 5, 6, 8]);
}

#[test]
fn test_delete_even() {
    let mut llrb: Llrb<i64, i64> = Llrb::new("test-llrb");
    for key in 1..=1000 {
        llrb.insert(key, key);
    }
    for key in (2..=1000).step_by(2) {
        assert_eq!(llrb.delete(&key), Some(key));
        assert!(llrb.validate().is_ok());
    }

    assert_eq!(llrb.len(), 500);
    let keys: Vec<i64> = llrb.iter().map(|(key, _)| key).collect();
    let odds: Vec<i64> = (1..=1000).step_by(2).collect();
    assert_eq!(keys, odds);

    let stats = llrb.validate().unwrap();
    let height = stats.depths().unwrap().max();
    assert!((height as f64) <= height_bound(500), "height {}", height);
}

#[test]
fn test_delete() {
    let mut llrb: Llrb<i64, i64> = Llrb::new("test-llrb");
    let mut refns = RefNodes::new(11);

    for key in &[2, 1, 3, 6, 5, 4, 8, 0, 9, 7] {
        assert!(llrb.insert(*key, 100).is_none());
        refns.insert(*key, 100);
    }

    // delete a missing node.
    let before: Vec<(i64, i64)> = llrb.iter().collect();
    assert!(llrb.delete(&10).is_none());
    assert!(refns.delete(10).is_none());
    assert_eq!(llrb.len(), 10);
    assert!(llrb.validate().is_ok());
    assert_eq!(llrb.iter().collect::<Vec<(i64, i64)>>(), before);
    assert_same(llrb.iter(), refns.iter());

    // delete all entries, including a second delete on each key.
    for i in 0..10 {
        assert_eq!(llrb.delete(&i), refns.delete(i));
        assert_eq!(llrb.delete(&i), None);
        assert!(llrb.validate().is_ok());
    }
    assert_eq!(llrb.len(), 0);
    assert!(llrb.iter().next().is_none());

    // tree is usable after being emptied.
    assert!(llrb.delete(&1).is_none());
    llrb.insert(1, 1);
    assert_eq!(llrb.get(&1), Some(1));
}

#[test]
fn test_min_max() {
    let mut llrb: Llrb<i64, i64> = Llrb::new("test-llrb");
    assert_eq!(llrb.min(), Err(LlrbError::EmptyTree));
    assert_eq!(llrb.max(), Err(LlrbError::EmptyTree));
    assert_eq!(llrb.delete_min(), Err(LlrbError::EmptyTree));
    assert_eq!(llrb.delete_max(), Err(LlrbError::EmptyTree));

    for key in &[40, 10, 30, 50, 20] {
        llrb.insert(*key, key + 1);
    }
    assert_eq!(llrb.min(), Ok((10, 11)));
    assert_eq!(llrb.max(), Ok((50, 51)));
    assert_eq!(llrb.len(), 5);
}

#[test]
fn test_delete_min_max() {
    let mut llrb: Llrb<i64, i64> = Llrb::new("test-llrb");
    for key in 0..200 {
        llrb.insert(key, -key);
    }

    let (mut low, mut high) = (0, 199);
    while !llrb.is_empty() {
        if random::<bool>() {
            assert_eq!(llrb.delete_min(), Ok((low, -low)));
            low += 1;
        } else {
            assert_eq!(llrb.delete_max(), Ok((high, -high)));
            high -= 1;
        }
        assert!(llrb.validate().is_ok());
        assert_eq!(llrb.len() as i64, high - low + 1);
    }
    assert_eq!(llrb.delete_min(), Err(LlrbError::EmptyTree));
}

#[test]
fn test_load_from() {
    let items = vec![(3, 30), (1, 10), (2, 20), (1, 11)];
    let llrb: Llrb<i64, i64> = Llrb::load_from("test-llrb", items);
    assert_eq!(llrb.len(), 3);
    assert_eq!(llrb.get(&1), Some(11));
    assert!(llrb.validate().is_ok());

    let mut llrb = llrb;
    llrb.extend(vec![(4, 40), (2, 21)]);
    assert_eq!(llrb.len(), 4);
    let items: Vec<(i64, i64)> = llrb.iter().collect();
    assert_eq!(items, vec![(1, 11), (2, 21), (3, 30), (4, 40)]);
}

#[test]
fn test_iter_limit() {
    let mut llrb: Llrb<i64, i64> = Llrb::new("test-llrb");
    llrb.set_iter_limit(0);
    for key in 0..25 {
        llrb.insert(key, key);
    }

    for limit in &[1, 3, 7, 100] {
        llrb.set_iter_limit(*limit);
        let keys: Vec<i64> = llrb.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, (0..25).collect::<Vec<i64>>());
        // restart the traversal.
        assert_eq!(llrb.iter().next(), Some((0, 0)));

        let keys: Vec<i64> = llrb.range(5..9).map(|(key, _)| key).collect();
        assert_eq!(keys, vec![5, 6, 7, 8]);
        let keys: Vec<i64> = llrb.range(..=3).rev().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![3, 2, 1, 0]);
        let keys: Vec<i64> = llrb.range(20..).rev().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![24, 23, 22, 21, 20]);

        // inverted and empty windows.
        let inverted = (Bound::Included(9), Bound::Included(2));
        assert_eq!(llrb.range(inverted).count(), 0);
        assert_eq!(llrb.range(inverted).rev().count(), 0);
        assert_eq!(llrb.range((Bound::Excluded(4), Bound::Excluded(5))).count(), 0);
    }
}

#[test]
fn test_set_of_keys() {
    let mut llrb: Llrb<String, Empty> = Llrb::new("test-llrb");
    for key in &["pear", "apple", "fig", "kiwi"] {
        assert!(llrb.insert(key.to_string(), Empty).is_none());
    }
    assert!(llrb.contains_key("fig"));
    assert_eq!(llrb.delete("apple"), Some(Empty));
    assert!(llrb.get("apple").is_none());
    assert_eq!(llrb.min(), Ok(("fig".to_string(), Empty)));
    assert!(llrb.validate().is_ok());
}

#[test]
fn test_random() {
    let mut llrb: Llrb<i64, i64> = Llrb::new("test-llrb");
    let mut rng = SmallRng::from_seed(make_seed().to_le_bytes());

    assert_eq!(llrb.random(&mut rng), None);

    assert!(llrb.insert(0, 0).is_none());
    assert_eq!(llrb.random(&mut rng), Some((0, 0)));
    assert_eq!(llrb.random(&mut rng), Some((0, 0)));

    for key in 1..100_000 {
        assert!(llrb.insert(key, key * 10).is_none());
    }
    for _i in 0..200_000 {
        let (key, value) = llrb.random(&mut rng).unwrap();
        assert!(key >= 0 && key < 100_000);
        assert_eq!(value, key * 10);
    }
}

#[test]
fn test_error_display() {
    let err: LlrbError<i64> = LlrbError::SortError(3, 2);
    assert_eq!(err.to_string(), "sort error, 3 against ancestor 2");
    let err: LlrbError<i64> = LlrbError::EmptyTree;
    assert_eq!(err.to_string(), "map is empty");
}

#[test]
fn test_crud() {
    let size = 1000;
    let mut llrb: Llrb<i64, i64> = Llrb::new("test-llrb");
    let mut refns = RefNodes::new(size);

    for _ in 0..100_000 {
        let key: i64 = (random::<i64>() % (size as i64)).abs();
        let value: i64 = random();
        match random::<u8>() % 4 {
            0 | 1 => assert_eq!(llrb.insert(key, value), refns.insert(key, value)),
            2 => assert_eq!(llrb.delete(&key), refns.delete(key)),
            _ => assert_eq!(llrb.get(&key), refns.get(key)),
        };

        assert!(llrb.validate().is_ok());
        assert_eq!(llrb.len(), refns.len());
    }

    assert_eq!(llrb.min().ok(), refns.min());
    assert_eq!(llrb.max().ok(), refns.max());
    assert_same(llrb.iter(), refns.iter());

    let stats = llrb.validate().unwrap();
    if let Some(depths) = stats.depths() {
        assert!((depths.max() as f64) <= height_bound(llrb.len()));
    }

    // ranges and reverses
    for _ in 0..10_000 {
        let (low, high) = random_low_high(size);
        assert_same(llrb.range((low, high)), refns.range(low, high));
        assert_same(llrb.range((low, high)).rev(), refns.reverse(low, high));
    }
}

mod proptests {
    use proptest::prelude::*;

    use super::*;

    const PROPTEST_CASES: u32 = 200;

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i64, i64),
        Delete(i64),
        Get(i64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..200i64, any::<i64>()).prop_map(|(key, value)| Op::Insert(key, value)),
            (0..200i64).prop_map(Op::Delete),
            (0..200i64).prop_map(Op::Get),
        ]
    }

    proptest!(
        #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

        #[test]
        fn ops_match_reference(ops in proptest::collection::vec(op(), 0..500)) {
            let mut llrb: Llrb<i64, i64> = Llrb::new("prop-llrb");
            let mut reference = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(key, value) => {
                        prop_assert_eq!(llrb.insert(key, value), reference.insert(key, value));
                    }
                    Op::Delete(key) => {
                        prop_assert_eq!(llrb.delete(&key), reference.remove(&key));
                    }
                    Op::Get(key) => {
                        prop_assert_eq!(llrb.get(&key), reference.get(&key).cloned());
                    }
                }
                let stats = llrb.validate();
                prop_assert!(stats.is_ok(), "{:?}", stats.err());
                prop_assert_eq!(llrb.len(), reference.len());
            }

            let items: Vec<(i64, i64)> = llrb.iter().collect();
            let ref_items: Vec<(i64, i64)> = reference.into_iter().collect();
            prop_assert_eq!(items, ref_items);
        }

        #[test]
        fn height_is_logarithmic(keys in proptest::collection::hash_set(any::<i32>(), 1..2000)) {
            let llrb: Llrb<i32, Empty> = Llrb::load_from("prop-llrb", keys.iter().map(|k| (*k, Empty)));
            let stats = llrb.validate().unwrap();
            let height = stats.depths().unwrap().max();
            prop_assert!((height as f64) <= height_bound(keys.len()));
            prop_assert_eq!(stats.entries(), keys.len());
        }
    );
}

fn make_seed() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

include!("./ref_test.rs");
