use super::*;

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

use crate::algorithms::search;

fn assert_strictly_ascending<T: Ord + core::fmt::Debug>(items: &[T]) {
    for pair in items.windows(2) {
        assert!(pair[0] < pair[1], "out of order: {:?} then {:?}", pair[0], pair[1]);
    }
}

#[derive(Clone, Debug)]
enum MapOp {
    Set(i16, u32),
    Add(i16, u32),
    Remove(i16),
    Get(i16),
    Rename(i16, i16),
    Move(i16, i16),
    Swap(i16, i16),
}

fn key_strategy() -> impl Strategy<Value = i16> + Clone {
    // A narrow key space keeps collisions, renames onto live keys and swaps frequent.
    -40i16..40
}

fn map_ops_strategy() -> impl Strategy<Value = Vec<MapOp>> {
    let key = key_strategy();
    let op = prop_oneof![
        30 => (key.clone(), any::<u32>()).prop_map(|(k, v)| MapOp::Set(k, v)),
        15 => (key.clone(), any::<u32>()).prop_map(|(k, v)| MapOp::Add(k, v)),
        15 => key.clone().prop_map(MapOp::Remove),
        10 => key.clone().prop_map(MapOp::Get),
        12 => (key.clone(), key.clone()).prop_map(|(a, b)| MapOp::Rename(a, b)),
        10 => (key.clone(), key.clone()).prop_map(|(a, b)| MapOp::Move(a, b)),
        8 => (key.clone(), key.clone()).prop_map(|(a, b)| MapOp::Swap(a, b)),
    ];
    prop::collection::vec(op, 0..=400)
}

fn model_rename(m: &mut BTreeMap<i16, u32>, source: i16, target: i16) -> Result<()> {
    if !m.contains_key(&source) {
        return Err(Error::UnknownKey);
    }
    if source == target {
        return Ok(());
    }
    if m.contains_key(&target) {
        return Err(Error::DuplicateKey);
    }
    if let Some(v) = m.remove(&source) {
        m.insert(target, v);
    }
    Ok(())
}

fn model_move(m: &mut BTreeMap<i16, u32>, source: i16, target: i16) -> Result<()> {
    let Some(v) = m.remove(&source) else {
        return Err(Error::UnknownKey);
    };
    m.insert(target, v);
    Ok(())
}

fn model_swap(m: &mut BTreeMap<i16, u32>, a: i16, b: i16) -> Result<()> {
    let (Some(&va), Some(&vb)) = (m.get(&a), m.get(&b)) else {
        return Err(Error::UnknownKey);
    };
    m.insert(a, vb);
    m.insert(b, va);
    Ok(())
}

fn set_strategy() -> impl Strategy<Value = Vec<i16>> {
    prop::collection::vec(-30i16..30, 0..=40)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_sorted_map_matches_btree_model(ops in map_ops_strategy()) {
        let mut t: SortedMap<i16, u32> = SortedMap::new();
        let mut m: BTreeMap<i16, u32> = BTreeMap::new();

        for op in ops {
            match op {
                MapOp::Set(k, v) => {
                    prop_assert_eq!(t.set(k, v), m.insert(k, v));
                }
                MapOp::Add(k, v) => {
                    let expected = if m.contains_key(&k) {
                        Err(Error::DuplicateKey)
                    } else {
                        m.insert(k, v);
                        Ok(())
                    };
                    prop_assert_eq!(t.add(k, v), expected);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(t.try_remove(&k), m.remove(&k));
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(t.try_get(&k), m.get(&k));
                }
                MapOp::Rename(a, b) => {
                    let expected = model_rename(&mut m, a, b);
                    prop_assert_eq!(t.rename(&a, b), expected);
                }
                MapOp::Move(a, b) => {
                    let expected = model_move(&mut m, a, b);
                    prop_assert_eq!(t.move_key(&a, b), expected);
                }
                MapOp::Swap(a, b) => {
                    let expected = model_swap(&mut m, a, b);
                    prop_assert_eq!(t.swap(&a, &b), expected);
                }
            }
            prop_assert_eq!(t.len(), m.len());
        }

        let keys: Vec<i16> = t.keys().copied().collect();
        assert_strictly_ascending(&keys);
        let got: Vec<(i16, u32)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(i16, u32)> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_sorted_set_matches_btree_model(xs in set_strategy(), removals in set_strategy()) {
        let mut s: SortedSet<i16> = SortedSet::new();
        let mut m: BTreeSet<i16> = BTreeSet::new();
        for x in &xs {
            prop_assert_eq!(s.try_add(*x), m.insert(*x));
        }
        for x in &removals {
            prop_assert_eq!(s.try_remove(x), m.take(x));
        }
        assert_strictly_ascending(s.as_slice());
        prop_assert_eq!(s.as_slice().to_vec(), m.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn prop_set_algebra_matches_btree(xs in set_strategy(), ys in set_strategy()) {
        let a: SortedSet<i16> = xs.iter().copied().collect();
        let b: SortedSet<i16> = ys.iter().copied().collect();
        let ma: BTreeSet<i16> = xs.into_iter().collect();
        let mb: BTreeSet<i16> = ys.into_iter().collect();

        let union = a.union(&b).unwrap();
        let inter = a.intersect(&b).unwrap();
        let diff = a.diff(&b).unwrap();
        let sym = a.symmetric_diff(&b).unwrap();

        prop_assert_eq!(union.as_slice().to_vec(), ma.union(&mb).copied().collect::<Vec<_>>());
        prop_assert_eq!(inter.as_slice().to_vec(), ma.intersection(&mb).copied().collect::<Vec<_>>());
        prop_assert_eq!(diff.as_slice().to_vec(), ma.difference(&mb).copied().collect::<Vec<_>>());
        prop_assert_eq!(sym.as_slice().to_vec(), ma.symmetric_difference(&mb).copied().collect::<Vec<_>>());

        prop_assert_eq!(a.is_subset(&b).unwrap(), ma.is_subset(&mb));
        prop_assert_eq!(a.is_superset(&b).unwrap(), ma.is_superset(&mb));
        prop_assert_eq!(a.is_intersecting(&b).unwrap(), !ma.is_disjoint(&mb));
        prop_assert_eq!(a.is_equal_set(&b).unwrap(), ma == mb);
        prop_assert_eq!(a.is_proper_subset(&b).unwrap(), ma.is_subset(&mb) && ma.len() < mb.len());
    }

    #[test]
    fn prop_set_algebra_laws(xs in set_strategy(), ys in set_strategy()) {
        let a: SortedSet<i16> = xs.into_iter().collect();
        let b: SortedSet<i16> = ys.into_iter().collect();

        prop_assert!(a.union(&b).unwrap().is_equal_set(&b.union(&a).unwrap()).unwrap());
        let inter = a.intersect(&b).unwrap();
        prop_assert!(inter.is_subset(&a).unwrap());
        prop_assert!(inter.is_subset(&b).unwrap());
        prop_assert!(!a.diff(&b).unwrap().is_intersecting(&b).unwrap());
        let sym = a.symmetric_diff(&b).unwrap();
        let via_union = a.union(&b).unwrap().diff(&inter).unwrap();
        prop_assert!(sym.is_equal_set(&via_union).unwrap());
    }

    #[test]
    fn prop_in_place_equals_allocating(xs in set_strategy(), ys in set_strategy()) {
        let a: SortedSet<i16> = xs.into_iter().collect();
        let b: SortedSet<i16> = ys.into_iter().collect();

        let mut x = a.clone();
        x.union_with(&b).unwrap();
        prop_assert_eq!(&x, &a.union(&b).unwrap());

        let mut x = a.clone();
        x.intersect_with(&b).unwrap();
        prop_assert_eq!(&x, &a.intersect(&b).unwrap());

        let mut x = a.clone();
        x.diff_with(&b).unwrap();
        prop_assert_eq!(&x, &a.diff(&b).unwrap());

        let mut x = a.clone();
        x.symmetric_diff_with(&b).unwrap();
        prop_assert_eq!(&x, &a.symmetric_diff(&b).unwrap());
    }

    #[test]
    fn prop_bounds_count_elements(mut xs in prop::collection::vec(-20i32..20, 0..=60), t in -25i32..25) {
        xs.sort();
        let cmp = Comparator::natural();
        let below = xs.iter().filter(|x| **x < t).count();
        let at_or_below = xs.iter().filter(|x| **x <= t).count();
        prop_assert_eq!(search::lower_bound(&xs, &t, &cmp), below);
        prop_assert_eq!(search::upper_bound(&xs, &t, &cmp), at_or_below);
        match search::binary_search(&xs, &t, &cmp) {
            Ok(i) => {
                prop_assert_eq!(xs[i], t);
                prop_assert_eq!(i, below);
            }
            Err(i) => {
                prop_assert!(!xs.contains(&t));
                prop_assert_eq!(i, below);
            }
        }
    }

    #[test]
    fn prop_vector_negative_indexing(xs in prop::collection::vec(any::<u8>(), 1..=30)) {
        let v: Vector<u8> = xs.iter().copied().collect();
        let len = xs.len() as isize;
        for i in -len..len {
            let expected = xs[i.rem_euclid(len) as usize];
            prop_assert_eq!(v.get(i), Ok(&expected));
        }
        prop_assert!(v.get(len).is_err());
        prop_assert!(v.get(-len - 1).is_err());
    }

    #[test]
    fn prop_vector_insert_many_matches_splice(
        xs in prop::collection::vec(any::<u8>(), 0..=20),
        ys in prop::collection::vec(any::<u8>(), 0..=20),
        at in 0usize..=20,
        unsized_source in any::<bool>(),
    ) {
        let at = at.min(xs.len());
        let mut v: Vector<u8> = xs.iter().copied().collect();
        let inserted = if unsized_source {
            v.insert_many(at as isize, ys.iter().copied().filter(|_| true)).unwrap()
        } else {
            v.insert_many(at as isize, ys.iter().copied()).unwrap()
        };
        let mut model = xs.clone();
        model.splice(at..at, ys.iter().copied());
        prop_assert_eq!(inserted, ys.len());
        prop_assert_eq!(v.as_slice(), model.as_slice());
    }

    #[test]
    fn prop_vector_failed_validation_rolls_back(
        xs in prop::collection::vec(0u8..100, 0..=20),
        ys in prop::collection::vec(0u8..120, 1..=20),
        at in 0usize..=20,
    ) {
        let at = at.min(xs.len());
        let mut v: Vector<u8> = xs.iter().copied().collect();
        let result = v.try_insert_many(at as isize, ys.iter().copied(), |x| {
            if *x < 100 { Ok(()) } else { Err(Error::InvalidElement(format!("{x}"))) }
        });
        if ys.iter().all(|y| *y < 100) {
            prop_assert_eq!(result, Ok(ys.len()));
        } else {
            prop_assert!(matches!(result, Err(Error::InvalidElement(_))));
            prop_assert_eq!(v.as_slice(), xs.as_slice());
        }
    }

    #[test]
    fn prop_priority_queue_is_stable_by_priority(items in prop::collection::vec(0u8..4, 0..=60)) {
        let by_priority = Comparator::new(|a: &(u8, usize), b: &(u8, usize)| a.0.cmp(&b.0));
        let mut q = PriorityQueue::with_comparator(by_priority);
        for (seq, p) in items.iter().enumerate() {
            q.push((*p, seq));
        }
        let mut expected: Vec<(u8, usize)> = items.iter().copied().zip(0..).collect();
        expected.sort_by(|a, b| b.0.cmp(&a.0));
        prop_assert_eq!(q.into_sorted_vec(), expected);
    }
}

#[cfg(feature = "serde")]
proptest! {
    #[test]
    fn prop_serde_roundtrip(xs in set_strategy(), entries in prop::collection::vec((any::<u16>(), any::<i32>()), 0..=30)) {
        let set: SortedSet<i16> = xs.into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        let back: SortedSet<i16> = serde_json::from_str(&json).unwrap();
        prop_assert!(back.is_equal_set(&set).unwrap());

        let map: SortedMap<String, i32> = entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        let json = serde_json::to_string(&map).unwrap();
        let back: SortedMap<String, i32> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, map);
    }
}

#[test]
fn test_scenarios_end_to_end() {
    let mut m = SortedMap::new();
    for k in [5, 2, 8] {
        m.set(k, ());
    }
    assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec![2, 5, 8]);

    let s: SortedSet<i32> = [3, 1, 2, 1].into_iter().collect();
    assert_eq!(s.as_slice(), &[1, 2, 3]);

    let a: SortedSet<i32> = [1, 2, 3].into_iter().collect();
    let b: SortedSet<i32> = [3, 4, 5].into_iter().collect();
    assert_eq!(a.union(&b).unwrap().as_slice(), &[1, 2, 3, 4, 5]);

    let c: SortedSet<i32> = [2, 3, 4].into_iter().collect();
    assert_eq!(a.intersect(&c).unwrap().as_slice(), &[2, 3]);

    let mut r: SortedMap<i32, ()> = [1, 2, 3].into_iter().map(|k| (k, ())).collect();
    r.rename(&2, 10).unwrap();
    assert_eq!(r.keys().copied().collect::<Vec<_>>(), vec![1, 3, 10]);
    assert_eq!(r.rename(&1, 3), Err(Error::DuplicateKey));
    r.rename(&3, 3).unwrap();

    let cmp = Comparator::natural();
    assert_eq!(search::binary_search(&[1, 3, 5, 7], &4, &cmp), Err(2));
}
