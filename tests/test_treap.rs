use rand::{thread_rng, Rng};
use treap_collections::treap::{TreapMap, TreapSet};

const NUM_OF_OPERATIONS: usize = 10_000;

#[test]
fn int_test_treap_map() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = TreapMap::new();
    let mut expected = Vec::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen::<u32>();
        let val = rng.gen::<u64>();

        map.insert(key, val);
        expected.push((key, val));
    }

    expected.reverse();
    expected.sort_by(|l, r| l.0.cmp(&r.0));
    expected.dedup_by_key(|pair| pair.0);

    assert_eq!(map.len(), expected.len());

    assert_eq!(map.min(), Some(&expected[0].0));
    assert_eq!(map.max(), Some(&expected[expected.len() - 1].0));

    for entry in &expected {
        assert!(map.contains_key(&entry.0));
        assert_eq!(map.get(&entry.0), Some(&entry.1));
    }

    assert_eq!(
        map.iter().collect::<Vec<(&u32, &u64)>>(),
        expected.iter().map(|pair| (&pair.0, &pair.1)).collect::<Vec<(&u32, &u64)>>(),
    );

    thread_rng().shuffle(&mut expected);

    let mut expected_len = expected.len();

    for entry in expected {
        let old_entry = map.remove(&entry.0);
        expected_len -= 1;
        assert_eq!(old_entry, Some((entry.0, entry.1)));
        assert_eq!(map.len(), expected_len);
    }

    assert!(map.is_empty());
}

#[test]
fn int_test_treap_set() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = TreapSet::new();
    let mut expected = Vec::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen::<u32>();

        set.insert(key);
        expected.push(key);
    }

    expected.sort();
    expected.dedup();

    assert_eq!(set.len(), expected.len());
    assert_eq!(
        set.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );

    thread_rng().shuffle(&mut expected);

    for key in expected {
        assert_eq!(set.remove(&key), Some(key));
        assert!(!set.contains(&key));
    }

    assert!(set.is_empty());
}
