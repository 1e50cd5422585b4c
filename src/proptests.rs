use crate::{map::Map, utilities::IdentityHashBuilder};
use proptest::prelude::*;
use std::{collections::HashMap, hash::BuildHasher};

#[derive(Clone, Debug)]
enum Op {
    Put(u64, u64),
    Remove(u64),
    Get(u64),
}

fn spread_key() -> impl Strategy<Value = u64> + Clone {
    0u64..4096
}

// Pairs of these keys agree on the 30 hash bits used for branching under
// the identity hasher.
fn colliding_key() -> impl Strategy<Value = u64> + Clone {
    (0u64..16, any::<bool>()).prop_map(|(low, high)| if high { low ^ 0xc000_c000 } else { low })
}

fn ops_strategy(key: impl Strategy<Value = u64> + Clone) -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Put(k, v)),
        30 => key.clone().prop_map(Op::Remove),
        20 => key.prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=300)
}

fn check_ops<S: BuildHasher + Clone>(
    map: Map<u64, u64, S>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut versions = vec![(map, HashMap::new())];

    for op in ops {
        let (map, model) = &versions[versions.len() - 1];
        let (mut map, mut model) = (map.clone(), model.clone());

        match op {
            Op::Put(key, value) => {
                map = map.put(key, value).unwrap();
                model.insert(key, value);
                prop_assert_eq!(map.get(&key), Some(&value));
            }
            Op::Remove(key) => {
                map = map.remove(&key).unwrap();
                model.remove(&key);
                prop_assert!(!map.contains_key(&key));
            }
            Op::Get(key) => {
                prop_assert_eq!(map.get(&key), model.get(&key));
            }
        }

        prop_assert_eq!(map.len(), model.len());
        prop_assert_eq!(map.is_empty(), model.is_empty());
        prop_assert!(map.is_normal());

        versions.push((map, model));
    }

    for (map, model) in &versions {
        prop_assert_eq!(map.len(), model.len());

        for (key, value) in model {
            prop_assert_eq!(map.get(key), Some(value));
        }
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy(spread_key())) {
        check_ops(Map::new(), ops)?;
    }

    #[test]
    fn prop_equivalence_with_collisions(ops in ops_strategy(colliding_key())) {
        check_ops(Map::with_hasher(IdentityHashBuilder::default()), ops)?;
    }

    #[test]
    fn prop_remove_everything(keys in prop::collection::vec(any::<u64>(), 0..200)) {
        let mut map = Map::new();

        for key in &keys {
            map = map.put(*key, *key).unwrap();
        }

        for key in &keys {
            prop_assert_eq!(map.get(key), Some(key));
        }

        for key in &keys {
            map = map.remove(key).unwrap();
        }

        prop_assert!(map.is_empty());
        prop_assert_eq!(map.len(), 0);
    }
}
