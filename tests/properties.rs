//! Property tests for the merge laws and delivery-order insensitivity.

use core::cmp::Ordering;
use core::fmt;

use lww_element_dict::prelude::*;
use proptest::prelude::*;

type Dict = LWWDict<char, u8, u8>;
type Op = DictOp<char, u8, u8>;

const KEYS: [char; 3] = ['a', 'b', 'c'];

fn op_strategy() -> impl Strategy<Value = Op> {
    let key = prop_oneof![Just('a'), Just('b'), Just('c')];
    (0u8..3, key, 0u8..4, 0u8..10).prop_map(|(kind, key, value, timestamp)| match kind {
        0 => DictOp::Add {
            key,
            value,
            timestamp,
        },
        1 => DictOp::Remove { key, timestamp },
        _ => DictOp::Update {
            key,
            value,
            timestamp,
        },
    })
}

fn replay<'a>(ops: impl IntoIterator<Item = &'a Op>) -> Dict {
    let mut dict = Dict::new();
    for op in ops {
        dict.apply_op(op);
    }
    dict
}

fn dict_strategy() -> impl Strategy<Value = Dict> {
    prop::collection::vec(op_strategy(), 0..24).prop_map(|ops| replay(&ops))
}

fn policy_dict_strategy<S>(policy: S) -> impl Strategy<Value = LWWDict<char, u8, u8, S>>
where
    S: TieBreak<u8> + Clone + fmt::Debug + 'static,
{
    prop::collection::vec(op_strategy(), 0..24).prop_map(move |ops| {
        let mut dict = LWWDict::with_tie_break(policy.clone());
        for op in &ops {
            dict.apply_op(op);
        }
        dict
    })
}

/// Odd values beat even ones; within a parity the greater value wins.
fn odd_first(a: &u8, b: &u8) -> Ordering {
    (a % 2).cmp(&(b % 2)).then(a.cmp(b))
}

/// Seed every key with an early add so no remove or update can arrive
/// ahead of the first add for its key.
fn seeded(ops: &[Op]) -> Vec<Op> {
    KEYS.iter()
        .map(|&key| DictOp::Add {
            key,
            value: 0,
            timestamp: 0,
        })
        .chain(ops.iter().cloned())
        .collect()
}

proptest! {
    #[test]
    fn merge_laws_hold_for_lesser_wins(
        d1 in policy_dict_strategy(LesserWins),
        d2 in policy_dict_strategy(LesserWins),
        d3 in policy_dict_strategy(LesserWins),
    ) {
        prop_assert_eq!(d1.merged(&d1), d1.clone());
        prop_assert_eq!(d1.merged(&d2), d2.merged(&d1));
        prop_assert_eq!(d1.merged(&d2).merged(&d3), d1.merged(&d2.merged(&d3)));
    }

    #[test]
    fn merge_laws_hold_for_custom_order(
        d1 in policy_dict_strategy(OrderBy::new(odd_first)),
        d2 in policy_dict_strategy(OrderBy::new(odd_first)),
        d3 in policy_dict_strategy(OrderBy::new(odd_first)),
    ) {
        prop_assert_eq!(d1.merged(&d1), d1.clone());
        prop_assert_eq!(d1.merged(&d2), d2.merged(&d1));
        let left = d1.merged(&d2).merged(&d3);
        prop_assert_eq!(&left, &d1.merged(&d2.merged(&d3)));
        prop_assert_eq!(&left, &LWWDict::merge_all_with(OrderBy::new(odd_first), [&d3, &d1, &d2]));
    }

    #[test]
    fn merge_is_idempotent(d in dict_strategy()) {
        prop_assert_eq!(d.merged(&d), d.clone());
        prop_assert_eq!(Dict::merge_all([&d, &d, &d]), d);
    }

    #[test]
    fn merge_is_commutative(d1 in dict_strategy(), d2 in dict_strategy()) {
        prop_assert_eq!(d1.merged(&d2), d2.merged(&d1));
    }

    #[test]
    fn merge_is_associative(
        d1 in dict_strategy(),
        d2 in dict_strategy(),
        d3 in dict_strategy(),
    ) {
        let left = d1.merged(&d2).merged(&d3);
        let right = d1.merged(&d2.merged(&d3));
        prop_assert_eq!(&left, &right);
        prop_assert_eq!(&left, &Dict::merge_all([&d3, &d1, &d2]));
    }

    #[test]
    fn in_place_merge_equals_merged(d1 in dict_strategy(), d2 in dict_strategy()) {
        let mut in_place = d1.clone();
        in_place.merge(&d2);
        prop_assert_eq!(in_place, d1.merged(&d2));
    }

    #[test]
    fn merge_dominates_inputs(d1 in dict_strategy(), d2 in dict_strategy()) {
        // Joining an input back in changes nothing.
        let merged = d1.merged(&d2);
        prop_assert_eq!(merged.merged(&d1), merged.clone());
        prop_assert_eq!(merged.merged(&d2), merged);
    }

    #[test]
    fn older_adds_cannot_revive_tombstoned_keys(d in dict_strategy(), other in dict_strategy()) {
        let merged = d.merged(&other);
        for key in KEYS {
            let Some(removed_at) = d.tombstone(&key) else { continue };
            if d.lookup(&key).is_some() {
                continue;
            }
            let other_is_older = other
                .add_record(&key)
                .map_or(true, |record| record.timestamp <= *removed_at);
            if other_is_older {
                prop_assert_eq!(merged.lookup(&key), None);
            }
        }
    }

    #[test]
    fn delivery_order_does_not_matter(
        (ops, shuffled) in prop::collection::vec(op_strategy(), 0..24)
            .prop_flat_map(|ops| (Just(ops.clone()), Just(ops).prop_shuffle()))
    ) {
        let in_order = replay(&seeded(&ops));
        let reordered = replay(&seeded(&shuffled));
        prop_assert_eq!(in_order, reordered);
    }

    #[test]
    fn duplicate_delivery_does_not_matter(ops in prop::collection::vec(op_strategy(), 0..24)) {
        let ops = seeded(&ops);
        let once = replay(&ops);
        let twice = replay(ops.iter().chain(ops.iter()));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn delta_equals_full_merge(d1 in dict_strategy(), d2 in dict_strategy()) {
        let mut patched = d2.clone();
        patched.apply_delta(&d1.delta(&d2));
        prop_assert_eq!(patched, d2.merged(&d1));
    }

    #[test]
    fn lookup_agrees_with_records(d in dict_strategy()) {
        for key in KEYS {
            let expected = d.add_record(&key).and_then(|record| {
                let live = d.tombstone(&key).map_or(true, |removed| *removed < record.timestamp);
                live.then_some(&record.value)
            });
            prop_assert_eq!(d.lookup(&key), expected);
        }
        prop_assert_eq!(d.len(), d.iter().count());
    }
}

#[test]
fn three_op_permutations_agree() {
    // add(k, v1, t1), add(k, v2, t2), remove(k, t_r) with t1 < t2, in every
    // order that starts with an add.
    for t_r in 0..=4u8 {
        let a1 = DictOp::Add {
            key: 'k',
            value: 1,
            timestamp: 1,
        };
        let a2 = DictOp::Add {
            key: 'k',
            value: 2,
            timestamp: 3,
        };
        let rm = DictOp::Remove {
            key: 'k',
            timestamp: t_r,
        };
        let orders = [
            [&a1, &a2, &rm],
            [&a1, &rm, &a2],
            [&a2, &a1, &rm],
            [&a2, &rm, &a1],
        ];
        let expected = if t_r >= 3 { None } else { Some(&2) };
        for order in orders {
            assert_eq!(replay(order).lookup(&'k'), expected, "t_r = {t_r}");
        }
    }
}

#[test]
fn custom_order_settles_add_ties_identically() {
    let mut even: LWWDict<char, u8, u8, OrderBy<u8>> = LWWDict::with_tie_break(OrderBy::new(odd_first));
    even.add('k', 4, 7);
    let mut odd: LWWDict<char, u8, u8, OrderBy<u8>> = LWWDict::with_tie_break(OrderBy::new(odd_first));
    odd.add('k', 1, 7);

    let m1 = even.merged(&odd);
    let m2 = odd.merged(&even);
    assert_eq!(m1, m2);
    assert_eq!(m1.lookup(&'k'), Some(&1));
}
