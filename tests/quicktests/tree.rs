use quickcheck_macros::quickcheck;
use rebuild_bst::{Compare, Natural, Node, Reverse, Snapshot, Tree};

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and a plain vector.
/// This way we can ensure that after a random smattering of adds
/// and removes we have the same multiset of values.
fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, expected: &mut Vec<T>)
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Add(x) => {
                tree.add(x.clone());
                expected.push(x.clone());
            }
            Op::AddAll(xs) => {
                tree.add_all(xs.clone());
                expected.extend(xs.iter().cloned());
            }
            Op::Remove(x) => {
                let position = expected.iter().position(|v| v == x);
                if let Some(position) = position {
                    expected.remove(position);
                }
                assert_eq!(tree.remove(x), position.is_some());
            }
            Op::RemoveAll(xs) => {
                let before = expected.len();
                expected.retain(|v| !xs.contains(v));
                assert_eq!(tree.remove_all(xs), expected.len() != before);
            }
        }
    }
}

/// `ceil(lg(len + 1))`
fn balanced_height(len: usize) -> usize {
    let mut height = 0;
    while (1usize << height) - 1 < len {
        height += 1;
    }
    height
}

/// Checks the ordering invariant by walking every node with the bounds its ancestors impose.
fn is_ordered<T, C>(
    node: Option<&Node<T>>,
    comparator: &C,
    lower: Option<&T>,
    upper: Option<&T>,
) -> bool
where
    C: Compare<T>,
{
    match node {
        None => true,
        Some(n) => {
            let value = n.value();
            lower.map_or(true, |l| comparator.compare(value, l) != Ordering::Less)
                && upper.map_or(true, |u| comparator.compare(value, u) == Ordering::Less)
                && is_ordered(n.left_child(), comparator, lower, Some(value))
                && is_ordered(n.right_child(), comparator, Some(value), upper)
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut expected = Vec::new();

    do_ops(&ops, &mut tree, &mut expected);

    let mut values: Vec<i8> = tree.iter().copied().collect();
    values.sort_unstable();
    expected.sort_unstable();
    values == expected && is_ordered(tree.root(), &Natural, None, None)
}

#[quickcheck]
fn balanced_after_every_add(xs: Vec<i16>) -> bool {
    let mut tree = Tree::new();
    let mut seen = HashSet::new();
    for x in xs {
        if seen.insert(x) {
            tree.add(x);
            if tree.height() > balanced_height(tree.size()) {
                return false;
            }
        }
    }
    true
}

#[quickcheck]
fn batch_matches_one_at_a_time(xs: Vec<i8>) -> bool {
    let mut batch = Tree::new();
    batch.add_all(xs.clone());

    let mut one_at_a_time = Tree::new();
    for x in xs {
        one_at_a_time.add(x);
    }

    let mut batch = batch.into_values();
    let mut one_at_a_time = one_at_a_time.into_values();
    batch.sort_unstable();
    one_at_a_time.sort_unstable();
    batch == one_at_a_time
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.locate(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    tree.remove_all(&deletes);

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && tree.size() == still_present.len()
}

#[quickcheck]
fn reverse_order_is_still_ordered(xs: Vec<i8>) -> bool {
    let mut tree = Tree::with_comparator(Reverse(Natural));
    tree.add_all(xs.iter().copied());

    xs.iter().all(|x| tree.contains(x))
        && is_ordered(tree.root(), &Reverse(Natural), None, None)
}

#[quickcheck]
fn snapshots_round_trip(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();

    let bytes = bincode::serialize(&tree).unwrap();
    let snapshot: Snapshot<i8> = bincode::deserialize(&bytes).unwrap();

    snapshot == tree.snapshot()
        && snapshot
            .restore_checked(Natural)
            .map_or(false, |restored| restored.values() == tree.values())
}

#[test]
fn many_copies_of_one_value() {
    let mut tree = Tree::new();
    tree.add_all(std::iter::repeat(7u8).take(30_000));

    assert_eq!(tree.size(), 30_000);
    assert_eq!(tree.height(), 30_000);
    assert!(is_ordered(tree.root(), &Natural, None, None));
    assert!(tree.contains(&7));
    assert!(!tree.contains(&8));

    let copy = tree.clone();
    assert_eq!(copy.values(), tree.values());
    drop(copy);

    assert!(!tree.remove(&8));
    assert!(tree.remove_all(&[7]));
    assert!(tree.is_empty());
}
