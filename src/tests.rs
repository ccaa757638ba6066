use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use index::{IndexType, NodeIndex};
use node::Node;
use proptest::prelude::*;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use super::*;

struct KeyGenerator {
    rng: StdRng,
    unique: HashSet<i32>,
    limit: i32,
}

impl KeyGenerator {
    fn new(seed: [u8; 32]) -> Self {
        const LIMIT: i32 = 100_000;
        Self {
            rng: SeedableRng::from_seed(seed),
            unique: HashSet::new(),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> i32 {
        self.rng.gen_range(0..self.limit)
    }

    fn next_unique(&mut self) -> i32 {
        let mut key = self.next();
        while self.unique.contains(&key) {
            key = self.next();
        }
        self.unique.insert(key);
        key
    }
}

impl<V, C, Ix> RbTree<i32, V, C, Ix>
where
    C: Comparator<i32>,
    Ix: IndexType,
{
    fn check_all(&self) {
        self.check_rb_properties();
        self.check_order();
        self.check_links();
    }

    /// 1. Every node is either red or black.
    /// 2. The root is black.
    /// 3. Every leaf (NIL) is black.
    /// 4. If a node is red, then both its children are black.
    /// 5. For each node, all simple paths from the node to descendant leaves contain the
    /// same number of black nodes.
    fn check_rb_properties(&self) {
        assert!(self.node_ref(self.root, Node::is_black));
        assert!(self.nodes[0].is_black());
        self.check_children_color(self.root);
        self.check_black_height(self.root);
    }

    fn check_children_color(&self, x: NodeIndex<Ix>) {
        if x.is_sentinel() {
            return;
        }
        self.check_children_color(self.node_ref(x, Node::left));
        self.check_children_color(self.node_ref(x, Node::right));
        if self.node_ref(x, Node::is_red) {
            assert!(self.left_ref(x, Node::is_black));
            assert!(self.right_ref(x, Node::is_black));
        }
    }

    fn check_black_height(&self, x: NodeIndex<Ix>) -> usize {
        if x.is_sentinel() {
            return 0;
        }
        let lefth = self.check_black_height(self.node_ref(x, Node::left));
        let righth = self.check_black_height(self.node_ref(x, Node::right));
        assert_eq!(lefth, righth);
        if self.node_ref(x, Node::is_black) {
            return lefth + 1;
        }
        lefth
    }

    /// In-order keys are strictly increasing, and the iterator agrees with
    /// a recursive walk.
    fn check_order(&self) {
        let mut in_order = vec![];
        self.collect_in_order(self.root, &mut in_order);
        for pair in in_order.windows(2) {
            assert_eq!(self.comparator.compare(pair[0], pair[1]), Ordering::Less);
        }
        assert!(in_order.iter().copied().eq(self.keys()));
        assert!(in_order.iter().rev().copied().eq(self.keys().rev()));
    }

    fn collect_in_order<'a>(&'a self, x: NodeIndex<Ix>, keys: &mut Vec<&'a i32>) {
        if x.is_sentinel() {
            return;
        }
        self.collect_in_order(self.node_ref(x, Node::left), keys);
        keys.push(self.node_ref(x, Node::key));
        self.collect_in_order(self.node_ref(x, Node::right), keys);
    }

    /// Parent links mirror child links and every arena slot is reachable.
    fn check_links(&self) {
        if !self.root.is_sentinel() {
            assert!(self.node_ref(self.root, Node::parent).is_sentinel());
        }
        let mut count = 0;
        let mut stack = vec![self.root];
        while let Some(x) = stack.pop() {
            if x.is_sentinel() {
                continue;
            }
            count += 1;
            for child in [self.node_ref(x, Node::left), self.node_ref(x, Node::right)] {
                if !child.is_sentinel() {
                    assert_eq!(self.node_ref(child, Node::parent), x);
                }
                stack.push(child);
            }
        }
        assert_eq!(count, self.len());
        assert_eq!(self.nodes.len(), self.len() + 1);
    }

    fn height(&self, x: NodeIndex<Ix>) -> usize {
        if x.is_sentinel() {
            return 0;
        }
        1 + self
            .height(self.node_ref(x, Node::left))
            .max(self.height(self.node_ref(x, Node::right)))
    }
}

fn with_tree_and_generator<V>(test_fn: impl Fn(RbTree<i32, V>, KeyGenerator)) {
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let gen = KeyGenerator::new(seed);
        let tree = RbTree::new();
        test_fn(tree, gen);
    }
}

fn tree_of(keys: &[i32]) -> RbTree<i32, String> {
    keys.iter().map(|k| (*k, k.to_string())).collect()
}

#[test]
fn red_black_tree_properties_is_satisfied() {
    with_tree_and_generator(|mut tree, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for k in keys {
            let _ignore = tree.put(k, ());
        }
        tree.check_all();
    });
}

#[test]
fn red_black_tree_properties_hold_after_every_remove() {
    with_tree_and_generator(|mut tree, mut gen| {
        let mut keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(300)
            .collect();
        for k in keys.clone() {
            let _ignore = tree.put(k, k);
        }
        keys.shuffle(&mut gen.rng);
        for k in keys {
            assert_eq!(tree.remove(&k), Some(k));
            tree.check_all();
        }
        assert!(tree.is_empty());
        assert!(tree.root.is_sentinel());
    });
}

#[test]
fn tree_len_will_update() {
    with_tree_and_generator(|mut tree, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(100)
            .collect();
        for k in keys.clone() {
            let _ignore = tree.put(k, ());
        }
        assert_eq!(tree.len(), 100);
        assert_eq!(tree.iter().count(), 100);
        for k in keys {
            let _ignore = tree.remove(&k);
        }
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.nodes.len(), 1);
    });
}

#[test]
fn remove_non_exist_key_will_do_nothing() {
    with_tree_and_generator(|mut tree, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for k in keys {
            let _ignore = tree.put(k, ());
        }
        assert_eq!(tree.len(), 1000);
        let to_remove: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for k in to_remove {
            assert_eq!(tree.remove(&k), None);
        }
        assert_eq!(tree.len(), 1000);
        tree.check_all();
    });
}

#[test]
fn iterate_through_tree_is_sorted() {
    with_tree_and_generator(|mut tree, mut gen| {
        let mut keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .enumerate()
            .take(1000)
            .collect();
        for (v, k) in keys.clone() {
            let _ignore = tree.put(k, v);
        }
        keys.sort_unstable_by(|a, b| a.1.cmp(&b.1));

        assert_eq!(tree.iter().len(), keys.len());
        for ((ek, ev), (v, k)) in tree.iter().zip(keys.iter()) {
            assert_eq!(ek, k);
            assert_eq!(ev, v);
        }
        assert!(tree.values().eq(keys.iter().map(|(v, _)| v)));
    });
}

#[test]
fn floor_and_ceiling_match_linear_scan() {
    with_tree_and_generator(|mut tree, mut gen| {
        let mut keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(500)
            .collect();
        for k in keys.clone() {
            let _ignore = tree.put(k, ());
        }
        keys.sort_unstable();
        let queries: Vec<_> = std::iter::repeat_with(|| gen.next())
            .take(1000)
            .chain(keys.iter().copied().take(100))
            .chain([i32::MIN, i32::MAX])
            .collect();
        for q in queries {
            let floor = keys.iter().rev().find(|k| **k <= q);
            let ceiling = keys.iter().find(|k| **k >= q);
            assert_eq!(tree.floor(&q).map(|(k, _)| k), floor);
            assert_eq!(tree.ceiling(&q).map(|(k, _)| k), ceiling);
        }
    });
}

#[test]
fn tree_matches_btreemap_model() {
    with_tree_and_generator(|mut tree, mut gen| {
        let mut model = BTreeMap::new();
        for step in 0..5000 {
            let key = gen.rng.gen_range(0..500);
            match gen.rng.gen_range(0..10) {
                0..=4 => assert_eq!(tree.put(key, step), model.insert(key, step)),
                5..=7 => assert_eq!(tree.remove(&key), model.remove(&key)),
                8 => assert_eq!(tree.pop_min(), model.pop_first()),
                _ => assert_eq!(tree.pop_max(), model.pop_last()),
            }
            if step % 250 == 0 {
                tree.check_all();
            }
            assert_eq!(tree.len(), model.len());
        }
        tree.check_all();
        assert!(tree
            .iter()
            .map(|(k, v)| (*k, *v))
            .eq(model.into_iter()));
    });
}

#[test]
fn ascending_inserts_stay_balanced() {
    let mut tree = RbTree::new();
    let n: i32 = 4095;
    for k in 0..n {
        let _ignore = tree.put(k, ());
    }
    tree.check_all();
    // red-black height bound: 2 * log2(n + 1)
    assert!(tree.height(tree.root) <= 24);
    for k in (0..n).rev() {
        let _ignore = tree.remove(&k);
        if k % 512 == 0 {
            tree.check_all();
        }
    }
    assert!(tree.is_empty());
}

#[test]
fn min_max_removal_leaves_middle_key() {
    let mut tree: RbTree<i32, &str> = [(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e")]
        .into_iter()
        .collect();
    assert_eq!(tree.min(), Some((&1, &"a")));
    assert_eq!(tree.max(), Some((&5, &"e")));

    let (min, _) = tree.min().unwrap();
    let min = *min;
    tree.remove(&min);
    assert_eq!(tree.pop_max(), Some((5, "e")));
    assert_eq!(tree.pop_min(), Some((2, "b")));
    let (max, _) = tree.max().unwrap();
    let max = *max;
    tree.remove(&max);

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.iter().collect::<Vec<_>>(), vec![(&3, &"c")]);
    assert_eq!(tree.min(), tree.max());
    tree.check_all();
}

#[test]
fn put_existing_key_overwrites_in_place() {
    let mut tree = RbTree::new();
    assert_eq!(tree.put(2, "x"), None);
    assert_eq!(tree.put(2, "y"), Some("x"));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.nodes.len(), 2);
    assert_eq!(tree.get(&2), Some(&"y"));
}

#[test]
fn put_existing_key_replaces_key() {
    // keys equal under the comparator but distinguishable otherwise
    let mut tree: RbTree<_, _, _> =
        RbTree::with_comparator(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
    tree.put((1, 'a'), 10);
    tree.put((1, 'b'), 20);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.min(), Some((&(1, 'b'), &20)));
}

#[test]
fn floor_and_ceiling_between_keys() {
    let tree = tree_of(&[10, 20, 5, 15]);
    assert_eq!(tree.floor(&12).map(|(k, _)| *k), Some(10));
    assert_eq!(tree.ceiling(&12).map(|(k, _)| *k), Some(15));
    assert_eq!(tree.floor(&20).map(|(k, _)| *k), Some(20));
    assert_eq!(tree.floor(&4), None);
    assert_eq!(tree.ceiling(&21), None);

    let empty = tree_of(&[]);
    assert_eq!(empty.floor(&1), None);
    assert_eq!(empty.ceiling(&1), None);
    assert_eq!(empty.min(), None);
    assert_eq!(empty.max(), None);
}

#[test]
fn reverse_comparator_orders_every_query() {
    let mut tree: RbTree<_, _, _> = RbTree::with_comparator(Reverse);
    for k in [10, 20, 5, 15] {
        tree.put(k, k * 2);
    }
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![20, 15, 10, 5]);
    assert_eq!(tree.min(), Some((&20, &40)));
    assert_eq!(tree.max(), Some((&5, &10)));
    // "less than or equal" follows the comparator, so the floor of 12 is 15
    assert_eq!(tree.floor(&12).map(|(k, _)| *k), Some(15));
    assert_eq!(tree.ceiling(&12).map(|(k, _)| *k), Some(10));
    tree.check_all();
}

#[test]
fn double_ended_iteration_meets_in_the_middle() {
    let tree = tree_of(&(0..10).collect::<Vec<_>>());
    let mut iter = tree.keys();
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&9));
    assert_eq!(iter.len(), 8);
    let middle: Vec<_> = iter.by_ref().take(4).collect();
    assert_eq!(middle, vec![&1, &2, &3, &4]);
    assert_eq!(iter.rev().collect::<Vec<_>>(), vec![&8, &7, &6, &5]);
}

#[test]
fn into_iter_yields_owned_entries_in_order() {
    let tree = tree_of(&[3, 1, 2, 5, 4]);
    let mut into_iter = tree.clone().into_iter();
    assert_eq!(into_iter.next(), Some((1, "1".to_string())));
    assert_eq!(into_iter.next_back(), Some((5, "5".to_string())));
    assert_eq!(
        into_iter.map(|(k, _)| k).collect::<Vec<_>>(),
        vec![2, 3, 4]
    );
    let all: Vec<_> = tree.into_iter().rev().map(|(k, _)| k).collect();
    assert_eq!(all, vec![5, 4, 3, 2, 1]);
}

#[test]
fn lookup_handle_survives_until_next_remove() {
    let mut tree = tree_of(&(0..64).collect::<Vec<_>>());
    for k in (0..64).step_by(3) {
        tree.remove(&k);
    }
    for k in (1..64).filter(|k| k % 3 != 0) {
        let node = tree.lookup(&k).unwrap();
        assert_eq!(*tree.cursor_at(node).key(), k);
    }
}

#[test]
fn debug_prints_as_map() {
    let tree = tree_of(&[2, 1]);
    assert_eq!(format!("{tree:?}"), r#"{1: "1", 2: "2"}"#);
}

#[test]
fn tree_clear_is_ok() {
    let mut tree = tree_of(&[1, 2, 6]);
    assert_eq!(tree.len(), 3);
    tree.clear();
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    assert_eq!(tree.nodes.len(), 1);
    assert!(tree.nodes[0].is_sentinel());
    assert!(!tree.cursor().move_next());
    tree.put(7, "7".to_string());
    tree.check_all();
}

#[test]
#[should_panic(expected = "Reached maximum number of nodes")]
fn small_index_type_panics_when_full() {
    let mut tree: RbTree<i32, (), Natural, u16> = RbTree::with_capacity_and_comparator(0, Natural);
    for k in 0..i32::from(u16::MAX) {
        tree.put(k, ());
    }
}

#[test]
fn small_index_type_holds_up_to_capacity() {
    let mut tree: RbTree<i32, (), Natural, u16> = RbTree::default();
    for k in 0..i32::from(u16::MAX) - 1 {
        tree.put(k, ());
    }
    assert_eq!(tree.len(), usize::from(u16::MAX) - 1);
    tree.check_rb_properties();
}

proptest! {
    #[test]
    fn invariants_hold_for_any_operations(
        ops in prop::collection::vec((any::<bool>(), 0i32..64), 0..300)
    ) {
        let mut tree = RbTree::new();
        let mut model = BTreeMap::new();
        for (is_put, key) in ops {
            if is_put {
                prop_assert_eq!(tree.put(key, key), model.insert(key, key));
            } else {
                prop_assert_eq!(tree.remove(&key), model.remove(&key));
            }
        }
        tree.check_all();
        prop_assert!(tree.keys().eq(model.keys()));
    }
}
