// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Step-by-step insertion: a cursor that yields one [`Mutation`] per structural change.

use alloc::sync::Arc;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::mutation::{Mutation, MutationKind};
use crate::node::{Color, Node, Side, Tree, is_red};

/// Ancestors of the insertion point, root first, with the side taken at each.
///
/// An LLRB tree with a billion keys is at most 60 levels deep; 32 covers any
/// tree a person would watch being built without spilling to the heap.
type SearchPath<K> = SmallVec<[(Arc<Node<K>>, Side); 32]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Balancing {
    LeftLeaning,
    Unbalanced,
}

/// Where the cursor is in the insertion. Fix-up stages are checked in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    Insert,
    Ascend,
    RotateLeft,
    RotateRight,
    FlipColors,
    BlackenRoot,
    Done,
}

/// Insert `new_node` into a left-leaning red-black tree, one step at a time.
///
/// Nothing happens until the returned [`Insertion`] is polled. Each call to
/// [`Iterator::next`] performs exactly one atomic step and yields it as a
/// [`Mutation`] carrying the whole tree after that step:
///
/// 1. `insert`: the new node, colored red, is attached where the search ends.
///    Keys that are not less than a node's key go to its right.
/// 2. Walking back up the search path, each ancestor is checked in order for
///    a right-leaning red link (`rotate-left`), two red left links in a row
///    (`rotate-right`), and two red children (`flip-colors`).
/// 3. `blacken-root`: emitted once at the end if the root came out red.
///
/// Only nodes on the search path are copied. Everything else is shared with
/// `root`, which is left untouched and stays valid.
///
/// Stopping early is safe: every yielded `result` is a well-formed search
/// tree. Only the last one is guaranteed to be balanced.
///
/// ## Example
///
/// ```rust
/// use arbor_llrb::{Node, insert};
/// use std::sync::Arc;
///
/// let root = Arc::new(Node::black('H'));
/// let steps: Vec<String> = insert(Node::new('K'), Some(root))
///     .map(|m| m.to_string())
///     .collect();
/// assert_eq!(steps, ["insert H!K", "rotate-left(H) K!H"]);
/// ```
///
/// # Panics
///
/// The cursor panics while being polled if `root` is not a left-leaning
/// red-black tree and a rotation or color flip finds its precondition broken.
pub fn insert<K: Ord + Clone>(new_node: Node<K>, root: Tree<K>) -> Insertion<K> {
    Insertion::new(new_node, root, Balancing::LeftLeaning)
}

/// Insert `new_node` as a plain binary search tree leaf, without rebalancing.
///
/// The cursor yields a single `insert` mutation with the new node colored
/// black. It exists to contrast unbalanced growth with [`insert`] using the
/// same consumers. Sorted keys grow a single chain, so each insertion copies
/// the whole tree path.
pub fn insert_unbalanced<K: Ord + Clone>(new_node: Node<K>, root: Tree<K>) -> Insertion<K> {
    Insertion::new(new_node, root, Balancing::Unbalanced)
}

/// Build a left-leaning red-black tree by inserting `values` in order.
///
/// Returns `None` when `values` is empty.
pub fn build<K, I>(values: I) -> Tree<K>
where
    K: Ord + Clone,
    I: IntoIterator<Item = K>,
{
    values
        .into_iter()
        .fold(None, |root, value| Some(insert(Node::new(value), root).finish()))
}

/// A lazy, single-pass cursor over the steps of one insertion.
///
/// Created by [`insert`] and [`insert_unbalanced`].
#[derive(Debug)]
pub struct Insertion<K> {
    pending: Option<Node<K>>,
    path: SearchPath<K>,
    /// Subtree rooted at the level the cursor is working on.
    current: Option<Arc<Node<K>>>,
    /// Whole tree as of the last yielded mutation.
    latest: Option<Arc<Node<K>>>,
    stage: Stage,
    balancing: Balancing,
    emitted: usize,
}

impl<K: Ord + Clone> Insertion<K> {
    fn new(new_node: Node<K>, root: Tree<K>, balancing: Balancing) -> Self {
        let mut path = SearchPath::new();
        let mut cursor = root;
        while let Some(node) = cursor {
            let side = if new_node.value() < node.value() {
                Side::Left
            } else {
                Side::Right
            };
            cursor = node.child(side).cloned();
            path.push((node, side));
        }
        Self {
            pending: Some(new_node),
            path,
            current: None,
            latest: None,
            stage: Stage::Insert,
            balancing,
            emitted: 0,
        }
    }

    /// The tree as of the most recently yielded mutation, if any was yielded yet.
    pub fn latest(&self) -> Option<&Arc<Node<K>>> {
        self.latest.as_ref()
    }

    /// Number of mutations yielded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Run the remaining steps and return the final tree.
    pub fn finish(mut self) -> Arc<Node<K>> {
        self.by_ref().for_each(drop);
        self.latest
            .expect("insertion invariant violated: finished without attaching the new node")
    }

    fn subtree(&self) -> &Node<K> {
        self.current
            .as_deref()
            .expect("insertion invariant violated: no subtree under the cursor")
    }

    /// Replace the subtree under the cursor with `step` applied to it.
    fn apply(&mut self, kind: MutationKind, step: fn(&Node<K>) -> Node<K>) -> Mutation<K> {
        let before = self
            .current
            .take()
            .expect("insertion invariant violated: no subtree under the cursor");
        self.current = Some(Arc::new(step(&before)));
        self.emit(kind, Some(before))
    }

    /// Copy the ancestors onto the new subtree and yield the resulting whole tree.
    ///
    /// The copies replace the stored ancestors, so the next level up works on
    /// the same allocation that this mutation's `result` contains.
    fn emit(&mut self, kind: MutationKind, node: Option<Arc<Node<K>>>) -> Mutation<K> {
        let mut below = Arc::clone(
            self.current
                .as_ref()
                .expect("insertion invariant violated: no subtree under the cursor"),
        );
        for (ancestor, side) in self.path.iter_mut().rev() {
            *ancestor = Arc::new(ancestor.with_child(*side, below));
            below = Arc::clone(ancestor);
        }
        self.emitted += 1;
        log::trace!("mutation {}: {kind} at depth {}", self.emitted, self.path.len());
        self.latest = Some(Arc::clone(&below));
        Mutation {
            kind,
            result: below,
            node,
        }
    }
}

impl<K: Ord + Clone> Iterator for Insertion<K> {
    type Item = Mutation<K>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stage {
                Stage::Insert => {
                    let (color, next) = match self.balancing {
                        Balancing::LeftLeaning => (Color::Red, Stage::Ascend),
                        Balancing::Unbalanced => (Color::Black, Stage::Done),
                    };
                    let leaf = self
                        .pending
                        .take()
                        .expect("insertion invariant violated: new node already attached");
                    self.current = Some(Arc::new(leaf.with_color(color)));
                    self.stage = next;
                    return Some(self.emit(MutationKind::Insert, None));
                }
                Stage::Ascend => match self.path.pop() {
                    Some((parent, _)) => {
                        self.current = Some(parent);
                        self.stage = Stage::RotateLeft;
                    }
                    None => self.stage = Stage::BlackenRoot,
                },
                Stage::RotateLeft => {
                    self.stage = Stage::RotateRight;
                    let h = self.subtree();
                    if is_red(h.right().map(|n| &**n)) && !is_red(h.left().map(|n| &**n)) {
                        return Some(self.apply(MutationKind::RotateLeft, Node::rotate_left));
                    }
                }
                Stage::RotateRight => {
                    self.stage = Stage::FlipColors;
                    let left = self.subtree().left().map(|n| &**n);
                    if is_red(left) && is_red(left.and_then(|l| l.left()).map(|n| &**n)) {
                        return Some(self.apply(MutationKind::RotateRight, Node::rotate_right));
                    }
                }
                Stage::FlipColors => {
                    self.stage = Stage::Ascend;
                    let h = self.subtree();
                    if is_red(h.left().map(|n| &**n)) && is_red(h.right().map(|n| &**n)) {
                        return Some(self.apply(MutationKind::FlipColors, Node::flip_colors));
                    }
                }
                Stage::BlackenRoot => {
                    self.stage = Stage::Done;
                    if self.subtree().is_red() {
                        let blackened = self.apply(MutationKind::BlackenRoot, |root: &Node<K>| {
                            root.recolored(Color::Black)
                        });
                        log::debug!("insertion finished after {} mutations", self.emitted);
                        // The root is the only node touched; there is no subtree target to report.
                        return Some(Mutation {
                            node: None,
                            ..blackened
                        });
                    }
                    log::debug!("insertion finished after {} mutations", self.emitted);
                }
                Stage::Done => return None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower = usize::from(self.stage == Stage::Insert);
        let upper = match self.stage {
            Stage::Done => 0,
            // Up to three fix-ups per remaining level, plus insert and blacken.
            _ => 3 * (self.path.len() + 1) + 2,
        };
        (lower, Some(upper))
    }
}

impl<K: Ord + Clone> FusedIterator for Insertion<K> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    fn steps(new_value: char, root: Node<char>) -> Vec<String> {
        insert(Node::new(new_value), Some(Arc::new(root)))
            .map(|m| m.to_string())
            .collect()
    }

    #[test]
    fn inserts_a_node_without_rotations() {
        assert_eq!(steps('F', Node::black('H')), ["insert H!F"]);
    }

    #[test]
    fn inserts_a_node_with_a_single_left_rotation() {
        assert_eq!(
            steps('K', Node::black('H')),
            ["insert H!K", "rotate-left(H) K!H"]
        );
    }

    #[test]
    fn flips_colors_and_blackens_the_root() {
        let root = Node::black('C').with_left(Node::new('A'));
        assert_eq!(
            steps('F', root),
            ["insert C!A!F", "flip-colors(C) !CAF", "blacken-root CAF"]
        );
    }

    #[test]
    fn rotates_right_then_flips() {
        let root = Node::black('H').with_left(Node::new('F'));
        assert_eq!(
            steps('B', root),
            [
                "insert H!F!B",
                "rotate-right(H) F!B!H",
                "flip-colors(F) !FBH",
                "blacken-root FBH",
            ]
        );
    }

    #[test]
    fn applies_rotations_on_deeper_levels() {
        let root = Node::black('K').with_left(Node::black('H').with_left(Node::new('F')));
        assert_eq!(
            steps('B', root),
            [
                "insert KH!F!B",
                "rotate-right(H) KF!B!H",
                "flip-colors(F) K!FBH",
            ]
        );
    }

    fn passes_red_links_up_fixture() -> Node<char> {
        Node::black('R')
            .with_left(
                Node::new('E')
                    .with_left(Node::black('C').with_left(Node::new('A')))
                    .with_right(Node::black('M').with_left(Node::new('H'))),
            )
            .with_right(Node::black('S'))
    }

    #[test]
    fn passes_red_links_up_the_tree() {
        assert_eq!(
            steps('P', passes_red_links_up_fixture()),
            [
                "insert R!EC!AM!H!PS",
                "flip-colors(M) R!EC!A!MHPS",
                "rotate-left(E) R!M!EC!AHPS",
                "rotate-right(R) M!EC!AH!RPS",
                "flip-colors(M) !MEC!AHRPS",
                "blacken-root MEC!AHRPS",
            ]
        );
    }

    #[test]
    fn first_insertion_yields_a_red_leaf_then_blackens_it() {
        let steps: Vec<_> = insert(Node::new(1), None).collect();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].kind, MutationKind::Insert);
        assert!(steps[0].result.is_red());
        assert_eq!(steps[1].kind, MutationKind::BlackenRoot);
        assert_eq!(steps[1].result.color(), Color::Black);
        assert!(steps[1].node.is_none());
    }

    /// Locate `target` by identity in `tree`.
    fn contains_allocation(tree: &Arc<Node<char>>, target: &Arc<Node<char>>) -> bool {
        Arc::ptr_eq(tree, target)
            || tree.left().is_some_and(|l| contains_allocation(l, target))
            || tree.right().is_some_and(|r| contains_allocation(r, target))
    }

    #[test]
    fn target_node_is_found_by_identity_in_the_previous_result() {
        let mutations: Vec<_> = insert(
            Node::new('P'),
            Some(Arc::new(passes_red_links_up_fixture())),
        )
        .collect();
        for pair in mutations.windows(2) {
            if let Some(target) = &pair[1].node {
                assert!(
                    contains_allocation(&pair[0].result, target),
                    "{} should target a node of {}",
                    pair[1],
                    pair[0]
                );
            }
        }
    }

    #[test]
    fn untouched_subtrees_are_shared_with_the_input() {
        let root = Arc::new(passes_red_links_up_fixture());
        let first = insert(Node::new('P'), Some(Arc::clone(&root)))
            .next()
            .unwrap();
        // `S` is off the search path and must be reused as-is.
        assert!(Arc::ptr_eq(
            first.result.right().unwrap(),
            root.right().unwrap()
        ));
        // The input tree is unchanged.
        assert_eq!(root.to_string(), "R!EC!AM!HS");
    }

    #[test]
    fn duplicates_go_to_the_right() {
        let root = Arc::new(Node::black(5));
        let first = insert_unbalanced(Node::new(5), Some(root)).next().unwrap();
        assert!(first.result.left().is_none());
        assert_eq!(first.result.right().map(|r| *r.value()), Some(5));
    }

    #[test]
    fn unbalanced_insertion_yields_one_black_leaf() {
        let root = Arc::new(Node::black(1).with_right(Node::black(2)));
        let steps: Vec<_> = insert_unbalanced(Node::new(3), Some(root)).collect();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].kind, MutationKind::Insert);
        let tree = &steps[0].result;
        assert_eq!(tree.height(), 3);
        assert!(tree.in_order().copied().eq([1, 2, 3]));
        assert!(!tree.right().unwrap().right().unwrap().is_red());
    }

    #[test]
    fn aborting_early_leaves_a_valid_search_tree() {
        let root = Arc::new(passes_red_links_up_fixture());
        let mut cursor = insert(Node::new('P'), Some(root));
        let _ = cursor.next();
        let _ = cursor.next();
        assert_eq!(cursor.emitted(), 2);
        let partial = cursor.latest().unwrap();
        let keys: String = partial.in_order().collect();
        assert_eq!(keys, "ACEHMPRS");
    }

    #[test]
    fn finish_matches_the_last_mutation() {
        let root = Some(Arc::new(passes_red_links_up_fixture()));
        let last = insert(Node::new('P'), root.clone()).last().unwrap();
        let finished = insert(Node::new('P'), root).finish();
        assert_eq!(*last.result, *finished);
    }

    #[test]
    fn size_hint_bounds_the_remaining_steps() {
        let root = Some(Arc::new(passes_red_links_up_fixture()));
        let cursor = insert(Node::new('P'), root);
        let (_, upper) = cursor.size_hint();
        let upper = upper.unwrap();
        assert!(cursor.count() <= upper);
    }

    #[test]
    fn build_inserts_in_order() {
        let tree = build("SEARCHEXAMPLE".chars()).unwrap();
        assert_eq!(tree.size(), 13);
        let keys: String = tree.in_order().collect();
        assert_eq!(keys, "AACEEEHLMPRSX");
        assert_eq!(tree.color(), Color::Black);
    }

    #[test]
    fn build_of_nothing_is_empty() {
        assert!(build(core::iter::empty::<u32>()).is_none());
    }
}
