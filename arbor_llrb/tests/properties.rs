// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Properties that hold for every sequence of insertions.

use std::sync::Arc;

use arbor_llrb::{MutationKind, Node, Tree, insert, insert_unbalanced, verify};
use proptest::prelude::*;

fn keys() -> impl Strategy<Value = Vec<u16>> {
    // A narrow key range forces plenty of duplicates.
    prop::collection::vec(0_u16..64, 1..80)
}

/// Red nodes must never have red children of either side in a finished tree.
fn no_red_pairs(node: &Node<u16>) -> bool {
    let red_child = node.left().is_some_and(|l| l.is_red()) || node.right().is_some_and(|r| r.is_red());
    !(node.is_red() && red_child)
        && node.left().is_none_or(|l| no_red_pairs(l))
        && node.right().is_none_or(|r| no_red_pairs(r))
}

proptest! {
    #[test]
    fn completed_insertions_keep_every_invariant(values in keys()) {
        let mut root: Tree<u16> = None;
        let mut sorted = Vec::new();
        for value in values {
            let finished = insert(Node::new(value), root.take()).finish();
            sorted.push(value);
            sorted.sort_unstable();

            prop_assert!(!finished.is_red());
            prop_assert!(verify(Some(finished.as_ref())).is_ok());
            prop_assert!(no_red_pairs(&finished));
            prop_assert!(finished.in_order().copied().eq(sorted.iter().copied()));
            root = Some(finished);
        }
    }

    #[test]
    fn every_snapshot_is_a_search_tree_holding_all_keys(values in keys(), extra in 0_u16..64) {
        let root = arbor_llrb::build(values.iter().copied());
        let mut expected: Vec<u16> = values.clone();
        expected.push(extra);
        expected.sort_unstable();

        let mutations: Vec<_> = insert(Node::new(extra), root).collect();
        prop_assert_eq!(mutations[0].kind, MutationKind::Insert);
        for mutation in &mutations {
            prop_assert_eq!(mutation.result.size(), expected.len());
            prop_assert!(mutation.result.in_order().copied().eq(expected.iter().copied()));
        }
        // Only the last step may blacken the root.
        for mutation in &mutations[..mutations.len() - 1] {
            prop_assert_ne!(mutation.kind, MutationKind::BlackenRoot);
        }
    }

    #[test]
    fn yielded_snapshots_never_change(values in keys(), extra in 0_u16..64) {
        let root = arbor_llrb::build(values);
        let mut cursor = insert(Node::new(extra), root);
        let mut seen: Vec<(Arc<Node<u16>>, Node<u16>)> = Vec::new();
        for mutation in cursor.by_ref() {
            let frozen = (*mutation.result).clone();
            seen.push((mutation.result, frozen));
            for (shared, frozen) in &seen {
                prop_assert_eq!(shared.as_ref(), frozen);
            }
        }
    }

    #[test]
    fn the_input_tree_is_never_modified(values in keys(), extra in 0_u16..64) {
        let root = arbor_llrb::build(values);
        let before = root.as_deref().cloned();
        let _ = insert(Node::new(extra), root.clone()).finish();
        prop_assert_eq!(root.as_deref(), before.as_ref());
    }

    #[test]
    fn unbalanced_insertion_preserves_order(values in keys()) {
        let mut root: Tree<u16> = None;
        for value in &values {
            root = Some(insert_unbalanced(Node::new(*value), root).finish());
        }
        let mut sorted = values;
        sorted.sort_unstable();
        let root = root.unwrap();
        prop_assert!(root.in_order().copied().eq(sorted));
    }
}
