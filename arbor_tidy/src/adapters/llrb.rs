// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout support for Arbor LLRB nodes.
//!
//! ## Feature
//!
//! Enable with `llrb_adapter`.
//!
//! ## Notes
//!
//! Positions are keyed by node identity. Each [`arbor_llrb::Mutation`] result
//! is a separate tree, so lay out the snapshot you intend to draw and query it
//! with nodes reached from that same snapshot.

use arbor_llrb::Node;

use crate::BinaryTree;

impl<K> BinaryTree for Node<K> {
    fn left(&self) -> Option<&Self> {
        Node::left(self).map(|n| &**n)
    }

    fn right(&self) -> Option<&Self> {
        Node::right(self).map(|n| &**n)
    }

    fn is_leaf(&self) -> bool {
        Node::is_leaf(self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use arbor_llrb::{Node, insert};
    use kurbo::Point;

    use crate::tidy_layout;

    #[test]
    fn lays_out_each_insertion_snapshot() {
        let root = Arc::new(Node::black('C').with_left(Node::new('A')));
        for mutation in insert(Node::new('F'), Some(root)) {
            let tree = &*mutation.result;
            let layout = tidy_layout(tree);
            // Every snapshot here is C over A and F.
            assert_eq!(layout.node_position(tree), Point::new(1.0, 0.0));
            let left = tree.left().unwrap();
            let right = tree.right().unwrap();
            assert_eq!(layout.node_position(left), Point::new(0.0, 1.0));
            assert_eq!(layout.node_position(right), Point::new(2.0, 1.0));
        }
    }

    #[test]
    fn shared_subtrees_are_laid_out_per_snapshot() {
        let before = arbor_llrb::build("HFK".chars()).unwrap();
        let after = insert(Node::new('Z'), Some(Arc::clone(&before))).finish();
        let before_layout = tidy_layout(&*before);
        let after_layout = tidy_layout(&*after);

        // `F` is shared between both trees and has a position in each.
        let shared = before.left().unwrap();
        assert!(before_layout.position(shared).is_some());
        assert!(after_layout.position(shared).is_some());
        assert_eq!(after_layout.node_count(), 4);
    }
}
