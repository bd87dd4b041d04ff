// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor LLRB: a persistent left-leaning red-black tree that shows its work.
//!
//! Inserting a key does not just return a new tree. It returns a cursor that
//! yields every atomic structural change (attach, rotate, recolor) as a
//! [`Mutation`] carrying a complete snapshot of the tree after that step.
//! Animation and teaching tools can drain the cursor and render each snapshot
//! on its own, with no diffing and no replay.
//!
//! - [`Node`]: an immutable node. Children are shared through `Arc`, so every
//!   snapshot is independent and cheap: only the nodes on the changed path
//!   are copied.
//! - [`insert`]: the step-by-step insertion into a left-leaning red-black tree.
//! - [`Mutation`] / [`MutationKind`]: the mutation log entries.
//! - [`insert_unbalanced`]: the same cursor for a plain binary search tree.
//! - [`verify`]: checks the invariants a completed insertion guarantees.
//!
//! ## Example
//!
//! ```rust
//! use arbor_llrb::{MutationKind, Node, insert, verify};
//! use std::sync::Arc;
//!
//! let root = Arc::new(Node::black('C').with_left(Node::new('A')));
//! let mutations: Vec<_> = insert(Node::new('F'), Some(root)).collect();
//!
//! let kinds: Vec<_> = mutations.iter().map(|m| m.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [MutationKind::Insert, MutationKind::FlipColors, MutationKind::BlackenRoot]
//! );
//!
//! let last = &mutations.last().unwrap().result;
//! assert_eq!(last.to_string(), "CAF");
//! assert_eq!(verify(Some(last.as_ref())), Ok(2));
//! ```
//!
//! ## Compact notation
//!
//! [`Node`] and [`Mutation`] implement `Display` with a pre-order listing in
//! which red nodes carry a `!` prefix: `C!A!F` is a black `C` with red
//! children `A` and `F`. Mutations prefix the kind and, for rotations and
//! flips, the targeted node: `rotate-left(H) K!H`.
//!
//! ## Logging
//!
//! The insertion cursor reports each step at `trace` level and the end of an
//! insertion at `debug` level through the [`log`] facade. No logger is
//! installed by this crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod insertion;
mod mutation;
mod node;
mod verify;

pub use insertion::{Insertion, build, insert, insert_unbalanced};
pub use mutation::{Mutation, MutationKind};
pub use node::{Color, InOrder, Node, Tree, is_red};
pub use verify::{Violation, verify};
