// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to lay out trees from other Arbor crates.
//!
//! Each adapter is gated behind a feature flag so the layout engine stays
//! independent of any particular tree implementation.
//!
//! ## Available Adapters
//!
//! - [`llrb`] (`llrb_adapter` feature): implements [`BinaryTree`](crate::BinaryTree)
//!   for [`arbor_llrb::Node`], so insertion snapshots can be laid out directly.

#[cfg(feature = "llrb_adapter")]
pub mod llrb;
