// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Step-by-step insertion rendered as text.
//!
//! This example shows how to combine:
//! - `arbor_llrb` to grow a left-leaning red-black tree one mutation at a time,
//! - `arbor_tidy` to lay out each resulting tree on a grid and check it fits a canvas.
//!
//! Run:
//! - `cargo run -p arbor_demos --example insertion_steps`
//! - `cargo run -p arbor_demos --example insertion_steps -- ALGORITHMS`

use arbor_llrb::{Node, Tree, insert, insert_unbalanced};
use arbor_tidy::{FitParams, tidy_layout};
use kurbo::Size;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Canvas the interactive view draws on.
const CANVAS: Size = Size::new(800.0, 600.0);

/// Characters per grid column.
const CELL: f64 = 2.0;

fn collect<'a>(node: &'a Node<char>, out: &mut Vec<&'a Node<char>>) {
    out.push(node);
    if let Some(left) = node.left() {
        collect(left, out);
    }
    if let Some(right) = node.right() {
        collect(right, out);
    }
}

/// Draw the tree on a character grid, red nodes prefixed with `!`.
fn render(tree: &Node<char>) -> String {
    let layout = tidy_layout(tree);
    let extent = layout.extent();
    // Parents can sit on fractional columns; round to the nearest character.
    // Nodes on a row are at least two columns apart, so rounding never collides.
    let width = (extent.width * CELL).ceil() as usize + 1;
    let mut rows = vec![vec![' '; width]; extent.height as usize];

    let mut nodes = Vec::new();
    collect(tree, &mut nodes);
    for node in nodes {
        let position = layout.node_position(node);
        let row = &mut rows[position.y as usize];
        let col = (position.x * CELL).round() as usize;
        if node.is_red() {
            row[col] = '!';
        }
        row[col + 1] = *node.value();
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe(label: &str, tree: &Node<char>) {
    let layout = tidy_layout(tree);
    let fit = layout.fit(CANVAS, FitParams::default());
    let size = fit.tree_size();
    println!(
        "{label}: {} nodes, height {}, drawn size {:.0}x{:.0}{}",
        tree.size(),
        tree.height(),
        size.width,
        size.height,
        if fit.is_oversized() {
            " (oversized)"
        } else {
            ""
        }
    );
}

fn main() {
    if let Err(err) = TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logging disabled: {err}");
    }

    let word = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "SEARCHEXAMPLE".to_owned());

    let mut balanced: Tree<char> = None;
    let mut unbalanced: Tree<char> = None;
    for key in word.chars() {
        println!("\n== insert {key} ==");
        let mut last = None;
        for mutation in insert(Node::new(key), balanced.take()) {
            println!("  {mutation}");
            last = Some(mutation.result);
        }
        balanced = last;
        unbalanced = Some(insert_unbalanced(Node::new(key), unbalanced.take()).finish());
    }

    let (Some(balanced), Some(unbalanced)) = (balanced, unbalanced) else {
        println!("nothing to insert");
        return;
    };

    println!("\n{}\n", render(&balanced));
    describe("red-black", &balanced);
    describe("unbalanced", &unbalanced);
    log::info!(
        "black height {}",
        arbor_llrb::verify(Some(balanced.as_ref())).unwrap_or_default()
    );
}
