// The MIT License (MIT)
//
// Copyright © 2022 <Brandon Lewis>
//
// Permission is hereby granted, free of charge, to any person
// obtaining a copy of this software and associated documentation
// files (the “Software”), to deal in the Software without
// restriction, including without limitation the rights to use, copy,
// modify, merge, publish, distribute, sublicense, and/or sell copies
// of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS
// BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN
// ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
//
// Fork this project to create your own MIT license that you can
// always link to.

//! Reference auxiliary rule #1: a generic pretty-printer.
//!
//! Works for any `Node` impl without per-IR setup, by using a catch-all
//! handler (`ConversionRule::default_handler`) synthesized from
//! `variant_tag`/`fields` alone: `"<tag>(field=<child>, ...)"`, with
//! containers rendered `[a, b, c]` / `{a, b, c}` / `{k: v, ...}`.

use crate::node::Node;
use crate::rule::{ConversionRule, Slot};
use crate::walk::{Strategy, Walk};

/// Build a `ConversionRule` that renders any node to a deterministic,
/// human-readable string. Pair with `Walk::new(Strategy::Post)` (the only
/// legal strategy for a `ConversionRule`) to run it.
pub fn printer<N: Node>() -> ConversionRule<N, String> {
    ConversionRule::new().default_handler(|node, children| {
        let rendered: Vec<String> = children
            .iter()
            .map(|(name, slot)| format!("{name}={}", render_slot(slot)))
            .collect();
        Ok(format!("{}({})", node.variant_tag(), rendered.join(", ")))
    })
}

/// Convenience: pretty-print `root` in one call.
pub fn pretty_print<N: Node>(root: &N) -> Result<String, crate::error::Error> {
    let walk = Walk::new(Strategy::Post);
    let mut rule = printer::<N>();
    walk.apply_convert(root, &mut rule)
}

fn render_slot(slot: &Slot<String>) -> String {
    match slot {
        Slot::Value(s) => s.clone(),
        Slot::Leaf(leaf) => leaf.to_string(),
        Slot::Seq(items) => format!("[{}]", items.join(", ")),
        Slot::Set(items) => format!("{{{}}}", items.join(", ")),
        Slot::Map(entries) => {
            let rendered: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{key}: {value}"))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
    }
}
