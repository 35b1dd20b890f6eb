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

//! Reference auxiliary rule #2: canonical form.
//!
//! Bundles `FixedPoint(Post(rewrite_rule))` into one call: apply the
//! rewrite bottom-up, repeat until the tree stops changing.

use crate::error::Error;
use crate::pass::{Pass, RewritePass};
use crate::node::Node;
use crate::rewriter::FixedPoint;
use crate::rule::RewriteRule;
use crate::walk::{Strategy, Walk};

/// Rewrite `root` bottom-up with `rule` repeatedly until a fixed point,
/// with no iteration cap. Diverges if `rule` never stabilizes.
pub fn canonicalize<N: Node>(root: N, rule: RewriteRule<N>) -> Result<N, Error> {
    let pass = RewritePass::new(Walk::new(Strategy::Post), rule);
    let mut fixed = FixedPoint::new(pass);
    fixed.run(root)
}

/// Same as `canonicalize`, but fails with `Error::DivergentFixedPoint`
/// rather than looping forever past `limit` applications.
pub fn canonicalize_bounded<N: Node>(
    root: N,
    rule: RewriteRule<N>,
    limit: usize,
) -> Result<N, Error> {
    let pass = RewritePass::new(Walk::new(Strategy::Post), rule);
    let mut fixed = FixedPoint::bounded(pass, limit);
    fixed.run(root)
}
