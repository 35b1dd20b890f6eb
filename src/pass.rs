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

//! The pass contract: a uniform `root -> result` callable
//! that `Chain` and `FixedPoint` compose without caring whether the result
//! came from a rewrite or a conversion.

use crate::error::Error;
use crate::node::Node;
use crate::rule::{ConversionRule, RewriteRule};
use crate::walk::Walk;

/// Anything that maps a root of type `In` to a result of type `Out`.
///
/// Any `(Walk, RewriteRule)` or `(Walk, ConversionRule)` pair is a `Pass`
/// by virtue of implementing this trait (see `RewritePass`/`ConvertPass`
/// below); `Chain` and `FixedPoint` are passes built out of other passes.
pub trait Pass<In, Out> {
    fn run(&mut self, root: In) -> Result<Out, Error>;
}

/// A `Walk` paired with a `RewriteRule`: a pass from `N` to `N`.
pub struct RewritePass<N: Node> {
    walk: Walk,
    rule: RewriteRule<N>,
}

impl<N: Node> RewritePass<N> {
    pub fn new(walk: Walk, rule: RewriteRule<N>) -> Self {
        RewritePass { walk, rule }
    }
}

impl<N: Node> Pass<N, N> for RewritePass<N> {
    fn run(&mut self, root: N) -> Result<N, Error> {
        self.walk.apply_rewrite(&root, &mut self.rule)
    }
}

/// A `Walk` paired with a `ConversionRule`: a pass from `N` to `R`.
pub struct ConvertPass<N: Node, R> {
    walk: Walk,
    rule: ConversionRule<N, R>,
}

impl<N: Node, R> ConvertPass<N, R> {
    pub fn new(walk: Walk, rule: ConversionRule<N, R>) -> Self {
        ConvertPass { walk, rule }
    }
}

impl<N: Node, R> Pass<N, R> for ConvertPass<N, R> {
    fn run(&mut self, root: N) -> Result<R, Error> {
        self.walk.apply_convert(&root, &mut self.rule)
    }
}
