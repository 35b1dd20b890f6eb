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

//! Pass combinators: `Chain` for sequential composition,
//! `FixedPoint` for iterate-until-stable.

use crate::error::Error;
use crate::node::Node;
use crate::pass::Pass;

/// Sequential composition of two passes: `Chain::new(a, b).run(x) ==
/// b.run(a.run(x)?)`.
///
/// `Chain` is the whole story for n-ary sequencing too: `Chain(a, b, c)`
/// is `Chain::new(Chain::new(a, b), c)` (or the other association) — both
/// run `a` then `b` then `c` on the same values, so associativity holds by
/// construction, not by any extra bookkeeping.
pub struct Chain<P1, P2> {
    first: P1,
    second: P2,
}

impl<P1, P2> Chain<P1, P2> {
    pub fn new(first: P1, second: P2) -> Self {
        Chain { first, second }
    }
}

impl<A, B, C, P1, P2> Pass<A, C> for Chain<P1, P2>
where
    P1: Pass<A, B>,
    P2: Pass<B, C>,
{
    fn run(&mut self, root: A) -> Result<C, Error> {
        let mid = self.first.run(root)?;
        self.second.run(mid)
    }
}

/// Iterate a pass until its output stops changing, per `Node`'s structural
/// equality.
///
/// The unbounded form (`FixedPoint::new`) never caps the iteration count:
/// if the inner pass never stabilizes, this diverges by contract, and it
/// is the caller's job to pair it with a confluent-enough pass.
/// `FixedPoint::bounded` caps the iteration count explicitly, failing with
/// `Error::DivergentFixedPoint` rather than looping forever.
pub struct FixedPoint<P> {
    inner: P,
    limit: Option<usize>,
}

impl<P> FixedPoint<P> {
    /// No iteration cap; diverges if `inner` never reaches a fixed point.
    pub fn new(inner: P) -> Self {
        FixedPoint { inner, limit: None }
    }

    /// Caps iteration at `limit` applications, failing with
    /// `Error::DivergentFixedPoint` rather than looping forever.
    pub fn bounded(inner: P, limit: usize) -> Self {
        FixedPoint {
            inner,
            limit: Some(limit),
        }
    }
}

impl<N, P> Pass<N, N> for FixedPoint<P>
where
    N: Node,
    P: Pass<N, N>,
{
    fn run(&mut self, root: N) -> Result<N, Error> {
        let mut current = root;
        let mut steps = 0usize;
        loop {
            let next = self.inner.run(current.clone())?;
            steps += 1;
            tracing::trace!(step = steps, "fixed_point: iteration");
            if next == current {
                return Ok(next);
            }
            if let Some(limit) = self.limit {
                if steps >= limit {
                    return Err(Error::DivergentFixedPoint { limit });
                }
            }
            current = next;
        }
    }
}
