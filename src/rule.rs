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

//! Rules: per-variant handler registries.
//!
//! Two flavors. `RewriteRule<N>` maps a node to a possibly-replaced node of
//! the same IR. `ConversionRule<N, R>` maps a node plus its already-converted
//! children to a value of any type `R`. Both dispatch by variant tag; both
//! are built the same way, one handler at a time.

use std::collections::HashMap;
use std::fmt;

use crate::error::BoxError;
use crate::node::{Leaf, Node};

/// The identity marker: what a rewrite handler returns
/// to say "no change at this node."
#[derive(Clone, Debug, PartialEq)]
pub enum Rewrite<N> {
    /// No change; the walk substitutes the node rebuilt from walked children.
    Unchanged,
    /// Replace the current position with this node.
    Replace(N),
}

type RewriteHandler<N> = Box<dyn FnMut(&N) -> Result<Rewrite<N>, BoxError>>;

/// A per-variant handler registry for node-to-node rewriting.
///
/// Handlers may carry their own state (an `FnMut` closure capturing a
/// counter, an accumulator, whatever) across invocations within one pass
/// application; the registry does not reset that state between nodes.
pub struct RewriteRule<N: Node> {
    handlers: HashMap<&'static str, RewriteHandler<N>>,
}

impl<N: Node> fmt::Debug for RewriteRule<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteRule")
            .field("variants", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<N: Node> Default for RewriteRule<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> RewriteRule<N> {
    pub fn new() -> Self {
        RewriteRule {
            handlers: HashMap::new(),
        }
    }

    /// Register (or replace) the handler for `variant`. Declarative callers
    /// chain `.on(...)` calls; incremental callers call it in a loop.
    pub fn on<F>(mut self, variant: &'static str, handler: F) -> Self
    where
        F: FnMut(&N) -> Result<Rewrite<N>, BoxError> + 'static,
    {
        self.handlers.insert(variant, Box::new(handler));
        self
    }

    /// Same as `on`, but for code that already owns a `RewriteRule` and
    /// wants to register more handlers without rebinding it.
    pub fn register<F>(&mut self, variant: &'static str, handler: F)
    where
        F: FnMut(&N) -> Result<Rewrite<N>, BoxError> + 'static,
    {
        self.handlers.insert(variant, Box::new(handler));
    }

    /// Dispatch `node` to its handler, or `Unchanged` if none is registered
    /// (the rewrite default).
    pub(crate) fn dispatch(&mut self, node: &N) -> Result<Rewrite<N>, BoxError> {
        match self.handlers.get_mut(node.variant_tag()) {
            Some(handler) => handler(node),
            None => Ok(Rewrite::Unchanged),
        }
    }
}

/// The shape of a converted child result, mirroring `Field<N>` but with
/// every node replaced by its conversion result `R`.
#[derive(Clone, Debug, PartialEq)]
pub enum Slot<R> {
    Value(R),
    Seq(Vec<R>),
    Set(Vec<R>),
    Map(Vec<(Leaf, R)>),
    Leaf(Leaf),
}

type ConvertHandler<N, R> = Box<dyn FnMut(&N, &[(&'static str, Slot<R>)]) -> Result<R, BoxError>>;

/// A per-variant handler registry for folding a node and its converted
/// children into a value of any type `R`.
///
/// Unlike `RewriteRule`, there is no identity default: every reachable
/// variant must have a registered handler, or the walk fails with
/// `Error::UnhandledVariant`.
pub struct ConversionRule<N: Node, R> {
    handlers: HashMap<&'static str, ConvertHandler<N, R>>,
    default: Option<ConvertHandler<N, R>>,
}

impl<N: Node, R> fmt::Debug for ConversionRule<N, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRule")
            .field("variants", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<N: Node, R> Default for ConversionRule<N, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node, R> ConversionRule<N, R> {
    pub fn new() -> Self {
        ConversionRule {
            handlers: HashMap::new(),
            default: None,
        }
    }

    pub fn on<F>(mut self, variant: &'static str, handler: F) -> Self
    where
        F: FnMut(&N, &[(&'static str, Slot<R>)]) -> Result<R, BoxError> + 'static,
    {
        self.handlers.insert(variant, Box::new(handler));
        self
    }

    pub fn register<F>(&mut self, variant: &'static str, handler: F)
    where
        F: FnMut(&N, &[(&'static str, Slot<R>)]) -> Result<R, BoxError> + 'static,
    {
        self.handlers.insert(variant, Box::new(handler));
    }

    /// Register a catch-all handler used for any variant without a
    /// specific one. Used by the pretty-printer (`pretty` module) to cover
    /// an arbitrary, unregistered IR without per-variant setup; ordinary
    /// conversion rules usually don't need this, since `dispatch` already
    /// treats a missing handler as `Error::UnhandledVariant`.
    pub fn default_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&N, &[(&'static str, Slot<R>)]) -> Result<R, BoxError> + 'static,
    {
        self.default = Some(Box::new(handler));
        self
    }

    /// `None` if no handler (specific or default) is registered for this
    /// node's variant; the caller (the walk) turns that into
    /// `Error::UnhandledVariant`.
    pub(crate) fn dispatch(
        &mut self,
        node: &N,
        children: &[(&'static str, Slot<R>)],
    ) -> Option<Result<R, BoxError>> {
        if let Some(handler) = self.handlers.get_mut(node.variant_tag()) {
            return Some(handler(node, children));
        }
        self.default.as_mut().map(|handler| handler(node, children))
    }
}
