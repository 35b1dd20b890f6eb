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

//! The node protocol: the capability surface every user IR must supply.
//!
//! This is deliberately the thinnest possible contract. The engine never
//! looks inside a node except through `variant_tag`, `fields`, and
//! `rebuild`. A concrete IR (the calculator in the tests, or a real
//! compiler's AST) implements `Node` once and gets every walk, rule, and
//! combinator in this crate for free.

use std::fmt::Debug;

use crate::error::ValidationError;

/// A leaf value: anything that isn't a node and isn't a container of nodes.
///
/// `f64` equality here is `PartialEq` on the bit pattern semantics of
/// `f64`, i.e. `NaN != NaN`. That's inherited, not special-cased: a node
/// containing `Leaf::Float(NAN)` is simply never `equal` to itself, which
/// is the same gotcha IEEE 754 hands everyone else.
#[derive(Clone, Debug, PartialEq)]
pub enum Leaf {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl std::fmt::Display for Leaf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Leaf::Int(v) => write!(f, "{v}"),
            Leaf::Float(v) => write!(f, "{v}"),
            Leaf::Str(v) => write!(f, "{v}"),
            Leaf::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Leaf {
    fn from(v: i64) -> Self {
        Leaf::Int(v)
    }
}

impl From<f64> for Leaf {
    fn from(v: f64) -> Self {
        Leaf::Float(v)
    }
}

impl From<bool> for Leaf {
    fn from(v: bool) -> Self {
        Leaf::Bool(v)
    }
}

impl From<String> for Leaf {
    fn from(v: String) -> Self {
        Leaf::Str(v)
    }
}

impl From<&str> for Leaf {
    fn from(v: &str) -> Self {
        Leaf::Str(v.to_string())
    }
}

/// The shape of a single field's value, recognized structurally.
///
/// `Set`'s "unordered" guarantee is the node's responsibility: the walk
/// passes whatever `Vec<N>` it produced back into `rebuild`, and it is
/// `rebuild` that canonicalizes (sorts, dedups, whatever the IR considers
/// canonical order) before accepting it.
#[derive(Clone, Debug, PartialEq)]
pub enum Field<N> {
    /// A single child node.
    Node(N),
    /// An ordered sequence of child nodes; iteration order is emitted order.
    Seq(Vec<N>),
    /// A set of child nodes; order is not significant, `rebuild` canonicalizes.
    Set(Vec<N>),
    /// A mapping whose values are child nodes; keys are leaves, preserved verbatim.
    Map(Vec<(Leaf, N)>),
    /// A leaf value: not walked, passed through untouched.
    Leaf(Leaf),
}

impl<N> Field<N> {
    /// True if this field has no node-shaped children to walk.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Field::Leaf(_))
    }
}

/// The capability surface the walk/rule/pass engine requires of a node.
///
/// Implementors are ordinary records: an immutable value carrying a
/// variant tag and a fixed, declaration-ordered set of named fields. The
/// engine treats every node as opaque beyond this trait.
pub trait Node: Clone + Debug + PartialEq + Sized {
    /// Stable identifier of this node's concrete variant, e.g. `"Add"`.
    ///
    /// Used as the dispatch key by `RewriteRule`/`ConversionRule`. Renaming
    /// a variant is a breaking change to any rule keyed on its tag.
    fn variant_tag(&self) -> &'static str;

    /// This node's fields, enumerated left to right in declaration order.
    fn fields(&self) -> Vec<(&'static str, Field<Self>)>;

    /// Reconstruct a node of the same variant as `self` from a new field
    /// mapping, e.g. one produced by walking `self.fields()`.
    ///
    /// `new_fields` must carry the same field names as `self.fields()`
    /// (order does not need to match; the walk always supplies fields in
    /// `self.fields()`'s own order, but implementations should not rely on
    /// that for robustness). Implementations validate shape (field count,
    /// container kind, leaf type) and variant-specific invariants, failing
    /// with `ValidationError` rather than panicking.
    fn rebuild(&self, new_fields: Vec<(&'static str, Field<Self>)>) -> Result<Self, ValidationError>;
}
