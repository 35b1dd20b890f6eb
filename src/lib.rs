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

//! A reusable substrate for building compilers and interpreters over
//! user-defined tree-shaped IRs.
//!
//! An IR implements [`Node`] once — a variant tag, a list of named fields,
//! and a way to rebuild itself from a new field list — and gets every
//! traversal strategy, rewrite/conversion rule, and pass combinator in this
//! crate for free. A [`RewriteRule`] maps a node to a possibly-replaced node
//! of the same IR; a [`ConversionRule`] folds a node and its already-folded
//! children into a value of any type. A [`Walk`] drives either kind of rule
//! over a tree in one of four orders ([`Strategy::Pre`], [`Strategy::Post`],
//! [`Strategy::In`], [`Strategy::Level`]), each either [`Direction::Forward`]
//! or [`Direction::Reverse`]. [`Pass`] is the uniform contract both kinds of
//! walk satisfy, so [`Chain`] and [`FixedPoint`] can compose them without
//! caring which is which.
//!
//! ```
//! use passforge::{Field, Leaf, Node, Rewrite, RewriteRule, Strategy, ValidationError, Walk};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Expr {
//!     Int(i64),
//!     Add(Box<Expr>, Box<Expr>),
//! }
//!
//! impl Node for Expr {
//!     fn variant_tag(&self) -> &'static str {
//!         match self {
//!             Expr::Int(_) => "Int",
//!             Expr::Add(..) => "Add",
//!         }
//!     }
//!
//!     fn fields(&self) -> Vec<(&'static str, Field<Self>)> {
//!         match self {
//!             Expr::Int(v) => vec![("v", Field::Leaf(Leaf::Int(*v)))],
//!             Expr::Add(l, r) => vec![
//!                 ("l", Field::Node((**l).clone())),
//!                 ("r", Field::Node((**r).clone())),
//!             ],
//!         }
//!     }
//!
//!     fn rebuild(&self, fields: Vec<(&'static str, Field<Self>)>) -> Result<Self, ValidationError> {
//!         match (self, fields.as_slice()) {
//!             (Expr::Int(_), [(_, Field::Leaf(Leaf::Int(v)))]) => Ok(Expr::Int(*v)),
//!             (Expr::Add(..), [(_, Field::Node(l)), (_, Field::Node(r))]) => {
//!                 Ok(Expr::Add(Box::new(l.clone()), Box::new(r.clone())))
//!             }
//!             _ => Err(ValidationError::new(self.variant_tag(), "shape mismatch")),
//!         }
//!     }
//! }
//!
//! let rule = RewriteRule::new().on("Add", |node: &Expr| {
//!     if let Expr::Add(l, r) = node {
//!         if let (Expr::Int(a), Expr::Int(b)) = (l.as_ref(), r.as_ref()) {
//!             return Ok(Rewrite::Replace(Expr::Int(a + b)));
//!         }
//!     }
//!     Ok(Rewrite::Unchanged)
//! });
//! let mut rule = rule;
//! let result = Walk::new(Strategy::Post)
//!     .apply_rewrite(&Expr::Add(Box::new(Expr::Int(1)), Box::new(Expr::Int(2))), &mut rule)
//!     .unwrap();
//! assert_eq!(result, Expr::Int(3));
//! ```

mod canonical;
mod error;
mod node;
mod pass;
mod pretty;
mod rewriter;
mod rule;
mod walk;

#[cfg(test)]
mod tests_support;

pub use canonical::{canonicalize, canonicalize_bounded};
pub use error::{BoxError, Error, Path, PathSegment, ValidationError};
pub use node::{Field, Leaf, Node};
pub use pass::{ConvertPass, Pass, RewritePass};
pub use pretty::{pretty_print, printer};
pub use rewriter::{Chain, FixedPoint};
pub use rule::{ConversionRule, Rewrite, RewriteRule, Slot};
pub use walk::{Direction, Strategy, Walk};
