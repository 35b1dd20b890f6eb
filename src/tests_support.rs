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

//! A minimal arithmetic IR shared by the `#[cfg(test)]` unit tests in this
//! crate's own modules. Integration tests under `tests/` can't see this (it's
//! private and test-gated); they use `tests/common/mod.rs` instead.

#![cfg(test)]

pub mod calc {
    use crate::error::ValidationError;
    use crate::node::{Field, Leaf, Node};

    #[derive(Clone, Debug, PartialEq)]
    pub enum Expr {
        Int(i64),
        Add(Box<Expr>, Box<Expr>),
        Mul(Box<Expr>, Box<Expr>),
        Pow(Box<Expr>, Box<Expr>),
        Program(Box<Expr>),
    }

    impl Expr {
        pub fn int(v: i64) -> Expr {
            Expr::Int(v)
        }

        pub fn add(l: Expr, r: Expr) -> Expr {
            Expr::Add(Box::new(l), Box::new(r))
        }

        pub fn mul(l: Expr, r: Expr) -> Expr {
            Expr::Mul(Box::new(l), Box::new(r))
        }

        pub fn pow(l: Expr, r: Expr) -> Expr {
            Expr::Pow(Box::new(l), Box::new(r))
        }

        pub fn program(body: Expr) -> Expr {
            Expr::Program(Box::new(body))
        }
    }

    fn binary_fields(l: &Expr, r: &Expr) -> Vec<(&'static str, Field<Expr>)> {
        vec![
            ("l", Field::Node(l.clone())),
            ("r", Field::Node(r.clone())),
        ]
    }

    fn take_two(
        variant: &'static str,
        mut fields: Vec<(&'static str, Field<Expr>)>,
    ) -> Result<(Expr, Expr), ValidationError> {
        if fields.len() != 2 {
            return Err(ValidationError::new(
                variant,
                format!("expected 2 fields, got {}", fields.len()),
            ));
        }
        let (_, r) = fields.pop().unwrap();
        let (_, l) = fields.pop().unwrap();
        let l = match l {
            Field::Node(n) => n,
            _ => return Err(ValidationError::new(variant, "field `l` is not a node")),
        };
        let r = match r {
            Field::Node(n) => n,
            _ => return Err(ValidationError::new(variant, "field `r` is not a node")),
        };
        Ok((l, r))
    }

    impl Node for Expr {
        fn variant_tag(&self) -> &'static str {
            match self {
                Expr::Int(_) => "Int",
                Expr::Add(..) => "Add",
                Expr::Mul(..) => "Mul",
                Expr::Pow(..) => "Pow",
                Expr::Program(_) => "Program",
            }
        }

        fn fields(&self) -> Vec<(&'static str, Field<Self>)> {
            match self {
                Expr::Int(v) => vec![("v", Field::Leaf(Leaf::Int(*v)))],
                Expr::Add(l, r) => binary_fields(l, r),
                Expr::Mul(l, r) => binary_fields(l, r),
                Expr::Pow(l, r) => binary_fields(l, r),
                Expr::Program(body) => vec![("body", Field::Node((**body).clone()))],
            }
        }

        fn rebuild(
            &self,
            new_fields: Vec<(&'static str, Field<Self>)>,
        ) -> Result<Self, ValidationError> {
            match self {
                Expr::Int(_) => {
                    let (_, field) = new_fields
                        .into_iter()
                        .next()
                        .ok_or_else(|| ValidationError::new("Int", "missing field `v`"))?;
                    match field {
                        Field::Leaf(Leaf::Int(v)) => Ok(Expr::Int(v)),
                        _ => Err(ValidationError::new("Int", "field `v` is not an int leaf")),
                    }
                }
                Expr::Add(..) => {
                    let (l, r) = take_two("Add", new_fields)?;
                    Ok(Expr::Add(Box::new(l), Box::new(r)))
                }
                Expr::Mul(..) => {
                    let (l, r) = take_two("Mul", new_fields)?;
                    Ok(Expr::Mul(Box::new(l), Box::new(r)))
                }
                Expr::Pow(..) => {
                    let (l, r) = take_two("Pow", new_fields)?;
                    Ok(Expr::Pow(Box::new(l), Box::new(r)))
                }
                Expr::Program(_) => {
                    let (_, field) = new_fields
                        .into_iter()
                        .next()
                        .ok_or_else(|| ValidationError::new("Program", "missing field `body`"))?;
                    match field {
                        Field::Node(n) => Ok(Expr::Program(Box::new(n))),
                        _ => Err(ValidationError::new("Program", "field `body` is not a node")),
                    }
                }
            }
        }
    }
}
