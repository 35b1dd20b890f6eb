//! Calculator IR shared by the integration test binaries: `Int(v)`,
//! `Add(l,r)`, `Mul(l,r)`, `Pow(l,r)`, `Program(expr)`.

#![allow(dead_code)]

use std::sync::Once;

use passforge::{Field, Leaf, Node, ValidationError};

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber for the test binary, once. `passforge`
/// itself never does this (it only emits events); the caller decides
/// whether anything is listening, and here the integration tests are that
/// caller.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .init();
    });
}

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

fn binary(l: &Expr, r: &Expr) -> Vec<(&'static str, Field<Expr>)> {
    vec![("l", Field::Node(l.clone())), ("r", Field::Node(r.clone()))]
}

fn take_binary(
    variant: &'static str,
    mut fields: Vec<(&'static str, Field<Expr>)>,
) -> Result<(Expr, Expr), ValidationError> {
    if fields.len() != 2 {
        return Err(ValidationError::new(variant, "expected exactly 2 fields"));
    }
    let (_, r) = fields.pop().unwrap();
    let (_, l) = fields.pop().unwrap();
    match (l, r) {
        (Field::Node(l), Field::Node(r)) => Ok((l, r)),
        _ => Err(ValidationError::new(variant, "both fields must be nodes")),
    }
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
            Expr::Add(l, r) => binary(l, r),
            Expr::Mul(l, r) => binary(l, r),
            Expr::Pow(l, r) => binary(l, r),
            Expr::Program(body) => vec![("expr", Field::Node((**body).clone()))],
        }
    }

    fn rebuild(&self, fields: Vec<(&'static str, Field<Self>)>) -> Result<Self, ValidationError> {
        match self {
            Expr::Int(_) => match fields.into_iter().next() {
                Some((_, Field::Leaf(Leaf::Int(v)))) => Ok(Expr::Int(v)),
                _ => Err(ValidationError::new("Int", "field `v` is not an int leaf")),
            },
            Expr::Add(..) => {
                let (l, r) = take_binary("Add", fields)?;
                Ok(Expr::Add(Box::new(l), Box::new(r)))
            }
            Expr::Mul(..) => {
                let (l, r) = take_binary("Mul", fields)?;
                Ok(Expr::Mul(Box::new(l), Box::new(r)))
            }
            Expr::Pow(..) => {
                let (l, r) = take_binary("Pow", fields)?;
                Ok(Expr::Pow(Box::new(l), Box::new(r)))
            }
            Expr::Program(_) => match fields.into_iter().next() {
                Some((_, Field::Node(body))) => Ok(Expr::Program(Box::new(body))),
                _ => Err(ValidationError::new("Program", "field `expr` is not a node")),
            },
        }
    }
}

/// Bounded generator for arbitrary `Expr` trees, for use with `proptest`.
pub fn arb_expr() -> impl proptest::strategy::Strategy<Value = Expr> {
    use proptest::prelude::*;
    let leaf = any::<i8>().prop_map(|v| Expr::int(v as i64));
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::add(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::mul(l, r)),
            inner.prop_map(Expr::program),
        ]
    })
}
