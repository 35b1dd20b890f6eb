//! End-to-end scenarios over the calculator IR (`Int`, `Add`, `Mul`, `Pow`,
//! `Program`), exercising every public entry point together.

mod common;

use common::Expr;
use passforge::{
    canonicalize, Chain, ConversionRule, Error, Pass, Rewrite, RewriteRule, Strategy, Walk,
};

// S1: evaluation via Post conversion.
#[test]
fn s1_evaluation() {
    common::init_tracing();

    let program = Expr::program(Expr::add(
        Expr::int(1),
        Expr::mul(Expr::int(2), Expr::pow(Expr::int(3), Expr::int(4))),
    ));

    let mut rule: ConversionRule<Expr, i64> = ConversionRule::new()
        .on("Int", |node, _children| match node {
            Expr::Int(v) => Ok(*v),
            _ => unreachable!(),
        })
        .on("Add", |_node, children| {
            let (l, r) = two_values(children);
            Ok(l + r)
        })
        .on("Mul", |_node, children| {
            let (l, r) = two_values(children);
            Ok(l * r)
        })
        .on("Pow", |_node, children| {
            let (l, r) = two_values(children);
            Ok(l.pow(r as u32))
        })
        .on("Program", |_node, children| {
            let (_, slot) = &children[0];
            match slot {
                passforge::Slot::Value(v) => Ok(*v),
                _ => unreachable!(),
            }
        });

    let walk = Walk::new(Strategy::Post);
    let result = walk.apply_convert(&program, &mut rule).unwrap();
    assert_eq!(result, 163);
}

fn two_values(children: &[(&'static str, passforge::Slot<i64>)]) -> (i64, i64) {
    let l = match &children[0].1 {
        passforge::Slot::Value(v) => *v,
        _ => unreachable!(),
    };
    let r = match &children[1].1 {
        passforge::Slot::Value(v) => *v,
        _ => unreachable!(),
    };
    (l, r)
}

// S2: associativity canonicalization via FixedPoint(Post(rewrite)).
#[test]
fn s2_associativity_canonicalization() {
    common::init_tracing();

    let input = Expr::add(
        Expr::int(1),
        Expr::add(Expr::int(2), Expr::add(Expr::int(3), Expr::int(4))),
    );

    let rule = RewriteRule::new().on("Add", |node: &Expr| {
        if let Expr::Add(a, bc) = node {
            if let Expr::Add(b, c) = bc.as_ref() {
                return Ok(Rewrite::Replace(Expr::add(
                    Expr::add((**a).clone(), (**b).clone()),
                    (**c).clone(),
                )));
            }
        }
        Ok(Rewrite::Unchanged)
    });

    let result = canonicalize(input, rule).unwrap();
    let expected = Expr::add(
        Expr::add(Expr::add(Expr::int(1), Expr::int(2)), Expr::int(3)),
        Expr::int(4),
    );
    assert_eq!(result, expected);
}

// S3: distributivity via FixedPoint(Post(rewrite)).
#[test]
fn s3_distributivity() {
    let input = Expr::mul(Expr::add(Expr::int(1), Expr::int(2)), Expr::int(3));

    let rule = RewriteRule::new().on("Mul", |node: &Expr| {
        if let Expr::Mul(ab, c) = node {
            if let Expr::Add(a, b) = ab.as_ref() {
                return Ok(Rewrite::Replace(Expr::add(
                    Expr::mul((**a).clone(), (**c).clone()),
                    Expr::mul((**b).clone(), (**c).clone()),
                )));
            }
        }
        Ok(Rewrite::Unchanged)
    });

    let result = canonicalize(input, rule).unwrap();
    let expected = Expr::add(
        Expr::mul(Expr::int(1), Expr::int(3)),
        Expr::mul(Expr::int(2), Expr::int(3)),
    );
    assert_eq!(result, expected);
}

// S4: a non-identity replacement under In must fail with InvalidWalkForRule.
#[test]
fn s4_invalid_rewrite_under_in() {
    let tree = Expr::add(Expr::int(0), Expr::int(5));
    let rule = RewriteRule::new().on("Int", |node: &Expr| {
        if matches!(node, Expr::Int(0)) {
            Ok(Rewrite::Replace(Expr::int(1)))
        } else {
            Ok(Rewrite::Unchanged)
        }
    });
    let mut rule = rule;
    let walk = Walk::new(Strategy::In);
    let result = walk.apply_rewrite(&tree, &mut rule);
    assert!(matches!(result, Err(Error::InvalidWalkForRule { .. })));
}

// S5: a ConversionRule missing a handler for a reachable variant fails with
// UnhandledVariant.
#[test]
fn s5_unhandled_conversion() {
    let tree = Expr::pow(Expr::int(2), Expr::int(3));
    let mut rule: ConversionRule<Expr, i64> =
        ConversionRule::new().on("Int", |node, _| match node {
            Expr::Int(v) => Ok(*v),
            _ => unreachable!(),
        });
    let walk = Walk::new(Strategy::Post);
    let result = walk.apply_convert(&tree, &mut rule);
    assert!(matches!(result, Err(Error::UnhandledVariant { .. })));
}

// S6: Chain order — A increments every Int, B sums every Int.
#[test]
fn s6_chain_order() {
    let tree = Expr::add(Expr::int(1), Expr::mul(Expr::int(2), Expr::int(3)));

    let increment = RewriteRule::new().on("Int", |node: &Expr| {
        if let Expr::Int(v) = node {
            Ok(Rewrite::Replace(Expr::int(v + 1)))
        } else {
            Ok(Rewrite::Unchanged)
        }
    });
    let a = passforge::RewritePass::new(Walk::new(Strategy::Post), increment);

    let sum = ConversionRule::new()
        .on("Int", |node, _| match node {
            Expr::Int(v) => Ok(*v),
            _ => unreachable!(),
        })
        .on("Add", |_, children| {
            let (l, r) = two_values(children);
            Ok(l + r)
        })
        .on("Mul", |_, children| {
            let (l, r) = two_values(children);
            Ok(l + r)
        })
        .on("Pow", |_, children| {
            let (l, r) = two_values(children);
            Ok(l + r)
        })
        .on("Program", |_, children| match &children[0].1 {
            passforge::Slot::Value(v) => Ok(*v),
            _ => unreachable!(),
        });
    let b = passforge::ConvertPass::new(Walk::new(Strategy::Post), sum);

    let mut chain = Chain::new(a, b);
    let result = chain.run(tree).unwrap();
    // ints were 1, 2, 3 -> incremented to 2, 3, 4 -> summed to 9.
    assert_eq!(result, 9);
}
