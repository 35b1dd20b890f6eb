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

//! Traversal strategies.
//!
//! `Walk` pairs a `Strategy` (when the rule fires relative to a node's
//! children) with a `Direction` (left-to-right or right-to-left sibling
//! order) and drives either a `RewriteRule` or a `ConversionRule` over a
//! tree. `Pre`/`Post` rewriting and `Post` conversion are implemented with
//! an explicit frame stack rather than native recursion, so a pathologically
//! tall tree can't blow the call stack. `Level`
//! uses an explicit queue; `In` uses an explicit stack with a two-phase
//! per-frame state machine, since it interleaves one child with the rule
//! before visiting the rest.

use std::collections::VecDeque;

use crate::error::{Error, Path, PathSegment};
use crate::node::{Field, Leaf, Node};
use crate::rule::{ConversionRule, Rewrite, RewriteRule, Slot};

/// When the rule fires at a node, relative to its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Rule fires before any child is visited.
    Pre,
    /// Rule fires after every child has been visited. The only strategy
    /// legal for a `ConversionRule`.
    Post,
    /// Rule fires between the first child and the rest; read-only.
    In,
    /// Breadth-first; rule fires as each node is dequeued; read-only.
    Level,
}

/// Left-to-right (`Forward`, the default) or right-to-left (`Reverse`)
/// sibling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

/// A traversal strategy plus direction, ready to apply to a root node.
#[derive(Clone, Copy, Debug)]
pub struct Walk {
    strategy: Strategy,
    direction: Direction,
}

impl Walk {
    /// A forward walk using `strategy`.
    pub fn new(strategy: Strategy) -> Self {
        Walk {
            strategy,
            direction: Direction::Forward,
        }
    }

    /// This walk with its direction flipped to `Reverse`.
    pub fn reverse(mut self) -> Self {
        self.direction = Direction::Reverse;
        self
    }

    /// This walk with an explicit direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Apply a `RewriteRule` to `root`, returning the rewritten tree.
    pub fn apply_rewrite<N: Node>(&self, root: &N, rule: &mut RewriteRule<N>) -> Result<N, Error> {
        let _span = tracing::trace_span!(
            "walk.rewrite",
            strategy = ?self.strategy,
            direction = ?self.direction,
        )
        .entered();
        match self.strategy {
            Strategy::Pre => self.apply_pre(root, rule),
            Strategy::Post => self.apply_post(root, rule),
            Strategy::In => self.apply_in(root, rule),
            Strategy::Level => self.apply_level(root, rule),
        }
    }

    /// Apply a `ConversionRule` to `root`, folding the tree into a value of
    /// type `R`. Only legal when `self.strategy() == Strategy::Post`.
    pub fn apply_convert<N: Node, R>(
        &self,
        root: &N,
        rule: &mut ConversionRule<N, R>,
    ) -> Result<R, Error> {
        if self.strategy != Strategy::Post {
            return Err(Error::invalid_walk(
                &Path::root(),
                "ConversionRule is only legal paired with a Post walk",
            ));
        }
        let _span = tracing::trace_span!("walk.convert", direction = ?self.direction).entered();
        self.apply_convert_post(root, rule)
    }

    // -- Pre/Post rewrite: explicit frame stack --------------------------

    fn apply_pre<N: Node>(&self, root: &N, rule: &mut RewriteRule<N>) -> Result<N, Error> {
        let mut stack: Vec<RewriteFrame<N>> = vec![self.make_pre_frame(root.clone(), Path::root(), rule)?];
        loop {
            let top = stack.last_mut().expect("walk stack never empties mid-loop");
            if top.cursor < top.order.len() {
                let loc = top.order[top.cursor];
                let child = get_child(&top.fields, loc).clone();
                let child_path = extend_path(&top.path, &top.fields, loc);
                stack.push(self.make_pre_frame(child, child_path, rule)?);
            } else {
                let frame = stack.pop().expect("just checked non-empty");
                let result = frame
                    .base
                    .rebuild(frame.fields)
                    .map_err(|e| Error::validation_at(e, &frame.path))?;
                match stack.last_mut() {
                    Some(parent) => {
                        let loc = parent.order[parent.cursor];
                        set_child(&mut parent.fields, loc, result);
                        parent.cursor += 1;
                    }
                    None => return Ok(result),
                }
            }
        }
    }

    fn make_pre_frame<N: Node>(
        &self,
        node: N,
        path: Path,
        rule: &mut RewriteRule<N>,
    ) -> Result<RewriteFrame<N>, Error> {
        let variant = node.variant_tag();
        tracing::trace!(variant, %path, "pre: dispatch");
        let outcome = rule
            .dispatch(&node)
            .map_err(|e| Error::rule_failure(variant, &path, e))?;
        let base = match outcome {
            Rewrite::Unchanged => node,
            Rewrite::Replace(replacement) => replacement,
        };
        let fields = base.fields();
        let order = flatten_locations(&fields, self.direction);
        Ok(RewriteFrame {
            base,
            fields,
            order,
            cursor: 0,
            path,
        })
    }

    fn apply_post<N: Node>(&self, root: &N, rule: &mut RewriteRule<N>) -> Result<N, Error> {
        let mut stack: Vec<RewriteFrame<N>> = vec![self.make_post_frame(root.clone(), Path::root())];
        loop {
            let top = stack.last_mut().expect("walk stack never empties mid-loop");
            if top.cursor < top.order.len() {
                let loc = top.order[top.cursor];
                let child = get_child(&top.fields, loc).clone();
                let child_path = extend_path(&top.path, &top.fields, loc);
                stack.push(self.make_post_frame(child, child_path));
            } else {
                let frame = stack.pop().expect("just checked non-empty");
                let rebuilt = frame
                    .base
                    .rebuild(frame.fields)
                    .map_err(|e| Error::validation_at(e, &frame.path))?;
                let variant = rebuilt.variant_tag();
                tracing::trace!(variant, path = %frame.path, "post: dispatch");
                let outcome = rule
                    .dispatch(&rebuilt)
                    .map_err(|e| Error::rule_failure(variant, &frame.path, e))?;
                let result = match outcome {
                    Rewrite::Unchanged => rebuilt,
                    Rewrite::Replace(replacement) => replacement,
                };
                match stack.last_mut() {
                    Some(parent) => {
                        let loc = parent.order[parent.cursor];
                        set_child(&mut parent.fields, loc, result);
                        parent.cursor += 1;
                    }
                    None => return Ok(result),
                }
            }
        }
    }

    fn make_post_frame<N: Node>(&self, node: N, path: Path) -> RewriteFrame<N> {
        let fields = node.fields();
        let order = flatten_locations(&fields, self.direction);
        RewriteFrame {
            base: node,
            fields,
            order,
            cursor: 0,
            path,
        }
    }

    // -- In: read-only, interleaved ---------------------------------------

    fn apply_in<N: Node>(&self, root: &N, rule: &mut RewriteRule<N>) -> Result<N, Error> {
        let make_frame = |node: N, path: Path| {
            let fields = node.fields();
            let order = flatten_locations(&fields, self.direction);
            InFrame {
                node,
                fields,
                order,
                path,
                cursor: 0,
                rule_done: false,
            }
        };
        let mut stack: Vec<InFrame<N>> = vec![make_frame(root.clone(), Path::root())];
        loop {
            let rule_pos = if stack.last().expect("stack non-empty").order.is_empty() {
                0
            } else {
                1
            };
            {
                let top = stack.last_mut().expect("stack non-empty");
                if !top.rule_done && top.cursor == rule_pos {
                    let variant = top.node.variant_tag();
                    tracing::trace!(variant, path = %top.path, "in: dispatch");
                    let outcome = rule
                        .dispatch(&top.node)
                        .map_err(|e| Error::rule_failure(variant, &top.path, e))?;
                    if !matches!(outcome, Rewrite::Unchanged) {
                        return Err(Error::invalid_walk(
                            &top.path,
                            "In walk is read-only; handler must return Rewrite::Unchanged",
                        ));
                    }
                    top.rule_done = true;
                }
            }
            let top = stack.last_mut().expect("stack non-empty");
            if top.cursor < top.order.len() {
                let loc = top.order[top.cursor];
                let child = get_child(&top.fields, loc).clone();
                let child_path = extend_path(&top.path, &top.fields, loc);
                top.cursor += 1;
                stack.push(make_frame(child, child_path));
            } else {
                stack.pop();
                if stack.is_empty() {
                    return Ok(root.clone());
                }
            }
        }
    }

    // -- Level: read-only, breadth-first -----------------------------------

    fn apply_level<N: Node>(&self, root: &N, rule: &mut RewriteRule<N>) -> Result<N, Error> {
        let mut queue: VecDeque<(N, Path)> = VecDeque::new();
        queue.push_back((root.clone(), Path::root()));
        while let Some((node, path)) = queue.pop_front() {
            let variant = node.variant_tag();
            tracing::trace!(variant, %path, "level: dispatch");
            let outcome = rule
                .dispatch(&node)
                .map_err(|e| Error::rule_failure(variant, &path, e))?;
            if !matches!(outcome, Rewrite::Unchanged) {
                return Err(Error::invalid_walk(
                    &path,
                    "Level walk is read-only; handler must return Rewrite::Unchanged",
                ));
            }
            let fields = node.fields();
            for loc in flatten_locations(&fields, self.direction) {
                let child = get_child(&fields, loc).clone();
                let child_path = extend_path(&path, &fields, loc);
                queue.push_back((child, child_path));
            }
        }
        Ok(root.clone())
    }

    // -- Post conversion: explicit frame stack -----------------------------

    fn apply_convert_post<N: Node, R>(
        &self,
        root: &N,
        rule: &mut ConversionRule<N, R>,
    ) -> Result<R, Error> {
        let make_frame = |node: N, path: Path| {
            let fields = node.fields();
            let names: Vec<&'static str> = fields.iter().map(|(name, _)| *name).collect();
            let order = flatten_locations(&fields, self.direction);
            let slots = make_slot_builders(&fields);
            ConvertFrame {
                node,
                fields,
                names,
                order,
                slots,
                cursor: 0,
                path,
            }
        };
        let mut stack: Vec<ConvertFrame<N, R>> = vec![make_frame(root.clone(), Path::root())];
        loop {
            let top = stack.last_mut().expect("stack non-empty");
            if top.cursor < top.order.len() {
                let loc = top.order[top.cursor];
                let child = get_child(&top.fields, loc).clone();
                let child_path = extend_path(&top.path, &top.fields, loc);
                stack.push(make_frame(child, child_path));
            } else {
                let frame = stack.pop().expect("just checked non-empty");
                let children = finish_slots(frame.slots, &frame.names);
                let variant = frame.node.variant_tag();
                tracing::trace!(variant, path = %frame.path, "convert: dispatch");
                let result = match rule.dispatch(&frame.node, &children) {
                    Some(Ok(value)) => value,
                    Some(Err(source)) => {
                        return Err(Error::rule_failure(variant, &frame.path, source))
                    }
                    None => return Err(Error::unhandled_variant(variant, &frame.path)),
                };
                match stack.last_mut() {
                    Some(parent) => {
                        let loc = parent.order[parent.cursor];
                        set_slot(&mut parent.slots, loc, result);
                        parent.cursor += 1;
                    }
                    None => return Ok(result),
                }
            }
        }
    }
}

// ============================================================================
// Shared child-location bookkeeping
// ============================================================================

/// A single child's position within a node's field list: which field, and
/// (for container fields) which element of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Loc {
    field: usize,
    sub: Option<usize>,
}

/// Flatten every node-shaped child across all fields into one
/// declaration-ordered sequence (field order, then container order within a
/// field), then apply `direction`. This is what makes the reverse flag span
/// sibling *fields*, not just positions within a single container field.
fn flatten_locations<N>(fields: &[(&'static str, Field<N>)], direction: Direction) -> Vec<Loc> {
    let mut locs = Vec::new();
    for (field_idx, (_, field)) in fields.iter().enumerate() {
        match field {
            Field::Node(_) => locs.push(Loc {
                field: field_idx,
                sub: None,
            }),
            Field::Seq(xs) | Field::Set(xs) => {
                for sub in 0..xs.len() {
                    locs.push(Loc {
                        field: field_idx,
                        sub: Some(sub),
                    });
                }
            }
            Field::Map(xs) => {
                for sub in 0..xs.len() {
                    locs.push(Loc {
                        field: field_idx,
                        sub: Some(sub),
                    });
                }
            }
            Field::Leaf(_) => {}
        }
    }
    if direction == Direction::Reverse {
        locs.reverse();
    }
    locs
}

fn get_child<N>(fields: &[(&'static str, Field<N>)], loc: Loc) -> &N {
    match (&fields[loc.field].1, loc.sub) {
        (Field::Node(n), None) => n,
        (Field::Seq(xs), Some(i)) | (Field::Set(xs), Some(i)) => &xs[i],
        (Field::Map(xs), Some(i)) => &xs[i].1,
        _ => unreachable!("Loc does not match the field shape it was derived from"),
    }
}

fn set_child<N>(fields: &mut [(&'static str, Field<N>)], loc: Loc, value: N) {
    match (&mut fields[loc.field].1, loc.sub) {
        (Field::Node(n), None) => *n = value,
        (Field::Seq(xs), Some(i)) | (Field::Set(xs), Some(i)) => xs[i] = value,
        (Field::Map(xs), Some(i)) => xs[i].1 = value,
        _ => unreachable!("Loc does not match the field shape it was derived from"),
    }
}

fn path_segments<N>(fields: &[(&'static str, Field<N>)], loc: Loc) -> Vec<PathSegment> {
    let name = fields[loc.field].0;
    match (&fields[loc.field].1, loc.sub) {
        (Field::Node(_), None) => vec![PathSegment::Field(name)],
        (Field::Seq(_), Some(i)) | (Field::Set(_), Some(i)) => {
            vec![PathSegment::Field(name), PathSegment::Index(i)]
        }
        (Field::Map(xs), Some(i)) => vec![
            PathSegment::Field(name),
            PathSegment::Key(format!("{:?}", xs[i].0)),
        ],
        _ => unreachable!("Loc does not match the field shape it was derived from"),
    }
}

fn extend_path<N>(base: &Path, fields: &[(&'static str, Field<N>)], loc: Loc) -> Path {
    let mut path = base.clone();
    for segment in path_segments(fields, loc) {
        path = path.child(segment);
    }
    path
}

// ============================================================================
// Pre/Post rewrite frames
// ============================================================================

struct RewriteFrame<N: Node> {
    base: N,
    fields: Vec<(&'static str, Field<N>)>,
    order: Vec<Loc>,
    cursor: usize,
    path: Path,
}

// ============================================================================
// In-order frames
// ============================================================================

struct InFrame<N: Node> {
    node: N,
    fields: Vec<(&'static str, Field<N>)>,
    order: Vec<Loc>,
    path: Path,
    cursor: usize,
    rule_done: bool,
}

// ============================================================================
// Post-conversion frames
// ============================================================================

/// Mirrors `Field<N>`'s shape but with each node slot initially empty,
/// filled in as the corresponding child's conversion completes.
enum SlotBuilder<R> {
    Node(Option<R>),
    Seq(Vec<Option<R>>),
    Set(Vec<Option<R>>),
    Map(Vec<(Leaf, Option<R>)>),
    Leaf(Leaf),
}

fn make_slot_builders<N, R>(fields: &[(&'static str, Field<N>)]) -> Vec<SlotBuilder<R>> {
    fields
        .iter()
        .map(|(_, field)| match field {
            Field::Node(_) => SlotBuilder::Node(None),
            Field::Seq(xs) => SlotBuilder::Seq(xs.iter().map(|_| None).collect()),
            Field::Set(xs) => SlotBuilder::Set(xs.iter().map(|_| None).collect()),
            Field::Map(xs) => SlotBuilder::Map(xs.iter().map(|(k, _)| (k.clone(), None)).collect()),
            Field::Leaf(l) => SlotBuilder::Leaf(l.clone()),
        })
        .collect()
}

fn set_slot<R>(slots: &mut [SlotBuilder<R>], loc: Loc, value: R) {
    match (&mut slots[loc.field], loc.sub) {
        (SlotBuilder::Node(slot), None) => *slot = Some(value),
        (SlotBuilder::Seq(xs), Some(i)) | (SlotBuilder::Set(xs), Some(i)) => xs[i] = Some(value),
        (SlotBuilder::Map(xs), Some(i)) => xs[i].1 = Some(value),
        _ => unreachable!("Loc does not match the field shape it was derived from"),
    }
}

fn finish_slots<R>(
    slots: Vec<SlotBuilder<R>>,
    names: &[&'static str],
) -> Vec<(&'static str, Slot<R>)> {
    names
        .iter()
        .zip(slots)
        .map(|(name, builder)| {
            let slot = match builder {
                SlotBuilder::Node(v) => {
                    Slot::Value(v.expect("every node slot is filled before a frame completes"))
                }
                SlotBuilder::Seq(xs) => Slot::Seq(
                    xs.into_iter()
                        .map(|v| v.expect("every node slot is filled before a frame completes"))
                        .collect(),
                ),
                SlotBuilder::Set(xs) => Slot::Set(
                    xs.into_iter()
                        .map(|v| v.expect("every node slot is filled before a frame completes"))
                        .collect(),
                ),
                SlotBuilder::Map(xs) => Slot::Map(
                    xs.into_iter()
                        .map(|(k, v)| {
                            (
                                k,
                                v.expect("every node slot is filled before a frame completes"),
                            )
                        })
                        .collect(),
                ),
                SlotBuilder::Leaf(l) => Slot::Leaf(l),
            };
            (*name, slot)
        })
        .collect()
}
