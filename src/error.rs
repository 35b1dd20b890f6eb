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

//! Error kinds surfaced by the core.

use std::fmt;

/// A single step from the root to the node where a failure occurred:
/// either a field name or a position within that field's container.
#[derive(Clone, Debug, PartialEq)]
pub enum PathSegment {
    /// Descended into a named field.
    Field(&'static str),
    /// Descended into a sequence/set field at this position.
    Index(usize),
    /// Descended into a mapping field's value at this key's rendering.
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{name}"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
            PathSegment::Key(k) => write!(f, "{{{k}}}"),
        }
    }
}

/// Sequence of field names and container indices from the root to a node.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Path(pub Vec<PathSegment>);

impl Path {
    pub fn root() -> Self {
        Path(Vec::new())
    }

    /// Returns a new path with `segment` appended, leaving `self` untouched.
    pub fn child(&self, segment: PathSegment) -> Path {
        let mut segments = self.0.clone();
        segments.push(segment);
        Path(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.0 {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// A node's `rebuild` rejected the fields it was given: field count, shape,
/// or type mismatch against the variant's schema.
#[derive(Debug, thiserror::Error)]
#[error("validation failed for variant `{variant}` at {path}: {message}")]
pub struct ValidationError {
    pub variant: &'static str,
    pub path: Path,
    pub message: String,
}

impl ValidationError {
    pub fn new(variant: &'static str, message: impl Into<String>) -> Self {
        ValidationError {
            variant,
            path: Path::root(),
            message: message.into(),
        }
    }

    fn with_path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }
}

/// An opaque error raised by user-supplied handler code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Every failure mode the walk/rule/pass engine can surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `ConversionRule` had no handler for a reachable variant.
    #[error("no conversion handler registered for variant `{variant}` at {path}")]
    UnhandledVariant { variant: String, path: Path },

    /// A `RewriteRule` returned a non-identity replacement under `In`/`Level`,
    /// or a `ConversionRule` was paired with a walk other than `Post`.
    #[error("invalid walk for rule at {path}: {reason}")]
    InvalidWalkForRule { path: Path, reason: &'static str },

    /// `Node::rebuild` rejected a handler's output.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    /// A handler raised while processing the node at `path`.
    #[error("rule failed for variant `{variant}` at {path}: {source}")]
    RuleFailure {
        variant: String,
        path: Path,
        #[source]
        source: BoxError,
    },

    /// Reserved: `FixedPoint` does not detect divergence on its own. Only
    /// raised by `FixedPoint::bounded` when the caller-supplied step cap is
    /// exceeded; unbounded `FixedPoint` diverges by contract instead.
    #[error("fixed point did not converge within {limit} steps")]
    DivergentFixedPoint { limit: usize },
}

impl Error {
    pub(crate) fn validation_at(err: ValidationError, path: &Path) -> Self {
        Error::ValidationError(err.with_path(path.clone()))
    }

    pub(crate) fn rule_failure(variant: &'static str, path: &Path, source: BoxError) -> Self {
        Error::RuleFailure {
            variant: variant.to_string(),
            path: path.clone(),
            source,
        }
    }

    pub(crate) fn unhandled_variant(variant: &'static str, path: &Path) -> Self {
        Error::UnhandledVariant {
            variant: variant.to_string(),
            path: path.clone(),
        }
    }

    pub(crate) fn invalid_walk(path: &Path, reason: &'static str) -> Self {
        Error::InvalidWalkForRule {
            path: path.clone(),
            reason,
        }
    }
}
