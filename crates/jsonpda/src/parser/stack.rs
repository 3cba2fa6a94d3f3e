use alloc::{vec, vec::Vec};
use core::fmt;

/// An open nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Context {
    Object,
    Array,
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Context::Object => "object",
            Context::Array => "array",
        })
    }
}

/// A stack symbol: an open context, or the bottom marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Frame {
    Bottom,
    Open(Context),
}

/// The pushdown automaton's stack.
///
/// Invariant: the first element is always [`Frame::Bottom`] and is never
/// popped, so `len() == depth() + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContextStack {
    frames: Vec<Frame>,
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextStack {
    pub(crate) fn new() -> Self {
        Self {
            frames: vec![Frame::Bottom],
        }
    }

    pub(crate) fn top(&self) -> Frame {
        self.frames.last().copied().unwrap_or(Frame::Bottom)
    }

    pub(crate) fn push(&mut self, context: Context) {
        self.frames.push(Frame::Open(context));
    }

    /// Pops the innermost open context. The bottom marker stays in place.
    pub(crate) fn pop(&mut self) -> Option<Context> {
        match self.top() {
            Frame::Bottom => None,
            Frame::Open(context) => {
                self.frames.pop();
                Some(context)
            }
        }
    }

    /// Number of open contexts.
    pub(crate) fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }
}
