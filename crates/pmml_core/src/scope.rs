//! The scope stack maintained during field resolution.
//!
//! Each frame is owned by the scope-boundary node that pushed it and lives
//! exactly as long as the traversal is inside that node's subtree. Frames
//! never outlive the traversal; the tree itself stores no scope state.

use std::collections::BTreeSet;

use pmml_ast::{Field, NodeId, NodeKind};
use tracing::debug;

use crate::error::ScopeError;

/// How a frame combines with the frames beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Adds its fields to everything already visible.
    Additive,
    /// Hides every enclosing frame. Function bodies are evaluated purely
    /// over their parameters, so a function-definition frame isolates.
    Isolated,
}

#[derive(Debug)]
struct Frame {
    owner: NodeId,
    owner_kind: NodeKind,
    kind: FrameKind,
    fields: Vec<Field>,
    /// Declared but not yet published fields. A segment's output fields
    /// accumulate here and become visible to subsequent sibling segments
    /// when the segment exits, never to the declaring segment's own
    /// subtree.
    deferred: Vec<Field>,
}

/// A stack of named-field scopes, keyed by the identity of the node that
/// opened each frame.
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns true when no frame is open.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Drops every open frame.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Opens a frame owned by the given node.
    pub fn push(&mut self, owner: NodeId, owner_kind: NodeKind, kind: FrameKind) {
        debug!(owner = %owner_kind, ?kind, depth = self.frames.len(), "opening scope");
        self.frames.push(Frame {
            owner,
            owner_kind,
            kind,
            fields: Vec::new(),
            deferred: Vec::new(),
        });
    }

    /// Closes the frame owned by the given node, which must be the top of
    /// the stack, and returns its deferred fields for the caller to
    /// publish.
    pub fn pop(&mut self, owner: NodeId, kind: NodeKind) -> Result<Vec<Field>, ScopeError> {
        match self.frames.last() {
            Some(frame) if frame.owner == owner => {}
            _ => return Err(ScopeError::Underflow { kind }),
        }
        let frame = self.frames.pop().ok_or(ScopeError::Underflow { kind })?;
        debug!(owner = %frame.owner_kind, depth = self.frames.len(), "closing scope");
        Ok(frame.deferred)
    }

    /// Adds a field to the open frame owned by the given node.
    pub fn declare(
        &mut self,
        owner: NodeId,
        owner_kind: NodeKind,
        field: Field,
    ) -> Result<(), ScopeError> {
        let frame = self
            .frames
            .iter_mut()
            .rev()
            .find(|frame| frame.owner == owner)
            .ok_or(ScopeError::MissingFrame { owner: owner_kind })?;
        debug!(field = %field.name, owner = %frame.owner_kind, "declaring field");
        frame.fields.push(field);
        Ok(())
    }

    /// Defers a field into the innermost frame of the given owner kind.
    /// When no such frame is open the field is handed back to the caller,
    /// which decides where it belongs instead.
    pub fn defer_in_innermost(&mut self, owner_kind: NodeKind, field: Field) -> Result<(), Field> {
        match self
            .frames
            .iter_mut()
            .rev()
            .find(|frame| frame.owner_kind == owner_kind)
        {
            Some(frame) => {
                debug!(field = %field.name, owner = %owner_kind, "deferring field");
                frame.deferred.push(field);
                Ok(())
            }
            None => Err(field),
        }
    }

    /// Publishes fields into the innermost frame of the given owner kind.
    pub fn publish_to_innermost(
        &mut self,
        owner_kind: NodeKind,
        fields: Vec<Field>,
    ) -> Result<(), ScopeError> {
        if fields.is_empty() {
            return Ok(());
        }
        let frame = self
            .frames
            .iter_mut()
            .rev()
            .find(|frame| frame.owner_kind == owner_kind)
            .ok_or(ScopeError::MissingFrame { owner: owner_kind })?;
        debug!(count = fields.len(), owner = %owner_kind, "publishing deferred fields");
        frame.fields.extend(fields);
        Ok(())
    }

    /// The fields visible from the current traversal position.
    ///
    /// Walks frames innermost first; on a name collision the innermost
    /// declaration shadows outer ones. An [`FrameKind::Isolated`] frame
    /// cuts visibility off: nothing beneath it is included.
    pub fn visible_fields(&self) -> Vec<&Field> {
        let mut seen = BTreeSet::new();
        let mut visible = Vec::new();
        for frame in self.frames.iter().rev() {
            for field in &frame.fields {
                if seen.insert(field.name.as_str()) {
                    visible.push(field);
                }
            }
            if frame.kind == FrameKind::Isolated {
                break;
            }
        }
        visible
    }

    /// The visible field names, sorted.
    pub fn visible_names(&self) -> BTreeSet<&str> {
        self.visible_fields().into_iter().map(Field::name).collect()
    }
}
