//! Trigger transition events

use diorama_core::Guid;

use crate::rect::RectId;

/// Kind of overlap transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEventKind {
    /// The pair started overlapping this tick
    Enter,
    /// The pair stopped overlapping this tick
    Exit,
}

/// An overlap transition between two rects
///
/// Events report transitions, not states: one Enter when an overlap
/// begins, one Exit when it ends, nothing in between.
#[derive(Debug, Clone)]
pub struct TriggerEvent {
    /// Transition kind
    pub kind: TriggerEventKind,
    /// First rect of the pair
    pub a: RectId,
    /// Second rect of the pair
    pub b: RectId,
    /// Owner of rect `a`
    pub owner_a: Guid,
    /// Owner of rect `b`
    pub owner_b: Guid,
}

impl TriggerEvent {
    /// Create an enter event
    pub fn enter(a: RectId, b: RectId, owner_a: Guid, owner_b: Guid) -> Self {
        Self {
            kind: TriggerEventKind::Enter,
            a,
            b,
            owner_a,
            owner_b,
        }
    }

    /// Create an exit event
    pub fn exit(a: RectId, b: RectId, owner_a: Guid, owner_b: Guid) -> Self {
        Self {
            kind: TriggerEventKind::Exit,
            a,
            b,
            owner_a,
            owner_b,
        }
    }

    /// Check if this is an enter event
    pub fn is_enter(&self) -> bool {
        self.kind == TriggerEventKind::Enter
    }

    /// Check if this is an exit event
    pub fn is_exit(&self) -> bool {
        self.kind == TriggerEventKind::Exit
    }

    /// The other rect of the pair, given one side
    pub fn other(&self, id: RectId) -> Option<RectId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }

    /// The other owner of the pair, given one side
    pub fn other_owner(&self, owner: Guid) -> Option<Guid> {
        if self.owner_a == owner {
            Some(self.owner_b)
        } else if self.owner_b == owner {
            Some(self.owner_a)
        } else {
            None
        }
    }
}
