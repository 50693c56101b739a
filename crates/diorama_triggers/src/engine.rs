//! Overlap evaluation and edge detection

use std::collections::HashSet;

use diorama_core::Guid;

use crate::events::TriggerEvent;
use crate::rect::{CollisionRect, RectId};

/// Normalize a pair so (a, b) and (b, a) key the same overlap
fn pair_key(a: RectId, b: RectId) -> (RectId, RectId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Engine owning every collision rect in a scene
///
/// Each poll refreshes rect anchors from their owners, recomputes the
/// pairwise overlap set, and diffs it against the previous tick: a pair
/// present only now is an Enter, a pair present only before is an Exit.
/// Rising edges latch `hit_entered` on both rects; the engine never
/// clears the latch itself.
pub struct TriggerEngine {
    rects: Vec<CollisionRect>,
    overlapping: HashSet<(RectId, RectId)>,
    events: Vec<TriggerEvent>,
    next_id: u32,
}

impl TriggerEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self {
            rects: Vec::new(),
            overlapping: HashSet::new(),
            events: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a rect for an owning object
    pub fn register(&mut self, owner: Guid, width: f32, height: f32) -> RectId {
        let id = RectId::new(self.next_id);
        self.next_id += 1;
        self.rects.push(CollisionRect::new(id, owner, width, height));
        log::debug!("Registered rect {} for owner {}", id, owner);
        id
    }

    /// Evaluate one tick
    ///
    /// `lookup` maps an owner to its current world xy. An owner that
    /// cannot be resolved keeps its last anchor and sits out pairing for
    /// this tick; pairs it was part of fall out as Exits.
    pub fn poll<F>(&mut self, mut lookup: F)
    where
        F: FnMut(Guid) -> Option<(f32, f32)>,
    {
        let mut active = vec![true; self.rects.len()];
        for (index, rect) in self.rects.iter_mut().enumerate() {
            match lookup(rect.owner) {
                Some((x, y)) => {
                    rect.x = x;
                    rect.y = y;
                }
                None => {
                    log::debug!("Rect {} owner {} not found, skipping", rect.id, rect.owner);
                    active[index] = false;
                }
            }
        }

        let mut current: HashSet<(RectId, RectId)> = HashSet::new();
        for i in 0..self.rects.len() {
            if !active[i] {
                continue;
            }
            for j in (i + 1)..self.rects.len() {
                if !active[j] {
                    continue;
                }
                if self.rects[i].overlaps(&self.rects[j]) {
                    current.insert(pair_key(self.rects[i].id, self.rects[j].id));
                }
            }
        }

        let entered: Vec<(RectId, RectId)> =
            current.difference(&self.overlapping).copied().collect();
        for (a, b) in entered {
            let (owner_a, owner_b) = match (self.owner_of(a), self.owner_of(b)) {
                (Some(owner_a), Some(owner_b)) => (owner_a, owner_b),
                _ => continue,
            };
            if let Some(rect) = self.rect_mut(a) {
                rect.hit_entered = true;
                rect.last_hit = Some(b);
            }
            if let Some(rect) = self.rect_mut(b) {
                rect.hit_entered = true;
                rect.last_hit = Some(a);
            }
            log::debug!("Trigger enter: {} and {}", a, b);
            self.events.push(TriggerEvent::enter(a, b, owner_a, owner_b));
        }

        let exited: Vec<(RectId, RectId)> =
            self.overlapping.difference(&current).copied().collect();
        for (a, b) in exited {
            let (owner_a, owner_b) = match (self.owner_of(a), self.owner_of(b)) {
                (Some(owner_a), Some(owner_b)) => (owner_a, owner_b),
                _ => continue,
            };
            log::debug!("Trigger exit: {} and {}", a, b);
            self.events.push(TriggerEvent::exit(a, b, owner_a, owner_b));
        }

        self.overlapping = current;
    }

    /// Look up a rect
    pub fn rect(&self, id: RectId) -> Option<&CollisionRect> {
        self.rects.iter().find(|rect| rect.id == id)
    }

    /// Look up a rect mutably
    pub fn rect_mut(&mut self, id: RectId) -> Option<&mut CollisionRect> {
        self.rects.iter_mut().find(|rect| rect.id == id)
    }

    /// Look up the rect registered for an owner
    pub fn rect_by_owner(&self, owner: Guid) -> Option<&CollisionRect> {
        self.rects.iter().find(|rect| rect.owner == owner)
    }

    /// Check whether two rects overlapped at the last poll
    pub fn is_overlapping(&self, a: RectId, b: RectId) -> bool {
        self.overlapping.contains(&pair_key(a, b))
    }

    /// Check the entered latch without clearing it
    pub fn hit_entered(&self, id: RectId) -> bool {
        self.rect(id).map(|rect| rect.hit_entered).unwrap_or(false)
    }

    /// Read and clear the entered latch
    pub fn take_hit_entered(&mut self, id: RectId) -> bool {
        match self.rect_mut(id) {
            Some(rect) => std::mem::replace(&mut rect.hit_entered, false),
            None => false,
        }
    }

    /// Clear the entered latch without reading it
    pub fn clear_hit(&mut self, id: RectId) {
        if let Some(rect) = self.rect_mut(id) {
            rect.hit_entered = false;
        }
    }

    /// The rect that most recently entered `id`
    pub fn last_hit(&self, id: RectId) -> Option<RectId> {
        self.rect(id).and_then(|rect| rect.last_hit)
    }

    /// Events collected since the last drain
    pub fn events(&self) -> &[TriggerEvent] {
        &self.events
    }

    /// Drain events collected since the last drain
    pub fn drain_events(&mut self) -> Vec<TriggerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of registered rects
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Check if no rects are registered
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Remove every rect along with all tracked overlap state
    pub fn clear(&mut self) {
        self.rects.clear();
        self.overlapping.clear();
        self.events.clear();
    }

    fn owner_of(&self, id: RectId) -> Option<Guid> {
        self.rect(id).map(|rect| rect.owner)
    }
}

impl Default for TriggerEngine {
    fn default() -> Self {
        Self::new()
    }
}
