//! Frame driver and trigger dispatch

use diorama_core::Guid;
use diorama_scene::{RectCollider, TriggerHit};
use diorama_triggers::{TriggerEvent, TriggerEventKind};

use crate::context::AppContext;

impl AppContext {
    /// Advance one frame
    ///
    /// Component updates run first, then the trigger engine polls object
    /// positions and transition callbacks fire. Both are play-mode
    /// passes; an edit-mode tick only advances the counter. Nothing in
    /// the tick blocks.
    pub fn tick(&mut self, dt: f32) {
        self.scene.update(dt);
        if self.scene.is_playing() {
            self.poll_triggers();
        }
        self.frame += 1;
    }

    /// Trigger events from the most recent tick, leaving them in place
    pub fn trigger_events(&self) -> &[TriggerEvent] {
        &self.last_events
    }

    /// Take the trigger events from the most recent tick
    ///
    /// A second take before the next tick returns nothing.
    pub fn take_trigger_events(&mut self) -> Vec<TriggerEvent> {
        std::mem::take(&mut self.last_events)
    }

    /// Clear the engine and re-register one rect per collider
    ///
    /// Overlap history is dropped with the rects, so the next poll
    /// treats every overlapping pair as freshly entered.
    pub fn rebuild_triggers(&mut self) {
        self.triggers.clear();
        let mut colliders = Vec::new();
        self.scene
            .each::<RectCollider, _>(&self.components, |object, collider| {
                colliders.push((object.guid(), collider.width, collider.height));
            });
        for (owner, width, height) in colliders {
            self.triggers.register(owner, width, height);
        }
        log::debug!("Trigger engine rebuilt with {} rects", self.triggers.len());
    }

    fn poll_triggers(&mut self) {
        let scene = &self.scene;
        self.triggers.poll(|owner| {
            scene.find(owner).map(|object| {
                let position = object.transform().position;
                (position.x, position.y)
            })
        });
        let events = self.triggers.drain_events();
        for event in &events {
            self.dispatch_trigger(event);
        }
        self.last_events = events;
    }

    /// Both sides of a transitioned pair hear about it, each receiving
    /// the other side's rect.
    fn dispatch_trigger(&self, event: &TriggerEvent) {
        let rect_a = self.triggers.rect(event.a).cloned();
        let rect_b = self.triggers.rect(event.b).cloned();
        if let Some(other_rect) = rect_b {
            self.notify_object(
                event.owner_a,
                event.kind,
                TriggerHit {
                    other: event.owner_b,
                    other_rect,
                },
            );
        }
        if let Some(other_rect) = rect_a {
            self.notify_object(
                event.owner_b,
                event.kind,
                TriggerHit {
                    other: event.owner_a,
                    other_rect,
                },
            );
        }
    }

    fn notify_object(&self, owner: Guid, kind: TriggerEventKind, hit: TriggerHit) {
        let components = match self.scene.find(owner) {
            Some(object) => object.components(),
            None => return,
        };
        for component in components {
            let mut guard = component.write();
            match kind {
                TriggerEventKind::Enter => guard.on_trigger_enter(&hit),
                TriggerEventKind::Exit => guard.on_trigger_exit(&hit),
            }
        }
    }
}
