//! End-to-end trigger flow through the frame driver
//!
//! A Ball and a Trigger1 zone overlap at the origin; ticks drive the
//! poll and the transition callbacks on both objects' components.

use std::any::Any;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use diorama_core::{Guid, Tagged};
use diorama_runtime::*;
use diorama_scene::{Component, RectCollider, SceneError, TriggerHit};
use diorama_triggers::CollisionRect;
use glam::Vec3;

/// Records trigger callbacks through shared handles
#[derive(Default)]
struct TriggerProbe {
    enters: Arc<AtomicU32>,
    exits: Arc<AtomicU32>,
    last_other: Arc<Mutex<Option<Guid>>>,
    last_rect: Arc<Mutex<Option<CollisionRect>>>,
}

impl Tagged for TriggerProbe {
    const TAG: &'static str = "TriggerProbe";
}

impl Component for TriggerProbe {
    fn type_tag(&self) -> &'static str {
        Self::TAG
    }

    fn to_document(&self) -> Result<Value, SceneError> {
        Ok(serde_json::json!({}))
    }

    fn on_trigger_enter(&mut self, hit: &TriggerHit) {
        self.enters.fetch_add(1, Ordering::SeqCst);
        *self.last_other.lock().unwrap() = Some(hit.other);
        *self.last_rect.lock().unwrap() = Some(hit.other_rect.clone());
    }

    fn on_trigger_exit(&mut self, hit: &TriggerHit) {
        self.exits.fetch_add(1, Ordering::SeqCst);
        *self.last_other.lock().unwrap() = Some(hit.other);
        *self.last_rect.lock().unwrap() = Some(hit.other_rect.clone());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct Rig {
    app: AppContext,
    ball: Guid,
    zone: Guid,
    ball_enters: Arc<AtomicU32>,
    ball_exits: Arc<AtomicU32>,
    ball_other: Arc<Mutex<Option<Guid>>>,
    ball_rect: Arc<Mutex<Option<CollisionRect>>>,
    zone_enters: Arc<AtomicU32>,
    zone_exits: Arc<AtomicU32>,
}

/// Ball (1x1) and Trigger1 (2x2) both at the origin, playing
fn rig() -> Rig {
    let mut app = AppContext::init(RuntimeConfig::default()).unwrap();

    let ball_probe = TriggerProbe::default();
    let ball_enters = ball_probe.enters.clone();
    let ball_exits = ball_probe.exits.clone();
    let ball_other = ball_probe.last_other.clone();
    let ball_rect = ball_probe.last_rect.clone();

    let zone_probe = TriggerProbe::default();
    let zone_enters = zone_probe.enters.clone();
    let zone_exits = zone_probe.exits.clone();

    let scene = app.scene_mut();
    let ball_object = scene.create_object("Ball");
    ball_object.add(RectCollider::new(1.0, 1.0)).unwrap();
    ball_object.add(ball_probe).unwrap();
    let ball = ball_object.guid();
    let zone_object = scene.create_object("Trigger1");
    zone_object.add(RectCollider::new(2.0, 2.0)).unwrap();
    zone_object.add(zone_probe).unwrap();
    let zone = zone_object.guid();

    app.rebuild_triggers();
    app.enter_play().unwrap();

    Rig {
        app,
        ball,
        zone,
        ball_enters,
        ball_exits,
        ball_other,
        ball_rect,
        zone_enters,
        zone_exits,
    }
}

#[test]
fn test_first_tick_overlap_fires_enter_on_both_sides() {
    let mut rig = rig();
    rig.app.tick(0.016);

    assert_eq!(rig.ball_enters.load(Ordering::SeqCst), 1);
    assert_eq!(rig.zone_enters.load(Ordering::SeqCst), 1);
    assert_eq!(*rig.ball_other.lock().unwrap(), Some(rig.zone));

    let events = rig.app.take_trigger_events();
    assert_eq!(events.len(), 1);
    assert!(events[0].is_enter());
    assert_eq!(events[0].other_owner(rig.ball), Some(rig.zone));

    // Rising edge latched on both rects until a consumer takes it
    assert!(rig.app.triggers().rect_by_owner(rig.ball).unwrap().hit_entered);
    assert!(rig.app.triggers().rect_by_owner(rig.zone).unwrap().hit_entered);
}

#[test]
fn test_callbacks_receive_the_other_rect() {
    let mut rig = rig();
    rig.app.tick(0.016);

    let guard = rig.ball_rect.lock().unwrap();
    let rect = guard.as_ref().unwrap();
    assert_eq!(rect.owner, rig.zone);
    assert_eq!(rect.width, 2.0);
    assert_eq!(rect.height, 2.0);
}

#[test]
fn test_sustained_overlap_does_not_refire() {
    let mut rig = rig();
    rig.app.tick(0.016);
    rig.app.take_trigger_events();

    rig.app.tick(0.016);
    rig.app.tick(0.016);
    assert_eq!(rig.ball_enters.load(Ordering::SeqCst), 1);
    assert_eq!(rig.zone_enters.load(Ordering::SeqCst), 1);
    assert!(rig.app.take_trigger_events().is_empty());
}

#[test]
fn test_take_trigger_events_drains_once() {
    let mut rig = rig();
    rig.app.tick(0.016);

    assert_eq!(rig.app.trigger_events().len(), 1);
    assert_eq!(rig.app.take_trigger_events().len(), 1);
    assert!(rig.app.trigger_events().is_empty());
    assert!(rig.app.take_trigger_events().is_empty());
}

#[test]
fn test_moving_apart_fires_exit_once() {
    let mut rig = rig();
    rig.app.tick(0.016);
    rig.app.take_trigger_events();

    rig.app
        .scene_mut()
        .find_mut(rig.ball)
        .unwrap()
        .set_position(Vec3::new(10.0, 10.0, 0.0));
    rig.app.tick(0.016);

    assert_eq!(rig.ball_exits.load(Ordering::SeqCst), 1);
    assert_eq!(rig.zone_exits.load(Ordering::SeqCst), 1);
    let events = rig.app.take_trigger_events();
    assert_eq!(events.len(), 1);
    assert!(events[0].is_exit());

    rig.app.tick(0.016);
    assert!(rig.app.take_trigger_events().is_empty());
    assert_eq!(rig.ball_exits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_reentry_fires_enter_again() {
    let mut rig = rig();
    rig.app.tick(0.016);

    rig.app
        .scene_mut()
        .find_mut(rig.ball)
        .unwrap()
        .set_position(Vec3::new(10.0, 10.0, 0.0));
    rig.app.tick(0.016);

    rig.app
        .scene_mut()
        .find_mut(rig.ball)
        .unwrap()
        .set_position(Vec3::ZERO);
    rig.app.tick(0.016);

    assert_eq!(rig.ball_enters.load(Ordering::SeqCst), 2);
    assert_eq!(rig.ball_exits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_entered_latch_is_cleared_by_the_consumer() {
    let mut rig = rig();
    rig.app.tick(0.016);

    let id = rig.app.triggers().rect_by_owner(rig.ball).unwrap().id;
    assert!(rig.app.triggers_mut().take_hit_entered(id));
    assert!(!rig.app.triggers().hit_entered(id));

    // Still overlapping on later ticks; the latch stays down
    rig.app.tick(0.016);
    assert!(!rig.app.triggers().hit_entered(id));
}

#[test]
fn test_removed_owner_dispatches_exit_to_the_survivor() {
    let mut rig = rig();
    rig.app.tick(0.016);
    rig.app.take_trigger_events();

    rig.app.scene_mut().remove(rig.ball);
    rig.app.tick(0.016);

    let events = rig.app.take_trigger_events();
    assert_eq!(events.len(), 1);
    assert!(events[0].is_exit());
    assert_eq!(rig.zone_exits.load(Ordering::SeqCst), 1);
    // The removed side has no components left to notify
    assert_eq!(rig.ball_exits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_edit_mode_tick_does_not_poll() {
    let mut app = AppContext::init(RuntimeConfig::default()).unwrap();
    let scene = app.scene_mut();
    let ball = scene.create_object("Ball");
    ball.add(RectCollider::new(1.0, 1.0)).unwrap();
    let ball = ball.guid();
    scene
        .create_object("Trigger1")
        .add(RectCollider::new(2.0, 2.0))
        .unwrap();
    app.rebuild_triggers();

    app.tick(0.016);
    app.tick(0.016);
    assert!(app.trigger_events().is_empty());
    assert!(!app.triggers().rect_by_owner(ball).unwrap().hit_entered);

    // The Enter waited for play
    app.enter_play().unwrap();
    app.tick(0.016);
    assert_eq!(app.trigger_events().len(), 1);
    assert!(app.trigger_events()[0].is_enter());
}
