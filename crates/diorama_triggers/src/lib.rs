//! Diorama Triggers - Overlap Detection With Edge Semantics
//!
//! This crate detects overlaps between axis-aligned rects anchored at
//! scene objects.
//!
//! # Features
//!
//! - Closed-interval overlap tests, so touching rects count
//! - Enter/Exit transitions from diffing against the previous tick
//! - A latched entered flag per rect, cleared by the consumer
//! - Owner positions pulled through a lookup each poll
//!
//! # Example
//!
//! ```ignore
//! use diorama_triggers::prelude::*;
//!
//! let mut engine = TriggerEngine::new();
//! let ball = engine.register(ball_guid, 1.0, 1.0);
//! let zone = engine.register(zone_guid, 2.0, 2.0);
//! engine.poll(|owner| positions.get(&owner).copied());
//! for event in engine.drain_events() {
//!     println!("{:?}", event.kind);
//! }
//! ```

pub mod engine;
pub mod events;
pub mod rect;

pub mod prelude {
    pub use crate::engine::TriggerEngine;
    pub use crate::events::{TriggerEvent, TriggerEventKind};
    pub use crate::rect::{CollisionRect, RectId};
}

pub use prelude::*;
