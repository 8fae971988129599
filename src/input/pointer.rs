//! Pointer events and the subscription capability consumers poll them through
//!
//! Bevy input is sampled once per frame into a [`PointerQueue`]. Consumers such
//! as the gizmo controller subscribe explicitly and poll their own copy of the
//! stream, so they can be driven from tests without a window.

use bevy::input::mouse::MouseButton;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::collections::{HashMap, VecDeque};

/// Primary-button pointer activity in window coordinates (logical pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Vec2 },
    Move { position: Vec2 },
    Up { position: Vec2 },
}

impl PointerEvent {
    pub fn position(&self) -> Vec2 {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => position,
        }
    }
}

/// Handle returned by [`PointerSource::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

/// Something pointer consumers can subscribe to
pub trait PointerSource {
    fn subscribe(&mut self) -> SubscriptionId;

    /// Stop delivering events. Pending events for the subscription are dropped.
    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Take every event delivered to `id` since the last poll, oldest first
    fn poll(&mut self, id: SubscriptionId) -> Vec<PointerEvent>;
}

/// Fan-out pointer queue fed by Bevy input
#[derive(Resource, Debug, Default)]
pub struct PointerQueue {
    subscribers: HashMap<SubscriptionId, VecDeque<PointerEvent>>,
    next_id: u32,
    last_position: Option<Vec2>,
}

impl PointerQueue {
    /// Deliver an event to every subscriber
    pub fn push(&mut self, event: PointerEvent) {
        self.last_position = Some(event.position());
        for queue in self.subscribers.values_mut() {
            queue.push_back(event);
        }
    }

    pub fn last_position(&self) -> Option<Vec2> {
        self.last_position
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl PointerSource for PointerQueue {
    fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, VecDeque::new());
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.remove(&id);
    }

    fn poll(&mut self, id: SubscriptionId) -> Vec<PointerEvent> {
        self.subscribers
            .get_mut(&id)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }
}

/// Sample the primary window's cursor and left button into the queue
pub fn collect_pointer_events(
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut queue: ResMut<PointerQueue>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let cursor = window.cursor_position();

    if let Some(position) = cursor {
        if queue.last_position != Some(position) {
            queue.push(PointerEvent::Move { position });
        }
    }

    // A release outside the window still has to end a drag
    let position = cursor.or(queue.last_position);
    let Some(position) = position else {
        return;
    };
    if mouse.just_pressed(MouseButton::Left) && cursor.is_some() {
        queue.push(PointerEvent::Down { position });
    }
    if mouse.just_released(MouseButton::Left) {
        queue.push(PointerEvent::Up { position });
    }
}

pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerQueue>()
            .add_systems(PreUpdate, collect_pointer_events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_subscriber_sees_every_event() {
        let mut queue = PointerQueue::default();
        let a = queue.subscribe();
        let b = queue.subscribe();

        queue.push(PointerEvent::Down {
            position: Vec2::new(1.0, 2.0),
        });
        queue.push(PointerEvent::Up {
            position: Vec2::new(3.0, 4.0),
        });

        assert_eq!(queue.poll(a).len(), 2);
        // Polling drains only the caller's copy
        assert_eq!(queue.poll(a).len(), 0);
        let events = queue.poll(b);
        assert_eq!(events[1].position(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_unsubscribed_consumer_receives_nothing() {
        let mut queue = PointerQueue::default();
        let id = queue.subscribe();
        queue.unsubscribe(id);
        queue.push(PointerEvent::Move {
            position: Vec2::ZERO,
        });
        assert!(queue.poll(id).is_empty());
        assert_eq!(queue.subscriber_count(), 0);
        assert_eq!(queue.last_position(), Some(Vec2::ZERO));
    }
}
