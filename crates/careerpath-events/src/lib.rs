use careerpath_core::{Rect, VertexId};
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use serde::{Deserialize, Serialize};

/// Why a viewport fit was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitReason {
    /// Whole forest, once after the first layout.
    InitialLayout,
    /// A search hit.
    Search,
}

/// Command for the rendering surface to pan/zoom so `bounds` is visible.
///
/// `sequence` increases with every request; a request supersedes all
/// requests with a lower sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportFit {
    pub sequence: u64,
    pub bounds: Rect,
    pub padding_ratio: f32,
    pub duration_ms: u64,
    pub reason: FitReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // Commands for the rendering surface
    RequestViewportFit(ViewportFit),

    // Layout
    LayoutCompleted {
        vertex_count: usize,
        edge_count: usize,
    },
    /// The layout pass was aborted; the previous output stays in place.
    LayoutFailed {
        error: String,
    },

    // Interaction
    CollapseToggled {
        id: VertexId,
        collapsed: bool,
    },
    HighlightChanged {
        id: Option<VertexId>,
    },

    // Notices
    /// Non-fatal: no visible vertex label contains the query.
    SearchNoMatch {
        query: String,
    },
}

/// Bounded event queue shared by the engine and its consumers.
///
/// Consumers are expected to `drain` or `dispatch_to` once per frame. When a
/// consumer falls behind and the queue is full, `publish` drops the oldest
/// pending event to make room for the new one.
#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// `capacity` is clamped to at least one pending event.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity.max(1));
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        let mut event = event;
        loop {
            match self.tx.try_send(event) {
                Ok(()) => return,
                Err(TrySendError::Full(rejected)) => {
                    if self.rx.try_recv().is_ok() {
                        tracing::debug!("Event bus full, dropping oldest pending event");
                    }
                    event = rejected;
                }
                Err(TrySendError::Disconnected(_)) => {
                    tracing::debug!("Event bus has no receivers, dropping event");
                    return;
                }
            }
        }
    }

    /// Number of events waiting to be drained.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Collect every pending event without blocking.
    pub fn drain(&self) -> Vec<Event> {
        self.rx.try_iter().collect()
    }

    /// Dispatch all pending events to a listener.
    /// This is useful for processing events in the render loop.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) {
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
        }
    }
}

/// Trait for components that respond to events.
/// Implement this to receive events from the EventBus.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerpath_core::Vec2;

    fn fit(sequence: u64) -> ViewportFit {
        ViewportFit {
            sequence,
            bounds: Rect::from_pos_size(Vec2::new(0.0, 0.0), Vec2::new(200.0, 88.0)),
            padding_ratio: 0.3,
            duration_ms: 800,
            reason: FitReason::Search,
        }
    }

    #[test]
    fn test_event_bus_publish_receive() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let receiver = bus.receiver();

        sender
            .send(Event::CollapseToggled {
                id: VertexId::from("1A"),
                collapsed: true,
            })
            .unwrap();

        match receiver.recv().unwrap() {
            Event::CollapseToggled { id, collapsed } => {
                assert_eq!(id.as_str(), "1A");
                assert!(collapsed);
            }
            _ => panic!("Expected CollapseToggled event"),
        }
    }

    #[test]
    fn test_full_bus_drops_oldest_event() {
        let bus = EventBus::with_capacity(2);
        for i in 0..5 {
            bus.publish(Event::SearchNoMatch {
                query: format!("q{i}"),
            });
        }

        assert_eq!(bus.pending(), 2);
        let queries: Vec<String> = bus
            .drain()
            .into_iter()
            .filter_map(|e| match e {
                Event::SearchNoMatch { query } => Some(query),
                _ => None,
            })
            .collect();
        assert_eq!(queries, vec!["q3".to_string(), "q4".to_string()]);
        assert_eq!(bus.pending(), 0);
    }

    #[test]
    fn test_zero_capacity_still_queues() {
        let bus = EventBus::with_capacity(0);
        bus.publish(Event::HighlightChanged { id: None });
        assert_eq!(bus.drain(), vec![Event::HighlightChanged { id: None }]);
    }

    #[test]
    fn test_drain_preserves_order() {
        let bus = EventBus::new();
        bus.publish(Event::RequestViewportFit(fit(1)));
        bus.publish(Event::SearchNoMatch {
            query: "pilot".to_string(),
        });
        bus.publish(Event::RequestViewportFit(fit(2)));

        let events = bus.drain();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], Event::RequestViewportFit(f) if f.sequence == 1));
        assert!(matches!(&events[1], Event::SearchNoMatch { query } if query == "pilot"));
        assert!(matches!(&events[2], Event::RequestViewportFit(f) if f.sequence == 2));
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_dispatch_to_listener() {
        #[derive(Default)]
        struct Recorder {
            fits: Vec<u64>,
            other: usize,
        }

        impl EventListener for Recorder {
            fn handle_event(&mut self, event: &Event) {
                match event {
                    Event::RequestViewportFit(fit) => self.fits.push(fit.sequence),
                    _ => self.other += 1,
                }
            }
        }

        let bus = EventBus::new();
        bus.publish(Event::RequestViewportFit(fit(7)));
        bus.publish(Event::HighlightChanged { id: None });

        let mut recorder = Recorder::default();
        bus.dispatch_to(&mut recorder);
        assert_eq!(recorder.fits, vec![7]);
        assert_eq!(recorder.other, 1);
    }

    #[test]
    fn test_fit_serialization() {
        let json = serde_json::to_string(&Event::RequestViewportFit(fit(3))).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Event::RequestViewportFit(fit(3)));
    }
}
