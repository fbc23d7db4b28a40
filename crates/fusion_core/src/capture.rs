//! In-memory log capture for tests.
//!
//! [`LogCapture`] installs a thread-local subscriber that records every event
//! (level, target, message, fields) so tests can assert on what was logged.
//!
//! # Example
//!
//! ```
//! # #[cfg(any(test, feature = "test-utils"))]
//! # {
//! use fusion_core::LogCapture;
//! use tracing::Level;
//!
//! let capture = LogCapture::install();
//! tracing::warn!("something odd");
//!
//! assert_eq!(capture.count_at(Level::WARN), 1);
//! assert!(capture.contains("something odd"));
//! # }
//! ```
//!
//! The subscriber is scoped to the current thread, so async tests should run
//! on a current-thread runtime (the `#[tokio::test]` default).

use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// A single recorded log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Event level.
    pub level: Level,
    /// Event target (usually the module path).
    pub target: String,
    /// Rendered `message` field.
    pub message: String,
    /// Every other field, rendered, in recording order.
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    /// Returns the rendered value of the field called `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Records log events for the lifetime of the guard it holds.
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    _guard: DefaultGuard,
}

impl LogCapture {
    /// Installs a capturing subscriber as the thread's default.
    ///
    /// Capturing stops when the returned value is dropped.
    #[must_use]
    pub fn install() -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(CaptureLayer {
            events: Arc::clone(&events),
        });
        let guard = tracing::subscriber::set_default(subscriber);
        Self {
            events,
            _guard: guard,
        }
    }

    /// Returns a snapshot of all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .expect("LogCapture lock poisoned")
            .clone()
    }

    /// Returns the number of events recorded at exactly `level`.
    #[must_use]
    pub fn count_at(&self, level: Level) -> usize {
        self.events()
            .iter()
            .filter(|event| event.level == level)
            .count()
    }

    /// Returns the number of events whose message contains `needle`.
    #[must_use]
    pub fn count_containing(&self, needle: &str) -> usize {
        self.events()
            .iter()
            .filter(|event| event.message.contains(needle))
            .count()
    }

    /// Returns `true` if any event message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.count_containing(needle) > 0
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        self.events
            .lock()
            .expect("LogCapture lock poisoned")
            .push(CapturedEvent {
                level: *metadata.level(),
                target: metadata.target().to_string(),
                message: visitor.message,
                fields: visitor.fields,
            });
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }
}
