//! Multi-handler event dispatch.
//!
//! Any number of handlers may be registered per event kind. Handlers run
//! on the engine task in registration order, and a panic in one handler
//! is caught and logged so the session and the remaining handlers keep
//! running.

use crate::events::TickerEvent;
use irontick_core::Tick;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

/// Handler for decoded tick batches.
pub type TicksHandler = Box<dyn FnMut(&[Tick]) + Send>;
/// Handler for payload-free events (connect, noreconnect).
pub type EventHandler = Box<dyn FnMut() + Send>;
/// Handler for events carrying a rendered error.
pub type ErrorHandler = Box<dyn FnMut(&str) + Send>;
/// Handler for clean session close.
pub type CloseHandler = Box<dyn FnMut(Option<u16>, &str) + Send>;
/// Handler for scheduled reconnect attempts.
pub type ReconnectHandler = Box<dyn FnMut(usize, Duration) + Send>;
/// Handler for order postbacks.
pub type OrderHandler = Box<dyn FnMut(&serde_json::Value) + Send>;
/// Handler for raw binary frames.
pub type MessageHandler = Box<dyn FnMut(&[u8]) + Send>;

/// Registered event handlers for one streaming session.
#[derive(Default)]
pub struct Dispatcher {
    ticks: Vec<TicksHandler>,
    connect: Vec<EventHandler>,
    disconnect: Vec<ErrorHandler>,
    error: Vec<ErrorHandler>,
    close: Vec<CloseHandler>,
    reconnect: Vec<ReconnectHandler>,
    noreconnect: Vec<EventHandler>,
    order_update: Vec<OrderHandler>,
    message: Vec<MessageHandler>,
}

impl Dispatcher {
    /// Creates a dispatcher with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for decoded tick batches.
    pub fn on_ticks<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&[Tick]) + Send + 'static,
    {
        self.ticks.push(Box::new(handler));
        self
    }

    /// Registers a handler for successful connection.
    pub fn on_connect<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut() + Send + 'static,
    {
        self.connect.push(Box::new(handler));
        self
    }

    /// Registers a handler for connection loss.
    pub fn on_disconnect<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.disconnect.push(Box::new(handler));
        self
    }

    /// Registers a handler for session errors.
    pub fn on_error<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.error.push(Box::new(handler));
        self
    }

    /// Registers a handler for clean close.
    pub fn on_close<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(Option<u16>, &str) + Send + 'static,
    {
        self.close.push(Box::new(handler));
        self
    }

    /// Registers a handler for scheduled reconnect attempts.
    pub fn on_reconnect<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(usize, Duration) + Send + 'static,
    {
        self.reconnect.push(Box::new(handler));
        self
    }

    /// Registers a handler for reconnect budget exhaustion.
    pub fn on_noreconnect<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut() + Send + 'static,
    {
        self.noreconnect.push(Box::new(handler));
        self
    }

    /// Registers a handler for order postbacks.
    pub fn on_order_update<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&serde_json::Value) + Send + 'static,
    {
        self.order_update.push(Box::new(handler));
        self
    }

    /// Registers a handler for raw binary frames.
    pub fn on_message<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&[u8]) + Send + 'static,
    {
        self.message.push(Box::new(handler));
        self
    }

    /// Delivers an event to every handler registered for its kind.
    pub fn dispatch(&mut self, event: &TickerEvent) {
        match event {
            TickerEvent::Ticks(ticks) => {
                for handler in &mut self.ticks {
                    Self::isolate(|| handler(ticks));
                }
            }
            TickerEvent::Connect => {
                for handler in &mut self.connect {
                    Self::isolate(|| handler());
                }
            }
            TickerEvent::Disconnect { error } => {
                for handler in &mut self.disconnect {
                    Self::isolate(|| handler(error));
                }
            }
            TickerEvent::Error { error } => {
                for handler in &mut self.error {
                    Self::isolate(|| handler(error));
                }
            }
            TickerEvent::Close { code, reason } => {
                for handler in &mut self.close {
                    Self::isolate(|| handler(*code, reason));
                }
            }
            TickerEvent::Reconnect { attempt, delay } => {
                for handler in &mut self.reconnect {
                    Self::isolate(|| handler(*attempt, *delay));
                }
            }
            TickerEvent::Noreconnect => {
                for handler in &mut self.noreconnect {
                    Self::isolate(|| handler());
                }
            }
            TickerEvent::OrderUpdate(data) => {
                for handler in &mut self.order_update {
                    Self::isolate(|| handler(data));
                }
            }
            TickerEvent::Message(payload) => {
                for handler in &mut self.message {
                    Self::isolate(|| handler(payload));
                }
            }
        }
    }

    /// Runs one handler invocation, containing any panic it raises.
    fn isolate<F: FnOnce()>(call: F) {
        if catch_unwind(AssertUnwindSafe(call)).is_err() {
            tracing::error!("event handler panicked");
        }
    }
}
