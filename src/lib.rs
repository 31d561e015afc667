//! # observer-registry
//!
//! A typed publisher/observer registry with priority-ordered, synchronous
//! push dispatch.
//!
//! - [`Publisher`] keeps the set of registered events, a priority-sorted
//!   subscriber list per event and a reverse index from observer to events.
//! - [`Observer`] is the extension point: implementors receive every value
//!   pushed to an event they are attached to, and keep a bounded
//!   [`EventHistory`] per booked event.
//! - Lower priorities ("nice values") are serviced first; equal priorities
//!   keep attach order.
//!
//! Registry operations never fail. Attaching to an unregistered event,
//! attaching twice and detaching an absent subscription are silent no-ops,
//! visible only as `debug` records through the `log` facade.
//!
//! Dispatch is single-threaded: [`Publisher::push_update`] runs every
//! callback inline, in priority order, before returning.

pub mod config;
pub mod error;
pub mod logging;
pub mod observer;
pub mod publisher;
pub mod version;

pub use config::ConfigManager;
pub use error::{ConfigError, ConfigResult};
pub use observer::{
    EventHistory, EventKey, FnObserver, HistoryObserver, Observer, ObserverHandle, ObserverId,
    RingBuffer,
};
pub use publisher::{Priority, Publisher, PublisherConfig};
