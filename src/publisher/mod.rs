//! Priority-Ordered Publisher
//!
//! A [`Publisher`] keeps a registry of events. Observers attach to registered
//! events with a priority ("nice value"); [`Publisher::push_update`] then
//! invokes every subscriber's callback synchronously, lowest priority first.
//!
//! # Architecture
//!
//! ```text
//! add_event("temp") ──► events["temp"] = []
//!
//! attach(B, 3, ["temp"]) ─┐
//! attach(A, 10, ["temp"]) ┴► events["temp"] = [(3, B), (10, A)]
//!                            subscriptions[B] = {"temp"}, subscriptions[A] = {"temp"}
//!
//! push_update("temp", 12.0) ──► B.update_callback("temp", 12.0)
//!                          └──► A.update_callback("temp", 12.0)
//! ```
//!
//! # Example
//!
//! ```
//! use observer_registry::{ObserverHandle, Publisher};
//! use std::sync::{Arc, Mutex};
//!
//! let order = Arc::new(Mutex::new(Vec::new()));
//! let mut publisher: Publisher<&'static str, f64> = Publisher::new();
//! publisher.add_event("temp");
//!
//! let log = Arc::clone(&order);
//! let a = ObserverHandle::from_fn(move |_: &&'static str, v: &f64| log.lock().unwrap().push(("A", *v)));
//! let log = Arc::clone(&order);
//! let b = ObserverHandle::from_fn(move |_: &&'static str, v: &f64| log.lock().unwrap().push(("B", *v)));
//!
//! publisher.attach_one(&a, 10, &"temp");
//! publisher.attach_one(&b, 3, &"temp");
//! assert_eq!(publisher.push_update(&"temp", &12.0), 2);
//!
//! assert_eq!(*order.lock().unwrap(), vec![("B", 12.0), ("A", 12.0)]);
//! ```

pub mod config;
pub mod registry;
pub mod subscribers;


pub use config::PublisherConfig;
pub use registry::{Publisher, Subscribers};
pub use subscribers::{Priority, SubscriberList};
