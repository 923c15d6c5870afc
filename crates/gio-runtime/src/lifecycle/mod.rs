//! Container-to-surface lifecycle forwarding.
//!
//! # Flow
//!
//! ```text
//! host callback ──► Container::on_* ──► LifecycleForwarder::forward
//!                                              │
//!                         ┌────────────────────┼──────────────────┐
//!                         ▼                    ▼                  ▼
//!                   Surface::create..   Surface::back_pressed   LowMemoryRegistry
//!                   (phase advances)    (bool back to host)     (process-wide)
//! ```
//!
//! | Event | Legal in | Surface call |
//! |-------|----------|--------------|
//! | `Created` | Initial | `create` |
//! | `Started` | Created, Stopped | `start` |
//! | `Stopped` | Started | `stop` |
//! | `Destroyed` | Created, Started, Stopped | `destroy` (with a stop first if never stopped) |
//! | `ConfigurationChanged` | Created, Started, Stopped | `configuration_changed` |
//! | `BackRequested` | Started | `back_pressed` |
//! | `LowMemory` | any | none, registry dispatch |

mod error;
mod forwarder;

pub use error::ForwardError;
pub use forwarder::{Forwarded, LifecycleForwarder};
