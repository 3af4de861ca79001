//! # dashboard-sync
//!
//! Fetch-once resource synchronization over an HTTP boundary.
//!
//! Build a [`Synchronizer`] from a [`Resource`](dashboard_core::Resource)
//! descriptor and a [`Transport`], call [`Synchronizer::activate`] (or
//! [`Synchronizer::start`]) and observe the state through
//! [`Synchronizer::subscribe`]. The [`managers`] module binds the generic
//! synchronizer to each dashboard route.

pub mod error;
pub mod managers;
pub mod synchronizer;
pub mod transport;

pub use error::TransportError;
pub use synchronizer::{PendingWrite, Synchronizer, WriteAck};
pub use transport::{HttpTransport, Transport};
