//! Task management library: domain model, use cases, and adapters.
//!
//! Layers depend inwards only: [`inbound`] and [`outbound`] adapters talk to
//! [`application`] use cases and [`domain`] ports, never to each other.

pub mod application;
pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
