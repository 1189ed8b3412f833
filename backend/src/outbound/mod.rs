//! Outbound adapters implementing the task repository port.
//!
//! - **graphql**: a remote GraphQL API reached over HTTP with reqwest
//! - **memory**: process-local storage for demos and tests
//!
//! Adapters translate between domain types and their wire or storage
//! representation. They contain no business logic.

pub mod graphql;
pub mod memory;
