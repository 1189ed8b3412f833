//! GraphQL outbound adapter for the task repository port.
//!
//! [`GraphQlTaskRepository`] translates repository calls into GraphQL
//! documents and sends them through a [`GraphQlClient`];
//! [`ReqwestGraphQlClient`] is the HTTP implementation of that client.

mod client;
mod documents;
mod dto;
mod error_mapping;
mod http_client;
mod mapper;
mod repository;

#[cfg(test)]
pub use client::MockGraphQlClient;
pub use client::{GraphQlClient, GraphQlClientError, GraphQlResponse};
pub use http_client::ReqwestGraphQlClient;
pub use mapper::{INVALID_TASK_DATA, TaskMapper, TaskMappingError};
pub use repository::GraphQlTaskRepository;
