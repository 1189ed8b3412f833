//! [`TaskRepository`] over a GraphQL endpoint.
//!
//! Each operation issues exactly one document. Client failures are classified
//! into [`DomainError`] before they leave this module, and every payload passes
//! through [`TaskMapper`] before it becomes a [`Task`].

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use super::client::{GraphQlClient, GraphQlResponse};
use super::documents::{CREATE_TASK, DELETE_TASK, GET_TASKS, TOGGLE_TASK_COMPLETE, UPDATE_TASK};
use super::error_mapping::map_client_error;
use super::mapper::{INVALID_TASK_DATA, TaskMapper};
use crate::domain::ports::TaskRepository;
use crate::domain::{DomainError, DomainResult, NewTask, Task, TaskFilter, TaskId, TaskPatch};

/// Task repository backed by a [`GraphQlClient`].
pub struct GraphQlTaskRepository<C> {
    client: C,
}

impl<C> GraphQlTaskRepository<C> {
    /// Wrap `client`.
    pub const fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C> GraphQlTaskRepository<C>
where
    C: GraphQlClient,
{
    async fn fetch_records(&self) -> DomainResult<Vec<Value>> {
        let response = self
            .client
            .query(GET_TASKS, json!({}))
            .await
            .map_err(|error| map_client_error(error, None))?;

        match response.field("tasks") {
            None => Ok(Vec::new()),
            Some(Value::Array(records)) => Ok(records.clone()),
            Some(_) => Err(DomainError::invalid_field(INVALID_TASK_DATA, "tasks")),
        }
    }

    async fn mutate_task(
        &self,
        document: &str,
        variables: Value,
        field: &str,
        target: Option<&TaskId>,
        missing_payload: &str,
    ) -> DomainResult<Task> {
        let response = self
            .client
            .mutate(document, variables)
            .await
            .map_err(|error| map_client_error(error, target))?;
        let record = payload(&response, field, missing_payload)?;
        TaskMapper::to_domain(record).map_err(DomainError::from)
    }
}

fn payload<'a>(
    response: &'a GraphQlResponse,
    field: &str,
    missing_payload: &str,
) -> DomainResult<&'a Value> {
    response
        .field(field)
        .ok_or_else(|| DomainError::network(missing_payload))
}

fn update_variables(id: &TaskId, patch: TaskPatch) -> Value {
    let mut variables = Map::new();
    variables.insert("id".to_owned(), Value::from(id.as_str()));
    if let Some(title) = patch.title {
        variables.insert("title".to_owned(), Value::from(String::from(title)));
    }
    if let Some(description) = patch.description {
        variables.insert("description".to_owned(), Value::from(description));
    }
    if let Some(completed) = patch.completed {
        variables.insert("completed".to_owned(), Value::from(completed));
    }
    Value::Object(variables)
}

#[async_trait]
impl<C> TaskRepository for GraphQlTaskRepository<C>
where
    C: GraphQlClient,
{
    async fn find_all(&self, filter: &TaskFilter) -> DomainResult<Vec<Task>> {
        let records = self.fetch_records().await?;
        let tasks = TaskMapper::to_domain_list(&records)?;
        Ok(tasks
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect())
    }

    async fn find_by_id(&self, id: &TaskId) -> DomainResult<Option<Task>> {
        let records = self.fetch_records().await?;
        records
            .iter()
            .find(|record| record.get("id").and_then(Value::as_str) == Some(id.as_str()))
            .map(|record| TaskMapper::to_domain(record).map_err(DomainError::from))
            .transpose()
    }

    async fn create(&self, input: NewTask) -> DomainResult<Task> {
        let variables = json!({
            "title": input.title.as_str(),
            "description": input.description,
        });
        self.mutate_task(
            CREATE_TASK,
            variables,
            "createTask",
            None,
            "Failed to create task",
        )
        .await
    }

    async fn update(&self, id: &TaskId, patch: TaskPatch) -> DomainResult<Task> {
        self.mutate_task(
            UPDATE_TASK,
            update_variables(id, patch),
            "updateTask",
            Some(id),
            "Failed to update task",
        )
        .await
    }

    async fn delete(&self, id: &TaskId) -> DomainResult<Task> {
        self.mutate_task(
            DELETE_TASK,
            json!({ "id": id.as_str() }),
            "deleteTask",
            Some(id),
            "Failed to delete task",
        )
        .await
    }

    async fn toggle_complete(&self, id: &TaskId) -> DomainResult<Task> {
        self.mutate_task(
            TOGGLE_TASK_COMPLETE,
            json!({ "id": id.as_str() }),
            "toggleTaskComplete",
            Some(id),
            "Failed to toggle task completion",
        )
        .await
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
