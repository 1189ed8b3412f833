//! GraphQL documents sent by the task repository.

/// Selection set shared by every task operation.
macro_rules! task_fields {
    () => {
        "id title description completed createdAt updatedAt"
    };
}

/// List every task.
pub(super) const GET_TASKS: &str = concat!("query GetTasks { tasks { ", task_fields!(), " } }");

/// Create a task from a title and optional description.
pub(super) const CREATE_TASK: &str = concat!(
    "mutation CreateTask($title: String!, $description: String) { ",
    "createTask(title: $title, description: $description) { ",
    task_fields!(),
    " } }"
);

/// Flip the completion flag server-side.
pub(super) const TOGGLE_TASK_COMPLETE: &str = concat!(
    "mutation ToggleTaskComplete($id: ID!) { ",
    "toggleTaskComplete(id: $id) { ",
    task_fields!(),
    " } }"
);

/// Delete a task and return its last state.
pub(super) const DELETE_TASK: &str = concat!(
    "mutation DeleteTask($id: ID!) { ",
    "deleteTask(id: $id) { ",
    task_fields!(),
    " } }"
);

/// Patch a task; omitted variables leave fields unchanged.
pub(super) const UPDATE_TASK: &str = concat!(
    "mutation UpdateTask($id: ID!, $title: String, $description: String, $completed: Boolean) { ",
    "updateTask(id: $id, title: $title, description: $description, completed: $completed) { ",
    task_fields!(),
    " } }"
);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(GET_TASKS, "query GetTasks")]
    #[case(CREATE_TASK, "createTask(title: $title")]
    #[case(TOGGLE_TASK_COMPLETE, "toggleTaskComplete(id: $id)")]
    #[case(DELETE_TASK, "deleteTask(id: $id)")]
    #[case(UPDATE_TASK, "$completed: Boolean")]
    fn documents_select_every_task_field(#[case] document: &str, #[case] marker: &str) {
        assert!(document.contains(marker), "{document}");
        assert!(
            document.contains("id title description completed createdAt updatedAt"),
            "{document}"
        );
    }
}
