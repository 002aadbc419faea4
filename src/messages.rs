//! User-facing response messages.

pub mod success {
    pub const FETCHED: &str = "Tasks fetched successfully";
    pub const CREATED: &str = "Task created successfully";
    pub const DELETED: &str = "Task deleted successfully";
    pub const TOGGLED: &str = "Task status toggled successfully";
}

pub mod error {
    pub const FETCH: &str = "Failed to fetch tasks";
    pub const CREATE: &str = "Failed to create task";
    pub const DELETE: &str = "Failed to delete task";
    pub const TOGGLE: &str = "Failed to toggle task";
    pub const NOT_FOUND: &str = "Task not found";
    pub const INVALID_ID: &str = "Invalid task ID";
    pub const TITLE_REQUIRED: &str = "Title is required and must be a non-empty string";
    pub const INVALID_DESCRIPTION: &str = "Description must be a string";
}
