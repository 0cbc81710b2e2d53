//! Prelude module for convenient imports.
//!
//! ```
//! use todo_api::prelude::*;
//!
//! // Now you have access to:
//! // - TodoClient, TodoClientBuilder (API client)
//! // - Error, ApiError, Result (error handling)
//! // - Todo, TodoId (data models)
//! ```

pub use crate::client::{TodoClient, TodoClientBuilder, DEFAULT_BASE_URL};
pub use crate::error::{ApiError, Error, Result};
pub use crate::models::{Todo, TodoId};
