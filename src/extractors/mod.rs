//! Request extractors.

pub mod deadline;
pub use deadline::{Deadline, RequestTimeout, REQUEST_TIMEOUT_HEADER};
