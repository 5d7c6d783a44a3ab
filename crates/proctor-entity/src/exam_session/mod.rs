//! Exam session entities.

pub mod model;
pub mod status;

pub use model::{CreateExamSession, ExamSession};
pub use status::SessionStatus;
