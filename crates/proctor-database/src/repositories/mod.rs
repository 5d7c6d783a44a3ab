//! Repository implementations for Proctor entities.

pub mod alert;
pub mod exam_session;
pub mod user;

pub use alert::AlertRepository;
pub use exam_session::ExamSessionRepository;
pub use user::UserRepository;
