//! Repository traits defining persistence interfaces.
//!
//! Implementations live in the infra crate and handle the actual database
//! operations while maintaining the abstraction boundary between the domain
//! and infrastructure layers.

mod code;
mod email_log;
mod user;
mod workspace;

pub use code::CodeRepository;
pub use email_log::EmailLogRepository;
pub use user::UserRepository;
pub use workspace::{NewWorkspaceOwner, WorkspaceRepository};
