//! Domain entities

pub mod one_time_code;
pub mod role;
pub mod sent_email;
pub mod subscription;
pub mod token;
pub mod user;
pub mod workspace;

pub use one_time_code::{CodePurpose, OneTimeCode};
pub use role::{Role, UserRole};
pub use sent_email::{EmailKind, SentEmail};
pub use subscription::SubscriptionFeature;
pub use token::Claims;
pub use user::User;
pub use workspace::Workspace;
