//! Outbound mail implementations

pub mod http_mailer;
pub mod mock;

pub use http_mailer::HttpMailer;
pub use mock::MockMailer;
