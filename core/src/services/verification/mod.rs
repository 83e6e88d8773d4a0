//! One-time code issuance and verification

mod config;
mod service;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use config::VerificationConfig;
pub use service::VerificationService;
pub use traits::{MailerTrait, OutgoingMail};
