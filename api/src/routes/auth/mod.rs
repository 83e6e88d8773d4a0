//! Authentication routes

pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod me;
pub mod register;
pub mod resend_verification;
pub mod reset_password;
pub mod verify_email;

pub use forgot_password::forgot_password;
pub use login::login;
pub use logout::logout;
pub use me::me;
pub use register::register;
pub use resend_verification::resend_verification;
pub use reset_password::reset_password;
pub use verify_email::verify_email;
