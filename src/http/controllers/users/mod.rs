mod availability;
mod signup;

pub use availability::{email_exists, username_exists};
pub use signup::signup;
