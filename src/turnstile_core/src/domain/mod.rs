pub mod context;
pub mod credentials;
pub mod email;
pub mod login_result;
pub mod outcome;
pub mod throttle_key;
pub mod user;
