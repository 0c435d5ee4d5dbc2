pub mod admin;
pub mod meeting;
pub mod message;
pub mod otp_code;
pub mod resource;
