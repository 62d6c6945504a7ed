pub mod auth;
pub mod contact;
pub mod home;
pub mod json_error;
pub mod pages;
pub mod scholarships;
pub mod system;
