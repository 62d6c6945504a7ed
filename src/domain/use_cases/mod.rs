pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod extractors;
pub mod pages;
pub mod scholarship_admin;
pub mod scholarship_directory;
