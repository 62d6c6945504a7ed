pub mod dashboard;
pub mod inquiry;
pub mod page;
pub mod scholarship;
pub mod scholarship_query;
pub mod token;
pub mod user;
pub mod validation;
