pub mod inquiry;
pub mod memory;
pub mod page;
pub mod scholarship;
pub mod sqlx_repo;
pub mod token;
pub mod user;
