pub mod branches;
pub mod employees;
pub mod health;
pub mod request_id;
pub mod vehicles;
