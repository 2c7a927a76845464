pub mod catalog;
pub mod enrollment;
pub mod review;
pub mod user;
