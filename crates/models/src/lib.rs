pub mod catalog;
pub mod course;
pub mod enrollment;
