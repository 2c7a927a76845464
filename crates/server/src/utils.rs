pub mod guard;
pub mod shutdown;
