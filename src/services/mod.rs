//! Business logic layer

pub mod students;

pub use students::StudentService;
