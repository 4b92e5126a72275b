// Presentation layer - read-only shell boundary
pub mod shell;
pub mod view;
