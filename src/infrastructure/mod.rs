pub mod backend;
pub mod observability;
