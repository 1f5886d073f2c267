pub mod models;
pub mod segments;
pub mod types;
pub mod world;
