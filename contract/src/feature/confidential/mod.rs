pub mod api;
pub mod model;
mod tests;
