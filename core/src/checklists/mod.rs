pub mod document;
pub mod extract;
pub mod flatten;
pub mod model;
pub mod render;
pub mod resolver;
