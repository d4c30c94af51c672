pub mod document;
pub mod file;
pub mod geocode;
pub mod render;
