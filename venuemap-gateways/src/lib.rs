//! Concrete gateways of the venue map.

pub mod fs_file;
pub mod json_file_store;
pub mod nominatim;
pub mod text_document;
