use crate::usecases::Document;
use std::io;

pub trait DocumentGateway {
    /// Render the document and offer it for download.
    fn produce(&self, file_name: &str, document: &Document) -> io::Result<()>;
}
