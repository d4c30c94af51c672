use std::io;

/// Transfer of bytes outside the running session.
pub trait FileGateway {
    fn save_as(&self, file_name: &str, bytes: &[u8]) -> io::Result<()>;
    fn open(&self, file_name: &str) -> io::Result<Vec<u8>>;
}
