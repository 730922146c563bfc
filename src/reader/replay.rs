use std::io::{self, BufRead, Cursor, Read};
use std::sync::Arc;

/// In-memory copy of a single-consume source that can be read many times
#[derive(Debug, Clone)]
pub struct ReplayReader {
    data: Arc<[u8]>,
}

impl ReplayReader {
    /// Drains `source` to the end and keeps the bytes
    ///
    /// A missing source is treated as an empty body.
    ///
    /// # Errors
    ///
    /// Returns the underlying `io::Error` (with context) if the source
    /// fails before reaching end of stream.
    pub fn new<R: Read>(source: Option<R>) -> io::Result<Self> {
        let mut data = Vec::new();
        if let Some(mut source) = source {
            source.read_to_end(&mut data).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("replay reader: couldn't create a new one: {}", e),
                )
            })?;
        }

        Ok(Self { data: data.into() })
    }

    /// Returns a new handle positioned at the start of the buffered data
    pub fn reader(&self) -> ReplayHandle {
        ReplayHandle {
            cursor: Cursor::new(Arc::clone(&self.data)),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Independent read position over a [`ReplayReader`]'s buffer
///
/// Holds no external resource; dropping it only releases its share of the
/// buffer.
#[derive(Debug, Clone)]
pub struct ReplayHandle {
    cursor: Cursor<Arc<[u8]>>,
}

impl Read for ReplayHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl BufRead for ReplayHandle {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt)
    }
}
