//! Chunked reading of UTF-8 text
//!
//! [`ChunkReader`] turns any byte source into a lazy sequence of decoded text
//! chunks. Multi-byte characters split between two reads are reassembled by
//! the decoder, and invalid byte sequences come out as U+FFFD.

use crate::error::{Error, Result};
use encoding_rs::{CoderResult, Decoder, UTF_8};
use std::fs::File;
use std::io::{self, Read};
use std::iter::FusedIterator;
use std::path::Path;

/// Iterator over decoded text chunks of a byte stream
///
/// The underlying source is dropped as soon as the end of the stream is
/// reached or a read fails, and the iterator yields nothing afterwards.
pub struct ChunkReader<R: Read> {
    /// Byte source, `None` once the stream is exhausted or failed
    source: Option<R>,
    /// Incremental decoder holding partial UTF-8 sequences between reads
    decoder: Decoder,
    /// Read buffer
    buffer: Vec<u8>,
    /// Name used in error messages
    origin: String,
    /// Total bytes read so far
    bytes_read: u64,
}

impl<R: Read> std::fmt::Debug for ChunkReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkReader")
            .field("origin", &self.origin)
            .field("chunk_size", &self.buffer.len())
            .field("bytes_read", &self.bytes_read)
            .field("finished", &self.source.is_none())
            .finish()
    }
}

impl ChunkReader<File> {
    /// Open a file for chunked reading
    ///
    /// A missing file maps to [`Error::NotFound`] and an unreadable one to
    /// [`Error::PermissionDenied`].
    pub fn open(path: impl AsRef<Path>, chunk_size: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::from_open(path, e))?;
        let mut reader = Self::new(file, chunk_size);
        reader.origin = path.display().to_string();
        Ok(reader)
    }
}

impl<R: Read> ChunkReader<R> {
    /// Wrap a reader
    ///
    /// A `chunk_size` of zero is treated as one byte.
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            source: Some(reader),
            decoder: UTF_8.new_decoder_with_bom_removal(),
            buffer: vec![0u8; chunk_size.max(1)],
            origin: "input stream".to_string(),
            bytes_read: 0,
        }
    }

    /// Total bytes consumed from the source so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Whether the source has been released
    pub fn is_finished(&self) -> bool {
        self.source.is_none()
    }

    /// Drain every remaining chunk into one string
    pub fn read_to_string(self) -> Result<String> {
        let mut text = String::new();
        for chunk in self {
            text.push_str(&chunk?);
        }
        Ok(text)
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source.as_mut()?;

        loop {
            match source.read(&mut self.buffer) {
                Ok(0) => {
                    self.source = None;
                    let tail = decode(&mut self.decoder, &[], true);
                    return (!tail.is_empty()).then_some(Ok(tail));
                }
                Ok(n) => {
                    self.bytes_read += n as u64;
                    let text = decode(&mut self.decoder, &self.buffer[..n], false);
                    // A read that only held the start of a multi-byte character
                    if text.is_empty() {
                        continue;
                    }
                    return Some(Ok(text));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.source = None;
                    log::debug!("read failed after {} bytes: {e}", self.bytes_read);
                    return Some(Err(Error::Io {
                        origin: self.origin.clone(),
                        source: e,
                    }));
                }
            }
        }
    }
}

impl<R: Read> FusedIterator for ChunkReader<R> {}

fn decode(decoder: &mut Decoder, bytes: &[u8], last: bool) -> String {
    let capacity = decoder
        .max_utf8_buffer_length(bytes.len())
        .unwrap_or(bytes.len() * 3 + 4);
    let mut text = String::with_capacity(capacity);
    let mut consumed = 0;

    loop {
        let (result, read, _) = decoder.decode_to_string(&bytes[consumed..], &mut text, last);
        consumed += read;
        match result {
            CoderResult::InputEmpty => return text,
            CoderResult::OutputFull => text.reserve(capacity.max(16)),
        }
    }
}
