use crate::error::Error;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor, Read, Write};

/// Append-only little-endian byte stream backing a module blob.
///
/// No alignment padding is ever inserted; the stream is tightly packed.
pub struct ByteSink {
    buf: Vec<u8>,
}

impl ByteSink {
    pub fn new() -> Self {
        ByteSink { buf: Vec::new() }
    }

    pub fn write_u64(&mut self, v: u64) -> io::Result<()> {
        self.buf.write_u64::<LittleEndian>(v)
    }

    /// u64 length followed by the raw bytes, no terminator.
    pub fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// u64 length followed by the raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_u64(bytes.len() as u64)?;
        self.buf.write_all(bytes)
    }

    /// Unframed append, for serializers that manage their own framing.
    pub fn write_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buf.write_all(bytes)
    }

    /// u64 count followed by the values.
    pub fn write_u64_vec(&mut self, values: &[u64]) -> io::Result<()> {
        self.write_u64(values.len() as u64)?;
        for v in values {
            self.write_u64(*v)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for ByteSink {
    fn default() -> Self {
        ByteSink::new()
    }
}

/// Little-endian reader over an in-memory blob, mirroring [`ByteSink`].
pub struct ByteReader<'a> {
    cur: Cursor<&'a [u8]>,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteReader {
            cur: Cursor::new(bytes),
        }
    }

    pub fn read_u64(&mut self) -> Result<u64, Error> {
        Ok(self.cur.read_u64::<LittleEndian>()?)
    }

    /// Counterpart of [`ByteSink::write_str`].
    pub fn read_str(&mut self) -> Result<String, Error> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(Error::InvalidTypeKey)
    }

    /// Counterpart of [`ByteSink::write_bytes`].
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, Error> {
        let len = self.read_u64()?;
        self.read_raw(len as usize)
    }

    pub fn read_raw(&mut self, len: usize) -> Result<Vec<u8>, Error> {
        let mut buf = vec![0u8; len];
        self.cur.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Counterpart of [`ByteSink::write_u64_vec`].
    pub fn read_u64_vec(&mut self) -> Result<Vec<u64>, Error> {
        let count = self.read_u64()?;
        let mut values = Vec::with_capacity(count as usize);
        for _ in 0..count {
            values.push(self.read_u64()?);
        }
        Ok(values)
    }

    pub fn is_empty(&self) -> bool {
        self.cur.position() >= self.cur.get_ref().len() as u64
    }
}
