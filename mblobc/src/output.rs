use crate::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// An emitted C translation unit, ready to be handed to a C compiler.
pub struct CSource {
    source: String,
}

impl CSource {
    pub fn new(source: String) -> Self {
        CSource { source }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Write the translation unit to `path`.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut file = File::create(path)?;
        file.write_all(self.source.as_bytes())?;
        Ok(())
    }
}
