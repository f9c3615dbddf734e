//! In-memory modules for testing packagers and embedders.

use crate::error::Error;
use crate::module::Module;
use crate::sink::{ByteReader, ByteSink};
use std::sync::Arc;

/// A [`Module`] with a fixed type key, an opaque payload, and explicit
/// imports.
///
/// The payload is written length-prefixed so the matching loader can
/// find its end inside a larger blob.
pub struct MockModule {
    type_key: String,
    payload: Vec<u8>,
    imports: Vec<Arc<dyn Module>>,
}

impl MockModule {
    /// Loader counterpart of `save_to_binary`; register with
    /// `register_loader(key, MockModule::load_binary)` for any key used
    /// in a test blob.
    pub fn load_binary(
        type_key: &str,
        reader: &mut ByteReader<'_>,
    ) -> Result<Arc<dyn Module>, Error> {
        let payload = reader.read_bytes()?;
        Ok(Arc::new(MockModule {
            type_key: type_key.to_string(),
            payload,
            imports: vec![],
        }))
    }
}

impl Module for MockModule {
    fn type_key(&self) -> &str {
        &self.type_key
    }

    fn imports(&self) -> &[Arc<dyn Module>] {
        &self.imports
    }

    fn save_to_binary(&self, sink: &mut ByteSink) -> Result<(), Error> {
        sink.write_bytes(&self.payload)?;
        Ok(())
    }
}

pub struct MockModuleBuilder {
    type_key: String,
    payload: Vec<u8>,
    imports: Vec<Arc<dyn Module>>,
}

impl MockModuleBuilder {
    pub fn new(type_key: &str) -> Self {
        MockModuleBuilder {
            type_key: type_key.to_string(),
            payload: vec![],
            imports: vec![],
        }
    }

    pub fn with_payload(mut self, payload: &[u8]) -> Self {
        self.payload = payload.to_vec();
        self
    }

    pub fn with_import(mut self, import: Arc<dyn Module>) -> Self {
        self.imports.push(import);
        self
    }

    pub fn build(self) -> MockModule {
        MockModule {
            type_key: self.type_key,
            payload: self.payload,
            imports: self.imports,
        }
    }

    pub fn arced(self) -> Arc<dyn Module> {
        Arc::new(self.build())
    }
}
