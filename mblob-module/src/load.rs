//! Process-wide registry of per-type-key module deserializers.
//!
//! Embedders register a loader for every backend they link in before
//! reading blobs; [`read_blob`](crate::read_blob) only performs lookups.

use crate::error::Error;
use crate::module::Module;
use crate::sink::ByteReader;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Deserializer for one tagged payload. The tag is passed in so a single
/// function can serve several type keys.
pub type LoadFn = fn(&str, &mut ByteReader<'_>) -> Result<Arc<dyn Module>, Error>;

lazy_static! {
    static ref LOADERS: RwLock<HashMap<String, LoadFn>> = RwLock::new(HashMap::new());
}

/// Register the deserializer for `type_key`, replacing any previous one.
pub fn register_loader(type_key: &str, load: LoadFn) {
    LOADERS.write().unwrap().insert(type_key.to_string(), load);
}

pub fn loader_for(type_key: &str) -> Option<LoadFn> {
    LOADERS.read().unwrap().get(type_key).copied()
}
