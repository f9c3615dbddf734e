//! Process-wide registry of backend build functions.
//!
//! Backends register themselves under `"codegen.build_" + target_prefix`
//! before the first build; the dispatcher only ever performs lookups.
//! The table is assumed immutable for the duration of a build call.

use crate::error::Error;
use crate::ir::LoweredFunc;
use lazy_static::lazy_static;
use mblob_module::Module;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A backend build function: lowered functions plus the full target
/// string, producing the backend's compiled module.
pub type BuildFn = fn(&[LoweredFunc], &str) -> Result<Arc<dyn Module>, Error>;

lazy_static! {
    static ref BUILD_FNS: RwLock<HashMap<String, BuildFn>> = RwLock::new(HashMap::new());
}

/// Register `build_fn` under `name`, replacing any previous entry.
pub fn register(name: &str, build_fn: BuildFn) {
    BUILD_FNS.write().unwrap().insert(name.to_string(), build_fn);
}

pub fn lookup(name: &str) -> Option<BuildFn> {
    BUILD_FNS.read().unwrap().get(name).copied()
}
