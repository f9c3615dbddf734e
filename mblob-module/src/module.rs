use crate::error::Error;
use crate::sink::ByteSink;
use std::sync::Arc;

/// Name of the symbol under which an embedded module blob is linked into
/// the final shared object.
pub const DEV_MBLOB_SYM: &str = "__tvm_dev_mblob";

/// Host DSO module type keys. A DSO module's machine code is linked into
/// the shared object itself, so it shapes the import tree by hanging off
/// the sentinel vertex instead of getting an interior vertex of its own.
pub fn is_dso_module(type_key: &str) -> bool {
    type_key == "llvm" || type_key == "c"
}

/// A compiled module produced by a backend code generator.
///
/// The packager needs exactly three capabilities: the backend tag that
/// selects the deserializer at load time, the ordered imported
/// submodules, and the opaque binary serializer. Modules are only ever
/// borrowed during packaging; `save_to_binary` is the one narrow way
/// their state is touched.
pub trait Module: Send + Sync {
    /// Short ASCII tag of the backend that produced this module, e.g.
    /// `"llvm"` or `"cuda"`.
    fn type_key(&self) -> &str;

    /// Imported submodules, in import order.
    fn imports(&self) -> &[Arc<dyn Module>];

    /// Serialize this module's payload into `sink`.
    fn save_to_binary(&self, sink: &mut ByteSink) -> Result<(), Error>;
}
