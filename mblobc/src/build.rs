use crate::error::Error;
use crate::ir::{skip_assert, LoweredFunc};
use crate::registry;
use log::info;
use mblob_module::Module;
use std::sync::Arc;

/// Options applied to every function before it reaches a backend.
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    /// Strip assert markers from lowered functions before building.
    pub disable_assert: bool,
}

/// Dispatch `funcs` to the backend registered for `target`.
///
/// The registry entry is selected by the first whitespace-delimited
/// token of the target string, so `"cuda -arch=sm_70"` dispatches to
/// `codegen.build_cuda`.
pub fn build(
    funcs: &[LoweredFunc],
    target: &str,
    config: &BuildConfig,
) -> Result<Arc<dyn Module>, Error> {
    let prefix = target.split_whitespace().next().unwrap_or("");
    let build_f_name = format!("codegen.build_{}", prefix);
    let build_fn = registry::lookup(&build_f_name)
        .ok_or_else(|| Error::UnknownTarget(target.to_string()))?;
    info!("building {} functions for target `{}`", funcs.len(), target);
    if config.disable_assert {
        let transformed: Vec<LoweredFunc> = funcs.iter().map(skip_assert).collect();
        build_fn(&transformed, target)
    } else {
        build_fn(funcs, target)
    }
}
