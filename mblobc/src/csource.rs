use std::mem::size_of;

// elements per initializer line; an 80-column layout of 4-char hex bytes
const NUNIT: usize = 80 / 4;

/// Render `blob` as a self-contained C translation unit defining
/// `symbol` as an `unsigned char` array whose first 8 bytes are the
/// little-endian blob length, followed by the blob itself.
///
/// With `system_lib` the unit also self-registers the symbol with the
/// target runtime at static-initialization time. `symbol` is a trusted
/// identifier; no escaping is performed.
pub fn emit_dev_mblob(blob: &[u8], symbol: &str, system_lib: bool) -> String {
    let mut src = String::new();
    src.push_str("#ifdef _WIN32\n");
    src.push_str("#define TVM_EXPORT __declspec(dllexport)\n");
    src.push_str("#else\n");
    src.push_str("#define TVM_EXPORT\n");
    src.push_str("#endif\n");
    src.push_str("#ifdef __cplusplus\n");
    src.push_str("extern \"C\" {\n");
    src.push_str("#endif\n");
    src.push_str(&format!(
        "TVM_EXPORT extern const unsigned char {}[];\n",
        symbol
    ));

    let nbytes = blob.len() as u64;
    src.push_str(&format!(
        "const unsigned char {}[{}] = {{\n  ",
        symbol,
        blob.len() + size_of::<u64>()
    ));
    for (i, b) in nbytes.to_le_bytes().iter().enumerate() {
        if i != 0 {
            src.push(',');
        }
        src.push_str(&format!("0x{:x}", b));
    }
    for (i, b) in blob.iter().enumerate() {
        if (i + size_of::<u64>()) % NUNIT == 0 {
            src.push_str(",\n  ");
        } else {
            src.push(',');
        }
        src.push_str(&format!("0x{:x}", b));
    }
    src.push_str("\n};\n");

    if system_lib {
        src.push_str("extern int TVMBackendRegisterSystemLibSymbol(const char*, void*);\n");
        src.push_str(&format!(
            "static int {sym}_reg_ = TVMBackendRegisterSystemLibSymbol(\"{sym}\", (void*){sym});\n",
            sym = symbol
        ));
    }
    src.push_str("#ifdef __cplusplus\n");
    src.push_str("}\n");
    src.push_str("#endif\n");
    src
}
