use byteorder::{LittleEndian, WriteBytesExt};
use mblob_module::{
    read_blob, register_loader, MockModule, MockModuleBuilder, DEV_MBLOB_SYM,
};
use mblobc::{pack_import_blob, pack_imports_to_c, CSource, Error};

/// Builder for expected blob byte sequences, little-endian throughout.
struct Expect {
    buf: Vec<u8>,
}

impl Expect {
    fn new() -> Self {
        Expect { buf: Vec::new() }
    }

    fn u64(mut self, v: u64) -> Self {
        self.buf.write_u64::<LittleEndian>(v).unwrap();
        self
    }

    fn str(self, s: &str) -> Self {
        self.bytes(s.as_bytes())
    }

    fn bytes(self, b: &[u8]) -> Self {
        let mut this = self.u64(b.len() as u64);
        this.buf.extend_from_slice(b);
        this
    }

    fn vec(self, values: &[u64]) -> Self {
        let mut this = self.u64(values.len() as u64);
        for v in values {
            this = this.u64(*v);
        }
        this
    }

    fn build(self) -> Vec<u8> {
        self.buf
    }
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn flat_root_with_no_imports() {
    let root = MockModuleBuilder::new("llvm").build();
    let blob = pack_import_blob(&root).unwrap();
    assert_eq!(blob, Expect::new().u64(0).u64(0).build());
    assert_eq!(blob.len(), 16);
}

#[test]
fn flat_layout_appends_leaf_imports_in_order() {
    let root = MockModuleBuilder::new("llvm")
        .with_import(MockModuleBuilder::new("cuda").with_payload(b"AB").arced())
        .with_import(MockModuleBuilder::new("opencl").with_payload(b"CD").arced())
        .build();
    let blob = pack_import_blob(&root).unwrap();
    // mock payloads are written length-prefixed
    let expected = Expect::new()
        .u64(0)
        .u64(2)
        .str("cuda")
        .bytes(b"AB")
        .str("opencl")
        .bytes(b"CD")
        .build();
    assert_eq!(blob, expected);
}

#[test]
fn flat_layout_carries_dso_imports_too() {
    let root = MockModuleBuilder::new("c")
        .with_import(MockModuleBuilder::new("llvm").with_payload(b"LL").arced())
        .build();
    let blob = pack_import_blob(&root).unwrap();
    let expected = Expect::new()
        .u64(0)
        .u64(1)
        .str("llvm")
        .bytes(b"LL")
        .build();
    assert_eq!(blob, expected);
}

#[test]
fn tree_layout_single_device_child() {
    let root = MockModuleBuilder::new("graph_runtime")
        .with_payload(b"R")
        .with_import(MockModuleBuilder::new("cuda").with_payload(b"X").arced())
        .build();
    let blob = pack_import_blob(&root).unwrap();
    let expected = Expect::new()
        .u64(2)
        .vec(&[1, 2])
        .str("graph_runtime")
        .bytes(b"R")
        .str("cuda")
        .bytes(b"X")
        .build();
    assert_eq!(blob, expected);
}

#[test]
fn tree_layout_elides_llvm_leaf_payload() {
    let root = MockModuleBuilder::new("graph_runtime")
        .with_payload(b"R")
        .with_import(MockModuleBuilder::new("llvm").with_payload(b"LL").arced())
        .with_import(MockModuleBuilder::new("cuda").with_payload(b"X").arced())
        .build();
    let blob = pack_import_blob(&root).unwrap();
    // the llvm leaf hangs off the sentinel; the cuda edge lands on an
    // interior vertex the visit from the root never reaches
    let expected = Expect::new()
        .u64(3)
        .vec(&[1, 0])
        .str("graph_runtime")
        .bytes(b"R")
        .str("cuda")
        .bytes(b"X")
        .build();
    assert_eq!(blob, expected);
    assert!(!contains_subslice(&blob, b"llvm"));
}

#[test]
fn c_child_is_shaped_as_dso_but_payload_is_written() {
    let root = MockModuleBuilder::new("graph_runtime")
        .with_payload(b"R")
        .with_import(MockModuleBuilder::new("c").with_payload(b"CC").arced())
        .build();
    let blob = pack_import_blob(&root).unwrap();
    let expected = Expect::new()
        .u64(2)
        .vec(&[1, 0])
        .str("graph_runtime")
        .bytes(b"R")
        .str("c")
        .bytes(b"CC")
        .build();
    assert_eq!(blob, expected);
}

#[test]
fn sub_imports_of_dso_import_hang_off_the_sentinel() {
    let sub = MockModuleBuilder::new("cuda").with_payload(b"X").arced();
    let root = MockModuleBuilder::new("graph_runtime")
        .with_payload(b"R")
        .with_import(
            MockModuleBuilder::new("llvm")
                .with_payload(b"LL")
                .with_import(sub)
                .arced(),
        )
        .build();
    let blob = pack_import_blob(&root).unwrap();
    // edges: 1 -> 0 (llvm), 0 -> 2 (cuda, classified by its parent)
    let expected = Expect::new()
        .u64(3)
        .vec(&[1, 0, 2])
        .str("graph_runtime")
        .bytes(b"R")
        .str("cuda")
        .bytes(b"X")
        .build();
    assert_eq!(blob, expected);
}

#[test]
fn two_level_device_hierarchy_gets_interior_vertices() {
    let sub = MockModuleBuilder::new("opencl").with_payload(b"O").arced();
    let root = MockModuleBuilder::new("graph_runtime")
        .with_payload(b"R")
        .with_import(
            MockModuleBuilder::new("cuda")
                .with_payload(b"X")
                .with_import(sub)
                .arced(),
        )
        .build();
    let blob = pack_import_blob(&root).unwrap();
    let expected = Expect::new()
        .u64(3)
        .vec(&[1, 2, 3])
        .str("graph_runtime")
        .bytes(b"R")
        .str("cuda")
        .bytes(b"X")
        .str("opencl")
        .bytes(b"O")
        .build();
    assert_eq!(blob, expected);
}

#[test]
fn three_level_hierarchy_is_rejected() {
    let leaf = MockModuleBuilder::new("opencl").arced();
    let sub = MockModuleBuilder::new("cuda").with_import(leaf).arced();
    let root = MockModuleBuilder::new("graph_runtime")
        .with_import(MockModuleBuilder::new("metal").with_import(sub).arced())
        .build();
    match pack_import_blob(&root) {
        Err(Error::HierarchyTooDeep(key)) => assert_eq!(key, "cuda"),
        other => panic!("expected HierarchyTooDeep, got {:?}", other),
    }
}

#[test]
fn flat_layout_rejects_non_leaf_imports() {
    let sub = MockModuleBuilder::new("opencl").arced();
    let root = MockModuleBuilder::new("llvm")
        .with_import(MockModuleBuilder::new("cuda").with_import(sub).arced())
        .build();
    match pack_import_blob(&root) {
        Err(Error::HierarchyTooDeep(key)) => assert_eq!(key, "cuda"),
        other => panic!("expected HierarchyTooDeep, got {:?}", other),
    }
}

#[test]
fn packing_is_deterministic() {
    let make = || {
        MockModuleBuilder::new("graph_runtime")
            .with_payload(b"R")
            .with_import(MockModuleBuilder::new("llvm").arced())
            .with_import(MockModuleBuilder::new("cuda").with_payload(b"X").arced())
            .build()
    };
    let a = make();
    let b = make();
    assert_eq!(pack_import_blob(&a).unwrap(), pack_import_blob(&b).unwrap());
    assert_eq!(
        pack_imports_to_c(&a, true).unwrap(),
        pack_imports_to_c(&b, true).unwrap()
    );
}

fn parse_initializer_bytes(src: &str) -> Vec<u8> {
    let start = src.find("= {").unwrap() + 3;
    let end = src[start..].find('}').unwrap() + start;
    src[start..end]
        .split(',')
        .map(|tok| u8::from_str_radix(tok.trim().trim_start_matches("0x"), 16).unwrap())
        .collect()
}

#[test]
fn emitted_array_embeds_length_prefixed_blob() {
    let root = MockModuleBuilder::new("llvm")
        .with_import(MockModuleBuilder::new("cuda").with_payload(b"AB").arced())
        .build();
    let blob = pack_import_blob(&root).unwrap();
    let src = pack_imports_to_c(&root, false).unwrap();

    let decl = format!(
        "const unsigned char {}[{}] = {{",
        DEV_MBLOB_SYM,
        blob.len() + 8
    );
    assert!(src.contains(&decl));

    let bytes = parse_initializer_bytes(&src);
    assert_eq!(bytes.len(), blob.len() + 8);
    let mut len_le = [0u8; 8];
    len_le.copy_from_slice(&bytes[..8]);
    assert_eq!(u64::from_le_bytes(len_le), blob.len() as u64);
    assert_eq!(&bytes[8..], &blob[..]);
}

#[test]
fn system_lib_toggle_controls_registration() {
    let root = MockModuleBuilder::new("llvm").build();
    let with = pack_imports_to_c(&root, true).unwrap();
    let without = pack_imports_to_c(&root, false).unwrap();

    let reg_lines: Vec<&str> = with
        .lines()
        .filter(|l| l.starts_with("static int "))
        .collect();
    assert_eq!(reg_lines.len(), 1);
    assert!(reg_lines[0].contains("TVMBackendRegisterSystemLibSymbol"));
    assert!(!without.contains("TVMBackendRegisterSystemLibSymbol"));
}

#[test]
fn packed_blob_round_trips_through_the_loader() {
    register_loader("graph_runtime", MockModule::load_binary);
    register_loader("cuda", MockModule::load_binary);
    let root = MockModuleBuilder::new("graph_runtime")
        .with_payload(b"R")
        .with_import(MockModuleBuilder::new("cuda").with_payload(b"X").arced())
        .build();
    let blob = pack_import_blob(&root).unwrap();

    let loaded = read_blob(&blob).unwrap();
    assert_eq!(loaded.modules.len(), 2);
    let loaded_root = loaded.root().unwrap();
    assert_eq!(loaded_root.type_key(), "graph_runtime");
    assert_eq!(loaded.modules[1].type_key(), "cuda");
}

#[test]
fn csource_writes_to_disk() {
    let root = MockModuleBuilder::new("llvm").build();
    let src = pack_imports_to_c(&root, false).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dev_mblob.c");
    CSource::new(src.clone()).write(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), src);
}
