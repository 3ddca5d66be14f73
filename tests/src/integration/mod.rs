//! Cross-subsystem integration tests.

pub mod e2e_symbology;
pub mod provisioning_flows;

/// Shared fixtures for integration tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use sl_01_dictionary_provisioning::InMemoryAssetSource;
    use std::fs;
    use std::path::Path;

    /// A small MIL-STD-2525C bundle with nested folders.
    pub fn mil2525c_bundle() -> InMemoryAssetSource {
        InMemoryAssetSource::new()
            .with_file("mil2525c/mil2525c.dat", b"MIL-STD-2525C symbol dictionary".to_vec())
            .with_file("mil2525c/symbols/sfgpevac.svg", b"<svg id=\"evac\"/>".to_vec())
            .with_file("mil2525c/symbols/sfgpuci.svg", b"<svg id=\"infantry\"/>".to_vec())
            .with_file("mil2525c/fonts/symbols.ttf", vec![0u8, 1, 2, 3, 255])
    }

    /// Write the same bundle to disk under `root`.
    pub fn write_mil2525c_assets(root: &Path) {
        let dict = root.join("mil2525c");
        fs::create_dir_all(dict.join("symbols")).unwrap();
        fs::create_dir_all(dict.join("fonts")).unwrap();
        fs::write(dict.join("mil2525c.dat"), b"MIL-STD-2525C symbol dictionary").unwrap();
        fs::write(dict.join("symbols").join("sfgpevac.svg"), b"<svg id=\"evac\"/>").unwrap();
        fs::write(dict.join("symbols").join("sfgpuci.svg"), b"<svg id=\"infantry\"/>").unwrap();
        fs::write(dict.join("fonts").join("symbols.ttf"), [0u8, 1, 2, 3, 255]).unwrap();
    }
}
