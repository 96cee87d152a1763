//! Fixed placeholder payloads written into staging trees.
//!
//! None of these byte sequences follow a documented schema. They are
//! hand-assembled stand-ins shaped like protobuf and ARSC headers so the
//! archive layout is complete; they are written verbatim, never parsed
//! back, and a real bundletool or APK consumer may reject them.

/// `BundleConfig.pb` — bundletool configuration stub.
pub const BUNDLE_CONFIG_PB: &[u8] = &[
    0x0A, 0x12, 0x0A, 0x10, 0x08, 0x01, 0x10, 0x01, 0x18, 0x00, 0x12, 0x08, 0x0A, 0x06, 0x08,
    0x01, 0x10, 0x01,
];

/// `base/resources.pb` — resource-table stub with a string-pool header.
pub const RESOURCES_PB: &[u8] = &[
    0x02, 0x00, 0x0C, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x1C,
    0x00, 0x00, 0x00, 0x00, 0x00,
];

/// `base/native.pb` — native-libraries stub.
pub const NATIVE_PB: &[u8] = &[0x08, 0x01, 0x12, 0x00];

/// `resources.arsc` — APK resource-table stub.
pub const RESOURCES_ARSC: &[u8] = &[
    0x02, 0x00, 0x0C, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00,
];

/// Gradle version recorded under `BUNDLE-METADATA/`.
pub const GRADLE_VERSION: &str = "8.2.1";

/// `classes.dex` — DEX header magic (`dex\n037\0`) zero-padded to 98 bytes.
pub fn classes_dex_stub() -> Vec<u8> {
    let mut dex = Vec::with_capacity(98);
    dex.extend_from_slice(b"dex\n037\0");
    dex.resize(98, 0);
    dex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dex_stub_has_magic_and_fixed_length() {
        let dex = classes_dex_stub();
        assert_eq!(dex.len(), 98);
        assert!(dex.starts_with(b"dex\n037\0"));
        assert!(dex[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn payload_sizes_are_fixed() {
        assert_eq!(BUNDLE_CONFIG_PB.len(), 18);
        assert_eq!(RESOURCES_PB.len(), 20);
        assert_eq!(NATIVE_PB.len(), 4);
        assert_eq!(RESOURCES_ARSC.len(), 16);
    }
}
