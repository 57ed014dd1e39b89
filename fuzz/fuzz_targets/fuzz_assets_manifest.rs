#![no_main]
use libfuzzer_sys::fuzz_target;
use nuget_bom::LockManifest;

/// Fuzz assets file decoding and library entry validation.
fuzz_target!(|data: &[u8]| {
    if let Ok(manifest) = LockManifest::from_reader(data) {
        let _ = manifest.package_entries();
    }
});
