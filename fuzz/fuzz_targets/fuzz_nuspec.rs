#![no_main]
use libfuzzer_sys::fuzz_target;
use nuget_bom::nuspec::{parse_descriptor, NamespaceMap, NUSPEC_NAMESPACE};

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the nuspec descriptor parser.
///
/// Wraps input in a `package` envelope so the metadata deserialization path
/// is reached and not only the root element check.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let namespaces = NamespaceMap::default();

        let _ = parse_descriptor(s, &namespaces);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(
                r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="{NUSPEC_NAMESPACE}">
  <metadata>{s}</metadata>
</package>"#,
            );
            let _ = parse_descriptor(&wrapped, &namespaces);
        }
    }
});
