// plugin-tooling - tests/e2e_docs.rs
//
// Documentation pipeline against stand-in doxygen/xsltproc/dotnet scripts.
//
// Everything runs inside one test so no other thread in this binary forks
// while a freshly written script is still open.

#![cfg(unix)]

use plugin_tooling::app::docs::{run_pipeline, DocsLayout, Toolchain};
use plugin_tooling::util::error::DocsError;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

fn write_script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn e2e_pipeline_with_stand_in_tools() {
    let work = tempfile::tempdir().unwrap();
    let tools_root = work.path().join("Utils~");
    fs::create_dir_all(tools_root.join("doxygen")).unwrap();
    fs::create_dir_all(tools_root.join("doc-generator-cs").join("DocsGenerator")).unwrap();

    let bin = tempfile::tempdir().unwrap();
    // doxygen runs in doxygen/ and must leave output/xml behind.
    write_script(
        bin.path(),
        "doxygen",
        "[ \"$1\" = Doxyfile ] || exit 3\nmkdir -p output/xml",
    );
    write_script(
        bin.path(),
        "xsltproc",
        "[ \"$1\" = combine.xslt ] && [ \"$2\" = index.xml ] || exit 4\necho '<doxygen/>'",
    );
    write_script(
        bin.path(),
        "dotnet",
        "[ \"$1\" = run ] && [ -s \"$2\" ] || exit 5\nprintf '{\"Title\":\"API\",\"Root\":\"%s\"}' \"$3\" > \"$4\"",
    );

    let tools = Toolchain::locate(Some(bin.path().as_os_str())).unwrap();
    let layout = DocsLayout::new(&tools_root);

    let summary = run_pipeline(&layout, &tools).unwrap();
    assert_eq!(summary.output, layout.output_json);
    assert_eq!(
        fs::read_to_string(&layout.combined_xml).unwrap(),
        "<doxygen/>\n"
    );
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&layout.output_json).unwrap()).unwrap();
    assert_eq!(json["Title"], "API");
    assert_eq!(json["Root"], work.path().to_str().unwrap());

    // A generator that exits cleanly without writing must not pass on the
    // previous run's output.
    assert!(layout.output_json.is_file());
    write_script(bin.path(), "dotnet", "exit 0");
    let err = run_pipeline(&layout, &tools).unwrap_err();
    assert!(
        matches!(err, DocsError::Io { operation: "read", .. }),
        "got {err:?}"
    );
    assert!(!layout.output_json.exists());

    // A failing generator stops the pipeline with its exit code.
    write_script(bin.path(), "dotnet", "exit 9");
    let err = run_pipeline(&layout, &tools).unwrap_err();
    assert!(
        matches!(err, DocsError::ExitStatus { tool: "dotnet", code: Some(9) }),
        "got {err:?}"
    );

    // A generator that writes garbage is caught by the output check.
    write_script(bin.path(), "dotnet", "echo 'not json' > \"$4\"");
    let err = run_pipeline(&layout, &tools).unwrap_err();
    assert!(matches!(err, DocsError::InvalidOutput { .. }), "got {err:?}");
}
