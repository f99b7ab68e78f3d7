use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;

const GRAPH: &str = "\
TOP NODE
1

GAPS
1 1

NODES
1 6 2
2 6 2
3 6 2

EDGES
1 2 CENTER 0 0 CENTER 0 0 CENTER 0 0
2 3 CW 4 2 CENTER 3 1 CCW 4 2
";

#[cfg(unix)]
const TREE: &str = "\
CUT_VERTICES
BLOCK_BEGIN
1
BLOCK_CUT_VERTICES
BLOCK_ORDINARY_VERTICES
1
2
3
BLOCK_EDGES
1 2
2 3
BLOCK_END
";

#[cfg(unix)]
const PLANARIZED: &str = "\
NODES
1
2
3
VIRTUAL_NODES
4
EDGES
1 2
3 4 2
";

#[cfg(unix)]
const EMBEDDING: &str = "\
INCIDENCES
1 2
2 1 4
4 2 3
3 4
FACES
0 1 2 4 3
1 3 4 2 1
";

#[cfg(unix)]
const VIS_REP: &str = "\
AREA
40 30

NODES
1 0 10 20
2 0 10 10
3 12 20 10
4 4 8 20
EDGES
1 2 2 20 10 NOTFLIPPED
2 4 6 10 20 NOTFLIPPED
4 3 7 20 10 FLIPPED
";

#[cfg(unix)]
const ARRANGED: &str = "\
NODES
1
2
3
VIRTUAL_NODES
4
EDGES
1 4 3
1 2
RANKS
1
2 4
3
";

/// Fakes one external tool: a script that ignores its input file and writes
/// a canned artifact to the output path.
#[cfg(unix)]
fn stub_tool(dir: &std::path::Path, name: &str, artifact: &str) {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    let script = format!("#!/bin/sh\ncat > \"$2\" <<'EOF'\n{artifact}EOF\n");
    fs::write(&path, script).expect("write stub tool");
    let mut perms = fs::metadata(&path).expect("stat stub tool").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod stub tool");
}

#[test]
fn cli_parses_graph_to_json() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("graph.txt");
    fs::write(&input, GRAPH).expect("write graph");

    let exe = assert_cmd::cargo_bin!("vaquita-cli");
    let assert = Command::new(exe)
        .args(["parse", input.to_string_lossy().as_ref()])
        .assert()
        .success();

    let v: Value = serde_json::from_slice(&assert.get_output().stdout).expect("json stdout");
    assert_eq!(v["topNode"], 1);
    assert_eq!(v["gaps"]["horizontal"], 1.0);
    assert_eq!(v["nodes"].as_array().map(Vec::len), Some(3));
    assert_eq!(v["edges"][1]["n2"], 3);
    assert_eq!(v["edges"][1]["label1"]["side"], "CW");
}

#[test]
fn cli_rejects_unknown_flags_with_usage() {
    let exe = assert_cmd::cargo_bin!("vaquita-cli");
    let assert = Command::new(exe).args(["--nope"]).assert().failure().code(2);
    let err = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 stderr");
    assert!(err.contains("USAGE:"));
}

#[test]
fn cli_reports_stage_syntax_errors_from_stdin() {
    let exe = assert_cmd::cargo_bin!("vaquita-cli");
    let assert = assert_cmd::Command::new(exe)
        .write_stdin("GARBAGE\n")
        .assert()
        .failure()
        .code(1);
    let err = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 stderr");
    assert!(err.contains("syntax error on line 1"));
}

#[cfg(unix)]
#[test]
fn cli_layout_drives_stub_tools_end_to_end() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tools = tmp.path().join("tools");
    fs::create_dir(&tools).expect("mkdir tools");
    stub_tool(&tools, "decomposer", TREE);
    stub_tool(&tools, "planarizer", PLANARIZED);
    stub_tool(&tools, "biconnected_embedding_finder", EMBEDDING);
    stub_tool(&tools, "vis_rep_finder", VIS_REP);
    fs::write(tmp.path().join("graph.txt"), GRAPH).expect("write graph");

    let exe = assert_cmd::cargo_bin!("vaquita-cli");
    let assert = Command::new(exe)
        .current_dir(tmp.path())
        .args([
            "layout",
            "--tools-dir",
            "tools",
            "--work-dir",
            "work",
            "graph.txt",
        ])
        .assert()
        .success();

    let v: Value = serde_json::from_slice(&assert.get_output().stdout).expect("drawing json");
    assert_eq!(v["width"], 40.0);
    assert_eq!(v["height"], 30.0);
    assert_eq!(v["nodes"][2]["xMid"], 15.0);
    assert_eq!(v["nodes"][3]["isVirtual"], true);
    assert_eq!(v["edges"][1]["label1"]["x"], 6.0);
    assert_eq!(v["edges"][2]["labelMid"], Value::Null);
    assert!(
        !tmp.path().join("work").exists(),
        "work dir should be removed after the run"
    );
}

#[cfg(unix)]
#[test]
fn cli_arrange_keeps_work_dir_on_request() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tools = tmp.path().join("tools");
    fs::create_dir(&tools).expect("mkdir tools");
    stub_tool(&tools, "digraph_arranger", ARRANGED);
    fs::write(tmp.path().join("digraph.txt"), "NODES\n1\n").expect("write digraph");

    let exe = assert_cmd::cargo_bin!("vaquita-cli");
    let assert = Command::new(exe)
        .current_dir(tmp.path())
        .args([
            "arrange",
            "--tools-dir",
            "tools",
            "--work-dir",
            "work",
            "--keep-work-dir",
            "digraph.txt",
        ])
        .assert()
        .success();

    let v: Value = serde_json::from_slice(&assert.get_output().stdout).expect("layout json");
    assert_eq!(v["nodes"]["1"]["x"], 0.25);
    assert_eq!(v["nodes"]["4"]["isVirtual"], true);
    assert_eq!(v["nodes"]["4"]["y"], 2.0 / 3.0);
    assert_eq!(v["ranks"][1], serde_json::json!([2, 4]));
    assert_eq!(v["maxPos"], 2);
    assert_eq!(v["labelRadius"], 1.5 / 18.0);
    assert!(tmp.path().join("work").join("arranged.txt").exists());
    assert!(tmp.path().join("work").join("digraph_input.txt").exists());
}
