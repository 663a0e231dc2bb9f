use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const BNK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Hierarchy>
  <HierarchyItem name="BNK" alias="BNK">
    <HierarchyItem name="BMF" alias="BNK_BMF">
      <HierarchyItem name="ACMA_0001" alias="BNK_ACMA_0001"/>
      <HierarchyItem name="aii0001" alias="BNK_AII0001"/>
    </HierarchyItem>
  </HierarchyItem>
</Hierarchy>"#;

const CATALOG: &str = r#"
schema_version = 1

[[jobs]]
source = "BNK"
location = "BNK"
system = "BMF"
output_dir = "bnksms"
output = "BNK-BMF"
environment = "BNKSMS"

[[jobs]]
source = "CMS"
location = "CMS"
system = "LNE__0001"
output_dir = "occcms"
output = "CMS-LNE"
environment = "OCCCMS"
"#;

struct Workspace {
    temp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let temp = tempdir().unwrap();
        let source = temp.path().join("xml/xml_DB_BNK");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("instancesHierarchy.xml"), BNK).unwrap();
        fs::write(temp.path().join("catalog.toml"), CATALOG).unwrap();
        Self { temp }
    }

    fn path(&self, relative: &str) -> std::path::PathBuf {
        self.temp.path().join(relative)
    }

    #[allow(deprecated)]
    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("generate-ssr").expect("binary");
        cmd.env_remove("SSR_POOL_SIZE")
            .env_remove("RUST_LOG")
            .arg("--xml-dir")
            .arg(self.path("xml"))
            .arg("--output-dir")
            .arg(self.path("out"))
            .arg("--catalog")
            .arg(self.path("catalog.toml"));
        cmd
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("{}: {err}", path.display()))
}

#[test]
fn generates_reports_and_creates_output_root() {
    let ws = Workspace::new();

    ws.command()
        .args(["--header", "none"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Processing BNK:BMF in BNK database"));

    assert_eq!(
        read(&ws.path("out/bnksms/BNK-BMF.dat")),
        "ENVIRONEMENT=BNKSMS\nCONFIGURATION=\nPOINT=<alias>BNK_BMF:aii0001\n"
    );
    assert!(!ws.path("out/occcms/CMS-LNE.dat").exists());
}

#[test]
fn json_summary_reports_failed_jobs_without_failing_the_run() {
    let ws = Workspace::new();

    let output = ws.command().args(["--json", "--pool", "2"]).output().unwrap();
    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["completed"], 1);
    assert_eq!(summary["failed"], 1);
    assert_eq!(summary["points"], 1);
    assert!(summary["failures"][0]
        .as_str()
        .unwrap()
        .starts_with("CMS:LNE__0001 in CMS"));

    let report = read(&ws.path("out/bnksms/BNK-BMF.dat"));
    assert!(report.starts_with(&"#".repeat(59)));
    assert!(report.contains("/home/dbs/SumReport/BNKSMS/BNK-BMF.dat"));
}

#[test]
fn missing_source_logs_exactly_one_warning() {
    let ws = Workspace::new();

    let output = ws.command().args(["-q", "-p", "2"]).output().unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let warnings: Vec<&str> = stderr.lines().filter(|l| l.contains("WARN")).collect();
    assert_eq!(warnings.len(), 1, "{stderr}");
    assert!(warnings[0].contains("CMS:LNE__0001 in CMS database ... FAILED"));
    assert!(!stderr.contains("INFO"));

    assert!(ws.path("out/bnksms/BNK-BMF.dat").is_file());
}

#[test]
fn environment_filter_restricts_jobs() {
    let ws = Workspace::new();

    let output = ws
        .command()
        .args(["--json", "-e", "bnk"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["failed"], 0);
}

#[test]
fn unknown_environment_is_a_configuration_error() {
    let ws = Workspace::new();

    ws.command()
        .args(["-e", "XYZ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --environment"));
    assert!(!ws.path("out").exists());
}

#[test]
fn missing_xml_dir_is_a_configuration_error() {
    let ws = Workspace::new();
    fs::remove_dir_all(ws.path("xml")).unwrap();

    ws.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("XML directory not found"));
}

#[test]
fn zero_pool_size_is_rejected() {
    let ws = Workspace::new();

    ws.command()
        .args(["--pool", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pool size"));
}

#[test]
fn invalid_catalog_is_rejected() {
    let ws = Workspace::new();
    fs::write(ws.path("catalog.toml"), "schema_version = 7\njobs = []\n").unwrap();

    ws.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}

#[test]
fn log_file_receives_records() {
    let ws = Workspace::new();
    let log = ws.path("generate-ssr.log");

    ws.command()
        .arg("--log-file")
        .arg(&log)
        .assert()
        .success();

    let content = read(&log);
    assert!(content.contains("Processing BNK:BMF in BNK database"));
    assert!(content.contains("Total processing time"));
}

#[test]
#[allow(deprecated)]
fn list_prints_builtin_catalog() {
    Command::cargo_bin("generate-ssr")
        .expect("binary")
        .args(["--list", "-e", "BNK"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bnksms/BNK-BMF.dat"))
        .stdout(predicate::str::contains("BNK:ECS"))
        .stdout(predicate::str::contains("CMS").not());
}

#[test]
#[allow(deprecated)]
fn list_json_is_parseable() {
    let output = Command::cargo_bin("generate-ssr")
        .expect("binary")
        .args(["--list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let jobs: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(jobs.as_array().map(Vec::len), Some(399));
}
