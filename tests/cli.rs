use assert_cmd::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

// A file in the temp directory, removed when dropped.
struct TempFile(PathBuf);

impl TempFile {
    fn new(name: &str) -> TempFile {
        let file_name = format!("jchip8-{}-{name}", std::process::id());
        TempFile(std::env::temp_dir().join(file_name))
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn write_rom(name: &str, program: &[u16]) -> TempFile {
    let rom = TempFile::new(&format!("{name}.ch8"));
    let bytes: Vec<u8> = program.iter().flat_map(|op| op.to_be_bytes()).collect();
    std::fs::write(rom.path(), bytes).unwrap();
    rom
}

#[test]
fn requires_a_game() {
    let mut cmd = Command::cargo_bin("jchip8").unwrap();
    cmd.assert().failure();
}

#[test]
fn draws_a_glyph() {
    // I = glyph '0', draw it at (V0, V0), then spin.
    let rom = write_rom("glyph", &[0xA000, 0xD005, 0x1204]);

    let output = Command::cargo_bin("jchip8")
        .unwrap()
        .arg("--path")
        .arg(rom.path())
        .args(["--cycles", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 32);
    assert!(lines[0].starts_with("####...."));
    assert!(lines[1].starts_with("#..#...."));
    assert_eq!(lines[5], ".".repeat(64));
}

#[test]
fn fails_on_fault() {
    let rom = write_rom("fault", &[0x00EE]);

    let mut cmd = Command::cargo_bin("jchip8").unwrap();
    cmd.arg("--path").arg(rom.path());
    cmd.assert().failure();
}

#[test]
fn rejects_oversized_rom() {
    let rom = write_rom("huge", &vec![0x1200; 0x700 + 1]);

    let mut cmd = Command::cargo_bin("jchip8").unwrap();
    cmd.arg("--path").arg(rom.path());
    cmd.assert().failure();
}

#[test]
fn save_then_resume() {
    let rom = write_rom("resume", &[0xA000, 0xD005, 0x1204]);
    let snapshot = TempFile::new("resume.json");

    let mut cmd = Command::cargo_bin("jchip8").unwrap();
    cmd.arg("--path")
        .arg(rom.path())
        .args(["--cycles", "2", "--save-state"])
        .arg(snapshot.path());
    cmd.assert().success();

    let output = Command::cargo_bin("jchip8")
        .unwrap()
        .arg("--load-state")
        .arg(snapshot.path())
        .args(["--cycles", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("####...."));
}

#[test]
fn game_and_snapshot_conflict() {
    let rom = write_rom("conflict", &[0x1200]);
    let snapshot = TempFile::new("conflict.json");
    std::fs::write(snapshot.path(), "{}").unwrap();

    // Neither file is opened: argument parsing rejects the pair.
    let output = Command::cargo_bin("jchip8")
        .unwrap()
        .arg("--path")
        .arg(rom.path())
        .arg("--load-state")
        .arg(snapshot.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("cannot be used with"));
}
