use std::process::{Command, Output};

fn epdshow(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_epdshow"))
        .args(args)
        .output()
        .expect("epdshow runs")
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

#[test]
fn no_arguments_prints_usage() {
    let out = epdshow(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("USAGE"));
}

#[test]
fn missing_channel_prints_usage() {
    let out = epdshow(&["photo.png"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("USAGE"));
}

#[test]
fn unknown_channel_exits_1() {
    let out = epdshow(&["photo.png", "green"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("green"));
}

#[test]
fn help_exits_0() {
    let out = epdshow(&["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("red"));
}

#[test]
fn missing_image_fails_before_hardware() {
    let dir = tempfile::tempdir().unwrap();
    let img = dir.path().join("missing.png");
    let out = epdshow(&[img.to_str().unwrap(), "black"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("ERROR"));
    assert!(err.contains("Couldn't load image"));
}

#[test]
fn missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("panel.yml");
    let out = epdshow(&["-c", cfg.to_str().unwrap(), "photo.png", "red"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Couldn't read file"));
}
