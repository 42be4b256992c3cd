use std::path::PathBuf;

use image::GrayAlphaImage;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_tintstack")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "tintstack.exe"
            } else {
                "tintstack"
            });
            p
        })
}

#[test]
fn cli_render_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke");
    let _ = std::fs::remove_dir_all(&dir);
    let src_dir = dir.join("masks");
    let out_dir = dir.join("generated");
    std::fs::create_dir_all(&src_dir).unwrap();

    GrayAlphaImage::from_raw(1, 1, vec![0, 255])
        .unwrap()
        .save(src_dir.join("bg.png"))
        .unwrap();
    GrayAlphaImage::from_raw(1, 1, vec![255, 0])
        .unwrap()
        .save(src_dir.join("fg.png"))
        .unwrap();

    let config_path = dir.join("generator.json");
    let colors_path = dir.join("colors.json");
    std::fs::write(
        &config_path,
        r#"{
            "layers": [{"base": "bg.png"}, {"accent": "fg.png"}],
            "output_filename": "button.png",
            "image_format": "png"
        }"#,
    )
    .unwrap();
    std::fs::write(&colors_path, r##"{"base": "#336699", "accent": "orange"}"##).unwrap();

    let status = std::process::Command::new(exe())
        .arg("render")
        .arg("--config")
        .arg(&config_path)
        .arg("--colors")
        .arg(&colors_path)
        .arg("--source")
        .arg(&src_dir)
        .arg("--out")
        .arg(&out_dir)
        .status()
        .unwrap();

    assert!(status.success());
    let written = image::open(out_dir.join("button.png")).unwrap().to_rgba8();
    assert_eq!(written.into_raw(), vec![0x33, 0x66, 0x99, 255]);
}

#[test]
fn cli_render_fails_on_missing_color() {
    let dir = PathBuf::from("target").join("cli_smoke_missing_color");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let config_path = dir.join("generator.json");
    let colors_path = dir.join("colors.json");
    std::fs::write(
        &config_path,
        r#"{"layers": [{"base": "bg.png"}], "output_filename": "x.png", "image_format": "png"}"#,
    )
    .unwrap();
    std::fs::write(&colors_path, r#"{"other": "red"}"#).unwrap();

    let output = std::process::Command::new(exe())
        .arg("render")
        .arg("--config")
        .arg(&config_path)
        .arg("--colors")
        .arg(&colors_path)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration error"), "{stderr}");
}

#[test]
fn cli_color_prints_hex_and_channels() {
    let output = std::process::Command::new(exe())
        .args(["color", "rgb(50%, 0%, 100%)"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "#8000ff 128,0,255");
}
