use std::process::{Command, Output};

use image::{Rgb, RgbImage};

fn run(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_frame-representation"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn invalid_layer_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("frame.png");
    RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])).save(&image).unwrap();

    let output = run(&[image.as_os_str(), dir.path().as_os_str(), "xyz".as_ref()]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("xyz"));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_image_fails_before_model_loading() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("missing.jpg");
    let models = dir.path().join("no-models-here");

    let output = run(&[image.as_os_str(), models.as_os_str(), "prob".as_ref()]);
    let err = stderr(&output);

    assert!(!output.status.success());
    assert!(err.contains("image not found"), "{err}");
    assert!(!err.contains("resnext-101"), "{err}");
}

#[test]
fn missing_checkpoint_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("frame.png");
    RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])).save(&image).unwrap();

    let output = run(&[
        image.as_os_str(),
        dir.path().as_os_str(),
        "fc".as_ref(),
        "--epoch".as_ref(),
        "7".as_ref(),
    ]);
    let err = stderr(&output);

    assert!(!output.status.success());
    assert!(err.contains("resnext-101-0007.onnx"), "{err}");
    assert!(output.stdout.is_empty());
}
