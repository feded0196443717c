use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::process::{Command, Output};

use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{colortype::Gray16, TiffEncoder};

const WIDTH: usize = 2048;

/// Writes `frames` pages of `height` x 2048; the left half of frame `i` holds
/// `base + 2 * i`, the right half `base + 2 * i + 1`.
fn write_acquisition(path: &Path, base: u16, frames: usize, height: usize) {
    let mut out = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut out).expect("create encoder");
        for frame in 0..frames {
            let left = base + 2 * frame as u16;
            let data: Vec<u16> = (0..height * WIDTH)
                .map(|i| if i % WIDTH < 1024 { left } else { left + 1 })
                .collect();
            encoder
                .write_image::<Gray16>(WIDTH as u32, height as u32, &data)
                .expect("write page");
        }
    }
    fs::write(path, out.into_inner()).expect("write acquisition");
}

/// (width, height, first sample) of every page.
fn read_pages(path: &Path) -> Vec<(u32, u32, u16)> {
    let file = fs::File::open(path).expect("open output");
    let mut decoder = Decoder::new(file).expect("decode output");
    let mut pages = Vec::new();
    loop {
        let (width, height) = decoder.dimensions().expect("dimensions");
        match decoder.read_image().expect("read page") {
            DecodingResult::U16(v) => pages.push((width, height, v[0])),
            _ => panic!("expected 16 bit page"),
        }
        if !decoder.more_images() {
            break;
        }
        decoder.next_image().expect("next page");
    }
    pages
}

fn merge_tool(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_merge-tool"))
        .args(args)
        .output()
        .expect("run merge-tool")
}

fn pattern(dir: &Path, glob: &str) -> String {
    dir.join(glob).display().to_string()
}

#[test]
fn help_lists_options() {
    let output = merge_tool(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--target", "--sort", "--split", "--crop", "--compression"] {
        assert!(stdout.contains(flag), "missing {flag} in help output");
    }
}

#[test]
fn missing_target_is_usage_error() {
    let output = merge_tool(&["*.tif"]);
    assert!(!output.status.success());
    assert_ne!(output.status.code(), Some(0));
}

#[test]
fn invalid_crop_geometry_exits_1_without_output() {
    let dir = tempfile::tempdir().unwrap();
    write_acquisition(&dir.path().join("acq_1.tif"), 0, 1, 4);
    let target = dir.path().join("merged.tif");

    let output = merge_tool(&[
        pattern(dir.path(), "*.tif").as_str(),
        "-c",
        "12x34x5x120",
        "-t",
        target.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!target.exists());
}

#[test]
fn crop_with_three_values_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    write_acquisition(&dir.path().join("acq_1.tif"), 0, 1, 4);
    let target = dir.path().join("merged.tif");

    let output = merge_tool(&[
        pattern(dir.path(), "*.tif").as_str(),
        "--crop",
        "1x2x3",
        "--target",
        target.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!target.exists());
}

#[test]
fn merges_two_files_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    write_acquisition(&dir.path().join("acq_10.tif"), 100, 3, 100);
    write_acquisition(&dir.path().join("acq_2.tif"), 0, 3, 100);
    let target = dir.path().join("merged.tif");

    let output = merge_tool(&[
        pattern(dir.path(), "acq_*.tif").as_str(),
        "-s",
        "-t",
        target.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "merge failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let pages = read_pages(&target);
    assert_eq!(pages.len(), 12);
    assert!(pages.iter().all(|&(w, h, _)| (w, h) == (1024, 100)));

    let firsts: Vec<u16> = pages.iter().map(|&(_, _, v)| v).collect();
    let expected: Vec<u16> = (0..6).chain(100..106).collect();
    assert_eq!(firsts, expected);
}

#[test]
fn split_and_crop_write_two_channel_files() {
    let dir = tempfile::tempdir().unwrap();
    write_acquisition(&dir.path().join("acq_1.tif"), 0, 2, 50);
    let base = dir.path().join("channels");

    let output = merge_tool(&[
        pattern(dir.path(), "*.tif").as_str(),
        "-p",
        "-c",
        "12x4x65x40",
        "-t",
        base.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "merge failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let ch1 = read_pages(&dir.path().join("channels_ch1.tif"));
    let ch2 = read_pages(&dir.path().join("channels_ch2.tif"));
    assert_eq!(ch1, [(53, 36, 0), (53, 36, 2)]);
    assert_eq!(ch2, [(53, 36, 1), (53, 36, 3)]);
}

#[test]
fn crop_outside_channel_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    write_acquisition(&dir.path().join("acq_1.tif"), 0, 1, 10);
    let target = dir.path().join("merged.tif");

    let output = merge_tool(&[
        pattern(dir.path(), "*.tif").as_str(),
        "-c",
        "0x0x1000x20",
        "-t",
        target.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!target.exists());
}

#[test]
fn sort_without_number_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    write_acquisition(&dir.path().join("spool.tif"), 0, 1, 4);
    let target = dir.path().join("out").join("merged.tif");

    let output = merge_tool(&[
        pattern(dir.path(), "*.tif").as_str(),
        "-s",
        "-t",
        target.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!target.exists());
}

#[test]
fn no_matching_files_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("merged.tif");

    let output = merge_tool(&[pattern(dir.path(), "*.tif").as_str(), "-t", target.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!target.exists());
}
