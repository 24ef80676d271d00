#![allow(clippy::unwrap_used)]

use edict::{
    Assets, Generator, RenderState, TextStyle,
    export::{self, DEFAULT_FILE_NAME},
    image::{Rgba, RgbaImage, imageops},
    text::{SingleColumnConfig, TwoColumnConfig},
    typeface::BlockTypeface,
};

fn assets() -> Assets {
    let base = RgbaImage::from_fn(600, 500, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 200, 255])
    });
    let overlay = RgbaImage::from_fn(600, 500, |x, _| {
        if x < 100 {
            Rgba([10, 10, 10, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    Assets::new(base, overlay)
}

fn generator(two_columns: bool) -> Generator {
    let fitter = if two_columns {
        TwoColumnConfig::EXECUTIVE_ORDER.into()
    } else {
        SingleColumnConfig::EXECUTIVE_ORDER.into()
    };
    let generator = Generator::new(fitter, TextStyle::default());
    generator.set_typeface(BlockTypeface::default());
    generator
}

#[test]
fn empty_text_leaves_base_and_overlay_only() {
    let assets = assets();
    let frame = generator(true).render(&assets, "").unwrap();

    assert_eq!(frame.outcome.attempt.lines().count(), 0);

    let mut expected = assets.base.clone();
    imageops::overlay(&mut expected, &assets.overlay, 0, 0);
    assert_eq!(frame.image, expected);
}

#[test]
fn overflow_lands_in_second_column() {
    let assets = assets();
    // "abcd efgh" fills a 170px line at 36px; three lines fit the first column
    let text = vec!["abcd efgh"; 4].join(" ");
    let frame = generator(true).render(&assets, &text).unwrap();

    let attempt = &frame.outcome.attempt;
    assert!(attempt.fits());
    assert_eq!(attempt.font_size, 36);
    assert_eq!(attempt.columns[0].lines.len(), 3);
    assert_eq!(attempt.columns[1].lines.len(), 1);

    let second = &attempt.columns[1].lines[0];
    assert!((second.x - 373.3).abs() < 1e-3);
    assert_eq!(second.y, 160.0);

    let black_right = frame
        .image
        .enumerate_pixels()
        .filter(|(x, _, p)| *x > 360 && p.0 == [0, 0, 0, 255])
        .count();
    assert!(black_right > 0);
}

#[test]
fn single_column_keeps_overflow_out_of_second_area() {
    let assets = assets();
    let text = vec!["abcd efgh"; 4].join(" ");
    let frame = generator(false).render(&assets, &text).unwrap();

    assert!(frame.outcome.fits());
    assert_eq!(frame.outcome.attempt.columns.len(), 1);

    let black_right = frame
        .image
        .enumerate_pixels()
        .filter(|(x, _, p)| *x > 360 && p.0 == [0, 0, 0, 255])
        .count();
    assert_eq!(black_right, 0);
}

#[test]
fn overlay_covers_text() {
    let assets = assets();
    let frame = generator(true).render(&assets, "covered").unwrap();
    assert!(frame.image.enumerate_pixels().all(|(x, _, p)| x >= 100 || p.0 == [10, 10, 10, 255]));
}

#[test]
fn text_changes_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let generator = generator(true);
    let mut state = RenderState::new();

    assert!(state.export_in(dir.path()).unwrap().is_none());

    state.images_loaded(assets(), &generator);
    let blank = state.frame().unwrap().image.clone();

    state.set_text("By the authority vested in me", &generator);
    let written = state.export_in(dir.path()).unwrap().unwrap();
    assert_eq!(written, dir.path().join(DEFAULT_FILE_NAME));

    let saved = edict::image::open(&written).unwrap().to_rgba8();
    assert_ne!(saved, blank);
    assert_eq!(saved, state.frame().unwrap().image);

    let bytes = export::encode_png(&saved).unwrap();
    assert_eq!(std::fs::read(&written).unwrap(), bytes);
}
