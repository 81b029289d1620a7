//! Transform behaviour on whole images, including header bookkeeping.

use bmpfx::*;

fn px(r: u8, g: u8, b: u8) -> Pixel {
    Pixel::new(r, g, b, 255)
}

fn noise_pattern(w: usize, h: usize) -> PixelGrid {
    let mut state: u32 = 0x1357_9BDF;
    let pixels = (0..w * h)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, _] = state.to_le_bytes();
            px(r, g, b)
        })
        .collect();
    PixelGrid::from_pixels(w, h, pixels).unwrap()
}

fn quad() -> BmpImage {
    let grid = PixelGrid::from_rows(&[
        [px(255, 0, 0), px(0, 255, 0)],
        [px(0, 0, 255), px(255, 255, 0)],
    ])
    .unwrap();
    BmpImage::new(grid, BitDepth::Bgr24).unwrap()
}

// ── Geometry ─────────────────────────────────────────────────────────

#[test]
fn flip_two_by_two() {
    let mut image = quad();
    image.flip_horizontal();
    assert_eq!(image.pixel(0, 0).unwrap(), px(0, 255, 0));
    assert_eq!(image.pixel(1, 0).unwrap(), px(255, 0, 0));
    assert_eq!(image.pixel(0, 1).unwrap(), px(255, 255, 0));
    assert_eq!(image.pixel(1, 1).unwrap(), px(0, 0, 255));

    let decoded = BmpImage::decode(&image.encode().unwrap()).unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn flip_twice_is_identity() {
    for (w, h) in [(1, 1), (2, 3), (7, 4), (16, 9)] {
        let grid = noise_pattern(w, h);
        let mut image = BmpImage::new(grid.clone(), BitDepth::Bgr24).unwrap();
        image.flip_horizontal();
        image.flip_horizontal();
        assert_eq!(image.grid(), &grid);
    }
}

#[test]
fn resize_two_by_two_keeps_corners() {
    let mut image = quad();
    image.resize(2.0, true, false).unwrap();
    assert_eq!((image.width(), image.height()), (4, 4));
    assert_eq!(image.pixel(0, 0).unwrap(), px(255, 0, 0));
    assert_eq!(image.pixel(3, 0).unwrap(), px(0, 255, 0));
    assert_eq!(image.pixel(0, 3).unwrap(), px(0, 0, 255));
    assert_eq!(image.pixel(3, 3).unwrap(), px(255, 255, 0));
}

#[test]
fn resize_updates_headers() {
    let mut image = quad();
    image.resize(2.0, true, false).unwrap();
    assert_eq!(image.info_header().width, 4);
    assert_eq!(image.info_header().height, 4);
    // 4 px * 3 bytes = 12, already aligned.
    assert_eq!(image.info_header().image_size, 48);
    assert_eq!(image.file_header().size, 54 + 48);

    let encoded = image.encode().unwrap();
    assert_eq!(encoded.len(), 102);
    assert_eq!(BmpImage::decode(&encoded).unwrap(), image);
}

#[test]
fn resize_keeps_top_down_order() {
    let mut image = quad();
    let mut raw = image.encode().unwrap();
    raw[22..26].copy_from_slice(&(-2i32).to_le_bytes());
    image = BmpImage::decode(&raw).unwrap();
    image.resize(3.0, true, false).unwrap();
    assert_eq!(image.info_header().height, -6);
    assert!(!image.info_header().is_bottom_up());
}

#[test]
fn resize_down_with_crop() {
    let mut image = BmpImage::new(noise_pattern(18, 10), BitDepth::Bgr24).unwrap();
    image.resize(2.0, false, true).unwrap();
    // 9 → 8 after cropping to a multiple of 4.
    assert_eq!((image.width(), image.height()), (8, 5));
}

#[test]
fn failed_resize_leaves_image_alone() {
    let mut image = quad();
    let before = image.clone();
    assert!(matches!(
        image.resize(-1.0, true, false),
        Err(BmpError::InvalidParameter(_))
    ));
    assert!(image.resize(4.0, false, false).is_err());
    assert_eq!(image, before);
}

#[test]
fn resize_too_large_for_a_header() {
    let mut image = quad();
    let before = image.clone();
    assert!(matches!(
        image.resize(1e9, true, false),
        Err(BmpError::DimensionsTooLarge { .. })
    ));
    assert_eq!(image, before);
}

// ── Tone ─────────────────────────────────────────────────────────────

#[test]
fn quantize_one_bit() {
    let grid = PixelGrid::from_rows(&[[px(200, 50, 255), px(0, 127, 128)]]).unwrap();
    let mut image = BmpImage::new(grid, BitDepth::Bgr24).unwrap();
    image.quantize(1).unwrap();
    assert_eq!(image.pixel(0, 0).unwrap(), px(127, 0, 127));
    assert_eq!(image.pixel(1, 0).unwrap(), px(0, 0, 127));
}

#[test]
fn quantize_touches_alpha_only_for_32_bit() {
    let grid = PixelGrid::new(2, 2, Pixel::new(200, 200, 200, 200)).unwrap();
    let mut rgb = BmpImage::new(grid.clone(), BitDepth::Bgr24).unwrap();
    rgb.quantize(1).unwrap();
    assert_eq!(rgb.pixel(0, 0).unwrap().a, 200);

    let mut rgba = BmpImage::new(grid, BitDepth::Bgra32).unwrap();
    rgba.quantize(1).unwrap();
    assert_eq!(rgba.pixel(0, 0).unwrap(), Pixel::new(127, 127, 127, 127));
}

#[test]
fn quantize_eight_is_identity() {
    let grid = noise_pattern(9, 9);
    let mut image = BmpImage::new(grid.clone(), BitDepth::Bgra32).unwrap();
    image.quantize(8).unwrap();
    assert_eq!(image.grid(), &grid);
}

#[test]
fn white_balance_grays_out_a_cast() {
    let grid = PixelGrid::from_rows(&[
        [px(200, 100, 50), px(100, 50, 25)],
        [px(200, 100, 50), px(100, 50, 25)],
    ])
    .unwrap();
    let mut image = BmpImage::new(grid, BitDepth::Bgr24).unwrap();
    image.white_balance();
    for p in image.grid().pixels() {
        assert_eq!(p.r, p.g);
        assert_eq!(p.g, p.b);
    }
}

#[test]
fn hsi_identity_adjustments_barely_move() {
    let grid = noise_pattern(12, 12);
    let mut image = BmpImage::new(grid.clone(), BitDepth::Bgr24).unwrap();
    image.adjust_hue(0.0).unwrap();
    image.adjust_saturation(1.0).unwrap();
    image.adjust_intensity(1.0).unwrap();
    let psnr = metrics::psnr(&grid, image.grid()).unwrap();
    assert!(psnr > 30.0, "psnr {psnr}");
}

// ── Filters ──────────────────────────────────────────────────────────

#[test]
fn gaussian_on_constant_field() {
    for (size, sigma) in [(3, 1.0), (5, 0.5), (7, 3.0), (9, 10.0)] {
        let grid = PixelGrid::new(10, 7, Pixel::new(200, 13, 97, 255)).unwrap();
        let mut image = BmpImage::new(grid, BitDepth::Bgr24).unwrap();
        image.gaussian_smooth(size, sigma).unwrap();
        for p in image.grid().pixels() {
            assert!(p.r.abs_diff(200) <= 1, "size {size} sigma {sigma}: {p:?}");
            assert!(p.g.abs_diff(13) <= 1);
            assert!(p.b.abs_diff(97) <= 1);
        }
    }
}

#[test]
fn gaussian_rejects_even_size() {
    let mut image = quad();
    assert!(matches!(
        image.gaussian_smooth(4, 1.0),
        Err(BmpError::InvalidParameter(_))
    ));
}

#[test]
fn sharpen_on_constant_field_is_identity() {
    let grid = PixelGrid::new(6, 5, px(77, 150, 3)).unwrap();
    for sharpness in [0.0, 0.5, 3.0, -2.0, 100.0] {
        let mut image = BmpImage::new(grid.clone(), BitDepth::Bgr24).unwrap();
        image.sharpen(sharpness).unwrap();
        assert_eq!(image.grid(), &grid, "sharpness {sharpness}");
    }
}

#[test]
fn kernel_edge_larger_than_image() {
    // Edge 4 on a 2x2 image folds the reflection repeatedly.
    let mut image = quad();
    image.gaussian_smooth(9, 2.0).unwrap();
    assert_eq!((image.width(), image.height()), (2, 2));
}

// ── Mirror padding ───────────────────────────────────────────────────

#[test]
fn mirror_pad_symmetry() {
    let grid = noise_pattern(7, 5);
    for edge in 1..=4 {
        let padded = mirror_pad(&grid, edge).unwrap();
        assert_eq!(padded.width(), 7 + 2 * edge);
        assert_eq!(padded.height(), 5 + 2 * edge);
        for k in 0..edge {
            assert_eq!(padded.row(edge - 1 - k), padded.row(edge + 1 + k));
            let bottom = edge + 4;
            assert_eq!(padded.row(bottom + 1 + k), padded.row(bottom - 1 - k));
            for y in 0..padded.height() {
                let right = edge + 6;
                assert_eq!(
                    padded.get(edge - 1 - k, y).unwrap(),
                    padded.get(edge + 1 + k, y).unwrap()
                );
                assert_eq!(
                    padded.get(right + 1 + k, y).unwrap(),
                    padded.get(right - 1 - k, y).unwrap()
                );
            }
        }
    }
}

#[test]
fn mirror_pad_image_grows_and_updates_headers() {
    let mut image = quad();
    image.mirror_pad(1).unwrap();
    assert_eq!((image.width(), image.height()), (4, 4));
    assert_eq!(image.info_header().width, 4);
    assert_eq!(image.info_header().height, 4);
    assert_eq!(image.file_header().size, 54 + 48);
    // Centre is the original picture.
    assert_eq!(image.pixel(1, 1).unwrap(), px(255, 0, 0));
    assert_eq!(image.pixel(2, 2).unwrap(), px(255, 255, 0));
    // Corner mirrors across both axes without repeating the border.
    assert_eq!(image.pixel(0, 0).unwrap(), px(255, 255, 0));
}

#[test]
fn mirror_pad_too_large_for_a_header() {
    let grid = PixelGrid::new(1, 1, px(9, 9, 9)).unwrap();
    let mut image = BmpImage::new(grid, BitDepth::Bgr24).unwrap();
    let before = image.clone();
    for edge in [usize::MAX / 4, usize::MAX] {
        assert!(
            matches!(
                image.mirror_pad(edge),
                Err(BmpError::DimensionsTooLarge { .. })
            ),
            "edge {edge}"
        );
    }
    assert_eq!(image, before);
}
