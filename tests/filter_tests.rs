//! Integration tests for convolution filtering
//!
//! Covers the reference scenarios for `apply_filter`, `convolve_2d`,
//! `convolve_3d` and the predefined kernels, plus the validation taxonomy.

use approx::assert_abs_diff_eq;
use picture_kit::filter::{build_kernel, build_kernel_named, convolve_2d, convolve_3d};
use picture_kit::{Buffer, Error, FilterOptions, KernelKind, Plane, apply_filter, apply_filter_with};

#[rustfmt::skip]
const ONES_2X2_ON_5X5: [f64; 16] = [
    0.0, 0.05555556, 0.11111111, 0.16666667,
    0.27777778, 0.33333333, 0.38888889, 0.44444444,
    0.55555556, 0.61111111, 0.66666667, 0.72222222,
    0.83333333, 0.88888889, 0.94444444, 1.0,
];

#[rustfmt::skip]
const BLUR_3X3_ON_5X5: [f64; 9] = [
    0.0, 0.08333333, 0.16666667,
    0.41666667, 0.5, 0.58333333,
    0.83333333, 0.91666667, 1.0,
];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sequential(shape: &[usize]) -> Buffer {
    let len: usize = shape.iter().product();
    Buffer::new(shape, (1..=len).map(|v| v as f64).collect()).unwrap()
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (got, want) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(*got, *want, epsilon = 1e-7);
    }
}

fn assert_channels_close(buffer: &Buffer, expected: &[f64]) {
    for c in 0..3 {
        assert_close(buffer.channel(c).unwrap().data(), expected);
    }
}

// ============================================================================
// Error taxonomy
// ============================================================================

#[test]
fn test_exceptions() {
    init_logger();
    let image = sequential(&[5, 5]);
    assert!(matches!(
        apply_filter(&image, "invalid_type", 3, None),
        Err(Error::InvalidFilterType(_))
    ));

    assert!(matches!(
        apply_filter(&Buffer::zeros(&[4, 4, 3, 1]), "blur", 3, None),
        Err(Error::InvalidImageDimension(_))
    ));
    assert!(matches!(
        apply_filter(&Buffer::zeros(&[4, 4, 4]), "blur", 3, None),
        Err(Error::InvalidImageDimension(_))
    ));

    let kernel = Buffer::filled(&[2, 2, 3, 1], 0.5);
    assert!(matches!(
        apply_filter(&image, "custom", 3, Some(&kernel)),
        Err(Error::InvalidFilterDimension(_))
    ));
    let kernel = Buffer::filled(&[21, 21, 4], 0.5);
    assert!(matches!(
        apply_filter(&image, "custom", 3, Some(&kernel)),
        Err(Error::InvalidFilterDimension(_))
    ));

    let image = Buffer::filled(&[17, 17, 3], 0.25);
    let kernel = Buffer::filled(&[21, 21, 3], 0.5);
    assert!(matches!(
        apply_filter(&image, "custom", 3, Some(&kernel)),
        Err(Error::InvalidImageDimension(_))
    ));

    assert!(matches!(
        build_kernel_named("Invalid", 7),
        Err(Error::InvalidKernelKind(_))
    ));
}

#[test]
fn test_filter_size_must_be_smaller_than_image() {
    let image = sequential(&[5, 5]);
    assert!(matches!(
        apply_filter(&image, "sharpen", 5, None),
        Err(Error::InvalidImageDimension(_))
    ));
    assert!(apply_filter(&image, "sharpen", 4, None).is_ok());
}

// ============================================================================
// convolve_2d / convolve_3d
// ============================================================================

#[test]
fn test_convolve_2d() {
    let image = Plane::from_fn(5, 5, |x, y| (y * 5 + x + 1) as f64);
    let kernel = Plane::filled(2, 2, 1.0);
    let out = convolve_2d(&image, &kernel).unwrap();
    assert_eq!((out.height(), out.width()), (4, 4));
    assert_close(out.data(), &ONES_2X2_ON_5X5);

    let out = convolve_2d(&Plane::filled(5, 5, 1.0), &kernel).unwrap();
    assert_eq!((out.height(), out.width()), (4, 4));
    assert_close(out.data(), &[4.0; 16]);
}

#[test]
fn test_convolve_3d() {
    let out = convolve_3d(&sequential(&[5, 5, 3]), &Buffer::filled(&[2, 2, 3], 1.0)).unwrap();
    assert_eq!(out.shape(), &[4, 4, 3]);
    assert_channels_close(&out, &ONES_2X2_ON_5X5);
}

#[test]
fn test_output_range() {
    let image = Plane::from_fn(9, 7, |x, y| ((x * 31 + y * 17) % 11) as f64 - 5.0);
    let kernel = Plane::from_vec(3, 3, vec![0.5, -1.0, 2.0, 0.0, 1.0, -0.25, 3.0, 0.0, -2.0]).unwrap();
    let out = convolve_2d(&image, &kernel).unwrap();
    assert_eq!((out.height(), out.width()), (5, 7));
    assert!(out.data().iter().all(|v| (0.0..=1.0).contains(v)));
    let (lo, hi) = out.min_max().unwrap();
    assert_eq!((lo, hi), (0.0, 1.0));
}

// ============================================================================
// Predefined kernels
// ============================================================================

#[test]
fn test_build_filter() {
    let blur = build_kernel(KernelKind::Blur, 3);
    assert_eq!(blur.shape(), &[3, 3]);
    assert_close(blur.data(), &[0.01; 9]);

    #[rustfmt::skip]
    let expected_sharpen = [
         0.0,  0.0,  0.0, -1.0,  0.0,  0.0,  0.0,
         0.0,  0.0, -1.0, -1.0, -1.0,  0.0,  0.0,
         0.0, -1.0, -1.0, -1.0, -1.0, -1.0,  0.0,
        -1.0, -1.0, -1.0,  5.0, -1.0, -1.0, -1.0,
         0.0, -1.0, -1.0, -1.0, -1.0, -1.0,  0.0,
         0.0,  0.0, -1.0, -1.0, -1.0,  0.0,  0.0,
         0.0,  0.0,  0.0, -1.0,  0.0,  0.0,  0.0,
    ];
    assert_close(build_kernel(KernelKind::Sharpen, 7).data(), &expected_sharpen);
}

// ============================================================================
// apply_filter
// ============================================================================

#[test]
fn test_apply_filter_gray() {
    init_logger();
    let image = sequential(&[5, 5]);

    let kernel = Buffer::filled(&[2, 2], 1.0);
    let out = apply_filter(&image, "custom", 3, Some(&kernel)).unwrap();
    assert_eq!(out.shape(), &[4, 4]);
    assert_close(out.data(), &ONES_2X2_ON_5X5);

    let kernel = Buffer::filled(&[2, 2, 3], 1.0);
    let out = apply_filter(&image, "custom", 3, Some(&kernel)).unwrap();
    assert_eq!(out.shape(), &[4, 4]);
    assert_close(out.data(), &ONES_2X2_ON_5X5);

    let out = apply_filter(&image, "blur", 3, None).unwrap();
    assert_eq!(out.shape(), &[3, 3]);
    assert_close(out.data(), &BLUR_3X3_ON_5X5);
}

#[test]
fn test_apply_filter_rgb() {
    init_logger();
    let image = sequential(&[5, 5, 3]);

    let kernel = Buffer::filled(&[2, 2, 3], 1.0);
    let out = apply_filter(&image, "custom", 3, Some(&kernel)).unwrap();
    assert_eq!(out.shape(), &[4, 4, 3]);
    assert_channels_close(&out, &ONES_2X2_ON_5X5);

    let kernel = Buffer::filled(&[2, 2], 1.0);
    let out = apply_filter(&image, "custom", 3, Some(&kernel)).unwrap();
    assert_eq!(out.shape(), &[4, 4, 3]);
    assert_channels_close(&out, &ONES_2X2_ON_5X5);

    let out = apply_filter_with(&image, &FilterOptions::default()).unwrap();
    assert_eq!(out.shape(), &[3, 3, 3]);
    assert_channels_close(&out, &BLUR_3X3_ON_5X5);
}

#[test]
fn test_sharpen_on_flat_image_stays_constant() {
    // Sharpen weights sum to 5 - 12 = -7 for size 5; a flat image yields a flat output
    let image = Buffer::filled(&[8, 8], 2.0);
    let out = apply_filter(&image, "sharpen", 5, None).unwrap();
    assert_eq!(out.shape(), &[4, 4]);
    assert!(out.data().iter().all(|&v| v == out.data()[0]));
    assert_abs_diff_eq!(out.data()[0], -14.0, epsilon = 1e-12);
}

#[test]
fn test_input_is_untouched() {
    let image = sequential(&[6, 6, 3]);
    let before = image.clone();
    let _ = apply_filter(&image, "sharpen", 3, None).unwrap();
    assert_eq!(image, before);
}
