//! # Transform Module
//!
//! The obscuring strategies applied to detected face regions.
//!
//! Both strategies are stateless given their parameters and must return
//! a region with exactly the input's width and height - the obscurer
//! pastes the result back at the detected coordinates, so a size change
//! would corrupt the surrounding image.

use image::imageops::{self, FilterType};
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Which obscuring strategy to use, selected once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformKind {
    /// Gaussian blur - smooth, strength set by kernel size
    Blur,
    /// Pixelation - blocky mosaic, strength set by grid size
    Pixelate,
}

impl TransformKind {
    /// Build the concrete transform for this kind.
    ///
    /// `blur_strength` feeds the blur variant, `pixel_size` the pixelate
    /// variant; each variant ignores the other parameter.
    pub fn build(self, blur_strength: u32, pixel_size: u32) -> Box<dyn FaceTransform> {
        match self {
            TransformKind::Blur => Box::new(GaussianBlur::new(blur_strength)),
            TransformKind::Pixelate => Box::new(Pixelate::new(pixel_size)),
        }
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformKind::Blur => write!(f, "blur"),
            TransformKind::Pixelate => write!(f, "pixelate"),
        }
    }
}

/// A stateless pixel transform applied to one face region
pub trait FaceTransform: Send + Sync {
    /// Obscure `region`, returning a buffer of identical dimensions.
    fn apply(&self, region: &RgbImage) -> RgbImage;
}

/// Gaussian blur over the face region
///
/// Parameterized by kernel size: larger kernels blur harder. A Gaussian
/// kernel must have odd dimensions, so even configured values are bumped
/// to the next odd value.
pub struct GaussianBlur {
    kernel: u32,
}

impl GaussianBlur {
    /// Default kernel size, strong enough to defeat casual recognition
    /// against face regions tens to hundreds of pixels wide.
    pub const DEFAULT_KERNEL: u32 = 55;

    /// Create a blur with the given kernel size.
    ///
    /// Zero is treated as 1; even values are normalized to `k + 1`.
    pub fn new(kernel: u32) -> Self {
        Self {
            kernel: normalize_kernel(kernel),
        }
    }

    /// The effective (odd) kernel size.
    pub fn kernel(&self) -> u32 {
        self.kernel
    }

    /// Standard deviation matching the kernel: the usual three-sigma
    /// support on either side of center.
    fn sigma(&self) -> f32 {
        self.kernel as f32 / 6.0
    }
}

impl Default for GaussianBlur {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KERNEL)
    }
}

impl FaceTransform for GaussianBlur {
    fn apply(&self, region: &RgbImage) -> RgbImage {
        imageops::blur(region, self.sigma())
    }
}

/// Normalize a kernel size to an odd positive value.
///
/// Even inputs become `k + 1`; odd inputs pass through; zero becomes 1.
pub fn normalize_kernel(kernel: u32) -> u32 {
    let kernel = kernel.max(1);
    if kernel % 2 == 0 {
        kernel + 1
    } else {
        kernel
    }
}

/// Pixelation (mosaic) over the face region
///
/// Downsamples to a `grid x grid` intermediate with linear filtering,
/// then scales back up with nearest-neighbor. The filter pairing is
/// load-bearing: linear down averages each block, nearest up keeps the
/// block edges hard.
pub struct Pixelate {
    grid: u32,
}

impl Pixelate {
    /// Default intermediate grid size. Smaller = stronger pixelation.
    pub const DEFAULT_GRID: u32 = 8;

    /// Create a pixelation with the given grid size (minimum 1).
    pub fn new(grid: u32) -> Self {
        Self { grid: grid.max(1) }
    }

    /// The effective grid size.
    pub fn grid(&self) -> u32 {
        self.grid
    }
}

impl Default for Pixelate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GRID)
    }
}

impl FaceTransform for Pixelate {
    fn apply(&self, region: &RgbImage) -> RgbImage {
        let (width, height) = region.dimensions();
        let small = imageops::resize(region, self.grid, self.grid, FilterType::Triangle);
        imageops::resize(&small, width, height, FilterType::Nearest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn uniform_region(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    fn gradient_region(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    fn variance(region: &RgbImage) -> f64 {
        let values: Vec<f64> = region.pixels().map(|p| f64::from(p[0])).collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
    }

    #[test]
    fn odd_kernel_is_unchanged() {
        for kernel in [1, 3, 51, 99] {
            assert_eq!(normalize_kernel(kernel), kernel);
        }
    }

    #[test]
    fn even_kernel_is_bumped_to_next_odd() {
        for kernel in [2, 4, 50, 98] {
            assert_eq!(normalize_kernel(kernel), kernel + 1);
        }
    }

    #[test]
    fn zero_kernel_becomes_one() {
        assert_eq!(normalize_kernel(0), 1);
        assert_eq!(GaussianBlur::new(0).kernel(), 1);
    }

    #[test]
    fn blur_preserves_dimensions() {
        let region = gradient_region(64, 80);
        let blurred = GaussianBlur::default().apply(&region);
        assert_eq!(blurred.dimensions(), (64, 80));
    }

    #[test]
    fn blur_reduces_variance() {
        let region = gradient_region(64, 64);
        let blurred = GaussianBlur::new(51).apply(&region);
        assert!(variance(&blurred) < variance(&region));
    }

    #[test]
    fn pixelate_preserves_dimensions() {
        let region = gradient_region(57, 43);
        let pixelated = Pixelate::default().apply(&region);
        assert_eq!(pixelated.dimensions(), (57, 43));
    }

    #[test]
    fn pixelate_of_uniform_color_is_identity() {
        let region = uniform_region(40, 40, [120, 30, 200]);
        let pixelated = Pixelate::new(6).apply(&region);
        assert_eq!(pixelated, region);
    }

    #[test]
    fn pixelate_produces_blocks() {
        // With a 4x4 grid over a 32x32 region, each 8x8 block must be a
        // single color
        let region = gradient_region(32, 32);
        let pixelated = Pixelate::new(4).apply(&region);

        for block_y in 0..4 {
            for block_x in 0..4 {
                let anchor = pixelated.get_pixel(block_x * 8, block_y * 8);
                for dy in 0..8 {
                    for dx in 0..8 {
                        assert_eq!(pixelated.get_pixel(block_x * 8 + dx, block_y * 8 + dy), anchor);
                    }
                }
            }
        }
    }

    #[test]
    fn transform_kind_builds_matching_variant() {
        let blur = TransformKind::Blur.build(50, 8);
        let pixelate = TransformKind::Pixelate.build(50, 8);

        let region = gradient_region(24, 24);
        assert_eq!(blur.apply(&region).dimensions(), (24, 24));
        assert_eq!(pixelate.apply(&region).dimensions(), (24, 24));
    }
}
