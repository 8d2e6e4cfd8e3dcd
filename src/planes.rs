//! Contains the SampleGrid struct, which describes a relationship
//! between a grid of pixels on the integral plane with an origin at
//! 0,0, and a rectangle on the complex plane.  Unlike a plotting
//! mapper, the grid is inclusive: the first and last pixel of every
//! row and column land exactly on the edges of the rectangle.
use itertools::iproduct;
use num::Complex;

use errors::FieldError;

/// Describes the real bounds of a rectangle on the complex plane,
/// treating the real part as the x-component and the imaginary part
/// as the y-component.  Once built, the bounds are guaranteed to be
/// ordered and non-degenerate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplingRect {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl SamplingRect {
    /// Takes the bounds in `(x_min, x_max, y_min, y_max)` order.
    /// Inverted, degenerate or non-finite bounds are refused.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, FieldError> {
        if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
            return Err(FieldError::invalid("rectangle bounds must be finite"));
        }
        if x_min >= x_max {
            return Err(FieldError::invalid(format!(
                "x_min ({}) is not to the left of x_max ({})",
                x_min, x_max
            )));
        }
        if y_min >= y_max {
            return Err(FieldError::invalid(format!(
                "y_min ({}) is not below y_max ({})",
                y_min, y_max
            )));
        }
        Ok(SamplingRect {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Builds the rectangle from its left-lower and right-upper
    /// corners.
    pub fn from_corners(leftlower: Complex<f64>, rightupper: Complex<f64>) -> Result<Self, FieldError> {
        SamplingRect::new(leftlower.re, rightupper.re, leftlower.im, rightupper.im)
    }

    /// The classic full view of the set.
    pub fn standard() -> Self {
        SamplingRect {
            x_min: -2.0,
            x_max: 0.5,
            y_min: -1.25,
            y_max: 1.25,
        }
    }

    /// Left edge.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Right edge.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Bottom edge.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Top edge.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }
}

/// Describes the column, row of a pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Resolution plus rectangle.  Maps every pixel of a `width × height`
/// grid to the complex sample it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    width: usize,
    height: usize,
    rect: SamplingRect,
    // Distance between neighbouring samples along x and y.
    steps: (f64, f64),
}

/// Longest side of a grid.  Keeps pixel coordinates inside the `u16`
/// and `u32` ranges that terminals and image buffers address.
pub const MAX_SIDE: usize = ::std::u16::MAX as usize;

/// Most samples in one grid.  Each sample costs about 44 bytes of
/// working state while the field is computed.
pub const MAX_SAMPLES: usize = 1 << 24;

/// One sample per pixel spaced over `[lo, hi]`, endpoints included.
/// A single sample sits on `lo`.
fn step(lo: f64, hi: f64, samples: usize) -> f64 {
    if samples > 1 {
        (hi - lo) / ((samples - 1) as f64)
    } else {
        0.0
    }
}

impl SampleGrid {
    /// Constructor.  Both dimensions must be positive, no side may
    /// exceed `MAX_SIDE`, and the grid may hold at most `MAX_SAMPLES`
    /// points.
    pub fn new(width: usize, height: usize, rect: SamplingRect) -> Result<SampleGrid, FieldError> {
        if width == 0 {
            return Err(FieldError::invalid("width must be positive"));
        }
        if height == 0 {
            return Err(FieldError::invalid("height must be positive"));
        }
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(FieldError::invalid(format!(
                "grid {}x{} has a side longer than {}",
                width, height, MAX_SIDE
            )));
        }
        match width.checked_mul(height) {
            Some(len) if len <= MAX_SAMPLES => {}
            _ => {
                return Err(FieldError::invalid(format!(
                    "grid {}x{} holds more than {} samples",
                    width, height, MAX_SAMPLES
                )))
            }
        }
        Ok(SampleGrid {
            width,
            height,
            rect,
            steps: (
                step(rect.x_min, rect.x_max, width),
                step(rect.y_min, rect.y_max, height),
            ),
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The rectangle being sampled.
    pub fn rect(&self) -> &SamplingRect {
        &self.rect
    }

    /// The total number of points in the grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// A validated grid is never empty; present for symmetry with
    /// `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Given a pixel, return the complex number it samples.  Row zero
    /// is `y_min`, column zero is `x_min`.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.rect.x_min + (pixel.0 as f64) * self.steps.0,
            self.rect.y_min + (pixel.1 as f64) * self.steps.1,
        )
    }

    /// Row-major offset of a pixel into a `height × width` buffer, or
    /// `None` when the pixel lies outside the grid.
    pub fn offset(&self, pixel: &Pixel) -> Option<usize> {
        if pixel.0 >= self.width || pixel.1 >= self.height {
            return None;
        }
        Some(pixel.1 * self.width + pixel.0)
    }

    /// Every sample in row-major order, one per pixel.
    pub fn points<'a>(&'a self) -> impl Iterator<Item = Complex<f64>> + 'a {
        iproduct!(0..self.height, 0..self.width)
            .map(move |(row, column)| self.pixel_to_point(&Pixel(column, row)))
    }
}
