//! Colour cycling.  A frame is the escape-time field shifted by the
//! frame counter, modulo the palette size:
//!
//! ```text
//! index[row][col] = (field[row][col] + frame) mod modulus
//! ```
//!
//! With the modulus equal to the iteration budget, frame `k` and
//! frame `k + modulus` are identical, which is what makes the loop
//! seamless.  Never-escaped points carry the sentinel `modulus`, so
//! they cycle in step with points that escaped on round zero.

use errors::FieldError;
use field::EscapeField;

/// One frame's worth of palette indices, shaped like the field it
/// came from.  Every entry is strictly less than the modulus.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexArray {
    width: usize,
    height: usize,
    modulus: u32,
    data: Vec<u32>,
}

impl IndexArray {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// The palette size these indices address.
    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    /// Palette index at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    /// The raw row-major buffer.
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> ::std::slice::Chunks<u32> {
        self.data.chunks(self.width)
    }
}

fn shift(field: &EscapeField, frame_counter: u64, modulus: u32) -> IndexArray {
    let m = u64::from(modulus);
    let offset = frame_counter % m;
    let data = field
        .as_slice()
        .iter()
        .map(|&v| ((u64::from(v) + offset) % m) as u32)
        .collect();
    IndexArray {
        width: field.width(),
        height: field.height(),
        modulus,
        data,
    }
}

/// Maps a field to the palette indices of frame `frame_counter`.  The
/// counter may grow without bound; only its residue matters.  A
/// modulus of zero is refused.  The field is only read.
pub fn map_frame(field: &EscapeField, frame_counter: u64, modulus: u32) -> Result<IndexArray, FieldError> {
    if modulus == 0 {
        return Err(FieldError::invalid("modulus must be positive"));
    }
    Ok(shift(field, frame_counter, modulus))
}

/// Owns a field and the modulus fixed for its whole animation.
#[derive(Debug, Clone)]
pub struct ColorCycler {
    field: EscapeField,
    modulus: u32,
}

impl ColorCycler {
    /// Validates the modulus once, so that every later frame is
    /// infallible.
    pub fn new(field: EscapeField, modulus: u32) -> Result<Self, FieldError> {
        if modulus == 0 {
            return Err(FieldError::invalid("modulus must be positive"));
        }
        Ok(ColorCycler { field, modulus })
    }

    /// The usual pairing: the palette is as long as the iteration
    /// budget.
    pub fn for_field(field: EscapeField) -> Self {
        let modulus = field.max_iterations();
        ColorCycler { field, modulus }
    }

    /// Number of frames before the animation repeats.
    pub fn period(&self) -> u32 {
        self.modulus
    }

    /// The unshifted field.
    pub fn field(&self) -> &EscapeField {
        &self.field
    }

    /// A freshly allocated index array for frame `frame_counter`.
    pub fn frame(&self, frame_counter: u64) -> IndexArray {
        shift(&self.field, frame_counter, self.modulus)
    }
}
