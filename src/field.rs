// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time field generator.
//!
//! Every point of the grid starts with an orbit value of zero and is
//! "active."  Each round advances the orbit of every active point by
//! one step of `z ← z² + c`, then retires the points whose orbit has
//! just left the circle of radius 2, recording the round number as
//! their escape time.  Retired points are never touched again, so a
//! diverging orbit is frozen at its first value past the bailout and
//! never gets the chance to overflow into infinities or NaNs.
//!
//! Rather than a boolean mask over the whole grid, the active set is
//! kept as a list of offsets that shrinks every round; late rounds,
//! when only the interior of the set is left, then cost only as much
//! as the interior.

use num::Complex;

use errors::FieldError;
use planes::{Pixel, SampleGrid, SamplingRect};

/// Squared bailout radius.  `|z| > 2` iff `|z|² > 4`.
const BAILOUT_SQR: f64 = 4.0;

/// A `height × width` grid of escape times, in row-major order.
/// Entries are in `0..max_iterations` for points that escaped, and
/// exactly `max_iterations` for points that did not.  Immutable once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct EscapeField {
    grid: SampleGrid,
    max_iterations: u32,
    data: Vec<u32>,
}

impl EscapeField {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// The grid the field was sampled on.
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// The iteration budget, which is also the sentinel value.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// `(height, width)`, the way arrays are usually described.
    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    /// Escape time of the sample at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.grid.offset(&Pixel(col, row)).map(|offset| self.data[offset])
    }

    /// True if `value` means "never escaped."
    pub fn is_sentinel(&self, value: u32) -> bool {
        value == self.max_iterations
    }

    /// The number of points that escaped within the budget.
    pub fn escaped_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != self.max_iterations).count()
    }

    /// The raw row-major buffer.
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }
}

/// Computes the escape-time field of the rectangle `rect` sampled at
/// `width × height` points, giving each point at most
/// `max_iterations` rounds.  Any size or budget of zero is refused
/// before any work is done.
pub fn compute_field(
    rect: &SamplingRect,
    width: usize,
    height: usize,
    max_iterations: u32,
) -> Result<EscapeField, FieldError> {
    if max_iterations == 0 {
        return Err(FieldError::invalid("max_iterations must be positive"));
    }
    let grid = SampleGrid::new(width, height, *rect)?;
    Ok(escape_times(&grid, max_iterations))
}

/// The masked iteration itself.  The grid has already been validated.
pub fn escape_times(grid: &SampleGrid, max_iterations: u32) -> EscapeField {
    let samples: Vec<Complex<f64>> = grid.points().collect();
    let mut orbits: Vec<Complex<f64>> = vec![Complex::new(0.0, 0.0); samples.len()];
    let mut escapes: Vec<u32> = vec![max_iterations; samples.len()];
    let mut active: Vec<usize> = (0..samples.len()).collect();

    for i in 0..max_iterations {
        if active.is_empty() {
            break;
        }
        active.retain(|&offset| {
            let z = orbits[offset] * orbits[offset] + samples[offset];
            orbits[offset] = z;
            if z.norm_sqr() > BAILOUT_SQR {
                escapes[offset] = i;
                false
            } else {
                true
            }
        });
        trace!("round {}: {} points still active", i, active.len());
    }

    debug!(
        "escape field {}x{}, budget {}: {} of {} points never escaped",
        grid.width(),
        grid.height(),
        max_iterations,
        active.len(),
        samples.len()
    );

    EscapeField {
        grid: grid.clone(),
        max_iterations,
        data: escapes,
    }
}
