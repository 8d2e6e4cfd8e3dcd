#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot colour-cycle renderer
//!
//! The Mandelbrot set is the collection of points on the complex
//! plane whose orbit under `z ← z² + c`, starting from zero, never
//! runs off to infinity.  For every point that does run away we
//! record how many iterations it took before its magnitude passed 2;
//! that count is the point's "escape time," and the grid of escape
//! times over a rectangle of the complex plane is the escape-time
//! field.  Points that never escape within the iteration budget are
//! given the budget itself as a sentinel.
//!
//! The field is computed exactly once.  After that, every frame of
//! the animation is the same field with a frame counter added to each
//! escape time, taken modulo the palette size.  Since the modulus is
//! the iteration budget, the animation loops seamlessly: frame
//! `modulus` is identical to frame zero.
//!
//! Drawing is somebody else's problem.  Anything that implements
//! [`Renderer`](render/trait.Renderer.html) can receive the frames; the
//! crate ships an in-memory frame buffer and a truecolor terminal
//! renderer.

extern crate crossterm;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate clap;
extern crate num;
#[cfg(test)]
extern crate rand;

pub mod animate;
pub mod config;
pub mod cycle;
pub mod errors;
pub mod field;
pub mod palette;
pub mod planes;
pub mod render;

pub use animate::{Animator, Frames};
pub use config::Config;
pub use cycle::{map_frame, ColorCycler, IndexArray};
pub use errors::FieldError;
pub use field::{compute_field, EscapeField};
pub use palette::{colorize, Palette, PaletteName};
pub use planes::{Pixel, SampleGrid, SamplingRect};
pub use render::{Control, FrameBuffer, Renderer, TerminalRenderer};
