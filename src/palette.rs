//! Discrete colour tables.  A palette is a gradient, described by a
//! handful of stops, sampled at as many evenly spaced points as the
//! animation has palette indices.  The gradients approximate the
//! matplotlib maps of the same names.

use image::{ImageBuffer, Rgb, RgbImage};
use std::fmt;
use std::str::FromStr;

use cycle::IndexArray;
use errors::FieldError;

#[derive(Clone, Copy, Debug)]
struct Stop {
    position: f64,
    rgb: [u8; 3],
}

const INFERNO: [Stop; 6] = [
    Stop { position: 0.0, rgb: [0, 0, 4] },
    Stop { position: 0.2, rgb: [66, 10, 104] },
    Stop { position: 0.4, rgb: [147, 38, 103] },
    Stop { position: 0.6, rgb: [221, 81, 58] },
    Stop { position: 0.8, rgb: [252, 165, 10] },
    Stop { position: 1.0, rgb: [252, 255, 164] },
];

const MAGMA: [Stop; 5] = [
    Stop { position: 0.0, rgb: [0, 0, 4] },
    Stop { position: 0.25, rgb: [81, 18, 124] },
    Stop { position: 0.5, rgb: [183, 55, 121] },
    Stop { position: 0.75, rgb: [252, 137, 97] },
    Stop { position: 1.0, rgb: [252, 253, 191] },
];

// Cyclic: both ends are the same colour, so the wrap from the last
// index to the first is invisible.
const TWILIGHT_SHIFTED: [Stop; 5] = [
    Stop { position: 0.0, rgb: [47, 20, 54] },
    Stop { position: 0.25, rgb: [86, 112, 180] },
    Stop { position: 0.5, rgb: [226, 217, 226] },
    Stop { position: 0.75, rgb: [173, 77, 62] },
    Stop { position: 1.0, rgb: [47, 20, 54] },
];

const GRAYSCALE: [Stop; 2] = [
    Stop { position: 0.0, rgb: [0, 0, 0] },
    Stop { position: 1.0, rgb: [255, 255, 255] },
];

/// The named gradients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaletteName {
    /// Black through purple and orange to pale yellow.
    Inferno,
    /// Black through purple and salmon to pale cream.
    Magma,
    /// Dark purple, blue, white, red and back to dark purple.
    TwilightShifted,
    /// Black to white.
    Grayscale,
}

impl PaletteName {
    /// Every name accepted by `from_str`.
    pub const ALL: [&'static str; 4] = ["inferno", "magma", "twilight_shifted", "grayscale"];

    fn stops(self) -> &'static [Stop] {
        match self {
            PaletteName::Inferno => &INFERNO,
            PaletteName::Magma => &MAGMA,
            PaletteName::TwilightShifted => &TWILIGHT_SHIFTED,
            PaletteName::Grayscale => &GRAYSCALE,
        }
    }
}

impl FromStr for PaletteName {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inferno" => Ok(PaletteName::Inferno),
            "magma" => Ok(PaletteName::Magma),
            "twilight_shifted" => Ok(PaletteName::TwilightShifted),
            "grayscale" => Ok(PaletteName::Grayscale),
            _ => Err(FieldError::invalid(format!("unknown palette '{}'", s))),
        }
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            PaletteName::Inferno => "inferno",
            PaletteName::Magma => "magma",
            PaletteName::TwilightShifted => "twilight_shifted",
            PaletteName::Grayscale => "grayscale",
        };
        write!(f, "{}", name)
    }
}

fn interpolate(stops: &[Stop], t: f64) -> Rgb<u8> {
    let t = t.max(0.0).min(1.0);
    let first = stops[0];
    if t <= first.position {
        return Rgb(first.rgb);
    }
    for w in stops.windows(2) {
        let (a, b) = (w[0], w[1]);
        if t <= b.position {
            let factor = (t - a.position) / (b.position - a.position);
            let lerp = |u: u8, v: u8| -> u8 {
                let (u, v) = (f64::from(u), f64::from(v));
                (u + factor * (v - u)).round().max(0.0).min(255.0) as u8
            };
            return Rgb([
                lerp(a.rgb[0], b.rgb[0]),
                lerp(a.rgb[1], b.rgb[1]),
                lerp(a.rgb[2], b.rgb[2]),
            ]);
        }
    }
    Rgb(stops[stops.len() - 1].rgb)
}

/// A colour table of fixed size.
#[derive(Clone, Debug)]
pub struct Palette {
    name: PaletteName,
    colors: Vec<Rgb<u8>>,
}

impl Palette {
    /// Samples the gradient `name` at `size` evenly spaced points,
    /// both ends included.
    pub fn new(name: PaletteName, size: u32) -> Result<Palette, FieldError> {
        if size == 0 {
            return Err(FieldError::invalid("palette size must be positive"));
        }
        let last = f64::from(size.saturating_sub(1).max(1));
        let colors = (0..size)
            .map(|i| interpolate(name.stops(), f64::from(i) / last))
            .collect();
        Ok(Palette { name, colors })
    }

    /// Which gradient this table samples.
    pub fn name(&self) -> PaletteName {
        self.name
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour of `index`, wrapping around the table.
    pub fn color(&self, index: u32) -> Rgb<u8> {
        self.colors[index as usize % self.colors.len()]
    }
}

/// Paints a frame of palette indices into an image the same shape as
/// the frame.
pub fn colorize(frame: &IndexArray, palette: &Palette) -> RgbImage {
    let mut image = ImageBuffer::new(frame.width() as u32, frame.height() as u32);
    for (y, row) in frame.rows().enumerate() {
        for (x, &index) in row.iter().enumerate() {
            image.put_pixel(x as u32, y as u32, palette.color(index));
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use cycle::map_frame;
    use field::compute_field;
    use planes::SamplingRect;

    #[test]
    fn names_round_trip() {
        for name in PaletteName::ALL.iter() {
            let parsed: PaletteName = name.parse().unwrap();
            assert_eq!(&parsed.to_string(), name);
        }
        assert!("viridis".parse::<PaletteName>().is_err());
        assert!("gray".parse::<PaletteName>().is_err());
    }

    #[test]
    fn ends_of_the_table_are_the_ends_of_the_gradient() {
        let p = Palette::new(PaletteName::Grayscale, 5).unwrap();
        assert_eq!(p.len(), 5);
        assert_eq!(p.color(0), Rgb([0, 0, 0]));
        assert_eq!(p.color(4), Rgb([255, 255, 255]));
        assert_eq!(p.color(2), Rgb([128, 128, 128]));
    }

    #[test]
    fn indices_wrap_around_the_table() {
        let p = Palette::new(PaletteName::Inferno, 10).unwrap();
        assert_eq!(p.color(3), p.color(13));
    }

    #[test]
    fn twilight_shifted_is_cyclic() {
        let p = Palette::new(PaletteName::TwilightShifted, 100).unwrap();
        assert_eq!(p.color(0), p.color(99));
    }

    #[test]
    fn a_single_colour_palette_is_allowed() {
        let p = Palette::new(PaletteName::Magma, 1).unwrap();
        assert_eq!(p.color(0), Rgb([0, 0, 4]));
        assert!(Palette::new(PaletteName::Magma, 0).is_err());
    }

    #[test]
    fn colorize_keeps_the_frame_shape() {
        let f = compute_field(&SamplingRect::standard(), 6, 4, 8).unwrap();
        let frame = map_frame(&f, 0, 8).unwrap();
        let p = Palette::new(PaletteName::Grayscale, 8).unwrap();
        let img = colorize(&frame, &p);
        assert_eq!(img.dimensions(), (6, 4));
        let idx = frame.get(2, 5).unwrap();
        assert_eq!(*img.get_pixel(5, 2), p.color(idx));
    }
}
