//! Command-line configuration.  Everything is read once at startup;
//! nothing can be changed while the animation runs.

use clap::{App, Arg, ArgMatches};
use num::Complex;
use std::str::FromStr;
use std::time::Duration;

use animate::Frames;
use errors::FieldError;
use palette::PaletteName;
use planes::{SampleGrid, SamplingRect};

/// Given a string and a separator, returns the two values separated
/// by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A `re,im` pair.
pub fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

/// A frame count, or `forever`.
pub fn parse_frames(s: &str) -> Option<Frames> {
    match s {
        "forever" | "loop" => Some(Frames::Forever),
        _ => u64::from_str(s).ok().map(Frames::Count),
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const ITERATIONS: &str = "iterations";
const FRAMES: &str = "frames";
const INTERVAL: &str = "interval";
const PALETTE: &str = "palette";

/// The argument definition.
pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("mandelcycle")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot colour-cycle animation")
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("96x64")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse field size"))
                .help("Width and height of the field, in samples"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,-1.25")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the sampled rectangle"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0.5,1.25")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the sampled rectangle"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration budget, which is also the palette size"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .long(FRAMES)
                .short("f")
                .takes_value(true)
                .default_value("forever")
                .validator(|s| match parse_frames(&s) {
                    Some(_) => Ok(()),
                    None => Err("Frames must be a count or 'forever'".to_string()),
                })
                .help("Number of frames to show, or 'forever'"),
        )
        .arg(
            Arg::with_name(INTERVAL)
                .long(INTERVAL)
                .short("d")
                .takes_value(true)
                .default_value("30")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        60_000,
                        "Could not parse frame interval",
                        "Frame interval must be between 0 and 60000 ms",
                    )
                })
                .help("Delay between frames, in milliseconds"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("twilight_shifted")
                .possible_values(&PaletteName::ALL)
                .help("Colour palette"),
        )
}

/// Everything the program needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Samples per row.
    pub width: usize,
    /// Samples per column.
    pub height: usize,
    /// Iteration budget and palette size.
    pub max_iterations: u32,
    /// Region of the complex plane.
    pub rect: SamplingRect,
    /// How long to animate.
    pub frames: Frames,
    /// Delay between frames.
    pub interval: Duration,
    /// Which palette to colour with.
    pub palette: PaletteName,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 96,
            height: 64,
            max_iterations: 100,
            rect: SamplingRect::standard(),
            frames: Frames::Forever,
            interval: Duration::from_millis(30),
            palette: PaletteName::TwilightShifted,
        }
    }
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, FieldError> {
    matches
        .value_of(name)
        .ok_or_else(|| FieldError::invalid(format!("missing --{}", name)))
}

fn bad(name: &str, raw: &str) -> FieldError {
    FieldError::invalid(format!("could not parse --{} '{}'", name, raw))
}

impl Config {
    /// Converts parsed arguments into a validated configuration.
    pub fn from_matches(matches: &ArgMatches) -> Result<Config, FieldError> {
        let raw = value(matches, SIZE)?;
        let (width, height) = parse_pair::<usize>(raw, 'x').ok_or_else(|| bad(SIZE, raw))?;

        let raw = value(matches, LEFTLOWER)?;
        let leftlower = parse_complex(raw).ok_or_else(|| bad(LEFTLOWER, raw))?;
        let raw = value(matches, RIGHTUPPER)?;
        let rightupper = parse_complex(raw).ok_or_else(|| bad(RIGHTUPPER, raw))?;

        let raw = value(matches, ITERATIONS)?;
        let max_iterations = u32::from_str(raw).map_err(|_| bad(ITERATIONS, raw))?;

        let raw = value(matches, FRAMES)?;
        let frames = parse_frames(raw).ok_or_else(|| bad(FRAMES, raw))?;

        let raw = value(matches, INTERVAL)?;
        let interval = u64::from_str(raw).map_err(|_| bad(INTERVAL, raw))?;

        let palette = PaletteName::from_str(value(matches, PALETTE)?)?;

        let config = Config {
            width,
            height,
            max_iterations,
            rect: SamplingRect::from_corners(leftlower, rightupper)?,
            frames,
            interval: Duration::from_millis(interval),
            palette,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the sizes and budget.  The rectangle validated itself
    /// when it was built.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::invalid(format!(
                "field size {}x{} must be positive in both dimensions",
                self.width, self.height
            )));
        }
        if self.max_iterations == 0 {
            return Err(FieldError::invalid("max_iterations must be positive"));
        }
        SampleGrid::new(self.width, self.height, self.rect)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Result<Config, FieldError> {
        let mut argv = vec!["mandelcycle"];
        argv.extend_from_slice(args);
        let matches = app().get_matches_from_safe(argv).map_err(|e| FieldError::invalid(e.message))?;
        Config::from_matches(&matches)
    }

    #[test]
    fn parse_pair_splits_on_the_separator() {
        assert_eq!(parse_pair::<usize>("800x600", 'x'), Some((800, 600)));
        assert_eq!(parse_pair::<f64>("-2.0,1.5", ','), Some((-2.0, 1.5)));
        assert_eq!(parse_pair::<usize>("800", 'x'), None);
        assert_eq!(parse_pair::<usize>("ax6", 'x'), None);
    }

    #[test]
    fn parse_frames_knows_forever() {
        assert_eq!(parse_frames("forever"), Some(Frames::Forever));
        assert_eq!(parse_frames("200"), Some(Frames::Count(200)));
        assert_eq!(parse_frames("-1"), None);
    }

    #[test]
    fn defaults_are_the_looping_view() {
        assert_eq!(config(&[]).unwrap(), Config::default());
    }

    #[test]
    fn every_flag_is_read() {
        let c = config(&[
            "-s", "30x20", "-l", "-1.5,-1", "-r", "1,1", "-i", "40", "-f", "7", "-d", "0", "-p",
            "inferno",
        ])
        .unwrap();
        assert_eq!(c.width, 30);
        assert_eq!(c.height, 20);
        assert_eq!(c.rect, SamplingRect::new(-1.5, 1.0, -1.0, 1.0).unwrap());
        assert_eq!(c.max_iterations, 40);
        assert_eq!(c.frames, Frames::Count(7));
        assert_eq!(c.interval, Duration::from_millis(0));
        assert_eq!(c.palette, PaletteName::Inferno);
    }

    #[test]
    fn inverted_corners_are_invalid() {
        match config(&["-l", "1,1", "-r", "-1,-1"]) {
            Err(FieldError::InvalidParameter(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn zero_sizes_are_invalid() {
        assert!(config(&["-s", "0x10"]).is_err());
        assert!(config(&["-i", "0"]).is_err());
    }

    #[test]
    fn oversized_fields_are_invalid() {
        assert!(config(&["-s", "4294967296x4294967296"]).is_err());
        assert!(config(&["-s", "65536x2"]).is_err());
        match config(&["-s", "8192x8192"]) {
            Err(FieldError::InvalidParameter(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(config(&["-s", "4096x4096"]).is_ok());
    }
}
