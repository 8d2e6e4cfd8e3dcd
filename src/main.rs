// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate crossterm;
extern crate env_logger;
extern crate failure;
#[macro_use]
extern crate log;
extern crate mandelcycle;

use crossterm::tty::IsTty;
use std::io;

use mandelcycle::config::{app, Config};
use mandelcycle::{compute_field, Animator, ColorCycler, Palette, TerminalRenderer};

fn run() -> Result<(), failure::Error> {
    let matches = app().get_matches();
    let config = Config::from_matches(&matches)?;
    debug!("{:?}", config);

    let field = compute_field(
        &config.rect,
        config.width,
        config.height,
        config.max_iterations,
    )?;
    info!(
        "computed {}x{} field, {} points escaped",
        field.width(),
        field.height(),
        field.escaped_count()
    );

    let palette = Palette::new(config.palette, config.max_iterations)?;
    info!("palette {} with {} colours", palette.name(), palette.len());
    let cycler = ColorCycler::for_field(field);
    let animator = Animator::new(cycler, config.frames, config.interval);

    // Only a real terminal gets raw mode and the quit keys.
    let stdout = io::stdout();
    if stdout.is_tty() {
        let mut renderer = TerminalRenderer::interactive(stdout.lock(), palette);
        animator.run(&mut renderer)?;
    } else {
        let mut renderer = TerminalRenderer::new(stdout.lock(), palette);
        animator.run(&mut renderer)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
