/*
 * Pixel Particles
 *
 * Turns an image or a piece of text into thousands of small squares. Each
 * square drifts back to the spot it was sampled from and is pushed away by
 * the pointer, so moving the mouse through the picture disturbs it and it
 * settles again once the mouse leaves.
 *
 * Usage:
 *   pixel_particles image photo.png
 *   pixel_particles text "This is Cool"
 */

use anyhow::{Context, Result};
use clap::Parser;

use pixel_particles::app;
use pixel_particles::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger, -v flags win over RUST_LOG
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose > 0 {
        logger.filter_level(cli.log_level());
    }
    logger.init();

    // Catch bad flags before a window opens; the model loads the visual
    cli.resolve_params().context("Invalid effect parameters")?;

    nannou::app(app::model).update(app::update).exit(app::exit).run();
    Ok(())
}
