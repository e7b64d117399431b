//! Command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::params::EffectParams;
use crate::text;
use crate::visual::Visual;

pub const DEFAULT_TEXT: &str = "This is Cool";

#[derive(Debug, Parser)]
#[command(name = "pixel_particles", version, about = "Images and text made of particles that dodge the pointer")]
pub struct Cli {
    /// JSON file with effect parameters
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Sampling grid spacing in pixels
    #[arg(long, global = true)]
    pub gap: Option<u32>,

    /// Pointer influence radius (compared against squared distance)
    #[arg(long, global = true)]
    pub radius: Option<f64>,

    /// Update particles on all cores
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the effect from an image file
    Image {
        /// Image to sample
        path: PathBuf,
    },
    /// Build the effect from wrapped text
    Text {
        /// Initial text
        #[arg(default_value = DEFAULT_TEXT)]
        text: String,

        /// TrueType/OpenType font, defaults to the bundled font
        #[arg(long)]
        font: Option<PathBuf>,

        /// Font size in pixels
        #[arg(long)]
        font_size: Option<f32>,
    },
}

/// Everything the window needs to start
pub struct Launch {
    pub params: EffectParams,
    pub visual: Visual,
}

impl Launch {
    // Stand-in model while the app quits after a failed launch
    pub fn demo() -> Self {
        let params = EffectParams::for_text();
        let visual = Visual::text(DEFAULT_TEXT, text::default_font(), params.text);
        Self { params, visual }
    }
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Presets for the chosen visual with the config file and flags applied
    pub fn resolve_params(&self) -> Result<EffectParams> {
        let base = match self.command {
            Commands::Image { .. } => EffectParams::for_image(),
            Commands::Text { .. } => EffectParams::for_text(),
        };
        let mut params = match &self.config {
            Some(path) => EffectParams::from_json_file(path, &base)?,
            None => base,
        };

        if let Some(gap) = self.gap {
            params.gap = gap;
        }
        if let Some(radius) = self.radius {
            params.radius = radius;
        }
        if self.parallel {
            params.parallel = true;
        }
        if let Commands::Text {
            font_size: Some(size),
            ..
        } = &self.command
        {
            params.text.font_size = *size;
            params.text.line_height = *size;
        }
        params.validate()?;
        Ok(params)
    }

    /// Resolve parameters and load the visual
    pub fn into_launch(self) -> Result<Launch> {
        let params = self.resolve_params()?;
        let visual = match self.command {
            Commands::Image { path } => {
                log::info!("Loading image {}", path.display());
                Visual::open_image(&path)?
            }
            Commands::Text { text: content, font, .. } => {
                let font = match font {
                    Some(path) => text::load_font(path)?,
                    None => text::default_font(),
                };
                Visual::text(content, font, params.text)
            }
        };

        Ok(Launch { params, visual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn text_defaults() {
        let launch = parse(&["pixel_particles", "text"]).into_launch().unwrap();
        assert_eq!(launch.params, EffectParams::for_text());
        assert_eq!(launch.visual.content(), Some(DEFAULT_TEXT));
    }

    #[test]
    fn overrides_apply_after_presets() {
        let cli = parse(&[
            "pixel_particles",
            "--gap",
            "6",
            "--parallel",
            "text",
            "hello world",
            "--font-size",
            "40",
        ]);
        let launch = cli.into_launch().unwrap();

        assert_eq!(launch.params.gap, 6);
        assert!(launch.params.parallel);
        assert_eq!(launch.params.text.font_size, 40.0);
        assert_eq!(launch.params.radius, 20_000.0);
        assert_eq!(launch.visual.content(), Some("hello world"));
    }

    #[test]
    fn invalid_override_is_rejected() {
        let cli = parse(&["pixel_particles", "--gap", "0", "text"]);
        assert!(matches!(cli.into_launch(), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn params_resolve_without_loading_the_visual() {
        let cli = parse(&["pixel_particles", "--radius", "500", "image", "/no/such/file.png"]);
        let params = cli.resolve_params().unwrap();
        assert_eq!(params.radius, 500.0);
        assert_eq!(params.gap, EffectParams::for_image().gap);
    }

    #[test]
    fn missing_image_is_reported() {
        let cli = parse(&["pixel_particles", "image", "/no/such/file.png"]);
        assert!(matches!(cli.into_launch(), Err(Error::Image(_))));
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(parse(&["pixel_particles", "text"]).log_level(), log::LevelFilter::Warn);
        assert_eq!(parse(&["pixel_particles", "-vv", "text"]).log_level(), log::LevelFilter::Debug);
    }
}
