/*
 * Error Module
 *
 * The simulation itself never fails: drawing off-surface, sampling an empty
 * visual or updating an empty field all degrade to "nothing visible".
 * Errors only come from the edges where outside data enters the program:
 * parameter files, decoded images and font files.
 */

use std::io;
use thiserror::Error;

/// Errors raised while preparing an effect
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Parameter file could not be parsed
    #[error("Invalid parameter file: {0}")]
    Config(#[from] serde_json::Error),

    /// Source image could not be opened or decoded
    #[error("Image error: {0}")]
    Image(#[from] nannou::image::ImageError),

    /// Font data was not a usable TrueType/OpenType font
    #[error("Invalid font: {0}")]
    Font(String),

    /// Parameters outside their valid range
    #[error("Invalid parameter: {0}")]
    InvalidParams(String),
}

pub type Result<T> = std::result::Result<T, Error>;
