use std::path::PathBuf;

use thiserror::Error;

use crate::texture::TextureSlot;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("problem with arguments: {0}")]
    Args(String),

    #[error("cannot read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid map file: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid map: not enclosed (escaped at row {row}, column {col})")]
    Enclosure { row: isize, col: isize },

    #[error("invalid texture {slot:?} at {}: {source}", path.display())]
    Texture {
        slot: TextureSlot,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("display initialization failed: {0}")]
    Display(String),
}

impl Error {
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Sub-causes of a rejected scene file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("duplicate key {0}")]
    DuplicateKey(&'static str),

    #[error("unrecognized line {0:?}")]
    UnknownKey(String),

    #[error("missing key {0}")]
    MissingKey(&'static str),

    #[error("bad color for {key}: {value:?}")]
    InvalidColor { key: &'static str, value: String },

    #[error("no map body found")]
    MissingMap,

    #[error("blank line inside map body at line {0}")]
    BlankLineInMap(usize),

    #[error("illegal character {ch:?} at row {row}, column {col}")]
    IllegalChar { row: usize, col: usize, ch: char },

    #[error("expected exactly one start position, found {0}")]
    StartCount(usize),
}
