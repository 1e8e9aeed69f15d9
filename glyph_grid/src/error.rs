// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use skrifa::raw::ReadError;

/// Error type for outline flattening, grid construction and atlas packing.
///
/// Carries a non-exhaustive [`ErrorKind`], the pipeline [`Stage`] that raised
/// it and, when known, the glyph being processed.
#[derive(Debug, Clone)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The pipeline stage that failed.
    stage: Stage,

    /// The glyph being processed, if any.
    glyph: Option<GlyphRef>,

    /// Kind-specific context.
    detail: Detail,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The pipeline stage that failed.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The glyph that was being processed, if known.
    pub fn glyph(&self) -> Option<GlyphRef> {
        self.glyph
    }

    /// The offending contour for [`ErrorKind::InvalidOutline`] errors.
    pub fn contour(&self) -> Option<usize> {
        match self.detail {
            Detail::Contour { index, .. } => Some(index),
            _ => None,
        }
    }

    /// The `(required, available)` pair for errors caused by a limit, such as
    /// [`ErrorKind::AtlasTooNarrow`] or [`ErrorKind::GridOverflow`].
    pub fn limit(&self) -> Option<(usize, usize)> {
        match self.detail {
            Detail::Limit {
                required,
                available,
            } => Some((required, available)),
            _ => None,
        }
    }

    /// Attaches glyph context, keeping any fields already present.
    #[must_use]
    pub fn with_glyph(mut self, glyph: GlyphRef) -> Self {
        self.glyph = Some(match self.glyph {
            Some(existing) => existing.merge(glyph),
            None => glyph,
        });
        self
    }

    pub(crate) fn invalid_outline(contour: usize, reason: &'static str) -> Self {
        Self::new(
            ErrorKind::InvalidOutline,
            Stage::Flatten,
            Detail::Contour {
                index: contour,
                reason,
            },
        )
    }

    pub(crate) fn unsupported_format(reason: &'static str) -> Self {
        Self::new(
            ErrorKind::UnsupportedFormat,
            Stage::Load,
            Detail::Message(reason),
        )
    }

    pub(crate) fn atlas_too_narrow(grid: usize, required: usize, available: usize) -> Self {
        Self::new(
            ErrorKind::AtlasTooNarrow,
            Stage::Pack,
            Detail::Limit {
                required,
                available,
            },
        )
        .with_glyph(GlyphRef::from_index(grid))
    }

    pub(crate) fn unpackable_capacity(grid: usize) -> Self {
        Self::new(
            ErrorKind::InvalidConfig,
            Stage::Pack,
            Detail::Message("cell capacity is not a multiple of 4"),
        )
        .with_glyph(GlyphRef::from_index(grid))
    }

    pub(crate) fn grid_overflow(required: usize, available: usize) -> Self {
        Self::new(
            ErrorKind::GridOverflow,
            Stage::Grid,
            Detail::Limit {
                required,
                available,
            },
        )
    }

    pub(crate) fn too_many_curves(required: usize, available: usize) -> Self {
        Self::new(
            ErrorKind::TooManyCurves,
            Stage::Grid,
            Detail::Limit {
                required,
                available,
            },
        )
    }

    pub(crate) fn invalid_grid(reason: &'static str) -> Self {
        Self::new(ErrorKind::InvalidGrid, Stage::Grid, Detail::Message(reason))
    }

    pub(crate) fn invalid_config(reason: &'static str) -> Self {
        Self::new(
            ErrorKind::InvalidConfig,
            Stage::Config,
            Detail::Message(reason),
        )
    }

    pub(crate) fn font(error: ReadError) -> Self {
        Self::new(ErrorKind::Font, Stage::Load, Detail::Read(error))
    }

    fn new(kind: ErrorKind, stage: Stage, detail: Detail) -> Self {
        Self {
            kind,
            stage,
            glyph: None,
            detail,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed", self.stage)?;
        if let Some(glyph) = self.glyph {
            write!(f, " for {glyph}")?;
        }
        match (&self.kind, &self.detail) {
            (_, Detail::Contour { index, reason }) => write!(f, ": contour {index} {reason}"),
            (ErrorKind::AtlasTooNarrow, Detail::Limit { required, available }) => write!(
                f,
                ": grid needs {required} packing units but the atlas is {available} wide"
            ),
            (ErrorKind::GridOverflow, Detail::Limit { required, available }) => write!(
                f,
                ": grid needs {required} cells along one axis, limit is {available}"
            ),
            (_, Detail::Limit { required, available }) => {
                write!(f, ": {required} curves exceed the limit of {available}")
            }
            (_, Detail::Message(reason)) => write!(f, ": {reason}"),
            (_, Detail::Read(error)) => write!(f, ": {error}"),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The outline is malformed: a contour has too few points or the contour
    /// end indices are out of order or out of range.
    InvalidOutline,

    /// The glyph is not a simple quadratic outline (composite, CFF or bitmap).
    UnsupportedFormat,

    /// A grid is wider than the atlas.
    AtlasTooNarrow,

    /// Grid refinement exceeded the configured maximum dimension.
    GridOverflow,

    /// The glyph has more curves than a cell index can address.
    TooManyCurves,

    /// An externally assembled grid violates the grid invariants.
    InvalidGrid,

    /// A configuration value is out of range.
    InvalidConfig,

    /// The font data could not be read.
    Font,
}

/// The pipeline stage an [`Error`] was raised in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Validating configuration.
    Config,

    /// Loading an outline from the font.
    Load,

    /// Flattening an outline into curves.
    Flatten,

    /// Building the glyph grid.
    Grid,

    /// Packing grids into the atlas.
    Pack,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Config => "configuration",
            Self::Load => "outline loading",
            Self::Flatten => "outline flattening",
            Self::Grid => "grid construction",
            Self::Pack => "atlas packing",
        })
    }
}

/// Identifies the glyph an [`Error`] refers to.
///
/// Any combination of fields may be present, depending on where the error was
/// raised.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphRef {
    /// The Unicode code point that selected the glyph.
    pub codepoint: Option<u32>,

    /// The glyph identifier within the font.
    pub glyph_id: Option<u32>,

    /// Position of the glyph's grid in the slice handed to the packer.
    pub index: Option<usize>,
}

impl GlyphRef {
    /// Refers to a glyph by code point and glyph identifier.
    pub fn new(codepoint: u32, glyph_id: u32) -> Self {
        Self {
            codepoint: Some(codepoint),
            glyph_id: Some(glyph_id),
            index: None,
        }
    }

    /// Refers to a grid by its position in a packing batch.
    pub fn from_index(index: usize) -> Self {
        Self {
            index: Some(index),
            ..Self::default()
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            codepoint: self.codepoint.or(other.codepoint),
            glyph_id: self.glyph_id.or(other.glyph_id),
            index: self.index.or(other.index),
        }
    }
}

impl fmt::Display for GlyphRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("glyph")?;
        if let Some(id) = self.glyph_id {
            write!(f, " {id}")?;
        }
        if let Some(codepoint) = self.codepoint {
            write!(f, " (U+{codepoint:04X})")?;
        }
        if let Some(index) = self.index {
            write!(f, " #{index}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Detail {
    Contour {
        index: usize,
        reason: &'static str,
    },
    Limit {
        required: usize,
        available: usize,
    },
    Message(&'static str),
    Read(ReadError),
}
