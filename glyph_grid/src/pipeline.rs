// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! From a font's character map to a packed curve atlas.

use alloc::vec::Vec;

use hashbrown::HashMap;
use log::{debug, warn};

use crate::atlas::{pack_glyph_grids, AtlasBuffers, GlyphPlacement, PackedAtlas};
use crate::config::{Config, UnsupportedGlyphPolicy};
use crate::error::{Error, ErrorKind, GlyphRef};
use crate::font::OutlineSource;
use crate::grid::{GlyphGrid, GridBuilder};
use crate::outline::{flatten, Outline};

/// The grid of one glyph and the code points that map to it.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedGlyph {
    /// The glyph identifier within the font.
    pub glyph_id: u32,
    /// Selected code points mapping to the glyph, in code point order.
    pub codepoints: Vec<u32>,
    /// The glyph's grid.
    pub grid: GlyphGrid,
}

impl ProcessedGlyph {
    fn glyph_ref(&self) -> GlyphRef {
        GlyphRef {
            codepoint: self.codepoints.first().copied(),
            glyph_id: Some(self.glyph_id),
            index: None,
        }
    }
}

impl AsRef<GlyphGrid> for ProcessedGlyph {
    fn as_ref(&self) -> &GlyphGrid {
        &self.grid
    }
}

/// Builds a grid for every glyph selected by `config.ranges`.
///
/// Glyphs are processed in order of their lowest selected code point. Code
/// points that map to the same glyph share one grid. A glyph that is not a
/// simple outline is skipped or fails the batch depending on
/// `config.unsupported`; every other error fails the batch and names the
/// glyph.
pub fn process_glyphs<S: OutlineSource>(
    source: &S,
    config: &Config,
) -> Result<Vec<ProcessedGlyph>, Error> {
    config.validate()?;

    let mut glyphs: Vec<ProcessedGlyph> = Vec::new();
    // Glyph id to position in `glyphs`, or `None` for skipped glyphs.
    let mut seen: HashMap<u32, Option<usize>> = HashMap::new();
    let mut outline = Outline::new();
    let mut skipped = 0_usize;

    for (codepoint, glyph_id) in source.mappings() {
        if !config.ranges.contains(codepoint) {
            continue;
        }
        if let Some(&slot) = seen.get(&glyph_id) {
            if let Some(index) = slot {
                glyphs[index].codepoints.push(codepoint);
            }
            continue;
        }

        let glyph = GlyphRef::new(codepoint, glyph_id);
        match build_grid(source, glyph_id, config, &mut outline) {
            Ok(grid) => {
                seen.insert(glyph_id, Some(glyphs.len()));
                glyphs.push(ProcessedGlyph {
                    glyph_id,
                    codepoints: alloc::vec![codepoint],
                    grid,
                });
            }
            Err(error)
                if error.kind() == ErrorKind::UnsupportedFormat
                    && config.unsupported == UnsupportedGlyphPolicy::Skip =>
            {
                warn!("skipping {glyph}: {error}");
                seen.insert(glyph_id, None);
                skipped += 1;
            }
            Err(error) => return Err(error.with_glyph(glyph)),
        }
    }

    debug!(
        "built {} glyph grids, skipped {skipped} unsupported glyphs",
        glyphs.len()
    );
    Ok(glyphs)
}

fn build_grid<S: OutlineSource>(
    source: &S,
    glyph_id: u32,
    config: &Config,
    outline: &mut Outline,
) -> Result<GlyphGrid, Error> {
    source.load_outline(glyph_id, outline)?;
    let curves = flatten(outline)?;
    GridBuilder::new(&curves, config.grid).build()
}

/// Builds and packs the grids of every glyph selected by `config.ranges`.
pub fn build_atlas<S: OutlineSource>(source: &S, config: &Config) -> Result<CurveAtlas, Error> {
    let glyphs = process_glyphs(source, config)?;
    let atlas = pack_glyph_grids(&glyphs, &config.atlas).map_err(|error| {
        match error
            .glyph()
            .and_then(|glyph| glyph.index)
            .and_then(|index| glyphs.get(index))
        {
            Some(glyph) => error.with_glyph(glyph.glyph_ref()),
            None => error,
        }
    })?;

    let mut codepoints = HashMap::new();
    for (index, glyph) in glyphs.iter().enumerate() {
        for &codepoint in &glyph.codepoints {
            codepoints.insert(codepoint, index);
        }
    }
    Ok(CurveAtlas {
        glyphs,
        atlas,
        codepoints,
    })
}

/// Packed atlas buffers together with the glyphs they hold.
#[derive(Clone, Debug)]
pub struct CurveAtlas {
    glyphs: Vec<ProcessedGlyph>,
    atlas: PackedAtlas,
    codepoints: HashMap<u32, usize>,
}

impl CurveAtlas {
    /// The packed buffers.
    pub fn buffers(&self) -> &AtlasBuffers {
        self.atlas.buffers()
    }

    /// The packed glyphs, in processing order.
    pub fn glyphs(&self) -> &[ProcessedGlyph] {
        &self.glyphs
    }

    /// Placement of each glyph, parallel to [`CurveAtlas::glyphs`].
    pub fn placements(&self) -> &[GlyphPlacement] {
        self.atlas.placements()
    }

    /// The glyph and placement for a code point, if it was packed.
    pub fn get(&self, codepoint: u32) -> Option<(&ProcessedGlyph, &GlyphPlacement)> {
        let &index = self.codepoints.get(&codepoint)?;
        Some((&self.glyphs[index], &self.atlas.placements()[index]))
    }

    /// Number of code points with a packed glyph.
    pub fn codepoint_count(&self) -> usize {
        self.codepoints.len()
    }

    /// Consumes the atlas, returning the packed buffers.
    pub fn into_buffers(self) -> AtlasBuffers {
        self.atlas.into_parts().0
    }
}
