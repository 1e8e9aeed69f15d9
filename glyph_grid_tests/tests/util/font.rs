// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal TrueType font assembled in memory.
//!
//! The font carries only the tables needed to map code points and read
//! outlines: `cmap` (a single format 12 subtable), `glyf`, `head` and a long
//! `loca`. Glyph 0 is always empty.

/// A point as stored in a `glyf` table: coordinates and the on-curve flag.
pub(crate) type RawPoint = (i16, i16, bool);

const ON_CURVE: u8 = 0x01;
const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
const ARGS_ARE_XY_VALUES: u16 = 0x0002;

#[derive(Default)]
pub(crate) struct TestFont {
    /// Encoded glyph records, empty for glyphs without data.
    glyphs: Vec<Vec<u8>>,
    mappings: Vec<(u32, u16)>,
    without_glyf: bool,
}

impl TestFont {
    pub(crate) fn new() -> Self {
        Self {
            glyphs: vec![Vec::new()],
            ..Self::default()
        }
    }

    /// Adds a simple glyph made of the given contours.
    pub(crate) fn add_simple(&mut self, contours: &[&[RawPoint]]) -> u16 {
        let points: Vec<RawPoint> = contours.iter().flat_map(|c| c.iter().copied()).collect();
        let mut data = Vec::new();
        push_i16(&mut data, contours.len() as i16);
        push_bbox(&mut data, &points);
        let mut end = 0_u16;
        for contour in contours {
            end += contour.len() as u16;
            push_u16(&mut data, end - 1);
        }
        // No instructions.
        push_u16(&mut data, 0);
        data.extend(points.iter().map(|&(_, _, on)| if on { ON_CURVE } else { 0 }));
        // Coordinates are stored as 16-bit deltas from the previous point.
        let mut previous = 0;
        for &(x, _, _) in &points {
            push_i16(&mut data, x - previous);
            previous = x;
        }
        previous = 0;
        for &(_, y, _) in &points {
            push_i16(&mut data, y - previous);
            previous = y;
        }
        self.push_glyph(data)
    }

    /// Adds a composite glyph referencing one component without offset.
    pub(crate) fn add_composite(&mut self, component: u16) -> u16 {
        let mut data = Vec::new();
        push_i16(&mut data, -1);
        push_bbox(&mut data, &[]);
        push_u16(&mut data, ARG_1_AND_2_ARE_WORDS | ARGS_ARE_XY_VALUES);
        push_u16(&mut data, component);
        push_i16(&mut data, 0);
        push_i16(&mut data, 0);
        self.push_glyph(data)
    }

    /// Adds a glyph without outline data, like a space.
    pub(crate) fn add_empty(&mut self) -> u16 {
        self.push_glyph(Vec::new())
    }

    /// Maps a character to a glyph.
    pub(crate) fn map(&mut self, ch: char, glyph: u16) -> &mut Self {
        self.mappings.push((u32::from(ch), glyph));
        self
    }

    /// Leaves the `glyf` table out, like a CFF font would.
    pub(crate) fn without_glyf(&mut self) -> &mut Self {
        self.without_glyf = true;
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut tables: Vec<([u8; 4], Vec<u8>)> = vec![(*b"cmap", self.cmap())];
        if !self.without_glyf {
            tables.push((*b"glyf", self.glyphs.concat()));
        }
        tables.push((*b"head", head()));
        tables.push((*b"loca", self.loca()));

        let mut font = Vec::new();
        push_u32(&mut font, 0x0001_0000);
        push_u16(&mut font, tables.len() as u16);
        // Search parameters are not used by the reader.
        push_u16(&mut font, 0);
        push_u16(&mut font, 0);
        push_u16(&mut font, 0);

        let mut offset = 12 + 16 * tables.len();
        for (tag, data) in &tables {
            font.extend_from_slice(tag);
            push_u32(&mut font, 0);
            push_u32(&mut font, offset as u32);
            push_u32(&mut font, data.len() as u32);
            offset += padded_len(data.len());
        }
        for (_, data) in &tables {
            font.extend_from_slice(data);
            font.resize(font.len() + padded_len(data.len()) - data.len(), 0);
        }
        font
    }

    fn push_glyph(&mut self, data: Vec<u8>) -> u16 {
        self.glyphs.push(data);
        (self.glyphs.len() - 1) as u16
    }

    fn cmap(&self) -> Vec<u8> {
        let mut mappings = self.mappings.clone();
        mappings.sort_unstable();

        let mut data = Vec::new();
        push_u16(&mut data, 0);
        push_u16(&mut data, 1);
        // Windows platform, full Unicode repertoire.
        push_u16(&mut data, 3);
        push_u16(&mut data, 10);
        push_u32(&mut data, 12);

        push_u16(&mut data, 12);
        push_u16(&mut data, 0);
        push_u32(&mut data, 16 + 12 * mappings.len() as u32);
        push_u32(&mut data, 0);
        push_u32(&mut data, mappings.len() as u32);
        for (codepoint, glyph) in mappings {
            push_u32(&mut data, codepoint);
            push_u32(&mut data, codepoint);
            push_u32(&mut data, u32::from(glyph));
        }
        data
    }

    fn loca(&self) -> Vec<u8> {
        let mut data = Vec::new();
        let mut offset = 0;
        push_u32(&mut data, 0);
        for glyph in &self.glyphs {
            offset += glyph.len() as u32;
            push_u32(&mut data, offset);
        }
        data
    }
}

fn head() -> Vec<u8> {
    let mut data = Vec::new();
    push_u32(&mut data, 0x0001_0000);
    push_u32(&mut data, 0x0001_0000);
    push_u32(&mut data, 0);
    push_u32(&mut data, 0x5F0F_3CF5);
    push_u16(&mut data, 0);
    // Units per em.
    push_u16(&mut data, 1000);
    // Created and modified timestamps.
    data.extend_from_slice(&[0; 16]);
    push_bbox(&mut data, &[]);
    push_u16(&mut data, 0);
    push_u16(&mut data, 8);
    push_i16(&mut data, 2);
    // Long loca offsets.
    push_i16(&mut data, 1);
    push_i16(&mut data, 0);
    data
}

fn push_bbox(data: &mut Vec<u8>, points: &[RawPoint]) {
    let xs = points.iter().map(|p| p.0);
    let ys = points.iter().map(|p| p.1);
    push_i16(data, xs.clone().min().unwrap_or(0));
    push_i16(data, ys.clone().min().unwrap_or(0));
    push_i16(data, xs.max().unwrap_or(0));
    push_i16(data, ys.max().unwrap_or(0));
}

fn padded_len(len: usize) -> usize {
    len.next_multiple_of(4)
}

fn push_u16(data: &mut Vec<u8>, value: u16) {
    data.extend_from_slice(&value.to_be_bytes());
}

fn push_i16(data: &mut Vec<u8>, value: i16) {
    data.extend_from_slice(&value.to_be_bytes());
}

fn push_u32(data: &mut Vec<u8>, value: u32) {
    data.extend_from_slice(&value.to_be_bytes());
}
