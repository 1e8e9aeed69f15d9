// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests from font data to packed buffers.

use glyph_grid::{
    build_atlas, process_glyphs, CodepointRanges, Config, ErrorKind, GridConfig, SkrifaOutlines,
    UnsupportedGlyphPolicy,
};

use crate::test_name;
use crate::util::{assert_grid_invariants, TestFont};

const DIAMOND: &[(i16, i16, bool)] = &[(500, 0, true), (1000, 500, true), (500, 1000, true), (0, 500, true)];
const ROUND: &[(i16, i16, bool)] = &[(0, 0, false), (1000, 0, false), (1000, 1000, false), (0, 1000, false)];
const COMB: &[(i16, i16, bool)] = &[
    (0, 0, true),
    (100, 800, true),
    (200, 0, true),
    (300, 800, true),
    (400, 0, true),
    (500, 800, true),
    (600, 0, true),
    (700, 800, true),
    (800, 0, true),
    (800, -100, true),
    (0, -100, true),
];

fn sample_font() -> Vec<u8> {
    let mut font = TestFont::new();
    let space = font.add_empty();
    let diamond = font.add_simple(&[DIAMOND]);
    let round = font.add_simple(&[ROUND]);
    let comb = font.add_simple(&[COMB]);
    let composite = font.add_composite(diamond);
    font.map(' ', space)
        .map('D', diamond)
        .map('d', diamond)
        .map('O', round)
        .map('W', comb)
        .map('Z', composite)
        .map('Ж', comb);
    font.build()
}

fn skipping() -> Config {
    Config {
        unsupported: UnsupportedGlyphPolicy::Skip,
        ..Config::default()
    }
}

#[test]
fn pipeline_builds_valid_grids() {
    let data = sample_font();
    let source = SkrifaOutlines::from_data(&data, 0).unwrap();
    let config = Config {
        grid: GridConfig::default().with_cell_capacity(4),
        ..skipping()
    };
    let glyphs = process_glyphs(&source, &config).unwrap();
    let ids: Vec<u32> = glyphs.iter().map(|glyph| glyph.glyph_id).collect();
    assert_eq!(ids, [1, 2, 3, 4], "space, diamond, round and comb");
    for glyph in &glyphs {
        assert_grid_invariants(&glyph.grid, test_name!());
    }
    assert_eq!(glyphs[1].codepoints, ['D' as u32, 'd' as u32], "shared glyph");
    assert_eq!(glyphs[0].grid.curves().len(), 0, "space has no curves");
    assert!(glyphs[3].grid.cells().len() > 1, "the comb needs refinement");
}

#[test]
fn pipeline_packs_every_selected_code_point() {
    let data = sample_font();
    let source = SkrifaOutlines::from_data(&data, 0).unwrap();
    let atlas = build_atlas(&source, &skipping()).unwrap();
    assert_eq!(atlas.codepoint_count(), 5, "composite and Cyrillic left out");
    assert!(atlas.get('Z' as u32).is_none(), "composite skipped");
    assert!(atlas.get('Ж' as u32).is_none(), "outside the default ranges");

    let (glyph, placement) = atlas.get('W' as u32).unwrap();
    let header = &atlas.buffers().curves()[placement.header_offset..][..4];
    assert_eq!(
        header,
        &[
            placement.column as f32,
            placement.row as f32,
            glyph.grid.width() as f32,
            glyph.grid.height() as f32
        ],
        "header describes the grid"
    );
}

#[test]
fn pipeline_presets_extend_the_selection() {
    let data = sample_font();
    let source = SkrifaOutlines::from_data(&data, 0).unwrap();
    let config = Config {
        ranges: CodepointRanges::cyrillic(),
        ..skipping()
    };
    let atlas = build_atlas(&source, &config).unwrap();
    let (cyrillic, _) = atlas.get('Ж' as u32).unwrap();
    let (latin, _) = atlas.get('W' as u32).unwrap();
    assert_eq!(cyrillic.glyph_id, latin.glyph_id, "same comb glyph");
}

#[test]
fn pipeline_fails_on_composites_by_default() {
    let data = sample_font();
    let source = SkrifaOutlines::from_data(&data, 0).unwrap();
    let error = build_atlas(&source, &Config::default()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnsupportedFormat, "kind");
    assert_eq!(
        error.glyph().and_then(|glyph| glyph.codepoint),
        Some('Z' as u32),
        "names the composite"
    );
    assert_eq!(
        error.to_string(),
        "outline loading failed for glyph 5 (U+005A): composite glyphs are not supported",
        "message"
    );
}

#[test]
fn pipeline_rejects_unpackable_capacity() {
    let data = sample_font();
    let source = SkrifaOutlines::from_data(&data, 0).unwrap();
    let config = Config {
        grid: GridConfig::default().with_cell_capacity(2),
        ..skipping()
    };
    let error = process_glyphs(&source, &config).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidConfig, "kind");
}
