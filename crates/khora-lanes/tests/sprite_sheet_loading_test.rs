// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests for the built-in sprite sheet loader lanes driven
//! through the `SpriteFrameCache`.

use anyhow::Result;
use khora_core::{
    asset::{AssetHandle, SpriteFrame, SpriteSheetFormat},
    math::{Extent2D, Rect, Vec2},
    renderer::{Texture2D, TextureProvider},
    vfs::{FileSource, MemoryFileSource, NativeFileSource},
};
use khora_data::assets::{SpriteFrameCache, SpriteFrameRetainer, SHEET_CONTENT_SHEET};
use khora_lanes::asset_lane::{
    register_builtin_sheet_loaders, PlistSheetLoaderLane, SheetLoaderSettings, TextureLibrary,
};
use std::io::Cursor;
use std::sync::Arc;
use tempfile::tempdir;

const PLIST: SpriteSheetFormat = SpriteSheetFormat::PLIST;
const JSON: SpriteSheetFormat = SpriteSheetFormat::JSON;

// --- Test Setup ---

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbaImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// A format-2 property list. Each frame is `(name, "{{x,y},{w,h}}")`.
fn plist(frames: &[(&str, &str)], texture: Option<&str>) -> String {
    let entries: String = frames
        .iter()
        .map(|(name, rect)| {
            format!(
                "<key>{name}</key><dict>\
                 <key>frame</key><string>{rect}</string>\
                 <key>offset</key><string>{{0,0}}</string>\
                 <key>rotated</key><false/>\
                 <key>sourceSize</key><string>{{16,16}}</string>\
                 </dict>"
            )
        })
        .collect();
    let metadata = match texture {
        Some(texture) => format!(
            "<key>metadata</key><dict>\
             <key>format</key><integer>2</integer>\
             <key>textureFileName</key><string>{texture}</string>\
             </dict>"
        ),
        None => "<key>metadata</key><dict><key>format</key><integer>2</integer></dict>"
            .to_string(),
    };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><dict><key>frames</key><dict>{entries}</dict>{metadata}</dict></plist>"#
    )
}

/// A format-3 property list with one aliased frame on `items.png`.
const ITEMS_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><dict><key>frames</key><dict>
<key>coin.png</key><dict>
<key>aliases</key><array><string>gold.png</string></array>
<key>spriteOffset</key><string>{0,0}</string>
<key>spriteSize</key><string>{8,8}</string>
<key>spriteSourceSize</key><string>{8,8}</string>
<key>textureRect</key><string>{{4,4},{8,8}}</string>
<key>textureRotated</key><false/>
<key>anchor</key><string>{0.5,0.5}</string>
</dict></dict>
<key>metadata</key><dict><key>format</key><integer>3</integer><key>textureFileName</key><string>items.png</string></dict>
</dict></plist>"#;

struct Harness {
    files: Arc<MemoryFileSource>,
    textures: Arc<TextureLibrary>,
    cache: SpriteFrameCache,
}

impl Harness {
    fn new() -> Self {
        let files = Arc::new(MemoryFileSource::new());
        let textures = Arc::new(TextureLibrary::new(files.clone()));
        let mut cache = SpriteFrameCache::new();
        register_builtin_sheet_loaders(&mut cache, files.clone(), textures.clone());
        Self {
            files,
            textures,
            cache,
        }
    }

    fn with_atlas1() -> Self {
        let harness = Self::new();
        harness.files.insert("atlas.png", png_bytes(32, 16));
        harness.files.insert(
            "atlas1.plist",
            plist(
                &[("a.png", "{{0,0},{16,16}}"), ("b.png", "{{16,0},{16,16}}")],
                Some("atlas.png"),
            ),
        );
        harness
    }
}

// --- Property list ---

#[test]
fn test_load_plist_from_disk() -> Result<()> {
    // --- 1. Setup: write a sheet and its texture to a temporary directory ---
    let dir = tempdir()?;
    std::fs::create_dir(dir.path().join("ui"))?;
    std::fs::write(dir.path().join("ui/atlas.png"), png_bytes(32, 16))?;
    std::fs::write(
        dir.path().join("ui/atlas.plist"),
        plist(
            &[("a.png", "{{0,0},{16,16}}"), ("b.png", "{{16,0},{16,16}}")],
            Some("atlas.png"),
        ),
    )?;

    let files: Arc<dyn FileSource> = Arc::new(NativeFileSource::new(dir.path()));
    let textures = Arc::new(TextureLibrary::new(files.clone()));
    let mut cache = SpriteFrameCache::new();
    register_builtin_sheet_loaders(&mut cache, files, textures.clone());

    // --- 2. Load ---
    assert!(cache.add_sheet_file("ui/atlas.plist", PLIST));

    // --- 3. Verify ---
    assert!(cache.is_file_loaded("ui/atlas.plist"));
    assert_eq!(cache.frame_count(), 2);

    let b = cache.frame("b.png").expect("b.png should be loaded");
    assert_eq!(b.rect(), Rect::new(16.0, 0.0, 16.0, 16.0));
    assert_eq!(b.texture().path, "ui/atlas.png");
    assert_eq!(b.texture().size, Extent2D::new(32, 16));
    assert!(b.uses_texture(&textures.get("ui/atlas.png").unwrap()));
    Ok(())
}

#[test]
fn test_removing_frames_one_by_one() {
    let mut harness = Harness::with_atlas1();
    let cache = &mut harness.cache;
    assert!(cache.add_sheet_file("atlas1.plist", PLIST));

    cache.remove_frame("a.png");
    assert!(cache.has_frame("b.png"));
    assert!(cache.is_sheet_in_use("atlas1.plist"));
    assert!(!cache.is_file_loaded("atlas1.plist"));

    cache.remove_frame("b.png");
    assert!(cache.sheet("atlas1.plist").is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_texture_defaults_to_sheet_name() {
    let mut harness = Harness::new();
    harness.files.insert("hud.png", png_bytes(8, 8));
    harness
        .files
        .insert("hud.plist", plist(&[("life.png", "{{0,0},{8,8}}")], None));

    assert!(harness.cache.add_sheet_file("hud.plist", PLIST));
    assert_eq!(harness.cache.frame("life.png").unwrap().texture().path, "hud.png");
}

#[test]
fn test_texture_extension_setting() {
    let files = Arc::new(MemoryFileSource::new());
    let textures = Arc::new(TextureLibrary::new(files.clone()));
    files.insert("hud.webp.png", png_bytes(8, 8));
    files.insert("hud.png", b"not an image".to_vec());
    files.insert("hud.plist", plist(&[("life.png", "{{0,0},{8,8}}")], None));

    let settings = SheetLoaderSettings::from_ron_str("(texture_extension: \"webp.png\")").unwrap();
    let mut cache = SpriteFrameCache::new();
    cache.register_loader(Arc::new(PlistSheetLoaderLane::with_settings(
        files, textures, settings,
    )));

    assert!(cache.add_sheet_file("hud.plist", PLIST));
    assert_eq!(cache.frame("life.png").unwrap().texture().path, "hud.webp.png");
}

#[test]
fn test_explicit_texture_arguments_take_precedence() {
    let mut harness = Harness::with_atlas1();
    harness.files.insert("alt.png", png_bytes(64, 64));

    assert!(harness
        .cache
        .add_sheet_file_with_texture_path("atlas1.plist", "alt.png", PLIST));
    assert_eq!(harness.cache.frame("a.png").unwrap().texture().path, "alt.png");

    harness.cache.clear();
    let custom = AssetHandle::new(Texture2D::new("custom.png", Extent2D::new(16, 16)));
    assert!(harness
        .cache
        .add_sheet_file_with_texture("atlas1.plist", custom.clone(), PLIST));
    assert!(harness.cache.frame("b.png").unwrap().uses_texture(&custom));
}

#[test]
fn test_missing_texture_registers_nothing() {
    let mut harness = Harness::new();
    harness
        .files
        .insert("orphan.plist", plist(&[("x.png", "{{0,0},{8,8}}")], Some("gone.png")));

    assert!(!harness.cache.add_sheet_file("orphan.plist", PLIST));
    assert!(harness.cache.is_empty());
    assert!(harness.cache.sheet("orphan.plist").is_none());
}

#[test]
fn test_parse_failure_registers_nothing() {
    let mut harness = Harness::with_atlas1();
    harness.files.insert(
        "broken.plist",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><dict><key>frames</key><dict>
<key>ok.png</key><dict><key>frame</key><string>{{0,0},{8,8}}</string><key>offset</key><string>{0,0}</string><key>sourceSize</key><string>{8,8}</string></dict>
<key>bad.png</key><dict><key>frame</key><string>oops</string><key>offset</key><string>{0,0}</string><key>sourceSize</key><string>{8,8}</string></dict>
</dict><key>metadata</key><dict><key>format</key><integer>2</integer><key>textureFileName</key><string>atlas.png</string></dict></dict></plist>"#,
    );

    assert!(!harness.cache.add_sheet_file("broken.plist", PLIST));
    assert!(!harness.cache.contains_frame("ok.png"));
    assert!(!harness.cache.add_sheet_file("does-not-exist.plist", PLIST));
    assert!(harness.cache.is_empty());
}

#[test]
fn test_loading_twice_keeps_first_handles() {
    let mut harness = Harness::with_atlas1();
    harness.cache.add_sheet_file("atlas1.plist", PLIST);
    let first = harness.cache.frame("a.png").unwrap();

    assert!(harness.cache.add_sheet_file("atlas1.plist", PLIST));
    assert!(harness.cache.frame("a.png").unwrap().ptr_eq(&first));
    assert_eq!(harness.cache.frame_count(), 2);
}

#[test]
fn test_reload_picks_up_changes_on_disk() {
    let mut harness = Harness::with_atlas1();
    harness.cache.add_sheet_file("atlas1.plist", PLIST);
    harness.cache.remove_frame("a.png");

    harness.files.insert(
        "atlas1.plist",
        plist(
            &[("a.png", "{{0,0},{8,8}}"), ("b.png", "{{16,0},{16,16}}"), ("c.png", "{{8,0},{8,8}}")],
            Some("atlas.png"),
        ),
    );

    assert!(harness.cache.reload("atlas1.plist"));
    assert!(harness.cache.is_file_loaded("atlas1.plist"));
    assert_eq!(harness.cache.frame_count(), 3);
    assert_eq!(
        harness.cache.frame("a.png").unwrap().rect(),
        Rect::new(0.0, 0.0, 8.0, 8.0)
    );
}

#[test]
fn test_reload_failure_drops_the_sheet() {
    let mut harness = Harness::with_atlas1();
    harness.cache.add_sheet_file("atlas1.plist", PLIST);
    harness.files.remove("atlas1.plist");

    assert!(!harness.cache.reload("atlas1.plist"));
    assert!(harness.cache.sheet("atlas1.plist").is_none());
    assert!(harness.cache.is_empty());
}

#[test]
fn test_aliases_share_nothing_but_the_texture() {
    let mut harness = Harness::new();
    harness.files.insert("items.png", png_bytes(32, 32));
    harness.files.insert(
        "items.plist",
        ITEMS_PLIST,
    );

    assert!(harness.cache.add_sheet_file("items.plist", PLIST));
    let coin = harness.cache.find_frame("coin.png").unwrap();
    let gold = harness.cache.find_frame("gold.png").unwrap();

    assert!(!coin.ptr_eq(gold));
    assert_eq!(coin.rect(), gold.rect());
    assert_eq!(gold.anchor_point(), Some(Vec2::new(0.5, 0.5)));
    assert_eq!(harness.cache.sheet("items.plist").unwrap().len(), 2);

    // Holding one alias does not keep the other alive.
    let held = harness.cache.frame("gold.png").unwrap();
    assert_eq!(harness.cache.remove_unused_frames(), 1);
    assert!(harness.cache.contains_frame("gold.png"));
    drop(held);
}

#[test]
fn test_cached_primary_name_still_registers_aliases() {
    let mut harness = Harness::new();
    harness.files.insert("items.png", png_bytes(32, 32));
    harness.files.insert("items.plist", ITEMS_PLIST);

    let texture = harness.textures.texture_for_path("items.png").unwrap();
    let existing = AssetHandle::new(SpriteFrame::from_texture(texture));
    harness.cache.add_frame(existing.clone(), "coin.png");

    assert!(harness.cache.add_sheet_file("items.plist", PLIST));

    assert!(harness.cache.find_frame("coin.png").unwrap().ptr_eq(&existing));
    let gold = harness.cache.find_frame("gold.png").unwrap();
    assert_eq!(gold.rect(), Rect::new(4.0, 4.0, 8.0, 8.0));
    assert!(harness.cache.sheet("items.plist").unwrap().contains("gold.png"));
    assert!(!harness.cache.sheet("items.plist").unwrap().contains("coin.png"));
}

// --- JSON ---

#[test]
fn test_load_json_hash_sheet() {
    let mut harness = Harness::new();
    harness.files.insert("sprites/hero.png", png_bytes(64, 64));
    harness.files.insert(
        "sprites/hero.json",
        r#"{
            "frames": {
                "walk_1.png": {"frame": {"x": 0, "y": 0, "w": 32, "h": 32}},
                "walk_2.png": {"frame": {"x": 32, "y": 0, "w": 32, "h": 32}}
            },
            "meta": {"image": "hero.png"}
        }"#,
    );

    assert!(harness.cache.add_sheet_file("sprites/hero.json", JSON));
    assert!(harness.cache.is_file_loaded("sprites/hero.json"));
    assert_eq!(
        harness.cache.sheet("sprites/hero.json").unwrap().format(),
        JSON
    );
    let walk = harness.cache.frame("walk_2.png").unwrap();
    assert_eq!(walk.texture().path, "sprites/hero.png");
    assert!(harness.textures.get("sprites/hero.png").is_some());
}

#[test]
fn test_plist_and_json_share_one_cache() {
    let mut harness = Harness::with_atlas1();
    harness.files.insert("hero.png", png_bytes(64, 64));
    harness.files.insert(
        "hero.json",
        r#"{"frames": [{"filename": "hero.png", "frame": {"x": 0, "y": 0, "w": 64, "h": 64}}]}"#,
    );

    assert!(harness.cache.add_sheet_file("atlas1.plist", PLIST));
    assert!(harness.cache.add_sheet_file("hero.json", JSON));
    assert_eq!(harness.cache.sheet_count(), 2);

    let atlas = harness.textures.get("atlas.png").unwrap();
    assert_eq!(harness.cache.remove_frames_for_texture(&atlas), 2);
    assert!(harness.cache.sheet("atlas1.plist").is_none());
    assert!(harness.cache.is_file_loaded("hero.json"));
}

// --- In-memory content ---

#[test]
fn test_sheet_content_round_trip() {
    let mut harness = Harness::new();
    let texture = harness.textures.insert(Texture2D::new("mem.png", Extent2D::new(16, 16)));
    let content = plist(
        &[("m1.png", "{{0,0},{8,8}}"), ("m2.png", "{{8,0},{8,8}}")],
        None,
    );

    assert!(harness
        .cache
        .add_sheet_content(content.as_bytes(), texture, PLIST));
    assert_eq!(
        harness.cache.sheet_of("m1.png").map(|sheet| sheet.path()),
        Some(SHEET_CONTENT_SHEET)
    );

    let only_m1 = plist(&[("m1.png", "{{0,0},{8,8}}"), ("zz.png", "{{0,0},{1,1}}")], None);
    assert_eq!(
        harness
            .cache
            .remove_frames_from_content(only_m1.as_bytes(), PLIST),
        1
    );
    assert!(!harness.cache.contains_frame("m1.png"));
    assert!(harness.cache.contains_frame("m2.png"));
}

// --- Retainer ---

#[test]
fn test_retained_sheet_survives_eviction() {
    let mut harness = Harness::with_atlas1();
    harness.files.insert("hero.png", png_bytes(64, 64));
    harness.files.insert(
        "hero.json",
        r#"{"frames": {"hero.png": {"frame": {"x": 0, "y": 0, "w": 64, "h": 64}}}}"#,
    );
    harness.cache.add_sheet_file("atlas1.plist", PLIST);
    harness.cache.add_sheet_file("hero.json", JSON);

    let mut retainer = SpriteFrameRetainer::new();
    assert!(retainer.retain(&harness.cache, "atlas1.plist"));

    assert_eq!(harness.cache.remove_unused_frames(), 1);
    assert!(harness.cache.is_file_loaded("atlas1.plist"));
    assert!(!harness.cache.contains_frame("hero.png"));

    retainer.release("atlas1.plist");
    assert_eq!(harness.cache.remove_unused_frames(), 2);
    assert!(harness.cache.is_empty());
}

#[test]
fn test_builtin_registration_keeps_custom_loaders() {
    let files = Arc::new(MemoryFileSource::new());
    let textures = Arc::new(TextureLibrary::new(files.clone()));
    let custom = Arc::new(PlistSheetLoaderLane::new(files.clone(), textures.clone()));

    let mut cache = SpriteFrameCache::new();
    assert!(cache.register_loader(custom.clone()));
    register_builtin_sheet_loaders(&mut cache, files, textures.clone());

    let registered = cache.loader(PLIST).unwrap();
    assert!(std::ptr::eq(
        Arc::as_ptr(&registered) as *const u8,
        Arc::as_ptr(&custom) as *const u8
    ));
    assert!(cache.loader(JSON).is_some());
    assert!(textures.texture_for_path("nothing.png").is_none());
}
