use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;
use khora_core::asset::{AssetHandle, SpriteFrame, SpriteSheetFormat};
use khora_core::math::Extent2D;
use khora_core::renderer::Texture2D;
use khora_data::assets::SpriteFrameCache;

const SHEETS: usize = 100;
const FRAMES_PER_SHEET: usize = 100;

fn populated_cache(texture: &AssetHandle<Texture2D>) -> SpriteFrameCache {
    let mut cache = SpriteFrameCache::new();
    for sheet in 0..SHEETS {
        let path = format!("atlas_{sheet}.plist");
        let frames = (0..FRAMES_PER_SHEET).map(|i| {
            let frame = SpriteFrame::from_texture(texture.clone());
            (format!("sheet{sheet}_frame{i}.png"), AssetHandle::new(frame))
        });
        cache.insert_sheet_frames(&path, SpriteSheetFormat::PLIST, frames);
    }
    cache
}

fn bench_sprite_frames(c: &mut Criterion) {
    let texture = AssetHandle::new(Texture2D::new("atlas.png", Extent2D::new(2048, 2048)));
    let cache = populated_cache(&texture);

    let mut group = c.benchmark_group("Sprite Frame Cache");

    group.bench_function("Lookup (10k frames)", |b| {
        b.iter(|| {
            for i in 0..FRAMES_PER_SHEET {
                let name = format!("sheet42_frame{i}.png");
                black_box(cache.find_frame(&name));
            }
        });
    });

    group.bench_function("Remove sheet", |b| {
        b.iter_batched(
            || populated_cache(&texture),
            |mut cache| {
                cache.remove_sheet("atlas_42.plist");
                black_box(cache.frame_count())
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("Remove unused frames", |b| {
        b.iter_batched(
            || populated_cache(&texture),
            |mut cache| black_box(cache.remove_unused_frames()),
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_sprite_frames);
criterion_main!(benches);
