//! # Classifier Benchmark
//!
//! Full classification passes over seeded random volumes and a solid
//! block, plus fragment assembly of the result.
//!
//! Run with: `cargo bench --package chamfer_blocks`

// Benchmarks don't need strict docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use chamfer_blocks::{assemble, BlockType, Classifier, ClassifierConfig, FragmentMap, MeshFragment};
use chamfer_core::{Coord, EditAction, Volume, Voxel};

fn noise_volume(size: i32, density: f64) -> Volume {
    let mut rng = ChaCha8Rng::seed_from_u64(0x00C0_FFEE);
    let mut volume = Volume::new(size, size, size);
    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                if rng.gen_bool(density) {
                    let material = rng.gen_range(1..=4);
                    volume.set(Coord::new(x, y, z), EditAction::Overwrite, Voxel::filled(material));
                }
            }
        }
    }
    volume
}

/// Benchmark: Full pass over random volumes of growing size.
fn bench_classify_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_noise");
    for size in [16, 32, 48] {
        let volume = noise_volume(size, 0.4);
        let mut classifier = Classifier::new(ClassifierConfig::default());
        group.bench_with_input(BenchmarkId::from_parameter(size), &volume, |b, v| {
            b.iter(|| black_box(classifier.classify(v).len()));
        });
    }
    group.finish();
}

/// Benchmark: A solid block is mostly enclosed cells.
fn bench_classify_solid(c: &mut Criterion) {
    let mut volume = Volume::new(32, 32, 32);
    volume.fill(Voxel::filled(1));
    let mut classifier = Classifier::new(ClassifierConfig::default());
    c.bench_function("classify_solid_32", |b| {
        b.iter(|| black_box(classifier.classify(&volume).len()));
    });
}

/// Benchmark: Separate-material classification.
fn bench_classify_separate(c: &mut Criterion) {
    let volume = noise_volume(32, 0.6);
    let mut classifier = Classifier::new(ClassifierConfig {
        separate_materials: true,
        mesh_material_boundaries: true,
        ..ClassifierConfig::default()
    });
    c.bench_function("classify_separate_32", |b| {
        b.iter(|| black_box(classifier.classify(&volume).len()));
    });
}

/// Benchmark: Assembly with one triangle per block.
fn bench_assemble(c: &mut Criterion) {
    let volume = noise_volume(32, 0.4);
    let mut classifier = Classifier::new(ClassifierConfig::default());
    let blocks = classifier.classify(&volume).clone();

    let mut library = FragmentMap::new();
    for block_type in BlockType::ALL {
        library.insert(
            block_type,
            MeshFragment::new(
                vec![[0.25, 0.0, 0.0], [0.0, 0.25, 0.0], [0.0, 0.0, 0.25]],
                vec![0, 1, 2],
            ),
        );
    }

    c.bench_function("assemble_noise_32", |b| {
        b.iter(|| black_box(assemble(&blocks, &library).placed));
    });
}

criterion_group!(
    benches,
    bench_classify_noise,
    bench_classify_solid,
    bench_classify_separate,
    bench_assemble
);
criterion_main!(benches);
