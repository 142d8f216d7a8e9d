//! # Classifier Scenario Tests
//!
//! Whole-volume shapes with known block counts, plus purity and
//! enclosure properties over seeded random volumes.

use chamfer_blocks::{
    classify, BlockDescriptor, BlockType, Classifier, ClassifierConfig, MaterialBuckets,
};
use chamfer_core::{Axis, Coord, EditAction, Volume, Voxel};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn sorted(blocks: impl Iterator<Item = BlockDescriptor>) -> Vec<BlockDescriptor> {
    let mut v: Vec<BlockDescriptor> = blocks.collect();
    v.sort_unstable();
    v
}

fn random_volume(rng: &mut ChaCha8Rng, size: i32, materials: u8) -> Volume {
    let mut volume = Volume::new(size, size, size);
    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                if rng.gen_bool(0.45) {
                    let m = rng.gen_range(1..=materials);
                    volume.set(Coord::new(x, y, z), EditAction::Overwrite, Voxel::filled(m));
                }
            }
        }
    }
    volume
}

/// Test: A lone cell in an open 3x3x3 volume is eight corners.
#[test]
fn test_single_cell_scenario() {
    let mut v = Volume::new(3, 3, 3);
    v.set(Coord::new(1, 1, 1), EditAction::Overwrite, Voxel::filled(7));
    let blocks = classify(&v, ClassifierConfig::default());

    assert_eq!(blocks.len(), 8);
    let mut signs: Vec<[i8; 3]> = blocks
        .descriptors()
        .map(|d| {
            assert_eq!(d.block_type, BlockType::Corner);
            assert_eq!(d.axis, None);
            assert_eq!(d.material, 7);
            d.sign
        })
        .collect();
    signs.sort_unstable();
    signs.dedup();
    assert_eq!(signs.len(), 8);
}

/// Test: A 2x2x1 slab: faces on top and bottom, edges around the rim,
/// corners at the four vertical edges.
#[test]
fn test_slab_scenario() {
    let mut v = Volume::new(4, 4, 3);
    v.set_range(
        Coord::new(1, 1, 0),
        Coord::new(2, 2, 0),
        EditAction::Overwrite,
        Voxel::filled(1),
    );
    let blocks = classify(&v, ClassifierConfig::default());

    assert_eq!(blocks.count(BlockType::Side), 8);
    assert_eq!(blocks.count(BlockType::Edge), 16);
    assert_eq!(blocks.count(BlockType::Corner), 8);
    assert_eq!(blocks.len(), 32);

    for d in blocks.descriptors() {
        match d.block_type {
            BlockType::Side => assert_eq!(d.axis, Some(Axis::Z)),
            BlockType::Edge => assert_ne!(d.axis, Some(Axis::Z)),
            _ => assert_eq!(d.axis, None),
        }
    }
}

/// Test: The same slab against the volume floor with a closed boundary
/// loses its bottom detail.
#[test]
fn test_closed_boundary_slab() {
    let mut v = Volume::new(2, 2, 2);
    v.set_range(
        Coord::new(0, 0, 0),
        Coord::new(1, 1, 0),
        EditAction::Overwrite,
        Voxel::filled(1),
    );
    let config = ClassifierConfig {
        open_on_sides: false,
        ..ClassifierConfig::default()
    };
    let blocks = classify(&v, config);
    // Bottom octants clamp onto the layer itself and vanish; the four upper
    // octants of each cell see a full layer beside them.
    assert_eq!(blocks.len(), 16);
    assert_eq!(blocks.count(BlockType::Side), 16);
    for d in blocks.descriptors() {
        assert_eq!(d.sign[2], 1);
    }
}

/// Test: A fully enclosed cell produces nothing.
#[test]
fn test_full_enclosure_elision() {
    let mut v = Volume::new(5, 5, 5);
    v.set_range(
        Coord::new(1, 1, 1),
        Coord::new(3, 3, 3),
        EditAction::Overwrite,
        Voxel::filled(1),
    );
    let mut classifier = Classifier::default();
    let blocks = classifier.classify(&v);
    assert!(blocks
        .descriptors()
        .all(|d| d.cell() != Coord::new(2, 2, 2)));
    assert_eq!(classifier.stats().enclosed, 1);
}

/// Test: A 3x3x3 cube has corners, edges and sides in the expected counts.
#[test]
fn test_cube_surface_counts() {
    let mut v = Volume::new(5, 5, 5);
    v.set_range(
        Coord::new(1, 1, 1),
        Coord::new(3, 3, 3),
        EditAction::Overwrite,
        Voxel::filled(1),
    );
    let blocks = classify(&v, ClassifierConfig::default());
    // 8 cube corners, one octant each.
    assert_eq!(blocks.count(BlockType::Corner), 8);
    // 12 cube edges, 3 cells x 2 octants = 6 octants each, minus corner
    // octants: 12 * 4 = 48.
    assert_eq!(blocks.count(BlockType::Edge), 48);
    // 6 faces, 6x6 octants each minus the rim: 6 * 16 = 96.
    assert_eq!(blocks.count(BlockType::Side), 96);
    assert_eq!(blocks.len(), 152);
}

/// Test: An L-shaped notch produces concave blocks.
#[test]
fn test_concave_blocks_appear() {
    let mut v = Volume::new(4, 4, 4);
    v.set_range(
        Coord::new(0, 0, 0),
        Coord::new(2, 0, 2),
        EditAction::Overwrite,
        Voxel::filled(1),
    );
    v.set_range(
        Coord::new(0, 1, 0),
        Coord::new(0, 2, 2),
        EditAction::Overwrite,
        Voxel::filled(1),
    );
    let blocks = classify(&v, ClassifierConfig::default());
    assert!(blocks.count(BlockType::NegativeEdge) > 0);
    for d in blocks
        .descriptors()
        .filter(|d| d.block_type == BlockType::NegativeEdge)
    {
        assert_eq!(d.axis, Some(Axis::Z));
    }
}

/// Test: Separate materials hide the seam unless boundaries are meshed.
#[test]
fn test_material_separation() {
    let mut v = Volume::new(4, 3, 3);
    v.set(Coord::new(1, 1, 1), EditAction::Overwrite, Voxel::filled(1));
    v.set(Coord::new(2, 1, 1), EditAction::Overwrite, Voxel::filled(2));

    let joined = classify(&v, ClassifierConfig::default());
    assert_eq!(joined.count(BlockType::Edge), 8);
    assert_eq!(joined.get(1).len(), 8);
    assert_eq!(joined.get(2).len(), 8);

    let separate = ClassifierConfig {
        separate_materials: true,
        ..ClassifierConfig::default()
    };
    let hidden = classify(&v, separate);
    assert_eq!(
        sorted(hidden.descriptors().copied()),
        sorted(joined.descriptors().copied())
    );

    let meshed = classify(
        &v,
        ClassifierConfig {
            mesh_material_boundaries: true,
            ..separate
        },
    );
    assert_eq!(meshed.count(BlockType::Corner), 16);
    assert_eq!(meshed.count(BlockType::Edge), 0);
}

/// Side, edge and corner counts over the upper octants of one material.
fn upper_rim(blocks: &MaterialBuckets, material: u8) -> [usize; 3] {
    let mut counts = [0; 3];
    for d in blocks.get(material).iter().filter(|d| d.sign[2] == 1) {
        match d.block_type {
            BlockType::Side => counts[0] += 1,
            BlockType::Edge => counts[1] += 1,
            BlockType::Corner => counts[2] += 1,
            _ => {}
        }
    }
    counts
}

/// Test: A red layer under a blue layer keeps its rim joined to the blue one
/// when the seam is hidden, and becomes its own slab when it is meshed.
#[test]
fn test_stacked_materials_rim() {
    let mut v = Volume::new(5, 5, 4);
    v.set_range(
        Coord::new(1, 1, 1),
        Coord::new(3, 3, 1),
        EditAction::Overwrite,
        Voxel::filled(1),
    );
    v.set_range(
        Coord::new(1, 1, 2),
        Coord::new(3, 3, 2),
        EditAction::Overwrite,
        Voxel::filled(2),
    );

    let joined = classify(&v, ClassifierConfig::default());
    assert_eq!(upper_rim(&joined, 1), [16, 4, 0]);

    let separate = ClassifierConfig {
        separate_materials: true,
        ..ClassifierConfig::default()
    };
    let hidden = classify(&v, separate);
    assert_eq!(upper_rim(&hidden, 1), [16, 4, 0]);
    for material in [1, 2] {
        assert_eq!(
            sorted(hidden.get(material).iter().copied()),
            sorted(joined.get(material).iter().copied())
        );
    }

    let meshed = classify(
        &v,
        ClassifierConfig {
            mesh_material_boundaries: true,
            ..separate
        },
    );
    assert_eq!(upper_rim(&meshed, 1), [16, 16, 4]);
    for d in meshed.get(1).iter().filter(|d| d.block_type == BlockType::Side) {
        assert_eq!(d.axis, Some(Axis::Z));
    }
}

/// Test: Two passes over unchanged input are identical, in order too.
#[test]
fn test_classifier_purity() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..8 {
        let v = random_volume(&mut rng, 8, 3);
        for config in [
            ClassifierConfig::default(),
            ClassifierConfig {
                merge_close_edges: false,
                open_on_sides: false,
                separate_materials: true,
                mesh_material_boundaries: true,
            },
        ] {
            let mut classifier = Classifier::new(config);
            let first: Vec<BlockDescriptor> = classifier.classify(&v).descriptors().copied().collect();
            let second: Vec<BlockDescriptor> = classifier.classify(&v).descriptors().copied().collect();
            assert_eq!(first, second);

            let fresh = classify(&v, config);
            assert_eq!(sorted(fresh.descriptors().copied()), sorted(first.into_iter()));
        }
    }
}

/// Test: Mirroring the volume mirrors the descriptors.
#[test]
fn test_classification_follows_mirror() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..8 {
        let v = random_volume(&mut rng, 6, 1);
        let mut m = v.clone();
        m.mirror(Axis::X);
        let width = v.width() as i32;

        let original = classify(&v, ClassifierConfig::default());
        let reflected = sorted(original.descriptors().map(|d| {
            let mut r = *d;
            r.sign[0] = -r.sign[0];
            r.anchor.x = 4 * width - r.anchor.x;
            r
        }));
        let mirrored = sorted(classify(&m, ClassifierConfig::default()).descriptors().copied());
        assert_eq!(reflected, mirrored);
    }
}
