// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Frame distribution property tests.
//!
//! Tests cover:
//! - Frame conservation of the per-writer split and the file distribution
//! - Agreement with an independent round-robin writer simulation
//! - Gap-free, overlap-free virtual layouts
//! - Trailing partial blocks appearing only in the acquisition's last file

mod common;

use std::path::Path;

use proptest::prelude::*;

use common::Geometry;
use odin_vds::{
    build_layout, frame_distribution, frames_per_writer, Dtype, RoundRobinSimulation,
    TargetRegion,
};

fn geometry() -> impl Strategy<Value = Geometry> {
    (1usize..400, 1usize..12, 0usize..5, 1usize..9).prop_map(
        |(frame_count, frames_per_block, blocks_per_file, n_file_writers)| Geometry {
            frame_count,
            frames_per_block,
            blocks_per_file,
            n_file_writers,
            frame_shape: (1, 1),
        },
    )
}

proptest! {
    #[test]
    fn prop_frames_per_writer_conserves_frames(g in geometry()) {
        let split = frames_per_writer(g.frame_count, g.frames_per_block, g.n_file_writers);
        prop_assert_eq!(split.len(), g.n_file_writers);
        prop_assert_eq!(split.iter().sum::<usize>(), g.frame_count);
    }

    #[test]
    fn prop_overflow_owner_matches_simulation(g in geometry()) {
        let split = frames_per_writer(g.frame_count, g.frames_per_block, g.n_file_writers);
        let sim = g.simulate();
        let mut simulated = vec![0usize; g.n_file_writers];
        for file in sim.files() {
            simulated[file.writer] += file.frames.len();
        }
        prop_assert_eq!(split, simulated);
    }

    #[test]
    fn prop_distribution_matches_simulation(g in geometry()) {
        let dist = frame_distribution(
            g.frame_count, g.frames_per_block, g.blocks_per_file, g.n_file_writers,
        );
        let sim = g.simulate();

        prop_assert_eq!(dist.total_frames(), g.frame_count);
        prop_assert_eq!(
            dist.file_numbers().collect::<Vec<_>>(),
            sim.files().map(|f| f.file_number).collect::<Vec<_>>()
        );
        for (file_number, file) in dist.iter() {
            let simulated = sim.file(file_number).unwrap();
            prop_assert_eq!(file.frames, simulated.frames.len());
            if file.blocks() > 0 {
                prop_assert_eq!(file.start, simulated.frames[0]);
            }
        }
    }

    #[test]
    fn prop_layout_resolves_like_simulation(g in geometry()) {
        let request = g.request(Path::new("/acq"), "test", &["data"], Dtype::UInt16);
        let dist = frame_distribution(
            g.frame_count, g.frames_per_block, g.blocks_per_file, g.n_file_writers,
        );
        let layout = build_layout(&request, &dist, "data");

        prop_assert!(layout.check().is_ok());
        let resolved = layout.resolve().unwrap();
        prop_assert_eq!(resolved, g.simulate().locations());
    }

    #[test]
    fn prop_only_last_file_has_remainder(g in geometry()) {
        let dist = frame_distribution(
            g.frame_count, g.frames_per_block, g.blocks_per_file, g.n_file_writers,
        );
        let sim = g.simulate();
        let last_frame_file = sim
            .files()
            .find(|f| f.frames.last() == Some(&(g.frame_count - 1)))
            .map(|f| f.file_number)
            .unwrap();

        for (file_number, file) in dist.iter() {
            if file.remainder_frames() > 0 {
                prop_assert_eq!(file_number, last_frame_file);
                prop_assert_eq!(file.remainder_frames(), g.frame_count % g.frames_per_block);
            }
        }
    }
}

#[test]
fn test_tail_mapping_for_partial_block() {
    let g = Geometry {
        frame_count: 105,
        frames_per_block: 10,
        blocks_per_file: 3,
        n_file_writers: 4,
        frame_shape: (10, 10),
    };
    let request = g.request(Path::new("/acq"), "test", &["data"], Dtype::Float64);
    let dist = frame_distribution(105, 10, 3, 4);
    let layout = build_layout(&request, &dist, "data");

    let tails: Vec<&TargetRegion> = layout
        .mappings
        .iter()
        .map(|m| &m.target)
        .filter(|t| matches!(t, TargetRegion::Tail(_)))
        .collect();
    assert_eq!(tails, vec![&TargetRegion::Tail(100..105)]);
}

#[test]
fn test_large_acquisition_conserves_frames() {
    let dist = frame_distribution(1_000_000, 500, 1000, 4);
    assert_eq!(dist.total_frames(), 1_000_000);
    assert_eq!(dist.len(), 4);
    let sim = RoundRobinSimulation::run(1_000_000, 500, 1000, 4);
    assert_eq!(sim.file_count(), 4);
}
