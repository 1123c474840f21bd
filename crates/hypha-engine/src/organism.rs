//! Branch tips and the organisms that own them.
//!
//! An organism is a set of growing branch tips plus the species profile
//! resolved at placement time. Cloning the profile into the organism means
//! the tick loop never performs a name lookup that could fail: the
//! unknown-species fault can only occur at the command surface.

use hypha_core::id::OrganismId;
use hypha_core::species::SpeciesProfile;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// A single growing tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    /// x position in the dish bounding box.
    pub x: f32,
    /// y position in the dish bounding box.
    pub y: f32,
    /// Growth direction in radians.
    pub angle: f32,
    /// Ticks survived.
    pub age: u32,
    /// Consecutive ticks of contact with the dish edge.
    pub boundary_ticks: u32,
}

impl Branch {
    /// A fresh tip at a position, heading along `angle`.
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            x,
            y,
            angle,
            age: 0,
            boundary_ticks: 0,
        }
    }
}

/// Branch storage with inline capacity for the initial tip count.
pub type BranchList = SmallVec<[Branch; 8]>;

/// One colony: a desired sample species or an undesired contaminant.
#[derive(Clone, Debug)]
pub struct Organism {
    /// Unique identifier.
    pub id: OrganismId,
    /// The resolved species profile. `profile.name` is the species name.
    pub profile: SpeciesProfile,
    /// Whether the profile came from the contaminant table.
    pub contaminant: bool,
    /// Live branch tips. An organism with no tips is dead and is removed
    /// on the tick's cleanup pass.
    pub branches: BranchList,
    /// Total nutrient actually consumed by this organism's tips.
    pub nutrients_absorbed: f32,
}

impl Organism {
    /// Sprout a new organism: `tips` branches radiating at evenly spaced
    /// angles from `(x, y)`, each nudged by placement jitter.
    pub fn sprout(
        id: OrganismId,
        profile: SpeciesProfile,
        contaminant: bool,
        x: f32,
        y: f32,
        tips: u32,
        placement_jitter: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let step = TAU / tips.max(1) as f32;
        let branches = (0..tips)
            .map(|i| Branch::new(x, y, i as f32 * step + jitter(rng, placement_jitter)))
            .collect();
        Self {
            id,
            profile,
            contaminant,
            branches,
            nutrients_absorbed: 0.0,
        }
    }
}

/// A uniform draw in `[-half_width, half_width)`, or exactly zero when the
/// width is zero (sampling an empty range would panic).
pub(crate) fn jitter(rng: &mut impl Rng, half_width: f32) -> f32 {
    if half_width > 0.0 {
        rng.random_range(-half_width..half_width)
    } else {
        0.0
    }
}
