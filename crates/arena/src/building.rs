//! Build battle: grid-snapped placement preview and the structure list.
//!
//! Structures are immutable once placed. Nothing in the simulation edits or
//! removes one; the list is only cleared when a new match starts.

use engine_core::{yaw_degrees_wrapped, Pose, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

/// Edge length of one build cell.
pub const GRID_SIZE: f32 = 4.0;
/// Materials spent per placed structure.
pub const STRUCTURE_COST: i32 = 10;
/// Half-size of the square support footprint around a placement point.
pub const FOOTPRINT_HALF: f32 = GRID_SIZE / 2.0;
/// A floor still holds the player this far below its surface.
const FLOOR_STEP_TOLERANCE: f32 = 0.5;
/// A ramp supports the player from this far below its local surface...
const RAMP_BELOW_TOLERANCE: f32 = 1.0;
/// ...up to this far above it.
const RAMP_ABOVE_TOLERANCE: f32 = 2.0;

/// Kind of structure a build mode places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildType {
    Wall,
    Floor,
    Ramp,
}

impl BuildType {
    pub fn name(&self) -> &'static str {
        match self {
            BuildType::Wall => "wall",
            BuildType::Floor => "floor",
            BuildType::Ramp => "ramp",
        }
    }
}

/// Cosmetic cut-out. Placement always produces `Full`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StructureVariant {
    #[default]
    Full,
    Window,
    Door,
}

/// A placed wall, floor or ramp.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub id: u64,
    pub build_type: BuildType,
    pub position: Vec3,
    /// Yaw, always one of the four cardinal angles.
    pub rotation: f32,
    pub variant: StructureVariant,
}

impl Structure {
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    /// `point` in this structure's local frame, if it lies over the footprint.
    pub fn footprint_local(&self, point: Vec3) -> Option<Vec3> {
        let local = self.pose().world_to_local(point);
        (local.x.abs() < FOOTPRINT_HALF && local.z.abs() < FOOTPRINT_HALF).then_some(local)
    }

    /// Height this structure offers as ground to a player standing at `point`.
    ///
    /// Ramps rise along their local +Z, so a ramp placed in front of the
    /// player climbs away from them.
    pub fn support_height(&self, point: Vec3) -> Option<f32> {
        let local = self.footprint_local(point)?;
        match self.build_type {
            BuildType::Wall => None,
            BuildType::Floor => {
                (point.y >= self.position.y - FLOOR_STEP_TOLERANCE).then_some(self.position.y)
            }
            BuildType::Ramp => {
                let surface = self.position.y + local.z;
                (point.y >= surface - RAMP_BELOW_TOLERANCE
                    && point.y <= surface + RAMP_ABOVE_TOLERANCE)
                    .then_some(surface)
            }
        }
    }
}

/// Where the next structure would go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildPreview {
    pub position: Vec3,
    pub rotation: f32,
}

/// Snap a yaw to the cardinal direction of the 90 degree sector it falls in.
/// Sector boundaries sit at 45, 135, 225 and 315 degrees.
pub fn cardinal_yaw(yaw: f32) -> f32 {
    let deg = yaw_degrees_wrapped(yaw);
    if (45.0..135.0).contains(&deg) {
        FRAC_PI_2
    } else if (135.0..225.0).contains(&deg) {
        PI
    } else if (225.0..315.0).contains(&deg) {
        -FRAC_PI_2
    } else {
        0.0
    }
}

fn snap(value: f32) -> f32 {
    (value / GRID_SIZE).round() * GRID_SIZE
}

/// Grid-snapped placement one cell in front of `pose`. Pure.
pub fn compute_preview(pose: &Pose) -> BuildPreview {
    let front = pose.position + pose.facing() * GRID_SIZE;
    BuildPreview {
        position: Vec3::new(
            snap(front.x),
            snap(pose.position.y) + GRID_SIZE / 2.0,
            snap(front.z),
        ),
        rotation: cardinal_yaw(pose.yaw),
    }
}

/// Build mode selection, live preview and the placed structures.
#[derive(Debug)]
pub struct BuildSystem {
    mode: Option<BuildType>,
    /// Mode restored by the toggle key.
    last_mode: BuildType,
    preview: Option<BuildPreview>,
    structures: Vec<Structure>,
    next_id: u64,
}

impl Default for BuildSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildSystem {
    pub fn new() -> Self {
        Self {
            mode: None,
            last_mode: BuildType::Wall,
            preview: None,
            structures: Vec::new(),
            next_id: 0,
        }
    }

    /// Clear everything for a new match.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn mode(&self) -> Option<BuildType> {
        self.mode
    }

    pub fn is_building(&self) -> bool {
        self.mode.is_some()
    }

    /// Enter a specific build mode.
    pub fn select(&mut self, build_type: BuildType) {
        self.mode = Some(build_type);
        self.last_mode = build_type;
        log::debug!("Build mode: {}", build_type.name());
    }

    /// Flip between combat and the last used build mode.
    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            Some(_) => None,
            None => Some(self.last_mode),
        };
        if self.mode.is_none() {
            self.preview = None;
        }
        log::debug!("Build mode toggled: {:?}", self.mode);
    }

    /// Recompute the preview from the player's pose. No-op outside build mode.
    pub fn update_preview(&mut self, pose: &Pose) {
        self.preview = self.mode.map(|_| compute_preview(pose));
    }

    pub fn preview(&self) -> Option<BuildPreview> {
        self.preview
    }

    /// Append a structure. Never fails: overlapping and floating pieces are fine.
    pub fn confirm_placement(&mut self, build_type: BuildType, preview: BuildPreview) -> &Structure {
        let id = self.next_id;
        self.next_id += 1;
        self.structures.push(Structure {
            id,
            build_type,
            position: preview.position,
            rotation: preview.rotation,
            variant: StructureVariant::Full,
        });
        log::debug!(
            "Placed {} #{} at ({:.0}, {:.0}, {:.0})",
            build_type.name(),
            id,
            preview.position.x,
            preview.position.y,
            preview.position.z
        );
        &self.structures[self.structures.len() - 1]
    }

    /// Place the current mode's structure at the current preview.
    pub fn place_at_preview(&mut self) -> Option<&Structure> {
        let build_type = self.mode?;
        let preview = self.preview?;
        Some(self.confirm_placement(build_type, preview))
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure(build_type: BuildType, position: Vec3, rotation: f32) -> Structure {
        Structure { id: 0, build_type, position, rotation, variant: StructureVariant::Full }
    }

    #[test]
    fn preview_is_pure() {
        let pose = Pose::new(Vec3::new(3.3, 0.0, -7.9), 0.4);
        let a = compute_preview(&pose);
        let b = compute_preview(&pose);
        assert_eq!(a, b);
    }

    #[test]
    fn preview_snaps_one_cell_ahead() {
        // Facing +Z from the origin: the front point is (0, 0, 4).
        let p = compute_preview(&Pose::new(Vec3::ZERO, 0.0));
        assert_eq!(p.position, Vec3::new(0.0, 2.0, 4.0));
        assert_eq!(p.rotation, 0.0);

        // Facing +X from (1, 5, 1): front (5, 5, 1) snaps to (4, 6, 0).
        let p = compute_preview(&Pose::new(Vec3::new(1.0, 5.0, 1.0), FRAC_PI_2));
        assert_eq!(p.position, Vec3::new(4.0, 6.0, 0.0));
        assert_eq!(p.rotation, FRAC_PI_2);
    }

    #[test]
    fn preview_coordinates_are_grid_multiples() {
        for i in 0..32 {
            let yaw = i as f32 * 0.37 - 5.0;
            let pose = Pose::new(Vec3::new(i as f32 * 1.7 - 20.0, i as f32 * 0.9, 13.0 - i as f32), yaw);
            let p = compute_preview(&pose);
            assert_eq!(p.position.x % GRID_SIZE, 0.0);
            assert_eq!(p.position.z % GRID_SIZE, 0.0);
            assert_eq!((p.position.y - GRID_SIZE / 2.0) % GRID_SIZE, 0.0);
        }
    }

    #[test]
    fn rotation_is_always_cardinal() {
        let cardinals = [0.0, FRAC_PI_2, PI, -FRAC_PI_2];
        for i in 0..720 {
            let yaw = (i as f32 - 360.0).to_radians();
            assert!(cardinals.contains(&cardinal_yaw(yaw)), "yaw {yaw}");
        }
    }

    #[test]
    fn sector_boundaries() {
        assert_eq!(cardinal_yaw(44.9f32.to_radians()), 0.0);
        assert_eq!(cardinal_yaw(45.1f32.to_radians()), FRAC_PI_2);
        assert_eq!(cardinal_yaw(134.9f32.to_radians()), FRAC_PI_2);
        assert_eq!(cardinal_yaw(180.0f32.to_radians()), PI);
        assert_eq!(cardinal_yaw(-90.0f32.to_radians()), -FRAC_PI_2);
        assert_eq!(cardinal_yaw(316.0f32.to_radians()), 0.0);
    }

    #[test]
    fn toggle_restores_last_mode() {
        let mut b = BuildSystem::new();
        b.toggle();
        assert_eq!(b.mode(), Some(BuildType::Wall));
        b.select(BuildType::Ramp);
        b.toggle();
        assert_eq!(b.mode(), None);
        b.toggle();
        assert_eq!(b.mode(), Some(BuildType::Ramp));
    }

    #[test]
    fn placement_requires_mode_and_preview() {
        let mut b = BuildSystem::new();
        b.update_preview(&Pose::default());
        assert!(b.preview().is_none());
        assert!(b.place_at_preview().is_none());

        b.select(BuildType::Floor);
        b.update_preview(&Pose::default());
        let placed = b.place_at_preview().cloned().expect("placed");
        assert_eq!(placed.build_type, BuildType::Floor);
        assert_eq!(placed.variant, StructureVariant::Full);
        assert_eq!(b.structures().len(), 1);
    }

    #[test]
    fn overlapping_placements_are_allowed() {
        let mut b = BuildSystem::new();
        let preview = compute_preview(&Pose::default());
        b.confirm_placement(BuildType::Wall, preview);
        b.confirm_placement(BuildType::Wall, preview);
        assert_eq!(b.structures().len(), 2);
        assert_ne!(b.structures()[0].id, b.structures()[1].id);
    }

    #[test]
    fn floor_supports_from_slightly_below() {
        let floor = structure(BuildType::Floor, Vec3::new(0.0, 2.0, 0.0), 0.0);
        assert_eq!(floor.support_height(Vec3::new(1.0, 1.6, 1.0)), Some(2.0));
        assert_eq!(floor.support_height(Vec3::new(1.0, 1.4, 1.0)), None);
        assert_eq!(floor.support_height(Vec3::new(2.5, 3.0, 0.0)), None);
    }

    #[test]
    fn walls_never_support() {
        let wall = structure(BuildType::Wall, Vec3::new(0.0, 2.0, 0.0), 0.0);
        assert_eq!(wall.support_height(Vec3::new(0.0, 2.0, 0.0)), None);
    }

    #[test]
    fn ramp_rises_along_its_facing() {
        let ramp = structure(BuildType::Ramp, Vec3::new(0.0, 2.0, 0.0), FRAC_PI_2);
        // Local +Z is world +X for this rotation.
        let low = ramp.support_height(Vec3::new(-1.5, 0.5, 0.0)).expect("low end");
        let high = ramp.support_height(Vec3::new(1.5, 3.5, 0.0)).expect("high end");
        assert!((low - 0.5).abs() < 1e-4);
        assert!((high - 3.5).abs() < 1e-4);
        // Far above the slope: no support.
        assert_eq!(ramp.support_height(Vec3::new(0.0, 6.0, 0.0)), None);
    }
}
