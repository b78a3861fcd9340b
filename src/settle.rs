//! Settle detection: deciding when a thrown die has come to rest and which
//! face it rests on.
//!
//! Each die instance owns one detector. The host polls it on a fixed timer,
//! independent of the physics step; every poll reads only the body's
//! current state. A reading is the face group most aligned with the world
//! up (or down) axis; the detector commits once the same reading repeats
//! for a configured number of consecutive polls below the speed threshold.

use std::time::Duration;

use glam::Vec3;
use tracing::{debug, info};

use crate::dice::{DieAssets, DieSpec, ReadMode};
use crate::physics::BodySample;

/// Behavioral constants of the detector. The defaults mirror observed
/// tabletop feel; tests inject tighter values.
#[derive(Debug, Clone, Copy)]
pub struct SettleConfig {
    /// Linear speed at or below which a die counts as settling.
    pub speed_threshold: f32,
    /// How often the host is expected to poll.
    pub poll_interval: Duration,
    /// Consecutive identical readings required to commit.
    pub required_stable: u32,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            speed_threshold: 0.12,
            poll_interval: Duration::from_millis(120),
            required_stable: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlePhase {
    /// Placed, not yet thrown.
    Idle,
    /// Thrown, speed above threshold.
    Moving,
    /// Below threshold, face tracking in progress.
    Settling,
    /// Value reported; frozen until the next roll token.
    Committed,
}

/// Per-die settle state machine.
#[derive(Debug)]
pub struct SettleDetector {
    config: SettleConfig,
    phase: SettlePhase,
    roll_token: u64,
    last_group: Option<usize>,
    stable_reads: u32,
    committed: Option<u32>,
}

impl SettleDetector {
    pub fn new(config: SettleConfig) -> Self {
        Self {
            config,
            phase: SettlePhase::Idle,
            roll_token: 0,
            last_group: None,
            stable_reads: 0,
            committed: None,
        }
    }

    pub fn phase(&self) -> SettlePhase {
        self.phase
    }

    pub fn config(&self) -> &SettleConfig {
        &self.config
    }

    /// The throw this detector is currently tracking.
    pub fn roll_token(&self) -> u64 {
        self.roll_token
    }

    /// The value committed for the current throw, if any.
    pub fn committed(&self) -> Option<u32> {
        self.committed
    }

    /// A new roll token cancels all accumulated stability state and starts
    /// tracking the new throw.
    pub fn begin_roll(&mut self, token: u64) {
        debug!(token, "settle detector reset for new throw");
        self.roll_token = token;
        self.phase = SettlePhase::Moving;
        self.last_group = None;
        self.stable_reads = 0;
        self.committed = None;
    }

    /// One poll tick. Returns `Some(value)` exactly once per throw, at the
    /// moment the stability requirement is first met.
    ///
    /// `accept_updates` is the external display-freeze flag: while false the
    /// poll is a no-op (the timer keeps running, committed state stays put).
    pub fn poll(
        &mut self,
        spec: &DieSpec,
        assets: &DieAssets,
        sample: &BodySample,
        accept_updates: bool,
    ) -> Option<u32> {
        if !accept_updates {
            return None;
        }
        match self.phase {
            SettlePhase::Idle | SettlePhase::Committed => return None,
            SettlePhase::Moving | SettlePhase::Settling => {}
        }

        if sample.speed() > self.config.speed_threshold {
            // Still tumbling; any partial stability streak is void.
            self.phase = SettlePhase::Moving;
            self.last_group = None;
            self.stable_reads = 0;
            return None;
        }

        self.phase = SettlePhase::Settling;
        let group = resting_group(spec, assets, sample);
        if self.last_group == Some(group) {
            self.stable_reads += 1;
        } else {
            self.last_group = Some(group);
            self.stable_reads = 1;
        }

        if self.stable_reads >= self.config.required_stable {
            let value = spec.value_of(group, &assets.groups);
            self.phase = SettlePhase::Committed;
            self.committed = Some(value);
            info!(die = ?spec.die, group, value, "die settled");
            return Some(value);
        }
        None
    }
}

/// The face group currently resting toward the read direction: transform
/// every triangle into world space and take the one whose normal best
/// aligns with up (or down, for bottom-read dice).
fn resting_group(spec: &DieSpec, assets: &DieAssets, sample: &BodySample) -> usize {
    let axis = match spec.read_mode {
        ReadMode::Top => Vec3::Y,
        ReadMode::Bottom => Vec3::NEG_Y,
    };

    let mesh = &assets.mesh;
    let flat = mesh
        .triangle_indices()
        .unwrap_or_default();

    let mut best_tri = 0;
    let mut best_dot = f32::NEG_INFINITY;
    for tri in 0..flat.len() / 3 {
        let [a, b, c] = [
            sample.transform.transform_point3(mesh.positions()[flat[tri * 3] as usize]),
            sample.transform.transform_point3(mesh.positions()[flat[tri * 3 + 1] as usize]),
            sample.transform.transform_point3(mesh.positions()[flat[tri * 3 + 2] as usize]),
        ];
        let dot = crate::geometry::triangle_normal(a, b, c).dot(axis);
        if dot > best_dot {
            best_dot = dot;
            best_tri = tri;
        }
    }
    assets.group_of_triangle(best_tri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::PhysicalDie;
    use glam::{Mat4, Quat};

    fn test_config() -> SettleConfig {
        SettleConfig {
            speed_threshold: 0.12,
            poll_interval: Duration::from_millis(1),
            required_stable: 3,
        }
    }

    fn resting_sample(transform: Mat4) -> BodySample {
        BodySample {
            linvel: Vec3::splat(0.01),
            transform,
        }
    }

    fn facing_up(spec: &DieSpec, assets: &DieAssets, group: usize) -> Mat4 {
        let axis = match spec.read_mode {
            ReadMode::Top => Vec3::Y,
            ReadMode::Bottom => Vec3::NEG_Y,
        };
        Mat4::from_quat(Quat::from_rotation_arc(assets.groups[group].normal, axis))
    }

    #[test]
    fn commits_exactly_once_after_three_stable_reads() {
        let spec = PhysicalDie::D6.spec();
        let assets = spec.build_assets().unwrap();
        let sample = resting_sample(facing_up(spec, &assets, 3));

        let mut detector = SettleDetector::new(test_config());
        detector.begin_roll(1);

        assert_eq!(detector.poll(spec, &assets, &sample, true), None);
        assert_eq!(detector.poll(spec, &assets, &sample, true), None);
        assert_eq!(detector.poll(spec, &assets, &sample, true), Some(4));
        assert_eq!(detector.phase(), SettlePhase::Committed);
        // A fourth identical reading does not re-fire or change the value.
        assert_eq!(detector.poll(spec, &assets, &sample, true), None);
        assert_eq!(detector.committed(), Some(4));
    }

    #[test]
    fn motion_resets_the_stability_streak() {
        let spec = PhysicalDie::D6.spec();
        let assets = spec.build_assets().unwrap();
        let resting = resting_sample(facing_up(spec, &assets, 0));
        let tumbling = BodySample {
            linvel: Vec3::new(2.0, 0.0, 0.0),
            transform: resting.transform,
        };

        let mut detector = SettleDetector::new(test_config());
        detector.begin_roll(1);
        detector.poll(spec, &assets, &resting, true);
        detector.poll(spec, &assets, &resting, true);
        // Bounce: back to moving, streak voided.
        assert_eq!(detector.poll(spec, &assets, &tumbling, true), None);
        assert_eq!(detector.phase(), SettlePhase::Moving);
        assert_eq!(detector.poll(spec, &assets, &resting, true), None);
        assert_eq!(detector.poll(spec, &assets, &resting, true), None);
        assert_eq!(detector.poll(spec, &assets, &resting, true), Some(1));
    }

    #[test]
    fn frozen_polls_are_no_ops() {
        let spec = PhysicalDie::D6.spec();
        let assets = spec.build_assets().unwrap();
        let sample = resting_sample(facing_up(spec, &assets, 2));

        let mut detector = SettleDetector::new(test_config());
        detector.begin_roll(1);
        for _ in 0..10 {
            assert_eq!(detector.poll(spec, &assets, &sample, false), None);
        }
        assert_eq!(detector.phase(), SettlePhase::Moving);
    }

    #[test]
    fn new_roll_token_clears_committed_state() {
        let spec = PhysicalDie::D6.spec();
        let assets = spec.build_assets().unwrap();
        let sample = resting_sample(facing_up(spec, &assets, 1));

        let mut detector = SettleDetector::new(test_config());
        detector.begin_roll(1);
        for _ in 0..3 {
            detector.poll(spec, &assets, &sample, true);
        }
        assert_eq!(detector.committed(), Some(2));

        detector.begin_roll(2);
        assert_eq!(detector.committed(), None);
        assert_eq!(detector.phase(), SettlePhase::Moving);
    }

    #[test]
    fn d4_reads_the_bottom_face() {
        let spec = PhysicalDie::D4.spec();
        let assets = spec.build_assets().unwrap();
        // Point group 2's normal straight down; a bottom-read die should
        // report that face.
        let transform = Mat4::from_quat(Quat::from_rotation_arc(
            assets.groups[2].normal,
            Vec3::NEG_Y,
        ));
        let sample = resting_sample(transform);

        let mut detector = SettleDetector::new(test_config());
        detector.begin_roll(1);
        detector.poll(spec, &assets, &sample, true);
        detector.poll(spec, &assets, &sample, true);
        assert_eq!(detector.poll(spec, &assets, &sample, true), Some(3));
    }
}
