//! The tray orchestrator: which dice are in play, their lifecycle from
//! selection through roll to results, and the aggregation of per-die values
//! into a displayed total.
//!
//! All mutable roll state lives in one owned [`Tray`] passed by reference
//! to the detector and UI layers; every mutation goes through the
//! operations here. Per-die detectors write disjoint keys of the value map,
//! and readiness is evaluated after each individual upsert, never
//! speculatively.

use std::collections::HashMap;

use glam::Vec3;
use tracing::{debug, info};

use crate::dice::{percentile_total, DieKind, PhysicalDie};

pub type DieId = u64;

/// Pre-roll placement line: dice wait in a row above the tray floor.
const START_X: f32 = -1.5;
const START_SPACING: f32 = 0.75;
const START_HEIGHT: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrayPhase {
    Select,
    Rolling,
    Results,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PercentileRole {
    Tens,
    Units,
}

/// One die instance placed in the tray.
#[derive(Clone, Debug)]
pub struct DiePlan {
    pub id: DieId,
    pub die: PhysicalDie,
    /// Initial pre-roll position.
    pub start: Vec3,
    /// Set when this die is half of a percentile pair: the shared pair id
    /// and this die's role in it.
    pub pair: Option<(u64, PercentileRole)>,
}

/// One user selection: a single die, or a percentile pair displayed as a
/// composite entry.
#[derive(Clone, Debug)]
pub enum Selection {
    Single { kind: DieKind, die: DieId },
    Percentile { pair: u64, tens: DieId, units: DieId },
}

/// Result of one selection after every die settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionResult {
    pub kind: DieKind,
    pub value: u32,
}

pub struct Tray {
    plans: Vec<DiePlan>,
    selections: Vec<Selection>,
    values: HashMap<DieId, u32>,
    roll_token: u64,
    phase: TrayPhase,
    accept_updates: bool,
    next_id: DieId,
    next_pair: u64,
}

impl Default for Tray {
    fn default() -> Self {
        Self::new()
    }
}

impl Tray {
    pub fn new() -> Self {
        Self {
            plans: Vec::new(),
            selections: Vec::new(),
            values: HashMap::new(),
            roll_token: 0,
            phase: TrayPhase::Select,
            accept_updates: true,
            next_id: 1,
            next_pair: 1,
        }
    }

    pub fn phase(&self) -> TrayPhase {
        self.phase
    }

    /// Monotonically increasing; a change signals every detector to begin a
    /// new throw.
    pub fn roll_token(&self) -> u64 {
        self.roll_token
    }

    pub fn plans(&self) -> &[DiePlan] {
        &self.plans
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Display-freeze flag for detector polls. False while results are
    /// shown, so late physics drift cannot change a reported value.
    pub fn accepts_updates(&self) -> bool {
        self.accept_updates
    }

    pub fn value_of(&self, id: DieId) -> Option<u32> {
        self.values.get(&id).copied()
    }

    fn place(&mut self, die: PhysicalDie, pair: Option<(u64, PercentileRole)>) -> DieId {
        let id = self.next_id;
        self.next_id += 1;
        let index = self.plans.len();
        self.plans.push(DiePlan {
            id,
            die,
            start: Vec3::new(
                START_X + index as f32 * START_SPACING,
                START_HEIGHT,
                0.0,
            ),
            pair,
        });
        id
    }

    /// Add a selection. Percentile requests place two dice sharing a pair
    /// id; everything else places one. No-op outside the select phase.
    pub fn add_die(&mut self, kind: DieKind) -> Vec<DieId> {
        if self.phase != TrayPhase::Select {
            return Vec::new();
        }
        let ids = if kind.is_percentile() {
            let pair = self.next_pair;
            self.next_pair += 1;
            let tens = self.place(PhysicalDie::PercentileTens, Some((pair, PercentileRole::Tens)));
            let units =
                self.place(PhysicalDie::PercentileUnits, Some((pair, PercentileRole::Units)));
            self.selections.push(Selection::Percentile { pair, tens, units });
            vec![tens, units]
        } else {
            let [die] = kind.physical() else {
                return Vec::new();
            };
            let id = self.place(*die, None);
            self.selections.push(Selection::Single { kind, die: id });
            vec![id]
        };
        debug!(?kind, ?ids, "die added to tray");
        ids
    }

    /// Begin a throw: clears recorded values, advances to `Rolling`, and
    /// bumps the roll token. Permitted only from `Select` with at least one
    /// die placed.
    pub fn roll(&mut self) -> Option<u64> {
        if self.phase != TrayPhase::Select || self.plans.is_empty() {
            return None;
        }
        self.values.clear();
        self.phase = TrayPhase::Rolling;
        self.accept_updates = true;
        self.roll_token += 1;
        info!(token = self.roll_token, dice = self.plans.len(), "roll started");
        Some(self.roll_token)
    }

    /// Idempotent per-die value upsert; advances to `Results` the moment
    /// every die (and both halves of every percentile pair) has reported.
    pub fn report_value(&mut self, id: DieId, value: u32) {
        if self.phase != TrayPhase::Rolling || !self.accept_updates {
            return;
        }
        if !self.plans.iter().any(|plan| plan.id == id) {
            return;
        }
        if self.values.get(&id) == Some(&value) {
            return;
        }
        self.values.insert(id, value);
        debug!(id, value, "die value recorded");

        if self.results_ready() {
            self.phase = TrayPhase::Results;
            self.accept_updates = false;
            info!(total = self.total().unwrap_or(0), "all dice settled");
        }
    }

    /// True iff every placed die has a recorded value.
    pub fn results_ready(&self) -> bool {
        !self.plans.is_empty()
            && self.plans.iter().all(|plan| self.values.contains_key(&plan.id))
    }

    /// Per-selection results in placement order, with percentile pairs
    /// composed. `None` until every die has reported.
    pub fn results(&self) -> Option<Vec<SelectionResult>> {
        self.selections
            .iter()
            .map(|selection| match *selection {
                Selection::Single { kind, die } => Some(SelectionResult {
                    kind,
                    value: *self.values.get(&die)?,
                }),
                Selection::Percentile { tens, units, .. } => Some(SelectionResult {
                    kind: DieKind::D100,
                    value: percentile_total(
                        *self.values.get(&tens)?,
                        *self.values.get(&units)?,
                    ),
                }),
            })
            .collect()
    }

    pub fn total(&self) -> Option<u32> {
        Some(self.results()?.iter().map(|result| result.value).sum())
    }

    /// Clear everything and return to `Select`, from any phase.
    pub fn reset(&mut self) {
        self.plans.clear();
        self.selections.clear();
        self.values.clear();
        self.roll_token = 0;
        self.phase = TrayPhase::Select;
        self.accept_updates = true;
        debug!("tray reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_die_is_a_noop_outside_select() {
        let mut tray = Tray::new();
        tray.add_die(DieKind::D6);
        tray.roll().unwrap();
        assert!(tray.add_die(DieKind::D8).is_empty());
        assert_eq!(tray.plans().len(), 1);
    }

    #[test]
    fn percentile_selection_places_two_dice_one_entry() {
        let mut tray = Tray::new();
        let ids = tray.add_die(DieKind::D100);
        assert_eq!(ids.len(), 2);
        assert_eq!(tray.plans().len(), 2);
        assert_eq!(tray.selections().len(), 1);
        let roles: Vec<_> = tray.plans().iter().map(|p| p.pair).collect();
        assert_eq!(roles[0].unwrap().1, PercentileRole::Tens);
        assert_eq!(roles[1].unwrap().1, PercentileRole::Units);
        assert_eq!(roles[0].unwrap().0, roles[1].unwrap().0);
    }

    #[test]
    fn roll_requires_dice() {
        let mut tray = Tray::new();
        assert_eq!(tray.roll(), None);
        tray.add_die(DieKind::D20);
        assert_eq!(tray.roll(), Some(1));
        // Already rolling.
        assert_eq!(tray.roll(), None);
    }

    #[test]
    fn results_ready_needs_both_percentile_halves() {
        let mut tray = Tray::new();
        let ids = tray.add_die(DieKind::D100);
        tray.roll().unwrap();

        tray.report_value(ids[0], 30);
        assert!(!tray.results_ready());
        assert_eq!(tray.phase(), TrayPhase::Rolling);

        tray.report_value(ids[1], 7);
        assert!(tray.results_ready());
        assert_eq!(tray.phase(), TrayPhase::Results);
        assert_eq!(tray.total(), Some(37));
    }

    #[test]
    fn double_zero_percentile_reads_one_hundred() {
        let mut tray = Tray::new();
        let ids = tray.add_die(DieKind::D100);
        tray.roll().unwrap();
        tray.report_value(ids[0], 0);
        tray.report_value(ids[1], 0);
        assert_eq!(tray.total(), Some(100));
    }

    #[test]
    fn report_value_is_idempotent_and_scoped_to_known_dice() {
        let mut tray = Tray::new();
        let ids = tray.add_die(DieKind::D6);
        tray.add_die(DieKind::D8);
        tray.roll().unwrap();

        tray.report_value(ids[0], 4);
        tray.report_value(ids[0], 4);
        tray.report_value(999, 1);
        assert_eq!(tray.value_of(ids[0]), Some(4));
        assert_eq!(tray.value_of(999), None);
        assert_eq!(tray.phase(), TrayPhase::Rolling);
    }

    #[test]
    fn reset_returns_to_select_from_any_phase() {
        let mut tray = Tray::new();
        let ids = tray.add_die(DieKind::D6);
        tray.roll().unwrap();
        tray.report_value(ids[0], 6);
        assert_eq!(tray.phase(), TrayPhase::Results);

        tray.reset();
        assert_eq!(tray.phase(), TrayPhase::Select);
        assert!(tray.plans().is_empty());
        assert_eq!(tray.roll_token(), 0);
        assert_eq!(tray.results(), Some(Vec::new()));
        assert!(!tray.results_ready());
    }

    #[test]
    fn placement_positions_are_spread_along_the_line() {
        let mut tray = Tray::new();
        tray.add_die(DieKind::D6);
        tray.add_die(DieKind::D6);
        let starts: Vec<Vec3> = tray.plans().iter().map(|p| p.start).collect();
        assert!(starts[1].x > starts[0].x);
        assert_eq!(starts[0].y, START_HEIGHT);
    }
}
