//! Pointer gestures to overlay transform.
//!
//! One contact drags the overlay, two or more pinch-scale it. The mode is
//! always a function of how many contacts are tracked:
//!
//! | contacts | mode       |
//! |----------|------------|
//! | 0        | `Idle`     |
//! | 1        | `Dragging` |
//! | 2+       | `Pinching` |
//!
//! Only the event that changes the contact count switches mode. A pinch only
//! scales; the midpoint of the two fingers does not pan the overlay.

use crate::model::TransformState;

use super::pointers::{Point, PointerId, PointerSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
    Leave,
}

impl PointerPhase {
    pub fn is_lift(self) -> bool {
        matches!(self, Self::Up | Self::Cancel | Self::Leave)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub id: PointerId,
    pub phase: PointerPhase,
    pub at: Point,
}

impl PointerInput {
    pub fn new(id: PointerId, phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            id,
            phase,
            at: Point::new(x, y),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureMode {
    #[default]
    Idle,
    /// Last recorded position of the single tracked contact.
    Dragging { last: Point },
    /// Baseline captured when the current pinch pair formed.
    Pinching { start_distance: f64, start_scale: f64 },
}

impl GestureMode {
    pub fn for_count(&self, count: usize) -> bool {
        matches!(
            (self, count),
            (Self::Idle, 0) | (Self::Dragging { .. }, 1) | (Self::Pinching { .. }, 2..)
        )
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "drag",
            Self::Pinching { .. } => "pinch",
        }
    }
}

/// What a transition asks of the transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEffect {
    Translate { dx: f64, dy: f64 },
    ScaleTo(f64),
}

#[derive(Clone, Debug, Default)]
pub struct GestureController {
    pointers: PointerSet,
    mode: GestureMode,
}

impl GestureController {
    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn pointers(&self) -> &PointerSet {
        &self.pointers
    }

    /// Feeds one pointer event through the state machine. Bookkeeping always
    /// happens; the transform is only touched while it is unlocked.
    /// Returns whether the transform changed.
    pub fn handle(&mut self, input: PointerInput, transform: &mut TransformState) -> bool {
        if !input.at.is_finite() && !input.phase.is_lift() {
            return false;
        }
        let before = self.pointers.len();
        match input.phase {
            PointerPhase::Down => self.pointers.insert(input.id, input.at),
            PointerPhase::Move => {
                if !self.pointers.update(input.id, input.at) {
                    return false;
                }
            }
            PointerPhase::Up | PointerPhase::Cancel | PointerPhase::Leave => {
                if self.pointers.remove(input.id).is_none() {
                    return false;
                }
            }
        }

        let (mode, effect) =
            Self::transition(self.mode, before, &self.pointers, &input, transform.scale());
        if std::mem::discriminant(&mode) != std::mem::discriminant(&self.mode) {
            tracing::debug!(
                from = self.mode.name(),
                to = mode.name(),
                pointers = self.pointers.len(),
                "gesture mode"
            );
        }
        self.mode = mode;
        debug_assert!(self.mode.for_count(self.pointers.len()));

        match effect {
            _ if transform.locked() => false,
            Some(GestureEffect::Translate { dx, dy }) => transform.translate_by(dx, dy),
            Some(GestureEffect::ScaleTo(s)) => transform.scale_to(s),
            None => false,
        }
    }

    /// Pure transition. `pointers` already reflects `input`; `before` is the
    /// contact count prior to it.
    pub fn transition(
        mode: GestureMode,
        before: usize,
        pointers: &PointerSet,
        input: &PointerInput,
        scale: f64,
    ) -> (GestureMode, Option<GestureEffect>) {
        let after = pointers.len();
        match input.phase {
            PointerPhase::Down if after == before => (mode, None),
            PointerPhase::Down => match after {
                1 => (GestureMode::Dragging { last: input.at }, None),
                2 => (Self::pinch_baseline(pointers, scale), None),
                _ => (mode, None),
            },
            PointerPhase::Move => match mode {
                GestureMode::Dragging { last } => (
                    GestureMode::Dragging { last: input.at },
                    Some(GestureEffect::Translate {
                        dx: input.at.x - last.x,
                        dy: input.at.y - last.y,
                    }),
                ),
                GestureMode::Pinching {
                    start_distance,
                    start_scale,
                } => {
                    let effect = pointers.pair().map(|(a, b)| {
                        let ratio = a.distance(b) / start_distance.max(1.0);
                        GestureEffect::ScaleTo(start_scale * ratio)
                    });
                    (mode, effect)
                }
                GestureMode::Idle => (mode, None),
            },
            PointerPhase::Up | PointerPhase::Cancel | PointerPhase::Leave => match after {
                0 => (GestureMode::Idle, None),
                // Re-seed from the remaining contact so the next move is a
                // small delta, not a jump from a stale position.
                1 => match pointers.first() {
                    Some(last) => (GestureMode::Dragging { last }, None),
                    None => (GestureMode::Idle, None),
                },
                // The pinch pair may have changed; start a fresh baseline.
                _ => (Self::pinch_baseline(pointers, scale), None),
            },
        }
    }

    fn pinch_baseline(pointers: &PointerSet, scale: f64) -> GestureMode {
        let start_distance = pointers.pair().map_or(0.0, |(a, b)| a.distance(b));
        GestureMode::Pinching {
            start_distance,
            start_scale: scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PointerPhase::*;

    fn ev(id: PointerId, phase: PointerPhase, x: f64, y: f64) -> PointerInput {
        PointerInput::new(id, phase, x, y)
    }

    fn run(
        ctl: &mut GestureController,
        ts: &mut TransformState,
        events: &[PointerInput],
    ) {
        for e in events {
            ctl.handle(*e, ts);
            assert!(
                ctl.mode().for_count(ctl.pointers().len()),
                "mode {:?} with {} pointers after {e:?}",
                ctl.mode(),
                ctl.pointers().len()
            );
        }
    }

    #[test]
    fn single_pointer_drag() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        run(&mut ctl, &mut ts, &[ev(1, Down, 50.0, 50.0), ev(1, Move, 60.0, 65.0)]);
        assert_eq!((ts.x(), ts.y()), (10.0, 15.0));
    }

    #[test]
    fn drag_deltas_telescope() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        ts.translate_by(5.0, 0.0);
        run(
            &mut ctl,
            &mut ts,
            &[
                ev(1, Down, 3.0, 4.0),
                ev(1, Move, 17.5, -2.0),
                ev(1, Move, -40.25, 9.0),
            ],
        );
        assert_eq!(ts.x(), 5.0 + (-40.25 - 3.0));
        assert_eq!(ts.y(), 9.0 - 4.0);
    }

    #[test]
    fn pinch_doubles_scale() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        run(
            &mut ctl,
            &mut ts,
            &[ev(1, Down, 0.0, 0.0), ev(2, Down, 100.0, 0.0)],
        );
        assert_eq!(
            ctl.mode(),
            GestureMode::Pinching {
                start_distance: 100.0,
                start_scale: 1.0
            }
        );
        run(&mut ctl, &mut ts, &[ev(2, Move, 200.0, 0.0)]);
        assert_eq!(ts.scale(), 2.0);
        assert_eq!((ts.x(), ts.y()), (0.0, 0.0), "pinch must not pan");
    }

    #[test]
    fn pinch_is_clamped() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        run(
            &mut ctl,
            &mut ts,
            &[
                ev(1, Down, 0.0, 0.0),
                ev(2, Down, 10.0, 0.0),
                ev(2, Move, 1000.0, 0.0),
            ],
        );
        assert_eq!(ts.scale(), 3.0);
        run(&mut ctl, &mut ts, &[ev(2, Move, 0.5, 0.0)]);
        assert_eq!(ts.scale(), 0.25);
    }

    #[test]
    fn coincident_fingers_do_not_blow_up() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        run(
            &mut ctl,
            &mut ts,
            &[
                ev(1, Down, 40.0, 40.0),
                ev(2, Down, 40.0, 40.0),
                ev(2, Move, 41.5, 40.0),
            ],
        );
        assert_eq!(ts.scale(), 1.5);
    }

    #[test]
    fn third_finger_is_tracked_but_ignored() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        run(
            &mut ctl,
            &mut ts,
            &[
                ev(1, Down, 0.0, 0.0),
                ev(2, Down, 100.0, 0.0),
                ev(3, Down, 500.0, 500.0),
                ev(3, Move, 900.0, 900.0),
            ],
        );
        assert_eq!(ctl.pointers().len(), 3);
        assert_eq!(ts.scale(), 1.0);
        assert!(matches!(
            ctl.mode(),
            GestureMode::Pinching { start_distance, .. } if start_distance == 100.0
        ));
    }

    #[test]
    fn lifting_to_one_finger_reseeds_drag() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        run(
            &mut ctl,
            &mut ts,
            &[
                ev(1, Down, 0.0, 0.0),
                ev(2, Down, 100.0, 0.0),
                ev(2, Move, 150.0, 0.0),
                ev(1, Up, 0.0, 0.0),
            ],
        );
        assert_eq!(
            ctl.mode(),
            GestureMode::Dragging {
                last: Point::new(150.0, 0.0)
            }
        );
        run(&mut ctl, &mut ts, &[ev(2, Move, 152.0, 3.0)]);
        assert_eq!((ts.x(), ts.y()), (2.0, 3.0));
        assert_eq!(ts.scale(), 1.5);
    }

    #[test]
    fn changing_pinch_pair_rebaselines() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        run(
            &mut ctl,
            &mut ts,
            &[
                ev(1, Down, 0.0, 0.0),
                ev(2, Down, 100.0, 0.0),
                ev(3, Down, 100.0, 300.0),
                ev(2, Move, 200.0, 0.0),
                ev(1, Cancel, 0.0, 0.0),
            ],
        );
        assert_eq!(ts.scale(), 2.0);
        assert_eq!(
            ctl.mode(),
            GestureMode::Pinching {
                start_distance: 100.0_f64.hypot(-300.0),
                start_scale: 2.0
            }
        );
        // Nothing moved yet, so the next move at the same spot keeps the scale.
        run(&mut ctl, &mut ts, &[ev(3, Move, 100.0, 300.0)]);
        assert!((ts.scale() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn last_lift_goes_idle() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        run(
            &mut ctl,
            &mut ts,
            &[
                ev(1, Down, 0.0, 0.0),
                ev(2, Down, 10.0, 0.0),
                ev(2, Leave, 10.0, 0.0),
                ev(1, Up, 0.0, 0.0),
            ],
        );
        assert_eq!(ctl.mode(), GestureMode::Idle);
        assert!(ctl.pointers().is_empty());
    }

    #[test]
    fn unknown_ids_and_repeat_downs_are_harmless() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        run(
            &mut ctl,
            &mut ts,
            &[
                ev(9, Move, 10.0, 10.0),
                ev(9, Up, 10.0, 10.0),
                ev(1, Down, 0.0, 0.0),
                ev(1, Down, 20.0, 0.0),
                ev(1, Move, 25.0, 0.0),
                ev(4, Leave, 0.0, 0.0),
            ],
        );
        assert_eq!(ctl.pointers().len(), 1);
        // The repeated down refreshes the tracked position but keeps the
        // drag baseline, so the move is measured from the first down.
        assert_eq!(ts.x(), 25.0);
    }

    #[test]
    fn locked_blocks_mutation_but_keeps_bookkeeping() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        ts.translate_by(3.0, 4.0);
        ts.set_locked(true);
        let frozen = ts.clone();
        run(
            &mut ctl,
            &mut ts,
            &[
                ev(1, Down, 0.0, 0.0),
                ev(1, Move, 10.0, 10.0),
                ev(2, Down, 50.0, 10.0),
                ev(2, Move, 300.0, 10.0),
                ev(1, Up, 10.0, 10.0),
                ev(2, Move, 320.0, 40.0),
            ],
        );
        assert_eq!(ts, frozen);
        assert_eq!(ctl.pointers().len(), 1);
        assert_eq!(
            ctl.mode(),
            GestureMode::Dragging {
                last: Point::new(320.0, 40.0)
            }
        );

        ts.set_opacity(0.8);
        assert_eq!(ts.opacity(), 0.8);

        // Unlocking mid-drag continues from the latest position, no jump.
        ts.set_locked(false);
        run(&mut ctl, &mut ts, &[ev(2, Move, 321.0, 41.0)]);
        assert_eq!((ts.x(), ts.y()), (4.0, 5.0));
    }

    #[test]
    fn non_finite_coordinates_are_dropped() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        run(
            &mut ctl,
            &mut ts,
            &[
                ev(1, Down, 0.0, 0.0),
                ev(1, Move, f64::NAN, 5.0),
                ev(2, Down, f64::INFINITY, 0.0),
                ev(1, Move, 1.0, 1.0),
            ],
        );
        assert_eq!(ctl.pointers().len(), 1);
        assert_eq!((ts.x(), ts.y()), (1.0, 1.0));
        run(&mut ctl, &mut ts, &[ev(1, Up, f64::NAN, f64::NAN)]);
        assert_eq!(ctl.mode(), GestureMode::Idle);
    }

    #[test]
    fn mode_tracks_count_under_interleaving() {
        let mut ctl = GestureController::default();
        let mut ts = TransformState::default();
        // Deterministic pseudo-random interleaving of four fingers.
        let mut seed: u32 = 0x2545_f491;
        for step in 0..2000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let id = (seed % 4) as PointerId;
            let phase = match (seed >> 8) % 5 {
                0 => Down,
                1 | 2 => Move,
                3 => Up,
                _ => Cancel,
            };
            let x = f64::from((seed >> 4) % 640);
            let y = f64::from((seed >> 12) % 480);
            ctl.handle(ev(id, phase, x, y), &mut ts);
            assert!(ctl.mode().for_count(ctl.pointers().len()), "step {step}");
            assert!(ts.bounds().contains(ts.scale()));
            assert!(ts.x().is_finite() && ts.y().is_finite());
        }
    }

    #[test]
    fn transition_is_pure() {
        let mut set = PointerSet::default();
        set.insert(1, Point::new(0.0, 0.0));
        let input = ev(1, Down, 0.0, 0.0);
        let (mode, effect) = GestureController::transition(GestureMode::Idle, 0, &set, &input, 1.0);
        assert_eq!(
            mode,
            GestureMode::Dragging {
                last: Point::new(0.0, 0.0)
            }
        );
        assert_eq!(effect, None);

        set.update(1, Point::new(4.0, -2.0));
        let (_, effect) =
            GestureController::transition(mode, 1, &set, &ev(1, Move, 4.0, -2.0), 1.0);
        assert_eq!(effect, Some(GestureEffect::Translate { dx: 4.0, dy: -2.0 }));
    }
}
