use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config,
    core::World,
    types::{BodyId, Rgb, Vec2},
};

const AGITATED_COLOR: Rgb = Rgb::new(0x22, 0x22, 0x22);
const RELEASE_COLOR: Rgb = Rgb::new(0xff, 0xff, 0xff);
const EVADE_COLOR: Rgb = Rgb::new(0x23, 0x37, 0xff);

/// The three mutually exclusive behavior modes of the actor. Exactly one is
/// active at any step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Agitated,
    Release,
    Evade,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Agitated => "agitated",
            Phase::Release => "release",
            Phase::Evade => "evade",
        }
    }
}

/// Phase selection is a pure function of the scaled clock. Agitated takes
/// precedence when both modulus windows line up.
pub fn select(t: f32) -> Phase {
    if (t % config::AGITATED_MODULUS).floor() == 0.0 {
        Phase::Agitated
    } else if (t % config::RELEASE_MODULUS).floor() == 0.0 {
        Phase::Release
    } else {
        Phase::Evade
    }
}

fn logistic(x: f32, r: f32) -> f32 {
    r * x * (1.0 - x)
}

/// Step intensity: the logistic map evaluated at its fixed operating point,
/// scaled by a fresh draw. Reduces to `0.16 * r`.
pub fn intensity(r: f32) -> f32 {
    logistic(config::LOGISTIC_POINT, r)
}

/// One-time visual rescale on phase entry. Returns `None` while the phase
/// continues; entries compound multiplicatively, never reset.
fn entry_scale(previous: Option<Phase>, current: Phase) -> Option<f32> {
    if previous == Some(current) {
        return None;
    }
    Some(match current {
        Phase::Agitated => config::AGITATED_ENTRY_SCALE,
        Phase::Release => config::RELEASE_ENTRY_SCALE,
        Phase::Evade => config::EVADE_ENTRY_SCALE,
    })
}

/// Evade kick: a coin flip decides which axis gets the one-signed draw.
fn evade_force(i: f32, a: f32, b: f32, swap: bool) -> Vec2 {
    if swap {
        Vec2::new(i * a, i * b)
    } else {
        Vec2::new(i * b, i * a)
    }
}

/// Per-step behavior driver for the actor. Reads the world clock, selects
/// the phase, and writes back actor mass, color, scale, spin or force, plus
/// the global gravity perturbation. Owns its RNG; all state it keeps across
/// steps is the previous phase for edge detection.
pub struct PhaseDriver {
    actor: BodyId,
    last_phase: Option<Phase>,
    transitions: u64,
    rng: StdRng,
}

impl PhaseDriver {
    pub fn new(actor: BodyId, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            actor,
            last_phase: None,
            transitions: 0,
            rng,
        }
    }

    /// Currently active phase, for the UI header.
    pub fn phase(&self) -> Option<Phase> {
        self.last_phase
    }

    /// How many phase entries have fired so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// The per-step hook, run before each world step.
    pub fn step(&mut self, world: &mut World) {
        let t = world.scaled_clock();
        let phase = select(t);
        let i = intensity(self.rng.gen_range(-1.0_f32..=1.0));

        if let Some(factor) = entry_scale(self.last_phase, phase) {
            world.scale_body(self.actor, factor);
            self.transitions += 1;
        }

        match phase {
            Phase::Agitated => {
                world.set_mass(self.actor, config::AGITATED_MASS);
                world.set_color(self.actor, AGITATED_COLOR);
                let shared = self.rng.gen_range(-1.0_f32..=1.0);
                let force = Vec2::new(
                    i * self.rng.gen_range(-2.0_f32..=2.0) * shared,
                    i * self.rng.gen_range(-2.0_f32..=2.0) * shared,
                );
                world.apply_force(self.actor, force);
            }
            Phase::Release => {
                world.set_mass(self.actor, config::RELEASE_MASS);
                world.set_color(self.actor, RELEASE_COLOR);
                world.set_angular_velocity(self.actor, config::RELEASE_SPIN * i);
            }
            Phase::Evade => {
                world.set_mass(self.actor, config::EVADE_MASS);
                world.set_color(self.actor, EVADE_COLOR);
                let swap: bool = self.rng.gen();
                let a = self.rng.gen_range(0.0_f32..=4.0);
                let b = self.rng.gen_range(-4.0_f32..=4.0);
                world.apply_force(self.actor, evade_force(i, a, b, swap));
            }
        }

        let gravity = if phase == Phase::Agitated {
            Vec2::new(
                self.rng.gen_range(-1.0_f32..=1.0).sin() * config::AGITATED_GRAVITY,
                self.rng.gen_range(-1.0_f32..=1.0).cos() * config::AGITATED_GRAVITY,
            )
        } else {
            Vec2::new(
                self.rng.gen_range(-1.0_f32..=1.0).sin() * i,
                self.rng.gen_range(-1.0_f32..=1.0).cos() * i,
            )
        };
        world.set_gravity(gravity);

        self.last_phase = Some(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene;

    fn world_with_actor() -> (World, BodyId) {
        let mut world = World::new();
        let actor = scene::spawn_actor(&mut world, Vec2::new(400.0, 300.0));
        (world, actor)
    }

    mod selection {
        use super::*;

        #[test]
        fn is_a_pure_function_of_the_clock() {
            for step in 0..2000 {
                let t = step as f32 * 0.0675;
                assert_eq!(select(t), select(t));
            }
        }

        #[test]
        fn agitated_when_mod_18_floor_is_zero() {
            assert_eq!(select(0.5), Phase::Agitated);
            assert_eq!(select(18.2), Phase::Agitated);
            assert_eq!(select(36.9), Phase::Agitated);
        }

        #[test]
        fn release_when_only_mod_13_floor_is_zero() {
            assert_eq!(select(13.5), Phase::Release);
            assert_eq!(select(26.7), Phase::Release);
        }

        #[test]
        fn evade_otherwise() {
            assert_eq!(select(5.0), Phase::Evade);
            assert_eq!(select(20.0), Phase::Evade);
        }

        #[test]
        fn agitated_takes_precedence_at_overlap() {
            // t in [0, 1) satisfies both modulus windows.
            assert_eq!(select(0.0), Phase::Agitated);
            assert_eq!(select(0.99), Phase::Agitated);
            // 18 * 13 = 234: both windows open again.
            assert_eq!(select(234.5), Phase::Agitated);
        }
    }

    mod intensity_fn {
        use super::*;

        #[test]
        fn equals_scaled_draw_at_the_operating_point() {
            for r in [-1.0_f32, -0.5, 0.0, 0.25, 1.0] {
                assert!((intensity(r) - 0.16 * r).abs() < 1e-6);
            }
        }

        #[test]
        fn is_bounded_by_the_draw_range() {
            assert!(intensity(1.0) <= 0.16 + 1e-6);
            assert!(intensity(-1.0) >= -0.16 - 1e-6);
        }
    }

    mod entry_edges {
        use super::*;

        #[test]
        fn table_fires_only_on_phase_change() {
            assert_eq!(entry_scale(None, Phase::Evade), Some(1.2));
            assert_eq!(entry_scale(Some(Phase::Evade), Phase::Evade), None);
            assert_eq!(
                entry_scale(Some(Phase::Evade), Phase::Agitated),
                Some(0.45)
            );
            assert_eq!(
                entry_scale(Some(Phase::Agitated), Phase::Release),
                Some(1.4)
            );
        }

        #[test]
        fn scale_fires_once_per_contiguous_run() {
            let (mut world, actor) = world_with_actor();
            let mut driver = PhaseDriver::new(actor, Some(11));
            // Fresh world: clock 0 means Agitated for the whole run below.
            let before = world.body(actor).shape.bounding_radius();
            driver.step(&mut world);
            let after_entry = world.body(actor).shape.bounding_radius();
            assert!((after_entry - before * 0.45).abs() < 1e-3);
            let transitions = driver.transitions();
            for _ in 0..3 {
                driver.step(&mut world);
            }
            // No world.step() ran, so the clock never moved: same phase,
            // no further rescale.
            assert_eq!(driver.transitions(), transitions);
            assert!(
                (world.body(actor).shape.bounding_radius() - after_entry).abs() < 1e-3
            );
        }

        #[test]
        fn repeated_entries_compound() {
            let (mut world, actor) = world_with_actor();
            world.scale_body(actor, 0.45);
            world.scale_body(actor, 0.45);
            let radius = world.body(actor).shape.bounding_radius();
            assert!((radius - 70.0 * 0.45 * 0.45).abs() < 1e-3);
        }
    }

    mod phase_actions {
        use super::*;

        #[test]
        fn agitated_sets_mass_and_dark_color() {
            let (mut world, actor) = world_with_actor();
            let mut driver = PhaseDriver::new(actor, Some(3));
            driver.step(&mut world); // clock 0 -> Agitated
            assert_eq!(driver.phase(), Some(Phase::Agitated));
            assert_eq!(world.body(actor).mass, 30.0);
            assert_eq!(world.body(actor).color, AGITATED_COLOR);
        }

        #[test]
        fn evade_sets_mass_and_color() {
            let (mut world, actor) = world_with_actor();
            // Advance the clock out of both windows: t in [1, 13).
            while world.scaled_clock() < 1.5 {
                world.step();
            }
            let mut driver = PhaseDriver::new(actor, Some(3));
            driver.step(&mut world);
            assert_eq!(driver.phase(), Some(Phase::Evade));
            assert_eq!(world.body(actor).mass, 70.0);
            assert_eq!(world.body(actor).color, EVADE_COLOR);
        }

        #[test]
        fn release_sets_spin_proportional_to_intensity() {
            let (mut world, actor) = world_with_actor();
            // Advance into a Release window: t in [13, 14).
            while world.scaled_clock() < 13.2 {
                world.step();
            }
            assert_eq!(select(world.scaled_clock()), Phase::Release);
            let mut driver = PhaseDriver::new(actor, Some(3));
            driver.step(&mut world);
            assert_eq!(driver.phase(), Some(Phase::Release));
            assert_eq!(world.body(actor).mass, 10.0);
            assert_eq!(world.body(actor).color, RELEASE_COLOR);
            let spin = world.body(actor).angular_vel;
            assert!(spin.abs() <= 5.0 * 0.16 + 1e-6);
        }

        #[test]
        fn evade_force_swaps_axes_on_the_flip() {
            assert_eq!(evade_force(0.1, 3.0, -2.0, true), Vec2::new(0.3, -0.2));
            assert_eq!(evade_force(0.1, 3.0, -2.0, false), Vec2::new(-0.2, 0.3));
        }

        #[test]
        fn evade_axis_swap_is_roughly_even() {
            // The flip is a plain bool draw from the driver's RNG.
            let mut rng = StdRng::seed_from_u64(42);
            let mut swaps = 0_u32;
            let draws = 10_000;
            for _ in 0..draws {
                if rng.gen::<bool>() {
                    swaps += 1;
                }
            }
            let ratio = swaps as f32 / draws as f32;
            assert!((ratio - 0.5).abs() < 0.02);
        }
    }

    mod gravity_bounds {
        use super::*;

        #[test]
        fn agitated_gravity_is_within_five_percent_band() {
            let (mut world, actor) = world_with_actor();
            let mut driver = PhaseDriver::new(actor, Some(17));
            for _ in 0..50 {
                driver.step(&mut world); // clock stays 0: Agitated
                let g = world.gravity();
                assert!(g.x.abs() <= 0.05 + 1e-6);
                assert!(g.y.abs() <= 0.05 + 1e-6);
            }
        }

        #[test]
        fn other_phases_bound_gravity_by_intensity_range() {
            let (mut world, actor) = world_with_actor();
            while world.scaled_clock() < 2.0 {
                world.step();
            }
            let mut driver = PhaseDriver::new(actor, Some(17));
            driver.step(&mut world);
            assert_eq!(driver.phase(), Some(Phase::Evade));
            let g = world.gravity();
            assert!(g.x.abs() <= 0.16 + 1e-6);
            assert!(g.y.abs() <= 0.16 + 1e-6);
        }
    }
}
