// Fixed-cadence driver: turns variable frame times into fixed arena ticks

use crate::arena::Arena;
use crate::config;

/// Owns an arena and advances it in fixed `TICK_SECONDS` steps while it is
/// running. Pausing the arena pauses the driver.
#[derive(Debug)]
pub struct Simulation {
    pub arena: Arena,
    time_accumulator: f64,
    cycle_duration: f64,
}

impl Simulation {
    pub fn new(arena: Arena) -> Self {
        Simulation {
            arena,
            time_accumulator: 0.0,
            cycle_duration: config::TICK_SECONDS,
        }
    }

    pub fn into_arena(self) -> Arena {
        self.arena
    }

    /// Feeds `frame_seconds` of wall time to the driver and runs as many
    /// ticks as fit, at most `MAX_FRAME_STEPS`. Time beyond the cap is
    /// dropped. Returns the number of ticks run.
    pub fn advance(&mut self, frame_seconds: f64) -> u32 {
        if !self.arena.is_running() {
            self.time_accumulator = 0.0;
            return 0;
        }

        self.time_accumulator += frame_seconds.max(0.0);
        let mut steps = 0;
        while self.time_accumulator >= self.cycle_duration {
            if steps == config::MAX_FRAME_STEPS {
                log::debug!(
                    target: "arena",
                    "Frame capped at {} ticks, dropping {:.3}s",
                    steps,
                    self.time_accumulator
                );
                self.time_accumulator = 0.0;
                break;
            }
            self.time_accumulator -= self.cycle_duration;
            self.arena.tick(self.cycle_duration);
            steps += 1;
        }
        steps
    }

    /// Runs exactly `ticks` ticks unless the arena is paused.
    pub fn run_for(&mut self, ticks: u64) -> u64 {
        if !self.arena.is_running() {
            return 0;
        }
        log::info!("Running {} ticks", ticks);
        for _ in 0..ticks {
            self.arena.tick(self.cycle_duration);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::robot::Robot;
    use assert_approx_eq::assert_approx_eq;

    fn simulation_with_mover() -> Simulation {
        let mut arena = Arena::default();
        arena.add(Robot::new(Vec2::new(100.0, 100.0), 10.0, 0.0));
        Simulation::new(arena)
    }

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut sim = simulation_with_mover();
        assert_eq!(sim.advance(0.025), 2);
        assert_eq!(sim.arena.ticks(), 2);
        assert_approx_eq!(sim.arena.robots()[0].center().x, 100.2);
    }

    #[test]
    fn test_advance_caps_long_frames() {
        let mut sim = simulation_with_mover();
        assert_eq!(sim.advance(1.0), config::MAX_FRAME_STEPS);
        assert_eq!(sim.advance(0.0), 0, "surplus time is dropped");
    }

    #[test]
    fn test_paused_arena_does_not_tick() {
        let mut sim = simulation_with_mover();
        sim.arena.set_running(false);
        assert_eq!(sim.advance(0.5), 0);
        assert_eq!(sim.run_for(10), 0);
        assert_eq!(sim.arena.ticks(), 0);

        sim.arena.set_running(true);
        assert_eq!(sim.run_for(10), 10);
        let arena = sim.into_arena();
        assert_approx_eq!(arena.robots()[0].center().x, 101.0);
    }
}
