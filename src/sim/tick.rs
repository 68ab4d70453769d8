//! Per-frame update and draw passes
//!
//! One tick moves every entity by one step; the frame delta is accepted for
//! interface parity with the frame clock but does not scale movement.

use super::entity::Draw;
use super::input::FrameInput;
use super::state::{SimPhase, Simulation};
use crate::renderer::SpriteBatch;

/// Advance the simulation by one tick
pub fn tick(sim: &mut Simulation, input: &FrameInput, _dt: f32) {
    if sim.phase == SimPhase::Exited {
        return;
    }

    if input.exit_requested() {
        log::info!("Exit requested after {} ticks", sim.frame);
        sim.phase = SimPhase::Exited;
        return;
    }

    let viewport = sim.viewport;
    for mover in &mut sim.movers {
        mover.update(&viewport);
    }

    sim.player.update(input.keyboard);

    sim.frame += 1;
}

/// Draw one frame: background, statics, player, then movers
pub fn render(sim: &Simulation, batch: &mut dyn SpriteBatch) {
    batch.clear(sim.background);
    batch.begin();

    for decoration in &sim.statics {
        decoration.draw(batch);
    }

    sim.player.draw(batch);

    for mover in &sim.movers {
        mover.draw(batch);
    }

    batch.end();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetCatalog, PlaceholderSource};
    use crate::config::DemoConfig;
    use crate::consts::SIM_DT;
    use crate::renderer::RecordingBatch;
    use crate::sim::input::Key;
    use glam::Vec2;

    fn demo() -> Simulation {
        let config = DemoConfig::default();
        let mut catalog = AssetCatalog::new();
        let mut source = PlaceholderSource::from_map(config.placeholders.clone());
        Simulation::setup(&config, &mut catalog, &mut source).unwrap()
    }

    #[test]
    fn test_tick_moves_everything_once() {
        let mut sim = demo();
        let before: Vec<(Vec2, Vec2)> = sim.movers.iter().map(|m| (m.pos(), m.vel)).collect();

        tick(&mut sim, &FrameInput::from_keys(&[Key::D]), SIM_DT);

        for (mover, (pos, vel)) in sim.movers.iter().zip(before) {
            assert_eq!(mover.pos(), pos + vel);
        }
        assert_eq!(sim.player.pos(), Vec2::new(506.0, 500.0));
        assert_eq!(sim.frame, 1);
    }

    #[test]
    fn test_statics_never_move() {
        let mut sim = demo();
        let before = sim.statics.clone();
        for _ in 0..100 {
            tick(&mut sim, &FrameInput::from_keys(&[Key::S, Key::Left]), SIM_DT);
        }
        assert_eq!(sim.statics, before);
    }

    #[test]
    fn test_dt_does_not_scale_movement() {
        let mut a = demo();
        let mut b = demo();
        let input = FrameInput::from_keys(&[Key::Up]);
        tick(&mut a, &input, SIM_DT);
        tick(&mut b, &input, 0.5);
        assert_eq!(a.player.pos(), b.player.pos());
        assert_eq!(a.movers, b.movers);
    }

    #[test]
    fn test_exit_is_terminal() {
        let mut sim = demo();
        let movers = sim.movers.clone();

        tick(&mut sim, &FrameInput::from_keys(&[Key::Escape, Key::D]), SIM_DT);
        assert_eq!(sim.phase, SimPhase::Exited);
        // The exit frame does not update
        assert_eq!(sim.movers, movers);
        assert_eq!(sim.player.pos(), Vec2::new(500.0, 500.0));

        tick(&mut sim, &FrameInput::from_keys(&[Key::D]), SIM_DT);
        assert_eq!(sim.phase, SimPhase::Exited);
        assert_eq!(sim.movers, movers);
        assert_eq!(sim.frame, 0);
    }

    #[test]
    fn test_gamepad_back_exits() {
        let mut sim = demo();
        let input = FrameInput {
            gamepad_back: true,
            ..Default::default()
        };
        tick(&mut sim, &input, SIM_DT);
        assert!(!sim.is_running());
    }

    #[test]
    fn test_render_order() {
        let sim = demo();
        let mut batch = RecordingBatch::new();
        render(&sim, &mut batch);

        let frame = batch.last_frame().unwrap();
        assert_eq!(frame.clear, Some(sim.background));
        assert_eq!(frame.draws.len(), sim.entity_count());

        let positions: Vec<Vec2> = frame.draws.iter().map(|d| d.position).collect();
        let mut expected: Vec<Vec2> = sim.statics.iter().map(|e| e.pos).collect();
        expected.push(sim.player.pos());
        expected.extend(sim.movers.iter().map(|m| m.pos()));
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut sim = demo();
        tick(&mut sim, &FrameInput::default(), SIM_DT);
        let snapshot = sim.clone();

        let mut batch = RecordingBatch::new();
        render(&sim, &mut batch);
        render(&sim, &mut batch);

        assert_eq!(batch.frames()[0], batch.frames()[1]);
        assert_eq!(sim.movers, snapshot.movers);
        assert_eq!(sim.player, snapshot.player);
    }

    #[test]
    fn test_fast_mover_bounces_off_top_left() {
        let mut sim = demo();
        // (700,700) moving (-10,-10) reaches y <= 0 after 70 ticks
        for _ in 0..70 {
            tick(&mut sim, &FrameInput::default(), SIM_DT);
        }
        let mover = &sim.movers[3];
        assert_eq!(mover.pos(), Vec2::new(0.0, 0.0));
        assert_eq!(mover.vel, Vec2::new(10.0, 10.0));
    }
}
