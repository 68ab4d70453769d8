//! Simulation state and setup
//!
//! Everything the frame loop mutates lives in [`Simulation`]. Entities are
//! created once in [`Simulation::setup`] and never added or removed.

use thiserror::Error;

use super::entity::{Entity, MovingEntity, Player};
use super::viewport::Viewport;
use crate::assets::{AssetCatalog, AssetError, AssetSource};
use crate::config::{ConfigError, DemoConfig};
use crate::renderer::Color;

/// Run phase. `Exited` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    Running,
    Exited,
}

/// Errors raised while building the scene
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load sprite: {0}")]
    Asset(#[from] AssetError),
}

/// The whole demo world
#[derive(Debug, Clone)]
pub struct Simulation {
    pub viewport: Viewport,
    pub background: Color,
    /// Decorations, drawn first, in insertion order
    pub statics: Vec<Entity>,
    /// Bouncing sprites, updated and drawn in insertion order
    pub movers: Vec<MovingEntity>,
    pub player: Player,
    pub phase: SimPhase,
    /// Ticks advanced while running
    pub frame: u64,
}

impl Simulation {
    /// Build the scene described by `config`, resolving sprites through `catalog`
    pub fn setup(
        config: &DemoConfig,
        catalog: &mut AssetCatalog,
        source: &mut dyn AssetSource,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let layout = &config.scene;

        let names = layout.sprite_names();
        log::debug!("Loading {} sprites: {:?}", names.len(), names);
        for name in names {
            catalog.load(source, name)?;
        }

        let mut statics = Vec::with_capacity(layout.static_count());
        for row in &layout.statics {
            let sprite = catalog.load(source, &row.sprite)?;
            statics.extend(row.positions().map(|pos| Entity::new(sprite, pos, row.scale)));
        }

        let mut movers = Vec::with_capacity(layout.movers.len());
        for spec in &layout.movers {
            let sprite = catalog.load(source, &spec.sprite)?;
            movers.push(MovingEntity::new(sprite, spec.pos, spec.vel, spec.scale));
        }

        let spec = &layout.player;
        let sprite = catalog.load(source, &spec.sprite)?;
        let player = Player::with_speed(sprite, spec.pos, spec.scale, config.player_speed);

        log::info!(
            "Scene ready: {} static, {} moving, viewport {}x{}",
            statics.len(),
            movers.len(),
            config.viewport.width,
            config.viewport.height
        );

        Ok(Self {
            viewport: config.viewport,
            background: Color::from_rgb8(config.background),
            statics,
            movers,
            player,
            phase: SimPhase::Running,
            frame: 0,
        })
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == SimPhase::Running
    }

    /// Total entities drawn per frame
    pub fn entity_count(&self) -> usize {
        self.statics.len() + self.movers.len() + 1
    }
}
