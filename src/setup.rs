use crate::config::SandboxConfig;
use crate::sandbox::Simulation;
use crate::simulation::{FrameClock, SandboxClock};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Startup configuration handed over by `main` after CLI and file merging.
#[derive(Resource, Debug, Clone, Default)]
pub struct LaunchConfig(pub SandboxConfig);

pub struct SetupPlugin;

impl Plugin for SetupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LaunchConfig>()
            .add_systems(Startup, (setup_scene, start_simulation).chain());
    }
}

fn setup_scene(mut commands: Commands) {
    info!("Setting up scene: 2D camera");
    commands.spawn(Camera2d);
}

fn start_simulation(
    mut commands: Commands,
    time: Res<Time>,
    launch: Res<LaunchConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let surface = windows
        .single()
        .ok()
        .map(|window| Vec2::new(window.width(), window.height()));
    let config = launch.0.clone();
    let initial_atoms = config.initial_atoms;

    match Simulation::new(surface, config) {
        Ok(mut simulation) => {
            if initial_atoms > 0 {
                let spawned = simulation.spawn_scattered(initial_atoms);
                info!("Spawned {} initial atoms", spawned.len());
            }
            commands.insert_resource(simulation);
            // The first realtime frame measures from here, not from zero.
            commands.insert_resource(SandboxClock(FrameClock::started_at(time.elapsed())));
        }
        Err(err) => error!("Simulation not started: {err}"),
    }
}

