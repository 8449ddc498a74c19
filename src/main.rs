#[cfg(target_arch = "wasm32")]
use bevy::audio::AudioPlugin;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use clap::Parser;
use molecule_sandbox::config::SandboxConfig;
use molecule_sandbox::cursor::CustomCursorPlugin;
use molecule_sandbox::interaction::InteractionPlugin;
use molecule_sandbox::resources::TimeMode;
use molecule_sandbox::setup::{LaunchConfig, SetupPlugin};
use molecule_sandbox::simulation::SimulationPlugin;
use molecule_sandbox::ui::UIPlugin;
use molecule_sandbox::visualization::VisualizationPlugin;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct CliArgs {
    /// How the simulation step is derived from frame timing.
    #[arg(long, value_enum)]
    time_mode: Option<TimeMode>,

    /// Step scale in constant mode, between 0.5 and 240.
    #[arg(long)]
    iterations_per_second: Option<f32>,

    /// Skip angle detection and drawing.
    #[arg(long, default_value_t = false)]
    no_angles: bool,

    /// Seed for element choice and atom ids.
    #[arg(long)]
    seed: Option<u64>,

    /// Random atoms to spawn at startup.
    #[arg(long)]
    atoms: Option<usize>,

    /// JSON file with a full sandbox configuration. Flags override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CliArgs {
    fn into_config(self) -> molecule_sandbox::Result<SandboxConfig> {
        let mut config = match &self.config {
            Some(path) => SandboxConfig::from_file(path)?,
            None => SandboxConfig::default(),
        };
        if let Some(mode) = self.time_mode {
            config.settings.time_mode = mode;
        }
        if let Some(rate) = self.iterations_per_second {
            config.settings.iterations_per_second = rate;
        }
        if self.no_angles {
            config.settings.calculate_angles = false;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(atoms) = self.atoms {
            config.initial_atoms = atoms;
        }
        config.settings = config.settings.validated()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let config = match args.into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("molecule_sandbox: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new();

    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Molecule Sandbox".into(),
            canvas: Some("#bevy".to_string()),
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    });

    #[cfg(target_arch = "wasm32")]
    let default_plugins = default_plugins.build().disable::<AudioPlugin>();

    app.add_plugins(default_plugins)
        .insert_resource(LaunchConfig(config))
        .add_plugins((
            FrameTimeDiagnosticsPlugin::default(),
            EguiPlugin::default(),
            SetupPlugin,
            InteractionPlugin,
            SimulationPlugin,
            VisualizationPlugin,
            CustomCursorPlugin,
            UIPlugin,
        ))
        .run();
    ExitCode::SUCCESS
}
