// src/ui/mod.rs

mod help_panel;
mod hud;
mod metrics_panel;
mod settings_panel;

use crate::interaction::InteractionSet;
use bevy::prelude::*;

use help_panel::HelpPanelPlugin;
use hud::HudPlugin;
use metrics_panel::MetricsPanelPlugin;
use settings_panel::SettingsPanelPlugin;

/// Keyboard-driven UI systems that run in `Update`, after the engine has seen input.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct UiSet;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, UiSet.after(InteractionSet))
            .add_plugins((
                HudPlugin,
                HelpPanelPlugin,
                SettingsPanelPlugin,
                MetricsPanelPlugin,
            ));
    }
}
