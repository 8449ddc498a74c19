// src/ui/metrics_panel.rs

use crate::simulation::SimulationStats;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

pub struct MetricsPanelPlugin;

impl Plugin for MetricsPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, metrics_panel_egui_system);
    }
}

fn series(name: &str, points: &std::collections::VecDeque<(f64, f64)>) -> Line<'static> {
    Line::new(
        name.to_string(),
        PlotPoints::from_iter(points.iter().map(|(x, y)| [*x, *y])),
    )
}

fn metrics_panel_egui_system(mut contexts: EguiContexts, stats: Res<SimulationStats>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("Metrics")
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
        .default_width(320.0)
        .default_height(180.0)
        .default_open(false)
        .show(ctx, |ui| {
            Plot::new("population_plot")
                .legend(Legend::default())
                .x_axis_label("Tick")
                .y_axis_label("Count")
                .show(ui, |plot_ui| {
                    plot_ui.line(series("Atoms", &stats.atoms));
                    plot_ui.line(series("Bonds", &stats.bonds));
                    plot_ui.line(series("Angles", &stats.angles));
                    plot_ui.line(series("Formed", &stats.formed));
                    plot_ui.line(series("Broken", &stats.broken));
                });
        });
}
