use std::time::Instant;

use eframe::egui::{self, Color32, Pos2, Rect, Sense, Stroke, Ui, Vec2};
use knn_canvas::{ParameterChange, Prediction};

use crate::app::CanvasApp;

/// Draws the left-side panel with the classification controls.
pub fn draw_side_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::SidePanel::left("controls_panel").show(ctx, |ui| {
        ui.heading("k-NN Canvas");
        ui.separator();

        draw_parameter_controls(app, ui);
        ui.separator();

        draw_status(app, ui);
        ui.separator();

        draw_legend(app, ui);
    });
}

fn draw_parameter_controls(app: &mut CanvasApp, ui: &mut Ui) {
    let params = app.controller.params();

    let mut k = params.k();
    let max_k = app.controller.max_k();
    if ui
        .add(egui::Slider::new(&mut k, 1..=max_k).text("k"))
        .changed()
    {
        app.apply_parameter(ParameterChange::K(k));
    }

    let mut weighted = params.weighted();
    if ui.checkbox(&mut weighted, "Weighted by distance").changed() {
        app.apply_parameter(ParameterChange::Weighted(weighted));
    }

    ui.checkbox(&mut app.show_regression, "Show regression line");
}

fn draw_status(app: &CanvasApp, ui: &mut Ui) {
    if app.controller.is_idle() {
        ui.label("Click the canvas to place a point.");
    } else {
        ui.label("Classifying...");
    }

    if let Some(report) = &app.last_report {
        let label = match &report.prediction {
            Prediction::Label(label) => label.as_str(),
            Prediction::Indeterminate => "none",
        };
        ui.label(format!("Last point: {label}"));
        ui.label(format!(
            "Data position: ({:.1}, {:.1})",
            report.data_position[0], report.data_position[1]
        ));
        ui.label(format!(
            "{} neighbors, k = {}{}",
            report.neighbors.len(),
            report.params.k(),
            if report.params.weighted() { ", weighted" } else { "" }
        ));
    }
    if app.dropped_clicks > 0 {
        ui.weak(format!("{} clicks ignored while busy", app.dropped_clicks));
    }
    if let Some(error) = &app.last_error {
        ui.colored_label(Color32::RED, error);
    }
    if app.show_regression {
        if let Err(e) = app.controller.regression() {
            ui.weak(format!("No regression line: {e}"));
        }
    }
}

fn draw_legend(app: &CanvasApp, ui: &mut Ui) {
    let palette = app.controller.palette();
    for label in palette.labels() {
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
            ui.painter()
                .circle_filled(rect.center(), 5.0, palette.color_of_name(Some(label)));
            ui.label(label);
        });
    }
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
        ui.painter()
            .circle_filled(rect.center(), 5.0, palette.default_fill());
        ui.label("unclassified");
    });
}

/// Draws the canvas: background, connecting lines, points, bounding circle
/// and the optional regression line. Clicks go to the controller.
pub fn draw_central_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let options = app.controller.options();
        let size = Vec2::new(options.width as f32, options.height as f32);
        let background = options.background_color;

        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let origin = response.rect.min;
        let to_screen = |[x, y]: [f64; 2]| Pos2::new(origin.x + x as f32, origin.y + y as f32);
        let painter = painter.with_clip_rect(response.rect);
        let now = Instant::now();

        painter.rect_filled(response.rect, 0.0, background);

        for segment in app.surface.segments() {
            let alpha = segment
                .tag
                .map_or(1.0, |tag| app.surface.opacity(tag, now));
            painter.line_segment(
                [to_screen(segment.from), to_screen(segment.to)],
                Stroke::new(segment.width as f32, segment.color.gamma_multiply(alpha)),
            );
        }

        for point in app.surface.points() {
            let alpha = point
                .transient
                .map_or(1.0, |tag| app.surface.opacity(tag, now));
            let center = to_screen(point.position);
            let radius = point.radius as f32;
            painter.circle_filled(center, radius, point.fill.gamma_multiply(alpha));
            painter.circle_stroke(
                center,
                radius,
                Stroke::new(1.0, point.stroke.gamma_multiply(alpha)),
            );
        }

        if app.show_regression {
            if let Ok(line) = app.controller.regression() {
                let width = f64::from(size.x);
                painter.line_segment(
                    [
                        to_screen([0.0, line.y_at(0.0)]),
                        to_screen([width, line.y_at(width)]),
                    ],
                    Stroke::new(2.0, Color32::LIGHT_BLUE),
                );
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if Rect::from_min_size(origin, size).contains(pos) {
                    let local = pos - origin;
                    app.handle_click([f64::from(local.x), f64::from(local.y)]);
                }
            }
        }
    });
}
