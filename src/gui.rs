use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{SystemTime, UNIX_EPOCH};

use eframe::egui;
use egui::{Color32, Pos2, Rounding, Sense, Shape, Stroke, Vec2};
use plotters::style::RGBColor;

use crate::config::ScopeConfig;
use crate::engine;
use crate::signal::{render_frame_png, trace, SnapshotStyle};
use crate::types::{RateReading, ScopeCommand, ScopeMessage, SourceMode, StatusKind};

pub struct CardioscopeApp {
    config: ScopeConfig,

    // Display mirror of the engine state.
    status: StatusKind,
    rate: Option<RateReading>,
    frame: Vec<f32>,
    animating: bool,

    mode: SourceMode,
    notice: Option<String>,

    rx: Receiver<ScopeMessage>,
    tx_cmd: Sender<ScopeCommand>,
}

impl CardioscopeApp {
    pub fn new(config: ScopeConfig) -> Self {
        let (tx, rx) = channel();
        let (tx_cmd, rx_cmd) = channel();
        engine::spawn_thread(tx, rx_cmd, config.clone());
        let mode = if config.simulate {
            SourceMode::Simulated
        } else {
            SourceMode::Live
        };
        Self {
            config,
            status: StatusKind::Ready,
            rate: None,
            frame: Vec::new(),
            animating: false,
            mode,
            notice: None,
            rx,
            tx_cmd,
        }
    }

    fn drain_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                ScopeMessage::Status(status) => {
                    if status == StatusKind::Stopped {
                        self.animating = false;
                    }
                    self.status = status;
                }
                ScopeMessage::Frame(points) => {
                    self.animating = true;
                    self.frame = points;
                }
                ScopeMessage::Rate(rate) => self.rate = rate,
            }
        }
    }

    fn save_snapshot(&mut self) {
        let style = SnapshotStyle {
            width: self.config.graph_width as u32,
            height: self.config.graph_height as u32,
            background: rgb_color(self.config.background_color),
            grid: rgb_color(self.config.grid_color),
            line: rgb_color(self.config.line_color),
            stroke_width: self.config.line_width.round().max(1.0) as u32,
        };
        self.notice = Some(
            match render_frame_png(&self.frame, self.config.points_to_show, &style) {
                Ok(png) => {
                    let stamp = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .unwrap_or_default()
                        .as_secs();
                    let filename = format!("cardioscope_{stamp}.png");
                    match std::fs::write(&filename, png) {
                        Ok(()) => format!("Saved {filename}"),
                        Err(err) => format!("Save failed: {err}"),
                    }
                }
                Err(err) => err.to_string(),
            },
        );
    }

    fn draw_waveform(&self, ui: &mut egui::Ui) {
        let size = Vec2::new(self.config.graph_width, self.config.graph_height);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;

        painter.rect_filled(
            rect,
            Rounding::same(2.0),
            color32(self.config.background_color),
        );

        let grid_stroke = Stroke::new(1.0, color32(self.config.grid_color));
        for y in trace::grid_offsets(rect.height()) {
            painter.line_segment(
                [
                    Pos2::new(rect.left(), rect.top() + y),
                    Pos2::new(rect.right(), rect.top() + y),
                ],
                grid_stroke,
            );
        }
        for x in trace::grid_offsets(rect.width()) {
            painter.line_segment(
                [
                    Pos2::new(rect.left() + x, rect.top()),
                    Pos2::new(rect.left() + x, rect.bottom()),
                ],
                grid_stroke,
            );
        }

        if self.frame.len() < 2 {
            return;
        }
        let points: Vec<Pos2> = trace::trace_points(
            &self.frame,
            self.config.points_to_show,
            rect.width(),
            rect.height(),
        )
        .into_iter()
        .map(|(x, y)| Pos2::new(rect.left() + x, rect.top() + y))
        .collect();
        painter.add(Shape::line(
            points,
            Stroke::new(self.config.line_width, color32(self.config.line_color)),
        ));
    }
}

impl eframe::App for CardioscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_messages();

        let mut visuals = egui::Visuals::dark();
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(10, 10, 15);
        ctx.set_visuals(visuals);

        egui::SidePanel::left("controls").min_width(220.0).show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("Cardioscope");
            ui.label("ECG Monitor");
            ui.separator();

            ui.horizontal(|ui| {
                let before = self.mode;
                ui.selectable_value(&mut self.mode, SourceMode::Live, "LIVE");
                ui.selectable_value(&mut self.mode, SourceMode::Simulated, "SIM");
                if self.mode != before {
                    self.tx_cmd.send(ScopeCommand::SetMode(self.mode)).ok();
                }
            });

            ui.horizontal(|ui| {
                if ui.button("START").clicked() {
                    self.tx_cmd.send(ScopeCommand::Start).ok();
                }
                if ui.button("STOP").clicked() {
                    self.tx_cmd.send(ScopeCommand::Stop).ok();
                    // Immediate local flip; the engine confirms with a status.
                    self.animating = false;
                }
            });

            ui.add_space(10.0);
            ui.label(self.status.to_string());
            if let Some(rate) = self.rate {
                ui.label(
                    egui::RichText::new(rate.to_string())
                        .strong()
                        .color(color32(self.config.line_color)),
                );
            }

            ui.add_space(10.0);
            if ui.button("SAVE SNAPSHOT").clicked() {
                self.save_snapshot();
            }
            if let Some(notice) = &self.notice {
                ui.label(egui::RichText::new(notice.as_str()).small());
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_waveform(ui);
        });

        if self.animating {
            ctx.request_repaint();
        }
    }
}

fn color32([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

fn rgb_color([r, g, b]: [u8; 3]) -> RGBColor {
    RGBColor(r, g, b)
}
