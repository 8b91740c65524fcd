//! Main application struct and eframe integration

use crate::orchestrator::{AppEvent, OrchestratorHandle};
use crate::ui::components::{CaptionPanel, InputBar, MessageList, RecordButton, StatusBar};
use crate::ui::theme::Theme;
use chrono::{DateTime, Utc};
use egui::{CentralPanel, RichText, SidePanel, TextureHandle, TopBottomPanel};
use std::time::Duration;
use tracing::{error, warn};

/// Main application window
pub struct GlimpseApp {
    handle: OrchestratorHandle,
    theme: Theme,
    input_text: String,
    /// Texture of the last captured frame, keyed by capture timestamp
    preview: Option<(DateTime<Utc>, TextureHandle)>,
}

impl GlimpseApp {
    pub fn new(cc: &eframe::CreationContext<'_>, handle: OrchestratorHandle) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self {
            handle,
            theme,
            input_text: String::new(),
            preview: None,
        }
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        while let Some(event) = self.handle.try_recv_event() {
            match event {
                AppEvent::StateChanged => {}
                AppEvent::Shutdown => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    /// Re-upload the preview texture when a newer frame landed in the slot
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let Some(captured_at) = self.handle.frame_slot().captured_at() else {
            return;
        };
        if matches!(&self.preview, Some((at, _)) if *at == captured_at) {
            return;
        }
        let Some(frame) = self.handle.frame_slot().latest() else {
            return;
        };

        match image::load_from_memory(&frame.jpeg) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &rgba);
                let texture =
                    ctx.load_texture("scene-preview", color_image, egui::TextureOptions::LINEAR);
                self.preview = Some((captured_at, texture));
            }
            Err(e) => warn!("Failed to decode preview frame: {}", e),
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Glimpse")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.label(
                        RichText::new("장면 설명 도우미")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );
                });
            });
    }

    fn show_input_area(&mut self, ctx: &egui::Context) {
        let snapshot = self.handle.session().snapshot();

        TopBottomPanel::bottom("input_area")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        let toggled = RecordButton::new(
                            snapshot.recording,
                            snapshot.voice_busy,
                            &self.theme,
                        )
                        .show(ui);
                        if toggled {
                            if let Err(e) = self.handle.toggle_voice() {
                                error!("Failed to send voice toggle: {}", e);
                            }
                        }

                        ui.add_space(self.theme.spacing_sm);

                        let submitted =
                            InputBar::new(&mut self.input_text, &self.theme, snapshot.ask_busy)
                                .show(ui);
                        if let Some(question) = submitted {
                            if let Err(e) = self.handle.submit_question(question) {
                                error!("Failed to send question: {}", e);
                            }
                        }
                    });

                    ui.add_space(self.theme.spacing_sm);
                    StatusBar::new(&snapshot, &self.theme).show(ui);
                });
            });
    }

    fn show_scene_panel(&mut self, ctx: &egui::Context) {
        let snapshot = self.handle.session().snapshot();
        let preview = self.preview.as_ref().map(|(_, texture)| texture);

        SidePanel::left("scene")
            .resizable(false)
            .default_width(280.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                let clicked = CaptionPanel::new(
                    &snapshot.caption,
                    preview,
                    &self.theme,
                    snapshot.caption_busy,
                    snapshot.camera_ready,
                )
                .show(ui);

                if clicked {
                    if let Err(e) = self.handle.request_caption() {
                        error!("Failed to send caption request: {}", e);
                    }
                }
            });
    }

    fn show_chat(&self, ctx: &egui::Context) {
        let entries = self.handle.log().entries();
        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                MessageList::new(&entries, &self.theme).show(ui);
            });
    }
}

impl eframe::App for GlimpseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);
        self.refresh_preview(ctx);

        self.show_header(ctx);
        self.show_input_area(ctx);
        self.show_scene_panel(ctx);
        self.show_chat(ctx);

        // The orchestrator updates shared state from its own thread
        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let _ = self.handle.shutdown();
    }
}
