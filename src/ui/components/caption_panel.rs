//! Scene panel: frame preview, caption trigger, caption display

use crate::session::CaptionView;
use crate::ui::theme::Theme;
use egui::{RichText, TextureHandle, Vec2};

/// Left panel showing the last captured frame and the caption results
pub struct CaptionPanel<'a> {
    caption: &'a CaptionView,
    preview: Option<&'a TextureHandle>,
    theme: &'a Theme,
    busy: bool,
    camera_ready: bool,
}

impl<'a> CaptionPanel<'a> {
    pub fn new(
        caption: &'a CaptionView,
        preview: Option<&'a TextureHandle>,
        theme: &'a Theme,
        busy: bool,
        camera_ready: bool,
    ) -> Self {
        Self {
            caption,
            preview,
            theme,
            busy,
            camera_ready,
        }
    }

    /// Show the panel; returns true when the caption trigger was clicked
    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let mut clicked = false;

        ui.vertical(|ui| {
            ui.add_space(self.theme.spacing_sm);

            self.show_preview(ui);
            ui.add_space(self.theme.spacing_sm);

            let label = if self.busy {
                "장면을 설명하는 중..."
            } else {
                "📷 지금 장면 설명해줘"
            };
            let button = egui::Button::new(
                RichText::new(label).size(15.0).color(self.theme.text_primary),
            )
            .min_size(Vec2::new(ui.available_width(), 40.0))
            .rounding(self.theme.button_rounding)
            .fill(self.theme.primary);

            let enabled = !self.busy && self.camera_ready;
            clicked = ui.add_enabled(enabled, button).clicked();

            if !self.camera_ready {
                ui.add_space(self.theme.spacing_sm);
                ui.label(
                    RichText::new("카메라를 사용할 수 없습니다. 연결을 확인한 뒤 다시 실행해 주세요.")
                        .size(12.0)
                        .color(self.theme.error),
                );
            }

            ui.add_space(self.theme.spacing_sm);
            self.show_caption(ui);
        });

        clicked
    }

    fn show_preview(&self, ui: &mut egui::Ui) {
        match self.preview {
            Some(texture) => {
                ui.add(
                    egui::Image::new(texture)
                        .max_width(ui.available_width())
                        .rounding(self.theme.card_rounding),
                );
            }
            None => {
                egui::Frame::none()
                    .fill(self.theme.bg_tertiary)
                    .rounding(self.theme.card_rounding)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.set_height(140.0);
                        ui.centered_and_justified(|ui| {
                            ui.label(
                                RichText::new("아직 촬영된 장면이 없습니다")
                                    .size(12.0)
                                    .color(self.theme.text_muted),
                            );
                        });
                    });
            }
        }
    }

    fn show_caption(&self, ui: &mut egui::Ui) {
        if let Some(error) = &self.caption.error {
            egui::Frame::none()
                .fill(self.theme.system_bubble)
                .rounding(self.theme.card_rounding)
                .inner_margin(self.theme.spacing_sm)
                .show(ui, |ui| {
                    ui.label(RichText::new(error).size(13.0).color(self.theme.error));
                });
            return;
        }

        if let Some(translated) = &self.caption.translated {
            egui::Frame::none()
                .fill(self.theme.bg_secondary)
                .rounding(self.theme.card_rounding)
                .inner_margin(self.theme.spacing_sm)
                .show(ui, |ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(translated)
                                .size(15.0)
                                .color(self.theme.text_primary),
                        );
                        if let Some(source) = &self.caption.source {
                            ui.add_space(4.0);
                            ui.label(
                                RichText::new(source).size(12.0).color(self.theme.text_muted),
                            );
                        }
                        if let Some(link) = &self.caption.speech_link {
                            ui.add_space(4.0);
                            ui.hyperlink_to("🔊 음성으로 듣기", link);
                        }
                    });
                });
        }
    }
}
