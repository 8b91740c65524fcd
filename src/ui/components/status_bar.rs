//! Bottom status strip

use crate::session::SessionState;
use crate::ui::theme::Theme;
use egui::RichText;

/// One-line status: camera, recording state, notices
pub struct StatusBar<'a> {
    session: &'a SessionState,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(session: &'a SessionState, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (camera_text, camera_color) = if self.session.camera_ready {
                ("카메라 연결됨", self.theme.success)
            } else {
                ("카메라 없음", self.theme.error)
            };
            ui.label(RichText::new(camera_text).size(11.0).color(camera_color));

            ui.separator();

            if self.session.recording.is_recording() {
                ui.label(
                    RichText::new("● 녹음 중")
                        .size(11.0)
                        .color(self.theme.recording),
                );
            } else if self.session.any_busy() {
                ui.label(
                    RichText::new("요청 처리 중...")
                        .size(11.0)
                        .color(self.theme.warning),
                );
            } else {
                ui.label(RichText::new("대기 중").size(11.0).color(self.theme.text_muted));
            }

            if let Some(notice) = &self.session.notice {
                ui.separator();
                ui.label(RichText::new(notice).size(11.0).color(self.theme.warning));
            }
        });
    }
}
