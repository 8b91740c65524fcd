//! Voice toggle button

use crate::session::RecordingState;
use crate::ui::theme::Theme;
use egui::{Color32, Rect, Sense, Vec2};

/// Round toggle button for the voice question flow
///
/// Idle shows a mic, Recording shows a stop square with a pulsing ring.
/// The button is disabled while a submitted voice question awaits its
/// reply.
pub struct RecordButton<'a> {
    recording: RecordingState,
    awaiting_reply: bool,
    theme: &'a Theme,
}

impl<'a> RecordButton<'a> {
    pub fn new(recording: RecordingState, awaiting_reply: bool, theme: &'a Theme) -> Self {
        Self {
            recording,
            awaiting_reply,
            theme,
        }
    }

    /// Show the button; returns true when the user toggled it
    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let size = Vec2::splat(44.0);
        let sense = if self.awaiting_reply {
            Sense::hover()
        } else {
            Sense::click()
        };
        let (rect, response) = ui.allocate_exact_size(size, sense);

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect, &response);
        }

        let tooltip = if self.awaiting_reply {
            "답변을 기다리는 중..."
        } else if self.recording.is_recording() {
            "누르면 녹음을 끝내고 질문합니다"
        } else {
            "누르고 말해 보세요"
        };
        let clicked = response.clicked();
        response.on_hover_text(tooltip);

        clicked && !self.awaiting_reply
    }

    fn paint(&self, ui: &egui::Ui, rect: Rect, response: &egui::Response) {
        let painter = ui.painter();
        let is_recording = self.recording.is_recording();

        let bg_color = if self.awaiting_reply {
            self.theme.bg_tertiary
        } else if is_recording {
            self.theme.recording
        } else if response.hovered() {
            self.theme.primary.gamma_multiply(1.2)
        } else {
            self.theme.primary
        };

        painter.circle_filled(rect.center(), rect.width() / 2.0, bg_color);

        if is_recording {
            // Stop square
            painter.rect_filled(
                Rect::from_center_size(rect.center(), Vec2::splat(12.0)),
                2.0,
                Color32::WHITE,
            );
            self.draw_pulsing_ring(ui, rect);
        } else {
            self.draw_mic_icon(painter, rect.center());
        }
    }

    fn draw_mic_icon(&self, painter: &egui::Painter, center: egui::Pos2) {
        let color = Color32::WHITE;

        let mic_rect = Rect::from_center_size(
            egui::pos2(center.x, center.y - 3.0),
            Vec2::new(7.0, 12.0),
        );
        painter.rect_filled(mic_rect, 3.5, color);

        let stem_start = egui::pos2(center.x, center.y + 4.0);
        let stem_end = egui::pos2(center.x, center.y + 9.0);
        painter.line_segment([stem_start, stem_end], egui::Stroke::new(2.0, color));

        painter.line_segment(
            [
                egui::pos2(center.x - 5.0, center.y + 9.0),
                egui::pos2(center.x + 5.0, center.y + 9.0),
            ],
            egui::Stroke::new(2.0, color),
        );
    }

    fn draw_pulsing_ring(&self, ui: &egui::Ui, rect: Rect) {
        let t = ui.ctx().input(|i| i.time);
        let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;

        let radius = rect.width() / 2.0 + 2.0 + pulse * 4.0;
        ui.painter().circle_stroke(
            rect.center(),
            radius,
            egui::Stroke::new(
                2.0 * pulse,
                self.theme.recording.gamma_multiply(1.0 - pulse * 0.5),
            ),
        );

        ui.ctx().request_repaint();
    }
}
