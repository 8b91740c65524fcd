//! Text question input

use crate::ui::theme::Theme;
use egui::{Key, RichText, Vec2};

/// Text input plus send button
///
/// Returns the submitted text (untrimmed) when the user presses Enter or
/// clicks send; the orchestrator rejects empty questions with a notice.
pub struct InputBar<'a> {
    input_text: &'a mut String,
    theme: &'a Theme,
    busy: bool,
}

impl<'a> InputBar<'a> {
    pub fn new(input_text: &'a mut String, theme: &'a Theme, busy: bool) -> Self {
        Self {
            input_text,
            theme,
            busy,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) -> Option<String> {
        let mut submitted = None;

        ui.horizontal(|ui| {
            let available_width = ui.available_width() - 90.0;

            let text_edit = egui::TextEdit::singleline(self.input_text)
                .hint_text("지금 장면에 대해 질문해 보세요...")
                .desired_width(available_width)
                .font(egui::TextStyle::Body);

            let response = ui.add_enabled(!self.busy, text_edit);

            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

            let send_label = if self.busy { "답변 중..." } else { "질문하기" };
            let send_button = egui::Button::new(
                RichText::new(send_label).size(14.0).color(self.theme.text_primary),
            )
            .min_size(Vec2::new(80.0, 32.0))
            .rounding(self.theme.button_rounding)
            .fill(self.theme.primary);

            let send_clicked = ui.add_enabled(!self.busy, send_button).clicked();

            if enter_pressed || send_clicked {
                submitted = Some(std::mem::take(self.input_text));
                response.request_focus();
            }
        });

        submitted
    }
}
