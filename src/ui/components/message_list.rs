//! Conversation log display

use crate::messages::{LogEntry, Speaker};
use crate::ui::theme::Theme;
use egui::{Align, Layout, RichText};

/// Scrollable chat history
pub struct MessageList<'a> {
    entries: &'a [LogEntry],
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(entries: &'a [LogEntry], theme: &'a Theme) -> Self {
        Self { entries, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add_space(self.theme.spacing);

                if self.entries.is_empty() {
                    self.show_empty_state(ui);
                } else {
                    for entry in self.entries {
                        self.show_entry(ui, entry);
                        ui.add_space(self.theme.spacing_sm);
                    }
                }

                ui.add_space(self.theme.spacing);
            });
    }

    fn show_empty_state(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(
                RichText::new("무엇이 보이는지 물어보세요")
                    .size(20.0)
                    .color(self.theme.text_primary),
            );
            ui.add_space(self.theme.spacing_sm);
            ui.label(
                RichText::new("아래에 질문을 입력하거나 마이크 버튼으로 말해 보세요.")
                    .size(13.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn show_entry(&self, ui: &mut egui::Ui, entry: &LogEntry) {
        let (bubble_color, text_color, layout) = match entry.speaker {
            Speaker::User => (
                self.theme.user_bubble,
                self.theme.text_primary,
                Layout::right_to_left(Align::TOP),
            ),
            Speaker::Assistant => (
                self.theme.assistant_bubble,
                self.theme.text_primary,
                Layout::left_to_right(Align::TOP),
            ),
            Speaker::System => (
                self.theme.system_bubble,
                self.theme.error,
                Layout::left_to_right(Align::TOP),
            ),
        };

        ui.with_layout(layout, |ui| {
            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.card_rounding)
                .inner_margin(self.theme.spacing_sm)
                .show(ui, |ui| {
                    ui.set_max_width(ui.available_width() * 0.75);
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(entry.speaker.label())
                                .size(11.0)
                                .color(self.theme.text_muted),
                        );
                        ui.label(RichText::new(&entry.text).size(14.0).color(text_color));
                    });
                });
        });
    }
}
