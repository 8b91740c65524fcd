//! UI components

pub mod caption_panel;
pub mod input_bar;
pub mod message_list;
pub mod record_button;
pub mod status_bar;

pub use caption_panel::CaptionPanel;
pub use input_bar::InputBar;
pub use message_list::MessageList;
pub use record_button::RecordButton;
pub use status_bar::StatusBar;
