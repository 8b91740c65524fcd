pub mod api;
pub mod audio;
pub mod capture;
pub mod config;
pub mod messages;
pub mod orchestrator;
pub mod session;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum GlimpseError {
    #[error("Camera error: {0}")]
    CameraError(String),

    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Image encode error: {0}")]
    EncodeError(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Playback error: {0}")]
    PlaybackError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl From<std::io::Error> for GlimpseError {
    fn from(e: std::io::Error) -> Self {
        GlimpseError::IOError(e.to_string())
    }
}

impl GlimpseError {
    /// Check if this error is recoverable by re-triggering the action
    pub fn is_recoverable(&self) -> bool {
        match self {
            // The camera stays unavailable until the app is restarted
            GlimpseError::CameraError(_) => false,
            GlimpseError::AudioDeviceError(_) => false,
            // Request failures clear on the next attempt
            GlimpseError::ServiceError(_) => true,
            GlimpseError::TransportError(_) => true,
            GlimpseError::PlaybackError(_) => true,
            GlimpseError::EncodeError(_) => true,
            GlimpseError::IOError(_) => false,
            GlimpseError::ConfigError(_) => false,
            GlimpseError::ChannelError(_) => false,
        }
    }

    /// Get the user-facing description for this error
    ///
    /// Service errors carry the backend's message verbatim; everything else
    /// maps to a generic Korean message for the chat log and caption panel.
    pub fn user_message(&self) -> String {
        match self {
            GlimpseError::ServiceError(msg) => msg.clone(),
            GlimpseError::TransportError(_) => {
                "서버와 통신하지 못했습니다. 잠시 후 다시 시도해 주세요.".to_string()
            }
            GlimpseError::CameraError(_) => {
                "카메라 영상을 가져오지 못했습니다. 카메라 연결을 확인해 주세요.".to_string()
            }
            GlimpseError::AudioDeviceError(_) => {
                "마이크를 사용할 수 없습니다. 입력 장치를 확인해 주세요.".to_string()
            }
            GlimpseError::EncodeError(_) => "이미지 처리에 실패했습니다.".to_string(),
            GlimpseError::PlaybackError(_) => "음성 안내를 재생하지 못했습니다.".to_string(),
            GlimpseError::IOError(_)
            | GlimpseError::ConfigError(_)
            | GlimpseError::ChannelError(_) => "내부 오류가 발생했습니다.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GlimpseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_message_is_verbatim() {
        let err = GlimpseError::ServiceError("caption error: model not loaded".to_string());
        assert_eq!(err.user_message(), "caption error: model not loaded");
    }

    #[test]
    fn test_transport_error_message_is_generic() {
        let a = GlimpseError::TransportError("connection refused".to_string());
        let b = GlimpseError::TransportError("dns failure".to_string());
        assert_eq!(a.user_message(), b.user_message());
        assert!(!a.user_message().contains("connection refused"));
    }

    #[test]
    fn test_request_errors_are_recoverable() {
        assert!(GlimpseError::ServiceError("x".into()).is_recoverable());
        assert!(GlimpseError::TransportError("x".into()).is_recoverable());
        assert!(!GlimpseError::CameraError("x".into()).is_recoverable());
    }
}
