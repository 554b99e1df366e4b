use thiserror::Error;

/// Ошибки конфигурации генератора.
///
/// Возникают до начала генерации: некорректные параметры отвергаются сразу,
/// ни одна стадия конвейера при этом не запускается.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("fill percent must be within 0..=100, got {0}")]
    InvalidFillPercent(u32),
}
