// src/config.rs
//! Конфигурация генерации пещеры
//!
//! Этот модуль определяет все параметры, управляющие процедурной генерацией:
//! - Размеры сетки и степень начального заполнения
//! - Сид генератора случайных чисел (число или строка)
//! - Пороги отсева мелких областей и радиус прокладываемых проходов
//! - Геометрические параметры меша (размер ячейки, высота стен)
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки
//! через конфигурационные файлы.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::GenerationError;

/// Сид генерации: целое число или произвольная строка
///
/// Строковый сид детерминированно сворачивается в `u64` (FNV-1a), так что
/// один и тот же текст всегда даёт одну и ту же пещеру.
///
/// # Примеры
/// ```
/// use cavegen::config::MapSeed;
/// assert_eq!(MapSeed::Number(42).value(), 42);
/// assert_eq!(MapSeed::Text("cave".into()).value(), MapSeed::Text("cave".into()).value());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MapSeed {
    Number(u64),
    Text(String),
}

impl MapSeed {
    /// Возвращает числовое значение сида.
    #[must_use]
    pub fn value(&self) -> u64 {
        match self {
            MapSeed::Number(n) => *n,
            MapSeed::Text(s) => fnv1a(s.as_bytes()),
        }
    }
}

impl Default for MapSeed {
    fn default() -> Self {
        MapSeed::Number(0)
    }
}

/// 64-битный FNV-1a по байтам строки.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET_BASIS, |hash, &b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}

/// Основные параметры генерации пещеры
///
/// Полная конфигурация для генерации одного уровня. Поддерживает загрузку из
/// TOML-файлов; все поля, кроме сида, имеют значения по умолчанию.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaveGenerationParams {
    /// Сид генератора случайных чисел (детерминированная генерация)
    pub seed: MapSeed,

    /// Ширина сетки в клетках (по умолчанию 128)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Высота сетки в клетках (по умолчанию 72)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Доля стен при начальном заполнении, в процентах 0–100 (по умолчанию 45)
    #[serde(default = "default_fill_percent")]
    pub fill_percent: u32,

    /// Число проходов клеточного автомата (по умолчанию 5)
    #[serde(default = "default_smooth_iterations")]
    pub smooth_iterations: usize,

    /// Минимальный размер области стен в клетках: мельче — вскрывается (по умолчанию 50)
    #[serde(default = "default_region_threshold")]
    pub wall_threshold: usize,

    /// Минимальный размер комнаты в клетках: мельче — замуровывается (по умолчанию 50)
    #[serde(default = "default_region_threshold")]
    pub room_threshold: usize,

    /// Радиус прокладываемого прохода между комнатами (по умолчанию 5)
    #[serde(default = "default_passage_radius")]
    pub passage_radius: i32,

    /// Толщина внешней рамки из стен вокруг итоговой сетки (по умолчанию 1)
    #[serde(default = "default_border_size")]
    pub border_size: u32,

    /// Размер одной клетки в мировых единицах (по умолчанию 1.0)
    #[serde(default = "default_square_size")]
    pub square_size: f32,

    /// Глубина выдавливания стен вниз от уровня пола (по умолчанию 5.0)
    #[serde(default = "default_wall_height")]
    pub wall_height: f32,
}

fn default_width() -> u32 {
    128
}
fn default_height() -> u32 {
    72
}
fn default_fill_percent() -> u32 {
    45
}
fn default_smooth_iterations() -> usize {
    5
}
fn default_region_threshold() -> usize {
    50
}
fn default_passage_radius() -> i32 {
    5
}
fn default_border_size() -> u32 {
    1
}
fn default_square_size() -> f32 {
    1.0
}
fn default_wall_height() -> f32 {
    5.0
}

impl Default for CaveGenerationParams {
    fn default() -> Self {
        Self {
            seed: MapSeed::default(),
            width: 128,
            height: 72,
            fill_percent: 45,
            smooth_iterations: 5,
            wall_threshold: 50,
            room_threshold: 50,
            passage_radius: 5,
            border_size: 1,
            square_size: 1.0,
            wall_height: 5.0,
        }
    }
}

impl CaveGenerationParams {
    /// Проверяет параметры перед запуском конвейера.
    ///
    /// # Ошибки
    /// - Нулевая ширина или высота — фатальная ошибка конфигурации
    /// - `fill_percent` вне диапазона 0–100
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.width == 0 || self.height == 0 {
            return Err(GenerationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fill_percent > 100 {
            return Err(GenerationError::InvalidFillPercent(self.fill_percent));
        }
        Ok(())
    }

    /// Загружает параметры из TOML-файла
    ///
    /// # Ошибки
    /// Возвращает ошибку, если файл не найден, содержит недопустимый формат
    /// или не проходит валидацию.
    ///
    /// # Пример
    /// ```toml
    /// # cave.toml
    /// seed = 42
    /// width = 96
    /// height = 64
    /// fill_percent = 45
    /// ```
    pub fn from_toml_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let params: Self = toml::from_str(&contents)?;
        params.validate()?;
        Ok(params)
    }
}
