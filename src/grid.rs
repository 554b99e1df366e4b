use image::{ImageBuffer, Luma};
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Состояние клетки сетки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Open,
    Wall,
}

/// Целочисленные координаты клетки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Ортогональные соседи клетки (4-связность).
pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Двумерная сетка пещеры: стены и открытые клетки
///
/// Хранение построчное, индекс `y * width + x`. Инвариант после синтеза:
/// все клетки по периметру — стены.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaveGrid {
    pub width: u32,
    pub height: u32,
    pub data: Vec<Tile>,
}

impl CaveGrid {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![Tile::Wall; (width * height) as usize],
        }
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Tile {
        self.data[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: Tile) {
        self.data[(y * self.width + x) as usize] = value;
    }

    /// Проверяет, что координаты лежат внутри сетки.
    #[must_use]
    pub fn in_range(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Число открытых клеток.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.data.iter().filter(|&&t| t == Tile::Open).count()
    }

    /// Засев сетки шумом: детерминирован по сиду
    ///
    /// Периметр всегда заполняется стенами; внутренние клетки становятся
    /// стеной с вероятностью `fill_percent`/100. Порядок обхода (построчно,
    /// y внешний) — часть контракта детерминизма: одинаковые сид, размеры и
    /// процент заполнения всегда дают одинаковую сетку.
    #[must_use]
    pub fn fill(width: u32, height: u32, fill_percent: u32, seed: u64) -> Self {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        let mut grid = CaveGrid::new(width, height);

        for y in 0..height {
            for x in 0..width {
                let tile = if x == 0 || x == width - 1 || y == 0 || y == height - 1 {
                    Tile::Wall
                } else if rng.gen_range(0..100) < fill_percent {
                    Tile::Wall
                } else {
                    Tile::Open
                };
                grid.set(x, y, tile);
            }
        }
        grid
    }

    /// Сглаживание клеточным автоматом (правило большинства по 8 соседям)
    ///
    /// Соседи за пределами сетки считаются стенами. Больше четырёх стен
    /// вокруг — клетка становится стеной, меньше четырёх — открывается,
    /// ровно четыре — остаётся как есть. Каждый проход синхронный: счёт
    /// соседей читается из снимка сетки на начало прохода.
    pub fn smooth(&mut self, iterations: usize) {
        let width = self.width as i32;
        let height = self.height as i32;
        let mut snapshot = self.data.clone();

        for _ in 0..iterations {
            snapshot.copy_from_slice(&self.data);
            for y in 0..height {
                for x in 0..width {
                    let walls = wall_neighbours(&snapshot, width, height, x, y);
                    let idx = (y * width + x) as usize;
                    if walls > 4 {
                        self.data[idx] = Tile::Wall;
                    } else if walls < 4 {
                        self.data[idx] = Tile::Open;
                    }
                }
            }
        }
    }

    /// Возвращает копию сетки, окаймлённую рамкой из стен.
    #[must_use]
    pub fn with_border(&self, border_size: u32) -> CaveGrid {
        let bordered_width = self.width + border_size * 2;
        let bordered_height = self.height + border_size * 2;
        let mut bordered = CaveGrid::new(bordered_width, bordered_height);

        for y in 0..bordered_height {
            for x in 0..bordered_width {
                let inside = x >= border_size
                    && x < self.width + border_size
                    && y >= border_size
                    && y < self.height + border_size;
                if inside {
                    bordered.set(x, y, self.get(x - border_size, y - border_size));
                }
            }
        }
        bordered
    }

    #[cfg(feature = "parallel")]
    #[must_use]
    pub fn to_grayscale_image(&self) -> Vec<u8> {
        self.data
            .par_iter()
            .map(|&t| if t == Tile::Wall { 0u8 } else { 255 })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    #[must_use]
    pub fn to_grayscale_image(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&t| if t == Tile::Wall { 0u8 } else { 255 })
            .collect()
    }

    pub fn save_as_png(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let img: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(self.width, self.height, self.to_grayscale_image())
                .ok_or("Failed to create image buffer")?;
        img.save(path)?;
        Ok(())
    }
}

/// Считает стены среди восьми соседей клетки; выход за границу — стена.
fn wall_neighbours(data: &[Tile], width: i32, height: i32, cx: i32, cy: i32) -> u32 {
    let mut count = 0;
    for ny in (cy - 1)..=(cy + 1) {
        for nx in (cx - 1)..=(cx + 1) {
            if nx == cx && ny == cy {
                continue;
            }
            if nx < 0 || nx >= width || ny < 0 || ny >= height {
                count += 1;
            } else if data[(ny * width + nx) as usize] == Tile::Wall {
                count += 1;
            }
        }
    }
    count
}
