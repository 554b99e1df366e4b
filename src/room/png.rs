// src/room/png.rs
//! Визуализация комнат и проходов в изображение
//!
//! Отладочный рендер результата генерации:
//! - Стены — тёмный фон, открытые клетки вне комнат — светлый
//! - Каждая комната закрашивается своим цветом из фиксированной палитры
//! - Поверх рисуются осевые линии проложенных проходов и центры комнат
//!   (центр главной комнаты выделен)
//!
//! Цвета детерминированы: комната получает цвет по своему индексу, поэтому
//! повторная генерация с тем же сидом даёт идентичную картинку.

use image::{ImageBuffer, Rgba};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::grid::{CaveGrid, Coord, Tile};
use crate::room::Room;

const WALL_COLOR: Rgba<u8> = Rgba([38, 34, 48, 255]);
const FLOOR_COLOR: Rgba<u8> = Rgba([210, 205, 190, 255]);
const PASSAGE_COLOR: Rgba<u8> = Rgba([240, 240, 240, 255]);
const MAIN_ROOM_MARK: Rgba<u8> = Rgba([255, 40, 40, 255]);
const ROOM_MARK: Rgba<u8> = Rgba([20, 20, 20, 255]);

/// Палитра комнат; индекс комнаты берётся по модулю длины.
const ROOM_PALETTE: [Rgba<u8>; 8] = [
    Rgba([140, 190, 120, 255]),
    Rgba([120, 150, 200, 255]),
    Rgba([200, 160, 110, 255]),
    Rgba([170, 120, 180, 255]),
    Rgba([110, 190, 180, 255]),
    Rgba([200, 130, 130, 255]),
    Rgba([180, 180, 110, 255]),
    Rgba([130, 130, 160, 255]),
];

/// Собирает отладочное изображение комнат поверх сетки.
#[must_use]
pub fn render_rooms(
    grid: &CaveGrid,
    rooms: &[Room],
    passages: &[(Coord, Coord)],
) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let mut img = ImageBuffer::from_pixel(grid.width, grid.height, WALL_COLOR);

    // Открытые клетки вне комнат: проложенные тоннели.
    for y in 0..grid.height {
        for x in 0..grid.width {
            if grid.get(x, y) == Tile::Open {
                img.put_pixel(x, y, FLOOR_COLOR);
            }
        }
    }

    for (index, room) in rooms.iter().enumerate() {
        let color = ROOM_PALETTE[index % ROOM_PALETTE.len()];
        for tile in &room.tiles {
            img.put_pixel(tile.x as u32, tile.y as u32, color);
        }
    }

    for &(a, b) in passages {
        draw_line_segment_mut(
            &mut img,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            PASSAGE_COLOR,
        );
    }

    for room in rooms {
        let (cx, cy) = room.centre();
        let mark = if room.is_main { MAIN_ROOM_MARK } else { ROOM_MARK };
        let radius = if room.is_main { 2 } else { 1 };
        draw_filled_circle_mut(&mut img, (cx.round() as i32, cy.round() as i32), radius, mark);
    }

    img
}

/// Сохраняет отладочный рендер комнат в PNG-файл.
pub fn save_rooms_png(
    grid: &CaveGrid,
    rooms: &[Room],
    passages: &[(Coord, Coord)],
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    render_rooms(grid, rooms, passages).save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::find_regions;
    use crate::room::build_rooms;

    #[test]
    fn render_matches_grid_dimensions() {
        let mut grid = CaveGrid::new(12, 9);
        for y in 2..5 {
            for x in 2..6 {
                grid.set(x, y, Tile::Open);
            }
        }
        let regions = find_regions(&grid, Tile::Open);
        let rooms = build_rooms(&regions, &grid);

        let img = render_rooms(&grid, &rooms, &[]);
        assert_eq!(img.dimensions(), (12, 9));
        // Угловая клетка комнаты (вне маркера центра) закрашена палитрой.
        assert_eq!(*img.get_pixel(2, 2), ROOM_PALETTE[0]);
        assert_eq!(*img.get_pixel(0, 0), WALL_COLOR);
    }
}
