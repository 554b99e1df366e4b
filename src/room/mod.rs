pub mod graph;
pub mod passage;
pub mod png;

use crate::grid::{CaveGrid, Coord, DIRECTIONS, Tile};
use crate::region::Region;

/// Комната — выжившая открытая область
///
/// Флаг достижимости распространяется по рёбрам графа соединений от главной
/// комнаты; после разрешения связности он истинен у всех комнат.
#[derive(Debug, Clone)]
pub struct Room {
    pub tiles: Vec<Coord>,
    /// Открытые клетки, у которых есть ортогональный сосед-стена.
    pub edge_tiles: Vec<Coord>,
    pub size: usize,
    pub is_main: bool,
    pub accessible_from_main: bool,
}

impl Room {
    /// Строит комнату по открытой области, вычисляя краевые клетки.
    #[must_use]
    pub fn from_region(region: &Region, grid: &CaveGrid) -> Self {
        let mut edge_tiles = Vec::new();
        for &tile in &region.tiles {
            let touches_wall = DIRECTIONS.iter().any(|&(dx, dy)| {
                let nx = tile.x + dx;
                let ny = tile.y + dy;
                grid.in_range(nx, ny) && grid.get(nx as u32, ny as u32) == Tile::Wall
            });
            if touches_wall {
                edge_tiles.push(tile);
            }
        }

        Room {
            size: region.tiles.len(),
            tiles: region.tiles.clone(),
            edge_tiles,
            is_main: false,
            accessible_from_main: false,
        }
    }

    /// Геометрический центр комнаты (для отладочной отрисовки).
    #[must_use]
    pub fn centre(&self) -> (f32, f32) {
        let sum_x: f32 = self.tiles.iter().map(|c| c.x as f32).sum();
        let sum_y: f32 = self.tiles.iter().map(|c| c.y as f32).sum();
        let count = self.tiles.len().max(1) as f32;
        (sum_x / count, sum_y / count)
    }
}

/// Строит список комнат из выживших областей
///
/// Комнаты сортируются по убыванию размера (сортировка стабильная: при равных
/// размерах сохраняется порядок обнаружения, что фиксирует детерминизм поиска
/// ближайших комнат). Самая большая комната назначается главной.
#[must_use]
pub fn build_rooms(regions: &[Region], grid: &CaveGrid) -> Vec<Room> {
    let mut rooms: Vec<Room> = regions.iter().map(|r| Room::from_region(r, grid)).collect();
    rooms.sort_by(|a, b| b.size.cmp(&a.size));

    if let Some(main) = rooms.first_mut() {
        main.is_main = true;
        main.accessible_from_main = true;
    }
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::find_regions;

    fn grid_from_rows(rows: &[&str]) -> CaveGrid {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let mut grid = CaveGrid::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let tile = if ch == '#' { Tile::Wall } else { Tile::Open };
                grid.set(x as u32, y as u32, tile);
            }
        }
        grid
    }

    #[test]
    fn edge_tiles_touch_walls() {
        let grid = grid_from_rows(&[
            "#####",
            "#...#",
            "#...#",
            "#...#",
            "#####",
        ]);
        let regions = find_regions(&grid, Tile::Open);
        let room = Room::from_region(&regions[0], &grid);

        assert_eq!(room.size, 9);
        // Из блока 3×3 только центральная клетка не касается стены.
        assert_eq!(room.edge_tiles.len(), 8);
        assert!(!room.edge_tiles.contains(&Coord::new(2, 2)));
    }

    #[test]
    fn edge_tiles_listed_once() {
        // Угловая клетка касается двух стен, но входит в список один раз.
        let grid = grid_from_rows(&[
            "####",
            "#..#",
            "#..#",
            "####",
        ]);
        let regions = find_regions(&grid, Tile::Open);
        let room = Room::from_region(&regions[0], &grid);
        assert_eq!(room.edge_tiles.len(), 4);
    }

    #[test]
    fn largest_room_becomes_main() {
        let grid = grid_from_rows(&[
            "#########",
            "#..##...#",
            "#..##...#",
            "#########",
        ]);
        let regions = find_regions(&grid, Tile::Open);
        let rooms = build_rooms(&regions, &grid);

        assert_eq!(rooms.len(), 2);
        assert!(rooms[0].size >= rooms[1].size);
        assert!(rooms[0].is_main);
        assert!(rooms[0].accessible_from_main);
        assert!(!rooms[1].is_main);
        assert!(!rooms[1].accessible_from_main);
        assert_eq!(rooms.iter().filter(|r| r.is_main).count(), 1);
    }

    #[test]
    fn region_touching_grid_edge_is_guarded() {
        // Открытая клетка на самом краю сетки: проверка соседей не должна
        // выйти за границы.
        let grid = grid_from_rows(&[
            ".###",
            "..##",
            "####",
        ]);
        let regions = find_regions(&grid, Tile::Open);
        let room = Room::from_region(&regions[0], &grid);
        assert_eq!(room.size, 3);
        assert_eq!(room.edge_tiles.len(), 3);
    }
}
