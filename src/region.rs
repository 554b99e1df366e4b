use std::collections::VecDeque;

use crate::grid::{CaveGrid, Coord, DIRECTIONS, Tile};

/// Связная область клеток одного типа (4-связность).
#[derive(Debug, Clone)]
pub struct Region {
    pub tile: Tile,
    pub tiles: Vec<Coord>,
}

impl Region {
    #[must_use]
    pub fn size(&self) -> usize {
        self.tiles.len()
    }
}

/// Находит все связные области клеток типа `tile`
///
/// Области попарно не пересекаются, а их объединение — в точности множество
/// клеток искомого типа.
#[must_use]
pub fn find_regions(grid: &CaveGrid, tile: Tile) -> Vec<Region> {
    let width = grid.width as i32;
    let height = grid.height as i32;
    let mut visited = vec![false; (grid.width * grid.height) as usize];
    let mut regions = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            if visited[idx] || grid.data[idx] != tile {
                continue;
            }

            // BFS по ортогональным соседям
            let mut tiles = Vec::new();
            let mut queue = VecDeque::new();
            queue.push_back(Coord::new(x, y));
            visited[idx] = true;

            while let Some(coord) = queue.pop_front() {
                tiles.push(coord);
                for &(dx, dy) in &DIRECTIONS {
                    let nx = coord.x + dx;
                    let ny = coord.y + dy;
                    if !grid.in_range(nx, ny) {
                        continue;
                    }
                    let nidx = (ny * width + nx) as usize;
                    if !visited[nidx] && grid.data[nidx] == tile {
                        visited[nidx] = true;
                        queue.push_back(Coord::new(nx, ny));
                    }
                }
            }

            regions.push(Region { tile, tiles });
        }
    }
    regions
}

/// Отсев мелких областей: клетки областей меньше порога перезаписываются
/// значением `fill`, выжившие области возвращаются
///
/// Мелкие скопления стен вскрываются, мелкие карманы комнат замуровываются.
pub fn prune_small_regions(
    grid: &mut CaveGrid,
    tile: Tile,
    threshold: usize,
    fill: Tile,
) -> Vec<Region> {
    let regions = find_regions(grid, tile);
    let mut surviving = Vec::new();
    let mut erased = 0;

    for region in regions {
        if region.size() < threshold {
            for coord in &region.tiles {
                grid.set(coord.x as u32, coord.y as u32, fill);
            }
            erased += 1;
        } else {
            surviving.push(region);
        }
    }
    println!("🧹 Стёрто {} мелких областей типа {:?}.", erased, tile);
    surviving
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Сетка из текстовой схемы: '#' — стена, '.' — пол.
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
    fn regions_partition_matching_cells() {
        let grid = grid_from_rows(&[
            "########",
            "#..##..#",
            "#..##..#",
            "########",
        ]);

        let regions = find_regions(&grid, Tile::Open);
        assert_eq!(regions.len(), 2);

        let mut seen = HashSet::new();
        let mut total = 0;
        for region in &regions {
            for coord in &region.tiles {
                assert!(seen.insert(*coord), "клетка попала в две области");
                total += 1;
            }
        }
        assert_eq!(total, grid.open_count());
    }

    #[test]
    fn diagonal_cells_are_separate_regions() {
        let grid = grid_from_rows(&[
            "####",
            "#.##",
            "##.#",
            "####",
        ]);
        assert_eq!(find_regions(&grid, Tile::Open).len(), 2);
    }

    #[test]
    fn prune_opens_small_wall_blob() {
        let mut grid = grid_from_rows(&[
            "########",
            "#......#",
            "#..#...#",
            "#......#",
            "########",
        ]);

        let surviving = prune_small_regions(&mut grid, Tile::Wall, 5, Tile::Open);
        // Одиночная стена внутри зала стёрта, внешняя рамка выжила.
        assert_eq!(grid.get(3, 2), Tile::Open);
        assert_eq!(surviving.len(), 1);
        assert!(surviving[0].size() >= 5);
    }

    #[test]
    fn prune_fills_small_room() {
        let mut grid = grid_from_rows(&[
            "#########",
            "#....##.#",
            "#....####",
            "#########",
        ]);

        let surviving = prune_small_regions(&mut grid, Tile::Open, 3, Tile::Wall);
        assert_eq!(surviving.len(), 1);
        assert_eq!(grid.get(7, 1), Tile::Wall);
        assert_eq!(grid.get(1, 1), Tile::Open);
    }
}
