// src/cave.rs
//! Конвейер генерации пещеры
//!
//! Единая точка входа: засев сетки шумом → сглаживание клеточным автоматом →
//! отсев мелких областей → сборка комнат → гарантия связности с прокладкой
//! проходов → окаймление рамкой → контурная сборка мешей. Все стадии — чистые
//! преобразования над сеткой; повторный вызов с теми же параметрами даёт
//! побитово идентичный результат.

use glam::Vec2;

use crate::config::CaveGenerationParams;
use crate::error::GenerationError;
use crate::grid::{CaveGrid, Coord, Tile};
use crate::mesh::triangulate::{CaveMesh, triangulate};
use crate::mesh::walls::extrude_walls;
use crate::mesh::NodeLattice;
use crate::region::prune_small_regions;
use crate::room::graph::{RoomGraph, resolve_connectivity};
use crate::room::{Room, build_rooms};

/// Результат одного прогона генерации
///
/// После возврата данные неизменяемы; хозяин волен рендерить, строить
/// коллайдеры или сериализовать их любым способом.
#[derive(Debug)]
pub struct CaveArtifacts {
    /// Рабочая сетка после прокладки проходов (без рамки).
    pub grid: CaveGrid,
    /// Итоговая сетка, окаймлённая рамкой из стен.
    pub bordered: CaveGrid,
    /// Выжившие комнаты; координаты — в рабочей сетке.
    pub rooms: Vec<Room>,
    /// Отрезки проложенных проходов (для отладочной отрисовки).
    pub passages: Vec<(Coord, Coord)>,
    /// Меш пола пещеры.
    pub floor: CaveMesh,
    /// Выдавленный меш стен.
    pub walls: CaveMesh,
    /// Замкнутые контуры границы (плоскость X-Z) для 2D-коллайдеров.
    pub outlines: Vec<Vec<Vec2>>,
}

/// Запускает полный конвейер генерации.
///
/// # Ошибки
/// Некорректные параметры отвергаются до начала работы. Пустой список комнат
/// после отсева — допустимое вырожденное состояние: связность не требуется,
/// меш строится по полностью стенной сетке.
pub fn generate_cave(params: &CaveGenerationParams) -> Result<CaveArtifacts, GenerationError> {
    params.validate()?;
    let seed = params.seed.value();

    let mut grid = CaveGrid::fill(params.width, params.height, params.fill_percent, seed);
    grid.smooth(params.smooth_iterations);

    prune_small_regions(&mut grid, Tile::Wall, params.wall_threshold, Tile::Open);
    let surviving = prune_small_regions(&mut grid, Tile::Open, params.room_threshold, Tile::Wall);
    let mut rooms = build_rooms(&surviving, &grid);

    let mut graph = RoomGraph::new(rooms.len());
    let passages = resolve_connectivity(&mut grid, &mut rooms, &mut graph, params.passage_radius);

    let bordered = grid.with_border(params.border_size);

    let mut lattice = NodeLattice::build(&bordered, params.square_size);
    let contour = triangulate(&mut lattice);
    let outline_loops = contour.extract_outlines();
    let outlines = contour.outline_polygons(&outline_loops);
    let walls = extrude_walls(&contour, &outline_loops, params.wall_height);
    let floor = contour.into_mesh();

    Ok(CaveArtifacts {
        grid,
        bordered,
        rooms,
        passages,
        floor,
        walls,
        outlines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapSeed;

    fn params(width: u32, height: u32, seed: u64) -> CaveGenerationParams {
        CaveGenerationParams {
            seed: MapSeed::Number(seed),
            width,
            height,
            ..CaveGenerationParams::default()
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let p = params(20, 20, 42);
        let a = generate_cave(&p).unwrap();
        let b = generate_cave(&p).unwrap();

        assert_eq!(a.bordered, b.bordered);
        assert_eq!(a.floor, b.floor);
        assert_eq!(a.walls, b.walls);
        assert_eq!(a.outlines, b.outlines);
        assert_eq!(a.rooms.len(), b.rooms.len());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = generate_cave(&params(48, 48, 1)).unwrap();
        let b = generate_cave(&params(48, 48, 2)).unwrap();
        assert_ne!(a.bordered, b.bordered);
    }

    #[test]
    fn end_to_end_cave_is_fully_connected() {
        let artifacts = generate_cave(&params(64, 64, 42)).unwrap();

        assert!(!artifacts.rooms.is_empty());
        assert_eq!(artifacts.rooms.iter().filter(|r| r.is_main).count(), 1);
        assert!(artifacts.rooms.iter().all(|r| r.accessible_from_main));

        assert!(!artifacts.floor.triangles.is_empty());
        assert!(!artifacts.walls.triangles.is_empty());
        for outline in &artifacts.outlines {
            assert_eq!(outline.first(), outline.last());
            assert!(outline.len() >= 4);
        }
    }

    #[test]
    fn bordered_grid_has_wall_ring() {
        let artifacts = generate_cave(&params(20, 20, 7)).unwrap();
        let bordered = &artifacts.bordered;

        assert_eq!(bordered.width, 22);
        assert_eq!(bordered.height, 22);
        for x in 0..bordered.width {
            assert_eq!(bordered.get(x, 0), Tile::Wall);
            assert_eq!(bordered.get(x, bordered.height - 1), Tile::Wall);
        }
        for y in 0..bordered.height {
            assert_eq!(bordered.get(0, y), Tile::Wall);
            assert_eq!(bordered.get(bordered.width - 1, y), Tile::Wall);
        }
    }

    #[test]
    fn invalid_params_fail_fast() {
        let mut p = params(0, 20, 1);
        assert!(generate_cave(&p).is_err());

        p = params(20, 20, 1);
        p.fill_percent = 200;
        assert!(generate_cave(&p).is_err());
    }

    #[test]
    fn all_wall_degenerate_case_still_meshes() {
        // 100% заполнение: комнат нет, связность — no-op, меш замкнут.
        let mut p = params(16, 16, 3);
        p.fill_percent = 100;
        let artifacts = generate_cave(&p).unwrap();

        assert!(artifacts.rooms.is_empty());
        assert!(artifacts.passages.is_empty());
        assert!(!artifacts.floor.triangles.is_empty());
        assert!(artifacts.outlines.is_empty());
        assert!(artifacts.walls.triangles.is_empty());
    }
}
