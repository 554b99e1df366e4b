//! Контурная сборка меша по методу марширующих квадратов
//!
//! Окаймлённая сетка превращается в решётку узлов: один контрольный узел в
//! центре каждой клетки плюс два промежуточных узла на серединах рёбер
//! («сверху» и «справа»). Каждая четвёрка соседних клеток образует квадрат;
//! его 4-битная конфигурация активных (стенных) углов задаёт локальную
//! триангуляцию. Промежуточные узлы разделяются соседними квадратами по
//! индексу, поэтому общие вершины не дублируются.

pub mod outline;
pub mod triangulate;
pub mod walls;

use glam::Vec3;

use crate::grid::{CaveGrid, Tile};

/// Узел решётки — потенциальная вершина меша.
///
/// Индекс вершины назначается лениво при первом попадании узла в выходной
/// буфер; до этого узел вершиной не является.
#[derive(Debug, Clone)]
pub struct LatticeNode {
    pub position: Vec3,
    pub vertex_index: Option<u32>,
}

/// Квадрат из четырёх контрольных узлов и четырёх общих рёберных узлов.
///
/// Конфигурация: top-left = 8, top-right = 4, bottom-right = 2,
/// bottom-left = 1.
#[derive(Debug, Clone, Copy)]
pub struct Square {
    pub top_left: usize,
    pub top_right: usize,
    pub bottom_right: usize,
    pub bottom_left: usize,
    pub centre_top: usize,
    pub centre_right: usize,
    pub centre_bottom: usize,
    pub centre_left: usize,
    pub configuration: u8,
}

/// Решётка узлов над окаймлённой сеткой.
///
/// Узлы лежат в одном массиве, по три на клетку: контрольный, «сверху»,
/// «справа». Квадраты ссылаются на узлы по индексам, за счёт чего соседние
/// квадраты делят рёберные узлы.
pub struct NodeLattice {
    pub nodes: Vec<LatticeNode>,
    pub squares: Vec<Square>,
}

impl NodeLattice {
    /// Строит решётку: позиции центрированы относительно середины карты,
    /// плоскость X-Z, ось Y свободна под выдавливание стен.
    #[must_use]
    pub fn build(grid: &CaveGrid, square_size: f32) -> Self {
        let count_x = grid.width as usize;
        let count_y = grid.height as usize;
        let map_width = count_x as f32 * square_size;
        let map_height = count_y as f32 * square_size;

        let control = |x: usize, y: usize| (y * count_x + x) * 3;
        let above = |x: usize, y: usize| (y * count_x + x) * 3 + 1;
        let right = |x: usize, y: usize| (y * count_x + x) * 3 + 2;

        let mut nodes = Vec::with_capacity(count_x * count_y * 3);
        for y in 0..count_y {
            for x in 0..count_x {
                let position = Vec3::new(
                    -map_width / 2.0 + x as f32 * square_size + square_size / 2.0,
                    0.0,
                    -map_height / 2.0 + y as f32 * square_size + square_size / 2.0,
                );
                nodes.push(LatticeNode {
                    position,
                    vertex_index: None,
                });
                nodes.push(LatticeNode {
                    position: position + Vec3::Z * (square_size / 2.0),
                    vertex_index: None,
                });
                nodes.push(LatticeNode {
                    position: position + Vec3::X * (square_size / 2.0),
                    vertex_index: None,
                });
            }
        }

        let active = |x: usize, y: usize| grid.get(x as u32, y as u32) == Tile::Wall;

        let mut squares = Vec::with_capacity((count_x - 1) * (count_y - 1));
        for y in 0..count_y - 1 {
            for x in 0..count_x - 1 {
                let configuration = (u8::from(active(x, y + 1)) << 3)
                    | (u8::from(active(x + 1, y + 1)) << 2)
                    | (u8::from(active(x + 1, y)) << 1)
                    | u8::from(active(x, y));

                squares.push(Square {
                    top_left: control(x, y + 1),
                    top_right: control(x + 1, y + 1),
                    bottom_right: control(x + 1, y),
                    bottom_left: control(x, y),
                    centre_top: right(x, y + 1),
                    centre_right: above(x + 1, y),
                    centre_bottom: right(x, y),
                    centre_left: above(x, y),
                    configuration,
                });
            }
        }

        NodeLattice { nodes, squares }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_wall_grid(width: u32, height: u32) -> CaveGrid {
        CaveGrid::new(width, height)
    }

    #[test]
    fn lattice_dimensions() {
        let lattice = NodeLattice::build(&all_wall_grid(4, 3), 1.0);
        assert_eq!(lattice.nodes.len(), 4 * 3 * 3);
        assert_eq!(lattice.squares.len(), 3 * 2);
    }

    #[test]
    fn positions_are_centred() {
        let lattice = NodeLattice::build(&all_wall_grid(2, 2), 1.0);
        // Контрольный узел клетки (0, 0) при карте 2×2 и ячейке 1.0.
        let node = &lattice.nodes[0];
        assert!((node.position.x - (-0.5)).abs() < 1e-6);
        assert!((node.position.z - (-0.5)).abs() < 1e-6);
    }

    #[test]
    fn neighbouring_squares_share_edge_nodes() {
        let lattice = NodeLattice::build(&all_wall_grid(3, 3), 1.0);
        // Квадраты (0,0) и (1,0): правое ребро первого — левое ребро второго.
        let left = lattice.squares[0];
        let right = lattice.squares[1];
        assert_eq!(left.centre_right, right.centre_left);
        assert_eq!(left.top_right, right.top_left);
        assert_eq!(left.bottom_right, right.bottom_left);

        // Квадраты (0,0) и (0,1): верхнее ребро нижнего — нижнее ребро верхнего.
        let below = lattice.squares[0];
        let above = lattice.squares[2];
        assert_eq!(below.centre_top, above.centre_bottom);
    }

    #[test]
    fn configuration_encodes_active_corners() {
        let mut grid = CaveGrid::new(2, 2);
        grid.set(0, 1, Tile::Open); // top-left открыт
        let lattice = NodeLattice::build(&grid, 1.0);
        // Активны top-right, bottom-right, bottom-left: 4 + 2 + 1.
        assert_eq!(lattice.squares[0].configuration, 7);
    }
}
