use glam::Vec3;

use super::triangulate::{CaveMesh, ContourMesh};

/// Выдавливает стены вниз вдоль контуров границы
///
/// На каждое ребро контура — четыре вершины (верхняя и нижняя пары) и два
/// треугольника. Порядок обхода контура задаёт ориентацию: нормали квадов
/// смотрят внутрь пещеры, как и у исходного меша пола.
#[must_use]
pub fn extrude_walls(contour: &ContourMesh, outlines: &[Vec<u32>], wall_height: f32) -> CaveMesh {
    let mut walls = CaveMesh::default();
    let drop = Vec3::Y * wall_height;

    for outline in outlines {
        for pair in outline.windows(2) {
            let left = contour.mesh.vertices[pair[0] as usize];
            let right = contour.mesh.vertices[pair[1] as usize];
            let start = walls.vertices.len() as u32;

            walls.vertices.push(left); // верх слева
            walls.vertices.push(right); // верх справа
            walls.vertices.push(left - drop); // низ слева
            walls.vertices.push(right - drop); // низ справа

            walls.triangles.push([start, start + 2, start + 3]);
            walls.triangles.push([start + 3, start + 1, start]);
        }
    }
    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CaveGrid, Tile};
    use crate::mesh::NodeLattice;
    use crate::mesh::triangulate::triangulate;

    #[test]
    fn wall_quads_match_outline_edges() {
        let mut grid = CaveGrid::new(3, 3);
        grid.set(1, 1, Tile::Open);
        let mut lattice = NodeLattice::build(&grid, 1.0);
        let contour = triangulate(&mut lattice);
        let outlines = contour.extract_outlines();

        let total_edges: usize = outlines.iter().map(|o| o.len() - 1).sum();
        let walls = extrude_walls(&contour, &outlines, 5.0);

        assert_eq!(walls.triangles.len(), total_edges * 2);
        assert_eq!(walls.vertices.len(), total_edges * 4);
    }

    #[test]
    fn walls_drop_by_extrusion_height() {
        let mut grid = CaveGrid::new(3, 3);
        grid.set(1, 1, Tile::Open);
        let mut lattice = NodeLattice::build(&grid, 1.0);
        let contour = triangulate(&mut lattice);
        let outlines = contour.extract_outlines();
        let walls = extrude_walls(&contour, &outlines, 3.5);

        for quad in walls.vertices.chunks(4) {
            assert_eq!(quad[0].y, 0.0);
            assert_eq!(quad[2].y, -3.5);
            assert_eq!(quad[3].y, -3.5);
        }
    }

    #[test]
    fn no_outlines_no_walls() {
        let grid = CaveGrid::new(3, 3);
        let mut lattice = NodeLattice::build(&grid, 1.0);
        let contour = triangulate(&mut lattice);
        let outlines = contour.extract_outlines();
        let walls = extrude_walls(&contour, &outlines, 5.0);
        assert!(walls.vertices.is_empty());
        assert!(walls.triangles.is_empty());
    }
}
