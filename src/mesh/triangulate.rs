use std::collections::{HashMap, HashSet};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{NodeLattice, Square};

/// Буферы меша: вершины и тройки индексов.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaveMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Triangle {
    a: u32,
    b: u32,
    c: u32,
}

impl Triangle {
    pub(super) fn contains(&self, vertex: u32) -> bool {
        vertex == self.a || vertex == self.b || vertex == self.c
    }

    pub(super) fn vertices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }
}

/// Результат триангуляции: меш пола и данные для извлечения контуров.
pub struct ContourMesh {
    pub mesh: CaveMesh,
    /// Для каждой вершины — треугольники, в которые она входит.
    pub(super) triangles_by_vertex: HashMap<u32, Vec<Triangle>>,
    /// Вершины полностью стенных квадратов: на контуре лежать не могут.
    pub(super) interior_vertices: HashSet<u32>,
}

impl ContourMesh {
    #[must_use]
    pub fn into_mesh(self) -> CaveMesh {
        self.mesh
    }
}

/// Триангулирует все квадраты решётки
///
/// Конфигурация квадрата выбирает фиксированный веер треугольников. Узел
/// получает индекс вершины при первом использовании; общие узлы соседних
/// квадратов попадают в буфер один раз.
#[must_use]
pub fn triangulate(lattice: &mut NodeLattice) -> ContourMesh {
    let mut contour = ContourMesh {
        mesh: CaveMesh::default(),
        triangles_by_vertex: HashMap::new(),
        interior_vertices: HashSet::new(),
    };

    for i in 0..lattice.squares.len() {
        let square = lattice.squares[i];
        contour.triangulate_square(lattice, &square);
    }
    contour
}

impl ContourMesh {
    fn triangulate_square(&mut self, lattice: &mut NodeLattice, sq: &Square) {
        match sq.configuration {
            0 => {}

            // Один активный угол.
            1 => self.mesh_from_points(lattice, &[sq.centre_left, sq.centre_bottom, sq.bottom_left]),
            2 => self.mesh_from_points(lattice, &[sq.bottom_right, sq.centre_bottom, sq.centre_right]),
            4 => self.mesh_from_points(lattice, &[sq.top_right, sq.centre_right, sq.centre_top]),
            8 => self.mesh_from_points(lattice, &[sq.top_left, sq.centre_top, sq.centre_left]),

            // Два активных угла.
            3 => self.mesh_from_points(
                lattice,
                &[sq.centre_right, sq.bottom_right, sq.bottom_left, sq.centre_left],
            ),
            6 => self.mesh_from_points(
                lattice,
                &[sq.centre_top, sq.top_right, sq.bottom_right, sq.centre_bottom],
            ),
            9 => self.mesh_from_points(
                lattice,
                &[sq.top_left, sq.centre_top, sq.centre_bottom, sq.bottom_left],
            ),
            12 => self.mesh_from_points(
                lattice,
                &[sq.top_left, sq.top_right, sq.centre_right, sq.centre_left],
            ),
            5 => self.mesh_from_points(
                lattice,
                &[
                    sq.centre_top,
                    sq.top_right,
                    sq.centre_right,
                    sq.centre_bottom,
                    sq.bottom_left,
                    sq.centre_left,
                ],
            ),
            10 => self.mesh_from_points(
                lattice,
                &[
                    sq.top_left,
                    sq.centre_top,
                    sq.centre_right,
                    sq.bottom_right,
                    sq.centre_bottom,
                    sq.centre_left,
                ],
            ),

            // Три активных угла.
            7 => self.mesh_from_points(
                lattice,
                &[sq.centre_top, sq.top_right, sq.bottom_right, sq.bottom_left, sq.centre_left],
            ),
            11 => self.mesh_from_points(
                lattice,
                &[sq.top_left, sq.centre_top, sq.centre_right, sq.bottom_right, sq.bottom_left],
            ),
            13 => self.mesh_from_points(
                lattice,
                &[sq.top_left, sq.top_right, sq.centre_right, sq.centre_bottom, sq.bottom_left],
            ),
            14 => self.mesh_from_points(
                lattice,
                &[sq.top_left, sq.top_right, sq.bottom_right, sq.centre_bottom, sq.centre_left],
            ),

            // Квадрат целиком в стене: рёберные узлы не нужны, а его вершины
            // заведомо не лежат на контуре.
            15 => {
                self.mesh_from_points(
                    lattice,
                    &[sq.top_left, sq.top_right, sq.bottom_right, sq.bottom_left],
                );
                for node in [sq.top_left, sq.top_right, sq.bottom_right, sq.bottom_left] {
                    if let Some(vertex) = lattice.nodes[node].vertex_index {
                        self.interior_vertices.insert(vertex);
                    }
                }
            }

            other => unreachable!("square configuration {other} outside 0..=15"),
        }
    }

    /// Назначает индексы вершин и выкладывает веер треугольников от первой
    /// точки.
    fn mesh_from_points(&mut self, lattice: &mut NodeLattice, points: &[usize]) {
        let mut ids = [0u32; 6];
        for (i, &node) in points.iter().enumerate() {
            ids[i] = match lattice.nodes[node].vertex_index {
                Some(vertex) => vertex,
                None => {
                    let vertex = self.mesh.vertices.len() as u32;
                    lattice.nodes[node].vertex_index = Some(vertex);
                    self.mesh.vertices.push(lattice.nodes[node].position);
                    vertex
                }
            };
        }

        if points.len() >= 3 {
            self.create_triangle(ids[0], ids[1], ids[2]);
        }
        if points.len() >= 4 {
            self.create_triangle(ids[0], ids[2], ids[3]);
        }
        if points.len() >= 5 {
            self.create_triangle(ids[0], ids[3], ids[4]);
        }
        if points.len() >= 6 {
            self.create_triangle(ids[0], ids[4], ids[5]);
        }
    }

    fn create_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.mesh.triangles.push([a, b, c]);
        let triangle = Triangle { a, b, c };
        for vertex in triangle.vertices() {
            self.triangles_by_vertex.entry(vertex).or_default().push(triangle);
        }
    }
}
