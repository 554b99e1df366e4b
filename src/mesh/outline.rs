use std::collections::HashSet;

use glam::Vec2;

use super::triangulate::ContourMesh;

impl ContourMesh {
    /// Ребро лежит на контуре, если оно принадлежит ровно одному
    /// треугольнику.
    fn is_outline_edge(&self, a: u32, b: u32) -> bool {
        let Some(triangles) = self.triangles_by_vertex.get(&a) else {
            return false;
        };
        triangles.iter().filter(|t| t.contains(b)).count() == 1
    }

    /// Следующая непосещённая вершина, связанная с `vertex` контурным ребром.
    fn connected_outline_vertex(&self, vertex: u32, visited: &HashSet<u32>) -> Option<u32> {
        for triangle in self.triangles_by_vertex.get(&vertex)? {
            for candidate in triangle.vertices() {
                if candidate != vertex
                    && !visited.contains(&candidate)
                    && self.is_outline_edge(vertex, candidate)
                {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Извлекает замкнутые контуры границы стен
    ///
    /// Контур следуется итеративно от любой ещё не посещённой вершины,
    /// имеющей контурное продолжение, пока цепочка не оборвётся; затем
    /// замыкается стартовой вершиной. Вершины полностью стенных квадратов
    /// исключены заранее. Каждый контур — упорядоченный,
    /// несамопересекающийся многоугольник; один контур на каждую
    /// компоненту границы.
    #[must_use]
    pub fn extract_outlines(&self) -> Vec<Vec<u32>> {
        let mut visited: HashSet<u32> = self.interior_vertices.clone();
        let mut outlines = Vec::new();

        for vertex in 0..self.mesh.vertices.len() as u32 {
            if visited.contains(&vertex) {
                continue;
            }
            let Some(next) = self.connected_outline_vertex(vertex, &visited) else {
                continue;
            };
            visited.insert(vertex);

            let mut outline = vec![vertex];
            let mut current = next;
            loop {
                outline.push(current);
                visited.insert(current);
                match self.connected_outline_vertex(current, &visited) {
                    Some(n) => current = n,
                    None => break,
                }
            }
            outline.push(vertex); // замыкаем многоугольник
            outlines.push(outline);
        }
        outlines
    }

    /// Контуры как двумерные многоугольники (плоскость X-Z) для генерации
    /// коллайдеров.
    #[must_use]
    pub fn outline_polygons(&self, outlines: &[Vec<u32>]) -> Vec<Vec<Vec2>> {
        outlines
            .iter()
            .map(|outline| {
                outline
                    .iter()
                    .map(|&v| {
                        let p = self.mesh.vertices[v as usize];
                        Vec2::new(p.x, p.z)
                    })
                    .collect()
            })
            .collect()
    }
}
