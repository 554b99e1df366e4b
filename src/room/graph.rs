use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Dfs;

use crate::grid::{CaveGrid, Coord};
use crate::room::Room;
use crate::room::passage::carve_passage;

/// Граф соединений комнат
///
/// Вес узла — индекс комнаты в списке. Рёбра появляются при прокладке
/// проходов; сами комнаты граф не хранит.
pub struct RoomGraph {
    graph: UnGraph<usize, ()>,
    nodes: Vec<NodeIndex>,
}

impl RoomGraph {
    #[must_use]
    pub fn new(room_count: usize) -> Self {
        let mut graph = UnGraph::new_undirected();
        let nodes = (0..room_count).map(|i| graph.add_node(i)).collect();
        Self { graph, nodes }
    }

    #[must_use]
    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        self.graph.contains_edge(self.nodes[a], self.nodes[b])
    }

    #[must_use]
    pub fn connection_count(&self, room: usize) -> usize {
        self.graph.neighbors(self.nodes[room]).count()
    }

    /// Соединяет две комнаты и при необходимости распространяет достижимость
    ///
    /// Если любая из сторон уже достижима из главной комнаты, флаг обходом в
    /// глубину переносится на всю объединённую компоненту. Повторное
    /// соединение — no-op.
    pub fn connect(&mut self, rooms: &mut [Room], a: usize, b: usize) {
        if a == b || self.are_connected(a, b) {
            return;
        }
        self.graph.add_edge(self.nodes[a], self.nodes[b], ());
        if rooms[a].accessible_from_main || rooms[b].accessible_from_main {
            self.mark_accessible(rooms, a);
        }
    }

    /// Помечает достижимой всю компоненту связности комнаты `start`.
    fn mark_accessible(&self, rooms: &mut [Room], start: usize) {
        let mut dfs = Dfs::new(&self.graph, self.nodes[start]);
        while let Some(node) = dfs.next(&self.graph) {
            rooms[self.graph[node]].accessible_from_main = true;
        }
    }
}

/// Квадрат евклидова расстояния между клетками.
fn squared_distance(a: Coord, b: Coord) -> i64 {
    let dx = i64::from(a.x - b.x);
    let dy = i64::from(a.y - b.y);
    dx * dx + dy * dy
}

/// Ближайшая пара краевых клеток двух комнат.
///
/// Улучшение строго по `<`: при равных расстояниях побеждает первая
/// найденная пара — вместе с фиксированным порядком обхода комнат это даёт
/// воспроизводимый выбор.
fn closest_edge_tiles(room_a: &Room, room_b: &Room) -> Option<(Coord, Coord, i64)> {
    let mut best: Option<(Coord, Coord, i64)> = None;
    for &tile_a in &room_a.edge_tiles {
        for &tile_b in &room_b.edge_tiles {
            let distance = squared_distance(tile_a, tile_b);
            if best.is_none_or(|(_, _, d)| distance < d) {
                best = Some((tile_a, tile_b, distance));
            }
        }
    }
    best
}

/// Разрешение связности: каждая комната становится достижимой из главной
///
/// Две фазы. Сначала каждая ещё не соединённая комната жадно пришивается к
/// глобально ближайшей соседке — это не гарантирует общей достижимости.
/// Затем, пока остаются недостижимые комнаты, соединяется глобально
/// ближайшая пара «недостижимая × достижимая». Возвращает отрезки
/// проложенных проходов (для отладочной отрисовки).
///
/// Пустой список комнат — допустимое вырожденное состояние, обе фазы
/// при этом не делают ничего.
pub fn resolve_connectivity(
    grid: &mut CaveGrid,
    rooms: &mut [Room],
    graph: &mut RoomGraph,
    passage_radius: i32,
) -> Vec<(Coord, Coord)> {
    let mut passages = Vec::new();
    connect_closest_rooms(grid, rooms, graph, passage_radius, &mut passages);
    force_accessibility(grid, rooms, graph, passage_radius, &mut passages);
    passages
}

/// Фаза 1: жадное соединение каждой изолированной комнаты с ближайшей.
fn connect_closest_rooms(
    grid: &mut CaveGrid,
    rooms: &mut [Room],
    graph: &mut RoomGraph,
    passage_radius: i32,
    passages: &mut Vec<(Coord, Coord)>,
) {
    for a in 0..rooms.len() {
        // Комната могла получить связь, пока обходили предыдущие.
        if graph.connection_count(a) > 0 {
            continue;
        }

        let mut best: Option<(usize, Coord, Coord, i64)> = None;
        for b in 0..rooms.len() {
            if a == b || graph.are_connected(a, b) {
                continue;
            }
            if let Some((tile_a, tile_b, distance)) = closest_edge_tiles(&rooms[a], &rooms[b]) {
                if best.is_none_or(|(_, _, _, d)| distance < d) {
                    best = Some((b, tile_a, tile_b, distance));
                }
            }
        }

        if let Some((b, tile_a, tile_b, _)) = best {
            carve_passage(grid, rooms, graph, a, b, tile_a, tile_b, passage_radius);
            passages.push((tile_a, tile_b));
        }
    }
}

/// Фаза 2: принудительная достижимость из главной комнаты.
///
/// Каждая итерация переводит хотя бы одну комнату в достижимые, поэтому цикл
/// конечен. Недостижимые комнаты без подходящей пары — нарушение инварианта.
fn force_accessibility(
    grid: &mut CaveGrid,
    rooms: &mut [Room],
    graph: &mut RoomGraph,
    passage_radius: i32,
    passages: &mut Vec<(Coord, Coord)>,
) {
    loop {
        let mut best: Option<(usize, usize, Coord, Coord, i64)> = None;
        let mut pending = 0;

        for a in 0..rooms.len() {
            if rooms[a].accessible_from_main {
                continue;
            }
            pending += 1;
            for b in 0..rooms.len() {
                if !rooms[b].accessible_from_main {
                    continue;
                }
                if let Some((tile_a, tile_b, distance)) = closest_edge_tiles(&rooms[a], &rooms[b]) {
                    if best.is_none_or(|(_, _, _, _, d)| distance < d) {
                        best = Some((a, b, tile_a, tile_b, distance));
                    }
                }
            }
        }

        if pending == 0 {
            return;
        }
        match best {
            Some((a, b, tile_a, tile_b, _)) => {
                carve_passage(grid, rooms, graph, a, b, tile_a, tile_b, passage_radius);
                passages.push((tile_a, tile_b));
            }
            None => panic!("{pending} rooms remain inaccessible but no joinable pair exists"),
        }
    }
}
