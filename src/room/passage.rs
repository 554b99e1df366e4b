use crate::grid::{CaveGrid, Coord, Tile};
use crate::room::Room;
use crate::room::graph::RoomGraph;

/// Целочисленная трассировка отрезка между клетками
///
/// Шаг по главной оси на каждой итерации, накопление ошибки по побочной.
/// Последовательность включает начальную клетку и не включает конечную;
/// всего точек столько, какова длина проекции на главную ось.
#[must_use]
pub fn trace_line(from: Coord, to: Coord) -> Vec<Coord> {
    let mut line = Vec::new();

    let mut x = from.x;
    let mut y = from.y;

    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let mut inverted = false;
    let mut step = dx.signum();
    let mut gradient_step = dy.signum();

    let mut longest = dx.abs();
    let mut shortest = dy.abs();

    if longest < shortest {
        inverted = true;
        longest = dy.abs();
        shortest = dx.abs();
        step = dy.signum();
        gradient_step = dx.signum();
    }

    let mut gradient_accumulation = longest / 2;
    for _ in 0..longest {
        line.push(Coord::new(x, y));

        if inverted {
            y += step;
        } else {
            x += step;
        }

        gradient_accumulation += shortest;
        if gradient_accumulation >= longest {
            if inverted {
                x += gradient_step;
            } else {
                y += gradient_step;
            }
            gradient_accumulation -= longest;
        }
    }

    line
}

/// Вскрывает круг радиуса `radius` вокруг клетки `centre`.
///
/// Смещения за пределами сетки молча пропускаются: у края карты штамп
/// срезается, это штатная ситуация.
pub fn stamp_circle(grid: &mut CaveGrid, centre: Coord, radius: i32) {
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                let x = centre.x + dx;
                let y = centre.y + dy;
                if grid.in_range(x, y) {
                    grid.set(x as u32, y as u32, Tile::Open);
                }
            }
        }
    }
}

/// Прокладывает проход между комнатами: соединяет их в графе и вскрывает
/// круглый тоннель вдоль отрезка между выбранными краевыми клетками.
#[allow(clippy::too_many_arguments)]
pub fn carve_passage(
    grid: &mut CaveGrid,
    rooms: &mut [Room],
    graph: &mut RoomGraph,
    a: usize,
    b: usize,
    tile_a: Coord,
    tile_b: Coord,
    radius: i32,
) {
    graph.connect(rooms, a, b);
    for point in trace_line(tile_a, tile_b) {
        stamp_circle(grid, point, radius);
    }
}
