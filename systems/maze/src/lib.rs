#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomised depth-first maze generation over a grid of walled rooms.
//!
//! Every room starts fully enclosed. The generator walks the grid with an
//! explicit backtracking stack and carves one doorway per tree edge, removing
//! the same contiguous run of wall segments from both rooms sharing the edge.
//! The resulting door graph is a spanning tree, so every room is reachable from
//! the start room and no loops exist.

use std::collections::VecDeque;
use std::ops::Range;

use nrogue_core::{CoverEdges, GridTuning, Rect, RoomIndex, RoomRole, Side, WallKind, WallSegment};
use rand::Rng;
use thiserror::Error;
use tracing::debug;

const EDGE_EPSILON: f32 = 0.01;

/// Failures detected while generating a maze.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The grid cannot hold a start and an exit room, or its rooms are too small for walls.
    #[error("grid of {columns}x{rows} rooms cannot hold a maze")]
    GridTooSmall {
        /// Configured number of columns.
        columns: u32,
        /// Configured number of rows.
        rows: u32,
    },
    /// Some rooms are unreachable from the start room.
    #[error("only {reached} of {total} rooms are reachable from the start room")]
    Disconnected {
        /// Rooms reached by a breadth-first walk from the start room.
        reached: usize,
        /// Rooms in the grid.
        total: usize,
    },
    /// A role every level requires was not assigned exactly once.
    #[error("no room was assigned the {0} role")]
    MissingRole(RoomRole),
}

/// Doorway carved between two adjacent rooms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Carving {
    from: RoomIndex,
    to: RoomIndex,
    side: Side,
    segments: Range<usize>,
}

impl Carving {
    /// Room the walk was standing in when the doorway was carved.
    #[must_use]
    pub const fn from(&self) -> RoomIndex {
        self.from
    }

    /// Room the walk entered through the doorway.
    #[must_use]
    pub const fn to(&self) -> RoomIndex {
        self.to
    }

    /// Side of [`Carving::from`] that holds the doorway.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Range of straight segment slots removed from both rooms.
    #[must_use]
    pub fn segments(&self) -> Range<usize> {
        self.segments.clone()
    }
}

/// Room produced by the generator: its rectangle, role, and remaining walls.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomLayout {
    index: RoomIndex,
    column: u32,
    row: u32,
    rect: Rect,
    role: RoomRole,
    corners: [WallSegment; 4],
    edges: [Vec<Option<WallSegment>>; 4],
}

impl RoomLayout {
    fn walled(index: RoomIndex, column: u32, row: u32, tuning: &GridTuning) -> Self {
        let rect = Rect::new(
            column as f32 * tuning.room_width,
            row as f32 * tuning.room_height,
            tuning.room_width,
            tuning.room_height,
        );
        let thickness = tuning.wall_thickness;
        let corner = |x: f32, y: f32, side: Side| {
            WallSegment::new(Rect::new(x, y, thickness, thickness), WallKind::Corner, side)
        };
        let far_x = rect.right() - thickness;
        let far_y = rect.bottom() - thickness;
        let corners = [
            corner(rect.left(), rect.top(), Side::Top),
            corner(far_x, rect.top(), Side::Right),
            corner(far_x, far_y, Side::Bottom),
            corner(rect.left(), far_y, Side::Left),
        ];
        let edges = Side::ALL.map(|side| straight_segments(rect, side, tuning));

        Self {
            index,
            column,
            row,
            rect,
            role: RoomRole::Regular,
            corners,
            edges,
        }
    }

    /// Row-major index of the room.
    #[must_use]
    pub const fn index(&self) -> RoomIndex {
        self.index
    }

    /// Grid column of the room.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Grid row of the room.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// World-space rectangle covered by the room, walls included.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Role assigned to the room.
    #[must_use]
    pub const fn role(&self) -> RoomRole {
        self.role
    }

    /// Every wall piece still standing, corners first.
    pub fn walls(&self) -> impl Iterator<Item = &WallSegment> + '_ {
        self.corners
            .iter()
            .chain(self.edges.iter().flat_map(|edge| edge.iter().flatten()))
    }

    fn walls_mut(&mut self) -> impl Iterator<Item = &mut WallSegment> + '_ {
        self.corners
            .iter_mut()
            .chain(self.edges.iter_mut().flat_map(|edge| edge.iter_mut().flatten()))
    }

    /// Number of straight segment slots along `side`.
    #[must_use]
    pub fn segment_slots(&self, side: Side) -> usize {
        self.edges[slot(side)].len()
    }

    /// Slots along `side` whose straight segment has been removed.
    #[must_use]
    pub fn missing_segments(&self, side: Side) -> Vec<usize> {
        self.edges[slot(side)]
            .iter()
            .enumerate()
            .filter(|(_, segment)| segment.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    /// Reports whether a doorway was carved through `side`.
    #[must_use]
    pub fn is_open(&self, side: Side) -> bool {
        self.edges[slot(side)].iter().any(Option::is_none)
    }

    /// Removes the straight segments in `range` along `side`.
    ///
    /// Slots outside the edge are ignored.
    pub fn remove_wall(&mut self, side: Side, range: Range<usize>) {
        let edge = &mut self.edges[slot(side)];
        let end = range.end.min(edge.len());
        for segment in edge.iter_mut().take(end).skip(range.start) {
            *segment = None;
        }
    }
}

/// Generated level layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    columns: u32,
    rows: u32,
    bounds: Rect,
    rooms: Vec<RoomLayout>,
    carvings: Vec<Carving>,
    visit_order: Vec<RoomIndex>,
    start: RoomIndex,
    exit: RoomIndex,
}

impl Maze {
    /// Number of room columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of room rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Rectangle enclosing the whole grid.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Rooms in row-major order.
    #[must_use]
    pub fn rooms(&self) -> &[RoomLayout] {
        &self.rooms
    }

    /// Consumes the maze, yielding its rooms in row-major order.
    #[must_use]
    pub fn into_rooms(self) -> Vec<RoomLayout> {
        self.rooms
    }

    /// Room with the provided index, if it exists.
    #[must_use]
    pub fn room(&self, index: RoomIndex) -> Option<&RoomLayout> {
        self.rooms.get(index.get() as usize)
    }

    /// Doorways in the order they were carved.
    #[must_use]
    pub fn carvings(&self) -> &[Carving] {
        &self.carvings
    }

    /// Rooms in the order the walk first entered them.
    #[must_use]
    pub fn visit_order(&self) -> &[RoomIndex] {
        &self.visit_order
    }

    /// Room holding the up ladder.
    #[must_use]
    pub const fn start(&self) -> RoomIndex {
        self.start
    }

    /// Room holding the down ladder or the goal crystal.
    #[must_use]
    pub const fn exit(&self) -> RoomIndex {
        self.exit
    }

    /// Rooms reachable through a doorway from `index`.
    #[must_use]
    pub fn open_neighbors(&self, index: RoomIndex) -> Vec<RoomIndex> {
        let Some(room) = self.room(index) else {
            return Vec::new();
        };
        Side::ALL
            .into_iter()
            .filter(|side| room.is_open(*side))
            .filter_map(|side| neighbor(self.columns, self.rows, index.get() as usize, side))
            .map(|neighbor| RoomIndex::new(neighbor as u32))
            .collect()
    }

    /// Number of rooms reachable from the start room through doorways.
    #[must_use]
    pub fn reachable_rooms(&self) -> usize {
        let mut seen = vec![false; self.rooms.len()];
        let mut queue = VecDeque::new();
        if let Some(flag) = seen.get_mut(self.start.get() as usize) {
            *flag = true;
            queue.push_back(self.start);
        }

        let mut reached = 0;
        while let Some(index) = queue.pop_front() {
            reached += 1;
            for next in self.open_neighbors(index) {
                let flag = &mut seen[next.get() as usize];
                if !*flag {
                    *flag = true;
                    queue.push_back(next);
                }
            }
        }
        reached
    }
}

/// Builds mazes for a fixed grid layout.
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    tuning: GridTuning,
}

impl MazeGenerator {
    /// Creates a generator for the provided grid layout.
    #[must_use]
    pub fn new(tuning: GridTuning) -> Self {
        Self { tuning }
    }

    /// Grid layout used by the generator.
    #[must_use]
    pub const fn tuning(&self) -> &GridTuning {
        &self.tuning
    }

    /// Carves a new maze. On the deepest floor the exit room becomes the crystal room.
    pub fn generate<R>(&self, rng: &mut R, final_floor: bool) -> Result<Maze, GenerationError>
    where
        R: Rng + ?Sized,
    {
        let columns = self.tuning.columns;
        let rows = self.tuning.rows;
        let total = self.tuning.room_count();
        if total < 2
            || self.tuning.horizontal_segments() == 0
            || self.tuning.vertical_segments() == 0
        {
            return Err(GenerationError::GridTooSmall { columns, rows });
        }

        let mut rooms: Vec<RoomLayout> = (0..total)
            .map(|index| {
                let column = index as u32 % columns;
                let row = index as u32 / columns;
                RoomLayout::walled(RoomIndex::new(index as u32), column, row, &self.tuning)
            })
            .collect();

        let mut visited = vec![false; total];
        let mut visit_order = Vec::with_capacity(total);
        let mut carvings = Vec::with_capacity(total - 1);
        let mut stack = Vec::with_capacity(total);

        let first = rng.gen_range(0..total);
        visited[first] = true;
        visit_order.push(first);
        stack.push(first);

        while let Some(&current) = stack.last() {
            let options: Vec<(Side, usize)> = Side::ALL
                .into_iter()
                .filter_map(|side| neighbor(columns, rows, current, side).map(|n| (side, n)))
                .filter(|(_, next)| !visited[*next])
                .collect();

            if options.is_empty() {
                let _ = stack.pop();
                continue;
            }

            let (side, next) = options[rng.gen_range(0..options.len())];
            let slots = rooms[current].segment_slots(side);
            let start = rng.gen_range(0..slots);
            let end = rng.gen_range(start + 1..=slots);
            rooms[current].remove_wall(side, start..end);
            rooms[next].remove_wall(side.opposite(), start..end);
            carvings.push(Carving {
                from: RoomIndex::new(current as u32),
                to: RoomIndex::new(next as u32),
                side,
                segments: start..end,
            });

            visited[next] = true;
            visit_order.push(next);
            stack.push(next);
        }

        let (start, exit) = self.assign_roles(&mut rooms, &visit_order, rng, final_floor);
        compute_covers(&mut rooms, self.bounds());

        let maze = Maze {
            columns,
            rows,
            bounds: self.bounds(),
            rooms,
            carvings,
            visit_order: visit_order
                .into_iter()
                .map(|index| RoomIndex::new(index as u32))
                .collect(),
            start,
            exit,
        };
        verify(&maze, final_floor)?;
        Ok(maze)
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.tuning.columns as f32 * self.tuning.room_width,
            self.tuning.rows as f32 * self.tuning.room_height,
        )
    }

    fn assign_roles<R>(
        &self,
        rooms: &mut [RoomLayout],
        visit_order: &[usize],
        rng: &mut R,
        final_floor: bool,
    ) -> (RoomIndex, RoomIndex)
    where
        R: Rng + ?Sized,
    {
        let last = visit_order.len() - 1;
        let window = (self.tuning.exit_tail_window.max(1) as usize).min(last);
        let start = visit_order[0];
        let exit = visit_order[rng.gen_range(last + 1 - window..=last)];

        rooms[start].role = RoomRole::Start;
        rooms[exit].role = if final_floor {
            RoomRole::Crystal
        } else {
            RoomRole::Exit
        };

        // Interior candidates skip the start room and the two last-visited rooms.
        let mut candidates: Vec<usize> = visit_order
            .get(1..last.saturating_sub(1))
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|index| *index != exit)
            .collect();

        for role in [RoomRole::Treasure, RoomRole::Danger] {
            if candidates.is_empty() {
                break;
            }
            let picked = candidates.swap_remove(rng.gen_range(0..candidates.len()));
            rooms[picked].role = role;
        }

        for room in rooms.iter() {
            if room.role != RoomRole::Regular {
                debug!(room = room.index.get(), role = %room.role, "assigned room role");
            }
        }

        (
            RoomIndex::new(start as u32),
            RoomIndex::new(exit as u32),
        )
    }
}

fn verify(maze: &Maze, final_floor: bool) -> Result<(), GenerationError> {
    let total = maze.rooms.len();
    let reached = maze.reachable_rooms();
    if reached != total {
        return Err(GenerationError::Disconnected { reached, total });
    }

    let exit_role = if final_floor {
        RoomRole::Crystal
    } else {
        RoomRole::Exit
    };
    for role in [RoomRole::Start, exit_role] {
        let count = maze.rooms.iter().filter(|room| room.role == role).count();
        if count != 1 {
            return Err(GenerationError::MissingRole(role));
        }
    }
    Ok(())
}

/// Recomputes the decorative cover flags of every wall piece.
///
/// An edge needs a cover unless it lies on the map boundary or touches the
/// facing edge of another wall piece.
pub fn compute_covers(rooms: &mut [RoomLayout], bounds: Rect) {
    let rects: Vec<Rect> = rooms
        .iter()
        .flat_map(|room| room.walls().map(WallSegment::rect))
        .collect();

    let mut position = 0;
    for room in rooms.iter_mut() {
        for wall in room.walls_mut() {
            let rect = rects[position];
            let mut covers = CoverEdges::default();
            for side in Side::ALL {
                let exposed = !on_boundary(rect, side, bounds)
                    && !rects
                        .iter()
                        .enumerate()
                        .any(|(other, candidate)| other != position && touches(rect, side, *candidate));
                covers.set(side, exposed);
            }
            wall.set_covers(covers);
            position += 1;
        }
    }
}

fn on_boundary(rect: Rect, side: Side, bounds: Rect) -> bool {
    match side {
        Side::Top => near(rect.top(), bounds.top()),
        Side::Right => near(rect.right(), bounds.right()),
        Side::Bottom => near(rect.bottom(), bounds.bottom()),
        Side::Left => near(rect.left(), bounds.left()),
    }
}

fn touches(rect: Rect, side: Side, other: Rect) -> bool {
    match side {
        Side::Top => {
            near(rect.top(), other.bottom()) && spans_overlap(rect.left(), rect.right(), other.left(), other.right())
        }
        Side::Bottom => {
            near(rect.bottom(), other.top()) && spans_overlap(rect.left(), rect.right(), other.left(), other.right())
        }
        Side::Left => {
            near(rect.left(), other.right()) && spans_overlap(rect.top(), rect.bottom(), other.top(), other.bottom())
        }
        Side::Right => {
            near(rect.right(), other.left()) && spans_overlap(rect.top(), rect.bottom(), other.top(), other.bottom())
        }
    }
}

fn near(a: f32, b: f32) -> bool {
    (a - b).abs() <= EDGE_EPSILON
}

fn spans_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_min.max(b_min) + EDGE_EPSILON < a_max.min(b_max)
}

fn straight_segments(rect: Rect, side: Side, tuning: &GridTuning) -> Vec<Option<WallSegment>> {
    let thickness = tuning.wall_thickness;
    let length = tuning.segment_length;
    let (count, span_start, span_end) = match side {
        Side::Top | Side::Bottom => (
            tuning.horizontal_segments(),
            rect.left() + thickness,
            rect.right() - thickness,
        ),
        Side::Left | Side::Right => (
            tuning.vertical_segments(),
            rect.top() + thickness,
            rect.bottom() - thickness,
        ),
    };

    (0..count)
        .map(|slot| {
            let from = span_start + slot as f32 * length;
            let extent = length.min(span_end - from);
            let piece = match side {
                Side::Top => Rect::new(from, rect.top(), extent, thickness),
                Side::Bottom => Rect::new(from, rect.bottom() - thickness, extent, thickness),
                Side::Left => Rect::new(rect.left(), from, thickness, extent),
                Side::Right => Rect::new(rect.right() - thickness, from, thickness, extent),
            };
            Some(WallSegment::new(piece, WallKind::Straight, side))
        })
        .collect()
}

fn neighbor(columns: u32, rows: u32, index: usize, side: Side) -> Option<usize> {
    let columns = columns as usize;
    let rows = rows as usize;
    let column = index % columns;
    let row = index / columns;
    match side {
        Side::Top if row > 0 => Some(index - columns),
        Side::Bottom if row + 1 < rows => Some(index + columns),
        Side::Left if column > 0 => Some(index - 1),
        Side::Right if column + 1 < columns => Some(index + 1),
        _ => None,
    }
}

const fn slot(side: Side) -> usize {
    match side {
        Side::Top => 0,
        Side::Right => 1,
        Side::Bottom => 2,
        Side::Left => 3,
    }
}
