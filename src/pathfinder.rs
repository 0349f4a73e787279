use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::area::Area;
use crate::config::RouterConfig;
use crate::types::{Point, Region};

// ── Occupancy sources ───────────────────────────────────────────────

/// The capability the router consumes: whether travel through a cell
/// is blocked. An [`Area`] is the usual provider; [`CellSet`] covers
/// callers that track occupancy cell by cell instead of as rectangles.
pub trait Occupancy {
    fn is_occupied(&self, x: i32, y: i32) -> bool;
}

impl Occupancy for Area {
    fn is_occupied(&self, x: i32, y: i32) -> bool {
        Area::is_occupied(self, x, y)
    }
}

impl<O: Occupancy + ?Sized> Occupancy for &O {
    fn is_occupied(&self, x: i32, y: i32) -> bool {
        (**self).is_occupied(x, y)
    }
}

/// Rasterized occupancy: a plain set of blocked cells.
#[derive(Debug, Clone, Default)]
pub struct CellSet {
    blocked: HashSet<Point>,
}

impl CellSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, point: Point) {
        self.blocked.insert(point);
    }

    pub fn insert_region(&mut self, region: &Region) {
        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                self.blocked.insert(Point::new(x, y));
            }
        }
    }

    /// Rasterizes `area` over `window`. Cells outside the window stay
    /// unblocked.
    pub fn from_area(area: &Area, window: &Region) -> Self {
        let mut set = Self::new();
        for y in window.y..window.bottom() {
            for x in window.x..window.right() {
                if area.is_occupied(x, y) {
                    set.blocked.insert(Point::new(x, y));
                }
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }
}

impl Occupancy for CellSet {
    fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.blocked.contains(&Point::new(x, y))
    }
}

// ── Search ──────────────────────────────────────────────────────────

/// A search that gave up after exploring its cell budget. Distinct
/// from the ordinary no-path result, which is `Ok(None)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search aborted after exploring {explored} cells")]
pub struct SearchAborted {
    pub explored: usize,
}

const DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

struct Node {
    x: i32,
    y: i32,
    g: u64,
    h: u64,
    f: u64,
    parent: Option<usize>,
    closed: bool,
}

/// Routes orthogonal connectors over the grid against one bound
/// occupancy source.
///
/// The source is never mutated and no state survives between calls,
/// so one pathfinder serves many routes and a shared `&Area` snapshot
/// can back several pathfinders on different threads.
pub struct Pathfinder<O> {
    map: O,
    config: RouterConfig,
}

impl<O: Occupancy> Pathfinder<O> {
    pub fn new(map: O) -> Self {
        Self::with_config(map, RouterConfig::default())
    }

    pub fn with_config(map: O, config: RouterConfig) -> Self {
        Self { map, config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Finds a corner-simplified path from `start` to `end` using the
    /// configured default turn penalty. `Ok(None)` means no route
    /// exists, including when either endpoint is blocked.
    pub fn find_path(
        &self,
        start: Point,
        end: Point,
    ) -> Result<Option<Vec<Point>>, SearchAborted> {
        self.find_path_with_penalty(start, end, self.config.turn_penalty())
    }

    /// Same search with an explicit per-turn cost. A step costs
    /// `step_cost`, plus `turn_penalty` when its direction differs
    /// from the previous step's direction.
    pub fn find_path_with_penalty(
        &self,
        start: Point,
        end: Point,
        turn_penalty: u32,
    ) -> Result<Option<Vec<Point>>, SearchAborted> {
        if self.map.is_occupied(start.x, start.y) || self.map.is_occupied(end.x, end.y) {
            return Ok(None);
        }

        let step_cost = u64::from(self.config.step_cost.max(1));
        let turn_penalty = u64::from(turn_penalty);

        let mut nodes: Vec<Node> = Vec::new();
        let mut index_of: HashMap<(i32, i32), usize> = HashMap::new();
        let start_h = manhattan(start, end) * step_cost;
        nodes.push(Node {
            x: start.x,
            y: start.y,
            g: 0,
            h: start_h,
            f: start_h,
            parent: None,
            closed: false,
        });
        index_of.insert((start.x, start.y), 0);

        // Insertion order doubles as the tie-break: among equal-f
        // nodes the earliest-inserted one is expanded first.
        let mut open: Vec<usize> = vec![0];
        let mut explored = 0usize;

        while !open.is_empty() {
            let mut best = 0;
            for (pos, &idx) in open.iter().enumerate().skip(1) {
                if nodes[idx].f < nodes[open[best]].f {
                    best = pos;
                }
            }
            let current = open.remove(best);
            nodes[current].closed = true;

            if nodes[current].x == end.x && nodes[current].y == end.y {
                let cells = reconstruct(&nodes, current);
                return Ok(Some(simplify_path(&cells)));
            }

            explored += 1;
            if explored > self.config.max_explored {
                return Err(SearchAborted { explored });
            }

            let (cx, cy) = (nodes[current].x, nodes[current].y);
            let arrival = nodes[current]
                .parent
                .map(|parent| (cx - nodes[parent].x, cy - nodes[parent].y));

            for (dx, dy) in DIRS {
                let nx = cx + dx;
                let ny = cy + dy;
                if self.map.is_occupied(nx, ny) {
                    continue;
                }

                // The first step out of the start has no prior
                // direction and never pays a turn.
                let mut step = step_cost;
                if let Some(direction) = arrival {
                    if direction != (dx, dy) {
                        step += turn_penalty;
                    }
                }
                let tentative_g = nodes[current].g + step;

                match index_of.get(&(nx, ny)) {
                    Some(&idx) => {
                        if nodes[idx].closed {
                            continue;
                        }
                        if tentative_g < nodes[idx].g {
                            nodes[idx].g = tentative_g;
                            nodes[idx].f = tentative_g + nodes[idx].h;
                            nodes[idx].parent = Some(current);
                        }
                    }
                    None => {
                        let h = manhattan(Point::new(nx, ny), end) * step_cost;
                        nodes.push(Node {
                            x: nx,
                            y: ny,
                            g: tentative_g,
                            h,
                            f: tentative_g + h,
                            parent: Some(current),
                            closed: false,
                        });
                        let idx = nodes.len() - 1;
                        index_of.insert((nx, ny), idx);
                        open.push(idx);
                    }
                }
            }
        }

        Ok(None)
    }
}

fn manhattan(a: Point, b: Point) -> u64 {
    u64::from(a.x.abs_diff(b.x)) + u64::from(a.y.abs_diff(b.y))
}

fn reconstruct(nodes: &[Node], goal: usize) -> Vec<Point> {
    let mut cells = Vec::new();
    let mut cursor = Some(goal);
    while let Some(idx) = cursor {
        cells.push(Point::new(nodes[idx].x, nodes[idx].y));
        cursor = nodes[idx].parent;
    }
    cells.reverse();
    cells
}

// ── Path helpers ────────────────────────────────────────────────────

/// Drops every interior point whose incoming and outgoing directions
/// match, leaving the endpoints and the corners.
pub fn simplify_path(path: &[Point]) -> Vec<Point> {
    if path.len() <= 2 {
        return path.to_vec();
    }
    let mut out = Vec::with_capacity(path.len());
    out.push(path[0]);
    for i in 1..path.len() - 1 {
        let prev = path[i - 1];
        let curr = path[i];
        let next = path[i + 1];
        let incoming = (curr.x - prev.x, curr.y - prev.y);
        let outgoing = (next.x - curr.x, next.y - curr.y);
        if incoming != outgoing {
            out.push(curr);
        }
    }
    out.push(path[path.len() - 1]);
    out
}

/// Number of direction changes along a waypoint path. Works on both
/// cell-by-cell and corner-simplified paths.
pub fn corner_count(path: &[Point]) -> usize {
    if path.len() < 3 {
        return 0;
    }
    let mut corners = 0;
    for i in 1..path.len() - 1 {
        let incoming = segment_direction(path[i - 1], path[i]);
        let outgoing = segment_direction(path[i], path[i + 1]);
        if incoming != outgoing {
            corners += 1;
        }
    }
    corners
}

fn segment_direction(a: Point, b: Point) -> (i32, i32) {
    ((b.x - a.x).signum(), (b.y - a.y).signum())
}

/// Total cost of a waypoint path under the integer cost model: cells
/// traveled times `step_cost`, plus `turn_penalty` per corner.
pub fn path_cost(path: &[Point], step_cost: u32, turn_penalty: u32) -> u64 {
    if path.len() < 2 {
        return 0;
    }
    let steps: u64 = path.windows(2).map(|pair| manhattan(pair[0], pair[1])).sum();
    steps * u64::from(step_cost) + corner_count(path) as u64 * u64::from(turn_penalty)
}

/// Converts a routed path back into obstacle geometry: one rectangle
/// per straight segment, each one cell wide. Merging the result into
/// an [`Area`] makes the wire itself block later routes.
pub fn path_to_regions(path: &[Point]) -> Vec<Region> {
    match path {
        [] => return Vec::new(),
        [only] => return vec![Region::cell(only.x, only.y)],
        _ => {}
    }
    let mut regions = Vec::with_capacity(path.len() - 1);
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let region = if a.x == b.x {
            Region::new(a.x, a.y.min(b.y), 1, a.y.abs_diff(b.y) as i32 + 1)
        } else {
            Region::new(a.x.min(b.x), a.y, a.x.abs_diff(b.x) as i32 + 1, 1)
        };
        regions.push(region);
    }
    regions
}
