use crate::types::Region;

/// Obstacle map for a routing grid.
///
/// Coverage is kept in two channels: an additive (obstacle) list and a
/// subtractive (hole) list. Each channel is a set of non-overlapping
/// rectangles kept canonical by the sweep-line merge, so downstream
/// consumers that want rectangle-level geometry get the smallest list
/// this decomposition produces. A cell is occupied when some obstacle
/// rectangle covers it and no hole rectangle does.
#[derive(Debug, Clone, Default)]
pub struct Area {
    positive: Vec<Region>,
    negative: Vec<Region>,
}

impl Area {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_regions(initial: &[Region]) -> Self {
        let mut area = Self::new();
        area.add(initial);
        area
    }

    /// Merges `regions` into the obstacle channel. Adding geometry the
    /// channel already covers leaves cell coverage unchanged.
    pub fn add(&mut self, regions: &[Region]) -> &mut Self {
        if !regions.is_empty() {
            self.positive.extend_from_slice(regions);
            self.positive = merge_regions(&self.positive);
        }
        self
    }

    /// Merges `regions` into the hole channel.
    pub fn subtract(&mut self, regions: &[Region]) -> &mut Self {
        if !regions.is_empty() {
            self.negative.extend_from_slice(regions);
            self.negative = merge_regions(&self.negative);
        }
        self
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        covers(&self.positive, x, y) && !covers(&self.negative, x, y)
    }

    /// Current minimal decomposition of the obstacle channel.
    pub fn positive_regions(&self) -> &[Region] {
        &self.positive
    }

    /// Current minimal decomposition of the hole channel.
    pub fn negative_regions(&self) -> &[Region] {
        &self.negative
    }

    /// Bounding box of the obstacle channel, for callers sizing a
    /// search window or a raster.
    pub fn bounds(&self) -> Option<Region> {
        let first = self.positive.first()?;
        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_right = first.right();
        let mut max_bottom = first.bottom();
        for region in &self.positive[1..] {
            min_x = min_x.min(region.x);
            min_y = min_y.min(region.y);
            max_right = max_right.max(region.right());
            max_bottom = max_bottom.max(region.bottom());
        }
        Some(Region::new(min_x, min_y, max_right - min_x, max_bottom - min_y))
    }

    /// Combines two areas channel by channel: the result's obstacles
    /// are the merge of both obstacle lists and its holes the merge of
    /// both hole lists, independently. A hole contributed by one
    /// operand therefore also punches through the other operand's
    /// obstacles where they overlap. This is the documented simple
    /// algebra, not a full boolean combination of two shape-minus-hole
    /// regions.
    pub fn union(a: &Area, b: &Area) -> Area {
        let mut positive = a.positive.clone();
        positive.extend_from_slice(&b.positive);
        let mut negative = a.negative.clone();
        negative.extend_from_slice(&b.negative);
        Area {
            positive: merge_regions(&positive),
            negative: merge_regions(&negative),
        }
    }
}

fn covers(regions: &[Region], x: i32, y: i32) -> bool {
    regions.iter().any(|region| region.contains(x, y))
}

/// Sweep-line rectangle merge.
///
/// Every distinct left/right edge splits the plane into vertical
/// strips. Within a strip, the y-intervals of the inputs that span the
/// whole strip are sorted and coalesced whenever one starts at or
/// before the running interval's exclusive end, then each coalesced
/// interval becomes one output rectangle. Output rectangles inside a
/// strip share its x-extent, so re-merging the output reproduces it
/// exactly.
///
/// Every strip re-scans the full input, so a merge is O(R^2) in the
/// region count. Fine at diagram-scale obstacle counts; this is the
/// scalability ceiling of the map.
pub(crate) fn merge_regions(input: &[Region]) -> Vec<Region> {
    if input.is_empty() {
        return Vec::new();
    }

    let mut edges: Vec<i32> = Vec::with_capacity(input.len() * 2);
    for region in input {
        edges.push(region.x);
        edges.push(region.right());
    }
    edges.sort_unstable();
    edges.dedup();

    let mut merged = Vec::new();
    for pair in edges.windows(2) {
        let (x1, x2) = (pair[0], pair[1]);
        let width = x2 - x1;
        if width <= 0 {
            continue;
        }

        let mut intervals: Vec<(i32, i32)> = input
            .iter()
            .filter(|region| region.x <= x1 && region.right() >= x2)
            .map(|region| (region.y, region.bottom()))
            .collect();
        intervals.sort_unstable();

        let mut run: Option<(i32, i32)> = None;
        for (top, bottom) in intervals {
            match run {
                Some((run_top, run_bottom)) if top <= run_bottom => {
                    run = Some((run_top, run_bottom.max(bottom)));
                }
                Some((run_top, run_bottom)) => {
                    merged.push(Region::new(x1, run_top, width, run_bottom - run_top));
                    run = Some((top, bottom));
                }
                None => run = Some((top, bottom)),
            }
        }
        if let Some((run_top, run_bottom)) = run {
            merged.push(Region::new(x1, run_top, width, run_bottom - run_top));
        }
    }
    merged
}
