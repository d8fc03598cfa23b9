//! Point quadtree over integer grid coordinates.
//!
//! Boundaries are half-open, so every point lands in exactly one child after
//! a split. A square boundary with a power-of-two side splits evenly all the
//! way down to single cells.

/// Leaf size that triggers a split.
const NODE_CAPACITY: usize = 4;

/// Half-open rectangle `[x, x + w) x [y, y + h)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// NW, NE, SW, SE quarters.
    fn quarters(&self) -> [Rect; 4] {
        let hw = self.w / 2;
        let hh = self.h / 2;
        [
            Rect::new(self.x, self.y, hw, hh),
            Rect::new(self.x + hw, self.y, self.w - hw, hh),
            Rect::new(self.x, self.y + hh, hw, self.h - hh),
            Rect::new(self.x + hw, self.y + hh, self.w - hw, self.h - hh),
        ]
    }

    fn can_split(&self) -> bool {
        self.w > 1 && self.h > 1
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Point<T> {
    pub x: i32,
    pub y: i32,
    pub data: T,
}

#[derive(Clone, Debug)]
struct Node<T> {
    boundary: Rect,
    points: Vec<Point<T>>,
    children: Option<Box<[Node<T>; 4]>>,
}

impl<T> Node<T> {
    fn new(boundary: Rect) -> Self {
        Self {
            boundary,
            points: Vec::new(),
            children: None,
        }
    }

    fn insert(&mut self, point: Point<T>) {
        if let Some(children) = self.children.as_mut() {
            if let Some(child) = children.iter_mut().find(|c| c.boundary.contains(point.x, point.y)) {
                child.insert(point);
            }
            return;
        }

        self.points.push(point);
        if self.points.len() > NODE_CAPACITY && self.boundary.can_split() {
            self.subdivide();
        }
    }

    fn subdivide(&mut self) {
        let [nw, ne, sw, se] = self.boundary.quarters();
        self.children = Some(Box::new([Node::new(nw), Node::new(ne), Node::new(sw), Node::new(se)]));
        for point in std::mem::take(&mut self.points) {
            self.insert(point);
        }
    }

    fn query<'a>(&'a self, range: &Rect, found: &mut Vec<&'a Point<T>>) {
        if !self.boundary.intersects(range) {
            return;
        }
        found.extend(self.points.iter().filter(|p| range.contains(p.x, p.y)));
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.query(range, found);
            }
        }
    }

    fn depth(&self) -> usize {
        match self.children.as_ref() {
            Some(children) => 1 + children.iter().map(|c| c.depth()).max().unwrap_or(0),
            None => 1,
        }
    }
}

/// Quadtree holding points tagged with `T`.
#[derive(Clone, Debug)]
pub struct QuadTree<T> {
    root: Node<T>,
    len: usize,
}

impl<T> QuadTree<T> {
    pub fn new(boundary: Rect) -> Self {
        Self {
            root: Node::new(boundary),
            len: 0,
        }
    }

    pub fn boundary(&self) -> Rect {
        self.root.boundary
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether a point at `(x, y)` would fall inside the tree's boundary.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.root.boundary.contains(x, y)
    }

    /// Insert a point. Returns `false` (and drops it) when outside the boundary.
    pub fn insert(&mut self, x: i32, y: i32, data: T) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        self.root.insert(Point { x, y, data });
        self.len += 1;
        true
    }

    /// All points inside `range`.
    pub fn query(&self, range: Rect) -> Vec<&Point<T>> {
        let mut found = Vec::new();
        self.root.query(&range, &mut found);
        found
    }

    /// Every stored point.
    pub fn points(&self) -> Vec<&Point<T>> {
        self.query(self.root.boundary)
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}
