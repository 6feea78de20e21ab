use std::slice;

use crate::math::{Point3, Vector3};

use super::Segment;

/// One opcode of a display command stream.
///
/// Scene objects hand their wireframe to the viewer as a flat list of
/// pen moves and draws. Polygon opcodes outline filled faces and are
/// treated as lines for snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VertexCommand {
    /// Lift the pen and move it to the point.
    Move(Point3),
    /// Draw from the pen to the point.
    Draw(Point3),
    /// Begin a polygon with the given face normal.
    PolyStart(Vector3),
    /// First vertex of a polygon outline.
    PolyMove(Point3),
    /// Next vertex of a polygon outline.
    PolyDraw(Point3),
    /// Closing vertex of a polygon outline.
    PolyEnd(Point3),
    /// A lone point marker.
    PointDraw(Point3),
}

/// Displayed line geometry in one of the shapes the viewer produces.
#[derive(Debug, Clone, PartialEq)]
pub enum LineGeometry {
    /// Flat vertex list; vertices `2i` and `2i + 1` form segment `i`.
    /// A trailing unpaired vertex is ignored.
    Pairs(Vec<Point3>),
    /// Move/draw command stream.
    Commands(Vec<VertexCommand>),
}

/// Anything that can list its line segments.
///
/// The sequence is lazy, finite and restartable: each call to
/// [`segments`](SegmentSource::segments) starts again from the first
/// segment, and segment `i` is always the `i`-th item yielded.
pub trait SegmentSource {
    /// Iterates the segments in order.
    fn segments(&self) -> impl Iterator<Item = Segment> + '_;

    /// Returns segment `index`, if present.
    fn segment(&self, index: usize) -> Option<Segment> {
        self.segments().nth(index)
    }
}

impl SegmentSource for LineGeometry {
    fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        match self {
            LineGeometry::Pairs(points) => LineSegments::Pairs(PairSegments::new(points)),
            LineGeometry::Commands(commands) => {
                LineSegments::Commands(CommandSegments::new(commands))
            }
        }
    }

    fn segment(&self, index: usize) -> Option<Segment> {
        match self {
            LineGeometry::Pairs(points) => {
                let start = points.get(index.checked_mul(2)?)?;
                let end = points.get(index * 2 + 1)?;
                Some(Segment::new(*start, *end))
            }
            LineGeometry::Commands(commands) => CommandSegments::new(commands).nth(index),
        }
    }
}

impl SegmentSource for [Segment] {
    fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.iter().copied()
    }

    fn segment(&self, index: usize) -> Option<Segment> {
        self.get(index).copied()
    }
}

/// Segment iterator over either [`LineGeometry`] shape.
#[derive(Debug, Clone)]
pub enum LineSegments<'a> {
    Pairs(PairSegments<'a>),
    Commands(CommandSegments<'a>),
}

impl Iterator for LineSegments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        match self {
            LineSegments::Pairs(it) => it.next(),
            LineSegments::Commands(it) => it.next(),
        }
    }
}

/// Segments of a flat vertex-pair list.
#[derive(Debug, Clone)]
pub struct PairSegments<'a> {
    chunks: slice::ChunksExact<'a, Point3>,
}

impl<'a> PairSegments<'a> {
    /// Creates an iterator over `points` taken two at a time.
    #[must_use]
    pub fn new(points: &'a [Point3]) -> Self {
        Self {
            chunks: points.chunks_exact(2),
        }
    }
}

impl Iterator for PairSegments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        match self.chunks.next()? {
            [start, end] => Some(Segment::new(*start, *end)),
            _ => None,
        }
    }
}

/// Segments drawn by a move/draw command stream.
///
/// Each draw opcode emits a segment from the current pen position and
/// then moves the pen. A draw with no preceding move only places the pen.
#[derive(Debug, Clone)]
pub struct CommandSegments<'a> {
    commands: slice::Iter<'a, VertexCommand>,
    pen: Option<Point3>,
}

impl<'a> CommandSegments<'a> {
    /// Creates an iterator over the segments drawn by `commands`.
    #[must_use]
    pub fn new(commands: &'a [VertexCommand]) -> Self {
        Self {
            commands: commands.iter(),
            pen: None,
        }
    }
}

impl Iterator for CommandSegments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        for command in self.commands.by_ref() {
            match *command {
                VertexCommand::Move(p) | VertexCommand::PolyMove(p) => self.pen = Some(p),
                VertexCommand::Draw(p) | VertexCommand::PolyDraw(p) | VertexCommand::PolyEnd(p) => {
                    if let Some(start) = self.pen.replace(p) {
                        return Some(Segment::new(start, p));
                    }
                }
                VertexCommand::PolyStart(_) | VertexCommand::PointDraw(_) => {}
            }
        }
        None
    }
}
