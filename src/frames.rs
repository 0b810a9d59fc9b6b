//! Turning sweep positions into animation frames.
//!
//! An animation of the sweep shows the sweep-line moving across the clip
//! rectangle from left to right. Each edge is born and finished at some
//! sweep positions, and a [`Timeline`] says when (in frames) that happens.

use crate::edges::Edge;
use crate::geom::Bounds;

/// How an edge should appear in an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Animation {
    /// The edge grows from its start to its end between two frames.
    Grow {
        /// The frame where the edge starts growing.
        start_frame: u32,
        /// The frame where the edge is fully grown.
        end_frame: u32,
    },
    /// The edge is born and finished within one frame, so it just appears.
    Pop {
        /// The frame where the edge becomes visible.
        frame: u32,
    },
}

/// A mapping from sweep positions to frame numbers.
///
/// The sweep-line is at the left of the clip rectangle at frame zero and at
/// its right on the last frame. Positions outside the rectangle are clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    min_x: f64,
    width: f64,
    frames: u32,
}

impl Timeline {
    /// A timeline that sweeps across `bounds` in `frames` frames.
    pub fn new(bounds: &Bounds, frames: u32) -> Self {
        Timeline {
            min_x: bounds.min_x(),
            width: bounds.width(),
            frames,
        }
    }

    /// A timeline that sweeps across `bounds` in `seconds`, at `fps` frames per second.
    pub fn from_duration(bounds: &Bounds, seconds: f64, fps: u32) -> Self {
        let frames = (seconds * fps as f64).round().max(0.0) as u32;
        Self::new(bounds, frames)
    }

    /// The total number of frames.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// The frame at which the sweep-line reaches `x`.
    pub fn frame_at(&self, x: f64) -> u32 {
        if self.width <= 0.0 || x.is_nan() {
            return 0;
        }
        let t = ((x - self.min_x) / self.width).clamp(0.0, 1.0);
        // Truncation, so that a frame shows everything the sweep has passed.
        (t * self.frames as f64) as u32
    }

    /// How to animate `edge`.
    pub fn animate(&self, edge: &Edge) -> Animation {
        let start_frame = self.frame_at(edge.born_at);
        let end_frame = self.frame_at(edge.finished_at);
        if start_frame == end_frame {
            Animation::Pop { frame: start_frame }
        } else {
            Animation::Grow {
                start_frame,
                end_frame,
            }
        }
    }

    /// The frame after which nothing changes any more.
    pub fn last_frame<'a>(&self, edges: impl IntoIterator<Item = &'a Edge>) -> u32 {
        edges
            .into_iter()
            .map(|e| match self.animate(e) {
                Animation::Grow { end_frame, .. } => end_frame,
                Animation::Pop { frame } => frame,
            })
            .max()
            .unwrap_or(0)
    }
}
