//! The sweep-line event loop.
//!
//! A [`Sweeper`] owns two event queues (one for sites, one for circle
//! events), the beach line, and the half-edges traced so far. Each call to
//! [`Sweeper::step`] handles exactly one event. Once both queues are empty,
//! the sweeper finishes off the half-edges that are still growing by
//! pretending the sweep-line has moved far to the right.

use crate::beach_line::{ArcIdx, BeachLine, CircleEvent, Location};
use crate::clip::clip_edges;
use crate::edges::{Edge, EdgeBuilder};
use crate::geom::{circle_event, Bounds, Point};
use crate::num::Precision;
use crate::queue::PriorityQueue;
use crate::Error;

/// Knobs for a sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SweepConfig {
    /// The rounding used for every coordinate comparison, and for the output.
    pub precision: Precision,
}

/// Where a [`Sweeper`] is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SweepState {
    /// There are sites left to process.
    Sweeping,
    /// All the sites are processed, but there are circle events left.
    Draining,
    /// Both queues are empty, and all the half-edges are finished.
    Finished,
}

/// Callbacks for watching a sweep in progress.
///
/// All methods do nothing by default.
pub trait SweepObserver {
    /// Called when the sweep-line reaches `site`.
    fn site(&mut self, _sweep_x: f64, _site: &Point) {}

    /// Called when an arc vanishes, creating the Voronoi vertex `vertex`.
    fn circle(&mut self, _sweep_x: f64, _vertex: &Point) {}

    /// Called once, when the remaining half-edges get finished at `far_x`.
    fn finished(&mut self, _far_x: f64) {}
}

impl SweepObserver for () {}

/// Runs Fortune's algorithm, one event at a time.
pub struct Sweeper<'a> {
    config: SweepConfig,
    sites: PriorityQueue<Point>,
    circles: PriorityQueue<CircleEvent>,
    beach: BeachLine,
    edges: EdgeBuilder,
    bounds: Bounds,
    area: Bounds,
    far_x: f64,
    sweep_x: f64,
    state: SweepState,
    events: usize,
    observer: Box<dyn SweepObserver + 'a>,
}

impl std::fmt::Debug for Sweeper<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sweeper")
            .field("state", &self.state)
            .field("sweep_x", &self.sweep_x)
            .field("sites", &self.sites.len())
            .field("circles", &self.circles.len())
            .field("beach", &self.beach)
            .finish_non_exhaustive()
    }
}

fn check_finite(x: f64) -> Result<(), Error> {
    if x.is_nan() {
        Err(Error::NaN)
    } else if x.is_infinite() {
        Err(Error::Infinity)
    } else {
        Ok(())
    }
}

impl<'a> Sweeper<'a> {
    /// Prepares to sweep over `sites`, with output clipped to `bounds`.
    ///
    /// Sites are processed sorted by x and then y, so sites sharing an x are
    /// inserted bottom to top whatever their input order.
    pub fn new<P: Into<Point>>(
        sites: impl IntoIterator<Item = P>,
        bounds: Bounds,
    ) -> Result<Self, Error> {
        Self::with_config(sites, bounds, SweepConfig::default())
    }

    /// Like [`Sweeper::new`], but with custom settings.
    ///
    /// Fails if any site coordinate or any corner of `bounds` is NaN or infinite.
    pub fn with_config<P: Into<Point>>(
        sites: impl IntoIterator<Item = P>,
        bounds: Bounds,
        config: SweepConfig,
    ) -> Result<Self, Error> {
        let mut sites: Vec<Point> = sites.into_iter().map(Into::into).collect();
        for p in &sites {
            check_finite(p.x)?;
            check_finite(p.y)?;
        }
        if bounds.is_nan() {
            return Err(Error::NaN);
        }
        if !bounds.is_finite() {
            return Err(Error::Infinity);
        }

        // Stable, so that sites sharing an x go in bottom to top.
        sites.sort();

        let precision = config.precision;
        let mut queue = PriorityQueue::new();
        for p in &sites {
            if !queue.push(*p, precision.round(p.x)) {
                tracing::debug!(site = ?p, "dropping duplicate site");
            }
        }

        let area = match Bounds::enclosing(sites.iter().copied()) {
            Some(hull) => {
                let dx = (hull.width() + 1.0) / 5.0;
                let dy = (hull.height() + 1.0) / 5.0;
                hull.inflate(dx, dy).union(&bounds)
            }
            None => bounds,
        };
        let far_x = area.max_x() + 2.0 * (area.width() + area.height());
        tracing::debug!(sites = queue.len(), ?area, far_x, "starting sweep");

        let mut ret = Sweeper {
            config,
            sites: queue,
            circles: PriorityQueue::new(),
            beach: BeachLine::new(),
            edges: EdgeBuilder::new(),
            bounds,
            area,
            far_x,
            sweep_x: area.min_x(),
            state: SweepState::Sweeping,
            events: 0,
            observer: Box::new(()),
        };
        ret.update_state();
        Ok(ret)
    }

    /// Attaches an observer that hears about every event from now on.
    pub fn observe(mut self, observer: impl SweepObserver + 'a) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Where we are.
    pub fn state(&self) -> SweepState {
        self.state
    }

    /// The position of the sweep-line (the key of the last event handled).
    pub fn sweep_x(&self) -> f64 {
        self.sweep_x
    }

    /// The number of events handled so far.
    pub fn events_handled(&self) -> usize {
        self.events
    }

    /// The rectangle that output is clipped to.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The rectangle that we guarantee to cover with the diagram.
    ///
    /// It contains the clip rectangle and a margin around all the sites.
    pub fn working_area(&self) -> Bounds {
        self.area
    }

    /// The sweep position at which unfinished half-edges get finished.
    ///
    /// This is only a lower bound until the sweep is finished: if the last
    /// event lands close to it, it gets pushed further out.
    pub fn far_x(&self) -> f64 {
        self.far_x
    }

    /// All the half-edges traced so far, finished or not.
    pub fn half_edges(&self) -> &EdgeBuilder {
        &self.edges
    }

    /// The sites of the arcs currently on the beach line, bottom to top.
    pub fn beach_line(&self) -> impl Iterator<Item = Point> + '_ {
        self.beach.iter().map(|arc| self.beach[arc].site)
    }

    /// Handles the next event and returns the new state.
    ///
    /// Circle events go first when they tie with a site event. Once we're
    /// [`SweepState::Finished`], this does nothing.
    pub fn step(&mut self) -> Result<SweepState, Error> {
        let circle_first = match (self.circles.peek_key(), self.sites.peek_key()) {
            (Some(circle), Some(site)) => circle <= site,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return Ok(self.state),
        };

        if circle_first {
            self.process_circle_event()?;
        } else {
            self.process_site_event()?;
        }
        self.events += 1;
        self.update_state();
        Ok(self.state)
    }

    /// Sweeps to the end and returns the clipped edges.
    pub fn run(&mut self) -> Result<Vec<Edge>, Error> {
        let span = tracing::debug_span!("sweep", sites = self.sites.len());
        let _guard = span.enter();

        while self.step()? != SweepState::Finished {}

        let edges = self.edges_unclipped();
        let clipped = clip_edges(&edges, &self.bounds, &self.config.precision);
        tracing::debug!(
            events = self.events,
            half_edges = self.edges.len(),
            edges = edges.len(),
            clipped = clipped.len(),
            "sweep done"
        );
        Ok(clipped)
    }

    /// The assembled edges, before clipping.
    ///
    /// Half-edges that aren't finished yet are left out, so this is only the
    /// whole diagram once we're [`SweepState::Finished`].
    pub fn edges_unclipped(&self) -> Vec<Edge> {
        self.edges.assemble(&self.config.precision)
    }

    fn update_state(&mut self) {
        self.state = if !self.sites.is_empty() {
            SweepState::Sweeping
        } else if !self.circles.is_empty() {
            SweepState::Draining
        } else {
            SweepState::Finished
        };

        if self.state == SweepState::Finished && !self.edges.is_finalized() {
            // A nearly colinear triple can put the last vertex well past the
            // working area, and open edges must be finished beyond it.
            let margin = self.area.width() + self.area.height();
            self.far_x = self.far_x.max(self.sweep_x + margin);
            self.edges.finalize_all(&self.beach, self.far_x);
            tracing::debug!(far_x = self.far_x, "finished open half-edges");
            self.observer.finished(self.far_x);
        }
    }

    fn process_site_event(&mut self) -> Result<(), Error> {
        let (x, site) = self.sites.pop()?;
        self.sweep_x = x;
        tracing::trace!(?site, "site event");
        self.observer.site(x, &site);

        match self.beach.locate(&site, &self.config.precision) {
            Location::Empty => {
                self.beach.push_first(site);
            }
            Location::Split { arc, at } => {
                let arc_site = self.beach[arc].site;
                let (lower, upper) = self.edges.open_twins(at, x, (arc_site, site));
                let (new, copy) = self.beach.split(arc, site, lower, upper);
                self.check_circle(new);
                self.check_circle(arc);
                self.check_circle(copy);
            }
            Location::Append { last } => {
                let last_site = self.beach[last].site;
                let start = Point::new(self.area.min_x(), (last_site.y + site.y) / 2.0);
                let edge = self.edges.open(start, x, (last_site, site));
                self.beach.append(last, site, edge);
                self.check_circle(last);
            }
        }
        Ok(())
    }

    fn process_circle_event(&mut self) -> Result<(), Error> {
        let (x, event) = self.circles.pop()?;
        let arc = event.arc;
        if !self.beach[arc].alive {
            return Err(Error::StaleArc(arc));
        }
        self.sweep_x = x;
        tracing::trace!(?arc, vertex = ?event.vertex, "circle event");
        self.observer.circle(x, &event.vertex);

        let left = self.beach[arc].left_edge;
        let right = self.beach[arc].right_edge;
        let (prev, next) = self.beach.remove(arc)?;

        let sites = (self.beach[prev].site, self.beach[next].site);
        let edge = self.edges.open(event.vertex, x, sites);
        self.beach.join(prev, next, edge);
        for h in [left, right].into_iter().flatten() {
            self.edges.finish(h, event.vertex, x);
        }

        self.check_circle(prev);
        self.check_circle(next);
        Ok(())
    }

    /// Replaces `arc`'s circle event (if any) with a fresh one for its current neighbors.
    fn check_circle(&mut self, arc: ArcIdx) {
        if let Some(old) = self.beach[arc].circle.take() {
            self.circles.invalidate(&old);
        }

        let Some((a, c)) = self.beach.neighbor_sites(arc) else {
            return;
        };
        let b = self.beach[arc].site;
        let Some((key, vertex)) = circle_event(&a, &b, &c) else {
            return;
        };

        // An event exactly at the sweep-line is still ahead of the one we're
        // handling, because it gets a later sequence number. Co-circular
        // sites rely on this.
        let precision = &self.config.precision;
        if precision.lt(key, self.sweep_x) {
            return;
        }

        let event = CircleEvent { arc, vertex };
        self.circles.push(event, precision.round(key));
        self.beach[arc].circle = Some(event);
        tracing::trace!(?arc, key, ?vertex, "queued circle event");
    }
}
