//! # Rendezvous Solver
//!
//! Picks a meeting point for two agents.
//!
//! There is no single geometric rule that yields a fair and obstacle-clear
//! point on an arbitrary map, so the solver walks a chain of stages and stops
//! at the first one that succeeds:
//!
//! 1. The midpoint, if it keeps the buffer from obstacles
//! 2. An expanding annular scan around the midpoint, fairest candidate wins
//! 3. The midpoint again, only required to be open ground
//! 4. Fixed fractions along the segment between the agents
//! 5. Random probes in growing rings around each agent
//! 6. The first agent's own position
//!
//! Stages 1 and 2 honour the buffer. Stages 3 to 5 only guarantee that the
//! pixel itself is open ground. Stage 6 guarantees nothing but bounds.

use crate::navigation::RendezvousConfig;
use crate::world::{ColorSource, Coordinate, ObstacleMap, Point};
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// The stage that produced a meeting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RendezvousStage {
    /// The midpoint passed the buffered clearance test
    Midpoint,
    /// The annular scan around the midpoint found a buffered candidate
    AnnularScan,
    /// The midpoint is open ground but too close to an obstacle
    UnbufferedMidpoint,
    /// A point along the segment between the agents is open ground
    Interpolated,
    /// A random probe around one of the agents hit open ground
    RandomProbe,
    /// Nothing worked; the first agent's position was used
    AgentFallback,
}

impl RendezvousStage {
    /// Whether points from this stage keep the configured buffer.
    pub fn is_buffered(self) -> bool {
        matches!(self, RendezvousStage::Midpoint | RendezvousStage::AnnularScan)
    }

    /// Whether this stage is the last-resort fallback.
    pub fn is_degraded(self) -> bool {
        self == RendezvousStage::AgentFallback
    }
}

/// A meeting point and how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingPoint {
    /// The chosen pixel, always inside the world
    pub coordinate: Coordinate,
    /// The stage that produced it
    pub stage: RendezvousStage,
}

impl MeetingPoint {
    fn new(coordinate: Coordinate, stage: RendezvousStage) -> Self {
        Self { coordinate, stage }
    }

    /// Whether the point keeps the configured buffer from obstacles.
    pub fn is_buffered(&self) -> bool {
        self.stage.is_buffered()
    }

    /// Whether every search stage failed and the point may not be open
    /// ground at all.
    pub fn is_degraded(&self) -> bool {
        self.stage.is_degraded()
    }
}

/// Staged search for a fair, obstacle-clear meeting point.
///
/// # Examples
///
/// ```
/// use pixelnav::{ColorMap, Coordinate, NavConfig, ObstacleMap, Palette, RendezvousSolver, Rgb};
///
/// let world = ColorMap::filled(40, 10, Rgb::WHITE).unwrap();
/// let map = ObstacleMap::new(&world, Palette::default());
/// let mut rng = NavConfig::default().create_rng();
///
/// let meeting = RendezvousSolver::default().find_meeting_point(&map, (0, 0), (20, 0), &mut rng);
/// assert_eq!(meeting.coordinate, Coordinate::new(10, 0));
/// assert!(meeting.is_buffered());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RendezvousSolver {
    config: RendezvousConfig,
}

impl RendezvousSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: RendezvousConfig) -> Self {
        Self { config }
    }

    /// The configuration this solver searches with.
    pub fn config(&self) -> &RendezvousConfig {
        &self.config
    }

    /// Finds a meeting point for agents at `agent_a` and `agent_b`.
    ///
    /// Always returns a coordinate inside the world. Check
    /// [`MeetingPoint::is_degraded`] to tell a real result from the fallback.
    /// `rng` drives the random probe stage only.
    pub fn find_meeting_point<S, R>(
        &self,
        map: &ObstacleMap<'_, S>,
        agent_a: impl Into<Point>,
        agent_b: impl Into<Point>,
        rng: &mut R,
    ) -> MeetingPoint
    where
        S: ColorSource + ?Sized,
        R: Rng + ?Sized,
    {
        let agent_a = agent_a.into();
        let agent_b = agent_b.into();
        let midpoint = agent_a.midpoint(agent_b);
        let center = midpoint.to_coordinate();

        if map.is_clear(center, self.config.buffer_radius) {
            debug!("Meeting at buffered midpoint {}", center);
            return MeetingPoint::new(center, RendezvousStage::Midpoint);
        }

        if let Some(found) = self.annular_scan(map, midpoint, agent_a, agent_b) {
            debug!("Meeting at {} from annular scan around {}", found, center);
            return MeetingPoint::new(found, RendezvousStage::AnnularScan);
        }

        if map.is_exactly_clear(center) {
            debug!("Meeting at unbuffered midpoint {}", center);
            return MeetingPoint::new(center, RendezvousStage::UnbufferedMidpoint);
        }

        if let Some(found) = self.interpolated_probe(map, agent_a, agent_b) {
            debug!("Meeting at {} along the agents' segment", found);
            return MeetingPoint::new(found, RendezvousStage::Interpolated);
        }

        if let Some(found) = self.random_probe(map, [agent_a, agent_b], rng) {
            debug!("Meeting at {} from random probe", found);
            return MeetingPoint::new(found, RendezvousStage::RandomProbe);
        }

        let fallback = map.bounds().clamp(agent_a.to_coordinate());
        warn!(
            "Could not find any suitable meeting point between ({}, {}) and ({}, {}); using {}",
            agent_a.x, agent_a.y, agent_b.x, agent_b.y, fallback
        );
        MeetingPoint::new(fallback, RendezvousStage::AgentFallback)
    }

    /// Scans bands of growing radius around the midpoint.
    ///
    /// An offset belongs to the band of radius `r` when its squared length is
    /// within `r` of `r * r`. Each band stops early once `candidate_limit`
    /// buffered candidates are in hand; the fairest of them wins.
    fn annular_scan<S: ColorSource + ?Sized>(
        &self,
        map: &ObstacleMap<'_, S>,
        midpoint: Point,
        agent_a: Point,
        agent_b: Point,
    ) -> Option<Coordinate> {
        let step = self.config.radius_step.max(1);
        let mut radius = 1u32;

        while radius <= self.config.max_search_radius {
            let r = radius as i64;
            let mut candidates: Vec<(f64, Coordinate)> = Vec::new();

            for dx in -r..=r {
                for dy in -r..=r {
                    if (dx * dx + dy * dy - r * r).abs() > r {
                        continue;
                    }

                    let candidate =
                        Coordinate::truncate(midpoint.x + dx as f64, midpoint.y + dy as f64);
                    if !map.in_bounds(candidate)
                        || !map.is_clear(candidate, self.config.buffer_radius)
                    {
                        continue;
                    }

                    let score =
                        (candidate.distance_to(agent_a) - candidate.distance_to(agent_b)).abs();
                    candidates.push((score, candidate));

                    if candidates.len() >= self.config.candidate_limit {
                        return fairest(&candidates);
                    }
                }
            }

            if let Some(best) = fairest(&candidates) {
                return Some(best);
            }

            radius = radius.checked_add(step)?;
        }

        None
    }

    /// Tries fixed fractions of the way from the first agent to the second.
    fn interpolated_probe<S: ColorSource + ?Sized>(
        &self,
        map: &ObstacleMap<'_, S>,
        agent_a: Point,
        agent_b: Point,
    ) -> Option<Coordinate> {
        self.config
            .interpolation_fractions
            .iter()
            .map(|&t| agent_a.lerp(agent_b, t).to_coordinate())
            .find(|&candidate| map.is_exactly_clear(candidate))
    }

    /// Throws random probes at growing radii around each agent in turn.
    fn random_probe<S, R>(
        &self,
        map: &ObstacleMap<'_, S>,
        agents: [Point; 2],
        rng: &mut R,
    ) -> Option<Coordinate>
    where
        S: ColorSource + ?Sized,
        R: Rng + ?Sized,
    {
        for agent in agents {
            for radius in 1..=self.config.probe_radius_limit {
                let radius = radius as f64;
                for _ in 0..self.config.probes_per_radius {
                    let angle = rng.gen_range(0.0..TAU);
                    let dx = (radius * angle.cos()) as i32;
                    let dy = (radius * angle.sin()) as i32;
                    let candidate = Coordinate::truncate(agent.x + dx as f64, agent.y + dy as f64);
                    if map.is_exactly_clear(candidate) {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }
}

/// Lowest fairness score wins; ties go to the earliest candidate.
fn fairest(candidates: &[(f64, Coordinate)]) -> Option<Coordinate> {
    candidates
        .iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|&(_, coordinate)| coordinate)
}
