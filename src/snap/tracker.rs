use crate::math::Point3;
use crate::scene::SourceId;

/// Outcome of offering a candidate to a [`CandidateTracker`].
///
/// Ordered so that aggregating several outcomes keeps the most
/// informative one: a second candidate implies a closest one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    /// Outside tolerance, not an improvement, or already the closest.
    Rejected = 0,
    /// Became the new closest; the previous closest is now second.
    Closest = 1,
    /// Became the new second-closest.
    Second = 2,
}

impl Rank {
    /// Combines two outcomes, keeping the higher rank.
    #[must_use]
    pub fn merge(self, other: Rank) -> Rank {
        self.max(other)
    }
}

/// A snap candidate: the nearest point on one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Closest point on the segment to the query.
    pub point: Point3,
    /// Squared distance from the query to `point`.
    pub dist_sq: f64,
    /// Source holding the segment.
    pub source: SourceId,
    /// Index of the segment within its source.
    pub segment: usize,
    /// Squared tolerance of the source the candidate came from.
    pub tol_sq: f64,
}

/// Keeps the closest and second-closest candidates seen during one query.
///
/// Lives for a single snap query and is never shared between queries.
#[derive(Debug, Clone, Default)]
pub struct CandidateTracker {
    closest: Option<Candidate>,
    second: Option<Candidate>,
}

impl CandidateTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a candidate and reports where it ranked.
    ///
    /// Candidates farther than `tol_sq` are rejected, as is the segment
    /// already recorded as closest. Ties keep the earlier candidate.
    pub fn offer(
        &mut self,
        point: Point3,
        dist_sq: f64,
        source: SourceId,
        segment: usize,
        tol_sq: f64,
    ) -> Rank {
        if dist_sq.is_nan() || dist_sq > tol_sq {
            return Rank::Rejected;
        }
        if self
            .closest
            .is_some_and(|c| c.source == source && c.segment == segment)
        {
            return Rank::Rejected;
        }

        let candidate = Candidate {
            point,
            dist_sq,
            source,
            segment,
            tol_sq,
        };

        if self.closest.is_none_or(|c| dist_sq < c.dist_sq) {
            self.second = self.closest.replace(candidate);
            return Rank::Closest;
        }
        if self.second.is_none_or(|c| dist_sq < c.dist_sq) {
            self.second = Some(candidate);
            return Rank::Second;
        }
        Rank::Rejected
    }

    #[must_use]
    pub fn closest(&self) -> Option<&Candidate> {
        self.closest.as_ref()
    }

    #[must_use]
    pub fn second(&self) -> Option<&Candidate> {
        self.second.as_ref()
    }

    /// Returns the closest and second-closest candidates when both exist.
    #[must_use]
    pub fn pair(&self) -> Option<(&Candidate, &Candidate)> {
        Some((self.closest.as_ref()?, self.second.as_ref()?))
    }
}
