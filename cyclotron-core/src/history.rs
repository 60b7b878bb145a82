//! Append-only record of every integration step.
//!
//! Each step's position is stored once, column-wise. A [`StepRecord`] is a
//! view whose trajectory is the prefix of those columns up to and including
//! its own step, so replaying any frame is O(1) and needs no copying.

use crate::engine::GapDirection;
use glam::DVec2;

/// What the particle was doing during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Inside the gap, pushed along the given direction by the electric field
    Accelerating(GapDirection),
    /// Inside a dee, curving under the magnetic field only
    Bending,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Accelerating(_) => "ACCELERATING IN GAP",
            Phase::Bending => "BENDING IN B FIELD",
        }
    }
}

/// One frame of the trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord<'a> {
    pub index: usize,
    /// x coordinates of every step from the start of the run through this one
    pub trajectory_x: &'a [f64],
    /// y coordinates matching `trajectory_x`
    pub trajectory_y: &'a [f64],
    pub position: DVec2,
    pub gap_direction: GapDirection,
}

impl<'a> StepRecord<'a> {
    pub fn in_gap(&self) -> bool {
        self.gap_direction != GapDirection::Off
    }

    pub fn phase(&self) -> Phase {
        if self.in_gap() {
            Phase::Accelerating(self.gap_direction)
        } else {
            Phase::Bending
        }
    }

    /// Trajectory as points, oldest first
    pub fn points(&self) -> impl Iterator<Item = DVec2> + 'a {
        let (xs, ys) = (self.trajectory_x, self.trajectory_y);
        xs.iter().zip(ys).map(|(&x, &y)| DVec2::new(x, y))
    }
}

#[derive(Debug, Clone, Default)]
pub struct History {
    xs: Vec<f64>,
    ys: Vec<f64>,
    directions: Vec<GapDirection>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: DVec2, gap_direction: GapDirection) {
        self.xs.push(position.x);
        self.ys.push(position.y);
        self.directions.push(gap_direction);
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Drop every step and release the backing storage
    pub fn clear(&mut self) {
        self.xs = Vec::new();
        self.ys = Vec::new();
        self.directions = Vec::new();
    }

    pub fn get(&self, index: usize) -> Option<StepRecord<'_>> {
        let gap_direction = *self.directions.get(index)?;
        Some(StepRecord {
            index,
            trajectory_x: &self.xs[..=index],
            trajectory_y: &self.ys[..=index],
            position: DVec2::new(self.xs[index], self.ys[index]),
            gap_direction,
        })
    }

    pub fn last(&self) -> Option<StepRecord<'_>> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = StepRecord<'_>> {
        (0..self.len()).filter_map(move |index| self.get(index))
    }

    /// Number of times the particle entered the gap from outside.
    /// A run that starts inside the gap counts that as its first entry.
    pub fn gap_crossings(&self) -> usize {
        let mut inside = false;
        let mut count = 0;
        for direction in &self.directions {
            let now_inside = *direction != GapDirection::Off;
            if now_inside && !inside {
                count += 1;
            }
            inside = now_inside;
        }
        count
    }
}
