//! Exhaustive grid search over QAOA angles.
//!
//! Each angle axis is a half-open domain `[min, max)` split into
//! `resolution` equal steps, so point `i` sits at `min + i · (max − min) / resolution`.
//! For p layers the grid has `resolution^(2p)` points, visited in
//! lexicographic order of (γ_1, …, γ_p, β_1, …, β_p). With one layer this
//! is γ in the outer loop and β in the inner loop.
//!
//! The result is the first point in that order attaining the maximum. NaN
//! objective values never win. The parallel scan reduces with the same rule
//! (larger value, then smaller index), so it returns exactly what the
//! sequential scan returns.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SimError, SimResult};
use crate::limits::Limits;

/// Half-open angle interval `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleDomain {
    /// Lower bound, included in the grid.
    pub min: f64,
    /// Upper bound, excluded from the grid.
    pub max: f64,
}

impl AngleDomain {
    /// Create a validated domain.
    pub fn new(min: f64, max: f64) -> SimResult<Self> {
        let domain = Self { min, max };
        domain.validate()?;
        Ok(domain)
    }

    /// `[0, π)`.
    pub fn half_turn() -> Self {
        Self {
            min: 0.0,
            max: std::f64::consts::PI,
        }
    }

    /// Reject empty, inverted or non-finite bounds.
    pub fn validate(&self) -> SimResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.max <= self.min {
            return Err(SimError::EmptyDomain {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Distance between neighbouring grid points.
    pub fn step(&self, resolution: usize) -> f64 {
        (self.max - self.min) / resolution as f64
    }

    /// The `i`-th grid point.
    pub fn point(&self, i: usize, resolution: usize) -> f64 {
        self.min + i as f64 * self.step(resolution)
    }
}

/// Grid definition. No `Default`: resolution and domains come from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of points per angle axis (>= 1).
    pub resolution: usize,
    /// Domain of every γ angle.
    pub gamma: AngleDomain,
    /// Domain of every β angle.
    pub beta: AngleDomain,
}

impl GridSpec {
    /// Create a validated grid specification.
    pub fn new(resolution: usize, gamma: AngleDomain, beta: AngleDomain) -> SimResult<Self> {
        let spec = Self {
            resolution,
            gamma,
            beta,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check resolution and both domains.
    pub fn validate(&self) -> SimResult<()> {
        if self.resolution < 1 {
            return Err(SimError::InvalidResolution(self.resolution));
        }
        self.gamma.validate()?;
        self.beta.validate()
    }

    /// Grid spacing along γ.
    pub fn gamma_step(&self) -> f64 {
        self.gamma.step(self.resolution)
    }

    /// Grid spacing along β.
    pub fn beta_step(&self) -> f64 {
        self.beta.step(self.resolution)
    }
}

/// The winning grid point.
///
/// Only produced by a search over at least one layer, so both angle lists
/// are non-empty and of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoint {
    gammas: Vec<f64>,
    betas: Vec<f64>,
    /// Objective value at this point.
    pub value: f64,
    /// Number of objective evaluations performed.
    pub evaluations: usize,
}

impl GridPoint {
    /// γ angle per layer.
    pub fn gammas(&self) -> &[f64] {
        &self.gammas
    }

    /// β angle per layer.
    pub fn betas(&self) -> &[f64] {
        &self.betas
    }

    /// Number of QAOA layers searched.
    pub fn layers(&self) -> usize {
        self.gammas.len()
    }

    /// First-layer γ.
    pub fn gamma(&self) -> f64 {
        self.gammas[0]
    }

    /// First-layer β.
    pub fn beta(&self) -> f64 {
        self.betas[0]
    }
}

/// Grid-search driver.
#[derive(Debug, Clone)]
pub struct GridSearch {
    spec: GridSpec,
    limits: Limits,
    parallel: bool,
}

impl GridSearch {
    /// Sequential search with default limits.
    pub fn new(spec: GridSpec) -> Self {
        Self {
            spec,
            limits: Limits::default(),
            parallel: false,
        }
    }

    /// Set resource limits.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Evaluate grid points on the rayon thread pool.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Maximise `objective(γ, β)` over the single-layer grid.
    pub fn run<F>(&self, objective: F) -> SimResult<GridPoint>
    where
        F: Fn(f64, f64) -> f64 + Sync,
    {
        self.run_layers(1, |gammas, betas| objective(gammas[0], betas[0]))
    }

    /// Maximise `objective(γ[], β[])` over the p-layer grid.
    pub fn run_layers<F>(&self, layers: usize, objective: F) -> SimResult<GridPoint>
    where
        F: Fn(&[f64], &[f64]) -> f64 + Sync,
    {
        self.spec.validate()?;
        if layers < 1 {
            return Err(SimError::NoLayers);
        }
        let total = u32::try_from(2 * layers)
            .ok()
            .and_then(|exp| self.spec.resolution.checked_pow(exp))
            .ok_or(SimError::ResourceLimit {
                what: "grid point count",
                requested: usize::MAX,
                max: self.limits.max_grid_points,
            })?;
        self.limits.check_grid_points(total)?;

        debug!(
            resolution = self.spec.resolution,
            layers,
            total,
            parallel = self.parallel,
            "starting grid search"
        );

        let evaluate = |index: usize| {
            let (gammas, betas) = self.angles_at(index, layers);
            (index, objective(&gammas, &betas))
        };

        let best = if self.parallel {
            (0..total).into_par_iter().map(evaluate).reduce_with(better)
        } else {
            (0..total).map(evaluate).reduce(better)
        };
        let (index, value) = best.ok_or(SimError::InvalidResolution(self.spec.resolution))?;
        let (gammas, betas) = self.angles_at(index, layers);

        info!(?gammas, ?betas, value, evaluations = total, "grid search finished");
        Ok(GridPoint {
            gammas,
            betas,
            value,
            evaluations: total,
        })
    }

    /// Decode a flat index into per-layer angles, most significant digit first.
    fn angles_at(&self, mut index: usize, layers: usize) -> (Vec<f64>, Vec<f64>) {
        let r = self.spec.resolution;
        let mut digits = vec![0; 2 * layers];
        for digit in digits.iter_mut().rev() {
            *digit = index % r;
            index /= r;
        }
        let gammas = digits[..layers]
            .iter()
            .map(|&i| self.spec.gamma.point(i, r))
            .collect();
        let betas = digits[layers..]
            .iter()
            .map(|&i| self.spec.beta.point(i, r))
            .collect();
        (gammas, betas)
    }
}

/// Pick the better of two evaluated points: larger value, ties to the lower index.
fn better(a: (usize, f64), b: (usize, f64)) -> (usize, f64) {
    let first = if a.0 <= b.0 { a } else { b };
    let second = if a.0 <= b.0 { b } else { a };
    match (first.1.is_nan(), second.1.is_nan()) {
        (true, false) => second,
        (false, true) | (true, true) => first,
        (false, false) => {
            if second.1 > first.1 {
                second
            } else {
                first
            }
        }
    }
}

/// Sequential single-layer grid search: maximise `objective(γ, β)`.
pub fn grid_search<F>(objective: F, spec: &GridSpec) -> SimResult<GridPoint>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    GridSearch::new(*spec).run(objective)
}

/// Sequential p-layer grid search.
pub fn grid_search_layers<F>(objective: F, spec: &GridSpec, layers: usize) -> SimResult<GridPoint>
where
    F: Fn(&[f64], &[f64]) -> f64 + Sync,
{
    GridSearch::new(*spec).run_layers(layers, objective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn unit_spec(resolution: usize) -> GridSpec {
        GridSpec::new(
            resolution,
            AngleDomain::new(0.0, 1.0).unwrap(),
            AngleDomain::new(0.0, 1.0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_domain_validation() {
        assert!(AngleDomain::new(0.0, PI).is_ok());
        assert!(matches!(
            AngleDomain::new(1.0, 1.0),
            Err(SimError::EmptyDomain { .. })
        ));
        assert!(AngleDomain::new(2.0, 1.0).is_err());
        assert!(AngleDomain::new(0.0, f64::INFINITY).is_err());
        assert!(AngleDomain::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let spec = GridSpec {
            resolution: 0,
            gamma: AngleDomain::half_turn(),
            beta: AngleDomain::half_turn(),
        };
        assert!(matches!(
            grid_search(|_, _| 0.0, &spec),
            Err(SimError::InvalidResolution(0))
        ));
    }

    #[test]
    fn test_half_open_points() {
        let d = AngleDomain::new(0.0, 1.0).unwrap();
        assert_eq!(d.point(0, 4), 0.0);
        assert_eq!(d.point(3, 4), 0.75);
    }

    #[test]
    fn test_finds_maximum() {
        // Peak at (0.5, 0.25).
        let f = |g: f64, b: f64| -((g - 0.5).powi(2) + (b - 0.25).powi(2));
        let best = grid_search(f, &unit_spec(4)).unwrap();
        assert_eq!(best.gamma(), 0.5);
        assert_eq!(best.beta(), 0.25);
        assert_eq!(best.evaluations, 16);
    }

    #[test]
    fn test_tie_break_is_first_in_row_major_order() {
        // Constant objective: every point ties, so (min, min) wins.
        let best = grid_search(|_, _| 1.0, &unit_spec(5)).unwrap();
        assert_eq!((best.gamma(), best.beta()), (0.0, 0.0));

        // Two equal peaks; the one with the smaller gamma comes first.
        let f = |g: f64, b: f64| {
            if (g == 0.25 && b == 0.75) || (g == 0.75 && b == 0.0) {
                1.0
            } else {
                0.0
            }
        };
        let best = grid_search(f, &unit_spec(4)).unwrap();
        assert_eq!((best.gamma(), best.beta()), (0.25, 0.75));
    }

    #[test]
    fn test_nan_never_wins() {
        let f = |g: f64, _b: f64| if g == 0.0 { f64::NAN } else { -g };
        let best = grid_search(f, &unit_spec(4)).unwrap();
        assert_eq!(best.gamma(), 0.25);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let f = |g: f64, b: f64| (3.0 * g).sin() * (5.0 * b).cos();
        let spec = unit_spec(37);
        let sequential = GridSearch::new(spec).run(f).unwrap();
        let parallel = GridSearch::new(spec).with_parallel(true).run(f).unwrap();
        assert_eq!(sequential, parallel);

        let flat = GridSearch::new(spec)
            .with_parallel(true)
            .run(|_, _| 2.0)
            .unwrap();
        assert_eq!((flat.gamma(), flat.beta()), (0.0, 0.0));
    }

    #[test]
    fn test_single_layer_point_accessors() {
        let best = grid_search(|g, b| g - b, &unit_spec(4)).unwrap();
        assert_eq!(best.layers(), 1);
        assert_eq!(best.gammas(), &[best.gamma()]);
        assert_eq!(best.betas(), &[best.beta()]);
        assert_eq!((best.gamma(), best.beta()), (0.75, 0.0));
    }

    #[test]
    fn test_two_layer_order() {
        let spec = unit_spec(2);
        let best = grid_search_layers(
            |g: &[f64], b: &[f64]| g[0] + 2.0 * g[1] - b[0] + b[1],
            &spec,
            2,
        )
        .unwrap();
        assert_eq!(best.gammas(), &[0.5, 0.5]);
        assert_eq!(best.betas(), &[0.0, 0.5]);
        assert_eq!(best.layers(), 2);
        assert_eq!(best.evaluations, 16);
    }

    #[test]
    fn test_grid_limit() {
        let search = GridSearch::new(unit_spec(10)).with_limits(Limits {
            max_grid_points: 99,
            ..Limits::default()
        });
        assert!(matches!(
            search.run(|_, _| 0.0),
            Err(SimError::ResourceLimit { requested: 100, .. })
        ));
    }
}
