//! Rejection sampling over random trees until the canvas aspect fits a band

use crate::io::error::{CollageError, Result, invalid_input};
use crate::layout::aspect::calculate_aspect;
use crate::layout::generator::generate_tree;
use crate::layout::tree::TileTree;
use rand::Rng;
use tracing::{debug, trace, warn};

/// Requested canvas aspect ratio with a multiplicative tolerance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectTarget {
    /// Desired width / height of the whole canvas
    pub aspect: f64,
    /// Factor greater than one; accepted band is `aspect / tolerance ..= aspect * tolerance`
    pub tolerance: f64,
}

impl AspectTarget {
    /// Validated target
    ///
    /// # Errors
    ///
    /// Returns an error if `aspect` is not a positive finite number or
    /// `tolerance` is not a finite number greater than one
    pub fn new(aspect: f64, tolerance: f64) -> Result<Self> {
        let target = Self { aspect, tolerance };
        target.validate()?;
        Ok(target)
    }

    /// Check the target without constructing a new one
    ///
    /// # Errors
    ///
    /// Same conditions as [`AspectTarget::new`]
    pub fn validate(&self) -> Result<()> {
        if !self.aspect.is_finite() || self.aspect <= 0.0 {
            return Err(invalid_input(
                "target aspect",
                &self.aspect,
                &"must be a positive finite number",
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 1.0 {
            return Err(invalid_input(
                "tolerance",
                &self.tolerance,
                &"must be a finite number greater than 1",
            ));
        }
        Ok(())
    }

    /// Inclusive acceptance band `(lower, upper)`
    pub fn bounds(&self) -> (f64, f64) {
        (self.aspect / self.tolerance, self.aspect * self.tolerance)
    }

    /// Whether `aspect` falls inside the band
    pub fn accepts(&self, aspect: f64) -> bool {
        let (lower, upper) = self.bounds();
        (lower..=upper).contains(&aspect)
    }
}

/// Tree accepted by a search, with its aspect already computed
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Accepted tree, aspects filled in, rectangles not yet resolved
    pub tree: TileTree,
    /// Root aspect ratio of `tree`
    pub aspect: f64,
    /// Number of trees generated, including the accepted one
    pub attempts: usize,
}

/// One generation and aspect pass, accepted unconditionally
///
/// # Errors
///
/// Returns an error if `aspect_ratios` is empty or the generated tree is
/// inconsistent
pub fn search_unconstrained<R: Rng + ?Sized>(
    aspect_ratios: &[f64],
    rng: &mut R,
) -> Result<SearchOutcome> {
    let mut tree = generate_tree(aspect_ratios, rng)?;
    let aspect = calculate_aspect(&mut tree)?;
    debug!(aspect, "accepted unconstrained layout");
    Ok(SearchOutcome {
        tree,
        aspect,
        attempts: 1,
    })
}

/// Regenerate whole trees until the root aspect lands inside `target`'s band
///
/// Every attempt is independent: a rejected tree is dropped before the next
/// one is built. Orientation choices never look at the target.
///
/// # Errors
///
/// Returns [`CollageError::LayoutUnattainable`] after exactly `max_attempts`
/// rejected trees, or an input error if the target, budget or image list is
/// invalid
pub fn search_within<R: Rng + ?Sized>(
    aspect_ratios: &[f64],
    target: AspectTarget,
    max_attempts: usize,
    rng: &mut R,
) -> Result<SearchOutcome> {
    target.validate()?;
    if max_attempts == 0 {
        return Err(invalid_input(
            "max attempts",
            &max_attempts,
            &"must be at least 1",
        ));
    }

    for attempt in 1..=max_attempts {
        let mut tree = generate_tree(aspect_ratios, rng)?;
        let aspect = calculate_aspect(&mut tree)?;

        if target.accepts(aspect) {
            let root = tree.root();
            tree.node_mut(root)?.aspect_expected = Some(target.aspect);
            debug!(attempt, aspect, target = target.aspect, "accepted layout");
            return Ok(SearchOutcome {
                tree,
                aspect,
                attempts: attempt,
            });
        }
        trace!(attempt, aspect, "rejected layout");
    }

    warn!(
        max_attempts,
        target = target.aspect,
        tolerance = target.tolerance,
        "search budget exhausted"
    );
    Err(CollageError::LayoutUnattainable {
        attempts: max_attempts,
        target: target.aspect,
        tolerance: target.tolerance,
    })
}
