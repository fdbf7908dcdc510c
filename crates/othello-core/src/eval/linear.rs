//! Tunable evaluators: a tanh-squashed linear model over the position
//! features, and a variant whose weights drift with game progress.

use rand::Rng;

use crate::board::Board;
use crate::disc::Side;
use crate::error::WeightsError;
use crate::types::Scoref;

use super::{Heuristic, NUM_FEATURES, features, outcome};

/// Output ceiling, keeping non-terminal scores strictly inside (-1, 1).
const TANH_MAX: f32 = 0.999;

/// Slope applied to the weighted sum before squashing.
const TANH_SLOPE: f32 = 1.0;

/// Number of weights of [`PhasedHeuristic`].
pub const NUM_PHASED_WEIGHTS: usize = 2 * NUM_FEATURES;

/// Default linear weights: the hand-tuned ratios scaled into tanh range.
const DEFAULT_WEIGHTS: [f32; NUM_FEATURES] = [0.005, 0.02, 0.07, -0.01, 0.02];

fn check_weights(weights: &[f32], expected: usize) -> Result<(), WeightsError> {
    if weights.len() != expected {
        return Err(WeightsError::Length {
            expected,
            actual: weights.len(),
        });
    }
    match weights.iter().position(|w| !w.is_finite()) {
        Some(index) => Err(WeightsError::NonFinite {
            index,
            value: weights[index],
        }),
        None => Ok(()),
    }
}

#[inline]
fn dot(weights: &[f32], inputs: &[f32]) -> f32 {
    weights.iter().zip(inputs).map(|(w, x)| w * x).sum()
}

/// Derivative of `TANH_MAX * tanh(TANH_SLOPE * z)` with respect to `z`.
#[inline]
fn squash_slope(z: f32) -> f32 {
    let t = (TANH_SLOPE * z).tanh();
    TANH_MAX * TANH_SLOPE * (1.0 - t * t)
}

/// Linear model: `0.999 * tanh(w . x)` over the five position features.
///
/// Finished games score +1, 0 or -1 exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearHeuristic {
    weights: [f32; NUM_FEATURES],
}

impl Default for LinearHeuristic {
    fn default() -> Self {
        LinearHeuristic {
            weights: DEFAULT_WEIGHTS,
        }
    }
}

impl LinearHeuristic {
    /// Builds the model from a weight slice.
    ///
    /// # Arguments
    ///
    /// * `weights` - Exactly five finite weights, in feature order.
    ///
    /// # Returns
    ///
    /// The model, or a `WeightsError` describing the bad input.
    pub fn from_weights(weights: &[f32]) -> Result<Self, WeightsError> {
        check_weights(weights, NUM_FEATURES)?;
        let mut w = [0.0; NUM_FEATURES];
        w.copy_from_slice(weights);
        Ok(LinearHeuristic { weights: w })
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Gradient of the score with respect to the weights.
    ///
    /// Zero for a finished game, whose score does not depend on the weights.
    pub fn gradient(&self, board: &Board, side: Side) -> [f32; NUM_FEATURES] {
        if board.is_done() {
            return [0.0; NUM_FEATURES];
        }
        let inputs = features(board, side);
        let slope = squash_slope(dot(&self.weights, &inputs));
        inputs.map(|x| x * slope)
    }

    /// Adds `delta` to the weights.
    pub fn update_weights(&mut self, delta: &[f32]) -> Result<(), WeightsError> {
        check_weights(delta, NUM_FEATURES)?;
        for (w, d) in self.weights.iter_mut().zip(delta) {
            *w += d;
        }
        Ok(())
    }
}

impl Heuristic for LinearHeuristic {
    fn score(&self, board: &Board, side: Side) -> Scoref {
        if board.is_done() {
            return outcome(board, side);
        }
        let inputs = features(board, side);
        TANH_MAX * (TANH_SLOPE * dot(&self.weights, &inputs)).tanh()
    }
}

/// Linear model whose weights move with game progress.
///
/// The effective weights are `constant + linear * progress`, where progress
/// is the fraction of occupied squares.
#[derive(Debug, Clone, PartialEq)]
pub struct PhasedHeuristic {
    constant: [f32; NUM_FEATURES],
    linear: [f32; NUM_FEATURES],
}

impl Default for PhasedHeuristic {
    fn default() -> Self {
        PhasedHeuristic {
            constant: DEFAULT_WEIGHTS,
            linear: [0.0; NUM_FEATURES],
        }
    }
}

impl PhasedHeuristic {
    /// Builds the model from ten weights: five constant terms, then five
    /// progress terms.
    pub fn from_weights(weights: &[f32]) -> Result<Self, WeightsError> {
        check_weights(weights, NUM_PHASED_WEIGHTS)?;
        let mut constant = [0.0; NUM_FEATURES];
        let mut linear = [0.0; NUM_FEATURES];
        constant.copy_from_slice(&weights[..NUM_FEATURES]);
        linear.copy_from_slice(&weights[NUM_FEATURES..]);
        Ok(PhasedHeuristic { constant, linear })
    }

    /// Draws every weight uniformly from [-0.05, 0.05], the usual starting
    /// point for tuning from scratch.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut draw = || rng.random_range(-0.05f32..=0.05);
        PhasedHeuristic {
            constant: std::array::from_fn(|_| draw()),
            linear: std::array::from_fn(|_| draw()),
        }
    }

    /// Returns the ten weights in construction order.
    pub fn weights(&self) -> [f32; NUM_PHASED_WEIGHTS] {
        let mut all = [0.0; NUM_PHASED_WEIGHTS];
        all[..NUM_FEATURES].copy_from_slice(&self.constant);
        all[NUM_FEATURES..].copy_from_slice(&self.linear);
        all
    }

    fn progress(board: &Board) -> f32 {
        board.occupied().count() as f32 / 64.0
    }

    fn effective(&self, progress: f32) -> [f32; NUM_FEATURES] {
        std::array::from_fn(|i| self.constant[i] + self.linear[i] * progress)
    }

    /// Gradient of the score with respect to the ten weights.
    pub fn gradient(&self, board: &Board, side: Side) -> [f32; NUM_PHASED_WEIGHTS] {
        if board.is_done() {
            return [0.0; NUM_PHASED_WEIGHTS];
        }
        let inputs = features(board, side);
        let progress = Self::progress(board);
        let slope = squash_slope(dot(&self.effective(progress), &inputs));
        std::array::from_fn(|i| {
            if i < NUM_FEATURES {
                inputs[i] * slope
            } else {
                inputs[i - NUM_FEATURES] * progress * slope
            }
        })
    }

    /// Adds `delta` (ten entries) to the weights.
    pub fn update_weights(&mut self, delta: &[f32]) -> Result<(), WeightsError> {
        check_weights(delta, NUM_PHASED_WEIGHTS)?;
        for (w, d) in self.constant.iter_mut().chain(self.linear.iter_mut()).zip(delta) {
            *w += d;
        }
        Ok(())
    }
}

impl Heuristic for PhasedHeuristic {
    fn score(&self, board: &Board, side: Side) -> Scoref {
        if board.is_done() {
            return outcome(board, side);
        }
        let inputs = features(board, side);
        let weights = self.effective(Self::progress(board));
        TANH_MAX * (TANH_SLOPE * dot(&weights, &inputs)).tanh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_list::Move;
    use crate::square::Square;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn midgame() -> Board {
        let mut board = Board::new();
        for (sq, side) in [
            (Square::F5, Side::Black),
            (Square::F6, Side::White),
            (Square::E6, Side::Black),
            (Square::F4, Side::White),
        ] {
            assert!(board.do_move(Move::at(sq, side)));
        }
        board
    }

    #[test]
    fn test_weight_length_is_checked() {
        assert_eq!(
            LinearHeuristic::from_weights(&[1.0; 3]),
            Err(WeightsError::Length { expected: 5, actual: 3 })
        );
        assert!(PhasedHeuristic::from_weights(&[0.0; 10]).is_ok());
        assert!(matches!(
            LinearHeuristic::from_weights(&[0.0, f32::NAN, 0.0, 0.0, 0.0]),
            Err(WeightsError::NonFinite { index: 1, .. })
        ));
        let mut h = LinearHeuristic::default();
        assert!(h.update_weights(&[0.0; 10]).is_err());
        assert_eq!(h, LinearHeuristic::default());
    }

    #[test]
    fn test_score_is_bounded_and_antisymmetric() {
        let board = midgame();
        let h = LinearHeuristic::from_weights(&[3.0, 2.0, 5.0, -1.0, 0.5]).unwrap();
        let black = h.score(&board, Side::Black);
        assert!(black.abs() < 1.0);
        // Every feature, parity included, flips sign with the side.
        assert!((black + h.score(&board, Side::White)).abs() < 1e-6);
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let board = midgame();
        let h = LinearHeuristic::from_weights(&[0.05, 0.1, 0.2, -0.05, 0.1]).unwrap();
        let grad = h.gradient(&board, Side::Black);
        let eps = 1e-3;
        for i in 0..NUM_FEATURES {
            let mut delta = [0.0; NUM_FEATURES];
            delta[i] = eps;
            let mut shifted = h.clone();
            shifted.update_weights(&delta).unwrap();
            let numeric =
                (shifted.score(&board, Side::Black) - h.score(&board, Side::Black)) / eps;
            assert!(
                (numeric - grad[i]).abs() < 1e-2,
                "weight {i}: numeric {numeric} analytic {}",
                grad[i]
            );
        }
    }

    #[test]
    fn test_finished_game_scores_outcome() {
        let board: Board = format!("{}{}", "X".repeat(40), "O".repeat(24)).parse().unwrap();
        let h = PhasedHeuristic::default();
        assert_eq!(h.score(&board, Side::Black), 1.0);
        assert_eq!(h.score(&board, Side::White), -1.0);
        assert_eq!(h.gradient(&board, Side::Black), [0.0; NUM_PHASED_WEIGHTS]);
    }

    #[test]
    fn test_phased_gradient_layout() {
        let board = midgame();
        let h = PhasedHeuristic::random(&mut StdRng::seed_from_u64(7));
        assert!(h.weights().iter().all(|w| w.abs() <= 0.05));
        let grad = h.gradient(&board, Side::White);
        let progress = board.occupied().count() as f32 / 64.0;
        for i in 0..NUM_FEATURES {
            assert!((grad[i + NUM_FEATURES] - grad[i] * progress).abs() < 1e-6);
        }
        let mut moved = h.clone();
        moved.update_weights(&[0.01; NUM_PHASED_WEIGHTS]).unwrap();
        assert!((moved.weights()[9] - h.weights()[9] - 0.01).abs() < 1e-6);
    }
}
