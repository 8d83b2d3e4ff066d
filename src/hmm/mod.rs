//! Log-domain Viterbi decoder
//!
//! A small discrete hidden Markov model over integer-coded states and
//! observations. All probability tables are supplied plain; scores are
//! combined exclusively in log10 domain so long observation sequences
//! cannot underflow to zero. Raw probabilities are never multiplied
//! across more than one step.

use crate::error::KeyError;

/// Result of one Viterbi decoding run
#[derive(Debug, Clone, PartialEq)]
pub struct ViterbiDecode {
    /// Maximum-likelihood state path, in chronological order, one
    /// state per observation
    pub path: Vec<usize>,

    /// log10 probability of the decoded path
    pub max_log_probability: f64,

    /// Final-layer score vector, one entry per possible state index
    /// (log10 domain; 0.0-filled for state indices outside the model's
    /// state set)
    pub final_scores: Vec<f64>,
}

/// Discrete hidden Markov model with integer-coded symbols
///
/// Holds one observation sequence together with the state set and the
/// initial/transition/emission tables, all indexed by small integers.
/// An instance is immutable once constructed; [`run_viterbi`] is a
/// pure function of it, so repeated runs yield identical results.
///
/// The state set may be a subset of the table index space (the tables
/// are sized by their declared dimensions, the state set chooses which
/// rows participate).
///
/// [`run_viterbi`]: HiddenMarkovModel::run_viterbi
#[derive(Debug, Clone)]
pub struct HiddenMarkovModel {
    observations: Vec<usize>,
    states: Vec<usize>,
    initial: Vec<f64>,
    transition: Vec<Vec<f64>>,
    emission: Vec<Vec<f64>>,
}

impl HiddenMarkovModel {
    /// Build a model, validating every table dimension up front
    ///
    /// `initial` defines the state index space: `transition` must be
    /// square over it and `emission` must have one row per state index
    /// with one column per observation symbol.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidModel`] for an empty observation
    /// sequence, an empty state set, mismatched table dimensions, or a
    /// state/observation index outside the declared domains. Nothing
    /// is decoded until all checks pass.
    pub fn new(
        observations: Vec<usize>,
        states: Vec<usize>,
        initial: Vec<f64>,
        transition: Vec<Vec<f64>>,
        emission: Vec<Vec<f64>>,
    ) -> Result<Self, KeyError> {
        if observations.is_empty() {
            return Err(KeyError::InvalidModel(
                "empty observation sequence".to_string(),
            ));
        }
        if states.is_empty() {
            return Err(KeyError::InvalidModel("empty state set".to_string()));
        }
        let state_space = initial.len();
        if let Some(&bad) = states.iter().find(|&&s| s >= state_space) {
            return Err(KeyError::InvalidModel(format!(
                "state index {} outside the {}-state table domain",
                bad, state_space
            )));
        }
        if transition.len() != state_space
            || transition.iter().any(|row| row.len() != state_space)
        {
            return Err(KeyError::InvalidModel(format!(
                "transition table must be {}x{}",
                state_space, state_space
            )));
        }
        if emission.len() != state_space {
            return Err(KeyError::InvalidModel(format!(
                "emission table must have {} rows, got {}",
                state_space,
                emission.len()
            )));
        }
        let alphabet = emission.first().map(Vec::len).unwrap_or(0);
        if alphabet == 0 || emission.iter().any(|row| row.len() != alphabet) {
            return Err(KeyError::InvalidModel(
                "emission table rows must share one non-empty alphabet".to_string(),
            ));
        }
        if let Some(&bad) = observations.iter().find(|&&o| o >= alphabet) {
            return Err(KeyError::InvalidModel(format!(
                "observation symbol {} outside the {}-symbol alphabet",
                bad, alphabet
            )));
        }
        Ok(Self {
            observations,
            states,
            initial,
            transition,
            emission,
        })
    }

    /// The observation sequence this model decodes
    pub fn observations(&self) -> &[usize] {
        &self.observations
    }

    /// Decode the maximum-likelihood state path
    ///
    /// Standard Viterbi recursion in log10 domain:
    /// - layer 0: `score[s] = log10(initial[s] * emission[s][obs[0]])`
    /// - layer t: `score[s'] = max_s(prev[s] + log10(transition[s][s']
    ///   * emission[s'][obs[t]]))`, keeping the first-encountered
    ///   maximizer in state order (templates can produce exact ties,
    ///   and the winner must be stable)
    /// - termination: best final state by score, first maximizer wins;
    ///   backtrace is returned in chronological order.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::NumericalDegeneracy`] if every state of some
    /// layer scores log(0); an arbitrary state is never reported in
    /// that case.
    pub fn run_viterbi(&self) -> Result<ViterbiDecode, KeyError> {
        let n = self.states.len();
        let t_len = self.observations.len();
        log::debug!(
            "Viterbi: {} observations over {} states",
            t_len,
            n
        );

        // Lattice scores indexed by position in the state set; back
        // pointers likewise.
        let mut scores = vec![f64::NEG_INFINITY; n];
        let mut back_pointers: Vec<Vec<usize>> = Vec::with_capacity(t_len);

        let first_obs = self.observations[0];
        for (pos, &s) in self.states.iter().enumerate() {
            scores[pos] = (self.initial[s] * self.emission[s][first_obs]).log10();
        }
        self.check_layer(&scores, 0)?;

        for (t, &obs) in self.observations.iter().enumerate().skip(1) {
            let mut next = vec![f64::NEG_INFINITY; n];
            let mut pointers = vec![0usize; n];
            for (next_pos, &next_state) in self.states.iter().enumerate() {
                let mut best = f64::NEG_INFINITY;
                let mut best_pos = 0usize;
                for (pos, &state) in self.states.iter().enumerate() {
                    let step = (self.transition[state][next_state]
                        * self.emission[next_state][obs])
                        .log10();
                    let candidate = scores[pos] + step;
                    if candidate > best {
                        best = candidate;
                        best_pos = pos;
                    }
                }
                next[next_pos] = best;
                pointers[next_pos] = best_pos;
            }
            self.check_layer(&next, t)?;
            back_pointers.push(pointers);
            scores = next;
        }

        // Termination: the first-encountered maximizer, scanning in
        // state order. A state stuck at -inf never starts a backtrace
        // because check_layer guarantees a finite alternative exists.
        let mut best_pos = 0usize;
        let mut best = f64::NEG_INFINITY;
        for (pos, &score) in scores.iter().enumerate() {
            if score > best {
                best = score;
                best_pos = pos;
            }
        }

        // Backtrace, then flip into chronological order.
        let mut path = Vec::with_capacity(t_len);
        let mut pos = best_pos;
        path.push(self.states[pos]);
        for pointers in back_pointers.iter().rev() {
            pos = pointers[pos];
            path.push(self.states[pos]);
        }
        path.reverse();

        let mut final_scores = vec![0.0; self.initial.len()];
        for (pos, &s) in self.states.iter().enumerate() {
            final_scores[s] = scores[pos];
        }

        log::debug!(
            "Viterbi finished: best state {}, log10 probability {:.4}",
            self.states[best_pos],
            best
        );

        Ok(ViterbiDecode {
            path,
            max_log_probability: best,
            final_scores,
        })
    }

    fn check_layer(&self, layer: &[f64], t: usize) -> Result<(), KeyError> {
        if layer.iter().all(|score| score.is_infinite()) {
            return Err(KeyError::NumericalDegeneracy(format!(
                "all states unreachable at observation {}",
                t
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Classic two-state weather/health example with a known best path.
    fn fever_model(observations: Vec<usize>) -> HiddenMarkovModel {
        // states: 0 = healthy, 1 = fever
        // symbols: 0 = normal, 1 = cold, 2 = dizzy
        HiddenMarkovModel::new(
            observations,
            vec![0, 1],
            vec![0.6, 0.4],
            vec![vec![0.7, 0.3], vec![0.4, 0.6]],
            vec![vec![0.5, 0.4, 0.1], vec![0.1, 0.3, 0.6]],
        )
        .unwrap()
    }

    #[test]
    fn test_known_best_path() {
        let model = fever_model(vec![0, 1, 2]);
        let decode = model.run_viterbi().unwrap();
        assert_eq!(decode.path, vec![0, 0, 1]);
        // p = 0.6*0.5 * 0.7*0.4 * 0.3*0.6 = 0.01512
        let expected = 0.01512f64.log10();
        assert!(
            (decode.max_log_probability - expected).abs() < 1e-9,
            "got {}",
            decode.max_log_probability
        );
    }

    #[test]
    fn test_chronological_path_order() {
        // The path must align index-for-index with the observations:
        // a dizzy reading at the end should flip the *last* state.
        let model = fever_model(vec![0, 0, 0, 2]);
        let decode = model.run_viterbi().unwrap();
        assert_eq!(decode.path.len(), 4);
        assert_eq!(decode.path[0], 0);
        assert_eq!(decode.path[3], 1);
    }

    #[test]
    fn test_single_observation() {
        let model = fever_model(vec![2]);
        let decode = model.run_viterbi().unwrap();
        assert_eq!(decode.path, vec![1]);
        let expected = (0.4 * 0.6f64).log10();
        assert!((decode.max_log_probability - expected).abs() < 1e-12);
    }

    #[test]
    fn test_determinism() {
        let model = fever_model(vec![0, 1, 2, 2, 1, 0, 0, 2]);
        let first = model.run_viterbi().unwrap();
        let second = model.run_viterbi().unwrap();
        assert_eq!(first.path, second.path);
        assert_eq!(first.max_log_probability, second.max_log_probability);
        assert_eq!(first.final_scores, second.final_scores);
    }

    #[test]
    fn test_tie_breaks_to_first_state() {
        // Fully symmetric model: every layer ties, so the decoded path
        // must stick to the first-encountered state.
        let model = HiddenMarkovModel::new(
            vec![0, 0, 0],
            vec![0, 1],
            vec![0.5, 0.5],
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
            vec![vec![1.0], vec![1.0]],
        )
        .unwrap();
        let decode = model.run_viterbi().unwrap();
        assert_eq!(decode.path, vec![0, 0, 0]);
    }

    #[test]
    fn test_empty_observations_rejected() {
        let result = HiddenMarkovModel::new(
            vec![],
            vec![0, 1],
            vec![0.5, 0.5],
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
            vec![vec![1.0], vec![1.0]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_observation_outside_alphabet_rejected() {
        let result = HiddenMarkovModel::new(
            vec![0, 3],
            vec![0, 1],
            vec![0.5, 0.5],
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
            vec![vec![0.5, 0.3, 0.2], vec![0.5, 0.3, 0.2]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_mismatched_transition_rejected() {
        let result = HiddenMarkovModel::new(
            vec![0],
            vec![0, 1],
            vec![0.5, 0.5],
            vec![vec![0.5, 0.5]],
            vec![vec![1.0], vec![1.0]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_state_outside_table_domain_rejected() {
        let result = HiddenMarkovModel::new(
            vec![0],
            vec![0, 2],
            vec![0.5, 0.5],
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
            vec![vec![1.0], vec![1.0]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_degenerate_layer_reported() {
        // Zero emission everywhere: layer 0 is all log(0).
        let result = HiddenMarkovModel::new(
            vec![0, 0],
            vec![0, 1],
            vec![0.5, 0.5],
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
            vec![vec![0.0], vec![0.0]],
        )
        .unwrap()
        .run_viterbi();
        assert!(matches!(result, Err(KeyError::NumericalDegeneracy(_))));
    }

    #[test]
    fn test_zero_initial_state_not_selected() {
        // State 1 is unreachable at start; the path must begin at 0
        // even though state 1's emission is stronger.
        let model = HiddenMarkovModel::new(
            vec![0, 0],
            vec![0, 1],
            vec![1.0, 0.0],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![vec![0.2], vec![0.9]],
        )
        .unwrap();
        let decode = model.run_viterbi().unwrap();
        assert_eq!(decode.path, vec![0, 0]);
    }

    #[test]
    fn test_final_scores_zero_filled_for_unused_states() {
        // Three-state table domain, two-state model: the middle state
        // never participates and must stay 0.0 in the final vector.
        let model = HiddenMarkovModel::new(
            vec![0, 0],
            vec![0, 2],
            vec![0.5, 0.0, 0.5],
            vec![
                vec![0.5, 0.0, 0.5],
                vec![0.0, 0.0, 0.0],
                vec![0.5, 0.0, 0.5],
            ],
            vec![vec![1.0], vec![1.0], vec![1.0]],
        )
        .unwrap();
        let decode = model.run_viterbi().unwrap();
        assert_eq!(decode.final_scores.len(), 3);
        assert_eq!(decode.final_scores[1], 0.0);
        assert!(decode.final_scores[0].is_finite());
    }
}
