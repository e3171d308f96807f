//! Training-set generation: the select, replace and rebuild loop.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, instrument};

use cdr_ir::Circuit;

use crate::decode::{merge_records, rebuild_circuit};
use crate::encode::{DroppedInstruction, UnsupportedGatePolicy, encode_circuit, encode_lenient};
use crate::error::{TrainError, TrainResult};
use crate::options::SigmaOptions;
use crate::replace::{ReplacementMethod, replace_selected};
use crate::select::{SelectionMethod, num_to_replace, select};

/// Generated near-Clifford circuits and their angle bookkeeping.
///
/// The three sequences are parallel: entry `i` of each describes training
/// circuit `i`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrainingSet {
    pub circuits: Vec<Circuit>,
    pub original_angles: Vec<Vec<f64>>,
    pub replaced_angles: Vec<Vec<f64>>,
    /// Input instructions left out of every circuit.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<DroppedInstruction>,
}

impl TrainingSet {
    /// Number of training circuits.
    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    /// Split into `(circuits, original_angles, replaced_angles)`.
    pub fn into_parts(self) -> (Vec<Circuit>, Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (self.circuits, self.original_angles, self.replaced_angles)
    }
}

/// Builder for near-Clifford training sets.
#[derive(Debug, Clone)]
pub struct TrainingSetGenerator {
    num_training_circuits: usize,
    fraction_non_clifford: f64,
    selection: SelectionMethod,
    replacement: ReplacementMethod,
    options: SigmaOptions,
    unsupported_gates: UnsupportedGatePolicy,
}

impl TrainingSetGenerator {
    /// Generate `num_training_circuits` circuits keeping
    /// `floor(fraction_non_clifford · total)` non-Clifford rotations each.
    pub fn new(num_training_circuits: usize, fraction_non_clifford: f64) -> Self {
        Self {
            num_training_circuits,
            fraction_non_clifford,
            selection: SelectionMethod::default(),
            replacement: ReplacementMethod::default(),
            options: SigmaOptions::default(),
            unsupported_gates: UnsupportedGatePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_selection(mut self, method: SelectionMethod) -> Self {
        self.selection = method;
        self
    }

    #[must_use]
    pub fn with_replacement(mut self, method: ReplacementMethod) -> Self {
        self.replacement = method;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: SigmaOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_unsupported_gates(mut self, policy: UnsupportedGatePolicy) -> Self {
        self.unsupported_gates = policy;
        self
    }

    pub fn num_training_circuits(&self) -> usize {
        self.num_training_circuits
    }

    pub fn fraction_non_clifford(&self) -> f64 {
        self.fraction_non_clifford
    }

    pub fn selection(&self) -> SelectionMethod {
        self.selection
    }

    pub fn replacement(&self) -> ReplacementMethod {
        self.replacement
    }

    fn validate(&self) -> TrainResult<()> {
        if self.num_training_circuits == 0 {
            return Err(TrainError::invalid(
                "num_training_circuits must be at least 1",
            ));
        }
        let f = self.fraction_non_clifford;
        if !f.is_finite() || !(0.0..=1.0).contains(&f) {
            return Err(TrainError::invalid(format!(
                "fraction_non_clifford must lie in [0, 1], got {f}"
            )));
        }
        Ok(())
    }

    /// Generate the training set drawing randomness from `rng`.
    ///
    /// Seeding `rng` makes the output reproducible:
    /// ```rust,ignore
    /// use rand::SeedableRng;
    /// let rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let set = generator.generate_with_rng(&circuit, rng)?;
    /// ```
    #[instrument(skip(self, circuit, rng), fields(circuit = circuit.name()))]
    pub fn generate_with_rng<R: Rng>(
        &self,
        circuit: &Circuit,
        mut rng: R,
    ) -> TrainResult<TrainingSet> {
        self.validate()?;
        let sigmas = self.options.resolve()?;

        let encoded = encode_circuit(circuit, self.unsupported_gates)?;
        let (fixed, non_clifford) = encoded.partition();
        let total_non_cliff = non_clifford.len();
        let n_replace = num_to_replace(total_non_cliff, self.fraction_non_clifford);

        info!(
            num_training_circuits = self.num_training_circuits,
            total_non_cliff,
            n_replace,
            selection = %self.selection,
            replacement = %self.replacement,
            "generating training circuits"
        );

        let mut set = TrainingSet {
            circuits: Vec::with_capacity(self.num_training_circuits),
            original_angles: Vec::with_capacity(self.num_training_circuits),
            replaced_angles: Vec::with_capacity(self.num_training_circuits),
            dropped: encoded.dropped.clone(),
        };

        for index in 0..self.num_training_circuits {
            let picked = select(
                &non_clifford,
                n_replace,
                self.selection,
                sigmas.select,
                &mut rng,
            );

            let mut is_picked = vec![false; total_non_cliff];
            for &i in &picked {
                is_picked[i] = true;
            }
            let chosen: Vec<_> = picked.iter().map(|&i| non_clifford[i].clone()).collect();
            let untouched: Vec<_> = non_clifford
                .iter()
                .zip(&is_picked)
                .filter(|(_, picked)| !**picked)
                .map(|(r, _)| r.clone())
                .collect();

            let replacement =
                replace_selected(&chosen, self.replacement, sigmas.replace, &mut rng);
            let merged = merge_records([fixed.clone(), replacement.records, untouched]);
            let training = rebuild_circuit(&merged, &encoded.template)?;

            debug!(
                index,
                ops = training.num_ops(),
                replaced = replacement.replaced_angles.len(),
                "built training circuit"
            );

            set.circuits.push(training);
            set.original_angles.push(replacement.original_angles);
            set.replaced_angles.push(replacement.replaced_angles);
        }

        Ok(set)
    }

    /// Generate the training set using the thread-local RNG.
    pub fn generate(&self, circuit: &Circuit) -> TrainResult<TrainingSet> {
        self.generate_with_rng(circuit, rand::thread_rng())
    }
}

/// Generate training circuits with string-named methods, using the
/// thread-local RNG.
///
/// `method_select` is one of `random` or `probabilistic`; `method_replace`
/// is one of `closest`, `random` or `probabilistic`.
pub fn generate_training_circuits(
    circuit: &Circuit,
    num_training_circuits: usize,
    fraction_non_clifford: f64,
    method_select: &str,
    method_replace: &str,
    options: &SigmaOptions,
) -> TrainResult<TrainingSet> {
    generate_training_circuits_with_rng(
        circuit,
        num_training_circuits,
        fraction_non_clifford,
        method_select,
        method_replace,
        options,
        rand::thread_rng(),
    )
}

/// As [`generate_training_circuits`], drawing randomness from `rng`.
pub fn generate_training_circuits_with_rng<R: Rng>(
    circuit: &Circuit,
    num_training_circuits: usize,
    fraction_non_clifford: f64,
    method_select: &str,
    method_replace: &str,
    options: &SigmaOptions,
    rng: R,
) -> TrainResult<TrainingSet> {
    TrainingSetGenerator::new(num_training_circuits, fraction_non_clifford)
        .with_selection(method_select.parse()?)
        .with_replacement(method_replace.parse()?)
        .with_options(*options)
        .generate_with_rng(circuit, rng)
}

/// Number of non-Clifford `Rz` rotations in `circuit`.
pub fn count_non_cliffords(circuit: &Circuit) -> usize {
    encode_lenient(circuit)
        .records
        .iter()
        .filter(|r| r.is_non_clifford_rotation())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use cdr_ir::QubitId;

    fn three_rotations() -> Circuit {
        let mut c = Circuit::with_size("t", 2, 0);
        c.rz(0.3, QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .rz(1.1, QubitId(1))
            .unwrap()
            .rz(PI, QubitId(0))
            .unwrap()
            .rz(2.0, QubitId(1))
            .unwrap();
        c
    }

    #[test]
    fn counts_only_non_clifford_rotations() {
        assert_eq!(count_non_cliffords(&three_rotations()), 3);
        let mut c = Circuit::with_size("c", 1, 0);
        c.x(QubitId(0)).unwrap().rz(FRAC_PI_2, QubitId(0)).unwrap();
        assert_eq!(count_non_cliffords(&c), 0);
    }

    #[test]
    fn each_circuit_replaces_the_expected_number() {
        let set = TrainingSetGenerator::new(5, 0.4)
            .generate_with_rng(&three_rotations(), StdRng::seed_from_u64(30))
            .unwrap();
        assert_eq!(set.len(), 5);
        // floor(0.4 · 3) = 1 kept, 2 replaced.
        for (orig, rep) in set.original_angles.iter().zip(&set.replaced_angles) {
            assert_eq!(orig.len(), 2);
            assert_eq!(rep.len(), 2);
        }
        for c in &set.circuits {
            assert_eq!(count_non_cliffords(c), 1);
            assert_eq!(c.num_ops(), 5);
        }
    }

    #[test]
    fn validation_precedes_sampling() {
        let c = three_rotations();
        let rng = StdRng::seed_from_u64(0);
        assert!(TrainingSetGenerator::new(0, 0.5).generate_with_rng(&c, rng.clone()).is_err());
        assert!(TrainingSetGenerator::new(1, 1.5).generate_with_rng(&c, rng.clone()).is_err());
        assert!(TrainingSetGenerator::new(1, f64::NAN).generate_with_rng(&c, rng).is_err());
    }

    #[test]
    fn string_methods_are_parsed() {
        let c = three_rotations();
        let opts = SigmaOptions::default();
        let err = generate_training_circuits(&c, 1, 0.0, "bogus", "closest", &opts).unwrap_err();
        assert!(matches!(err, TrainError::InvalidArgument(_)));
        let err = generate_training_circuits(&c, 1, 0.0, "random", "bogus", &opts).unwrap_err();
        assert!(matches!(err, TrainError::InvalidArgument(_)));
        assert!(generate_training_circuits(&c, 1, 0.0, "probabilistic", "nearest", &opts).is_ok());
    }

    #[test]
    fn into_parts_returns_parallel_sequences() {
        let mut c = Circuit::with_size("s", 1, 0);
        c.rz(FRAC_PI_4, QubitId(0)).unwrap();
        let (circuits, original, replaced) = TrainingSetGenerator::new(3, 0.0)
            .generate_with_rng(&c, StdRng::seed_from_u64(31))
            .unwrap()
            .into_parts();
        assert_eq!(circuits.len(), 3);
        assert_eq!(original, vec![vec![FRAC_PI_4]; 3]);
        assert!(replaced.iter().all(|r| r[0] == 0.0 || r[0] == FRAC_PI_2));
    }

    fn t_t_s() -> Circuit {
        let mut c = Circuit::with_size("tts", 1, 0);
        c.t(QubitId(0)).unwrap().t(QubitId(0)).unwrap().s(QubitId(0)).unwrap();
        c
    }

    #[test]
    fn t_gates_are_counted() {
        assert_eq!(count_non_cliffords(&t_t_s()), 2);
    }

    #[test]
    fn t_gates_survive_when_all_are_kept() {
        let set = TrainingSetGenerator::new(1, 1.0)
            .generate_with_rng(&t_t_s(), StdRng::seed_from_u64(32))
            .unwrap();
        assert!(set.dropped.is_empty());
        assert!(set.replaced_angles[0].is_empty());
        assert_eq!(set.circuits[0].num_ops(), 3);
        assert_eq!(count_non_cliffords(&set.circuits[0]), 2);
    }

    #[test]
    fn t_gates_are_rewritten_to_clifford_rotations() {
        let set = TrainingSetGenerator::new(4, 0.0)
            .generate_with_rng(&t_t_s(), StdRng::seed_from_u64(33))
            .unwrap();
        for (circuit, original) in set.circuits.iter().zip(&set.original_angles) {
            assert_eq!(original, &vec![FRAC_PI_4, FRAC_PI_4]);
            assert_eq!(circuit.num_ops(), 3);
            assert_eq!(count_non_cliffords(circuit), 0);
            assert!(circuit.instructions().iter().all(|inst| inst.name() == "rz"));
        }
    }
}
