//! `cdr-train`: near-Clifford training circuits for Clifford data regression.
//!
//! Given a circuit over the basis {`Rz`, `Rx(π/2)`, `X`, `CX`, measure} (with
//! `Z`, `S`, `T` and their inverses read as `Rz`, and `SX` as `Rx(π/2)`), the
//! generator produces variants in which most non-Clifford `Rz` rotations
//! have been moved onto a Clifford angle (0, π/2, π or 3π/2), while
//! `floor(fraction · total)` of them keep their original angle. Such
//! circuits are cheap to simulate classically and feed the regression that
//! estimates the effect of the remaining non-Clifford content.
//!
//! Per training circuit:
//!
//! 1. **Encode** the input into ordered [`GateRecord`]s ([`encode`]).
//! 2. **Select** which non-Clifford rotations to replace ([`select`]).
//! 3. **Replace** their angles with Clifford ones ([`replace`]).
//! 4. **Rebuild** a circuit from the merged records in input order ([`decode`]).
//!
//! # Quick start
//!
//! ```rust
//! use cdr_ir::{Circuit, QubitId};
//! use cdr_train::{ReplacementMethod, SelectionMethod, TrainingSetGenerator};
//! use rand::SeedableRng;
//! use std::f64::consts::{FRAC_PI_4, PI};
//!
//! let mut circuit = Circuit::with_size("ansatz", 2, 0);
//! circuit
//!     .rz(FRAC_PI_4, QubitId(0)).unwrap()
//!     .cx(QubitId(0), QubitId(1)).unwrap()
//!     .rz(PI, QubitId(1)).unwrap();
//!
//! let set = TrainingSetGenerator::new(4, 0.0)
//!     .with_selection(SelectionMethod::Random)
//!     .with_replacement(ReplacementMethod::Closest)
//!     .generate_with_rng(&circuit, rand::rngs::StdRng::seed_from_u64(1))
//!     .unwrap();
//!
//! assert_eq!(set.len(), 4);
//! assert!(set.circuits.iter().all(|c| cdr_train::count_non_cliffords(c) == 0));
//! ```

pub mod clifford;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod replace;
mod sampling;
pub mod select;
pub mod training;

pub use clifford::{
    CLIFFORD_ANGLES, CLIFFORD_TOLERANCE, DEFAULT_SIGMA, angle_distance_weights, closest_clifford,
    is_clifford_angle, is_clifford_angle_with_tolerance, probabilistic_clifford, random_clifford,
};
pub use config::TrainingConfig;
pub use encode::{
    DroppedInstruction, EncodedCircuit, GateKind, GateRecord, Operands, UnsupportedGatePolicy,
    encode_circuit, encode_lenient,
};
pub use error::{TrainError, TrainResult};
pub use options::{ResolvedSigmas, SigmaOptions};
pub use replace::{Replacement, ReplacementMethod};
pub use select::SelectionMethod;
pub use training::{
    TrainingSet, TrainingSetGenerator, count_non_cliffords, generate_training_circuits,
    generate_training_circuits_with_rng,
};
