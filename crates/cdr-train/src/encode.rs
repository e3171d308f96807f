//! Circuit encoder: flattens a circuit into an ordered table of gate records.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use cdr_ir::{Circuit, Instruction, InstructionKind, QubitId, StandardGate};

use crate::clifford::{CLIFFORD_TOLERANCE, is_clifford_angle};
use crate::error::{TrainError, TrainResult};

/// Gate kinds recognised by the training-circuit generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// `Rz(θ)` and the fixed Z-axis phase gates (`Z`, `S`, `T` and their
    /// inverses); the only kind whose angle is ever rewritten.
    PhaseRotationZ,
    /// `Rx(π/2)` or `SX`.
    HalfTurnRotationX,
    /// Pauli X.
    PauliX,
    /// CNOT.
    ControlledNot,
    /// Measurement, replayed verbatim.
    Measurement,
}

/// Qubit operands of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    /// A single-qubit instruction, or the first qubit of a measurement.
    Single(QubitId),
    /// A two-qubit controlled instruction.
    Pair {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
}

/// One recognised instruction of the input circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct GateRecord {
    /// Position of the instruction in the input circuit.
    pub order: usize,
    /// What the instruction is.
    pub kind: GateKind,
    /// Rotation angle (`Rz` and `Rx` only).
    pub angle: Option<f64>,
    /// Qubits the instruction acts on.
    pub qubits: Operands,
    /// The instruction exactly as it appeared in the input.
    pub native: Instruction,
}

impl GateRecord {
    /// An `Rz` record whose angle is not Clifford.
    pub fn is_non_clifford_rotation(&self) -> bool {
        self.kind == GateKind::PhaseRotationZ && self.angle.is_some_and(|a| !is_clifford_angle(a))
    }

    /// A copy of this record carrying a different angle.
    #[must_use]
    pub fn with_angle(&self, angle: f64) -> Self {
        Self {
            angle: Some(angle),
            ..self.clone()
        }
    }

    /// The instruction this record replays into a rebuilt circuit.
    ///
    /// Measurements, and any record whose fields do not fit its kind, replay
    /// the retained native instruction.
    pub fn to_instruction(&self) -> Instruction {
        match (self.kind, self.angle, self.qubits) {
            (GateKind::PhaseRotationZ, Some(theta), Operands::Single(q)) => {
                Instruction::single_qubit_gate(StandardGate::Rz(theta), q)
            }
            (GateKind::HalfTurnRotationX, _, Operands::Single(q)) => {
                Instruction::single_qubit_gate(StandardGate::Rx(FRAC_PI_2), q)
            }
            (GateKind::PauliX, _, Operands::Single(q)) => {
                Instruction::single_qubit_gate(StandardGate::X, q)
            }
            (GateKind::ControlledNot, _, Operands::Pair { control, target }) => {
                Instruction::two_qubit_gate(StandardGate::CX, control, target)
            }
            _ => self.native.clone(),
        }
    }
}

/// What to do with instructions outside the training basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedGatePolicy {
    /// Leave them out of the rebuilt circuits, logging a warning for each.
    #[default]
    Drop,
    /// Reject the circuit with [`TrainError::UnsupportedGate`].
    Error,
}

impl FromStr for UnsupportedGatePolicy {
    type Err = TrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "error" => Ok(Self::Error),
            other => Err(TrainError::invalid(format!(
                "unsupported-gate policy must be \"drop\" or \"error\", got \"{other}\""
            ))),
        }
    }
}

impl fmt::Display for UnsupportedGatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Drop => "drop",
            Self::Error => "error",
        })
    }
}

/// An input instruction left out of the record table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedInstruction {
    /// Position in the input circuit.
    pub position: usize,
    /// Instruction name.
    pub name: String,
}

/// Output of the encoder.
#[derive(Debug, Clone)]
pub struct EncodedCircuit {
    /// Recognised instructions, ascending by `order`.
    pub records: Vec<GateRecord>,
    /// Empty circuit with the input's name and bit layout.
    pub template: Circuit,
    /// Instructions that were not recognised.
    pub dropped: Vec<DroppedInstruction>,
}

impl EncodedCircuit {
    /// Split the records into those kept verbatim (non-rotations and
    /// Clifford rotations) and the non-Clifford `Rz` rotations.
    pub fn partition(&self) -> (Vec<GateRecord>, Vec<GateRecord>) {
        self.records
            .iter()
            .cloned()
            .partition(|r| !r.is_non_clifford_rotation())
    }
}

fn is_half_turn(theta: f64) -> bool {
    let diff = (theta - FRAC_PI_2).rem_euclid(TAU);
    diff.min(TAU - diff) < CLIFFORD_TOLERANCE
}

/// Angle of a gate that is a phase rotation about Z.
fn z_phase(gate: &StandardGate) -> Option<f64> {
    match gate {
        StandardGate::Rz(theta) => Some(*theta),
        StandardGate::Z => Some(PI),
        StandardGate::S => Some(FRAC_PI_2),
        StandardGate::Sdg => Some(-FRAC_PI_2),
        StandardGate::T => Some(FRAC_PI_4),
        StandardGate::Tdg => Some(-FRAC_PI_4),
        _ => None,
    }
}

fn classify(inst: &Instruction) -> Option<(GateKind, Option<f64>, Operands)> {
    match (&inst.kind, inst.qubits.as_slice()) {
        (InstructionKind::Gate(gate), &[q]) if z_phase(gate).is_some() => {
            Some((GateKind::PhaseRotationZ, z_phase(gate), Operands::Single(q)))
        }
        (InstructionKind::Gate(StandardGate::Rx(theta)), &[q]) if is_half_turn(*theta) => Some((
            GateKind::HalfTurnRotationX,
            Some(FRAC_PI_2),
            Operands::Single(q),
        )),
        (InstructionKind::Gate(StandardGate::SX), &[q]) => Some((
            GateKind::HalfTurnRotationX,
            Some(FRAC_PI_2),
            Operands::Single(q),
        )),
        (InstructionKind::Gate(StandardGate::X), &[q]) => {
            Some((GateKind::PauliX, None, Operands::Single(q)))
        }
        (InstructionKind::Gate(StandardGate::CX), &[control, target]) => Some((
            GateKind::ControlledNot,
            None,
            Operands::Pair { control, target },
        )),
        (InstructionKind::Measure, &[first, ..]) => {
            Some((GateKind::Measurement, None, Operands::Single(first)))
        }
        _ => None,
    }
}

/// Encode `circuit`, recording every unrecognised instruction in
/// [`EncodedCircuit::dropped`].
pub fn encode_lenient(circuit: &Circuit) -> EncodedCircuit {
    let mut records = Vec::with_capacity(circuit.num_ops());
    let mut dropped = Vec::new();

    for (order, inst) in circuit.instructions().iter().enumerate() {
        match classify(inst) {
            Some((kind, angle, qubits)) => records.push(GateRecord {
                order,
                kind,
                angle,
                qubits,
                native: inst.clone(),
            }),
            None => dropped.push(DroppedInstruction {
                position: order,
                name: inst.name().to_string(),
            }),
        }
    }

    EncodedCircuit {
        records,
        template: circuit.empty_copy(),
        dropped,
    }
}

/// Encode `circuit`, handling unrecognised instructions per `policy`.
pub fn encode_circuit(
    circuit: &Circuit,
    policy: UnsupportedGatePolicy,
) -> TrainResult<EncodedCircuit> {
    let encoded = encode_lenient(circuit);

    match (policy, encoded.dropped.first()) {
        (_, None) => {}
        (UnsupportedGatePolicy::Error, Some(first)) => {
            return Err(TrainError::UnsupportedGate {
                name: first.name.clone(),
                position: first.position,
            });
        }
        (UnsupportedGatePolicy::Drop, Some(_)) => {
            for d in &encoded.dropped {
                warn!(
                    position = d.position,
                    name = %d.name,
                    "instruction outside the training basis will be dropped"
                );
            }
        }
    }

    Ok(encoded)
}
