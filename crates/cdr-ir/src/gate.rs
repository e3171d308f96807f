//! Gate set of the circuit representation.

use serde::{Deserialize, Serialize};

/// Named gates.
///
/// Rotation angles are concrete radians; the training-circuit generator
/// only ever needs bound values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", content = "angle", rename_all = "lowercase")]
pub enum StandardGate {
    /// Identity.
    I,
    /// Pauli X (bit flip).
    X,
    /// Pauli Y.
    Y,
    /// Pauli Z (phase flip).
    Z,
    /// Hadamard.
    H,
    /// Phase gate, `Rz(π/2)` up to global phase.
    S,
    /// Inverse phase gate.
    Sdg,
    /// π/8 gate; the canonical non-Clifford gate.
    T,
    /// Inverse π/8 gate.
    Tdg,
    /// Square root of X.
    SX,
    /// `exp(-iθX/2)`.
    Rx(f64),
    /// `exp(-iθY/2)`.
    Ry(f64),
    /// `exp(-iθZ/2)`; Clifford exactly when θ is a multiple of π/2.
    Rz(f64),
    /// CNOT, operands `[control, target]`.
    CX,
    /// Controlled Z.
    CZ,
    /// Exchange two qubits.
    Swap,
    /// Toffoli, operands `[control, control, target]`.
    CCX,
}

impl StandardGate {
    /// Lowercase mnemonic.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CCX => "ccx",
        }
    }

    /// Arity.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,
            StandardGate::CCX => 3,
            _ => 1,
        }
    }

    /// Rotation angle, for the parameterized gates.
    #[inline]
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(theta) | StandardGate::Ry(theta) | StandardGate::Rz(theta) => {
                Some(*theta)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn arity_and_names() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
        assert_eq!(StandardGate::Rz(PI).name(), "rz");
    }

    #[test]
    fn rotation_angles() {
        assert_eq!(StandardGate::Rz(0.25).angle(), Some(0.25));
        assert_eq!(StandardGate::Rx(PI / 2.0).angle(), Some(PI / 2.0));
        assert_eq!(StandardGate::CX.angle(), None);
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_string(&StandardGate::Rz(0.5)).unwrap();
        assert_eq!(json, r#"{"gate":"rz","angle":0.5}"#);
        let back: StandardGate = serde_json::from_str(r#"{"gate":"cx"}"#).unwrap();
        assert_eq!(back, StandardGate::CX);
    }
}
