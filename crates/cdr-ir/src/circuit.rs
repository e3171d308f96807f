//! High-level circuit builder API.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// A quantum circuit.
///
/// Instructions are stored in execution order. Every appended instruction
/// is checked against the qubit and classical-bit layout, so a `Circuit`
/// value never references a bit it does not own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircuitRepr")]
pub struct Circuit {
    name: String,
    qubits: Vec<Qubit>,
    clbits: Vec<Clbit>,
    instructions: Vec<Instruction>,
}

/// Unvalidated wire form of a [`Circuit`].
#[derive(Deserialize)]
struct CircuitRepr {
    name: String,
    qubits: Vec<Qubit>,
    #[serde(default)]
    clbits: Vec<Clbit>,
    #[serde(default)]
    instructions: Vec<Instruction>,
}

impl TryFrom<CircuitRepr> for Circuit {
    type Error = IrError;

    fn try_from(repr: CircuitRepr) -> Result<Self, Self::Error> {
        let mut circuit = Circuit {
            name: repr.name,
            qubits: repr.qubits,
            clbits: repr.clbits,
            instructions: Vec::with_capacity(repr.instructions.len()),
        };
        for inst in repr.instructions {
            circuit.append(inst)?;
        }
        Ok(circuit)
    }
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    fn next_qubit_id(&self) -> QubitId {
        QubitId(self.qubits.iter().map(|q| q.id.0 + 1).max().unwrap_or(0))
    }

    fn next_clbit_id(&self) -> ClbitId {
        ClbitId(self.clbits.iter().map(|c| c.id.0 + 1).max().unwrap_or(0))
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = self.next_qubit_id();
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = self.next_qubit_id();
                self.qubits.push(Qubit::with_register(id, &name, i));
                id
            })
            .collect()
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = self.next_clbit_id();
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = self.next_clbit_id();
                self.clbits.push(Clbit::with_register(id, &name, i));
                id
            })
            .collect()
    }

    /// Append an instruction after checking its operands against the layout.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check_operands(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn check_operands(&self, inst: &Instruction) -> IrResult<()> {
        let context = || Some(inst.name().to_string());

        if let InstructionKind::Gate(gate) = &inst.kind {
            let got = inst.qubits.len() as u32;
            if got != gate.num_qubits() {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: gate.num_qubits(),
                    got,
                });
            }
        }
        if inst.is_measure() && inst.qubits.len() != inst.clbits.len() {
            return Err(IrError::MeasureArity {
                qubits: inst.qubits.len(),
                clbits: inst.clbits.len(),
            });
        }

        let mut seen = FxHashSet::default();
        for &qubit in &inst.qubits {
            if !self.qubits.iter().any(|q| q.id == qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: context(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: context(),
                });
            }
        }
        for &clbit in &inst.clbits {
            if !self.clbits.iter().any(|c| c.id == clbit) {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: context(),
                });
            }
        }
        Ok(())
    }

    fn apply_gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::gate(gate, qubits))
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::H, [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::X, [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::Y, [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::Z, [qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::S, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::T, [qubit])
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::SX, [qubit])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::Rx(theta), [qubit])
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::Ry(theta), [qubit])
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::Rz(theta), [qubit])
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::CX, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::CZ, [control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::Swap, [q1, q2])
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply_gate(StandardGate::CCX, [c1, c2, target])
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.append(Instruction::measure(qubit, clbit))
    }

    /// Measure every qubit into the classical bit with the same position,
    /// adding classical bits as needed.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.clbits.len() < self.qubits.len() {
            self.add_clbit();
        }
        let pairs: Vec<_> = self
            .qubits
            .iter()
            .zip(&self.clbits)
            .map(|(q, c)| (q.id, c.id))
            .collect();
        for (qubit, clbit) in pairs {
            self.measure(qubit, clbit)?;
        }
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::reset(qubit))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.append(Instruction::barrier(qubits))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Instructions in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Get the circuit depth (longest chain of instructions sharing a wire).
    pub fn depth(&self) -> usize {
        let mut qubit_level: FxHashMap<QubitId, usize> = FxHashMap::default();
        let mut clbit_level: FxHashMap<ClbitId, usize> = FxHashMap::default();
        let mut depth = 0;

        for inst in &self.instructions {
            let start = inst
                .qubits
                .iter()
                .map(|q| qubit_level.get(q).copied().unwrap_or(0))
                .chain(
                    inst.clbits
                        .iter()
                        .map(|c| clbit_level.get(c).copied().unwrap_or(0)),
                )
                .max()
                .unwrap_or(0);
            let level = start + 1;
            for &q in &inst.qubits {
                qubit_level.insert(q, level);
            }
            for &c in &inst.clbits {
                clbit_level.insert(c, level);
            }
            depth = depth.max(level);
        }

        depth
    }

    /// A copy with the same name and bit layout but no instructions.
    pub fn empty_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
            instructions: vec![],
        }
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a circuit from JSON, validating every instruction.
    pub fn from_json(source: &str) -> IrResult<Self> {
        let repr: CircuitRepr = serde_json::from_str(source)?;
        Circuit::try_from(repr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 4);
        let creg = circuit.add_creg("c", 2);

        assert_eq!(qreg, vec![QubitId(0), QubitId(1), QubitId(2), QubitId(3)]);
        assert_eq!(creg.len(), 2);
        assert_eq!(circuit.qubits()[2].to_string(), "q[2]");
    }

    #[test]
    fn test_fluent_api_and_depth() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .rz(PI / 4.0, QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.num_ops(), 4);
        assert_eq!(circuit.depth(), 3); // rz, cx, parallel measures
    }

    #[test]
    fn test_unknown_qubit_rejected() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        let err = circuit.x(QubitId(5)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { qubit: QubitId(5), .. }));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_arity_checked() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit
            .append(Instruction::gate(StandardGate::CX, [QubitId(0)]))
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch { expected: 2, got: 1, .. }
        ));
    }

    #[test]
    fn test_measure_all_adds_clbits() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.measure_all().unwrap();
        assert_eq!(circuit.num_clbits(), 3);
        assert_eq!(circuit.num_ops(), 3);
        assert!(circuit.instructions().iter().all(Instruction::is_measure));
    }

    #[test]
    fn test_empty_copy_keeps_layout() {
        let mut circuit = Circuit::new("layout");
        circuit.add_qreg("q", 2);
        circuit.add_creg("c", 1);
        circuit.h(QubitId(0)).unwrap();

        let empty = circuit.empty_copy();
        assert_eq!(empty.name(), "layout");
        assert_eq!(empty.qubits(), circuit.qubits());
        assert_eq!(empty.clbits(), circuit.clbits());
        assert_eq!(empty.num_ops(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut circuit = Circuit::with_size("json", 2, 1);
        circuit
            .rz(0.3, QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(1), ClbitId(0))
            .unwrap();

        let json = circuit.to_json().unwrap();
        let back = Circuit::from_json(&json).unwrap();
        assert_eq!(back, circuit);
    }

    #[test]
    fn test_json_rejects_dangling_qubit() {
        let json = r#"{
            "name": "bad",
            "qubits": [{"id": 0}],
            "instructions": [
                {"kind": {"gate": {"gate": "x"}}, "qubits": [3]}
            ]
        }"#;
        assert!(Circuit::from_json(json).is_err());
    }
}
