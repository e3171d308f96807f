//! CDR circuit representation
//!
//! A small, flat circuit IR: an ordered list of instructions over a fixed
//! qubit and classical-bit layout. It is the circuit model consumed by the
//! `cdr-train` training-circuit generator, which needs exactly four things
//! from a circuit: enumerate its instructions in execution order, inspect
//! each instruction's gate and operands, take an empty copy that keeps the
//! bit layout, and append instructions to that copy.
//!
//! # Example: Building a Near-Clifford Input
//!
//! ```rust
//! use cdr_ir::{Circuit, ClbitId, QubitId};
//! use std::f64::consts::PI;
//!
//! let mut circuit = Circuit::with_size("ansatz", 2, 1);
//! circuit
//!     .rz(PI / 4.0, QubitId(0))
//!     .unwrap()
//!     .cx(QubitId(0), QubitId(1))
//!     .unwrap()
//!     .rx(PI / 2.0, QubitId(1))
//!     .unwrap()
//!     .measure(QubitId(1), ClbitId(0))
//!     .unwrap();
//!
//! assert_eq!(circuit.num_ops(), 4);
//! assert_eq!(circuit.empty_copy().num_qubits(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I`, `X`, `Y`, `Z` | 1 | Identity and Pauli gates |
//! | `H`, `S`, `Sdg`, `T`, `Tdg`, `SX` | 1 | Fixed single-qubit gates |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates with a bound angle |
//! | `CX`, `CZ` | 2 | Controlled-X and controlled-Z |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX` | 3 | Toffoli gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
