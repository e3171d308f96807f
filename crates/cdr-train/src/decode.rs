//! Reassembly of record tables into circuits.

use cdr_ir::Circuit;

use crate::encode::GateRecord;
use crate::error::TrainResult;

/// Concatenate record groups and restore input order.
///
/// The sort is stable and keyed on `order` alone.
pub fn merge_records<I>(groups: I) -> Vec<GateRecord>
where
    I: IntoIterator<Item = Vec<GateRecord>>,
{
    let mut merged: Vec<GateRecord> = groups.into_iter().flatten().collect();
    merged.sort_by_key(|r| r.order);
    debug_assert!(
        merged.windows(2).all(|w| w[0].order < w[1].order),
        "record orders must be unique"
    );
    merged
}

/// Replay `records` onto a fresh copy of `template`.
pub fn rebuild_circuit(records: &[GateRecord], template: &Circuit) -> TrainResult<Circuit> {
    let mut circuit = template.empty_copy();
    for record in records {
        circuit.append(record.to_instruction())?;
    }
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_lenient;
    use cdr_ir::{ClbitId, QubitId};

    #[test]
    fn merge_restores_input_order() {
        let mut c = Circuit::with_size("m", 2, 1);
        c.rz(0.3, QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .rz(1.1, QubitId(1))
            .unwrap()
            .measure(QubitId(1), ClbitId(0))
            .unwrap();
        let encoded = encode_lenient(&c);
        let (fixed, moving) = encoded.partition();
        let merged = merge_records([moving.into_iter().rev().collect(), fixed]);
        let orders: Vec<usize> = merged.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);

        let rebuilt = rebuild_circuit(&merged, &encoded.template).unwrap();
        assert_eq!(rebuilt, c);
    }

    #[test]
    fn rebuild_of_nothing_is_the_template() {
        let template = Circuit::with_size("t", 3, 2);
        let rebuilt = rebuild_circuit(&[], &template).unwrap();
        assert_eq!(rebuilt, template);
    }
}
