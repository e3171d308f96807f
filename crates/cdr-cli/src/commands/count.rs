//! Count command implementation.

use anyhow::Result;
use console::style;
use std::path::Path;

use cdr_train::{count_non_cliffords, encode_lenient};

use super::common::load_circuit;

/// Execute the count command.
pub fn execute(input: &Path) -> Result<()> {
    let circuit = load_circuit(input)?;
    let count = count_non_cliffords(&circuit);

    let dropped = encode_lenient(&circuit).dropped;
    if !dropped.is_empty() {
        eprintln!(
            "{} {} instruction(s) outside the training basis ignored",
            style("!").yellow().bold(),
            dropped.len()
        );
    }

    println!("{count}");
    Ok(())
}
