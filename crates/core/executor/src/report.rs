use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::{Add, AddAssign},
};

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};
use sha3_rocc_primitives::consts::num_to_comma_separated;

use crate::{AcceleratorOp, Charge};

/// A report of everything an [`crate::Accelerator`] has executed.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceleratorReport {
    /// The number of instructions executed, per operation.
    pub op_counts: EnumMap<AcceleratorOp, u64>,
    /// The cycles charged, per operation.
    pub op_cycles: EnumMap<AcceleratorOp, u64>,
    /// The total number of permutations performed.
    pub permutations: u64,
    /// The total number of message bytes absorbed.
    pub bytes_absorbed: u64,
    /// The total number of output bytes squeezed.
    pub bytes_squeezed: u64,
}

impl AcceleratorReport {
    /// Compute the total number of instructions executed.
    #[must_use]
    pub fn total_instruction_count(&self) -> u64 {
        self.op_counts.values().sum()
    }

    /// Compute the total number of cycles charged.
    #[must_use]
    pub fn total_cycles(&self) -> u64 {
        self.op_cycles.values().sum()
    }

    /// Records one executed instruction.
    pub(crate) fn record(&mut self, op: AcceleratorOp, len: usize, charge: Charge) {
        self.op_counts[op] += 1;
        self.op_cycles[op] += charge.cycles;
        self.permutations += charge.permutations as u64;
        match op {
            AcceleratorOp::Absorb => self.bytes_absorbed += len as u64,
            AcceleratorOp::Squeeze => self.bytes_squeezed += len as u64,
            AcceleratorOp::Configure => {}
        }
    }
}

impl AddAssign for AcceleratorReport {
    fn add_assign(&mut self, rhs: Self) {
        for (op, count) in rhs.op_counts {
            self.op_counts[op] += count;
        }
        for (op, cycles) in rhs.op_cycles {
            self.op_cycles[op] += cycles;
        }
        self.permutations += rhs.permutations;
        self.bytes_absorbed += rhs.bytes_absorbed;
        self.bytes_squeezed += rhs.bytes_squeezed;
    }
}

impl Add for AcceleratorReport {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl Display for AcceleratorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "instruction counts ({} total instructions):", self.total_instruction_count())?;
        for line in sorted_table_lines(&self.op_counts) {
            writeln!(f, "  {line}")?;
        }

        writeln!(f, "cycles ({} total cycles):", num_to_comma_separated(self.total_cycles()))?;
        for line in sorted_table_lines(&self.op_cycles) {
            writeln!(f, "  {line}")?;
        }

        writeln!(f, "permutations: {}", num_to_comma_separated(self.permutations))?;
        writeln!(f, "bytes absorbed: {}", num_to_comma_separated(self.bytes_absorbed))?;
        writeln!(f, "bytes squeezed: {}", num_to_comma_separated(self.bytes_squeezed))?;

        Ok(())
    }
}

/// Returns `"<count> <op>"` lines sorted by descending count, with the counts right-aligned.
fn sorted_table_lines(table: &EnumMap<AcceleratorOp, u64>) -> Vec<String> {
    let mut entries = table.iter().filter(|&(_, &v)| v > 0).collect::<Vec<_>>();
    entries.sort_by(|(ka, va), (kb, vb)| vb.cmp(va).then_with(|| ka.cmp(kb)));

    let width = entries.first().map_or(0, |(_, v)| num_to_comma_separated(**v).len());
    entries
        .into_iter()
        .map(|(op, count)| format!("{:>width$} {op}", num_to_comma_separated(*count)))
        .collect()
}
