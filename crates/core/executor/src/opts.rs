use crate::CostModel;

const DEFAULT_REQUIRE_CAPACITY: bool = false;

/// Options for an [`crate::Accelerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceleratorOpts {
    /// The latency model used to charge each instruction.
    pub cost: CostModel,
    /// Reject `configure` with a rate of 200 bytes, which leaves no capacity.
    pub require_capacity: bool,
}

impl Default for AcceleratorOpts {
    fn default() -> Self {
        Self { cost: CostModel::default(), require_capacity: DEFAULT_REQUIRE_CAPACITY }
    }
}

impl AcceleratorOpts {
    /// The default options, with `SHA3_ROCC_REQUIRE_CAPACITY` overriding `require_capacity`.
    #[must_use]
    pub fn from_env() -> Self {
        let require_capacity = std::env::var("SHA3_ROCC_REQUIRE_CAPACITY")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(DEFAULT_REQUIRE_CAPACITY);
        Self { require_capacity, ..Self::default() }
    }
}
