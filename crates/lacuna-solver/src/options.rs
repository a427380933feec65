/// Toggles for the solver's optimization layers.
///
/// Both layers are on by default. Turning one off is mainly useful for
/// measuring how much it contributes on a given puzzle; the solver stays
/// correct in every combination.
///
/// # Examples
///
/// ```
/// use lacuna_solver::SolverOptions;
///
/// let options = SolverOptions {
///     fast_path: false,
///     ..SolverOptions::new()
/// };
/// assert!(options.deduction);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    /// Narrow candidate sets with the hidden-single deduction.
    pub deduction: bool,
    /// Run the fast-path propagator before the search.
    pub fast_path: bool,
}

impl SolverOptions {
    /// Creates options with every optimization enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            deduction: true,
            fast_path: true,
        }
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self::new()
    }
}
