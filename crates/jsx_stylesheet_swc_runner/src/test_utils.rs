use swc_core::ecma::visit::VisitMut;

use crate::runner::run_visit;
pub use crate::runner::{RunContext, RunVisitResult};

/// In the future this might be a different type to `RunContext`
pub type RunTestContext = RunContext;

/// Helper to test SWC visitors.
///
/// * Parse `code` with SWC
/// * Run a visitor over it
/// * Return the result
///
pub fn run_test_visit<V: VisitMut>(
  code: &str,
  make_visit: impl FnOnce(RunTestContext) -> V,
) -> RunVisitResult<V> {
  run_visit(code, make_visit).unwrap()
}

/// Print `code` back through the same parser and emitter the visitors run with.
///
/// Expected outputs written by hand go through this so they can be compared byte for byte with
/// visitor output.
pub fn normalize_code(code: &str) -> String {
  struct Noop;
  impl VisitMut for Noop {}

  run_visit(code, |_: RunTestContext| Noop)
    .unwrap()
    .output_code
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_normalize_code_matches_emitter_output() {
    assert_eq!(
      normalize_code("render(<div   className={a} />)"),
      "render(<div className={a}/>);\n"
    );
  }
}
