//! Rewrites JSX `className` attributes into `style` values resolved from imported stylesheets.
//!
//! ```js
//! import './app.css';
//! render(<div className="header" />);
//! ```
//!
//! becomes
//!
//! ```js
//! import appStyleSheet from './app.css';
//! var _styleSheet = appStyleSheet;
//! render(<div style={_styleSheet["header"]} />);
//! ```
//!
//! Modules without a side-effect stylesheet import are left untouched.
use swc_core::common::Mark;
use swc_core::ecma::ast::{JSXOpeningElement, Module};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

pub mod catalog;
pub mod classify;
pub mod config;
pub mod imports;
pub mod resolve;

pub use config::{ConfigError, EnvironmentMode, JsxStylesheetConfig};

use crate::catalog::{module_prelude, HelperInjectionFlags};
use crate::classify::classify_attributes;
use crate::imports::{normalize_imports, StylesheetAccessor};
use crate::resolve::{rewrite_attributes, ResolveContext};

/// Runs the stylesheet pass over one module.
///
/// The visitor holds no state across modules; reuse is allowed but each module is processed from
/// scratch.
pub struct JsxStylesheetVisitor {
  unresolved_mark: Mark,
  config: JsxStylesheetConfig,
  transformed: bool,
}

impl JsxStylesheetVisitor {
  pub fn new(unresolved_mark: Mark, config: JsxStylesheetConfig) -> Self {
    JsxStylesheetVisitor {
      unresolved_mark,
      config,
      transformed: false,
    }
  }

  /// Whether the last visited module was rewritten
  pub fn transformed(&self) -> bool {
    self.transformed
  }
}

impl VisitMut for JsxStylesheetVisitor {
  #[tracing::instrument(level = "debug", skip_all)]
  fn visit_mut_module(&mut self, module: &mut Module) {
    self.transformed = false;

    let Some(normalized) = normalize_imports(&mut module.body, &self.config) else {
      return;
    };

    let mut flags = HelperInjectionFlags::default();
    if normalized.accessor.needs_merge_helper() {
      flags.require_merge_helper();
    }

    let mut rewriter = ElementRewriter {
      context: ResolveContext {
        config: &self.config,
        unresolved_mark: self.unresolved_mark,
        flags: &mut flags,
      },
      rewritten: 0,
    };
    module.body.visit_mut_with(&mut rewriter);
    let rewritten = rewriter.rewritten;

    tracing::debug!(
      rewritten,
      needs_merge_helper = flags.needs_merge_helper,
      needs_get_style_helper = flags.needs_get_style_helper,
      "Resolved className attributes"
    );

    insert_prelude(module, normalized.insert_at, flags, &normalized.accessor);
    self.transformed = true;
  }
}

/// Put the helpers and the `_styleSheet` binding right after the import block.
fn insert_prelude(
  module: &mut Module,
  insert_at: usize,
  flags: HelperInjectionFlags,
  accessor: &StylesheetAccessor,
) {
  let prelude = module_prelude(flags, accessor.to_expr());
  module.body.splice(insert_at..insert_at, prelude);
}

/// Depth-first walk over every JSX element of a module, classifying then rewriting attributes.
struct ElementRewriter<'a> {
  context: ResolveContext<'a>,
  rewritten: usize,
}

impl VisitMut for ElementRewriter<'_> {
  fn visit_mut_jsx_opening_element(&mut self, element: &mut JSXOpeningElement) {
    if let Some(classification) = classify_attributes(&element.attrs) {
      let attrs = std::mem::take(&mut element.attrs);
      element.attrs = rewrite_attributes(attrs, classification, &mut self.context);
      self.rewritten += 1;
    }

    element.visit_mut_children_with(self);
  }
}
