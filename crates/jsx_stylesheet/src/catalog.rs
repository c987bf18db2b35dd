//! Fixed code fragments injected into transformed modules.
//!
//! Every fragment is parameterless and lands at most once per module, after the import block, in
//! the order: merge helper, get-style helper, `_styleSheet` binding.
use swc_core::ecma::ast::{Expr, ModuleItem, Stmt};
use swc_core::quote;

/// Local binding holding the module's resolved stylesheet
pub const STYLE_SHEET_BINDING: &str = "_styleSheet";
pub const MERGE_STYLES_HELPER: &str = "_mergeStyles";
pub const GET_STYLE_HELPER: &str = "_getStyle";

pub const CLASS_NAME_ATTRIBUTE: &str = "className";
pub const STYLE_ATTRIBUTE: &str = "style";
/// Development-only attribute keeping the author-written class names around for tooling
pub const DEBUG_CLASS_NAME_ATTRIBUTE: &str = "__class";

/// Suffix appended to the camel-cased file stem of a side-effect stylesheet import
pub const STYLE_SHEET_NAME_SUFFIX: &str = "StyleSheet";

/// Which helpers the current module needs. Flags only ever go from `false` to `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HelperInjectionFlags {
  pub needs_merge_helper: bool,
  pub needs_get_style_helper: bool,
}

impl HelperInjectionFlags {
  pub fn require_merge_helper(&mut self) {
    self.needs_merge_helper = true;
  }

  pub fn require_get_style_helper(&mut self) {
    self.needs_get_style_helper = true;
  }
}

/// `_mergeStyles(...sheets)`
///
/// Shallow union of class name to style mappings. When several sheets define the same class, the
/// right-most one wins: `_mergeStyles({a: A1}, {a: A2, b: B})` is `{a: A2, b: B}`.
pub fn merge_styles_helper() -> Stmt {
  quote!(
    r#"
    function _mergeStyles(...sheets) {
      var merged = {};
      for (var index = 0; index < sheets.length; index++) {
        var sheet = sheets[index];
        for (var name in sheet) {
          if (Object.prototype.hasOwnProperty.call(sheet, name)) {
            merged[name] = sheet[name];
          }
        }
      }
      return merged;
    }
    "# as Stmt
  )
}

/// `_getStyle(value)`
///
/// Resolves a class name value at runtime against `_styleSheet`:
///
/// * a string is split on whitespace and every class is looked up and combined left to right
/// * an array resolves each item recursively and combines them left to right
/// * any other non-null object is a class map: the own keys with truthy values are looked up in
///   iteration order, so `{active: items.length}` applies `active` when the list is not empty
/// * anything else, numbers and `null` included, is returned unchanged
///
/// With `_styleSheet = {header1: A, header2: B, header3: C, active: D}`,
/// `_getStyle(['header1 header2', 'header3', {active: true}])` is `Object.assign({}, A, B, C, D)`.
pub fn get_style_helper() -> Stmt {
  quote!(
    r#"
    function _getStyle(value) {
      if (typeof value === "string") {
        return value.split(/\s+/).reduce(function(style, name) {
          return name ? Object.assign(style, _styleSheet[name]) : style;
        }, {});
      }
      if (Array.isArray(value)) {
        return value.reduce(function(style, item) {
          return Object.assign(style, _getStyle(item));
        }, {});
      }
      if (value !== null && typeof value === "object") {
        return Object.keys(value).reduce(function(style, name) {
          return value[name] ? Object.assign(style, _styleSheet[name]) : style;
        }, {});
      }
      return value;
    }
    "# as Stmt
  )
}

/// `var _styleSheet = <accessor>;`
pub fn style_sheet_binding(accessor: Expr) -> Stmt {
  quote!(
    "var _styleSheet = $accessor;" as Stmt,
    accessor: Expr = accessor
  )
}

/// Statements to insert after the import block, in injection order.
pub fn module_prelude(flags: HelperInjectionFlags, accessor: Expr) -> Vec<ModuleItem> {
  let mut prelude = Vec::with_capacity(3);

  if flags.needs_merge_helper {
    prelude.push(ModuleItem::Stmt(merge_styles_helper()));
  }
  if flags.needs_get_style_helper {
    prelude.push(ModuleItem::Stmt(get_style_helper()));
  }
  prelude.push(ModuleItem::Stmt(style_sheet_binding(accessor)));

  prelude
}
