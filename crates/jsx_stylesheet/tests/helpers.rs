use boa_engine::{Context, Source};
use jsx_stylesheet::catalog::{get_style_helper, merge_styles_helper};
use jsx_stylesheet_swc_runner::test_utils::{run_test_visit, RunTestContext};
use pretty_assertions::assert_eq;
use swc_core::ecma::ast::{Module, ModuleItem};
use swc_core::ecma::visit::VisitMut;

const STYLE_SHEET: &str = r#"
var _styleSheet = {
  header1: { a: 1 },
  header2: { b: 2 },
  header3: { c: 3 },
  active: { d: 4 },
};
"#;

struct AppendHelpers;

impl VisitMut for AppendHelpers {
  fn visit_mut_module(&mut self, module: &mut Module) {
    module.body.push(ModuleItem::Stmt(merge_styles_helper()));
    module.body.push(ModuleItem::Stmt(get_style_helper()));
  }
}

fn helpers_source() -> String {
  run_test_visit("", |_: RunTestContext| AppendHelpers).output_code
}

/// Evaluate `expr` next to the injected helpers and return it as JSON.
fn eval_json(expr: &str) -> String {
  let source = format!(
    "{STYLE_SHEET}\n{}\nJSON.stringify({expr});",
    helpers_source()
  );
  let mut context = Context::default();
  let value = context
    .eval(Source::from_bytes(source.as_bytes()))
    .unwrap_or_else(|error| panic!("{expr}: {error}"));

  value
    .to_string(&mut context)
    .unwrap()
    .to_std_string_escaped()
}

#[test]
fn merge_styles_right_most_wins() {
  assert_eq!(
    eval_json("_mergeStyles({ a: { x: 1 } }, { a: { x: 2 }, b: { y: 1 } })"),
    r#"{"a":{"x":2},"b":{"y":1}}"#
  );
  assert_eq!(eval_json("_mergeStyles({ a: 1 })"), r#"{"a":1}"#);
  assert_eq!(eval_json("_mergeStyles()"), "{}");
}

#[test]
fn get_style_resolves_class_lists() {
  assert_eq!(
    eval_json("_getStyle(['header1 header2', 'header3', { active: true }])"),
    r#"{"a":1,"b":2,"c":3,"d":4}"#
  );
}

#[test]
fn get_style_splits_strings_on_whitespace() {
  assert_eq!(
    eval_json("_getStyle(' header1   header3 ')"),
    r#"{"a":1,"c":3}"#
  );
  assert_eq!(eval_json("_getStyle('')"), "{}");
}

#[test]
fn get_style_uses_truthy_keys_of_class_maps() {
  assert_eq!(eval_json("_getStyle({ active: 3 })"), r#"{"d":4}"#);
  assert_eq!(
    eval_json("_getStyle({ header1: '', header2: 'yes', active: false })"),
    r#"{"b":2}"#
  );
  assert_eq!(
    eval_json("_getStyle(['header1', { active: 1 }])"),
    r#"{"a":1,"d":4}"#
  );
}

#[test]
fn get_style_passes_other_values_through() {
  assert_eq!(eval_json("_getStyle(3)"), "3");
  assert_eq!(eval_json("_getStyle(null)"), "null");
  assert_eq!(eval_json("_getStyle(true)"), "true");
}
