use swc_core::atoms::Atom;
use swc_core::ecma::ast::{
  Expr, JSXAttr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXExpr, Lit, Tpl,
};

use crate::catalog::{CLASS_NAME_ATTRIBUTE, STYLE_ATTRIBUTE};

/// Syntactic form of a `className` value. Nothing is evaluated.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassNameValueShape {
  /// `className=""`, whitespace only, or no usable value at all
  Empty,
  /// Class tokens of a literal string, in source order, duplicates kept
  StaticStringLiteral(Vec<Atom>),
  /// Anything else, resolved at runtime
  DynamicExpression(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum StyleAttributeState {
  Absent,
  Present(Box<Expr>),
}

impl StyleAttributeState {
  pub fn is_array_literal(&self) -> bool {
    matches!(self, StyleAttributeState::Present(expr) if expr.is_array())
  }
}

/// Read-only view of one element's `className` and `style` attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
  pub class_name_index: usize,
  pub class_name: ClassNameValueShape,
  /// Position of a `style` attribute, even when it holds no expression
  pub style_index: Option<usize>,
  pub style: StyleAttributeState,
}

/// Classify an element's attributes. `None` means the element has no `className` attribute and
/// is left alone.
///
/// When an attribute is repeated the last occurrence wins, as it would at runtime.
pub fn classify_attributes(attrs: &[JSXAttrOrSpread]) -> Option<Classification> {
  let mut class_name = None;
  let mut style = None;

  for (index, attr) in attrs.iter().enumerate() {
    let JSXAttrOrSpread::JSXAttr(attr) = attr else {
      continue;
    };

    match attribute_name(attr) {
      Some(CLASS_NAME_ATTRIBUTE) => class_name = Some((index, attr)),
      Some(STYLE_ATTRIBUTE) => style = Some((index, attr)),
      _ => {}
    }
  }

  let (class_name_index, class_name_attr) = class_name?;

  let style_state = match style.and_then(|(_, attr)| attribute_expr(attr)) {
    Some(expr) => StyleAttributeState::Present(Box::new(expr)),
    None => StyleAttributeState::Absent,
  };

  Some(Classification {
    class_name_index,
    class_name: classify_class_name(class_name_attr),
    style_index: style.map(|(index, _)| index),
    style: style_state,
  })
}

fn attribute_name(attr: &JSXAttr) -> Option<&str> {
  match &attr.name {
    JSXAttrName::Ident(ident) => Some(ident.sym.as_ref()),
    JSXAttrName::JSXNamespacedName(_) => None,
  }
}

/// The expression an attribute value stands for; `None` for valueless attributes.
fn attribute_expr(attr: &JSXAttr) -> Option<Expr> {
  match attr.value.as_ref()? {
    JSXAttrValue::Lit(lit) => Some(Expr::Lit(lit.clone())),
    JSXAttrValue::JSXExprContainer(container) => match &container.expr {
      JSXExpr::Expr(expr) => Some(*expr.clone()),
      JSXExpr::JSXEmptyExpr(_) => None,
    },
    JSXAttrValue::JSXElement(element) => Some(Expr::JSXElement(element.clone())),
    JSXAttrValue::JSXFragment(fragment) => Some(Expr::JSXFragment(fragment.clone())),
  }
}

fn classify_class_name(attr: &JSXAttr) -> ClassNameValueShape {
  let Some(expr) = attribute_expr(attr) else {
    return ClassNameValueShape::Empty;
  };

  let Some(value) = static_string(&expr) else {
    return ClassNameValueShape::DynamicExpression(Box::new(expr));
  };

  let tokens: Vec<Atom> = value.split_whitespace().map(Atom::from).collect();
  if tokens.is_empty() {
    ClassNameValueShape::Empty
  } else {
    ClassNameValueShape::StaticStringLiteral(tokens)
  }
}

/// `"a b"`, `{'a b'}` or `` {`a b`} `` without interpolation
fn static_string(expr: &Expr) -> Option<String> {
  match expr {
    Expr::Lit(Lit::Str(s)) => Some(s.value.to_string()),
    Expr::Tpl(Tpl { exprs, quasis, .. }) if exprs.is_empty() && quasis.len() == 1 => {
      let quasi = &quasis[0];
      Some(quasi.cooked.as_ref().unwrap_or(&quasi.raw).to_string())
    }
    _ => None,
  }
}
