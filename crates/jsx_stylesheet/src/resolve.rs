use swc_core::common::{Mark, SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::{
  CallExpr, Callee, ComputedPropName, Expr, ExprOrSpread, Ident, IdentName, JSXAttr,
  JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXExpr, JSXExprContainer, Lit, MemberExpr,
  MemberProp, ObjectLit, Str,
};

use crate::catalog::{
  HelperInjectionFlags, DEBUG_CLASS_NAME_ATTRIBUTE, GET_STYLE_HELPER, STYLE_ATTRIBUTE,
  STYLE_SHEET_BINDING,
};
use crate::classify::{Classification, ClassNameValueShape, StyleAttributeState};
use crate::config::JsxStylesheetConfig;

/// What happens to the `className` attribute once `style` carries the resolved value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassNameDisposition {
  Remove,
  /// Kept verbatim (`retainClassName`)
  Retain,
  /// Renamed to `__class` in development builds
  RenameForDebug,
}

impl ClassNameDisposition {
  pub fn for_config(config: &JsxStylesheetConfig) -> Self {
    if config.retain_class_name {
      ClassNameDisposition::Retain
    } else if config.is_development() {
      ClassNameDisposition::RenameForDebug
    } else {
      ClassNameDisposition::Remove
    }
  }
}

/// Per-module inputs and outputs of the resolver.
pub struct ResolveContext<'a> {
  pub config: &'a JsxStylesheetConfig,
  pub unresolved_mark: Mark,
  pub flags: &'a mut HelperInjectionFlags,
}

/// Build the attribute list that replaces `attrs`.
///
/// `classification` must have been computed from `attrs`. An empty class name only drops the
/// `className` attribute; anything else yields a single `style` attribute holding the resolved
/// expression, placed where the old `style` was, or right after `className` when that stays.
pub fn rewrite_attributes(
  attrs: Vec<JSXAttrOrSpread>,
  classification: Classification,
  context: &mut ResolveContext<'_>,
) -> Vec<JSXAttrOrSpread> {
  let Classification {
    class_name_index,
    class_name,
    style_index,
    style,
  } = classification;

  let Some(style_expr) = style_expression(class_name, style, context) else {
    return attrs
      .into_iter()
      .enumerate()
      .filter(|(index, _)| *index != class_name_index)
      .map(|(_, attr)| attr)
      .collect();
  };

  let disposition = ClassNameDisposition::for_config(context.config);
  let mut style_attr = Some(jsx_expr_attribute(STYLE_ATTRIBUTE, style_expr));
  let mut rewritten = Vec::with_capacity(attrs.len() + 1);

  for (index, attr) in attrs.into_iter().enumerate() {
    if index == class_name_index {
      match disposition {
        ClassNameDisposition::Retain => {
          rewritten.push(attr);
          rewritten.extend(style_attr.take());
        }
        ClassNameDisposition::RenameForDebug => {
          rewritten.push(rename_attribute(attr, DEBUG_CLASS_NAME_ATTRIBUTE));
          rewritten.extend(style_attr.take());
        }
        ClassNameDisposition::Remove => {
          if style_index.is_none() {
            rewritten.extend(style_attr.take());
          }
        }
      }
    } else if Some(index) == style_index {
      if disposition == ClassNameDisposition::Remove {
        rewritten.extend(style_attr.take());
      }
    } else {
      rewritten.push(attr);
    }
  }

  rewritten
}

/// Resolution table. `None` for an empty class name.
///
/// | class | style | result |
/// |---|---|---|
/// | `"a"` | none | `_styleSheet["a"]` |
/// | `"a b"` | none | `Object.assign({}, _styleSheet["a"], _styleSheet["b"])` |
/// | `"a b"` | `S` | `Object.assign({}, _styleSheet["a"], _styleSheet["b"], S)` |
/// | `expr` | none | `_getStyle(expr)` |
/// | `expr` | `S` | `Object.assign({}, _getStyle(expr), S)` |
/// | any | `[s1, s2]` | `[...entries, s1, s2]` |
///
/// For an array style the class entries are prepended as they are: `_styleSheet["a"]` lookups for
/// a static class name, a single `_getStyle(expr)` for a dynamic one.
pub fn style_expression(
  class_name: ClassNameValueShape,
  style: StyleAttributeState,
  context: &mut ResolveContext<'_>,
) -> Option<Expr> {
  let mut entries = match class_name {
    ClassNameValueShape::Empty => return None,
    ClassNameValueShape::StaticStringLiteral(tokens) => tokens
      .into_iter()
      .map(|token| style_sheet_lookup(Str::from(token)))
      .collect::<Vec<_>>(),
    ClassNameValueShape::DynamicExpression(expr) => {
      context.flags.require_get_style_helper();
      vec![call(Ident::new_no_ctxt(GET_STYLE_HELPER.into(), DUMMY_SP), vec![*expr])]
    }
  };

  let expr = match style {
    StyleAttributeState::Present(style) => match *style {
      // The host merges style arrays itself, class entries go first
      Expr::Array(mut array) => {
        let mut elems: Vec<Option<ExprOrSpread>> = entries
          .into_iter()
          .map(|entry| {
            Some(ExprOrSpread {
              spread: None,
              expr: Box::new(entry),
            })
          })
          .collect();
        elems.append(&mut array.elems);
        array.elems = elems;
        Expr::Array(array)
      }
      style => {
        entries.push(style);
        object_assign(entries, context.unresolved_mark)
      }
    },
    StyleAttributeState::Absent if entries.len() == 1 => entries.remove(0),
    StyleAttributeState::Absent => object_assign(entries, context.unresolved_mark),
  };

  Some(expr)
}

/// `_styleSheet["token"]`
fn style_sheet_lookup(token: Str) -> Expr {
  Expr::Member(MemberExpr {
    span: DUMMY_SP,
    obj: Box::new(Expr::Ident(Ident::new_no_ctxt(
      STYLE_SHEET_BINDING.into(),
      DUMMY_SP,
    ))),
    prop: MemberProp::Computed(ComputedPropName {
      span: DUMMY_SP,
      expr: Box::new(Expr::Lit(Lit::Str(token))),
    }),
  })
}

/// `Object.assign({}, ...sources)`, with `Object` resolving to the global
fn object_assign(sources: Vec<Expr>, unresolved_mark: Mark) -> Expr {
  let object = Ident::new(
    "Object".into(),
    DUMMY_SP,
    SyntaxContext::empty().apply_mark(unresolved_mark),
  );
  let callee = Expr::Member(MemberExpr {
    span: DUMMY_SP,
    obj: Box::new(Expr::Ident(object)),
    prop: MemberProp::Ident(IdentName::new("assign".into(), DUMMY_SP)),
  });

  let mut args = Vec::with_capacity(sources.len() + 1);
  args.push(Expr::Object(ObjectLit {
    span: DUMMY_SP,
    props: vec![],
  }));
  args.extend(sources);

  call_expr(callee, args)
}

fn call(callee: Ident, args: Vec<Expr>) -> Expr {
  call_expr(Expr::Ident(callee), args)
}

fn call_expr(callee: Expr, args: Vec<Expr>) -> Expr {
  Expr::Call(CallExpr {
    span: DUMMY_SP,
    ctxt: SyntaxContext::empty(),
    callee: Callee::Expr(Box::new(callee)),
    args: args
      .into_iter()
      .map(|expr| ExprOrSpread {
        spread: None,
        expr: Box::new(expr),
      })
      .collect(),
    type_args: None,
  })
}

fn jsx_expr_attribute(name: &str, expr: Expr) -> JSXAttrOrSpread {
  JSXAttrOrSpread::JSXAttr(JSXAttr {
    span: DUMMY_SP,
    name: JSXAttrName::Ident(IdentName::new(name.into(), DUMMY_SP)),
    value: Some(JSXAttrValue::JSXExprContainer(JSXExprContainer {
      span: DUMMY_SP,
      expr: JSXExpr::Expr(Box::new(expr)),
    })),
  })
}

fn rename_attribute(attr: JSXAttrOrSpread, name: &str) -> JSXAttrOrSpread {
  match attr {
    JSXAttrOrSpread::JSXAttr(attr) => JSXAttrOrSpread::JSXAttr(JSXAttr {
      name: JSXAttrName::Ident(IdentName::new(name.into(), attr.span)),
      ..attr
    }),
    spread => spread,
  }
}
