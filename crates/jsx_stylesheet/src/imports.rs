use std::collections::{HashMap, HashSet};
use std::path::Path;

use inflector::Inflector;
use swc_core::atoms::Atom;
use swc_core::common::{SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::{
  CallExpr, Callee, Expr, ExprOrSpread, Ident, ImportDecl, ImportDefaultSpecifier,
  ImportSpecifier, ModuleDecl, ModuleItem,
};

use crate::catalog::{MERGE_STYLES_HELPER, STYLE_SHEET_NAME_SUFFIX};
use crate::config::JsxStylesheetConfig;

/// A recognised stylesheet import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StylesheetImport {
  pub source_path: Atom,
  pub local_binding_name: Atom,
  /// The author wrote the binding (`import styles from './a.css'`) rather than us synthesizing it
  pub is_default_binding: bool,
}

/// The one expression a module uses to reach its resolved styles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StylesheetAccessor {
  /// `appStyleSheet`
  Direct(Atom),
  /// `_mergeStyles(aStyleSheet, bStyleSheet)`
  Merged(Vec<Atom>),
}

impl StylesheetAccessor {
  pub fn needs_merge_helper(&self) -> bool {
    matches!(self, StylesheetAccessor::Merged(_))
  }

  pub fn to_expr(&self) -> Expr {
    match self {
      StylesheetAccessor::Direct(binding) => Expr::Ident(binding_ident(binding)),
      StylesheetAccessor::Merged(bindings) => Expr::Call(CallExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        callee: Callee::Expr(Box::new(Expr::Ident(Ident::new_no_ctxt(
          MERGE_STYLES_HELPER.into(),
          DUMMY_SP,
        )))),
        args: bindings
          .iter()
          .map(|binding| ExprOrSpread {
            spread: None,
            expr: Box::new(Expr::Ident(binding_ident(binding))),
          })
          .collect(),
        type_args: None,
      }),
    }
  }
}

fn binding_ident(binding: &Atom) -> Ident {
  Ident::new_no_ctxt(binding.clone(), DUMMY_SP)
}

/// Result of normalizing a module's imports.
#[derive(Debug)]
pub struct NormalizedImports {
  /// Every stylesheet import found, in source order, including ones left untouched
  pub imports: Vec<StylesheetImport>,
  pub accessor: StylesheetAccessor,
  /// Index in the module body right after the last import declaration
  pub insert_at: usize,
}

/// Find stylesheet imports at the top level of a module, give side-effect imports a default
/// binding and compute the module's accessor.
///
/// Returns `None` without touching `items` when no side-effect stylesheet import exists.
/// Imports that already bind a name are reported but never feed the accessor.
#[tracing::instrument(level = "debug", skip_all)]
pub fn normalize_imports(
  items: &mut [ModuleItem],
  config: &JsxStylesheetConfig,
) -> Option<NormalizedImports> {
  let mut imports = Vec::new();
  let mut rewrites: Vec<(usize, Atom)> = Vec::new();
  let mut bound_paths: HashMap<Atom, Atom> = HashMap::new();
  let mut accessor_bindings: Vec<Atom> = Vec::new();
  let mut used_names: HashSet<String> = HashSet::new();
  let mut insert_at = 0;

  for (index, item) in items.iter().enumerate() {
    let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
      continue;
    };
    insert_at = index + 1;

    if import.type_only || !config.is_style_sheet(&import.src.value) {
      continue;
    }

    let source_path = import.src.value.clone();

    if let Some(local) = default_binding(import) {
      tracing::trace!("Keeping bound stylesheet import {} as {}", source_path, local);
      imports.push(StylesheetImport {
        source_path,
        local_binding_name: local,
        is_default_binding: true,
      });
      continue;
    }

    if !import.specifiers.is_empty() {
      // Named or namespace bindings only, nothing to reuse
      continue;
    }

    if let Some(local) = bound_paths.get(&source_path) {
      tracing::trace!("Coalescing repeated stylesheet import {}", source_path);
      imports.push(StylesheetImport {
        source_path,
        local_binding_name: local.clone(),
        is_default_binding: false,
      });
      continue;
    }

    let local = style_sheet_binding_name(&source_path, &mut used_names);
    bound_paths.insert(source_path.clone(), local.clone());
    accessor_bindings.push(local.clone());
    rewrites.push((index, local.clone()));
    imports.push(StylesheetImport {
      source_path,
      local_binding_name: local,
      is_default_binding: false,
    });
  }

  if accessor_bindings.is_empty() {
    tracing::debug!("No side-effect stylesheet imports found");
    return None;
  }

  for (index, local) in rewrites {
    if let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = &mut items[index] {
      import
        .specifiers
        .push(ImportSpecifier::Default(ImportDefaultSpecifier {
          span: DUMMY_SP,
          local: binding_ident(&local),
        }));
    }
  }

  let accessor = if accessor_bindings.len() == 1 {
    StylesheetAccessor::Direct(accessor_bindings.remove(0))
  } else {
    StylesheetAccessor::Merged(accessor_bindings)
  };

  tracing::debug!(?accessor, "Normalized stylesheet imports");

  Some(NormalizedImports {
    imports,
    accessor,
    insert_at,
  })
}

fn default_binding(import: &ImportDecl) -> Option<Atom> {
  import.specifiers.iter().find_map(|specifier| match specifier {
    ImportSpecifier::Default(default) => Some(default.local.sym.clone()),
    _ => None,
  })
}

/// `./styles/app-main.css` becomes `appMainStyleSheet`. Collisions between different paths get
/// a numeric suffix.
fn style_sheet_binding_name(source_path: &str, used_names: &mut HashSet<String>) -> Atom {
  let stem = Path::new(source_path)
    .file_stem()
    .and_then(|stem| stem.to_str())
    .unwrap_or_default()
    .to_camel_case();

  let mut base: String = stem
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
    .collect();
  if base.chars().next().map_or(true, |c| c.is_ascii_digit()) {
    base.insert(0, '_');
  }
  base.push_str(STYLE_SHEET_NAME_SUFFIX);

  let mut name = base.clone();
  let mut suffix = 1;
  while used_names.contains(&name) {
    name = format!("{base}{suffix}");
    suffix += 1;
  }

  used_names.insert(name.clone());
  Atom::from(name)
}
