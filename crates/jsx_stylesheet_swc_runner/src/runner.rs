use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;
use swc_core::common::input::StringInput;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, Globals, Mark, SourceMap, GLOBALS};
use swc_core::ecma::ast::Module;
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsSyntax, Parser, Syntax, TsSyntax};
use swc_core::ecma::transforms::base::resolver;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

pub struct RunContext {
  /// Source-map in use
  pub source_map: Lrc<SourceMap>,
  /// Global mark from SWC resolver
  pub global_mark: Mark,
  /// Unresolved mark from SWC resolver
  pub unresolved_mark: Mark,
}

pub struct RunVisitResult<V> {
  pub output_code: String,
  #[allow(unused)]
  pub visitor: V,
  pub source_map: Vec<u8>,
}

/// Runner of SWC transformations over JSX sources
///
/// * Parse `code` with SWC, JSX enabled
/// * Run a visitor over it
/// * Return the result
///
pub fn run_visit<V: VisitMut>(
  code: &str,
  make_visit: impl FnOnce(RunContext) -> V,
) -> Result<RunVisitResult<V>, RunWithTransformationError> {
  run_visit_source(FileName::Anon, syntax_for_path(None), code, make_visit)
}

/// Same as `run_visit` but for a file on disk.
///
/// The path names the source in the generated source map and picks the syntax: `.ts`/`.tsx`
/// files are parsed as TypeScript, everything else as JSX.
pub fn run_visit_file<V: VisitMut>(
  path: &Path,
  code: &str,
  make_visit: impl FnOnce(RunContext) -> V,
) -> Result<RunVisitResult<V>, RunWithTransformationError> {
  run_visit_source(
    FileName::Real(PathBuf::from(path)),
    syntax_for_path(Some(path)),
    code,
    make_visit,
  )
}

fn run_visit_source<V: VisitMut>(
  file_name: FileName,
  syntax: Syntax,
  code: &str,
  make_visit: impl FnOnce(RunContext) -> V,
) -> Result<RunVisitResult<V>, RunWithTransformationError> {
  let (output_code, visitor, source_map) = run_with_transformation(
    file_name,
    syntax,
    code,
    |run_context: RunContext, module: &mut Module| {
      let mut visit = make_visit(run_context);
      module.visit_mut_with(&mut visit);
      visit
    },
  )?;
  Ok(RunVisitResult {
    output_code,
    visitor,
    source_map,
  })
}

/// Pick the parser syntax from a file extension. JSX is always enabled.
pub fn syntax_for_path(path: Option<&Path>) -> Syntax {
  let extension = path
    .and_then(|path| path.extension())
    .and_then(|extension| extension.to_str());

  match extension {
    Some("ts") | Some("mts") | Some("cts") => Syntax::Typescript(TsSyntax {
      tsx: false,
      ..Default::default()
    }),
    Some("tsx") => Syntax::Typescript(TsSyntax {
      tsx: true,
      ..Default::default()
    }),
    _ => Syntax::Es(EsSyntax {
      jsx: true,
      ..Default::default()
    }),
  }
}

#[derive(Debug, thiserror::Error)]
pub enum RunWithTransformationError {
  #[error("Failed to parse module: {}", .0.kind().msg())]
  SwcParse(swc_core::ecma::parser::error::Error),
  #[error("IO Error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("Invalid utf-8 output: {0}")]
  InvalidUtf8Output(#[from] FromUtf8Error),
  #[error("Failed to generate source map")]
  SourceMap(#[from] sourcemap::Error),
}

type RunWithTransformationOutput<R> = (String, R, Vec<u8>);

/// Parse code, run resolver over it, then run the `transform` function with the parsed module
/// codegen and return the results.
fn run_with_transformation<R>(
  file_name: FileName,
  syntax: Syntax,
  code: &str,
  transform: impl FnOnce(RunContext, &mut Module) -> R,
) -> Result<RunWithTransformationOutput<R>, RunWithTransformationError> {
  let source_map = Lrc::new(SourceMap::default());
  let source_file = source_map.new_source_file(Lrc::new(file_name), code.into());
  let is_typescript = syntax.typescript();

  let lexer = Lexer::new(
    syntax,
    Default::default(),
    StringInput::from(&*source_file),
    None,
  );

  let mut parser = Parser::new_from(lexer);
  let mut module = parser
    .parse_module()
    .map_err(RunWithTransformationError::SwcParse)?;

  GLOBALS.set(
    &Globals::new(),
    || -> Result<RunWithTransformationOutput<R>, RunWithTransformationError> {
      let global_mark = Mark::new();
      let unresolved_mark = Mark::new();
      module.visit_mut_with(&mut resolver(unresolved_mark, global_mark, is_typescript));

      let context = RunContext {
        source_map: source_map.clone(),
        global_mark,
        unresolved_mark,
      };
      let result = transform(context, &mut module);

      let mut line_pos_buffer = vec![];
      let mut output_buffer = vec![];
      let writer = JsWriter::new(
        source_map.clone(),
        "\n",
        &mut output_buffer,
        Some(&mut line_pos_buffer),
      );
      let mut emitter = swc_core::ecma::codegen::Emitter {
        cfg: Default::default(),
        cm: source_map.clone(),
        comments: None,
        wr: writer,
      };
      emitter.emit_module(&module)?;
      let output_code = String::from_utf8(output_buffer)?;
      let source_map = source_map.build_source_map(&line_pos_buffer);
      let mut output_map_buffer = vec![];
      source_map.to_writer(&mut output_map_buffer)?;

      Ok((output_code, result, output_map_buffer))
    },
  )
}
