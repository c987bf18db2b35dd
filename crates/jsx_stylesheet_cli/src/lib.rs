use std::collections::HashMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::Parser;
use jsx_stylesheet::{EnvironmentMode, JsxStylesheetConfig, JsxStylesheetVisitor};
use jsx_stylesheet_swc_runner::{run_visit_file, RunContext};
use rayon::prelude::*;

/// Rewrite JSX `className` attributes into `style` values from imported stylesheets
#[derive(Debug, Parser)]
#[command(name = "jsx-stylesheet", version)]
pub struct Args {
  /// Files to transform
  #[arg(required = true)]
  pub inputs: Vec<PathBuf>,

  /// Write results into this directory instead of stdout
  #[arg(short, long)]
  pub out_dir: Option<PathBuf>,

  /// Transform configuration as JSON, e.g. '{"retainClassName": true}'
  #[arg(short, long)]
  pub config: Option<String>,

  /// Keep `className` next to the generated `style`
  #[arg(long)]
  pub retain_class_name: bool,

  /// Stylesheet extension to recognise, replacing the defaults. Repeatable.
  #[arg(long = "extension", value_name = "EXT")]
  pub extensions: Vec<String>,

  /// [possible values: "development", "production", ...]
  #[arg(long, env = "NODE_ENV")]
  pub env: Option<String>,

  /// Write a `.map` file next to each transformed output
  #[arg(long, requires = "out_dir")]
  pub source_maps: bool,
}

impl Args {
  /// JSON configuration first, then flags on top of it.
  pub fn config(&self) -> anyhow::Result<JsxStylesheetConfig> {
    let mut config = match &self.config {
      Some(json) => JsxStylesheetConfig::from_json(json)?,
      None => JsxStylesheetConfig::default(),
    };

    if self.retain_class_name {
      config.retain_class_name = true;
    }

    if !self.extensions.is_empty() {
      config.style_sheet_extensions = self.extensions.iter().cloned().collect();
      config = config.normalized()?;
    }

    if config.environment_mode.is_none() {
      config.environment_mode = self.env.as_deref().map(EnvironmentMode::from_env_name);
    }

    Ok(config)
  }
}

#[derive(Debug)]
pub struct TransformOutput {
  pub path: PathBuf,
  pub code: String,
  /// Only present when the module was rewritten
  pub source_map: Option<Vec<u8>>,
  pub transformed: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
  pub transformed: usize,
  pub unchanged: usize,
}

/// Transform a single file. Sources the pass leaves alone come back exactly as read.
#[tracing::instrument(level = "debug", skip(config))]
pub fn transform_file(
  path: &Path,
  config: &JsxStylesheetConfig,
) -> anyhow::Result<TransformOutput> {
  let code = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read {}", path.display()))?;

  let result = run_visit_file(path, &code, |context: RunContext| {
    JsxStylesheetVisitor::new(context.unresolved_mark, config.clone())
  })
  .map_err(|error| anyhow!("Failed to transform {}: {}", path.display(), error))?;

  if !result.visitor.transformed() {
    tracing::debug!("No stylesheet imports, keeping source");
    return Ok(TransformOutput {
      path: path.to_path_buf(),
      code,
      source_map: None,
      transformed: false,
    });
  }

  Ok(TransformOutput {
    path: path.to_path_buf(),
    code: result.output_code,
    source_map: Some(result.source_map),
    transformed: true,
  })
}

/// Transform every input on the rayon pool, then write the results in input order.
///
/// A file that fails is reported and skipped; the others are still written.
pub fn run(args: &Args) -> anyhow::Result<RunSummary> {
  let config = args.config()?;

  if let Some(out_dir) = &args.out_dir {
    check_output_paths(out_dir, &args.inputs)?;
    std::fs::create_dir_all(out_dir)
      .with_context(|| format!("Failed to create {}", out_dir.display()))?;
  }

  let results: Vec<anyhow::Result<TransformOutput>> = args
    .inputs
    .par_iter()
    .map(|path| transform_file(path, &config))
    .collect();

  let mut summary = RunSummary::default();
  let mut failed = 0;

  for result in results {
    let output = match result {
      Ok(output) => output,
      Err(error) => {
        tracing::error!("{:#}", error);
        failed += 1;
        continue;
      }
    };

    write_output(args, &output)?;

    if output.transformed {
      summary.transformed += 1;
    } else {
      summary.unchanged += 1;
    }
  }

  tracing::info!(
    transformed = summary.transformed,
    unchanged = summary.unchanged,
    failed,
    "Done"
  );

  if failed > 0 {
    anyhow::bail!("{} of {} files failed", failed, args.inputs.len());
  }

  Ok(summary)
}

fn write_output(args: &Args, output: &TransformOutput) -> anyhow::Result<()> {
  let Some(out_dir) = &args.out_dir else {
    std::io::stdout()
      .lock()
      .write_all(output.code.as_bytes())
      .context("Failed to write to stdout")?;
    return Ok(());
  };

  let out_path = output_path(out_dir, &output.path)?;

  std::fs::write(&out_path, &output.code)
    .with_context(|| format!("Failed to write {}", out_path.display()))?;

  if let (true, Some(source_map)) = (args.source_maps, &output.source_map) {
    let map_path = source_map_path(&out_path);
    std::fs::write(&map_path, source_map)
      .with_context(|| format!("Failed to write {}", map_path.display()))?;
  }

  tracing::debug!(path = %out_path.display(), "Wrote output");
  Ok(())
}

/// Outputs are flattened into `out_dir` by file name.
fn output_path(out_dir: &Path, input: &Path) -> anyhow::Result<PathBuf> {
  let file_name = input
    .file_name()
    .ok_or_else(|| anyhow!("Input has no file name: {}", input.display()))?;

  Ok(out_dir.join(file_name))
}

/// Fails before anything is written when two inputs would land on the same output file.
fn check_output_paths(out_dir: &Path, inputs: &[PathBuf]) -> anyhow::Result<()> {
  let mut seen: HashMap<PathBuf, &Path> = HashMap::new();

  for input in inputs {
    let out_path = output_path(out_dir, input)?;
    if let Some(previous) = seen.insert(out_path.clone(), input) {
      anyhow::bail!(
        "{} and {} would both be written to {}",
        previous.display(),
        input.display(),
        out_path.display()
      );
    }
  }

  Ok(())
}

fn source_map_path(out_path: &Path) -> PathBuf {
  let mut path = OsString::from(out_path);
  path.push(".map");
  PathBuf::from(path)
}
