use std::path::{Path, PathBuf};

use clap::Parser;
use jsx_stylesheet::JsxStylesheetConfig;
use jsx_stylesheet_cli::{run, transform_file, Args, RunSummary};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_input(dir: &Path, name: &str, code: &str) -> PathBuf {
  let path = dir.join(name);
  std::fs::write(&path, code).unwrap();
  path
}

fn args(extra: &[&str], inputs: &[&Path]) -> Args {
  let mut argv: Vec<String> = vec!["jsx-stylesheet".into()];
  argv.extend(extra.iter().map(|arg| arg.to_string()));
  argv.extend(inputs.iter().map(|input| input.display().to_string()));
  Args::parse_from(argv)
}

#[test]
fn writes_transformed_files_and_source_maps() {
  let input_dir = TempDir::new().unwrap();
  let out_dir = TempDir::new().unwrap();
  let input = write_input(
    input_dir.path(),
    "app.jsx",
    "import './app.css';\nrender(<div className=\"header\" />);\n",
  );

  let out_dir_arg = out_dir.path().display().to_string();
  let summary = run(&args(
    &["--out-dir", &out_dir_arg, "--source-maps"],
    &[&input],
  ))
  .unwrap();

  assert_eq!(
    summary,
    RunSummary {
      transformed: 1,
      unchanged: 0
    }
  );

  let output = std::fs::read_to_string(out_dir.path().join("app.jsx")).unwrap();
  assert!(output.contains("import appStyleSheet from './app.css';"));
  assert!(output.contains("var _styleSheet = appStyleSheet;"));
  assert!(output.contains(r#"style={_styleSheet["header"]}"#));
  assert!(!output.contains("className"));

  let source_map = std::fs::read_to_string(out_dir.path().join("app.jsx.map")).unwrap();
  assert!(source_map.contains("\"mappings\""));
}

#[test]
fn copies_untouched_files_byte_for_byte() {
  let input_dir = TempDir::new().unwrap();
  let out_dir = TempDir::new().unwrap();
  let code = "// keep me\nimport   styles from './style.css'\n\nrender(<div className='a'   style={styles.a} />)\n";
  let input = write_input(input_dir.path(), "page.jsx", code);

  let out_dir_arg = out_dir.path().display().to_string();
  let summary = run(&args(
    &["--out-dir", &out_dir_arg, "--source-maps"],
    &[&input],
  ))
  .unwrap();

  assert_eq!(summary.unchanged, 1);
  assert_eq!(
    std::fs::read_to_string(out_dir.path().join("page.jsx")).unwrap(),
    code
  );
  assert!(!out_dir.path().join("page.jsx.map").exists());
}

#[test]
fn keeps_going_when_one_file_fails() {
  let input_dir = TempDir::new().unwrap();
  let out_dir = TempDir::new().unwrap();
  let broken = write_input(input_dir.path(), "broken.jsx", "import './app.css';\nconst = 1;\n");
  let good = write_input(
    input_dir.path(),
    "good.jsx",
    "import './app.css';\nrender(<div className=\"a\" />);\n",
  );

  let out_dir_arg = out_dir.path().display().to_string();
  let result = run(&args(&["--out-dir", &out_dir_arg], &[&broken, &good]));

  assert!(result.is_err());
  assert!(!out_dir.path().join("broken.jsx").exists());
  assert!(out_dir.path().join("good.jsx").exists());
}

#[test]
fn parses_typescript_by_extension() {
  let input_dir = TempDir::new().unwrap();
  let input = write_input(
    input_dir.path(),
    "view.tsx",
    "import './view.scss';\nconst label: string = 'x';\nrender(<div className=\"a b\" />);\n",
  );

  let output = transform_file(&input, &JsxStylesheetConfig::default()).unwrap();

  assert!(output.transformed);
  assert!(output.code.contains("import viewStyleSheet from './view.scss';"));
  assert!(output
    .code
    .contains(r#"style={Object.assign({}, _styleSheet["a"], _styleSheet["b"])}"#));
}

#[test]
fn development_env_renames_class_name() {
  let input_dir = TempDir::new().unwrap();
  let input = write_input(
    input_dir.path(),
    "app.jsx",
    "import './app.css';\nrender(<div className=\"header\" />);\n",
  );

  let config = args(&["--env", "development"], &[&input]).config().unwrap();
  let output = transform_file(&input, &config).unwrap();

  assert!(output
    .code
    .contains(r#"<div __class="header" style={_styleSheet["header"]}/>"#));
}

#[test]
fn reports_missing_inputs() {
  let error = transform_file(
    Path::new("/definitely/not/here.jsx"),
    &JsxStylesheetConfig::default(),
  )
  .unwrap_err();

  assert!(format!("{error:#}").contains("Failed to read /definitely/not/here.jsx"));
}

#[test]
fn rejects_inputs_sharing_an_output_path() {
  let input_dir = TempDir::new().unwrap();
  let out_dir = TempDir::new().unwrap();
  std::fs::create_dir_all(input_dir.path().join("a")).unwrap();
  std::fs::create_dir_all(input_dir.path().join("b")).unwrap();
  let code = "import './app.css';\nrender(<div className=\"a\" />);\n";
  let first = write_input(input_dir.path(), "a/app.jsx", code);
  let second = write_input(input_dir.path(), "b/app.jsx", code);

  let out_dir_arg = out_dir.path().display().to_string();
  let error = run(&args(&["--out-dir", &out_dir_arg], &[&first, &second])).unwrap_err();

  assert!(error.to_string().contains("would both be written to"));
  assert!(!out_dir.path().join("app.jsx").exists());
}

#[test]
fn writes_same_named_inputs_to_stdout() {
  let input_dir = TempDir::new().unwrap();
  std::fs::create_dir_all(input_dir.path().join("a")).unwrap();
  std::fs::create_dir_all(input_dir.path().join("b")).unwrap();
  let code = "const a = 1;\n";
  let first = write_input(input_dir.path(), "a/app.jsx", code);
  let second = write_input(input_dir.path(), "b/app.jsx", code);

  let summary = run(&args(&[], &[&first, &second])).unwrap();

  assert_eq!(summary.unchanged, 2);
}
