use jsx_stylesheet::{EnvironmentMode, JsxStylesheetConfig, JsxStylesheetVisitor};
use swc_core::common::plugin::metadata::TransformPluginMetadataContextKind;
use swc_core::ecma::ast::Program;
use swc_core::ecma::visit::VisitMutWith;
use swc_core::plugin::{plugin_transform, proxies::TransformPluginProgramMetadata};

#[plugin_transform]
pub fn process_transform(
  mut program: Program,
  metadata: TransformPluginProgramMetadata,
) -> Program {
  let mut config = match metadata.get_transform_plugin_config() {
    Some(config_string) => {
      JsxStylesheetConfig::from_json(&config_string).expect("Invalid JSON configuration")
    }
    None => JsxStylesheetConfig::default(),
  };

  if config.environment_mode.is_none() {
    config.environment_mode = metadata
      .get_context(&TransformPluginMetadataContextKind::Env)
      .map(|env| EnvironmentMode::from_env_name(&env));
  }

  program.visit_mut_with(&mut JsxStylesheetVisitor::new(
    metadata.unresolved_mark,
    config,
  ));

  program
}
