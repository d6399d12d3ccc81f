//! Option loading, extension normalization and plugin identity

use anyhow::Result;
use std::path::PathBuf;

use hbs_import::config::{PluginOptions, TemplateExtension, parse_config};
use hbs_import::plugin::{HandlebarsImportPlugin, PLUGIN_NAME};
use hbs_import::test_utils::PartialsFixture;

#[test]
fn test_plugin_name() -> Result<()> {
    let plugin = HandlebarsImportPlugin::new(PluginOptions {
        partials_directory_path: Some(PathBuf::new()),
        ..Default::default()
    })?;

    assert_eq!(plugin.name(), "vite-plugin-handlebars-import");
    assert_eq!(PLUGIN_NAME, plugin.name());
    Ok(())
}

#[test]
fn test_extension_decision() {
    assert_eq!(TemplateExtension::decide(None).as_str(), ".hbs");
    assert_eq!(TemplateExtension::decide(Some(".html")).as_str(), ".html");
    assert_eq!(TemplateExtension::decide(Some("html")).as_str(), ".html");
}

#[test]
fn test_options_round_trip_through_toml() -> Result<()> {
    let content = r#"
templateFileExtension = ".handlebars"
partialsDirectoryPath = "integration/partials"
optimizePartialRegistration = true

[compileOptions]
strict = true
preventIndent = true
"#;

    let options = PluginOptions::from_toml_str(content)?;
    assert_eq!(options.template_file_extension.as_deref(), Some(".handlebars"));
    assert_eq!(options.partials_directory_path, Some(PathBuf::from("integration/partials")));
    assert!(options.optimize_partial_registration);
    assert_eq!(options.compile_options.prevent_indent, Some(true));

    let serialized = toml::to_string(&options)?;
    assert!(serialized.contains("templateFileExtension"));
    assert!(serialized.contains("optimizePartialRegistration"));

    let reparsed = PluginOptions::from_toml_str(&serialized)?;
    assert_eq!(reparsed.template_file_extension, options.template_file_extension);
    assert_eq!(reparsed.partials_directory_path, options.partials_directory_path);
    assert_eq!(reparsed.compile_options, options.compile_options);
    Ok(())
}

#[test]
fn test_unknown_compile_option_is_rejected() {
    let result = PluginOptions::from_toml_str("[compileOptions]\nstrictt = true\n");
    assert!(result.is_err());
}

#[tokio::test]
async fn test_plugin_from_config_file() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let partials = fixture.partials_dir().to_string_lossy().replace('\\', "/");
    let config = fixture.write_file(
        "hbs-import.toml",
        &format!("partialsDirectoryPath = \"{partials}\"\noptimizePartialRegistration = true\n"),
    )?;

    let options = PluginOptions::load(&config).await?;
    let sync_options: PluginOptions = parse_config(&config)?;
    assert_eq!(sync_options.partials_directory_path, options.partials_directory_path);

    let mut plugin = HandlebarsImportPlugin::new(options)?;
    let output = plugin.transform("/src/a.hbs", "{{> test1}}")?.expect("transformed");
    assert_eq!(output.code.matches("if (!Handlebars.partials[").count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_missing_config_file_names_path() {
    let fixture = PartialsFixture::empty().expect("fixture");
    let missing = fixture.root().join("absent.toml");

    let error = PluginOptions::load(&missing).await.unwrap_err();

    assert!(format!("{error:#}").contains("absent.toml"));
}
