//! Generated module shape and determinism

use anyhow::Result;

use hbs_import::config::{CompileOptions, PluginOptions, TemplateExtension};
use hbs_import::core::HbsImportError;
use hbs_import::plugin::HandlebarsImportPlugin;
use hbs_import::templating::{HandlebarsCompiler, ModuleEmitter, PartialRegistry, TemplateCompiler};
use hbs_import::test_utils::PartialsFixture;

fn plugin(fixture: &PartialsFixture, optimize: bool) -> Result<HandlebarsImportPlugin> {
    Ok(HandlebarsImportPlugin::new(PluginOptions {
        partials_directory_path: Some(fixture.partials_dir().to_path_buf()),
        optimize_partial_registration: optimize,
        ..Default::default()
    })?)
}

#[test]
fn test_module_for_view_with_partials() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let mut plugin = plugin(&fixture, false)?;

    let output = plugin
        .transform("/src/views/home.hbs", "<main>{{> sub/test3}}</main>")?
        .expect("template ids are transformed");

    let lines: Vec<_> = output.code.lines().collect();
    assert_eq!(lines[0], "import Handlebars from 'handlebars';");
    assert_eq!(lines[1], "");
    assert!(lines[2].starts_with("Handlebars.registerPartial(\"sub/test3\", Handlebars.compile("));
    assert!(lines[3].starts_with("Handlebars.registerPartial(\"test 2\", Handlebars.compile("));
    assert!(lines[4].starts_with("Handlebars.registerPartial(\"test1\", Handlebars.compile("));
    assert_eq!(
        lines[5],
        "export default Handlebars.compile(\"<main>{{> sub/test3}}</main>\", {});"
    );
    assert_eq!(lines.len(), 6);
    assert!(output.map.is_none());
    Ok(())
}

#[test]
fn test_guarded_and_unguarded_register_the_same_names() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let source = "<main>{{> test1}}</main>";

    let plain = plugin(&fixture, false)?.transform("/src/a.hbs", source)?.expect("transformed");
    let guarded = plugin(&fixture, true)?.transform("/src/a.hbs", source)?.expect("transformed");

    for name in ["sub/test3", "test 2", "test1"] {
        let register = format!("Handlebars.registerPartial(\"{name}\",");
        let guard = format!("if (!Handlebars.partials[\"{name}\"]) {{ {register}");

        assert_eq!(plain.code.matches(&register).count(), 1);
        assert_eq!(plain.code.matches(&guard).count(), 0);
        assert_eq!(guarded.code.matches(&register).count(), 1);
        assert_eq!(guarded.code.matches(&guard).count(), 1);
    }

    // Guards aside, both modules are the same program.
    let unwrap_guards = |code: &str| {
        code.lines()
            .map(|line| {
                line.strip_prefix("if (!Handlebars.partials[")
                    .and_then(|rest| rest.split_once("]) { "))
                    .and_then(|(_, body)| body.strip_suffix(" }"))
                    .unwrap_or(line)
                    .to_string()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(unwrap_guards(&plain.code), unwrap_guards(&guarded.code));
    Ok(())
}

#[test]
fn test_equal_inputs_give_identical_modules() -> Result<()> {
    let fixture = PartialsFixture::new()?;

    let first = plugin(&fixture, true)?.transform("/src/a.hbs", "<p>{{title}}</p>")?;
    let second = plugin(&fixture, true)?.transform("/src/a.hbs", "<p>{{title}}</p>")?;
    assert_eq!(first, second);

    let compiler = HandlebarsCompiler::new();
    let options = CompileOptions::default();
    let target = compiler.precompile("a", "<p>{{title}}</p>", &options)?;
    let mut registry = PartialRegistry::new();
    let partials =
        registry.get(&TemplateExtension::default(), Some(fixture.partials_dir()), &options)?;

    assert_eq!(
        ModuleEmitter::emit(&target, &partials, false),
        ModuleEmitter::emit(&target, &partials, false)
    );
    Ok(())
}

#[test]
fn test_custom_extension_and_compile_options() -> Result<()> {
    let fixture = PartialsFixture::empty()?;
    fixture.write_partial("header.handlebars", "<header>{{title}}</header>")?;
    fixture.write_partial("ignored.hbs", "<p>not a .handlebars file</p>")?;

    let mut plugin = HandlebarsImportPlugin::new(PluginOptions {
        template_file_extension: Some(".handlebars".to_string()),
        partials_directory_path: Some(fixture.partials_dir().to_path_buf()),
        compile_options: CompileOptions {
            strict: Some(true),
            ..Default::default()
        },
        ..Default::default()
    })?;

    assert!(plugin.transform("/src/page.hbs", "<p></p>")?.is_none());

    let output = plugin.transform("/src/page.handlebars", "{{> header}}")?.expect("transformed");
    assert!(output.code.contains(
        r#"Handlebars.registerPartial("header", Handlebars.compile("<header>{{title}}</header>", {"strict":true}));"#
    ));
    assert!(!output.code.contains("ignored"));
    let export = concat!(
        r#"export default Handlebars.compile("{{> header}}", {"strict":true});"#,
        "\n"
    );
    assert!(output.code.ends_with(export));
    Ok(())
}

#[test]
fn test_invalid_template_fails_transform() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let mut plugin = plugin(&fixture, false)?;

    match plugin.transform("/src/views/broken.hbs", "<p>\n{{title</p>") {
        Err(HbsImportError::TemplateSyntax { template, .. }) => {
            assert_eq!(template, "/src/views/broken.hbs");
        }
        other => panic!("expected TemplateSyntax, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_missing_partials_directory_fails_transform() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let mut plugin = HandlebarsImportPlugin::new(PluginOptions {
        partials_directory_path: Some(fixture.root().join("missing")),
        ..Default::default()
    })?;

    let result = plugin.transform("/src/a.hbs", "<p></p>");
    assert!(matches!(result, Err(HbsImportError::DirectoryNotFound { .. })));
    Ok(())
}
