//! File-change handling: cache invalidation and reload signalling

use anyhow::Result;

use hbs_import::config::{CompileOptions, PluginOptions, TemplateExtension};
use hbs_import::plugin::{ChangeReactor, HandlebarsImportPlugin, HotUpdateOutcome};
use hbs_import::templating::PartialRegistry;
use hbs_import::test_utils::{
    CountingCompiler, CountingSource, HostEvent, PartialsFixture, RecordingHost,
};

fn counting_plugin(
    fixture: &PartialsFixture,
) -> Result<HandlebarsImportPlugin<CountingSource, CountingCompiler>> {
    let registry =
        PartialRegistry::with_parts(CountingSource::default(), CountingCompiler::default());
    let options = PluginOptions {
        partials_directory_path: Some(fixture.partials_dir().to_path_buf()),
        ..Default::default()
    };
    Ok(HandlebarsImportPlugin::with_registry(options, registry)?)
}

#[test]
fn test_partial_change_rescans_on_next_transform() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let mut plugin = counting_plugin(&fixture)?;
    let mut host = RecordingHost::default();

    let before = plugin.transform("/src/a.hbs", "{{> test1}}")?.expect("transformed");
    assert_eq!(plugin.registry().stats().misses, 1);

    fixture.write_partial("test1.hbs", "<p>changed</p>")?;
    let outcome = plugin.handle_hot_update(&fixture.partials_dir().join("test1.hbs"), &mut host);
    assert_eq!(outcome, HotUpdateOutcome::FullReload);
    assert_eq!(host.events(), &[HostEvent::InvalidateAllModules, HostEvent::FullReload]);

    let after = plugin.transform("/src/a.hbs", "{{> test1}}")?.expect("transformed");
    assert_eq!(plugin.registry().stats().misses, 1);
    assert_eq!(plugin.registry().stats().hits, 0);
    assert_ne!(before, after);
    assert!(after.code.contains("<p>changed</p>"));
    Ok(())
}

#[test]
fn test_unrelated_change_keeps_cache() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let mut plugin = counting_plugin(&fixture)?;
    let mut host = RecordingHost::default();

    plugin.transform("/src/a.hbs", "{{> test1}}")?;
    let view = fixture.write_file("views/home.hbs", "<main></main>")?;
    let outcome = plugin.handle_hot_update(&view, &mut host);

    assert_eq!(outcome, HotUpdateOutcome::Ignored);
    assert!(host.events().is_empty());

    plugin.transform("/src/a.hbs", "{{> test1}}")?;
    let stats = plugin.registry().stats();
    assert_eq!((stats.misses, stats.hits), (1, 1));
    Ok(())
}

#[test]
fn test_new_partial_appears_after_reload() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let mut registry = PartialRegistry::new();
    let reactor = ChangeReactor::new(Some(fixture.partials_dir().to_path_buf()));
    let mut host = RecordingHost::default();
    let ext = TemplateExtension::default();
    let options = CompileOptions::default();

    assert_eq!(registry.get(&ext, Some(fixture.partials_dir()), &options)?.len(), 3);

    let added = fixture.write_partial("sub/nested/card.hbs", "<article></article>")?;
    reactor.on_file_changed(&added, &mut registry, &mut host);

    let map = registry.get(&ext, Some(fixture.partials_dir()), &options)?;
    assert_eq!(
        map.names().collect::<Vec<_>>(),
        vec!["sub/nested/card", "sub/test3", "test 2", "test1"]
    );
    Ok(())
}

#[test]
fn test_repeated_notifications_are_safe() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let mut plugin = counting_plugin(&fixture)?;
    let mut host = RecordingHost::default();
    let changed = fixture.partials_dir().join("test1.hbs");

    plugin.handle_hot_update(&changed, &mut host);
    plugin.handle_hot_update(&changed, &mut host);

    assert_eq!(host.events().len(), 4);
    assert_eq!(plugin.registry().stats().entries, 0);
    Ok(())
}

#[test]
fn test_parent_relative_partials_dir_still_reloads() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let mut plugin = HandlebarsImportPlugin::new(PluginOptions {
        partials_directory_path: Some(fixture.empty_dir().join("..").join("partials")),
        ..Default::default()
    })?;
    let mut host = RecordingHost::default();

    plugin.transform("/src/a.hbs", "{{> test1}}")?;
    assert_eq!(plugin.registry().stats().entries, 1);

    let outcome = plugin.handle_hot_update(&fixture.partials_dir().join("test1.hbs"), &mut host);

    assert_eq!(outcome, HotUpdateOutcome::FullReload);
    assert_eq!(host.events(), &[HostEvent::InvalidateAllModules, HostEvent::FullReload]);
    assert_eq!(plugin.registry().stats().entries, 0);
    Ok(())
}
