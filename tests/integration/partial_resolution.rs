//! Partial scanning, naming and cache behavior through the public API

use anyhow::Result;
use std::sync::Arc;

use hbs_import::config::{CompileOptions, TemplateExtension};
use hbs_import::core::HbsImportError;
use hbs_import::templating::{DirectoryScanner, PartialRegistry, TemplateSource, partial_name};
use hbs_import::test_utils::{
    CountingCompiler, CountingSource, PartialsFixture, TEST1_PARTIAL, init_test_logging,
};

fn counting_registry() -> PartialRegistry<CountingSource, CountingCompiler> {
    PartialRegistry::with_parts(CountingSource::default(), CountingCompiler::default())
}

#[test]
fn test_partial_map_for_fixture_tree() -> Result<()> {
    init_test_logging(None);
    let fixture = PartialsFixture::new()?;
    let mut registry = PartialRegistry::new();

    let map = registry.get(
        &TemplateExtension::default(),
        Some(fixture.partials_dir()),
        &CompileOptions::default(),
    )?;

    assert_eq!(map.names().collect::<Vec<_>>(), vec!["sub/test3", "test 2", "test1"]);
    for (name, template) in map.iter() {
        assert!(!template.source().is_empty(), "partial {name} compiled to nothing");
    }
    assert_eq!(map.get("test1").map(|t| t.source()), Some(TEST1_PARTIAL));
    Ok(())
}

#[test]
fn test_scan_returns_only_matching_files_sorted() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    fixture.write_partial("readme.md", "# not a partial")?;
    fixture.write_partial("sub/deeper/test0.hbs", "<p>0</p>")?;
    fixture.write_partial("a.hbs.bak", "backup")?;

    let scanner = DirectoryScanner::new();
    let ext = TemplateExtension::default();
    let files = scanner.scan(fixture.partials_dir(), &ext)?;

    let base = fixture.partials_dir();
    assert_eq!(
        files,
        vec![
            base.join("sub").join("deeper").join("test0.hbs"),
            base.join("sub").join("test3.hbs"),
            base.join("test 2.hbs"),
            base.join("test1.hbs"),
        ]
    );

    let mut as_strings: Vec<_> = files.iter().map(|p| p.to_string_lossy().into_owned()).collect();
    let before = as_strings.clone();
    as_strings.sort();
    as_strings.dedup();
    assert_eq!(as_strings, before);

    assert_eq!(scanner.scan(fixture.partials_dir(), &ext)?, files);
    Ok(())
}

#[test]
fn test_empty_and_missing_directories() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let scanner = DirectoryScanner::new();
    let ext = TemplateExtension::default();

    assert!(scanner.scan(fixture.empty_dir(), &ext)?.is_empty());

    let missing = fixture.root().join("does-not-exist");
    match scanner.scan(&missing, &ext) {
        Err(HbsImportError::DirectoryNotFound { path }) => assert_eq!(path, missing),
        other => panic!("expected DirectoryNotFound, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_partial_names_use_forward_slashes() -> Result<()> {
    let fixture = PartialsFixture::empty()?;
    let file = fixture.write_partial("a/b/c.ext", "")?;

    let ext = TemplateExtension::decide(Some(".ext"));
    assert_eq!(partial_name(fixture.partials_dir(), &file, &ext)?, "a/b/c");
    Ok(())
}

#[test]
fn test_second_get_does_not_touch_filesystem() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let mut registry = counting_registry();
    let ext = TemplateExtension::default();
    let options = CompileOptions::default();

    let first = registry.get(&ext, Some(fixture.partials_dir()), &options)?;
    let stats = registry.stats();
    assert_eq!((stats.misses, stats.hits), (1, 0));

    let second = registry.get(&ext, Some(fixture.partials_dir()), &options)?;
    let stats = registry.stats();
    assert_eq!((stats.misses, stats.hits), (1, 1));

    assert!(Arc::ptr_eq(&first, &second));
    Ok(())
}

#[test]
fn test_cache_hides_changes_until_invalidated() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    let mut registry = PartialRegistry::new();
    let ext = TemplateExtension::default();
    let options = CompileOptions::default();

    registry.get(&ext, Some(fixture.partials_dir()), &options)?;
    fixture.write_partial("footer.hbs", "<footer></footer>")?;
    fixture.remove_partial("test 2.hbs")?;

    let cached = registry.get(&ext, Some(fixture.partials_dir()), &options)?;
    assert_eq!(cached.len(), 3);
    assert!(cached.get("footer").is_none());

    registry.invalidate();
    let fresh = registry.get(&ext, Some(fixture.partials_dir()), &options)?;
    assert_eq!(fresh.names().collect::<Vec<_>>(), vec!["footer", "sub/test3", "test1"]);
    Ok(())
}

#[test]
fn test_configurations_are_cached_independently() -> Result<()> {
    let fixture = PartialsFixture::new()?;
    fixture.write_partial("layout.handlebars", "<body>{{{body}}}</body>")?;
    let mut registry = counting_registry();
    let options = CompileOptions::default();
    let strict = CompileOptions {
        strict: Some(true),
        ..Default::default()
    };

    let hbs = registry.get(&TemplateExtension::default(), Some(fixture.partials_dir()), &options)?;
    let handlebars = registry.get(
        &TemplateExtension::decide(Some("handlebars")),
        Some(fixture.partials_dir()),
        &options,
    )?;
    let hbs_strict =
        registry.get(&TemplateExtension::default(), Some(fixture.partials_dir()), &strict)?;

    assert_eq!(hbs.len(), 3);
    assert_eq!(handlebars.names().collect::<Vec<_>>(), vec!["layout"]);
    assert_eq!(hbs_strict.len(), 3);
    assert_eq!(registry.stats().entries, 3);
    assert_eq!(registry.stats().misses, 3);
    Ok(())
}

#[test]
fn test_without_partials_directory() -> Result<()> {
    let mut registry = counting_registry();

    let map = registry.get(&TemplateExtension::default(), None, &CompileOptions::default())?;

    assert!(map.is_empty());
    assert_eq!(registry.stats().entries, 0);
    assert_eq!(registry.stats().misses, 0);
    Ok(())
}
