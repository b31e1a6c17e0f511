//! End-to-end rendering through filesystem storage and the memory cache.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;

use pretty_assertions::assert_eq;
use quire_cache::{Digest, MemoryCache};
use quire_site::{RenderError, RenderedArtifact, Site, SiteConfig};
use quire_storage::FsStorage;

fn write_doc(root: &Path, language: &str, identifier: &str, content: &str) {
    let path = root.join(language).join(format!("{identifier}.md"));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_site(root: &Path) -> Site {
    Site::new(
        Arc::new(FsStorage::new(root.to_path_buf())),
        Arc::new(MemoryCache::<RenderedArtifact>::new()),
        SiteConfig::default(),
    )
}

#[test]
fn test_worked_example() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_doc(
        temp_dir.path(),
        "en",
        "hello",
        "---\ntitle: Hi\n---\n\nHello *world*",
    );
    let site = create_site(temp_dir.path());

    let page = site.render("en", "hello").unwrap();

    assert_eq!(page.artifact.html, "<p>Hello <em>world</em></p>");
    assert_eq!(page.artifact.metadata.len(), 1);
    assert_eq!(page.artifact.metadata.title(), Some("Hi"));
    assert_eq!(
        page.digest,
        Digest::of(b"---\ntitle: Hi\n---\n\nHello *world*")
    );
}

#[test]
fn test_render_is_deterministic_across_sites() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_doc(
        temp_dir.path(),
        "en",
        "guide",
        "# Guide\n\n## Step\n\n## Step\n\n| a | b |\n|---|---|\n| 1 | 2 |\n",
    );

    let first = create_site(temp_dir.path()).render("en", "guide").unwrap();
    let second = create_site(temp_dir.path()).render("en", "guide").unwrap();

    assert!(!first.from_cache);
    assert!(!second.from_cache);
    assert_eq!(first.digest, second.digest);
    assert_eq!(*first.artifact, *second.artifact);
}

#[test]
fn test_second_render_is_served_from_cache() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_doc(temp_dir.path(), "en", "about", "About **us**");
    let site = create_site(temp_dir.path());

    let first = site.render("en", "about").unwrap();
    let second = site.render("en", "about").unwrap();

    assert!(!first.from_cache);
    assert!(second.from_cache);
    assert_eq!(*first.artifact, *second.artifact);
    let stats = site.cache_stats();
    assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
}

#[test]
fn test_any_byte_change_forces_rerender() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_doc(temp_dir.path(), "en", "page", "---\ntitle: A\n---\nBody");
    let site = create_site(temp_dir.path());
    let original = site.render("en", "page").unwrap();

    // Metadata-only change
    write_doc(temp_dir.path(), "en", "page", "---\ntitle: B\n---\nBody");
    let meta_changed = site.render("en", "page").unwrap();

    // Body-only change
    write_doc(temp_dir.path(), "en", "page", "---\ntitle: B\n---\nBody!");
    let body_changed = site.render("en", "page").unwrap();

    assert!(!meta_changed.from_cache);
    assert!(!body_changed.from_cache);
    assert_ne!(original.digest, meta_changed.digest);
    assert_ne!(meta_changed.digest, body_changed.digest);
    assert_eq!(original.artifact.html, meta_changed.artifact.html);
    assert_eq!(meta_changed.artifact.metadata.title(), Some("B"));
    assert_eq!(body_changed.artifact.html, "<p>Body!</p>");
    assert_eq!(site.cache_stats().entries, 3);
}

#[test]
fn test_document_without_front_matter() {
    let temp_dir = tempfile::tempdir().unwrap();
    let text = "# Plain\n\nNo metadata here.\n\n- one\n- two\n";
    write_doc(temp_dir.path(), "en", "plain", text);
    let site = create_site(temp_dir.path());

    let page = site.render("en", "plain").unwrap();

    assert!(page.artifact.metadata.is_empty());
    assert_eq!(page.artifact.html, quire_renderer::render(text));
}

#[test]
fn test_malformed_front_matter_is_stripped() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_doc(
        temp_dir.path(),
        "en",
        "broken",
        "---\ntitle: [oops\n---\nStill rendered",
    );
    let site = create_site(temp_dir.path());

    let page = site.render("en", "broken").unwrap();

    assert!(page.artifact.metadata.is_empty());
    assert_eq!(page.artifact.html, "<p>Still rendered</p>");
}

#[test]
fn test_missing_identifier_is_not_found() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_doc(temp_dir.path(), "en", "exists", "Yes");
    let site = create_site(temp_dir.path());

    let missing = site.render("en", "absent").unwrap_err();
    let wrong_language = site.render("de", "exists").unwrap_err();

    assert!(matches!(missing, RenderError::NotFound { .. }));
    assert!(matches!(wrong_language, RenderError::NotFound { .. }));
    assert_eq!(site.cache_stats().entries, 0);
}

#[test]
fn test_traversal_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let content = temp_dir.path().join("content");
    write_doc(&content, "en", "page", "Inside");
    fs::write(temp_dir.path().join("secret.md"), "Outside").unwrap();
    let site = create_site(&content);

    let err = site.render("en", "../../secret").unwrap_err();

    assert!(matches!(err, RenderError::InvalidPath { .. }));
}

#[test]
fn test_concurrent_renders_compute_once() {
    const THREADS: usize = 12;

    let temp_dir = tempfile::tempdir().unwrap();
    let body: String = (0..200)
        .map(|i| format!("## Section {i}\n\nParagraph *{i}*.\n\n"))
        .collect();
    write_doc(temp_dir.path(), "en", "big", &body);
    let site = Arc::new(create_site(temp_dir.path()));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let site = Arc::clone(&site);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                site.render("en", "big").unwrap()
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let computed = results.iter().filter(|r| !r.from_cache).count();
    assert_eq!(computed, 1);
    assert!(
        results
            .iter()
            .all(|r| Arc::ptr_eq(&r.artifact, &results[0].artifact))
    );
    assert_eq!(site.cache_stats().misses, 1);
}

#[test]
fn test_nested_identifier_and_languages() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_doc(temp_dir.path(), "en", "guides/install", "Install");
    write_doc(temp_dir.path(), "fr", "guides/install", "Installer");
    let site = create_site(temp_dir.path());

    assert_eq!(
        site.render("fr", "guides/install").unwrap().artifact.html,
        "<p>Installer</p>"
    );
    assert_eq!(site.languages().unwrap(), vec!["en", "fr"]);
}
