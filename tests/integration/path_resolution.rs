//! Integration tests for image reference resolution.
//!
//! Uses the host platform backed by a real on-disk media store.

use std::path::Path;

use msfeedback::content::{
    AUTHORITY_DOWNLOADS, AUTHORITY_EXTERNAL_STORAGE, AUTHORITY_MEDIA, ContentUri, ImageReference,
    MediaKind, MediaStore,
};
use msfeedback::platform::{HostPlatform, HostSettings};
use msfeedback::resolver::PathResolver;
use tempfile::TempDir;

fn host_with_store(dir: &TempDir) -> (HostPlatform, MediaStore) {
    let settings = HostSettings {
        external_storage_root: Some(dir.path().join("sdcard")),
        media_store: Some(dir.path().join("media.db")),
        ..HostSettings::default()
    };
    let host = HostPlatform::open(settings).unwrap();
    let writer = MediaStore::open(dir.path().join("media.db")).unwrap();
    (host, writer)
}

#[test]
fn test_media_document_resolves_through_store() {
    let dir = TempDir::new().unwrap();
    let (host, store) = host_with_store(&dir);
    let id = store
        .insert(&MediaKind::Image.collection_uri(), Path::new("/pics/cat.jpg"))
        .unwrap();

    let reference = ImageReference::document(AUTHORITY_MEDIA, format!("image:{id}"));
    assert_eq!(
        PathResolver::new(&host).resolve(&reference).as_deref(),
        Some("/pics/cat.jpg")
    );

    let wrong_kind = ImageReference::document(AUTHORITY_MEDIA, format!("video:{id}"));
    assert_eq!(PathResolver::new(&host).resolve(&wrong_kind), None);
}

#[test]
fn test_download_document_resolves_through_store() {
    let dir = TempDir::new().unwrap();
    let (host, store) = host_with_store(&dir);
    let id = store
        .insert(&ContentUri::public_downloads(), Path::new("/dl/report.png"))
        .unwrap();

    let reference = ImageReference::document(AUTHORITY_DOWNLOADS, id.to_string());
    assert_eq!(
        PathResolver::new(&host).resolve(&reference).as_deref(),
        Some("/dl/report.png")
    );
}

#[test]
fn test_plain_content_uri_from_store_listing() {
    let dir = TempDir::new().unwrap();
    let (host, store) = host_with_store(&dir);
    store
        .insert(&MediaKind::Image.collection_uri(), Path::new("/pics/a.png"))
        .unwrap();
    store
        .insert(&MediaKind::Image.collection_uri(), Path::new("/pics/b.png"))
        .unwrap();

    let entries = store.list(None).unwrap();
    assert_eq!(entries.len(), 2);
    let second = &entries[1];
    assert_eq!(
        PathResolver::new(&host).resolve_str(&second.uri()).as_deref(),
        Some("/pics/b.png")
    );
}

#[test]
fn test_external_storage_document_uses_configured_root() {
    let dir = TempDir::new().unwrap();
    let (host, _) = host_with_store(&dir);
    let reference =
        ImageReference::document(AUTHORITY_EXTERNAL_STORAGE, "primary:DCIM/Camera/x.jpg");
    let expected = format!("{}/DCIM/Camera/x.jpg", dir.path().join("sdcard").display());
    assert_eq!(
        PathResolver::new(&host).resolve(&reference),
        Some(expected)
    );
}

#[test]
fn test_unresolvable_references() {
    let dir = TempDir::new().unwrap();
    let (host, _) = host_with_store(&dir);
    let resolver = PathResolver::new(&host);

    assert_eq!(resolver.resolve_str("content://media/external/images/media/404"), None);
    assert_eq!(resolver.resolve_str("https://example.com/a.png"), None);
    assert_eq!(
        resolver.resolve(&ImageReference::document("com.example.docs", "primary:a.png")),
        None
    );
    assert_eq!(
        resolver.resolve(&ImageReference::document(
            AUTHORITY_EXTERNAL_STORAGE,
            "1234-ABCD:a.png"
        )),
        None
    );
}
