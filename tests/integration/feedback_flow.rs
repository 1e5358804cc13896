//! Integration tests for the feedback pipeline: draft, diagnostics,
//! image preparation, composition and outbox delivery.

use std::fs::File;
use std::io::Read;

use image::{DynamicImage, Rgb, RgbImage};
use msfeedback::applog::{AppLog, NO_LOGS};
use msfeedback::content::{AUTHORITY_MEDIA, ImageReference, MediaKind};
use msfeedback::error::FeedbackError;
use msfeedback::feedback::{
    DEVICE_INFO_FILE, DEVICE_LOG_FILE, Diagnostics, FeedbackDraft, FeedbackKind,
    FeedbackRequest, MAX_IMAGES, MESSAGE_MANIFEST, Transport, ZipOutbox, compose,
    prepare_image_attachments,
};
use msfeedback::image_ops::Quality;
use msfeedback::platform::mock::MockPlatform;
use serde_json::Value;
use tempfile::TempDir;
use zip::ZipArchive;

fn photo() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 300, Rgb([12, 34, 56])))
}

fn request() -> FeedbackRequest {
    FeedbackRequest::builder()
        .with_email("support@example.com")
        .with_system_info()
        .build()
}

#[test]
fn test_full_submission_lands_in_outbox() {
    let dir = TempDir::new().unwrap();
    let log = AppLog::new(dir.path().join("logs.txt"));
    log.record_session_start();
    log.append("opened settings");

    let images = MediaKind::Image.collection_uri();
    let platform = MockPlatform::new()
        .with_row(&images, 7, "/sdcard/DCIM/shot.png")
        .with_image("/sdcard/DCIM/shot.png", photo());

    let mut draft = FeedbackDraft::new(FeedbackKind::Bug, "Crash on save", "Tapping save crashes");
    draft
        .attach_image(ImageReference::document(AUTHORITY_MEDIA, "image:7"))
        .unwrap();
    draft
        .attach_image(ImageReference::parse("file:///missing.png"))
        .unwrap();

    let diagnostics = Diagnostics::gather(&platform, &log);
    assert!(diagnostics.device_info.contains("==== SYSTEM-INFO ==="));
    assert!(diagnostics.log.contains("opened settings"));

    let prepared = prepare_image_attachments(&platform, &draft, (100, 100), Quality::default());
    assert_eq!(prepared.len(), 1, "missing file is skipped");
    assert_eq!(prepared[0].file_name, "image-1.jpg");

    let message = compose(&request(), &draft, Some(&diagnostics), prepared).unwrap();
    assert_eq!(message.subject, "MsFeedback Type: Bug");
    assert_eq!(
        message.body,
        "MsFeedback Type: Bug\nTitle: Crash on save\nDescription: Tapping save crashes"
    );
    let names: Vec<&str> = message
        .attachments
        .iter()
        .map(|a| a.file_name.as_str())
        .collect();
    assert_eq!(names, [DEVICE_INFO_FILE, DEVICE_LOG_FILE, "image-1.jpg"]);

    let outbox = ZipOutbox::new(dir.path().join("outbox"));
    let delivery = outbox.send(&message).unwrap();
    assert_eq!(delivery.message_id, message.id);
    assert_eq!(delivery.attachments, 3);
    assert_eq!(delivery.location, outbox.archive_path(message.id));

    let mut archive = ZipArchive::new(File::open(&delivery.location).unwrap()).unwrap();
    let mut manifest = String::new();
    archive
        .by_name(MESSAGE_MANIFEST)
        .unwrap()
        .read_to_string(&mut manifest)
        .unwrap();
    let manifest: Value = serde_json::from_str(&manifest).unwrap();
    assert_eq!(manifest["recipient"], "support@example.com");
    assert_eq!(manifest["kind"], "bug");
    assert_eq!(manifest["attachments"].as_array().unwrap().len(), 3);

    let mut jpeg = Vec::new();
    archive
        .by_name("image-1.jpg")
        .unwrap()
        .read_to_end(&mut jpeg)
        .unwrap();
    let thumbnail = image::load_from_memory(&jpeg).unwrap();
    assert_eq!((thumbnail.width(), thumbnail.height()), (200, 150));
}

#[test]
fn test_validation_order() {
    let empty = FeedbackDraft::new(FeedbackKind::Suggestion, "  ", "");
    assert!(matches!(
        compose(&request(), &empty, None, Vec::new()),
        Err(FeedbackError::MissingTitle)
    ));

    let no_description = FeedbackDraft::new(FeedbackKind::Suggestion, "Title", " ");
    assert!(matches!(
        compose(&request(), &no_description, None, Vec::new()),
        Err(FeedbackError::MissingDescription)
    ));

    let draft = FeedbackDraft::new(FeedbackKind::Suggestion, "Title", "Body");
    let anonymous = FeedbackRequest::builder().build();
    assert!(matches!(
        compose(&anonymous, &draft, None, Vec::new()),
        Err(FeedbackError::EmailNotSet)
    ));
}

#[test]
fn test_image_limit() {
    let mut draft = FeedbackDraft::new(FeedbackKind::Other, "Title", "Body");
    for i in 0..MAX_IMAGES {
        draft
            .attach_image(ImageReference::parse(&format!("file:///img-{i}.png")))
            .unwrap();
    }
    let err = draft
        .attach_image(ImageReference::parse("file:///one-too-many.png"))
        .unwrap_err();
    assert!(matches!(err, FeedbackError::AttachmentLimit { max } if max == MAX_IMAGES));

    assert!(draft.remove_image(0).is_some());
    assert!(draft
        .attach_image(ImageReference::parse("file:///replacement.png"))
        .is_ok());
}

#[test]
fn test_diagnostics_with_empty_log() {
    let dir = TempDir::new().unwrap();
    let log = AppLog::new(dir.path().join("nested").join("logs.txt"));
    let diagnostics = Diagnostics::gather(&MockPlatform::new(), &log);
    assert_eq!(diagnostics.log, NO_LOGS);
    assert!(log.path().exists(), "reading creates the log");
}

#[test]
fn test_without_system_info_only_images_attached() {
    let draft = FeedbackDraft::new(FeedbackKind::Other, "Nice", "Love the app");
    let request = FeedbackRequest::builder()
        .with_email("support@example.com")
        .build();
    let diagnostics = Diagnostics {
        device_info: "ignored".into(),
        log: "ignored".into(),
    };
    let message = compose(&request, &draft, Some(&diagnostics), Vec::new()).unwrap();
    assert!(message.attachments.is_empty());
    assert_eq!(message.kind, FeedbackKind::Other);
}
