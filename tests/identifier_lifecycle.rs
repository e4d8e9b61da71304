//! End-to-end lifecycle behavior of the identification service.

use std::path::PathBuf;
use std::sync::Arc;
use wilda::catalog::Catalog;
use wilda::classify::{Identifier, IdentifyOptions};
use wilda::imaging::PixelBuffer;

fn gray_image(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::new(width, height, vec![128; width as usize * height as usize * 3])
        .expect("valid buffer dimensions")
}

#[tokio::test]
async fn missing_model_file_lands_in_fallback() {
    let service = Identifier::new(
        Catalog::bundled().expect("bundled catalog"),
        IdentifyOptions::default(),
        Some(PathBuf::from("/nonexistent/wildlife.onnx")),
    );

    service.load().await;
    assert!(service.is_fallback());
    assert!(!service.is_loaded());

    // Fallback is sticky: further loads and identifications never promote.
    service.load().await;
    let _ = service.identify(&gray_image(64, 64)).await;
    assert!(service.is_fallback());
}

#[tokio::test]
async fn corrupt_model_file_lands_in_fallback() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let model_path = dir.path().join("wildlife.onnx");
    std::fs::write(&model_path, b"not an onnx model").expect("write model file");

    let service = Identifier::new(
        Catalog::bundled().expect("bundled catalog"),
        IdentifyOptions::default(),
        Some(model_path),
    );

    let result = service.identify(&gray_image(64, 64)).await;
    assert!(service.is_fallback());
    assert!(result.species.is_some(), "fallback still identifies");
}

#[tokio::test]
async fn fallback_results_respect_confidence_bounds() {
    let service = Identifier::new(
        Catalog::bundled().expect("bundled catalog"),
        IdentifyOptions::default(),
        None,
    );

    for _ in 0..200 {
        let result = service.identify(&gray_image(32, 32)).await;
        let species = result.species.expect("non-empty catalog always identifies");
        assert!(
            (0.70..=0.98).contains(&result.confidence),
            "confidence {} out of band for {}",
            result.confidence,
            species.id
        );
    }
}

#[tokio::test]
async fn zero_size_image_is_identified_without_error() {
    let service = Identifier::new(
        Catalog::bundled().expect("bundled catalog"),
        IdentifyOptions::default(),
        None,
    );

    let result = service.identify(&PixelBuffer::empty()).await;
    assert!(result.species.is_some());
}

#[tokio::test]
async fn concurrent_identifications_share_one_load() {
    // All tasks race identify() on a service that was never loaded; every one
    // must resolve and observe the same post-load state.
    let service = Arc::new(Identifier::new(
        Catalog::bundled().expect("bundled catalog"),
        IdentifyOptions::default(),
        Some(PathBuf::from("/nonexistent/wildlife.onnx")),
    ));

    let tasks: Vec<_> = (0..12)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.identify(&gray_image(16, 16)).await })
        })
        .collect();

    for task in tasks {
        let result = task.await.expect("task completes");
        assert!(result.species.is_some());
    }

    assert!(service.is_fallback());
}
