//! End-to-end extraction over in-memory documents.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use pretty_assertions::assert_eq;

use nidex_core::{
    ExtractionOrchestrator, ImageCandidate, ImageError, ImageOutputMode, ImageSlots, NidexConfig,
};

const DOCUMENT: &str = "\
National Identity Registration Wing
National ID 19921234567
Pin 19921234567890123
Name(Bangla) রহিম উদ্দিন
Name(English) RAHIM UDDIN
Date of Birth 1992-03-14
Birth Place Gazipur
Father Name KARIM UDDIN
Mother Name RAHIMA BEGUM
Spouse Name
Religion Islam
Blood Group O+
Gender Male
Marital Single
Occupation Student
Education Graduate
Permanent Address Division
Dhaka
District Gazipur
Upozila Sreepur
Union/Ward Telihati
Village/Road Kewa
Post Office Sreepur
Postal Code 1740
";

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::new();
    DynamicImage::new_rgb8(width, height)
        .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
        .unwrap();
    data
}

fn candidates() -> Vec<ImageCandidate> {
    vec![
        ImageCandidate::from_bytes("req_page1_img1.png", b"corrupt".to_vec()),
        ImageCandidate::from_bytes("req_page1_img2.png", png(300, 300)),
        ImageCandidate::from_bytes("req_page1_img3.png", png(600, 150)),
    ]
}

#[test]
fn test_full_document_url_mode() {
    let orchestrator = ExtractionOrchestrator::new().with_image_base_url("https://ids.example/image");
    let result = orchestrator.extract(DOCUMENT, &candidates()).unwrap();

    assert_eq!(result.person.national_id.as_deref(), Some("19921234567"));
    assert_eq!(result.person.pin.as_deref(), Some("19921234567890123"));
    assert_eq!(result.person.name_english.as_deref(), Some("RAHIM UDDIN"));
    assert_eq!(result.person.date_of_birth.as_deref(), Some("1992-03-14"));
    assert_eq!(result.person.blood_group.as_deref(), Some("O+"));
    assert_eq!(result.person.marital_status.as_deref(), Some("Single"));

    assert_eq!(result.permanent_address.division.as_deref(), Some("Dhaka"));
    assert_eq!(result.permanent_address.mouza, None);
    assert_eq!(result.permanent_address.region, None);
    assert_eq!(
        result.full_address,
        "Dhaka, Gazipur, Sreepur, Telihati, Kewa, Sreepur, 1740"
    );

    assert_eq!(
        result.images,
        ImageSlots::Url {
            face_image_url: Some("https://ids.example/image/req_page1_img2.png".to_string()),
            signature_image_url: Some("https://ids.example/image/req_page1_img3.png".to_string()),
        }
    );

    // the corrupt image is reported, not fatal
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].candidate_id, "req_page1_img1.png");
    assert!(matches!(result.diagnostics[0].error, ImageError::Undecodable(_)));
}

#[test]
fn test_bare_label_captures_following_line() {
    // "Spouse Name" has no value; \s+ crosses the line break
    let result = ExtractionOrchestrator::new().extract(DOCUMENT, &[]).unwrap();
    assert_eq!(result.person.spouse_name.as_deref(), Some("Religion Islam"));
}

#[test]
fn test_inline_mode_embeds_png() {
    let mut config = NidexConfig::default();
    config.output.image_mode = ImageOutputMode::Inline;

    let images = candidates();
    let result = ExtractionOrchestrator::from_config(&config)
        .extract(DOCUMENT, &images)
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    let face = json["face_image"].as_str().unwrap();
    // base64 of the PNG signature
    assert!(face.starts_with("iVBORw0KGgo"));
    assert!(json["signature_image"].is_string());
}

#[test]
fn test_only_corrupt_images() {
    let images = vec![ImageCandidate::from_bytes("bad.png", vec![0, 1, 2])];
    let result = ExtractionOrchestrator::new().extract(DOCUMENT, &images).unwrap();

    assert_eq!(result.images.portrait(), None);
    assert_eq!(result.images.signature(), None);
    assert_eq!(result.person.gender.as_deref(), Some("Male"));
}

#[test]
fn test_signature_fallback_end_to_end() {
    let images = vec![
        ImageCandidate::from_bytes("a.png", png(20, 20)),
        ImageCandidate::from_bytes("b.png", png(50, 300)),
    ];
    let result = ExtractionOrchestrator::new().extract("", &images).unwrap();

    assert_eq!(result.portrait_id, None);
    assert_eq!(result.signature_id.as_deref(), Some("b.png"));
}

#[test]
fn test_byte_identical_reruns() {
    let orchestrator = ExtractionOrchestrator::new();
    let images = candidates();

    let first = orchestrator.extract(DOCUMENT, &images).unwrap().to_json(true).unwrap();
    let second = orchestrator.extract(DOCUMENT, &images).unwrap().to_json(true).unwrap();

    assert_eq!(first, second);
}
