use image::{GrayImage, Luma, Rgba, RgbaImage};

use super::*;
use crate::config::MockupConfig;

fn save(path: &Path, img: image::DynamicImage) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

fn tote_fixture(root: &Path, fabrics: &[&str]) -> MockupConfig {
    let config = MockupConfig::with_root(root);
    for (i, f) in fabrics.iter().enumerate() {
        let shade = (i as u8).wrapping_mul(40);
        save(
            &config.swatch_dir.join(format!("{f}.png")),
            RgbaImage::from_pixel(4, 4, Rgba([shade, 10, 10, 255])).into(),
        );
    }
    save(&config.template_dir.join("tote.png"), RgbaImage::new(10, 10).into());
    save(
        &config.mask_dir.join("tote_mask.png"),
        GrayImage::from_pixel(10, 10, Luma([255])).into(),
    );
    config
}

#[test]
fn batch_preserves_request_order() {
    let root = tempfile::tempdir().unwrap();
    let fabrics = ["FAB-1", "FAB-2", "FAB-3", "FAB-4", "FAB-5", "FAB-6"];
    let generator = MockupGenerator::new(tote_fixture(root.path(), &fabrics)).unwrap();

    let mut requests: Vec<MockupRequest> =
        fabrics.iter().map(|f| MockupRequest::new(*f, "Tote")).collect();
    requests.insert(2, MockupRequest::new("FAB-404", "Tote"));

    let entries = generator.generate_batch(&requests);
    assert_eq!(entries.len(), requests.len());
    for (entry, req) in entries.iter().zip(&requests) {
        assert_eq!(&entry.request, req);
        let paths = entry.result.as_ref().unwrap();
        if req.fabric_ref == "FAB-404" {
            assert!(paths.is_empty());
        } else {
            assert_eq!(paths.len(), 1);
            assert!(
                paths[0].ends_with(format!("{}_tote_single.png", req.fabric_ref)),
                "{}",
                paths[0].display()
            );
        }
    }
}

#[test]
fn read_requests_parses_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("requests.json");
    std::fs::write(
        &path,
        r#"[
  { "fabric_ref": "FAB-101", "garment_type": "men polo" },
  { "fabric_ref": "FAB-102", "garment_type": "Ladies Hoodie" }
]"#,
    )
    .unwrap();

    let reqs = read_requests(&path).unwrap();
    assert_eq!(
        reqs,
        vec![
            MockupRequest::new("FAB-101", "men polo"),
            MockupRequest::new("FAB-102", "Ladies Hoodie"),
        ]
    );

    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        read_requests(&path).unwrap_err(),
        SwatchfitError::Validation(_)
    ));
    assert!(matches!(
        read_requests(&dir.path().join("missing.json")).unwrap_err(),
        SwatchfitError::Io { .. }
    ));
}

#[test]
fn identical_requests_leave_complete_files_and_no_temps() {
    let root = tempfile::tempdir().unwrap();
    let config = tote_fixture(root.path(), &["FAB-1"]);
    let out_dir = config.output_dir.clone();
    let generator = MockupGenerator::new(config).unwrap();

    let requests = vec![MockupRequest::new("FAB-1", "tote"); 16];
    let entries = generator.generate_batch(&requests);

    let expected = out_dir.join("FAB-1_tote_single.png");
    for entry in &entries {
        assert_eq!(entry.result.as_ref().unwrap(), &vec![expected.clone()]);
    }
    let img = image::open(&expected).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (10, 10));
    assert!(img.pixels().all(|p| p.0[3] == 255));

    let names: Vec<String> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["FAB-1_tote_single.png".to_string()]);
}
