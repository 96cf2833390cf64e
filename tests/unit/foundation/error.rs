use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SwatchfitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SwatchfitError::config("x")
            .to_string()
            .contains("config error:")
    );
    let nf = SwatchfitError::AssetNotFound {
        kind: AssetKind::Swatch,
        name: "FAB-1".to_string(),
        dir: PathBuf::from("swatches"),
    };
    assert_eq!(nf.to_string(), "swatch not found: 'FAB-1' in 'swatches'");

    let dm = SwatchfitError::DimensionMismatch {
        template: (10, 20),
        mask: (10, 21),
    };
    assert_eq!(
        dm.to_string(),
        "dimension mismatch: template 10x20 vs mask 10x21"
    );
}

#[test]
fn per_view_classification() {
    let empty = SwatchfitError::EmptyMask {
        path: PathBuf::from("m.png"),
        threshold: 200,
    };
    assert!(empty.is_per_view());
    assert!(SwatchfitError::io("x", std::io::Error::other("boom")).is_per_view());
    assert!(
        SwatchfitError::DimensionMismatch {
            template: (1, 1),
            mask: (2, 2)
        }
        .is_per_view()
    );

    let nf = SwatchfitError::AssetNotFound {
        kind: AssetKind::Template,
        name: "polo".to_string(),
        dir: PathBuf::from("t"),
    };
    assert!(!nf.is_per_view());
    assert!(!SwatchfitError::validation("bad").is_per_view());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SwatchfitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
