//! Catalog override loading tests.

use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;
use valuemap::config::load_catalog_from_path;
use valuemap::{Engine, EstimateError, IndustryCatalog, IndustryCoefficients};

#[test]
fn override_file_replaces_and_extends_the_builtin_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        indoc! {r#"
            [industries."Retail"]
            manual_actions_per_entity = 120.0
            cost_per_click = 2.5

            [industries."Space Tourism"]
            manual_actions_per_entity = 12.5
        "#},
    )
    .unwrap();

    let catalog = load_catalog_from_path(&path).unwrap();
    assert_eq!(catalog.names().len(), 13);
    assert_eq!(
        catalog.get("Retail").unwrap().manual_actions_per_entity,
        120.0
    );
    assert_eq!(catalog.get("Retail").unwrap().cost_per_click, 2.5);
    // untouched industries keep their built-in records
    assert_eq!(
        catalog.get("Healthcare"),
        IndustryCatalog::builtin().get("Healthcare")
    );
    // omitted fields in an override record take the generic defaults
    assert_eq!(
        catalog.get("Space Tourism").unwrap().cost_per_click,
        IndustryCoefficients::default().cost_per_click
    );
}

#[test]
fn missing_override_file_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let err = load_catalog_from_path(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, EstimateError::Configuration(_)));
}

#[test]
fn invalid_coefficients_in_an_override_are_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        indoc! {r#"
            [industries."Retail"]
            cost_per_click = -3.0
        "#},
    )
    .unwrap();

    let err = load_catalog_from_path(&path).unwrap_err();
    match err {
        EstimateError::Configuration(message) => {
            assert!(message.contains("Retail"));
            assert!(message.contains("cost_per_click"));
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn an_engine_built_on_an_override_catalog_uses_its_coefficients() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        indoc! {r#"
            [industries."Space Tourism"]
            manual_actions_per_entity = 10.0
        "#},
    )
    .unwrap();

    let catalog = load_catalog_from_path(&path).unwrap();
    let mut engine = Engine::with_catalog(catalog);
    engine.set_industry("Space Tourism").unwrap();
    engine.set_entity_count("4");
    engine.toggle_product(valuemap::Product::Listings, true);

    // manual actions = ceil2(10.0 * 3 * 4)
    assert_eq!(engine.snapshot().metrics.manual_actions_saved, 120.0);
}
