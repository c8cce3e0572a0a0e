mod common;

use common::{tricky, tricky_export};
use gtm_export_provider::{
    ExportProvider, ExportSource, FolderKey, Lookup, ProviderError, ProviderOptions,
};
use pretty_assertions::assert_eq;
use std::io::Write;

fn key(selector: &str) -> FolderKey {
    FolderKey::parse(selector).unwrap()
}

fn tag_ids(tags: Vec<&gtm_export_provider::Tag>) -> Vec<&str> {
    tags.into_iter().map(|t| t.tag_id.as_str()).collect()
}

// ── Folder resolution ────────────────────────────────────────────

#[test]
fn dual_key_prefers_earliest_declared_folder() {
    let provider = tricky();
    // Folder "10" is declared before the folder named "10".
    assert_eq!(provider.find_folder(&key("10")).unwrap().name, "Analytics");
    assert_eq!(tag_ids(provider.tags(Some(&key("10")))), vec!["2"]);
}

#[test]
fn explicit_name_key_skips_id_match() {
    let provider = tricky();
    let by_name = FolderKey::name("10").unwrap();
    assert_eq!(provider.find_folder(&by_name).unwrap().folder_id, "11");
    assert_eq!(tag_ids(provider.tags(Some(&by_name))), vec!["1"]);
}

#[test]
fn explicit_id_key() {
    let provider = tricky();
    let by_id = FolderKey::id("12").unwrap();
    assert_eq!(tag_ids(provider.tags(Some(&by_id))), vec!["4"]);
}

#[test]
fn duplicate_folder_names_resolve_to_first() {
    let provider = tricky();
    let folder = provider.find_folder(&key("Analytics")).unwrap();
    assert_eq!(folder.folder_id, "10");
    assert!(provider.find_tag(Some(&key("Analytics")), "Event").is_none());
}

#[test]
fn unknown_folder_scopes_to_nothing() {
    let provider = tricky();
    let missing = key("Marketing");
    assert!(provider.find_folder(&missing).is_none());
    assert!(provider.tags(Some(&missing)).is_empty());
    assert!(provider.find_tag(Some(&missing), "Pageview").is_none());
}

#[test]
fn folder_of_entity() {
    let provider = tricky();
    let tag = provider.tag("1").unwrap();
    assert_eq!(provider.folder_of(tag).unwrap().folder_id, "11");
    let lost = provider.tag("5").unwrap();
    assert!(provider.folder_of(lost).is_none());
}

// ── Name lookup ──────────────────────────────────────────────────

#[test]
fn unscoped_name_lookup_returns_first_declared() {
    let provider = tricky();
    assert_eq!(provider.find_tag(None, "Pageview").unwrap().tag_id, "1");
}

#[test]
fn scoped_name_lookup_respects_folder() {
    let provider = tricky();
    assert_eq!(provider.find_tag(Some(&key("10")), "Pageview").unwrap().tag_id, "2");
}

#[test]
fn duplicate_names_within_folder_resolve_to_first() {
    let provider = tricky();
    let debug = provider.find_variable(Some(&key("Analytics")), "Debug").unwrap();
    assert_eq!(debug.variable_id, "30");
}

#[test]
fn id_lookup() {
    let provider = tricky();
    assert_eq!(provider.trigger("20").unwrap().name, "All Pages");
    assert_eq!(provider.variable("31").unwrap().variable_id, "31");
    assert!(provider.tag("999").is_none());
}

#[test]
fn dangling_reference_is_ungrouped() {
    let provider = tricky();
    assert_eq!(tag_ids(provider.ungrouped_tags()), vec!["3", "5"]);
    assert_eq!(provider.ungrouped_triggers().len(), 1);
    assert!(provider.ungrouped_variables().is_empty());
}

// ── Lookup shape ─────────────────────────────────────────────────

#[test]
fn lookup_without_name_lists() {
    let provider = tricky();
    match provider.get_tag(None, None) {
        Lookup::All(tags) => assert_eq!(tags.len(), 5),
        other => panic!("expected All, got {other:?}"),
    }
}

#[test]
fn lookup_with_unknown_folder_lists_nothing() {
    let provider = tricky();
    let lookup = provider.get_trigger(Some(&key("nowhere")), None);
    assert_eq!(lookup, Lookup::All(Vec::new()));
    assert!(!lookup.is_not_found());
    assert!(lookup.is_empty());
}

#[test]
fn lookup_with_name_finds_one() {
    let provider = tricky();
    let lookup = provider.get_variable(Some(&key("10")), Some("Debug"));
    assert_eq!(lookup.one().unwrap().variable_id, "30");
    assert_eq!(lookup.len(), 1);
}

#[test]
fn lookup_miss_is_not_found() {
    let provider = tricky();
    assert!(provider.get_tag(None, Some("nope")).is_not_found());
    assert!(provider.get_tag(Some(&key("nowhere")), Some("Pageview")).is_not_found());
    assert!(provider.get_built_in_variable(Some("Click URL")).is_not_found());
}

#[test]
fn lookup_into_vec() {
    let provider = tricky();
    assert_eq!(provider.get_tag(None, Some("Event")).into_vec().len(), 1);
    assert!(provider.get_tag(None, Some("nope")).into_vec().is_empty());
    assert_eq!(provider.get_built_in_variable(None).into_vec().len(), 2);
}

// ── Templates ────────────────────────────────────────────────────

#[test]
fn declared_template_by_name_or_id() {
    let provider = tricky();
    assert_eq!(provider.custom_templates().len(), 1);
    assert_eq!(provider.find_custom_template("Consent Banner").unwrap().template_id, "cvt_1");
    assert_eq!(provider.find_custom_template("cvt_1").unwrap().name, "Consent Banner");
}

#[test]
fn platform_default_template_is_found_but_not_listed() {
    let provider = tricky();
    assert_eq!(provider.find_custom_template("Custom HTML Tag").unwrap().template_id, "0");
    assert_eq!(provider.find_custom_template("0").unwrap().name, "Custom HTML Tag");
    match provider.get_custom_template(None) {
        Lookup::All(templates) => assert_eq!(templates.len(), 1),
        other => panic!("expected All, got {other:?}"),
    }
}

#[test]
fn platform_defaults_can_be_disabled() {
    let bundle = gtm_export_provider::ExportBundle::from_value(tricky_export()).unwrap();
    let options = ProviderOptions {
        include_default_templates: false,
        ..ProviderOptions::default()
    };
    let provider = ExportProvider::with_options(bundle, &options);
    assert!(provider.find_custom_template("Custom HTML Tag").is_none());
    assert!(provider.get_custom_template(Some("0")).is_not_found());
}

// ── Construction ─────────────────────────────────────────────────

#[tokio::test]
async fn load_from_bytes() {
    let bytes = tricky_export().to_string().into_bytes();
    let provider = ExportProvider::load(bytes).await.unwrap();
    assert_eq!(provider.container().public_id, "GTM-TRICKY");
}

#[tokio::test]
async fn load_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(tricky_export().to_string().as_bytes()).unwrap();
    let provider = ExportProvider::open(file.path()).await.unwrap();
    assert_eq!(provider.container_version_id(), "7");
}

#[tokio::test]
async fn missing_file_is_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = ExportProvider::open(&path).await.unwrap_err();
    match err {
        ProviderError::SourceUnavailable { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected SourceUnavailable, got {other}"),
    }
}

#[tokio::test]
async fn malformed_bytes_fail_construction() {
    let err = ExportProvider::load(b"{\"exportTime\": 1}".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::MalformedDocument(_)));
}

#[tokio::test]
async fn size_limit_is_enforced_for_bytes_and_files() {
    let text = tricky_export().to_string();
    let options = ProviderOptions {
        max_source_bytes: Some(16),
        ..ProviderOptions::default()
    };

    let err = ExportProvider::load_with(ExportSource::Bytes(text.clone().into_bytes()), options.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::SourceTooLarge { limit: 16, .. }));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    let err = ExportProvider::load_with(file.path(), options).await.unwrap_err();
    assert!(matches!(err, ProviderError::SourceTooLarge { .. }));
}

#[test]
fn options_deserialize_with_defaults() {
    let options: ProviderOptions = serde_json::from_str(r#"{ "maxSourceBytes": 1024 }"#).unwrap();
    assert_eq!(options.max_source_bytes, Some(1024));
    assert!(options.include_default_templates);
}

// ── Sharing ──────────────────────────────────────────────────────

#[test]
fn provider_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ExportProvider>();
}

#[test]
fn concurrent_readers_see_identical_results() {
    let provider = std::sync::Arc::new(tricky());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let provider = provider.clone();
            std::thread::spawn(move || {
                provider
                    .tags(Some(&FolderKey::parse("10").unwrap()))
                    .iter()
                    .map(|t| t.tag_id.clone())
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["2".to_string()]);
    }
}
