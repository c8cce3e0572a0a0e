use std::path::PathBuf;

use gtm_export_provider::ExportProvider;
use serde_json::{json, Value};

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wordpress.gtm-export.json")
}

pub fn wordpress_fixture() -> ExportProvider {
    let bytes = std::fs::read(fixture_path()).unwrap();
    ExportProvider::from_slice(&bytes).unwrap()
}

/// Export with two folders, duplicate names and one folder whose name is
/// another folder's id.
pub fn tricky_export() -> Value {
    json!({
        "exportFormatVersion": 2,
        "exportTime": "2020-06-01 12:00:00",
        "containerVersion": {
            "accountId": "1",
            "containerId": "2",
            "containerVersionId": "7",
            "fingerprint": "42",
            "container": {
                "accountId": "1", "containerId": "2", "name": "tricky",
                "publicId": "GTM-TRICKY", "usageContext": ["WEB"], "fingerprint": "42"
            },
            "folder": [
                { "folderId": "10", "name": "Analytics" },
                { "folderId": "11", "name": "10" },
                { "folderId": "12", "name": "Analytics" }
            ],
            "tag": [
                { "tagId": "1", "name": "Pageview", "type": "ua", "parentFolderId": "11" },
                { "tagId": "2", "name": "Pageview", "type": "ua", "parentFolderId": "10" },
                { "tagId": "3", "name": "Pageview", "type": "ua" },
                { "tagId": "4", "name": "Event", "type": "ua", "parentFolderId": "12" },
                { "tagId": "5", "name": "Lost", "type": "html", "parentFolderId": "404" }
            ],
            "trigger": [
                { "triggerId": "20", "name": "All Pages", "type": "PAGEVIEW" }
            ],
            "variable": [
                { "variableId": "30", "name": "Debug", "type": "d", "parentFolderId": "10" },
                { "variableId": "31", "name": "Debug", "type": "d", "parentFolderId": "10" }
            ],
            "builtInVariable": [
                { "name": "Event", "type": "EVENT" },
                { "name": "Page URL", "type": "PAGE_URL" }
            ],
            "customTemplate": [
                { "templateId": "cvt_1", "name": "Consent Banner", "templateData": "___INFO___" }
            ]
        }
    })
}

pub fn tricky() -> ExportProvider {
    ExportProvider::from_value(tricky_export()).unwrap()
}
