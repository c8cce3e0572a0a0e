use serde_json::{json, Value};

/// Smallest export the normalizer accepts.
pub fn minimal_export() -> Value {
    json!({
        "exportFormatVersion": 2,
        "exportTime": "2018-02-15 09:45:11",
        "containerVersion": {
            "accountId": "124588580",
            "containerId": "6899612",
            "containerVersionId": "2",
            "fingerprint": "1518687838097",
            "container": {
                "accountId": "124588580",
                "containerId": "6899612",
                "name": "gtm4wp container - WIP",
                "publicId": "GTM-N87D32T",
                "usageContext": ["WEB"],
                "fingerprint": "1518687838097"
            }
        }
    })
}

/// Export with one folder and a mix of grouped and ungrouped entities.
pub fn grouped_export() -> Value {
    let mut doc = minimal_export();
    let version = &mut doc["containerVersion"];
    version["folder"] = json!([{ "folderId": "14", "name": "GTM4WP" }]);
    version["tag"] = json!([
        { "tagId": "1", "name": "UA - Pageview", "type": "ua", "parentFolderId": "14",
          "firingTriggerId": ["2147479553"] },
        { "tagId": "2", "name": "Cookie Notice", "type": "html" },
        { "tagId": "3", "name": "Orphan", "type": "html", "parentFolderId": "99" }
    ]);
    version["trigger"] = json!([
        { "triggerId": "13", "name": "Ecommerce events", "type": "CUSTOM_EVENT", "parentFolderId": "14",
          "customEventFilter": [{ "type": "MATCH_REGEX", "parameter": [
              { "type": "TEMPLATE", "key": "arg0", "value": "{{_event}}" },
              { "type": "TEMPLATE", "key": "arg1", "value": ".*" }
          ]}] }
    ]);
    version["variable"] = json!([
        { "variableId": 2, "name": "Reading - Time to Scroll", "type": "v", "parentFolderId": 14 }
    ]);
    version["builtInVariable"] = json!([{ "name": "Page URL", "type": "PAGE_URL" }]);
    doc
}
