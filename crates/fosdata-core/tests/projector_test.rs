#![allow(clippy::unwrap_used)]
// Projector behaviour against in-memory readers, plus one end-to-end read
// through the REST client.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fosdata_core::schema::FieldSchema;
use fosdata_core::{
    ApplianceConfig, AttributeStore, CoreError, Destination, FieldValue, NeverExempt,
    ObjectSchema, Projector, RawObject, ReadOutcome, Reader, SetError, registry,
};

// ── Fakes ───────────────────────────────────────────────────────────

type Call = (String, Option<String>, Option<String>);

#[derive(Default)]
struct FakeReader {
    objects: HashMap<(String, Option<String>), RawObject>,
    failure: Option<fn() -> CoreError>,
    calls: Mutex<Vec<Call>>,
}

impl FakeReader {
    fn with_object(mut self, path: &str, key: Option<&str>, raw: Value) -> Self {
        let Value::Object(map) = raw else {
            panic!("fake objects must be JSON objects");
        };
        self.objects
            .insert((path.to_owned(), key.map(str::to_owned)), map);
        self
    }

    fn failing(failure: fn() -> CoreError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl Reader for FakeReader {
    async fn read(
        &self,
        object: &ObjectSchema,
        key: Option<&str>,
        scope: Option<&str>,
    ) -> Result<Option<RawObject>, CoreError> {
        self.calls.lock().unwrap().push((
            object.path.to_owned(),
            key.map(str::to_owned),
            scope.map(str::to_owned),
        ));
        if let Some(failure) = self.failure {
            return Err(failure());
        }
        Ok(self
            .objects
            .get(&(object.path.to_owned(), key.map(str::to_owned)))
            .cloned())
    }
}

fn kind(name: &str) -> &'static ObjectSchema {
    registry::lookup(name).unwrap()
}

// ── Found / not found ───────────────────────────────────────────────

#[tokio::test]
async fn test_found_object_writes_fields_and_identity() {
    let reader = FakeReader::default().with_object(
        "firewall.service/category",
        Some("svc1"),
        json!({"name": "svc1", "comment": "x", "q_origin_key": "svc1"}),
    );
    let projector = Projector::new(reader);
    let object = kind("FirewallServiceCategory");
    let mut store = AttributeStore::for_object(object);

    let outcome = projector
        .describe(object, Some(&json!("svc1")), None, &mut store)
        .await
        .unwrap();

    assert_eq!(outcome, ReadOutcome::Found { id: "svc1".into() });
    assert_eq!(store.id(), "svc1");
    assert_eq!(store.get("name"), Some(&FieldValue::from("svc1")));
    assert_eq!(store.get("comment"), Some(&FieldValue::from("x")));
    assert!(store.get("fabric_object").is_none());
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_missing_object_clears_identity() {
    let projector = Projector::new(FakeReader::default());
    let object = kind("FirewallServiceCategory");
    let mut store = AttributeStore::for_object(object);
    store.set_id("stale");

    let outcome = projector
        .describe(object, Some(&json!("gone")), None, &mut store)
        .await
        .unwrap();

    assert_eq!(outcome, ReadOutcome::NotFound);
    assert_eq!(store.id(), "");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_integer_key_is_stringified() {
    let reader = FakeReader::default().with_object(
        "router/static",
        Some("7"),
        json!({"seq-num": 7, "dst": "10.0.0.0 255.0.0.0", "distance": "10"}),
    );
    let projector = Projector::new(reader);
    let object = kind("RouterStatic");
    let mut store = AttributeStore::for_object(object);

    let outcome = projector
        .describe(object, Some(&json!(7)), None, &mut store)
        .await
        .unwrap();

    assert_eq!(outcome, ReadOutcome::Found { id: "7".into() });
    assert_eq!(store.get("seq_num"), Some(&FieldValue::from(7_i64)));
    assert_eq!(store.get("distance"), Some(&FieldValue::from(10_i64)));
    assert_eq!(projector.reader().calls()[0].1.as_deref(), Some("7"));
}

#[tokio::test]
async fn test_describe_kind_by_data_source_name() {
    let reader = FakeReader::default().with_object(
        "firewall.service/category",
        Some("svc1"),
        json!({"name": "svc1"}),
    );
    let projector = Projector::new(reader);
    let mut store = AttributeStore::for_object(kind("FirewallServiceCategory"));

    let outcome = projector
        .describe_kind(
            "fortios_firewallservice_category",
            Some(&json!("svc1")),
            None,
            &mut store,
        )
        .await
        .unwrap();
    assert_eq!(outcome, ReadOutcome::Found { id: "svc1".into() });
}

// ── Singletons and nested lists ─────────────────────────────────────

#[tokio::test]
async fn test_singleton_identity_is_kind_name() {
    let reader = FakeReader::default().with_object(
        "router/bfd",
        None,
        json!({"neighbor": [{"ip": "10.0.0.1", "interface": "port1"}]}),
    );
    let projector = Projector::new(reader);
    let object = kind("RouterBfd");
    let mut store = AttributeStore::for_object(object);

    // Any key passed for a singleton is ignored.
    let outcome = projector
        .describe(object, Some(&json!("ignored")), None, &mut store)
        .await
        .unwrap();

    assert_eq!(outcome, ReadOutcome::Found { id: "RouterBfd".into() });
    assert_eq!(store.id(), "RouterBfd");
    assert_eq!(
        store.get_path("neighbor.0.ip").and_then(FieldValue::as_str),
        Some("10.0.0.1")
    );
    assert_eq!(
        store.get_path("neighbor.0.interface").and_then(FieldValue::as_str),
        Some("port1")
    );
    assert_eq!(store.get("neighbor").and_then(FieldValue::as_list).map(<[_]>::len), Some(1));
    assert!(store.get("multihop_template").is_none());
    assert_eq!(projector.reader().calls()[0].1, None);
}

#[tokio::test]
async fn test_placeholder_list_collapses_to_empty() {
    let reader = FakeReader::default().with_object(
        "router/bfd",
        None,
        json!({"neighbor": [null], "multihop-template": []}),
    );
    let projector = Projector::new(reader);
    let object = kind("RouterBfd");
    let mut store = AttributeStore::for_object(object);

    projector.describe(object, None, None, &mut store).await.unwrap();

    assert_eq!(store.get("neighbor").and_then(FieldValue::as_list), Some(&[][..]));
    assert_eq!(
        store.get("multihop_template").and_then(FieldValue::as_list),
        Some(&[][..])
    );
}

// ── Compatibility exemption ─────────────────────────────────────────

// Older attribute schema without `entropy_token`.
const LEGACY_FIPS_CC: &[FieldSchema] = &[
    FieldSchema::string("status", "status"),
    FieldSchema::int("self_test_period", "self-test-period"),
    FieldSchema::string("key_generation_self_test", "key-generation-self-test"),
];

#[tokio::test]
async fn test_rejected_placeholder_is_ignored() {
    let reader = FakeReader::default().with_object(
        "system/fips-cc",
        None,
        json!({"status": "disable", "entropy-token": "", "self-test-period": 1440}),
    );
    let projector = Projector::new(reader);
    let mut store = AttributeStore::new(LEGACY_FIPS_CC);

    let outcome = projector
        .describe_kind("SystemFipsCc", None, None, &mut store)
        .await
        .unwrap();

    assert_eq!(outcome, ReadOutcome::Found { id: "SystemFipsCc".into() });
    assert_eq!(store.get("status"), Some(&FieldValue::from("disable")));
    assert_eq!(store.get("self_test_period"), Some(&FieldValue::from(1440_i64)));
    assert!(store.get("entropy_token").is_none());
}

#[tokio::test]
async fn test_rejected_real_value_fails_and_names_field() {
    let reader = FakeReader::default().with_object(
        "system/fips-cc",
        None,
        json!({"status": "enable", "entropy-token": "enable", "self-test-period": 1440}),
    );
    let projector = Projector::new(reader);
    let mut store = AttributeStore::new(LEGACY_FIPS_CC);
    store.set_id("SystemFipsCc");

    let err = projector
        .describe_kind("SystemFipsCc", None, None, &mut store)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "describing SystemFipsCc: Error reading entropy_token: unknown attribute 'entropy_token'"
    );
    match err.root() {
        CoreError::FieldWrite { field, source } => {
            assert_eq!(field, "entropy_token");
            assert_eq!(
                source,
                &SetError::UnknownAttribute {
                    path: "entropy_token".into()
                }
            );
        }
        other => panic!("expected FieldWrite, got {other:?}"),
    }
    // Fields before the failure stay written; identity is untouched.
    assert_eq!(store.get("status"), Some(&FieldValue::from("enable")));
    assert_eq!(store.id(), "SystemFipsCc");
}

#[tokio::test]
async fn test_strict_exemption_rejects_placeholders() {
    let reader = FakeReader::default().with_object(
        "system/fips-cc",
        None,
        json!({"entropy-token": ""}),
    );
    let projector = Projector::new(reader).with_exemption(NeverExempt);
    let mut store = AttributeStore::new(LEGACY_FIPS_CC);

    let err = projector
        .describe_kind("SystemFipsCc", None, None, &mut store)
        .await
        .unwrap_err();
    assert!(matches!(err.root(), CoreError::FieldWrite { field, .. } if field == "entropy_token"));
}

#[tokio::test]
async fn test_closure_exemption() {
    let reader = FakeReader::default().with_object(
        "system/fips-cc",
        None,
        json!({"entropy-token": "enable"}),
    );
    let projector = Projector::new(reader).with_exemption(|_: Option<&Value>| true);
    let mut store = AttributeStore::new(LEGACY_FIPS_CC);

    let outcome = projector
        .describe_kind("SystemFipsCc", None, None, &mut store)
        .await
        .unwrap();
    assert_eq!(outcome, ReadOutcome::Found { id: "SystemFipsCc".into() });
    assert!(store.is_empty());
}

// ── Scope ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_scope_resolution() {
    let projector = Projector::new(FakeReader::default()).with_default_scope("root");
    let object = kind("FirewallServiceCategory");
    let mut store = AttributeStore::for_object(object);
    let key = json!("svc1");

    projector.describe(object, Some(&key), None, &mut store).await.unwrap();
    projector
        .describe(object, Some(&key), Some("dmz"), &mut store)
        .await
        .unwrap();
    projector
        .describe(object, Some(&key), Some(""), &mut store)
        .await
        .unwrap();

    let scopes: Vec<_> = projector
        .reader()
        .calls()
        .into_iter()
        .map(|(_, _, scope)| scope)
        .collect();
    assert_eq!(scopes, vec![Some("root".to_owned()), Some("dmz".to_owned()), None]);
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_non_scalar_key_is_rejected_before_read() {
    let projector = Projector::new(FakeReader::default());
    let object = kind("RouterStatic");
    let mut store = AttributeStore::for_object(object);

    let err = projector
        .describe(object, Some(&json!(2.5)), None, &mut store)
        .await
        .unwrap_err();

    assert!(matches!(err.root(), CoreError::LookupKeyType { found: "float" }));
    assert!(projector.reader().calls().is_empty());
}

#[tokio::test]
async fn test_table_kind_requires_key() {
    let projector = Projector::new(FakeReader::default());
    let object = kind("RouterAccessList");
    let mut store = AttributeStore::for_object(object);

    let err = projector
        .describe(object, None, None, &mut store)
        .await
        .unwrap_err();
    assert!(matches!(
        err.root(),
        CoreError::MissingKey { key_field: "name", .. }
    ));
}

#[tokio::test]
async fn test_empty_key_is_rejected_before_read() {
    let projector = Projector::new(FakeReader::default());
    let object = kind("FirewallServiceCategory");
    let mut store = AttributeStore::for_object(object);
    store.set_id("Web Access");

    let err = projector
        .describe(object, Some(&json!("")), None, &mut store)
        .await
        .unwrap_err();

    assert!(matches!(
        err.root(),
        CoreError::MissingKey { key_field: "name", .. }
    ));
    assert!(projector.reader().calls().is_empty());
    assert!(store.is_empty());
    assert_eq!(store.id(), "Web Access");
}

#[tokio::test]
async fn test_unknown_kind() {
    let projector = Projector::new(FakeReader::default());
    let mut store = AttributeStore::new(&[]);

    let err = projector
        .describe_kind("FirewallPolicy", Some(&json!("1")), None, &mut store)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::UnknownKind { ref kind } if kind == "FirewallPolicy"));
}

#[tokio::test]
async fn test_reader_errors_carry_kind_context() {
    let projector = Projector::new(FakeReader::failing(|| CoreError::Transport {
        message: "connection refused".into(),
        auth: false,
    }));
    let object = kind("SystemDns");
    let mut store = AttributeStore::for_object(object);
    store.set_id("SystemDns");

    let err = projector
        .describe(object, None, None, &mut store)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "describing SystemDns: Transport error: connection refused"
    );
    assert!(matches!(err.root(), CoreError::Transport { auth: false, .. }));
    // A failed read never clears identity.
    assert_eq!(store.id(), "SystemDns");

    let projector = Projector::new(FakeReader::failing(|| CoreError::Server {
        message: "Invalid vdom".into(),
        status: Some(424),
    }));
    let err = projector
        .describe(object, None, None, &mut store)
        .await
        .unwrap_err();
    assert!(matches!(err.root(), CoreError::Server { status: Some(424), .. }));
}

// ── End to end ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_connect_reads_through_rest_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/router/static/7"))
        .and(query_param("vdom", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "http_status": 200,
            "results": [{"seq-num": 7, "gateway": "192.0.2.1", "sdwan-zone": []}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ApplianceConfig::new(
        Url::parse(&server.uri()).unwrap(),
        SecretString::from("token".to_string()),
    );
    config.vdom = Some("root".into());
    config.retries = 0;
    config.timeout = Duration::from_secs(5);

    let projector = Projector::connect(&config).unwrap();
    let object = kind("RouterStatic");
    let mut store = AttributeStore::for_object(object);

    let outcome = projector
        .describe(object, Some(&json!(7)), None, &mut store)
        .await
        .unwrap();

    assert_eq!(outcome, ReadOutcome::Found { id: "7".into() });
    assert_eq!(store.get("gateway"), Some(&FieldValue::from("192.0.2.1")));
    assert_eq!(store.get("sdwan_zone").and_then(FieldValue::as_list), Some(&[][..]));
}

#[tokio::test]
async fn test_empty_key_never_reads_the_table_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "http_status": 200,
            "results": [
                {"name": "Web Access", "comment": "first row"},
                {"name": "Email"},
            ],
        })))
        .expect(0)
        .mount(&server)
        .await;

    let config = ApplianceConfig::new(
        Url::parse(&server.uri()).unwrap(),
        SecretString::from("token".to_string()),
    );
    let projector = Projector::connect(&config).unwrap();
    let object = kind("FirewallServiceCategory");
    let mut store = AttributeStore::for_object(object);

    let result = projector
        .describe(object, Some(&json!("")), None, &mut store)
        .await;

    assert!(result.is_err(), "got {result:?}");
    assert_eq!(store.get("name"), None);
    assert_eq!(store.id(), "");
}
