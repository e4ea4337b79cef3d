// ── Built-in object kinds ──
//
// Declared schemas for the appliance objects exposed as data sources.
// Adding a kind means adding a table here; the engine needs no other change.

use crate::schema::{FieldSchema, ObjectSchema};

// ── Firewall services ───────────────────────────────────────────────

const FIREWALL_SERVICE_CATEGORY: &[FieldSchema] = &[
    FieldSchema::string("name", "name"),
    FieldSchema::string("comment", "comment"),
    FieldSchema::string("fabric_object", "fabric-object"),
];

const MEMBER_NAME: &[FieldSchema] = &[FieldSchema::string("name", "name")];

const FIREWALL_SERVICE_GROUP: &[FieldSchema] = &[
    FieldSchema::string("name", "name"),
    FieldSchema::string("uuid", "uuid"),
    FieldSchema::string("proxy", "proxy"),
    FieldSchema::list("member", "member", MEMBER_NAME),
    FieldSchema::string("comment", "comment"),
    FieldSchema::int("color", "color"),
    FieldSchema::string("fabric_object", "fabric-object"),
];

const APP_ID: &[FieldSchema] = &[FieldSchema::int("id", "id")];

const FIREWALL_SERVICE_CUSTOM: &[FieldSchema] = &[
    FieldSchema::string("name", "name"),
    FieldSchema::string("uuid", "uuid"),
    FieldSchema::string("proxy", "proxy"),
    FieldSchema::string("category", "category"),
    FieldSchema::string("protocol", "protocol"),
    FieldSchema::string("helper", "helper"),
    FieldSchema::string("iprange", "iprange"),
    FieldSchema::string("fqdn", "fqdn"),
    FieldSchema::int("protocol_number", "protocol-number"),
    FieldSchema::int("icmptype", "icmptype"),
    FieldSchema::int("icmpcode", "icmpcode"),
    FieldSchema::string("tcp_portrange", "tcp-portrange"),
    FieldSchema::string("udp_portrange", "udp-portrange"),
    FieldSchema::string("sctp_portrange", "sctp-portrange"),
    FieldSchema::int("tcp_halfclose_timer", "tcp-halfclose-timer"),
    FieldSchema::int("tcp_halfopen_timer", "tcp-halfopen-timer"),
    FieldSchema::int("tcp_timewait_timer", "tcp-timewait-timer"),
    FieldSchema::int("udp_idle_timer", "udp-idle-timer"),
    FieldSchema::string("session_ttl", "session-ttl"),
    FieldSchema::string("check_reset_range", "check-reset-range"),
    FieldSchema::string("comment", "comment"),
    FieldSchema::int("color", "color"),
    FieldSchema::string("visibility", "visibility"),
    FieldSchema::string("app_service_type", "app-service-type"),
    FieldSchema::list("app_category", "app-category", APP_ID),
    FieldSchema::list("application", "application", APP_ID),
    FieldSchema::string("fabric_object", "fabric-object"),
];

// ── Routing ─────────────────────────────────────────────────────────

const BFD_NEIGHBOR: &[FieldSchema] = &[
    FieldSchema::string("ip", "ip"),
    FieldSchema::string("interface", "interface"),
];

const BFD_MULTIHOP_TEMPLATE: &[FieldSchema] = &[
    FieldSchema::int("id", "id"),
    FieldSchema::string("src", "src"),
    FieldSchema::string("dst", "dst"),
    FieldSchema::int("bfd_desired_min_tx", "bfd-desired-min-tx"),
    FieldSchema::int("bfd_required_min_rx", "bfd-required-min-rx"),
    FieldSchema::int("bfd_detect_mult", "bfd-detect-mult"),
    FieldSchema::string("auth_mode", "auth-mode"),
];

const ROUTER_BFD: &[FieldSchema] = &[
    FieldSchema::list("neighbor", "neighbor", BFD_NEIGHBOR),
    FieldSchema::list("multihop_template", "multihop-template", BFD_MULTIHOP_TEMPLATE),
];

const BFD6_NEIGHBOR: &[FieldSchema] = &[
    FieldSchema::string("ip6_address", "ip6-address"),
    FieldSchema::string("interface", "interface"),
];

const ROUTER_BFD6: &[FieldSchema] = &[
    FieldSchema::list("neighbor", "neighbor", BFD6_NEIGHBOR),
    FieldSchema::list("multihop_template", "multihop-template", BFD_MULTIHOP_TEMPLATE),
];

const SDWAN_ZONE: &[FieldSchema] = &[FieldSchema::string("name", "name")];

const ROUTER_STATIC: &[FieldSchema] = &[
    FieldSchema::int("seq_num", "seq-num"),
    FieldSchema::string("status", "status"),
    FieldSchema::string("dst", "dst"),
    FieldSchema::string("src", "src"),
    FieldSchema::string("gateway", "gateway"),
    FieldSchema::int("distance", "distance"),
    FieldSchema::int("weight", "weight"),
    FieldSchema::int("priority", "priority"),
    FieldSchema::string("device", "device"),
    FieldSchema::string("comment", "comment"),
    FieldSchema::string("blackhole", "blackhole"),
    FieldSchema::string("dynamic_gateway", "dynamic-gateway"),
    FieldSchema::list("sdwan_zone", "sdwan-zone", SDWAN_ZONE),
    FieldSchema::string("dstaddr", "dstaddr"),
    FieldSchema::int("internet_service", "internet-service"),
    FieldSchema::string("internet_service_custom", "internet-service-custom"),
    FieldSchema::string("link_monitor_exempt", "link-monitor-exempt"),
    FieldSchema::int("vrf", "vrf"),
    FieldSchema::string("bfd", "bfd"),
];

const ACCESS_LIST_RULE: &[FieldSchema] = &[
    FieldSchema::int("id", "id"),
    FieldSchema::string("action", "action"),
    FieldSchema::string("prefix", "prefix"),
    FieldSchema::string("wildcard", "wildcard"),
    FieldSchema::string("exact_match", "exact-match"),
    FieldSchema::int("flags", "flags"),
];

const ROUTER_ACCESS_LIST: &[FieldSchema] = &[
    FieldSchema::string("name", "name"),
    FieldSchema::string("comments", "comments"),
    FieldSchema::list("rule", "rule", ACCESS_LIST_RULE),
];

// ── System settings ─────────────────────────────────────────────────

const SYSTEM_FIPS_CC: &[FieldSchema] = &[
    FieldSchema::string("status", "status"),
    FieldSchema::string("entropy_token", "entropy-token"),
    FieldSchema::int("self_test_period", "self-test-period"),
    FieldSchema::string("key_generation_self_test", "key-generation-self-test"),
];

const DNS_SERVER_HOSTNAME: &[FieldSchema] = &[FieldSchema::string("hostname", "hostname")];
const DNS_DOMAIN: &[FieldSchema] = &[FieldSchema::string("domain", "domain")];

const SYSTEM_DNS: &[FieldSchema] = &[
    FieldSchema::string("primary", "primary"),
    FieldSchema::string("secondary", "secondary"),
    FieldSchema::string("protocol", "protocol"),
    FieldSchema::string("ssl_certificate", "ssl-certificate"),
    FieldSchema::list("server_hostname", "server-hostname", DNS_SERVER_HOSTNAME),
    FieldSchema::list("domain", "domain", DNS_DOMAIN),
    FieldSchema::string("ip6_primary", "ip6-primary"),
    FieldSchema::string("ip6_secondary", "ip6-secondary"),
    FieldSchema::int("timeout", "timeout"),
    FieldSchema::int("retry", "retry"),
    FieldSchema::int("dns_cache_limit", "dns-cache-limit"),
    FieldSchema::int("dns_cache_ttl", "dns-cache-ttl"),
    FieldSchema::string("cache_notfound_responses", "cache-notfound-responses"),
    FieldSchema::string("source_ip", "source-ip"),
    FieldSchema::string("interface_select_method", "interface-select-method"),
    FieldSchema::string("interface", "interface"),
    FieldSchema::string("server_select_method", "server-select-method"),
    FieldSchema::string("alt_primary", "alt-primary"),
    FieldSchema::string("alt_secondary", "alt-secondary"),
    FieldSchema::string("log", "log"),
];

// ── Registry ────────────────────────────────────────────────────────

static OBJECTS: &[ObjectSchema] = &[
    ObjectSchema {
        kind: "FirewallServiceCategory",
        data_source: "fortios_firewallservice_category",
        path: "firewall.service/category",
        key_field: Some("name"),
        fields: FIREWALL_SERVICE_CATEGORY,
    },
    ObjectSchema {
        kind: "FirewallServiceGroup",
        data_source: "fortios_firewallservice_group",
        path: "firewall.service/group",
        key_field: Some("name"),
        fields: FIREWALL_SERVICE_GROUP,
    },
    ObjectSchema {
        kind: "FirewallServiceCustom",
        data_source: "fortios_firewallservice_custom",
        path: "firewall.service/custom",
        key_field: Some("name"),
        fields: FIREWALL_SERVICE_CUSTOM,
    },
    ObjectSchema {
        kind: "RouterBfd",
        data_source: "fortios_router_bfd",
        path: "router/bfd",
        key_field: None,
        fields: ROUTER_BFD,
    },
    ObjectSchema {
        kind: "RouterBfd6",
        data_source: "fortios_router_bfd6",
        path: "router/bfd6",
        key_field: None,
        fields: ROUTER_BFD6,
    },
    ObjectSchema {
        kind: "RouterStatic",
        data_source: "fortios_router_static",
        path: "router/static",
        key_field: Some("seq_num"),
        fields: ROUTER_STATIC,
    },
    ObjectSchema {
        kind: "RouterAccessList",
        data_source: "fortios_router_accesslist",
        path: "router/access-list",
        key_field: Some("name"),
        fields: ROUTER_ACCESS_LIST,
    },
    ObjectSchema {
        kind: "SystemFipsCc",
        data_source: "fortios_system_fipscc",
        path: "system/fips-cc",
        key_field: None,
        fields: SYSTEM_FIPS_CC,
    },
    ObjectSchema {
        kind: "SystemDns",
        data_source: "fortios_system_dns",
        path: "system/dns",
        key_field: None,
        fields: SYSTEM_DNS,
    },
];

/// Every registered object kind, in registration order.
pub fn all() -> &'static [ObjectSchema] {
    OBJECTS
}

/// Find a kind by kind name, data source name, or CMDB path.
/// Kind names match case-insensitively.
pub fn lookup(name: &str) -> Option<&'static ObjectSchema> {
    OBJECTS.iter().find(|o| {
        o.kind.eq_ignore_ascii_case(name) || o.data_source == name || o.path == name
    })
}
