//! Contract Test: Record Reconciliation
//!
//! Records are edited through the batched zone update, which returns the
//! whole record list but no ID for the record just added:
//! - the new record is found by name, type, content and TTL
//! - a missing echo is RecordNotEchoed, never a guess
//! - an update deletes the old ID and adds the new record in one call, and
//!   never reports the old ID back even when the reply still lists it
//! - a record can be read by its ID alone, taking the zone from the reply
//! - a deletion is confirmed by absence, even when the status is pending

mod common;

use common::*;
use hostingde_core::model::DnsRecord;
use hostingde_core::{Error, ManagedResource, RecordState};
use serde_json::json;

fn active_zone() -> serde_json::Value {
    found(vec![zone_config("z1", "example.test", "active")])
}

fn ns_record() -> serde_json::Value {
    record("r-ns", "z1", "example.test", "NS", "ns1.hosting.de", 86400)
}

#[tokio::test(start_paused = true)]
async fn created_record_takes_id_from_matching_echo() {
    let transport = ScriptedTransport::new();
    transport.reply(active_zone()).reply(pending(zone(
        zone_config("z1", "example.test", "pending"),
        vec![
            ns_record(),
            record("r-other", "z1", "test.example.test", "CNAME", "www.example.com", 60),
            record("r-new", "z1", "test.example.test", "CNAME", "www.example.com", 3600),
        ],
    )));
    let client = client(&transport);

    let wanted = DnsRecord::new("test.example.test", "CNAME", "www.example.com", 3600);
    let created = client
        .records()
        .create_or_update("z1", wanted.clone(), None)
        .await
        .unwrap();

    assert_eq!(created.id_str(), "r-new");
    assert!(created.same_values(&wanted));

    let update = transport.last_request();
    assert_eq!(update.endpoint(), "zoneUpdate");
    assert_eq!(update.body["zoneConfig"]["id"], "z1");
    assert_eq!(
        update.body["recordsToAdd"],
        json!([{
            "name": "test.example.test",
            "type": "CNAME",
            "content": "www.example.com",
            "ttl": 3600
        }])
    );
    assert!(update.body.get("recordsToDelete").is_none());
}

#[tokio::test(start_paused = true)]
async fn missing_echo_is_an_error() {
    let transport = ScriptedTransport::new();
    transport.reply(active_zone()).reply(success(zone(
        zone_config("z1", "example.test", "active"),
        vec![ns_record()],
    )));
    let client = client(&transport);

    let result = client
        .records()
        .create_or_update(
            "z1",
            DnsRecord::new("a.example.test", "A", "192.0.2.1", 3600),
            None,
        )
        .await;

    match result {
        Err(Error::RecordNotEchoed {
            zone_id,
            name,
            content,
            ..
        }) => {
            assert_eq!(zone_id, "z1");
            assert_eq!(name, "a.example.test");
            assert_eq!(content, "192.0.2.1");
        }
        other => panic!("expected RecordNotEchoed, got {:?}", other),
    }
    // the add is not repeated
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn update_replaces_previous_record() {
    let transport = ScriptedTransport::new();
    transport.reply(active_zone()).reply(success(zone(
        zone_config("z1", "example.test", "active"),
        vec![
            ns_record(),
            record("r-2", "z1", "www.example.test", "A", "192.0.2.2", 300),
        ],
    )));
    let client = client(&transport);

    let current = RecordState {
        id: "r-1".to_string(),
        ..RecordState::new("z1", "www.example.test", "A", "192.0.2.1").with_ttl(300)
    };
    let desired = RecordState::new("z1", "www.example.test", "A", "192.0.2.2").with_ttl(300);

    let updated = RecordState::update(&client, &current, &desired).await.unwrap();

    assert_eq!(updated.id, "r-2");
    assert_eq!(updated.content, "192.0.2.2");

    let body = transport.last_request().body;
    assert_eq!(body["recordsToDelete"], json!([{"id": "r-1", "ttl": 3600}]));
    assert_eq!(body["recordsToAdd"][0]["content"], "192.0.2.2");
}

#[tokio::test(start_paused = true)]
async fn unchanged_update_skips_the_replaced_record() {
    let transport = ScriptedTransport::new();
    transport.reply(active_zone()).reply(pending(zone(
        zone_config("z1", "example.test", "pending"),
        vec![
            ns_record(),
            record("r-old", "z1", "www.example.test", "A", "192.0.2.1", 3600),
            record("r-new", "z1", "www.example.test", "A", "192.0.2.1", 3600),
        ],
    )));
    let client = client(&transport);

    let wanted = DnsRecord::new("www.example.test", "A", "192.0.2.1", 3600);
    let replaced = client
        .records()
        .create_or_update("z1", wanted, Some("r-old"))
        .await
        .unwrap();

    assert_eq!(replaced.id_str(), "r-new");
    let body = transport.last_request().body;
    assert_eq!(body["recordsToDelete"][0]["id"], "r-old");
}

#[tokio::test(start_paused = true)]
async fn replaced_record_alone_is_not_an_echo() {
    let transport = ScriptedTransport::new();
    transport.reply(active_zone()).reply(pending(zone(
        zone_config("z1", "example.test", "pending"),
        vec![record("r-old", "z1", "www.example.test", "A", "192.0.2.1", 3600)],
    )));
    let client = client(&transport);

    let wanted = DnsRecord::new("www.example.test", "A", "192.0.2.1", 3600);
    let result = client
        .records()
        .create_or_update("z1", wanted, Some("r-old"))
        .await;

    assert!(matches!(result, Err(Error::RecordNotEchoed { .. })));
}

#[tokio::test(start_paused = true)]
async fn record_read_by_id_alone_takes_zone_from_reply() {
    let transport = ScriptedTransport::new();
    transport.reply(found(vec![record(
        "r1",
        "z7",
        "www.example.test",
        "A",
        "192.0.2.1",
        300,
    )]));
    let client = client(&transport);

    let current = RecordState {
        id: "r1".to_string(),
        ..RecordState::new("", "", "", "")
    };
    let state = RecordState::read(&client, &current).await.unwrap().unwrap();

    assert_eq!(state.zone_id, "z7");
    assert_eq!(state.name, "www.example.test");
    assert_eq!(state.ttl, 300);

    let body = transport.last_request().body;
    assert_eq!(body["filter"], json!({"field": "RecordId", "value": "r1"}));
}

#[tokio::test(start_paused = true)]
async fn deletion_confirmed_by_absence_even_when_pending() {
    let transport = ScriptedTransport::new();
    transport.reply(active_zone()).reply(pending(zone(
        zone_config("z1", "example.test", "pending"),
        vec![ns_record()],
    )));
    let client = client(&transport);

    client.records().delete("z1", "r-1").await.unwrap();

    let body = transport.last_request().body;
    assert_eq!(body["recordsToDelete"][0]["id"], "r-1");
    assert!(body.get("recordsToAdd").is_none());
}

#[tokio::test(start_paused = true)]
async fn deleted_record_still_listed_is_an_error() {
    let transport = ScriptedTransport::new();
    transport.reply(active_zone()).reply(success(zone(
        zone_config("z1", "example.test", "active"),
        vec![
            ns_record(),
            record("r-1", "z1", "www.example.test", "A", "192.0.2.1", 3600),
        ],
    )));
    let client = client(&transport);

    let result = client.records().delete("z1", "r-1").await;

    assert!(matches!(
        result,
        Err(Error::DeletionNotConfirmed { ref record_id, .. }) if record_id == "r-1"
    ));
}

#[tokio::test(start_paused = true)]
async fn record_read_of_missing_record_is_none() {
    let transport = ScriptedTransport::new();
    transport.reply(found(vec![]));
    let client = client(&transport);

    let current = RecordState {
        id: "r-gone".to_string(),
        ..RecordState::new("z1", "www.example.test", "A", "192.0.2.1")
    };

    assert_eq!(RecordState::read(&client, &current).await.unwrap(), None);

    let body = transport.last_request().body;
    assert_eq!(body["filter"]["subFilterConnective"], "AND");
    assert_eq!(body["filter"]["subFilter"][1]["field"], "RecordId");
    assert_eq!(body["filter"]["subFilter"][1]["value"], "r-gone");
}

#[tokio::test(start_paused = true)]
async fn records_update_sends_all_three_lists() {
    let transport = ScriptedTransport::new();
    transport.reply(success(zone(
        zone_config("z1", "example.test", "active"),
        vec![record("r-9", "z1", "mail.example.test", "MX", "10 mx.example.test", 3600)],
    )));
    let client = client(&transport);

    let mut modified = DnsRecord::new("www.example.test", "A", "192.0.2.9", 3600);
    modified.id = Some("r-5".to_string());

    let zone = client
        .records()
        .update_records(
            "z1",
            vec![DnsRecord::new("mail.example.test", "MX", "10 mx.example.test", 3600)],
            vec![modified],
            vec![DnsRecord::reference("r-6")],
        )
        .await
        .unwrap();

    assert_eq!(zone.records.len(), 1);
    let request = transport.last_request();
    assert_eq!(request.endpoint(), "recordsUpdate");
    assert_eq!(request.body["zoneConfigId"], "z1");
    assert_eq!(request.body["recordsToModify"][0]["id"], "r-5");
    assert_eq!(request.body["recordsToDelete"][0]["id"], "r-6");
    assert_eq!(request.body["recordsToAdd"][0]["type"], "MX");
}
