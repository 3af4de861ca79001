//! Classification of response bodies across every dashboard resource.

use dashboard_core::{
    classify,
    discriminate::{is_id_list, is_named_object},
    Classified, GuildProfile, GuildSummary, NormalizedError, OptionCategory, Resource,
};
use rstest::rstest;
use serde_json::{json, Value};

fn envelope(code: &str) -> Value {
    json!({
        "statusCode": 403,
        "code": code,
        "error": "Forbidden",
        "message": "missing permission",
    })
}

// ---------------------------------------------------------------------------
// 1. Structural predicates
// ---------------------------------------------------------------------------

#[rstest]
#[case(json!({"id": "1", "name": "Hub"}), true)]
#[case(json!({"id": "1", "name": "Hub", "description": "x"}), true)]
#[case(json!({"id": 1, "name": "Hub"}), false)]
#[case(json!({"name": "Hub"}), false)]
#[case(json!({"id": "1"}), false)]
#[case(json!([{"id": "1", "name": "Hub"}]), false)]
#[case(json!("Hub"), false)]
#[case(Value::Null, false)]
fn named_object_predicate(#[case] payload: Value, #[case] expected: bool) {
    assert_eq!(is_named_object(&payload), expected);
}

#[rstest]
#[case(json!([]), true)]
#[case(json!([{"id": "1"}, {"id": "2", "name": "b"}]), true)]
#[case(json!([{"id": "1"}, {"id": 2}]), false)]
#[case(json!([{"id": "1"}, "2"]), false)]
#[case(json!([null]), false)]
#[case(json!({"id": "1"}), false)]
#[case(json!(true), false)]
fn id_list_predicate(#[case] payload: Value, #[case] expected: bool) {
    assert_eq!(is_id_list(&payload), expected);
}

// ---------------------------------------------------------------------------
// 2. Classification
// ---------------------------------------------------------------------------

#[test]
fn success_payload_decodes_to_data() {
    let payload = json!([{"id": "10", "name": "General", "options": []}]);
    let classified: Classified<Vec<OptionCategory>> = classify(payload, is_id_list);
    let categories = match classified {
        Classified::Success(categories) => categories,
        other => panic!("expected success, got {other:?}"),
    };
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, "10");
    assert_eq!(categories[0].name(), Some("General"));
    assert!(categories[0].extra.contains_key("options"));
}

#[test]
fn envelope_payload_becomes_server_error() {
    let classified: Classified<GuildProfile> = classify(envelope("FORBIDDEN"), is_named_object);
    assert_eq!(
        classified,
        Classified::ServerError(NormalizedError {
            name: "Forbidden".to_string(),
            status: 403,
            message: "missing permission".to_string(),
            code: "FORBIDDEN".to_string(),
        })
    );
}

#[rstest]
#[case(json!({"unexpected": true}))]
#[case(json!([1, 2, 3]))]
#[case(json!("text"))]
#[case(json!({"statusCode": 500, "code": "X"}))]
fn shape_mismatch_yields_fixed_fallback(#[case] payload: Value) {
    let classified: Classified<Vec<GuildSummary>> = classify(payload, is_id_list);
    assert_eq!(classified.into_result(), Err(NormalizedError::internal()));
}

#[test]
fn resource_predicate_is_used_for_classification() {
    let resource = Resource::guild_collection();
    let payload = json!([{"id": "1", "name": "A", "icon": null}]);
    let classified: Classified<Vec<GuildSummary>> = classify(payload, resource.predicate());
    assert!(matches!(classified, Classified::Success(ref guilds) if guilds.len() == 1));
}

#[rstest]
#[case(json!({"id": "1", "name": "Hub", "description": 5}))]
#[case(json!({"id": "1", "name": "Hub", "description": null}))]
#[case(json!({"id": "1", "name": "Hub", "description": ["a"], "icon": {"hash": 7}}))]
fn accepted_profile_decodes_whatever_else_it_carries(#[case] payload: Value) {
    let classified: Classified<GuildProfile> = classify(payload.clone(), is_named_object);
    let profile = classified.into_result().expect("accepted payload decodes");
    assert_eq!(serde_json::to_value(&profile).expect("encode"), payload);
}

#[rstest]
#[case(json!([{"id": "1", "name": 7}]))]
#[case(json!([{"id": "1", "name": null, "icon": null}]))]
#[case(json!([{"id": "1"}, {"id": "2", "name": "B", "owner": false}]))]
fn accepted_guild_list_decodes_whatever_else_it_carries(#[case] payload: Value) {
    let classified: Classified<Vec<GuildSummary>> = classify(payload.clone(), is_id_list);
    let guilds = classified.into_result().expect("accepted payload decodes");
    assert_eq!(serde_json::to_value(&guilds).expect("encode"), payload);
}

#[test]
fn null_description_is_kept_on_round_trip() {
    let payload = json!({"id": "1", "name": "Hub", "description": null});
    let profile = match classify::<GuildProfile>(payload.clone(), is_named_object) {
        Classified::Success(profile) => profile,
        other => panic!("expected success, got {other:?}"),
    };
    assert_eq!(profile.description(), None);
    assert_eq!(profile.extra.get("description"), Some(&Value::Null));
    assert_eq!(serde_json::to_value(&profile).expect("encode"), payload);
}
