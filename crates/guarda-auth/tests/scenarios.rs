//! End-to-end evaluation scenarios over principals decoded from JSON.

use guarda_auth::{
    can, can_any, codec, defaults_for, AccessGate, AccessRequest, GateOutcome, GrantLevel,
    GuardOptions, PermissionGrant, Principal, Session,
};
use guarda_types::Role;
use serde_json::json;

fn principal(value: serde_json::Value) -> Principal {
    serde_json::from_value(value).expect("principal JSON should decode")
}

#[test]
fn salesperson_with_owned_leads() {
    let p = principal(json!({
        "id": "42",
        "role": "vendedor",
        "permissions": {"leads": {"view": "own", "edit": "own", "delete": false}}
    }));

    assert!(can(Some(&p), "leads", "view", None));
    assert!(can(Some(&p), "leads", "view", Some("42")));
    assert!(!can(Some(&p), "leads", "view", Some("99")));
    assert!(can(Some(&p), "leads", "edit", Some("42")));
    assert!(!can(Some(&p), "leads", "delete", None));
    assert!(!can(Some(&p), "leads", "export", None));
    assert!(can_any(Some(&p), "leads"));
    assert!(!can_any(Some(&p), "proposals"));
}

#[test]
fn admin_with_empty_grant_is_allowed_everything() {
    let p = principal(json!({"id": 1, "role": "Administrador", "permissions": {}}));
    assert!(can(Some(&p), "users", "delete", None));
    assert!(can(Some(&p), "config", "edit", Some("7")));
    assert!(can_any(Some(&p), "whatsapp"));
}

#[test]
fn legacy_all_and_legacy_list() {
    let all = principal(json!({"id": 2, "role": "suporte", "permissions": ["all"]}));
    assert!(can(Some(&all), "reports", "export", None));

    let list = principal(json!({"id": 3, "role": "suporte", "permissions": ["leads.view"]}));
    assert!(can(Some(&list), "leads", "view", None));
    assert!(!can(Some(&list), "leads", "edit", None));
    assert!(can_any(Some(&list), "leads"));
    assert!(!can_any(Some(&list), "tasks"));
}

#[test]
fn malformed_permissions_deny_everything() {
    let p = principal(json!({"id": 4, "role": "gerente", "permissions": "leads.view"}));
    assert!(p.grant().is_none());
    for spec in guarda_auth::catalog::CATALOG {
        for action in spec.actions {
            assert!(!can(Some(&p), spec.name, action.name, None));
        }
        assert!(!can_any(Some(&p), spec.name));
    }
}

#[test]
fn malformed_permissions_deny_admins_too() {
    let p = principal(json!({"id": 1, "role": "admin", "permissions": 7}));
    assert!(p.grant().is_none());
    assert!(!can(Some(&p), "users", "delete", None));
    assert!(!can_any(Some(&p), "dashboard"));
}

#[test]
fn unknown_wire_levels_fail_closed() {
    let p = principal(json!({
        "id": 5,
        "role": "comercial",
        "permissions": {"proposals": {"view": "yes", "edit": 1, "approve": null, "delete": "own"}}
    }));
    assert!(!can(Some(&p), "proposals", "view", None));
    assert!(!can(Some(&p), "proposals", "edit", None));
    assert!(!can(Some(&p), "proposals", "approve", None));
    assert!(can(Some(&p), "proposals", "delete", None));
}

#[test]
fn editor_round_trip_from_template() {
    let seed = PermissionGrant::from(codec::unflatten(defaults_for(&Role::Salesperson)));
    let p = Principal::new("10", Role::Salesperson).with_grant(seed.clone());

    assert!(can(Some(&p), "proposals", "create", None));
    assert!(!can(Some(&p), "users", "delete", None));
    assert_eq!(codec::flatten_grant(&seed), defaults_for(&Role::Salesperson));
}

#[test]
fn owned_grant_widens_after_editor_round_trip() {
    let p = principal(json!({
        "id": "42",
        "role": "vendedor",
        "permissions": {"leads": {"view": "own"}}
    }));
    let structured = p.grant().and_then(PermissionGrant::as_structured).unwrap();
    let lost = codec::lost_on_round_trip(structured);
    assert_eq!(lost.len(), 1);
    assert_eq!(lost[0].before, GrantLevel::OwnedOnly);

    let edited = Principal::new("42", Role::Salesperson)
        .with_grant(codec::unflatten(codec::flatten(structured)));
    assert!(!can(Some(&p), "leads", "view", Some("99")));
    assert!(can(Some(&edited), "leads", "view", Some("99")));
}

#[test]
fn session_and_gate_together() {
    let session = Session::anonymous().login(principal(json!({
        "id": 8,
        "role": "financeiro",
        "permissions": {"reports": {"view": true, "export": false}}
    })));
    let gate = AccessGate::new("/home");

    let view = AccessRequest::new("reports", "view");
    let export = AccessRequest::new("reports", "export");

    assert_eq!(
        gate.guard(session.principal(), &view, GuardOptions::<()>::redirect_home()),
        GateOutcome::Allow
    );
    assert_eq!(
        gate.guard(session.principal(), &export, GuardOptions::<()>::redirect_home()),
        GateOutcome::Redirect("/home".into())
    );

    let out = session.logout();
    assert_eq!(
        gate.guard(out.principal(), &view, GuardOptions::<()>::none()),
        GateOutcome::AccessDenied
    );
    assert!(session.require("reports", "view", None).is_ok());
}
