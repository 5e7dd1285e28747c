//! Integration tests for contract introspection.
//!
//! These tests run the full document → contract path on a realistic service.

use rsocket_export_core::{InteractionMode, MethodOrdering, TypeDescriptor};
use rsocket_export_introspector::{Introspector, ServiceCatalog, ServiceReflection};

const ACCOUNT_SERVICE: &str = include_str!("fixtures/account_service.json");

fn account_contract(ordering: MethodOrdering) -> rsocket_export_introspector::ServiceContract {
    let doc = ServiceReflection::from_json_str(ACCOUNT_SERVICE).unwrap();
    Introspector::with_ordering(ordering).introspect(&doc).unwrap()
}

/// Every exported method receives exactly one mode.
#[test]
fn test_modes_of_account_service() {
    let contract = account_contract(MethodOrdering::Declaration);

    let modes: Vec<_> = contract
        .methods
        .iter()
        .map(|m| (m.name.as_str(), m.mode))
        .collect();

    assert_eq!(
        modes,
        [
            ("findById", InteractionMode::RequestResponse),
            ("findAll", InteractionMode::RequestStream),
            ("update", InteractionMode::RequestChannel),
            ("touch", InteractionMode::FireAndForget),
        ]
    );
}

/// Methods without a route marker are not part of the contract.
#[test]
fn test_connect_handler_is_not_exported() {
    let contract = account_contract(MethodOrdering::Declaration);
    assert!(contract.method("handle").is_none());
}

#[test]
fn test_qualified_names_resolve_to_catalog_records() {
    let contract = account_contract(MethodOrdering::Declaration);
    let find_by_id = contract.method("findById").unwrap();

    assert_eq!(
        find_by_id.return_type,
        TypeDescriptor::single(TypeDescriptor::record("org.mvnsearch.user.Account"))
    );
    assert!(matches!(find_by_id.params[0].ty, TypeDescriptor::Number(_)));
}

#[test]
fn test_channel_hint_is_recorded() {
    let contract = account_contract(MethodOrdering::Declaration);
    let update = contract.method("update").unwrap();

    assert!(update.single_result_channel);
    assert_eq!(update.channel_stream_param().unwrap().name, "updates");
}

#[test]
fn test_alphabetical_ordering() {
    let contract = account_contract(MethodOrdering::Alphabetical);
    let names: Vec<_> = contract.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["findAll", "findById", "touch", "update"]);
}

/// Two introspections of the same document are equal.
#[test]
fn test_introspection_is_deterministic() {
    assert_eq!(
        account_contract(MethodOrdering::Declaration),
        account_contract(MethodOrdering::Declaration)
    );
}

#[test]
fn test_contract_identity() {
    let contract = account_contract(MethodOrdering::Declaration);
    assert_eq!(contract.class_name(), "AccountService");
    assert_eq!(contract.short_name(), "AccountService");
    assert_eq!(
        contract.npm_package.as_ref().unwrap().as_str(),
        "@UserService/AccountService"
    );
}

#[test]
fn test_catalog_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("account.json"), ACCOUNT_SERVICE).unwrap();

    let catalog = ServiceCatalog::load_dir(dir.path(), &Introspector::new()).unwrap();
    let found = catalog.find_by_short_name("AccountService").unwrap();
    assert_eq!(found.methods.len(), 4);
}

/// Contracts serialize for the `inspect` command.
#[test]
fn test_contract_serializes_to_json() {
    let contract = account_contract(MethodOrdering::Declaration);
    let json = serde_json::to_value(&contract).unwrap();

    assert_eq!(json["route"], "org.mvnsearch.user.AccountService");
    assert_eq!(json["methods"][1]["mode"], "request_stream");
    assert_eq!(json["methods"][0]["payload"]["kind"], "record");
}
