//! Tests for route registration and matching
//!
//! # Test Coverage
//!
//! - Exact routes match with empty path-variable sets
//! - Templated routes capture placeholder segments in template order
//! - First-registered-wins precedence between overlapping templates
//! - Duplicate route / duplicate placeholder registration failures
//! - 404 vs 405 disambiguation and allowed-method enumeration
//! - Path normalization: empty path, trailing slash

use http::Method;
use routier::router::{RouteLookup, RouteTable};
use routier::spec::RouteTemplate;
use routier::RegisterError;

mod common;

fn table(routes: Vec<RouteTemplate>) -> RouteTable {
    common::init_tracing();
    RouteTable::build(routes).expect("route registration failed")
}

#[test]
fn exact_route_matches_with_no_path_params() {
    let table = table(vec![RouteTemplate::new(Method::GET, "/etudiant", "list")]);
    let m = table.route(&Method::GET, "/etudiant").expect("no match");
    assert_eq!(m.route.handler_name, "list");
    assert!(m.path_params.is_empty());
}

#[test]
fn templated_route_captures_segments_in_template_order() {
    let table = table(vec![RouteTemplate::new(
        Method::GET,
        "/etudiant/{id}/notes/{matiere}",
        "notes",
    )]);
    let m = table
        .route(&Method::GET, "/etudiant/42/notes/maths")
        .expect("no match");
    assert_eq!(m.get_path_param("id"), Some("42"));
    assert_eq!(m.get_path_param("matiere"), Some("maths"));
    let names: Vec<&str> = m.path_params.iter().map(|(k, _)| k.as_ref()).collect();
    assert_eq!(names, vec!["id", "matiere"]);
}

#[test]
fn first_registered_route_wins() {
    // Registration order encodes precedence: /item/{id} shadows the later
    // literal /item/new.
    let table = table(vec![
        RouteTemplate::new(Method::GET, "/item/{id}", "item_detail"),
        RouteTemplate::new(Method::GET, "/item/new", "item_new"),
    ]);
    let m = table.route(&Method::GET, "/item/new").expect("no match");
    assert_eq!(m.route.handler_name, "item_detail");
    assert_eq!(m.get_path_param("id"), Some("new"));
}

#[test]
fn earlier_literal_route_wins_over_later_template() {
    let table = table(vec![
        RouteTemplate::new(Method::GET, "/item/new", "item_new"),
        RouteTemplate::new(Method::GET, "/item/{id}", "item_detail"),
    ]);
    let m = table.route(&Method::GET, "/item/new").expect("no match");
    assert_eq!(m.route.handler_name, "item_new");
    assert!(m.path_params.is_empty());
}

#[test]
fn duplicate_route_registration_fails() {
    common::init_tracing();
    let mut table = RouteTable::new();
    table
        .register(RouteTemplate::new(Method::GET, "/a/{x}", "one"))
        .unwrap();
    let err = table
        .register(RouteTemplate::new(Method::GET, "/a/{x}", "two"))
        .unwrap_err();
    assert!(matches!(err, RegisterError::DuplicateRoute { .. }));
    // The same template under another method is a different route.
    table
        .register(RouteTemplate::new(Method::POST, "/a/{x}", "three"))
        .unwrap();
}

#[test]
fn duplicate_placeholder_name_fails() {
    common::init_tracing();
    let mut table = RouteTable::new();
    let err = table
        .register(RouteTemplate::new(Method::GET, "/a/{id}/b/{id}", "bad"))
        .unwrap_err();
    assert!(matches!(
        err,
        RegisterError::DuplicatePlaceholder { ref name, .. } if name == "id"
    ));
}

#[test]
fn method_mismatch_reports_allowed_methods() {
    let table = table(vec![
        RouteTemplate::new(Method::POST, "/etudiant", "create"),
        RouteTemplate::new(Method::PUT, "/etudiant", "replace"),
    ]);
    match table.lookup(&Method::GET, "/etudiant") {
        RouteLookup::MethodMismatch(allowed) => {
            assert_eq!(allowed, vec![Method::POST, Method::PUT]);
        }
        other => panic!("expected method mismatch, got {other:?}"),
    }
}

#[test]
fn templated_method_mismatch_is_405_not_404() {
    let table = table(vec![RouteTemplate::new(Method::POST, "/e/{id}", "update")]);
    match table.lookup(&Method::GET, "/e/7") {
        RouteLookup::MethodMismatch(allowed) => assert_eq!(allowed, vec![Method::POST]),
        other => panic!("expected method mismatch, got {other:?}"),
    }
}

#[test]
fn unknown_path_is_no_route() {
    let table = table(vec![RouteTemplate::new(Method::GET, "/etudiant", "list")]);
    assert!(matches!(
        table.lookup(&Method::GET, "/inconnu"),
        RouteLookup::NoRoute
    ));
}

#[test]
fn empty_path_normalizes_to_root() {
    let table = table(vec![RouteTemplate::new(Method::GET, "/", "home")]);
    let m = table.route(&Method::GET, "").expect("no match");
    assert_eq!(m.route.handler_name, "home");
}

#[test]
fn trailing_slash_is_a_distinct_segment() {
    // No auto-trim: /etudiant and /etudiant/ are different paths.
    let table = table(vec![RouteTemplate::new(Method::GET, "/etudiant", "list")]);
    assert!(matches!(
        table.lookup(&Method::GET, "/etudiant/"),
        RouteLookup::NoRoute
    ));

    let table = self::table(vec![
        RouteTemplate::new(Method::GET, "/etudiant", "list"),
        RouteTemplate::new(Method::GET, "/etudiant/", "list_slash"),
    ]);
    let m = table.route(&Method::GET, "/etudiant/").expect("no match");
    assert_eq!(m.route.handler_name, "list_slash");
}

#[test]
fn placeholder_rejects_empty_segment() {
    let table = table(vec![RouteTemplate::new(Method::GET, "/item/{id}", "detail")]);
    assert!(matches!(
        table.lookup(&Method::GET, "/item/"),
        RouteLookup::NoRoute
    ));
}

#[test]
fn allowed_methods_covers_exact_and_templated_routes() {
    let table = table(vec![
        RouteTemplate::new(Method::GET, "/x", "get_x"),
        RouteTemplate::new(Method::POST, "/{anything}", "post_any"),
    ]);
    assert_eq!(table.allowed_methods("/x"), vec![Method::GET, Method::POST]);
}
