//! Tests for parameter binding
//!
//! # Test Coverage
//!
//! - Declaration-order argument lists, one value per declared parameter
//! - Binding precedence: path variable > uploaded part > query/form > default
//! - Request-key overrides (the `@Request`-style source name)
//! - Missing scalars bind the type's zero value
//! - Malformed scalars degrade to the zero value instead of failing
//! - Value-map parameters receive the merged bag, path variables winning
//! - Uploaded-file and form-bound object parameters

use http::Method;
use routier::binder::bind;
use routier::coerce::BoundValue;
use routier::request::{RequestView, UploadedPart};
use routier::router::{RouteMatch, RouteTable};
use routier::spec::{ObjectSchema, ParameterSpec, RouteTemplate, SchemaRegistry, SemanticType};
use serde_json::Value;

mod common;

fn matched(route: RouteTemplate, path: &str) -> RouteMatch {
    common::init_tracing();
    let method = route.method.clone();
    let table = RouteTable::build(vec![route]).expect("registration failed");
    table.route(&method, path).expect("route did not match")
}

#[test]
fn missing_int_parameter_binds_zero() {
    let route = RouteTemplate::new(Method::GET, "/etudiant", "list")
        .with_parameters(vec![ParameterSpec::new("age", SemanticType::Int)]);
    let m = matched(route, "/etudiant");
    let mut req = RequestView::new(Method::GET, "/etudiant");

    let args = bind(&m, &mut req, &SchemaRegistry::new());
    assert_eq!(args.len(), 1);
    assert_eq!(args[0].as_int(), Some(0));
}

#[test]
fn path_variable_wins_over_query_value() {
    let route = RouteTemplate::new(Method::GET, "/etudiant/{id}", "detail")
        .with_parameters(vec![ParameterSpec::new("id", SemanticType::Int)]);
    let m = matched(route, "/etudiant/7");
    let mut req = RequestView::from_target(Method::GET, "/etudiant/7?id=99");

    let args = bind(&m, &mut req, &SchemaRegistry::new());
    assert_eq!(args[0].as_int(), Some(7));
}

#[test]
fn source_name_override_binds_a_different_request_key() {
    let route = RouteTemplate::new(Method::GET, "/etudiant", "list").with_parameters(vec![
        ParameterSpec::renamed("city", SemanticType::Str, "ville"),
    ]);
    let m = matched(route, "/etudiant");
    let mut req = RequestView::from_target(Method::GET, "/etudiant?ville=Lyon");

    let args = bind(&m, &mut req, &SchemaRegistry::new());
    assert_eq!(args[0].as_str(), Some("Lyon"));
}

#[test]
fn malformed_scalar_degrades_to_default() {
    let route = RouteTemplate::new(Method::GET, "/etudiant", "list")
        .with_parameters(vec![ParameterSpec::new("age", SemanticType::Int)]);
    let m = matched(route, "/etudiant");
    let mut req = RequestView::from_target(Method::GET, "/etudiant?age=vingt");

    let args = bind(&m, &mut req, &SchemaRegistry::new());
    assert_eq!(args[0].as_int(), Some(0));
}

#[test]
fn arguments_follow_declaration_order() {
    let route = RouteTemplate::new(Method::GET, "/n/{id}", "notes").with_parameters(vec![
        ParameterSpec::new("matiere", SemanticType::Str),
        ParameterSpec::new("id", SemanticType::Long),
        ParameterSpec::new("moyenne", SemanticType::Double),
    ]);
    let m = matched(route, "/n/12");
    let mut req = RequestView::from_target(Method::GET, "/n/12?matiere=maths&moyenne=14.5");

    let args = bind(&m, &mut req, &SchemaRegistry::new());
    assert_eq!(args[0].as_str(), Some("maths"));
    assert_eq!(args[1].as_long(), Some(12));
    assert_eq!(args[2].as_double(), Some(14.5));
}

#[test]
fn value_map_merges_everything_with_path_variables_winning() {
    let route = RouteTemplate::new(Method::GET, "/e/{id}", "all").with_parameters(vec![
        ParameterSpec::new("id", SemanticType::Int),
        ParameterSpec::new("tout", SemanticType::ValueMap),
    ]);
    let m = matched(route, "/e/5");
    let mut req = RequestView::from_target(Method::GET, "/e/5?id=99&ville=Lyon");
    req.set_attribute("role", Value::String("admin".to_string()));

    let args = bind(&m, &mut req, &SchemaRegistry::new());
    let map = args[1].as_map().expect("not a value map");
    // Path variable overrides the query value for the same name, and is
    // coerced to the declared scalar type.
    assert_eq!(map.get("id"), Some(&Value::from(5)));
    assert_eq!(map.get("ville"), Some(&Value::String("Lyon".to_string())));
    assert_eq!(map.get("role"), Some(&Value::String("admin".to_string())));
}

#[test]
fn value_map_keeps_repeated_values_as_array() {
    let route = RouteTemplate::new(Method::GET, "/q", "all")
        .with_parameters(vec![ParameterSpec::new("tout", SemanticType::ValueMap)]);
    let m = matched(route, "/q");
    let mut req = RequestView::from_target(Method::GET, "/q?tag=a&tag=b");

    let args = bind(&m, &mut req, &SchemaRegistry::new());
    let map = args[0].as_map().expect("not a value map");
    assert_eq!(
        map.get("tag"),
        Some(&Value::Array(vec![
            Value::String("a".to_string()),
            Value::String("b".to_string())
        ]))
    );
}

#[test]
fn uploaded_part_binds_to_file_parameter() {
    let route = RouteTemplate::new(Method::POST, "/upload", "upload")
        .with_parameters(vec![ParameterSpec::new("fichier", SemanticType::File)]);
    let m = matched(route, "/upload");
    let mut req = RequestView::new(Method::POST, "/upload");
    req.add_part(
        "fichier",
        UploadedPart::from_bytes("photo.png", "image/png", vec![1, 2, 3]),
    );

    let mut args = bind(&m, &mut req, &SchemaRegistry::new());
    match &mut args[0] {
        BoundValue::File(part) => {
            assert_eq!(part.file_name, "photo.png");
            assert_eq!(part.take_bytes().unwrap(), vec![1, 2, 3]);
        }
        other => panic!("expected a file, got {other:?}"),
    }
    // The part was moved out of the request.
    assert!(req.parts.get("fichier").map_or(true, Vec::is_empty));
}

#[test]
fn missing_file_binds_null() {
    let route = RouteTemplate::new(Method::POST, "/upload", "upload")
        .with_parameters(vec![ParameterSpec::new("fichier", SemanticType::File)]);
    let m = matched(route, "/upload");
    let mut req = RequestView::new(Method::POST, "/upload");

    let args = bind(&m, &mut req, &SchemaRegistry::new());
    assert!(matches!(args[0], BoundValue::Null));
}

#[test]
fn repeated_parts_bind_to_file_list() {
    let route = RouteTemplate::new(Method::POST, "/upload", "upload")
        .with_parameters(vec![ParameterSpec::new("fichiers", SemanticType::FileList)]);
    let m = matched(route, "/upload");
    let mut req = RequestView::new(Method::POST, "/upload");
    req.add_part("fichiers", UploadedPart::from_bytes("a.txt", "text/plain", vec![1]));
    req.add_part("fichiers", UploadedPart::from_bytes("b.txt", "text/plain", vec![2]));

    let args = bind(&m, &mut req, &SchemaRegistry::new());
    match &args[0] {
        BoundValue::FileList(parts) => {
            let names: Vec<&str> = parts.iter().map(|p| p.file_name.as_str()).collect();
            assert_eq!(names, vec!["a.txt", "b.txt"]);
        }
        other => panic!("expected a file list, got {other:?}"),
    }
}

#[test]
fn object_parameter_builds_from_form_values() {
    let route = RouteTemplate::new(Method::POST, "/etudiant", "create").with_parameters(vec![
        ParameterSpec::new("etudiant", SemanticType::Object("Etudiant".to_string())),
    ]);
    let m = matched(route, "/etudiant");
    let mut req = RequestView::new(Method::POST, "/etudiant");
    req.add_param("nom", "Rakoto");
    req.add_param("age", "21");

    let mut schemas = SchemaRegistry::new();
    schemas.register(ObjectSchema::new(
        "Etudiant",
        vec![
            ("nom".to_string(), SemanticType::Str),
            ("age".to_string(), SemanticType::Int),
            ("ville".to_string(), SemanticType::Str),
        ],
    ));

    let args = bind(&m, &mut req, &schemas);
    let object = args[0].as_object().expect("not an object");
    assert_eq!(object["nom"], Value::String("Rakoto".to_string()));
    assert_eq!(object["age"], Value::from(21));
    assert_eq!(object["ville"], Value::String(String::new()));
}

#[test]
fn object_with_unknown_schema_binds_null() {
    let route = RouteTemplate::new(Method::POST, "/x", "create").with_parameters(vec![
        ParameterSpec::new("payload", SemanticType::Object("Inconnu".to_string())),
    ]);
    let m = matched(route, "/x");
    let mut req = RequestView::new(Method::POST, "/x");

    let args = bind(&m, &mut req, &SchemaRegistry::new());
    assert!(matches!(args[0], BoundValue::Null));
}
