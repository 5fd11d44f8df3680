use gqltag_core::{parse_to_json, symbols_to_json, validate_to_json};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn assert_success(json: &str) -> Value {
    let v: Value = serde_json::from_str(json).expect("valid JSON");
    assert_eq!(v["success"], true, "expected success=true, got: {json}");
    v
}

fn assert_failure(json: &str) -> Value {
    let v: Value = serde_json::from_str(json).expect("valid JSON");
    assert_eq!(v["success"], false, "expected success=false, got: {json}");
    v
}

const USER: &str = r#"// @GqlType
type User struct {
	Name string `gql:"name,optional,include:[User,Admin]"`
	Bio  string `gql:"bio,description:'About, in short',x-custom"`
}
"#;

// ---------------------------------------------------------------------------
// parse_to_json
// ---------------------------------------------------------------------------

#[test]
fn ffi_parse_tag_shape() {
    let v = assert_success(&parse_to_json(USER));

    let tags = v["data"]["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(
        tags[0],
        json!({
            "field": "Name",
            "rawTag": "name,optional,include:[User,Admin]",
            "options": {
                "name": "name",
                "optional": true,
                "include": ["User", "Admin"]
            },
            "position": { "line": 2, "character": 13 },
            "range": { "start": 44, "end": 86 }
        })
    );
}

#[test]
fn ffi_parse_keeps_unknown_options() {
    let v = assert_success(&parse_to_json(USER));
    let options = &v["data"]["tags"][1]["options"];
    assert_eq!(options["description"], "About, in short");
    assert_eq!(options["x-custom"], true);
}

#[test]
fn ffi_parse_directive_shape() {
    let v = assert_success(&parse_to_json("// @GqlInput(name:\"UserCreate\", package:'api')"));
    let directives = v["data"]["directives"].as_array().unwrap();
    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0]["type"], "GqlInput");
    assert_eq!(
        directives[0]["params"],
        json!({ "name": "UserCreate", "package": "api" })
    );
    assert_eq!(directives[0]["position"], json!({ "line": 0, "character": 3 }));
}

#[test]
fn ffi_parse_empty_input() {
    let v = assert_success(&parse_to_json(""));
    assert_eq!(v["data"], json!({ "tags": [], "directives": [] }));
}

// ---------------------------------------------------------------------------
// validate_to_json
// ---------------------------------------------------------------------------

#[test]
fn ffi_validate_summary() {
    let v = assert_success(&validate_to_json(USER, "{}"));

    // x-custom is unknown, Admin is not declared
    let issues = v["data"]["issues"].as_array().unwrap();
    let codes: Vec<&str> = issues.iter().map(|i| i["code"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["GQL-W002", "GQL-W001"]);
    assert_eq!(issues[0]["severity"], "warning");
    assert_eq!(
        v["data"]["summary"],
        json!({ "errors": 0, "warnings": 2, "infos": 0 })
    );
}

#[test]
fn ffi_validate_without_type_references() {
    let v = assert_success(&validate_to_json(USER, r#"{"checkTypeReferences": false}"#));
    let issues = v["data"]["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["code"], "GQL-W001");
}

#[test]
fn ffi_validate_counts_errors() {
    let v = assert_success(&validate_to_json("`gql:\"a,ro,wo\"`\n// @GqlNamespace", ""));
    assert_eq!(v["data"]["summary"]["errors"], 2);
}

#[test]
fn ffi_validate_invalid_options() {
    let v = assert_failure(&validate_to_json(USER, "not valid json"));
    assert!(v["error"]
        .as_str()
        .unwrap()
        .contains("Invalid options JSON"));
    assert!(v.get("data").is_none());
}

// ---------------------------------------------------------------------------
// symbols_to_json
// ---------------------------------------------------------------------------

#[test]
fn ffi_symbols() {
    let content = "// @GqlType\n// @GqlInput\ntype User struct {}\n// @GqlEnum(name:\"Role\")\n";
    let v = assert_success(&symbols_to_json(content));
    assert_eq!(v["data"]["types"], json!(["User"]));
    assert_eq!(v["data"]["inputs"], json!(["UserInput"]));
    assert_eq!(v["data"]["enums"], json!(["Role"]));
    assert_eq!(v["data"]["ignoreAll"], false);
}
