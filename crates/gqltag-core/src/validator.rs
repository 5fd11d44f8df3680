use crate::catalogs::{DIRECTIVE_TYPES, LIST_KEYS, TAG_OPTIONS};
use crate::parser::{parse_directives, parse_tags};
use crate::symbols::{build_validation_context, ScopeResolver, StructScopes};
use crate::types::*;

/// Check one tag for unknown options, conflicting flags and, when the
/// context asks for it, references to undeclared types.
pub fn validate_tag(tag: &Tag, context: Option<&ValidationContext>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let options = &tag.options;

    // GQL-W001: unknown option
    for key in options.extra.keys() {
        if !TAG_OPTIONS.contains(key.as_str()) {
            issues.push(tag_issue(
                tag,
                "GQL-W001",
                IssueSeverity::Warning,
                format!("Unknown tag option: {key}"),
            ));
        }
    }

    // GQL-E001: optional + required
    if options.optional && options.required {
        issues.push(tag_issue(
            tag,
            "GQL-E001",
            IssueSeverity::Error,
            "Flags optional and required are mutually exclusive; remove \"optional\" or \"required\""
                .to_string(),
        ));
    }

    // GQL-E002: more than one access modifier
    let access = options.access_modifiers();
    if access.len() > 1 {
        issues.push(tag_issue(
            tag,
            "GQL-E002",
            IssueSeverity::Error,
            format!(
                "Cannot have multiple access modifiers ({}); use only one of ro/wo/rw",
                access.join(", ")
            ),
        ));
    }

    if let Some(ctx) = context.filter(|c| c.check_type_references) {
        validate_type_references(tag, ctx, &mut issues);
    }

    issues
}

/// GQL-W002: list options naming a type that is neither a declared type
/// nor a declared input.
fn validate_type_references(tag: &Tag, context: &ValidationContext, issues: &mut Vec<ValidationIssue>) {
    let types = context.available_types();
    let inputs = context.available_inputs();

    for key in LIST_KEYS {
        let Some(list) = tag.options.list(key) else {
            continue;
        };
        for type_name in list.explicit_names() {
            if types.contains(type_name) || inputs.contains(type_name) {
                continue;
            }
            let available: Vec<&str> = types.iter().chain(inputs).map(String::as_str).collect();
            let available = if available.is_empty() {
                "(none)".to_string()
            } else {
                available.join(", ")
            };
            issues.push(tag_issue(
                tag,
                "GQL-W002",
                IssueSeverity::Warning,
                format!("Type \"{type_name}\" in \"{key}\" not found. Available types/inputs: {available}"),
            ));
        }
    }
}

/// Check one directive for an unknown name and missing mandatory parameters.
pub fn validate_directive(
    directive: &Directive,
    _context: Option<&ValidationContext>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    match directive.kind() {
        // GQL-W003: unknown directive
        None => issues.push(directive_issue(
            directive,
            "GQL-W003",
            IssueSeverity::Warning,
            format!(
                "Unknown directive type: @{}. Known directives: {}",
                directive.name,
                DIRECTIVE_TYPES.join(", ")
            ),
        )),
        // GQL-E003: namespace needs a name
        Some(DirectiveKind::Namespace) => {
            if directive.param("name").is_none_or(str::is_empty) {
                issues.push(directive_issue(
                    directive,
                    "GQL-E003",
                    IssueSeverity::Error,
                    format!("@{} directive requires a \"name\" parameter", directive.name),
                ));
            }
        }
        // Type/Input/Enum names default to the declaration name.
        Some(_) => {}
    }

    issues
}

/// Parse and validate a whole document. Each tag is checked against the
/// scope of its enclosing struct, falling back to the document-wide names.
/// Issues are ordered by their start offset.
pub fn validate_document(text: &str, options: &CheckOptions) -> Vec<ValidationIssue> {
    let tags = parse_tags(text);
    let directives = parse_directives(text);
    let context = build_validation_context(text, options.check_type_references);
    let scopes = StructScopes::from_text(text);

    let mut issues = Vec::new();
    for tag in &tags {
        let tag_context = context.with_scope(scopes.scope_for(tag.position));
        issues.extend(validate_tag(tag, Some(&tag_context)));
    }
    for directive in &directives {
        issues.extend(validate_directive(directive, Some(&context)));
    }
    issues.sort_by_key(|issue| issue.range.start);

    tracing::debug!(
        tags = tags.len(),
        directives = directives.len(),
        issues = issues.len(),
        "validated document"
    );
    issues
}

fn tag_issue(tag: &Tag, code: &str, severity: IssueSeverity, message: String) -> ValidationIssue {
    ValidationIssue {
        code: code.into(),
        severity,
        message,
        position: tag.position,
        range: tag.range,
    }
}

fn directive_issue(
    directive: &Directive,
    code: &str,
    severity: IssueSeverity,
    message: String,
) -> ValidationIssue {
    ValidationIssue {
        code: code.into(),
        severity,
        message,
        position: directive.position,
        range: directive.range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tag(literal: &str) -> Tag {
        parse_tags(literal).remove(0)
    }

    fn directive(text: &str) -> Directive {
        parse_directives(text).remove(0)
    }

    fn context(types: &[&str], inputs: &[&str]) -> ValidationContext {
        ValidationContext {
            types: types.iter().map(|s| s.to_string()).collect(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            check_type_references: true,
            ..Default::default()
        }
    }

    fn severities(issues: &[ValidationIssue]) -> Vec<IssueSeverity> {
        issues.iter().map(|i| i.severity).collect()
    }

    #[test]
    fn clean_tag_has_no_issues() {
        let issues = validate_tag(&tag("`gql:\"id,optional,type:ID,description:'x'\"`"), None);
        assert!(issues.is_empty());
    }

    #[test]
    fn access_modifier_conflict() {
        let issues = validate_tag(&tag("`gql:\"ro,wo\"`"), None);
        assert_eq!(severities(&issues), vec![IssueSeverity::Error]);
        assert!(issues[0].message.contains("multiple access modifiers"));
        assert!(issues[0].message.contains("ro, wo"));
        assert_eq!(issues[0].code, "GQL-E002");
    }

    #[test]
    fn optional_required_conflict() {
        let issues = validate_tag(&tag("`gql:\"optional,required\"`"), None);
        assert_eq!(severities(&issues), vec![IssueSeverity::Error]);
        assert!(issues[0].message.contains("optional and required"));
    }

    #[test]
    fn optional_false_still_conflicts_with_required() {
        let issues = validate_tag(&tag("`gql:\"x,optional:false,required\"`"), None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "GQL-E001");
    }

    #[test]
    fn unknown_options_are_warnings() {
        let issues = validate_tag(&tag("`gql:\"id,nullable,color:red\"`"), None);
        assert_eq!(severities(&issues), vec![IssueSeverity::Warning; 2]);
        assert_eq!(issues[0].message, "Unknown tag option: nullable");
        assert_eq!(issues[1].message, "Unknown tag option: color");
    }

    #[test]
    fn issue_carries_tag_span() {
        let t = tag("\n  `gql:\"ro,rw\"`");
        let issues = validate_tag(&t, None);
        assert_eq!(issues[0].range, t.range);
        assert_eq!(issues[0].position, Position { line: 1, character: 2 });
    }

    #[test]
    fn dangling_reference_warns_once() {
        let ctx = context(&["Foo"], &[]);
        let issues = validate_tag(&tag("`gql:\"include:[Foo,Baz]\"`"), Some(&ctx));
        assert_eq!(severities(&issues), vec![IssueSeverity::Warning]);
        assert!(issues[0].message.contains("\"Baz\""));
        assert!(!issues[0].message.contains("\"Foo\""));
        assert!(issues[0].message.contains("Available types/inputs: Foo"));
    }

    #[test]
    fn inputs_satisfy_references() {
        let ctx = context(&["User"], &["UserInput"]);
        let issues = validate_tag(&tag("`gql:\"x,omit:[UserInput],ro:User\"`"), Some(&ctx));
        assert!(issues.is_empty());
    }

    #[test]
    fn wildcard_lists_are_never_dangling() {
        let ctx = context(&[], &[]);
        let issues = validate_tag(&tag("`gql:\"x,include,omit:*\"`"), Some(&ctx));
        assert!(issues.is_empty());
    }

    #[test]
    fn references_skipped_when_disabled() {
        let mut ctx = context(&[], &[]);
        ctx.check_type_references = false;
        let issues = validate_tag(&tag("`gql:\"include:[Missing]\"`"), Some(&ctx));
        assert!(issues.is_empty());
    }

    #[test]
    fn empty_context_lists_none() {
        let ctx = context(&[], &[]);
        let issues = validate_tag(&tag("`gql:\"include:[Missing]\"`"), Some(&ctx));
        assert!(issues[0].message.ends_with("Available types/inputs: (none)"));
    }

    #[test]
    fn scoped_context_narrows_available_names() {
        let ctx = context(&["User", "Account"], &[]);
        let scope = ScopedSymbols {
            types: vec!["User".into()],
            inputs: vec![],
        };
        let scoped = ctx.with_scope(Some(&scope));
        let issues = validate_tag(&tag("`gql:\"include:[Account]\"`"), Some(&scoped));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("Available types/inputs: User"));
    }

    #[test]
    fn namespace_requires_name() {
        let issues = validate_directive(&directive("// @GqlNamespace"), None);
        assert_eq!(severities(&issues), vec![IssueSeverity::Error]);
        assert_eq!(issues[0].code, "GQL-E003");

        assert!(validate_directive(&directive("// @GqlNamespace(name:\"Foo\")"), None).is_empty());
    }

    #[test]
    fn type_directives_have_optional_name() {
        assert!(validate_directive(&directive("// @GqlType"), None).is_empty());
        assert!(validate_directive(&directive("// @GqlType(name:\"Bar\")"), None).is_empty());
        assert!(validate_directive(&directive("// @gqlInput"), None).is_empty());
        assert!(validate_directive(&directive("// @GQLENUM"), None).is_empty());
    }

    #[test]
    fn unknown_directive_lists_known_ones() {
        let issues = validate_directive(&directive("// @GqlIgnore"), None);
        assert_eq!(severities(&issues), vec![IssueSeverity::Warning]);
        assert!(issues[0].message.contains("@GqlIgnore."));
        assert!(issues[0].message.contains("GqlIgnoreAll"));
    }

    #[test]
    fn document_uses_struct_scope() {
        let text = r#"// @GqlType
type User struct {
	Name string `gql:"name,include:[Account]"`
}

// @GqlType(name:"Account")
type AccountModel struct {
	Email string `gql:"email,include:[Account]"`
}
"#;
        let issues = validate_document(text, &CheckOptions::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "GQL-W002");
        assert_eq!(issues[0].position.line, 2);
    }

    #[test]
    fn document_falls_back_to_global_names() {
        let text = r#"// @GqlType(name:"Account")
type AccountModel struct {}

type Plain struct {
	Email string `gql:"email,include:[Account]"`
}
"#;
        assert!(validate_document(text, &CheckOptions::default()).is_empty());
    }

    #[test]
    fn document_issues_are_offset_ordered() {
        let text = "// @GqlNamespace\ntype A struct {\n\tX int `gql:\"x,ro,rw\"`\n}\n// @Gqlbogus\n";
        let issues = validate_document(
            text,
            &CheckOptions {
                check_type_references: false,
            },
        );
        let codes: Vec<&str> = issues.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["GQL-E003", "GQL-E002", "GQL-W003"]);
    }
}
