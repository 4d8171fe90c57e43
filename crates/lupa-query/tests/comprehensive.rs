//! End-to-end query tests over parsed HTML
//!
//! Exercises the full pipeline: html5ever parse, role/label/text resolution,
//! variant boundary behavior, and suggestion enforcement.

use lupa_query::{
    Config, LabelOptions, MatchOptions, Matcher, NormalizerOptions, Normalizer, QueryError,
    RoleOptions, TextOptions, get_all_by_role, get_by_label_text, get_by_role, get_by_test_id,
    get_by_text, query_all_by_role, query_all_by_text, query_by_role, query_by_text,
};
use regex::Regex;

fn doc_from(html: &str) -> lupa_dom::Document {
    lupa_html::parse(html)
}

#[test]
fn test_checkbox_is_found_by_implicit_role() {
    let doc = doc_from(
        r#"<form>
             <input type="checkbox" id="accept" />
             <input type="text" id="name" />
           </form>"#,
    );
    let cfg = Config::default();
    let checkboxes =
        get_all_by_role(&doc, doc.body(), "checkbox", &RoleOptions::default(), &cfg).unwrap();
    assert_eq!(checkboxes.len(), 1);
    assert_eq!(doc.tree().node(checkboxes[0]).attr("id"), Some("accept"));

    let textboxes =
        get_all_by_role(&doc, doc.body(), "textbox", &RoleOptions::default(), &cfg).unwrap();
    assert_eq!(textboxes.len(), 1);
    assert_eq!(doc.tree().node(textboxes[0]).attr("id"), Some("name"));
}

#[test]
fn test_fallback_roles_need_opt_in() {
    let doc = doc_from(r#"<div role="meter progressbar">70%</div>"#);
    let cfg = Config::default();

    assert!(
        query_all_by_role(&doc, doc.body(), "progressbar", &RoleOptions::default(), &cfg)
            .unwrap()
            .is_empty()
    );

    let opts = RoleOptions {
        query_fallbacks: true,
        ..Default::default()
    };
    assert_eq!(
        query_all_by_role(&doc, doc.body(), "progressbar", &opts, &cfg).unwrap().len(),
        1
    );
}

#[test]
fn test_hidden_option_reveals_aria_hidden_subtrees() {
    let doc = doc_from(
        r#"<main>
             <div aria-hidden="true"><ul><li>secret</li></ul></div>
             <ul><li>visible</li></ul>
           </main>"#,
    );
    let cfg = Config::default();

    let visible =
        query_all_by_role(&doc, doc.body(), "list", &RoleOptions::default(), &cfg).unwrap();
    assert_eq!(visible.len(), 1);

    let opts = RoleOptions {
        hidden: Some(true),
        ..Default::default()
    };
    let all = query_all_by_role(&doc, doc.body(), "list", &opts, &cfg).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_role_name_option_with_regex() {
    let doc = doc_from(
        r#"<button>Save draft</button>
           <button>Save and publish</button>
           <button>Discard</button>"#,
    );
    let cfg = Config::default();
    let opts = RoleOptions {
        name: Some(Regex::new("^Save").unwrap().into()),
        ..Default::default()
    };
    let found = get_all_by_role(&doc, doc.body(), "button", &opts, &cfg).unwrap();
    assert_eq!(found.len(), 2);
}

#[test]
fn test_query_and_get_agree_on_single_match() {
    let doc = doc_from(r#"<label for="em">Email</label><input id="em" type="email" />"#);
    let cfg = Config::default();

    let got = get_by_label_text(&doc, doc.body(), "Email", &LabelOptions::default(), &cfg)
        .unwrap();
    let queried =
        lupa_query::query_by_label_text(&doc, doc.body(), "Email", &LabelOptions::default(), &cfg)
            .unwrap();
    assert_eq!(queried, Some(got));
}

#[test]
fn test_query_tolerates_zero_but_not_many() {
    let doc = doc_from(r#"<p>dup</p><p>dup</p>"#);
    let cfg = Config::default();

    assert!(query_by_text(&doc, doc.body(), "absent", &TextOptions::default(), &cfg)
        .unwrap()
        .is_none());

    let err = query_by_text(&doc, doc.body(), "dup", &TextOptions::default(), &cfg).unwrap_err();
    assert!(matches!(err, QueryError::MultipleElements(_)));
}

#[test]
fn test_not_found_message_includes_dom_dump() {
    let doc = doc_from(r#"<div id="app"><span>content</span></div>"#);
    let cfg = Config::default();
    let err = get_by_text(&doc, doc.body(), "missing", &TextOptions::default(), &cfg)
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Unable to find an element with the text: missing"));
    assert!(message.contains("Ignored nodes: comments, script, style"));
    assert!(message.contains("<span>"));
}

#[test]
fn test_diagnostics_can_be_disabled() {
    let doc = doc_from(r#"<div>content</div>"#);
    let cfg = Config {
        compute_diagnostics: false,
        ..Default::default()
    };
    let err = get_by_text(&doc, doc.body(), "missing", &TextOptions::default(), &cfg)
        .unwrap_err();
    assert!(!err.to_string().contains("Ignored nodes"));
}

#[test]
fn test_suggestion_enforcement_prefers_role() {
    let doc = doc_from(r#"<button data-testid="submit">Submit</button>"#);
    let cfg = Config {
        throw_suggestions: true,
        ..Default::default()
    };

    let err = get_by_test_id(&doc, doc.body(), "submit", &MatchOptions::default(), &cfg)
        .unwrap_err();
    let QueryError::Suggestion(message) = err else {
        panic!("expected a suggestion error");
    };
    assert!(message.contains("A better query is available"));
    assert!(message.contains(r#"get_by_role("button", name = "Submit")"#));

    // matching by role already is the strongest query
    get_by_role(&doc, doc.body(), "button", &RoleOptions::default(), &cfg).unwrap();

    // per-call opt-out wins over the config default
    let opts = MatchOptions {
        suggest: Some(false),
        ..Default::default()
    };
    get_by_test_id(&doc, doc.body(), "submit", &opts, &cfg).unwrap();
}

#[test]
fn test_custom_normalizer_rejects_flag_combination() {
    let doc = doc_from(r#"<div>text</div>"#);
    let cfg = Config::default();
    let opts = TextOptions {
        normalizer: NormalizerOptions {
            trim: Some(false),
            custom: Some(Normalizer::identity()),
            ..Default::default()
        },
        ..Default::default()
    };
    let err = query_all_by_text(&doc, doc.body(), "text", &opts, &cfg).unwrap_err();
    assert!(matches!(err, QueryError::Configuration(_)));
}

#[test]
fn test_function_matcher_spans_broken_up_text() {
    let doc = doc_from(r#"<p>Hello <strong>brave</strong> world</p>"#);
    let cfg = Config::default();
    let matcher = Matcher::func(|_text, node| {
        node.is_some_and(|n| n.tag() == Some("strong"))
    });
    let found = query_all_by_text(&doc, doc.body(), matcher, &TextOptions::default(), &cfg)
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(doc.tree().node(found[0]).tag(), Some("strong"));
}

#[test]
fn test_selected_misuse_is_a_configuration_error() {
    let doc = doc_from(r#"<div role="tab">x</div>"#);
    let cfg = Config::default();
    let opts = RoleOptions {
        selected: Some(true),
        ..Default::default()
    };
    let err = query_by_role(
        &doc,
        doc.body(),
        Matcher::func(|role, _| role == "tab"),
        &opts,
        &cfg,
    )
    .unwrap_err();
    assert!(matches!(err, QueryError::Configuration(_)));
}
