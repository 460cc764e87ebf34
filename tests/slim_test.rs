//! End-to-end slimming behaviour through the public API.
//!
//! Inputs are indented the way HTML sits in templates; `no_space` squeezes
//! the inter-tag whitespace out of the result so expectations stay readable.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use html_slim::dom::{Document, ElementRef};
use html_slim::{slim, slim_with_options, Hooks, Options, WalkFn};
use pretty_assertions::assert_eq;
use regex::Regex;

/// Drop whitespace around tags and squeeze the remaining runs.
fn no_space(html: &str) -> String {
    let around_tags = Regex::new(r"(?m)\s+(<|$)|(^|>)\s+").expect("valid regex");
    let runs = Regex::new(r"([ \t])[ \t]+|\r?(\n)[\r\n]+").expect("valid regex");
    let html = around_tags.replace_all(html, "${1}${2}");
    runs.replace_all(&html, "${1}${2}").into_owned()
}

fn slim_opts(html: &str, options: &Options) -> String {
    no_space(&slim_with_options(html, options).expect("valid options"))
}

// =============================================================================
// Category flags
// =============================================================================

#[test]
fn scripts_styles_and_handlers_removed_from_full_page() {
    let html = r#"
            <!-- this is a comment -->
            <html>
            <head>
                <title>Test</title>
                <style>body {
                    color: red;
                }</style>
                <script>alert('hello');</script>
            </head>
            <body style="margin: 0;" onload="init()">
            <h1 class="title">Hello World</h1>
            <p onclick="doSomething()">Click me</p>
            <script>console.log('inline script');</script>
            </body>
            </html>
        "#;
    let options = Options {
        script: true,
        style: true,
        ..Options::default()
    };

    assert_eq!(
        slim_opts(html, &options),
        r#"<html><head><title>Test</title></head><body><h1 class="title">Hello World</h1><p>Click me</p></body></html>"#
    );
}

#[test]
fn style_removal_keeps_scripts() {
    let html = r#"
            <p>Some text</p>
            <script>alert('kept');</script>
            <style>
                p {
                    display: none;
                }
            </style>
        "#;
    let options = Options {
        style: true,
        ..Options::default()
    };

    assert_eq!(slim_opts(html, &options), "<p>Some text</p><script>alert('kept');</script>");
}

#[test]
fn script_removal_keeps_styles_and_style_attributes() {
    let html = r#"
            <p style="color: blue;" onclick="alert('hello')">Some text</p>
            <script>alert('removed');</script>
            <style>
                p {
                    display: block;
                }
            </style>
        "#;
    let options = Options {
        script: true,
        ..Options::default()
    };

    assert_eq!(
        slim_opts(html, &options),
        "<p style=\"color: blue;\">Some text</p><style>p {\ndisplay: block;\n}</style>"
    );
}

#[test]
fn comments_kept_when_disabled() {
    let html = r#"
            <!-- this is a comment -->
            <p>Some text</p>
            <script>alert('removed');</script>
        "#;
    let options = Options {
        comment: false,
        script: true,
        ..Options::default()
    };

    assert_eq!(slim_opts(html, &options), "<!-- this is a comment --><p>Some text</p>");
}

#[test]
fn defaults_remove_comments_only() {
    let html = r#"
            <!-- c -->
            <div style="x" onclick="y()"><script>1</script><style>b{}</style></div>
        "#;

    assert_eq!(
        no_space(&slim(html)),
        r#"<div style="x" onclick="y()"><script>1</script><style>b{}</style></div>"#
    );
}

#[test]
fn template_removal() {
    let html = "<div><template><p>t</p></template><p>kept</p></div>";
    let options = Options {
        template: true,
        ..Options::default()
    };

    assert_eq!(slim_opts(html, &options), "<div><p>kept</p></div>");
    assert_eq!(slim(html), html);
}

// =============================================================================
// Custom patterns and hooks
// =============================================================================

const CUSTOM_ELEMENTS: &str = r#"
            <div>
                <custom-element>This should be removed</custom-element>
                <span>This should be kept</span>
                <another-one>This also removed</another-one>
            </div>
        "#;

#[test]
fn tag_pattern_from_compiled_regex() {
    let options = Options {
        tag: Some(Regex::new("custom-element|another-one").expect("valid regex").into()),
        ..Options::default()
    };

    assert_eq!(
        slim_opts(CUSTOM_ELEMENTS, &options),
        "<div><span>This should be kept</span></div>"
    );
}

#[test]
fn tag_pattern_from_source_is_case_insensitive() {
    let options = Options {
        tag: Some("^CUSTOM-".into()),
        ..Options::default()
    };

    assert_eq!(
        slim_opts(CUSTOM_ELEMENTS, &options),
        "<div><span>This should be kept</span><another-one>This also removed</another-one></div>"
    );
}

#[test]
fn walk_hook_removes_elements() {
    let pattern = Regex::new("custom-element|another-one").expect("valid regex");
    let options =
        Options::default().with_hooks(WalkFn(move |el: &ElementRef| pattern.is_match(el.name())));

    assert_eq!(
        slim_opts(CUSTOM_ELEMENTS, &options),
        "<div><span>This should be kept</span></div>"
    );
}

#[test]
fn attr_pattern_removes_matching_attributes_only() {
    let html = r#"
            <div data-v-12345="some-value" id="app" class="container">
                <p data-rcs-id="abc">Hello</p>
                <span data-test="no-match">World</span>
            </div>
        "#;
    let options = Options {
        attr: Some(Regex::new("^data-v-|^data-rcs").expect("valid regex").into()),
        ..Options::default()
    };

    assert_eq!(
        slim_opts(html, &options),
        r#"<div id="app" class="container"><p>Hello</p><span data-test="no-match">World</span></div>"#
    );
}

#[test]
fn selector_removes_matches() {
    let html = r#"
            <nav class="menu"><a href="/">Home</a></nav>
            <main>
                <p class="ad sponsored">Buy</p>
                <p>Read</p>
                <a href="https://tracker.example/x">t</a>
            </main>
        "#;
    let options = Options {
        selector: Some(r#"nav.menu, main > .ad, a[href^="https://tracker."]"#.to_string()),
        ..Options::default()
    };

    assert_eq!(slim_opts(html, &options), "<main><p>Read</p></main>");
}

#[test]
fn root_hook_called_once_with_document() {
    #[derive(Default)]
    struct Roots {
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }
    impl Hooks for Roots {
        fn root(&self, document: &Document) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let names = document.root_elements().map(|el| el.name().to_string());
            self.seen.lock().expect("lock").extend(names);
        }
    }

    let roots = Arc::new(Roots::default());
    let options = Options {
        hooks: Some(roots.clone()),
        ..Options::default()
    };

    let result = slim_with_options("\n            <html></html>\n        ", &options).expect("valid options");

    assert_eq!(no_space(&result), "<html></html>");
    assert_eq!(roots.calls.load(Ordering::SeqCst), 1);
    assert_eq!(*roots.seen.lock().expect("lock"), ["html"]);
}

#[test]
fn walk_hook_sees_each_surviving_element_once() {
    struct Names(Mutex<Vec<String>>);
    impl Hooks for Names {
        fn walk(&self, el: &ElementRef) -> bool {
            self.0.lock().expect("lock").push(el.name().to_string());
            false
        }
    }

    let names = Arc::new(Names(Mutex::new(Vec::new())));
    let options = Options {
        hooks: Some(names.clone()),
        ..Options::default()
    };
    let result =
        slim_with_options("<ul><li>a</li><!--x--><li>b</li></ul><p>c</p>", &options).expect("valid options");

    assert_eq!(result, "<ul><li>a</li><li>b</li></ul><p>c</p>");
    let mut seen = names.0.lock().expect("lock").clone();
    seen.sort();
    assert_eq!(seen, ["li", "li", "p", "ul"]);
}

// =============================================================================
// JSON-LD
// =============================================================================

const LD_JSON_PAGE: &str = r#"
            <div>
                <script>[]</script>
                <script type="application/ld+json">{"@type": "Thing"}</script>
            </div>
        "#;

fn ld_json_case(script: bool, ld_json: bool) -> String {
    slim_opts(
        LD_JSON_PAGE,
        &Options {
            script,
            ld_json,
            ..Options::default()
        },
    )
}

#[test]
fn ld_json_and_script_are_independent() {
    assert_eq!(ld_json_case(true, true), "<div></div>");
    assert_eq!(
        ld_json_case(true, false),
        r#"<div><script type="application/ld+json">{"@type": "Thing"}</script></div>"#
    );
    assert_eq!(ld_json_case(false, true), "<div><script>[]</script></div>");
    assert_eq!(
        ld_json_case(false, false),
        r#"<div><script>[]</script><script type="application/ld+json">{"@type": "Thing"}</script></div>"#
    );
}

#[test]
fn defaults_keep_both_script_kinds() {
    assert_eq!(no_space(&slim(LD_JSON_PAGE)), ld_json_case(false, false));
}

// =============================================================================
// Links
// =============================================================================

#[test]
fn stylesheet_link_follows_style_flag() {
    let html = r#"
            <head>
                <link rel="stylesheet"/>
            </head>
        "#;
    let with = |style| {
        slim_opts(
            html,
            &Options {
                style,
                ..Options::default()
            },
        )
    };

    assert_eq!(with(true), "<head></head>");
    assert_eq!(with(false), r#"<head><link rel="stylesheet"></head>"#);
}

#[test]
fn preload_links_follow_their_category() {
    let html = r#"
            <head>
                <link rel="preload" href="style.css" as="style"/>
                <link rel="preload" href="main.js" as="script"/>
            </head>
        "#;
    let with = |style, script| {
        slim_opts(
            html,
            &Options {
                style,
                script,
                ..Options::default()
            },
        )
    };

    assert_eq!(with(true, true), "<head></head>");
    assert_eq!(with(true, false), r#"<head><link rel="preload" href="main.js" as="script"></head>"#);
    assert_eq!(with(false, true), r#"<head><link rel="preload" href="style.css" as="style"></head>"#);
    assert_eq!(
        with(false, false),
        r#"<head><link rel="preload" href="style.css" as="style"><link rel="preload" href="main.js" as="script"></head>"#
    );
}

// =============================================================================
// Byte input
// =============================================================================

#[test]
fn bytes_are_decoded_before_slimming() {
    let html = b"<meta charset=\"windows-1252\"><p>Caf\xE9<!-- x --></p>";
    assert_eq!(
        html_slim::slim_bytes(html),
        "<meta charset=\"windows-1252\"><p>Caf\u{e9}</p>"
    );
}

#[test]
fn bytes_with_invalid_options_fail() {
    let options = Options {
        selector: Some("p:hover".to_string()),
        ..Options::default()
    };
    assert!(html_slim::slim_bytes_with_options(b"<p></p>", &options).is_err());
}
