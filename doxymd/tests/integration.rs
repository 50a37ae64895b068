use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_doxymd")))
}

fn fixture_xml() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/xml")
}

/// Run against the fixture export into `tmp/api`, sidebar in `tmp/sidebar.json`.
fn generate(tmp: &TempDir, extra: &[&str]) -> assert_cmd::assert::Assert {
    cmd()
        .arg("-i")
        .arg(fixture_xml())
        .arg("-o")
        .arg(tmp.path().join("api"))
        .arg("--sidebar")
        .arg(tmp.path().join("sidebar.json"))
        .args(extra)
        .assert()
}

fn read(tmp: &TempDir, rel: &str) -> String {
    let path = tmp.path().join(rel);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

// -- pages --

#[test]
fn writes_one_page_per_compound() {
    let tmp = TempDir::new().unwrap();
    generate(&tmp, &[]).success();

    for rel in [
        "api/index.md",
        "api/classes.md",
        "api/classes/geo-Shape.md",
        "api/classes/geo-Widget.md",
        "api/classes/geo-Box.md",
        "api/namespaces/geo.md",
        "api/files/include-geo-shapes-h.md",
        "api/folders/include.md",
        "api/folders/include-geo.md",
        "api/groups/shapes.md",
        "api/pages/index.md",
        "api/pages/usage.md",
    ] {
        assert!(tmp.path().join(rel).is_file(), "missing {}", rel);
    }

    // the specialization shares the primary template's path, plus a hash
    let specializations: Vec<String> = fs::read_dir(tmp.path().join("api/classes"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("geo-Box-"))
        .collect();
    assert_eq!(specializations.len(), 1, "{:?}", specializations);
}

#[test]
fn class_page_sections_and_links() {
    let tmp = TempDir::new().unwrap();
    generate(&tmp, &[]).success();
    let widget = read(&tmp, "api/classes/geo-Widget.md");

    assert!(widget.contains("title: \"geo::Widget Class Reference\""));
    assert!(widget.contains("slug: \"/api/classes/geo/Widget\""));
    assert!(widget.contains("#include <geo/shapes.h>"));

    let ctors = widget.find("## Constructors").unwrap();
    let dtor = widget.find("## Destructor").unwrap();
    let ops = widget.find("## Operators").unwrap();
    let funcs = widget.find("## Public Member Functions").unwrap();
    assert!(ctors < dtor && dtor < ops && ops < funcs);

    assert!(widget.contains("Reimplements <a href=\"/api/classes/geo/Shape#a01\">geo::Shape::area</a>."));
    assert!(widget.contains("<a href=\"/api/classes/geo/Shape#a01\">Shape::area</a>"));
    assert!(widget.contains("<a href=\"#a01\">Widget()</a>"));
    assert!(widget.contains("Definition at line 31 of file <a href=\"/api/files/include/geo/shapes-h\">shapes.h</a>."));

    let shape = read(&tmp, "api/classes/geo-Shape.md");
    assert!(shape.contains("Reimplemented in <a href=\"/api/classes/geo/Widget#a05\">geo::Widget::area</a>."));
}

#[test]
fn namespace_and_page_content() {
    let tmp = TempDir::new().unwrap();
    generate(&tmp, &[]).success();

    let geo = read(&tmp, "api/namespaces/geo.md");
    assert!(geo.contains("title: \"geo Namespace Reference\""));
    assert!(geo.contains("<a id=\"a10a11\"></a><code>Red</code>"));
    assert!(geo.contains("<a href=\"/api/classes/geo/Widget\">Widget</a>"));

    let usage = read(&tmp, "api/pages/usage.md");
    assert!(usage.contains("<a href=\"/api/namespaces/geo#a30\">geo::make\\_widget()</a>"));

    let root = read(&tmp, "api/index.md");
    assert!(root.contains("title: \"Geo API Reference\""));
    assert!(root.contains("Version: 2.1.0"));
}

#[test]
fn index_pages_can_be_disabled() {
    let tmp = TempDir::new().unwrap();
    generate(&tmp, &[]).success();
    assert!(tmp.path().join("api/indices/functions/all.md").is_file());
    assert!(read(&tmp, "api/indices/functions/all.md").contains("make\\_widget"));

    let tmp = TempDir::new().unwrap();
    generate(&tmp, &["--no-index-pages"]).success();
    assert!(!tmp.path().join("api/indices").exists());
}

#[test]
fn todo_placeholders_and_listing_are_opt_in() {
    let tmp = TempDir::new().unwrap();
    generate(&tmp, &[]).success();
    assert!(!read(&tmp, "api/classes/geo-Box.md").contains("TODO"));
    assert!(!read(&tmp, "api/files/include-geo-shapes-h.md").contains("## File Listing"));

    let tmp = TempDir::new().unwrap();
    generate(&tmp, &["--suggest-todo", "--render-program-listing"]).success();
    assert!(read(&tmp, "api/classes/geo-Box.md").contains("TODO: add detailed description"));
    let file = read(&tmp, "api/files/include-geo-shapes-h.md");
    assert!(file.contains("## File Listing"));
    assert!(file.contains("<pre><code>#pragma once\n&nbsp;\n#include &lt;string&gt;</code></pre>"));
}

#[test]
fn stale_output_is_removed() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("api/old")).unwrap();
    fs::write(tmp.path().join("api/old/page.md"), "stale").unwrap();
    generate(&tmp, &[]).success();
    assert!(!tmp.path().join("api/old").exists());
}

// -- navigation --

#[test]
fn sidebar_follows_collection_order() {
    let tmp = TempDir::new().unwrap();
    generate(&tmp, &[]).success();
    let sidebar: serde_json::Value = serde_json::from_str(&read(&tmp, "sidebar.json")).unwrap();

    assert_eq!(sidebar["label"], "API Reference");
    let labels: Vec<&str> = sidebar["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Topics", "Namespaces", "Classes", "Files", "Pages"]);

    let classes = &sidebar["items"][2];
    assert_eq!(classes["link"]["id"], "api/classes");
    let shape = classes["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["label"] == "Shape")
        .unwrap();
    assert_eq!(shape["type"], "category");
    assert_eq!(shape["items"][0]["id"], "api/classes/geo-Widget");
}

#[test]
fn menu_and_redirects_when_requested() {
    let tmp = TempDir::new().unwrap();
    let menu = tmp.path().join("menu.json");
    let redirects = tmp.path().join("html");
    generate(&tmp, &["--menu-label", "Geo API"]).success();
    assert!(!menu.exists());

    cmd()
        .arg("-i")
        .arg(fixture_xml())
        .arg("-o")
        .arg(tmp.path().join("api"))
        .arg("--sidebar")
        .arg(tmp.path().join("sidebar.json"))
        .arg("--menu")
        .arg(&menu)
        .arg("--redirects")
        .arg(&redirects)
        .arg("--base-url")
        .arg("https://example.org/")
        .assert()
        .success();

    let menu: serde_json::Value = serde_json::from_str(&fs::read_to_string(menu).unwrap()).unwrap();
    assert_eq!(menu["type"], "dropdown");
    assert_eq!(menu["items"][2]["to"], "/api/classes");

    let stub = fs::read_to_string(redirects.join("classgeo_1_1_widget.html")).unwrap();
    assert!(stub.contains("https://example.org/api/classes/geo/Widget"));
    assert!(redirects.join("shapes_8h_source.html").is_file());

    // links carry the base URL, slugs do not
    let widget = read(&tmp, "api/classes/geo-Widget.md");
    assert!(widget.contains("slug: \"/api/classes/geo/Widget\""));
    assert!(widget.contains("<a href=\"https://example.org/api/classes/geo/Shape\">"));
}

// -- configuration --

#[test]
fn config_file_values_with_flag_overrides() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("doxymd.json");
    fs::write(
        &config,
        r#"{ "api_base_path": "reference", "sidebar_category_label": "Geo Reference" }"#,
    )
    .unwrap();
    generate(&tmp, &["--config", config.to_str().unwrap(), "--sidebar-label", "Geo"]).success();

    assert!(read(&tmp, "api/classes/geo-Widget.md").contains("slug: \"/reference/classes/geo/Widget\""));
    assert!(read(&tmp, "sidebar.json").contains("\"label\": \"Geo\""));
}

#[test]
fn unknown_config_key_fails() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("doxymd.json");
    fs::write(&config, r#"{ "outputFolder": "docs" }"#).unwrap();
    generate(&tmp, &["--config", config.to_str().unwrap()])
        .failure()
        .stderr(predicate::str::contains("invalid config file"));
}

#[test]
fn output_enclosing_input_is_refused() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .arg("-i")
        .arg(tmp.path().join("xml"))
        .arg("-o")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to use"));
}

#[test]
fn missing_input_fails() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .arg("-i")
        .arg(tmp.path().join("nowhere"))
        .arg("-o")
        .arg(tmp.path().join("api"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read Doxygen XML"));
}
