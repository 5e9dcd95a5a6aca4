use std::io::Write;

use clap::Parser as _;
use microdata::{DocumentNode, Item, cli, extract_microdata};
use pretty_assertions::assert_eq;
use url::Url;

/// Minimal in-memory tree, independent of any HTML parser
#[derive(Debug)]
struct TestNode {
    tag: Option<&'static str>,
    attrs: Vec<(&'static str, &'static str)>,
    text: Option<&'static str>,
    children: Vec<TestNode>,
}

fn element(
    tag: &'static str,
    attrs: &[(&'static str, &'static str)],
    children: Vec<TestNode>,
) -> TestNode {
    TestNode {
        tag: Some(tag),
        attrs: attrs.to_vec(),
        text: None,
        children,
    }
}

fn text(content: &'static str) -> TestNode {
    TestNode {
        tag: None,
        attrs: Vec::new(),
        text: Some(content),
        children: Vec::new(),
    }
}

#[derive(Debug, Clone, Copy)]
struct Handle<'a>(&'a TestNode);

impl DocumentNode for Handle<'_> {
    type Key = *const TestNode;

    fn key(&self) -> Self::Key {
        self.0
    }

    fn tag_name(&self) -> Option<&str> {
        self.0.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.0
            .attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    fn children(&self) -> Vec<Self> {
        self.0.children.iter().map(Handle).collect()
    }

    fn text(&self) -> Option<&str> {
        self.0.text
    }
}

#[test]
fn test_custom_backend() {
    let tree = element(
        "root",
        &[],
        vec![
            element(
                "div",
                &[("itemscope", ""), ("itemtype", "http://schema.org/Person")],
                vec![
                    element("span", &[("itemprop", "name")], vec![text("Ama"), text("nda")]),
                    element(
                        "a",
                        &[("itemprop", "url"), ("href", "/amanda"), ("href", "/ignored")],
                        vec![text("home")],
                    ),
                    element(
                        "span",
                        &[
                            ("id", "loop"),
                            ("itemprop", "band"),
                            ("itemscope", ""),
                            ("itemref", "loop"),
                        ],
                        vec![element("b", &[("itemprop", "name")], vec![text("Jazz Band")])],
                    ),
                ],
            ),
        ],
    );

    let base = Url::parse("http://example.com/").unwrap();
    let data = extract_microdata(&Handle(&tree), &base);

    let mut band = Item::new();
    band.add_string("name", "Jazz Band");

    let mut person = Item::new();
    person.add_type("http://schema.org/Person");
    person.add_string("name", "Amanda");
    person.add_string("url", "http://example.com/amanda");
    person.add_item("band", band);

    assert_eq!(data.items, vec![person]);
}

#[test]
fn test_recipe_document() {
    let html = r#"<!DOCTYPE html>
    <html>
    <body>
      <article itemscope itemtype="http://schema.org/Recipe" itemid="/recipes/pancakes" itemref="nutrition">
        <h1 itemprop="name">Pancakes</h1>
        <img itemprop="image" src="/img/pancakes.jpg">
        <meta itemprop="prepTime" content="PT10M">
        <time itemprop="cookTime" datetime="PT15M">15 minutes</time>
        <div itemprop="author" itemscope itemtype="http://schema.org/Person">
          By <span itemprop="name">Sam</span>
        </div>
        <ul>
          <li itemprop="recipeIngredient">Flour</li>
          <li itemprop="recipeIngredient">Milk</li>
          <li itemprop="recipeIngredient">Eggs</li>
        </ul>
      </article>
      <aside id="nutrition" itemprop="nutrition" itemscope>
        <span itemprop="calories">250 calories</span>
      </aside>
    </body>
    </html>"#;

    let data = microdata::parse_html(html, "https://cooking.example/").unwrap();
    assert_eq!(data.len(), 1);

    let recipe = &data.items[0];
    assert_eq!(recipe.types, vec!["http://schema.org/Recipe"]);
    assert_eq!(recipe.id.as_deref(), Some("https://cooking.example/recipes/pancakes"));
    assert_eq!(recipe.first_string("name"), Some("Pancakes"));
    assert_eq!(
        recipe.first_string("image"),
        Some("https://cooking.example/img/pancakes.jpg")
    );
    assert_eq!(recipe.first_string("prepTime"), Some("PT10M"));
    assert_eq!(recipe.first_string("cookTime"), Some("PT15M"));

    let ingredients: Vec<_> = recipe
        .get("recipeIngredient")
        .iter()
        .filter_map(|value| value.as_str())
        .collect();
    assert_eq!(ingredients, vec!["Flour", "Milk", "Eggs"]);

    let author = recipe.first_item("author").unwrap();
    assert_eq!(author.first_string("name"), Some("Sam"));

    let nutrition = recipe.first_item("nutrition").unwrap();
    assert_eq!(nutrition.first_string("calories"), Some("250 calories"));
}

#[test]
fn test_cli_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"<div itemscope itemtype="T"><a itemprop="link" href="page">p</a></div>"#
    )
    .unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let args = cli::Cli::parse_from(["microdata", path.as_str(), "--base-url", "http://a.example/"]);

    let mut out = Vec::new();
    cli::execute(&args, std::io::empty(), &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"items\":[{\"properties\":{\"link\":[\"http://a.example/page\"]},\"type\":[\"T\"]}]}\n"
    );
}

#[test]
fn test_cli_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.html");
    let args = cli::Cli::parse_from(["microdata", missing.to_str().unwrap()]);

    let mut out = Vec::new();
    let err = cli::execute(&args, std::io::empty(), &mut out).unwrap_err();

    assert!(err.to_string().starts_with("Failed to open"));
    assert!(out.is_empty());
}
