//! Microdata parser
//!
//! This module walks a parsed HTML tree and assembles the items it declares:
//! - **Top-level items**: every `itemscope` element without `itemprop`
//! - **Nested items**: `itemprop` + `itemscope` elements become item values
//! - **References**: `itemref` pulls subtrees in from anywhere in the document
//! - **URLs**: link and media properties are resolved against the base URL
//!
//! # Examples
//!
//! ```
//! use microdata::Parser;
//!
//! let parser = Parser::builder()
//!     .base_url("http://example.com/")
//!     .build()
//!     .unwrap();
//!
//! let data = parser.parse_str(r#"
//!     <div itemscope>
//!         <p>My name is <span itemprop="name">Elizabeth</span>.</p>
//!     </div>
//! "#);
//!
//! assert_eq!(data.items[0].first_string("name"), Some("Elizabeth"));
//! ```
//!
//! # Reference cycles
//!
//! `itemref` turns the tree walk into a graph walk: a referenced subtree may
//! refer back to an element that is already being expanded, including the
//! referencing element itself. The reader keeps the chain of elements whose
//! references are currently being expanded and skips any reference to an
//! element already on that chain, so every document terminates. The walk
//! itself runs off an explicit work stack, so deeply nested markup cannot
//! exhaust the call stack.

use std::io::Read;

use scraper::Html;
use url::Url;

use crate::{
    backend::{DocumentNode, split_tokens},
    error::{ConfigError, Result},
    extract::{property_value, resolve_url},
    index::{IdIndex, top_level_items},
    item::{Item, Microdata},
};

/// Extracts microdata items from HTML documents
///
/// A parser holds a validated configuration and can be reused for any number
/// of documents.
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser resolving relative URLs against `base_url`
    ///
    /// A `<base href>` element in the document takes precedence, see
    /// [`ParserBuilder::honor_base_element`].
    pub fn new(base_url: Url) -> Self {
        Self {
            config: ParserConfig {
                base_url,
                honor_base_element: true,
            },
        }
    }

    /// Create a builder for configuring a parser
    pub fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Parse an HTML document held in memory
    pub fn parse_str(&self, html: &str) -> Microdata {
        let document = Html::parse_document(html);
        self.parse_document(&document)
    }

    /// Read an HTML document to the end and parse it
    ///
    /// A read failure aborts extraction and is returned as
    /// [`MicrodataError::Read`](crate::MicrodataError::Read).
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Microdata> {
        let mut html = String::new();
        reader.read_to_string(&mut html)?;
        Ok(self.parse_str(&html))
    }

    /// Extract microdata from a document already parsed with `scraper`
    pub fn parse_document(&self, document: &Html) -> Microdata {
        for error in &document.errors {
            tracing::debug!(%error, "recovered from HTML parse error");
        }

        let root = document.tree.root();
        let base = if self.config.honor_base_element {
            document_base_url(&root, &self.config.base_url)
        } else {
            self.config.base_url.clone()
        };

        extract_microdata(&root, &base)
    }
}

/// Parse an HTML string with the given base URL
///
/// Shorthand for building a [`Parser`] and calling [`Parser::parse_str`].
///
/// ```
/// let data = microdata::parse_html(
///     r#"<div itemscope><a itemprop="image" href="test.png">foo</a></div>"#,
///     "http://example.com/",
/// )
/// .unwrap();
///
/// assert_eq!(
///     data.items[0].first_string("image"),
///     Some("http://example.com/test.png")
/// );
/// ```
pub fn parse_html(html: &str, base_url: &str) -> Result<Microdata> {
    let parser = Parser::builder().base_url(base_url).build()?;
    Ok(parser.parse_str(html))
}

/// Extract all top-level items from the tree below `root`
///
/// This is the backend-independent entry point: any tree implementing
/// [`DocumentNode`] can be read.
pub fn extract_microdata<N: DocumentNode>(root: &N, base: &Url) -> Microdata {
    let index = IdIndex::build(root);
    let reader = ItemReader {
        index: &index,
        base,
    };

    let mut data = Microdata::new();
    for node in top_level_items(root) {
        data.add_item(reader.read_top_level(&node));
    }

    tracing::debug!(items = data.len(), ids = index.len(), %base, "extracted microdata");
    data
}

/// Determine the document base URL
///
/// The first `<base>` element with an `href` attribute, resolved against
/// `fallback`, wins. Without one, or if it does not resolve to a URL usable
/// as a base, `fallback` is returned.
pub fn document_base_url<N: DocumentNode>(root: &N, fallback: &Url) -> Url {
    let href = root
        .descendants()
        .into_iter()
        .find(|node| node.tag_name() == Some("base") && node.has_attr("href"))
        .and_then(|node| node.attr("href").map(str::to_string));

    let Some(href) = href else {
        return fallback.clone();
    };

    match fallback.join(&href) {
        Ok(url) if !url.cannot_be_a_base() => url,
        _ => {
            tracing::debug!(href = %href, %fallback, "ignoring unusable <base> element");
            fallback.clone()
        }
    }
}

/// Pending step of the item walk
///
/// The walk runs off an explicit task stack instead of the call stack, so
/// the depth of the document does not bound what can be read.
enum Task<N: DocumentNode> {
    /// Read a node into the item on top of the item stack
    Visit(N),
    /// Read an `itemref` target, unless it is already on the chain
    Expand(N),
    /// Put a node on the expansion chain
    Enter(N::Key),
    /// Take the most recent node off the expansion chain
    Leave,
    /// Pop the finished nested item and attach it under the node's `itemprop` names
    Attach(N),
}

/// Reader assembling items from the tree
///
/// The id index and base URL are shared read-only; the only mutation is on
/// the items currently being built.
struct ItemReader<'a, N> {
    index: &'a IdIndex<N>,
    base: &'a Url,
}

impl<N: DocumentNode> ItemReader<'_, N> {
    fn read_top_level(&self, root: &N) -> Item {
        let mut item = Item::new();

        if let Some(itemtype) = root.attr("itemtype") {
            item.types.extend(split_tokens(itemtype).map(str::to_string));
        }

        // itemid only counts on a typed item
        if !item.types.is_empty()
            && let Some(itemid) = root.attr("itemid")
        {
            item.id = resolve_url(self.base, itemid);
        }

        // The root is never on the expansion chain; read as a reference
        // target it only contributes its children, so it cannot loop back.
        let mut tasks = Vec::new();
        self.schedule_children(&mut tasks, root);
        self.schedule_refs(&mut tasks, root);

        let mut items = vec![item];
        self.run(&mut tasks, &mut items);
        items.pop().unwrap_or_default()
    }

    fn run(&self, tasks: &mut Vec<Task<N>>, items: &mut Vec<Item>) {
        let mut chain: Vec<N::Key> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(node) => self.visit(tasks, items, &node),
                Task::Expand(target) => {
                    if chain.contains(&target.key()) {
                        tracing::debug!(
                            id = target.attr("id").unwrap_or_default(),
                            "skipping itemref back into an expansion in progress"
                        );
                        continue;
                    }
                    chain.push(target.key());
                    tasks.push(Task::Leave);
                    tasks.push(Task::Visit(target));
                }
                Task::Enter(key) => chain.push(key),
                Task::Leave => {
                    chain.pop();
                }
                Task::Attach(node) => {
                    let Some(subitem) = items.pop() else { continue };
                    let Some(item) = items.last_mut() else { continue };

                    // Every property name owns its own copy of the item
                    let itemprop = node.attr("itemprop").unwrap_or_default();
                    let names: Vec<&str> = split_tokens(itemprop).collect();
                    if let Some((last, rest)) = names.split_last() {
                        for name in rest {
                            item.add_item(*name, subitem.clone());
                        }
                        item.add_item(*last, subitem);
                    }
                }
            }
        }
    }

    fn visit(&self, tasks: &mut Vec<Task<N>>, items: &mut Vec<Item>, node: &N) {
        if let Some(itemprop) = node.attr("itemprop") {
            if node.has_attr("itemscope") {
                // The nested item consumes the node's children; they are not
                // read again for the enclosing item.
                items.push(Item::new());
                tasks.push(Task::Attach(node.clone()));
                self.schedule_children(tasks, node);
                if node.has_attr("itemref") {
                    tasks.push(Task::Leave);
                    self.schedule_refs(tasks, node);
                    tasks.push(Task::Enter(node.key()));
                }
                return;
            }

            let value = property_value(node, self.base);
            if value.is_empty() {
                tracing::trace!(itemprop, "skipping empty property value");
            } else if let Some(item) = items.last_mut() {
                for name in split_tokens(itemprop) {
                    item.add_string(name, value.clone());
                }
            }
        }

        self.schedule_children(tasks, node);
    }

    /// Queue the node's children so they are read in document order
    fn schedule_children(&self, tasks: &mut Vec<Task<N>>, node: &N) {
        tasks.extend(node.children().into_iter().rev().map(Task::Visit));
    }

    /// Queue the node's `itemref` targets so they are read in token order
    fn schedule_refs(&self, tasks: &mut Vec<Task<N>>, node: &N) {
        let Some(itemref) = node.attr("itemref") else {
            return;
        };

        let mut targets = Vec::new();
        for id in split_tokens(itemref) {
            match self.index.get(id) {
                Some(target) => targets.push(Task::Expand(target.clone())),
                None => tracing::trace!(id, "itemref names no element"),
            }
        }
        tasks.extend(targets.into_iter().rev());
    }
}

/// Validated configuration for the parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub(crate) base_url: Url,
    pub(crate) honor_base_element: bool,
}

impl ParserConfig {
    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.base_url.cannot_be_a_base() {
            return Err(ConfigError::CannotBeABase(self.base_url.to_string()));
        }
        Ok(())
    }
}

/// Builder for configuring a Parser
#[derive(Debug, Clone)]
pub struct ParserBuilder {
    base_url: Option<String>,
    honor_base_element: bool,
}

impl Default for ParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserBuilder {
    /// Create a new ParserBuilder with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            honor_base_element: true,
        }
    }

    /// Set the URL relative references are resolved against (required)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Use a `<base href>` element of the document as its base URL (default: true)
    ///
    /// When disabled, the configured base URL is used for every document.
    pub fn honor_base_element(mut self, honor: bool) -> Self {
        self.honor_base_element = honor;
        self
    }

    /// Build the Parser with the configured settings
    pub fn build(self) -> std::result::Result<Parser, ConfigError> {
        let url = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
        let base_url =
            Url::parse(&url).map_err(|error| ConfigError::InvalidBaseUrl { url, error })?;

        let config = ParserConfig {
            base_url,
            honor_base_element: self.honor_base_element,
        };
        config.validate()?;
        Ok(Parser { config })
    }
}
