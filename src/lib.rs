//! Extract W3C microdata items from HTML documents
//!
//! ```
//! use microdata::Parser;
//!
//! let parser = Parser::builder().base_url("http://example.com/").build().unwrap();
//! let data = parser.parse_str(r#"
//!     <div itemscope itemtype="http://example.org/animals#cat">
//!         <h1 itemprop="name">Hedral</h1>
//!         <img itemprop="img" src="hedral.jpeg">
//!     </div>
//! "#);
//!
//! let cat = &data.items[0];
//! assert_eq!(cat.types, vec!["http://example.org/animals#cat"]);
//! assert_eq!(cat.first_string("name"), Some("Hedral"));
//! assert_eq!(cat.first_string("img"), Some("http://example.com/hedral.jpeg"));
//! ```

// Core modules
mod backend;
pub mod cli;
mod error;
mod extract;
mod index;
mod item;
mod parser;

// Public exports
pub use backend::{DocumentNode, split_tokens};
pub use error::{ConfigError, MicrodataError, Result};
pub use extract::{ValueSource, property_value, resolve_url, value_source};
pub use index::{IdIndex, top_level_items};
pub use item::{Item, Microdata, PropertyMap, PropertyValue};
pub use parser::{
    Parser, ParserBuilder, ParserConfig, document_base_url, extract_microdata, parse_html,
};
