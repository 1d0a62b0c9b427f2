#![doc(html_root_url = "https://docs.rs/xtemplate")]
//! # XTemplate
//!
//! A block-based template engine: templates are plain text (usually HTML) with
//! named blocks marked by comment directives and `{variable}` tags.
//!
//! ```text
//! <table>
//! <!-- BEGIN: row -->
//!   <tr><td>{name}</td><td>{price}</td></tr>
//! <!-- END: row -->
//! </table>
//! ```
//!
//! There are no conditionals or loops in the template itself. Instead, the code
//! rendering it assigns variables and parses blocks: every parse of a block appends
//! one more rendering of it to the block's output, which is how rows get repeated.
//! A block that is never parsed disappears from the output, which is how optional
//! sections are handled.
//!
//! ## Example
//!
//! ```rust
//! use xtemplate::XTemplate;
//!
//! let mut xt = XTemplate::new(
//!     "<h1>{title}</h1><!-- BEGIN: row --><p>{name}: {price}</p><!-- END: row -->",
//! ).unwrap();
//! xt.assign("title", "Products").unwrap();
//! for (name, price) in vec![("Apple", 1), ("Pear", 2)] {
//!     xt.assign("name", name).unwrap();
//!     xt.assign("price", &price).unwrap();
//!     xt.parse("root.row").unwrap();
//! }
//!
//! assert_eq!(
//!     xt.render().unwrap(),
//!     "<h1>Products</h1><p>Apple: 1</p><p>Pear: 2</p>",
//! );
//! ```
//!
//! ## Syntax
//!
//! - `<!-- BEGIN: name -->` ... `<!-- END: name -->` delimit a block. Names are made of
//!   letters, digits and `_`; `BEGIN`/`END` are case-insensitive and an optional
//!   `# comment` can follow the name.
//! - Blocks are addressed by their qualified name, the dot-joined path of names from
//!   the outermost block: `root.table.row`. A document without an explicit `root`
//!   block is wrapped in one.
//! - `{name}` is replaced by the value of a variable, `{name # comment}` works too.
//! - `{_BLOCK_.root.table.row}` is replaced by the output of a block. Such a tag is
//!   inserted in the parent block where every child block is declared.

#![deny(missing_docs)]

mod context;
mod engine;
mod errors;
pub mod filters;
mod loader;
mod parser;
mod renderer;
mod template;
mod utils;

// Library exports.

pub use crate::context::Context;
pub use crate::engine::XTemplate;
pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::filters::ValueFilter;
pub use crate::loader::{read_template_file, TemplateDir};
pub use crate::template::{Block, Template};
pub use crate::utils::escape_html;

// Exposes the AST if one needs it but changing the AST is not considered
// a breaking change so it isn't public
#[doc(hidden)]
pub use crate::parser::ast;
#[doc(hidden)]
pub use crate::parser::{parse_content, parse_directives};
