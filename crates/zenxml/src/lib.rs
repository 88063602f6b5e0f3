//! zenxml - tree-document model and XML codec for the ZenXML editor
//!
//! # Quick Start
//!
//! ```
//! use zenxml::{parse, serialize};
//! # fn main() -> Result<(), zenxml::Error> {
//! let root = parse("<root>\n\t<child name=\"x\">hi</child>\n</root>")?;
//! let child = root.children().first();
//! assert_eq!(child.and_then(|c| c.attribute()), Some("x"));
//! assert_eq!(child.and_then(|c| c.text()), Some("hi"));
//! assert_eq!(serialize(&root), "<root>\n\t<child name=\"x\">hi</child>\n</root>");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod cursor;
pub use cursor::Cursor;

pub mod node;
pub use node::Node;

pub mod parser;
pub use parser::{Config, ExtraAttributes, Parser};

pub mod serializer;
pub use serializer::serialize;

/// Parse an XML document from string
pub fn parse(s: &str) -> Result<Node> {
    let mut parser = Parser::new(s.as_bytes());
    parser.parse()
}

/// Parse an XML document from bytes
pub fn parse_bytes(bytes: &[u8]) -> Result<Node> {
    let mut parser = Parser::new(bytes);
    parser.parse()
}

/// Parse with custom configuration
pub fn parse_with_config(s: &str, config: Config) -> Result<Node> {
    let mut parser = Parser::with_config(s.as_bytes(), config);
    parser.parse()
}
