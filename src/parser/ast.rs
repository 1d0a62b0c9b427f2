use std::fmt;

/// A piece of a template document, in source order
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Directive<'a> {
    /// Anything that is not a block directive, `<!--` included
    Text(&'a str),
    /// `<!-- BEGIN: name -->`
    Begin(&'a str),
    /// `<!-- END: name -->`
    End(&'a str),
}

impl<'a> fmt::Display for Directive<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Directive::Text(text) => write!(f, "{}", text),
            Directive::Begin(name) => write!(f, "<!-- BEGIN: {} -->", name),
            Directive::End(name) => write!(f, "<!-- END: {} -->", name),
        }
    }
}

/// A piece of the raw content of a block, in source order
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    /// Literal text, output as is
    Text(String),
    /// A `{name}` tag, resolved against the assigned variables
    Variable {
        /// Dotted variable name
        name: String,
        /// The tag as written, comment included
        tag: String,
    },
    /// A `{_BLOCK_.qualified.name}` tag, resolved against the parsed output of a block
    BlockRef {
        /// Qualified name of the referenced block
        name: String,
        /// The tag as written, comment included
        tag: String,
    },
}

impl Segment {
    /// Builds the segment for a tag given its dotted path and its full text
    pub fn from_tag(path: &str, tag: &str) -> Segment {
        let mut parts = path.splitn(2, '.');
        if parts.next() == Some(super::BLOCK_REF) {
            let name = parts.next().unwrap_or_default();
            return Segment::BlockRef { name: name.to_string(), tag: tag.to_string() };
        }

        Segment::Variable { name: path.to_string(), tag: tag.to_string() }
    }
}
