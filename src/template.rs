use std::collections::HashMap;

use crate::errors::{Error, Result};
use crate::parser::ast::{Directive, Segment};
use crate::parser::{block_placeholder, parse_content, parse_directives, ROOT_BLOCK};

/// A named region of a template, addressed by its qualified name
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    /// Dot-joined path from the outermost block, ie `root.items.item`
    pub name: String,
    /// Index of the enclosing block, `None` for a top level block
    pub parent: Option<usize>,
    /// Indices of the direct children, in declaration order
    pub children: Vec<usize>,
    /// Raw content: literal text, variable tags and child placeholders
    pub raw: String,
    /// `raw` split once into text and tags
    pub segments: Vec<Segment>,
}

impl Block {
    fn new(name: String, parent: Option<usize>) -> Block {
        Block { name, parent, children: vec![], raw: String::new(), segments: vec![] }
    }

    /// The last segment of the qualified name, as written in the directives
    pub fn local_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// The block tree of a template document.
///
/// Built once from the template text and never modified afterwards; the mutable
/// state of a render lives in [`XTemplate`](crate::XTemplate).
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    /// The template text as given, before any implicit root was added
    pub source: String,
    root: String,
    blocks: Vec<Block>,
    index: HashMap<String, usize>,
}

impl Template {
    /// Parses the given text into a block tree.
    ///
    /// If no `<!-- BEGIN: root -->` directive is present, the whole document is
    /// wrapped in an implicit `root` block.
    pub fn new(source: &str) -> Result<Template> {
        let mut directives = parse_directives(source)?;

        let explicit_root = directives.iter().find_map(|d| match *d {
            Directive::Begin(name) if name.eq_ignore_ascii_case(ROOT_BLOCK) => Some(name),
            _ => None,
        });
        let root = match explicit_root {
            Some(name) => name,
            None => {
                directives.insert(0, Directive::Begin(ROOT_BLOCK));
                directives.push(Directive::End(ROOT_BLOCK));
                ROOT_BLOCK
            }
        };

        let mut builder = Builder::default();
        for directive in directives {
            match directive {
                Directive::Text(text) => builder.push_text(text),
                Directive::Begin(name) => builder.begin(name),
                Directive::End(name) => builder.end(name)?,
            }
        }

        let template = builder.finish(source, root)?;
        log::debug!("Built a template with {} block(s)", template.blocks.len());
        Ok(template)
    }

    /// Name of the block holding the whole document: `root` as spelled in its
    /// `BEGIN` directive, `root` if it was added implicitly
    pub fn root_name(&self) -> &str {
        &self.root
    }

    /// Whether a block with that qualified name exists
    pub fn has_block(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Qualified names of all blocks, in the order they were first declared
    pub fn block_names(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.name.as_str()).collect()
    }

    /// Qualified names of the direct children of a block
    pub fn children(&self, name: &str) -> Result<Vec<&str>> {
        let block = self.get_block(name)?;
        Ok(block.children.iter().map(|&i| self.blocks[i].name.as_str()).collect())
    }

    /// The raw content of a block, child placeholders included
    pub fn raw_content(&self, name: &str) -> Result<&str> {
        Ok(&self.get_block(name)?.raw)
    }

    /// Looks up a block by its qualified name
    pub fn get_block(&self, name: &str) -> Result<&Block> {
        self.block_index(name).map(|i| &self.blocks[i])
    }

    pub(crate) fn block_index(&self, name: &str) -> Result<usize> {
        match self.index.get(name) {
            Some(&i) => Ok(i),
            None => Err(Error::block_not_found(name)),
        }
    }

    pub(crate) fn find_block(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn block(&self, index: usize) -> &Block {
        &self.blocks[index]
    }

    pub(crate) fn len(&self) -> usize {
        self.blocks.len()
    }
}

/// Walks the directives of a document while keeping the stack of open blocks
#[derive(Debug, Default)]
struct Builder {
    blocks: Vec<Block>,
    index: HashMap<String, usize>,
    open: Vec<usize>,
}

impl Builder {
    fn current(&self) -> Option<usize> {
        self.open.last().copied()
    }

    fn push_text(&mut self, text: &str) {
        match self.current() {
            Some(i) => self.blocks[i].raw.push_str(text),
            None => log::trace!("Discarding {} byte(s) of text outside of any block", text.len()),
        }
    }

    fn begin(&mut self, name: &str) {
        let parent = self.current();
        let qualified = match parent {
            Some(p) => format!("{}.{}", self.blocks[p].name, name),
            None => name.to_string(),
        };

        let index = match self.index.get(&qualified).copied() {
            Some(i) => i,
            None => {
                let i = self.blocks.len();
                self.blocks.push(Block::new(qualified.clone(), parent));
                self.index.insert(qualified.clone(), i);
                i
            }
        };

        if let Some(p) = parent {
            let parent_block = &mut self.blocks[p];
            parent_block.raw.push_str(&block_placeholder(&qualified));
            if !parent_block.children.contains(&index) {
                parent_block.children.push(index);
            }
        }

        self.open.push(index);
    }

    /// Closes the innermost open block, provided `name` is one of the open blocks
    fn end(&mut self, name: &str) -> Result<()> {
        if !self.open.iter().any(|&i| self.blocks[i].local_name() == name) {
            return Err(Error::missing_begin(name));
        }

        if let Some(closed) = self.open.pop() {
            if self.blocks[closed].local_name() != name {
                log::trace!("`END: {}` closed block `{}`", name, self.blocks[closed].name);
            }
        }
        Ok(())
    }

    fn finish(mut self, source: &str, root: &str) -> Result<Template> {
        if let Some(i) = self.current() {
            return Err(Error::missing_end(&self.blocks[i].name));
        }

        for block in &mut self.blocks {
            block.segments = parse_content(&block.raw)?;
        }

        Ok(Template {
            source: source.to_string(),
            root: root.to_string(),
            blocks: self.blocks,
            index: self.index,
        })
    }
}
