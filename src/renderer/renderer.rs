use crate::context::Context;
use crate::errors::Result;
use crate::parser::ast::Segment;
use crate::renderer::{ParsedBlocks, Settings};
use crate::template::Template;

/// Given a `Template`, the assigned variables and the output accumulated so far,
/// runs parse passes over blocks
#[derive(Debug)]
pub struct Renderer<'a> {
    /// Block tree
    template: &'a Template,
    /// Variables to substitute
    context: &'a Context,
    /// Output of the blocks parsed so far, appended to by every pass
    parsed: &'a mut ParsedBlocks,
    settings: Settings,
}

impl<'a> Renderer<'a> {
    /// Create a new `Renderer`
    pub fn new(
        template: &'a Template,
        context: &'a Context,
        parsed: &'a mut ParsedBlocks,
        settings: Settings,
    ) -> Renderer<'a> {
        Renderer { template, context, parsed, settings }
    }

    /// Runs one pass over the block and appends the result to its output.
    ///
    /// Direct children get reset afterwards if `autoreset_parsed_sub_blocks` is on;
    /// grandchildren are left alone.
    pub fn parse(&mut self, name: &str) -> Result<()> {
        let index = self.template.block_index(name)?;
        let output = self.render_block(index);
        log::trace!("Parsed block `{}` ({} byte(s))", name, output.len());
        self.parsed.append(index, &output);

        if self.settings.autoreset_parsed_sub_blocks {
            for &child in &self.template.block(index).children {
                self.parsed.reset(child);
            }
        }

        Ok(())
    }

    /// The output of the block if it is parsed, parsing it once otherwise
    pub fn render(&mut self, name: &str) -> Result<String> {
        let index = self.template.block_index(name)?;
        if !self.parsed.is_parsed(index) {
            self.parse(name)?;
        }

        Ok(self.parsed.get(index).unwrap_or_default().to_string())
    }

    fn render_block(&self, index: usize) -> String {
        let block = self.template.block(index);
        let mut buffer = String::with_capacity(block.raw.len());

        for segment in &block.segments {
            match *segment {
                Segment::Text(ref text) => buffer.push_str(text),
                Segment::Variable { ref name, ref tag } => match self.context.get(name) {
                    Some(value) => buffer.push_str(value),
                    None if self.settings.autocleanup_unassigned_variables => {
                        log::trace!("Removing unassigned variable `{}` from block `{}`", name, block.name)
                    }
                    None => buffer.push_str(tag),
                },
                Segment::BlockRef { ref name, .. } => {
                    let output = self.template.find_block(name).and_then(|i| self.parsed.get(i));
                    match output {
                        Some(output) if !output.is_empty() => {
                            let leading = buffer.len() - buffer.trim_start_matches(&['\r', '\n'][..]).len();
                            buffer.drain(..leading);
                            buffer.push_str(output.trim());
                        }
                        // Unparsed or empty blocks vanish along with their tag
                        _ => (),
                    }
                }
            }
        }

        buffer
    }
}
