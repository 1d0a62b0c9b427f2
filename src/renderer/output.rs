/// The accumulated output of every block of a template.
///
/// A block without an entry has not been parsed since it was last reset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedBlocks {
    outputs: Vec<Option<String>>,
}

impl ParsedBlocks {
    /// Creates the storage for a template with `len` blocks, all unparsed
    pub fn new(len: usize) -> ParsedBlocks {
        ParsedBlocks { outputs: vec![None; len] }
    }

    /// The output accumulated so far, `None` if the block is unparsed
    pub fn get(&self, index: usize) -> Option<&str> {
        self.outputs.get(index).and_then(|o| o.as_deref())
    }

    /// Whether the block has been parsed since its last reset
    pub fn is_parsed(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Appends the output of one parse pass
    pub fn append(&mut self, index: usize, output: &str) {
        match self.outputs[index] {
            Some(ref mut existing) => existing.push_str(output),
            None => self.outputs[index] = Some(output.to_string()),
        }
    }

    /// Back to unparsed
    pub fn reset(&mut self, index: usize) {
        self.outputs[index] = None;
    }

    /// Resets every block
    pub fn reset_all(&mut self) {
        for output in &mut self.outputs {
            *output = None;
        }
    }
}
