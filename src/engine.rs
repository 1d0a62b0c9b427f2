use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::value::{to_value, Value};

use crate::context::{flatten_object, value_to_text, Context};
use crate::errors::{Error, Result};
use crate::filters::ValueFilter;
use crate::loader::read_template_file;
use crate::renderer::{ParsedBlocks, Renderer, Settings};
use crate::template::Template;

/// A template being rendered: the block tree plus the variables assigned so far and
/// the output accumulated by every parsed block.
///
/// The usual cycle is to assign the variables of a row, parse the block of that row,
/// repeat for every row, then render:
///
/// ```rust
/// use xtemplate::XTemplate;
///
/// let mut xt = XTemplate::new(
///     "<ul><!-- BEGIN: item --><li>{name}</li><!-- END: item --></ul>",
/// ).unwrap();
/// for name in &["a", "b"] {
///     xt.assign_parse("name", name, "root.item").unwrap();
/// }
/// assert_eq!(xt.render().unwrap(), "<ul><li>a</li><li>b</li></ul>");
/// ```
#[derive(Clone)]
pub struct XTemplate {
    template: Arc<Template>,
    context: Context,
    parsed: ParsedBlocks,
    settings: Settings,
    value_filter: Option<Arc<dyn ValueFilter>>,
    allow_null_values: bool,
}

impl XTemplate {
    /// Builds the block tree of the given template text.
    ///
    /// Fails if a block directive has no matching begin or end.
    pub fn new(source: &str) -> Result<XTemplate> {
        Ok(XTemplate::from_template(Arc::new(Template::new(source)?)))
    }

    /// Reads the file at `path` and builds its block tree
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<XTemplate> {
        let path = path.as_ref();
        let source = read_template_file(path)?;
        XTemplate::new(&source)
            .map_err(|e| Error::chain(format!("Failed to parse {:?}", path), e))
    }

    /// Starts a render of an already built block tree, with no variables assigned
    /// and every block unparsed.
    pub fn from_template(template: Arc<Template>) -> XTemplate {
        let parsed = ParsedBlocks::new(template.len());
        XTemplate {
            template,
            context: Context::new(),
            parsed,
            settings: Settings::default(),
            value_filter: None,
            allow_null_values: true,
        }
    }

    /// The block tree
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The variables assigned so far
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The current value of a variable, after filtering
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.context.get(name)
    }

    /// Assigns a value to a variable, overwriting any previous value.
    ///
    /// Strings are stored as is, other values in their JSON form (`1`, `true`,
    /// `[1,2]`). `None`/null stores an empty string, or fails if null values are not
    /// allowed. The value filter, if any, is applied before storing.
    pub fn assign<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<()> {
        let text = self.prepare_value(name, to_value(value)?)?;
        self.context.insert(name, text);
        Ok(())
    }

    /// Assigns every `(name, value)` pair, stopping at the first failure
    pub fn assign_all<I, K, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Serialize,
    {
        for (name, value) in values {
            self.assign(name.as_ref(), &value)?;
        }
        Ok(())
    }

    /// Assigns every field of a serializable object, nested fields getting dotted
    /// names (`user.name`, `tags.0`).
    ///
    /// Nothing is assigned if one of the fields can't be.
    pub fn assign_object<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let mut texts = vec![];
        for (name, value) in flatten_object(to_value(value)?)? {
            let text = self.prepare_value(&name, value)?;
            texts.push((name, text));
        }

        for (name, text) in texts {
            self.context.insert(name, text);
        }
        Ok(())
    }

    /// Assigns a variable and parses a block, the usual way to render a row
    pub fn assign_parse<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
        block: &str,
    ) -> Result<()> {
        self.assign(name, value)?;
        self.parse(block)
    }

    /// Substitutes the tags of a block and appends the result to its output.
    ///
    /// `block` is a qualified name such as `root.items.item`.
    pub fn parse(&mut self, block: &str) -> Result<()> {
        self.renderer().parse(block)
    }

    /// Forgets the output of a block, as if it was never parsed.
    /// Unknown names are ignored.
    pub fn reset_parsed_block(&mut self, block: &str) {
        match self.template.find_block(block) {
            Some(index) => self.parsed.reset(index),
            None => log::trace!("Not resetting unknown block `{}`", block),
        }
    }

    /// Forgets the output of the root block
    pub fn reset(&mut self) {
        let template = self.template.clone();
        self.reset_parsed_block(template.root_name());
    }

    /// Forgets the output of every block; variables are kept
    pub fn reset_all(&mut self) {
        self.parsed.reset_all();
    }

    /// Renders the whole document, see [`render_block`](XTemplate::render_block).
    ///
    /// The root block is the one named `root` in any case, ie `<!-- BEGIN: ROOT -->`.
    pub fn render(&mut self) -> Result<String> {
        let template = self.template.clone();
        self.render_block(template.root_name())
    }

    /// Returns the output accumulated by a block, parsing it once first if it
    /// hasn't been parsed since its last reset
    pub fn render_block(&mut self, block: &str) -> Result<String> {
        if block.is_empty() {
            return Err(Error::block_not_found(block));
        }
        self.renderer().render(block)
    }

    /// Sets the filter applied to every value assigned from now on
    pub fn set_value_filter<F: ValueFilter + 'static>(&mut self, filter: F) {
        self.value_filter = Some(Arc::new(filter));
    }

    /// Same as `set_value_filter` with a filter shared with other instances
    pub fn set_shared_value_filter(&mut self, filter: Arc<dyn ValueFilter>) {
        self.value_filter = Some(filter);
    }

    /// Stops filtering assigned values
    pub fn clear_value_filter(&mut self) {
        self.value_filter = None;
    }

    /// Whether `None`/null values can be assigned (on by default)
    pub fn set_allow_null_values(&mut self, allow: bool) {
        self.allow_null_values = allow;
    }

    /// Whether variable tags without a value are removed from the output (on by default).
    /// When off, they are output as written.
    pub fn set_autocleanup_unassigned_variables(&mut self, cleanup: bool) {
        self.settings.autocleanup_unassigned_variables = cleanup;
    }

    /// Whether parsing a block resets the output of its direct children (on by default)
    pub fn set_autoreset_parsed_sub_blocks(&mut self, reset: bool) {
        self.settings.autoreset_parsed_sub_blocks = reset;
    }

    /// See [`set_allow_null_values`](XTemplate::set_allow_null_values)
    pub fn allows_null_values(&self) -> bool {
        self.allow_null_values
    }

    /// See [`set_autocleanup_unassigned_variables`](XTemplate::set_autocleanup_unassigned_variables)
    pub fn autocleanup_unassigned_variables(&self) -> bool {
        self.settings.autocleanup_unassigned_variables
    }

    /// See [`set_autoreset_parsed_sub_blocks`](XTemplate::set_autoreset_parsed_sub_blocks)
    pub fn autoreset_parsed_sub_blocks(&self) -> bool {
        self.settings.autoreset_parsed_sub_blocks
    }

    fn renderer(&mut self) -> Renderer<'_> {
        Renderer::new(&self.template, &self.context, &mut self.parsed, self.settings)
    }

    fn prepare_value(&self, name: &str, value: Value) -> Result<String> {
        if name.is_empty() {
            return Err(Error::invalid_variable_name());
        }

        let text = match value_to_text(&value) {
            Some(text) => text,
            None if self.allow_null_values => String::new(),
            None => return Err(Error::null_value(name)),
        };

        Ok(match self.value_filter {
            Some(ref filter) => filter.filter(&text),
            None => text,
        })
    }
}

impl fmt::Debug for XTemplate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "XTemplate {{")?;
        writeln!(f, "\n\tblocks: [")?;
        for name in self.template.block_names() {
            writeln!(f, "\t\t{},", name)?;
        }
        write!(f, "\t]")?;
        writeln!(f, "\n\tvariables: [")?;
        for (name, _) in self.context.iter() {
            writeln!(f, "\t\t{},", name)?;
        }
        write!(f, "\t]")?;
        writeln!(f, "\n\tvalue_filter: {}", self.value_filter.is_some())?;
        write!(f, "}}")
    }
}
