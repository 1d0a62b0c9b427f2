use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::ser::Serialize;
use serde_json::value::{to_value, Value};

use crate::errors::{Error, Result};

/// The variables a template gets rendered with.
///
/// Every variable holds a single string: inserting a name twice keeps the last value.
/// Names are dotted identifiers (`user.name`) but the dots carry no meaning here,
/// `user.name` is simply a different variable from `user`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    data: BTreeMap<String, String>,
}

impl Context {
    /// Initializes an empty context
    pub fn new() -> Self {
        Context { data: BTreeMap::new() }
    }

    /// Converts the `val` parameter to a `String` and adds it to the context.
    ///
    /// ```rust
    /// # use xtemplate::Context;
    /// let mut context = Context::new();
    /// context.insert("title", "Products");
    /// context.insert("count", 3.to_string());
    /// ```
    pub fn insert<S: Into<String>, V: Into<String>>(&mut self, key: S, val: V) {
        self.data.insert(key.into(), val.into());
    }

    /// Returns the value of a variable, if it was inserted
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Remove a key from the context, returning the value at the key if the key was previously inserted.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.data.remove(key)
    }

    /// Checks if a value exists at a specific name.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Appends the data of the `source` parameter to `self`, overwriting existing keys.
    pub fn extend(&mut self, source: Context) {
        self.data.extend(source.data);
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no variable was inserted
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Removes every variable
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Iterates over the variables, sorted by name
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.data.iter() }
    }

    /// Takes something that impl Serialize and creates a context with it.
    /// Meant to be used if you have a hashmap or a struct and don't want to insert values
    /// one by one in the context.
    ///
    /// Nested fields get dotted names: `{"user": {"name": "Bob"}}` gives `user.name` and
    /// array elements their index, `items.0`. Null fields are inserted as empty strings.
    pub fn from_serialize(value: impl Serialize) -> Result<Self> {
        let obj = to_value(value).map_err(Error::json)?;
        Context::from_value(obj)
    }

    /// Same as `from_serialize` for an already converted JSON value
    pub fn from_value(obj: Value) -> Result<Self> {
        let mut context = Context::new();
        for (name, value) in flatten_object(obj)? {
            context.insert(name, value_to_text(&value).unwrap_or_default());
        }
        Ok(context)
    }
}

/// Iterator over the variables of a [`Context`]
#[derive(Debug)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// The text a value is substituted with, `None` for null.
///
/// Strings are used verbatim, anything else in its compact JSON form.
pub(crate) fn value_to_text(value: &Value) -> Option<String> {
    match *value {
        Value::Null => None,
        Value::String(ref s) => Some(s.clone()),
        ref v => Some(v.to_string()),
    }
}

/// Flattens a JSON object into `(dotted name, leaf value)` pairs
pub(crate) fn flatten_object(obj: Value) -> Result<Vec<(String, Value)>> {
    match obj {
        Value::Object(map) => {
            let mut leaves = vec![];
            for (key, value) in map {
                flatten(key, value, &mut leaves);
            }
            Ok(leaves)
        }
        _ => Err(Error::msg(
            "Creating a Context from a Value/Serialize requires it being a JSON object",
        )),
    }
}

fn flatten(prefix: String, value: Value, leaves: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten(format!("{}.{}", prefix, key), value, leaves);
            }
        }
        Value::Array(items) => {
            for (i, value) in items.into_iter().enumerate() {
                flatten(format!("{}.{}", prefix, i), value, leaves);
            }
        }
        leaf => leaves.push((prefix, leaf)),
    }
}
