//! Getting template text from files.
//!
//! None of this is needed to render: [`XTemplate::new`](crate::XTemplate::new) takes
//! the text of a template however it was obtained, `include_str!` included.

use std::collections::HashMap;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::sync::Arc;

use globwalk::glob_builder;

use crate::engine::XTemplate;
use crate::errors::{Error, Result};
use crate::template::Template;

/// Reads the whole file at `path`
pub fn read_template_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let mut f = File::open(path)
        .map_err(|e| Error::chain(format!("Couldn't open template '{:?}'", path), Error::io_error(e)))?;

    let mut input = String::new();
    f.read_to_string(&mut input)
        .map_err(|e| Error::chain(format!("Failed to read template '{:?}'", path), Error::io_error(e)))?;

    Ok(input)
}

/// All the templates matching a glob, built once and rendered as many times as needed.
///
/// ```no_run
/// use xtemplate::TemplateDir;
///
/// let templates = TemplateDir::new("templates/**/*.html").unwrap();
/// let mut page = templates.load("products/list.html").unwrap();
/// page.assign("title", "Products").unwrap();
/// println!("{}", page.render().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct TemplateDir {
    glob: String,
    templates: HashMap<String, Arc<Template>>,
}

impl TemplateDir {
    /// Reads and builds every file matching the glob.
    ///
    /// Templates are named by their path relative to the part of the glob before the
    /// first `*`, with forward slashes. Fails if any of the files can't be read or built,
    /// listing every failure.
    pub fn new(dir: &str) -> Result<TemplateDir> {
        if dir.find('*').is_none() {
            return Err(Error::msg(format!(
                "TemplateDir expects a glob as input, no * were found in `{}`",
                dir
            )));
        }

        let mut templates = TemplateDir { glob: dir.to_string(), templates: HashMap::new() };
        templates.load_from_glob()?;
        Ok(templates)
    }

    /// Reads every file again, replacing all the templates
    pub fn full_reload(&mut self) -> Result<()> {
        self.load_from_glob()
    }

    fn load_from_glob(&mut self) -> Result<()> {
        let mut templates = HashMap::new();
        let mut errors = String::new();

        // Need to canonicalize the glob path because globwalk always returns
        // an empty list for paths starting with `./` or `../`.
        let (parent_dir, glob_end) = self.glob.split_at(self.glob.find('*').unwrap_or(0));
        let parent_dir = match std::fs::canonicalize(parent_dir) {
            Ok(d) => d,
            // Invalid globs just give an empty set
            Err(_) => std::path::PathBuf::from(parent_dir),
        };
        let dir = parent_dir.join(glob_end).to_string_lossy().into_owned();

        let walker = glob_builder(&dir)
            .follow_links(true)
            .build()
            .map_err(|e| Error::msg(format!("Invalid glob `{}`: {}", self.glob, e)))?;

        for entry in walker.filter_map(std::result::Result::ok) {
            let mut path = entry.into_path();
            // We only care about actual files
            if !path.is_file() {
                continue;
            }
            if path.starts_with("./") {
                path = path.strip_prefix("./").unwrap_or(&path).to_path_buf();
            }

            let name = path
                .strip_prefix(&parent_dir)
                .unwrap_or(&path)
                .to_string_lossy()
                // unify on forward slash
                .replace('\\', "/");

            match build_file(&path) {
                Ok(template) => {
                    templates.insert(name, Arc::new(template));
                }
                Err(e) => {
                    use std::error::Error;

                    errors += &format!("\n* {}", e);
                    let mut cause = e.source();
                    while let Some(e) = cause {
                        errors += &format!("\n{}", e);
                        cause = e.source();
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(Error::msg(errors));
        }

        log::debug!("Loaded {} template(s) from `{}`", templates.len(), self.glob);
        self.templates = templates;
        Ok(())
    }

    /// The block tree of a template
    pub fn get(&self, name: &str) -> Result<&Arc<Template>> {
        match self.templates.get(name) {
            Some(tpl) => Ok(tpl),
            None => Err(Error::template_not_found(name)),
        }
    }

    /// Starts a new render of a template
    pub fn load(&self, name: &str) -> Result<XTemplate> {
        self.get(name).map(|tpl| XTemplate::from_template(tpl.clone()))
    }

    /// Names of all the templates, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the glob matched no file
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn build_file(path: &Path) -> Result<Template> {
    let input = read_template_file(path)?;
    Template::new(&input).map_err(|e| Error::chain(format!("Failed to parse {:?}", path), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    use std::fs;
    use std::io::Write;

    use tempfile::tempdir;

    #[test]
    fn can_read_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "Hello {name}").unwrap();

        assert_eq!(read_template_file(&path).unwrap(), "Hello {name}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = read_template_file(dir.path().join("nope.html")).unwrap_err();

        use std::error::Error as StdError;
        let source = err.source().unwrap().downcast_ref::<Error>().unwrap();
        assert!(matches!(source.kind, ErrorKind::Io(std::io::ErrorKind::NotFound)));
    }

    #[test]
    fn can_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"<!-- BEGIN: row -->{n}<!-- END: row -->").unwrap();

        let mut xt = XTemplate::from_file(&path).unwrap();
        xt.assign_parse("n", &1, "root.row").unwrap();
        xt.assign_parse("n", &2, "root.row").unwrap();
        assert_eq!(xt.render().unwrap(), "12");
    }

    #[test]
    fn from_file_reports_structure_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.html");
        fs::write(&path, "<!-- BEGIN: row -->").unwrap();

        let err = XTemplate::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn can_load_a_glob() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("a.html"), "A").unwrap();
        fs::write(dir.path().join("nested").join("b.html"), "B {x}").unwrap();
        fs::write(dir.path().join("skipped.txt"), "nope").unwrap();

        let glob = format!("{}/**/*.html", dir.path().display());
        let templates = TemplateDir::new(&glob).unwrap();
        assert_eq!(templates.names(), vec!["a.html", "nested/b.html"]);

        let mut b = templates.load("nested/b.html").unwrap();
        b.assign("x", "!").unwrap();
        assert_eq!(b.render().unwrap(), "B !");
    }

    #[test]
    fn glob_collects_every_failure() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.html"), "<!-- END: a -->").unwrap();
        fs::write(dir.path().join("two.html"), "<!-- BEGIN: b -->").unwrap();

        let glob = format!("{}/*.html", dir.path().display());
        let msg = TemplateDir::new(&glob).unwrap_err().to_string();
        assert!(msg.contains("one.html"));
        assert!(msg.contains("two.html"));
        assert!(msg.contains("Block `a` does not have a matching begin directive"));
    }

    #[test]
    fn unknown_template_is_not_found() {
        let dir = tempdir().unwrap();
        let glob = format!("{}/*.html", dir.path().display());
        let templates = TemplateDir::new(&glob).unwrap();
        assert!(templates.is_empty());
        let err = templates.load("nope.html").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TemplateNotFound(ref name) if name == "nope.html"));
    }

    #[test]
    fn requires_a_glob() {
        assert!(TemplateDir::new("templates/").is_err());
    }

    #[test]
    fn can_reload() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.html"), "A").unwrap();
        let glob = format!("{}/*.html", dir.path().display());
        let mut templates = TemplateDir::new(&glob).unwrap();

        fs::write(dir.path().join("b.html"), "B").unwrap();
        templates.full_reload().unwrap();
        assert_eq!(templates.len(), 2);
    }
}
