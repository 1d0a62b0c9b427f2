//! Value filters: functions applied to every assigned value before it is stored.

pub mod string;

pub use self::string::{escape_html, escape_xml, spaceless, striptags, trim};
#[cfg(feature = "urlencode")]
pub use self::string::{urlencode, urlencode_strict};

/// The value filter trait.
///
/// A filter is shared between template instances (and possibly threads) so it has to
/// be a pure mapping from string to string.
pub trait ValueFilter: Sync + Send {
    /// Maps an assigned value to the value stored in the variables
    fn filter(&self, value: &str) -> String;
}

impl<F> ValueFilter for F
where
    F: Fn(&str) -> String + Sync + Send,
{
    fn filter(&self, value: &str) -> String {
        self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn closures_and_fns_are_filters() {
        let upper: Arc<dyn ValueFilter> = Arc::new(|v: &str| v.to_uppercase());
        assert_eq!(upper.filter("abc"), "ABC");

        let escape: Arc<dyn ValueFilter> = Arc::new(escape_html);
        assert_eq!(escape.filter("<b>"), "&lt;b&gt;");
    }
}
