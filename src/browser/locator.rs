//! Element locators
//!
//! A locator is an immutable (strategy, value) pair identifying zero or more
//! elements on the current page. Locators carry no uniqueness guarantee; the
//! page decides how many elements match.

use std::fmt;

/// How a locator value is interpreted against the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Raw CSS selector.
    Css,
    /// Element id attribute.
    Id,
    /// Form control name attribute.
    Name,
    /// Exact visible text of an anchor element.
    LinkText,
}

/// The query actually sent to the browser for a locator.
///
/// Everything except link text lowers to CSS; anchors matched by visible
/// text need an XPath query because CSS cannot see text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Css(String),
    XPath(String),
}

/// An immutable (strategy, value) pair identifying page elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    pub strategy: Strategy,
    pub value: &'static str,
}

impl Locator {
    pub const fn css(value: &'static str) -> Self {
        Self { strategy: Strategy::Css, value }
    }

    pub const fn id(value: &'static str) -> Self {
        Self { strategy: Strategy::Id, value }
    }

    pub const fn name(value: &'static str) -> Self {
        Self { strategy: Strategy::Name, value }
    }

    pub const fn link_text(value: &'static str) -> Self {
        Self { strategy: Strategy::LinkText, value }
    }

    /// Lower the locator to the query the browser understands.
    pub fn query(&self) -> Query {
        match self.strategy {
            Strategy::Css => Query::Css(self.value.to_string()),
            Strategy::Id => Query::Css(format!("#{}", self.value)),
            Strategy::Name => Query::Css(format!("[name='{}']", self.value)),
            Strategy::LinkText => Query::XPath(format!(
                "//a[normalize-space(.)='{}']",
                self.value
            )),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.strategy {
            Strategy::Css => write!(f, "css `{}`", self.value),
            Strategy::Id => write!(f, "id `{}`", self.value),
            Strategy::Name => write!(f, "name `{}`", self.value),
            Strategy::LinkText => write!(f, "link text `{}`", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_lowers_to_css() {
        let q = Locator::id("login_field").query();
        assert_eq!(q, Query::Css("#login_field".to_string()));
    }

    #[test]
    fn test_name_lowers_to_attribute_selector() {
        let q = Locator::name("commit").query();
        assert_eq!(q, Query::Css("[name='commit']".to_string()));
    }

    #[test]
    fn test_css_passes_through() {
        let q = Locator::css("button.Button--primary").query();
        assert_eq!(q, Query::Css("button.Button--primary".to_string()));
    }

    #[test]
    fn test_link_text_lowers_to_xpath() {
        let q = Locator::link_text("Sign out").query();
        assert_eq!(
            q,
            Query::XPath("//a[normalize-space(.)='Sign out']".to_string())
        );
    }
}
