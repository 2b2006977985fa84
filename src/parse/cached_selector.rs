use std::sync::OnceLock;

use scraper::Selector;

/// A CSS selector compiled once on first use. Lets selectors live in
/// `static` items next to the extraction code that uses them.
#[derive(Debug)]
pub(crate) struct CachedSelector {
    cell: OnceLock<Selector>,
    css: &'static str,
}

impl CachedSelector {
    pub(crate) const fn new(css: &'static str) -> Self {
        Self {
            cell: OnceLock::new(),
            css,
        }
    }
}

impl core::ops::Deref for CachedSelector {
    type Target = Selector;

    fn deref(&self) -> &Self::Target {
        self.cell.get_or_init(|| {
            Selector::parse(self.css)
                .unwrap_or_else(|e| panic!("invalid static selector {:?}: {e:?}", self.css))
        })
    }
}

#[macro_export]
macro_rules! selector {
    ($name: ident <- $css: literal) => {
        static $name: $crate::parse::cached_selector::CachedSelector =
            $crate::parse::cached_selector::CachedSelector::new($css);
    };
}
