//! # Report Items
//!
//! A report is a tree of typed items. The type decides *when* an item
//! renders (group phases, page furniture); the item body decides *what*
//! it renders. [`Line`] is the workhorse: one template plus an optional
//! data-binding callback, rendered once per bound row.

use serde_json::Value;

use crate::dialect::{Alignment, FontStyle, FontType, PrintStyle};
use crate::layout::{FieldResult, Template};

/// Where an item participates in traversal and pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Once at the very start of the report.
    ReportHeader,
    /// Top of every page; excluded from normal document flow.
    PageHeader,
    /// Once before a group's data rows.
    Header,
    /// Once per data row.
    Detail,
    /// Once after a group's data rows.
    Footer,
    /// Bottom of every page; excluded from normal document flow.
    PageFooter,
    /// Once at the very end of the report.
    ReportFooter,
    /// A nested group.
    Group,
    /// Barcodes, cuts, logos, raw codes; renders once in document order.
    UserDefined,
}

/// Arguments passed to a line's data-binding callback, once per value slot
/// per rendered row.
pub struct BindArgs<'a> {
    /// Value-slot index within the line, leftmost is 0.
    pub index: usize,
    /// The row bound to this line or its nearest bound ancestor.
    pub row: Option<&'a Value>,
}

pub(crate) type BindFn = Box<dyn Fn(&BindArgs<'_>) -> FieldResult>;

/// A templated text line.
///
/// ```
/// use renglon::{BindArgs, FieldResult, ItemKind, Line};
///
/// let line = Line::new(ItemKind::Detail, "__________ x__ ______")
///     .bind(|args: &BindArgs| match args.index {
///         0 => FieldResult::new("Coffee"),
///         1 => FieldResult::new("2"),
///         _ => FieldResult::new("9.00"),
///     });
/// ```
pub struct Line {
    pub(crate) kind: ItemKind,
    pub(crate) template: Template,
    pub(crate) repeat_static_items: bool,
    pub(crate) repeat_on_new_page: bool,
    pub(crate) break_inside: bool,
    pub(crate) style: FontStyle,
    pub(crate) print_style: PrintStyle,
    pub(crate) alignment: Option<Alignment>,
    pub(crate) font_type: Option<FontType>,
    pub(crate) bind: Option<BindFn>,
}

impl Line {
    pub fn new(kind: ItemKind, template: &str) -> Line {
        Line {
            kind,
            template: Template::parse(template),
            repeat_static_items: false,
            repeat_on_new_page: false,
            break_inside: true,
            style: FontStyle::Normal,
            print_style: PrintStyle::default(),
            alignment: None,
            font_type: None,
            bind: None,
        }
    }

    /// Install the per-slot data callback.
    pub fn bind(mut self, f: impl Fn(&BindArgs<'_>) -> FieldResult + 'static) -> Line {
        self.bind = Some(Box::new(f));
        self
    }

    /// Repeat literal template text on continuation lines instead of
    /// padding them with spaces.
    pub fn repeat_static_items(mut self) -> Line {
        self.repeat_static_items = true;
        self
    }

    /// Re-emit this line at the top of every page that follows it
    /// (column captions over multi-page detail runs).
    pub fn repeat_on_new_page(mut self) -> Line {
        self.repeat_on_new_page = true;
        self
    }

    /// Never split this line's physical lines across a page boundary;
    /// break to a fresh page first instead.
    pub fn keep_together(mut self) -> Line {
        self.break_inside = false;
        self
    }

    /// Font style applied to every physical line.
    pub fn styled(mut self, style: FontStyle) -> Line {
        self.style = style;
        self
    }

    /// Pitch and magnification applied to every physical line.
    pub fn print_style(mut self, style: PrintStyle) -> Line {
        self.print_style = style;
        self
    }

    /// Printer-side alignment code for the whole line. Unset lines keep
    /// whatever alignment the previous output established.
    pub fn aligned(mut self, alignment: Alignment) -> Line {
        self.alignment = Some(alignment);
        self
    }

    /// Character font selection for the whole line.
    pub fn font(mut self, font: FontType) -> Line {
        self.font_type = Some(font);
        self
    }

    pub(crate) fn template(&self) -> &Template {
        &self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_document_flow() {
        let line = Line::new(ItemKind::Detail, "___");
        assert!(line.break_inside);
        assert!(!line.repeat_static_items);
        assert!(!line.repeat_on_new_page);
        assert_eq!(line.alignment, None);
        assert_eq!(line.font_type, None);
        assert_eq!(line.style, FontStyle::Normal);
        assert!(line.print_style.is_as_before());
    }

    #[test]
    fn builders_chain() {
        let line = Line::new(ItemKind::Header, "___")
            .styled(FontStyle::Emphasized)
            .aligned(Alignment::Center)
            .keep_together()
            .repeat_on_new_page();
        assert_eq!(line.style, FontStyle::Emphasized);
        assert_eq!(line.alignment, Some(Alignment::Center));
        assert!(!line.break_inside);
        assert!(line.repeat_on_new_page);
    }
}
