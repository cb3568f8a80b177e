//! # Report Tree
//!
//! The user-facing document model. A [`Report`] owns a tree of items —
//! templated [`Line`]s, data-bound [`Group`]s and byte-emitting extras —
//! plus the output settings: target [`Dialect`], page height and text
//! encoding.
//!
//! ```
//! use renglon::dialect::EscPos;
//! use renglon::{FieldResult, Group, ItemKind, Line, Report};
//! use serde_json::json;
//!
//! let mut report = Report::new(EscPos);
//! report.set_page_height(0); // continuous receipt paper
//!
//! report.add(Line::new(ItemKind::ReportHeader, "      CORNER SHOP"));
//! let items = report.add_group(Group::with_rows(vec![
//!     json!({"name": "Espresso", "price": "2.40"}),
//!     json!({"name": "Croissant", "price": "1.80"}),
//! ]));
//! report.add_child(
//!     items,
//!     Line::new(ItemKind::Detail, "____________________ ______").bind(|args| {
//!         let row = args.row.unwrap();
//!         match args.index {
//!             0 => FieldResult::new(row["name"].as_str().unwrap()),
//!             _ => FieldResult::new(row["price"].as_str().unwrap()),
//!         }
//!     }),
//! );
//!
//! let bytes = report.build()?;
//! # Ok::<(), renglon::RenglonError>(())
//! ```
//!
//! Item kinds place items in the flow: `ReportHeader`/`ReportFooter`
//! render once, `PageHeader`/`PageFooter` frame every page of a paged
//! report, `Header`/`Detail`/`Footer` phase inside groups, `UserDefined`
//! renders wherever it sits.

mod context;
mod group;
mod item;

pub use context::RenderContext;
pub use group::{Group, RowSource};
pub use item::{BindArgs, ItemKind, Line};

use tracing::debug;

use crate::dialect::Dialect;
use crate::encoding::TextEncoding;
use crate::error::RenglonError;
use crate::extras::ExtraItem;
use crate::page::PageBuilder;

/// Lines per page on classic fanfold paper at 6 lpi.
const DEFAULT_PAGE_HEIGHT: usize = 66;

/// Handle to an item in a report tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId(pub(crate) usize);

pub(crate) enum ItemBody {
    Line(Line),
    Group(Group),
    Extra(Box<dyn ExtraItem>),
}

pub(crate) struct Node {
    pub(crate) parent: Option<ItemId>,
    pub(crate) children: Vec<ItemId>,
    pub(crate) kind: ItemKind,
    pub(crate) body: ItemBody,
}

/// A printable document: an item tree plus output settings.
pub struct Report {
    pub(crate) items: Vec<Node>,
    pub(crate) roots: Vec<ItemId>,
    pub(crate) dialect: Box<dyn Dialect>,
    pub(crate) page_height: usize,
    pub(crate) encoding: TextEncoding,
}

impl Report {
    /// A report for the given printer family. Defaults to 66-line pages
    /// and ASCII output.
    pub fn new(dialect: impl Dialect + 'static) -> Report {
        Report {
            items: Vec::new(),
            roots: Vec::new(),
            dialect: Box::new(dialect),
            page_height: DEFAULT_PAGE_HEIGHT,
            encoding: TextEncoding::default(),
        }
    }

    /// Set the page height in text lines. `0` disables pagination
    /// entirely (continuous receipt paper): no page furniture, no form
    /// feeds, page number placeholders read `1`.
    pub fn set_page_height(&mut self, lines: usize) {
        self.page_height = lines;
    }

    /// Set the byte encoding of the output stream.
    pub fn set_encoding(&mut self, encoding: TextEncoding) {
        self.encoding = encoding;
    }

    // ------------------------------------------------------------------
    // Tree construction
    // ------------------------------------------------------------------

    /// Add a line at the root level.
    pub fn add(&mut self, line: Line) -> ItemId {
        let kind = line.kind;
        self.push_node(None, kind, ItemBody::Line(line))
    }

    /// Add a group at the root level.
    pub fn add_group(&mut self, group: Group) -> ItemId {
        self.push_node(None, ItemKind::Group, ItemBody::Group(group))
    }

    /// Add a byte-emitting item at the root level.
    pub fn add_item(&mut self, item: impl ExtraItem + 'static) -> ItemId {
        self.push_node(None, ItemKind::UserDefined, ItemBody::Extra(Box::new(item)))
    }

    /// Add a line under `parent`.
    pub fn add_child(&mut self, parent: ItemId, line: Line) -> ItemId {
        let kind = line.kind;
        self.push_node(Some(parent), kind, ItemBody::Line(line))
    }

    /// Add a group under `parent`. Nest one under a detail line to
    /// iterate a collection inside that line's row.
    pub fn add_child_group(&mut self, parent: ItemId, group: Group) -> ItemId {
        self.push_node(Some(parent), ItemKind::Group, ItemBody::Group(group))
    }

    /// Add a byte-emitting item under `parent`.
    pub fn add_child_item(&mut self, parent: ItemId, item: impl ExtraItem + 'static) -> ItemId {
        self.push_node(Some(parent), ItemKind::UserDefined, ItemBody::Extra(Box::new(item)))
    }

    fn push_node(&mut self, parent: Option<ItemId>, kind: ItemKind, body: ItemBody) -> ItemId {
        let id = ItemId(self.items.len());
        self.items.push(Node { parent, children: Vec::new(), kind, body });
        match parent {
            Some(parent) => self.items[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// First root item of the given kind (page furniture lookup).
    pub(crate) fn find_root(&self, kind: ItemKind) -> Option<ItemId> {
        self.roots.iter().copied().find(|id| self.items[id.0].kind == kind)
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Run the render pass and return the flattened elements, without
    /// paginating. Useful for inspecting what a report will print.
    pub fn render(&self) -> Result<RenderContext, RenglonError> {
        context::Walker::new(self).run()
    }

    /// Render, paginate and serialize the report to printer bytes.
    pub fn build(&self) -> Result<Vec<u8>, RenglonError> {
        let rendered = self.render()?;
        debug!(
            elements = rendered.elements().len(),
            lines = rendered.line_count(),
            page_height = self.page_height,
            "report rendered"
        );
        let mut pages = PageBuilder::new(self)?;
        pages.write(&rendered);
        Ok(pages.into_bytes())
    }
}

/// Render one item subtree in isolation (page furniture).
pub(crate) fn render_single(
    report: &Report,
    id: ItemId,
) -> Result<RenderContext, RenglonError> {
    context::Walker::render_one(report, id)
}
