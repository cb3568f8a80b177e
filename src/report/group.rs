//! # Groups
//!
//! A group binds an ordered row sequence to its child items and renders
//! them in phases: headers once, details once per row, nested groups,
//! footers once. Rows are JSON values; the binding callbacks on detail
//! lines pull fields out of the row bound to them.

use serde_json::Value;

/// Where a group's rows come from.
///
/// Resolved exactly once per render pass, before any child renders.
pub enum RowSource {
    /// No data source: detail children render once, unbound.
    None,
    /// A fixed row list. An empty list renders no detail children at all.
    Rows(Vec<Value>),
    /// Rows computed from the nearest ancestor's bound row. This is how a
    /// group nested under a detail line iterates a collection inside its
    /// owning row.
    FromParent(Box<dyn Fn(Option<&Value>) -> Vec<Value>>),
}

/// A functional block of header, detail and footer children over one row
/// sequence.
pub struct Group {
    pub(crate) rows: RowSource,
}

impl Group {
    /// A group with no data source.
    pub fn new() -> Group {
        Group { rows: RowSource::None }
    }

    /// A group over a fixed row list.
    pub fn with_rows(rows: Vec<Value>) -> Group {
        Group { rows: RowSource::Rows(rows) }
    }

    /// A group whose rows are pulled out of the row bound to the nearest
    /// ancestor at render time.
    pub fn rows_from_parent(f: impl Fn(Option<&Value>) -> Vec<Value> + 'static) -> Group {
        Group { rows: RowSource::FromParent(Box::new(f)) }
    }
}

impl Default for Group {
    fn default() -> Self {
        Group::new()
    }
}
