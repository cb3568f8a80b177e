//! # Render Pass
//!
//! Walks the report tree once, top to bottom, and flattens it into an
//! arena of [`OutputElement`]s in document order. Pagination happens
//! later, over the arena; this pass only decides *what* renders and in
//! which order.
//!
//! Traversal rules:
//!
//! - Root items render in insertion order. Page furniture
//!   ([`PageHeader`](ItemKind::PageHeader) /
//!   [`PageFooter`](ItemKind::PageFooter)) is excluded here — the
//!   paginator stamps it onto every page itself.
//! - A line renders, then its children render under it.
//! - A group renders in phases: headers and user-defined items in
//!   document order, then its detail children once per row, then nested
//!   groups, then footers.
//! - Rows come from the group's [`RowSource`], resolved exactly once.
//!   Each detail child gets the current row bound to it; binding
//!   callbacks of deeper lines find that row by walking up the tree.

use serde_json::Value;
use tracing::{debug, trace};

use super::group::RowSource;
use super::item::{BindArgs, ItemKind, Line};
use super::{ItemBody, ItemId, Report};
use crate::dialect::{CodePair, FontStyle};
use crate::error::RenglonError;
use crate::extras::{ExtraItem, RenderEnv};
use crate::layout::{FieldResult, compose};
use crate::output::OutputElement;

/// The flattened result of one render pass.
#[derive(Default)]
pub struct RenderContext {
    pub(crate) elements: Vec<OutputElement>,
}

impl RenderContext {
    /// Rendered elements in document order.
    pub fn elements(&self) -> &[OutputElement] {
        &self.elements
    }

    /// Physical text lines over all elements (byte blobs count zero).
    pub fn line_count(&self) -> usize {
        self.elements.iter().map(|e| e.line_count()).sum()
    }
}

pub(crate) struct Walker<'r> {
    report: &'r Report,
    /// Row bound to each item during the current detail phase, by item id.
    bound: Vec<Option<Value>>,
    out: RenderContext,
}

impl<'r> Walker<'r> {
    pub(crate) fn new(report: &'r Report) -> Walker<'r> {
        Walker {
            report,
            bound: (0..report.items.len()).map(|_| None).collect(),
            out: RenderContext::default(),
        }
    }

    /// Render every root item except page furniture.
    pub(crate) fn run(mut self) -> Result<RenderContext, RenglonError> {
        for &root in &self.report.roots {
            let kind = self.report.items[root.0].kind;
            if matches!(kind, ItemKind::PageHeader | ItemKind::PageFooter) {
                continue;
            }
            self.render_item(root, None)?;
        }
        Ok(self.out)
    }

    /// Render a single item subtree (page furniture, mostly).
    pub(crate) fn render_one(
        report: &'r Report,
        id: ItemId,
    ) -> Result<RenderContext, RenglonError> {
        let mut walker = Walker::new(report);
        walker.render_item(id, None)?;
        Ok(walker.out)
    }

    fn render_item(&mut self, id: ItemId, parent_elem: Option<usize>) -> Result<(), RenglonError> {
        let report = self.report;
        trace!(item = id.0, kind = ?report.items[id.0].kind, "render");
        match &report.items[id.0].body {
            ItemBody::Line(line) => self.render_line(id, line, parent_elem),
            ItemBody::Group(_) => self.render_group(id, parent_elem),
            ItemBody::Extra(extra) => self.render_extra(id, extra.as_ref(), parent_elem),
        }
    }

    // ------------------------------------------------------------------
    // Lines
    // ------------------------------------------------------------------

    fn render_line(
        &mut self,
        id: ItemId,
        line: &Line,
        parent_elem: Option<usize>,
    ) -> Result<(), RenglonError> {
        let results = self.resolve_fields(id, line);
        let lines = compose(
            line.template(),
            &results,
            self.report.dialect.as_ref(),
            line.repeat_static_items,
        )?;

        let mut elem = OutputElement::lines(parent_elem, lines, self.decorations(line));
        elem.break_inside = line.break_inside;
        elem.repeat_on_new_page = line.repeat_on_new_page;

        let elem_index = self.out.elements.len();
        self.out.elements.push(elem);

        let children = self.report.items[id.0].children.clone();
        for child in children {
            self.render_item(child, Some(elem_index))?;
        }
        Ok(())
    }

    /// One field result per value slot, from the binding callback or all
    /// defaults when the line has none.
    fn resolve_fields(&self, id: ItemId, line: &Line) -> Vec<FieldResult> {
        let count = line.template().value_count();
        let row = self.data_for(id);
        match &line.bind {
            Some(bind) => (0..count).map(|index| bind(&BindArgs { index, row })).collect(),
            None => vec![FieldResult::default(); count],
        }
    }

    /// The row bound to this item or its nearest bound ancestor.
    fn data_for(&self, id: ItemId) -> Option<&Value> {
        let mut current = Some(id);
        while let Some(item) = current {
            if let Some(row) = &self.bound[item.0] {
                return Some(row);
            }
            current = self.report.items[item.0].parent;
        }
        None
    }

    /// Whole-line decoration pairs in application order: font, alignment,
    /// print style, character style.
    fn decorations(&self, line: &Line) -> Vec<CodePair> {
        let dialect = self.report.dialect.as_ref();
        let mut deco = Vec::new();
        if let Some(font) = line.font_type {
            if let Some(code) = dialect.font(font) {
                deco.push(CodePair::start_only(code));
            }
        }
        if let Some(alignment) = line.alignment {
            if let Some(code) = dialect.align(alignment) {
                deco.push(CodePair::start_only(code));
            }
        }
        if !line.print_style.is_as_before() {
            if let Some(pair) = dialect.print_style(line.print_style) {
                deco.push(pair);
            }
        }
        if line.style != FontStyle::Normal {
            if let Some(pair) = dialect.font_style(line.style) {
                deco.push(pair);
            }
        }
        deco
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    fn render_group(&mut self, id: ItemId, parent_elem: Option<usize>) -> Result<(), RenglonError> {
        let children = self.report.items[id.0].children.clone();

        // headers and user-defined items, in document order
        for &child in &children {
            if matches!(
                self.report.items[child.0].kind,
                ItemKind::Header | ItemKind::UserDefined
            ) {
                self.render_item(child, parent_elem)?;
            }
        }

        // rows resolve once, before any detail renders
        let rows = match &self.report.items[id.0].body {
            ItemBody::Group(group) => match &group.rows {
                RowSource::None => None,
                RowSource::Rows(rows) => Some(rows.clone()),
                RowSource::FromParent(f) => Some(f(self.data_for(id))),
            },
            _ => None,
        };

        match rows {
            None => {
                // no source: details render once, unbound
                for &child in &children {
                    if self.report.items[child.0].kind == ItemKind::Detail {
                        self.render_item(child, parent_elem)?;
                    }
                }
            }
            Some(rows) => {
                for row in rows {
                    for &child in &children {
                        if self.report.items[child.0].kind == ItemKind::Detail {
                            self.bound[child.0] = Some(row.clone());
                            self.render_item(child, parent_elem)?;
                        }
                    }
                }
            }
        }

        for &child in &children {
            if self.report.items[child.0].kind == ItemKind::Group {
                self.render_item(child, parent_elem)?;
            }
        }
        for &child in &children {
            if self.report.items[child.0].kind == ItemKind::Footer {
                self.render_item(child, parent_elem)?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Extra items
    // ------------------------------------------------------------------

    fn render_extra(
        &mut self,
        id: ItemId,
        extra: &dyn ExtraItem,
        parent_elem: Option<usize>,
    ) -> Result<(), RenglonError> {
        let env = RenderEnv {
            dialect: self.report.dialect.as_ref(),
            encoding: &self.report.encoding,
            paged: self.report.page_height > 0,
        };
        let Some(bytes) = extra.render(&env)? else {
            debug!(item = id.0, dialect = env.dialect.name(), "item unsupported, skipped");
            return Ok(());
        };

        let mut elem = OutputElement::bytes(parent_elem, bytes);
        elem.append_newline = extra.append_newline();

        let elem_index = self.out.elements.len();
        self.out.elements.push(elem);

        let children = self.report.items[id.0].children.clone();
        for child in children {
            self.render_item(child, Some(elem_index))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::EscPos;
    use crate::report::Group;
    use serde_json::json;

    fn texts(context: &RenderContext) -> Vec<String> {
        context
            .elements()
            .iter()
            .flat_map(|e| match &e.payload {
                crate::output::Payload::Lines { lines, .. } => {
                    lines.iter().map(|l| l.plain_text()).collect::<Vec<_>>()
                }
                crate::output::Payload::Bytes(_) => vec!["<bytes>".into()],
            })
            .collect()
    }

    #[test]
    fn group_renders_header_details_footer_in_phases() {
        let mut report = Report::new(EscPos);
        let g = report.add_group(Group::with_rows(vec![json!("a"), json!("b")]));
        // added out of order on purpose: footer first
        report.add_child(g, Line::new(ItemKind::Footer, "end"));
        report.add_child(
            g,
            Line::new(ItemKind::Detail, "_")
                .bind(|args| FieldResult::new(args.row.unwrap().as_str().unwrap())),
        );
        report.add_child(g, Line::new(ItemKind::Header, "start"));

        let context = report.render().unwrap();
        assert_eq!(texts(&context), vec!["start", "a", "b", "end"]);
    }

    #[test]
    fn two_detail_lines_alternate_per_row() {
        let mut report = Report::new(EscPos);
        let g = report.add_group(Group::with_rows(vec![json!(1), json!(2)]));
        report.add_child(
            g,
            Line::new(ItemKind::Detail, "first _")
                .bind(|args| FieldResult::new(args.row.unwrap().to_string())),
        );
        report.add_child(
            g,
            Line::new(ItemKind::Detail, "second _")
                .bind(|args| FieldResult::new(args.row.unwrap().to_string())),
        );

        let context = report.render().unwrap();
        assert_eq!(texts(&context), vec!["first 1", "second 1", "first 2", "second 2"]);
    }

    #[test]
    fn detail_without_source_renders_once_unbound() {
        let mut report = Report::new(EscPos);
        let g = report.add_group(Group::new());
        report.add_child(
            g,
            Line::new(ItemKind::Detail, "row: _").bind(|args| match args.row {
                Some(_) => FieldResult::new("y"),
                None => FieldResult::new("n"),
            }),
        );

        let context = report.render().unwrap();
        assert_eq!(texts(&context), vec!["row: n"]);
    }

    #[test]
    fn empty_row_list_renders_no_details() {
        let mut report = Report::new(EscPos);
        let g = report.add_group(Group::with_rows(Vec::new()));
        report.add_child(g, Line::new(ItemKind::Header, "head"));
        report.add_child(
            g,
            Line::new(ItemKind::Detail, "_").bind(|_| FieldResult::new("x")),
        );

        let context = report.render().unwrap();
        assert_eq!(texts(&context), vec!["head"]);
    }

    #[test]
    fn unbound_line_composes_fillers() {
        let mut report = Report::new(EscPos);
        report.add(Line::new(ItemKind::Detail, "id ___"));

        let context = report.render().unwrap();
        assert_eq!(texts(&context), vec!["id %%%"]);
    }

    #[test]
    fn nested_group_iterates_collection_inside_row() {
        let rows = vec![
            json!({"name": "north", "values": [1, 2]}),
            json!({"name": "south", "values": [3]}),
        ];

        let mut report = Report::new(EscPos);
        let outer = report.add_group(Group::with_rows(rows));
        let detail = report.add_child(
            outer,
            Line::new(ItemKind::Detail, "region __________")
                .bind(|args| FieldResult::new(args.row.unwrap()["name"].as_str().unwrap())),
        );
        let inner = report.add_child_group(
            detail,
            Group::rows_from_parent(|row| {
                row.and_then(|r| r["values"].as_array().cloned()).unwrap_or_default()
            }),
        );
        report.add_child(
            inner,
            Line::new(ItemKind::Detail, "  value _")
                .bind(|args| FieldResult::new(args.row.unwrap().to_string())),
        );

        let context = report.render().unwrap();
        assert_eq!(
            texts(&context),
            vec![
                "region north     ",
                "  value 1",
                "  value 2",
                "region south     ",
                "  value 3",
            ]
        );
    }

    #[test]
    fn page_furniture_is_excluded_from_the_flow() {
        let mut report = Report::new(EscPos);
        report.add(Line::new(ItemKind::PageHeader, "top"));
        report.add(Line::new(ItemKind::Detail, "body"));
        report.add(Line::new(ItemKind::PageFooter, "bottom"));

        let context = report.render().unwrap();
        assert_eq!(texts(&context), vec!["body"]);
    }

    #[test]
    fn children_render_under_their_line() {
        let mut report = Report::new(EscPos);
        let parent = report.add(Line::new(ItemKind::Header, "outer"));
        report.add_child(parent, Line::new(ItemKind::Header, "inner"));

        let context = report.render().unwrap();
        assert_eq!(texts(&context), vec!["outer", "inner"]);
        assert_eq!(context.elements()[1].parent, Some(0));
    }
}
