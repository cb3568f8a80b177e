//! # Pagination
//!
//! Serializes a rendered element arena into the output byte stream,
//! breaking it into pages of a fixed line height. The page model is the
//! classic fanfold layout: an optional page header at the top, body
//! lines, blank fill, an optional page footer pinned to the bottom, then
//! a form feed.
//!
//! Line accounting is 1-based: `line` is the next physical line to be
//! written. A page has room for `page_height - footer_lines - line + 1`
//! more body lines; when an element's next line does not fit, the page
//! is closed and a new one opened. Elements marked `keep_together`
//! break to a fresh page *before* writing instead of splitting — unless
//! they are longer than a page, in which case they split anyway.
//!
//! Byte-blob elements (barcodes, cuts, logos) occupy no lines; they are
//! written where they fall. Feeding paper behind the counter's back is
//! what [`EmptySpace`](crate::extras::EmptySpace) is forbidden from in
//! paged reports.
//!
//! Page number placeholders: `$P` (current page) and `$T` (total pages)
//! are written into the stream as-is and overwritten in place at the
//! end, two right-aligned digits each. With pagination off, both read 1.

use tracing::debug;

use crate::error::RenglonError;
use crate::output::{OutputElement, Payload};
use crate::report::{ItemKind, RenderContext, Report};

pub(crate) struct PageBuilder<'r> {
    report: &'r Report,
    buf: Vec<u8>,
    /// Current page number, 1-based.
    page: usize,
    /// Next physical line to write on this page, 1-based.
    line: usize,
    /// First writable body line of the current page (below furniture).
    top_line: usize,
    /// Byte offset where each page starts, for placeholder substitution.
    page_starts: Vec<usize>,
    header: RenderContext,
    footer: RenderContext,
    header_lines: usize,
    footer_lines: usize,
    /// Arena indices of elements to re-emit at the top of later pages.
    repeats: Vec<usize>,
}

impl<'r> PageBuilder<'r> {
    /// Prepare a builder, rendering the page furniture once up front.
    pub(crate) fn new(report: &'r Report) -> Result<Self, RenglonError> {
        let (header, footer) = if report.page_height > 0 {
            let header = Self::furniture(report, ItemKind::PageHeader)?;
            let footer = Self::furniture(report, ItemKind::PageFooter)?;
            (header, footer)
        } else {
            (RenderContext::default(), RenderContext::default())
        };
        let header_lines = header.line_count();
        let footer_lines = footer.line_count();
        Ok(PageBuilder {
            report,
            buf: Vec::new(),
            page: 1,
            line: 1,
            top_line: 1,
            page_starts: vec![0],
            header,
            footer,
            header_lines,
            footer_lines,
            repeats: Vec::new(),
        })
    }

    fn furniture(report: &Report, kind: ItemKind) -> Result<RenderContext, RenglonError> {
        match report.find_root(kind) {
            Some(id) => crate::report::render_single(report, id),
            None => Ok(RenderContext::default()),
        }
    }

    fn paged(&self) -> bool {
        self.report.page_height > 0
    }

    /// Serialize the whole arena: reset code, first-page header, body
    /// with page breaks, closing footer.
    pub(crate) fn write(&mut self, context: &RenderContext) {
        let report = self.report;
        self.buf.extend_from_slice(&report.dialect.reset());

        if self.paged() {
            for elem in &self.header.elements {
                elem.write_all(&mut self.buf, &report.encoding, report.dialect.as_ref());
            }
            self.line += self.header_lines;
            self.top_line = self.line;
        }

        for (index, elem) in context.elements.iter().enumerate() {
            match &elem.payload {
                Payload::Bytes(_) => {
                    elem.write_all(&mut self.buf, &report.encoding, report.dialect.as_ref());
                }
                Payload::Lines { .. } => self.write_lines(context, elem),
            }
            if elem.repeat_on_new_page {
                self.repeats.push(index);
            }
        }

        if self.paged() {
            self.add_new_page(context, false);
        }
    }

    fn write_lines(&mut self, context: &RenderContext, elem: &OutputElement) {
        let report = self.report;
        let total = elem.line_count();
        if total == 0 {
            return;
        }

        if !self.paged() {
            for index in 0..total {
                elem.write_line(index, &mut self.buf, &report.encoding, report.dialect.as_ref());
            }
            return;
        }

        // keep-together: move to a fresh page when the element cannot
        // finish on this one and the page already has body content
        let mut fresh = false;
        if !elem.break_inside
            && self.line + total + self.footer_lines > report.page_height + 1
            && self.line > self.top_line
        {
            self.add_new_page(context, true);
            fresh = true;
        }

        let mut index = 0;
        while index < total {
            let mut room = report.page_height as isize
                - self.footer_lines as isize
                - self.line as isize
                + 1;
            if room < 1 {
                if fresh {
                    // furniture fills the whole page; overflow one line
                    // instead of breaking forever
                    room = 1;
                } else {
                    self.add_new_page(context, true);
                    fresh = true;
                    continue;
                }
            }
            let take = (total - index).min(room as usize);
            for _ in 0..take {
                elem.write_line(index, &mut self.buf, &report.encoding, report.dialect.as_ref());
                index += 1;
                self.line += 1;
            }
            fresh = false;
        }
    }

    /// Close the current page: fill down to the footer, write it, form
    /// feed. When the report continues, open the next page with the
    /// header and any repeat-flagged elements.
    fn add_new_page(&mut self, context: &RenderContext, continuing: bool) {
        let report = self.report;
        debug!(page = self.page, line = self.line, continuing, "page break");

        if !self.footer.elements.is_empty() {
            let fill = report.page_height as isize
                - self.footer_lines as isize
                - self.line as isize
                + 1;
            for _ in 0..fill.max(0) {
                self.buf.extend_from_slice(&report.dialect.line_feed());
            }
            for elem in &self.footer.elements {
                elem.write_all(&mut self.buf, &report.encoding, report.dialect.as_ref());
            }
        }
        self.buf.extend_from_slice(&report.dialect.form_feed());

        if continuing {
            self.page += 1;
            self.line = 1;
            self.page_starts.push(self.buf.len());
            for elem in &self.header.elements {
                elem.write_all(&mut self.buf, &report.encoding, report.dialect.as_ref());
            }
            self.line += self.header_lines;
            for &index in &self.repeats {
                let elem = &context.elements[index];
                elem.write_all(&mut self.buf, &report.encoding, report.dialect.as_ref());
                self.line += elem.line_count();
            }
            self.top_line = self.line;
        }
    }

    /// Substitute page number placeholders and hand over the stream.
    pub(crate) fn into_bytes(mut self) -> Vec<u8> {
        let total = self.page;
        for index in 0..self.page_starts.len() {
            let start = self.page_starts[index];
            let end = self.page_starts.get(index + 1).copied().unwrap_or(self.buf.len());
            replace_placeholder(&mut self.buf[start..end], b'P', index + 1);
        }
        replace_placeholder(&mut self.buf, b'T', total);
        self.buf
    }
}

/// Overwrite every `$X` in `buf` with `number` as two right-aligned
/// digits. Numbers past 99 lose their tail; the field is two bytes wide.
fn replace_placeholder(buf: &mut [u8], suffix: u8, number: usize) {
    let formatted = format!("{number:>2}");
    let digits = formatted.as_bytes();
    let mut i = 1;
    while i < buf.len() {
        if buf[i] == suffix && buf[i - 1] == b'$' {
            buf[i - 1] = digits[0];
            buf[i] = digits[1];
            i += 2;
        } else {
            i += 1;
        }
    }
}
