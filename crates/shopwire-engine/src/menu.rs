// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Menu and pagination builder.
//!
//! Pure functions that turn an ordered list of domain summaries into a
//! bounded interactive list payload. The transport caps a list at ten
//! selectable rows; when more items remain, the last row of a page is a
//! "next page" sentinel in place of a data row, so a page never silently
//! drops an item and never exceeds the row cap.

use shopwire_core::types::{
    BODY_MAX, MAX_LIST_ROWS, OutboundPayload, ROW_DESC_MAX, ROW_TITLE_MAX, Row, Section,
};

use crate::codec::RowPrefix;

/// Appended when a field had to be truncated.
pub const ELLIPSIS: char = '…';

/// One selectable domain item, before rendering.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Rendering profile for one menu family.
#[derive(Debug, Clone)]
pub struct MenuSpec<'a> {
    pub header: &'a str,
    pub body: &'a str,
    /// Label of the list-opening button.
    pub button: &'a str,
    /// Action family encoded into each data row id.
    pub select_prefix: RowPrefix,
    /// Action family encoded into the next-page sentinel id.
    pub page_prefix: RowPrefix,
    /// Fixed rows appended after the sentinel (e.g. "back").
    pub trailing: Vec<Row>,
}

/// A rendered page plus the clamped page number and total page count.
#[derive(Debug, Clone)]
pub struct MenuPage {
    pub payload: OutboundPayload,
    pub page: usize,
    pub total_pages: usize,
}

/// Clip a string to `max` characters, appending a single ellipsis only
/// when truncation occurs (the cut point is reduced by one to preserve
/// the limit). Strings within the limit are returned unchanged.
pub fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Clip an interactive payload body to its transport limit.
pub fn clip_body(s: &str) -> String {
    clip(s, BODY_MAX)
}

/// Compute the layout of one page: `(page, total_pages, start, end, has_more)`.
///
/// When the whole list fits in `usable` rows there is a single page and no
/// sentinel. Otherwise every page holds `usable - 1` data rows (the last
/// slot belongs to the sentinel on all pages but the final one) and the
/// requested page is clamped into `[1, total_pages]`.
fn page_layout(count: usize, usable: usize, requested: usize) -> (usize, usize, usize, usize, bool) {
    if count <= usable {
        return (1, 1, 0, count, false);
    }
    let per_page = usable - 1;
    let total = count.div_ceil(per_page);
    let page = requested.clamp(1, total);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(count);
    (page, total, start, end, page < total)
}

/// Build one page of an interactive list for `items`.
///
/// Callers are responsible for not building menus out of empty lists;
/// the platform rejects a list payload with no rows.
pub fn build_menu(items: &[MenuItem], requested_page: usize, spec: &MenuSpec<'_>) -> MenuPage {
    let extra = spec.trailing.len();
    debug_assert!(extra < MAX_LIST_ROWS);
    let usable = MAX_LIST_ROWS - extra;

    let (page, total_pages, start, end, has_more) =
        page_layout(items.len(), usable, requested_page);

    let mut rows: Vec<Row> = items[start..end]
        .iter()
        .map(|item| Row {
            id: spec.select_prefix.encode(item.id),
            title: clip(&item.title, ROW_TITLE_MAX),
            description: if item.description.is_empty() {
                None
            } else {
                Some(clip(&item.description, ROW_DESC_MAX))
            },
        })
        .collect();

    if has_more {
        rows.push(Row {
            id: spec.page_prefix.encode((page + 1) as i64),
            title: "Next page".to_string(),
            description: Some(format!("Go to page {} of {total_pages}", page + 1)),
        });
    }
    rows.extend(spec.trailing.iter().cloned());

    let body = if total_pages > 1 {
        format!("{}\n\n({page}/{total_pages})", spec.body)
    } else {
        spec.body.to_string()
    };

    let payload = OutboundPayload::List {
        header: if spec.header.is_empty() {
            None
        } else {
            Some(spec.header.to_string())
        },
        body: clip_body(&body),
        footer: None,
        button: spec.button.to_string(),
        sections: vec![Section { title: None, rows }],
    };

    MenuPage {
        payload,
        page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<MenuItem> {
        (0..n)
            .map(|i| MenuItem {
                id: i as i64 + 1,
                title: format!("Item {}", i + 1),
                description: format!("Description {}", i + 1),
            })
            .collect()
    }

    fn spec(trailing: Vec<Row>) -> MenuSpec<'static> {
        MenuSpec {
            header: "Catalog",
            body: "Pick a category",
            button: "Open",
            select_prefix: RowPrefix::CategoryRenameSelect,
            page_prefix: RowPrefix::CategoryRenamePage,
            trailing,
        }
    }

    fn rows_of(page: &MenuPage) -> Vec<Row> {
        match &page.payload {
            OutboundPayload::List { sections, .. } => sections[0].rows.clone(),
            other => panic!("expected list payload, got {other:?}"),
        }
    }

    #[test]
    fn clip_leaves_short_strings_untouched() {
        assert_eq!(clip("short", 24), "short");
        assert_eq!(clip("", 24), "");
        let exact: String = "x".repeat(24);
        assert_eq!(clip(&exact, 24), exact);
    }

    #[test]
    fn clip_truncates_to_exact_limit_with_ellipsis() {
        let long = "x".repeat(40);
        let clipped = clip(&long, 24);
        assert_eq!(clipped.chars().count(), 24);
        assert!(clipped.ends_with(ELLIPSIS));
    }

    #[test]
    fn clip_counts_characters_not_bytes() {
        let long = "é".repeat(30);
        let clipped = clip(&long, 24);
        assert_eq!(clipped.chars().count(), 24);
    }

    #[test]
    fn single_page_when_items_fit() {
        let page = build_menu(&items(10), 1, &spec(vec![]));
        assert_eq!(page.total_pages, 1);
        let rows = rows_of(&page);
        assert_eq!(rows.len(), 10);
        // No sentinel: every row decodes under the select prefix.
        for row in &rows {
            assert!(RowPrefix::CategoryRenameSelect.decode(&row.id).is_some());
        }
    }

    #[test]
    fn sentinel_replaces_a_data_row_when_more_remain() {
        let page = build_menu(&items(11), 1, &spec(vec![]));
        assert_eq!(page.total_pages, 2);
        let rows = rows_of(&page);
        assert_eq!(rows.len(), 10);
        // Nine data rows, then the sentinel pointing at page 2.
        assert_eq!(
            RowPrefix::CategoryRenamePage.decode(&rows[9].id),
            Some(2)
        );
    }

    #[test]
    fn requested_page_is_clamped() {
        let page = build_menu(&items(3), 99, &spec(vec![]));
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);

        let page = build_menu(&items(3), 0, &spec(vec![]));
        assert_eq!(page.page, 1);
    }

    #[test]
    fn page_count_echo_appears_in_body() {
        let page = build_menu(&items(25), 2, &spec(vec![]));
        assert!(page.payload.body().contains("(2/3)"));
    }

    #[test]
    fn trailing_rows_reduce_capacity_and_come_last() {
        let back = Row {
            id: "menu:back".to_string(),
            title: "Back".to_string(),
            description: None,
        };
        let page = build_menu(&items(12), 1, &spec(vec![back.clone()]));
        let rows = rows_of(&page);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows.last().unwrap().id, back.id);
        // Eight data rows + sentinel + back.
        assert_eq!(RowPrefix::CategoryRenamePage.decode(&rows[8].id), Some(2));
    }

    #[test]
    fn pagination_never_exceeds_cap_and_loses_nothing() {
        for n in 1..=40 {
            for extra in 0..=2 {
                let trailing: Vec<Row> = (0..extra)
                    .map(|i| Row {
                        id: format!("menu:fixed{i}"),
                        title: "Fixed".to_string(),
                        description: None,
                    })
                    .collect();
                let spec = spec(trailing);
                let all = items(n);

                let first = build_menu(&all, 1, &spec);
                let mut seen = Vec::new();
                for page_no in 1..=first.total_pages {
                    let page = build_menu(&all, page_no, &spec);
                    let rows = rows_of(&page);
                    assert!(rows.len() <= MAX_LIST_ROWS, "n={n} extra={extra}");
                    for row in rows {
                        if let Some(id) = RowPrefix::CategoryRenameSelect.decode(&row.id) {
                            seen.push(id);
                        }
                    }
                }
                let expected: Vec<i64> = (1..=n as i64).collect();
                assert_eq!(seen, expected, "n={n} extra={extra}");
            }
        }
    }
}
