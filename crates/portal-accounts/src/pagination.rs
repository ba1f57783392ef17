//! GOV.UK-style pagination view models.
//!
//! [`compute`] is a pure function from pagination facts to the view model a
//! template renders: a results summary, optional previous/next links and a
//! page-link list where runs of pages collapse into ellipsis markers. First
//! and last page are always shown once page links appear at all; a window
//! around the current page fills the middle.
//!
//! Callers clamp the current page into `1..=total_pages` before calling;
//! no bounds validation happens here.

use serde::Serialize;

/// Most pages shown without any ellipsis collapsing.
const MAX_VISIBLE: i64 = 5;

/// Highest current page still rendered with the "start" pattern
/// (`1..current+1`, ellipsis, last).
const START_THRESHOLD: i64 = 4;

/// Distance from the last page at which the "end" pattern takes over
/// (first, ellipsis, `current-1..last`).
const END_OFFSET: i64 = 3;

/// The view model a listing template renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationViewModel {
    /// "Showing X to Y of Z" facts; `None` only when there are no results.
    pub summary: Option<PageSummary>,

    /// Page links and ellipsis markers; absent when there is a single page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<PaginationItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavLink>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NavLink>,
}

/// Which items of the overall result set this page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub start_item: i64,
    pub end_item: i64,
    pub total_items: i64,
}

/// A previous/next navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub href: String,
}

/// One entry in the page-link list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PaginationItem {
    Page {
        number: String,
        href: String,
        current: bool,
    },
    Ellipsis {
        ellipsis: bool,
    },
}

impl PaginationItem {
    pub fn ellipsis() -> Self {
        Self::Ellipsis { ellipsis: true }
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, Self::Ellipsis { .. })
    }

    /// The page number, for page items.
    pub fn number(&self) -> Option<&str> {
        match self {
            Self::Page { number, .. } => Some(number),
            Self::Ellipsis { .. } => None,
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, Self::Page { current: true, .. })
    }
}

/// Computes the pagination view model for one listing page.
///
/// With a single page only the summary is populated (and only when there
/// are results at all). Filter pairs are carried into every generated href;
/// blank values are omitted and the rest are percent-encoded.
pub fn compute(
    current_page: i64,
    total_pages: i64,
    total_items: i64,
    page_size: i64,
    base_url: &str,
    filters: &[(&str, &str)],
) -> PaginationViewModel {
    if total_pages <= 1 {
        return PaginationViewModel {
            summary: (total_items > 0).then(|| summary(1, page_size, total_items)),
            items: None,
            previous: None,
            next: None,
        };
    }

    let previous = (current_page > 1).then(|| NavLink {
        href: page_href(base_url, current_page - 1, filters),
    });
    let next = (current_page < total_pages).then(|| NavLink {
        href: page_href(base_url, current_page + 1, filters),
    });

    PaginationViewModel {
        summary: Some(summary(current_page, page_size, total_items)),
        items: Some(build_items(current_page, total_pages, base_url, filters)),
        previous,
        next,
    }
}

fn summary(current_page: i64, page_size: i64, total_items: i64) -> PageSummary {
    PageSummary {
        start_item: (current_page - 1) * page_size + 1,
        end_item: (current_page * page_size).min(total_items),
        total_items,
    }
}

fn build_items(
    current_page: i64,
    total_pages: i64,
    base_url: &str,
    filters: &[(&str, &str)],
) -> Vec<PaginationItem> {
    let page = |number: i64| PaginationItem::Page {
        number: number.to_string(),
        href: page_href(base_url, number, filters),
        current: number == current_page,
    };

    let mut items = Vec::new();
    if total_pages <= MAX_VISIBLE {
        items.extend((1..=total_pages).map(page));
    } else if current_page <= START_THRESHOLD {
        items.extend((1..=current_page + 1).map(page));
        items.push(PaginationItem::ellipsis());
        items.push(page(total_pages));
    } else if current_page >= total_pages - END_OFFSET {
        items.push(page(1));
        items.push(PaginationItem::ellipsis());
        items.extend((current_page - 1..=total_pages).map(page));
    } else {
        items.push(page(1));
        items.push(PaginationItem::ellipsis());
        items.extend((current_page - 1..=current_page + 1).map(page));
        items.push(PaginationItem::ellipsis());
        items.push(page(total_pages));
    }
    items
}

fn page_href(base_url: &str, page: i64, filters: &[(&str, &str)]) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("page", &page.to_string());
    for (name, value) in filters {
        if !value.is_empty() {
            query.append_pair(name, value);
        }
    }
    format!("{}?{}", base_url, query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    const BASE: &str = "/admin/accounts";

    /// Shorthand: page numbers with ellipses rendered as "…".
    fn shape(model: &PaginationViewModel) -> Vec<String> {
        model
            .items
            .as_ref()
            .expect("items expected")
            .iter()
            .map(|item| item.number().unwrap_or("…").to_string())
            .collect()
    }

    fn compute_plain(current_page: i64) -> PaginationViewModel {
        compute(current_page, 100, 2000, 20, BASE, &[])
    }

    #[test]
    fn hundred_page_listing_page_1() {
        let model = compute_plain(1);
        assert_eq!(shape(&model), ["1", "2", "…", "100"]);
        assert!(model.previous.is_none());
        assert_eq!(model.next.unwrap().href, "/admin/accounts?page=2");
    }

    #[test]
    fn hundred_page_listing_page_5() {
        let model = compute_plain(5);
        assert_eq!(shape(&model), ["1", "…", "4", "5", "6", "…", "100"]);
    }

    #[test]
    fn hundred_page_listing_page_50() {
        let model = compute_plain(50);
        assert_eq!(shape(&model), ["1", "…", "49", "50", "51", "…", "100"]);
    }

    #[test]
    fn hundred_page_listing_page_98() {
        let model = compute_plain(98);
        assert_eq!(shape(&model), ["1", "…", "97", "98", "99", "100"]);
    }

    #[test]
    fn hundred_page_listing_page_100() {
        let model = compute_plain(100);
        assert_eq!(shape(&model), ["1", "…", "99", "100"]);
        assert!(model.next.is_none());
        assert_eq!(model.previous.unwrap().href, "/admin/accounts?page=99");
    }

    #[test]
    fn start_threshold_boundary_uses_start_pattern() {
        let model = compute_plain(4);
        assert_eq!(shape(&model), ["1", "2", "3", "4", "5", "…", "100"]);
    }

    #[test]
    fn every_page_listed_when_few_pages() {
        let model = compute(2, 5, 95, 20, BASE, &[]);
        assert_eq!(shape(&model), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn exactly_one_current_item_matching_the_requested_page() {
        for current in [1, 4, 5, 50, 97, 98, 100] {
            let model = compute_plain(current);
            let items = model.items.unwrap();
            let current_items: Vec<_> = items.iter().filter(|i| i.is_current()).collect();
            assert_eq!(current_items.len(), 1, "page {current}");
            assert_eq!(current_items[0].number(), Some(current.to_string().as_str()));
        }
    }

    #[test]
    fn first_and_last_page_always_present() {
        for current in 1..=100 {
            let model = compute_plain(current);
            let items = model.items.unwrap();
            assert!(items.iter().any(|i| i.number() == Some("1")), "page {current}");
            assert!(items.iter().any(|i| i.number() == Some("100")), "page {current}");
        }
    }

    #[test]
    fn single_page_returns_summary_only() {
        let model = compute(1, 1, 15, 20, BASE, &[]);
        assert_eq!(
            model.summary,
            Some(PageSummary {
                start_item: 1,
                end_item: 15,
                total_items: 15,
            })
        );
        assert!(model.items.is_none());
        assert!(model.previous.is_none());
        assert!(model.next.is_none());
    }

    #[test]
    fn no_results_means_no_summary() {
        let model = compute(1, 0, 0, 20, BASE, &[]);
        assert!(model.summary.is_none());
        assert!(model.items.is_none());
    }

    #[test]
    fn summary_covers_the_requested_page() {
        let model = compute(3, 5, 93, 20, BASE, &[]);
        assert_eq!(
            model.summary,
            Some(PageSummary {
                start_item: 41,
                end_item: 60,
                total_items: 93,
            })
        );
    }

    #[test]
    fn last_page_summary_is_truncated_to_the_total() {
        let model = compute(5, 5, 93, 20, BASE, &[]);
        assert_eq!(model.summary.unwrap().end_item, 93);
    }

    #[test]
    fn filters_propagate_into_every_href() {
        let filters = [("search", "john"), ("areaId", "5")];
        let model = compute(5, 100, 2000, 20, BASE, &filters);

        let mut hrefs: Vec<&str> = model
            .items
            .as_ref()
            .unwrap()
            .iter()
            .filter_map(|item| match item {
                PaginationItem::Page { href, .. } => Some(href.as_str()),
                PaginationItem::Ellipsis { .. } => None,
            })
            .collect();
        hrefs.push(&model.previous.as_ref().unwrap().href);
        hrefs.push(&model.next.as_ref().unwrap().href);

        for href in hrefs {
            assert!(href.contains("search=john"), "{href}");
            assert!(href.contains("areaId=5"), "{href}");
        }
    }

    #[test]
    fn blank_filter_values_are_omitted_and_others_encoded() {
        let filters = [("search", "jo hn"), ("areaId", "")];
        let model = compute(2, 3, 50, 20, BASE, &filters);
        let href = &model.previous.unwrap().href;
        assert_eq!(href, "/admin/accounts?page=1&search=jo+hn");
    }

    #[test]
    fn serialized_shape_matches_the_template_contract() {
        let model = compute(1, 2, 25, 20, BASE, &[]);
        assert_json_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({
                "summary": {"startItem": 1, "endItem": 20, "totalItems": 25},
                "items": [
                    {"number": "1", "href": "/admin/accounts?page=1", "current": true},
                    {"number": "2", "href": "/admin/accounts?page=2", "current": false},
                ],
                "next": {"href": "/admin/accounts?page=2"},
            })
        );
    }
}
