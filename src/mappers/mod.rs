//! Pure conversions from the upstream wire format to domain entities.
//!
//! Mappers never fail: schema problems are caught while deserialising the
//! wire DTOs, so anything that reaches a mapper already has its required fields.

// Author: kelexine (https://github.com/kelexine)

pub mod auth;
pub mod book;
pub mod chapter;
pub mod translation;
pub mod verse;

use crate::models::wire::{ListDto, MetaDto};
use crate::models::{Page, PaginationMeta};

pub fn meta_to_domain(meta: MetaDto) -> PaginationMeta {
    PaginationMeta {
        total: meta.total.unwrap_or_default(),
        total_pages: meta.total_pages.unwrap_or_default(),
        page: meta.page.unwrap_or(1),
        limit: meta.limit.unwrap_or_default(),
        count: meta.count.unwrap_or_default(),
    }
}

/// Map every item of a list response and carry its pagination over.
pub fn page_to_domain<D, T>(list: ListDto<D>, f: impl FnMut(D) -> T) -> Page<T> {
    Page {
        data: list.data.into_iter().map(f).collect(),
        meta: meta_to_domain(list.meta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wire::BookDto;
    use serde_json::json;

    #[test]
    fn test_page_mapping_accepts_camel_total_pages() {
        let list: ListDto<BookDto> = serde_json::from_value(json!({
            "data": [{"id": 2, "title": "b"}, {"id": 1, "title": "a"}],
            "meta": {"total": 2, "totalPages": "1", "page": 1, "limit": 10, "count": 2}
        }))
        .unwrap();

        let page = page_to_domain(list, book::to_domain);
        assert_eq!(page.data.len(), 2);
        assert_eq!(
            page.meta,
            PaginationMeta { total: 2, total_pages: 1, page: 1, limit: 10, count: 2 }
        );
    }
}
