// Book mapping
// Author: kelexine (https://github.com/kelexine)

use crate::models::wire::BookDto;
use crate::models::Book;

pub fn to_domain(dto: BookDto) -> Book {
    Book {
        id: dto.id,
        title: dto.title,
        author: dto.author,
        description: dto.description,
        // Years outside i32 are not real publication years
        published_year: dto.published_year.and_then(|y| i32::try_from(y).ok()),
        cover_image_url: dto.cover_image_url,
        created_at: dto.created_at.unwrap_or_default(),
        updated_at: dto.updated_at.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_domain() {
        let dto: BookDto = serde_json::from_value(json!({
            "id": 5,
            "title": "Riyad as-Salihin",
            "author": null,
            "published_year": "1270",
            "cover_image_url": "https://cdn.example.com/5.png",
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-02T10:00:00Z"
        }))
        .unwrap();

        let book = to_domain(dto);
        assert_eq!(book.published_year, Some(1270));
        assert_eq!(book.author, None);
        assert_eq!(book.cover_image_url.as_deref(), Some("https://cdn.example.com/5.png"));
        assert_eq!(book.updated_at, "2024-03-02T10:00:00Z");
    }
}
