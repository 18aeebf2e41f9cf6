// Chapter mapping
// Author: kelexine (https://github.com/kelexine)

use crate::models::wire::ChapterDto;
use crate::models::Chapter;

pub fn to_domain(dto: ChapterDto) -> Chapter {
    Chapter {
        id: dto.id,
        book_id: dto.book_id,
        chapter_number: dto.chapter_number,
        title: dto.title,
        category: dto.category.unwrap_or_default(),
        description: dto.description.unwrap_or_default(),
        total_verses: dto.total_verses.unwrap_or_default(),
        created_at: dto.created_at.unwrap_or_default(),
        updated_at: dto.updated_at.unwrap_or_default(),
    }
}
