// Verse mapping
// Author: kelexine (https://github.com/kelexine)

use super::chapter;
use crate::models::wire::VerseDto;
use crate::models::Verse;

pub fn to_domain(dto: VerseDto) -> Verse {
    Verse {
        id: dto.id,
        chapter_id: dto.chapter_id,
        chapter: dto.chapter.map(chapter::to_domain),
        verse_number: dto.verse_number,
        arabic_text: dto.arabic_text,
        transliteration: dto.transliteration,
        created_at: dto.created_at.unwrap_or_default(),
        updated_at: dto.updated_at.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_chapter_is_mapped() {
        let dto: VerseDto = serde_json::from_value(json!({
            "id": "11",
            "chapter_id": 1,
            "verse_number": 1,
            "arabic_text": "بِسْمِ ٱللَّهِ",
            "transliteration_text": "Bismillah",
            "chapter": {"id": 1, "bookId": 1, "chapterNumber": 1, "title": "Al-Fatiha", "totalVerses": 7}
        }))
        .unwrap();

        let verse = to_domain(dto);
        assert_eq!(verse.id, 11);
        assert_eq!(verse.transliteration.as_deref(), Some("Bismillah"));
        let chapter = verse.chapter.unwrap();
        assert_eq!(chapter.title, "Al-Fatiha");
        assert_eq!(chapter.total_verses, 7);
        assert_eq!(chapter.category, "");
    }
}
