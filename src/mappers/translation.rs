// Translation mapping
// Author: kelexine (https://github.com/kelexine)

use crate::models::wire::TranslationDto;
use crate::models::{Translation, VerseSummary};

pub fn to_domain(dto: TranslationDto) -> Translation {
    Translation {
        id: dto.id,
        verse_id: dto.verse_id,
        verse: dto.verse.map(|verse| VerseSummary {
            id: verse.id,
            arabic_text: verse.arabic_text.unwrap_or_default(),
        }),
        language_code: dto.language_code,
        translation: dto.translation_text,
        translator: dto.translator_name.unwrap_or_default(),
        created_at: dto.created_at.unwrap_or_default(),
        updated_at: dto.updated_at.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_domain_renames_fields() {
        let dto: TranslationDto = serde_json::from_value(json!({
            "id": 3,
            "verse_id": "11",
            "language_code": "en",
            "translation_text": "In the name of God",
            "translator_name": "Sahih International",
            "verse": {"id": 11, "arabic_text": "بِسْمِ ٱللَّهِ"}
        }))
        .unwrap();

        let translation = to_domain(dto);
        assert_eq!(translation.verse_id, 11);
        assert_eq!(translation.translation, "In the name of God");
        assert_eq!(translation.translator, "Sahih International");
        assert_eq!(translation.verse.map(|v| v.id), Some(11));
    }
}
