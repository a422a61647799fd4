use crate::Category;

/// A built-in education stream with its display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    pub category: Category,
    pub label_en: &'static str,
    pub label_hi: &'static str,
}

impl StreamInfo {
    /// Label for `lang`, falling back to English.
    pub fn label(&self, lang: &str) -> &'static str {
        match lang {
            "hi" => self.label_hi,
            _ => self.label_en,
        }
    }

    pub fn lookup(category: Category) -> Option<&'static StreamInfo> {
        STREAM_CATALOG.iter().find(|s| s.category == category)
    }
}

pub const STREAM_CATALOG: [StreamInfo; 5] = [
    StreamInfo {
        category: Category(1),
        label_en: "Science",
        label_hi: "विज्ञान",
    },
    StreamInfo {
        category: Category(2),
        label_en: "Commerce",
        label_hi: "कॉमर्स",
    },
    StreamInfo {
        category: Category(3),
        label_en: "Arts/Humanities",
        label_hi: "कला/मानविकी",
    },
    StreamInfo {
        category: Category(4),
        label_en: "Diploma/Vocational",
        label_hi: "डिप्लोमा/व्यावसायिक",
    },
    StreamInfo {
        category: Category(5),
        label_en: "New-Age Careers",
        label_hi: "नई-उम्र करियर",
    },
];
