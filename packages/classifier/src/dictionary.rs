//! Curated course-name dictionaries.
//!
//! Each entry is a course-name prefix. A course belongs to a dictionary when
//! its normalized name starts with the normalized form of any entry.

use std::sync::LazyLock;

use credit_audit_transcript_models::CourseCategory;

use crate::normalize::normalize;

/// Department-required courses.
pub const REQUIRED_COURSES: &[&str] = &[
    "綜合日語",
    "專題研究",
    "多元文化導論",
    "表象文化概論",
    "語言溝通概論",
    "社會文化概論",
    "日語語法",
    "中文：文學欣賞與實用",
    "大一英文",
    "大二英文",
    "AI思維與程式設計",
    "全民國防教育",
    "大一體育",
    "大二體育",
];

/// Category-I electives.
pub const CATEGORY_I_COURSES: &[&str] = &[
    "日語語音學演練",
    "日語討論與表達",
    "日語新聞聽解",
    "日劇聽解",
    "專題論證寫作",
    "學習方法論",
    "日語戲劇實踐",
    "類義表現",
    "台日社會語言分析",
    "多元文化社會與語言",
    "華日語言對比分析",
    "中日語言對比分析",
    "辭典學日語",
    "日語分科教學法",
    "日本資訊傳播導論",
    "媒體素養論",
    "歷史與敘事",
    "台日區域專題",
    "不可思議的日本",
    "台日報導製作",
    "台日報導實踐",
    "台日報導寫作",
    "日本古代中世史",
    "日本史",
    "日本近世近代史",
    "台日交流實踐-農食育中的語言實踐",
    "社會與企業",
];

/// Category-II electives.
pub const CATEGORY_II_COURSES: &[&str] = &[
    "華日翻譯",
    "翻譯-中翻日",
    "日語口譯入門",
    "日語口譯實務",
    "職場日語",
    "商務日語",
    "日本上古中古表象文化論",
    "日本古典表象文化論",
    "日本中世近世表象文化論",
    "日語專書導讀",
    "日語精讀與專書探討",
    "日本近代表象文化論",
    "日本現代表象文化論",
    "日本殖民時期台灣日語文學",
    "現代台灣日語文學",
    "文化與敘事",
    "越境文化論",
    "跨文化敘事",
    "日本國際關係",
    "行走·探索·思考-台灣裡的東亞",
];

/// A dictionary entry with its normalized lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// The entry as curated.
    pub course: &'static str,
    /// Normalized prefix compared against normalized course names.
    pub prefix: String,
}

/// The three dictionaries, normalized, in lookup priority order.
#[derive(Debug)]
pub struct CourseDictionary {
    sections: Vec<(CourseCategory, Vec<DictionaryEntry>)>,
}

impl CourseDictionary {
    fn build() -> Self {
        let section = |category: CourseCategory, courses: &[&'static str]| {
            let entries = courses
                .iter()
                .map(|&course| DictionaryEntry {
                    course,
                    prefix: normalize(course),
                })
                .filter(|entry| !entry.prefix.is_empty())
                .collect::<Vec<_>>();
            (category, entries)
        };

        Self {
            sections: vec![
                section(CourseCategory::Required, REQUIRED_COURSES),
                section(CourseCategory::CategoryI, CATEGORY_I_COURSES),
                section(CourseCategory::CategoryIi, CATEGORY_II_COURSES),
            ],
        }
    }

    /// Finds the first dictionary, in priority order, with an entry that
    /// prefixes `normalized_name`.
    #[must_use]
    pub fn lookup(&self, normalized_name: &str) -> Option<(CourseCategory, &DictionaryEntry)> {
        if normalized_name.is_empty() {
            return None;
        }

        self.sections.iter().find_map(|(category, entries)| {
            entries
                .iter()
                .find(|entry| normalized_name.starts_with(entry.prefix.as_str()))
                .map(|entry| (*category, entry))
        })
    }

    /// Normalized entries of the dictionary for `category`.
    ///
    /// Empty for [`CourseCategory::Other`], which has no dictionary.
    #[must_use]
    pub fn entries(&self, category: CourseCategory) -> &[DictionaryEntry] {
        self.sections
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or_default()
    }
}

/// Process-wide dictionary, normalized on first use.
static DICTIONARY: LazyLock<CourseDictionary> = LazyLock::new(CourseDictionary::build);

/// Returns the process-wide course dictionary.
#[must_use]
pub fn dictionary() -> &'static CourseDictionary {
    &DICTIONARY
}
