//! Shared domain keyword tables.
//!
//! Every keyword-driven check in the pipeline reads from this module: the
//! intent detector's category sets, the profile responder's section-fetch
//! sets, and the guardrail's on-topic and refusal tables. Keeping them in
//! one place stops the detector and the responders drifting apart.
//!
//! Matching is lowercase substring containment throughout, which lets the
//! tables mix single words ("skill") with phrases ("tell me about").
//! Entries cover English, Turkish and Kurdish.

// --- Intent categories ---

/// Topics explicitly outside the domain, plus personal tech-support
/// phrasings. Any hit short-circuits classification to out-of-scope.
/// Bare technology nouns are deliberately absent so skills questions
/// ("does he know Docker") still reach the profile path.
pub const OUT_OF_SCOPE_KEYWORDS: &[&str] = &[
    "weather", "news", "sports", "politics",
    "hava", "haber", "spor", "siyaset",
    "fix my", "debug my", "help me fix", "help me with my",
    "my server", "my docker", "my kubernetes", "my laptop", "my computer",
];

/// Document/download request terms.
pub const DOCUMENT_KEYWORDS: &[&str] = &[
    "cv", "resume", "download", "pdf", "document",
    "get cv", "send cv", "cv link", "cv file",
    "özgeçmiş", "cv indir", "cv gönder", "cv dosyası",
];

/// Repository/code showcase terms.
pub const REPOSITORY_KEYWORDS: &[&str] = &[
    "github", "repository", "repo", "project", "projects",
    "code", "coding", "programming", "implementation",
    "proje", "kod",
    "show me", "tell me about projects",
    "projeleri göster", "projeler hakkında",
];

/// Profile/skills/experience terms.
pub const PROFILE_KEYWORDS: &[&str] = &[
    "skill", "skills", "experience", "background", "education",
    "know", "expertise", "proficient", "competent",
    "beceri", "deneyim", "eğitim", "bilgi", "uzmanlık",
    "what does", "what can", "tell me about",
    "ne biliyor", "hangi", "nedir", "nasıl",
];

/// General-interest/motivation terms.
pub const GENERAL_KEYWORDS: &[&str] = &[
    "vision", "goal", "career", "interest", "passion",
    "why", "what motivates", "what drives",
    "vizyon", "hedef", "kariyer", "ilgi", "tutku",
    "neden", "ne motivasyon", "ne ilham",
];

// --- Profile section-fetch sets ---

pub const CONTACT_SECTION_KEYWORDS: &[&str] = &[
    "contact", "email", "reach", "iletişim", "e-posta", "ulaş", "peywendî",
];

pub const SKILL_SECTION_KEYWORDS: &[&str] = &[
    "skill", "yetenek", "teknoloji", "technology", "expertise",
    "uzmanlık", "know", "biliyor", "can", "dizane", "jêhatî",
];

pub const EXPERIENCE_SECTION_KEYWORDS: &[&str] = &[
    "experience", "deneyim", "work", "iş", "career", "kariyer",
    "job", "pozisyon", "company", "şirket", "worked", "kar", "ezmûn",
];

pub const PROJECT_SECTION_KEYWORDS: &[&str] = &[
    "project", "proje", "portfolio", "built", "created",
    "developed", "çalışma",
];

pub const SUMMARY_SECTION_KEYWORDS: &[&str] = &[
    "summary", "özet", "background", "geçmiş", "about",
    "hakkında", "who", "kim", "tell me", "yourself", "çi", "kî",
];

// --- Repository selection ---

/// Terms signalling the user explicitly wants forks included.
pub const FORK_REQUEST_KEYWORDS: &[&str] = &["fork", "forks", "forked", "çatal"];

// --- Guardrail tables ---

/// On-topic vocabulary for profile answers.
pub const ON_TOPIC_PROFILE_KEYWORDS: &[&str] = &[
    "skill", "experience", "technology", "project", "background",
    "yetenek", "deneyim", "teknoloji", "proje", "geçmiş",
    "jêhatî", "zanîn", "pispor", "kar",
    "python", "javascript", "fastapi", "react",
];

/// On-topic vocabulary for repository answers.
pub const ON_TOPIC_REPOSITORY_KEYWORDS: &[&str] = &[
    "repository", "repo", "github", "project", "code",
    "depo", "proje", "kod",
];

/// On-topic vocabulary for document answers.
pub const ON_TOPIC_DOCUMENT_KEYWORDS: &[&str] = &[
    "cv", "resume", "download", "generate", "özgeçmiş", "indir",
];

/// Refusal-like phrases. Two or more distinct hits mark a response as
/// over-restrictive and trigger validator review.
pub const REFUSAL_PATTERNS: &[&str] = &[
    "i cannot", "i can't", "i'm not able", "i'm unable",
    "out of scope", "not allowed", "cannot help",
    "redirect", "contact", "speak with",
    "yapamazım", "yapamam", "iznim yok",
    "kapsam dışı", "yetkim yok",
    "nikare", "nasiheyê",
];

// --- Matching helpers ---

/// True if any table entry occurs in `text` (case-insensitive substring).
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let text_lower = text.to_lowercase();
    keywords.iter().any(|keyword| text_lower.contains(keyword))
}

/// Number of distinct table entries occurring in `text`.
pub fn match_count(text: &str, keywords: &[&str]) -> usize {
    let text_lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| text_lower.contains(*keyword))
        .count()
}
