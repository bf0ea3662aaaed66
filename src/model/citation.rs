use serde::{Deserialize, Serialize};

/// Kind of legal document a citation points at.
///
/// Unrecognized kinds are kept verbatim in [`DocumentType::Other`]. Spanish
/// source names (`ley`, `decreto`, ...) decode to the matching kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    Statute,
    Decree,
    Resolution,
    Doctrine,
    CaseLaw,
    Guidance,
    Treaty,
    Constitution,
    #[default]
    Missing,
    Other(String),
}

impl DocumentType {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentType::Statute => "statute",
            DocumentType::Decree => "decree",
            DocumentType::Resolution => "resolution",
            DocumentType::Doctrine => "doctrine",
            DocumentType::CaseLaw => "case_law",
            DocumentType::Guidance => "guidance",
            DocumentType::Treaty => "treaty",
            DocumentType::Constitution => "constitution",
            DocumentType::Missing => "",
            DocumentType::Other(raw) => raw,
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, DocumentType::Missing)
    }

    #[inline]
    pub fn is_statute(&self) -> bool {
        matches!(self, DocumentType::Statute)
    }
}

impl From<String> for DocumentType {
    fn from(raw: String) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return DocumentType::Missing;
        }
        match trimmed.to_lowercase().as_str() {
            "statute" | "law" | "ley" => DocumentType::Statute,
            "decree" | "decreto" => DocumentType::Decree,
            "resolution" | "resolucion" | "resolución" => DocumentType::Resolution,
            "doctrine" | "doctrina" => DocumentType::Doctrine,
            "case_law" | "jurisprudencia" => DocumentType::CaseLaw,
            "guidance" | "guia" | "guía" => DocumentType::Guidance,
            "treaty" | "tratado" => DocumentType::Treaty,
            "constitution" | "constitucion" | "constitución" => DocumentType::Constitution,
            _ => DocumentType::Other(raw),
        }
    }
}

impl From<&str> for DocumentType {
    fn from(raw: &str) -> Self {
        DocumentType::from(raw.to_string())
    }
}

impl From<DocumentType> for String {
    fn from(kind: DocumentType) -> Self {
        match kind {
            DocumentType::Other(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Jurisdiction a citation claims to belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Jurisdiction {
    Ar,
    Br,
    Mx,
    Eu,
    Mercosur,
    Latam,
    Global,
    Ocde,
    #[default]
    Missing,
    Other(String),
}

impl Jurisdiction {
    /// Every jurisdiction the scorer recognizes.
    pub const RECOGNIZED: [Jurisdiction; 8] = [
        Jurisdiction::Ar,
        Jurisdiction::Br,
        Jurisdiction::Mx,
        Jurisdiction::Eu,
        Jurisdiction::Mercosur,
        Jurisdiction::Latam,
        Jurisdiction::Global,
        Jurisdiction::Ocde,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Jurisdiction::Ar => "AR",
            Jurisdiction::Br => "BR",
            Jurisdiction::Mx => "MX",
            Jurisdiction::Eu => "EU",
            Jurisdiction::Mercosur => "MERCOSUR",
            Jurisdiction::Latam => "LATAM",
            Jurisdiction::Global => "GLOBAL",
            Jurisdiction::Ocde => "OCDE",
            Jurisdiction::Missing => "",
            Jurisdiction::Other(raw) => raw,
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Jurisdiction::Missing)
    }

    #[inline]
    pub fn is_recognized(&self) -> bool {
        Self::RECOGNIZED.contains(self)
    }
}

impl From<String> for Jurisdiction {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "" => Jurisdiction::Missing,
            "AR" => Jurisdiction::Ar,
            "BR" => Jurisdiction::Br,
            "MX" => Jurisdiction::Mx,
            "EU" => Jurisdiction::Eu,
            "MERCOSUR" => Jurisdiction::Mercosur,
            "LATAM" => Jurisdiction::Latam,
            "GLOBAL" => Jurisdiction::Global,
            "OCDE" => Jurisdiction::Ocde,
            _ => Jurisdiction::Other(raw),
        }
    }
}

impl From<&str> for Jurisdiction {
    fn from(raw: &str) -> Self {
        Jurisdiction::from(raw.to_string())
    }
}

impl From<Jurisdiction> for String {
    fn from(jurisdiction: Jurisdiction) -> Self {
        match jurisdiction {
            Jurisdiction::Other(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single legal citation attached to a response.
///
/// Required fields decode to empty values when absent so that the citation
/// validator can report them instead of the whole response being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(rename = "type", default)]
    pub kind: DocumentType,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub jurisdiction: Jurisdiction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,

    #[serde(default)]
    pub locator: String,

    #[serde(default)]
    pub confidence: f64,
}

impl Citation {
    pub fn new(
        kind: impl Into<DocumentType>,
        title: impl Into<String>,
        jurisdiction: impl Into<Jurisdiction>,
        locator: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            jurisdiction: jurisdiction.into(),
            section: None,
            year: None,
            snippet: None,
            locator: locator.into(),
            confidence: 1.0,
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Section text, treating blank sections as absent.
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Snippet text, treating blank snippets as absent.
    pub fn snippet(&self) -> Option<&str> {
        self.snippet.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Text used to represent this citation semantically (snippet, else title).
    pub fn support_text(&self) -> &str {
        self.snippet().unwrap_or(&self.title)
    }

    /// Names of required fields that are empty, in canonical order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.kind.is_missing() {
            missing.push("type");
        }
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.jurisdiction.is_missing() {
            missing.push("jurisdiction");
        }
        if self.locator.trim().is_empty() {
            missing.push("locator");
        }
        missing
    }
}
