//! Printable units: cards and stickers.

use serde::{Deserialize, Serialize};

/// Fixed prefix of every QR payload; the unit id is appended verbatim.
pub const QR_BASE_URL: &str = "https://fs.cards/a/";

/// Build the QR payload for a unit id.
///
/// The id is assumed to be URL-safe already.
pub fn qr_payload(id: &str) -> String {
    format!("{}{}", QR_BASE_URL, id)
}

/// The two printable variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Full card: title, category, summary, QR code
    Card,
    /// Small label: title and QR code only
    Sticker,
}

impl UnitKind {
    /// Plural word used in output file names.
    pub fn file_label(&self) -> &'static str {
        match self {
            UnitKind::Card => "cards",
            UnitKind::Sticker => "stickers",
        }
    }

    /// Page budget of one batch when a job is split.
    pub fn pages_per_batch(&self) -> usize {
        match self {
            UnitKind::Card => 10,
            UnitKind::Sticker => 20,
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitKind::Card => write!(f, "card"),
            UnitKind::Sticker => write!(f, "sticker"),
        }
    }
}

/// One full card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardUnit {
    /// Subject identifier, embedded in the QR payload
    pub id: String,
    /// Title
    pub name: String,
    /// Category label, printed uppercase when enabled
    #[serde(default)]
    pub category: String,
    /// Free-text summary
    #[serde(default)]
    pub summary: String,
}

impl CardUnit {
    /// Create a card.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            summary: summary.into(),
        }
    }
}

/// One sticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerUnit {
    /// Subject identifier, embedded in the QR payload
    pub id: String,
    /// Title
    pub name: String,
}

impl StickerUnit {
    /// Create a sticker.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<&CardUnit> for StickerUnit {
    fn from(card: &CardUnit) -> Self {
        Self::new(card.id.clone(), card.name.clone())
    }
}

/// Read access the compositor needs from any printable unit.
pub trait PrintUnit {
    /// Unit identifier
    fn id(&self) -> &str;

    /// Title text
    fn name(&self) -> &str;

    /// Category, if this variant carries one
    fn category(&self) -> Option<&str> {
        None
    }

    /// Summary, if this variant carries one
    fn summary(&self) -> Option<&str> {
        None
    }

    /// URL encoded into this unit's QR code.
    fn qr_payload(&self) -> String {
        qr_payload(self.id())
    }
}

impl PrintUnit for CardUnit {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn summary(&self) -> Option<&str> {
        Some(&self.summary)
    }
}

impl PrintUnit for StickerUnit {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
