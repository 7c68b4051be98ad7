//! Stock filtering and menu ordering.
//!
//! Pure data transform: no I/O, no rendering concerns.
use crate::model::WineRecord;

/// Styles in menu order when no override is given.
pub const DEFAULT_STYLE_ORDER: &[&str] = &[
    "Champagne",
    "Sparkling",
    "Sekt",
    "Frizzante",
    "White",
    "Rose",
    "Red",
    "Port",
    "Dessert",
];

/// Priority list of style labels used as the primary sort key.
#[derive(Debug, Clone)]
pub struct StyleOrder {
    styles: Vec<String>,
}

impl Default for StyleOrder {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE_ORDER.iter().map(|style| style.to_string()))
    }
}

impl StyleOrder {
    pub fn new<I, S>(styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            styles: styles.into_iter().map(Into::into).collect(),
        }
    }

    /// Position in the priority list; unlisted styles share the last rank.
    pub fn rank(&self, style: &str) -> usize {
        self.styles
            .iter()
            .position(|listed| listed == style)
            .unwrap_or(self.styles.len())
    }
}

/// Drop out-of-stock records and order the rest for the menu.
///
/// The key is `(style rank, style, country, region)`. The sort is stable so
/// wines sharing a full key keep their sheet order.
pub fn arrange(records: Vec<WineRecord>, order: &StyleOrder) -> Vec<WineRecord> {
    let mut kept: Vec<WineRecord> = records
        .into_iter()
        .filter(|record| record.stock > 0)
        .collect();
    kept.sort_by(|a, b| {
        (order.rank(&a.style), &a.style, &a.country, &a.region).cmp(&(
            order.rank(&b.style),
            &b.style,
            &b.country,
            &b.region,
        ))
    });
    kept
}
