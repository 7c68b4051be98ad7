/// One inventory line item, built once from a validated export row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WineRecord {
    pub country: String,
    pub region: String,
    pub producer: String,
    pub title: String,
    /// Opaque label; "NV" and blanks are valid.
    pub vintage: String,
    /// Display value as written in the sheet.
    pub purchase_price: String,
    pub main_grape: String,
    pub stock: i64,
    pub style: String,
}

impl WineRecord {
    /// Headline shown for the wine: `producer – title vintage`.
    pub fn headline(&self) -> String {
        let name = format!("{} {}", self.title, self.vintage);
        let name = name.trim();
        if name.is_empty() {
            self.producer.clone()
        } else {
            format!("{} \u{2013} {}", self.producer, name)
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_record(style: &str, country: &str, region: &str, stock: i64) -> WineRecord {
    WineRecord {
        country: country.to_string(),
        region: region.to_string(),
        producer: "Domaine Test".to_string(),
        title: "Cuvée".to_string(),
        vintage: "2019".to_string(),
        purchase_price: "250".to_string(),
        main_grape: "Merlot".to_string(),
        stock,
        style: style.to_string(),
    }
}
