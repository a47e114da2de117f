use csv::ReaderBuilder;
use log::warn;
use serde::Deserialize;

use std::fs::File;

use crate::{err::CatalogError, filter::Searchable};

/// Schema for row in the catalog file
#[derive(Deserialize, Debug)]
struct CatalogRow {
    name: String,
    grade: Option<String>,
    description: String,
    crops: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CardData {
    pub name: String,
    pub grade: Option<String>,
    pub description: String,
    pub crops: Vec<String>,
    text: String,
}

impl CardData {
    pub fn new(
        name: String,
        grade: Option<String>,
        description: String,
        crops: Vec<String>,
    ) -> Self {
        // The searchable text is everything the card displays, so a term can
        // match any part of it
        let mut text = name.clone();
        if let Some(grade) = &grade {
            text.push(' ');
            text.push_str(grade);
        }
        text.push(' ');
        text.push_str(&description);
        for crop in &crops {
            text.push(' ');
            text.push_str(crop);
        }
        CardData {
            name,
            grade,
            description,
            crops,
            text,
        }
    }

    pub fn grade_str(&self) -> String {
        self.grade.clone().unwrap_or("".to_string())
    }

    fn build_from_row(row: CatalogRow) -> Self {
        let crops = row
            .crops
            .unwrap_or_default()
            .split(',')
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        Self::new(
            row.name,
            row.grade.filter(|v| !v.trim().is_empty()),
            row.description,
            crops,
        )
    }
}

impl Searchable for CardData {
    fn search_text(&self) -> &str {
        &self.text
    }
}

impl Searchable for &CardData {
    fn search_text(&self) -> &str {
        &self.text
    }
}

pub struct Catalog {
    pub cards: Vec<CardData>,
}

impl Catalog {
    /// Loads the card set once; membership and order are fixed afterwards.
    pub fn init(path: &str) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|_| CatalogError::Missing(path.to_string()))?;
        let mut reader = ReaderBuilder::new().delimiter(b'\t').from_reader(file);
        let headers = reader
            .headers()
            .map_err(|e| CatalogError::Malformed(e.to_string()))?
            .to_owned();
        if !headers.iter().any(|h| h == "name") {
            return Err(CatalogError::MissingColumn("name"));
        }

        let mut cards = Vec::new();
        for record in reader.deserialize::<CatalogRow>() {
            match record {
                Ok(row) => cards.push(CardData::build_from_row(row)),
                Err(e) => warn!("Skipping broken catalog row: {}", e),
            }
        }
        Ok(Catalog { cards })
    }

    pub fn find(&self, name: &str) -> Option<&CardData> {
        self.cards.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn write_catalog(content: &str) -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().expect("Could not create temp dir");
        let path = dir.path().join("catalog.csv");
        let mut file = File::create(&path).expect("Could not create catalog file");
        write!(file, "{}", content).expect("Could not write catalog file");
        (dir, path.to_str().unwrap().to_string())
    }

    #[test]
    fn test_init_loads_cards_in_file_order() -> Result<(), CatalogError> {
        let (_dir, path) = write_catalog(
            "name\tgrade\tdescription\tcrops\n\
             Urea Fertilizer\t46-0-0\tHigh nitrogen feed\tpaddy, wheat\n\
             DAP Mix\t18-46-0\tStarter dose\tmaize\n\
             Vermicompost\t\tOrganic soil conditioner\t\n",
        );
        let catalog = Catalog::init(&path)?;
        assert_eq!(catalog.cards.len(), 3);
        assert_eq!(catalog.cards[0].name, "Urea Fertilizer");
        assert_eq!(catalog.cards[0].grade_str(), "46-0-0");
        assert_eq!(catalog.cards[0].crops, vec!["paddy", "wheat"]);
        assert_eq!(catalog.cards[2].name, "Vermicompost");
        assert_eq!(catalog.cards[2].grade, None);
        assert!(catalog.cards[2].crops.is_empty());
        Ok(())
    }

    #[test]
    fn test_init_skips_broken_rows() -> Result<(), CatalogError> {
        let (_dir, path) = write_catalog(
            "name\tgrade\tdescription\tcrops\n\
             Urea Fertilizer\t46-0-0\tHigh nitrogen feed\tpaddy\n\
             short row\n\
             Potash Blend\t0-0-60\tPotassium boost\tpotato\n",
        );
        let catalog = Catalog::init(&path)?;
        assert_eq!(catalog.cards.len(), 2);
        assert_eq!(catalog.cards[1].name, "Potash Blend");
        Ok(())
    }

    #[test]
    fn test_init_requires_name_column() {
        let (_dir, path) = write_catalog(
            "title\tgrade\tdescription\tcrops\n\
             Urea Fertilizer\t46-0-0\tHigh nitrogen feed\tpaddy\n",
        );
        assert!(matches!(
            Catalog::init(&path),
            Err(CatalogError::MissingColumn("name")),
        ));
    }

    #[test]
    fn test_init_missing_file() {
        assert!(matches!(
            Catalog::init("data/no_such_catalog.csv"),
            Err(CatalogError::Missing(_)),
        ));
    }

    #[test]
    fn test_search_text_covers_all_fields() {
        let card = CardData::new(
            "DAP Mix".to_string(),
            Some("18-46-0".to_string()),
            "Starter dose".to_string(),
            vec!["maize".to_string()],
        );
        let text = card.search_text();
        assert!(text.contains("DAP Mix"));
        assert!(text.contains("18-46-0"));
        assert!(text.contains("Starter dose"));
        assert!(text.contains("maize"));
    }

    #[test]
    fn test_find() -> Result<(), CatalogError> {
        let (_dir, path) = write_catalog(
            "name\tgrade\tdescription\tcrops\n\
             Urea Fertilizer\t46-0-0\tHigh nitrogen feed\tpaddy\n\
             DAP Mix\t18-46-0\tStarter dose\tmaize\n",
        );
        let catalog = Catalog::init(&path)?;
        assert_eq!(catalog.find("DAP Mix").unwrap().grade_str(), "18-46-0");
        assert!(catalog.find("dap mix").is_none());
        Ok(())
    }
}
