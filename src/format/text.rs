//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::supplier::engine::Snapshot;

/// Text formatter - outputs a table of suppliers, nearest first
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, snapshot: &Snapshot, _config: &Config) -> Result<String> {
        let batch = &snapshot.batch;
        let mut output = String::new();

        // Header
        output.push_str(&format!("supplier-radar batch ({})\n", batch.id));
        if let Some(base) = batch.base {
            output.push_str(&format!("Base: {}\n", base));
        }
        match &snapshot.reference {
            Some(reference) => output.push_str(&format!(
                "Reference: {} {}\n",
                reference.kind, reference.coords
            )),
            None => output.push_str("Reference: none\n"),
        }

        if !snapshot.visible {
            output.push_str("\nSuppliers hidden\n");
            return Ok(output);
        }
        if batch.is_empty() {
            output.push_str("\nNo suppliers nearby\n");
            return Ok(output);
        }

        let name_width = batch
            .suppliers
            .iter()
            .map(|p| p.supplier.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Name".len());
        let category_width = batch
            .suppliers
            .iter()
            .map(|p| p.supplier.category.chars().count())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        output.push_str(&format!("\nSuppliers ({}):\n", batch.len()));
        output.push_str(&format!(
            "  {:<name_width$}  {:<category_width$}  Rating  Distance\n",
            "Name", "Category"
        ));
        for placed in batch.nearest_first() {
            let s = &placed.supplier;
            output.push_str(&format!(
                "  {:<name_width$}  {:<category_width$}  {:>6.1}  {:>6.2} km\n",
                s.name, s.category, s.rating, placed.distance_km
            ));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::sample_snapshot;

    #[test]
    fn test_text_format() {
        let formatter = TextFormatter;
        let snapshot = sample_snapshot();

        let output = formatter.format(&snapshot, &Config::default()).unwrap();

        assert!(output.contains("supplier-radar batch"));
        assert!(output.contains("Base:"));
        assert!(output.contains("Reference: base"));
        assert!(output.contains("Suppliers ("));
        assert!(output.contains(" km\n"));
        for placed in &snapshot.batch.suppliers {
            assert!(output.contains(&placed.supplier.name));
        }
    }

    #[test]
    fn test_text_rows_are_nearest_first() {
        let snapshot = sample_snapshot();
        let output = TextFormatter.format(&snapshot, &Config::default()).unwrap();

        let nearest = snapshot.batch.nearest_first();
        let first = output.find(&nearest[0].supplier.name).unwrap();
        let last = output.find(&nearest[nearest.len() - 1].supplier.name).unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_text_format_hidden() {
        let mut snapshot = sample_snapshot();
        snapshot.visible = false;

        let output = TextFormatter.format(&snapshot, &Config::default()).unwrap();
        assert!(output.contains("Suppliers hidden"));
    }

    #[test]
    fn test_text_formatter_info() {
        let formatter = TextFormatter;
        assert_eq!(formatter.name(), "text");
        assert!(!formatter.description().is_empty());
    }
}
