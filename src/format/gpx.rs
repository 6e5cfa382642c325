//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::supplier::engine::Snapshot;

/// GPX formatter - outputs GPX waypoint file
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, snapshot: &Snapshot, _config: &Config) -> Result<String> {
        let batch = &snapshot.batch;
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="supplier-radar">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>supplier-radar batch {}</name>\n", batch.id));
        gpx.push_str(&format!("    <time>{}</time>\n", batch.created_at.to_rfc3339()));
        gpx.push_str("  </metadata>\n");

        // Reference waypoint
        if let Some(reference) = &snapshot.reference {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                reference.coords.lat, reference.coords.lng
            ));
            gpx.push('\n');
            gpx.push_str("    <name>Reference</name>\n");
            gpx.push_str(&format!("    <desc>{} location</desc>\n", reference.kind));
            gpx.push_str("    <sym>flag</sym>\n");
            gpx.push_str("  </wpt>\n");
        }

        // Supplier waypoints
        for placed in &batch.suppliers {
            let s = &placed.supplier;
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                placed.position.lat, placed.position.lng
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&s.name)));
            gpx.push_str(&format!(
                "    <desc>{}, rated {:.1}, {:.2} km, open {}</desc>\n",
                escape_xml(&s.category),
                s.rating,
                placed.distance_km,
                s.hours
            ));
            gpx.push_str("    <sym>shop</sym>\n");
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::sample_snapshot;

    #[test]
    fn test_gpx_format() {
        let formatter = GpxFormatter;
        let snapshot = sample_snapshot();

        let output = formatter.format(&snapshot, &Config::default()).unwrap();

        // Verify GPX structure
        assert!(output.contains(r#"<?xml version="1.0""#));
        assert!(output.contains(r#"<gpx version="1.1""#));
        assert!(output.contains("<name>Reference</name>"));
        assert!(output.contains("</gpx>"));

        // One waypoint per supplier plus the reference
        assert_eq!(output.matches("<wpt").count(), snapshot.batch.len() + 1);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Lanuza Surf & Supply"), "Lanuza Surf &amp; Supply");
        assert_eq!(escape_xml("<b>"), "&lt;b&gt;");
    }

    #[test]
    fn test_gpx_formatter_info() {
        let formatter = GpxFormatter;
        assert_eq!(formatter.name(), "gpx");
        assert!(!formatter.description().is_empty());
    }
}
