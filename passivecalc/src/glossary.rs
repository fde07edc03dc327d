//! Short technical glossary

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlossaryEntry {
    pub term: &'static str,
    pub definition: &'static str,
}

const fn entry(term: &'static str, definition: &'static str) -> GlossaryEntry {
    GlossaryEntry { term, definition }
}

pub const GLOSSARY: [GlossaryEntry; 12] = [
    entry(
        "AEC-Q200",
        "Qualification standard for passive components used in automotive electronics.",
    ),
    entry(
        "BOM",
        "Bill of materials: the list of parts actually available for a design.",
    ),
    entry(
        "Decade",
        "A power-of-ten scale factor applied to a preferred-number mantissa in [1, 10).",
    ),
    entry(
        "Derating",
        "Operating a component below its rated power to improve reliability under stress, usually as a function of temperature.",
    ),
    entry(
        "E-Series",
        "Sets of preferred component values per decade defined by IEC 60063, named by the number of values (E3 to E192).",
    ),
    entry(
        "IEC 60062",
        "International standard for the marking codes of resistors and capacitors.",
    ),
    entry(
        "PPM/°C",
        "Parts per million per degree Celsius: the temperature coefficient of a component value.",
    ),
    entry(
        "Rthja",
        "Thermal resistance from junction to ambient in °C/W; temperature rise per watt dissipated.",
    ),
    entry(
        "SMD",
        "Surface Mount Device: a component soldered directly onto pads on the board surface.",
    ),
    entry(
        "Through-hole",
        "Components with leads inserted through holes in the board.",
    ),
    entry(
        "Tolerance",
        "Maximum allowed deviation of the real value from the nominal value, in percent.",
    ),
    entry(
        "Vref",
        "Internal reference voltage of a regulator, held between its output and adjust pins.",
    ),
];

/// Case-insensitive substring match over terms and definitions. An empty
/// query returns every entry.
pub fn search(query: &str) -> Vec<&'static GlossaryEntry> {
    let needle = query.trim().to_lowercase();
    GLOSSARY
        .iter()
        .filter(|e| {
            needle.is_empty()
                || e.term.to_lowercase().contains(&needle)
                || e.definition.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_term() {
        let hits = search("smd");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].term, "SMD");
    }

    #[test]
    fn test_search_definition() {
        let hits = search("temperature");
        assert!(hits.iter().any(|e| e.term == "Derating"));
        assert!(hits.iter().any(|e| e.term == "PPM/°C"));
    }

    #[test]
    fn test_empty_query_lists_all() {
        assert_eq!(search("  ").len(), GLOSSARY.len());
        assert!(search("flux capacitor").is_empty());
    }
}
