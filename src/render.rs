// src/render.rs
use crate::models::{ArticleSummary, DistributionMap};

pub fn render_summary_markdown(s: &ArticleSummary) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", s.title.trim()));

    if let Some(url) = &s.url {
        md.push_str(&format!("Source: <{}>\n\n", url));
    }
    md.push_str(&format!("Word count: {}\n\n", s.word_count));

    md.push_str("## Summary\n");
    md.push_str(&format!("{}\n\n", s.summary.trim()));

    if !s.key_points.is_empty() {
        md.push_str("## Key Points\n");
        for p in &s.key_points {
            md.push_str(&format!("- {}\n", p));
        }
        md.push('\n');
    }

    if !s.keywords.is_empty() {
        md.push_str("## Keywords\n");
        let line: Vec<String> = s.keywords.iter().map(|(k, n)| format!("{} ({})", k, n)).collect();
        md.push_str(&format!("{}\n", line.join(", ")));
    }

    md
}

/// One `label: count` line per entry, in map order.
pub fn render_distribution_text(heading: &str, d: &DistributionMap) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}:\n", heading));
    for (k, n) in d {
        out.push_str(&format!("- {}: {}\n", k, n));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FrequencyMap;

    #[test]
    fn markdown_sections() {
        let keywords: FrequencyMap = [("solar".to_string(), 5), ("grid".to_string(), 3)].into_iter().collect();
        let s = ArticleSummary {
            title: "Solar boom".into(),
            word_count: 42,
            key_points: vec!["Solar grew.".into(), "Grid lagged.".into()],
            keywords,
            summary: "Solar grew. Grid lagged.".into(),
            url: Some("https://example.com/solar".into()),
        };
        let md = render_summary_markdown(&s);
        assert!(md.starts_with("# Solar boom\n"));
        assert!(md.contains("Source: <https://example.com/solar>"));
        assert!(md.contains("Word count: 42"));
        assert!(md.contains("- Solar grew.\n- Grid lagged.\n"));
        assert!(md.contains("solar (5), grid (3)"));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let s = ArticleSummary {
            title: "T".into(),
            word_count: 0,
            key_points: vec![],
            keywords: FrequencyMap::new(),
            summary: "nothing".into(),
            url: None,
        };
        let md = render_summary_markdown(&s);
        assert!(!md.contains("## Key Points"));
        assert!(!md.contains("## Keywords"));
        assert!(!md.contains("Source:"));
    }

    #[test]
    fn distribution_lines_follow_map_order() {
        let d: DistributionMap = [("B".to_string(), 2), ("A".to_string(), 1)].into_iter().collect();
        assert_eq!(render_distribution_text("Sources", &d), "Sources:\n- B: 2\n- A: 1\n");
    }
}
