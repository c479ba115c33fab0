/// One `font-family` override rule.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FontRule {
    /// Comma-separated selector list, e.g. `.svg-plot-value,.svg-plot-label`.
    pub selectors: String,
    /// CSS `font-family` value.
    pub family: String,
}

/// One-time stylesheet mutation: an external import up front, font overrides at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StylePatch {
    /// Stylesheet to `@import` before the existing rules.
    pub import_href: Option<String>,
    /// Rules appended after the existing rules.
    pub font_rules: Vec<FontRule>,
}

impl StylePatch {
    /// The article look: shared article stylesheet plus the dense label font for plot text.
    pub fn article() -> Self {
        Self {
            import_href: Some("/style/article/dist.css".to_string()),
            font_rules: vec![FontRule {
                selectors: ".svg-plot-value,.svg-plot-label".to_string(),
                family: "\"Geraint Dense\",Arial,sans-serif".to_string(),
            }],
        }
    }

    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.import_href.is_none() && self.font_rules.is_empty()
    }

    /// Patch plain CSS text.
    pub fn apply(&self, css: &str) -> String {
        let mut out = String::with_capacity(css.len() + 128);
        if let Some(href) = &self.import_href {
            out.push_str("@import \"");
            out.push_str(href);
            out.push_str("\";");
        }
        out.push_str(css);
        for rule in &self.font_rules {
            out.push_str(&rule.selectors);
            out.push_str("{font-family:");
            out.push_str(&rule.family);
            out.push('}');
        }
        out
    }

    /// Patch the text content of a `<style>` element, staying inside a CDATA wrapper if present.
    pub fn apply_to_element_text(&self, text: &str) -> String {
        const OPEN: &str = "<![CDATA[";
        const CLOSE: &str = "]]>";

        let trimmed = text.trim();
        if let Some(inner) = trimmed
            .strip_prefix(OPEN)
            .and_then(|rest| rest.strip_suffix(CLOSE))
        {
            let lead = &text[..text.len() - text.trim_start().len()];
            let tail = &text[text.trim_end().len()..];
            return format!("{lead}{OPEN}{}{CLOSE}{tail}", self.apply(inner));
        }
        self.apply(text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/style.rs"]
mod tests;
